//! Login and registration.

use secrecy::SecretString;
use shopfront_core::{AuthData, DEFAULT_ROLE, Envelope, NewAccount};

use crate::error::ApiError;
use crate::gateway::Gateway;

/// Authentication calls.
///
/// Writing the returned token into the session is the caller's job.
#[derive(Debug, Clone)]
pub struct AuthRepository {
    gateway: Gateway,
}

impl AuthRepository {
    #[must_use]
    pub const fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// # Errors
    ///
    /// Propagates the gateway error unchanged.
    pub async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<Envelope<AuthData>, ApiError> {
        self.gateway.login(email.trim(), password).await
    }

    /// Self-registration always creates a customer account.
    ///
    /// # Errors
    ///
    /// Propagates the gateway error unchanged.
    pub async fn register(
        &self,
        account: &NewAccount,
        password: &SecretString,
    ) -> Result<Envelope<AuthData>, ApiError> {
        self.gateway.register(account, password, DEFAULT_ROLE).await
    }
}
