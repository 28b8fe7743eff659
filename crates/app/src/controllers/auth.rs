//! Sign-in, registration and sign-out.

use secrecy::SecretString;
use shopfront_client::repositories::AuthRepository;
use shopfront_client::{ApiError, EnvelopeExt, SessionStore};
use shopfront_core::{AuthData, NewAccount, User};
use tokio::sync::watch;
use tracing::{info, instrument, warn};

use crate::messages;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthState {
    pub is_loading: bool,
    pub is_logged_in: bool,
    pub user: Option<User>,
    pub error_message: Option<String>,
}

/// Controller behind the login and registration screens.
///
/// The only writer of the [`SessionStore`].
#[derive(Debug)]
pub struct AuthController {
    auth: AuthRepository,
    session: SessionStore,
    state: watch::Sender<AuthState>,
}

impl AuthController {
    #[must_use]
    pub fn new(auth: AuthRepository, session: SessionStore) -> Self {
        let (state, _) = watch::channel(AuthState::default());
        Self {
            auth,
            session,
            state,
        }
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &SecretString) {
        self.begin();
        let result = self
            .auth
            .login(email, password)
            .await
            .and_then(EnvelopeExt::into_result);
        self.finish(result).await;
    }

    #[instrument(skip(self, account, password), fields(email = %account.email))]
    pub async fn register(&self, account: &NewAccount, password: &SecretString) {
        self.begin();
        let result = self
            .auth
            .register(account, password)
            .await
            .and_then(EnvelopeExt::into_result);
        self.finish(result).await;
    }

    /// Drop the session and return to the signed-out state.
    pub async fn logout(&self) {
        self.session.clear().await;
        self.state.send_replace(AuthState::default());
        info!("Signed out");
    }

    pub fn clear_error(&self) {
        self.state
            .send_if_modified(|state| state.error_message.take().is_some());
    }

    /// Whether the signed-in user may create and manage products.
    #[must_use]
    pub fn can_manage_products(&self) -> bool {
        self.state
            .borrow()
            .user
            .as_ref()
            .is_some_and(User::can_manage_products)
    }

    fn begin(&self) {
        self.state.send_modify(|state| {
            state.is_loading = true;
            state.error_message = None;
        });
    }

    async fn finish(&self, result: Result<Option<AuthData>, ApiError>) {
        match result {
            Ok(Some(AuthData { user, token })) => {
                self.session
                    .sign_in(SecretString::from(token), user.clone())
                    .await;
                info!(user_id = %user.id, role = %user.role, "Signed in");
                self.state.send_modify(|state| {
                    state.is_loading = false;
                    state.is_logged_in = true;
                    state.user = Some(user);
                });
            }
            Ok(None) => self.fail(messages::AUTH.business.to_string()),
            Err(e) => {
                warn!(error = %e, "Authentication failed");
                self.fail(messages::AUTH.describe(&e));
            }
        }
    }

    fn fail(&self, message: String) {
        self.state.send_modify(|state| {
            state.is_loading = false;
            state.error_message = Some(message);
        });
    }
}
