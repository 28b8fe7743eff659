//! In-memory session: bearer token plus the signed-in user.

use std::sync::Arc;

use secrecy::SecretString;
use shopfront_core::User;
use tokio::sync::RwLock;

/// Current authentication state.
#[derive(Clone, Default)]
pub struct Session {
    pub token: Option<SecretString>,
    pub user: Option<User>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("user", &self.user)
            .finish()
    }
}

/// Shared handle to the process-wide session.
///
/// Cloning is cheap and every clone sees the same state. The gateway reads the
/// token on each request, so a write is picked up by the next call.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<Session>>,
}

impl SessionStore {
    /// Empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the token and user returned by login or register.
    pub async fn sign_in(&self, token: SecretString, user: User) {
        let mut session = self.inner.write().await;
        session.token = Some(token);
        session.user = Some(user);
    }

    /// Replace only the bearer token.
    pub async fn set_token(&self, token: SecretString) {
        self.inner.write().await.token = Some(token);
    }

    /// Drop the token and user.
    pub async fn clear(&self) {
        *self.inner.write().await = Session::default();
    }

    /// Token to attach to outgoing requests.
    pub async fn token(&self) -> Option<SecretString> {
        self.inner.read().await.token.clone()
    }

    pub async fn user(&self) -> Option<User> {
        self.inner.read().await.user.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.inner.read().await.token.is_some()
    }

    /// Copy of the whole session.
    pub async fn snapshot(&self) -> Session {
        self.inner.read().await.clone()
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}
