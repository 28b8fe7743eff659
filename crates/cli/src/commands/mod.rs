//! Command implementations.
//!
//! Each command drives one screen controller and prints the state it settles
//! in. A controller that settles with an error message fails the command.

pub mod cart;
pub mod catalogue;
pub mod plans;
pub mod seller;

use secrecy::SecretString;
use shopfront_app::AppState;
use thiserror::Error;

/// Errors that end a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Sign-in was rejected.
    #[error("Sign-in failed: {0}")]
    SignIn(String),

    /// The screen ended with an error message.
    #[error("{0}")]
    Screen(String),

    /// Ctrl-C handler could not be installed.
    #[error("Signal handler error: {0}")]
    Signal(#[from] std::io::Error),
}

/// The `--password` value, else `SHOPFRONT_PASSWORD`.
pub fn password(arg: Option<String>) -> Result<SecretString, CommandError> {
    arg.or_else(|| std::env::var("SHOPFRONT_PASSWORD").ok())
        .map(SecretString::from)
        .ok_or(CommandError::MissingEnvVar("SHOPFRONT_PASSWORD"))
}

pub async fn sign_in(app: &AppState, email: &str, password: &SecretString) -> Result<(), CommandError> {
    let auth = app.auth();
    auth.login(email, password).await;
    let state = auth.state();
    if let Some(message) = state.error_message {
        return Err(CommandError::SignIn(message));
    }
    if let Some(user) = state.user {
        tracing::info!("Signed in as {} ({})", user.full_name(), user.role);
    }
    Ok(())
}

/// Turn a settled error message into a command failure.
fn settled(error_message: Option<String>) -> Result<(), CommandError> {
    error_message.map_or(Ok(()), |message| Err(CommandError::Screen(message)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_password_argument_wins() {
        let secret = password(Some("hunter2".to_string())).unwrap();
        assert_eq!(secrecy::ExposeSecret::expose_secret(&secret), "hunter2");
    }

    #[test]
    fn test_settled_error_fails() {
        assert!(settled(None).is_ok());
        let err = settled(Some("Error del servidor".to_string())).unwrap_err();
        assert_eq!(err.to_string(), "Error del servidor");
    }
}
