//! Error types for backend calls.

use shopfront_core::Envelope;
use thiserror::Error;

/// Failure of a single backend call.
///
/// Callers classify by kind: transport and decode failures mean the response
/// never arrived in usable form, [`ApiError::Http`] carries the status code of
/// a non-2xx answer, and [`ApiError::Business`] is a 2xx envelope whose
/// `status` was not `"success"`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, timeout or TLS failure.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("HTTP {status}")]
    Http { status: u16 },

    /// A 2xx body that is not a valid envelope.
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The envelope reported a business failure.
    #[error("{}", message.as_deref().unwrap_or("request failed"))]
    Business { message: Option<String> },

    /// An endpoint path could not be joined onto the base URL.
    #[error("invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ApiError {
    /// HTTP status code, for [`ApiError::Http`] only.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status } => Some(*status),
            _ => None,
        }
    }

    /// No usable response was received.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Decode(_) | Self::InvalidUrl(_))
    }

    /// Backend message of a business failure.
    #[must_use]
    pub fn business_message(&self) -> Option<&str> {
        match self {
            Self::Business { message } => message.as_deref(),
            _ => None,
        }
    }
}

/// Turn an envelope into a plain result.
pub trait EnvelopeExt<T> {
    /// `Ok(data)` when the envelope reports success, otherwise
    /// [`ApiError::Business`] with the backend message.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Business` for any status other than `"success"`.
    fn into_result(self) -> Result<Option<T>, ApiError>;
}

impl<T> EnvelopeExt<T> for Envelope<T> {
    fn into_result(self) -> Result<Option<T>, ApiError> {
        if self.is_success() {
            Ok(self.data)
        } else {
            Err(ApiError::Business {
                message: self.message,
            })
        }
    }
}
