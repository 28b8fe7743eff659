//! The `{status, message, data}` wrapper shared by every backend response.

use serde::{Deserialize, Serialize};

/// Envelope status value that marks business success.
pub const SUCCESS_STATUS: &str = "success";

/// Response envelope.
///
/// HTTP 2xx only says the request reached the backend. Whether the operation
/// itself succeeded is decided by `status == "success"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// `"success"` or any other value for a business failure.
    pub status: String,
    /// Human-readable message, usually present on failures.
    pub message: Option<String>,
    /// Payload; may be absent even on success. Left without
    /// `#[serde(default)]`, which would demand `T: Default`.
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Build a successful envelope around `data`.
    #[must_use]
    pub fn success(data: T) -> Self {
        Self {
            status: SUCCESS_STATUS.to_string(),
            message: None,
            data: Some(data),
        }
    }

    /// Build a failed envelope with a message.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: Some(message.into()),
            data: None,
        }
    }

    /// Whether the backend reported business success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == SUCCESS_STATUS
    }
}
