//! Gateway error type.

use serde_json::Value;
use thiserror::Error;

/// Status reported when the remote side did not supply one.
pub const DEFAULT_STATUS: u16 = 500;

/// A failed gateway call.
///
/// Carries the remote message, the HTTP-like status when the remote answered,
/// and the remote payload untouched so callers can surface provider detail.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct GatewayError {
    /// Human-readable message from the remote side.
    pub message: String,
    /// Remote status code, absent for transport failures.
    pub status: Option<u16>,
    /// Opaque remote payload.
    pub data: Option<Value>,
}

impl GatewayError {
    /// Creates an error with only a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            data: None,
        }
    }

    /// Sets the remote status.
    #[must_use]
    pub const fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the remote payload.
    #[must_use]
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Remote status, or 500 when none was reported.
    #[must_use]
    pub fn status_or_default(&self) -> u16 {
        self.status.unwrap_or(DEFAULT_STATUS)
    }
}
