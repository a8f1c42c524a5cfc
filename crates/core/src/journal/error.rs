//! Journal entry submission errors.

use serde_json::Value;
use thiserror::Error;

use super::fault::FaultSummary;
use super::validation::ValidationError;
use crate::gateway::GatewayError;

/// Errors that can occur while submitting a journal entry.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The request failed local validation; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The tenant has no linked accounting system.
    #[error("No apps connected to create journal entries")]
    NoConnection,

    /// The remote system rejected the entry or could not be reached.
    #[error("{0}")]
    RemoteActionFailed(GatewayError),
}

impl SubmitError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(err) => err.error_code(),
            Self::NoConnection => "NO_CONNECTION",
            Self::RemoteActionFailed(_) => "REMOTE_ACTION_FAILED",
        }
    }

    /// Returns the HTTP status code for this error.
    ///
    /// Remote failures keep the remote status.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::NoConnection => 400,
            Self::RemoteActionFailed(err) => err.status_or_default(),
        }
    }

    /// Structured payload for the error response.
    ///
    /// Validation errors carry the offending line/field; remote failures carry
    /// the remote payload untouched.
    #[must_use]
    pub fn data(&self) -> Option<Value> {
        match self {
            Self::Validation(err) => err.details(),
            Self::NoConnection => None,
            Self::RemoteActionFailed(err) => err.data.clone(),
        }
    }

    /// Provider fault summary, for remote failures only.
    #[must_use]
    pub fn fault(&self) -> Option<FaultSummary> {
        match self {
            Self::RemoteActionFailed(err) => Some(FaultSummary::for_error(err)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validation_maps_to_400() {
        let err = SubmitError::from(ValidationError::NoLines);
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.error_code(), "NO_LINES");
        assert!(err.fault().is_none());
    }

    #[test]
    fn test_no_connection() {
        let err = SubmitError::NoConnection;
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.to_string(), "No apps connected to create journal entries");
        assert!(err.data().is_none());
    }

    #[test]
    fn test_remote_status_passes_through() {
        let err = SubmitError::RemoteActionFailed(
            GatewayError::new("Unprocessable").with_status(422).with_data(json!({"x": 1})),
        );
        assert_eq!(err.http_status_code(), 422);
        assert_eq!(err.to_string(), "Unprocessable");
        assert_eq!(err.data(), Some(json!({"x": 1})));
        assert_eq!(err.fault().unwrap().message, "Unprocessable");
    }

    #[test]
    fn test_remote_without_status_is_500() {
        let err = SubmitError::RemoteActionFailed(GatewayError::new("connect error"));
        assert_eq!(err.http_status_code(), 500);
    }
}
