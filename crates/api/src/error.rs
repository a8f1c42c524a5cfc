//! API error type.
//!
//! Every handler error ends up here and is rendered as
//! `{ error, code, data?, fault? }` with the status its domain error names.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;
use tracing::error;

use ledgerlink_core::import::ImportError;
use ledgerlink_core::journal::{FaultSummary, SubmitError};
use ledgerlink_core::ledger::StoreError;

/// Error body sent to clients.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
    /// Stable machine-readable code.
    pub code: &'static str,
    /// Structured detail, such as the remote payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Provider fault summary for remote submission failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fault: Option<FaultSummary>,
}

const INTERNAL_MESSAGE: &str = "Internal Server Error";

/// Errors returned by API handlers.
#[derive(Debug)]
pub enum ApiError {
    /// No resolvable tenant.
    Unauthenticated {
        /// Error code.
        code: &'static str,
        /// Message.
        message: &'static str,
    },
    /// Import failed.
    Import(ImportError),
    /// Journal entry submission failed.
    Submit(SubmitError),
    /// Reading stored accounts failed.
    Store(StoreError),
}

impl ApiError {
    /// Builds an unauthenticated error.
    #[must_use]
    pub const fn unauthenticated(code: &'static str, message: &'static str) -> Self {
        Self::Unauthenticated { code, message }
    }

    /// Returns the HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        let code = match self {
            Self::Unauthenticated { .. } => 401,
            Self::Import(err) => err.http_status_code(),
            Self::Submit(err) => err.http_status_code(),
            Self::Store(_) => 500,
        };
        // An error never leaves with a success or redirect status.
        match StatusCode::from_u16(code) {
            Ok(status) if status.is_client_error() || status.is_server_error() => status,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Database failure detail that must stay in the logs.
    fn internal_detail(&self) -> Option<&str> {
        match self {
            Self::Store(StoreError::Database(detail))
            | Self::Import(ImportError::StoreWriteFailed(StoreError::Database(detail))) => {
                Some(detail)
            }
            _ => None,
        }
    }

    /// Builds the response body.
    #[must_use]
    pub fn body(&self) -> ErrorBody {
        match self {
            Self::Unauthenticated { code, message } => ErrorBody {
                error: (*message).to_string(),
                code: *code,
                data: None,
                fault: None,
            },
            Self::Import(err) => ErrorBody {
                error: self
                    .internal_detail()
                    .map_or_else(|| err.to_string(), |_| INTERNAL_MESSAGE.to_string()),
                code: err.error_code(),
                data: err.data(),
                fault: None,
            },
            Self::Submit(err) => ErrorBody {
                error: err.to_string(),
                code: err.error_code(),
                data: err.data(),
                fault: err.fault(),
            },
            Self::Store(err) => ErrorBody {
                error: self
                    .internal_detail()
                    .map_or_else(|| err.to_string(), |_| INTERNAL_MESSAGE.to_string()),
                code: err.error_code(),
                data: None,
                fault: None,
            },
        }
    }
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        Self::Import(err)
    }
}

impl From<SubmitError> for ApiError {
    fn from(err: SubmitError) -> Self {
        Self::Submit(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = self.body();

        if let Some(detail) = self.internal_detail() {
            error!(status = status.as_u16(), code = body.code, error = %detail, "Request failed");
        } else if status.is_server_error() {
            error!(status = status.as_u16(), code = body.code, error = %body.error, "Request failed");
        }

        (status, Json(body)).into_response()
    }
}
