//! Import error types.

use serde_json::Value;
use thiserror::Error;

use crate::gateway::GatewayError;
use crate::ledger::StoreError;

/// Errors that can occur while importing ledger accounts.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The tenant has no linked accounting system.
    #[error("No apps connected to import ledger accounts from")]
    NoConnection,

    /// A gateway call failed.
    #[error("Remote action failed: {0}")]
    RemoteActionFailed(#[from] GatewayError),

    /// The store rejected the new set.
    #[error("Failed to store ledger accounts: {0}")]
    StoreWriteFailed(#[from] StoreError),

    /// The remote kept returning cursors past the page limit.
    #[error("Import stopped after {limit} pages; the remote kept returning a cursor")]
    PageLimitExceeded {
        /// Configured page limit.
        limit: usize,
    },

    /// A page did not contain usable ledger account records.
    #[error("Malformed ledger accounts page {page}: {reason}")]
    MalformedRecords {
        /// Zero-based page index.
        page: usize,
        /// What was wrong with it.
        reason: String,
    },
}

impl ImportError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NoConnection => "NO_CONNECTION",
            Self::RemoteActionFailed(_) => "REMOTE_ACTION_FAILED",
            Self::StoreWriteFailed(_) => "STORE_WRITE_FAILED",
            Self::PageLimitExceeded { .. } => "PAGE_LIMIT_EXCEEDED",
            Self::MalformedRecords { .. } => "MALFORMED_RECORDS",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::NoConnection => 400,
            Self::RemoteActionFailed(_)
            | Self::StoreWriteFailed(_)
            | Self::PageLimitExceeded { .. }
            | Self::MalformedRecords { .. } => 500,
        }
    }

    /// Remote payload carried by the error, if any.
    #[must_use]
    pub fn data(&self) -> Option<Value> {
        match self {
            Self::RemoteActionFailed(err) => err.data.clone(),
            _ => None,
        }
    }
}
