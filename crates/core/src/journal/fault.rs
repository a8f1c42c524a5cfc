//! Provider fault extraction for remote errors.
//!
//! Some accounting providers answer a rejected journal entry with a nested
//! fault document:
//!
//! ```text
//! data.response.data.Fault.Error[0] = { "Message": "...", "Detail": "..." }
//! ```
//!
//! The summary pulls that pair out for display and otherwise falls back to
//! the generic error message.

use serde::Serialize;
use serde_json::Value;

use crate::gateway::GatewayError;

const FAULT_POINTER: &str = "/response/data/Fault/Error/0";

/// Display-ready message/detail pair for a remote failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaultSummary {
    /// Headline message.
    pub message: String,
    /// Optional provider detail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl FaultSummary {
    /// Extracts the provider fault from a remote error payload.
    #[must_use]
    pub fn extract(data: &Value) -> Option<Self> {
        let fault = data.pointer(FAULT_POINTER)?;
        let message = fault
            .get("Message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())?;
        let detail = fault
            .get("Detail")
            .and_then(Value::as_str)
            .filter(|d| !d.is_empty())
            .map(str::to_string);
        Some(Self {
            message: message.to_string(),
            detail,
        })
    }

    /// Summarizes a gateway error, preferring the provider fault.
    #[must_use]
    pub fn for_error(err: &GatewayError) -> Self {
        err.data
            .as_ref()
            .and_then(Self::extract)
            .unwrap_or_else(|| Self {
                message: err.message.clone(),
                detail: None,
            })
    }
}
