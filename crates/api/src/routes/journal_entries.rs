//! Journal entry routes.

use axum::{Json, Router, body::Bytes, extract::State, routing::post};
use serde_json::Value;

use crate::{AppState, error::ApiError, middleware::AuthTenant};
use ledgerlink_core::journal::{SubmitError, ValidationError};

/// Creates the journal entry routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/journal-entries", post(create_journal_entry))
}

/// POST `/journal-entries` - Validate and forward a journal entry.
///
/// The body is read raw so that unparseable JSON gets the same error shape
/// as any other validation failure.
async fn create_journal_entry(
    State(state): State<AppState>,
    AuthTenant(tenant): AuthTenant,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let payload: Value = serde_json::from_slice(&body).map_err(|e| {
        SubmitError::Validation(ValidationError::Malformed(format!("invalid JSON: {e}")))
    })?;

    let output = state.submitter.submit(&tenant, payload).await?;
    Ok(Json(output))
}
