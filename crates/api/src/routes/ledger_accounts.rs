//! Ledger account routes.

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use serde::Serialize;

use crate::{AppState, error::ApiError, middleware::AuthTenant};
use ledgerlink_core::ledger::LedgerAccount;

/// Creates the ledger account routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/ledger-accounts", get(list_ledger_accounts))
        .route("/ledger-accounts/import", post(import_ledger_accounts))
}

/// Response for a ledger account.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerAccountResponse {
    /// Storage ID.
    pub id: String,
    /// ID in the external accounting system.
    pub external_id: String,
    /// Account name.
    pub name: String,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
    /// Last update timestamp (RFC 3339).
    pub updated_at: String,
}

impl From<LedgerAccount> for LedgerAccountResponse {
    fn from(account: LedgerAccount) -> Self {
        Self {
            id: account.id.to_string(),
            external_id: account.external_id,
            name: account.name,
            created_at: account.created_at.to_rfc3339(),
            updated_at: account.updated_at.to_rfc3339(),
        }
    }
}

/// Response listing ledger accounts.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerAccountsResponse {
    /// Accounts.
    pub ledger_accounts: Vec<LedgerAccountResponse>,
}

impl From<Vec<LedgerAccount>> for LedgerAccountsResponse {
    fn from(accounts: Vec<LedgerAccount>) -> Self {
        Self {
            ledger_accounts: accounts.into_iter().map(Into::into).collect(),
        }
    }
}

/// GET `/ledger-accounts` - List the tenant's imported accounts, newest first.
async fn list_ledger_accounts(
    State(state): State<AppState>,
    AuthTenant(tenant): AuthTenant,
) -> Result<Json<LedgerAccountsResponse>, ApiError> {
    let accounts = state.ledger_accounts.list_by_tenant(&tenant.id).await?;
    Ok(Json(accounts.into()))
}

/// POST `/ledger-accounts/import` - Replace the tenant's accounts with the remote chart.
async fn import_ledger_accounts(
    State(state): State<AppState>,
    AuthTenant(tenant): AuthTenant,
) -> Result<Json<LedgerAccountsResponse>, ApiError> {
    let accounts = state.importer.import(&tenant).await?;
    Ok(Json(accounts.into()))
}
