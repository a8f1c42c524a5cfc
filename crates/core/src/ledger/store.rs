//! Storage contract for imported ledger accounts.

use std::collections::HashSet;

use async_trait::async_trait;
use thiserror::Error;

use ledgerlink_shared::TenantId;

use super::account::{LedgerAccount, NewLedgerAccount};

/// Errors raised by a ledger account store.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The (tenant, external id) uniqueness constraint would be violated.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// The underlying database failed.
    #[error("Database error: {0}")]
    Database(String),
}

impl StoreError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::ConstraintViolation(_) => "CONSTRAINT_VIOLATION",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

/// Per-tenant collection of imported ledger accounts.
#[async_trait]
pub trait LedgerAccountStore: Send + Sync {
    /// Replaces the tenant's whole set with `accounts`.
    ///
    /// Either the new set is stored in full or the previous set is left
    /// untouched. Returns the stored records in insertion order.
    async fn replace_all(
        &self,
        tenant_id: &TenantId,
        accounts: Vec<NewLedgerAccount>,
    ) -> Result<Vec<LedgerAccount>, StoreError>;

    /// Lists the tenant's accounts, newest first.
    async fn list_by_tenant(&self, tenant_id: &TenantId) -> Result<Vec<LedgerAccount>, StoreError>;
}

/// Returns the first external id that appears more than once in the batch.
#[must_use]
pub fn find_duplicate_external_id(accounts: &[NewLedgerAccount]) -> Option<&str> {
    let mut seen = HashSet::with_capacity(accounts.len());
    accounts
        .iter()
        .map(|a| a.external_id.as_str())
        .find(|id| !seen.insert(*id))
}
