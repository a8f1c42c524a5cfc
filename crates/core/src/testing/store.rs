//! In-memory ledger account store.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;

use ledgerlink_shared::{LedgerAccountId, TenantId};

use crate::ledger::{
    LedgerAccount, LedgerAccountStore, NewLedgerAccount, StoreError, find_duplicate_external_id,
};

/// Store keeping each tenant's set in a map, with the same replace semantics
/// as the database repository.
#[derive(Debug, Default)]
pub struct InMemoryLedgerAccountStore {
    accounts: Mutex<HashMap<TenantId, Vec<LedgerAccount>>>,
    fail_next: Mutex<Option<StoreError>>,
    replace_calls: AtomicUsize,
}

impl InMemoryLedgerAccountStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `replace_all` fail with `err`.
    pub fn fail_next_replace(&self, err: StoreError) {
        *self.fail_next.lock().expect("store lock poisoned") = Some(err);
    }

    /// Number of `replace_all` calls, failed ones included.
    #[must_use]
    pub fn replace_calls(&self) -> usize {
        self.replace_calls.load(Ordering::SeqCst)
    }

    /// The tenant's accounts in insertion order.
    #[must_use]
    pub fn snapshot(&self, tenant_id: &TenantId) -> Vec<LedgerAccount> {
        self.accounts
            .lock()
            .expect("store lock poisoned")
            .get(tenant_id)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl LedgerAccountStore for InMemoryLedgerAccountStore {
    async fn replace_all(
        &self,
        tenant_id: &TenantId,
        accounts: Vec<NewLedgerAccount>,
    ) -> Result<Vec<LedgerAccount>, StoreError> {
        self.replace_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(err) = self.fail_next.lock().expect("store lock poisoned").take() {
            return Err(err);
        }
        if let Some(dup) = find_duplicate_external_id(&accounts) {
            return Err(StoreError::ConstraintViolation(format!(
                "duplicate external id '{dup}' for tenant {tenant_id}"
            )));
        }

        let now = Utc::now();
        let stored: Vec<LedgerAccount> = accounts
            .into_iter()
            .zip(0..)
            .map(|(account, position)| LedgerAccount {
                id: LedgerAccountId::new(),
                tenant_id: tenant_id.clone(),
                external_id: account.external_id,
                name: account.name,
                position,
                created_at: now,
                updated_at: now,
            })
            .collect();

        self.accounts
            .lock()
            .expect("store lock poisoned")
            .insert(tenant_id.clone(), stored.clone());
        Ok(stored)
    }

    async fn list_by_tenant(&self, tenant_id: &TenantId) -> Result<Vec<LedgerAccount>, StoreError> {
        let mut accounts = self.snapshot(tenant_id);
        accounts.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.position.cmp(&a.position))
        });
        Ok(accounts)
    }
}
