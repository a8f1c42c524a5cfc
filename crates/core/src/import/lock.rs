//! Per-tenant import serialization.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use ledgerlink_shared::TenantId;

/// One async mutex per tenant, created on first use.
///
/// Holding the guard keeps other imports for the same tenant waiting; other
/// tenants are unaffected. Locks live for the process lifetime.
#[derive(Debug, Default)]
pub struct TenantLocks {
    inner: DashMap<TenantId, Arc<Mutex<()>>>,
}

impl TenantLocks {
    /// Creates an empty lock table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for the tenant's lock.
    pub async fn acquire(&self, tenant_id: &TenantId) -> OwnedMutexGuard<()> {
        let lock = self.inner.entry(tenant_id.clone()).or_default().clone();
        lock.lock_owned().await
    }
}
