//! In-memory doubles for the gateway and store traits.
//!
//! Compiled for this crate's tests and for downstream crates that enable the
//! `testing` feature.

mod gateway;
mod store;

pub use gateway::{RecordedCall, ScriptedGateway, ledger_accounts_page};
pub use store::InMemoryLedgerAccountStore;

use ledgerlink_shared::{Tenant, TenantId};

/// Builds a tenant from a raw identifier.
///
/// # Panics
///
/// Panics if `id` is blank.
#[must_use]
pub fn tenant(id: &str) -> Tenant {
    Tenant::new(TenantId::new(id).expect("tenant id must not be blank"))
}
