//! Imported chart-of-accounts records and their storage contract.
//!
//! Ledger accounts are read-only outside an import: each import replaces the
//! tenant's whole set.

pub mod account;
pub mod store;

pub use account::{ExternalLedgerAccount, LedgerAccount, NewLedgerAccount};
pub use store::{LedgerAccountStore, StoreError, find_duplicate_external_id};
