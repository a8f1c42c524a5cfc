//! Core business logic for LedgerLink.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! The external accounting system and the account store are reached only
//! through traits; concrete adapters live in `ledgerlink-integration` and
//! `ledgerlink-db`.
//!
//! # Modules
//!
//! - `gateway` - Capability surface of the external accounting integration
//! - `ledger` - Ledger account model and store contract
//! - `import` - Paginated chart-of-accounts import with atomic replace
//! - `journal` - Journal entry validation and submission

pub mod gateway;
pub mod import;
pub mod journal;
pub mod ledger;

#[cfg(any(test, feature = "testing"))]
pub mod testing;
