//! Chart-of-accounts import.
//!
//! An import follows the remote cursor until the last page, then swaps the
//! tenant's stored set for the collected records in one step. A failure at
//! any point before the swap leaves the stored set as it was.

mod error;
mod lock;
mod page;
mod service;


pub use error::ImportError;
pub use lock::TenantLocks;
pub use page::parse_page;
pub use service::ImportSynchronizer;
