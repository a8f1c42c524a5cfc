//! Journal entry submission.
//!
//! Entries are validated locally and forwarded as a single remote action;
//! nothing is persisted here, the external system is the system of record.

pub mod error;
pub mod fault;
pub mod service;
pub mod types;
pub mod validation;

pub use error::SubmitError;
pub use fault::FaultSummary;
pub use service::JournalEntrySubmitter;
pub use types::{EntryType, JournalEntryLine, JournalEntryRequest};
pub use validation::{ValidationError, validate_request};
