//! Decoding of "get-ledger-accounts" pages.

use serde_json::Value;

use super::error::ImportError;
use crate::ledger::{ExternalLedgerAccount, NewLedgerAccount};

/// Reads the records of one page from the action output's `records` array.
///
/// # Errors
///
/// Returns `ImportError::MalformedRecords` if `records` is missing, is not an
/// array, or holds a record without a usable id and name.
pub fn parse_page(page: usize, output: &Value) -> Result<Vec<NewLedgerAccount>, ImportError> {
    let records = output
        .get("records")
        .and_then(Value::as_array)
        .ok_or_else(|| ImportError::MalformedRecords {
            page,
            reason: "output has no records array".to_string(),
        })?;

    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            ExternalLedgerAccount::from_value(record)
                .as_ref()
                .and_then(ExternalLedgerAccount::to_new_account)
                .ok_or_else(|| ImportError::MalformedRecords {
                    page,
                    reason: format!("record {index} has no usable id and name"),
                })
        })
        .collect()
}
