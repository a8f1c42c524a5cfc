//! Journal entry request types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::validation::ValidationError;

/// Side of a journal entry line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryType {
    /// Debit line.
    Debit,
    /// Credit line.
    Credit,
}

/// One line of a journal entry.
///
/// Fields a form may leave empty are optional or default to empty so that
/// validation, not decoding, reports them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntryLine {
    /// Line amount; must be positive.
    #[serde(default)]
    pub amount: Option<Decimal>,
    /// Currency code.
    #[serde(default)]
    pub currency: String,
    /// Debit or credit.
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    /// External id of the ledger account the line posts to.
    #[serde(default)]
    pub ledger_account_id: String,
}

/// A journal entry to create in the external system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntryRequest {
    /// Ordered entry lines.
    #[serde(default)]
    pub lines: Vec<JournalEntryLine>,
}

impl JournalEntryRequest {
    /// Decodes a request from a raw JSON body.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::Malformed` if the body does not have the
    /// request shape.
    pub fn from_payload(payload: &Value) -> Result<Self, ValidationError> {
        Self::deserialize(payload).map_err(|e| ValidationError::Malformed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_decode_numeric_and_string_amounts() {
        let request = JournalEntryRequest::from_payload(&json!({
            "lines": [
                {"amount": 100, "currency": "USD", "type": "Debit", "ledgerAccountId": "1"},
                {"amount": "99.95", "currency": "USD", "type": "Credit", "ledgerAccountId": "2"}
            ]
        }))
        .unwrap();

        assert_eq!(request.lines[0].amount, Some(dec!(100)));
        assert_eq!(request.lines[0].entry_type, EntryType::Debit);
        assert_eq!(request.lines[1].amount, Some(dec!(99.95)));
        assert_eq!(request.lines[1].ledger_account_id, "2");
    }

    #[test]
    fn test_decode_missing_optional_fields() {
        let request = JournalEntryRequest::from_payload(&json!({
            "lines": [{"amount": null, "type": "Credit"}]
        }))
        .unwrap();
        assert_eq!(request.lines[0].amount, None);
        assert!(request.lines[0].currency.is_empty());
        assert!(request.lines[0].ledger_account_id.is_empty());
    }

    #[test]
    fn test_decode_missing_lines_is_empty() {
        let request = JournalEntryRequest::from_payload(&json!({})).unwrap();
        assert!(request.lines.is_empty());
    }

    #[test]
    fn test_decode_rejects_unknown_type() {
        let err = JournalEntryRequest::from_payload(&json!({
            "lines": [{"amount": 1, "currency": "USD", "type": "Transfer", "ledgerAccountId": "1"}]
        }))
        .unwrap_err();
        assert!(matches!(err, ValidationError::Malformed(_)));
    }

    #[test]
    fn test_decode_rejects_non_object() {
        assert!(JournalEntryRequest::from_payload(&json!([1, 2])).is_err());
    }
}
