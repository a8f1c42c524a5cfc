//! Local validation of journal entry requests.

use rust_decimal::Decimal;
use serde_json::{Value, json};
use thiserror::Error;

use super::types::{JournalEntryLine, JournalEntryRequest};

/// Why a journal entry request was rejected before reaching the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The body does not have the request shape.
    #[error("Malformed journal entry: {0}")]
    Malformed(String),

    /// The request has no lines.
    #[error("At least one line is required")]
    NoLines,

    /// A line has no amount.
    #[error("Line {line}: amount is required")]
    MissingAmount {
        /// Zero-based line index.
        line: usize,
    },

    /// A line amount is zero or negative.
    #[error("Line {line}: amount must be greater than 0")]
    NonPositiveAmount {
        /// Zero-based line index.
        line: usize,
    },

    /// A line has no currency.
    #[error("Line {line}: currency is required")]
    MissingCurrency {
        /// Zero-based line index.
        line: usize,
    },

    /// A line currency is not a three-letter code.
    #[error("Line {line}: '{currency}' is not a currency code")]
    InvalidCurrency {
        /// Zero-based line index.
        line: usize,
        /// Offending value.
        currency: String,
    },

    /// A line has no ledger account.
    #[error("Line {line}: ledger account is required")]
    MissingLedgerAccount {
        /// Zero-based line index.
        line: usize,
    },
}

impl ValidationError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Malformed(_) => "MALFORMED_REQUEST",
            Self::NoLines => "NO_LINES",
            Self::MissingAmount { .. } => "MISSING_AMOUNT",
            Self::NonPositiveAmount { .. } => "NON_POSITIVE_AMOUNT",
            Self::MissingCurrency { .. } => "MISSING_CURRENCY",
            Self::InvalidCurrency { .. } => "INVALID_CURRENCY",
            Self::MissingLedgerAccount { .. } => "MISSING_LEDGER_ACCOUNT",
        }
    }

    /// Field-level detail for the error response.
    #[must_use]
    pub fn details(&self) -> Option<Value> {
        let (line, field) = match self {
            Self::Malformed(_) => return None,
            Self::NoLines => return Some(json!({ "field": "lines" })),
            Self::MissingAmount { line } | Self::NonPositiveAmount { line } => (line, "amount"),
            Self::MissingCurrency { line } | Self::InvalidCurrency { line, .. } => {
                (line, "currency")
            }
            Self::MissingLedgerAccount { line } => (line, "ledgerAccountId"),
        };
        Some(json!({ "line": line, "field": field }))
    }
}

/// Validates a journal entry request.
///
/// Lines are checked in order and the first problem found is reported.
///
/// # Errors
///
/// Returns the first `ValidationError` found.
pub fn validate_request(request: &JournalEntryRequest) -> Result<(), ValidationError> {
    if request.lines.is_empty() {
        return Err(ValidationError::NoLines);
    }

    request
        .lines
        .iter()
        .enumerate()
        .try_for_each(|(line, entry)| validate_line(line, entry))
}

fn validate_line(line: usize, entry: &JournalEntryLine) -> Result<(), ValidationError> {
    match entry.amount {
        None => return Err(ValidationError::MissingAmount { line }),
        Some(amount) if amount <= Decimal::ZERO => {
            return Err(ValidationError::NonPositiveAmount { line });
        }
        Some(_) => {}
    }

    let currency = entry.currency.trim();
    if currency.is_empty() {
        return Err(ValidationError::MissingCurrency { line });
    }
    if !is_currency_code(currency) {
        return Err(ValidationError::InvalidCurrency {
            line,
            currency: currency.to_string(),
        });
    }

    if entry.ledger_account_id.trim().is_empty() {
        return Err(ValidationError::MissingLedgerAccount { line });
    }

    Ok(())
}

/// Three ASCII letters, in the manner of ISO 4217.
fn is_currency_code(code: &str) -> bool {
    code.len() == 3 && code.bytes().all(|b| b.is_ascii_alphabetic())
}
