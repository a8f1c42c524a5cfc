//! Ledger account types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use ledgerlink_shared::{LedgerAccountId, TenantId};

/// A chart-of-accounts entry as stored for a tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerAccount {
    /// Storage identifier.
    pub id: LedgerAccountId,
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Identifier in the external accounting system, unique per tenant.
    pub external_id: String,
    /// Account name.
    pub name: String,
    /// Zero-based position within the import batch that created it.
    pub position: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// An account about to be stored by an import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLedgerAccount {
    /// Identifier in the external accounting system.
    pub external_id: String,
    /// Account name.
    pub name: String,
}

impl NewLedgerAccount {
    /// Creates a new account, trimming both fields.
    ///
    /// Returns `None` if either field is blank after trimming.
    #[must_use]
    pub fn new(external_id: &str, name: &str) -> Option<Self> {
        let external_id = external_id.trim();
        let name = name.trim();
        if external_id.is_empty() || name.is_empty() {
            return None;
        }
        Some(Self {
            external_id: external_id.to_string(),
            name: name.to_string(),
        })
    }
}

/// A ledger account record as returned by the remote system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalLedgerAccount {
    /// Remote identifier.
    pub id: String,
    /// Remote account name.
    pub name: String,
}

impl ExternalLedgerAccount {
    /// Reads a remote record.
    ///
    /// Accepts string or numeric ids since providers differ on this.
    #[must_use]
    pub fn from_value(record: &Value) -> Option<Self> {
        let id = match record.get("id")? {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };
        let name = record.get("name")?.as_str()?.to_string();
        Some(Self { id, name })
    }

    /// Converts to a storable account; `None` if id or name is blank.
    #[must_use]
    pub fn to_new_account(&self) -> Option<NewLedgerAccount> {
        NewLedgerAccount::new(&self.id, &self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_account_trims_fields() {
        let account = NewLedgerAccount::new("  33 ", " Cash ").unwrap();
        assert_eq!(account.external_id, "33");
        assert_eq!(account.name, "Cash");
    }

    #[test]
    fn test_new_account_rejects_blank_fields() {
        assert!(NewLedgerAccount::new("", "Cash").is_none());
        assert!(NewLedgerAccount::new("33", "   ").is_none());
    }

    #[test]
    fn test_external_record_accepts_numeric_id() {
        let ext = ExternalLedgerAccount::from_value(&json!({"id": 42, "name": "Sales"})).unwrap();
        assert_eq!(ext.id, "42");
        assert_eq!(ext.name, "Sales");
    }

    #[test]
    fn test_external_record_ignores_extra_fields() {
        let ext = ExternalLedgerAccount::from_value(&json!({
            "id": "7",
            "name": "Rent",
            "classification": "Expense"
        }))
        .unwrap();
        assert_eq!(ext.id, "7");
    }

    #[test]
    fn test_external_record_requires_id_and_name() {
        assert!(ExternalLedgerAccount::from_value(&json!({"name": "Sales"})).is_none());
        assert!(ExternalLedgerAccount::from_value(&json!({"id": "1"})).is_none());
        assert!(ExternalLedgerAccount::from_value(&json!({"id": true, "name": "x"})).is_none());
        assert!(ExternalLedgerAccount::from_value(&json!("1")).is_none());
    }
}
