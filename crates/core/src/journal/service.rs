//! Journal entry submitter.

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use ledgerlink_shared::Tenant;

use super::error::SubmitError;
use super::types::JournalEntryRequest;
use super::validation::validate_request;
use crate::gateway::{AccountingGateway, CREATE_JOURNAL_ENTRY, first_connection};

/// Validates journal entries and forwards them to the tenant's accounting system.
pub struct JournalEntrySubmitter {
    gateway: Arc<dyn AccountingGateway>,
}

impl JournalEntrySubmitter {
    /// Creates a new submitter.
    #[must_use]
    pub fn new(gateway: Arc<dyn AccountingGateway>) -> Self {
        Self { gateway }
    }

    /// Submits a journal entry.
    ///
    /// The payload is validated, then forwarded unmodified as one
    /// `create-journal-entry` action on the tenant's first connection. The
    /// remote output is returned as-is.
    ///
    /// # Errors
    ///
    /// - `Validation` before any gateway call
    /// - `NoConnection` if the tenant has no linked accounting system
    /// - `RemoteActionFailed` with the remote status and payload
    pub async fn submit(&self, tenant: &Tenant, payload: Value) -> Result<Value, SubmitError> {
        let request = JournalEntryRequest::from_payload(&payload)?;
        validate_request(&request)?;

        let connection = first_connection(self.gateway.as_ref(), tenant)
            .await
            .map_err(SubmitError::RemoteActionFailed)?
            .ok_or(SubmitError::NoConnection)?;

        info!(
            tenant_id = %tenant.id,
            connection_id = %connection.id,
            lines = request.lines.len(),
            "Submitting journal entry"
        );

        let run = self
            .gateway
            .run_action(tenant, &connection.id, CREATE_JOURNAL_ENTRY, Some(payload))
            .await
            .map_err(|err| {
                warn!(
                    tenant_id = %tenant.id,
                    status = err.status_or_default(),
                    error = %err,
                    "Journal entry rejected"
                );
                SubmitError::RemoteActionFailed(err)
            })?;

        Ok(run.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::GatewayError;
    use crate::journal::ValidationError;
    use crate::testing::{ScriptedGateway, tenant};
    use serde_json::json;

    fn submitter(gateway: &Arc<ScriptedGateway>) -> JournalEntrySubmitter {
        JournalEntrySubmitter::new(gateway.clone())
    }

    fn valid_entry() -> Value {
        json!({
            "lines": [
                {"amount": 100, "currency": "USD", "type": "Debit", "ledgerAccountId": "1"},
                {"amount": 100, "currency": "USD", "type": "Credit", "ledgerAccountId": "2"}
            ],
            "memo": "Office rent"
        })
    }

    #[tokio::test]
    async fn test_empty_lines_never_reach_gateway() {
        let gateway = Arc::new(ScriptedGateway::new().with_connection("conn-1"));

        let err = submitter(&gateway)
            .submit(&tenant("acme"), json!({"lines": []}))
            .await
            .unwrap_err();

        assert!(matches!(err, SubmitError::Validation(ValidationError::NoLines)));
        assert_eq!(gateway.connection_lookups(), 0);
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_zero_amount_rejected() {
        let gateway = Arc::new(ScriptedGateway::new().with_connection("conn-1"));
        let payload = json!({"lines": [
            {"amount": 0, "currency": "USD", "type": "Debit", "ledgerAccountId": "1"}
        ]});

        let err = submitter(&gateway)
            .submit(&tenant("acme"), payload)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SubmitError::Validation(ValidationError::NonPositiveAmount { line: 0 })
        ));
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_body_rejected() {
        let gateway = Arc::new(ScriptedGateway::new().with_connection("conn-1"));

        let err = submitter(&gateway)
            .submit(&tenant("acme"), json!({"lines": "nope"}))
            .await
            .unwrap_err();

        assert!(matches!(err, SubmitError::Validation(ValidationError::Malformed(_))));
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_valid_entry_forwarded_once_unmodified() {
        let gateway = Arc::new(ScriptedGateway::new().with_connection("conn-1"));
        gateway.push_output(CREATE_JOURNAL_ENTRY, json!({"id": "je-42"}));

        let output = submitter(&gateway)
            .submit(&tenant("acme"), valid_entry())
            .await
            .unwrap();

        assert_eq!(output, json!({"id": "je-42"}));
        let calls = gateway.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].action, CREATE_JOURNAL_ENTRY);
        assert_eq!(calls[0].connection_id, "conn-1");
        assert_eq!(calls[0].tenant_id, "acme");
        assert_eq!(calls[0].input, Some(valid_entry()));
    }

    #[tokio::test]
    async fn test_remote_rejection_keeps_status_and_payload() {
        let gateway = Arc::new(ScriptedGateway::new().with_connection("conn-1"));
        let data = json!({"response": {"data": {"Fault": {"Error": [
            {"Message": "Invalid Reference Id", "Detail": "Account 1 not found"}
        ]}}}});
        gateway.push_error(
            CREATE_JOURNAL_ENTRY,
            GatewayError::new("Request failed").with_status(422).with_data(data.clone()),
        );

        let err = submitter(&gateway)
            .submit(&tenant("acme"), valid_entry())
            .await
            .unwrap_err();

        assert_eq!(err.http_status_code(), 422);
        assert_eq!(err.data(), Some(data));
        let fault = err.fault().unwrap();
        assert_eq!(fault.message, "Invalid Reference Id");
        assert_eq!(fault.detail.as_deref(), Some("Account 1 not found"));
        assert_eq!(gateway.calls_for(CREATE_JOURNAL_ENTRY), 1);
    }

    #[tokio::test]
    async fn test_no_connection() {
        let gateway = Arc::new(ScriptedGateway::new());

        let err = submitter(&gateway)
            .submit(&tenant("acme"), valid_entry())
            .await
            .unwrap_err();

        assert!(matches!(err, SubmitError::NoConnection));
        assert_eq!(err.http_status_code(), 400);
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_connection_lookup_failure() {
        let gateway = Arc::new(
            ScriptedGateway::new().with_connection_error(GatewayError::new("down").with_status(503)),
        );

        let err = submitter(&gateway)
            .submit(&tenant("acme"), valid_entry())
            .await
            .unwrap_err();

        assert_eq!(err.http_status_code(), 503);
        assert!(gateway.calls().is_empty());
    }
}
