//! Scripted gateway.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{Value, json};

use ledgerlink_shared::Tenant;

use crate::gateway::{AccountingGateway, ActionRun, Connection, GatewayError};

/// One `run_action` call as seen by the gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// Tenant the call ran for.
    pub tenant_id: String,
    /// Connection addressed.
    pub connection_id: String,
    /// Action name.
    pub action: String,
    /// Input payload.
    pub input: Option<Value>,
}

/// Gateway answering from queued responses and recording every call.
#[derive(Debug, Default)]
pub struct ScriptedGateway {
    connections: Vec<Connection>,
    connection_error: Option<GatewayError>,
    responses: Mutex<HashMap<String, VecDeque<Result<ActionRun, GatewayError>>>>,
    calls: Mutex<Vec<RecordedCall>>,
    connection_lookups: AtomicUsize,
}

impl ScriptedGateway {
    /// Creates a gateway with no connections.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a connection to the list returned by `list_connections`.
    #[must_use]
    pub fn with_connection(mut self, id: &str) -> Self {
        self.connections.push(Connection::new(id));
        self
    }

    /// Makes `list_connections` fail.
    #[must_use]
    pub fn with_connection_error(mut self, err: GatewayError) -> Self {
        self.connection_error = Some(err);
        self
    }

    /// Queues a successful output for `action`.
    pub fn push_output(&self, action: &str, output: Value) {
        self.push(action, Ok(ActionRun::from_output(output)));
    }

    /// Queues a failure for `action`.
    pub fn push_error(&self, action: &str, err: GatewayError) {
        self.push(action, Err(err));
    }

    fn push(&self, action: &str, response: Result<ActionRun, GatewayError>) {
        self.responses
            .lock()
            .expect("responses lock poisoned")
            .entry(action.to_string())
            .or_default()
            .push_back(response);
    }

    /// All `run_action` calls so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("calls lock poisoned").clone()
    }

    /// Number of `run_action` calls made for `action`.
    #[must_use]
    pub fn calls_for(&self, action: &str) -> usize {
        self.calls().iter().filter(|c| c.action == action).count()
    }

    /// Number of `list_connections` calls.
    #[must_use]
    pub fn connection_lookups(&self) -> usize {
        self.connection_lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AccountingGateway for ScriptedGateway {
    async fn list_connections(&self, _tenant: &Tenant) -> Result<Vec<Connection>, GatewayError> {
        self.connection_lookups.fetch_add(1, Ordering::SeqCst);
        match &self.connection_error {
            Some(err) => Err(err.clone()),
            None => Ok(self.connections.clone()),
        }
    }

    async fn run_action(
        &self,
        tenant: &Tenant,
        connection_id: &str,
        action: &str,
        input: Option<Value>,
    ) -> Result<ActionRun, GatewayError> {
        self.calls
            .lock()
            .expect("calls lock poisoned")
            .push(RecordedCall {
                tenant_id: tenant.id.to_string(),
                connection_id: connection_id.to_string(),
                action: action.to_string(),
                input,
            });

        self.responses
            .lock()
            .expect("responses lock poisoned")
            .get_mut(action)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| {
                Err(GatewayError::new(format!("no scripted response for {action}")).with_status(501))
            })
    }
}

/// Builds a "get-ledger-accounts" output from `(id, name)` pairs.
#[must_use]
pub fn ledger_accounts_page(records: &[(&str, &str)], cursor: Option<&str>) -> Value {
    let records: Vec<Value> = records
        .iter()
        .map(|(id, name)| json!({ "id": id, "name": name }))
        .collect();
    match cursor {
        Some(c) => json!({ "records": records, "cursor": c }),
        None => json!({ "records": records }),
    }
}
