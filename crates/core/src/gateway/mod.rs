//! External accounting gateway capability.
//!
//! The gateway is the only way this service talks to the tenant's accounting
//! system. It exposes two capabilities:
//! - listing the tenant's connections
//! - running a named action against one connection, optionally paginated
//!
//! Concrete providers implement [`AccountingGateway`]; the import and journal
//! entry flows only ever see the trait object.

mod error;
mod types;

pub use error::GatewayError;
pub use types::{ActionRun, Connection};

use async_trait::async_trait;
use ledgerlink_shared::Tenant;
use serde_json::Value;

/// Action returning one page of the tenant's chart of accounts.
pub const GET_LEDGER_ACCOUNTS: &str = "get-ledger-accounts";

/// Action creating a journal entry in the external system.
pub const CREATE_JOURNAL_ENTRY: &str = "create-journal-entry";

/// Capability surface of an external accounting integration.
#[async_trait]
pub trait AccountingGateway: Send + Sync {
    /// Lists the tenant's connections to external accounting systems.
    async fn list_connections(&self, tenant: &Tenant) -> Result<Vec<Connection>, GatewayError>;

    /// Runs a named action against a connection.
    ///
    /// `input` is passed through as the action payload; `None` runs the action
    /// without input.
    async fn run_action(
        &self,
        tenant: &Tenant,
        connection_id: &str,
        action: &str,
        input: Option<Value>,
    ) -> Result<ActionRun, GatewayError>;
}

/// Returns the tenant's first connection, if any.
///
/// Only one linked accounting system is assumed to be relevant per tenant.
pub async fn first_connection(
    gateway: &dyn AccountingGateway,
    tenant: &Tenant,
) -> Result<Option<Connection>, GatewayError> {
    Ok(gateway.list_connections(tenant).await?.into_iter().next())
}
