//! Import synchronizer.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, warn};

use ledgerlink_shared::Tenant;

use super::error::ImportError;
use super::lock::TenantLocks;
use super::page::parse_page;
use crate::gateway::{AccountingGateway, GET_LEDGER_ACCOUNTS, first_connection};
use crate::ledger::{LedgerAccount, LedgerAccountStore, NewLedgerAccount};

/// Pulls a tenant's chart of accounts from the gateway and stores it.
pub struct ImportSynchronizer {
    gateway: Arc<dyn AccountingGateway>,
    store: Arc<dyn LedgerAccountStore>,
    max_pages: usize,
    locks: TenantLocks,
}

impl ImportSynchronizer {
    /// Default bound on pages fetched per import.
    pub const DEFAULT_MAX_PAGES: usize = 1000;

    /// Creates a synchronizer with the default page limit.
    #[must_use]
    pub fn new(gateway: Arc<dyn AccountingGateway>, store: Arc<dyn LedgerAccountStore>) -> Self {
        Self {
            gateway,
            store,
            max_pages: Self::DEFAULT_MAX_PAGES,
            locks: TenantLocks::new(),
        }
    }

    /// Sets the page limit. A limit of zero is treated as one.
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    /// Returns the page limit.
    #[must_use]
    pub const fn max_pages(&self) -> usize {
        self.max_pages
    }

    /// Imports the tenant's ledger accounts and makes them the stored set.
    ///
    /// Returns the stored accounts in import order.
    ///
    /// # Errors
    ///
    /// - `NoConnection` if the tenant has no linked accounting system
    /// - `RemoteActionFailed` if any gateway call fails
    /// - `PageLimitExceeded` / `MalformedRecords` for unusable remote pages
    /// - `StoreWriteFailed` if the replace is rejected
    ///
    /// In every error case the previously stored set is unchanged.
    pub async fn import(&self, tenant: &Tenant) -> Result<Vec<LedgerAccount>, ImportError> {
        let _guard = self.locks.acquire(&tenant.id).await;

        let Some(connection) = first_connection(self.gateway.as_ref(), tenant).await? else {
            warn!(tenant_id = %tenant.id, "Import requested without a connection");
            return Err(ImportError::NoConnection);
        };

        info!(
            tenant_id = %tenant.id,
            connection_id = %connection.id,
            "Importing ledger accounts"
        );

        let (accounts, pages) = self.fetch_all(tenant, &connection.id).await?;
        let fetched = accounts.len();

        let stored = self.store.replace_all(&tenant.id, accounts).await?;

        info!(
            tenant_id = %tenant.id,
            pages,
            records = fetched,
            "Ledger accounts imported"
        );

        Ok(stored)
    }

    /// Follows the cursor until the last page, returning all records and the
    /// number of pages read.
    async fn fetch_all(
        &self,
        tenant: &Tenant,
        connection_id: &str,
    ) -> Result<(Vec<NewLedgerAccount>, usize), ImportError> {
        let mut accounts = Vec::new();
        let mut cursor: Option<String> = None;

        for page in 0..self.max_pages {
            let input = cursor.take().map(|c| json!({ "cursor": c }));
            let run = self
                .gateway
                .run_action(tenant, connection_id, GET_LEDGER_ACCOUNTS, input)
                .await?;

            let records = parse_page(page, &run.output)?;
            debug!(
                tenant_id = %tenant.id,
                page,
                records = records.len(),
                has_more = run.cursor.is_some(),
                "Fetched ledger accounts page"
            );
            accounts.extend(records);

            match run.cursor {
                Some(next) => cursor = Some(next),
                None => return Ok((accounts, page + 1)),
            }
        }

        warn!(
            tenant_id = %tenant.id,
            limit = self.max_pages,
            "Ledger accounts import hit the page limit"
        );
        Err(ImportError::PageLimitExceeded {
            limit: self.max_pages,
        })
    }
}
