//! Ledger account repository backed by Postgres.

use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, SqlErr, TransactionTrait,
};
use tracing::debug;

use ledgerlink_core::ledger::{
    LedgerAccount, LedgerAccountStore, NewLedgerAccount, StoreError, find_duplicate_external_id,
};
use ledgerlink_shared::{LedgerAccountId, TenantId};

use crate::entities::ledger_accounts;

/// Rows per INSERT statement; keeps bind parameters well under the Postgres limit.
const INSERT_CHUNK: usize = 1000;

/// Ledger account repository.
#[derive(Debug, Clone)]
pub struct LedgerAccountRepository {
    db: DatabaseConnection,
}

impl LedgerAccountRepository {
    /// Creates a new ledger account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Counts the tenant's stored accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count_by_tenant(&self, tenant_id: &TenantId) -> Result<u64, StoreError> {
        ledger_accounts::Entity::find()
            .filter(ledger_accounts::Column::TenantId.eq(tenant_id.as_str()))
            .count(&self.db)
            .await
            .map_err(map_db_err)
    }
}

#[async_trait]
impl LedgerAccountStore for LedgerAccountRepository {
    async fn replace_all(
        &self,
        tenant_id: &TenantId,
        accounts: Vec<NewLedgerAccount>,
    ) -> Result<Vec<LedgerAccount>, StoreError> {
        if let Some(dup) = find_duplicate_external_id(&accounts) {
            return Err(StoreError::ConstraintViolation(format!(
                "duplicate external id '{dup}' for tenant {tenant_id}"
            )));
        }

        let now = now_micros();
        let stored: Vec<LedgerAccount> = accounts
            .into_iter()
            .zip(0_i32..)
            .map(|(account, position)| LedgerAccount {
                id: LedgerAccountId::new(),
                tenant_id: tenant_id.clone(),
                external_id: account.external_id,
                name: account.name,
                position,
                created_at: now,
                updated_at: now,
            })
            .collect();

        let txn = self.db.begin().await.map_err(map_db_err)?;

        let removed = ledger_accounts::Entity::delete_many()
            .filter(ledger_accounts::Column::TenantId.eq(tenant_id.as_str()))
            .exec(&txn)
            .await
            .map_err(map_db_err)?
            .rows_affected;

        for chunk in stored.chunks(INSERT_CHUNK) {
            ledger_accounts::Entity::insert_many(chunk.iter().map(to_active_model))
                .exec_without_returning(&txn)
                .await
                .map_err(map_db_err)?;
        }

        // Dropping an uncommitted transaction rolls it back.
        txn.commit().await.map_err(map_db_err)?;

        debug!(
            tenant_id = %tenant_id,
            removed,
            inserted = stored.len(),
            "Replaced ledger accounts"
        );

        Ok(stored)
    }

    async fn list_by_tenant(&self, tenant_id: &TenantId) -> Result<Vec<LedgerAccount>, StoreError> {
        ledger_accounts::Entity::find()
            .filter(ledger_accounts::Column::TenantId.eq(tenant_id.as_str()))
            .order_by_desc(ledger_accounts::Column::CreatedAt)
            .order_by_desc(ledger_accounts::Column::Position)
            .all(&self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(to_domain)
            .collect()
    }
}

fn to_active_model(account: &LedgerAccount) -> ledger_accounts::ActiveModel {
    ledger_accounts::ActiveModel {
        id: Set(account.id.into_inner()),
        tenant_id: Set(account.tenant_id.as_str().to_string()),
        external_id: Set(account.external_id.clone()),
        name: Set(account.name.clone()),
        position: Set(account.position),
        created_at: Set(account.created_at.into()),
        updated_at: Set(account.updated_at.into()),
    }
}

fn to_domain(model: ledger_accounts::Model) -> Result<LedgerAccount, StoreError> {
    let tenant_id = TenantId::new(&model.tenant_id)
        .ok_or_else(|| StoreError::Database(format!("blank tenant id on row {}", model.id)))?;

    Ok(LedgerAccount {
        id: LedgerAccountId::from_uuid(model.id),
        tenant_id,
        external_id: model.external_id,
        name: model.name,
        position: model.position,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}

/// Current time at the precision Postgres `timestamptz` keeps, so returned
/// accounts match what a later read yields.
fn now_micros() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

fn map_db_err(err: DbErr) -> StoreError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => StoreError::ConstraintViolation(detail),
        _ => StoreError::Database(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_now_has_microsecond_precision() {
        for _ in 0..100 {
            assert_eq!(now_micros().nanosecond() % 1_000, 0);
        }
    }
}
