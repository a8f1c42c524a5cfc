//! Ledger accounts migration.
//!
//! Creates the per-tenant store of imported chart-of-accounts records.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(LEDGER_ACCOUNTS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS ledger_accounts CASCADE;")
            .await?;
        Ok(())
    }
}

const LEDGER_ACCOUNTS_SQL: &str = r"
-- Imported chart of accounts, replaced wholesale on every import
CREATE TABLE IF NOT EXISTS ledger_accounts (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    tenant_id VARCHAR(255) NOT NULL,
    external_id VARCHAR(255) NOT NULL,
    name TEXT NOT NULL,
    position INTEGER NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_ledger_accounts_tenant CHECK (length(trim(tenant_id)) > 0),
    CONSTRAINT chk_ledger_accounts_external_id CHECK (length(trim(external_id)) > 0)
);

-- One record per remote account within a tenant
CREATE UNIQUE INDEX IF NOT EXISTS uq_ledger_accounts_tenant_external
    ON ledger_accounts(tenant_id, external_id);

-- Listing, newest first
CREATE INDEX IF NOT EXISTS idx_ledger_accounts_tenant_created
    ON ledger_accounts(tenant_id, created_at DESC, position DESC);
";
