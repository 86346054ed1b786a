//! Ledger schema management
//!
//! Creates the ledger tables when they do not exist. Statements are
//! idempotent so repeated startup runs are safe against an already
//! provisioned database.

use sqlx::PgPool;
use tracing::info;

use crate::error::DatabaseError;

const SCHEMA_STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS accounts (
        id              UUID PRIMARY KEY,
        company_id      UUID NOT NULL,
        code            TEXT NOT NULL,
        name            TEXT NOT NULL,
        account_type    TEXT NOT NULL,
        description     TEXT,
        is_active       BOOLEAN NOT NULL DEFAULT TRUE,
        UNIQUE (company_id, code)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS journal_entries (
        id              UUID PRIMARY KEY,
        company_id      UUID NOT NULL,
        entry_number    TEXT NOT NULL,
        document_type   TEXT NOT NULL,
        entry_date      DATE NOT NULL,
        description     TEXT NOT NULL,
        reference_type  TEXT,
        reference_id    UUID,
        is_posted       BOOLEAN NOT NULL,
        created_by      UUID NOT NULL,
        created_at      TIMESTAMPTZ NOT NULL,
        UNIQUE (company_id, entry_number)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS journal_entry_lines (
        id              UUID PRIMARY KEY,
        entry_id        UUID NOT NULL REFERENCES journal_entries (id) ON DELETE CASCADE,
        line_index      INTEGER NOT NULL,
        account_id      UUID NOT NULL REFERENCES accounts (id),
        debit           NUMERIC(20, 4) NOT NULL,
        credit          NUMERIC(20, 4) NOT NULL,
        currency        TEXT NOT NULL,
        description     TEXT,
        UNIQUE (entry_id, line_index)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS document_counters (
        company_id      UUID NOT NULL,
        document_type   TEXT NOT NULL,
        year_month      TEXT NOT NULL,
        last_value      INTEGER NOT NULL,
        PRIMARY KEY (company_id, document_type, year_month)
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_entry_lines_account
        ON journal_entry_lines (account_id)
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_journal_entries_company_date
        ON journal_entries (company_id, entry_date)
    "#,
];

/// Creates the ledger tables and indexes if they are missing
pub async fn ensure_schema(pool: &PgPool) -> Result<(), DatabaseError> {
    for statement in SCHEMA_STATEMENTS {
        sqlx::query(statement).execute(pool).await?;
    }
    info!("ledger schema ensured");
    Ok(())
}
