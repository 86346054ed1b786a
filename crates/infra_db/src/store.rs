//! PostgreSQL implementation of the ledger storage port
//!
//! Journal entries and their lines land in one transaction, so a reader can
//! never observe a partially written entry. Document counters use an upsert
//! with `RETURNING`, which makes increment-and-read a single atomic
//! statement under PostgreSQL's row locking.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::debug;
use uuid::Uuid;

use core_kernel::{
    AccountId, CompanyId, Currency, JournalEntryId, JournalLineId, Money, PortError, UserId,
};
use domain_ledger::{
    Account, AccountType, DocumentType, JournalEntry, JournalEntryLine, LedgerStore, PostedLine,
    SequenceScope,
};

use crate::error::DatabaseError;

/// `LedgerStore` adapter backed by PostgreSQL
#[derive(Debug, Clone)]
pub struct PostgresLedgerStore {
    pool: PgPool,
}

impl PostgresLedgerStore {
    /// Creates a store over the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn account_from_row(row: &PgRow) -> Result<Account, DatabaseError> {
        let type_text: String = row.try_get("account_type")?;
        let account_type = AccountType::parse(&type_text)
            .ok_or_else(|| DatabaseError::decode("account_type", &type_text))?;

        Ok(Account {
            id: AccountId::from(row.try_get::<Uuid, _>("id")?),
            company_id: CompanyId::from(row.try_get::<Uuid, _>("company_id")?),
            code: row.try_get("code")?,
            name: row.try_get("name")?,
            account_type,
            description: row.try_get("description")?,
            is_active: row.try_get("is_active")?,
        })
    }

    fn line_from_row(row: &PgRow) -> Result<JournalEntryLine, DatabaseError> {
        let currency = Self::currency_from_row(row)?;
        Ok(JournalEntryLine {
            id: JournalLineId::from(row.try_get::<Uuid, _>("id")?),
            account_id: AccountId::from(row.try_get::<Uuid, _>("account_id")?),
            debit: Money::new(row.try_get::<Decimal, _>("debit")?, currency),
            credit: Money::new(row.try_get::<Decimal, _>("credit")?, currency),
            description: row.try_get("description")?,
        })
    }

    fn currency_from_row(row: &PgRow) -> Result<Currency, DatabaseError> {
        let code: String = row.try_get("currency")?;
        Currency::from_code(&code).ok_or_else(|| DatabaseError::decode("currency", &code))
    }

    fn document_type_from_row(row: &PgRow) -> Result<DocumentType, DatabaseError> {
        let prefix: String = row.try_get("document_type")?;
        DocumentType::from_prefix(&prefix)
            .ok_or_else(|| DatabaseError::decode("document_type", &prefix))
    }

    fn entry_from_row(
        row: &PgRow,
        lines: Vec<JournalEntryLine>,
    ) -> Result<JournalEntry, DatabaseError> {
        Ok(JournalEntry {
            id: JournalEntryId::from(row.try_get::<Uuid, _>("id")?),
            company_id: CompanyId::from(row.try_get::<Uuid, _>("company_id")?),
            entry_number: row.try_get("entry_number")?,
            document_type: Self::document_type_from_row(row)?,
            entry_date: row.try_get::<NaiveDate, _>("entry_date")?,
            description: row.try_get("description")?,
            reference_type: row.try_get("reference_type")?,
            reference_id: row.try_get::<Option<Uuid>, _>("reference_id")?,
            is_posted: row.try_get("is_posted")?,
            created_by: UserId::from(row.try_get::<Uuid, _>("created_by")?),
            created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
            lines,
        })
    }

    async fn entry_lines(
        &self,
        entry_id: JournalEntryId,
    ) -> Result<Vec<JournalEntryLine>, DatabaseError> {
        let rows = sqlx::query(
            r#"
            SELECT id, account_id, debit, credit, currency, description
            FROM journal_entry_lines
            WHERE entry_id = $1
            ORDER BY line_index
            "#,
        )
        .bind(entry_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::line_from_row).collect()
    }
}

#[async_trait]
impl LedgerStore for PostgresLedgerStore {
    async fn insert_account(&self, account: Account) -> Result<(), PortError> {
        sqlx::query(
            r#"
            INSERT INTO accounts (id, company_id, code, name, account_type, description, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(account.id.as_uuid())
        .bind(account.company_id.as_uuid())
        .bind(&account.code)
        .bind(&account.name)
        .bind(account.account_type.as_str())
        .bind(&account.description)
        .bind(account.is_active)
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        Ok(())
    }

    async fn account(&self, company_id: CompanyId, id: AccountId) -> Result<Account, PortError> {
        let row = sqlx::query(
            r#"
            SELECT id, company_id, code, name, account_type, description, is_active
            FROM accounts
            WHERE id = $1 AND company_id = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(company_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::from)?
        .ok_or_else(|| PortError::not_found("Account", id))?;

        Ok(Self::account_from_row(&row)?)
    }

    async fn accounts(&self, company_id: CompanyId) -> Result<Vec<Account>, PortError> {
        let rows = sqlx::query(
            r#"
            SELECT id, company_id, code, name, account_type, description, is_active
            FROM accounts
            WHERE company_id = $1
            ORDER BY code
            "#,
        )
        .bind(company_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        let accounts = rows
            .iter()
            .map(Self::account_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(accounts)
    }

    async fn deactivate_account(
        &self,
        company_id: CompanyId,
        id: AccountId,
    ) -> Result<(), PortError> {
        let result = sqlx::query(
            r#"
            UPDATE accounts SET is_active = FALSE
            WHERE id = $1 AND company_id = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(company_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        if result.rows_affected() == 0 {
            return Err(PortError::not_found("Account", id));
        }
        Ok(())
    }

    async fn commit_entry(&self, entry: JournalEntry) -> Result<(), PortError> {
        let mut tx = self.pool.begin().await.map_err(DatabaseError::from)?;

        sqlx::query(
            r#"
            INSERT INTO journal_entries (
                id, company_id, entry_number, document_type, entry_date,
                description, reference_type, reference_id, is_posted,
                created_by, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(entry.id.as_uuid())
        .bind(entry.company_id.as_uuid())
        .bind(&entry.entry_number)
        .bind(entry.document_type.prefix())
        .bind(entry.entry_date)
        .bind(&entry.description)
        .bind(&entry.reference_type)
        .bind(entry.reference_id)
        .bind(entry.is_posted)
        .bind(entry.created_by.as_uuid())
        .bind(entry.created_at)
        .execute(&mut *tx)
        .await
        .map_err(DatabaseError::from)?;

        for (index, line) in entry.lines.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO journal_entry_lines (
                    id, entry_id, line_index, account_id, debit, credit,
                    currency, description
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(line.id.as_uuid())
            .bind(entry.id.as_uuid())
            .bind(index as i32)
            .bind(line.account_id.as_uuid())
            .bind(line.debit.amount())
            .bind(line.credit.amount())
            .bind(line.debit.currency().code())
            .bind(&line.description)
            .execute(&mut *tx)
            .await
            .map_err(DatabaseError::from)?;
        }

        tx.commit().await.map_err(DatabaseError::from)?;
        debug!(entry_number = %entry.entry_number, "journal entry committed");
        Ok(())
    }

    async fn entry(
        &self,
        company_id: CompanyId,
        id: JournalEntryId,
    ) -> Result<JournalEntry, PortError> {
        let row = sqlx::query(
            r#"
            SELECT id, company_id, entry_number, document_type, entry_date,
                   description, reference_type, reference_id, is_posted,
                   created_by, created_at
            FROM journal_entries
            WHERE id = $1 AND company_id = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(company_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::from)?
        .ok_or_else(|| PortError::not_found("JournalEntry", id))?;

        let lines = self.entry_lines(id).await?;
        Ok(Self::entry_from_row(&row, lines)?)
    }

    async fn posted_lines(
        &self,
        company_id: CompanyId,
        account_id: AccountId,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<PostedLine>, PortError> {
        let rows = sqlx::query(
            r#"
            SELECT e.entry_date, l.debit, l.credit, l.currency
            FROM journal_entry_lines l
            JOIN journal_entries e ON e.id = l.entry_id
            WHERE e.company_id = $1
              AND l.account_id = $2
              AND e.is_posted
              AND ($3::date IS NULL OR e.entry_date >= $3)
              AND ($4::date IS NULL OR e.entry_date <= $4)
            ORDER BY e.entry_date
            "#,
        )
        .bind(company_id.as_uuid())
        .bind(account_id.as_uuid())
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        let lines = rows
            .iter()
            .map(|row| -> Result<PostedLine, DatabaseError> {
                let currency = Self::currency_from_row(row)?;
                Ok(PostedLine {
                    account_id,
                    entry_date: row.try_get::<NaiveDate, _>("entry_date")?,
                    debit: Money::new(row.try_get::<Decimal, _>("debit")?, currency),
                    credit: Money::new(row.try_get::<Decimal, _>("credit")?, currency),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(lines)
    }

    async fn next_sequence(&self, scope: &SequenceScope) -> Result<u32, PortError> {
        let row = sqlx::query(
            r#"
            INSERT INTO document_counters (company_id, document_type, year_month, last_value)
            VALUES ($1, $2, $3, 1)
            ON CONFLICT (company_id, document_type, year_month)
            DO UPDATE SET last_value = document_counters.last_value + 1
            RETURNING last_value
            "#,
        )
        .bind(scope.company_id.as_uuid())
        .bind(scope.document_type.prefix())
        .bind(scope.year_month())
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        let value: i32 = row.try_get("last_value").map_err(DatabaseError::from)?;
        Ok(value as u32)
    }
}
