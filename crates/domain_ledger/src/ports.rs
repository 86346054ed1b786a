//! Storage port for the ledger domain
//!
//! The domain services depend only on this trait; adapters provide the
//! implementation (in-memory here, PostgreSQL in `infra_db`). The two
//! operations with concurrency obligations are `commit_entry` (the entry and
//! all its lines land as one atomic unit, and a duplicate entry number is a
//! conflict) and `next_sequence` (a single atomic increment-and-read, never
//! a read-then-write done by the caller).

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{AccountId, CompanyId, JournalEntryId, Money, PortError};

use crate::account::Account;
use crate::journal::{DocumentType, JournalEntry};

/// One posted line as seen by balance computation
///
/// Only lines of `is_posted = true` entries are ever returned; drafts are
/// invisible to balances and reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostedLine {
    pub account_id: AccountId,
    pub entry_date: NaiveDate,
    pub debit: Money,
    pub credit: Money,
}

/// Scope of a document number counter: (company, type, year, month)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SequenceScope {
    pub company_id: CompanyId,
    pub document_type: DocumentType,
    pub year: i32,
    pub month: u32,
}

impl SequenceScope {
    /// Derives the scope from a date
    pub fn for_date(company_id: CompanyId, document_type: DocumentType, at: NaiveDate) -> Self {
        use chrono::Datelike;
        Self {
            company_id,
            document_type,
            year: at.year(),
            month: at.month(),
        }
    }

    /// Returns the `YYYYMM` segment of the document number
    pub fn year_month(&self) -> String {
        format!("{:04}{:02}", self.year, self.month)
    }
}

/// Storage port for accounts, journal entries, and document counters
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Inserts a new account; the account code must be unique per company
    async fn insert_account(&self, account: Account) -> Result<(), PortError>;

    /// Fetches one account of a company
    async fn account(&self, company_id: CompanyId, id: AccountId) -> Result<Account, PortError>;

    /// Fetches all accounts of a company, active or not
    async fn accounts(&self, company_id: CompanyId) -> Result<Vec<Account>, PortError>;

    /// Marks an account inactive; posted history referencing it is untouched
    async fn deactivate_account(
        &self,
        company_id: CompanyId,
        id: AccountId,
    ) -> Result<(), PortError>;

    /// Commits a journal entry and all its lines as one atomic unit
    ///
    /// Returns `PortError::Conflict` when the entry number is already taken
    /// for the company. A reader can never observe a partially written entry.
    async fn commit_entry(&self, entry: JournalEntry) -> Result<(), PortError>;

    /// Fetches one journal entry of a company, lines included
    async fn entry(
        &self,
        company_id: CompanyId,
        id: JournalEntryId,
    ) -> Result<JournalEntry, PortError>;

    /// Returns the posted lines of an account within an inclusive date window
    ///
    /// `None` bounds are open; only `is_posted` entries contribute.
    async fn posted_lines(
        &self,
        company_id: CompanyId,
        account_id: AccountId,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<PostedLine>, PortError>;

    /// Atomically increments and returns the counter for the scope
    ///
    /// The first call for a scope returns 1. Two concurrent callers can
    /// never receive the same value.
    async fn next_sequence(&self, scope: &SequenceScope) -> Result<u32, PortError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_year_month_is_zero_padded() {
        let scope = SequenceScope::for_date(
            CompanyId::new(),
            DocumentType::Invoice,
            NaiveDate::from_ymd_opt(2026, 3, 7).unwrap(),
        );
        assert_eq!(scope.year_month(), "202603");
    }

    #[test]
    fn test_scope_distinguishes_months() {
        let company_id = CompanyId::new();
        let a = SequenceScope::for_date(
            company_id,
            DocumentType::Invoice,
            NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
        );
        let b = SequenceScope::for_date(
            company_id,
            DocumentType::Invoice,
            NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
        );
        assert_ne!(a, b);
    }
}
