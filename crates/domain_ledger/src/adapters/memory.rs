//! In-memory storage adapter
//!
//! Reference implementation of the `LedgerStore` port, used by the test
//! suite and by callers that don't need durable storage. A single `RwLock`
//! guards the whole state, so an entry commit and a counter increment are
//! each atomic and a reader can never observe a half-written entry.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::NaiveDate;

use core_kernel::{AccountId, CompanyId, JournalEntryId, PortError};

use crate::account::Account;
use crate::journal::JournalEntry;
use crate::ports::{LedgerStore, PostedLine, SequenceScope};

#[derive(Default)]
struct State {
    accounts: HashMap<AccountId, Account>,
    entries: HashMap<JournalEntryId, JournalEntry>,
    counters: HashMap<SequenceScope, u32>,
}

/// In-memory `LedgerStore` adapter
#[derive(Default)]
pub struct InMemoryLedgerStore {
    state: RwLock<State>,
}

impl InMemoryLedgerStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, State>, PortError> {
        self.state
            .read()
            .map_err(|_| PortError::internal("ledger store lock poisoned"))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, State>, PortError> {
        self.state
            .write()
            .map_err(|_| PortError::internal("ledger store lock poisoned"))
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedgerStore {
    async fn insert_account(&self, account: Account) -> Result<(), PortError> {
        let mut state = self.write()?;

        let duplicate_code = state.accounts.values().any(|existing| {
            existing.company_id == account.company_id && existing.code == account.code
        });
        if duplicate_code {
            return Err(PortError::conflict(format!(
                "account code '{}' already exists for company",
                account.code
            )));
        }

        state.accounts.insert(account.id, account);
        Ok(())
    }

    async fn account(&self, company_id: CompanyId, id: AccountId) -> Result<Account, PortError> {
        let state = self.read()?;
        state
            .accounts
            .get(&id)
            .filter(|a| a.company_id == company_id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Account", id))
    }

    async fn accounts(&self, company_id: CompanyId) -> Result<Vec<Account>, PortError> {
        let state = self.read()?;
        let mut accounts: Vec<Account> = state
            .accounts
            .values()
            .filter(|a| a.company_id == company_id)
            .cloned()
            .collect();
        accounts.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(accounts)
    }

    async fn deactivate_account(
        &self,
        company_id: CompanyId,
        id: AccountId,
    ) -> Result<(), PortError> {
        let mut state = self.write()?;
        match state.accounts.get_mut(&id) {
            Some(account) if account.company_id == company_id => {
                account.is_active = false;
                Ok(())
            }
            _ => Err(PortError::not_found("Account", id)),
        }
    }

    async fn commit_entry(&self, entry: JournalEntry) -> Result<(), PortError> {
        let mut state = self.write()?;

        let number_taken = state.entries.values().any(|existing| {
            existing.company_id == entry.company_id && existing.entry_number == entry.entry_number
        });
        if number_taken {
            return Err(PortError::conflict(format!(
                "entry number '{}' already exists for company",
                entry.entry_number
            )));
        }

        state.entries.insert(entry.id, entry);
        Ok(())
    }

    async fn entry(
        &self,
        company_id: CompanyId,
        id: JournalEntryId,
    ) -> Result<JournalEntry, PortError> {
        let state = self.read()?;
        state
            .entries
            .get(&id)
            .filter(|e| e.company_id == company_id)
            .cloned()
            .ok_or_else(|| PortError::not_found("JournalEntry", id))
    }

    async fn posted_lines(
        &self,
        company_id: CompanyId,
        account_id: AccountId,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<PostedLine>, PortError> {
        let state = self.read()?;

        let mut lines = Vec::new();
        for entry in state.entries.values() {
            if entry.company_id != company_id || !entry.is_posted {
                continue;
            }
            if from.is_some_and(|from| entry.entry_date < from)
                || to.is_some_and(|to| entry.entry_date > to)
            {
                continue;
            }
            for line in &entry.lines {
                if line.account_id == account_id {
                    lines.push(PostedLine {
                        account_id,
                        entry_date: entry.entry_date,
                        debit: line.debit,
                        credit: line.credit,
                    });
                }
            }
        }

        lines.sort_by_key(|line| line.entry_date);
        Ok(lines)
    }

    async fn next_sequence(&self, scope: &SequenceScope) -> Result<u32, PortError> {
        let mut state = self.write()?;
        let counter = state.counters.entry(*scope).or_insert(0);
        *counter += 1;
        Ok(*counter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::AccountType;
    use crate::journal::DocumentType;

    #[tokio::test]
    async fn test_duplicate_account_code_conflicts() {
        let store = InMemoryLedgerStore::new();
        let company_id = CompanyId::new();

        store
            .insert_account(Account::new(
                AccountId::new(),
                company_id,
                "1000",
                "Kas",
                AccountType::CashBank,
            ))
            .await
            .unwrap();

        let err = store
            .insert_account(Account::new(
                AccountId::new(),
                company_id,
                "1000",
                "Kas Kecil",
                AccountType::CashBank,
            ))
            .await
            .unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_same_code_allowed_across_companies() {
        let store = InMemoryLedgerStore::new();

        for _ in 0..2 {
            store
                .insert_account(Account::new(
                    AccountId::new(),
                    CompanyId::new(),
                    "1000",
                    "Kas",
                    AccountType::CashBank,
                ))
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_counter_starts_at_one_per_scope() {
        let store = InMemoryLedgerStore::new();
        let scope = SequenceScope {
            company_id: CompanyId::new(),
            document_type: DocumentType::Invoice,
            year: 2026,
            month: 3,
        };

        assert_eq!(store.next_sequence(&scope).await.unwrap(), 1);
        assert_eq!(store.next_sequence(&scope).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_account_lookup_is_company_scoped() {
        let store = InMemoryLedgerStore::new();
        let company_id = CompanyId::new();
        let id = AccountId::new();

        store
            .insert_account(Account::new(id, company_id, "1000", "Kas", AccountType::CashBank))
            .await
            .unwrap();

        assert!(store.account(company_id, id).await.is_ok());
        assert!(store.account(CompanyId::new(), id).await.is_err());
    }
}
