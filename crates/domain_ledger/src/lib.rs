//! Ledger Domain - Double-Entry Journal Engine
//!
//! This crate implements the accounting core of the platform: a strict
//! double-entry journal with per-company charts of accounts, sequential
//! document numbering, balance calculation and financial reports.
//!
//! # Double-Entry Principles
//!
//! Every posted journal entry carries at least two lines whose debits and
//! credits balance. Once posted an entry is immutable; corrections are made
//! by posting a reversing entry that swaps each line's sides.
//!
//! # Account Types
//!
//! - **Debit-normal**: Asset, Expense, Cash/Bank
//! - **Credit-normal**: Liability, Equity, Revenue
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_ledger::{EntryDraft, DocumentType, JournalService};
//!
//! let draft = EntryDraft::new(DocumentType::Invoice, date, "Sale of goods")
//!     .debit(receivable, amount)
//!     .credit(revenue, amount);
//!
//! let entry = service.post(&ctx, draft).await?;
//! ```

pub mod account;
pub mod adapters;
pub mod balance;
pub mod chart;
pub mod error;
pub mod journal;
pub mod ports;
pub mod posting;
pub mod reports;
pub mod roles;
pub mod sequence;
pub mod validator;

pub use account::{Account, AccountType, StandardChartOfAccounts};
pub use adapters::InMemoryLedgerStore;
pub use balance::{AccountBalance, BalanceCalculator};
pub use chart::ChartOfAccounts;
pub use error::{LedgerError, ValidationError};
pub use journal::{DocumentType, EntryDraft, JournalEntry, JournalEntryLine};
pub use ports::{LedgerStore, PostedLine, SequenceScope};
pub use posting::JournalService;
pub use reports::{
    CashflowAccount, CashflowStatement, ReportCompiler, TrialBalance, TrialBalanceRow,
};
pub use roles::{AccountRole, RoleRule};
pub use sequence::{DocumentNumber, DocumentSequencer, NumberSource};
pub use validator::{RequiredAccount, RequiredAccounts};
