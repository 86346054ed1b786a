//! Document number issuance
//!
//! Numbers follow `PREFIX-YYYYMM-NNNN`, where `NNNN` is a zero-padded
//! counter scoped to (company, document type, year, month). The counter
//! increment is a single atomic store operation, so concurrent callers in
//! the same scope receive distinct, densely sequential numbers.
//!
//! When the counter store is unavailable the sequencer degrades to a random
//! 4-digit suffix rather than failing the business flow. Such numbers are
//! labelled `NumberSource::RandomFallback` and are not guaranteed unique;
//! if one collides, the entry-number uniqueness check at commit raises a
//! conflict and the caller re-issues.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use core_kernel::CompanyContext;

use crate::journal::DocumentType;
use crate::ports::{LedgerStore, SequenceScope};

/// How a document number was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberSource {
    /// Issued by the atomic per-scope counter; unique within its scope
    Counter,
    /// Degraded mode: random suffix, uniqueness not guaranteed
    RandomFallback,
}

/// An issued document number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentNumber {
    /// The formatted number, e.g. `INV-202603-0001`
    pub text: String,
    /// The numeric sequence component
    pub sequence: u32,
    /// How the number was produced
    pub source: NumberSource,
}

impl DocumentNumber {
    /// Returns true if the number came from the atomic counter
    pub fn is_guaranteed_unique(&self) -> bool {
        self.source == NumberSource::Counter
    }
}

impl std::fmt::Display for DocumentNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Issues sequential document numbers per (company, type, year, month) scope
#[derive(Clone)]
pub struct DocumentSequencer {
    store: Arc<dyn LedgerStore>,
}

impl DocumentSequencer {
    /// Creates a sequencer over the given store
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }

    /// Issues the next number for the scope derived from `at`
    ///
    /// Never fails: when the atomic increment is unavailable the result
    /// degrades to a labelled random-suffix number and a warning is logged.
    pub async fn next(
        &self,
        ctx: &CompanyContext,
        document_type: DocumentType,
        at: NaiveDate,
    ) -> DocumentNumber {
        let scope = SequenceScope::for_date(ctx.company_id, document_type, at);

        match self.store.next_sequence(&scope).await {
            Ok(sequence) => DocumentNumber {
                text: Self::format(document_type, &scope, sequence),
                sequence,
                source: NumberSource::Counter,
            },
            Err(err) => {
                let sequence = Self::random_suffix();
                warn!(
                    company_id = %ctx.company_id,
                    document_type = document_type.prefix(),
                    error = %err,
                    "sequence counter unavailable, issuing non-guaranteed-unique fallback number"
                );
                DocumentNumber {
                    text: Self::format(document_type, &scope, sequence),
                    sequence,
                    source: NumberSource::RandomFallback,
                }
            }
        }
    }

    fn format(document_type: DocumentType, scope: &SequenceScope, sequence: u32) -> String {
        format!(
            "{}-{}-{:04}",
            document_type.prefix(),
            scope.year_month(),
            sequence
        )
    }

    /// Random 4-digit suffix for the degraded path, seeded from UUID entropy
    fn random_suffix() -> u32 {
        (Uuid::new_v4().as_u128() % 10_000) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryLedgerStore;
    use async_trait::async_trait;
    use core_kernel::{CompanyId, Currency, PortError, UserId};

    fn test_ctx() -> CompanyContext {
        CompanyContext::new(CompanyId::new(), Currency::USD, UserId::new())
    }

    fn march(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    #[tokio::test]
    async fn test_numbers_are_sequential_within_scope() {
        let store = Arc::new(InMemoryLedgerStore::new());
        let sequencer = DocumentSequencer::new(store);
        let ctx = test_ctx();

        let first = sequencer.next(&ctx, DocumentType::Invoice, march(1)).await;
        let second = sequencer.next(&ctx, DocumentType::Invoice, march(20)).await;

        assert_eq!(first.text, "INV-202603-0001");
        assert_eq!(second.text, "INV-202603-0002");
        assert!(first.is_guaranteed_unique());
    }

    #[tokio::test]
    async fn test_scopes_are_independent() {
        let store = Arc::new(InMemoryLedgerStore::new());
        let sequencer = DocumentSequencer::new(store);
        let ctx = test_ctx();

        let invoice = sequencer.next(&ctx, DocumentType::Invoice, march(1)).await;
        let bill = sequencer.next(&ctx, DocumentType::Bill, march(1)).await;
        let next_month = sequencer
            .next(&ctx, DocumentType::Invoice, NaiveDate::from_ymd_opt(2026, 4, 1).unwrap())
            .await;

        assert_eq!(invoice.sequence, 1);
        assert_eq!(bill.sequence, 1);
        assert_eq!(bill.text, "BILL-202603-0001");
        assert_eq!(next_month.text, "INV-202604-0001");
    }

    /// Store whose counter always fails, to exercise the degraded path.
    struct BrokenCounterStore;

    #[async_trait]
    impl LedgerStore for BrokenCounterStore {
        async fn insert_account(&self, _: crate::account::Account) -> Result<(), PortError> {
            Err(PortError::connection("down"))
        }
        async fn account(
            &self,
            _: CompanyId,
            _: core_kernel::AccountId,
        ) -> Result<crate::account::Account, PortError> {
            Err(PortError::connection("down"))
        }
        async fn accounts(&self, _: CompanyId) -> Result<Vec<crate::account::Account>, PortError> {
            Err(PortError::connection("down"))
        }
        async fn deactivate_account(
            &self,
            _: CompanyId,
            _: core_kernel::AccountId,
        ) -> Result<(), PortError> {
            Err(PortError::connection("down"))
        }
        async fn commit_entry(&self, _: crate::journal::JournalEntry) -> Result<(), PortError> {
            Err(PortError::connection("down"))
        }
        async fn entry(
            &self,
            _: CompanyId,
            _: core_kernel::JournalEntryId,
        ) -> Result<crate::journal::JournalEntry, PortError> {
            Err(PortError::connection("down"))
        }
        async fn posted_lines(
            &self,
            _: CompanyId,
            _: core_kernel::AccountId,
            _: Option<NaiveDate>,
            _: Option<NaiveDate>,
        ) -> Result<Vec<crate::ports::PostedLine>, PortError> {
            Err(PortError::connection("down"))
        }
        async fn next_sequence(&self, _: &SequenceScope) -> Result<u32, PortError> {
            Err(PortError::connection("counter store down"))
        }
    }

    #[tokio::test]
    async fn test_fallback_number_is_labelled_degraded() {
        let sequencer = DocumentSequencer::new(Arc::new(BrokenCounterStore));
        let ctx = test_ctx();

        let number = sequencer.next(&ctx, DocumentType::DownPayment, march(5)).await;

        assert_eq!(number.source, NumberSource::RandomFallback);
        assert!(!number.is_guaranteed_unique());
        assert!(number.text.starts_with("DP-202603-"));
        assert_eq!(number.text.len(), "DP-202603-0000".len());
    }
}
