//! Journal posting service
//!
//! Validates a draft entry and commits it as immutable posted history.
//! All validation runs before any write; a failed draft leaves no partial
//! state. Posted entries are never updated or deleted — corrections are made
//! by posting a new, reversing entry.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, info};

use core_kernel::{CompanyContext, JournalEntryId, Money, BALANCE_TOLERANCE};

use crate::error::{LedgerError, ValidationError};
use crate::journal::{DocumentType, EntryDraft, JournalEntry};
use crate::ports::LedgerStore;
use crate::sequence::DocumentSequencer;

/// Posts balanced journal entries as atomic, immutable history
///
/// Validation order, fail-fast:
/// 1. at least 2 lines,
/// 2. every line references an active account of the context company,
/// 3. every line carries exactly one positive side,
/// 4. debit and credit totals agree within the balance tolerance.
#[derive(Clone)]
pub struct JournalService {
    store: Arc<dyn LedgerStore>,
    sequencer: DocumentSequencer,
}

impl JournalService {
    /// Creates a posting service over the given store
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        let sequencer = DocumentSequencer::new(store.clone());
        Self { store, sequencer }
    }

    /// Returns the sequencer used for entry numbers
    pub fn sequencer(&self) -> &DocumentSequencer {
        &self.sequencer
    }

    /// Validates and posts a draft entry
    ///
    /// On success the entry number is allocated, the entry and all its lines
    /// are committed as one atomic unit with `is_posted = true`, and the
    /// stored entry is returned. On any validation failure nothing is
    /// written and the error names the failed rule and line.
    pub async fn post(
        &self,
        ctx: &CompanyContext,
        draft: EntryDraft,
    ) -> Result<JournalEntry, LedgerError> {
        self.validate(ctx, &draft).await?;

        let number = self
            .sequencer
            .next(ctx, draft.document_type, draft.entry_date)
            .await;
        debug!(entry_number = %number, "allocated entry number");

        let entry = JournalEntry {
            id: JournalEntryId::new_v7(),
            company_id: ctx.company_id,
            entry_number: number.text,
            document_type: draft.document_type,
            entry_date: draft.entry_date,
            description: draft.description,
            reference_type: draft.reference_type,
            reference_id: draft.reference_id,
            is_posted: true,
            created_by: ctx.user_id,
            created_at: Utc::now(),
            lines: draft.lines,
        };

        self.store.commit_entry(entry.clone()).await?;
        info!(
            entry_number = %entry.entry_number,
            lines = entry.lines.len(),
            "journal entry posted"
        );

        Ok(entry)
    }

    /// Posts a reversing entry for a previously posted one
    ///
    /// The reversal swaps each line's debit and credit, keeps the accounts,
    /// and references the original entry. The original remains untouched.
    pub async fn reverse(
        &self,
        ctx: &CompanyContext,
        entry_id: JournalEntryId,
        reason: &str,
    ) -> Result<JournalEntry, LedgerError> {
        let original = self.store.entry(ctx.company_id, entry_id).await?;

        let mut draft = EntryDraft::new(
            DocumentType::JournalEntry,
            original.entry_date,
            format!("Reversal of {}: {}", original.entry_number, reason),
        )
        .with_reference("reversal", *original.id.as_uuid());

        for line in &original.lines {
            draft = draft.line(line.reversed());
        }

        self.post(ctx, draft).await
    }

    async fn validate(&self, ctx: &CompanyContext, draft: &EntryDraft) -> Result<(), LedgerError> {
        // Rule 1: a single-line entry cannot balance
        if draft.lines.len() < 2 {
            return Err(ValidationError::TooFewLines(draft.lines.len()).into());
        }

        // Rule 2: active accounts of this company only
        let accounts = self.store.accounts(ctx.company_id).await?;
        let by_id: HashMap<_, _> = accounts.iter().map(|a| (a.id, a)).collect();
        for (index, line) in draft.lines.iter().enumerate() {
            match by_id.get(&line.account_id) {
                None => {
                    return Err(ValidationError::UnknownAccount {
                        line: index,
                        account: line.account_id,
                    }
                    .into())
                }
                Some(account) if !account.is_active => {
                    return Err(ValidationError::InactiveAccount {
                        line: index,
                        account: line.account_id,
                    }
                    .into())
                }
                Some(_) => {}
            }
        }

        // Rule 3: exactly one positive side per line, in the ledger currency
        for (index, line) in draft.lines.iter().enumerate() {
            if line.debit.is_negative() || line.credit.is_negative() {
                return Err(ValidationError::NegativeAmount { line: index }.into());
            }
            match (line.debit.is_positive(), line.credit.is_positive()) {
                (true, true) => return Err(ValidationError::BothSides { line: index }.into()),
                (false, false) => return Err(ValidationError::EmptyLine { line: index }.into()),
                _ => {}
            }
            if line.debit.currency() != ctx.currency || line.credit.currency() != ctx.currency {
                return Err(ValidationError::CurrencyMismatch { line: index }.into());
            }
        }

        // Rule 4: debits equal credits within tolerance
        let mut debits = Decimal::ZERO;
        let mut credits = Decimal::ZERO;
        for line in &draft.lines {
            debits += line.debit.amount();
            credits += line.credit.amount();
        }
        if (debits - credits).abs() > BALANCE_TOLERANCE {
            return Err(ValidationError::Unbalanced { debits, credits }.into());
        }

        Ok(())
    }

    /// Convenience: the totals of a posted entry, for callers and tests
    pub fn totals(entry: &JournalEntry, ctx: &CompanyContext) -> (Money, Money) {
        let mut debit = Money::zero(ctx.currency);
        let mut credit = Money::zero(ctx.currency);
        for line in &entry.lines {
            debit = debit + line.debit;
            credit = credit + line.credit;
        }
        (debit, credit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::{Account, AccountType};
    use crate::adapters::InMemoryLedgerStore;
    use chrono::NaiveDate;
    use core_kernel::{AccountId, CompanyId, Currency, UserId};
    use rust_decimal_macros::dec;

    struct Fixture {
        service: JournalService,
        ctx: CompanyContext,
        cash: AccountId,
        revenue: AccountId,
        store: Arc<InMemoryLedgerStore>,
    }

    async fn fixture() -> Fixture {
        let store = Arc::new(InMemoryLedgerStore::new());
        let ctx = CompanyContext::new(CompanyId::new(), Currency::USD, UserId::new());

        let cash = AccountId::new();
        let revenue = AccountId::new();
        store
            .insert_account(Account::new(cash, ctx.company_id, "1000", "Cash", AccountType::CashBank))
            .await
            .unwrap();
        store
            .insert_account(Account::new(
                revenue,
                ctx.company_id,
                "4000",
                "Sales Revenue",
                AccountType::Revenue,
            ))
            .await
            .unwrap();

        Fixture {
            service: JournalService::new(store.clone()),
            ctx,
            cash,
            revenue,
            store,
        }
    }

    fn usd(amount: Decimal) -> Money {
        Money::new(amount, Currency::USD)
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
    }

    #[tokio::test]
    async fn test_balanced_entry_posts() {
        let f = fixture().await;

        let draft = EntryDraft::new(DocumentType::Invoice, date(), "Cash sale")
            .debit(f.cash, usd(dec!(100)))
            .credit(f.revenue, usd(dec!(100)));

        let entry = f.service.post(&f.ctx, draft).await.unwrap();

        assert!(entry.is_posted);
        assert_eq!(entry.entry_number, "INV-202603-0001");
        assert_eq!(entry.created_by, f.ctx.user_id);

        let (debit, credit) = JournalService::totals(&entry, &f.ctx);
        assert_eq!(debit, credit);
    }

    #[tokio::test]
    async fn test_unbalanced_entry_rejected_and_nothing_written() {
        let f = fixture().await;

        let draft = EntryDraft::new(DocumentType::Invoice, date(), "Unbalanced")
            .debit(f.cash, usd(dec!(100)))
            .credit(f.revenue, usd(dec!(90)));

        let err = f.service.post(&f.ctx, draft).await.unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Validation(ValidationError::Unbalanced { .. })
        ));

        let lines = f
            .store
            .posted_lines(f.ctx.company_id, f.cash, None, None)
            .await
            .unwrap();
        assert!(lines.is_empty());
    }

    #[tokio::test]
    async fn test_single_line_entry_rejected() {
        let f = fixture().await;

        let draft =
            EntryDraft::new(DocumentType::JournalEntry, date(), "Lonely").debit(f.cash, usd(dec!(5)));

        let err = f.service.post(&f.ctx, draft).await.unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Validation(ValidationError::TooFewLines(1))
        ));
    }

    #[tokio::test]
    async fn test_line_with_both_sides_rejected() {
        let f = fixture().await;

        let mut both = crate::journal::JournalEntryLine::debit(f.cash, usd(dec!(10)));
        both.credit = usd(dec!(10));

        let draft = EntryDraft::new(DocumentType::JournalEntry, date(), "Two-faced line")
            .line(both)
            .credit(f.revenue, usd(dec!(10)));

        let err = f.service.post(&f.ctx, draft).await.unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Validation(ValidationError::BothSides { line: 0 })
        ));
    }

    #[tokio::test]
    async fn test_empty_line_rejected() {
        let f = fixture().await;

        let empty = crate::journal::JournalEntryLine::debit(f.cash, usd(dec!(0)));
        let draft = EntryDraft::new(DocumentType::JournalEntry, date(), "Zeroes")
            .line(empty)
            .credit(f.revenue, usd(dec!(0)));

        let err = f.service.post(&f.ctx, draft).await.unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Validation(ValidationError::EmptyLine { line: 0 })
        ));
    }

    #[tokio::test]
    async fn test_unknown_account_rejected_with_line_index() {
        let f = fixture().await;
        let foreign = AccountId::new();

        let draft = EntryDraft::new(DocumentType::Invoice, date(), "Bad account")
            .debit(f.cash, usd(dec!(50)))
            .credit(foreign, usd(dec!(50)));

        let err = f.service.post(&f.ctx, draft).await.unwrap_err();
        match err {
            LedgerError::Validation(ValidationError::UnknownAccount { line, account }) => {
                assert_eq!(line, 1);
                assert_eq!(account, foreign);
            }
            other => panic!("expected UnknownAccount, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_inactive_account_rejected() {
        let f = fixture().await;
        f.store
            .deactivate_account(f.ctx.company_id, f.revenue)
            .await
            .unwrap();

        let draft = EntryDraft::new(DocumentType::Invoice, date(), "To inactive")
            .debit(f.cash, usd(dec!(50)))
            .credit(f.revenue, usd(dec!(50)));

        let err = f.service.post(&f.ctx, draft).await.unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Validation(ValidationError::InactiveAccount { line: 1, .. })
        ));
    }

    #[tokio::test]
    async fn test_rounding_within_tolerance_accepted() {
        let f = fixture().await;

        let draft = EntryDraft::new(DocumentType::JournalEntry, date(), "Rounding dust")
            .debit(f.cash, usd(dec!(100.005)))
            .credit(f.revenue, usd(dec!(100.00)));

        assert!(f.service.post(&f.ctx, draft).await.is_ok());
    }

    #[tokio::test]
    async fn test_reverse_swaps_sides_and_references_original() {
        let f = fixture().await;

        let draft = EntryDraft::new(DocumentType::Invoice, date(), "Cash sale")
            .debit(f.cash, usd(dec!(200)))
            .credit(f.revenue, usd(dec!(200)));
        let original = f.service.post(&f.ctx, draft).await.unwrap();

        let reversal = f
            .service
            .reverse(&f.ctx, original.id, "entered twice")
            .await
            .unwrap();

        assert!(reversal.description.contains(&original.entry_number));
        assert_eq!(reversal.reference_type.as_deref(), Some("reversal"));
        assert_eq!(reversal.reference_id, Some(*original.id.as_uuid()));
        assert_eq!(reversal.lines[0].credit, original.lines[0].debit);
        assert_eq!(reversal.lines[1].debit, original.lines[1].credit);
    }
}
