//! Journal entry and line types
//!
//! A journal entry is an ordered set of debit/credit lines that always
//! balances. Once posted, an entry and its lines are immutable; corrections
//! happen through a new, reversing entry.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use core_kernel::{AccountId, CompanyId, JournalEntryId, JournalLineId, Money, UserId};

/// Document types issued by the number sequencer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Sales order
    SalesOrder,
    /// Purchase order
    PurchaseOrder,
    /// Sales invoice
    Invoice,
    /// Supplier bill
    Bill,
    /// Incoming payment
    PaymentIn,
    /// Outgoing payment
    PaymentOut,
    /// Journal entry
    JournalEntry,
    /// Goods receipt
    GoodsReceipt,
    /// Down payment
    DownPayment,
}

impl DocumentType {
    /// Returns the document number prefix
    pub fn prefix(&self) -> &'static str {
        match self {
            DocumentType::SalesOrder => "SO",
            DocumentType::PurchaseOrder => "PO",
            DocumentType::Invoice => "INV",
            DocumentType::Bill => "BILL",
            DocumentType::PaymentIn => "PAY-IN",
            DocumentType::PaymentOut => "PAY-OUT",
            DocumentType::JournalEntry => "JE",
            DocumentType::GoodsReceipt => "GR",
            DocumentType::DownPayment => "DP",
        }
    }

    /// Parses a document number prefix
    pub fn from_prefix(prefix: &str) -> Option<DocumentType> {
        match prefix {
            "SO" => Some(DocumentType::SalesOrder),
            "PO" => Some(DocumentType::PurchaseOrder),
            "INV" => Some(DocumentType::Invoice),
            "BILL" => Some(DocumentType::Bill),
            "PAY-IN" => Some(DocumentType::PaymentIn),
            "PAY-OUT" => Some(DocumentType::PaymentOut),
            "JE" => Some(DocumentType::JournalEntry),
            "GR" => Some(DocumentType::GoodsReceipt),
            "DP" => Some(DocumentType::DownPayment),
            _ => None,
        }
    }
}

/// A single line of a journal entry
///
/// A line carries a debit or a credit, never both; both amounts are
/// non-negative and exactly one is nonzero. The posting service enforces
/// this before anything is written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntryLine {
    /// Unique line identifier
    pub id: JournalLineId,
    /// Account the line posts to
    pub account_id: AccountId,
    /// Debit amount (zero when the line is a credit)
    pub debit: Money,
    /// Credit amount (zero when the line is a debit)
    pub credit: Money,
    /// Optional description for this line
    pub description: Option<String>,
}

impl JournalEntryLine {
    /// Creates a debit line
    pub fn debit(account_id: AccountId, amount: Money) -> Self {
        Self {
            id: JournalLineId::new(),
            account_id,
            debit: amount,
            credit: Money::zero(amount.currency()),
            description: None,
        }
    }

    /// Creates a credit line
    pub fn credit(account_id: AccountId, amount: Money) -> Self {
        Self {
            id: JournalLineId::new(),
            account_id,
            debit: Money::zero(amount.currency()),
            credit: amount,
            description: None,
        }
    }

    /// Adds a description to the line
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns a copy with debit and credit swapped (for reversals)
    pub fn reversed(&self) -> Self {
        Self {
            id: JournalLineId::new(),
            account_id: self.account_id,
            debit: self.credit,
            credit: self.debit,
            description: self.description.clone(),
        }
    }
}

/// A committed journal entry
///
/// Owns its lines; `is_posted` entries are immutable and are the only ones
/// visible to balance computation and reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Unique entry identifier
    pub id: JournalEntryId,
    /// Owning company
    pub company_id: CompanyId,
    /// Human-readable document number, unique per company
    pub entry_number: String,
    /// Document type the entry number was issued under
    pub document_type: DocumentType,
    /// Accounting date
    pub entry_date: NaiveDate,
    /// Description
    pub description: String,
    /// Reference type (e.g., "invoice", "down_payment", "reversal")
    pub reference_type: Option<String>,
    /// Reference ID
    pub reference_id: Option<Uuid>,
    /// Whether the entry is posted (immutable) history
    pub is_posted: bool,
    /// User who created the entry
    pub created_by: UserId,
    /// When the entry was created
    pub created_at: DateTime<Utc>,
    /// The entry's lines
    pub lines: Vec<JournalEntryLine>,
}

/// A draft journal entry, built fluently and submitted to the posting service
///
/// # Example
///
/// ```rust,ignore
/// let draft = EntryDraft::new(DocumentType::PaymentIn, entry_date, "Customer down payment")
///     .with_reference("down_payment", order_id)
///     .debit(cash_account, amount)
///     .credit(down_payment_account, amount);
///
/// let entry = journal.post(&ctx, draft).await?;
/// ```
#[derive(Debug, Clone)]
pub struct EntryDraft {
    /// Document type for number issuance
    pub document_type: DocumentType,
    /// Accounting date
    pub entry_date: NaiveDate,
    /// Description
    pub description: String,
    /// Reference type
    pub reference_type: Option<String>,
    /// Reference ID
    pub reference_id: Option<Uuid>,
    /// Draft lines
    pub lines: Vec<JournalEntryLine>,
}

impl EntryDraft {
    /// Creates a new draft
    pub fn new(
        document_type: DocumentType,
        entry_date: NaiveDate,
        description: impl Into<String>,
    ) -> Self {
        Self {
            document_type,
            entry_date,
            description: description.into(),
            reference_type: None,
            reference_id: None,
            lines: Vec::new(),
        }
    }

    /// Sets the reference
    pub fn with_reference(mut self, ref_type: impl Into<String>, ref_id: Uuid) -> Self {
        self.reference_type = Some(ref_type.into());
        self.reference_id = Some(ref_id);
        self
    }

    /// Adds a debit line
    pub fn debit(mut self, account_id: AccountId, amount: Money) -> Self {
        self.lines.push(JournalEntryLine::debit(account_id, amount));
        self
    }

    /// Adds a credit line
    pub fn credit(mut self, account_id: AccountId, amount: Money) -> Self {
        self.lines.push(JournalEntryLine::credit(account_id, amount));
        self
    }

    /// Adds a prepared line
    pub fn line(mut self, line: JournalEntryLine) -> Self {
        self.lines.push(line);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    #[test]
    fn test_document_type_prefix_round_trip() {
        for t in [
            DocumentType::SalesOrder,
            DocumentType::PurchaseOrder,
            DocumentType::Invoice,
            DocumentType::Bill,
            DocumentType::PaymentIn,
            DocumentType::PaymentOut,
            DocumentType::JournalEntry,
            DocumentType::GoodsReceipt,
            DocumentType::DownPayment,
        ] {
            assert_eq!(DocumentType::from_prefix(t.prefix()), Some(t));
        }
    }

    #[test]
    fn test_debit_line_zeroes_credit_side() {
        let line = JournalEntryLine::debit(AccountId::new(), Money::new(dec!(100), Currency::USD));
        assert!(line.debit.is_positive());
        assert!(line.credit.is_zero());
    }

    #[test]
    fn test_reversed_line_swaps_sides() {
        let line = JournalEntryLine::credit(AccountId::new(), Money::new(dec!(75), Currency::USD));
        let reversed = line.reversed();

        assert_eq!(reversed.account_id, line.account_id);
        assert_eq!(reversed.debit, line.credit);
        assert_eq!(reversed.credit, line.debit);
        assert_ne!(reversed.id, line.id);
    }

    #[test]
    fn test_draft_builder() {
        let cash = AccountId::new();
        let revenue = AccountId::new();
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let amount = Money::new(dec!(250), Currency::USD);

        let draft = EntryDraft::new(DocumentType::Invoice, date, "Cash sale")
            .debit(cash, amount)
            .credit(revenue, amount);

        assert_eq!(draft.lines.len(), 2);
        assert_eq!(draft.lines[0].debit, amount);
        assert_eq!(draft.lines[1].credit, amount);
    }
}
