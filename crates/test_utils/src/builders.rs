//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible
//! defaults. Tests specify only the relevant fields and take defaults for
//! everything else.

use chrono::NaiveDate;
use core_kernel::{AccountId, Money};
use domain_ledger::{DocumentType, EntryDraft};

use crate::fixtures::{DateFixtures, MoneyFixtures};

/// Builder for a simple two-line journal entry draft
pub struct TestEntryDraftBuilder {
    document_type: DocumentType,
    entry_date: NaiveDate,
    description: String,
    debit_account: AccountId,
    credit_account: AccountId,
    amount: Money,
}

impl TestEntryDraftBuilder {
    /// Creates a builder for an entry moving `amount` from the credit
    /// account to the debit account
    pub fn new(debit_account: AccountId, credit_account: AccountId) -> Self {
        Self {
            document_type: DocumentType::JournalEntry,
            entry_date: DateFixtures::mid_period(),
            description: "Test journal entry".to_string(),
            debit_account,
            credit_account,
            amount: MoneyFixtures::idr_100_000(),
        }
    }

    /// Sets the document type
    pub fn with_document_type(mut self, document_type: DocumentType) -> Self {
        self.document_type = document_type;
        self
    }

    /// Sets the entry date
    pub fn with_entry_date(mut self, entry_date: NaiveDate) -> Self {
        self.entry_date = entry_date;
        self
    }

    /// Sets the entry description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the amount posted on both sides
    pub fn with_amount(mut self, amount: Money) -> Self {
        self.amount = amount;
        self
    }

    /// Builds the draft
    pub fn build(self) -> EntryDraft {
        EntryDraft::new(self.document_type, self.entry_date, self.description)
            .debit(self.debit_account, self.amount)
            .credit(self.credit_account, self.amount)
    }
}

/// Draft for a cash sale: debit cash, credit sales revenue
pub fn cash_sale_draft(cash: AccountId, revenue: AccountId, amount: Money) -> EntryDraft {
    TestEntryDraftBuilder::new(cash, revenue)
        .with_document_type(DocumentType::Invoice)
        .with_description("Cash sale")
        .with_amount(amount)
        .build()
}

/// Draft for settling a payable: debit payable, credit cash
pub fn payable_settlement_draft(payable: AccountId, cash: AccountId, amount: Money) -> EntryDraft {
    TestEntryDraftBuilder::new(payable, cash)
        .with_document_type(DocumentType::PaymentOut)
        .with_description("Supplier payment")
        .with_amount(amount)
        .build()
}
