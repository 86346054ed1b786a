//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for common entities across the ledger
//! system. These fixtures are designed to be consistent and predictable
//! for unit tests.

use std::sync::Arc;

use chrono::NaiveDate;
use core_kernel::{AccountId, CompanyContext, CompanyId, Currency, Money, UserId};
use domain_ledger::{
    Account, InMemoryLedgerStore, LedgerStore, StandardChartOfAccounts,
};
use rust_decimal_macros::dec;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// Creates a standard IDR amount for testing
    pub fn idr_100_000() -> Money {
        Money::new(dec!(100000), Currency::IDR)
    }

    /// Creates a large IDR amount for invoice scenarios
    pub fn idr_1_500_000() -> Money {
        Money::new(dec!(1500000), Currency::IDR)
    }

    /// Creates a zero IDR amount
    pub fn idr_zero() -> Money {
        Money::zero(Currency::IDR)
    }

    /// Creates a standard USD amount for testing
    pub fn usd_100() -> Money {
        Money::new(dec!(100.00), Currency::USD)
    }

    /// Creates a EUR amount for currency mismatch tests
    pub fn eur_100() -> Money {
        Money::new(dec!(100.00), Currency::EUR)
    }
}

/// Fixture for dates used across posting tests
pub struct DateFixtures;

impl DateFixtures {
    /// Start of the standard test period (Mar 1, 2026)
    pub fn period_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).expect("valid date")
    }

    /// Mid-period posting date (Mar 15, 2026)
    pub fn mid_period() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 15).expect("valid date")
    }

    /// End of the standard test period (Mar 31, 2026)
    pub fn period_end() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 31).expect("valid date")
    }

    /// A date in the prior period (Feb 10, 2026)
    pub fn prior_period() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 10).expect("valid date")
    }
}

/// Creates a company context with fresh identifiers and IDR currency
pub fn test_context() -> CompanyContext {
    CompanyContext::new(CompanyId::new(), Currency::IDR, UserId::new())
}

/// Creates a company context with the given currency
pub fn test_context_with_currency(currency: Currency) -> CompanyContext {
    CompanyContext::new(CompanyId::new(), currency, UserId::new())
}

/// Creates an in-memory store seeded with the standard chart of accounts
/// for the context's company
pub async fn seeded_store(ctx: &CompanyContext) -> Arc<InMemoryLedgerStore> {
    let store = Arc::new(InMemoryLedgerStore::new());
    for account in StandardChartOfAccounts::create_default_accounts(ctx.company_id) {
        store
            .insert_account(account)
            .await
            .expect("seeding standard chart");
    }
    store
}

/// Looks up a seeded account by its code
pub async fn account_by_code(
    store: &Arc<InMemoryLedgerStore>,
    ctx: &CompanyContext,
    code: &str,
) -> Account {
    store
        .accounts(ctx.company_id)
        .await
        .expect("listing accounts")
        .into_iter()
        .find(|a| a.code == code)
        .unwrap_or_else(|| panic!("no account with code {code}"))
}

/// Shorthand for the id of a seeded account
pub async fn account_id_by_code(
    store: &Arc<InMemoryLedgerStore>,
    ctx: &CompanyContext,
    code: &str,
) -> AccountId {
    account_by_code(store, ctx, code).await.id
}
