//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use chrono::NaiveDate;
use core_kernel::{AccountId, Currency, Money};
use fake::faker::lorem::en::Sentence;
use fake::Fake;
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for generating valid Currency values
pub fn currency_strategy() -> impl Strategy<Value = Currency> {
    prop_oneof![
        Just(Currency::USD),
        Just(Currency::EUR),
        Just(Currency::GBP),
        Just(Currency::IDR),
        Just(Currency::SGD),
        Just(Currency::JPY),
        Just(Currency::AUD),
    ]
}

/// Strategy for generating positive amounts in minor units
pub fn positive_amount_minor_strategy() -> impl Strategy<Value = i64> {
    1i64..1_000_000_000i64
}

/// Strategy for generating positive Money values
pub fn positive_money_strategy() -> impl Strategy<Value = Money> {
    (positive_amount_minor_strategy(), currency_strategy())
        .prop_map(|(amount, currency)| Money::from_minor(amount, currency))
}

/// Strategy for generating positive Money values in a fixed currency
pub fn positive_money_in(currency: Currency) -> impl Strategy<Value = Money> {
    positive_amount_minor_strategy().prop_map(move |amount| Money::from_minor(amount, currency))
}

/// Strategy for generating positive Decimal amounts with two decimal places
pub fn positive_decimal_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_000i64).prop_map(|m| Decimal::new(m, 2))
}

/// Strategy for generating posting dates within 2026
pub fn entry_date_strategy() -> impl Strategy<Value = NaiveDate> {
    (1u32..=12u32, 1u32..=28u32).prop_map(|(month, day)| {
        NaiveDate::from_ymd_opt(2026, month, day).expect("valid date")
    })
}

/// Strategy for a balanced set of line amounts: N debit amounts paired with
/// one credit amount equal to their sum, all in the given currency
pub fn balanced_amounts_strategy(
    currency: Currency,
) -> impl Strategy<Value = (Vec<Money>, Money)> {
    prop::collection::vec(1i64..1_000_000i64, 1..6).prop_map(move |minors| {
        let debits: Vec<Money> = minors
            .iter()
            .map(|&m| Money::from_minor(m, currency))
            .collect();
        let total: i64 = minors.iter().sum();
        (debits, Money::from_minor(total, currency))
    })
}

/// Generates a random human-looking entry description
pub fn fake_description() -> String {
    Sentence(3..8).fake()
}

/// Generates a batch of fresh account ids
pub fn account_ids(count: usize) -> Vec<AccountId> {
    (0..count).map(|_| AccountId::new()).collect()
}
