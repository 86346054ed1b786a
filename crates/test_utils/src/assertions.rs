//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use core_kernel::Money;
use domain_ledger::JournalEntry;
use rust_decimal::Decimal;

/// Asserts that two Money values are approximately equal within a tolerance
///
/// # Panics
///
/// Panics if the currencies don't match or the amounts differ by more than
/// the tolerance
pub fn assert_money_approx_eq(actual: &Money, expected: &Money, tolerance: Decimal) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );

    let diff = (actual.amount() - expected.amount()).abs();
    assert!(
        diff <= tolerance,
        "Money amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual.amount(),
        expected.amount(),
        diff,
        tolerance
    );
}

/// Asserts that a Money value is positive
pub fn assert_money_positive(money: &Money) {
    assert!(
        money.is_positive(),
        "Expected positive money, got {} {}",
        money.currency().symbol(),
        money.amount()
    );
}

/// Asserts that a journal entry's debits equal its credits
///
/// # Panics
///
/// Panics if the line totals differ or the entry has fewer than two lines
pub fn assert_entry_balanced(entry: &JournalEntry) {
    assert!(
        entry.lines.len() >= 2,
        "Journal entry {} has {} line(s), expected at least 2",
        entry.entry_number,
        entry.lines.len()
    );

    let debits: Decimal = entry.lines.iter().map(|l| l.debit.amount()).sum();
    let credits: Decimal = entry.lines.iter().map(|l| l.credit.amount()).sum();
    assert_eq!(
        debits, credits,
        "Journal entry {} is unbalanced: debits={}, credits={}",
        entry.entry_number, debits, credits
    );
}
