//! Ledger domain errors

use core_kernel::{AccountId, MoneyError, PortError};
use rust_decimal::Decimal;
use thiserror::Error;

/// Validation failures for a draft journal entry
///
/// Every variant names the rule that failed and, for line-level rules, the
/// offending line index and account. Validation always runs before any write,
/// so a draft that produces one of these has left no trace in storage.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A single-line entry cannot balance
    #[error("Journal entry must have at least 2 lines, got {0}")]
    TooFewLines(usize),

    /// Line references an account that does not exist for this company
    #[error("Line {line}: account {account} does not belong to this company")]
    UnknownAccount { line: usize, account: AccountId },

    /// Line references a deactivated account
    #[error("Line {line}: account {account} is inactive")]
    InactiveAccount { line: usize, account: AccountId },

    /// Line carries both a debit and a credit
    #[error("Line {line}: a line must carry a debit or a credit, not both")]
    BothSides { line: usize },

    /// Line carries neither a debit nor a credit
    #[error("Line {line}: a line must carry a nonzero debit or credit")]
    EmptyLine { line: usize },

    /// Line amount is negative
    #[error("Line {line}: amounts must be positive")]
    NegativeAmount { line: usize },

    /// Line currency differs from the company ledger currency
    #[error("Line {line}: currency does not match the company ledger currency")]
    CurrencyMismatch { line: usize },

    /// Debit and credit totals differ beyond the balance tolerance
    #[error("Unbalanced entry: debits={debits}, credits={credits}")]
    Unbalanced { debits: Decimal, credits: Decimal },
}

impl ValidationError {
    /// Returns the offending line index, if the rule is line-scoped
    pub fn line(&self) -> Option<usize> {
        match self {
            ValidationError::UnknownAccount { line, .. }
            | ValidationError::InactiveAccount { line, .. }
            | ValidationError::BothSides { line }
            | ValidationError::EmptyLine { line }
            | ValidationError::NegativeAmount { line }
            | ValidationError::CurrencyMismatch { line } => Some(*line),
            ValidationError::TooFewLines(_) | ValidationError::Unbalanced { .. } => None,
        }
    }
}

/// Errors that can occur in the ledger domain
#[derive(Debug, Error)]
pub enum LedgerError {
    /// A draft entry failed validation; nothing was written
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A uniqueness conflict, e.g. a duplicate entry number under race.
    /// Recovered by re-issuing the document number, never by retrying
    /// with the same one.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Unknown account, entry, or company
    #[error("Not found: {0}")]
    NotFound(String),

    /// Money arithmetic failure (currency mismatch)
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    /// Storage failure below the port
    #[error("Storage error: {0}")]
    Storage(PortError),
}

impl From<PortError> for LedgerError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::NotFound { .. } => LedgerError::NotFound(err.to_string()),
            PortError::Conflict { .. } => LedgerError::Conflict(err.to_string()),
            other => LedgerError::Storage(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_scoped_errors_report_their_line() {
        let err = ValidationError::BothSides { line: 3 };
        assert_eq!(err.line(), Some(3));

        let err = ValidationError::TooFewLines(1);
        assert_eq!(err.line(), None);
    }

    #[test]
    fn test_port_conflict_maps_to_conflict() {
        let err: LedgerError = PortError::conflict("duplicate entry number").into();
        assert!(matches!(err, LedgerError::Conflict(_)));
    }

    #[test]
    fn test_port_not_found_maps_to_not_found() {
        let err: LedgerError = PortError::not_found("Account", "ACC-1").into();
        assert!(matches!(err, LedgerError::NotFound(_)));
    }
}
