//! Account balance computation
//!
//! Balances are derived on demand from posted-line history and never cached
//! across requests. The computation is deterministic and side-effect-free:
//! the same arguments against the same posted history always produce the
//! same result. Signs are uniformly "debit positive"; callers interpret the
//! sign against the account's normal balance side.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{AccountId, CompanyContext, Money, MoneyError};

use crate::error::LedgerError;
use crate::ports::{LedgerStore, PostedLine};

/// An account's balance over a date window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountBalance {
    /// The account
    pub account_id: AccountId,
    /// Signed balance (debit positive) of all posted lines before the window
    pub opening: Money,
    /// Sum of debits within the window
    pub debit_total: Money,
    /// Sum of credits within the window
    pub credit_total: Money,
    /// `opening + debit_total - credit_total`
    pub closing: Money,
}

/// Derives account balances from posted history
#[derive(Clone)]
pub struct BalanceCalculator {
    store: Arc<dyn LedgerStore>,
}

impl BalanceCalculator {
    /// Creates a calculator over the given store
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }

    /// Computes opening balance, period movement, and closing balance
    ///
    /// `from = None` means no opening period (opening is zero and the window
    /// starts at the beginning of history); `to = None` leaves the window
    /// open-ended. Bounds are inclusive. Only posted entries contribute.
    pub async fn balance(
        &self,
        ctx: &CompanyContext,
        account_id: AccountId,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<AccountBalance, LedgerError> {
        let opening = match from {
            Some(from) => match from.pred_opt() {
                Some(day_before) => {
                    let lines = self
                        .store
                        .posted_lines(ctx.company_id, account_id, None, Some(day_before))
                        .await?;
                    Self::signed_sum(ctx, &lines)?
                }
                // `from` is the first representable date; nothing precedes it
                None => Money::zero(ctx.currency),
            },
            None => Money::zero(ctx.currency),
        };

        let period = self
            .store
            .posted_lines(ctx.company_id, account_id, from, to)
            .await?;

        let mut debit_total = Money::zero(ctx.currency);
        let mut credit_total = Money::zero(ctx.currency);
        for line in &period {
            debit_total = debit_total.checked_add(&line.debit)?;
            credit_total = credit_total.checked_add(&line.credit)?;
        }

        let closing = opening
            .checked_add(&debit_total)?
            .checked_sub(&credit_total)?;

        Ok(AccountBalance {
            account_id,
            opening,
            debit_total,
            credit_total,
            closing,
        })
    }

    fn signed_sum(ctx: &CompanyContext, lines: &[PostedLine]) -> Result<Money, MoneyError> {
        let mut sum = Money::zero(ctx.currency);
        for line in lines {
            sum = sum.checked_add(&line.debit)?.checked_sub(&line.credit)?;
        }
        Ok(sum)
    }
}
