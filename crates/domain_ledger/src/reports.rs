//! Report compilation
//!
//! Composes balance-calculator output into a trial balance and a cashflow
//! statement. Reports are pure reads over committed history. A trial balance
//! whose column totals disagree indicates a posting-enforcement defect, not
//! an acceptable state: it is surfaced as a visibly unbalanced report and
//! logged at error level, never silently zeroed or auto-corrected.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::error;

use core_kernel::{AccountId, CompanyContext, Money};

use crate::account::AccountType;
use crate::balance::BalanceCalculator;
use crate::error::LedgerError;
use crate::ports::LedgerStore;

/// One row of the trial balance; at most one column is nonzero
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    pub account_id: AccountId,
    pub account_code: String,
    pub account_name: String,
    /// Net debit position, when the account nets to the debit side
    pub debit: Money,
    /// Net credit position, when the account nets to the credit side
    pub credit: Money,
}

/// Trial balance as of a date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalance {
    pub as_of: NaiveDate,
    pub rows: Vec<TrialBalanceRow>,
    pub total_debit: Money,
    pub total_credit: Money,
    /// False indicates an integrity violation in posting enforcement,
    /// distinct from an empty report (which is balanced at zero)
    pub is_balanced: bool,
    /// `total_debit - total_credit`; zero when balanced
    pub imbalance: Money,
}

/// One cash/bank account's movement over the period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashflowAccount {
    pub account_id: AccountId,
    pub account_code: String,
    pub account_name: String,
    pub opening: Money,
    /// Period debits into the account
    pub inflow: Money,
    /// Period credits out of the account
    pub outflow: Money,
    pub net_change: Money,
    pub closing: Money,
}

/// Cashflow statement over a date range, cash/bank accounts only
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashflowStatement {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub accounts: Vec<CashflowAccount>,
    pub total_opening: Money,
    pub total_inflow: Money,
    pub total_outflow: Money,
    pub total_net_change: Money,
    pub total_closing: Money,
}

/// Compiles ledger reports from posted history
#[derive(Clone)]
pub struct ReportCompiler {
    store: Arc<dyn LedgerStore>,
    balances: BalanceCalculator,
}

impl ReportCompiler {
    /// Creates a compiler over the given store
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        let balances = BalanceCalculator::new(store.clone());
        Self { store, balances }
    }

    /// Compiles the trial balance as of a date
    ///
    /// Includes every account with posted activity up to `as_of`; the net
    /// position (cumulative debits minus credits) lands in the debit column
    /// when positive and the credit column when negative. An account whose
    /// activity cancelled out entirely still appears, with both columns zero.
    pub async fn trial_balance(
        &self,
        ctx: &CompanyContext,
        as_of: NaiveDate,
    ) -> Result<TrialBalance, LedgerError> {
        let accounts = self.store.accounts(ctx.company_id).await?;

        let zero = Money::zero(ctx.currency);
        let mut rows = Vec::new();
        let mut total_debit = zero;
        let mut total_credit = zero;

        for account in accounts {
            let balance = self
                .balances
                .balance(ctx, account.id, None, Some(as_of))
                .await?;

            // Accounts never posted to do not appear
            if balance.debit_total.is_zero() && balance.credit_total.is_zero() {
                continue;
            }

            let net = balance.debit_total.checked_sub(&balance.credit_total)?;
            let (debit, credit) = if net.is_negative() {
                (zero, net.abs())
            } else {
                (net, zero)
            };

            total_debit = total_debit.checked_add(&debit)?;
            total_credit = total_credit.checked_add(&credit)?;
            rows.push(TrialBalanceRow {
                account_id: account.id,
                account_code: account.code,
                account_name: account.name,
                debit,
                credit,
            });
        }

        rows.sort_by(|a, b| a.account_code.cmp(&b.account_code));

        let imbalance = total_debit.checked_sub(&total_credit)?;
        let is_balanced = total_debit.balances_with(&total_credit);
        if !is_balanced {
            error!(
                company_id = %ctx.company_id,
                %as_of,
                imbalance = %imbalance,
                "trial balance does not balance: posting enforcement defect"
            );
        }

        Ok(TrialBalance {
            as_of,
            rows,
            total_debit,
            total_credit,
            is_balanced,
            imbalance,
        })
    }

    /// Compiles the cashflow statement over `[from, to]`
    ///
    /// Restricted to cash/bank accounts; for each, opening is the balance
    /// before `from`, inflow/outflow are the period debits/credits, and
    /// closing is `opening + inflow - outflow`. Non-cash accounts are
    /// omitted entirely.
    pub async fn cashflow(
        &self,
        ctx: &CompanyContext,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<CashflowStatement, LedgerError> {
        let accounts = self.store.accounts(ctx.company_id).await?;

        let zero = Money::zero(ctx.currency);
        let mut rows = Vec::new();
        let mut total_opening = zero;
        let mut total_inflow = zero;
        let mut total_outflow = zero;

        for account in accounts {
            if account.account_type != AccountType::CashBank {
                continue;
            }

            let balance = self
                .balances
                .balance(ctx, account.id, Some(from), Some(to))
                .await?;
            let net_change = balance.debit_total.checked_sub(&balance.credit_total)?;

            total_opening = total_opening.checked_add(&balance.opening)?;
            total_inflow = total_inflow.checked_add(&balance.debit_total)?;
            total_outflow = total_outflow.checked_add(&balance.credit_total)?;

            rows.push(CashflowAccount {
                account_id: account.id,
                account_code: account.code,
                account_name: account.name,
                opening: balance.opening,
                inflow: balance.debit_total,
                outflow: balance.credit_total,
                net_change,
                closing: balance.closing,
            });
        }

        rows.sort_by(|a, b| a.account_code.cmp(&b.account_code));

        let total_net_change = total_inflow.checked_sub(&total_outflow)?;
        let total_closing = total_opening.checked_add(&total_net_change)?;

        Ok(CashflowStatement {
            from,
            to,
            accounts: rows,
            total_opening,
            total_inflow,
            total_outflow,
            total_net_change,
            total_closing,
        })
    }
}
