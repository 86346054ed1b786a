//! Account types for the chart of accounts
//!
//! This module defines the account structure for double-entry bookkeeping.

use serde::{Deserialize, Serialize};

use core_kernel::{AccountId, CompanyId};

/// Types of accounts in the chart of accounts
///
/// The type determines the account's normal balance side: debit-normal for
/// asset, expense, and cash/bank accounts; credit-normal for liability,
/// equity, and revenue accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// Asset accounts (debit normal balance)
    Asset,
    /// Liability accounts (credit normal balance)
    Liability,
    /// Equity accounts (credit normal balance)
    Equity,
    /// Revenue accounts (credit normal balance)
    Revenue,
    /// Expense accounts (debit normal balance)
    Expense,
    /// Cash and bank accounts (debit normal balance), tracked as their own
    /// type so the cashflow statement can select them directly
    CashBank,
}

impl AccountType {
    /// Returns true if this account type has a debit normal balance
    pub fn is_debit_normal(&self) -> bool {
        matches!(
            self,
            AccountType::Asset | AccountType::Expense | AccountType::CashBank
        )
    }

    /// Returns the storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Asset => "asset",
            AccountType::Liability => "liability",
            AccountType::Equity => "equity",
            AccountType::Revenue => "revenue",
            AccountType::Expense => "expense",
            AccountType::CashBank => "cash_bank",
        }
    }

    /// Parses the storage representation
    pub fn parse(s: &str) -> Option<AccountType> {
        match s {
            "asset" => Some(AccountType::Asset),
            "liability" => Some(AccountType::Liability),
            "equity" => Some(AccountType::Equity),
            "revenue" => Some(AccountType::Revenue),
            "expense" => Some(AccountType::Expense),
            "cash_bank" => Some(AccountType::CashBank),
            _ => None,
        }
    }
}

/// An account in a company's chart of accounts
///
/// Accounts referenced by posted lines are never deleted, only deactivated;
/// the `code` is unique within a company (enforced by the store).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier
    pub id: AccountId,
    /// Owning company
    pub company_id: CompanyId,
    /// Account code (e.g., "1000")
    pub code: String,
    /// Account name
    pub name: String,
    /// Account type
    pub account_type: AccountType,
    /// Description
    pub description: Option<String>,
    /// Whether account is active
    pub is_active: bool,
}

impl Account {
    /// Creates a new active account
    pub fn new(
        id: AccountId,
        company_id: CompanyId,
        code: impl Into<String>,
        name: impl Into<String>,
        account_type: AccountType,
    ) -> Self {
        Self {
            id,
            company_id,
            code: code.into(),
            name: name.into(),
            account_type,
            description: None,
            is_active: true,
        }
    }

    /// Sets the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Standard chart of accounts seeded for a new company
///
/// Names carry both the local and English terms so the role keyword
/// matching (see `roles`) resolves either way.
pub struct StandardChartOfAccounts;

impl StandardChartOfAccounts {
    /// Creates the default accounts for a company
    pub fn create_default_accounts(company_id: CompanyId) -> Vec<Account> {
        vec![
            // Cash and bank
            Account::new(AccountId::new(), company_id, "1000", "Kas (Cash on Hand)", AccountType::CashBank),
            Account::new(AccountId::new(), company_id, "1010", "Bank", AccountType::CashBank),
            // Other assets
            Account::new(AccountId::new(), company_id, "1100", "Piutang Usaha (Accounts Receivable)", AccountType::Asset),
            Account::new(AccountId::new(), company_id, "1200", "Persediaan (Inventory)", AccountType::Asset),
            Account::new(AccountId::new(), company_id, "1300", "PPN Masukan (VAT In)", AccountType::Asset),
            // Liabilities
            Account::new(AccountId::new(), company_id, "2000", "Hutang Usaha (Accounts Payable)", AccountType::Liability),
            Account::new(AccountId::new(), company_id, "2100", "PPN Keluaran (VAT Out)", AccountType::Liability),
            Account::new(AccountId::new(), company_id, "2200", "Uang Muka Pelanggan (Customer Down Payment)", AccountType::Liability),
            // Equity
            Account::new(AccountId::new(), company_id, "3000", "Modal (Owner's Equity)", AccountType::Equity),
            // Revenue
            Account::new(AccountId::new(), company_id, "4000", "Pendapatan Penjualan (Sales Revenue)", AccountType::Revenue),
            Account::new(AccountId::new(), company_id, "4100", "Diskon Penjualan (Sales Discount)", AccountType::Revenue),
            // Expenses
            Account::new(AccountId::new(), company_id, "5000", "Beban Pokok Penjualan (Cost of Goods Sold)", AccountType::Expense),
            Account::new(AccountId::new(), company_id, "5100", "Beban Operasional (Operating Expense)", AccountType::Expense),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_balance_sides() {
        assert!(AccountType::Asset.is_debit_normal());
        assert!(AccountType::Expense.is_debit_normal());
        assert!(AccountType::CashBank.is_debit_normal());
        assert!(!AccountType::Liability.is_debit_normal());
        assert!(!AccountType::Equity.is_debit_normal());
        assert!(!AccountType::Revenue.is_debit_normal());
    }

    #[test]
    fn test_account_type_round_trip() {
        for t in [
            AccountType::Asset,
            AccountType::Liability,
            AccountType::Equity,
            AccountType::Revenue,
            AccountType::Expense,
            AccountType::CashBank,
        ] {
            assert_eq!(AccountType::parse(t.as_str()), Some(t));
        }
        assert_eq!(AccountType::parse("bogus"), None);
    }

    #[test]
    fn test_account_new_defaults() {
        let company_id = CompanyId::new();
        let account = Account::new(AccountId::new(), company_id, "1000", "Kas", AccountType::CashBank);

        assert_eq!(account.company_id, company_id);
        assert_eq!(account.code, "1000");
        assert!(account.is_active);
        assert!(account.description.is_none());
    }

    #[test]
    fn test_standard_chart_covers_all_types() {
        let accounts = StandardChartOfAccounts::create_default_accounts(CompanyId::new());

        for t in [
            AccountType::Asset,
            AccountType::Liability,
            AccountType::Equity,
            AccountType::Revenue,
            AccountType::Expense,
            AccountType::CashBank,
        ] {
            assert!(
                accounts.iter().any(|a| a.account_type == t),
                "missing account type {:?}",
                t
            );
        }

        // Codes are unique within the seeded chart
        let mut codes: Vec<_> = accounts.iter().map(|a| a.code.clone()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), accounts.len());
    }
}
