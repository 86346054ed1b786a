//! Semantic account roles
//!
//! Business transactions name the accounts they need by role ("a cash
//! account", "a receivable account"), not by code. A role is distinct from
//! the stored account type: several roles can share one type (tax assets and
//! ordinary assets are both `asset`), so those roles carry a secondary
//! case-insensitive keyword match against the account name. The keyword sets
//! are bilingual to match the seeded chart.
//!
//! Roles are a configuration table, not branching code: adding a role means
//! adding a `RoleRule` entry.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::account::{Account, AccountType};

/// Semantic account roles used by business transaction flows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    CashBank,
    Receivable,
    Payable,
    Revenue,
    Expense,
    Tax,
    Discount,
}

impl AccountRole {
    /// All known roles
    pub fn all() -> &'static [AccountRole] {
        &[
            AccountRole::CashBank,
            AccountRole::Receivable,
            AccountRole::Payable,
            AccountRole::Revenue,
            AccountRole::Expense,
            AccountRole::Tax,
            AccountRole::Discount,
        ]
    }
}

/// Resolution rule for one role: a type filter plus an optional keyword set
#[derive(Debug, Clone)]
pub struct RoleRule {
    pub role: AccountRole,
    /// Account types the role can resolve to
    pub account_types: &'static [AccountType],
    /// Lowercase name keywords; empty means the type match alone decides
    pub keywords: &'static [&'static str],
    /// Suggested code when no account fills the role
    pub suggested_code: &'static str,
    /// Suggested name for the remediation suggestion
    pub suggested_name: &'static str,
    /// Human-readable description of what the role is for
    pub description: &'static str,
}

impl RoleRule {
    /// Returns true if the account fills this role
    ///
    /// Inactive accounts never match; keyword comparison is case-insensitive.
    pub fn matches(&self, account: &Account) -> bool {
        if !account.is_active || !self.account_types.contains(&account.account_type) {
            return false;
        }
        if self.keywords.is_empty() {
            return true;
        }
        let name = account.name.to_lowercase();
        self.keywords.iter().any(|keyword| name.contains(keyword))
    }
}

static ROLE_RULES: Lazy<Vec<RoleRule>> = Lazy::new(|| {
    vec![
        RoleRule {
            role: AccountRole::CashBank,
            account_types: &[AccountType::CashBank],
            keywords: &[],
            suggested_code: "1000",
            suggested_name: "Kas (Cash on Hand)",
            description: "Cash or bank account for payments and receipts",
        },
        RoleRule {
            role: AccountRole::Receivable,
            account_types: &[AccountType::Asset],
            keywords: &["piutang", "receivable"],
            suggested_code: "1100",
            suggested_name: "Piutang Usaha (Accounts Receivable)",
            description: "Receivable account for unpaid customer invoices",
        },
        RoleRule {
            role: AccountRole::Payable,
            account_types: &[AccountType::Liability],
            keywords: &["hutang", "utang", "payable"],
            suggested_code: "2000",
            suggested_name: "Hutang Usaha (Accounts Payable)",
            description: "Payable account for unpaid supplier bills",
        },
        RoleRule {
            role: AccountRole::Revenue,
            account_types: &[AccountType::Revenue],
            keywords: &[],
            suggested_code: "4000",
            suggested_name: "Pendapatan Penjualan (Sales Revenue)",
            description: "Revenue account for sales income",
        },
        RoleRule {
            role: AccountRole::Expense,
            account_types: &[AccountType::Expense],
            keywords: &[],
            suggested_code: "5100",
            suggested_name: "Beban Operasional (Operating Expense)",
            description: "Expense account for operating costs",
        },
        RoleRule {
            role: AccountRole::Tax,
            account_types: &[AccountType::Asset, AccountType::Liability],
            keywords: &["pajak", "ppn", "pph", "tax", "vat"],
            suggested_code: "2100",
            suggested_name: "PPN Keluaran (VAT Out)",
            description: "Tax account for collected or prepaid tax",
        },
        RoleRule {
            role: AccountRole::Discount,
            account_types: &[AccountType::Revenue, AccountType::Expense],
            keywords: &["diskon", "potongan", "discount"],
            suggested_code: "4100",
            suggested_name: "Diskon Penjualan (Sales Discount)",
            description: "Discount account for sales or purchase discounts",
        },
    ]
});

/// Returns the resolution rule for a role
pub fn rule_for(role: AccountRole) -> &'static RoleRule {
    ROLE_RULES
        .iter()
        .find(|rule| rule.role == role)
        .expect("every role has a rule")
}
