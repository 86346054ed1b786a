//! Required-account pre-flight validator
//!
//! A business transaction names the semantic roles it needs; this validator
//! reports the roles no active account currently fills, together with a
//! suggested account the user could create. It is advisory only and never
//! blocks a posting itself.

use serde::{Deserialize, Serialize};

use core_kernel::CompanyContext;

use crate::chart::ChartOfAccounts;
use crate::error::LedgerError;
use crate::roles::{rule_for, AccountRole};

/// A role with no active account to fill it, plus a remediation suggestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredAccount {
    /// The unfilled role
    pub role: AccountRole,
    /// Suggested account code
    pub suggested_code: String,
    /// Suggested account name
    pub suggested_name: String,
    /// What the role is needed for
    pub description: String,
}

/// Pre-flight check that required roles resolve to at least one account
#[derive(Clone)]
pub struct RequiredAccounts {
    chart: ChartOfAccounts,
}

impl RequiredAccounts {
    /// Creates a validator over the given registry
    pub fn new(chart: ChartOfAccounts) -> Self {
        Self { chart }
    }

    /// Returns the roles among `required` that resolve to zero accounts
    ///
    /// An empty result means the transaction can proceed.
    pub async fn missing(
        &self,
        ctx: &CompanyContext,
        required: &[AccountRole],
    ) -> Result<Vec<RequiredAccount>, LedgerError> {
        let mut unfilled = Vec::new();

        for &role in required {
            let matches = self.chart.find_by_role(ctx, role).await?;
            if matches.is_empty() {
                let rule = rule_for(role);
                unfilled.push(RequiredAccount {
                    role,
                    suggested_code: rule.suggested_code.to_string(),
                    suggested_name: rule.suggested_name.to_string(),
                    description: rule.description.to_string(),
                });
            }
        }

        Ok(unfilled)
    }
}
