//! Chart of accounts registry
//!
//! Read-only lookups over a company's accounts, including resolution of
//! semantic roles to concrete accounts. Nothing here mutates state; the
//! registry is the foundation for the required-account validator and for
//! default-account assignment in business flows.

use std::sync::Arc;

use core_kernel::{AccountId, CompanyContext};

use crate::account::Account;
use crate::error::LedgerError;
use crate::ports::LedgerStore;
use crate::roles::{rule_for, AccountRole};

/// Read-only registry over a company's chart of accounts
#[derive(Clone)]
pub struct ChartOfAccounts {
    store: Arc<dyn LedgerStore>,
}

impl ChartOfAccounts {
    /// Creates a registry over the given store
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }

    /// Fetches one account of the context company
    pub async fn account(
        &self,
        ctx: &CompanyContext,
        id: AccountId,
    ) -> Result<Account, LedgerError> {
        Ok(self.store.account(ctx.company_id, id).await?)
    }

    /// Returns the company's active accounts
    pub async fn active_accounts(&self, ctx: &CompanyContext) -> Result<Vec<Account>, LedgerError> {
        let accounts = self.store.accounts(ctx.company_id).await?;
        Ok(accounts.into_iter().filter(|a| a.is_active).collect())
    }

    /// Resolves a semantic role to the active accounts that fill it
    ///
    /// Resolution applies the role's configured rule: a type filter, plus a
    /// case-insensitive name keyword match for roles that share their type
    /// with other roles. An empty result means the role is unfilled; see
    /// `RequiredAccounts` for the pre-flight check built on this.
    pub async fn find_by_role(
        &self,
        ctx: &CompanyContext,
        role: AccountRole,
    ) -> Result<Vec<Account>, LedgerError> {
        let rule = rule_for(role);
        let accounts = self.store.accounts(ctx.company_id).await?;
        Ok(accounts.into_iter().filter(|a| rule.matches(a)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::{AccountType, StandardChartOfAccounts};
    use crate::adapters::InMemoryLedgerStore;
    use core_kernel::{CompanyId, Currency, UserId};

    async fn seeded() -> (ChartOfAccounts, CompanyContext, Arc<InMemoryLedgerStore>) {
        let store = Arc::new(InMemoryLedgerStore::new());
        let ctx = CompanyContext::new(CompanyId::new(), Currency::IDR, UserId::new());
        for account in StandardChartOfAccounts::create_default_accounts(ctx.company_id) {
            store.insert_account(account).await.unwrap();
        }
        (ChartOfAccounts::new(store.clone()), ctx, store)
    }

    #[tokio::test]
    async fn test_find_by_role_cash_bank() {
        let (chart, ctx, _) = seeded().await;

        let cash = chart.find_by_role(&ctx, AccountRole::CashBank).await.unwrap();
        assert_eq!(cash.len(), 2);
        assert!(cash.iter().all(|a| a.account_type == AccountType::CashBank));
    }

    #[tokio::test]
    async fn test_find_by_role_keyword_filtered() {
        let (chart, ctx, _) = seeded().await;

        let receivables = chart.find_by_role(&ctx, AccountRole::Receivable).await.unwrap();
        assert_eq!(receivables.len(), 1);
        assert_eq!(receivables[0].code, "1100");

        // Tax spans asset and liability types
        let tax = chart.find_by_role(&ctx, AccountRole::Tax).await.unwrap();
        let mut codes: Vec<_> = tax.iter().map(|a| a.code.as_str()).collect();
        codes.sort();
        assert_eq!(codes, vec!["1300", "2100"]);
    }

    #[tokio::test]
    async fn test_deactivated_account_drops_out_of_resolution() {
        let (chart, ctx, store) = seeded().await;

        let receivable = chart.find_by_role(&ctx, AccountRole::Receivable).await.unwrap();
        store
            .deactivate_account(ctx.company_id, receivable[0].id)
            .await
            .unwrap();

        let after = chart.find_by_role(&ctx, AccountRole::Receivable).await.unwrap();
        assert!(after.is_empty());
    }

    #[tokio::test]
    async fn test_registry_is_company_scoped() {
        let (chart, _, _) = seeded().await;
        let other_ctx = CompanyContext::new(CompanyId::new(), Currency::IDR, UserId::new());

        let accounts = chart.active_accounts(&other_ctx).await.unwrap();
        assert!(accounts.is_empty());
    }
}
