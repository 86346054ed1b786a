//! Explicit company context
//!
//! Every core operation is scoped to a company. Rather than an ambient
//! session singleton, callers thread a `CompanyContext` through each call:
//! it names the company, the ledger currency, and the acting user.

use serde::{Deserialize, Serialize};

use crate::identifiers::{CompanyId, UserId};
use crate::money::Currency;

/// Scope for a core ledger call: which company, in which currency, by whom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyContext {
    /// The company whose ledger is being addressed
    pub company_id: CompanyId,
    /// The company's ledger currency
    pub currency: Currency,
    /// The acting user, recorded as `created_by` on postings
    pub user_id: UserId,
}

impl CompanyContext {
    /// Creates a new context
    pub fn new(company_id: CompanyId, currency: Currency, user_id: UserId) -> Self {
        Self {
            company_id,
            currency,
            user_id,
        }
    }
}
