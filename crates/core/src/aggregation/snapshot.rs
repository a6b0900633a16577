//! Read-only ledger snapshot handed to the report composers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::rollup::{AccountBalance, account_rollup, rollup};
use super::totals::{DirectTotals, PostedDetail, direct_totals};
use crate::chart::Account;

/// Accounts plus direct totals as of a cutoff date.
///
/// Everything computed from a snapshot is a pure function of it, so
/// repeated computations over the same snapshot give identical results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Cutoff date, inclusive.
    pub as_of: NaiveDate,
    /// Every account in the chart.
    pub accounts: Vec<Account>,
    /// Direct totals up to `as_of`.
    pub direct_totals: DirectTotals,
}

impl LedgerSnapshot {
    /// Creates a snapshot from pre-aggregated direct totals.
    #[must_use]
    pub const fn new(as_of: NaiveDate, accounts: Vec<Account>, direct_totals: DirectTotals) -> Self {
        Self {
            as_of,
            accounts,
            direct_totals,
        }
    }

    /// Creates a snapshot from raw posted lines, dropping lines after `as_of`.
    #[must_use]
    pub fn from_details(as_of: NaiveDate, accounts: Vec<Account>, details: &[PostedDetail]) -> Self {
        let direct_totals = direct_totals(details, as_of);
        Self::new(as_of, accounts, direct_totals)
    }

    /// Rolled-up balances of every account, ordered by code.
    #[must_use]
    pub fn balances(&self) -> Vec<AccountBalance> {
        rollup(&self.accounts, &self.direct_totals)
    }

    /// Rolled-up balance of the account with `code`, if any.
    #[must_use]
    pub fn balance_of(&self, code: &str) -> Option<AccountBalance> {
        self.accounts
            .iter()
            .find(|account| account.code == code)
            .map(|account| account_rollup(account, &self.accounts, &self.direct_totals))
    }
}
