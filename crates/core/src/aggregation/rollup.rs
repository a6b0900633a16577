//! Prefix rollups.
//!
//! An account's rolled-up totals are the direct totals of every account
//! (itself included) whose code starts with its aggregation prefix. Codes
//! sharing a prefix form one contiguous run once sorted, so [`PrefixIndex`]
//! answers each account with two binary searches over cumulative sums.

use contab_shared::types::AccountId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::totals::DirectTotals;
use crate::chart::{Account, AccountLevel, resolve};
use crate::ledger::DebitCredit;

/// Rolled-up balance of one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBalance {
    /// Account ID.
    pub account_id: AccountId,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Derived hierarchy level.
    pub level: AccountLevel,
    /// Sum of debits over the account's subtree.
    pub total_debit: Decimal,
    /// Sum of credits over the account's subtree.
    pub total_credit: Decimal,
}

impl AccountBalance {
    fn new(account: &Account, level: AccountLevel, totals: DebitCredit) -> Self {
        Self {
            account_id: account.id,
            code: account.code.clone(),
            name: account.name.clone(),
            level,
            total_debit: totals.debit,
            total_credit: totals.credit,
        }
    }

    /// Totals as a debit/credit pair.
    #[must_use]
    pub const fn totals(&self) -> DebitCredit {
        DebitCredit::new(self.total_debit, self.total_credit)
    }
}

/// Sorted codes with cumulative direct totals.
#[derive(Debug, Clone)]
pub struct PrefixIndex<'a> {
    codes: Vec<&'a str>,
    /// `cumulative[i]` is the sum over `codes[..i]`.
    cumulative: Vec<DebitCredit>,
}

impl<'a> PrefixIndex<'a> {
    /// Builds the index in O(n log n).
    #[must_use]
    pub fn build(accounts: &'a [Account], direct: &DirectTotals) -> Self {
        let mut rows: Vec<(&str, DebitCredit)> = accounts
            .iter()
            .map(|account| (account.code.as_str(), direct.get(account.id)))
            .collect();
        rows.sort_by(|a, b| a.0.cmp(b.0));

        let mut cumulative = Vec::with_capacity(rows.len() + 1);
        let mut running = DebitCredit::ZERO;
        cumulative.push(running);
        for (_, amounts) in &rows {
            running += *amounts;
            cumulative.push(running);
        }

        Self {
            codes: rows.into_iter().map(|(code, _)| code).collect(),
            cumulative,
        }
    }

    /// Sum of direct totals over every code starting with `prefix`.
    #[must_use]
    pub fn sum_with_prefix(&self, prefix: &str) -> DebitCredit {
        let start = self.codes.partition_point(|code| *code < prefix);
        let len = self.codes[start..].partition_point(|code| code.starts_with(prefix));
        self.cumulative[start + len] - self.cumulative[start]
    }
}

/// Rolls up every account, ordered by code (ties keep input order).
#[must_use]
pub fn rollup(accounts: &[Account], direct: &DirectTotals) -> Vec<AccountBalance> {
    let index = PrefixIndex::build(accounts, direct);
    sorted_by_code(accounts.iter().map(|account| {
        let position = resolve(&account.code);
        AccountBalance::new(
            account,
            position.level,
            index.sum_with_prefix(position.prefix),
        )
    }))
}

/// Quadratic reference rollup: a linear scan per account.
#[must_use]
pub fn rollup_naive(accounts: &[Account], direct: &DirectTotals) -> Vec<AccountBalance> {
    sorted_by_code(
        accounts
            .iter()
            .map(|account| account_rollup(account, accounts, direct)),
    )
}

/// Rollup of a single account against the full chart.
#[must_use]
pub fn account_rollup(
    account: &Account,
    accounts: &[Account],
    direct: &DirectTotals,
) -> AccountBalance {
    let position = resolve(&account.code);
    let totals = accounts
        .iter()
        .filter(|other| other.code.starts_with(position.prefix))
        .map(|other| direct.get(other.id))
        .sum();
    AccountBalance::new(account, position.level, totals)
}

fn sorted_by_code(rows: impl Iterator<Item = AccountBalance>) -> Vec<AccountBalance> {
    let mut rows: Vec<AccountBalance> = rows.collect();
    rows.sort_by(|a, b| a.code.cmp(&b.code));
    rows
}
