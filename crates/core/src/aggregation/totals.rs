//! Direct (non-rolled-up) totals per account.

use std::collections::HashMap;

use chrono::NaiveDate;
use contab_shared::types::AccountId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::DebitCredit;

/// A posted debit/credit line with its entry date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostedDetail {
    /// Account posted to.
    pub account_id: AccountId,
    /// Date of the owning journal entry.
    pub date: NaiveDate,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
}

/// Sum of debits and credits posted directly to each account.
///
/// Accounts without postings read as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectTotals(HashMap<AccountId, DebitCredit>);

impl DirectTotals {
    /// Empty totals.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Totals for an account, zero when nothing was posted.
    #[must_use]
    pub fn get(&self, account_id: AccountId) -> DebitCredit {
        self.0.get(&account_id).copied().unwrap_or_default()
    }

    /// Adds to an account's totals.
    pub fn add(&mut self, account_id: AccountId, amounts: DebitCredit) {
        *self.0.entry(account_id).or_default() += amounts;
    }

    /// Number of accounts with postings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when nothing was posted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Grand total across all accounts.
    #[must_use]
    pub fn grand_total(&self) -> DebitCredit {
        self.0.values().sum()
    }
}

impl FromIterator<(AccountId, DebitCredit)> for DirectTotals {
    fn from_iter<I: IntoIterator<Item = (AccountId, DebitCredit)>>(iter: I) -> Self {
        let mut totals = Self::new();
        for (account_id, amounts) in iter {
            totals.add(account_id, amounts);
        }
        totals
    }
}

/// Sums posted lines dated on or before `cutoff`, grouped by account.
#[must_use]
pub fn direct_totals<'a, I>(details: I, cutoff: NaiveDate) -> DirectTotals
where
    I: IntoIterator<Item = &'a PostedDetail>,
{
    details
        .into_iter()
        .filter(|detail| detail.date <= cutoff)
        .map(|detail| {
            (
                detail.account_id,
                DebitCredit::new(detail.debit, detail.credit),
            )
        })
        .collect()
}
