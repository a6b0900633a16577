//! Account records and statement classes.

use contab_shared::types::AccountId;
use serde::{Deserialize, Serialize};

use super::level::AccountLevel;
use super::resolver::{CodeAnomaly, parent_code, resolve};
use crate::ledger::NormalSide;

/// A chart of accounts entry.
///
/// Level and parent are derived from `code`, never stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Account ID.
    pub id: AccountId,
    /// 10-digit account code.
    pub code: String,
    /// Display name.
    pub name: String,
}

impl Account {
    /// Creates an account with a fresh ID.
    #[must_use]
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: AccountId::new(),
            code: code.into(),
            name: name.into(),
        }
    }

    /// Derived hierarchy level.
    #[must_use]
    pub fn level(&self) -> AccountLevel {
        resolve(&self.code).level
    }

    /// Derived parent code.
    #[must_use]
    pub fn parent_code(&self) -> Option<String> {
        parent_code(&self.code)
    }

    /// Statement class from the first digit of the code.
    #[must_use]
    pub fn class(&self) -> Option<StatementClass> {
        StatementClass::of(&self.code)
    }
}

/// Financial statement class, read from the first code digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementClass {
    /// `1`
    Asset,
    /// `2`
    Liability,
    /// `3`
    Equity,
    /// `4`
    Income,
    /// `5` (costs) and `6` (expenses)
    Expense,
}

impl StatementClass {
    /// Class for a code, `None` when the first digit is outside 1-6.
    #[must_use]
    pub fn of(code: &str) -> Option<Self> {
        match code.as_bytes().first()? {
            b'1' => Some(Self::Asset),
            b'2' => Some(Self::Liability),
            b'3' => Some(Self::Equity),
            b'4' => Some(Self::Income),
            b'5' | b'6' => Some(Self::Expense),
            _ => None,
        }
    }

    /// Side on which the class carries a positive balance.
    #[must_use]
    pub const fn normal_side(self) -> NormalSide {
        match self {
            Self::Asset | Self::Expense => NormalSide::Debit,
            Self::Liability | Self::Equity | Self::Income => NormalSide::Credit,
        }
    }

    /// Balance sheet classes.
    #[must_use]
    pub const fn is_balance_sheet(self) -> bool {
        matches!(self, Self::Asset | Self::Liability | Self::Equity)
    }
}

/// Lists every account whose code is irregular.
#[must_use]
pub fn flag_anomalies(accounts: &[Account]) -> Vec<(&Account, CodeAnomaly)> {
    accounts
        .iter()
        .filter_map(|account| resolve(&account.code).anomaly.map(|a| (account, a)))
        .collect()
}
