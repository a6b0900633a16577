//! Debit/credit pairs and balance sign conventions.

use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Side on which an account carries a positive balance.
///
/// - Assets/Expenses: balance = debit - credit (debit-normal)
/// - Liabilities/Equity/Income: balance = credit - debit (credit-normal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalSide {
    /// Debit-normal accounts.
    Debit,
    /// Credit-normal accounts.
    Credit,
}

impl NormalSide {
    /// Signed balance of a debit/credit pair on this side.
    #[must_use]
    pub fn balance(self, totals: DebitCredit) -> Decimal {
        match self {
            Self::Debit => totals.debit - totals.credit,
            Self::Credit => totals.credit - totals.debit,
        }
    }
}

/// Accumulated debit and credit amounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebitCredit {
    /// Total debit.
    pub debit: Decimal,
    /// Total credit.
    pub credit: Decimal,
}

impl DebitCredit {
    /// Both sides zero.
    pub const ZERO: Self = Self {
        debit: Decimal::ZERO,
        credit: Decimal::ZERO,
    };

    /// Creates a pair.
    #[must_use]
    pub const fn new(debit: Decimal, credit: Decimal) -> Self {
        Self { debit, credit }
    }

    /// Excess of debits over credits, or zero (the "deudor" column).
    #[must_use]
    pub fn debit_balance(&self) -> Decimal {
        (self.debit - self.credit).max(Decimal::ZERO)
    }

    /// Excess of credits over debits, or zero (the "acreedor" column).
    #[must_use]
    pub fn credit_balance(&self) -> Decimal {
        (self.credit - self.debit).max(Decimal::ZERO)
    }

    /// True when both sides are equal.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.debit == self.credit
    }
}

impl Add for DebitCredit {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.debit + rhs.debit, self.credit + rhs.credit)
    }
}

impl AddAssign for DebitCredit {
    fn add_assign(&mut self, rhs: Self) {
        self.debit += rhs.debit;
        self.credit += rhs.credit;
    }
}

impl Sub for DebitCredit {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.debit - rhs.debit, self.credit - rhs.credit)
    }
}

impl Sum for DebitCredit {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a DebitCredit> for DebitCredit {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
