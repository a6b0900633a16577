//! Cent-scale money helpers.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Every stored amount is a `rust_decimal::Decimal` with at most two
//! fractional digits.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of fractional digits kept for monetary amounts.
pub const CENT_SCALE: u32 = 2;

/// Rounds an amount to cents, half away from zero (`0.005 -> 0.01`).
#[must_use]
pub fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CENT_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns true if the amount carries no more than two significant fractional digits.
///
/// Trailing zeros do not count, so `10.500` is accepted while `10.005` is not.
#[must_use]
pub fn has_cent_scale(amount: Decimal) -> bool {
    amount.normalize().scale() <= CENT_SCALE
}

#[cfg(test)]
#[path = "money_tests.rs"]
mod tests;
