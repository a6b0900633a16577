//! Balance aggregation over the chart of accounts.
//!
//! Direct totals are summed per account from posted lines up to a cutoff
//! date. A rollup then credits each account with the direct totals of every
//! account whose code starts with its aggregation prefix.

pub mod rollup;
pub mod snapshot;
pub mod totals;

#[cfg(test)]
mod benchmark;
#[cfg(test)]
mod rollup_props;

pub use rollup::{AccountBalance, PrefixIndex, account_rollup, rollup, rollup_naive};
pub use snapshot::LedgerSnapshot;
pub use totals::{DirectTotals, PostedDetail, direct_totals};
