//! Chart of accounts.
//!
//! The hierarchy is never stored: an account's level and the set of accounts
//! it aggregates are derived from its 10-character numeric code alone.
//! - `level` - The five hierarchy levels and their prefix lengths
//! - `resolver` - Code to (level, aggregation prefix) resolution
//! - `account` - Account records and financial statement classes

pub mod account;
pub mod level;
pub mod resolver;

#[cfg(test)]
mod tests;

pub use account::{Account, StatementClass, flag_anomalies};
pub use level::AccountLevel;
pub use resolver::{
    AccountPosition, CANONICAL_CODE_LEN, CodeAnomaly, parent_code, resolve, trailing_zero_run,
};
