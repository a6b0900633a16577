//! Core business logic for Contab.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `chart` - Chart of accounts: hierarchy levels derived from account codes
//! - `ledger` - Debit/credit primitives and journal entry validation
//! - `aggregation` - Direct totals and prefix rollups over a ledger snapshot
//! - `reports` - Trial balance, balance sheet, income statement, journal book
//! - `tax` - Tax form field definitions, formula evaluation, audit matrix

pub mod aggregation;
pub mod chart;
pub mod ledger;
pub mod reports;
pub mod tax;
