//! Double-entry primitives and journal entry validation.
//!
//! This module implements:
//! - Debit/credit pairs and normal-side balance rules
//! - Domain types for journal entry creation
//! - Error types for ledger operations
//! - Ledger service for balance validation before persistence

pub mod balance;
pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod validation_props;

pub use balance::{DebitCredit, NormalSide};
pub use error::LedgerError;
pub use service::LedgerService;
pub use types::{EntryLineInput, EntryTotals, JournalEntryInput, PostedEntry, PostedEntryLine};
