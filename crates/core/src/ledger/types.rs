//! Domain types for journal entry creation and reporting.

use chrono::NaiveDate;
use contab_shared::types::{AccountId, JournalEntryId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::balance::DebitCredit;

/// Input for creating a journal entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntryInput {
    /// External reference code.
    pub entry_code: Option<String>,
    /// Accounting date.
    pub date: NaiveDate,
    /// Free-text description (glosa).
    pub description: Option<String>,
    /// Entry classification, e.g. "ingreso", "egreso", "traspaso".
    pub entry_type: Option<String>,
    /// Sequential number within its type.
    pub entry_number: Option<i32>,
    /// Debit/credit lines; at least one.
    pub lines: Vec<EntryLineInput>,
}

/// Input for a single debit/credit line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryLineInput {
    /// Account to post to.
    pub account_id: AccountId,
    /// Debit amount, non-negative, at most 2 decimals.
    #[serde(default)]
    pub debit: Decimal,
    /// Credit amount, non-negative, at most 2 decimals.
    #[serde(default)]
    pub credit: Decimal,
}

impl EntryLineInput {
    /// Debit line.
    #[must_use]
    pub const fn debit(account_id: AccountId, amount: Decimal) -> Self {
        Self {
            account_id,
            debit: amount,
            credit: Decimal::ZERO,
        }
    }

    /// Credit line.
    #[must_use]
    pub const fn credit(account_id: AccountId, amount: Decimal) -> Self {
        Self {
            account_id,
            debit: Decimal::ZERO,
            credit: amount,
        }
    }

    /// The line as a debit/credit pair.
    #[must_use]
    pub const fn amounts(&self) -> DebitCredit {
        DebitCredit::new(self.debit, self.credit)
    }
}

/// Entry totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryTotals {
    /// Sum of debits.
    pub debit: Decimal,
    /// Sum of credits.
    pub credit: Decimal,
    /// Whether debits equal credits.
    pub is_balanced: bool,
}

impl EntryTotals {
    /// Creates totals, computing the balanced flag.
    #[must_use]
    pub fn new(debit: Decimal, credit: Decimal) -> Self {
        Self {
            debit,
            credit,
            is_balanced: debit == credit,
        }
    }
}

/// A persisted journal entry with its lines, as read back for the journal book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostedEntry {
    /// Entry ID.
    pub id: JournalEntryId,
    /// External reference code.
    pub entry_code: Option<String>,
    /// Accounting date.
    pub date: NaiveDate,
    /// Description.
    pub description: Option<String>,
    /// Entry classification.
    pub entry_type: Option<String>,
    /// Sequential number.
    pub entry_number: Option<i32>,
    /// Lines in creation order.
    pub lines: Vec<PostedEntryLine>,
}

/// A persisted line joined with its account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostedEntryLine {
    /// Account ID.
    pub account_id: AccountId,
    /// Account code.
    pub account_code: String,
    /// Account name.
    pub account_name: String,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
}
