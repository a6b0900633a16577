//! Report data types.

use chrono::NaiveDate;
use contab_shared::types::{AccountId, JournalEntryId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::chart::AccountLevel;
use crate::ledger::PostedEntryLine;

/// Trial balance row: rolled-up sums and the resulting debtor/creditor balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    /// Account ID.
    pub account_id: AccountId,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Hierarchy level.
    pub level: AccountLevel,
    /// Rolled-up debit.
    pub debit: Decimal,
    /// Rolled-up credit.
    pub credit: Decimal,
    /// `max(0, debit - credit)`.
    pub deudor: Decimal,
    /// `max(0, credit - debit)`.
    pub acreedor: Decimal,
}

/// Trial balance totals, summed over level-5 rows only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalanceTotals {
    /// Total debit.
    pub total_debit: Decimal,
    /// Total credit.
    pub total_credit: Decimal,
    /// Total debtor balances.
    pub total_deudor: Decimal,
    /// Total creditor balances.
    pub total_acreedor: Decimal,
    /// Whether debits equal credits.
    pub is_balanced: bool,
}

/// Trial balance report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceReport {
    /// Report type identifier.
    pub report_type: String,
    /// As of date.
    pub as_of: NaiveDate,
    /// Every account, ordered by code.
    pub rows: Vec<TrialBalanceRow>,
    /// Totals.
    pub totals: TrialBalanceTotals,
}

/// A signed statement line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementLine {
    /// Account ID.
    pub account_id: AccountId,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Hierarchy level.
    pub level: AccountLevel,
    /// Balance on the account's normal side.
    pub balance: Decimal,
}

/// Balance sheet report.
///
/// `total_liabilities_equity` is always reported equal to `total_assets`;
/// the figure actually computed from liability and equity accounts is kept
/// in `computed_liabilities_equity` and the gap in `reconciliation_difference`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceSheetReport {
    /// Report type identifier.
    pub report_type: String,
    /// As of date.
    pub as_of: NaiveDate,
    /// Asset lines (codes starting with `1`).
    pub assets: Vec<StatementLine>,
    /// Liability lines (codes starting with `2`).
    pub liabilities: Vec<StatementLine>,
    /// Equity lines (codes starting with `3`).
    pub equity: Vec<StatementLine>,
    /// Sum of level-1 asset balances.
    pub total_assets: Decimal,
    /// Sum of level-1 liability and equity balances.
    pub computed_liabilities_equity: Decimal,
    /// Reported liabilities plus equity, equal to `total_assets`.
    pub total_liabilities_equity: Decimal,
    /// `total_assets - computed_liabilities_equity`.
    pub reconciliation_difference: Decimal,
}

/// Income statement report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeStatementReport {
    /// Report type identifier.
    pub report_type: String,
    /// As of date.
    pub as_of: NaiveDate,
    /// Income lines (codes starting with `4`).
    pub income: Vec<StatementLine>,
    /// Cost and expense lines (codes starting with `5` or `6`).
    pub expenses: Vec<StatementLine>,
    /// Sum of level-1 income balances.
    pub total_income: Decimal,
    /// Sum of level-1 expense balances.
    pub total_expense: Decimal,
    /// `total_income - total_expense`.
    pub result: Decimal,
}

/// One entry of the journal book.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalBookEntry {
    /// Entry ID.
    pub entry_id: JournalEntryId,
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
    /// Sum of line debits.
    pub total_debit: Decimal,
    /// Sum of line credits.
    pub total_credit: Decimal,
}

/// Journal book (libro diario) for a date range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalBookReport {
    /// Report type identifier.
    pub report_type: String,
    /// First date, inclusive.
    pub start_date: NaiveDate,
    /// Last date, inclusive.
    pub end_date: NaiveDate,
    /// Entries ordered by date, then creation order.
    pub entries: Vec<JournalBookEntry>,
    /// Sum of all debits in range.
    pub total_debit: Decimal,
    /// Sum of all credits in range.
    pub total_credit: Decimal,
}
