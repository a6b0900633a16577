//! Report generation service.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::ReportError;
use super::types::{
    BalanceSheetReport, IncomeStatementReport, JournalBookEntry, JournalBookReport,
    StatementLine, TrialBalanceReport, TrialBalanceRow, TrialBalanceTotals,
};
use crate::aggregation::{AccountBalance, LedgerSnapshot};
use crate::chart::{AccountLevel, StatementClass};
use crate::ledger::{DebitCredit, PostedEntry};

/// Service for generating financial reports.
pub struct ReportService;

impl ReportService {
    /// Generates the trial balance (balance de sumas y saldos).
    ///
    /// Every account is listed with its rolled-up sums. Totals add up
    /// level-5 rows only, since upper levels already contain them.
    #[must_use]
    pub fn generate_trial_balance(snapshot: &LedgerSnapshot) -> TrialBalanceReport {
        Self::trial_balance_from(snapshot.as_of, snapshot.balances())
    }

    /// Builds a trial balance from already rolled-up balances.
    #[must_use]
    pub fn trial_balance_from(as_of: NaiveDate, balances: Vec<AccountBalance>) -> TrialBalanceReport {
        let rows: Vec<TrialBalanceRow> = balances
            .into_iter()
            .map(|balance| {
                let totals = balance.totals();
                TrialBalanceRow {
                    account_id: balance.account_id,
                    code: balance.code,
                    name: balance.name,
                    level: balance.level,
                    debit: totals.debit,
                    credit: totals.credit,
                    deudor: totals.debit_balance(),
                    acreedor: totals.credit_balance(),
                }
            })
            .collect();

        let mut totals = TrialBalanceTotals::default();
        for row in rows.iter().filter(|row| row.level.is_leaf()) {
            totals.total_debit += row.debit;
            totals.total_credit += row.credit;
            totals.total_deudor += row.deudor;
            totals.total_acreedor += row.acreedor;
        }
        totals.is_balanced = totals.total_debit == totals.total_credit;

        TrialBalanceReport {
            report_type: "trial_balance".to_string(),
            as_of,
            rows,
            totals,
        }
    }

    /// Generates the balance sheet from accounts starting with 1, 2 and 3.
    ///
    /// Liabilities plus equity is reported equal to total assets; see
    /// [`BalanceSheetReport`] for where the computed figure goes.
    #[must_use]
    pub fn generate_balance_sheet(snapshot: &LedgerSnapshot) -> BalanceSheetReport {
        let mut assets = Vec::new();
        let mut liabilities = Vec::new();
        let mut equity = Vec::new();

        for (class, line) in Self::statement_lines(snapshot) {
            match class {
                StatementClass::Asset => assets.push(line),
                StatementClass::Liability => liabilities.push(line),
                StatementClass::Equity => equity.push(line),
                StatementClass::Income | StatementClass::Expense => {}
            }
        }

        let total_assets = Self::class_total(&assets);
        let computed_liabilities_equity =
            Self::class_total(&liabilities) + Self::class_total(&equity);

        BalanceSheetReport {
            report_type: "balance_sheet".to_string(),
            as_of: snapshot.as_of,
            assets,
            liabilities,
            equity,
            total_assets,
            computed_liabilities_equity,
            total_liabilities_equity: total_assets,
            reconciliation_difference: total_assets - computed_liabilities_equity,
        }
    }

    /// Generates the income statement (estado de resultados) from accounts
    /// starting with 4, 5 and 6.
    ///
    /// Zero-balance lines are omitted except at level 1.
    #[must_use]
    pub fn generate_income_statement(snapshot: &LedgerSnapshot) -> IncomeStatementReport {
        let mut income = Vec::new();
        let mut expenses = Vec::new();

        for (class, line) in Self::statement_lines(snapshot) {
            if line.balance.is_zero() && line.level != AccountLevel::Class {
                continue;
            }
            match class {
                StatementClass::Income => income.push(line),
                StatementClass::Expense => expenses.push(line),
                StatementClass::Asset | StatementClass::Liability | StatementClass::Equity => {}
            }
        }

        let total_income = Self::class_total(&income);
        let total_expense = Self::class_total(&expenses);

        IncomeStatementReport {
            report_type: "income_statement".to_string(),
            as_of: snapshot.as_of,
            income,
            expenses,
            total_income,
            total_expense,
            result: total_income - total_expense,
        }
    }

    /// Generates the journal book for `[start, end]`.
    ///
    /// `entries` must be in creation order; entries on the same date keep it.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidDateRange` if `start > end`.
    pub fn generate_journal_book(
        start: NaiveDate,
        end: NaiveDate,
        entries: Vec<PostedEntry>,
    ) -> Result<JournalBookReport, ReportError> {
        if start > end {
            return Err(ReportError::InvalidDateRange { start, end });
        }

        let mut entries: Vec<JournalBookEntry> = entries
            .into_iter()
            .filter(|entry| (start..=end).contains(&entry.date))
            .map(|entry| {
                let totals: DebitCredit = entry
                    .lines
                    .iter()
                    .map(|line| DebitCredit::new(line.debit, line.credit))
                    .sum();
                JournalBookEntry {
                    entry_id: entry.id,
                    entry_code: entry.entry_code,
                    date: entry.date,
                    description: entry.description,
                    entry_type: entry.entry_type,
                    entry_number: entry.entry_number,
                    lines: entry.lines,
                    total_debit: totals.debit,
                    total_credit: totals.credit,
                }
            })
            .collect();
        entries.sort_by_key(|entry| entry.date);

        let total_debit = entries.iter().map(|e| e.total_debit).sum();
        let total_credit = entries.iter().map(|e| e.total_credit).sum();

        Ok(JournalBookReport {
            report_type: "journal_book".to_string(),
            start_date: start,
            end_date: end,
            entries,
            total_debit,
            total_credit,
        })
    }

    /// Signed lines for every account with a statement class, ordered by code.
    fn statement_lines(snapshot: &LedgerSnapshot) -> Vec<(StatementClass, StatementLine)> {
        snapshot
            .balances()
            .into_iter()
            .filter_map(|balance| {
                let class = StatementClass::of(&balance.code)?;
                let line = StatementLine {
                    balance: class.normal_side().balance(balance.totals()),
                    account_id: balance.account_id,
                    code: balance.code,
                    name: balance.name,
                    level: balance.level,
                };
                Some((class, line))
            })
            .collect()
    }

    /// Sum of level-1 lines.
    fn class_total(lines: &[StatementLine]) -> Decimal {
        lines
            .iter()
            .filter(|line| line.level == AccountLevel::Class)
            .map(|line| line.balance)
            .sum()
    }
}
