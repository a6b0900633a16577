//! Report repository for financial report database operations.
//!
//! Loads a ledger snapshot and hands it to the pure report builders in
//! `contab_core::reports`.

use std::sync::Arc;

use chrono::NaiveDate;
use contab_core::aggregation::{AccountBalance, DirectTotals, LedgerSnapshot};
use contab_core::chart::flag_anomalies;
use contab_core::ledger::DebitCredit;
use contab_core::reports::{
    BalanceSheetReport, IncomeStatementReport, JournalBookReport, ReportError as CoreReportError,
    ReportService, TrialBalanceReport,
};
use contab_shared::AppError;
use contab_shared::types::AccountId;
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, JoinType, QueryFilter, QuerySelect,
    RelationTrait,
};
use uuid::Uuid;

use super::account::{AccountError, AccountRepository};
use super::journal::{JournalError, JournalRepository};
use crate::entities::{entry_details, journal_entries};

/// Error types for report operations.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Report parameters rejected.
    #[error(transparent)]
    Report(#[from] CoreReportError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<AccountError> for ReportError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::Database(e) => Self::Database(e),
            other => Self::Database(DbErr::Custom(other.to_string())),
        }
    }
}

impl From<JournalError> for ReportError {
    fn from(err: JournalError) -> Self {
        match err {
            JournalError::Database(e) => Self::Database(e),
            other => Self::Database(DbErr::Custom(other.to_string())),
        }
    }
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::Report(_) => Self::Validation(err.to_string()),
            ReportError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Report repository for financial report queries.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: Arc<DatabaseConnection>,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub fn new(db: impl Into<Arc<DatabaseConnection>>) -> Self {
        Self { db: db.into() }
    }

    /// Loads the chart and the direct totals of every account as of `as_of`.
    ///
    /// Totals are summed by the database, one row per account with postings.
    /// Non-canonical account codes are logged and kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn load_snapshot(&self, as_of: NaiveDate) -> Result<LedgerSnapshot, ReportError> {
        let accounts = AccountRepository::new(Arc::clone(&self.db)).load_chart().await?;
        for (account, anomaly) in flag_anomalies(&accounts) {
            tracing::warn!(code = %account.code, anomaly = %anomaly, "Non-canonical account code");
        }

        // Column order matches the tuple: account_id, credit, debit
        let rows: Vec<(Uuid, Decimal, Decimal)> = entry_details::Entity::find()
            .select_only()
            .column(entry_details::Column::AccountId)
            .column_as(entry_details::Column::Credit.sum(), "credit")
            .column_as(entry_details::Column::Debit.sum(), "debit")
            .join(JoinType::InnerJoin, entry_details::Relation::JournalEntries.def())
            .filter(journal_entries::Column::Date.lte(as_of))
            .group_by(entry_details::Column::AccountId)
            .into_tuple()
            .all(self.db.as_ref())
            .await?;

        let direct_totals: DirectTotals = rows
            .into_iter()
            .map(|(account_id, credit, debit)| {
                (AccountId::from_uuid(account_id), DebitCredit::new(debit, credit))
            })
            .collect();

        tracing::debug!(
            as_of = %as_of,
            accounts = accounts.len(),
            posted_accounts = direct_totals.len(),
            "Ledger snapshot loaded"
        );
        Ok(LedgerSnapshot::new(as_of, accounts, direct_totals))
    }

    /// Trial balance as of a date.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn trial_balance(&self, as_of: NaiveDate) -> Result<TrialBalanceReport, ReportError> {
        let snapshot = self.load_snapshot(as_of).await?;
        Ok(ReportService::generate_trial_balance(&snapshot))
    }

    /// Balance sheet as of a date.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn balance_sheet(&self, as_of: NaiveDate) -> Result<BalanceSheetReport, ReportError> {
        let snapshot = self.load_snapshot(as_of).await?;
        Ok(ReportService::generate_balance_sheet(&snapshot))
    }

    /// Income statement as of a date.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn income_statement(
        &self,
        as_of: NaiveDate,
    ) -> Result<IncomeStatementReport, ReportError> {
        let snapshot = self.load_snapshot(as_of).await?;
        Ok(ReportService::generate_income_statement(&snapshot))
    }

    /// Rolled-up balance of one account, `None` if the code is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn account_balance(
        &self,
        code: &str,
        as_of: NaiveDate,
    ) -> Result<Option<AccountBalance>, ReportError> {
        let snapshot = self.load_snapshot(as_of).await?;
        Ok(snapshot.balance_of(code))
    }

    /// Journal book for `[start, end]`.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Report` if `start > end`.
    pub async fn journal_book(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<JournalBookReport, ReportError> {
        if start > end {
            return Err(CoreReportError::InvalidDateRange { start, end }.into());
        }
        let entries = JournalRepository::new(Arc::clone(&self.db))
            .list_in_range(start, end)
            .await?;
        Ok(ReportService::generate_journal_book(start, end, entries)?)
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
