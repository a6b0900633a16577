//! Journal repository for journal entry database operations.
//!
//! Entries are validated in full before a database transaction is opened;
//! the header and all of its details are then written atomically.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use contab_core::ledger::{
    JournalEntryInput, LedgerError, LedgerService, PostedEntry, PostedEntryLine,
};
use contab_shared::AppError;
use contab_shared::types::{AccountId, JournalEntryId, PageRequest, PageResponse};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{accounts, entry_details, journal_entries};

/// Error types for journal operations.
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    /// Entry failed ledger validation.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Journal entry not found.
    #[error("Journal entry not found: {0}")]
    NotFound(JournalEntryId),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl JournalError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Ledger(e) => e.error_code(),
            Self::NotFound(_) => "ENTRY_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

impl From<JournalError> for AppError {
    fn from(err: JournalError) -> Self {
        match err {
            JournalError::Ledger(
                LedgerError::AccountNotFound(_) | LedgerError::EntryNotFound(_),
            )
            | JournalError::NotFound(_) => Self::NotFound(err.to_string()),
            JournalError::Ledger(LedgerError::Unbalanced { .. }) => {
                Self::BusinessRule(err.to_string())
            }
            JournalError::Ledger(_) => Self::Validation(err.to_string()),
            JournalError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Journal repository for entry creation, lookup and deletion.
#[derive(Debug, Clone)]
pub struct JournalRepository {
    db: Arc<DatabaseConnection>,
}

impl JournalRepository {
    /// Creates a new journal repository.
    #[must_use]
    pub fn new(db: impl Into<Arc<DatabaseConnection>>) -> Self {
        Self { db: db.into() }
    }

    /// Validates and records a journal entry.
    ///
    /// # Errors
    ///
    /// Returns `JournalError::Ledger` if the entry is empty, unbalanced, has a
    /// malformed amount or references an unknown account. Nothing is written
    /// in that case.
    pub async fn create_entry(&self, input: JournalEntryInput) -> Result<PostedEntry, JournalError> {
        let account_ids: Vec<Uuid> = input
            .lines
            .iter()
            .map(|line| line.account_id.into_inner())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let known: HashMap<Uuid, accounts::Model> = if account_ids.is_empty() {
            HashMap::new()
        } else {
            accounts::Entity::find()
                .filter(accounts::Column::Id.is_in(account_ids))
                .all(self.db.as_ref())
                .await?
                .into_iter()
                .map(|account| (account.id, account))
                .collect()
        };

        let totals = LedgerService::validate_entry(&input, |id| {
            known.contains_key(&id.into_inner())
        })?;

        let txn = self.db.begin().await?;
        let header = Self::insert_header(&txn, &input).await?;
        Self::insert_details(&txn, header.id, &input).await?;
        txn.commit().await?;

        tracing::info!(
            entry_id = %header.id,
            lines = input.lines.len(),
            total = %totals.debit,
            "Journal entry recorded"
        );

        let lines = input
            .lines
            .iter()
            .filter_map(|line| {
                let account = known.get(&line.account_id.into_inner())?;
                Some(PostedEntryLine {
                    account_id: line.account_id,
                    account_code: account.code.clone(),
                    account_name: account.name.clone(),
                    debit: line.debit,
                    credit: line.credit,
                })
            })
            .collect();

        Ok(to_posted(header, lines))
    }

    async fn insert_header(
        txn: &DatabaseTransaction,
        input: &JournalEntryInput,
    ) -> Result<journal_entries::Model, DbErr> {
        let header = journal_entries::ActiveModel {
            id: Set(Uuid::now_v7()),
            entry_code: Set(input.entry_code.clone()),
            date: Set(input.date),
            description: Set(input.description.clone()),
            entry_type: Set(input.entry_type.clone()),
            entry_number: Set(input.entry_number),
            created_at: Set(Utc::now().into()),
        };
        header.insert(txn).await
    }

    async fn insert_details(
        txn: &DatabaseTransaction,
        entry_id: Uuid,
        input: &JournalEntryInput,
    ) -> Result<(), DbErr> {
        let details = input.lines.iter().zip(1..).map(|(line, line_number)| {
            entry_details::ActiveModel {
                id: Set(Uuid::now_v7()),
                entry_id: Set(entry_id),
                account_id: Set(line.account_id.into_inner()),
                line_number: Set(line_number),
                debit: Set(line.debit),
                credit: Set(line.credit),
            }
        });
        entry_details::Entity::insert_many(details).exec(txn).await?;
        Ok(())
    }

    /// Gets a journal entry with its lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_entry(&self, id: JournalEntryId) -> Result<Option<PostedEntry>, JournalError> {
        let Some(header) = journal_entries::Entity::find_by_id(id.into_inner())
            .one(self.db.as_ref())
            .await?
        else {
            return Ok(None);
        };
        let mut lines = self.load_lines(&[header.id]).await?;
        let entry_lines = lines.remove(&header.id).unwrap_or_default();
        Ok(Some(to_posted(header, entry_lines)))
    }

    /// Lists entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_entries(
        &self,
        page: &PageRequest,
    ) -> Result<PageResponse<PostedEntry>, JournalError> {
        let total = journal_entries::Entity::find().count(self.db.as_ref()).await?;
        let headers = journal_entries::Entity::find()
            .order_by_desc(journal_entries::Column::Date)
            .order_by_desc(journal_entries::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(self.db.as_ref())
            .await?;
        let entries = self.attach_lines(headers).await?;
        Ok(PageResponse::new(entries, page.page, page.per_page, total))
    }

    /// Entries dated within `[start, end]`, by date then creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PostedEntry>, JournalError> {
        let headers = journal_entries::Entity::find()
            .filter(journal_entries::Column::Date.gte(start))
            .filter(journal_entries::Column::Date.lte(end))
            .order_by_asc(journal_entries::Column::Date)
            .order_by_asc(journal_entries::Column::CreatedAt)
            .order_by_asc(journal_entries::Column::Id)
            .all(self.db.as_ref())
            .await?;
        self.attach_lines(headers).await
    }

    /// Deletes an entry and all of its lines.
    ///
    /// # Errors
    ///
    /// Returns `JournalError::NotFound` if the entry does not exist.
    pub async fn delete_entry(&self, id: JournalEntryId) -> Result<(), JournalError> {
        let txn = self.db.begin().await?;

        entry_details::Entity::delete_many()
            .filter(entry_details::Column::EntryId.eq(id.into_inner()))
            .exec(&txn)
            .await?;
        let deleted = journal_entries::Entity::delete_by_id(id.into_inner())
            .exec(&txn)
            .await?;

        if deleted.rows_affected == 0 {
            txn.rollback().await?;
            return Err(JournalError::NotFound(id));
        }

        txn.commit().await?;
        tracing::info!(entry_id = %id, "Journal entry deleted");
        Ok(())
    }

    async fn attach_lines(
        &self,
        headers: Vec<journal_entries::Model>,
    ) -> Result<Vec<PostedEntry>, JournalError> {
        let ids: Vec<Uuid> = headers.iter().map(|h| h.id).collect();
        let mut lines = self.load_lines(&ids).await?;
        Ok(headers
            .into_iter()
            .map(|header| {
                let entry_lines = lines.remove(&header.id).unwrap_or_default();
                to_posted(header, entry_lines)
            })
            .collect())
    }

    /// Lines of the given entries, grouped by entry in line order.
    async fn load_lines(
        &self,
        entry_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<PostedEntryLine>>, JournalError> {
        if entry_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = entry_details::Entity::find()
            .filter(entry_details::Column::EntryId.is_in(entry_ids.iter().copied()))
            .order_by_asc(entry_details::Column::EntryId)
            .order_by_asc(entry_details::Column::LineNumber)
            .find_also_related(accounts::Entity)
            .all(self.db.as_ref())
            .await?;

        let mut grouped: HashMap<Uuid, Vec<PostedEntryLine>> = HashMap::new();
        for (detail, account) in rows {
            let (account_code, account_name) =
                account.map(|a| (a.code, a.name)).unwrap_or_default();
            grouped.entry(detail.entry_id).or_default().push(PostedEntryLine {
                account_id: AccountId::from_uuid(detail.account_id),
                account_code,
                account_name,
                debit: detail.debit,
                credit: detail.credit,
            });
        }
        Ok(grouped)
    }
}

fn to_posted(header: journal_entries::Model, lines: Vec<PostedEntryLine>) -> PostedEntry {
    PostedEntry {
        id: JournalEntryId::from_uuid(header.id),
        entry_code: header.entry_code,
        date: header.date,
        description: header.description,
        entry_type: header.entry_type,
        entry_number: header.entry_number,
        lines,
    }
}

#[cfg(test)]
#[path = "journal_tests.rs"]
mod tests;
