//! Account repository for chart of accounts database operations.

use std::sync::Arc;

use chrono::Utc;
use contab_core::chart::{Account, parent_code, resolve};
use contab_shared::AppError;
use contab_shared::types::{AccountId, PageRequest, PageResponse};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::entities::accounts;

/// Error types for account operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Account code already exists.
    #[error("Account code '{0}' already exists")]
    DuplicateCode(String),

    /// Account code is blank.
    #[error("Account code must not be empty")]
    EmptyCode,

    /// Account name is blank.
    #[error("Account name must not be empty")]
    EmptyName,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::DuplicateCode(_) => Self::Conflict(err.to_string()),
            AccountError::EmptyCode | AccountError::EmptyName => Self::Validation(err.to_string()),
            AccountError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    /// Account code, normally 10 digits.
    pub code: String,
    /// Account name.
    pub name: String,
}

/// Converts a stored account into the domain record.
#[must_use]
pub fn to_domain(model: accounts::Model) -> Account {
    Account {
        id: AccountId::from_uuid(model.id),
        code: model.code,
        name: model.name,
    }
}

/// Level and parent code stored alongside a new account.
///
/// Non-canonical codes are logged and stored as-is.
fn derive_hierarchy(code: &str) -> (i16, Option<String>) {
    let position = resolve(code);
    if let Some(anomaly) = position.anomaly {
        tracing::warn!(code = %code, anomaly = %anomaly, "Account code is not canonical");
    }
    (i16::from(position.level.number()), parent_code(code))
}

/// Account repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: Arc<DatabaseConnection>,
}

impl AccountRepository {
    /// Creates a new account repository.
    ///
    /// Accepts an owned connection or a handle shared with other repositories.
    #[must_use]
    pub fn new(db: impl Into<Arc<DatabaseConnection>>) -> Self {
        Self { db: db.into() }
    }

    /// Creates an account. Level and parent code are derived from the code
    /// and stored for lookups; malformed codes are accepted as level 5.
    ///
    /// # Errors
    ///
    /// Returns an error if the code or name is blank, the code already
    /// exists, or the insert fails.
    pub async fn create_account(
        &self,
        input: CreateAccountInput,
    ) -> Result<accounts::Model, AccountError> {
        let code = input.code.trim().to_string();
        if code.is_empty() {
            return Err(AccountError::EmptyCode);
        }
        if input.name.trim().is_empty() {
            return Err(AccountError::EmptyName);
        }

        if self.find_by_code(&code).await?.is_some() {
            return Err(AccountError::DuplicateCode(code));
        }

        let (level, parent) = derive_hierarchy(&code);
        let account = accounts::ActiveModel {
            id: Set(Uuid::now_v7()),
            level: Set(level),
            parent_code: Set(parent),
            code: Set(code),
            name: Set(input.name.trim().to_string()),
            created_at: Set(Utc::now().into()),
        };

        let result = account.insert(self.db.as_ref()).await?;
        tracing::info!(account_id = %result.id, code = %result.code, "Account created");
        Ok(result)
    }

    /// Finds an account by its code.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_code(&self, code: &str) -> Result<Option<accounts::Model>, AccountError> {
        let account = accounts::Entity::find()
            .filter(accounts::Column::Code.eq(code))
            .one(self.db.as_ref())
            .await?;
        Ok(account)
    }

    /// Finds an account by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: AccountId) -> Result<Option<accounts::Model>, AccountError> {
        let account = accounts::Entity::find_by_id(id.into_inner())
            .one(self.db.as_ref())
            .await?;
        Ok(account)
    }

    /// Lists accounts ordered by code.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_accounts(
        &self,
        page: &PageRequest,
    ) -> Result<PageResponse<accounts::Model>, AccountError> {
        let total = accounts::Entity::find().count(self.db.as_ref()).await?;
        let data = accounts::Entity::find()
            .order_by_asc(accounts::Column::Code)
            .offset(page.offset())
            .limit(page.limit())
            .all(self.db.as_ref())
            .await?;
        Ok(PageResponse::new(data, page.page, page.per_page, total))
    }

    /// Loads the whole chart as domain records, ordered by code.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn load_chart(&self) -> Result<Vec<Account>, AccountError> {
        let accounts = accounts::Entity::find()
            .order_by_asc(accounts::Column::Code)
            .all(self.db.as_ref())
            .await?;
        Ok(accounts.into_iter().map(to_domain).collect())
    }
}

#[cfg(test)]
#[path = "account_tests.rs"]
mod tests;
