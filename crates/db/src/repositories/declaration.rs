//! Declaration repository: monthly tax declarations and the annual audit.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use contab_core::tax::{
    AuditHeader, DeclarationInput, DeclarationRecord, FieldCode, TaxAuditReport, TaxError,
    prepare_values,
};
use contab_shared::AppError;
use contab_shared::types::{DeclarationId, PageRequest, PageResponse, ReportingPeriod};
use rust_decimal::Decimal;
use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde::Serialize;
use uuid::Uuid;

use super::form::{FormError, FormRepository};
use crate::entities::{
    declaration_values, declarations, form_field_definitions, form_versions, taxpayers,
};

/// Error types for declaration operations.
#[derive(Debug, thiserror::Error)]
pub enum DeclarationError {
    /// Declaration input rejected.
    #[error(transparent)]
    Tax(#[from] TaxError),

    /// The taxpayer already declared this period.
    #[error("A declaration for {month:02}/{year} already exists for NIT {nit}")]
    DuplicateDeclaration {
        /// Taxpayer NIT.
        nit: String,
        /// Declared year.
        year: i32,
        /// Declared month.
        month: u32,
    },

    /// Form version not found.
    #[error("Form version {form_code} v{version_number} not found")]
    FormVersionNotFound {
        /// Form code.
        form_code: String,
        /// Version number.
        version_number: String,
    },

    /// Declaration not found.
    #[error("Declaration not found: {0}")]
    NotFound(DeclarationId),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl DeclarationError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Tax(e) => e.error_code(),
            Self::DuplicateDeclaration { .. } => "DUPLICATE_DECLARATION",
            Self::FormVersionNotFound { .. } => "FORM_VERSION_NOT_FOUND",
            Self::NotFound(_) => "DECLARATION_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

impl From<FormError> for DeclarationError {
    fn from(err: FormError) -> Self {
        match err {
            FormError::VersionNotFound {
                form_code,
                version_number,
            } => Self::FormVersionNotFound {
                form_code,
                version_number,
            },
            FormError::Tax(e) => Self::Tax(e),
            FormError::Database(e) => Self::Database(e),
        }
    }
}

impl From<DeclarationError> for AppError {
    fn from(err: DeclarationError) -> Self {
        match err {
            DeclarationError::Tax(ref e) if e.is_configuration_error() => {
                Self::Configuration(err.to_string())
            }
            DeclarationError::Tax(TaxError::PeriodNotConcluded { .. }) => {
                Self::BusinessRule(err.to_string())
            }
            DeclarationError::Tax(_) => Self::Validation(err.to_string()),
            DeclarationError::DuplicateDeclaration { .. } => Self::Conflict(err.to_string()),
            DeclarationError::FormVersionNotFound { .. } | DeclarationError::NotFound(_) => {
                Self::NotFound(err.to_string())
            }
            DeclarationError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Optional filters for declaration listings. `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationFilter {
    /// Taxpayer NIT.
    pub nit: Option<String>,
    /// Form code, e.g. `"200"`.
    pub form_code: Option<String>,
    /// Declared month, 1-12.
    pub month: Option<u32>,
    /// Declared year.
    pub year: Option<i32>,
    /// Declaration status, e.g. `"Procesado"`.
    pub status: Option<String>,
}

/// Declaration header with its taxpayer.
#[derive(Debug, Clone, Serialize)]
pub struct DeclarationSummary {
    /// Declaration ID.
    pub id: DeclarationId,
    /// Taxpayer NIT.
    pub taxpayer_nit: String,
    /// Taxpayer business name.
    pub taxpayer_name: String,
    /// Declared month.
    pub month: u32,
    /// Declared year.
    pub year: i32,
    /// Processing status.
    pub status: String,
    /// Tax authority transaction number.
    pub transaction_number: Option<String>,
    /// When the declaration was presented.
    pub presentation_date: Option<chrono::NaiveDateTime>,
    /// Values stored.
    pub value_count: usize,
    /// Values dropped because their code is not on the form.
    pub dropped_values: usize,
}

/// One stored value with its field.
#[derive(Debug, Clone, Serialize)]
pub struct StoredValue {
    /// Field code.
    pub field_code: String,
    /// Field label.
    pub label: String,
    /// Stored amount.
    pub value: Decimal,
}

/// Declaration with its values, in form order.
#[derive(Debug, Clone, Serialize)]
pub struct DeclarationDetail {
    /// Header.
    pub summary: DeclarationSummary,
    /// Values.
    pub values: Vec<StoredValue>,
}

/// Declaration repository.
#[derive(Debug, Clone)]
pub struct DeclarationRepository {
    db: Arc<DatabaseConnection>,
}

impl DeclarationRepository {
    /// Creates a new declaration repository.
    #[must_use]
    pub fn new(db: impl Into<Arc<DatabaseConnection>>) -> Self {
        Self { db: db.into() }
    }

    /// Records a monthly declaration.
    ///
    /// The taxpayer is created on first sight. Values are matched against the
    /// form's field table; unknown codes are dropped.
    ///
    /// # Errors
    ///
    /// - `Tax` if the NIT is blank, the month is invalid or not yet concluded
    /// - `FormVersionNotFound` if the form version is unknown
    /// - `DuplicateDeclaration` if the taxpayer already declared this period
    pub async fn create_declaration(
        &self,
        input: DeclarationInput,
        today: NaiveDate,
    ) -> Result<DeclarationSummary, DeclarationError> {
        let period = input.validate(today)?;
        let form = FormRepository::new(Arc::clone(&self.db))
            .load_form(&input.form_code, &input.version_number)
            .await?;

        let known: HashMap<FieldCode, Uuid> = form
            .fields
            .iter()
            .zip(&form.definitions)
            .map(|(field, definition)| (definition.code.clone(), field.id))
            .collect();
        let prepared = prepare_values(&input.values, &known);

        let txn = self.db.begin().await?;
        let taxpayer = Self::get_or_create_taxpayer(&txn, &input).await?;

        let existing = declarations::Entity::find()
            .filter(declarations::Column::TaxpayerId.eq(taxpayer.id))
            .filter(declarations::Column::Year.eq(period.year()))
            .filter(declarations::Column::Month.eq(month_column(period)?))
            .one(&txn)
            .await?;
        if existing.is_some() {
            txn.rollback().await?;
            return Err(DeclarationError::DuplicateDeclaration {
                nit: taxpayer.nit,
                year: period.year(),
                month: period.month(),
            });
        }

        let declaration = declarations::ActiveModel {
            id: Set(Uuid::now_v7()),
            taxpayer_id: Set(taxpayer.id),
            version_id: Set(form.version.id),
            month: Set(month_column(period)?),
            year: Set(period.year()),
            status: Set(input.status_or_default().to_string()),
            transaction_number: Set(input.transaction_number.clone()),
            presentation_date: Set(input.presentation_date),
            print_date: Set(input.print_date),
            pdf_user: Set(input.pdf_user.clone()),
            submitted_at: Set(Utc::now().into()),
        }
        .insert(&txn)
        .await?;

        if !prepared.matched.is_empty() {
            let values = prepared.matched.iter().map(|(field_id, value)| {
                declaration_values::ActiveModel {
                    id: Set(Uuid::now_v7()),
                    declaration_id: Set(declaration.id),
                    field_definition_id: Set(*field_id),
                    value: Set(*value),
                }
            });
            declaration_values::Entity::insert_many(values)
                .exec(&txn)
                .await?;
        }

        txn.commit().await?;

        if prepared.dropped > 0 {
            tracing::debug!(
                declaration_id = %declaration.id,
                dropped = prepared.dropped,
                "Declared values with unknown field codes were dropped"
            );
        }
        tracing::info!(
            declaration_id = %declaration.id,
            nit = %taxpayer.nit,
            period = %period,
            values = prepared.matched.len(),
            "Declaration recorded"
        );

        Ok(DeclarationSummary {
            id: DeclarationId::from_uuid(declaration.id),
            taxpayer_nit: taxpayer.nit,
            taxpayer_name: taxpayer.business_name,
            month: period.month(),
            year: period.year(),
            status: declaration.status,
            transaction_number: declaration.transaction_number,
            presentation_date: declaration.presentation_date,
            value_count: prepared.matched.len(),
            dropped_values: prepared.dropped,
        })
    }

    async fn get_or_create_taxpayer(
        txn: &DatabaseTransaction,
        input: &DeclarationInput,
    ) -> Result<taxpayers::Model, DbErr> {
        let nit = input.taxpayer_nit.trim();
        if let Some(taxpayer) = taxpayers::Entity::find()
            .filter(taxpayers::Column::Nit.eq(nit))
            .one(txn)
            .await?
        {
            return Ok(taxpayer);
        }

        let taxpayer = taxpayers::ActiveModel {
            id: Set(Uuid::now_v7()),
            nit: Set(nit.to_string()),
            business_name: Set(input.taxpayer_name_or_default().to_string()),
            created_at: Set(Utc::now().into()),
        }
        .insert(txn)
        .await?;
        tracing::info!(taxpayer_id = %taxpayer.id, nit = %taxpayer.nit, "Taxpayer created");
        Ok(taxpayer)
    }

    /// Finds a taxpayer by NIT.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_taxpayer(&self, nit: &str) -> Result<Option<taxpayers::Model>, DeclarationError> {
        let taxpayer = taxpayers::Entity::find()
            .filter(taxpayers::Column::Nit.eq(nit.trim()))
            .one(self.db.as_ref())
            .await?;
        Ok(taxpayer)
    }

    /// Lists declarations matching `filter`, newest submission first.
    ///
    /// An unknown NIT yields an empty page.
    ///
    /// # Errors
    ///
    /// Returns `DeclarationError::Tax` for a month outside 1-12, or an error
    /// if the database query fails.
    pub async fn list_declarations(
        &self,
        filter: &DeclarationFilter,
        page: &PageRequest,
    ) -> Result<PageResponse<DeclarationSummary>, DeclarationError> {
        let mut query = declarations::Entity::find();
        if let Some(nit) = &filter.nit {
            let Some(taxpayer) = self.find_taxpayer(nit).await? else {
                return Ok(PageResponse::new(Vec::new(), page.page, page.per_page, 0));
            };
            query = query.filter(declarations::Column::TaxpayerId.eq(taxpayer.id));
        }
        if let Some(form_code) = &filter.form_code {
            query = query.filter(
                declarations::Column::VersionId.in_subquery(
                    Query::select()
                        .column(form_versions::Column::Id)
                        .from(form_versions::Entity)
                        .and_where(form_versions::Column::FormCode.eq(form_code.as_str()))
                        .to_owned(),
                ),
            );
        }
        if let Some(month) = filter.month {
            let month = i16::try_from(month)
                .ok()
                .filter(|m| (1..=12).contains(m))
                .ok_or(TaxError::InvalidMonth(month))?;
            query = query.filter(declarations::Column::Month.eq(month));
        }
        if let Some(year) = filter.year {
            query = query.filter(declarations::Column::Year.eq(year));
        }
        if let Some(status) = &filter.status {
            query = query.filter(declarations::Column::Status.eq(status.as_str()));
        }

        let total = query.clone().count(self.db.as_ref()).await?;
        let rows = query
            .order_by_desc(declarations::Column::SubmittedAt)
            .order_by_desc(declarations::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .find_also_related(taxpayers::Entity)
            .all(self.db.as_ref())
            .await?;

        let ids: Vec<Uuid> = rows.iter().map(|(d, _)| d.id).collect();
        let counts = self.value_counts(&ids).await?;

        let data = rows
            .into_iter()
            .map(|(declaration, taxpayer)| {
                let count = counts.get(&declaration.id).copied().unwrap_or(0);
                summarize(declaration, taxpayer, count)
            })
            .collect();
        Ok(PageResponse::new(data, page.page, page.per_page, total))
    }

    async fn value_counts(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, usize>, DeclarationError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let values = declaration_values::Entity::find()
            .filter(declaration_values::Column::DeclarationId.is_in(ids.iter().copied()))
            .all(self.db.as_ref())
            .await?;
        let mut counts: HashMap<Uuid, usize> = HashMap::new();
        for value in values {
            *counts.entry(value.declaration_id).or_default() += 1;
        }
        Ok(counts)
    }

    /// Gets a declaration with its values in form order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_declaration(
        &self,
        id: DeclarationId,
    ) -> Result<Option<DeclarationDetail>, DeclarationError> {
        let Some((declaration, taxpayer)) = declarations::Entity::find_by_id(id.into_inner())
            .find_also_related(taxpayers::Entity)
            .one(self.db.as_ref())
            .await?
        else {
            return Ok(None);
        };

        let values = self.stored_values(declaration.id).await?;
        Ok(Some(DeclarationDetail {
            summary: summarize(declaration, taxpayer, values.len()),
            values,
        }))
    }

    async fn stored_values(&self, declaration_id: Uuid) -> Result<Vec<StoredValue>, DeclarationError> {
        let rows = declaration_values::Entity::find()
            .filter(declaration_values::Column::DeclarationId.eq(declaration_id))
            .find_also_related(form_field_definitions::Entity)
            .order_by_asc(form_field_definitions::Column::Position)
            .all(self.db.as_ref())
            .await?;
        Ok(rows
            .into_iter()
            .filter_map(|(value, field)| {
                let field = field?;
                Some(StoredValue {
                    field_code: field.field_code,
                    label: field.label,
                    value: value.value,
                })
            })
            .collect())
    }

    /// Deletes a declaration and its values.
    ///
    /// # Errors
    ///
    /// Returns `DeclarationError::NotFound` if it does not exist.
    pub async fn delete_declaration(&self, id: DeclarationId) -> Result<(), DeclarationError> {
        let txn = self.db.begin().await?;
        declaration_values::Entity::delete_many()
            .filter(declaration_values::Column::DeclarationId.eq(id.into_inner()))
            .exec(&txn)
            .await?;
        let deleted = declarations::Entity::delete_by_id(id.into_inner())
            .exec(&txn)
            .await?;
        if deleted.rows_affected == 0 {
            txn.rollback().await?;
            return Err(DeclarationError::NotFound(id));
        }
        txn.commit().await?;
        tracing::info!(declaration_id = %id, "Declaration deleted");
        Ok(())
    }

    /// Builds the annual audit matrix for a taxpayer.
    ///
    /// Returns `None` when the NIT is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the form version is missing, its field table is
    /// malformed, or a query fails.
    pub async fn tax_audit(
        &self,
        nit: &str,
        year: i32,
        form_code: &str,
        version_number: &str,
    ) -> Result<Option<TaxAuditReport>, DeclarationError> {
        let Some(taxpayer) = self.find_taxpayer(nit).await? else {
            return Ok(None);
        };
        let form = FormRepository::new(Arc::clone(&self.db))
            .load_form(form_code, version_number)
            .await?;
        let calculator = form.calculator()?;

        let declarations = declarations::Entity::find()
            .filter(declarations::Column::TaxpayerId.eq(taxpayer.id))
            .filter(declarations::Column::Year.eq(year))
            .order_by_asc(declarations::Column::SubmittedAt)
            .all(self.db.as_ref())
            .await?;

        let records = self.audit_records(declarations).await?;
        let header = AuditHeader {
            taxpayer_nit: taxpayer.nit,
            taxpayer_name: taxpayer.business_name,
            year,
            form_code: form.version.form_code.clone(),
            version_number: form.version.version_number.clone(),
        };
        let report = calculator.audit_report(header, &records);
        if report.dropped_values > 0 {
            tracing::debug!(dropped = report.dropped_values, "Audit ignored values off the form");
        }
        Ok(Some(report))
    }

    /// Reads declaration values keyed by their field code.
    async fn audit_records(
        &self,
        declarations: Vec<declarations::Model>,
    ) -> Result<Vec<DeclarationRecord>, DeclarationError> {
        let ids: Vec<Uuid> = declarations.iter().map(|d| d.id).collect();
        let mut by_declaration: HashMap<Uuid, Vec<(String, Decimal)>> = HashMap::new();
        if !ids.is_empty() {
            let rows = declaration_values::Entity::find()
                .filter(declaration_values::Column::DeclarationId.is_in(ids))
                .find_also_related(form_field_definitions::Entity)
                .all(self.db.as_ref())
                .await?;
            for (value, field) in rows {
                if let Some(field) = field {
                    by_declaration
                        .entry(value.declaration_id)
                        .or_default()
                        .push((field.field_code, value.value));
                }
            }
        }

        Ok(declarations
            .into_iter()
            .map(|declaration| DeclarationRecord {
                month: u32::try_from(declaration.month).unwrap_or(0),
                presentation_date: declaration.presentation_date,
                transaction_number: declaration.transaction_number,
                values: by_declaration.remove(&declaration.id).unwrap_or_default(),
            })
            .collect())
    }
}

fn month_column(period: ReportingPeriod) -> Result<i16, TaxError> {
    i16::try_from(period.month()).map_err(|_| TaxError::InvalidMonth(period.month()))
}

fn summarize(
    declaration: declarations::Model,
    taxpayer: Option<taxpayers::Model>,
    value_count: usize,
) -> DeclarationSummary {
    let (taxpayer_nit, taxpayer_name) = taxpayer
        .map(|t| (t.nit, t.business_name))
        .unwrap_or_default();
    DeclarationSummary {
        id: DeclarationId::from_uuid(declaration.id),
        taxpayer_nit,
        taxpayer_name,
        month: u32::try_from(declaration.month).unwrap_or(0),
        year: declaration.year,
        status: declaration.status,
        transaction_number: declaration.transaction_number,
        presentation_date: declaration.presentation_date,
        value_count,
        dropped_values: 0,
    }
}

#[cfg(test)]
#[path = "declaration_tests.rs"]
mod tests;
