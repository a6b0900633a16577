//! Form repository: tax form versions and their field tables.

use std::sync::Arc;

use contab_core::tax::{FieldDefinition, FormSpec, TaxCalculator, TaxError, form_200_v6};
use contab_shared::AppError;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{form_field_definitions, form_versions};

/// Error types for form operations.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// Form version not found.
    #[error("Form version {form_code} v{version_number} not found")]
    VersionNotFound {
        /// Form code.
        form_code: String,
        /// Version number.
        version_number: String,
    },

    /// Stored field table is malformed.
    #[error(transparent)]
    Tax(#[from] TaxError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<FormError> for AppError {
    fn from(err: FormError) -> Self {
        match err {
            FormError::VersionNotFound { .. } => Self::NotFound(err.to_string()),
            FormError::Tax(_) => Self::Configuration(err.to_string()),
            FormError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// A form version with its parsed field table.
#[derive(Debug, Clone)]
pub struct LoadedForm {
    /// Version record.
    pub version: form_versions::Model,
    /// Field rows in form order, aligned with `definitions`.
    pub fields: Vec<form_field_definitions::Model>,
    /// Parsed definitions in form order.
    pub definitions: Vec<FieldDefinition>,
}

impl LoadedForm {
    /// Compiles a calculator for this form.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for duplicate codes or formula cycles.
    pub fn calculator(&self) -> Result<TaxCalculator, TaxError> {
        TaxCalculator::new(self.definitions.clone())
    }
}

/// Outcome of seeding a form version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    /// Whether the version row was created.
    pub version_created: bool,
    /// Field rows inserted.
    pub fields_added: usize,
}

/// Form repository for form versions and field definitions.
#[derive(Debug, Clone)]
pub struct FormRepository {
    db: Arc<DatabaseConnection>,
}

impl FormRepository {
    /// Creates a new form repository.
    #[must_use]
    pub fn new(db: impl Into<Arc<DatabaseConnection>>) -> Self {
        Self { db: db.into() }
    }

    /// Finds a form version by code and version number.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_version(
        &self,
        form_code: &str,
        version_number: &str,
    ) -> Result<Option<form_versions::Model>, FormError> {
        let version = form_versions::Entity::find()
            .filter(form_versions::Column::FormCode.eq(form_code))
            .filter(form_versions::Column::VersionNumber.eq(version_number))
            .one(self.db.as_ref())
            .await?;
        Ok(version)
    }

    /// Loads a form version and parses its field table.
    ///
    /// # Errors
    ///
    /// Returns `FormError::VersionNotFound` if the version does not exist and
    /// `FormError::Tax` if a stored code or formula is malformed.
    pub async fn load_form(
        &self,
        form_code: &str,
        version_number: &str,
    ) -> Result<LoadedForm, FormError> {
        let version = self
            .find_version(form_code, version_number)
            .await?
            .ok_or_else(|| FormError::VersionNotFound {
                form_code: form_code.to_string(),
                version_number: version_number.to_string(),
            })?;

        let fields = form_field_definitions::Entity::find()
            .filter(form_field_definitions::Column::VersionId.eq(version.id))
            .order_by_asc(form_field_definitions::Column::Position)
            .all(self.db.as_ref())
            .await?;

        let definitions = fields
            .iter()
            .map(|field| {
                FieldDefinition::parse(
                    &field.rubric,
                    &field.field_code,
                    &field.label,
                    field.formula.as_deref(),
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(LoadedForm {
            version,
            fields,
            definitions,
        })
    }

    /// Seeds Form 200 version 6. Existing rows are left untouched, so
    /// running it twice is harmless.
    ///
    /// # Errors
    ///
    /// Returns an error if any write fails; nothing is kept in that case.
    pub async fn seed_form_200_v6(&self) -> Result<SeedSummary, FormError> {
        let spec = FormSpec::FORM_200_V6;
        let definitions = form_200_v6()?;

        let txn = self.db.begin().await?;

        let existing = form_versions::Entity::find()
            .filter(form_versions::Column::FormCode.eq(spec.form_code))
            .filter(form_versions::Column::VersionNumber.eq(spec.version_number))
            .one(&txn)
            .await?;
        let version_created = existing.is_none();
        let version = match existing {
            Some(version) => version,
            None => {
                form_versions::ActiveModel {
                    id: Set(Uuid::now_v7()),
                    form_code: Set(spec.form_code.to_string()),
                    version_number: Set(spec.version_number.to_string()),
                    effective_from: Set(Some(spec.effective_from)),
                    effective_to: Set(None),
                    is_active: Set(true),
                }
                .insert(&txn)
                .await?
            }
        };

        let present: Vec<String> = form_field_definitions::Entity::find()
            .filter(form_field_definitions::Column::VersionId.eq(version.id))
            .all(&txn)
            .await?
            .into_iter()
            .map(|field| field.field_code)
            .collect();

        let mut fields_added = 0;
        for (position, definition) in (0..).zip(&definitions) {
            if present.iter().any(|code| code == definition.code.as_str()) {
                continue;
            }
            form_field_definitions::ActiveModel {
                id: Set(Uuid::now_v7()),
                version_id: Set(version.id),
                position: Set(position),
                rubric: Set(definition.rubric.clone()),
                field_code: Set(definition.code.to_string()),
                label: Set(definition.label.clone()),
                is_calculated: Set(definition.is_calculated()),
                formula: Set(definition.formula.as_ref().map(|f| f.source().to_string())),
            }
            .insert(&txn)
            .await?;
            fields_added += 1;
        }

        txn.commit().await?;
        tracing::info!(
            form_code = spec.form_code,
            version_number = spec.version_number,
            version_created,
            fields_added,
            "Form seeded"
        );

        Ok(SeedSummary {
            version_created,
            fields_added,
        })
    }
}

#[cfg(test)]
#[path = "form_tests.rs"]
mod tests;
