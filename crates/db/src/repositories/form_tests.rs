//! Tests for form repository.

use chrono::NaiveDate;
use contab_core::tax::{FORM_200_V6, FieldValues};
use rust_decimal_macros::dec;
use sea_orm::{DatabaseBackend, MockDatabase};
use uuid::Uuid;

use super::{FormError, FormRepository, SeedSummary};
use crate::entities::{form_field_definitions, form_versions};

fn version() -> form_versions::Model {
    form_versions::Model {
        id: Uuid::now_v7(),
        form_code: "200".to_string(),
        version_number: "6".to_string(),
        effective_from: NaiveDate::from_ymd_opt(2025, 1, 1),
        effective_to: None,
        is_active: true,
    }
}

fn stored_fields(version_id: Uuid) -> Vec<form_field_definitions::Model> {
    (0..)
        .zip(FORM_200_V6)
        .map(|(position, (rubric, code, label, formula))| form_field_definitions::Model {
            id: Uuid::now_v7(),
            version_id,
            position,
            rubric: (*rubric).to_string(),
            field_code: (*code).to_string(),
            label: (*label).to_string(),
            is_calculated: formula.is_some(),
            formula: formula.map(str::to_string),
        })
        .collect()
}

#[tokio::test]
async fn test_missing_version_reported() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<form_versions::Model>::new()])
        .into_connection();
    let repo = FormRepository::new(db);

    let err = repo.load_form("200", "9").await.unwrap_err();
    assert!(matches!(
        err,
        FormError::VersionNotFound { ref version_number, .. } if version_number == "9"
    ));
}

#[tokio::test]
async fn test_loaded_form_compiles_calculator() {
    let version = version();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![version.clone()]])
        .append_query_results([stored_fields(version.id)])
        .into_connection();
    let repo = FormRepository::new(db);

    let form = repo.load_form("200", "6").await.unwrap();
    assert_eq!(form.fields.len(), form.definitions.len());
    assert_eq!(form.definitions.len(), 32);

    let calculator = form.calculator().unwrap();
    let values: FieldValues = calculator.calculate([("13", dec!(1000))]);
    assert_eq!(values.get("39"), dec!(130.00));
}

#[tokio::test]
async fn test_seed_is_idempotent_when_complete() {
    let version = version();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![version.clone()]])
        .append_query_results([stored_fields(version.id)])
        .into_connection();
    let repo = FormRepository::new(db);

    let summary = repo.seed_form_200_v6().await.unwrap();
    assert_eq!(
        summary,
        SeedSummary {
            version_created: false,
            fields_added: 0,
        }
    );
}
