//! Tests for declaration repository.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use contab_core::tax::{DeclarationInput, DeclaredValue, FORM_200_V6, TaxError};
use contab_shared::types::{DeclarationId, PageRequest};
use rust_decimal_macros::dec;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};
use uuid::Uuid;

use super::{DeclarationError, DeclarationFilter, DeclarationRepository};
use crate::entities::{declaration_values, declarations, form_field_definitions, form_versions, taxpayers};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
}

fn input(nit: &str, year: i32, month: u32) -> DeclarationInput {
    DeclarationInput {
        taxpayer_nit: nit.to_string(),
        taxpayer_name: Some("Comercial Andina SRL".to_string()),
        form_code: "200".to_string(),
        version_number: "6".to_string(),
        month,
        year,
        status: None,
        transaction_number: Some("TX-0001".to_string()),
        presentation_date: None,
        print_date: None,
        pdf_user: None,
        values: vec![DeclaredValue {
            code: "C13".to_string(),
            value: dec!(1000),
        }],
    }
}

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

fn fields(version_id: Uuid) -> Vec<form_field_definitions::Model> {
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

fn taxpayer(nit: &str) -> taxpayers::Model {
    taxpayers::Model {
        id: Uuid::now_v7(),
        nit: nit.to_string(),
        business_name: "Comercial Andina SRL".to_string(),
        created_at: Utc::now().into(),
    }
}

fn declaration(taxpayer_id: Uuid, version_id: Uuid, month: i16) -> declarations::Model {
    declarations::Model {
        id: Uuid::now_v7(),
        taxpayer_id,
        version_id,
        month,
        year: 2025,
        status: "Procesado".to_string(),
        transaction_number: Some(format!("TX-{month:02}")),
        presentation_date: None,
        print_date: None,
        pdf_user: None,
        submitted_at: Utc::now().into(),
    }
}

#[tokio::test]
async fn test_blank_nit_rejected_without_queries() {
    let repo = DeclarationRepository::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

    let err = repo
        .create_declaration(input("  ", 2025, 3), today())
        .await
        .unwrap_err();
    assert!(matches!(err, DeclarationError::Tax(TaxError::MissingNit)));
}

#[tokio::test]
async fn test_open_period_rejected() {
    let repo = DeclarationRepository::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

    let err = repo
        .create_declaration(input("1020304050", 2025, 6), today())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DeclarationError::Tax(TaxError::PeriodNotConcluded { year: 2025, month: 6 })
    ));
    assert_eq!(err.error_code(), "PERIOD_NOT_CONCLUDED");
}

#[tokio::test]
async fn test_unknown_form_version_rejected() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<form_versions::Model>::new()])
        .into_connection();
    let repo = DeclarationRepository::new(db);

    let err = repo
        .create_declaration(input("1020304050", 2025, 3), today())
        .await
        .unwrap_err();
    assert!(matches!(err, DeclarationError::FormVersionNotFound { .. }));
}

#[tokio::test]
async fn test_duplicate_period_rejected() {
    let version = version();
    let taxpayer = taxpayer("1020304050");
    let existing = declaration(taxpayer.id, version.id, 3);
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![version.clone()]])
        .append_query_results([fields(version.id)])
        .append_query_results([vec![taxpayer.clone()]])
        .append_query_results([vec![existing]])
        .into_connection();
    let repo = DeclarationRepository::new(db);

    let err = repo
        .create_declaration(input("1020304050", 2025, 3), today())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DeclarationError::DuplicateDeclaration { ref nit, year: 2025, month: 3 } if nit == "1020304050"
    ));
}

#[tokio::test]
async fn test_audit_for_unknown_taxpayer_is_none() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<taxpayers::Model>::new()])
        .into_connection();
    let repo = DeclarationRepository::new(db);

    let report = repo.tax_audit("999", 2025, "200", "6").await.unwrap();
    assert!(report.is_none());
}

#[tokio::test]
async fn test_audit_recalculates_declared_month() {
    let version = version();
    let fields = fields(version.id);
    let taxpayer = taxpayer("1020304050");
    let march = declaration(taxpayer.id, version.id, 3);

    let c13 = fields.iter().find(|f| f.field_code == "13").unwrap().clone();
    let value = declaration_values::Model {
        id: Uuid::now_v7(),
        declaration_id: march.id,
        field_definition_id: c13.id,
        value: dec!(1000.00),
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![taxpayer.clone()]])
        .append_query_results([vec![version.clone()]])
        .append_query_results([fields.clone()])
        .append_query_results([vec![march.clone()]])
        .append_query_results([vec![(value, c13)]])
        .into_connection();
    let repo = DeclarationRepository::new(db);

    let report = repo
        .tax_audit("1020304050", 2025, "200", "6")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(report.taxpayer_name, "Comercial Andina SRL");
    assert_eq!(report.rows.len(), 32);
    assert_eq!(report.row("13").unwrap().months[2], dec!(1000.00));
    assert_eq!(report.row("39").unwrap().months[2], dec!(130.00));
    assert_eq!(report.row("909").unwrap().total, dec!(130.00));
    assert_eq!(report.transaction_numbers[2].as_deref(), Some("TX-03"));
    assert_eq!(report.declared_months, vec![3]);
}

#[tokio::test]
async fn test_delete_missing_declaration_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            },
        ])
        .into_connection();
    let repo = DeclarationRepository::new(db);

    let id = DeclarationId::new();
    let err = repo.delete_declaration(id).await.unwrap_err();
    assert!(matches!(err, DeclarationError::NotFound(found) if found == id));
}

#[tokio::test]
async fn test_list_for_unknown_nit_is_empty_page() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<taxpayers::Model>::new()])
        .into_connection();
    let repo = DeclarationRepository::new(db);

    let filter = DeclarationFilter {
        nit: Some("999".to_string()),
        ..DeclarationFilter::default()
    };
    let page = repo
        .list_declarations(&filter, &PageRequest::default())
        .await
        .unwrap();
    assert!(page.data.is_empty());
    assert_eq!(page.meta.total, 0);
}

#[tokio::test]
async fn test_list_rejects_month_out_of_range() {
    let repo = DeclarationRepository::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

    let filter = DeclarationFilter {
        month: Some(13),
        ..DeclarationFilter::default()
    };
    let err = repo
        .list_declarations(&filter, &PageRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DeclarationError::Tax(TaxError::InvalidMonth(13))));
}

#[tokio::test]
async fn test_list_pages_filtered_declarations() {
    let version = version();
    let taxpayer = taxpayer("1020304050");
    let march = declaration(taxpayer.id, version.id, 3);
    let value = declaration_values::Model {
        id: Uuid::now_v7(),
        declaration_id: march.id,
        field_definition_id: Uuid::now_v7(),
        value: dec!(1000.00),
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![BTreeMap::from([(
            "num_items",
            Value::BigInt(Some(3)),
        )])]])
        .append_query_results([vec![(march.clone(), taxpayer.clone())]])
        .append_query_results([vec![value]])
        .into_connection();
    let repo = DeclarationRepository::new(db);

    let filter = DeclarationFilter {
        form_code: Some("200".to_string()),
        year: Some(2025),
        status: Some("Procesado".to_string()),
        ..DeclarationFilter::default()
    };
    let page = repo
        .list_declarations(&filter, &PageRequest { page: 2, per_page: 1 })
        .await
        .unwrap();

    assert_eq!(page.meta.total, 3);
    assert_eq!(page.meta.total_pages, 3);
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].taxpayer_nit, "1020304050");
    assert_eq!(page.data[0].month, 3);
    assert_eq!(page.data[0].value_count, 1);
}
