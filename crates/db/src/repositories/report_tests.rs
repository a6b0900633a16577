//! Tests for report repository.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{DatabaseBackend, MockDatabase, Value};
use uuid::Uuid;

use super::{ReportError, ReportRepository};
use crate::entities::accounts;
use crate::repositories::AccountRepository;

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()
}

fn account(code: &str, name: &str, level: i16) -> accounts::Model {
    accounts::Model {
        id: Uuid::now_v7(),
        code: code.to_string(),
        name: name.to_string(),
        parent_code: None,
        level,
        created_at: Utc::now().into(),
    }
}

fn chart() -> Vec<accounts::Model> {
    vec![
        account("1000000000", "ACTIVO", 1),
        account("1101010001", "Caja general", 5),
        account("4000000000", "INGRESOS", 1),
        account("4101010001", "Ventas", 5),
    ]
}

fn chart_without_movements() -> MockDatabase {
    MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([chart()])
        .append_query_results([Vec::<BTreeMap<&str, Value>>::new()])
}

/// One grouped row per account, as returned by the `GROUP BY account_id` query.
fn grouped(account_id: Uuid, debit: Decimal, credit: Decimal) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([
        ("account_id", Value::from(account_id)),
        ("credit", Value::from(credit)),
        ("debit", Value::from(debit)),
    ])
}

#[tokio::test]
async fn test_trial_balance_of_quiet_ledger_is_zero_and_balanced() {
    let repo = ReportRepository::new(chart_without_movements().into_connection());

    let report = repo.trial_balance(as_of()).await.unwrap();
    assert_eq!(report.rows.len(), 4);
    assert!(report.totals.is_balanced);
    assert!(report.totals.total_debit.is_zero());
}

#[tokio::test]
async fn test_unknown_account_balance_is_none() {
    let repo = ReportRepository::new(chart_without_movements().into_connection());

    let balance = repo.account_balance("9999999999", as_of()).await.unwrap();
    assert!(balance.is_none());
}

#[tokio::test]
async fn test_journal_book_rejects_inverted_range() {
    let repo = ReportRepository::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

    let start = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
    let end = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    let err = repo.journal_book(start, end).await.unwrap_err();
    assert!(matches!(err, ReportError::Report(_)));
}

#[tokio::test]
async fn test_grouped_totals_roll_up_to_level_one() {
    let chart = chart();
    let cash = chart[1].id;
    let sales = chart[3].id;
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([chart.clone()])
        .append_query_results([vec![
            grouped(cash, dec!(150.00), dec!(20.00)),
            grouped(sales, dec!(20.00), dec!(150.00)),
        ]])
        .into_connection();
    let repo = ReportRepository::new(db);

    let snapshot = repo.load_snapshot(as_of()).await.unwrap();
    assert_eq!(snapshot.direct_totals.len(), 2);

    let assets = snapshot.balance_of("1000000000").unwrap();
    assert_eq!(assets.total_debit, dec!(150.00));
    assert_eq!(assets.total_credit, dec!(20.00));

    let income = snapshot.balance_of("4000000000").unwrap();
    assert_eq!(income.total_debit, dec!(20.00));
    assert_eq!(income.total_credit, dec!(150.00));
}

#[tokio::test]
async fn test_repositories_share_one_connection() {
    let db = Arc::new(chart_without_movements().into_connection());
    let accounts = AccountRepository::new(Arc::clone(&db));
    let reports = ReportRepository::new(Arc::clone(&db));

    // Both repositories drain the same mock query queue.
    let chart = accounts.load_chart().await.unwrap();
    assert_eq!(chart.len(), 4);

    let snapshot = reports.load_snapshot(as_of()).await;
    assert!(snapshot.is_err());
}
