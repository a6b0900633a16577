//! Database seeder for Contab.
//!
//! Seeds the Form 200 v6 field table and a small chart of accounts for
//! local development. Safe to run repeatedly.
//!
//! Usage: cargo run --bin seeder

use std::sync::Arc;

use anyhow::Context;
use contab_db::repositories::{AccountError, CreateAccountInput};
use contab_db::{AccountRepository, FormRepository};
use contab_shared::AppConfig;
use sea_orm::DatabaseConnection;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Demo chart: one branch per account type, down to posting level.
const DEMO_CHART: &[(&str, &str)] = &[
    ("1000000000", "ACTIVO"),
    ("1100000000", "ACTIVO CORRIENTE"),
    ("1110000000", "DISPONIBLE"),
    ("1110100000", "CAJA"),
    ("1110100001", "Caja General"),
    ("1110200000", "BANCOS"),
    ("1110200001", "Banco Nacional M/N"),
    ("1120000000", "EXIGIBLE"),
    ("1120100000", "CREDITO FISCAL"),
    ("1120100001", "Crédito Fiscal IVA"),
    ("2000000000", "PASIVO"),
    ("2100000000", "PASIVO CORRIENTE"),
    ("2110000000", "OBLIGACIONES FISCALES"),
    ("2110100000", "DEBITO FISCAL"),
    ("2110100001", "Débito Fiscal IVA"),
    ("2110100002", "IT por Pagar"),
    ("3000000000", "PATRIMONIO"),
    ("3100000000", "CAPITAL"),
    ("3110000000", "CAPITAL SOCIAL"),
    ("3110100000", "APORTES"),
    ("3110100001", "Capital Pagado"),
    ("4000000000", "INGRESOS"),
    ("4100000000", "INGRESOS OPERATIVOS"),
    ("4110000000", "VENTAS"),
    ("4110100000", "VENTAS DE MERCADERIA"),
    ("4110100001", "Ventas"),
    ("5000000000", "EGRESOS"),
    ("5100000000", "COSTOS"),
    ("5110000000", "COSTO DE VENTAS"),
    ("5110100000", "COSTO DE MERCADERIA"),
    ("5110100001", "Costo de Mercadería Vendida"),
    ("5200000000", "GASTOS OPERATIVOS"),
    ("5210000000", "GASTOS DE ADMINISTRACION"),
    ("5210100000", "IMPUESTOS"),
    ("5210100001", "Impuesto a las Transacciones"),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "contab=info,seeder=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;
    let db = Arc::new(
        contab_db::connect_with(&config.database)
            .await
            .context("Failed to connect to database")?,
    );
    tracing::info!("Connected to database");

    seed_forms(&db).await?;
    seed_demo_chart(&db).await?;

    tracing::info!("Seeding complete");
    Ok(())
}

async fn seed_forms(db: &Arc<DatabaseConnection>) -> anyhow::Result<()> {
    let summary = FormRepository::new(Arc::clone(db))
        .seed_form_200_v6()
        .await
        .context("Failed to seed Form 200 v6")?;
    if summary.version_created {
        tracing::info!(fields = summary.fields_added, "Created Form 200 v6");
    } else {
        tracing::info!(fields = summary.fields_added, "Form 200 v6 already present");
    }
    Ok(())
}

async fn seed_demo_chart(db: &Arc<DatabaseConnection>) -> anyhow::Result<()> {
    let repo = AccountRepository::new(Arc::clone(db));
    let mut created = 0_usize;

    for (code, name) in DEMO_CHART {
        let input = CreateAccountInput {
            code: (*code).to_string(),
            name: (*name).to_string(),
        };
        match repo.create_account(input).await {
            Ok(_) => created += 1,
            Err(AccountError::DuplicateCode(_)) => {}
            Err(e) => return Err(e).with_context(|| format!("Failed to seed account {code}")),
        }
    }

    tracing::info!(created, total = DEMO_CHART.len(), "Demo chart seeded");
    Ok(())
}
