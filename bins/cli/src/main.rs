//! Contab command-line reports.
//!
//! Loads configuration, connects to the ledger database and prints one
//! report as pretty JSON on stdout. Logs go to stderr.
//!
//! ```bash
//! contab trial-balance --as-of 2025-03-31
//! contab account-balance --code 1110100001
//! contab journal-book --start 2025-01-01 --end 2025-03-31
//! contab declarations --nit 1020304050 --year 2025
//! contab tax-audit --nit 1020304050 --year 2025
//! ```

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use contab_db::repositories::DeclarationFilter;
use contab_db::{DeclarationRepository, ReportRepository};
use contab_shared::AppConfig;
use contab_shared::config::LoggingConfig;
use contab_shared::types::PageRequest;
use serde::Serialize;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Financial statements and tax audits from the Contab ledger.
#[derive(Parser, Debug)]
#[command(name = "contab")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The report to generate
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Trial balance (sumas y saldos) for every account
    TrialBalance {
        /// Cutoff date, inclusive
        #[arg(long, value_name = "YYYY-MM-DD")]
        as_of: Option<NaiveDate>,
    },
    /// Balance sheet: assets against liabilities and equity
    BalanceSheet {
        /// Cutoff date, inclusive
        #[arg(long, value_name = "YYYY-MM-DD")]
        as_of: Option<NaiveDate>,
    },
    /// Income statement: income against expenses
    IncomeStatement {
        /// Cutoff date, inclusive
        #[arg(long, value_name = "YYYY-MM-DD")]
        as_of: Option<NaiveDate>,
    },
    /// Rolled-up balance of a single account
    AccountBalance {
        /// Account code
        #[arg(long)]
        code: String,
        /// Cutoff date, inclusive
        #[arg(long, value_name = "YYYY-MM-DD")]
        as_of: Option<NaiveDate>,
    },
    /// Journal book (libro diario) for a date range
    JournalBook {
        /// First date, inclusive
        #[arg(long, value_name = "YYYY-MM-DD")]
        start: NaiveDate,
        /// Last date, inclusive
        #[arg(long, value_name = "YYYY-MM-DD")]
        end: NaiveDate,
    },
    /// Submitted tax declarations, newest first
    Declarations {
        /// Taxpayer NIT
        #[arg(long)]
        nit: Option<String>,
        /// Form code
        #[arg(long)]
        form: Option<String>,
        /// Declared month, 1-12
        #[arg(long)]
        month: Option<u32>,
        /// Declared year
        #[arg(long)]
        year: Option<i32>,
        /// Declaration status
        #[arg(long)]
        status: Option<String>,
        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Declarations per page
        #[arg(long, default_value_t = 20)]
        per_page: u32,
    },
    /// Annual tax audit matrix for one taxpayer
    TaxAudit {
        /// Taxpayer NIT
        #[arg(long)]
        nit: String,
        /// Fiscal year
        #[arg(long)]
        year: i32,
        /// Form code, defaults to the configured form
        #[arg(long)]
        form: Option<String>,
        /// Form version, defaults to the configured version
        #[arg(long = "form-version")]
        form_version: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(&config.logging);

    let db = Arc::new(
        contab_db::connect_with(&config.database)
            .await
            .context("Failed to connect to database")?,
    );
    tracing::debug!("Connected to database");

    let today = Local::now().date_naive();
    let reports = ReportRepository::new(Arc::clone(&db));

    match cli.command {
        Command::TrialBalance { as_of } => {
            print_json(&reports.trial_balance(as_of.unwrap_or(today)).await?)
        }
        Command::BalanceSheet { as_of } => {
            print_json(&reports.balance_sheet(as_of.unwrap_or(today)).await?)
        }
        Command::IncomeStatement { as_of } => {
            print_json(&reports.income_statement(as_of.unwrap_or(today)).await?)
        }
        Command::AccountBalance { code, as_of } => {
            let balance = reports
                .account_balance(&code, as_of.unwrap_or(today))
                .await?
                .with_context(|| format!("Account {code} not found"))?;
            print_json(&balance)
        }
        Command::JournalBook { start, end } => print_json(&reports.journal_book(start, end).await?),
        Command::Declarations {
            nit,
            form,
            month,
            year,
            status,
            page,
            per_page,
        } => {
            let filter = DeclarationFilter {
                nit,
                form_code: form,
                month,
                year,
                status,
            };
            let page = PageRequest { page, per_page };
            print_json(&DeclarationRepository::new(db).list_declarations(&filter, &page).await?)
        }
        Command::TaxAudit {
            nit,
            year,
            form,
            form_version,
        } => {
            let form_code = form.unwrap_or(config.tax.form_code);
            let version_number = form_version.unwrap_or(config.tax.version_number);
            let report = DeclarationRepository::new(db)
                .tax_audit(&nit, year, &form_code, &version_number)
                .await?
                .with_context(|| format!("Taxpayer {nit} not found"))?;
            print_json(&report)
        }
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| logging.filter.as_str().into());
    let registry = tracing_subscriber::registry().with(filter);

    if logging.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value).context("Failed to write report")?;
    writeln!(stdout)?;
    Ok(())
}
