//! Initial database migration.
//!
//! Creates the ledger tables (accounts, journal entries, entry details) and
//! the tax declaration tables (taxpayers, form versions, field definitions,
//! declarations, declared values).

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: LEDGER
        // ============================================================
        db.execute_unprepared(ACCOUNTS_SQL).await?;
        db.execute_unprepared(JOURNAL_ENTRIES_SQL).await?;
        db.execute_unprepared(ENTRY_DETAILS_SQL).await?;

        // ============================================================
        // PART 2: TAX FORMS
        // ============================================================
        db.execute_unprepared(TAXPAYERS_SQL).await?;
        db.execute_unprepared(FORM_VERSIONS_SQL).await?;
        db.execute_unprepared(FORM_FIELD_DEFINITIONS_SQL).await?;
        db.execute_unprepared(DECLARATIONS_SQL).await?;
        db.execute_unprepared(DECLARATION_VALUES_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ACCOUNTS_SQL: &str = r"
CREATE TABLE accounts (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    code VARCHAR(20) NOT NULL UNIQUE,
    name VARCHAR(255) NOT NULL,
    parent_code VARCHAR(20),
    level SMALLINT NOT NULL CHECK (level BETWEEN 1 AND 5),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_accounts_parent ON accounts(parent_code) WHERE parent_code IS NOT NULL;
";

const JOURNAL_ENTRIES_SQL: &str = r"
CREATE TABLE journal_entries (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    entry_code VARCHAR(50),
    date DATE NOT NULL,
    description TEXT,
    entry_type VARCHAR(50),
    entry_number INTEGER,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_je_date ON journal_entries(date);
CREATE INDEX idx_je_code ON journal_entries(entry_code) WHERE entry_code IS NOT NULL;
";

const ENTRY_DETAILS_SQL: &str = r"
CREATE TABLE entry_details (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    entry_id UUID NOT NULL REFERENCES journal_entries(id) ON DELETE CASCADE,
    account_id UUID NOT NULL REFERENCES accounts(id),
    line_number INTEGER NOT NULL,
    debit NUMERIC(15, 2) NOT NULL DEFAULT 0,
    credit NUMERIC(15, 2) NOT NULL DEFAULT 0,
    CONSTRAINT chk_non_negative CHECK (debit >= 0 AND credit >= 0),
    UNIQUE (entry_id, line_number)
);

CREATE INDEX idx_ed_entry ON entry_details(entry_id);
CREATE INDEX idx_ed_account ON entry_details(account_id);
";

const TAXPAYERS_SQL: &str = r"
CREATE TABLE taxpayers (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    nit VARCHAR(30) NOT NULL UNIQUE,
    business_name VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const FORM_VERSIONS_SQL: &str = r"
CREATE TABLE form_versions (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    form_code VARCHAR(20) NOT NULL,
    version_number VARCHAR(20) NOT NULL,
    effective_from DATE,
    effective_to DATE,
    is_active BOOLEAN NOT NULL DEFAULT true,
    UNIQUE (form_code, version_number)
);
";

const FORM_FIELD_DEFINITIONS_SQL: &str = r"
CREATE TABLE form_field_definitions (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    version_id UUID NOT NULL REFERENCES form_versions(id) ON DELETE CASCADE,
    position INTEGER NOT NULL,
    rubric VARCHAR(50) NOT NULL,
    field_code VARCHAR(20) NOT NULL,
    label TEXT NOT NULL,
    is_calculated BOOLEAN NOT NULL DEFAULT false,
    formula TEXT,
    UNIQUE (version_id, field_code),
    CONSTRAINT chk_formula_when_calculated CHECK (is_calculated = (formula IS NOT NULL))
);

CREATE INDEX idx_ffd_version ON form_field_definitions(version_id, position);
";

const DECLARATIONS_SQL: &str = r"
CREATE TABLE declarations (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    taxpayer_id UUID NOT NULL REFERENCES taxpayers(id),
    version_id UUID NOT NULL REFERENCES form_versions(id),
    month SMALLINT NOT NULL CHECK (month BETWEEN 1 AND 12),
    year INTEGER NOT NULL,
    status VARCHAR(50) NOT NULL,
    transaction_number VARCHAR(50),
    presentation_date TIMESTAMP,
    print_date TIMESTAMP,
    pdf_user VARCHAR(100),
    submitted_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    UNIQUE (taxpayer_id, year, month)
);

CREATE INDEX idx_decl_taxpayer_year ON declarations(taxpayer_id, year);
";

const DECLARATION_VALUES_SQL: &str = r"
CREATE TABLE declaration_values (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    declaration_id UUID NOT NULL REFERENCES declarations(id) ON DELETE CASCADE,
    field_definition_id UUID NOT NULL REFERENCES form_field_definitions(id),
    value NUMERIC(15, 2) NOT NULL,
    UNIQUE (declaration_id, field_definition_id)
);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS declaration_values CASCADE;
DROP TABLE IF EXISTS declarations CASCADE;
DROP TABLE IF EXISTS form_field_definitions CASCADE;
DROP TABLE IF EXISTS form_versions CASCADE;
DROP TABLE IF EXISTS taxpayers CASCADE;
DROP TABLE IF EXISTS entry_details CASCADE;
DROP TABLE IF EXISTS journal_entries CASCADE;
DROP TABLE IF EXISTS accounts CASCADE;
";
