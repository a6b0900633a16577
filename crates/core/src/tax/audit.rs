//! Annual tax audit matrix.
//!
//! One row per form field, one column per month plus the annual total.
//! Month cells hold declared values, the annual cell sums the months, and
//! then every column is recalculated so calculated fields stay consistent
//! with the raw figures in the same column.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;

use super::calculator::{COLUMN_COUNT, Column, TaxCalculator};
use super::field::FieldCode;

/// Who and what the audit report covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditHeader {
    /// Taxpayer NIT.
    pub taxpayer_nit: String,
    /// Business name.
    pub taxpayer_name: String,
    /// Fiscal year.
    pub year: i32,
    /// Form code.
    pub form_code: String,
    /// Form version.
    pub version_number: String,
}

/// One stored declaration as read back for the audit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationRecord {
    /// Declared month, 1..=12.
    pub month: u32,
    /// When the declaration was presented.
    pub presentation_date: Option<NaiveDateTime>,
    /// Tax authority transaction number.
    pub transaction_number: Option<String>,
    /// Declared `(field code, value)` pairs.
    pub values: Vec<(String, Decimal)>,
}

/// One field across the year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxAuditRow {
    /// Field code as printed, e.g. `"C13"`.
    pub field_code: String,
    /// Printed label.
    pub label: String,
    /// Form section.
    pub rubric: String,
    /// Whether the value comes from a formula.
    pub is_calculated: bool,
    /// January through December.
    pub months: [Decimal; 12],
    /// Annual column.
    pub total: Decimal,
}

/// Month-by-month view of a taxpayer's declarations for one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxAuditReport {
    /// Taxpayer NIT.
    pub taxpayer_nit: String,
    /// Business name.
    pub taxpayer_name: String,
    /// Fiscal year.
    pub year: i32,
    /// Form code.
    pub form_code: String,
    /// Form version.
    pub version_number: String,
    /// Rows in form order.
    pub rows: Vec<TaxAuditRow>,
    /// Presentation date per month.
    pub presentation_dates: [Option<NaiveDateTime>; 12],
    /// Transaction number per month.
    pub transaction_numbers: [Option<String>; 12],
    /// Months with a declaration.
    pub declared_months: Vec<u32>,
    /// Declared values whose code is not in the field table.
    pub dropped_values: usize,
}

impl TaxAuditReport {
    /// Row for a field code in any accepted spelling.
    #[must_use]
    pub fn row(&self, code: &str) -> Option<&TaxAuditRow> {
        let code = FieldCode::parse(code).ok()?;
        self.rows.iter().find(|row| row.field_code == code.label())
    }
}

impl TaxCalculator {
    /// Builds the annual audit report from a year's declarations.
    ///
    /// Declarations with a month outside 1..=12 are skipped. When two
    /// declarations claim the same month, the later one wins.
    #[must_use]
    pub fn audit_report(
        &self,
        header: AuditHeader,
        declarations: &[DeclarationRecord],
    ) -> TaxAuditReport {
        let mut latest: [Option<&DeclarationRecord>; 12] = [None; 12];
        for record in declarations {
            if let Ok(index) = Column::Month(record.month).index() {
                latest[index] = Some(record);
            }
        }

        let mut matrix = self.empty_matrix();
        let mut presentation_dates = [None; 12];
        let mut transaction_numbers: [Option<String>; 12] = Default::default();
        let mut declared_months = Vec::new();
        let mut dropped_values = 0;

        for (index, record) in latest.iter().enumerate() {
            let Some(record) = record else {
                continue;
            };
            declared_months.push(record.month);
            presentation_dates[index] = record.presentation_date;
            transaction_numbers[index].clone_from(&record.transaction_number);
            for (code, value) in &record.values {
                let stored = FieldCode::parse(code)
                    .is_ok_and(|code| matrix.set(code.as_str(), index, *value));
                if !stored {
                    dropped_values += 1;
                }
            }
        }

        matrix.sum_months_into_annual();
        self.recalculate(&mut matrix);

        let rows = self
            .definitions()
            .iter()
            .map(|definition| {
                let cells = matrix
                    .row(definition.code.as_str())
                    .copied()
                    .unwrap_or([Decimal::ZERO; COLUMN_COUNT]);
                let mut months = [Decimal::ZERO; 12];
                months.copy_from_slice(&cells[..12]);
                TaxAuditRow {
                    field_code: definition.code.label(),
                    label: definition.label.clone(),
                    rubric: definition.rubric.clone(),
                    is_calculated: definition.is_calculated(),
                    months,
                    total: cells[COLUMN_COUNT - 1],
                }
            })
            .collect();

        TaxAuditReport {
            taxpayer_nit: header.taxpayer_nit,
            taxpayer_name: header.taxpayer_name,
            year: header.year,
            form_code: header.form_code,
            version_number: header.version_number,
            rows,
            presentation_dates,
            transaction_numbers,
            declared_months,
            dropped_values,
        }
    }
}
