//! Field calculation per reporting column.
//!
//! Each column (a month or the annual total) is evaluated independently:
//! raw values are read as given, then calculated fields are assigned in
//! plan order. Every assigned value is rounded to cents, half away from
//! zero, before any later formula reads it.

use std::collections::HashMap;

use contab_shared::types::round_to_cents;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::TaxError;
use super::field::{FieldCode, FieldDefinition};
use super::form_200::form_200_v6;
use super::plan::EvaluationPlan;

/// Number of columns in a field matrix: twelve months plus the annual total.
pub const COLUMN_COUNT: usize = 13;

/// A reporting column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    /// Month 1..=12.
    Month(u32),
    /// Annual total.
    Annual,
}

impl Column {
    /// Column position: months at 0..=11, annual at 12.
    ///
    /// # Errors
    ///
    /// Returns `TaxError::InvalidMonth` for months outside 1..=12.
    pub fn index(self) -> Result<usize, TaxError> {
        match self {
            Self::Month(month @ 1..=12) => Ok((month - 1) as usize),
            Self::Month(month) => Err(TaxError::InvalidMonth(month)),
            Self::Annual => Ok(COLUMN_COUNT - 1),
        }
    }

    /// All thirteen columns in order.
    pub fn all() -> impl Iterator<Item = Self> {
        (1..=12).map(Self::Month).chain(std::iter::once(Self::Annual))
    }
}

/// Field values for one column, in definition order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValues {
    values: Vec<(FieldCode, Decimal)>,
}

impl FieldValues {
    /// Value of a field, zero when the code is unknown.
    #[must_use]
    pub fn get(&self, code: &str) -> Decimal {
        self.values
            .iter()
            .find(|(c, _)| c.as_str() == code)
            .map_or(Decimal::ZERO, |(_, v)| *v)
    }

    /// `(code, value)` pairs in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldCode, Decimal)> {
        self.values.iter().map(|(code, value)| (code, *value))
    }
}

/// Fields x 13 columns, rows in definition order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMatrix {
    codes: Vec<FieldCode>,
    positions: HashMap<FieldCode, usize>,
    cells: Vec<[Decimal; COLUMN_COUNT]>,
}

impl FieldMatrix {
    fn new(definitions: &[FieldDefinition]) -> Self {
        let codes: Vec<FieldCode> = definitions.iter().map(|d| d.code.clone()).collect();
        let positions = codes
            .iter()
            .enumerate()
            .map(|(index, code)| (code.clone(), index))
            .collect();
        Self {
            cells: vec![[Decimal::ZERO; COLUMN_COUNT]; codes.len()],
            codes,
            positions,
        }
    }

    /// Cell value, zero for unknown codes.
    #[must_use]
    pub fn get(&self, code: &str, column: usize) -> Decimal {
        self.positions
            .get(code)
            .and_then(|row| self.cells[*row].get(column))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Sets a cell. Returns false, changing nothing, for unknown codes.
    pub fn set(&mut self, code: &str, column: usize, value: Decimal) -> bool {
        match (self.positions.get(code), column < COLUMN_COUNT) {
            (Some(row), true) => {
                self.cells[*row][column] = value;
                true
            }
            _ => false,
        }
    }

    /// Row of a field across all columns.
    #[must_use]
    pub fn row(&self, code: &str) -> Option<&[Decimal; COLUMN_COUNT]> {
        self.positions.get(code).map(|row| &self.cells[*row])
    }

    /// Clears one column.
    pub fn clear_column(&mut self, column: usize) {
        for row in &mut self.cells {
            if let Some(cell) = row.get_mut(column) {
                *cell = Decimal::ZERO;
            }
        }
    }

    /// Sets the annual column of every row to the sum of its months.
    pub fn sum_months_into_annual(&mut self) {
        for row in &mut self.cells {
            row[COLUMN_COUNT - 1] = row[..COLUMN_COUNT - 1].iter().sum();
        }
    }

    /// Field codes in row order.
    #[must_use]
    pub fn codes(&self) -> &[FieldCode] {
        &self.codes
    }
}

/// Evaluates a field table.
///
/// Build it once at startup; the evaluation order is computed here and
/// reused for every column.
#[derive(Debug, Clone)]
pub struct TaxCalculator {
    definitions: Vec<FieldDefinition>,
    plan: EvaluationPlan,
}

impl TaxCalculator {
    /// Compiles a calculator for a field table.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for duplicate codes or formula cycles.
    pub fn new(definitions: Vec<FieldDefinition>) -> Result<Self, TaxError> {
        let plan = EvaluationPlan::compile(&definitions)?;
        Ok(Self { definitions, plan })
    }

    /// Calculator for Form 200 version 6.
    ///
    /// # Errors
    ///
    /// Fails only if the built-in table were malformed.
    pub fn form_200_v6() -> Result<Self, TaxError> {
        Self::new(form_200_v6()?)
    }

    /// Field definitions in form order.
    #[must_use]
    pub fn definitions(&self) -> &[FieldDefinition] {
        &self.definitions
    }

    /// Definition for a code.
    #[must_use]
    pub fn definition(&self, code: &str) -> Option<&FieldDefinition> {
        self.definitions.iter().find(|d| d.code.as_str() == code)
    }

    /// All-zero matrix shaped for this table.
    #[must_use]
    pub fn empty_matrix(&self) -> FieldMatrix {
        FieldMatrix::new(&self.definitions)
    }

    /// Recalculates one column of the matrix in place.
    ///
    /// Columns outside `0..COLUMN_COUNT` are left alone.
    pub fn recalculate_column(&self, matrix: &mut FieldMatrix, column: usize) {
        if column >= COLUMN_COUNT {
            return;
        }
        for &index in self.plan.order() {
            let definition = &self.definitions[index];
            let Some(formula) = &definition.formula else {
                continue;
            };
            let value = round_to_cents(formula.evaluate(|code| matrix.get(code.as_str(), column)));
            matrix.set(definition.code.as_str(), column, value);
        }
    }

    /// Recalculates all thirteen columns in place.
    pub fn recalculate(&self, matrix: &mut FieldMatrix) {
        for column in 0..COLUMN_COUNT {
            self.recalculate_column(matrix, column);
        }
    }

    /// Calculates a single column from raw values.
    ///
    /// Codes are normalized; unknown or malformed codes are ignored and
    /// absent fields read as zero. Values given for calculated fields are
    /// overwritten.
    pub fn calculate<'a, I>(&self, raw: I) -> FieldValues
    where
        I: IntoIterator<Item = (&'a str, Decimal)>,
    {
        let mut matrix = self.empty_matrix();
        let column = 0;
        for (code, value) in raw {
            if let Ok(code) = FieldCode::parse(code) {
                matrix.set(code.as_str(), column, value);
            }
        }
        self.recalculate_column(&mut matrix, column);

        FieldValues {
            values: matrix
                .codes
                .iter()
                .cloned()
                .zip(matrix.cells.iter().map(|row| row[column]))
                .collect(),
        }
    }
}
