//! Monthly declaration intake rules.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use contab_shared::types::{ReportingPeriod, round_to_cents};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::TaxError;
use super::field::FieldCode;

/// Status stored when the caller does not supply one.
pub const DEFAULT_DECLARATION_STATUS: &str = "Procesado";

/// Business name given to a taxpayer first seen without one.
pub const DEFAULT_TAXPAYER_NAME: &str = "Contribuyente Nuevo";

/// One declared field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclaredValue {
    /// Field code in any accepted spelling (`"13"`, `"C13"`, `"Casilla 13"`).
    pub code: String,
    /// Declared amount.
    pub value: Decimal,
}

/// A monthly declaration as submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationInput {
    /// Taxpayer NIT.
    pub taxpayer_nit: String,
    /// Business name, used only when the taxpayer is new.
    pub taxpayer_name: Option<String>,
    /// Form code, e.g. `"200"`.
    pub form_code: String,
    /// Form version, e.g. `"6"`.
    pub version_number: String,
    /// Declared month.
    pub month: u32,
    /// Declared year.
    pub year: i32,
    /// Processing status.
    pub status: Option<String>,
    /// Tax authority transaction number.
    pub transaction_number: Option<String>,
    /// When the declaration was presented.
    pub presentation_date: Option<NaiveDateTime>,
    /// When the source document was printed.
    pub print_date: Option<NaiveDateTime>,
    /// User recorded on the source document.
    pub pdf_user: Option<String>,
    /// Declared values.
    pub values: Vec<DeclaredValue>,
}

impl DeclarationInput {
    /// Checks the header fields.
    ///
    /// # Errors
    ///
    /// `MissingNit`, `InvalidMonth` or `PeriodNotConcluded`.
    pub fn validate(&self, today: NaiveDate) -> Result<ReportingPeriod, TaxError> {
        if self.taxpayer_nit.trim().is_empty() {
            return Err(TaxError::MissingNit);
        }
        validate_period(self.year, self.month, today)
    }

    /// Status to store.
    #[must_use]
    pub fn status_or_default(&self) -> &str {
        self.status.as_deref().unwrap_or(DEFAULT_DECLARATION_STATUS)
    }

    /// Business name to store for a new taxpayer.
    #[must_use]
    pub fn taxpayer_name_or_default(&self) -> &str {
        self.taxpayer_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(DEFAULT_TAXPAYER_NAME)
    }
}

/// Accepts only months that have already ended as of `today`.
///
/// # Errors
///
/// `InvalidMonth` outside 1..=12, `PeriodNotConcluded` for the current
/// month or later.
pub fn validate_period(year: i32, month: u32, today: NaiveDate) -> Result<ReportingPeriod, TaxError> {
    let period = ReportingPeriod::new(year, month).map_err(|_| TaxError::InvalidMonth(month))?;
    if !period.is_concluded(today) {
        return Err(TaxError::PeriodNotConcluded { year, month });
    }
    Ok(period)
}

/// Declared values matched against a field table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedValues<T> {
    /// `(definition key, rounded value)` in first-seen order.
    pub matched: Vec<(T, Decimal)>,
    /// Values whose code is malformed or not in the table.
    pub dropped: usize,
}

/// Normalizes codes, rounds values to cents and keeps known fields only.
///
/// `known` maps each defined code to the caller's key for it (a database id
/// or an index). A code declared twice keeps its last value.
pub fn prepare_values<T: Copy + PartialEq>(
    values: &[DeclaredValue],
    known: &HashMap<FieldCode, T>,
) -> PreparedValues<T> {
    let mut matched: Vec<(T, Decimal)> = Vec::with_capacity(values.len());
    let mut dropped = 0;
    for declared in values {
        let key = FieldCode::parse(&declared.code)
            .ok()
            .and_then(|code| known.get(&code).copied());
        let Some(key) = key else {
            dropped += 1;
            continue;
        };
        let value = round_to_cents(declared.value);
        match matched.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => matched.push((key, value)),
        }
    }
    PreparedValues { matched, dropped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    #[test]
    fn test_current_and_future_months_rejected() {
        assert_eq!(
            validate_period(2025, 6, today()),
            Err(TaxError::PeriodNotConcluded { year: 2025, month: 6 })
        );
        assert!(validate_period(2026, 1, today()).is_err());
        assert!(validate_period(2025, 5, today()).is_ok());
        assert!(validate_period(2024, 12, today()).is_ok());
    }

    #[test]
    fn test_invalid_month_rejected() {
        assert_eq!(validate_period(2024, 13, today()), Err(TaxError::InvalidMonth(13)));
        assert_eq!(validate_period(2024, 0, today()), Err(TaxError::InvalidMonth(0)));
    }

    #[test]
    fn test_prepare_values_drops_unknown_and_rounds() {
        let known: HashMap<FieldCode, usize> = [("13", 0), ("39", 1)]
            .into_iter()
            .map(|(code, index)| (FieldCode::parse(code).unwrap(), index))
            .collect();
        let values = vec![
            DeclaredValue { code: "Casilla 13".into(), value: dec!(1000.005) },
            DeclaredValue { code: "C999".into(), value: dec!(5) },
            DeclaredValue { code: "abc".into(), value: dec!(5) },
            DeclaredValue { code: "C39".into(), value: dec!(1) },
            DeclaredValue { code: "39".into(), value: dec!(130) },
        ];

        let prepared = prepare_values(&values, &known);
        assert_eq!(prepared.matched, vec![(0, dec!(1000.01)), (1, dec!(130.00))]);
        assert_eq!(prepared.dropped, 2);
    }

    #[test]
    fn test_missing_nit_rejected() {
        let input = DeclarationInput {
            taxpayer_nit: "  ".into(),
            taxpayer_name: None,
            form_code: "200".into(),
            version_number: "6".into(),
            month: 1,
            year: 2025,
            status: None,
            transaction_number: None,
            presentation_date: None,
            print_date: None,
            pdf_user: None,
            values: vec![],
        };
        assert_eq!(input.validate(today()), Err(TaxError::MissingNit));
        assert_eq!(input.status_or_default(), "Procesado");
        assert_eq!(input.taxpayer_name_or_default(), "Contribuyente Nuevo");
    }
}
