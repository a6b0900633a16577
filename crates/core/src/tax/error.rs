//! Tax calculation error types.

use thiserror::Error;

/// Errors raised by field definitions, formulas and declarations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaxError {
    // ========== Configuration Errors ==========
    /// Formula text does not parse.
    #[error("Invalid formula '{formula}': {reason}")]
    FormulaSyntax {
        /// Formula text.
        formula: String,
        /// What went wrong.
        reason: String,
    },

    /// Calculated fields depend on each other in a loop.
    #[error("Formula cycle detected: {}", cycle.join(" -> "))]
    FormulaCycle {
        /// Field codes along the cycle, first repeated at the end.
        cycle: Vec<String>,
    },

    /// Two definitions share a code.
    #[error("Field {0} is defined more than once")]
    DuplicateField(String),

    // ========== Input Errors ==========
    /// Field code is not digits once normalized.
    #[error("Invalid field code: '{0}'")]
    InvalidFieldCode(String),

    /// Month outside 1..=12.
    #[error("Invalid month {0}, expected 1-12")]
    InvalidMonth(u32),

    /// The declared month has not ended yet.
    #[error("Period {year}-{month:02} has not concluded yet")]
    PeriodNotConcluded {
        /// Declared year.
        year: i32,
        /// Declared month.
        month: u32,
    },

    /// Taxpayer NIT is blank.
    #[error("Taxpayer NIT is required")]
    MissingNit,
}

impl TaxError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::FormulaSyntax { .. } => "FORMULA_SYNTAX",
            Self::FormulaCycle { .. } => "FORMULA_CYCLE",
            Self::DuplicateField(_) => "DUPLICATE_FIELD",
            Self::InvalidFieldCode(_) => "INVALID_FIELD_CODE",
            Self::InvalidMonth(_) => "INVALID_MONTH",
            Self::PeriodNotConcluded { .. } => "PERIOD_NOT_CONCLUDED",
            Self::MissingNit => "MISSING_NIT",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::InvalidFieldCode(_) | Self::InvalidMonth(_) | Self::MissingNit => 400,
            Self::PeriodNotConcluded { .. } => 422,
            Self::FormulaSyntax { .. } | Self::FormulaCycle { .. } | Self::DuplicateField(_) => {
                500
            }
        }
    }

    /// True for errors in the field table rather than in caller input.
    #[must_use]
    pub const fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::FormulaSyntax { .. } | Self::FormulaCycle { .. } | Self::DuplicateField(_)
        )
    }
}
