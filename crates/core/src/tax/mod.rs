//! Tax form field calculation.
//!
//! A tax form is a fixed table of fields ("casillas"). Raw fields hold
//! declared figures; calculated fields carry a formula over other fields.
//! - `field` - Field codes and definitions
//! - `formula` - Formula expressions parsed from their text form
//! - `plan` - Dependency ordering of calculated fields
//! - `calculator` - Per-column evaluation with cent rounding
//! - `form_200` - The Form 200 version 6 field table
//! - `audit` - Annual month-by-month audit matrix
//! - `declaration` - Monthly declaration intake rules

pub mod audit;
pub mod calculator;
pub mod declaration;
pub mod error;
pub mod field;
pub mod form_200;
pub mod formula;
pub mod plan;


pub use audit::{AuditHeader, DeclarationRecord, TaxAuditReport, TaxAuditRow};
pub use calculator::{COLUMN_COUNT, Column, FieldMatrix, FieldValues, TaxCalculator};
pub use declaration::{
    DEFAULT_DECLARATION_STATUS, DEFAULT_TAXPAYER_NAME, DeclarationInput, DeclaredValue,
    PreparedValues, prepare_values, validate_period,
};
pub use error::TaxError;
pub use field::{FieldCode, FieldDefinition};
pub use form_200::{FORM_200_V6, FormSpec, form_200_v6};
pub use formula::{Expr, Formula};
pub use plan::EvaluationPlan;
