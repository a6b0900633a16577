//! Field codes and definitions.

use serde::{Deserialize, Serialize};

use super::error::TaxError;
use super::formula::Formula;

/// Normalized field code: the bare digits, e.g. `"13"`.
///
/// `"13"`, `"C13"` and `"Casilla 13"` all normalize to the same code.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldCode(String);

impl FieldCode {
    /// Normalizes a raw code.
    ///
    /// # Errors
    ///
    /// Returns `TaxError::InvalidFieldCode` unless the remainder is ASCII digits.
    pub fn parse(raw: &str) -> Result<Self, TaxError> {
        let mut code = raw.trim();
        if let Some(rest) = strip_prefix_ignore_case(code, "casilla") {
            code = rest.trim_start();
        }
        if let Some(rest) = strip_prefix_ignore_case(code, "c") {
            code = rest.trim_start();
        }
        if code.is_empty() || !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TaxError::InvalidFieldCode(raw.to_string()));
        }
        Ok(Self(code.to_string()))
    }

    /// The bare digits.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display label as printed on the form, e.g. `"C13"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("C{}", self.0)
    }
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}

impl std::fmt::Display for FieldCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for FieldCode {
    type Err = TaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for FieldCode {
    type Error = TaxError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<FieldCode> for String {
    fn from(code: FieldCode) -> Self {
        code.0
    }
}

impl std::borrow::Borrow<str> for FieldCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// One field of a tax form version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Section of the form, e.g. `"Rubro 1"`.
    pub rubric: String,
    /// Field code.
    pub code: FieldCode,
    /// Printed label.
    pub label: String,
    /// Formula for calculated fields, `None` for raw fields.
    pub formula: Option<Formula>,
}

impl FieldDefinition {
    /// Builds a definition from its stored text form.
    ///
    /// # Errors
    ///
    /// Returns an error if the code or the formula is malformed.
    pub fn parse(
        rubric: &str,
        code: &str,
        label: &str,
        formula: Option<&str>,
    ) -> Result<Self, TaxError> {
        Ok(Self {
            rubric: rubric.to_string(),
            code: FieldCode::parse(code)?,
            label: label.to_string(),
            formula: formula.map(str::parse).transpose()?,
        })
    }

    /// True when the field is derived from a formula.
    #[must_use]
    pub const fn is_calculated(&self) -> bool {
        self.formula.is_some()
    }
}
