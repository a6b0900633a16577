//! Formula expressions for calculated fields.
//!
//! Grammar:
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := factor ('*' factor)*
//! factor := NUMBER | FIELD | '-' factor | '(' expr ')'
//!         | GREATEST '(' expr (',' expr)* ')'
//! ```
//!
//! Fields are written `C<digits>`; a missing operand evaluates to zero.

mod lexer;
mod parser;

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::TaxError;
use super::field::FieldCode;

/// Expression tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Value of another field.
    Field(FieldCode),
    /// Decimal constant.
    Constant(Decimal),
    /// `a + b`
    Add(Box<Expr>, Box<Expr>),
    /// `a - b`
    Sub(Box<Expr>, Box<Expr>),
    /// `a * b`
    Mul(Box<Expr>, Box<Expr>),
    /// `-a`
    Neg(Box<Expr>),
    /// Largest argument.
    Greatest(Vec<Expr>),
}

impl Expr {
    /// Evaluates with `lookup` supplying field values.
    pub fn evaluate<F>(&self, lookup: &F) -> Decimal
    where
        F: Fn(&FieldCode) -> Decimal,
    {
        match self {
            Self::Field(code) => lookup(code),
            Self::Constant(value) => *value,
            Self::Add(a, b) => a.evaluate(lookup) + b.evaluate(lookup),
            Self::Sub(a, b) => a.evaluate(lookup) - b.evaluate(lookup),
            Self::Mul(a, b) => a.evaluate(lookup) * b.evaluate(lookup),
            Self::Neg(a) => -a.evaluate(lookup),
            Self::Greatest(args) => args
                .iter()
                .map(|arg| arg.evaluate(lookup))
                .max()
                .unwrap_or(Decimal::ZERO),
        }
    }

    fn collect_fields<'a>(&'a self, out: &mut Vec<&'a FieldCode>) {
        match self {
            Self::Field(code) => {
                if !out.contains(&code) {
                    out.push(code);
                }
            }
            Self::Constant(_) => {}
            Self::Add(a, b) | Self::Sub(a, b) | Self::Mul(a, b) => {
                a.collect_fields(out);
                b.collect_fields(out);
            }
            Self::Neg(a) => a.collect_fields(out),
            Self::Greatest(args) => {
                for arg in args {
                    arg.collect_fields(out);
                }
            }
        }
    }
}

/// A parsed formula that remembers its source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Formula {
    source: String,
    expr: Expr,
}

impl Formula {
    /// Parses formula text.
    ///
    /// # Errors
    ///
    /// Returns `TaxError::FormulaSyntax` describing the first problem found.
    pub fn parse(source: &str) -> Result<Self, TaxError> {
        let expr = parser::parse(source).map_err(|reason| TaxError::FormulaSyntax {
            formula: source.to_string(),
            reason,
        })?;
        Ok(Self {
            source: source.trim().to_string(),
            expr,
        })
    }

    /// Original text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Expression tree.
    #[must_use]
    pub const fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Distinct referenced fields, in order of first appearance.
    #[must_use]
    pub fn operands(&self) -> Vec<&FieldCode> {
        let mut out = Vec::new();
        self.expr.collect_fields(&mut out);
        out
    }

    /// Evaluates with `lookup` supplying field values. No rounding.
    pub fn evaluate<F>(&self, lookup: F) -> Decimal
    where
        F: Fn(&FieldCode) -> Decimal,
    {
        self.expr.evaluate(&lookup)
    }
}

impl FromStr for Formula {
    type Err = TaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Formula {
    type Error = TaxError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Formula> for String {
    fn from(formula: Formula) -> Self {
        formula.source
    }
}

impl std::fmt::Display for Formula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn values(pairs: &[(&str, Decimal)]) -> HashMap<String, Decimal> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), *v)).collect()
    }

    fn eval(formula: &str, pairs: &[(&str, Decimal)]) -> Decimal {
        let values = values(pairs);
        Formula::parse(formula)
            .unwrap()
            .evaluate(|code| values.get(code.as_str()).copied().unwrap_or_default())
    }

    #[test]
    fn test_output_tax_formula() {
        let result = eval(
            "(C13 + C16 + C17 + C18) * 0.13",
            &[("13", dec!(1000.00)), ("16", dec!(0)), ("17", dec!(0))],
        );
        assert_eq!(result, dec!(130.00));
    }

    #[test]
    fn test_greatest_clamps_at_zero() {
        let f = "GREATEST(0, C1002 - C1004)";
        assert_eq!(eval(f, &[("1002", dec!(130)), ("1004", dec!(50))]), dec!(80));
        assert_eq!(eval(f, &[("1002", dec!(50)), ("1004", dec!(130))]), dec!(0));
    }

    #[test]
    fn test_precedence_and_unary_minus() {
        assert_eq!(eval("1 + 2 * 3", &[]), dec!(7));
        assert_eq!(eval("(1 + 2) * 3", &[]), dec!(9));
        assert_eq!(eval("-C1 - -2", &[("1", dec!(5))]), dec!(-3));
        assert_eq!(eval("10 - 3 - 2", &[]), dec!(5));
    }

    #[test]
    fn test_operands_are_distinct_and_ordered() {
        let formula = Formula::parse("GREATEST(0, C629 - C622 - C640 + C629)").unwrap();
        let operands: Vec<&str> = formula.operands().into_iter().map(FieldCode::as_str).collect();
        assert_eq!(operands, vec!["629", "622", "640"]);
    }

    #[test]
    fn test_syntax_errors() {
        for bad in ["", "C13 +", "(C13", "C13 C14", "GREATEST()", "C13 / 2", "GREATEST 1"] {
            let err = Formula::parse(bad).unwrap_err();
            assert_eq!(err.error_code(), "FORMULA_SYNTAX", "formula {bad:?}");
        }
    }

    #[test]
    fn test_serde_uses_source_text() {
        let formula = Formula::parse("C39 + C55 + C19").unwrap();
        let json = serde_json::to_string(&formula).unwrap();
        assert_eq!(json, "\"C39 + C55 + C19\"");
        let back: Formula = serde_json::from_str(&json).unwrap();
        assert_eq!(back, formula);
    }
}
