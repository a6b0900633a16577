//! Account code resolution.
//!
//! A code's level is decided by the exact length of its run of trailing `'0'`
//! characters. The first matching rule wins:
//!
//! | trailing zeros | level | aggregation prefix |
//! |---|---|---|
//! | exactly 9 | 1 | first 1 char |
//! | exactly 8 | 2 | first 2 chars |
//! | exactly 6 | 3 | first 4 chars |
//! | exactly 4 | 4 | first 6 chars |
//! | anything else | 5 | full code |
//!
//! Runs of 5, 7 or 10+ zeros fall through to level 5 and aggregate only
//! themselves. Such codes are reported as [`CodeAnomaly::UnmatchedZeroRun`]
//! so they can be reviewed, but they still resolve.

use serde::{Deserialize, Serialize};

use super::level::AccountLevel;

/// Length of a well-formed account code.
pub const CANONICAL_CODE_LEN: usize = 10;

/// Where an account sits in the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountPosition<'a> {
    /// Hierarchy level.
    pub level: AccountLevel,
    /// Every account whose code starts with this prefix rolls up into this one.
    pub prefix: &'a str,
    /// Set when the code does not follow the canonical layout.
    pub anomaly: Option<CodeAnomaly>,
}

/// Irregular account code, flagged for operator review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CodeAnomaly {
    /// Code contains characters other than ASCII digits.
    NonDigit,
    /// Code is not 10 characters long.
    NonCanonicalLength(usize),
    /// Trailing zero run of a length no level claims (5, 7, 10+).
    UnmatchedZeroRun(usize),
}

impl std::fmt::Display for CodeAnomaly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonDigit => write!(f, "code contains non-digit characters"),
            Self::NonCanonicalLength(len) => {
                write!(f, "code has {len} characters, expected {CANONICAL_CODE_LEN}")
            }
            Self::UnmatchedZeroRun(run) => {
                write!(f, "{run} trailing zeros match no level, treated as level 5")
            }
        }
    }
}

/// Number of consecutive `'0'` characters at the end of `code`.
#[must_use]
pub fn trailing_zero_run(code: &str) -> usize {
    code.bytes().rev().take_while(|b| *b == b'0').count()
}

/// Resolves a code to its level and aggregation prefix.
///
/// Never fails. A prefix longer than the code falls back to the full code.
#[must_use]
pub fn resolve(code: &str) -> AccountPosition<'_> {
    let run = trailing_zero_run(code);
    let level = AccountLevel::ALL
        .into_iter()
        .find(|level| level.zero_run() == Some(run))
        .unwrap_or(AccountLevel::Auxiliary);
    let prefix = level.prefix_len().map_or(code, |len| char_prefix(code, len));

    AccountPosition {
        level,
        prefix,
        anomaly: detect_anomaly(code, run),
    }
}

/// First `len` characters of `code`, or all of it when shorter.
fn char_prefix(code: &str, len: usize) -> &str {
    code.char_indices().nth(len).map_or(code, |(end, _)| &code[..end])
}

fn detect_anomaly(code: &str, run: usize) -> Option<CodeAnomaly> {
    if !code.bytes().all(|b| b.is_ascii_digit()) {
        return Some(CodeAnomaly::NonDigit);
    }
    if code.len() != CANONICAL_CODE_LEN {
        return Some(CodeAnomaly::NonCanonicalLength(code.len()));
    }
    match run {
        5 | 7 | 10.. => Some(CodeAnomaly::UnmatchedZeroRun(run)),
        _ => None,
    }
}

/// Code of the account one level up, padded with zeros to 10 characters.
///
/// `None` for level-1 accounts.
#[must_use]
pub fn parent_code(code: &str) -> Option<String> {
    let parent = resolve(code).level.parent()?;
    let head = parent.prefix_len().map_or(code, |len| char_prefix(code, len));
    Some(format!("{head:0<width$}", width = CANONICAL_CODE_LEN))
}
