//! Ledger error types.

use contab_shared::types::{AccountId, JournalEntryId};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Entry has no lines.
    #[error("Journal entry must have at least one line")]
    NoLines,

    /// Entry is not balanced (debits != credits).
    #[error("Transaction is not balanced. Debit: {debit}, Credit: {credit}")]
    Unbalanced {
        /// Total debit amount.
        debit: Decimal,
        /// Total credit amount.
        credit: Decimal,
    },

    /// Line amount is negative.
    #[error("Line for account {0} has a negative amount")]
    NegativeAmount(AccountId),

    /// Line amount carries more than two decimal places.
    #[error("Amount {amount} for account {account_id} has more than 2 decimal places")]
    ExcessScale {
        /// Offending line's account.
        account_id: AccountId,
        /// Offending amount.
        amount: Decimal,
    },

    // ========== Lookup Errors ==========
    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// Journal entry not found.
    #[error("Journal entry not found: {0}")]
    EntryNotFound(JournalEntryId),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NoLines => "NO_LINES",
            Self::Unbalanced { .. } => "UNBALANCED",
            Self::NegativeAmount(_) => "NEGATIVE_AMOUNT",
            Self::ExcessScale { .. } => "EXCESS_SCALE",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::EntryNotFound(_) => "ENTRY_NOT_FOUND",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - validation errors
            Self::NoLines
            | Self::Unbalanced { .. }
            | Self::NegativeAmount(_)
            | Self::ExcessScale { .. } => 400,

            // 404 Not Found
            Self::AccountNotFound(_) | Self::EntryNotFound(_) => 404,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_codes() {
        assert_eq!(LedgerError::NoLines.error_code(), "NO_LINES");
        assert_eq!(
            LedgerError::Unbalanced {
                debit: dec!(100.00),
                credit: dec!(90.00),
            }
            .error_code(),
            "UNBALANCED"
        );
        assert_eq!(
            LedgerError::NegativeAmount(AccountId::new()).error_code(),
            "NEGATIVE_AMOUNT"
        );
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(LedgerError::NoLines.http_status_code(), 400);
        assert_eq!(
            LedgerError::AccountNotFound(AccountId::new()).http_status_code(),
            404
        );
        assert_eq!(
            LedgerError::EntryNotFound(JournalEntryId::new()).http_status_code(),
            404
        );
    }

    #[test]
    fn test_error_display() {
        let err = LedgerError::Unbalanced {
            debit: dec!(100.00),
            credit: dec!(90.00),
        };
        assert_eq!(
            err.to_string(),
            "Transaction is not balanced. Debit: 100.00, Credit: 90.00"
        );
    }
}
