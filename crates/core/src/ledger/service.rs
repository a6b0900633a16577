//! Ledger service for journal entry validation.
//!
//! Pure business logic: the caller supplies account existence through a
//! closure so the same rules run against a database or an in-memory chart.

use contab_shared::types::{AccountId, has_cent_scale};
use rust_decimal::Decimal;

use super::balance::DebitCredit;
use super::error::LedgerError;
use super::types::{EntryLineInput, EntryTotals, JournalEntryInput};

/// Ledger service for journal entry validation.
pub struct LedgerService;

impl LedgerService {
    /// Validates a journal entry before it is persisted.
    ///
    /// Checks, in order:
    /// 1. at least one line
    /// 2. every amount is non-negative with at most 2 decimals
    /// 3. every account exists
    /// 4. total debit equals total credit
    ///
    /// # Errors
    ///
    /// Returns the first `LedgerError` found. Nothing should be written when
    /// this fails.
    pub fn validate_entry<A>(
        input: &JournalEntryInput,
        account_exists: A,
    ) -> Result<EntryTotals, LedgerError>
    where
        A: Fn(AccountId) -> bool,
    {
        if input.lines.is_empty() {
            return Err(LedgerError::NoLines);
        }

        for line in &input.lines {
            Self::validate_line(line)?;
            if !account_exists(line.account_id) {
                return Err(LedgerError::AccountNotFound(line.account_id));
            }
        }

        let totals = Self::calculate_totals(&input.lines);
        if !totals.is_balanced {
            return Err(LedgerError::Unbalanced {
                debit: totals.debit,
                credit: totals.credit,
            });
        }

        Ok(totals)
    }

    fn validate_line(line: &EntryLineInput) -> Result<(), LedgerError> {
        for amount in [line.debit, line.credit] {
            if amount < Decimal::ZERO {
                return Err(LedgerError::NegativeAmount(line.account_id));
            }
            if !has_cent_scale(amount) {
                return Err(LedgerError::ExcessScale {
                    account_id: line.account_id,
                    amount,
                });
            }
        }
        Ok(())
    }

    /// Sums debits and credits over the lines.
    #[must_use]
    pub fn calculate_totals(lines: &[EntryLineInput]) -> EntryTotals {
        let totals = lines.iter().map(EntryLineInput::amounts).sum::<DebitCredit>();
        EntryTotals::new(totals.debit, totals.credit)
    }
}
