//! Property-based tests for journal entry validation.

use contab_shared::types::AccountId;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::error::LedgerError;
use super::service::LedgerService;
use super::types::{EntryLineInput, JournalEntryInput};

/// Strategy to generate a cent amount from 0.01 to 1,000,000.00.
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Splits `total` into `parts` cent amounts that add up exactly.
fn split(total: Decimal, parts: usize) -> Vec<Decimal> {
    let cents = (total * Decimal::ONE_HUNDRED).trunc();
    let parts_dec = Decimal::from(parts);
    let share = (cents / parts_dec).trunc();
    let mut amounts: Vec<Decimal> = (0..parts).map(|_| share / Decimal::ONE_HUNDRED).collect();
    let remainder = (cents - share * parts_dec) / Decimal::ONE_HUNDRED;
    if let Some(last) = amounts.last_mut() {
        *last += remainder;
    }
    amounts
}

fn make_entry(lines: Vec<EntryLineInput>) -> JournalEntryInput {
    JournalEntryInput {
        entry_code: None,
        date: chrono::NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
        description: None,
        entry_type: None,
        entry_number: None,
        lines,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property 1: Entries whose debits equal credits are accepted
    ///
    /// *For any* total split across any number of debit and credit lines,
    /// validation SHALL succeed and report the total on both sides.
    #[test]
    fn prop_balanced_entries_accepted(
        total in positive_amount(),
        debit_lines in 1usize..6,
        credit_lines in 1usize..6,
    ) {
        let mut lines: Vec<EntryLineInput> = split(total, debit_lines)
            .into_iter()
            .map(|amount| EntryLineInput::debit(AccountId::new(), amount))
            .collect();
        lines.extend(
            split(total, credit_lines)
                .into_iter()
                .map(|amount| EntryLineInput::credit(AccountId::new(), amount)),
        );

        let totals = LedgerService::validate_entry(&make_entry(lines), |_| true).unwrap();
        prop_assert!(totals.is_balanced);
        prop_assert_eq!(totals.debit, total);
        prop_assert_eq!(totals.credit, total);
    }

    /// Property 2: Any difference between sides is rejected with both sums
    #[test]
    fn prop_unbalanced_entries_rejected(
        debit in positive_amount(),
        credit in positive_amount(),
    ) {
        prop_assume!(debit != credit);
        let lines = vec![
            EntryLineInput::debit(AccountId::new(), debit),
            EntryLineInput::credit(AccountId::new(), credit),
        ];

        let result = LedgerService::validate_entry(&make_entry(lines), |_| true);
        prop_assert_eq!(result, Err(LedgerError::Unbalanced { debit, credit }));
    }

    /// Property 3: Negative amounts are rejected even when the entry balances
    #[test]
    fn prop_negative_amounts_rejected(amount in positive_amount()) {
        let account = AccountId::new();
        let lines = vec![
            EntryLineInput::debit(account, -amount),
            EntryLineInput::credit(AccountId::new(), -amount),
        ];

        let result = LedgerService::validate_entry(&make_entry(lines), |_| true);
        prop_assert_eq!(result, Err(LedgerError::NegativeAmount(account)));
    }
}
