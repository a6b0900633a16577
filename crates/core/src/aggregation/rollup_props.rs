//! Property-based tests for prefix rollups.

use contab_shared::types::AccountId;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::rollup::{rollup, rollup_naive};
use super::snapshot::LedgerSnapshot;
use super::totals::DirectTotals;
use crate::chart::{Account, resolve};
use crate::ledger::DebitCredit;

/// Strategy for account codes: canonical codes at every level plus some
/// irregular ones (short, non-digit, odd zero runs).
fn code_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[1-6]".prop_map(|head| format!("{head:0<10}")),
        4 => "[1-6][1-3]".prop_map(|head| format!("{head:0<10}")),
        4 => "[1-6][1-3]0[1-3]".prop_map(|head| format!("{head:0<10}")),
        4 => "[1-6][1-3]0[1-3]0[1-3]".prop_map(|head| format!("{head:0<10}")),
        8 => "[1-6][1-3]0[1-3]0[1-3]0[0-9]{3}",
        1 => "[1-6]{1,9}",
        1 => "[1-6]{1,3}0{5,7}",
    ]
}

fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000).prop_map(|n| Decimal::new(n, 2))
}

fn chart_strategy() -> impl Strategy<Value = (Vec<Account>, DirectTotals)> {
    prop::collection::vec((code_strategy(), amount_strategy(), amount_strategy()), 0..60).prop_map(
        |rows| {
            let mut direct = DirectTotals::new();
            let accounts = rows
                .into_iter()
                .enumerate()
                .map(|(i, (code, debit, credit))| {
                    let account = Account {
                        id: AccountId::new(),
                        code,
                        name: format!("Cuenta {i}"),
                    };
                    if i % 3 != 0 {
                        direct.add(account.id, DebitCredit::new(debit, credit));
                    }
                    account
                })
                .collect();
            (accounts, direct)
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property 1: Index rollup equals the naive prefix scan
    ///
    /// *For any* chart, every account's rollup SHALL equal the sum of direct
    /// totals over all accounts whose code starts with its prefix.
    #[test]
    fn prop_index_rollup_matches_naive((accounts, direct) in chart_strategy()) {
        let fast = rollup(&accounts, &direct);
        let slow = rollup_naive(&accounts, &direct);
        prop_assert_eq!(fast, slow);
    }

    /// Property 2: Rollup definition
    ///
    /// rollup(A).debit == sum of direct(B).debit where code(B) starts with prefix(A).
    #[test]
    fn prop_rollup_is_prefix_sum((accounts, direct) in chart_strategy()) {
        let rows = rollup(&accounts, &direct);
        for row in &rows {
            let prefix = resolve(&row.code).prefix;
            let expected: DebitCredit = accounts
                .iter()
                .filter(|b| b.code.starts_with(prefix))
                .map(|b| direct.get(b.id))
                .sum();
            prop_assert_eq!(row.totals(), expected);
        }
    }

    /// Property 3: Aggregation is idempotent on an unchanged snapshot
    #[test]
    fn prop_rollup_is_idempotent((accounts, direct) in chart_strategy()) {
        let snapshot = LedgerSnapshot::new(
            chrono::NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
            accounts,
            direct,
        );
        prop_assert_eq!(snapshot.balances(), snapshot.balances());
    }

    /// Property 4: A level-1 rollup dominates every account it covers
    ///
    /// A level-1 account covers every account sharing its first digit, so its
    /// debit is never less than any covered account's direct debit.
    #[test]
    fn prop_class_rollup_dominates_members((accounts, direct) in chart_strategy()) {
        let rows = rollup(&accounts, &direct);
        for class_row in rows.iter().filter(|r| r.level.number() == 1) {
            for account in accounts.iter().filter(|a| a.code.starts_with(&class_row.code[..1])) {
                prop_assert!(class_row.total_debit >= direct.get(account.id).debit);
            }
        }
    }
}
