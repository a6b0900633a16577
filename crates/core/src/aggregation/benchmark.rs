//! Benchmark test for rollup performance.

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use std::time::Instant;

    use crate::aggregation::{DirectTotals, rollup, rollup_naive};
    use crate::chart::Account;
    use crate::ledger::DebitCredit;

    /// Generate a realistic 5-level chart: 6 classes, 4 groups each, 5 accounts
    /// per group, 5 subaccounts per account, `leaves` auxiliaries per subaccount.
    fn generate_chart(leaves: usize) -> (Vec<Account>, DirectTotals) {
        let mut accounts = Vec::new();
        let mut direct = DirectTotals::new();

        for class in 1..=6 {
            accounts.push(Account::new(format!("{class}000000000"), format!("Clase {class}")));
            for group in 1..=4 {
                accounts.push(Account::new(format!("{class}{group}00000000"), "Grupo"));
                for account in 1..=5 {
                    accounts.push(Account::new(format!("{class}{group}{account:02}000000"), "Cuenta"));
                    for sub in 1..=5 {
                        accounts.push(Account::new(
                            format!("{class}{group}{account:02}{sub:02}0000"),
                            "Subcuenta",
                        ));
                        for leaf in 1..=leaves {
                            let aux = Account::new(
                                format!("{class}{group}{account:02}{sub:02}{leaf:04}"),
                                "Auxiliar",
                            );
                            let amount = Decimal::new(i64::try_from(leaf).unwrap() * 1_000, 2);
                            direct.add(aux.id, DebitCredit::new(amount, Decimal::ZERO));
                            accounts.push(aux);
                        }
                    }
                }
            }
        }

        (accounts, direct)
    }

    #[test]
    fn benchmark_rollup_large_chart() {
        // 6 * 4 * 5 * 5 * 20 = 12,000 leaves, ~12,750 accounts.
        let (accounts, direct) = generate_chart(20);

        let start = Instant::now();
        let rows = rollup(&accounts, &direct);
        let duration = start.elapsed();

        println!("\n=== BENCHMARK: prefix-index rollup, {} accounts ===", accounts.len());
        println!("Duration: {duration:?}");

        assert_eq!(rows.len(), accounts.len());
        assert!(
            duration.as_secs() < 5,
            "Rollup took too long: {duration:?}"
        );
    }

    #[test]
    fn benchmark_index_vs_naive_small_chart() {
        let (accounts, direct) = generate_chart(2);

        let start = Instant::now();
        let fast = rollup(&accounts, &direct);
        let fast_time = start.elapsed();

        let start = Instant::now();
        let slow = rollup_naive(&accounts, &direct);
        let slow_time = start.elapsed();

        println!("\n=== BENCHMARK: {} accounts ===", accounts.len());
        println!("Index: {fast_time:?}, naive: {slow_time:?}");

        assert_eq!(fast, slow);
    }
}
