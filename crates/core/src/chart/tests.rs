//! Tests for code resolution.

use proptest::prelude::*;
use rstest::rstest;

use super::*;

#[rstest]
#[case("1000000000", AccountLevel::Class, "1")]
#[case("1100000000", AccountLevel::Group, "11")]
#[case("1101000000", AccountLevel::Account, "1101")]
#[case("1101010000", AccountLevel::Subaccount, "110101")]
#[case("1101010001", AccountLevel::Auxiliary, "1101010001")]
#[case("1101010100", AccountLevel::Auxiliary, "1101010100")]
#[case("4101020300", AccountLevel::Auxiliary, "4101020300")]
fn test_resolve_canonical_codes(
    #[case] code: &str,
    #[case] level: AccountLevel,
    #[case] prefix: &str,
) {
    let position = resolve(code);
    assert_eq!(position.level, level);
    assert_eq!(position.prefix, prefix);
    assert_eq!(position.anomaly, None);
}

#[rstest]
#[case("1110000000", 7)]
#[case("1101100000", 5)]
#[case("0000000000", 10)]
fn test_unmatched_zero_runs_fall_to_level_five(#[case] code: &str, #[case] run: usize) {
    let position = resolve(code);
    assert_eq!(position.level, AccountLevel::Auxiliary);
    assert_eq!(position.prefix, code);
    assert_eq!(position.anomaly, Some(CodeAnomaly::UnmatchedZeroRun(run)));
}

#[test]
fn test_short_code_uses_full_code_when_prefix_too_long() {
    // 4 trailing zeros but only 5 characters: the 6-char prefix does not fit.
    let position = resolve("10000");
    assert_eq!(position.level, AccountLevel::Subaccount);
    assert_eq!(position.prefix, "10000");
    assert_eq!(position.anomaly, Some(CodeAnomaly::NonCanonicalLength(5)));
}

#[test]
fn test_non_digit_code_still_resolves() {
    let position = resolve("11A1000000");
    assert_eq!(position.level, AccountLevel::Account);
    assert_eq!(position.prefix, "11A1");
    assert_eq!(position.anomaly, Some(CodeAnomaly::NonDigit));
}

#[test]
fn test_multibyte_code_prefix_counts_characters() {
    let position = resolve("é000000000");
    assert_eq!(position.level, AccountLevel::Class);
    assert_eq!(position.prefix, "é");
    assert_eq!(position.anomaly, Some(CodeAnomaly::NonDigit));

    assert_eq!(parent_code("é100000000").as_deref(), Some("é000000000"));
}

#[test]
fn test_empty_code() {
    let position = resolve("");
    assert_eq!(position.level, AccountLevel::Auxiliary);
    assert_eq!(position.prefix, "");
    assert_eq!(position.anomaly, Some(CodeAnomaly::NonCanonicalLength(0)));
}

#[rstest]
#[case("1000000000", None)]
#[case("1100000000", Some("1000000000"))]
#[case("1101000000", Some("1100000000"))]
#[case("1101010000", Some("1101000000"))]
#[case("1101010003", Some("1101010000"))]
#[case("2101020105", Some("2101020000"))]
fn test_parent_code(#[case] code: &str, #[case] expected: Option<&str>) {
    assert_eq!(parent_code(code).as_deref(), expected);
}

#[test]
fn test_level_serializes_as_number() {
    assert_eq!(serde_json::to_string(&AccountLevel::Account).unwrap(), "3");
    let level: AccountLevel = serde_json::from_str("5").unwrap();
    assert_eq!(level, AccountLevel::Auxiliary);
    assert!(serde_json::from_str::<AccountLevel>("6").is_err());
}

#[rstest]
#[case("1101010001", Some(StatementClass::Asset))]
#[case("2100000000", Some(StatementClass::Liability))]
#[case("3000000000", Some(StatementClass::Equity))]
#[case("4101000000", Some(StatementClass::Income))]
#[case("5101000000", Some(StatementClass::Expense))]
#[case("6101000000", Some(StatementClass::Expense))]
#[case("7000000000", None)]
#[case("", None)]
fn test_statement_class(#[case] code: &str, #[case] expected: Option<StatementClass>) {
    assert_eq!(StatementClass::of(code), expected);
}

#[test]
fn test_flag_anomalies_lists_only_irregular_codes() {
    let accounts = vec![
        Account::new("1000000000", "Activo"),
        Account::new("1110000000", "Grupo mal codificado"),
        Account::new("11010", "Codigo corto"),
    ];
    let flagged = flag_anomalies(&accounts);
    assert_eq!(flagged.len(), 2);
    assert_eq!(flagged[0].0.code, "1110000000");
    assert_eq!(flagged[0].1, CodeAnomaly::UnmatchedZeroRun(7));
    assert_eq!(flagged[1].1, CodeAnomaly::NonCanonicalLength(5));
}

fn code_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[1-6][0-9]{9}",
        "[1-6][0-9]{0,5}".prop_map(|head| format!("{head:0<10}")),
        "[0-9A-Z]{0,12}",
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property 1: Resolution is a pure function of the code
    ///
    /// *For any* code, resolving it twice yields the same level and prefix.
    #[test]
    fn prop_resolve_is_deterministic(code in code_strategy()) {
        let copy = code.clone();
        let first = resolve(&code);
        let second = resolve(&copy);
        prop_assert_eq!(first, second);
    }

    /// Property 2: The aggregation prefix is always a prefix of the code
    ///
    /// *For any* code, the account aggregates at least itself.
    #[test]
    fn prop_prefix_is_prefix_of_code(code in code_strategy()) {
        let position = resolve(&code);
        prop_assert!(code.starts_with(position.prefix));
        if position.level.is_leaf() {
            prop_assert_eq!(position.prefix, code.as_str());
        }
    }

    /// Property 3: A parent code is the child's head padded with zeros
    #[test]
    fn prop_parent_is_one_level_up(code in "[1-6][0-9]{9}") {
        let level = resolve(&code).level;
        match parent_code(&code) {
            None => prop_assert_eq!(level, AccountLevel::Class),
            Some(parent) => {
                prop_assert_eq!(parent.len(), CANONICAL_CODE_LEN);
                prop_assert!(code.starts_with(parent.trim_end_matches('0')));
            }
        }
    }
}
