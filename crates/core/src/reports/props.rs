//! Property-based tests for the balance report pipeline.
//!
//! - Determinism: identical input yields identical output
//! - Closing identity: closing = opening + period without netting
//! - Roll-up: every group equals the sum of the leaves in its subtree
//! - Total: the total row equals the sum of the top-level rows

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::fixture::{COMPANY, FakeStore, date};
use super::{BalanceReport, ReportFilters, ReportService};
use crate::accounts::RootType;
use crate::ledger::{BalanceRow, ValueField};
use crate::store::ReportSources;
use ledgerbal_shared::AccountsSettings;

const LEAVES: [&str; 5] = ["Cash", "Bank", "Receivables", "Payables", "Sales"];

fn chart() -> FakeStore {
    FakeStore::with_chart(&[
        ("Assets", None, RootType::Asset, true),
        ("Current", Some("Assets"), RootType::Asset, true),
        ("Cash", Some("Current"), RootType::Asset, false),
        ("Bank", Some("Current"), RootType::Asset, false),
        ("Receivables", Some("Assets"), RootType::Asset, false),
        ("Liabilities", None, RootType::Liability, true),
        ("Payables", Some("Liabilities"), RootType::Liability, false),
        ("Income", None, RootType::Income, true),
        ("Sales", Some("Income"), RootType::Income, false),
    ])
}

/// Strategy for one posting: leaf index, day offset into 2023-12..2024-01,
/// debit and credit in cents.
fn posting() -> impl Strategy<Value = (usize, u32, i64, i64)> {
    (0..LEAVES.len(), 0u32..62, 0i64..1_000_000, 0i64..1_000_000)
}

fn store_with(postings: &[(usize, u32, i64, i64)]) -> FakeStore {
    let mut store = chart();
    for &(leaf, offset, debit, credit) in postings {
        let posting_date = date(2023, 12, 1) + chrono::Days::new(u64::from(offset));
        store.post(
            LEAVES[leaf],
            posting_date,
            Decimal::new(debit, 2),
            Decimal::new(credit, 2),
        );
    }
    store
}

fn run(store: &FakeStore, show_net_values: bool) -> BalanceReport {
    ReportService::execute(
        &ReportSources::from_store(store),
        AccountsSettings::default(),
        ReportFilters {
            show_net_values,
            show_zero_values: true,
            ..ReportFilters::new(COMPANY, "2024-01-01", "2024-01-31")
        },
    )
    .unwrap()
}

fn leaf_sum(report: &BalanceReport, leaves: &[&str]) -> BalanceRow {
    let mut sum = BalanceRow::zero();
    for leaf in leaves {
        sum += &report.row(leaf).unwrap().values;
    }
    sum
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_report_is_deterministic(postings in prop::collection::vec(posting(), 0..40), net in any::<bool>()) {
        let store = store_with(&postings);
        prop_assert_eq!(run(&store, net), run(&store, net));
    }

    #[test]
    fn prop_closing_is_opening_plus_period(postings in prop::collection::vec(posting(), 0..40)) {
        let store = store_with(&postings);
        let report = run(&store, false);

        for row in report.all_rows() {
            prop_assert_eq!(row.values.closing_debit, row.values.opening_debit + row.values.debit);
            prop_assert_eq!(row.values.closing_credit, row.values.opening_credit + row.values.credit);
        }
    }

    #[test]
    fn prop_groups_equal_subtree_sum(postings in prop::collection::vec(posting(), 0..40)) {
        let store = store_with(&postings);
        let report = run(&store, false);

        let groups: [(&str, &[&str]); 4] = [
            ("Current", &["Cash", "Bank"]),
            ("Assets", &["Cash", "Bank", "Receivables"]),
            ("Liabilities", &["Payables"]),
            ("Income", &["Sales"]),
        ];
        for (group, leaves) in groups {
            prop_assert_eq!(report.row(group).unwrap().values, leaf_sum(&report, leaves));
        }
    }

    #[test]
    fn prop_total_is_sum_of_top_level_rows(postings in prop::collection::vec(posting(), 0..40), net in any::<bool>()) {
        let store = store_with(&postings);
        let report = run(&store, net);

        let mut expected = BalanceRow::zero();
        for row in report.rows.iter().filter(|row| row.parent_account.is_none()) {
            expected += &row.values;
        }
        prop_assert_eq!(report.total.unwrap().values, expected);
    }

    #[test]
    fn prop_net_rows_have_one_non_negative_side(postings in prop::collection::vec(posting(), 0..40)) {
        let store = store_with(&postings);
        let report = run(&store, true);

        for row in &report.rows {
            for (dr, cr) in [
                (ValueField::OpeningDebit, ValueField::OpeningCredit),
                (ValueField::ClosingDebit, ValueField::ClosingCredit),
            ] {
                let (dr, cr) = (row.values.get(dr), row.values.get(cr));
                prop_assert!(dr >= Decimal::ZERO && cr >= Decimal::ZERO);
                prop_assert!(dr.is_zero() || cr.is_zero());
            }
        }
    }
}
