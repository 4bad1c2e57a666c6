//! Loading the bundled demo dataset.

use std::path::PathBuf;

use rust_decimal_macros::dec;

use ledgerbal_core::reports::{ReportFilters, ReportService};
use ledgerbal_core::store::ReportSources;
use ledgerbal_memory::MemoryStore;
use ledgerbal_shared::AccountsSettings;
use ledgerbal_shared::config::CurrencyConfig;

fn demo_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../demos/dataset.json")
}

#[test]
fn test_demo_dataset_loads_and_reports() {
    let store = MemoryStore::load(demo_path(), CurrencyConfig::default()).unwrap();
    assert!(!store.accounts().is_empty());

    let report = ReportService::execute(
        &ReportSources::from_store(&store),
        AccountsSettings::default(),
        ReportFilters::new("Acme Corp", "2024-01-01", "2024-01-31"),
    )
    .unwrap();

    let total = report.total.unwrap();
    assert_eq!(
        total.values.closing_debit - total.values.closing_credit,
        dec!(0)
    );
    assert!(report.rows.iter().all(|row| row.currency == "USD"));
}
