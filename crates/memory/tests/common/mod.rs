//! Dataset builders shared by the integration tests.

#![allow(dead_code)]

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use ledgerbal_core::accounts::RootType;
use ledgerbal_core::fiscal::PeriodClosingVoucher;
use ledgerbal_core::ledger::{Amounts, ClosingBalance, GlEntry};
use ledgerbal_core::workflow::JournalEntry;
use ledgerbal_memory::{AccountSpec, CompanyRecord, Dataset, MemoryStore};
use ledgerbal_shared::config::CurrencyConfig;

pub const COMPANY: &str = "TestCo";

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn dataset() -> Dataset {
    Dataset {
        companies: vec![CompanyRecord {
            name: COMPANY.to_string(),
            default_currency: "USD".to_string(),
            default_finance_book: None,
        }],
        ..Dataset::default()
    }
}

pub fn account(dataset: &mut Dataset, name: &str, parent: Option<&str>, root_type: RootType, is_group: bool) {
    dataset
        .accounts
        .push(AccountSpec::new(COMPANY, name, parent, root_type, is_group));
}

pub fn post<'a>(
    dataset: &'a mut Dataset,
    account: &str,
    posting_date: NaiveDate,
    debit: Decimal,
    credit: Decimal,
) -> &'a mut GlEntry {
    let name = format!("GL-{:04}", dataset.gl_entries.len() + 1);
    dataset.gl_entries.push(GlEntry {
        name,
        company: COMPANY.to_string(),
        account: account.to_string(),
        posting_date,
        amounts: Amounts::new(debit, credit),
        is_opening: false,
        is_cancelled: false,
        voucher_type: "Journal Entry".to_string(),
        voucher_no: "JV-0001".to_string(),
        cost_center: None,
        project: None,
        finance_book: None,
        dimensions: BTreeMap::new(),
    });
    let last = dataset.gl_entries.len() - 1;
    &mut dataset.gl_entries[last]
}

pub fn close_period(dataset: &mut Dataset, voucher: &str, end: NaiveDate, balances: &[(&str, Decimal, Decimal)]) {
    dataset.period_closing_vouchers.push(PeriodClosingVoucher {
        name: voucher.to_string(),
        company: COMPANY.to_string(),
        period_start_date: None,
        period_end_date: end,
        is_submitted: true,
    });
    for (account, debit, credit) in balances {
        dataset.closing_balances.push(ClosingBalance {
            period_closing_voucher: voucher.to_string(),
            company: COMPANY.to_string(),
            account: (*account).to_string(),
            amounts: Amounts::new(*debit, *credit),
            is_period_closing_voucher_entry: false,
            cost_center: None,
            project: None,
            finance_book: None,
            dimensions: BTreeMap::new(),
        });
    }
}

pub fn store(dataset: Dataset) -> MemoryStore {
    MemoryStore::from_dataset(dataset, CurrencyConfig::default()).unwrap()
}

/// Committed state of a journal entry, ignoring staged changes.
pub fn committed(store: &MemoryStore, name: &str) -> JournalEntry {
    store
        .committed_journal_entries()
        .unwrap()
        .into_iter()
        .find(|entry| entry.name == name)
        .unwrap()
}
