//! In-period GL entry fetching.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use tracing::debug;

use super::entry::Amounts;
use super::query::{LedgerQuery, PostingWindow};
use crate::dimension::RowFilter;
use crate::store::{LedgerStore, PresentationConverter, StoreError};

/// Parameters of the in-period ledger read.
#[derive(Debug, Clone)]
pub struct PeriodFetch<'a> {
    /// Company whose entries are read.
    pub company: &'a str,
    /// First day of the period.
    pub from_date: NaiveDate,
    /// Last day of the period.
    pub to_date: NaiveDate,
    /// Accepted accounts, `None` for every account.
    pub accounts: Option<BTreeSet<String>>,
    /// Secondary-dimension restrictions.
    pub rows: &'a RowFilter,
    /// Keep entries posted by period-closing vouchers.
    pub include_period_closing: bool,
    /// Currency to present amounts in, `None` for company currency.
    pub presentation_currency: Option<&'a str>,
}

impl PeriodFetch<'_> {
    /// Returns the ledger query this fetch issues.
    #[must_use]
    pub fn query(&self) -> LedgerQuery {
        LedgerQuery {
            company: self.company.to_string(),
            accounts: self.accounts.clone(),
            window: PostingWindow::Within {
                from: self.from_date,
                to: self.to_date,
            },
            exclude_opening: true,
            exclude_period_closing: !self.include_period_closing,
            rows: self.rows.clone(),
        }
    }
}

/// Per-account sums of the period's entries.
pub type PeriodTotals = BTreeMap<String, Amounts>;

/// Reads the period's GL entries and sums them per account.
///
/// Each account's sum is converted to the presentation currency once, so
/// rounding does not accumulate across entries.
pub fn gl_entries_by_account(
    ledger: &dyn LedgerStore,
    converter: &dyn PresentationConverter,
    fetch: &PeriodFetch<'_>,
) -> Result<PeriodTotals, StoreError> {
    let entries = ledger.gl_entries(&fetch.query())?;
    debug!(
        company = fetch.company,
        entries = entries.len(),
        "Fetched in-period GL entries"
    );

    let mut totals = PeriodTotals::new();
    for entry in &entries {
        totals.entry(entry.account.clone()).or_default().add(&entry.amounts);
    }
    if let Some(currency) = fetch.presentation_currency {
        for amounts in totals.values_mut() {
            converter.to_presentation(amounts, fetch.company, currency, fetch.to_date)?;
        }
    }
    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fiscal::PeriodClosingVoucher;
    use crate::ledger::{ClosingBalance, ClosingBalanceQuery, GlEntry, PERIOD_CLOSING_VOUCHER};
    use rust_decimal_macros::dec;

    struct Ledger(Vec<GlEntry>);

    impl LedgerStore for Ledger {
        fn last_period_closing_voucher(
            &self,
            _company: &str,
            _date: NaiveDate,
        ) -> Result<Option<PeriodClosingVoucher>, StoreError> {
            Ok(None)
        }

        fn closing_balances(
            &self,
            _query: &ClosingBalanceQuery,
        ) -> Result<Vec<ClosingBalance>, StoreError> {
            Ok(Vec::new())
        }

        fn gl_entries(&self, query: &LedgerQuery) -> Result<Vec<GlEntry>, StoreError> {
            Ok(self.0.iter().filter(|e| query.matches(e)).cloned().collect())
        }

        fn finance_book_count(&self) -> Result<usize, StoreError> {
            Ok(0)
        }

        fn default_finance_book(&self, _company: &str) -> Result<Option<String>, StoreError> {
            Ok(None)
        }
    }

    struct Doubler;

    impl PresentationConverter for Doubler {
        fn to_presentation(
            &self,
            amounts: &mut Amounts,
            _company: &str,
            _currency: &str,
            _as_of: NaiveDate,
        ) -> Result<(), StoreError> {
            amounts.debit *= dec!(2);
            amounts.credit *= dec!(2);
            Ok(())
        }
    }

    /// Halves and rounds to cents, like a 0.5 rate into a two-place currency.
    struct HalfToCents;

    impl PresentationConverter for HalfToCents {
        fn to_presentation(
            &self,
            amounts: &mut Amounts,
            _company: &str,
            _currency: &str,
            _as_of: NaiveDate,
        ) -> Result<(), StoreError> {
            amounts.debit = crate::currency::convert_amount(amounts.debit, dec!(0.5), 2);
            amounts.credit = crate::currency::convert_amount(amounts.credit, dec!(0.5), 2);
            Ok(())
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(account: &str, posting_date: NaiveDate, debit: rust_decimal::Decimal) -> GlEntry {
        GlEntry {
            name: format!("GL-{account}-{posting_date}"),
            company: "TestCo".to_string(),
            account: account.to_string(),
            posting_date,
            amounts: Amounts::new(debit, rust_decimal::Decimal::ZERO),
            is_opening: false,
            is_cancelled: false,
            voucher_type: "Journal Entry".to_string(),
            voucher_no: "JV-1".to_string(),
            cost_center: None,
            project: None,
            finance_book: None,
            dimensions: BTreeMap::new(),
        }
    }

    fn ledger() -> Ledger {
        let mut opening = entry("Cash", date(2024, 1, 2), dec!(1000));
        opening.is_opening = true;
        let mut closing = entry("Cash", date(2024, 1, 31), dec!(5));
        closing.voucher_type = PERIOD_CLOSING_VOUCHER.to_string();

        Ledger(vec![
            entry("Cash", date(2024, 1, 1), dec!(10)),
            entry("Cash", date(2024, 1, 31), dec!(20)),
            entry("Bank", date(2024, 1, 15), dec!(30)),
            entry("Bank", date(2024, 2, 1), dec!(40)),
            opening,
            closing,
        ])
    }

    fn fetch(rows: &RowFilter) -> PeriodFetch<'_> {
        PeriodFetch {
            company: "TestCo",
            from_date: date(2024, 1, 1),
            to_date: date(2024, 1, 31),
            accounts: None,
            rows,
            include_period_closing: true,
            presentation_currency: None,
        }
    }

    #[test]
    fn test_sums_in_period_entries_by_account() {
        let rows = RowFilter::new();
        let totals = gl_entries_by_account(&ledger(), &Doubler, &fetch(&rows)).unwrap();

        assert_eq!(totals["Cash"].debit, dec!(35));
        assert_eq!(totals["Bank"].debit, dec!(30));
    }

    #[test]
    fn test_period_closing_entries_can_be_dropped() {
        let rows = RowFilter::new();
        let mut params = fetch(&rows);
        params.include_period_closing = false;
        let totals = gl_entries_by_account(&ledger(), &Doubler, &params).unwrap();

        assert_eq!(totals["Cash"].debit, dec!(30));
    }

    #[test]
    fn test_account_restriction_and_conversion() {
        let rows = RowFilter::new();
        let mut params = fetch(&rows);
        params.accounts = Some(BTreeSet::from(["Bank".to_string()]));
        params.presentation_currency = Some("EUR");
        let totals = gl_entries_by_account(&ledger(), &Doubler, &params).unwrap();

        assert!(!totals.contains_key("Cash"));
        assert_eq!(totals["Bank"].debit, dec!(60));
    }

    #[test]
    fn test_conversion_runs_on_account_sum() {
        let ledger = Ledger(
            (1..=3)
                .map(|day| entry("Cash", date(2024, 1, day), dec!(0.01)))
                .collect(),
        );
        let rows = RowFilter::new();
        let mut params = fetch(&rows);
        params.presentation_currency = Some("EUR");
        let totals = gl_entries_by_account(&ledger, &HalfToCents, &params).unwrap();

        // 0.03 * 0.5 = 0.015 rounds to 0.02; per entry it would be 3 x 0.00.
        assert_eq!(totals["Cash"].debit, dec!(0.02));
    }
}
