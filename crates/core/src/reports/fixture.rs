//! In-crate test store for report tests.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::accounts::{Account, NestedSetBounds, ReportType, RootType};
use crate::dimension::AccountingDimension;
use crate::fiscal::PeriodClosingVoucher;
use crate::ledger::{Amounts, ClosingBalance, ClosingBalanceQuery, GlEntry, LedgerQuery};
use crate::store::{
    AccountStore, CurrencyLookup, DimensionRegistry, LedgerStore, PresentationConverter,
    StoreError, TreeDoctype, TreeExpander,
};

pub const COMPANY: &str = "TestCo";

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[derive(Default)]
pub struct FakeStore {
    pub accounts: Vec<Account>,
    pub entries: Vec<GlEntry>,
    pub vouchers: Vec<PeriodClosingVoucher>,
    pub snapshots: Vec<ClosingBalance>,
    pub finance_books: usize,
    pub default_book: Option<String>,
    pub dimensions: Vec<AccountingDimension>,
    pub cost_centers: BTreeMap<String, Vec<String>>,
    pub presentation_rate: Option<Decimal>,
}

impl FakeStore {
    /// Builds a chart from `(name, parent, root_type, is_group)` in
    /// pre-order and assigns nested-set bounds.
    pub fn with_chart(specs: &[(&str, Option<&str>, RootType, bool)]) -> Self {
        let mut accounts: Vec<Account> = specs
            .iter()
            .map(|(name, parent, root_type, is_group)| Account {
                name: (*name).to_string(),
                company: COMPANY.to_string(),
                account_number: None,
                account_name: (*name).to_string(),
                parent_account: parent.map(str::to_string),
                bounds: NestedSetBounds::new(0, 0),
                is_group: *is_group,
                root_type: *root_type,
                report_type: match root_type {
                    RootType::Income | RootType::Expense => ReportType::ProfitAndLoss,
                    _ => ReportType::BalanceSheet,
                },
            })
            .collect();

        let mut counter = 0;
        let roots: Vec<String> = accounts
            .iter()
            .filter(|a| a.parent_account.is_none())
            .map(|a| a.name.clone())
            .collect();
        for root in roots {
            number(&mut accounts, &root, &mut counter);
        }

        Self {
            accounts,
            ..Self::default()
        }
    }

    pub fn post(&mut self, account: &str, posting_date: NaiveDate, debit: Decimal, credit: Decimal) -> &mut GlEntry {
        self.entries.push(gl(account, posting_date, debit, credit));
        let last = self.entries.len() - 1;
        &mut self.entries[last]
    }

    pub fn snapshot(&mut self, voucher: &str, account: &str, debit: Decimal, credit: Decimal) -> &mut ClosingBalance {
        self.snapshots.push(ClosingBalance {
            period_closing_voucher: voucher.to_string(),
            company: COMPANY.to_string(),
            account: account.to_string(),
            amounts: Amounts::new(debit, credit),
            is_period_closing_voucher_entry: false,
            cost_center: None,
            project: None,
            finance_book: None,
            dimensions: BTreeMap::new(),
        });
        let last = self.snapshots.len() - 1;
        &mut self.snapshots[last]
    }

    pub fn close_period(&mut self, name: &str, end: NaiveDate) {
        self.vouchers.push(PeriodClosingVoucher {
            name: name.to_string(),
            company: COMPANY.to_string(),
            period_start_date: None,
            period_end_date: end,
            is_submitted: true,
        });
    }

    fn find(&self, name: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.name == name)
    }
}

fn number(accounts: &mut [Account], name: &str, counter: &mut i64) {
    *counter += 1;
    let lft = *counter;
    let children: Vec<String> = accounts
        .iter()
        .filter(|a| a.parent_account.as_deref() == Some(name))
        .map(|a| a.name.clone())
        .collect();
    for child in children {
        number(accounts, &child, counter);
    }
    *counter += 1;
    let rgt = *counter;
    if let Some(account) = accounts.iter_mut().find(|a| a.name == name) {
        account.bounds = NestedSetBounds::new(lft, rgt);
    }
}

pub fn gl(account: &str, posting_date: NaiveDate, debit: Decimal, credit: Decimal) -> GlEntry {
    GlEntry {
        name: format!("GL-{account}-{posting_date}-{debit}-{credit}"),
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
    }
}

impl AccountStore for FakeStore {
    fn account_exists(&self, company: &str, name: &str) -> Result<bool, StoreError> {
        Ok(self.find(name).is_some_and(|a| a.company == company))
    }

    fn nested_set_bounds(&self, name: &str) -> Result<Option<NestedSetBounds>, StoreError> {
        Ok(self.find(name).map(|a| a.bounds))
    }

    fn company_accounts(&self, company: &str) -> Result<Vec<Account>, StoreError> {
        Ok(self
            .accounts
            .iter()
            .filter(|a| a.company == company)
            .cloned()
            .collect())
    }

    fn accounts_of_report_type(
        &self,
        company: &str,
        report_type: ReportType,
    ) -> Result<Vec<String>, StoreError> {
        Ok(self
            .accounts
            .iter()
            .filter(|a| a.company == company && a.report_type == report_type)
            .map(|a| a.name.clone())
            .collect())
    }
}

impl TreeExpander for FakeStore {
    fn with_children(&self, doctype: &TreeDoctype, name: &str) -> Result<Vec<String>, StoreError> {
        match doctype {
            TreeDoctype::Account => {
                let Some(root) = self.find(name) else {
                    return Ok(Vec::new());
                };
                Ok(self
                    .accounts
                    .iter()
                    .filter(|a| root.bounds.contains(&a.bounds))
                    .map(|a| a.name.clone())
                    .collect())
            }
            TreeDoctype::CostCenter => Ok(self.cost_centers.get(name).cloned().unwrap_or_default()),
            TreeDoctype::Dimension(_) => Ok(Vec::new()),
        }
    }
}

impl LedgerStore for FakeStore {
    fn last_period_closing_voucher(
        &self,
        company: &str,
        date: NaiveDate,
    ) -> Result<Option<PeriodClosingVoucher>, StoreError> {
        Ok(self
            .vouchers
            .iter()
            .filter(|v| v.company == company && v.is_submitted && v.period_end_date < date)
            .max_by_key(|v| v.period_end_date)
            .cloned())
    }

    fn closing_balances(
        &self,
        query: &ClosingBalanceQuery,
    ) -> Result<Vec<ClosingBalance>, StoreError> {
        Ok(self
            .snapshots
            .iter()
            .filter(|row| query.matches(row))
            .cloned()
            .collect())
    }

    fn gl_entries(&self, query: &LedgerQuery) -> Result<Vec<GlEntry>, StoreError> {
        Ok(self
            .entries
            .iter()
            .filter(|entry| query.matches(entry))
            .cloned()
            .collect())
    }

    fn finance_book_count(&self) -> Result<usize, StoreError> {
        Ok(self.finance_books)
    }

    fn default_finance_book(&self, _company: &str) -> Result<Option<String>, StoreError> {
        Ok(self.default_book.clone())
    }
}

impl CurrencyLookup for FakeStore {
    fn company_currency(&self, _company: &str) -> Result<String, StoreError> {
        Ok("USD".to_string())
    }

    fn zero_cutoff(&self, _currency: &str) -> Decimal {
        Decimal::new(5, 3)
    }
}

impl PresentationConverter for FakeStore {
    fn to_presentation(
        &self,
        amounts: &mut Amounts,
        _company: &str,
        currency: &str,
        _as_of: NaiveDate,
    ) -> Result<(), StoreError> {
        let rate = self
            .presentation_rate
            .ok_or_else(|| StoreError::MissingExchangeRate {
                from: "USD".to_string(),
                to: currency.to_string(),
            })?;
        amounts.debit *= rate;
        amounts.credit *= rate;
        Ok(())
    }
}

impl DimensionRegistry for FakeStore {
    fn accounting_dimensions(&self) -> Result<Vec<AccountingDimension>, StoreError> {
        Ok(self.dimensions.clone())
    }
}
