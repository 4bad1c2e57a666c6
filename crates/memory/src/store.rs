//! In-memory implementation of every collaborator trait.
//!
//! Reference data is immutable after construction. Journal entries keep a
//! committed view plus a staging area that `commit` folds in, so the
//! approver's step-by-step durability can be observed.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::chart::build_chart;
use crate::dataset::{CompanyRecord, Dataset, DatasetError};
use crate::tree::Tree;
use ledgerbal_core::accounts::{Account, NestedSetBounds, ReportType};
use ledgerbal_core::currency::{RateTable, convert_amounts};
use ledgerbal_core::dimension::AccountingDimension;
use ledgerbal_core::fiscal::PeriodClosingVoucher;
use ledgerbal_core::ledger::{Amounts, ClosingBalance, ClosingBalanceQuery, GlEntry, LedgerQuery};
use ledgerbal_core::store::{
    AccountStore, CurrencyLookup, DimensionRegistry, JournalEntryStore, LedgerStore,
    PresentationConverter, StoreError, TreeDoctype, TreeExpander,
};
use ledgerbal_core::workflow::{JournalEntry, WorkflowState};
use ledgerbal_shared::config::CurrencyConfig;
use ledgerbal_shared::types::zero_cutoff;

const JOURNAL_ENTRY: &str = "Journal Entry";

#[derive(Default)]
struct Journal {
    committed: BTreeMap<String, JournalEntry>,
    staged: BTreeMap<String, JournalEntry>,
}

/// Store backed by in-process collections.
pub struct MemoryStore {
    companies: BTreeMap<String, CompanyRecord>,
    accounts: Vec<Account>,
    gl_entries: Vec<GlEntry>,
    vouchers: Vec<PeriodClosingVoucher>,
    closing_balances: Vec<ClosingBalance>,
    cost_centers: Tree,
    dimensions: Vec<AccountingDimension>,
    dimension_trees: BTreeMap<String, Tree>,
    finance_books: Vec<String>,
    rates: RateTable,
    currency: CurrencyConfig,
    journal: RwLock<Journal>,
}

impl MemoryStore {
    /// Builds a store from a dataset.
    pub fn from_dataset(dataset: Dataset, currency: CurrencyConfig) -> Result<Self, DatasetError> {
        dataset.validate()?;
        let accounts = build_chart(&dataset.accounts)?;

        let mut dimensions = Vec::with_capacity(dataset.dimensions.len());
        let mut dimension_trees = BTreeMap::new();
        for spec in dataset.dimensions {
            if spec.dimension.is_tree {
                dimension_trees.insert(spec.dimension.document_type.clone(), Tree::new(&spec.values));
            }
            dimensions.push(spec.dimension);
        }

        debug!(
            companies = dataset.companies.len(),
            accounts = accounts.len(),
            gl_entries = dataset.gl_entries.len(),
            "Dataset loaded"
        );

        Ok(Self {
            companies: dataset
                .companies
                .into_iter()
                .map(|c| (c.name.clone(), c))
                .collect(),
            accounts,
            gl_entries: dataset.gl_entries,
            vouchers: dataset.period_closing_vouchers,
            closing_balances: dataset.closing_balances,
            cost_centers: Tree::new(&dataset.cost_centers),
            dimensions,
            dimension_trees,
            finance_books: dataset.finance_books,
            rates: dataset.exchange_rates,
            currency,
            journal: RwLock::new(Journal {
                committed: dataset
                    .journal_entries
                    .into_iter()
                    .map(|e| (e.name.clone(), e))
                    .collect(),
                staged: BTreeMap::new(),
            }),
        })
    }

    /// Reads a JSON dataset file and builds a store from it.
    pub fn load(path: impl AsRef<Path>, currency: CurrencyConfig) -> Result<Self, DatasetError> {
        Self::from_dataset(Dataset::from_path(path)?, currency)
    }

    /// Returns the chart of accounts in pre-order.
    #[must_use]
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Returns every committed journal entry, ordered by name.
    pub fn committed_journal_entries(&self) -> Result<Vec<JournalEntry>, StoreError> {
        Ok(self.read_journal()?.committed.values().cloned().collect())
    }

    /// Returns the number of staged, uncommitted journal entries.
    pub fn staged_changes(&self) -> Result<usize, StoreError> {
        Ok(self.read_journal()?.staged.len())
    }

    /// Drops every staged change.
    pub fn rollback(&self) -> Result<(), StoreError> {
        self.write_journal()?.staged.clear();
        Ok(())
    }

    fn account(&self, name: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.name == name)
    }

    fn company(&self, company: &str) -> Result<&CompanyRecord, StoreError> {
        self.companies
            .get(company)
            .ok_or_else(|| StoreError::not_found("Company", company))
    }

    fn read_journal(&self) -> Result<RwLockReadGuard<'_, Journal>, StoreError> {
        self.journal
            .read()
            .map_err(|_| StoreError::Unavailable("journal lock poisoned".to_string()))
    }

    fn write_journal(&self) -> Result<RwLockWriteGuard<'_, Journal>, StoreError> {
        self.journal
            .write()
            .map_err(|_| StoreError::Unavailable("journal lock poisoned".to_string()))
    }

    fn stage(&self, entry: &JournalEntry) -> Result<(), StoreError> {
        let mut journal = self.write_journal()?;
        if !journal.committed.contains_key(&entry.name) && !journal.staged.contains_key(&entry.name) {
            return Err(StoreError::not_found(JOURNAL_ENTRY, entry.name.as_str()));
        }
        journal.staged.insert(entry.name.clone(), entry.clone());
        Ok(())
    }
}

impl AccountStore for MemoryStore {
    fn account_exists(&self, company: &str, name: &str) -> Result<bool, StoreError> {
        Ok(self.account(name).is_some_and(|a| a.company == company))
    }

    fn nested_set_bounds(&self, name: &str) -> Result<Option<NestedSetBounds>, StoreError> {
        Ok(self.account(name).map(|a| a.bounds))
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

impl TreeExpander for MemoryStore {
    fn with_children(&self, doctype: &TreeDoctype, name: &str) -> Result<Vec<String>, StoreError> {
        Ok(match doctype {
            TreeDoctype::Account => match self.account(name) {
                Some(root) => self
                    .accounts
                    .iter()
                    .filter(|a| a.company == root.company && root.bounds.contains(&a.bounds))
                    .map(|a| a.name.clone())
                    .collect(),
                None => Vec::new(),
            },
            TreeDoctype::CostCenter => self.cost_centers.with_descendants(name),
            TreeDoctype::Dimension(document_type) => self
                .dimension_trees
                .get(document_type)
                .map(|tree| tree.with_descendants(name))
                .unwrap_or_default(),
        })
    }
}

impl LedgerStore for MemoryStore {
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
            .closing_balances
            .iter()
            .filter(|row| query.matches(row))
            .cloned()
            .collect())
    }

    fn gl_entries(&self, query: &LedgerQuery) -> Result<Vec<GlEntry>, StoreError> {
        Ok(self
            .gl_entries
            .iter()
            .filter(|entry| query.matches(entry))
            .cloned()
            .collect())
    }

    fn finance_book_count(&self) -> Result<usize, StoreError> {
        Ok(self.finance_books.len())
    }

    fn default_finance_book(&self, company: &str) -> Result<Option<String>, StoreError> {
        Ok(self.company(company)?.default_finance_book.clone())
    }
}

impl CurrencyLookup for MemoryStore {
    fn company_currency(&self, company: &str) -> Result<String, StoreError> {
        Ok(self.company(company)?.default_currency.clone())
    }

    fn zero_cutoff(&self, currency: &str) -> Decimal {
        zero_cutoff(self.currency.precision_for(currency))
    }
}

impl PresentationConverter for MemoryStore {
    fn to_presentation(
        &self,
        amounts: &mut Amounts,
        company: &str,
        currency: &str,
        as_of: NaiveDate,
    ) -> Result<(), StoreError> {
        let rate = if amounts.account_currency.as_deref() == Some(currency) {
            Decimal::ONE
        } else {
            let company_currency = self.company_currency(company)?;
            self.rates
                .rate(&company_currency, currency, as_of)
                .ok_or_else(|| StoreError::MissingExchangeRate {
                    from: company_currency,
                    to: currency.to_string(),
                })?
        };
        convert_amounts(amounts, currency, rate, self.currency.precision_for(currency));
        Ok(())
    }
}

impl DimensionRegistry for MemoryStore {
    fn accounting_dimensions(&self) -> Result<Vec<AccountingDimension>, StoreError> {
        Ok(self.dimensions.clone())
    }
}

impl JournalEntryStore for MemoryStore {
    fn find_journal_entries(
        &self,
        voucher_type: &str,
        state: WorkflowState,
    ) -> Result<Vec<String>, StoreError> {
        Ok(self
            .read_journal()?
            .committed
            .values()
            .filter(|e| e.voucher_type == voucher_type && e.workflow_state == state)
            .map(|e| e.name.clone())
            .collect())
    }

    fn load_journal_entry(&self, name: &str) -> Result<JournalEntry, StoreError> {
        let journal = self.read_journal()?;
        journal
            .staged
            .get(name)
            .or_else(|| journal.committed.get(name))
            .cloned()
            .ok_or_else(|| StoreError::not_found(JOURNAL_ENTRY, name))
    }

    fn save_journal_entry(&self, entry: &JournalEntry) -> Result<(), StoreError> {
        self.stage(entry)
    }

    fn submit_journal_entry(&self, entry: &JournalEntry) -> Result<(), StoreError> {
        self.stage(entry)
    }

    fn commit(&self) -> Result<(), StoreError> {
        let mut journal = self.write_journal()?;
        let staged = std::mem::take(&mut journal.staged);
        debug!(entries = staged.len(), "Journal committed");
        journal.committed.extend(staged);
        Ok(())
    }
}
