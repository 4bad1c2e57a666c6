//! Collaborator interfaces the report and the approver read through.
//!
//! Every trait is narrow and synchronous. Implementations own persistence,
//! query translation, and currency conversion; this crate only composes
//! their answers.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::accounts::{Account, NestedSetBounds, ReportType};
use crate::dimension::AccountingDimension;
use crate::fiscal::PeriodClosingVoucher;
use crate::ledger::{Amounts, ClosingBalance, ClosingBalanceQuery, GlEntry, LedgerQuery};
use crate::workflow::{JournalEntry, WorkflowState};
use ledgerbal_shared::AppError;

/// Errors raised by collaborators.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A referenced record does not exist.
    #[error("{doctype} {name} not found")]
    NotFound {
        /// Record type.
        doctype: String,
        /// Record identifier.
        name: String,
    },

    /// No exchange rate is known for a conversion.
    #[error("No exchange rate from {from} to {to}")]
    MissingExchangeRate {
        /// Source currency.
        from: String,
        /// Target currency.
        to: String,
    },

    /// The store could not serve the request.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Builds a not-found error.
    #[must_use]
    pub fn not_found(doctype: impl Into<String>, name: impl Into<String>) -> Self {
        Self::NotFound {
            doctype: doctype.into(),
            name: name.into(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => Self::NotFound(err.to_string()),
            StoreError::MissingExchangeRate { .. } | StoreError::Unavailable(_) => {
                Self::Store(err.to_string())
            }
        }
    }
}

/// Tree-structured record types that support descendant expansion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TreeDoctype {
    /// Chart of accounts.
    Account,
    /// Cost center tree.
    CostCenter,
    /// Records of a tree-typed accounting dimension.
    Dimension(String),
}

impl TreeDoctype {
    /// Returns the record type name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Account => "Account",
            Self::CostCenter => "Cost Center",
            Self::Dimension(doctype) => doctype,
        }
    }
}

/// Chart-of-accounts reads.
pub trait AccountStore: Send + Sync {
    /// Returns true if `name` is an account of `company`.
    fn account_exists(&self, company: &str, name: &str) -> Result<bool, StoreError>;

    /// Returns the nested-set bounds of an account, if recorded.
    fn nested_set_bounds(&self, name: &str) -> Result<Option<NestedSetBounds>, StoreError>;

    /// Returns every account of a company, in any order.
    fn company_accounts(&self, company: &str) -> Result<Vec<Account>, StoreError>;

    /// Returns the names of the company's accounts reporting on `report_type`.
    fn accounts_of_report_type(
        &self,
        company: &str,
        report_type: ReportType,
    ) -> Result<Vec<String>, StoreError>;
}

/// Descendant expansion for tree-structured records.
pub trait TreeExpander: Send + Sync {
    /// Returns `name` and all of its descendants.
    ///
    /// An empty result means the expansion found nothing, not even `name`.
    fn with_children(&self, doctype: &TreeDoctype, name: &str) -> Result<Vec<String>, StoreError>;
}

/// Ledger and fiscal-closing reads.
pub trait LedgerStore: Send + Sync {
    /// Returns the latest submitted closing voucher of `company` whose period
    /// ends strictly before `date`.
    fn last_period_closing_voucher(
        &self,
        company: &str,
        date: NaiveDate,
    ) -> Result<Option<PeriodClosingVoucher>, StoreError>;

    /// Returns the snapshot rows matching the query.
    fn closing_balances(&self, query: &ClosingBalanceQuery)
    -> Result<Vec<ClosingBalance>, StoreError>;

    /// Returns the GL entries matching the query.
    fn gl_entries(&self, query: &LedgerQuery) -> Result<Vec<GlEntry>, StoreError>;

    /// Returns the number of finance books defined.
    fn finance_book_count(&self) -> Result<usize, StoreError>;

    /// Returns the company's default finance book.
    fn default_finance_book(&self, company: &str) -> Result<Option<String>, StoreError>;
}

/// Currency facts about companies and currencies.
pub trait CurrencyLookup: Send + Sync {
    /// Returns the company's default currency.
    fn company_currency(&self, company: &str) -> Result<String, StoreError>;

    /// Returns the magnitude below which an amount in `currency` counts as zero.
    fn zero_cutoff(&self, currency: &str) -> Decimal;
}

/// Conversion of company-currency amounts into a presentation currency.
pub trait PresentationConverter: Send + Sync {
    /// Rewrites `amounts` in place into `currency`, at the rate effective
    /// on `as_of`.
    fn to_presentation(
        &self,
        amounts: &mut Amounts,
        company: &str,
        currency: &str,
        as_of: NaiveDate,
    ) -> Result<(), StoreError>;
}

/// Registry of configured accounting dimensions.
pub trait DimensionRegistry: Send + Sync {
    /// Returns every configured accounting dimension.
    fn accounting_dimensions(&self) -> Result<Vec<AccountingDimension>, StoreError>;
}

/// Journal-entry persistence used by the depreciation approver.
///
/// `save_journal_entry` and `submit_journal_entry` stage changes; only
/// `commit` makes them durable.
pub trait JournalEntryStore: Send + Sync {
    /// Returns the names of journal entries with the given voucher type and
    /// committed workflow state.
    fn find_journal_entries(
        &self,
        voucher_type: &str,
        state: WorkflowState,
    ) -> Result<Vec<String>, StoreError>;

    /// Loads a journal entry.
    fn load_journal_entry(&self, name: &str) -> Result<JournalEntry, StoreError>;

    /// Stages the entry's fields and workflow state.
    fn save_journal_entry(&self, entry: &JournalEntry) -> Result<(), StoreError>;

    /// Stages the final submission of the entry.
    fn submit_journal_entry(&self, entry: &JournalEntry) -> Result<(), StoreError>;

    /// Makes every staged change durable.
    fn commit(&self) -> Result<(), StoreError>;
}

/// The collaborators one report run reads from.
#[derive(Clone, Copy)]
pub struct ReportSources<'a> {
    /// Chart of accounts.
    pub accounts: &'a dyn AccountStore,
    /// Tree expansion.
    pub trees: &'a dyn TreeExpander,
    /// Ledger and closing snapshots.
    pub ledger: &'a dyn LedgerStore,
    /// Currency facts.
    pub currencies: &'a dyn CurrencyLookup,
    /// Presentation-currency conversion.
    pub converter: &'a dyn PresentationConverter,
    /// Accounting dimensions.
    pub dimensions: &'a dyn DimensionRegistry,
}

impl<'a> ReportSources<'a> {
    /// Uses one store for every collaborator.
    pub fn from_store<S>(store: &'a S) -> Self
    where
        S: AccountStore
            + TreeExpander
            + LedgerStore
            + CurrencyLookup
            + PresentationConverter
            + DimensionRegistry,
    {
        Self {
            accounts: store,
            trees: store,
            ledger: store,
            currencies: store,
            converter: store,
            dimensions: store,
        }
    }
}
