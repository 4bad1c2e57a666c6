//! JSON datasets for the in-memory store.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chart::AccountSpec;
use crate::tree::TreeNode;
use ledgerbal_core::currency::RateTable;
use ledgerbal_core::dimension::AccountingDimension;
use ledgerbal_core::fiscal::PeriodClosingVoucher;
use ledgerbal_core::ledger::{ClosingBalance, GlEntry};
use ledgerbal_core::workflow::JournalEntry;

/// Errors raised while loading a dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The dataset file could not be read.
    #[error("Failed to read dataset {path}: {source}")]
    Io {
        /// Dataset path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The dataset is not valid JSON for the expected shape.
    #[error("Invalid dataset: {0}")]
    Json(#[from] serde_json::Error),

    /// Two accounts share a name.
    #[error("Duplicate account {0}")]
    DuplicateAccount(String),

    /// An account names a parent that does not exist in its company.
    #[error("Account {account} has unknown parent {parent}")]
    UnknownParent {
        /// Child account.
        account: String,
        /// Missing parent.
        parent: String,
    },

    /// An account is not reachable from any root.
    #[error("Account {0} is not reachable from a root account")]
    Unreachable(String),

    /// A record references a company the dataset does not define.
    #[error("Unknown company {0}")]
    UnknownCompany(String),
}

/// A company and its defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRecord {
    /// Company name.
    pub name: String,
    /// Company currency.
    pub default_currency: String,
    /// Company default finance book.
    #[serde(default)]
    pub default_finance_book: Option<String>,
}

/// An accounting dimension and, for tree-typed dimensions, its records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionSpec {
    /// Dimension configuration.
    #[serde(flatten)]
    pub dimension: AccountingDimension,
    /// Records of the dimension's document type.
    #[serde(default)]
    pub values: Vec<TreeNode>,
}

/// Everything a `MemoryStore` holds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
    /// Companies.
    pub companies: Vec<CompanyRecord>,
    /// Chart of accounts, without nested-set bounds.
    pub accounts: Vec<AccountSpec>,
    /// General ledger.
    pub gl_entries: Vec<GlEntry>,
    /// Period closing vouchers.
    pub period_closing_vouchers: Vec<PeriodClosingVoucher>,
    /// Per-account snapshots written by closing vouchers.
    pub closing_balances: Vec<ClosingBalance>,
    /// Cost center tree.
    pub cost_centers: Vec<TreeNode>,
    /// Accounting dimensions.
    pub dimensions: Vec<DimensionSpec>,
    /// Finance books.
    pub finance_books: Vec<String>,
    /// Exchange rates.
    pub exchange_rates: RateTable,
    /// Journal entries for the approval workflow.
    pub journal_entries: Vec<JournalEntry>,
}

impl Dataset {
    /// Parses a dataset from JSON.
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a dataset file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Checks that every account and ledger row belongs to a known company.
    pub fn validate(&self) -> Result<(), DatasetError> {
        let known = |company: &str| self.companies.iter().any(|c| c.name == company);
        let referenced = self
            .accounts
            .iter()
            .map(|a| a.company.as_str())
            .chain(self.gl_entries.iter().map(|e| e.company.as_str()))
            .chain(self.period_closing_vouchers.iter().map(|v| v.company.as_str()));
        for company in referenced {
            if !known(company) {
                return Err(DatasetError::UnknownCompany(company.to_string()));
            }
        }
        Ok(())
    }
}
