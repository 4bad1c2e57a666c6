//! Chart-of-accounts domain types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Top-level classification of an account.
///
/// The root type decides which side of the ledger is the account's
/// natural balance side:
/// - Asset/Equity/Expense: debit
/// - Liability/Income: credit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RootType {
    /// Resources owned by the company.
    Asset,
    /// Obligations owed by the company.
    Liability,
    /// Owner's stake.
    Equity,
    /// Revenue and other gains.
    Income,
    /// Costs and losses.
    Expense,
}

impl RootType {
    /// Returns the side on which this root type carries its balance.
    #[must_use]
    pub const fn natural_side(self) -> BalanceSide {
        match self {
            Self::Asset | Self::Equity | Self::Expense => BalanceSide::Debit,
            Self::Liability | Self::Income => BalanceSide::Credit,
        }
    }

    /// Returns the string representation of the root type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asset => "Asset",
            Self::Liability => "Liability",
            Self::Equity => "Equity",
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }
}

impl fmt::Display for RootType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One side of the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceSide {
    /// Debit side.
    Debit,
    /// Credit side.
    Credit,
}

impl BalanceSide {
    /// Returns the other side.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Debit => Self::Credit,
            Self::Credit => Self::Debit,
        }
    }
}

/// Which financial statement an account reports on.
///
/// Balance-sheet accounts carry their balance across fiscal years while
/// profit-and-loss accounts are closed out by period-closing vouchers, so
/// opening balances are resolved separately for each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ReportType {
    /// Balance sheet accounts.
    #[serde(rename = "Balance Sheet")]
    BalanceSheet,
    /// Profit and loss accounts.
    #[serde(rename = "Profit and Loss")]
    ProfitAndLoss,
}

impl ReportType {
    /// Both report types, in the order opening balances are merged.
    pub const ALL: [Self; 2] = [Self::BalanceSheet, Self::ProfitAndLoss];

    /// Returns the string representation of the report type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BalanceSheet => "Balance Sheet",
            Self::ProfitAndLoss => "Profit and Loss",
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Nested-set interval of a tree node.
///
/// Every descendant's interval lies strictly inside its ancestors'
/// intervals, so subtree membership is a pair of comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NestedSetBounds {
    /// Left bound.
    pub lft: i64,
    /// Right bound.
    pub rgt: i64,
}

impl NestedSetBounds {
    /// Creates a new interval.
    #[must_use]
    pub const fn new(lft: i64, rgt: i64) -> Self {
        Self { lft, rgt }
    }

    /// Returns true if `other` is this node or one of its descendants.
    #[must_use]
    pub const fn contains(&self, other: &Self) -> bool {
        other.lft >= self.lft && other.rgt <= self.rgt
    }
}

/// A node in the chart of accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique account identifier.
    pub name: String,
    /// Company the account belongs to.
    pub company: String,
    /// Optional display number.
    #[serde(default)]
    pub account_number: Option<String>,
    /// Human-readable account name.
    pub account_name: String,
    /// Parent account, `None` for a tree root.
    #[serde(default)]
    pub parent_account: Option<String>,
    /// Nested-set interval.
    #[serde(flatten)]
    pub bounds: NestedSetBounds,
    /// Group accounts aggregate their children and carry no direct postings.
    #[serde(default)]
    pub is_group: bool,
    /// Root type of the account.
    pub root_type: RootType,
    /// Statement the account reports on.
    pub report_type: ReportType,
}

impl Account {
    /// Returns the label shown in reports: `"number - name"` when numbered.
    #[must_use]
    pub fn display_name(&self) -> String {
        match self.account_number.as_deref() {
            Some(number) if !number.trim().is_empty() => {
                format!("{number} - {}", self.account_name)
            }
            _ => self.account_name.clone(),
        }
    }
}
