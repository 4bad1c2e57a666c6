//! Row selections handed to the ledger store.
//!
//! Queries are plain data. A store may translate them into its own query
//! language; whatever it returns must be exactly the rows for which
//! `matches` holds.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::entry::{ClosingBalance, GlEntry};
use crate::dimension::RowFilter;

/// Posting-date restriction on GL entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostingWindow {
    /// `posting_date < date`.
    Before(NaiveDate),
    /// `posting_date < date` or the entry is flagged as opening.
    BeforeOrOpening(NaiveDate),
    /// `start <= posting_date < before`.
    Between {
        /// First included date.
        start: NaiveDate,
        /// First excluded date.
        before: NaiveDate,
    },
    /// `from <= posting_date <= to`.
    Within {
        /// First included date.
        from: NaiveDate,
        /// Last included date.
        to: NaiveDate,
    },
}

impl PostingWindow {
    /// Returns true if the entry falls inside the window.
    #[must_use]
    pub fn admits(&self, entry: &GlEntry) -> bool {
        let date = entry.posting_date;
        match *self {
            Self::Before(limit) => date < limit,
            Self::BeforeOrOpening(limit) => date < limit || entry.is_opening,
            Self::Between { start, before } => date >= start && date < before,
            Self::Within { from, to } => date >= from && date <= to,
        }
    }
}

/// Selection of GL entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerQuery {
    /// Company whose entries are read.
    pub company: String,
    /// Accepted accounts, `None` for every account.
    pub accounts: Option<BTreeSet<String>>,
    /// Posting-date restriction.
    pub window: PostingWindow,
    /// Drop entries flagged as opening.
    pub exclude_opening: bool,
    /// Drop entries posted by period-closing vouchers.
    pub exclude_period_closing: bool,
    /// Secondary-dimension restrictions.
    pub rows: RowFilter,
}

impl LedgerQuery {
    /// Creates a query for one company and posting window.
    #[must_use]
    pub fn new(company: impl Into<String>, window: PostingWindow) -> Self {
        Self {
            company: company.into(),
            accounts: None,
            window,
            exclude_opening: false,
            exclude_period_closing: false,
            rows: RowFilter::new(),
        }
    }

    /// Returns true if the entry belongs to the selection.
    ///
    /// Cancelled entries never match.
    #[must_use]
    pub fn matches(&self, entry: &GlEntry) -> bool {
        entry.company == self.company
            && !entry.is_cancelled
            && self
                .accounts
                .as_ref()
                .is_none_or(|accounts| accounts.contains(&entry.account))
            && self.window.admits(entry)
            && !(self.exclude_opening && entry.is_opening)
            && !(self.exclude_period_closing && entry.is_period_closing_entry())
            && self.rows.matches(entry)
    }
}

/// Selection of the per-account balances stored by one closing voucher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosingBalanceQuery {
    /// Company whose snapshot is read.
    pub company: String,
    /// Closing voucher that produced the snapshot.
    pub period_closing_voucher: String,
    /// Accepted accounts, `None` for every account.
    pub accounts: Option<BTreeSet<String>>,
    /// Drop rows holding the closing voucher's own transfer entries.
    pub exclude_period_closing_entries: bool,
    /// Secondary-dimension restrictions.
    pub rows: RowFilter,
}

impl ClosingBalanceQuery {
    /// Returns true if the snapshot row belongs to the selection.
    #[must_use]
    pub fn matches(&self, row: &ClosingBalance) -> bool {
        row.company == self.company
            && row.period_closing_voucher == self.period_closing_voucher
            && self
                .accounts
                .as_ref()
                .is_none_or(|accounts| accounts.contains(&row.account))
            && !(self.exclude_period_closing_entries && row.is_period_closing_voucher_entry)
            && self.rows.matches(row)
    }
}
