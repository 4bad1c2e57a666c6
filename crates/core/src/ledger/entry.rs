//! Ledger rows read by the balance report.
//!
//! Two row shapes feed the report: raw GL entries and the per-account
//! closing balances stored by a period-closing voucher. Both carry the same
//! secondary dimensions so a single [`RowFilter`](crate::dimension::RowFilter)
//! can be applied to either.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Voucher type of the entries posted by a period-closing voucher.
pub const PERIOD_CLOSING_VOUCHER: &str = "Period Closing Voucher";

/// Debit/credit amounts of a row in company and account currency.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amounts {
    /// Debit in company currency.
    #[serde(default)]
    pub debit: Decimal,
    /// Credit in company currency.
    #[serde(default)]
    pub credit: Decimal,
    /// Debit in the account's own currency.
    #[serde(default)]
    pub debit_in_account_currency: Decimal,
    /// Credit in the account's own currency.
    #[serde(default)]
    pub credit_in_account_currency: Decimal,
    /// The account's currency, `None` when it equals the company currency.
    #[serde(default)]
    pub account_currency: Option<String>,
}

impl Amounts {
    /// Creates amounts for a company-currency account.
    #[must_use]
    pub fn new(debit: Decimal, credit: Decimal) -> Self {
        Self {
            debit,
            credit,
            debit_in_account_currency: debit,
            credit_in_account_currency: credit,
            account_currency: None,
        }
    }

    /// Adds another row's amounts, keeping the first known account currency.
    pub fn add(&mut self, other: &Self) {
        self.debit += other.debit;
        self.credit += other.credit;
        self.debit_in_account_currency += other.debit_in_account_currency;
        self.credit_in_account_currency += other.credit_in_account_currency;
        if self.account_currency.is_none() {
            self.account_currency.clone_from(&other.account_currency);
        }
    }
}

/// Access to the secondary dimensions a row is tagged with.
pub trait DimensionedRow {
    /// Company that owns the row.
    fn company(&self) -> &str;
    /// Account the row is posted to.
    fn account(&self) -> &str;
    /// Cost center tag.
    fn cost_center(&self) -> Option<&str>;
    /// Project tag.
    fn project(&self) -> Option<&str>;
    /// Finance book tag; blank and absent are equivalent.
    fn finance_book(&self) -> Option<&str>;
    /// Value of a custom accounting dimension, by field name.
    fn dimension(&self, fieldname: &str) -> Option<&str>;
}

/// A general ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlEntry {
    /// Entry identifier.
    pub name: String,
    /// Owning company.
    pub company: String,
    /// Account posted to.
    pub account: String,
    /// Posting date.
    pub posting_date: NaiveDate,
    /// Posted amounts.
    #[serde(flatten)]
    pub amounts: Amounts,
    /// Entry was flagged as an opening entry.
    #[serde(default)]
    pub is_opening: bool,
    /// Entry belongs to a cancelled voucher.
    #[serde(default)]
    pub is_cancelled: bool,
    /// Type of the source voucher.
    #[serde(default)]
    pub voucher_type: String,
    /// Source voucher identifier.
    #[serde(default)]
    pub voucher_no: String,
    /// Cost center tag.
    #[serde(default)]
    pub cost_center: Option<String>,
    /// Project tag.
    #[serde(default)]
    pub project: Option<String>,
    /// Finance book tag.
    #[serde(default)]
    pub finance_book: Option<String>,
    /// Custom accounting dimensions, by field name.
    #[serde(default)]
    pub dimensions: BTreeMap<String, String>,
}

impl GlEntry {
    /// Returns true if the entry was posted by a period-closing voucher.
    #[must_use]
    pub fn is_period_closing_entry(&self) -> bool {
        self.voucher_type == PERIOD_CLOSING_VOUCHER
    }
}

impl DimensionedRow for GlEntry {
    fn company(&self) -> &str {
        &self.company
    }

    fn account(&self) -> &str {
        &self.account
    }

    fn cost_center(&self) -> Option<&str> {
        self.cost_center.as_deref()
    }

    fn project(&self) -> Option<&str> {
        self.project.as_deref()
    }

    fn finance_book(&self) -> Option<&str> {
        self.finance_book.as_deref().filter(|book| !book.is_empty())
    }

    fn dimension(&self, fieldname: &str) -> Option<&str> {
        self.dimensions.get(fieldname).map(String::as_str)
    }
}

/// Per-account balance stored by a period-closing voucher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosingBalance {
    /// Voucher that produced the snapshot.
    pub period_closing_voucher: String,
    /// Owning company.
    pub company: String,
    /// Account the balance belongs to.
    pub account: String,
    /// Snapshot amounts.
    #[serde(flatten)]
    pub amounts: Amounts,
    /// Row holds the closing voucher's own transfer entry.
    #[serde(default)]
    pub is_period_closing_voucher_entry: bool,
    /// Cost center tag.
    #[serde(default)]
    pub cost_center: Option<String>,
    /// Project tag.
    #[serde(default)]
    pub project: Option<String>,
    /// Finance book tag.
    #[serde(default)]
    pub finance_book: Option<String>,
    /// Custom accounting dimensions, by field name.
    #[serde(default)]
    pub dimensions: BTreeMap<String, String>,
}

impl DimensionedRow for ClosingBalance {
    fn company(&self) -> &str {
        &self.company
    }

    fn account(&self) -> &str {
        &self.account
    }

    fn cost_center(&self) -> Option<&str> {
        self.cost_center.as_deref()
    }

    fn project(&self) -> Option<&str> {
        self.project.as_deref()
    }

    fn finance_book(&self) -> Option<&str> {
        self.finance_book.as_deref().filter(|book| !book.is_empty())
    }

    fn dimension(&self, fieldname: &str) -> Option<&str> {
        self.dimensions.get(fieldname).map(String::as_str)
    }
}
