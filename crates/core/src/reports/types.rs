//! Report data types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ledger::BalanceRow;

/// Label of the synthetic total row.
pub const TOTAL_LABEL: &str = "Total";

/// One output row of the balance report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Account name; `"Total"` for the total row.
    pub account: String,
    /// Parent in the listed tree.
    pub parent_account: Option<String>,
    /// Tree depth.
    pub indent: usize,
    /// First day of the period.
    pub from_date: NaiveDate,
    /// Last day of the period.
    pub to_date: NaiveDate,
    /// Currency the values are in.
    pub currency: String,
    /// Display label.
    pub account_name: String,
    /// The six monetary values.
    #[serde(flatten)]
    pub values: BalanceRow,
    /// Any value reaches the currency's zero cutoff, or the row is forced
    /// visible.
    pub has_value: bool,
    /// Frontends highlight negative values of this row.
    #[serde(default)]
    pub warn_if_negative: bool,
}

/// Field type of a report column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    /// Reference to another record.
    Link,
    /// Monetary amount.
    Currency,
}

/// Column definition of the balance report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportColumn {
    /// Row field the column shows.
    pub fieldname: &'static str,
    /// Header label.
    pub label: &'static str,
    /// Field type.
    pub fieldtype: FieldType,
    /// Link target, or the row field holding the currency.
    pub options: &'static str,
    /// Preferred width in pixels.
    pub width: Option<u32>,
    /// Column is hidden by default.
    pub hidden: bool,
}

impl ReportColumn {
    const fn currency(fieldname: &'static str, label: &'static str) -> Self {
        Self {
            fieldname,
            label,
            fieldtype: FieldType::Currency,
            options: "currency",
            width: None,
            hidden: false,
        }
    }
}

/// Returns the balance report's columns in display order.
#[must_use]
pub fn columns() -> Vec<ReportColumn> {
    vec![
        ReportColumn {
            fieldname: "account",
            label: "Account",
            fieldtype: FieldType::Link,
            options: "Account",
            width: Some(300),
            hidden: false,
        },
        ReportColumn {
            fieldname: "currency",
            label: "Currency",
            fieldtype: FieldType::Link,
            options: "Currency",
            width: None,
            hidden: true,
        },
        ReportColumn::currency("opening_debit", "Opening (Dr)"),
        ReportColumn::currency("opening_credit", "Opening (Cr)"),
        ReportColumn::currency("debit", "Debit"),
        ReportColumn::currency("credit", "Credit"),
        ReportColumn::currency("closing_debit", "Closing (Dr)"),
        ReportColumn::currency("closing_credit", "Closing (Cr)"),
    ]
}

/// Balance report output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceReport {
    /// Column definitions.
    pub columns: Vec<ReportColumn>,
    /// Account rows in tree order.
    pub rows: Vec<ReportRow>,
    /// Grand total; `None` when no account was selected.
    pub total: Option<ReportRow>,
}

impl BalanceReport {
    /// Returns an empty report.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            columns: columns(),
            rows: Vec::new(),
            total: None,
        }
    }

    /// Returns the account rows followed by the total row.
    pub fn all_rows(&self) -> impl Iterator<Item = &ReportRow> {
        self.rows.iter().chain(self.total.as_ref())
    }

    /// Looks up an account row by account name.
    #[must_use]
    pub fn row(&self, account: &str) -> Option<&ReportRow> {
        self.rows.iter().find(|row| row.account == account)
    }
}
