//! Accounting dimensions and dimensional row filtering.

pub mod filter;

pub use filter::{FinanceBookRule, RowFilter};

use serde::{Deserialize, Serialize};

/// A custom accounting dimension configured for the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountingDimension {
    /// Field name the dimension is stored under on ledger rows.
    pub fieldname: String,
    /// Document type whose records are the dimension's values.
    pub document_type: String,
    /// Values form a tree; filters expand to descendants.
    #[serde(default)]
    pub is_tree: bool,
}
