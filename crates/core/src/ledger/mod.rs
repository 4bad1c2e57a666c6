//! Ledger rows, balance accumulators, and ledger reads.
//!
//! This module implements the ledger side of the balance report:
//! - GL entries and period-closing snapshot rows
//! - Declarative row selections handed to the ledger store
//! - Six-column balance accumulators and the net-balance transform
//! - In-period entry fetching grouped by account

pub mod balance;
pub mod entry;
pub mod fetch;
pub mod query;

pub use balance::{BalanceRow, ValueField};
pub use entry::{Amounts, ClosingBalance, DimensionedRow, GlEntry, PERIOD_CLOSING_VOUCHER};
pub use fetch::{PeriodFetch, PeriodTotals, gl_entries_by_account};
pub use query::{ClosingBalanceQuery, LedgerQuery, PostingWindow};
