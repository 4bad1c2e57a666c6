//! Account balance report.
//!
//! This module turns a filtered chart of accounts and its ledger into a
//! hierarchical balance report:
//! - Request validation and secondary-dimension scoping
//! - Opening balances from closing snapshots or ledger replay
//! - In-period aggregation and bottom-up roll-up
//! - Net presentation, zero-row filtering, and the total row

pub mod aggregate;
pub mod error;
pub mod filters;
pub mod format;
pub mod opening;
pub mod scope;
pub mod service;
pub mod types;

#[cfg(test)]
mod fixture;
#[cfg(test)]
mod props;

pub use error::{ErrorKind, ReportError};
pub use filters::{OneOrMany, ReportFilters, ValidatedFilters};
pub use opening::{OpeningBalance, OpeningBalances, OpeningSource};
pub use service::ReportService;
pub use types::*;
