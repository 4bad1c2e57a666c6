//! Journal-entry approval workflow.
//!
//! # Modules
//!
//! - `types` - Workflow domain types (WorkflowState, DocStatus, WorkflowAction)
//! - `error` - Workflow-specific error types
//! - `service` - State transition logic
//! - `depreciation` - Batch approval of draft depreciation entries

pub mod depreciation;
pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod fixture;
#[cfg(test)]
mod props;

pub use depreciation::{BatchOutcome, DepreciationApprover, EntryOutcome};
pub use error::WorkflowError;
pub use service::WorkflowService;
pub use types::{
    ApprovalStep, DEPRECIATION_ENTRY, DocStatus, JournalEntry, WorkflowAction, WorkflowState,
};
