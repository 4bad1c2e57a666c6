//! Workflow error types for journal-entry approval.

use thiserror::Error;

use crate::store::StoreError;
use crate::workflow::types::{ApprovalStep, DocStatus, WorkflowState};
use ledgerbal_shared::AppError;

/// Errors that can occur during workflow operations.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Attempted an invalid workflow state transition.
    #[error("Invalid workflow transition from {from} to {to}")]
    InvalidTransition {
        /// The current state.
        from: WorkflowState,
        /// The attempted target state.
        to: WorkflowState,
    },

    /// Attempted to book an entry that is not awaiting finalization.
    #[error("Cannot finalize entry in state {state} with document status {docstatus}")]
    NotFinalizable {
        /// The current workflow state.
        state: WorkflowState,
        /// The current document status.
        docstatus: DocStatus,
    },

    /// Journal entry not found.
    #[error("Journal entry {0} not found")]
    EntryNotFound(String),

    /// A batch step failed; earlier steps of the entry stay committed.
    #[error("Step {step} failed for journal entry {entry}: {source}")]
    StepFailed {
        /// The entry being processed.
        entry: String,
        /// The step that failed.
        step: ApprovalStep,
        /// The last step durably committed for the entry.
        last_committed: Option<ApprovalStep>,
        /// The underlying failure.
        #[source]
        source: Box<WorkflowError>,
    },

    /// Store error.
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for WorkflowError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { name, .. } => Self::EntryNotFound(name),
            other => Self::Store(other),
        }
    }
}

impl WorkflowError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::InvalidTransition { .. } | Self::NotFinalizable { .. } => 409,
            Self::EntryNotFound(_) => 404,
            Self::StepFailed { source, .. } => source.http_status_code(),
            Self::Store(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::NotFinalizable { .. } => "NOT_FINALIZABLE",
            Self::EntryNotFound(_) => "ENTRY_NOT_FOUND",
            Self::StepFailed { .. } => "STEP_FAILED",
            Self::Store(_) => "STORE_ERROR",
        }
    }
}

impl From<WorkflowError> for AppError {
    fn from(err: WorkflowError) -> Self {
        let message = err.to_string();
        match err {
            WorkflowError::InvalidTransition { .. } | WorkflowError::NotFinalizable { .. } => {
                Self::Conflict(message)
            }
            WorkflowError::EntryNotFound(_) => Self::NotFound(message),
            WorkflowError::StepFailed { source, .. } => match Self::from(*source) {
                Self::Conflict(_) => Self::Conflict(message),
                Self::NotFound(_) => Self::NotFound(message),
                _ => Self::Store(message),
            },
            WorkflowError::Store(_) => Self::Store(message),
        }
    }
}
