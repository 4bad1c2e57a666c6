//! Workflow service for journal-entry state transitions.
//!
//! Validates the three transitions the depreciation approver drives and
//! returns the matching `WorkflowAction` with audit data.

use chrono::Utc;
use ledgerbal_shared::types::UserId;

use crate::workflow::error::WorkflowError;
use crate::workflow::types::{DocStatus, JournalEntry, WorkflowAction, WorkflowState};

/// Stateless service for managing journal-entry workflow transitions.
pub struct WorkflowService;

impl WorkflowService {
    /// Approve a draft entry.
    ///
    /// # Returns
    /// * `Ok(WorkflowAction::Approve)` if the entry is in Draft
    /// * `Err(WorkflowError::InvalidTransition)` otherwise
    pub fn approve(
        current_state: WorkflowState,
        approved_by: UserId,
    ) -> Result<WorkflowAction, WorkflowError> {
        let new_state = Self::transition(current_state, WorkflowState::Approved)?;
        Ok(WorkflowAction::Approve {
            new_state,
            approved_by,
            approved_at: Utc::now(),
        })
    }

    /// Mark an approved entry as submitted.
    ///
    /// # Returns
    /// * `Ok(WorkflowAction::MarkSubmitted)` if the entry is Approved
    /// * `Err(WorkflowError::InvalidTransition)` otherwise
    pub fn mark_submitted(
        current_state: WorkflowState,
        submitted_by: UserId,
    ) -> Result<WorkflowAction, WorkflowError> {
        let new_state = Self::transition(current_state, WorkflowState::Submitted)?;
        Ok(WorkflowAction::MarkSubmitted {
            new_state,
            submitted_by,
            submitted_at: Utc::now(),
        })
    }

    /// Book a submitted entry whose document is still a draft.
    ///
    /// # Returns
    /// * `Ok(WorkflowAction::Finalize)` if the entry is awaiting finalization
    /// * `Err(WorkflowError::NotFinalizable)` otherwise
    pub fn finalize(
        entry: &JournalEntry,
        finalized_by: UserId,
    ) -> Result<WorkflowAction, WorkflowError> {
        if !entry.is_awaiting_finalization() {
            return Err(WorkflowError::NotFinalizable {
                state: entry.workflow_state,
                docstatus: entry.docstatus,
            });
        }
        Ok(WorkflowAction::Finalize {
            new_docstatus: DocStatus::Submitted,
            finalized_by,
            finalized_at: Utc::now(),
        })
    }

    /// Check if a workflow state transition is valid.
    ///
    /// Valid transitions:
    /// - Draft → Approved (approve)
    /// - Approved → Submitted (mark submitted)
    #[must_use]
    pub fn is_valid_transition(from: WorkflowState, to: WorkflowState) -> bool {
        matches!(
            (from, to),
            (WorkflowState::Draft, WorkflowState::Approved)
                | (WorkflowState::Approved, WorkflowState::Submitted)
        )
    }

    fn transition(from: WorkflowState, to: WorkflowState) -> Result<WorkflowState, WorkflowError> {
        if Self::is_valid_transition(from, to) {
            Ok(to)
        } else {
            Err(WorkflowError::InvalidTransition { from, to })
        }
    }
}
