//! Workflow domain types for journal-entry approval.
//!
//! A journal entry carries two independent states: the workflow state
//! driven by approvers and the document status that marks it as finally
//! submitted to the ledger.

use chrono::{DateTime, NaiveDate, Utc};
use ledgerbal_shared::types::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Voucher type of journal entries booked by asset depreciation.
pub const DEPRECIATION_ENTRY: &str = "Depreciation Entry";

/// Approval workflow state of a journal entry.
///
/// The valid transitions are:
/// - Draft → Approved (approve)
/// - Approved → Submitted (mark submitted)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkflowState {
    /// Entry awaits approval.
    Draft,
    /// Entry has been approved.
    Approved,
    /// Entry has been sent for submission.
    Submitted,
}

impl WorkflowState {
    /// Returns the string representation of the state.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Approved => "Approved",
            Self::Submitted => "Submitted",
        }
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Document status of a journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DocStatus {
    /// Editable, not yet booked.
    #[default]
    Draft,
    /// Booked to the ledger.
    Submitted,
    /// Booking reversed.
    Cancelled,
}

impl DocStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Submitted => "Submitted",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for DocStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A journal entry as seen by the approval workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Entry identifier.
    pub name: String,
    /// Owning company.
    #[serde(default)]
    pub company: String,
    /// Voucher type, e.g. [`DEPRECIATION_ENTRY`].
    pub voucher_type: String,
    /// Posting date.
    #[serde(default)]
    pub posting_date: Option<NaiveDate>,
    /// Approval workflow state.
    pub workflow_state: WorkflowState,
    /// Document status.
    #[serde(default)]
    pub docstatus: DocStatus,
    /// System-generated remark.
    #[serde(default)]
    pub remark: Option<String>,
    /// Remark shown to users.
    #[serde(default)]
    pub user_remark: Option<String>,
}

impl JournalEntry {
    /// Returns true if the entry is approved for submission but not yet
    /// booked.
    #[must_use]
    pub fn is_awaiting_finalization(&self) -> bool {
        self.workflow_state == WorkflowState::Submitted && self.docstatus == DocStatus::Draft
    }
}

/// One step of the depreciation approval sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStep {
    /// Draft → Approved.
    Approve,
    /// Approved → Submitted.
    MarkSubmitted,
    /// Document status Draft → Submitted.
    Finalize,
}

impl ApprovalStep {
    /// All steps in execution order.
    pub const ALL: [Self; 3] = [Self::Approve, Self::MarkSubmitted, Self::Finalize];

    /// Returns the string representation of the step.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::MarkSubmitted => "mark_submitted",
            Self::Finalize => "finalize",
        }
    }

    /// Returns the step committed before this one, if any.
    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::Approve => None,
            Self::MarkSubmitted => Some(Self::Approve),
            Self::Finalize => Some(Self::MarkSubmitted),
        }
    }

    /// Returns the steps from `self` to the end of the sequence.
    #[must_use]
    pub fn remaining(self) -> &'static [Self] {
        match self {
            Self::Approve => &Self::ALL,
            Self::MarkSubmitted => &Self::ALL[1..],
            Self::Finalize => &Self::ALL[2..],
        }
    }
}

impl fmt::Display for ApprovalStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Workflow action representing a transition with audit data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowAction {
    /// Approve a draft entry.
    Approve {
        /// The new workflow state.
        new_state: WorkflowState,
        /// The user who approved the entry.
        approved_by: UserId,
        /// When the entry was approved.
        approved_at: DateTime<Utc>,
    },
    /// Mark an approved entry as submitted.
    MarkSubmitted {
        /// The new workflow state.
        new_state: WorkflowState,
        /// The user who submitted the entry.
        submitted_by: UserId,
        /// When the entry was submitted.
        submitted_at: DateTime<Utc>,
    },
    /// Book a submitted entry.
    Finalize {
        /// The new document status.
        new_docstatus: DocStatus,
        /// The user who booked the entry.
        finalized_by: UserId,
        /// When the entry was booked.
        finalized_at: DateTime<Utc>,
    },
}

impl WorkflowAction {
    /// Returns the step this action performs.
    #[must_use]
    pub const fn step(&self) -> ApprovalStep {
        match self {
            Self::Approve { .. } => ApprovalStep::Approve,
            Self::MarkSubmitted { .. } => ApprovalStep::MarkSubmitted,
            Self::Finalize { .. } => ApprovalStep::Finalize,
        }
    }

    /// Applies the action's new state to an entry.
    pub fn apply(&self, entry: &mut JournalEntry) {
        match self {
            Self::Approve { new_state, .. } | Self::MarkSubmitted { new_state, .. } => {
                entry.workflow_state = *new_state;
            }
            Self::Finalize { new_docstatus, .. } => entry.docstatus = *new_docstatus,
        }
    }
}
