//! Batch approval of draft depreciation journal entries.
//!
//! Each entry is driven through three independently committed steps:
//! approve, mark submitted, and finalize. There is no rollback. A failure
//! leaves the entry at its last committed step and aborts the batch.

use serde::Serialize;
use tracing::{error, info, instrument};

use crate::store::JournalEntryStore;
use crate::workflow::error::WorkflowError;
use crate::workflow::service::WorkflowService;
use crate::workflow::types::{ApprovalStep, DEPRECIATION_ENTRY, JournalEntry, WorkflowState};
use ledgerbal_shared::types::{BatchRunId, UserId};

/// Steps completed for one journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryOutcome {
    /// Journal entry name.
    pub entry: String,
    /// Steps committed during this run, in order.
    pub steps: Vec<ApprovalStep>,
}

/// Result of one approver run.
#[derive(Debug)]
pub struct BatchOutcome {
    /// Identifier of the run, attached to every log line.
    pub run_id: BatchRunId,
    /// Entries that reached the final step.
    pub completed: Vec<EntryOutcome>,
    /// The failure that aborted the batch, if any.
    pub failure: Option<WorkflowError>,
}

impl BatchOutcome {
    fn new(run_id: BatchRunId) -> Self {
        Self {
            run_id,
            completed: Vec::new(),
            failure: None,
        }
    }

    /// Returns true if every selected entry was fully processed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }

    /// Converts the outcome into the completed entries or the abort error.
    pub fn into_result(self) -> Result<Vec<EntryOutcome>, WorkflowError> {
        match self.failure {
            Some(err) => Err(err),
            None => Ok(self.completed),
        }
    }
}

/// Drives depreciation entries through the approval workflow.
pub struct DepreciationApprover<'a> {
    store: &'a dyn JournalEntryStore,
    actor: UserId,
}

impl<'a> DepreciationApprover<'a> {
    /// Creates an approver acting as `actor`.
    #[must_use]
    pub fn new(store: &'a dyn JournalEntryStore, actor: UserId) -> Self {
        Self { store, actor }
    }

    /// Approves, submits, and finalizes every draft depreciation entry.
    ///
    /// Fails only if the draft entries cannot be listed; a per-entry failure
    /// is reported in [`BatchOutcome::failure`].
    #[instrument(skip(self), fields(actor = %self.actor))]
    pub fn run(&self) -> Result<BatchOutcome, WorkflowError> {
        let names = self
            .store
            .find_journal_entries(DEPRECIATION_ENTRY, WorkflowState::Draft)?;
        let pending = names
            .into_iter()
            .map(|name| (name, ApprovalStep::Approve))
            .collect();
        Ok(self.process_batch(pending))
    }

    /// Drives entries a previous run left behind to the final step.
    ///
    /// Approved entries resume at mark submitted; Submitted entries whose
    /// document is still a draft resume at finalize.
    #[instrument(skip(self), fields(actor = %self.actor))]
    pub fn resume_stuck(&self) -> Result<BatchOutcome, WorkflowError> {
        let mut pending: Vec<(String, ApprovalStep)> = self
            .store
            .find_journal_entries(DEPRECIATION_ENTRY, WorkflowState::Approved)?
            .into_iter()
            .map(|name| (name, ApprovalStep::MarkSubmitted))
            .collect();

        for name in self
            .store
            .find_journal_entries(DEPRECIATION_ENTRY, WorkflowState::Submitted)?
        {
            if self.store.load_journal_entry(&name)?.is_awaiting_finalization() {
                pending.push((name, ApprovalStep::Finalize));
            }
        }

        Ok(self.process_batch(pending))
    }

    fn process_batch(&self, pending: Vec<(String, ApprovalStep)>) -> BatchOutcome {
        let mut batch = BatchOutcome::new(BatchRunId::new());
        info!(run_id = %batch.run_id, entries = pending.len(), "Depreciation approval started");

        for (name, first) in pending {
            match self.process(&name, first) {
                Ok(outcome) => batch.completed.push(outcome),
                Err(err) => {
                    error!(run_id = %batch.run_id, entry = %name, error = %err, "Depreciation approval aborted");
                    batch.failure = Some(err);
                    break;
                }
            }
        }

        info!(
            run_id = %batch.run_id,
            completed = batch.completed.len(),
            aborted = batch.failure.is_some(),
            "Depreciation approval finished"
        );
        batch
    }

    fn process(&self, name: &str, first: ApprovalStep) -> Result<EntryOutcome, WorkflowError> {
        let mut last_committed = first.previous();
        let failed = |step, last_committed, source| WorkflowError::StepFailed {
            entry: name.to_string(),
            step,
            last_committed,
            source: Box::new(source),
        };

        let mut entry = self
            .store
            .load_journal_entry(name)
            .map_err(|err| failed(first, last_committed, err.into()))?;
        if first == ApprovalStep::Approve {
            entry.user_remark.clone_from(&entry.remark);
        }

        let mut steps = Vec::with_capacity(first.remaining().len());
        for &step in first.remaining() {
            self.advance(&mut entry, step)
                .map_err(|err| failed(step, last_committed, err))?;
            last_committed = Some(step);
            steps.push(step);
        }

        Ok(EntryOutcome {
            entry: name.to_string(),
            steps,
        })
    }

    fn advance(&self, entry: &mut JournalEntry, step: ApprovalStep) -> Result<(), WorkflowError> {
        let action = match step {
            ApprovalStep::Approve => WorkflowService::approve(entry.workflow_state, self.actor)?,
            ApprovalStep::MarkSubmitted => {
                WorkflowService::mark_submitted(entry.workflow_state, self.actor)?
            }
            ApprovalStep::Finalize => WorkflowService::finalize(entry, self.actor)?,
        };
        action.apply(entry);

        if action.step() == ApprovalStep::Finalize {
            self.store.submit_journal_entry(entry)?;
        } else {
            self.store.save_journal_entry(entry)?;
        }
        self.store.commit()?;

        info!(
            entry = %entry.name,
            step = %step,
            workflow_state = %entry.workflow_state,
            docstatus = %entry.docstatus,
            "Depreciation entry advanced"
        );
        Ok(())
    }
}
