//! In-crate journal-entry store for approver tests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::store::{JournalEntryStore, StoreError};
use crate::workflow::types::{DEPRECIATION_ENTRY, DocStatus, JournalEntry, WorkflowState};

/// Journal store with staged writes and an optional commit failure.
#[derive(Default)]
pub struct FakeJournal {
    committed: Mutex<BTreeMap<String, JournalEntry>>,
    staged: Mutex<BTreeMap<String, JournalEntry>>,
    commits: Mutex<usize>,
    /// Zero-based index of the commit call that fails.
    pub fail_commit_at: Option<usize>,
}

impl FakeJournal {
    pub fn with_entries(entries: Vec<JournalEntry>) -> Self {
        Self {
            committed: Mutex::new(entries.into_iter().map(|e| (e.name.clone(), e)).collect()),
            ..Self::default()
        }
    }

    pub fn committed(&self, name: &str) -> JournalEntry {
        self.committed.lock().unwrap()[name].clone()
    }

    pub fn commit_count(&self) -> usize {
        *self.commits.lock().unwrap()
    }
}

pub fn entry(name: &str, voucher_type: &str, state: WorkflowState) -> JournalEntry {
    JournalEntry {
        name: name.to_string(),
        company: "TestCo".to_string(),
        voucher_type: voucher_type.to_string(),
        posting_date: None,
        workflow_state: state,
        docstatus: DocStatus::Draft,
        remark: Some(format!("Depreciation posted by {name}")),
        user_remark: None,
    }
}

pub fn depreciation(name: &str, state: WorkflowState) -> JournalEntry {
    entry(name, DEPRECIATION_ENTRY, state)
}

impl JournalEntryStore for FakeJournal {
    fn find_journal_entries(
        &self,
        voucher_type: &str,
        state: WorkflowState,
    ) -> Result<Vec<String>, StoreError> {
        Ok(self
            .committed
            .lock()
            .unwrap()
            .values()
            .filter(|e| e.voucher_type == voucher_type && e.workflow_state == state)
            .map(|e| e.name.clone())
            .collect())
    }

    fn load_journal_entry(&self, name: &str) -> Result<JournalEntry, StoreError> {
        self.committed
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Journal Entry", name))
    }

    fn save_journal_entry(&self, entry: &JournalEntry) -> Result<(), StoreError> {
        self.staged
            .lock()
            .unwrap()
            .insert(entry.name.clone(), entry.clone());
        Ok(())
    }

    fn submit_journal_entry(&self, entry: &JournalEntry) -> Result<(), StoreError> {
        self.save_journal_entry(entry)
    }

    fn commit(&self) -> Result<(), StoreError> {
        let mut commits = self.commits.lock().unwrap();
        let index = *commits;
        *commits += 1;
        if self.fail_commit_at == Some(index) {
            self.staged.lock().unwrap().clear();
            return Err(StoreError::Unavailable("commit rejected".to_string()));
        }
        let staged = std::mem::take(&mut *self.staged.lock().unwrap());
        self.committed.lock().unwrap().extend(staged);
        Ok(())
    }
}
