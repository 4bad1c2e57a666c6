//! Property-based tests for workflow transitions and the depreciation
//! approver.

use proptest::prelude::*;
use uuid::Uuid;

use crate::workflow::depreciation::DepreciationApprover;
use crate::workflow::error::WorkflowError;
use crate::workflow::fixture::{FakeJournal, entry};
use crate::workflow::service::WorkflowService;
use crate::workflow::types::{ApprovalStep, DEPRECIATION_ENTRY, DocStatus, WorkflowState};
use ledgerbal_shared::types::UserId;

fn arb_state() -> impl Strategy<Value = WorkflowState> {
    prop_oneof![
        Just(WorkflowState::Draft),
        Just(WorkflowState::Approved),
        Just(WorkflowState::Submitted),
    ]
}

fn arb_user() -> impl Strategy<Value = UserId> {
    any::<u128>().prop_map(|n| UserId(Uuid::from_u128(n)))
}

fn arb_voucher_type() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just(DEPRECIATION_ENTRY), Just("Journal Entry")]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Every action the service returns is a valid transition.
    #[test]
    fn prop_service_agrees_with_transition_table(state in arb_state(), user in arb_user()) {
        for (result, target) in [
            (WorkflowService::approve(state, user), WorkflowState::Approved),
            (WorkflowService::mark_submitted(state, user), WorkflowState::Submitted),
        ] {
            match result {
                Ok(_) => prop_assert!(WorkflowService::is_valid_transition(state, target)),
                Err(WorkflowError::InvalidTransition { from, to }) => {
                    prop_assert_eq!(from, state);
                    prop_assert_eq!(to, target);
                    prop_assert!(!WorkflowService::is_valid_transition(state, target));
                }
                Err(other) => prop_assert!(false, "unexpected error {:?}", other),
            }
        }
    }

    // =========================================================================
    // Approver
    // =========================================================================

    /// A run finalizes exactly the draft depreciation entries, commits three
    /// times per entry, and leaves every other entry untouched.
    #[test]
    fn prop_run_finalizes_only_draft_depreciation(
        specs in prop::collection::vec((arb_voucher_type(), arb_state()), 0..12),
        user in arb_user(),
    ) {
        let entries: Vec<_> = specs
            .iter()
            .enumerate()
            .map(|(i, (voucher_type, state))| entry(&format!("ACC-JV-{i:04}"), voucher_type, *state))
            .collect();
        let store = FakeJournal::with_entries(entries.clone());

        let outcome = DepreciationApprover::new(&store, user).run().unwrap();
        prop_assert!(outcome.is_complete());

        let drafts = entries
            .iter()
            .filter(|e| e.voucher_type == DEPRECIATION_ENTRY && e.workflow_state == WorkflowState::Draft)
            .count();
        prop_assert_eq!(outcome.completed.len(), drafts);
        prop_assert_eq!(store.commit_count(), drafts * 3);

        for before in &entries {
            let after = store.committed(&before.name);
            if before.voucher_type == DEPRECIATION_ENTRY && before.workflow_state == WorkflowState::Draft {
                prop_assert_eq!(after.workflow_state, WorkflowState::Submitted);
                prop_assert_eq!(after.docstatus, DocStatus::Submitted);
                prop_assert_eq!(&after.user_remark, &before.remark);
            } else {
                prop_assert_eq!(&after, before);
            }
        }
    }

    /// A failing commit leaves the entry at the step before the failure.
    #[test]
    fn prop_failure_leaves_last_committed_step(fail_at in 0usize..3) {
        let mut store = FakeJournal::with_entries(vec![entry("ACC-JV-0001", DEPRECIATION_ENTRY, WorkflowState::Draft)]);
        store.fail_commit_at = Some(fail_at);

        let err = DepreciationApprover::new(&store, UserId::new())
            .run()
            .unwrap()
            .into_result()
            .unwrap_err();

        let WorkflowError::StepFailed { step, last_committed, .. } = err else {
            return Err(TestCaseError::fail("expected StepFailed"));
        };
        prop_assert_eq!(step, ApprovalStep::ALL[fail_at]);
        prop_assert_eq!(last_committed, step.previous());

        let after = store.committed("ACC-JV-0001");
        let expected_state = match last_committed {
            None => WorkflowState::Draft,
            Some(ApprovalStep::Approve) => WorkflowState::Approved,
            Some(_) => WorkflowState::Submitted,
        };
        prop_assert_eq!(after.workflow_state, expected_state);
        prop_assert_eq!(after.docstatus, DocStatus::Draft);
    }
}
