//! Property-based tests for decision-log store invariants.

use proptest::prelude::*;
use resolve::entity::{DecisionLogUpdate, KeyFactor, LogId, LogStatus, NewDecisionLog};
use resolve::storage::{decode_logs, DecisionLogStore, MemorySlot, DEFAULT_SLOT_KEY, FREE_TIER_LIMIT};
use resolve::StoreError;

fn status_strategy() -> impl Strategy<Value = LogStatus> {
    prop_oneof![
        Just(LogStatus::Pending),
        Just(LogStatus::DecisionMade),
        Just(LogStatus::ReviewingOutcome),
    ]
}

fn factors_strategy() -> impl Strategy<Value = Vec<KeyFactor>> {
    prop::collection::vec(prop::sample::select(KeyFactor::ALL.to_vec()), 1..5)
}

fn input_strategy() -> impl Strategy<Value = NewDecisionLog> {
    (
        "[A-Za-z][A-Za-z ]{0,20}",
        prop::collection::vec("[a-z]{1,10}", 0..3),
        prop::collection::vec("[a-z]{1,10}", 0..3),
        0u8..=100,
        factors_strategy(),
        status_strategy(),
    )
        .prop_map(|(title, pros, cons, gut_feeling, key_factors, status)| NewDecisionLog {
            title,
            pros,
            cons,
            gut_feeling,
            key_factors,
            status,
            reflection: None,
            outcome: None,
        })
}

proptest! {
    #[test]
    fn active_count_tracks_non_reviewed_logs(inputs in prop::collection::vec(input_strategy(), 0..12)) {
        let mut store = DecisionLogStore::open(MemorySlot::new());

        for input in inputs {
            let before = store.logs().to_vec();
            let was_full = store.active_count() >= FREE_TIER_LIMIT;

            match store.create(input) {
                Ok(_) => prop_assert!(!was_full),
                Err(err) => {
                    prop_assert!(was_full);
                    prop_assert_eq!(err, StoreError::QuotaExceeded { limit: FREE_TIER_LIMIT });
                    prop_assert_eq!(store.logs(), before.as_slice());
                }
            }

            let expected = store
                .logs()
                .iter()
                .filter(|log| log.status != LogStatus::ReviewingOutcome)
                .count();
            prop_assert_eq!(store.active_count(), expected);
            prop_assert!(store.active_count() <= FREE_TIER_LIMIT);
        }
    }

    #[test]
    fn slot_always_mirrors_memory(inputs in prop::collection::vec(input_strategy(), 1..8)) {
        let slot = MemorySlot::new();
        let mut store = DecisionLogStore::open(slot.clone());

        for input in inputs {
            let _ = store.create(input);
            let raw = slot.get_raw(DEFAULT_SLOT_KEY).unwrap();
            prop_assert_eq!(decode_logs(&raw).unwrap(), store.logs().to_vec());
        }

        let reopened = DecisionLogStore::open(slot);
        prop_assert_eq!(reopened.logs(), store.logs());
        prop_assert!(reopened.load_error().is_none());
    }

    #[test]
    fn unknown_ids_never_write(id in "[a-z0-9-]{1,36}", inputs in prop::collection::vec(input_strategy(), 0..3)) {
        let slot = MemorySlot::new();
        let mut store = DecisionLogStore::open(slot.clone());
        for input in inputs {
            store.create(input).unwrap();
        }
        let writes = slot.write_count();
        let before = store.logs().to_vec();

        let id = LogId::from(format!("missing-{}", id));
        store.update(&id, DecisionLogUpdate::status(LogStatus::DecisionMade)).unwrap();
        store.delete(&id).unwrap();

        prop_assert_eq!(slot.write_count(), writes);
        prop_assert_eq!(store.logs(), before.as_slice());
    }

    #[test]
    fn reviewed_logs_never_block_creation(reviewed in 0usize..10) {
        let mut store = DecisionLogStore::open(MemorySlot::new());

        for i in 0..reviewed {
            let mut input = NewDecisionLog::new(format!("Reviewed {}", i), vec![KeyFactor::Health]);
            input.status = LogStatus::ReviewingOutcome;
            store.create(input).unwrap();
        }

        for i in 0..FREE_TIER_LIMIT {
            store
                .create(NewDecisionLog::new(format!("Active {}", i), vec![KeyFactor::Career]))
                .unwrap();
        }
        prop_assert!(store.is_quota_reached());
        prop_assert_eq!(store.len(), reviewed + FREE_TIER_LIMIT);
    }
}
