//! Property-based tests for the tutorial state machine.

use proptest::prelude::*;

use super::state::TutorialState;
use super::types::TutorialStep;

#[derive(Debug, Clone, Copy)]
enum Event {
    Arrive(TutorialStep),
    Settle(TutorialStep),
    Leave,
}

fn step_strategy() -> impl Strategy<Value = TutorialStep> {
    prop::sample::select(TutorialStep::ALL.to_vec())
}

fn event_strategy() -> impl Strategy<Value = Event> {
    prop_oneof![
        step_strategy().prop_map(Event::Arrive),
        step_strategy().prop_map(Event::Settle),
        Just(Event::Leave),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Once completed, a step stays completed for any event sequence.
    #[test]
    fn prop_completion_is_monotonic(events in prop::collection::vec(event_strategy(), 0..60)) {
        let mut state = TutorialState::new();
        let mut seen_completed: Vec<TutorialStep> = Vec::new();

        for event in events {
            match event {
                Event::Arrive(step) => { state.arrive_at(step); }
                Event::Settle(step) => { state.settle(step); }
                Event::Leave => state.leave(),
            }
            for step in &seen_completed {
                prop_assert!(state.is_completed(*step));
            }
            seen_completed = state.completed().collect();
        }
    }

    /// A completed step is never the active step.
    #[test]
    fn prop_active_never_completed(events in prop::collection::vec(event_strategy(), 0..60)) {
        let mut state = TutorialState::new();
        for event in events {
            match event {
                Event::Arrive(step) => { state.arrive_at(step); }
                Event::Settle(step) => { state.settle(step); }
                Event::Leave => state.leave(),
            }
            if let Some(active) = state.active() {
                prop_assert!(!state.is_completed(active));
            }
        }
    }

    /// Only the active step can settle.
    #[test]
    fn prop_only_active_step_settles(
        arrived in step_strategy(),
        settled in step_strategy(),
    ) {
        let mut state = TutorialState::new();
        state.arrive_at(arrived);
        let completed = state.settle(settled);
        prop_assert_eq!(completed, arrived == settled);
    }
}
