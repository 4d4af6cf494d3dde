//! Property-based tests over the pure chat state core.
//!
//! Drives [`ChatState`] with arbitrary operation sequences and checks the
//! structural invariants that every sequence must preserve:
//!
//! - the conversation is never empty,
//! - at most one request is ever in flight,
//! - every accepted send pairs with exactly one assistant append,
//! - the quick-action display rule holds after every transition.

use crate::state::ChatState;
use proptest::prelude::*;

/// One externally-triggerable operation on the widget.
#[derive(Debug, Clone)]
enum Op {
    Submit(String),
    QuickAction(usize),
    Reply(String),
    Fail,
    Open,
    Close,
    ToggleMinimize,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        // Mix of blank, whitespace-only, and real text.
        prop_oneof![
            Just(String::new()),
            Just("   ".to_string()),
            "[a-zA-Z0-9 ?]{1,30}".prop_map(String::from),
        ]
        .prop_map(Op::Submit),
        (0usize..6).prop_map(Op::QuickAction),
        "[a-zA-Z0-9 .]{0,40}".prop_map(Op::Reply),
        Just(Op::Fail),
        Just(Op::Open),
        Just(Op::Close),
        Just(Op::ToggleMinimize),
    ]
}

proptest! {
    #[test]
    fn arbitrary_sequences_preserve_core_invariants(
        ops in prop::collection::vec(arb_op(), 0..60)
    ) {
        let mut state = ChatState::new();
        // Requests accepted but not yet settled. Never exceeds one.
        let mut in_flight = 0usize;
        let mut accepted_sends = 0usize;
        let mut settlements = 0usize;

        for op in ops {
            match op {
                Op::Submit(text) => {
                    let was_pending = state.pending();
                    let outbound = state.submit(&text);
                    if was_pending || text.trim().is_empty() {
                        prop_assert!(outbound.is_none(), "guarded send must be refused");
                    } else {
                        prop_assert!(outbound.is_some(), "unguarded send must be accepted");
                        in_flight += 1;
                        accepted_sends += 1;
                    }
                }
                Op::QuickAction(index) => {
                    let was_pending = state.pending();
                    let outbound = state.send_quick_action(index);
                    if outbound.is_some() {
                        prop_assert!(!was_pending);
                        in_flight += 1;
                        accepted_sends += 1;
                    }
                }
                Op::Reply(text) => {
                    // The shell only settles while a request is in flight.
                    if state.pending() {
                        state.apply_reply(&text);
                        in_flight -= 1;
                        settlements += 1;
                    }
                }
                Op::Fail => {
                    if state.pending() {
                        state.apply_failure();
                        in_flight -= 1;
                        settlements += 1;
                    }
                }
                Op::Open => state.open(),
                Op::Close => state.close(),
                Op::ToggleMinimize => state.toggle_minimize(),
            }

            // Invariants checked after every single transition.
            prop_assert!(state.conversation().len() >= 1, "never empty");
            prop_assert!(in_flight <= 1, "at most one request in flight");
            prop_assert_eq!(state.pending(), in_flight == 1);
            prop_assert_eq!(
                state.quick_actions_visible(),
                state.conversation().len() <= 2 && !state.pending()
            );
        }

        // Pairing: greeting + one assistant append per settlement; one user
        // message per accepted send; unsettled sends have no pair yet.
        let user_count = state
            .conversation()
            .messages()
            .iter()
            .filter(|m| m.role == crate::model::Role::User)
            .count();
        let assistant_count = state.conversation().len() - user_count;

        prop_assert_eq!(user_count, accepted_sends);
        prop_assert_eq!(assistant_count, 1 + settlements);
        prop_assert_eq!(accepted_sends, settlements + in_flight);
    }

    #[test]
    fn visibility_transitions_never_touch_the_conversation(
        ops in prop::collection::vec(
            prop_oneof![Just(Op::Open), Just(Op::Close), Just(Op::ToggleMinimize)],
            0..40
        )
    ) {
        let mut state = ChatState::new();
        state.submit("hello");
        state.apply_reply("hi");
        let before: Vec<String> = state
            .conversation()
            .messages()
            .iter()
            .map(|m| m.content.clone())
            .collect();

        for op in ops {
            match op {
                Op::Open => state.open(),
                Op::Close => state.close(),
                Op::ToggleMinimize => state.toggle_minimize(),
                _ => unreachable!(),
            }
        }

        let after: Vec<String> = state
            .conversation()
            .messages()
            .iter()
            .map(|m| m.content.clone())
            .collect();
        prop_assert_eq!(before, after);
    }
}
