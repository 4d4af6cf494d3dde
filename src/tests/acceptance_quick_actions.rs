//! Acceptance tests for quick-action shortcuts.
//!
//! Shortcuts are canned queries offered at the start of a conversation; each
//! one sends through exactly the same path as a typed message.

use crate::model::QUICK_ACTIONS;
use crate::test_harness::AcceptanceTestHarness;
use crate::transport::fakes::FixedReplyTransport;
use crossterm::event::KeyCode;
use std::sync::Arc;

#[test]
fn shortcuts_render_while_the_conversation_is_fresh() {
    let mut harness = AcceptanceTestHarness::new(Arc::new(FixedReplyTransport::new("ok")));
    harness.send_key(KeyCode::Char('c'));

    let screen = harness.render();
    for (i, action) in QUICK_ACTIONS.iter().enumerate() {
        assert!(
            screen.contains(&format!("F{} {}", i + 1, action.label)),
            "shortcut {} visible:\n{screen}",
            action.label
        );
    }
}

#[test]
fn function_key_sends_the_canned_query() {
    let transport = Arc::new(FixedReplyTransport::new("Nassau and Freeport."));
    let mut harness = AcceptanceTestHarness::new(transport.clone());

    harness.send_key(KeyCode::Char('c'));
    harness.send_key(KeyCode::F(1));
    harness.settle();

    let conv = harness.chat().conversation();
    assert_eq!(conv.messages()[1].content, QUICK_ACTIONS[0].query);
    assert_eq!(conv.last().content, "Nassau and Freeport.");
    assert_eq!(
        *transport.sent.lock().expect("sent lock"),
        vec![QUICK_ACTIONS[0].query.to_string()]
    );
}

#[test]
fn shortcuts_disappear_once_the_conversation_grows() {
    let mut harness = AcceptanceTestHarness::new(Arc::new(FixedReplyTransport::new("ok")));
    harness.send_key(KeyCode::Char('c'));

    harness.send_key(KeyCode::F(2));
    harness.settle();

    // Greeting + question + reply: past the freshness threshold.
    assert!(!harness.chat().quick_actions_visible());
    let screen = harness.render();
    assert!(
        !screen.contains(&format!("F1 {}", QUICK_ACTIONS[0].label)),
        "{screen}"
    );
}

#[test]
fn function_key_while_pending_is_ignored() {
    let mut harness = AcceptanceTestHarness::new(Arc::new(FixedReplyTransport::new("ok")));
    harness.send_key(KeyCode::Char('c'));

    harness.send_key(KeyCode::F(1));
    // Still pending: shortcuts are hidden, so the key must do nothing.
    harness.send_key(KeyCode::F(2));

    assert_eq!(harness.chat().conversation().len(), 2, "only the first sent");
    harness.settle();
    assert_eq!(harness.chat().conversation().len(), 3);
}
