//! Chat widget state and transitions.
//!
//! ChatState is the widget's root state type. All transitions are pure
//! functions on owned data following the Elm architecture; the impure shell
//! (`view`) performs the actual network call and feeds settled outcomes back
//! in via [`ChatState::apply_reply`] / [`ChatState::apply_failure`].

use crate::model::{Conversation, QUICK_ACTIONS};
use crate::state::DraftInput;

// ===== Visibility =====

/// Widget visibility. Sum type - exactly one state at a time.
///
/// # State Transitions
///
/// - Closed → Expanded: launcher activation; input focus is (re)acquired.
/// - Expanded ⇄ Minimized: toggle; no data loss, the conversation persists.
/// - Expanded/Minimized → Closed: close control; conversation is retained in
///   memory, so re-opening shows the prior history. Only process exit
///   discards it.
///
/// There is no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Widget not shown; only the launcher hint is rendered.
    #[default]
    Closed,
    /// Full panel: header, message list, shortcuts, input.
    Expanded,
    /// One-line bar; conversation state is kept but not shown.
    Minimized,
}

// ===== OutboundMessage =====

/// A message handed to the shell for transport, produced by a successful
/// send transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    /// Literal text to put on the wire.
    pub text: String,
}

// ===== ScrollState =====

/// Scroll state for the message list viewport.
///
/// Follows the newest message by default: while attached, any append keeps
/// the viewport at the bottom. Scrolling up detaches; scrolling back to the
/// bottom (or jumping there) re-attaches.
#[derive(Debug, Clone)]
pub struct ScrollState {
    /// Lines scrolled down from the top of the rendered list.
    pub offset: usize,
    /// Whether the viewport follows new messages.
    pub follow: bool,
    /// Largest valid offset, as last reported by the renderer.
    max: usize,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            offset: 0,
            follow: true,
            max: 0,
        }
    }
}

impl ScrollState {
    /// Scroll up, saturating at the top. Detaches from the bottom.
    pub fn scroll_up(&mut self, amount: usize) {
        self.offset = self.offset.saturating_sub(amount);
        self.follow = false;
    }

    /// Scroll down, clamped to the known maximum. Reaching the bottom
    /// re-attaches.
    pub fn scroll_down(&mut self, amount: usize) {
        self.offset = (self.offset + amount).min(self.max);
        if self.offset == self.max {
            self.follow = true;
        }
    }

    /// Jump to the bottom and follow new messages again.
    pub fn scroll_to_bottom(&mut self) {
        self.offset = self.max;
        self.follow = true;
    }

    /// Record the current maximum offset and clamp to it; pin to the bottom
    /// while following. Called by the renderer every frame with the line
    /// count it just produced.
    pub fn clamp(&mut self, max: usize) {
        self.max = max;
        if self.follow {
            self.offset = max;
        } else {
            self.offset = self.offset.min(max);
        }
    }
}

// ===== ChatState =====

/// Chat widget state. Pure data, no side effects.
///
/// # Invariants
///
/// - The conversation is never empty (seeded with the greeting).
/// - At most one request is in flight: `pending` is the capacity-one guard,
///   and [`ChatState::submit`] refuses to start a second send.
/// - Every accepted send is eventually answered by exactly one assistant
///   append ([`ChatState::apply_reply`] or [`ChatState::apply_failure`]),
///   which always clears `pending`.
/// - The draft is cleared synchronously at send time and never restored.
#[derive(Debug, Clone, Default)]
pub struct ChatState {
    conversation: Conversation,
    /// Text being composed, with cursor.
    pub draft: DraftInput,
    pending: bool,
    /// Widget visibility state machine.
    pub visibility: Visibility,
    /// Message list viewport.
    pub scroll: ScrollState,
    input_focused: bool,
}

impl ChatState {
    /// Fresh widget state: greeting-seeded conversation, empty draft, no
    /// request pending, launcher closed.
    pub fn new() -> Self {
        Self::default()
    }

    /// The conversation log.
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Whether a request is currently in flight.
    pub fn pending(&self) -> bool {
        self.pending
    }

    /// Whether the input line has focus.
    pub fn input_focused(&self) -> bool {
        self.input_focused
    }

    // ----- Visibility transitions -----

    /// Launcher activation: Closed → Expanded. Focus moves to the input.
    /// Re-opening shows the retained conversation. No-op when already open.
    pub fn open(&mut self) {
        if self.visibility == Visibility::Closed {
            self.visibility = Visibility::Expanded;
            self.input_focused = true;
        }
    }

    /// Close control: Expanded/Minimized → Closed. Conversation state is
    /// retained in memory.
    pub fn close(&mut self) {
        if self.visibility != Visibility::Closed {
            self.visibility = Visibility::Closed;
            self.input_focused = false;
        }
    }

    /// Toggle Expanded ⇄ Minimized. No-op when closed. Restoring from
    /// minimized re-acquires input focus.
    pub fn toggle_minimize(&mut self) {
        match self.visibility {
            Visibility::Expanded => {
                self.visibility = Visibility::Minimized;
                self.input_focused = false;
            }
            Visibility::Minimized => {
                self.visibility = Visibility::Expanded;
                self.input_focused = true;
            }
            Visibility::Closed => {}
        }
    }

    // ----- Send contract -----

    /// Attempt to send `text`, in strict order:
    ///
    /// 1. Guard: blank text or a pending request is a silent no-op
    ///    (intentional debouncing, not an error) - returns `None`.
    /// 2. Append a user message with the literal text.
    /// 3. Clear the draft (optimistic clear - never restored).
    /// 4. Set `pending`.
    /// 5. Hand the literal text to the shell as an [`OutboundMessage`].
    ///
    /// The shell issues exactly one request per returned message and settles
    /// it through [`ChatState::apply_reply`] or [`ChatState::apply_failure`].
    pub fn submit(&mut self, text: &str) -> Option<OutboundMessage> {
        if self.pending || text.trim().is_empty() {
            return None;
        }

        self.conversation.push_user(text);
        self.draft.clear();
        self.pending = true;

        Some(OutboundMessage {
            text: text.to_string(),
        })
    }

    /// Send the current draft, trimmed. Blank drafts are a no-op.
    pub fn send_draft(&mut self) -> Option<OutboundMessage> {
        let text = self.draft.text().trim().to_string();
        self.submit(&text)
    }

    /// Send the canned query of quick action `index` through the same path
    /// as a typed message. Out-of-range indices are a no-op.
    pub fn send_quick_action(&mut self, index: usize) -> Option<OutboundMessage> {
        let action = QUICK_ACTIONS.get(index)?;
        self.submit(action.query)
    }

    // ----- Settlement -----

    /// Apply a successful reply: append the server text verbatim as an
    /// assistant message and clear `pending`.
    pub fn apply_reply(&mut self, text: &str) {
        self.conversation.push_assistant(text);
        self.pending = false;
    }

    /// Apply a failed request: append the fixed fallback assistant message
    /// and clear `pending`. The failure cause is not surfaced here.
    pub fn apply_failure(&mut self) {
        self.conversation.push_assistant(crate::model::FALLBACK_TEXT);
        self.pending = false;
    }

    // ----- Display filters -----

    /// Quick-action shortcuts are offered only while the conversation is at
    /// most the greeting plus one exchange and nothing is pending.
    pub fn quick_actions_visible(&self) -> bool {
        self.conversation.len() <= 2 && !self.pending
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "chat_state_tests.rs"]
mod tests;
