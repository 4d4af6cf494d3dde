//! Typing indicator for the widget header.
//!
//! Shows that a request is in flight:
//! - nothing when idle
//! - blinking "typing..." while awaiting the server's reply

use ratatui::{
    style::{Color, Style},
    text::Span,
};

/// Indicator text shown while a request is pending.
const TYPING_TEXT: &str = "typing...";

/// Pure, stateless indicator widget.
///
/// `blink_on` is managed externally by the event loop's timer, keeping state
/// management separate from rendering.
#[derive(Debug, Clone, Copy)]
pub struct TypingIndicator {
    pending: bool,
    blink_on: bool,
}

impl TypingIndicator {
    /// Create an indicator for the given pending and blink state.
    pub fn new(pending: bool, blink_on: bool) -> Self {
        Self { pending, blink_on }
    }

    /// Render the indicator as a ratatui Span.
    ///
    /// - idle → empty
    /// - pending, blink ON → yellow "typing..."
    /// - pending, blink OFF → blank placeholder of the same width, so the
    ///   header does not jitter
    pub fn render(&self) -> Span<'static> {
        if !self.pending {
            return Span::raw("");
        }
        if self.blink_on {
            Span::styled(TYPING_TEXT, Style::default().fg(Color::Yellow))
        } else {
            Span::raw(" ".repeat(TYPING_TEXT.len()))
        }
    }
}

// ===== Tests =====
