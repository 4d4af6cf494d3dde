//! Acceptance test harness for TUI testing.
//!
//! Wraps `TuiApp<TestBackend>` with a high-level API for simulating user
//! interactions: keystrokes, typed text, and frame rendering, plus blocking
//! settlement of in-flight chat requests so tests stay deterministic.

use crate::session::{Session, UserIdentity};
use crate::state::ChatState;
use crate::transport::ChatTransport;
use crate::view::TuiApp;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::sync::Arc;

/// Convert a ratatui buffer to a string representation.
///
/// Captures the visual output character by character, preserving layout.
/// Empty trailing content is trimmed to keep assertions readable.
fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            let cell = &buffer[(x, y)];
            line.push_str(cell.symbol());
        }
        let trimmed = line.trim_end();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines.join("\n")
}

/// A stand-in authenticated identity for tests.
pub fn test_session() -> Session {
    Session::new(
        UserIdentity {
            id: "u-test".to_string(),
            email: "broker@example.bs".to_string(),
            name: "Test Broker".to_string(),
            role: Some("user".to_string()),
        },
        "test-token",
    )
}

/// Test harness for acceptance testing.
pub struct AcceptanceTestHarness {
    app: TuiApp<TestBackend>,
}

impl AcceptanceTestHarness {
    /// Build a harness with a session at the default terminal size (80x24).
    pub fn new(transport: Arc<dyn ChatTransport>) -> Self {
        Self::with_session(Some(test_session()), transport)
    }

    /// Build a harness with an explicit session (or none, for gating tests).
    pub fn with_session(session: Option<Session>, transport: Arc<dyn ChatTransport>) -> Self {
        let backend = TestBackend::new(80, 24);
        let terminal = Terminal::new(backend).expect("test terminal");
        let app = TuiApp::new_for_test(terminal, session, transport);
        Self { app }
    }

    /// Send a single key event with no modifiers.
    pub fn send_key(&mut self, key: KeyCode) {
        self.send_key_with_mods(key, KeyModifiers::NONE);
    }

    /// Send a key event with modifiers. Returns whether the app would quit.
    pub fn send_key_with_mods(&mut self, key: KeyCode, mods: KeyModifiers) -> bool {
        self.app.handle_key(KeyEvent::new(key, mods))
    }

    /// Type a string into the widget, one character at a time.
    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.send_key(KeyCode::Char(ch));
        }
    }

    /// Block until the in-flight request (if any) settles and apply it.
    pub fn settle(&mut self) {
        self.app.settle_pending();
    }

    /// Render one frame and return the buffer as a string.
    pub fn render(&mut self) -> String {
        self.app.draw().expect("test draw");
        buffer_to_string(self.app.terminal().backend().buffer())
    }

    /// Read access to the widget state for assertions.
    pub fn chat(&self) -> &ChatState {
        self.app.chat()
    }
}
