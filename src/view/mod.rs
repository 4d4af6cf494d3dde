//! TUI rendering and terminal management (impure shell).

pub mod styles;
pub mod typing_indicator;
pub mod widget;

pub use styles::{ColorConfig, MessageStyles};
pub use typing_indicator::TypingIndicator;
pub use widget::{conversation_lines, render_app, widget_rect, wrap_line};

use crate::config::ResolvedConfig;
use crate::model::AppError;
use crate::session::Session;
use crate::state::{ChatState, OutboundMessage, Visibility};
use crate::transport::{spawn_send, ChatEvent, ChatTransport};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Main TUI application.
///
/// Generic over backend to support testing with TestBackend. Owns the
/// widget state, the session (if any), the transport, and the channel that
/// settled chat requests come back on.
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    chat: ChatState,
    session: Option<Session>,
    transport: Arc<dyn ChatTransport>,
    events_tx: Sender<ChatEvent>,
    events_rx: Receiver<ChatEvent>,
    styles: MessageStyles,
    support_phone: String,
    blink_on: bool,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize the application on the real terminal.
    ///
    /// Sets up raw mode with an alternate screen. Starts minimized instead
    /// of closed when configured, so returning users land one key away from
    /// their history.
    pub fn new(
        config: &ResolvedConfig,
        session: Option<Session>,
        transport: Arc<dyn ChatTransport>,
        styles: MessageStyles,
    ) -> Result<Self, AppError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        let mut chat = ChatState::new();
        if config.start_minimized && session.is_some() {
            chat.open();
            chat.toggle_minimize();
        }

        let (events_tx, events_rx) = channel();

        Ok(Self {
            terminal,
            chat,
            session,
            transport,
            events_tx,
            events_rx,
            styles,
            support_phone: config.support_phone.clone(),
            blink_on: false,
        })
    }

    /// Run the main event loop. Returns when the user quits.
    ///
    /// The terminal is restored even when the loop fails, so an error never
    /// leaves the shell in raw mode on the alternate screen.
    pub fn run(&mut self) -> Result<(), AppError> {
        let result = self.event_loop();
        let restored = self.restore();
        finalize_run(result, restored)
    }

    /// Event-driven loop: keyboard and resize events redraw immediately; a
    /// 500 ms timer tick drains settled chat requests and drives the typing-
    /// indicator blink. The UI stays fully responsive while a request is in
    /// flight - only a second send is refused.
    fn event_loop(&mut self) -> Result<(), AppError> {
        const TIMER_INTERVAL: Duration = Duration::from_millis(500);

        self.draw()?;

        loop {
            if event::poll(TIMER_INTERVAL)? {
                match event::read()? {
                    Event::Key(key) => {
                        if self.handle_key(key) {
                            break;
                        }
                        self.drain_chat_events();
                        self.draw()?;
                    }
                    Event::Resize(_, _) => {
                        self.draw()?;
                    }
                    _ => {}
                }
            } else {
                // Timer tick: apply settled requests and animate the
                // indicator while something is pending.
                let applied = self.drain_chat_events();
                let animating = self.chat.pending();
                if animating {
                    self.blink_on = !self.blink_on;
                }
                if applied || animating {
                    self.draw()?;
                }
            }
        }

        Ok(())
    }

    /// Leave the alternate screen and disable raw mode.
    fn restore(&mut self) -> Result<(), AppError> {
        disable_raw_mode()?;
        self.terminal
            .backend_mut()
            .writer_mut()
            .execute(LeaveAlternateScreen)?;
        Ok(())
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Construct an app over an arbitrary backend without touching the real
    /// terminal. Used by the acceptance test harness.
    pub fn new_for_test(
        terminal: Terminal<B>,
        session: Option<Session>,
        transport: Arc<dyn ChatTransport>,
    ) -> Self {
        let (events_tx, events_rx) = channel();
        Self {
            terminal,
            chat: ChatState::new(),
            session,
            transport,
            events_tx,
            events_rx,
            styles: MessageStyles::with_color_config(ColorConfig::from_env_and_args(true)),
            support_phone: ResolvedConfig::default().support_phone,
            blink_on: false,
        }
    }

    /// Read-only access to the widget state, for assertions.
    pub fn chat(&self) -> &ChatState {
        &self.chat
    }

    /// Access to the terminal, for buffer inspection in tests.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Handle a single keyboard event. Returns true if the app should quit.
    ///
    /// Dispatch depends on the widget's visibility: while expanded, printable
    /// keys belong to the draft input; while closed or minimized, they are
    /// widget controls. Without a session every key except quit is ignored -
    /// there is no widget to drive.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Ctrl+C always quits, whatever state the widget is in.
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        if self.session.is_none() {
            return matches!(key.code, KeyCode::Char('q') | KeyCode::Esc);
        }

        match self.chat.visibility {
            Visibility::Closed => match key.code {
                KeyCode::Char('q') => return true,
                KeyCode::Char('c') | KeyCode::Char('C') | KeyCode::Enter => self.chat.open(),
                _ => {}
            },

            Visibility::Minimized => match key.code {
                KeyCode::Char('q') => return true,
                KeyCode::Enter => self.chat.toggle_minimize(),
                KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.chat.toggle_minimize();
                }
                KeyCode::Esc => self.chat.close(),
                _ => {}
            },

            Visibility::Expanded => match key.code {
                KeyCode::Esc => self.chat.close(),
                KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.chat.toggle_minimize();
                }
                KeyCode::Enter => {
                    let outbound = self.chat.send_draft();
                    self.dispatch(outbound);
                }
                KeyCode::F(n @ 1..=4) if self.chat.quick_actions_visible() => {
                    let outbound = self.chat.send_quick_action(usize::from(n) - 1);
                    self.dispatch(outbound);
                }
                KeyCode::Up => self.chat.scroll.scroll_up(1),
                KeyCode::Down => self.chat.scroll.scroll_down(1),
                KeyCode::PageUp => self.chat.scroll.scroll_up(10),
                KeyCode::PageDown => self.chat.scroll.scroll_down(10),
                KeyCode::End => self.chat.scroll.scroll_to_bottom(),
                KeyCode::Backspace => self.chat.draft.backspace(),
                KeyCode::Left => self.chat.draft.cursor_left(),
                KeyCode::Right => self.chat.draft.cursor_right(),
                KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.chat.draft.insert_char(ch);
                }
                _ => {}
            },
        }

        false
    }

    /// Issue the outbound request for an accepted send, if any.
    ///
    /// Exactly one request per accepted send; the worker posts the settled
    /// outcome on the event channel. The pending flag set by the state
    /// transition is the single-flight guard.
    fn dispatch(&mut self, outbound: Option<OutboundMessage>) {
        if let Some(message) = outbound {
            info!(chars = message.text.len(), "sending chat message");
            spawn_send(
                Arc::clone(&self.transport),
                message.text,
                self.events_tx.clone(),
            );
        }
    }

    /// Apply every settled chat outcome waiting on the channel.
    ///
    /// Returns true if anything was applied. Results are applied to the
    /// retained state even if the widget was minimized or closed while the
    /// request was in flight.
    pub fn drain_chat_events(&mut self) -> bool {
        let mut applied = false;
        while let Ok(event) = self.events_rx.try_recv() {
            match event {
                ChatEvent::Reply(text) => self.chat.apply_reply(&text),
                ChatEvent::Failed => self.chat.apply_failure(),
            }
            applied = true;
        }
        applied
    }

    /// Block until the in-flight request settles, then apply it. Test-only
    /// synchronization; the interactive loop uses [`Self::drain_chat_events`].
    #[cfg(test)]
    pub(crate) fn settle_pending(&mut self) {
        if !self.chat.pending() {
            return;
        }
        match self
            .events_rx
            .recv_timeout(std::time::Duration::from_secs(5))
        {
            Ok(ChatEvent::Reply(text)) => self.chat.apply_reply(&text),
            Ok(ChatEvent::Failed) => self.chat.apply_failure(),
            Err(_) => panic!("in-flight chat request never settled"),
        }
    }

    /// Render one frame.
    pub fn draw(&mut self) -> Result<(), std::io::Error> {
        let chat = &mut self.chat;
        let session = self.session.as_ref();
        let styles = &self.styles;
        let blink_on = self.blink_on;
        let support_phone = &self.support_phone;

        self.terminal.draw(|frame| {
            render_app(frame, chat, session, styles, blink_on, support_phone);
        })?;
        Ok(())
    }
}

/// Combine the event-loop outcome with the terminal-restore outcome.
///
/// A loop failure takes precedence: it is the root cause, and a restore
/// failure on the way out must not mask it.
fn finalize_run(
    loop_result: Result<(), AppError>,
    restore_result: Result<(), AppError>,
) -> Result<(), AppError> {
    match loop_result {
        Ok(()) => restore_result,
        err @ Err(_) => err,
    }
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;

    fn io_failure(message: &str) -> AppError {
        AppError::Terminal(std::io::Error::other(message.to_string()))
    }

    #[test]
    fn clean_exit_surfaces_a_restore_failure() {
        let result = finalize_run(Ok(()), Err(io_failure("restore failed")));
        assert!(result.is_err());
    }

    #[test]
    fn loop_error_is_kept_after_a_successful_restore() {
        let result = finalize_run(Err(io_failure("poll failed")), Ok(()));
        let message = result.expect_err("loop error propagates").to_string();
        assert!(message.contains("poll failed"));
    }

    #[test]
    fn loop_error_is_not_masked_by_a_restore_error() {
        let result = finalize_run(
            Err(io_failure("draw failed")),
            Err(io_failure("restore failed")),
        );
        let message = result.expect_err("loop error propagates").to_string();
        assert!(message.contains("draw failed"));
    }

    #[test]
    fn clean_exit_with_clean_restore_is_ok() {
        assert!(finalize_run(Ok(()), Ok(())).is_ok());
    }
}
