//! Widget rendering: launcher hint, minimized bar, and the expanded panel.
//!
//! Everything here is a pure function from state to ratatui primitives; the
//! only mutation is clamping the scroll offset to the rendered line count,
//! which keeps the newest message visible after any append while the
//! viewport follows the bottom.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::model::{Conversation, QUICK_ACTIONS};
use crate::session::Session;
use crate::state::{ChatState, Visibility};
use crate::view::styles::MessageStyles;
use crate::view::typing_indicator::TypingIndicator;

/// Display name for a message author.
fn author_name(role: crate::model::Role) -> &'static str {
    match role {
        crate::model::Role::User => "You",
        crate::model::Role::Assistant => "Classi",
    }
}

/// Greedy word wrap to a display width, hard-breaking words longer than a
/// full line. Empty input yields one empty line so blank message lines keep
/// their vertical space.
pub fn wrap_line(line: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();
    let mut current = String::new();

    for word in line.split(' ') {
        let mut word = word;
        // Hard-break words that cannot fit a full line.
        while word.width() > width {
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
            let mut taken = 0;
            let mut split_at = word.len();
            for (i, ch) in word.char_indices() {
                let ch_width = ch.width().unwrap_or(0);
                if taken + ch_width > width {
                    split_at = i;
                    break;
                }
                taken += ch_width;
            }
            // Always consume at least one char, or a double-width char on a
            // single-column line would never fit anywhere.
            if split_at == 0 {
                split_at = word
                    .char_indices()
                    .nth(1)
                    .map(|(i, _)| i)
                    .unwrap_or(word.len());
            }
            out.push(word[..split_at].to_string());
            word = &word[split_at..];
        }

        let needed = if current.is_empty() {
            word.width()
        } else {
            current.width() + 1 + word.width()
        };
        if needed > width && !current.is_empty() {
            out.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    // Trailing whitespace leaves an empty remainder; only a fully empty
    // input earns a blank line.
    if !current.is_empty() || out.is_empty() {
        out.push(current);
    }
    out
}

/// Build the full message list as styled lines for the given content width.
///
/// Each message renders as an author line followed by indented, wrapped
/// content lines, with a blank separator after it. Content is preformatted:
/// embedded newlines are honored, nothing else is transformed.
pub fn conversation_lines(
    conversation: &Conversation,
    width: u16,
    styles: &MessageStyles,
) -> Vec<Line<'static>> {
    const INDENT: &str = "  ";
    let content_width = usize::from(width).saturating_sub(INDENT.len()).max(1);

    let mut lines = Vec::new();
    for message in conversation.messages() {
        let style = styles.style_for_role(message.role);
        lines.push(Line::from(Span::styled(
            format!("{}:", author_name(message.role)),
            style,
        )));

        for raw_line in message.content.lines() {
            for wrapped in wrap_line(raw_line, content_width) {
                lines.push(Line::from(format!("{INDENT}{wrapped}")));
            }
        }
        if message.content.is_empty() {
            lines.push(Line::from(INDENT.to_string()));
        }

        lines.push(Line::from(""));
    }

    lines
}

/// Panel rectangle for the expanded widget: anchored bottom-right, like the
/// floating chat bubble it stands in for, clamped to the terminal size.
pub fn widget_rect(area: Rect) -> Rect {
    let width = area.width.min(64);
    let height = area.height.min(22);
    Rect {
        x: area.x + area.width - width,
        y: area.y + area.height - height,
        width,
        height,
    }
}

/// Render the whole frame: backdrop plus whichever visibility state the
/// widget is in. With no session present, no widget is rendered at all.
pub fn render_app(
    frame: &mut Frame<'_>,
    chat: &mut ChatState,
    session: Option<&Session>,
    styles: &MessageStyles,
    blink_on: bool,
    support_phone: &str,
) {
    let area = frame.area();
    render_backdrop(frame, area, styles, support_phone);

    let Some(session) = session else {
        // Session gating: absent user suppresses the entire widget.
        let hint = Line::from(Span::styled(
            "Sign in to chat with Classi (set CLASSI_TOKEN or pass --token).",
            styles.muted(),
        ));
        if area.height > 1 {
            let footer = Rect {
                y: area.y + area.height - 1,
                height: 1,
                ..area
            };
            frame.render_widget(Paragraph::new(hint), footer);
        }
        return;
    };

    match chat.visibility {
        Visibility::Closed => render_launcher_hint(frame, area, styles),
        Visibility::Minimized => render_minimized_bar(frame, area, chat, styles),
        Visibility::Expanded => render_expanded(frame, area, chat, session, styles, blink_on),
    }
}

/// Static backdrop: application title and the support phone line.
fn render_backdrop(frame: &mut Frame<'_>, area: Rect, styles: &MessageStyles, support_phone: &str) {
    let header = Line::from(vec![
        Span::styled("Class-B HS Code Agent", styles.accent()),
        Span::styled(format!("  ·  Support: {support_phone}"), styles.muted()),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

/// Launcher control shown while the widget is closed.
fn render_launcher_hint(frame: &mut Frame<'_>, area: Rect, styles: &MessageStyles) {
    if area.height < 2 {
        return;
    }
    let footer = Rect {
        y: area.y + area.height - 1,
        height: 1,
        ..area
    };
    let hint = Line::from(vec![
        Span::styled("● Classi", styles.accent()),
        Span::styled("  press c to chat · q to quit", styles.muted()),
    ]);
    frame.render_widget(Paragraph::new(hint), footer);
}

/// One-line bar shown while minimized. The conversation persists untouched.
fn render_minimized_bar(frame: &mut Frame<'_>, area: Rect, chat: &ChatState, styles: &MessageStyles) {
    if area.height < 2 {
        return;
    }
    let footer = Rect {
        y: area.y + area.height - 1,
        height: 1,
        ..area
    };
    let pending_note = if chat.pending() { " · typing..." } else { "" };
    let bar = Line::from(vec![
        Span::styled("▁ Classi (minimized)", styles.accent()),
        Span::styled(
            format!(
                " · {} messages{pending_note} · Ctrl+T to restore · Esc to close",
                chat.conversation().len()
            ),
            styles.muted(),
        ),
    ]);
    frame.render_widget(Paragraph::new(bar), footer);
}

/// Full panel: header, scrollable message list, quick actions, input line.
fn render_expanded(
    frame: &mut Frame<'_>,
    area: Rect,
    chat: &mut ChatState,
    session: &Session,
    styles: &MessageStyles,
    blink_on: bool,
) {
    let panel = widget_rect(area);
    frame.render_widget(Clear, panel);

    let title = Line::from(vec![
        Span::styled(" Classi · Customs Helpdesk ", styles.accent()),
        TypingIndicator::new(chat.pending(), blink_on).render(),
        Span::raw(" "),
    ]);
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    let shortcuts_visible = chat.quick_actions_visible();
    let shortcuts_height = if shortcuts_visible {
        QUICK_ACTIONS.len() as u16
    } else {
        0
    };

    let [messages_area, shortcuts_area, input_area, hint_area] = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(shortcuts_height),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(inner);

    render_messages(frame, messages_area, chat, styles);
    if shortcuts_visible {
        render_shortcuts(frame, shortcuts_area, styles);
    }
    render_input(frame, input_area, chat, styles);

    let hint = Line::from(Span::styled(
        format!(
            "{} · Enter send · Ctrl+T minimize · Esc close",
            session.user.name
        ),
        styles.muted(),
    ));
    frame.render_widget(Paragraph::new(hint), hint_area);
}

/// Scroll offset as the u16 ratatui expects, saturating rather than
/// wrapping on absurdly long conversations.
fn scroll_y(offset: usize) -> u16 {
    u16::try_from(offset).unwrap_or(u16::MAX)
}

/// Message list with stick-to-bottom scrolling.
fn render_messages(frame: &mut Frame<'_>, area: Rect, chat: &mut ChatState, styles: &MessageStyles) {
    let lines = conversation_lines(chat.conversation(), area.width, styles);

    // Newest message stays visible after any append while following.
    let max_offset = lines.len().saturating_sub(usize::from(area.height));
    chat.scroll.clamp(max_offset);

    let paragraph = Paragraph::new(lines).scroll((scroll_y(chat.scroll.offset), 0));
    frame.render_widget(paragraph, area);
}

/// Quick-action shortcut rows, one per canned query.
fn render_shortcuts(frame: &mut Frame<'_>, area: Rect, styles: &MessageStyles) {
    let lines: Vec<Line<'_>> = QUICK_ACTIONS
        .iter()
        .enumerate()
        .map(|(i, action)| {
            Line::from(vec![
                Span::styled(format!("F{} ", i + 1), styles.accent()),
                Span::raw(action.label),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

/// Input line with a live cursor while focused.
fn render_input(frame: &mut Frame<'_>, area: Rect, chat: &ChatState, styles: &MessageStyles) {
    let block = Block::default().borders(Borders::ALL).title(" Message ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let draft = &chat.draft;
    let paragraph = if draft.text().is_empty() {
        Paragraph::new(Span::styled("Type your message...", styles.muted()))
    } else {
        Paragraph::new(draft.text().to_string())
    };
    frame.render_widget(paragraph, inner);

    if chat.input_focused() && inner.width > 0 {
        let cursor_x = draft.text()[..draft.cursor()].width() as u16;
        frame.set_cursor_position((
            inner.x + cursor_x.min(inner.width.saturating_sub(1)),
            inner.y,
        ));
    }
}

// ===== Tests =====
