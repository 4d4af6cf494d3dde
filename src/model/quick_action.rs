//! Canned one-tap queries offered while the conversation is short.

/// A predefined query offered as a one-tap shortcut.
///
/// Activating a quick action behaves exactly like typing its query text and
/// sending it: the same guard, append, and request path apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickAction {
    /// Short label rendered on the shortcut row.
    pub label: &'static str,
    /// Canned query text submitted verbatim when activated.
    pub query: &'static str,
}

/// The fixed shortcut list.
///
/// Shortcuts are a display-filter concern, not a state machine: they are
/// offered only while the visible conversation is at most the greeting plus
/// one exchange and no request is pending (see
/// [`ChatState::quick_actions_visible`](crate::state::ChatState::quick_actions_visible)).
pub const QUICK_ACTIONS: &[QuickAction] = &[
    QuickAction {
        label: "Ports of entry",
        query: "What are the main ports of entry in The Bahamas?",
    },
    QuickAction {
        label: "Find my HS code",
        query: "How do I find my HS code?",
    },
    QuickAction {
        label: "Duty rates",
        query: "What are the typical duty rates for general goods?",
    },
    QuickAction {
        label: "Contact customs",
        query: "How do I contact Bahamas Customs directly?",
    },
];
