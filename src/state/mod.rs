//! Pure state transitions for the chat widget (no side effects).

pub mod chat_state;
pub mod draft;

pub use chat_state::{ChatState, OutboundMessage, ScrollState, Visibility};
pub use draft::DraftInput;
