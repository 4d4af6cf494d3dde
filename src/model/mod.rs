//! Domain model: messages, the conversation log, quick actions, errors.

pub mod error;
pub mod message;
pub mod quick_action;

pub use error::{AppError, AuthError, ChatRequestError};
pub use message::{Conversation, Message, Role, FALLBACK_TEXT, GREETING_TEXT};
pub use quick_action::{QuickAction, QUICK_ACTIONS};
