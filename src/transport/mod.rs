//! Chat transport: the outbound request seam.
//!
//! The widget talks to the chat endpoint through the [`ChatTransport`]
//! trait, so tests can substitute fakes for the real HTTP client. Requests
//! run on a worker thread (at most one in flight, guarded by the widget's
//! pending flag) and settle by posting a [`ChatEvent`] back into the event
//! loop over a channel.

use serde::{Deserialize, Serialize};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::model::ChatRequestError;

/// Outcome of a settled chat request, delivered to the event loop.
///
/// If the receiving end has gone away (the app exited while a request was in
/// flight) the event is silently discarded - a settled result is never
/// applied to a torn-down widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    /// The server answered; payload is the verbatim response text.
    Reply(String),
    /// The request failed for any reason. The cause is already logged; the
    /// widget substitutes the fixed fallback message.
    Failed,
}

/// Transport capability for sending one chat message and awaiting its reply.
///
/// Implementations must be safe to call from a worker thread. Every failure
/// mode collapses into [`ChatRequestError`]; the widget does not distinguish
/// causes.
pub trait ChatTransport: Send + Sync {
    /// Send the literal message text; return the server's response text.
    fn send_message(&self, message: &str) -> Result<String, ChatRequestError>;
}

/// Request body for `POST /api/classi/chat`.
#[derive(Debug, Serialize)]
struct ChatRequestBody<'a> {
    message: &'a str,
}

/// Response body from `POST /api/classi/chat`.
#[derive(Debug, Deserialize)]
struct ChatResponseBody {
    response: String,
}

/// HTTP transport against the classification service's chat endpoint.
#[derive(Debug)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    endpoint: String,
    token: String,
}

impl HttpTransport {
    /// Request timeout. A hung request settles as a failure after this long.
    const TIMEOUT: Duration = Duration::from_secs(30);

    /// Build a transport for the given service base URL and bearer token.
    pub fn new(base_url: &str, token: impl Into<String>) -> Result<Self, ChatRequestError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Self::TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}/api/classi/chat", base_url.trim_end_matches('/')),
            token: token.into(),
        })
    }
}

impl ChatTransport for HttpTransport {
    fn send_message(&self, message: &str) -> Result<String, ChatRequestError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&ChatRequestBody { message })
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChatRequestError::new(format!(
                "server returned status {status}"
            )));
        }

        let body: ChatResponseBody = response
            .json()
            .map_err(|e| ChatRequestError::new(format!("invalid response body: {e}")))?;

        Ok(body.response)
    }
}

/// Run one chat request on a worker thread, posting the settled outcome.
///
/// The caller is responsible for single-flight: the widget's pending flag
/// must be set before spawning and is cleared when the resulting
/// [`ChatEvent`] is applied. Success and failure both settle; nothing is
/// retried.
pub fn spawn_send(
    transport: Arc<dyn ChatTransport>,
    message: String,
    events: Sender<ChatEvent>,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        let event = match transport.send_message(&message) {
            Ok(reply) => {
                debug!(chars = reply.len(), "chat reply received");
                ChatEvent::Reply(reply)
            }
            Err(err) => {
                warn!(reason = %err.reason, "chat request failed");
                ChatEvent::Failed
            }
        };

        // A send error means the receiver is gone: the app exited while the
        // request was in flight. Discard the result.
        let _ = events.send(event);
    })
}

// ===== Test doubles =====

#[cfg(test)]
pub(crate) mod fakes {
    //! Fake transports for unit and acceptance tests.

    use super::*;
    use std::sync::Mutex;

    /// Transport that always answers with a fixed reply and records what was
    /// sent.
    pub struct FixedReplyTransport {
        reply: String,
        /// Messages received, in order.
        pub sent: Mutex<Vec<String>>,
    }

    impl FixedReplyTransport {
        /// Create a fake answering every message with `reply`.
        pub fn new(reply: impl Into<String>) -> Self {
            Self {
                reply: reply.into(),
                sent: Mutex::new(Vec::new()),
            }
        }
    }

    impl ChatTransport for FixedReplyTransport {
        fn send_message(&self, message: &str) -> Result<String, ChatRequestError> {
            self.sent.lock().expect("sent lock").push(message.to_string());
            Ok(self.reply.clone())
        }
    }

    /// Transport that fails every request.
    pub struct AlwaysFailTransport;

    impl ChatTransport for AlwaysFailTransport {
        fn send_message(&self, _message: &str) -> Result<String, ChatRequestError> {
            Err(ChatRequestError::new("simulated transport failure"))
        }
    }
}

// ===== Tests =====
