//! Session/auth collaborator: the current authenticated identity.
//!
//! The chat widget is gated on a session being present - without one the
//! widget is not rendered at all. The session is resolved once at startup
//! from a bearer token and is read-only afterwards; the widget never mutates
//! it.

use serde::Deserialize;
use std::time::Duration;
use tracing::{info, warn};

use crate::model::AuthError;

/// Identity record returned by the service's `/api/auth/me` endpoint.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct UserIdentity {
    /// Opaque user id.
    pub id: String,
    /// Account email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Role string ("user" or "admin").
    #[serde(default)]
    pub role: Option<String>,
}

/// An authenticated session: identity plus the bearer token used to sign
/// outbound requests.
#[derive(Debug, Clone)]
pub struct Session {
    /// The authenticated user.
    pub user: UserIdentity,
    token: String,
}

impl Session {
    /// Assemble a session from an already-verified identity and token.
    pub fn new(user: UserIdentity, token: impl Into<String>) -> Self {
        Self {
            user,
            token: token.into(),
        }
    }

    /// The bearer token for request signing.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Resolve the current user from a bearer token.
    ///
    /// Calls `GET {base_url}/api/auth/me`. A rejected token or unreachable
    /// server yields an [`AuthError`]; callers treat that the same as having
    /// no token (run without a session, suppress the widget).
    pub fn authenticate(base_url: &str, token: &str) -> Result<Self, AuthError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| AuthError::Transport {
                reason: e.to_string(),
            })?;

        let url = format!("{}/api/auth/me", base_url.trim_end_matches('/'));
        let response = client
            .get(&url)
            .bearer_auth(token)
            .send()
            .map_err(|e| AuthError::Transport {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "authentication rejected");
            return Err(AuthError::Rejected {
                status: status.as_u16(),
            });
        }

        let user: UserIdentity = response.json().map_err(|e| AuthError::Transport {
            reason: e.to_string(),
        })?;

        info!(user = %user.email, "session established");
        Ok(Self::new(user, token))
    }
}
