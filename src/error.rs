//! Error types for the JIRA client.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when talking to a JIRA server.
#[derive(Debug, Error)]
pub enum Error {
    /// The server answered with a non-2xx status.
    ///
    /// Carries the HTTP status code and the error message extracted from
    /// the response body (or the raw body when no message could be found).
    #[error("HTTP {status}: {message}")]
    Http {
        /// The HTTP status code.
        status: u16,
        /// The error message reported by the server.
        message: String,
    },

    /// A 2xx response body could not be parsed as JSON.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Missing or invalid client configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Network or protocol-level failure from the HTTP transport.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Keyring error when storing or retrieving API tokens.
    #[error("Keyring error: {0}")]
    Keyring(String),
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error from a non-2xx HTTP response.
    ///
    /// Mines the response body for JIRA's error payload shapes before
    /// falling back to the raw body text.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let message = message_from_body(body).unwrap_or_else(|| body.trim().to_string());
        Error::Http {
            status: status.as_u16(),
            message,
        }
    }

    /// The HTTP status code, if this is an HTTP error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the server rejected the credentials (401).
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Whether access to the resource was denied (403).
    pub fn is_forbidden(&self) -> bool {
        self.status() == Some(403)
    }

    /// Whether the addressed resource does not exist (404).
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Whether the server throttled the request (429).
    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(429)
    }

    /// Whether the failure was on the server side (5xx).
    pub fn is_server_error(&self) -> bool {
        matches!(self.status(), Some(s) if (500..600).contains(&s))
    }
}

/// Extract a human-readable message from a JIRA error response body.
///
/// JIRA reports errors in several shapes depending on version and endpoint:
/// a `message` key, an `errorMessages` array, or an `errors` map keyed by
/// field name. Returns `None` when the body is not JSON or carries none of
/// these.
fn message_from_body(body: &str) -> Option<String> {
    let json: serde_json::Value = serde_json::from_str(body).ok()?;

    if let Some(message) = json.get("message").and_then(|m| m.as_str()) {
        return Some(message.to_string());
    }

    if let Some(messages) = json.get("errorMessages").and_then(|m| m.as_array()) {
        let joined: Vec<&str> = messages.iter().filter_map(|v| v.as_str()).collect();
        if !joined.is_empty() {
            return Some(joined.join(", "));
        }
    }

    if let Some(errors) = json.get("errors").and_then(|e| e.as_object()) {
        let joined: Vec<String> = errors
            .iter()
            .map(|(field, detail)| match detail.as_str() {
                Some(s) => format!("{}: {}", field, s),
                None => format!("{}: {}", field, detail),
            })
            .collect();
        if !joined.is_empty() {
            return Some(joined.join(", "));
        }
    }

    None
}
