//! Authentication handling for the JIRA API.
//!
//! Supports anonymous access, HTTP Basic auth (username + API token) and
//! bearer tokens, plus secure token storage via the OS keyring.

use std::fmt;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use crate::error::{Error, Result};

/// The keyring service name under which API tokens are stored.
const KEYRING_SERVICE: &str = "jira-client";

/// Authentication credentials for a JIRA server.
///
/// Credentials are encoded into the final `Authorization` header value at
/// construction time; the raw secret is not retained.
#[derive(Clone)]
pub enum Auth {
    /// No authentication. JIRA serves whatever anonymous access allows.
    Anonymous,

    /// HTTP Basic authentication with a username (or email) and API token.
    Basic {
        /// The username or email the token belongs to.
        username: String,
        /// The complete `Basic ...` header value.
        header: String,
    },

    /// Bearer token authentication (personal access tokens).
    Bearer {
        /// The complete `Bearer ...` header value.
        header: String,
    },
}

impl Auth {
    /// Create anonymous (unauthenticated) credentials.
    pub fn anonymous() -> Self {
        Auth::Anonymous
    }

    /// Create Basic auth credentials from a username and API token.
    ///
    /// The token is immediately encoded and the raw token is not stored.
    pub fn basic(username: &str, token: &str) -> Self {
        Auth::Basic {
            username: username.to_string(),
            header: build_basic_header(username, token),
        }
    }

    /// Create bearer token credentials.
    pub fn bearer(token: &str) -> Self {
        Auth::Bearer {
            header: format!("Bearer {}", token),
        }
    }

    /// Create Basic auth credentials with the token from the OS keyring.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is stored for `account`.
    pub fn from_keyring(account: &str, username: &str) -> Result<Self> {
        let token = get_token(account)?;
        Ok(Self::basic(username, &token))
    }

    /// The `Authorization` header value, if any.
    pub fn header_value(&self) -> Option<&str> {
        match self {
            Auth::Anonymous => None,
            Auth::Basic { header, .. } => Some(header),
            Auth::Bearer { header } => Some(header),
        }
    }

    /// The username the credentials belong to, for Basic auth.
    pub fn username(&self) -> Option<&str> {
        match self {
            Auth::Basic { username, .. } => Some(username),
            _ => None,
        }
    }
}

// Debug output must never contain credential material.
impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Auth::Anonymous => f.write_str("Auth::Anonymous"),
            Auth::Basic { username, .. } => f
                .debug_struct("Auth::Basic")
                .field("username", username)
                .field("header", &"***")
                .finish(),
            Auth::Bearer { .. } => f.debug_struct("Auth::Bearer").field("header", &"***").finish(),
        }
    }
}

/// Build the Basic Auth header value.
///
/// Encodes "username:token" in Base64 and prepends "Basic ".
fn build_basic_header(username: &str, token: &str) -> String {
    let credentials = format!("{}:{}", username, token);
    format!("Basic {}", BASE64.encode(credentials.as_bytes()))
}

/// Store an API token in the OS keyring.
///
/// # Arguments
///
/// * `account` - The account name to store the token under
/// * `token` - The API token to store
///
/// # Errors
///
/// Returns an error if the token cannot be stored in the keyring.
pub fn store_token(account: &str, token: &str) -> Result<()> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, account)
        .map_err(|e| Error::Keyring(format!("failed to create keyring entry: {}", e)))?;

    entry
        .set_password(token)
        .map_err(|e| Error::Keyring(format!("failed to store token: {}", e)))?;

    Ok(())
}

/// Retrieve an API token from the OS keyring.
///
/// # Errors
///
/// Returns an error if no token is stored for `account`.
pub fn get_token(account: &str) -> Result<String> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, account)
        .map_err(|e| Error::Keyring(format!("failed to access keyring: {}", e)))?;

    entry
        .get_password()
        .map_err(|e| Error::Keyring(format!("failed to retrieve token: {}", e)))
}

/// Delete an API token from the OS keyring.
///
/// # Errors
///
/// Returns an error if the token cannot be deleted.
pub fn delete_token(account: &str) -> Result<()> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, account)
        .map_err(|e| Error::Keyring(format!("failed to access keyring: {}", e)))?;

    entry
        .delete_password()
        .map_err(|e| Error::Keyring(format!("failed to delete token: {}", e)))?;

    Ok(())
}

/// Check if a token exists in the OS keyring for an account.
pub fn has_token(account: &str) -> bool {
    get_token(account).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_basic_header() {
        let header = build_basic_header("user@example.com", "api_token_here");
        assert!(header.starts_with("Basic "));

        let encoded = header.strip_prefix("Basic ").unwrap();
        let decoded = BASE64.decode(encoded).unwrap();
        assert_eq!(
            String::from_utf8(decoded).unwrap(),
            "user@example.com:api_token_here"
        );
    }

    #[test]
    fn test_basic_auth() {
        let auth = Auth::basic("user@example.com", "secret_token");
        assert_eq!(auth.username(), Some("user@example.com"));
        assert!(auth.header_value().unwrap().starts_with("Basic "));
    }

    #[test]
    fn test_bearer_auth() {
        let auth = Auth::bearer("pat-token");
        assert_eq!(auth.header_value(), Some("Bearer pat-token"));
        assert!(auth.username().is_none());
    }

    #[test]
    fn test_anonymous_has_no_header() {
        let auth = Auth::anonymous();
        assert!(auth.header_value().is_none());
    }

    #[test]
    fn test_basic_header_is_valid_base64() {
        let auth = Auth::basic("test@test.com", "token123");
        let header = auth.header_value().unwrap();
        let encoded = header.strip_prefix("Basic ").unwrap();
        assert!(BASE64.decode(encoded).is_ok());
    }

    #[test]
    fn test_debug_does_not_expose_basic_token() {
        let auth = Auth::basic("user@example.com", "secret_token");
        let debug_output = format!("{:?}", auth);
        assert!(!debug_output.contains("secret_token"));
        assert!(!debug_output.contains(&BASE64.encode("user@example.com:secret_token")));
    }

    #[test]
    fn test_debug_does_not_expose_bearer_token() {
        let auth = Auth::bearer("secret_token");
        let debug_output = format!("{:?}", auth);
        assert!(!debug_output.contains("secret_token"));
    }
}
