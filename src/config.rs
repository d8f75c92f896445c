//! Client configuration.
//!
//! Connection settings are carried by an explicit [`ClientOptions`] value
//! passed to the client constructor. There is no process-wide default
//! configuration; two clients with different options coexist freely.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};

/// Default REST path under which the JIRA API resources live.
const DEFAULT_REST_PATH: &str = "api";

/// Default REST API version.
const DEFAULT_REST_API_VERSION: &str = "2";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Server the client connects to when none is configured.
///
/// This is the address of a local instance started by the Atlassian Plugin
/// SDK, which is what a development setup typically runs.
const DEFAULT_SERVER: &str = "http://localhost:2990/jira";

/// Connection settings for a JIRA instance.
///
/// Immutable for the lifetime of a client. The server URL is the address
/// and context path of the instance (e.g. `https://company.atlassian.net`);
/// REST path and version select the resource tree underneath it, so the
/// effective API root is `{server}/rest/{rest_path}/{rest_api_version}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientOptions {
    /// The server address and context path.
    pub server: String,

    /// The root REST path. Defaults to `api`.
    #[serde(default = "default_rest_path")]
    pub rest_path: String,

    /// The REST API version under `rest_path`. Defaults to `2`.
    #[serde(default = "default_rest_api_version")]
    pub rest_api_version: String,

    /// Request timeout in seconds. Defaults to 30.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_rest_path() -> String {
    DEFAULT_REST_PATH.to_string()
}

fn default_rest_api_version() -> String {
    DEFAULT_REST_API_VERSION.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self::new(DEFAULT_SERVER)
    }
}

impl ClientOptions {
    /// Create options for the given server with default REST settings.
    pub fn new(server: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            rest_path: default_rest_path(),
            rest_api_version: default_rest_api_version(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Select a different REST API version (e.g. `"3"`).
    pub fn with_rest_api_version(mut self, version: impl Into<String>) -> Self {
        self.rest_api_version = version.into();
        self
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = timeout.as_secs();
        self
    }

    /// Load options from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file cannot be read, is not
    /// valid TOML, or fails [`validate`](Self::validate).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read options file {}: {}", path.display(), e))
        })?;
        let options: ClientOptions = toml::from_str(&raw).map_err(|e| {
            Error::Config(format!("invalid options file {}: {}", path.display(), e))
        })?;
        options.validate()?;
        Ok(options)
    }

    /// Validate these options.
    ///
    /// Checks that:
    /// - The server URL is non-empty and uses an http(s) scheme
    /// - The REST path and API version are non-empty
    ///
    /// # Errors
    ///
    /// Returns an `Error::Config` with details if validation fails.
    pub fn validate(&self) -> Result<()> {
        if self.server.trim().is_empty() {
            return Err(Error::Config("server URL cannot be empty".to_string()));
        }

        if !self.server.starts_with("https://") && !self.server.starts_with("http://") {
            return Err(Error::Config(format!(
                "server URL '{}' must start with http:// or https://",
                self.server
            )));
        }

        if self.rest_path.is_empty() {
            return Err(Error::Config("REST path cannot be empty".to_string()));
        }

        if self.rest_api_version.is_empty() {
            return Err(Error::Config(
                "REST API version cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// The server URL with trailing slashes removed.
    ///
    /// All resource URLs are joined onto this, so the trailing slash has to
    /// go. Logs a warning for plain-http servers other than localhost.
    pub fn normalized_server(&self) -> String {
        let server = self.server.trim_end_matches('/');

        if !server.starts_with("https://") && !server.contains("localhost") {
            warn!(
                "Server URL does not use HTTPS: {}. This is insecure for production use.",
                server
            );
        }

        server.to_string()
    }

    /// The API root all relative resource paths are resolved against.
    pub fn api_root(&self) -> String {
        format!(
            "{}/rest/{}/{}",
            self.normalized_server(),
            self.rest_path,
            self.rest_api_version
        )
    }

    /// The request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
