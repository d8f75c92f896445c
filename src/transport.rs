//! HTTP transport for the JIRA REST API.
//!
//! One authenticated request/response round trip per call, JSON in and
//! JSON out. Non-2xx responses become typed errors carrying the status
//! code and the server's error message; nothing is retried here.

use reqwest::{header, Client, Method, Response, StatusCode};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::auth::Auth;
use crate::config::ClientOptions;
use crate::error::{Error, Result};

/// Query parameters for a request.
pub type Params<'a> = &'a [(&'a str, String)];

/// The HTTP request/response layer talking to a JIRA server.
///
/// Stateless besides the immutable configuration, so a transport is safe
/// to share across tasks and threads.
#[derive(Debug)]
pub struct Transport {
    /// The HTTP client.
    http: Client,
    /// The server base URL, normalized.
    base_url: String,
    /// The API root relative paths are resolved against.
    api_root: String,
    /// Authentication credentials.
    auth: Auth,
}

impl Transport {
    /// Create a transport for the given options and credentials.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the options fail validation, or a
    /// network error if the HTTP client cannot be built.
    pub fn new(options: &ClientOptions, auth: Auth) -> Result<Self> {
        options.validate()?;

        let http = Client::builder()
            .timeout(options.timeout())
            .build()
            .map_err(Error::Network)?;

        Ok(Self {
            http,
            base_url: options.normalized_server(),
            api_root: options.api_root(),
            auth,
        })
    }

    /// The server base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The API root URL.
    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    /// Resolve a path to a full URL.
    ///
    /// Paths are relative to the API root; absolute URLs pass through
    /// unchanged, so the `self` links resources carry can be requested
    /// directly.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}/{}", self.api_root, path.trim_start_matches('/'))
        }
    }

    /// Perform a request and parse the JSON response.
    ///
    /// On 2xx the parsed body is returned; 204 and empty bodies yield
    /// `Value::Null` as the empty success marker. Non-2xx responses fail
    /// with an HTTP error carrying status and extracted message.
    #[instrument(skip(self, params, body), fields(method = %method, path = %path))]
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        params: Option<Params<'_>>,
        body: Option<&Value>,
    ) -> Result<Value> {
        let url = self.url(path);
        debug!(url = %url, "Sending request");

        let mut request = self
            .http
            .request(method, &url)
            .header(header::ACCEPT, "application/json")
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(header_value) = self.auth.header_value() {
            request = request.header(header::AUTHORIZATION, header_value);
        }

        if let Some(params) = params {
            request = request.query(params);
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        handle_response(response).await
    }

    /// Perform a GET request.
    pub async fn get(&self, path: &str, params: Option<Params<'_>>) -> Result<Value> {
        self.request(Method::GET, path, params, None).await
    }

    /// Perform a POST request with an optional JSON body.
    pub async fn post(&self, path: &str, body: Option<&Value>) -> Result<Value> {
        self.request(Method::POST, path, None, body).await
    }

    /// Perform a PUT request with a JSON body.
    pub async fn put(&self, path: &str, body: &Value) -> Result<Value> {
        self.request(Method::PUT, path, None, Some(body)).await
    }

    /// Perform a DELETE request with optional query parameters.
    pub async fn delete(&self, path: &str, params: Option<Params<'_>>) -> Result<Value> {
        self.request(Method::DELETE, path, params, None).await
    }
}

/// Check the response status and parse the body.
async fn handle_response(response: Response) -> Result<Value> {
    let status = response.status();

    if status.is_success() {
        if status == StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text)
            .map_err(|e| Error::Decode(format!("response is not valid JSON: {}", e)))
    } else {
        let body = response.text().await.unwrap_or_default();
        debug!(status = %status, "Error response body: {}", body);

        Err(Error::from_response(status, &body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport() -> Transport {
        let options = ClientOptions::new("https://company.atlassian.net/");
        Transport::new(&options, Auth::anonymous()).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_options() {
        let options = ClientOptions::new("");
        let result = Transport::new(&options, Auth::anonymous());
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_url_resolves_relative_paths() {
        let transport = transport();
        assert_eq!(
            transport.url("issue/JRA-9"),
            "https://company.atlassian.net/rest/api/2/issue/JRA-9"
        );
    }

    #[test]
    fn test_url_strips_leading_slash() {
        let transport = transport();
        assert_eq!(
            transport.url("/serverInfo"),
            "https://company.atlassian.net/rest/api/2/serverInfo"
        );
    }

    #[test]
    fn test_url_passes_absolute_urls_through() {
        let transport = transport();
        let self_link = "https://company.atlassian.net/rest/api/2/issue/10001";
        assert_eq!(transport.url(self_link), self_link);
    }

    #[test]
    fn test_base_and_api_root() {
        let transport = transport();
        assert_eq!(transport.base_url(), "https://company.atlassian.net");
        assert_eq!(
            transport.api_root(),
            "https://company.atlassian.net/rest/api/2"
        );
    }
}
