// Upload configuration: which endpoint to hit and which client id to send.
// Values are passed in explicitly; nothing here reads global state except
// `resolve_client_id`, which may fall back to an interactive prompt.

use crate::error::UploadError;
use dialoguer::Password;
use reqwest::Url;
use std::fmt;
use std::io::IsTerminal;
use std::time::Duration;

/// Image upload endpoint of the hosting API.
pub const DEFAULT_ENDPOINT: &str = "https://api.imgur.com/3/image";

/// Image read when the caller does not name one.
pub const DEFAULT_IMAGE_PATH: &str = "image.png";

/// Environment variable consulted for the client id.
pub const CLIENT_ID_ENV: &str = "IMGUR_CLIENT_ID";

/// Environment variable consulted for the endpoint.
pub const ENDPOINT_ENV: &str = "IMGUR_ENDPOINT";

#[derive(Clone)]
pub struct UploadConfig {
    endpoint: String,
    client_id: String,
    timeout: Option<Duration>,
}

impl UploadConfig {
    /// Config for the default endpoint. The client id is kept as given;
    /// blank ids and ids with surrounding whitespace are rejected.
    pub fn new(client_id: impl Into<String>) -> Result<Self, UploadError> {
        let client_id = client_id.into();
        if client_id.trim().is_empty() {
            return Err(UploadError::Config("client id must not be empty".into()));
        }
        if client_id.trim() != client_id {
            return Err(UploadError::Config(
                "client id must not start or end with whitespace".into(),
            ));
        }
        if client_id.chars().any(char::is_control) {
            return Err(UploadError::Config("client id contains control characters".into()));
        }
        Ok(UploadConfig {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            client_id,
            timeout: None,
        })
    }

    /// Point uploads at another endpoint. Must be an absolute http(s) URL.
    pub fn with_endpoint(mut self, endpoint: &str) -> Result<Self, UploadError> {
        let url = Url::parse(endpoint)
            .map_err(|e| UploadError::Config(format!("invalid endpoint {:?}: {}", endpoint, e)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(UploadError::Config(format!(
                "endpoint must use http or https, got {:?}",
                url.scheme()
            )));
        }
        self.endpoint = endpoint.to_string();
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Value of the `Authorization` header sent with every upload.
    pub fn authorization_header(&self) -> String {
        format!("Client-ID {}", self.client_id)
    }
}

// Hand-written so the credential never ends up in logs.
impl fmt::Debug for UploadConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadConfig")
            .field("endpoint", &self.endpoint)
            .field("client_id", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Pick the client id from the flag/env value, or ask for it when running
/// on a terminal. Non-interactive runs without one fail with `Config`.
pub fn resolve_client_id(given: Option<String>) -> Result<String, UploadError> {
    if let Some(id) = given.filter(|id| !id.trim().is_empty()) {
        return Ok(id);
    }
    if !std::io::stdin().is_terminal() {
        return Err(UploadError::Config(format!(
            "no client id given; pass --client-id or set {}",
            CLIENT_ID_ENV
        )));
    }
    // `Password` hides the input, same as any other secret.
    Password::new()
        .with_prompt("Imgur client id")
        .interact()
        .map_err(|e| UploadError::Config(format!("could not read client id: {}", e)))
}
