// API module: turns a local image into a hosted image link.
// The HTTP call sits behind the `Transport` trait so the upload logic can
// be exercised without touching the network. The real transport is a
// small blocking reqwest client, matching the rest of the CLI.

use crate::config::UploadConfig;
use crate::error::UploadError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use std::path::Path;

/// Sends one form-encoded POST and hands back the raw response body.
pub trait Transport {
    fn post_form(
        &self,
        url: &str,
        authorization: &str,
        fields: &[(&str, &str)],
    ) -> Result<String, UploadError>;
}

/// Blocking reqwest transport used by the CLI.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a client honouring the configured timeout. Without one the
    /// request may take as long as it needs.
    pub fn from_config(config: &UploadConfig) -> Result<Self, UploadError> {
        // The blocking client defaults to 30s; `None` switches that off.
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| UploadError::Network(format!("failed to build HTTP client: {}", e)))?;
        Ok(HttpTransport { client })
    }
}

impl Transport for HttpTransport {
    fn post_form(
        &self,
        url: &str,
        authorization: &str,
        fields: &[(&str, &str)],
    ) -> Result<String, UploadError> {
        let res = self
            .client
            .post(url)
            .header(AUTHORIZATION, authorization)
            .form(fields)
            .send()
            .map_err(|e| UploadError::Network(e.to_string()))?;

        // A non-2xx status is not fatal here: the host reports failures as
        // JSON and `parse_link` turns a body without a link into `Protocol`.
        let status = res.status();
        log::debug!("image host answered {}", status);
        if !status.is_success() {
            log::warn!("image host returned {}", status);
        }
        res.text()
            .map_err(|e| UploadError::Network(format!("failed to read response body: {}", e)))
    }
}

/// The one thing we keep from a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadResult {
    pub link: String,
}

#[derive(Deserialize)]
struct UploadResponse {
    data: serde_json::Value,
}

/// Standard RFC 4648 base64, padded, no line breaks.
pub fn encode_image(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Pull `data.link` out of a response body.
pub fn parse_link(body: &str) -> Result<String, UploadError> {
    let resp: UploadResponse = serde_json::from_str(body)
        .map_err(|e| UploadError::Protocol(format!("invalid JSON body: {}", e)))?;

    if !resp.data.is_object() {
        return Err(UploadError::Protocol("`data` is not an object".into()));
    }
    match UploadResult::deserialize(&resp.data) {
        Ok(result) => Ok(result.link),
        Err(e) => {
            // Error responses carry a message under `data.error`; show it.
            let detail = resp
                .data
                .get("error")
                .map(|v| match v.as_str() {
                    Some(s) => s.to_string(),
                    None => v.to_string(),
                })
                .unwrap_or_else(|| e.to_string());
            Err(UploadError::Protocol(format!("no link in response: {}", detail)))
        }
    }
}

/// Uploads images with a given transport and configuration.
pub struct Uploader<T: Transport> {
    transport: T,
    config: UploadConfig,
}

impl<T: Transport> Uploader<T> {
    pub fn new(transport: T, config: UploadConfig) -> Self {
        Uploader { transport, config }
    }

    pub fn config(&self) -> &UploadConfig {
        &self.config
    }

    /// Read `path`, send it base64-encoded as the `image` form field and
    /// return the hosted link. The file is read before anything is sent.
    pub fn upload(&self, path: &Path) -> Result<String, UploadError> {
        let bytes = std::fs::read(path).map_err(|source| UploadError::File {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("read {} bytes from {}", bytes.len(), path.display());

        let encoded = encode_image(&bytes);
        log::debug!("posting image to {}", self.config.endpoint());
        let body = self.transport.post_form(
            self.config.endpoint(),
            &self.config.authorization_header(),
            &[("image", encoded.as_str())],
        )?;

        let link = parse_link(&body)?;
        log::info!("uploaded {} to {}", path.display(), link);
        Ok(link)
    }
}

impl Uploader<HttpTransport> {
    /// Uploader talking to the real endpoint named in `config`.
    pub fn from_config(config: UploadConfig) -> Result<Self, UploadError> {
        let transport = HttpTransport::from_config(&config)?;
        Ok(Uploader::new(transport, config))
    }
}

/// Upload the image at `path` to the default endpoint using `client_id`.
pub fn upload(path: impl AsRef<Path>, client_id: &str) -> Result<String, UploadError> {
    let config = UploadConfig::new(client_id)?;
    Uploader::from_config(config)?.upload(path.as_ref())
}
