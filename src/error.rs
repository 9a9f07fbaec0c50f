// Error taxonomy for the uploader.
// Every variant is terminal for a single call: the first failure is
// returned as-is and nothing is retried.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while resolving configuration or uploading an image.
#[derive(Debug, Error)]
pub enum UploadError {
    /// Missing or invalid client id / endpoint. Raised before any I/O.
    #[error("configuration error: {0}")]
    Config(String),

    /// The image file is missing, unreadable, or failed mid-read.
    #[error("could not read image file {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The request could not be sent or no response came back.
    #[error("request to image host failed: {0}")]
    Network(String),

    /// A response arrived but it is not JSON or has no `data.link` string.
    #[error("unexpected response from image host: {0}")]
    Protocol(String),
}

impl UploadError {
    /// Process exit status the CLI uses for this kind of failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            UploadError::Config(_) => 1,
            UploadError::File { .. } => 2,
            UploadError::Network(_) => 3,
            UploadError::Protocol(_) => 4,
        }
    }
}
