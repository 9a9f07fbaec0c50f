// Library root
// -----------
// The binary (`main.rs`) is a thin wrapper over these modules.
//
// Module responsibilities:
// - `api`: reads the image, encodes it and talks to the image host
//   through a `Transport`.
// - `config`: endpoint and client id, with validation.
// - `error`: the error kinds an upload can fail with.
// - `ui`: command line parsing and reporting the result.
pub mod api;
pub mod config;
pub mod error;
pub mod ui;

pub use api::{upload, UploadResult, Uploader};
pub use error::UploadError;
