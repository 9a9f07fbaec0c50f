// UI layer: parses the command line, wires configuration into the
// uploader and reports the outcome. Only the link goes to stdout so the
// output can be piped; everything else goes to stderr.

use crate::api::{Transport, Uploader};
use crate::config::{self, UploadConfig, CLIENT_ID_ENV, DEFAULT_IMAGE_PATH, ENDPOINT_ENV};
use crate::error::UploadError;
use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

/// Upload an image to Imgur and print its public link.
#[derive(Debug, Parser)]
#[command(name = "imgur-upload", version)]
pub struct Cli {
    /// Image file to upload
    #[arg(default_value = DEFAULT_IMAGE_PATH)]
    pub path: PathBuf,

    /// Imgur application client id (prompted for on a terminal if unset)
    #[arg(long, env = CLIENT_ID_ENV, hide_env_values = true)]
    pub client_id: Option<String>,

    /// Upload endpoint
    #[arg(long, env = ENDPOINT_ENV)]
    pub endpoint: Option<String>,

    /// Give up on the request after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

impl Cli {
    /// Turn parsed arguments into an upload config. May prompt for the
    /// client id when none was given and stdin is a terminal.
    pub fn to_config(&self) -> Result<UploadConfig, UploadError> {
        let client_id = config::resolve_client_id(self.client_id.clone())?;
        let mut config = UploadConfig::new(client_id)?;
        if let Some(endpoint) = &self.endpoint {
            config = config.with_endpoint(endpoint)?;
        }
        if let Some(secs) = self.timeout {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }
}

/// Run one upload and write the result. Returns the process exit code;
/// an `Err` means the result itself could not be written out.
pub fn run(cli: &Cli) -> Result<i32> {
    let uploader = match cli.to_config().and_then(Uploader::from_config) {
        Ok(uploader) => uploader,
        Err(e) => return report_error(&e, &mut std::io::stderr()),
    };
    run_with(&uploader, cli, &mut std::io::stdout(), &mut std::io::stderr())
}

/// Same as `run` but with an injected uploader and output streams.
pub fn run_with<T: Transport>(
    uploader: &Uploader<T>,
    cli: &Cli,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<i32> {
    log::debug!("using {:?}", uploader.config());
    match uploader.upload(&cli.path) {
        Ok(link) => {
            writeln!(out, "{}", link).context("Failed to write link")?;
            Ok(0)
        }
        Err(e) => report_error(&e, err),
    }
}

fn report_error(e: &UploadError, err: &mut dyn Write) -> Result<i32> {
    writeln!(err, "error: {}", e).context("Failed to write error message")?;
    Ok(e.exit_code())
}
