//! Media retrieval: GET the resolved link and persist it.

use crate::error::TransferError;
use crate::storage::OutputDir;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Failure of the media download step.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Transfer(#[from] TransferError),
    /// Local write failure (disk full, permissions).
    #[error("failed to save file: {0}")]
    Io(#[from] std::io::Error),
}

impl From<curl::Error> for FetchError {
    fn from(e: curl::Error) -> Self {
        FetchError::Transfer(TransferError::from(e))
    }
}

/// Result of a successful download.
#[derive(Debug, Clone)]
pub struct DownloadOutcome {
    /// Final path the file was saved at.
    pub path: PathBuf,
    /// Payload size in bytes.
    pub bytes: u64,
}

/// Downloads resolved media links with a bounded timeout.
#[derive(Debug, Clone)]
pub struct MediaFetcher {
    timeout: Duration,
}

impl MediaFetcher {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// GET `link` and write the body to `<output>/<filename>`.
    ///
    /// The link may still carry escaped-quote sequences from the markup;
    /// they are stripped here as well. The body is buffered in full and
    /// written atomically, so a failed transfer leaves no file behind.
    pub fn fetch(
        &self,
        link: &str,
        filename: &str,
        output: &OutputDir,
    ) -> Result<DownloadOutcome, FetchError> {
        let link = link.replace("\\\"", "");
        tracing::info!(filename, "downloading media");

        let mut easy = curl::easy::Easy::new();
        easy.url(&link)?;
        easy.follow_location(true)?;
        easy.timeout(self.timeout)?;

        let mut body = Vec::new();
        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        if !(200..300).contains(&code) {
            tracing::warn!(link = %link, code, "media download rejected");
            return Err(TransferError::Http(code).into());
        }

        let size_mb = body.len() as f64 / (1024.0 * 1024.0);
        tracing::info!("media received: {:.2} MB", size_mb);

        let path = output.write_atomic(filename, &body)?;
        tracing::info!(path = %path.display(), "media saved");

        Ok(DownloadOutcome {
            path,
            bytes: body.len() as u64,
        })
    }
}
