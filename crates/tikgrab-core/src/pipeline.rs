//! The resolution pipeline: one page URL in, one saved media file out.
//!
//! Composes validation, lookup, link extraction, filename derivation, and
//! fetch strictly in sequence. A failure at any step aborts the run for that
//! input; nothing propagates past this boundary and there are no retries.

use crate::config::TikgrabConfig;
use crate::error::TransferError;
use crate::extract;
use crate::fetch::{DownloadOutcome, FetchError, MediaFetcher};
use crate::filename;
use crate::lookup::LookupClient;
use crate::storage::OutputDir;
use crate::validate;
use anyhow::Result;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Which pipeline step failed for a given input. These are expected
/// outcomes, not faults: the caller reports them and keeps running.
#[derive(Debug, Error)]
pub enum StepFailure {
    /// Input is not a TikTok page URL; no network call was made.
    #[error("not a valid TikTok URL")]
    InvalidUrl,
    /// The lookup request failed.
    #[error("lookup failed: {0}")]
    Lookup(#[source] TransferError),
    /// Lookup succeeded but the markup held no qualifying download link.
    #[error("no download link found in the result")]
    LinkNotFound,
    /// The media download or the local write failed.
    #[error("download failed: {0}")]
    Fetch(#[source] FetchError),
}

pub struct Pipeline {
    lookup: LookupClient,
    fetcher: MediaFetcher,
    output: OutputDir,
}

impl Pipeline {
    /// Build a pipeline from config, creating the output directory.
    pub fn new(config: &TikgrabConfig) -> Result<Self> {
        let output = OutputDir::create(config.output_dir.clone())?;
        tracing::info!(output_dir = %output.path().display(), "pipeline ready");
        Ok(Self {
            lookup: LookupClient::new(config),
            fetcher: MediaFetcher::new(Duration::from_secs(config.download_timeout_secs)),
            output,
        })
    }

    /// Run the full pipeline for one page URL.
    pub fn process(&self, url: &str) -> Result<DownloadOutcome, StepFailure> {
        if !validate::is_tiktok_url(url) {
            return Err(StepFailure::InvalidUrl);
        }

        let markup = self.lookup.resolve(url).map_err(StepFailure::Lookup)?;

        let link = extract::extract_download_link(&markup).ok_or(StepFailure::LinkNotFound)?;
        tracing::info!(link = %link, "download URL resolved");

        let name = filename::filename_for_link(&link);

        self.fetcher
            .fetch(&link, &name, &self.output)
            .map_err(StepFailure::Fetch)
    }

    /// Probe the lookup endpoint; used as a startup gate.
    pub fn check_connection(&self) -> bool {
        self.lookup.check_connection()
    }

    /// Directory downloads are saved into.
    pub fn output_dir(&self) -> &Path {
        self.output.path()
    }
}
