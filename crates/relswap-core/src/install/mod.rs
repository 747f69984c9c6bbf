//! Atomic replacement of an installed binary.
//!
//! Phases: derive paths → download to temp → displace the old binary →
//! rename the new one into place → remove displaced artifacts. The first two
//! are fatal for the call; the rest are best-effort and only logged, with the
//! outcome recorded in [`InstallReport`].
//!
//! Installs of the same destination must be serialized by the caller: two
//! concurrent installs get distinct temp names, but the last rename wins and
//! either cleanup pass may delete the other's displaced artifact.

mod stale;
mod transaction;

pub use stale::{is_stale_name, stale_entries, stale_name, STALE_MARKER};
pub use transaction::{
    cleanup_stale, new_token, CleanupReport, InstallTransaction, PhaseOutcome, TOKEN_LEN,
};

use crate::downloader::{download_file, DownloadRequest, DownloadSummary};
use crate::error::Result;
use crate::progress::ProgressSink;
use crate::transport::TransferOptions;
use std::path::{Path, PathBuf};

/// Everything a [`DownloadRequest`] needs except the destination, which the installer picks.
pub struct InstallSource<'a> {
    pub url: String,
    pub mode: Option<u32>,
    pub decompress: bool,
    pub proxy: Option<String>,
    pub title: String,
    pub options: TransferOptions,
    pub sink: &'a mut dyn ProgressSink,
}

impl<'a> InstallSource<'a> {
    pub fn into_request(self, destination: PathBuf) -> DownloadRequest<'a> {
        DownloadRequest {
            url: self.url,
            destination,
            mode: self.mode,
            decompress: self.decompress,
            proxy: self.proxy,
            title: self.title,
            options: self.options,
            sink: self.sink,
        }
    }
}

/// Outcome of the non-fatal phases of an install.
#[derive(Debug)]
pub struct InstallReport {
    pub destination: PathBuf,
    pub download: DownloadSummary,
    pub displace: PhaseOutcome,
    pub swap: PhaseOutcome,
    /// The old binary was moved back after a failed swap.
    pub restored: bool,
    /// `None` when cleanup was skipped because the swap failed.
    pub cleanup: Option<CleanupReport>,
}

impl InstallReport {
    /// Whether the new binary is now at the destination.
    pub fn is_installed(&self) -> bool {
        self.swap.is_done()
    }
}

/// Download `source` and atomically put it at `destination`.
///
/// Returns `Err` only if the paths cannot be derived or the download fails; in
/// that case `destination` is untouched. A failed swap is logged and reported
/// through [`InstallReport::is_installed`], not as an error.
pub fn install(source: InstallSource<'_>, destination: &Path) -> Result<InstallReport> {
    let tx = InstallTransaction::derive(destination)?;
    tracing::debug!(
        destination = %destination.display(),
        temp = %tx.temp_path().display(),
        displaced = %tx.displaced_path().display(),
        "install transaction"
    );

    let download = match download_file(source.into_request(tx.temp_path().to_path_buf())) {
        Ok(summary) => summary,
        Err(e) => {
            tx.discard_temp();
            return Err(e);
        }
    };

    let displace = tx.displace_existing();
    let swap = tx.install_new();
    if swap.is_failed() {
        let restored = tx.restore_displaced();
        tx.discard_temp();
        return Ok(InstallReport {
            destination: destination.to_path_buf(),
            download,
            displace,
            swap,
            restored,
            cleanup: None,
        });
    }

    let cleanup = tx.cleanup_stale();
    if !cleanup.failed.is_empty() {
        tracing::warn!(
            count = cleanup.failed.len(),
            "some stale binaries could not be removed; they will be retried on the next install"
        );
    }
    Ok(InstallReport {
        destination: destination.to_path_buf(),
        download,
        displace,
        swap,
        restored: false,
        cleanup: Some(cleanup),
    })
}
