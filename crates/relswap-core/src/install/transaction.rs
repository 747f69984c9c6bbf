//! The paths of one install attempt and the filesystem phases that move them.
//!
//! All three paths live in the destination's directory so every rename stays
//! on one filesystem. Each phase is a single call that logs its own failure
//! and reports an outcome; none of them propagate errors.

use super::stale::{stale_entries, stale_name};
use crate::error::{Error, Result};
use std::io;
use std::path::{Path, PathBuf};

/// Length of the random token appended to temp and displaced names (hex chars).
pub const TOKEN_LEN: usize = 10;

/// Fresh random token, lowercase hex.
pub fn new_token() -> String {
    let mut s = uuid::Uuid::new_v4().simple().to_string();
    s.truncate(TOKEN_LEN);
    s
}

/// Result of one best-effort phase.
#[derive(Debug)]
pub enum PhaseOutcome {
    Done,
    /// Nothing to do (e.g. no previous binary to displace).
    Skipped,
    /// Failed; already logged.
    Failed(Error),
}

impl PhaseOutcome {
    pub fn is_done(&self) -> bool {
        matches!(self, PhaseOutcome::Done)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, PhaseOutcome::Failed(_))
    }
}

/// What a cleanup pass removed and what it could not.
#[derive(Debug, Default)]
pub struct CleanupReport {
    pub removed: Vec<PathBuf>,
    pub failed: Vec<PathBuf>,
    /// Set when the directory could not be listed at all.
    pub listing_error: Option<Error>,
}

/// Destination split into the parts stale names are built from.
#[derive(Debug, Clone)]
struct NameParts {
    dir: PathBuf,
    stem: String,
    /// With leading dot, or empty.
    ext: String,
}

impl NameParts {
    fn of(destination: &Path) -> Result<Self> {
        let invalid = || Error::InvalidDestination {
            path: destination.to_path_buf(),
        };
        let stem = destination
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(invalid)?
            .to_string();
        let ext = match destination.extension() {
            Some(e) => format!(".{}", e.to_str().ok_or_else(invalid)?),
            None => String::new(),
        };
        let dir = match destination.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Ok(Self { dir, stem, ext })
    }
}

/// Temp, destination and displaced paths for one install attempt.
#[derive(Debug, Clone)]
pub struct InstallTransaction {
    destination: PathBuf,
    parts: NameParts,
    temp_path: PathBuf,
    displaced_path: PathBuf,
}

impl InstallTransaction {
    /// Derive paths for `destination` with a fresh random token.
    pub fn derive(destination: &Path) -> Result<Self> {
        Self::with_token(destination, &new_token())
    }

    pub fn with_token(destination: &Path, token: &str) -> Result<Self> {
        let parts = NameParts::of(destination)?;
        let temp_path = parts.dir.join(format!("{}{}", parts.stem, token));
        let displaced_path = parts.dir.join(stale_name(&parts.stem, token, &parts.ext));
        Ok(Self {
            destination: destination.to_path_buf(),
            parts,
            temp_path,
            displaced_path,
        })
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    pub fn displaced_path(&self) -> &Path {
        &self.displaced_path
    }

    /// Move the current destination aside so an in-use binary keeps running from its new name.
    pub fn displace_existing(&self) -> PhaseOutcome {
        match std::fs::rename(&self.destination, &self.displaced_path) {
            Ok(()) => {
                tracing::info!(
                    from = %self.destination.display(),
                    to = %self.displaced_path.display(),
                    "displaced previous binary"
                );
                PhaseOutcome::Done
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.destination.display(), "no previous binary to displace");
                PhaseOutcome::Skipped
            }
            Err(e) => {
                tracing::error!(
                    from = %self.destination.display(),
                    to = %self.displaced_path.display(),
                    error = %e,
                    "failed to displace previous binary"
                );
                PhaseOutcome::Failed(Error::fs(&self.destination, e))
            }
        }
    }

    /// Rename the downloaded temp file onto the destination, replacing whatever is there.
    pub fn install_new(&self) -> PhaseOutcome {
        match std::fs::rename(&self.temp_path, &self.destination) {
            Ok(()) => {
                tracing::info!(path = %self.destination.display(), "installed new binary");
                PhaseOutcome::Done
            }
            Err(e) => {
                tracing::error!(
                    from = %self.temp_path.display(),
                    to = %self.destination.display(),
                    error = %e,
                    "failed to install new binary"
                );
                PhaseOutcome::Failed(Error::fs(&self.temp_path, e))
            }
        }
    }

    /// Put the displaced binary back if the destination is empty. Returns whether it was restored.
    pub fn restore_displaced(&self) -> bool {
        if self.destination.exists() || !self.displaced_path.exists() {
            return false;
        }
        match std::fs::rename(&self.displaced_path, &self.destination) {
            Ok(()) => {
                tracing::warn!(path = %self.destination.display(), "restored previous binary");
                true
            }
            Err(e) => {
                tracing::error!(
                    from = %self.displaced_path.display(),
                    error = %e,
                    "failed to restore previous binary"
                );
                false
            }
        }
    }

    /// Remove the temp file if it is still there.
    pub fn discard_temp(&self) {
        match std::fs::remove_file(&self.temp_path) {
            Ok(()) => tracing::debug!(path = %self.temp_path.display(), "removed temp file"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(path = %self.temp_path.display(), error = %e, "could not remove temp file"),
        }
    }

    /// Delete every displaced artifact of this destination, including older attempts'.
    pub fn cleanup_stale(&self) -> CleanupReport {
        cleanup_parts(&self.parts)
    }
}

/// Cleanup pass for `destination` outside of an install (e.g. after the old binary exited).
pub fn cleanup_stale(destination: &Path) -> Result<CleanupReport> {
    Ok(cleanup_parts(&NameParts::of(destination)?))
}

fn cleanup_parts(parts: &NameParts) -> CleanupReport {
    let mut report = CleanupReport::default();
    let names: Vec<String> = match std::fs::read_dir(&parts.dir) {
        Ok(rd) => rd
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect(),
        Err(e) => {
            tracing::error!(dir = %parts.dir.display(), error = %e, "failed to list directory for cleanup");
            report.listing_error = Some(Error::fs(&parts.dir, e));
            return report;
        }
    };

    for name in stale_entries(&names, &parts.stem, &parts.ext) {
        let path = parts.dir.join(&name);
        match std::fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "removed stale binary");
                report.removed.push(path);
            }
            Err(e) => {
                // Typically still running (Windows); the next pass retries.
                tracing::error!(path = %path.display(), error = %e, "failed to remove stale binary");
                report.failed.push(path);
            }
        }
    }
    report
}
