//! Logging setup: one `tracing-subscriber` fmt layer writing to the XDG state
//! log file, or to stderr when that file cannot be opened.

use anyhow::Result;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

/// Filter used when neither `RELSWAP_LOG` nor `RUST_LOG` is set.
pub const DEFAULT_FILTER: &str = "info,relswap_core=debug,relswap=debug";

/// Project-specific filter variable, checked before `RUST_LOG`.
pub const LOG_ENV_VAR: &str = "RELSWAP_LOG";

pub const LOG_FILE_NAME: &str = "relswap.log";

/// Where log records go once [`init_logging`] has run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    File(PathBuf),
    Stderr,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// `$XDG_STATE_HOME/relswap`.
pub fn log_dir() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("relswap")?;
    Ok(xdg_dirs.get_state_home())
}

/// Open `dir/relswap.log` for appending, creating `dir` as needed.
fn open_log_file(dir: &Path) -> io::Result<(File, PathBuf)> {
    fs::create_dir_all(dir)?;
    let path = dir.join(LOG_FILE_NAME);
    let file = fs::OpenOptions::new().create(true).append(true).open(&path)?;
    Ok((file, path))
}

/// Install the global subscriber and report where it writes.
///
/// Never fails: an unusable state directory degrades to stderr, and a
/// subscriber installed earlier by an embedding program is left in place.
pub fn init_logging() -> LogTarget {
    let opened = log_dir().and_then(|dir| Ok(open_log_file(&dir)?));
    let (writer, target, fallback) = match opened {
        Ok((file, path)) => (
            BoxMakeWriter::new(Mutex::new(file)),
            LogTarget::File(path),
            None,
        ),
        Err(e) => (BoxMakeWriter::new(io::stderr), LogTarget::Stderr, Some(e)),
    };

    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .is_ok();

    if let Some(e) = fallback {
        tracing::warn!("file logging unavailable, writing to stderr: {:#}", e);
    } else if let (true, LogTarget::File(path)) = (installed, &target) {
        tracing::info!(path = %path.display(), "relswap logging initialized");
    }
    target
}
