//! `relswap clean` – remove displaced binaries next to a destination.

use anyhow::{bail, Result};
use relswap_core::install::cleanup_stale;
use std::path::PathBuf;

pub async fn run_clean(dest: PathBuf) -> Result<()> {
    let report = tokio::task::spawn_blocking(move || cleanup_stale(&dest)).await??;

    if let Some(err) = &report.listing_error {
        bail!("could not list the destination directory: {err}");
    }
    if report.removed.is_empty() && report.failed.is_empty() {
        println!("No stale binaries found.");
    }
    for path in &report.removed {
        println!("removed {}", path.display());
    }
    for path in &report.failed {
        eprintln!("warning: could not remove {}", path.display());
    }
    Ok(())
}
