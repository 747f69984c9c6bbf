//! `relswap install` – install a release asset.

use anyhow::{bail, Result};
use relswap_core::config::RelswapConfig;
use relswap_core::install::{install, InstallReport, InstallSource, PhaseOutcome};
use relswap_core::secrets::SecretProvider;

use super::release::lookup_release;
use crate::cli::progress::CliProgress;
use crate::cli::SwapArgs;

pub async fn run_install(
    cfg: &RelswapConfig,
    secrets: &dyn SecretProvider,
    tag: &str,
    asset_name: &str,
    swap: SwapArgs,
) -> Result<()> {
    let release = lookup_release(cfg, secrets, tag, swap.proxy.clone()).await?;
    let Some(asset) = release.asset(asset_name) else {
        let available: Vec<&str> = release.asset_names().collect();
        bail!(
            "release {} has no asset named {asset_name} (available: {})",
            tag,
            available.join(", ")
        );
    };
    let title = format!("Downloading {} {}", asset.name, tag);
    swap_from_url(cfg, secrets, asset.download_url.clone(), title, swap).await
}

/// Download `url` on a blocking thread and swap it into `swap.dest`.
pub(crate) async fn swap_from_url(
    cfg: &RelswapConfig,
    secrets: &dyn SecretProvider,
    url: String,
    title: String,
    swap: SwapArgs,
) -> Result<()> {
    let options = cfg.transfer_options();
    let proxy = swap.proxy.or_else(|| secrets.proxy_endpoint());
    let dest = swap.dest;
    let mode = swap.mode;
    let decompress = swap.gunzip;

    let report = tokio::task::spawn_blocking(move || {
        let mut progress = CliProgress::for_stderr(&title);
        let source = InstallSource {
            url,
            mode,
            decompress,
            proxy,
            title,
            options,
            sink: &mut progress,
        };
        let result = install(source, &dest);
        progress.finish();
        result
    })
    .await??;

    print_report(&report)
}

fn print_report(report: &InstallReport) -> Result<()> {
    let dest = report.destination.display();
    if !report.is_installed() {
        if let PhaseOutcome::Failed(err) = &report.swap {
            eprintln!("warning: could not move the new binary into place: {err}");
        }
        if report.restored {
            eprintln!("warning: the previous binary was restored at {dest}");
        }
        bail!("install into {dest} did not complete");
    }

    println!(
        "Installed {dest} ({} bytes downloaded, {} bytes written)",
        report.download.wire_bytes, report.download.file_bytes
    );
    if let Some(cleanup) = &report.cleanup {
        if !cleanup.removed.is_empty() {
            println!("Removed {} stale binary(ies).", cleanup.removed.len());
        }
        for path in &cleanup.failed {
            eprintln!("warning: could not remove {}", path.display());
        }
    }
    Ok(())
}
