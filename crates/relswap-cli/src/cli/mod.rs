//! CLI for relswap: look up releases and swap installed binaries in place.

mod commands;
mod progress;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use relswap_core::config;
use relswap_core::secrets::EnvSecrets;
use std::path::PathBuf;

use commands::{run_clean, run_download, run_install, run_release};

/// Top-level CLI for relswap.
#[derive(Debug, Parser)]
#[command(name = "relswap")]
#[command(about = "relswap: install release binaries with an atomic in-place swap", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Options shared by every command that replaces a binary.
#[derive(Debug, Clone, Args)]
pub struct SwapArgs {
    /// Path of the binary to install or replace.
    #[arg(long, value_name = "PATH")]
    pub dest: PathBuf,

    /// The asset is gzip-compressed; decompress it while downloading.
    #[arg(long)]
    pub gunzip: bool,

    /// Permission bits for the new binary, in octal (e.g. 755).
    #[arg(long, value_name = "OCTAL", value_parser = parse_mode)]
    pub mode: Option<u32>,

    /// Proxy endpoint for this run, overriding config and environment.
    #[arg(long, value_name = "URL")]
    pub proxy: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Show a release and the assets attached to it.
    Release {
        /// Release tag (e.g. v1.2.3).
        tag: String,

        /// Proxy endpoint for this run, overriding config and environment.
        #[arg(long, value_name = "URL")]
        proxy: Option<String>,
    },

    /// Download a release asset and swap it into place.
    Install {
        /// Release tag (e.g. v1.2.3).
        tag: String,

        /// Name of the asset to install.
        #[arg(long)]
        asset: String,

        #[command(flatten)]
        swap: SwapArgs,
    },

    /// Download a URL directly and swap it into place.
    Download {
        /// Direct HTTP/HTTPS URL of the binary.
        url: String,

        #[command(flatten)]
        swap: SwapArgs,
    },

    /// Remove displaced binaries left next to a destination.
    Clean {
        /// Path of the installed binary.
        dest: PathBuf,
    },
}

/// Parse `--mode` as octal permission bits, accepting an optional `0o`/`0` prefix.
fn parse_mode(s: &str) -> Result<u32, String> {
    let digits = s.trim().trim_start_matches("0o");
    let mode = u32::from_str_radix(digits, 8)
        .map_err(|_| format!("'{s}' is not an octal mode (e.g. 755)"))?;
    if mode > 0o7777 {
        return Err(format!("mode {s} is out of range"));
    }
    Ok(mode)
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let secrets = EnvSecrets::new(&cfg);

        match cli.command {
            CliCommand::Release { tag, proxy } => run_release(&cfg, &secrets, &tag, proxy).await?,
            CliCommand::Install { tag, asset, swap } => {
                run_install(&cfg, &secrets, &tag, &asset, swap).await?
            }
            CliCommand::Download { url, swap } => run_download(&cfg, &secrets, url, swap).await?,
            CliCommand::Clean { dest } => run_clean(dest).await?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
