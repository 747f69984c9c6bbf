//! `relswap download` – install straight from a URL.

use anyhow::Result;
use relswap_core::config::RelswapConfig;
use relswap_core::secrets::SecretProvider;

use super::install::swap_from_url;
use crate::cli::SwapArgs;

pub async fn run_download(
    cfg: &RelswapConfig,
    secrets: &dyn SecretProvider,
    url: String,
    swap: SwapArgs,
) -> Result<()> {
    let title = format!("Downloading {}", url);
    swap_from_url(cfg, secrets, url, title, swap).await
}
