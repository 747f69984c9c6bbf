//! `relswap release` – show a release and its assets.

use anyhow::{Context, Result};
use relswap_core::config::RelswapConfig;
use relswap_core::release::{fetch_release, ReleaseMetadata};
use relswap_core::secrets::SecretProvider;

/// Look up `tag` on a blocking thread. `proxy` overrides the configured endpoint.
pub(crate) async fn lookup_release(
    cfg: &RelswapConfig,
    secrets: &dyn SecretProvider,
    tag: &str,
    proxy: Option<String>,
) -> Result<ReleaseMetadata> {
    let source = cfg.release_source();
    let options = cfg.transfer_options();
    let token = secrets.auth_token();
    let proxy = proxy.or_else(|| secrets.proxy_endpoint());
    let owned_tag = tag.to_string();

    let release = tokio::task::spawn_blocking(move || {
        fetch_release(
            &source,
            &owned_tag,
            token.as_deref(),
            proxy.as_deref(),
            &options,
        )
    })
    .await?
    .with_context(|| format!("looking up release {tag}"))?;
    Ok(release)
}

pub async fn run_release(
    cfg: &RelswapConfig,
    secrets: &dyn SecretProvider,
    tag: &str,
    proxy: Option<String>,
) -> Result<()> {
    let release = lookup_release(cfg, secrets, tag, proxy).await?;
    println!(
        "{} (id {}, published {})",
        release.name,
        release.id,
        release.published_at.format("%Y-%m-%d %H:%M UTC")
    );
    if release.assets.is_empty() {
        println!("No assets attached.");
    } else {
        for asset in &release.assets {
            println!("  {:<32} {}", asset.name, asset.download_url);
        }
    }
    Ok(())
}
