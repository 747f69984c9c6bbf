//! Release metadata lookup by tag.
//!
//! One GET against `<base>/repos/<owner>/<repo>/releases/tags/<tag>`, routed
//! through the configured transport. Non-success responses are logged with
//! their headers and body and surface as [`Error::HttpStatus`].

mod types;

pub use types::{Asset, ReleaseMetadata};

use crate::error::{Error, Result};
use crate::response::{DiagnosticBody, ResponseHead};
use crate::transport::{prepare_get, TransferOptions, Transport};
use url::Url;

/// Media type pinning the v3 JSON representation.
pub const ACCEPT_MEDIA_TYPE: &str = "application/vnd.github.v3+json";

/// Where releases are looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseSource {
    /// API root, e.g. `https://api.github.com`.
    pub base_url: String,
    pub owner: String,
    pub repo: String,
}

impl ReleaseSource {
    pub fn new(base_url: impl Into<String>, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Endpoint for `tag`; every path segment is percent-encoded.
    pub fn tag_url(&self, tag: &str) -> Result<Url> {
        let invalid = |detail: String| Error::InvalidUrl {
            url: self.base_url.clone(),
            detail,
        };
        let mut url = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| invalid("cannot be a base URL".to_string()))?
            .pop_if_empty()
            .extend([
                "repos",
                self.owner.as_str(),
                self.repo.as_str(),
                "releases",
                "tags",
                tag,
            ]);
        Ok(url)
    }
}

/// Fetch metadata for `tag`. `auth_token` is sent as `Authorization: token <t>`.
pub fn fetch_release(
    source: &ReleaseSource,
    tag: &str,
    auth_token: Option<&str>,
    proxy: Option<&str>,
    options: &TransferOptions,
) -> Result<ReleaseMetadata> {
    let url = source.tag_url(tag)?;
    let transport = Transport::resolve(proxy);
    tracing::debug!(%url, tag, proxied = transport.is_proxied(), "fetching release metadata");

    let mut easy = prepare_get(url.as_str(), &transport, options)?;
    let mut list = curl::easy::List::new();
    list.append(&format!("Accept: {ACCEPT_MEDIA_TYPE}"))?;
    if let Some(token) = auth_token {
        list.append(&format!("Authorization: token {}", token.trim()))?;
    }
    easy.http_headers(list)?;

    let mut head = ResponseHead::default();
    let mut body = Vec::new();
    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            head.push_raw(data);
            true
        })?;
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let status = easy.response_code()?;
    if !(200..300).contains(&status) {
        let mut diagnostic = DiagnosticBody::default();
        diagnostic.push(&body);
        let diagnostic_body = diagnostic.into_string();
        tracing::error!(
            %url,
            tag,
            status,
            headers = ?head.lines,
            body = %diagnostic_body,
            "release metadata request failed"
        );
        return Err(Error::HttpStatus {
            status,
            url: url.to_string(),
            tag: Some(tag.to_string()),
            diagnostic_body,
            diagnostic_headers: head.lines,
        });
    }

    let release: ReleaseMetadata = serde_json::from_slice(&body)?;
    tracing::debug!(
        tag,
        name = %release.name,
        id = release.id,
        assets = release.assets.len(),
        "release metadata fetched"
    );
    Ok(release)
}
