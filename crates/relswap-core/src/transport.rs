//! Connection strategy (direct or through a forwarding proxy) and per-transfer curl knobs.

use std::time::Duration;

/// Default `User-Agent`; the GitHub API rejects requests without one.
pub const DEFAULT_USER_AGENT: &str = concat!("relswap/", env!("CARGO_PKG_VERSION"));

/// How connections are made for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transport {
    /// Connect straight to the origin. Proxy environment variables are ignored.
    Direct,
    /// Forward every connection through `endpoint` (e.g. `http://proxy.corp:3128`).
    Proxied { endpoint: String },
}

impl Transport {
    /// Pick a transport from an optional proxy endpoint. Blank endpoints mean direct.
    pub fn resolve(proxy: Option<&str>) -> Self {
        match proxy.map(str::trim) {
            Some(endpoint) if !endpoint.is_empty() => {
                tracing::debug!(proxy = endpoint, "using proxied transport");
                Transport::Proxied {
                    endpoint: endpoint.to_string(),
                }
            }
            _ => Transport::Direct,
        }
    }

    pub fn is_proxied(&self) -> bool {
        matches!(self, Transport::Proxied { .. })
    }

    pub(crate) fn apply(&self, easy: &mut curl::easy::Easy) -> Result<(), curl::Error> {
        match self {
            Transport::Direct => {
                easy.proxy("")?;
                easy.noproxy("*")?;
            }
            Transport::Proxied { endpoint } => {
                easy.proxy(endpoint)?;
            }
        }
        Ok(())
    }
}

/// Per-transfer curl options. No overall timeout is applied; callers wanting a deadline wrap the call.
#[derive(Debug, Clone)]
pub struct TransferOptions {
    pub user_agent: String,
    /// Receive buffer size (libcurl clamps to 1 KiB..10 MiB). Also bounds the chunk size
    /// handed to the write callback, hence the granularity of progress updates.
    pub receive_buffer_bytes: Option<usize>,
    pub connect_timeout: Option<Duration>,
}

impl Default for TransferOptions {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            receive_buffer_bytes: None,
            connect_timeout: None,
        }
    }
}

impl TransferOptions {
    pub(crate) fn apply(&self, easy: &mut curl::easy::Easy) -> Result<(), curl::Error> {
        easy.useragent(&self.user_agent)?;
        if let Some(sz) = self.receive_buffer_bytes {
            easy.buffer_size(sz)?;
        }
        if let Some(t) = self.connect_timeout {
            easy.connect_timeout(t)?;
        }
        Ok(())
    }
}

/// A curl handle set up for a GET of `url` over `transport`, following redirects.
pub(crate) fn prepare_get(
    url: &str,
    transport: &Transport,
    options: &TransferOptions,
) -> Result<curl::easy::Easy, curl::Error> {
    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.get(true)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    transport.apply(&mut easy)?;
    options.apply(&mut easy)?;
    Ok(easy)
}
