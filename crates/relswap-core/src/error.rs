//! Error type shared by the release fetcher, downloader and installer.

use std::io;
use std::path::{Path, PathBuf};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Final response had a non-2xx status. Headers and (capped) body are kept for diagnostics.
    #[error("{} returned HTTP {status}{}", .url, release_suffix(.tag))]
    HttpStatus {
        status: u32,
        url: String,
        /// Release tag, when the failing request was a metadata lookup.
        tag: Option<String>,
        diagnostic_body: String,
        diagnostic_headers: Vec<String>,
    },

    /// The server broke an assumption the transfer depends on (missing content-length, short body).
    #[error("protocol error from {url}: {detail}")]
    ProtocolInvariant { url: String, detail: String },

    #[error("network error: {0}")]
    Network(#[from] curl::Error),

    #[error("{}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The body could not be gunzipped (corrupt, truncated or not gzip at all).
    #[error("could not gunzip download into {}: {source}", .path.display())]
    Gunzip {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid release metadata: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid URL {url}: {detail}")]
    InvalidUrl { url: String, detail: String },

    #[error("destination has no file name: {}", .path.display())]
    InvalidDestination { path: PathBuf },
}

fn release_suffix(tag: &Option<String>) -> String {
    match tag {
        Some(t) => format!(" for release {t}"),
        None => String::new(),
    }
}

impl Error {
    pub(crate) fn fs(path: &Path, source: io::Error) -> Self {
        Error::Filesystem {
            path: path.to_path_buf(),
            source,
        }
    }

    /// HTTP status code, if this error came from a non-success response.
    pub fn status(&self) -> Option<u32> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
