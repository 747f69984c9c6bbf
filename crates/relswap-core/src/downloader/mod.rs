//! Streaming single-GET downloader.
//!
//! Streams the response body of `url` into a local file (always a temp path
//! owned by the installer), optionally gunzipping on the way. `Content-Length`
//! is required: progress is reported against it in wire bytes, and a response
//! without it fails before anything is written to disk.

mod body;

use crate::error::{Error, Result};
use crate::progress::{ProgressAdapter, ProgressSink};
use crate::response::{DiagnosticBody, ResponseHead};
use crate::transport::{prepare_get, TransferOptions, Transport};
use body::BodyWriter;
use std::cell::RefCell;
use std::path::{Path, PathBuf};

/// One download invocation.
pub struct DownloadRequest<'a> {
    pub url: String,
    /// File to write. Created lazily once the response is known to be good.
    pub destination: PathBuf,
    /// Unix permission bits applied when the file is created.
    pub mode: Option<u32>,
    /// Gunzip the body before writing.
    pub decompress: bool,
    pub proxy: Option<String>,
    /// Operation title, for logs and UIs.
    pub title: String,
    pub options: TransferOptions,
    pub sink: &'a mut dyn ProgressSink,
}

/// Byte counts of a finished download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadSummary {
    /// Body bytes received from the wire (equals `Content-Length`).
    pub wire_bytes: u64,
    /// Size of the file on disk (differs from `wire_bytes` when decompressing).
    pub file_bytes: u64,
}

struct TransferState<'s> {
    url: &'s str,
    destination: &'s Path,
    mode: Option<u32>,
    decompress: bool,
    head: ResponseHead,
    diagnostic: DiagnosticBody,
    writer: Option<BodyWriter>,
    total: Option<u64>,
    read: u64,
    progress: ProgressAdapter<'s>,
    failure: Option<Error>,
}

impl TransferState<'_> {
    fn on_body(&mut self, data: &[u8]) -> Result<()> {
        if !self.head.is_success() {
            self.diagnostic.push(data);
            return Ok(());
        }
        let total = self.open()?;
        // Curl's buffer can exceed 1% of a small body; slice so no percentage is skipped.
        for piece in data.chunks(progress_step(total)) {
            if let Some(w) = self.writer.as_mut() {
                w.write(piece)?;
            }
            self.read += piece.len() as u64;
            self.progress.report(self.read, total);
        }
        Ok(())
    }

    /// Validate `Content-Length` and create the file on first use. Returns the total.
    fn open(&mut self) -> Result<u64> {
        if let Some(total) = self.total {
            return Ok(total);
        }
        let total = self
            .head
            .content_length()
            .ok_or_else(|| Error::ProtocolInvariant {
                url: self.url.to_string(),
                detail: "response has no valid content-length".to_string(),
            })?;
        self.writer = Some(BodyWriter::create(
            self.destination,
            self.mode,
            self.decompress,
        )?);
        self.total = Some(total);
        tracing::debug!(path = %self.destination.display(), total, "writing download");
        self.progress.report(0, total);
        Ok(total)
    }
}

/// Largest slice of body that advances the floor percentage by at most one.
fn progress_step(total: u64) -> usize {
    usize::try_from(total / 100).unwrap_or(usize::MAX).max(1)
}

/// Download `request.url` into `request.destination`.
///
/// On success the file is complete, synced and closed. On failure a partially
/// written file may remain at `destination`; nothing else is touched.
pub fn download_file(request: DownloadRequest<'_>) -> Result<DownloadSummary> {
    let DownloadRequest {
        url,
        destination,
        mode,
        decompress,
        proxy,
        title,
        options,
        sink,
    } = request;
    let transport = Transport::resolve(proxy.as_deref());
    tracing::info!(
        %title,
        %url,
        path = %destination.display(),
        decompress,
        proxied = transport.is_proxied(),
        "downloading"
    );

    let mut easy = prepare_get(&url, &transport, &options)?;
    let state = RefCell::new(TransferState {
        url: &url,
        destination: &destination,
        mode,
        decompress,
        head: ResponseHead::default(),
        diagnostic: DiagnosticBody::default(),
        writer: None,
        total: None,
        read: 0,
        progress: ProgressAdapter::new(sink),
        failure: None,
    });

    let performed = {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            state.borrow_mut().head.push_raw(data);
            true
        })?;
        transfer.write_function(|data| {
            let mut st = state.borrow_mut();
            match st.on_body(data) {
                Ok(()) => Ok(data.len()),
                Err(e) => {
                    st.failure = Some(e);
                    Ok(0) // abort transfer
                }
            }
        })?;
        transfer.perform()
    };

    let mut state = state.into_inner();
    if let Some(e) = state.failure.take() {
        tracing::error!(%url, error = %e, "download aborted");
        return Err(e);
    }
    if let Err(e) = performed {
        tracing::error!(%url, error = %e, read = state.read, "download transfer failed");
        return Err(e.into());
    }

    let status = easy.response_code()?;
    if !(200..300).contains(&status) {
        let diagnostic_body = std::mem::take(&mut state.diagnostic).into_string();
        tracing::error!(
            %url,
            status,
            headers = ?state.head.lines,
            body = %diagnostic_body,
            "download request failed"
        );
        return Err(Error::HttpStatus {
            status,
            url: url.clone(),
            tag: None,
            diagnostic_body,
            diagnostic_headers: std::mem::take(&mut state.head.lines),
        });
    }

    // Empty bodies never reach the write callback.
    let total = state.open()?;
    if state.read != total {
        return Err(Error::ProtocolInvariant {
            url: url.clone(),
            detail: format!("received {} of {} bytes", state.read, total),
        });
    }
    let file_bytes = match state.writer.take() {
        Some(w) => w.finish()?,
        None => 0,
    };
    tracing::info!(%title, wire_bytes = total, file_bytes, "download complete");
    Ok(DownloadSummary {
        wire_bytes: total,
        file_bytes,
    })
}
