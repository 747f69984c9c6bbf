//! Destination file for a download, optionally behind a gzip decoder.

use crate::error::{Error, Result};
use flate2::write::MultiGzDecoder;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

enum Sink {
    Plain(File),
    Gunzip(MultiGzDecoder<File>),
}

/// Sequential writer for the downloaded body.
pub(crate) struct BodyWriter {
    sink: Sink,
    path: PathBuf,
}

impl BodyWriter {
    /// Create (or truncate) `path`. `mode` is applied right after creation on Unix.
    pub(crate) fn create(path: &Path, mode: Option<u32>, decompress: bool) -> Result<Self> {
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(|e| Error::fs(path, e))?;
        // Set explicitly so the umask does not narrow the requested bits.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = mode {
                file.set_permissions(std::fs::Permissions::from_mode(mode))
                    .map_err(|e| Error::fs(path, e))?;
            }
        }
        #[cfg(not(unix))]
        let _ = mode;
        let sink = if decompress {
            Sink::Gunzip(MultiGzDecoder::new(file))
        } else {
            Sink::Plain(file)
        };
        Ok(Self {
            sink,
            path: path.to_path_buf(),
        })
    }

    pub(crate) fn write(&mut self, data: &[u8]) -> Result<()> {
        match &mut self.sink {
            Sink::Plain(f) => f.write_all(data).map_err(|e| Error::fs(&self.path, e)),
            Sink::Gunzip(d) => d.write_all(data).map_err(|e| gunzip_error(&self.path, e)),
        }
    }

    /// Flush the decoder, fsync and close. Returns bytes written to the file.
    pub(crate) fn finish(self) -> Result<u64> {
        let path = self.path;
        let file = match self.sink {
            Sink::Plain(f) => f,
            Sink::Gunzip(d) => d.finish().map_err(|e| gunzip_error(&path, e))?,
        };
        file.sync_all().map_err(|e| Error::fs(&path, e))?;
        let len = file.metadata().map_err(|e| Error::fs(&path, e))?.len();
        drop(file);
        tracing::debug!(path = %path.display(), bytes = len, "download file closed");
        Ok(len)
    }
}

/// Errors out of the decoder are either bad input or the file underneath failing.
fn gunzip_error(path: &Path, e: io::Error) -> Error {
    match e.kind() {
        io::ErrorKind::InvalidData
        | io::ErrorKind::InvalidInput
        | io::ErrorKind::UnexpectedEof
        | io::ErrorKind::WriteZero => Error::Gunzip {
            path: path.to_path_buf(),
            source: e,
        },
        _ => Error::fs(path, e),
    }
}
