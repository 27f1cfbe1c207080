//! Bounded capture of child process output

use std::io;
use tokio::io::{AsyncRead, AsyncReadExt};

#[derive(Debug)]
pub(super) enum CaptureError {
    Overflow { stream: &'static str, limit: usize },
    Io { stream: &'static str, source: io::Error },
}

impl std::fmt::Display for CaptureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CaptureError::Overflow { stream, limit } => {
                write!(f, "{} exceeded the {} byte output limit", stream, limit)
            }
            CaptureError::Io { stream, source } => {
                write!(f, "failed to read {}: {}", stream, source)
            }
        }
    }
}

/// Read a pipe to EOF, failing as soon as more than `limit` bytes arrive
pub(super) async fn read_bounded<R: AsyncRead + Unpin>(
    reader: R,
    limit: usize,
    stream: &'static str,
) -> Result<Vec<u8>, CaptureError> {
    let mut buf = Vec::new();
    // One byte past the limit is enough to know it was exceeded
    let mut limited = reader.take(limit as u64 + 1);
    limited
        .read_to_end(&mut buf)
        .await
        .map_err(|source| CaptureError::Io { stream, source })?;

    if buf.len() > limit {
        return Err(CaptureError::Overflow { stream, limit });
    }
    Ok(buf)
}
