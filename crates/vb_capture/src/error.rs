use std::path::PathBuf;

/// Errors raised while reading pose frames.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("Recording not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed frame on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode frame: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Capture thread failed to start: {0}")]
    Spawn(String),
}

pub type CaptureResult<T> = Result<T, CaptureError>;
