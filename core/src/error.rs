use thiserror::Error;

/// Errors raised by index storage and query evaluation.
#[derive(Error, Debug)]
pub enum Error {
    #[error("malformed query at token {position}: {reason}")]
    MalformedQuery { position: usize, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("meta file error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupt index: {0}")]
    CorruptIndex(String),

    #[error("unsupported index format version {found}, expected {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("index checksum mismatch: stored {expected:#010x}, computed {actual:#010x}")]
    ChecksumMismatch { expected: u32, actual: u32 },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn malformed(position: usize, reason: impl Into<String>) -> Self {
        Error::MalformedQuery { position, reason: reason.into() }
    }

    pub(crate) fn corrupt(reason: impl Into<String>) -> Self {
        Error::CorruptIndex(reason.into())
    }

    /// True for errors caused by the query text rather than the index.
    pub fn is_query_error(&self) -> bool {
        matches!(self, Error::MalformedQuery { .. })
    }
}
