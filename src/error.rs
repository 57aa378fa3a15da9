//! Reasons a value could not be read.
//!
//! These never reach callers of the `read_*` operations, which substitute
//! a default instead, but they are the error type of [Scan](crate::Scan)
//! and appear in `tracing` events.
use std::io;
use thiserror::Error;

/// Failure while scanning a value from the input stream.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The stream ended before a value was found.
    #[error("end of input")]
    EndOfInput,

    /// The line held nothing but whitespace.
    #[error("no value entered")]
    Empty,

    /// The token does not match the grammar of the target type.
    #[error("malformed {kind} `{text}`")]
    Malformed {
        /// Name of the target type.
        kind: &'static str,
        /// Text that was rejected.
        text: String,
    },

    /// The token is longer than the configured limit.
    #[error("token exceeds {limit} bytes")]
    TooLong {
        /// Configured limit in bytes.
        limit: usize,
    },

    /// The underlying reader failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ScanError {
    pub(crate) fn malformed(kind: &'static str, bytes: &[u8]) -> Self {
        Self::Malformed {
            kind,
            text: String::from_utf8_lossy(bytes).into_owned(),
        }
    }
}
