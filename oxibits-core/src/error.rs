//! Error types for bit buffer operations.
//!
//! Out-of-range positions, rejected arguments, exhausted input and failures
//! from an external byte source each get their own variant so callers can
//! tell a drained buffer apart from a genuine I/O problem.

use std::io;
use thiserror::Error;

/// The main error type for OxiBits operations.
#[derive(Debug, Error)]
pub enum BitBufferError {
    /// Bit offset outside the active window.
    #[error("Invalid bit index {index}: active window holds {len} bits")]
    InvalidIndex {
        /// The offending offset, relative to the front of the window.
        index: usize,
        /// Number of active bits at the time of the call.
        len: usize,
    },

    /// Argument rejected before any state was touched.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the rejected argument.
        message: String,
    },

    /// Nothing left to consume.
    #[error("Input exhausted")]
    Exhausted,

    /// I/O error from an external byte source.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias for OxiBits operations.
pub type Result<T> = std::result::Result<T, BitBufferError>;

impl BitBufferError {
    /// Create an invalid index error.
    pub fn invalid_index(index: usize, len: usize) -> Self {
        Self::InvalidIndex { index, len }
    }

    /// Create an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Returns `true` if this error signals end of input rather than a failure.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted)
    }
}

impl From<BitBufferError> for io::Error {
    fn from(err: BitBufferError) -> Self {
        match err {
            BitBufferError::Io(e) => e,
            BitBufferError::Exhausted => {
                io::Error::new(io::ErrorKind::UnexpectedEof, "input exhausted")
            }
            other => io::Error::new(io::ErrorKind::InvalidInput, other),
        }
    }
}
