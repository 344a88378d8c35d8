//! Error types for line assembly operations.
//!
//! This module provides the error hierarchy using `thiserror` for all
//! assembler operations: descriptor validation, chunked reads, and output
//! buffer allocation.

use thiserror::Error;

/// Result type alias for assembler operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for assembler operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Read-path errors (descriptor validation, underlying reads, output
    /// allocation).
    #[error("read error: {0}")]
    Read(#[from] ReadError),

    /// CLI command errors.
    #[error("command error: {0}")]
    Command(#[from] CommandError),

    /// Configuration errors.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },
}

/// Read-path errors for a single descriptor.
#[derive(Error, Debug)]
pub enum ReadError {
    /// Descriptor identifier is not valid for reading (negative sentinel).
    ///
    /// Raised before any queue mutation; the registry is untouched.
    #[error("invalid descriptor: {fd}")]
    InvalidDescriptor {
        /// The rejected descriptor identifier.
        fd: i32,
    },

    /// The underlying read primitive signaled a fatal error.
    ///
    /// The descriptor's queue is discarded; buffered bytes from earlier
    /// reads are not recoverable.
    #[error("read failed on descriptor {fd}: {reason}")]
    Failed {
        /// Descriptor the read was issued against.
        fd: i32,
        /// Reason reported by the read primitive.
        reason: String,
    },

    /// The output line buffer could not be allocated.
    ///
    /// The descriptor's queue is left exactly as it was before the
    /// attempt, so the call may be retried.
    #[error("failed to allocate line buffer of {requested} bytes")]
    AllocationFailed {
        /// Number of bytes the failed allocation requested.
        requested: usize,
    },
}

/// CLI command-specific errors.
#[derive(Error, Debug)]
pub enum CommandError {
    /// A file named on the command line could not be opened.
    #[error("failed to open {path}: {reason}")]
    FileOpen {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },
}

impl ReadError {
    /// Wraps an I/O error from the read primitive with descriptor context.
    #[must_use]
    pub fn from_io(fd: i32, err: &std::io::Error) -> Self {
        Self::Failed {
            fd,
            reason: err.to_string(),
        }
    }
}
