//! # lineq-rs
//!
//! Buffered line extraction over raw file descriptors.
//!
//! lineq-rs returns successive newline-terminated lines from a readable
//! descriptor's byte stream, one call at a time, until the stream is
//! exhausted. Bytes read past a newline stay queued per descriptor, so
//! multiple independent descriptors can be read in an interleaved fashion
//! without corrupting each other's pending state.
//!
//! ## Features
//!
//! - **Per-descriptor queues**: pending bytes survive across calls
//! - **Chunk-size independence**: any read granularity >= 1 byte yields
//!   identical lines
//! - **Pluggable sources**: `read(2)`-backed or in-memory streams behind
//!   one trait
//! - **Byte-exact**: pure byte streams, no encoding assumptions
//!
//! ## Example
//!
//! ```no_run
//! use lineq_rs::LineAssembler;
//! use std::fs::File;
//! use std::os::fd::AsRawFd;
//!
//! let file = File::open("input.txt").unwrap();
//! let mut assembler = LineAssembler::new();
//! while let Some(line) = assembler.read_line(file.as_raw_fd()).unwrap() {
//!     print!("{line}");
//! }
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
// Note: unsafe is needed for raw descriptor reads (libc)
#![warn(unsafe_code)]

pub mod assembly;
pub mod cli;
pub mod core;
pub mod error;

// Re-export commonly used types at crate root
pub use error::{CommandError, Error, ReadError, Result};

// Re-export core domain types
pub use core::{ByteQueue, Line};

// Re-export assembly types
pub use assembly::{
    ChunkSource, DEFAULT_CHUNK_SIZE, FdSource, LineAssembler, MemorySource, QueueRegistry,
};

// Re-export CLI types
pub use cli::{Cli, Commands, OutputFormat};
