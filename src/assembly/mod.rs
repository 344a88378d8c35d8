//! Line assembly over chunked descriptor reads.
//!
//! This module provides the [`LineAssembler`], which owns a registry of
//! per-descriptor byte queues and extracts one newline-terminated line per
//! call, together with the read-primitive seam:
//!
//! - **Assembler**: the read-loop state machine
//! - **Registry**: per-descriptor queue lifecycle
//! - **Sources**: pluggable chunked read implementations

pub mod assembler;
pub mod registry;
pub mod source;

pub use assembler::LineAssembler;
pub use registry::QueueRegistry;
pub use source::{ChunkSource, FdSource, MemorySource};

/// Default number of bytes requested per underlying read.
///
/// Any chunk size >= 1 yields identical line sequences; the size only
/// affects how many reads a long line costs.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;
