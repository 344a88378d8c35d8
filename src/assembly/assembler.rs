//! The per-descriptor line extraction state machine.
//!
//! [`LineAssembler`] accumulates raw chunk reads into per-descriptor queues
//! and hands back exactly one line per call. Queue state survives across
//! calls, so a descriptor whose buffer already holds complete lines is
//! served without touching the underlying source.

use crate::assembly::DEFAULT_CHUNK_SIZE;
use crate::assembly::registry::QueueRegistry;
use crate::assembly::source::{ChunkSource, FdSource};
use crate::core::Line;
use crate::error::{Error, ReadError, Result};
use std::os::fd::RawFd;
use tracing::{debug, trace};

/// Buffered line reader over raw file descriptors.
///
/// One assembler instance owns the pending state for every descriptor it
/// has served. Calls for different descriptors never share queue state;
/// calls for the same descriptor must be sequential, which `&mut self`
/// enforces within a single instance.
///
/// # Examples
///
/// ```
/// use lineq_rs::assembly::{LineAssembler, MemorySource};
///
/// let mut source = MemorySource::new();
/// source.insert(3, b"abc\ndef".to_vec());
///
/// let mut assembler = LineAssembler::with_source(source);
/// assert_eq!(assembler.read_line(3).unwrap().unwrap().as_bytes(), b"abc\n");
/// assert_eq!(assembler.read_line(3).unwrap().unwrap().as_bytes(), b"def");
/// assert_eq!(assembler.read_line(3).unwrap(), None);
/// ```
#[derive(Debug)]
pub struct LineAssembler<S = FdSource> {
    /// The chunked read primitive.
    source: S,
    /// Pending bytes per descriptor.
    registry: QueueRegistry,
    /// Bytes requested per underlying read.
    chunk_size: usize,
}

impl LineAssembler<FdSource> {
    /// Creates an assembler reading from raw file descriptors with the
    /// default chunk size.
    #[must_use]
    pub fn new() -> Self {
        Self::with_source(FdSource::new())
    }
}

impl Default for LineAssembler<FdSource> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ChunkSource> LineAssembler<S> {
    /// Creates an assembler over `source` with the default chunk size.
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            registry: QueueRegistry::new(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Creates an assembler with an explicit chunk size.
    ///
    /// Correctness does not depend on the chunk size; only read counts do.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `chunk_size` is zero.
    pub fn with_chunk_size(source: S, chunk_size: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(Error::Config {
                message: "chunk size must be at least 1".to_string(),
            });
        }
        Ok(Self {
            source,
            registry: QueueRegistry::new(),
            chunk_size,
        })
    }

    /// Bytes requested per underlying read.
    #[must_use]
    pub const fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Borrows the underlying source.
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Mutably borrows the underlying source.
    pub const fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Descriptors that currently hold buffered bytes or a live queue
    /// entry, in ascending order.
    #[must_use]
    pub fn pending_descriptors(&self) -> Vec<RawFd> {
        self.registry.descriptors()
    }

    /// Number of bytes buffered for `fd`, or `None` if the descriptor has
    /// no live queue entry.
    #[must_use]
    pub fn pending_bytes(&self, fd: RawFd) -> Option<usize> {
        self.registry.pending_bytes(fd)
    }

    /// Returns the next line from `fd`, or `Ok(None)` at end-of-stream.
    ///
    /// A returned line carries its trailing newline; only the final line of
    /// a stream that does not end in a newline comes back without one. Each
    /// byte of the stream is returned exactly once, in order.
    ///
    /// After `Ok(None)` or an error the descriptor's queue entry is gone; a
    /// later call with the same identifier starts a fresh, independent
    /// stream.
    ///
    /// # Errors
    ///
    /// - [`ReadError::InvalidDescriptor`] for a negative identifier; no
    ///   queue state is touched.
    /// - [`ReadError::Failed`] when the source reports a read error; the
    ///   descriptor's buffered bytes are discarded, never partially
    ///   returned.
    /// - [`ReadError::AllocationFailed`] when the output buffer cannot be
    ///   allocated; the queue is left as it was before the call.
    pub fn read_line(&mut self, fd: RawFd) -> Result<Option<Line>> {
        if fd < 0 {
            return Err(ReadError::InvalidDescriptor { fd }.into());
        }

        // A buffered complete line is served without invoking the source.
        if let Some(bytes) = self.registry.get_or_create(fd).pop_line()? {
            trace!(fd, len = bytes.len(), "served line from queue");
            return Ok(Some(Line::from_bytes(bytes)));
        }

        let mut chunk = vec![0u8; self.chunk_size];
        loop {
            match self.source.read_chunk(fd, &mut chunk) {
                Ok(0) => {
                    let queue = self.registry.get_or_create(fd);
                    if queue.is_empty() {
                        self.registry.remove(fd);
                        debug!(fd, "end of stream");
                        return Ok(None);
                    }
                    // Remaining bytes form the final line, no newline.
                    let bytes = queue.pop_remainder()?;
                    self.registry.remove(fd);
                    debug!(fd, len = bytes.len(), "drained final partial line");
                    return Ok(Some(Line::from_bytes(bytes)));
                }
                Ok(n) => {
                    trace!(fd, n, "appended chunk");
                    let queue = self.registry.get_or_create(fd);
                    queue.push_chunk(&chunk[..n]);
                    if let Some(bytes) = queue.pop_line()? {
                        return Ok(Some(Line::from_bytes(bytes)));
                    }
                }
                Err(err) => {
                    // Buffered bytes are never returned after a failure.
                    self.registry.remove(fd);
                    debug!(fd, %err, "read failed, queue discarded");
                    return Err(ReadError::from_io(fd, &err).into());
                }
            }
        }
    }

    /// Reads every remaining line from `fd` until end-of-stream.
    ///
    /// # Errors
    ///
    /// Propagates the first [`read_line`](Self::read_line) error; lines
    /// read before the failure are lost, matching the per-call contract.
    pub fn read_all_lines(&mut self, fd: RawFd) -> Result<Vec<Line>> {
        let mut lines = Vec::new();
        while let Some(line) = self.read_line(fd)? {
            lines.push(line);
        }
        Ok(lines)
    }
}
