//! Read primitive seam.
//!
//! The assembler consumes raw reads through the [`ChunkSource`] trait so the
//! read-loop logic stays independent of where bytes come from. [`FdSource`]
//! is the production implementation over `read(2)`; [`MemorySource`] serves
//! registered in-memory streams with the same contract.

// Raw descriptor reads require unsafe; the buffer pointer and length are
// taken from a live &mut [u8].
#![allow(unsafe_code)]

use std::collections::HashMap;
use std::io;
use std::os::fd::RawFd;

/// Chunked read capability with POSIX `read(2)` semantics.
///
/// A call fills at most `buf.len()` bytes and returns the count actually
/// read; `0` means end-of-stream. Implementations may return fewer bytes
/// than requested at any time.
pub trait ChunkSource {
    /// Reads up to `buf.len()` bytes from `fd` into the front of `buf`.
    ///
    /// # Errors
    ///
    /// Returns an [`io::Error`] when the underlying read fails. The
    /// assembler treats any error as fatal for the descriptor's queue.
    fn read_chunk(&mut self, fd: RawFd, buf: &mut [u8]) -> io::Result<usize>;
}

/// Production source reading directly from raw file descriptors.
///
/// # Examples
///
/// ```no_run
/// use lineq_rs::assembly::{FdSource, LineAssembler};
///
/// let mut assembler = LineAssembler::with_source(FdSource::new());
/// let line = assembler.read_line(0).unwrap();
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FdSource;

impl FdSource {
    /// Creates a new descriptor-backed source.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ChunkSource for FdSource {
    #[allow(clippy::cast_sign_loss)]
    fn read_chunk(&mut self, fd: RawFd, buf: &mut [u8]) -> io::Result<usize> {
        // Safety: buf is a live mutable slice, so the pointer is valid for
        // writes of buf.len() bytes for the duration of the call.
        let n = unsafe { libc::read(fd, buf.as_mut_ptr().cast::<libc::c_void>(), buf.len()) };
        if n < 0 {
            Err(io::Error::last_os_error())
        } else {
            Ok(n as usize)
        }
    }
}

/// In-memory source keyed by descriptor identifier.
///
/// Useful for exercising the assembler without real descriptors. Reads
/// honor the `read(2)` contract: short reads whenever the remaining content
/// is smaller than the chunk, `0` once a stream is exhausted, and `EBADF`
/// for identifiers with no registered stream.
///
/// # Examples
///
/// ```
/// use lineq_rs::assembly::{LineAssembler, MemorySource};
///
/// let mut source = MemorySource::new();
/// source.insert(3, b"hello\n".to_vec());
///
/// let mut assembler = LineAssembler::with_source(source);
/// let line = assembler.read_line(3).unwrap().unwrap();
/// assert_eq!(line.as_bytes(), b"hello\n");
/// assert_eq!(assembler.read_line(3).unwrap(), None);
/// ```
#[derive(Debug, Default)]
pub struct MemorySource {
    /// Registered streams by descriptor identifier.
    streams: HashMap<RawFd, MemoryStream>,
}

/// One registered stream with a read cursor.
#[derive(Debug)]
struct MemoryStream {
    data: Vec<u8>,
    pos: usize,
    /// Byte offset past which every read fails with `EIO`.
    fail_at: Option<usize>,
}

impl MemorySource {
    /// Creates a source with no registered streams.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the stream served for `fd`.
    pub fn insert(&mut self, fd: RawFd, data: Vec<u8>) {
        self.streams.insert(
            fd,
            MemoryStream {
                data,
                pos: 0,
                fail_at: None,
            },
        );
    }

    /// Registers a stream that serves exactly `fail_at` bytes, then fails
    /// every subsequent read with `EIO`.
    pub fn insert_failing(&mut self, fd: RawFd, data: Vec<u8>, fail_at: usize) {
        self.streams.insert(
            fd,
            MemoryStream {
                data,
                pos: 0,
                fail_at: Some(fail_at),
            },
        );
    }
}

impl ChunkSource for MemorySource {
    fn read_chunk(&mut self, fd: RawFd, buf: &mut [u8]) -> io::Result<usize> {
        let Some(stream) = self.streams.get_mut(&fd) else {
            return Err(io::Error::from_raw_os_error(libc::EBADF));
        };

        let limit = match stream.fail_at {
            Some(at) if stream.pos >= at => {
                return Err(io::Error::from_raw_os_error(libc::EIO));
            }
            Some(at) => at.min(stream.data.len()),
            None => stream.data.len(),
        };

        let remaining = &stream.data[stream.pos..limit];
        let n = remaining.len().min(buf.len());
        buf[..n].copy_from_slice(&remaining[..n]);
        stream.pos += n;
        Ok(n)
    }
}
