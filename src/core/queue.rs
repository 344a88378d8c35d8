//! FIFO byte queue backing a single descriptor.
//!
//! A queue holds bytes that have been read from a descriptor but not yet
//! handed back to the caller as part of a completed line. Bytes stay in the
//! exact order they were read and are removed exactly once.

use crate::error::ReadError;
use std::collections::VecDeque;

/// FIFO queue of pending bytes for one descriptor.
///
/// Backed by a [`VecDeque`], giving amortized O(1) append at the tail and
/// removal at the head.
///
/// # Examples
///
/// ```
/// use lineq_rs::core::ByteQueue;
///
/// let mut queue = ByteQueue::new();
/// queue.push_chunk(b"ab\ncd");
/// let line = queue.pop_line().unwrap();
/// assert_eq!(line.as_deref(), Some(&b"ab\n"[..]));
/// assert_eq!(queue.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct ByteQueue {
    /// Pending bytes in read order, head first.
    bytes: VecDeque<u8>,
}

impl ByteQueue {
    /// Creates an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bytes: VecDeque::new(),
        }
    }

    /// Returns the number of pending bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Checks whether the queue holds no pending bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Appends a chunk of freshly read bytes at the tail, preserving order.
    pub fn push_chunk(&mut self, chunk: &[u8]) {
        self.bytes.extend(chunk.iter().copied());
    }

    /// Checks whether a complete line is pending.
    #[must_use]
    pub fn contains_newline(&self) -> bool {
        self.newline_position().is_some()
    }

    /// Position of the first newline byte, if any.
    fn newline_position(&self) -> Option<usize> {
        self.bytes.iter().position(|&b| b == b'\n')
    }

    /// Extracts the prefix up to and including the first newline.
    ///
    /// Returns `None` when no newline is pending. The extracted bytes are
    /// removed from the queue; everything after the newline stays queued.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::AllocationFailed`] if the output buffer cannot
    /// be allocated; the queue is left unchanged in that case.
    pub fn pop_line(&mut self) -> Result<Option<Vec<u8>>, ReadError> {
        match self.newline_position() {
            Some(pos) => self.pop_front_bytes(pos + 1).map(Some),
            None => Ok(None),
        }
    }

    /// Drains every pending byte as the final, newline-less line.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::AllocationFailed`] if the output buffer cannot
    /// be allocated; the queue is left unchanged in that case.
    pub fn pop_remainder(&mut self) -> Result<Vec<u8>, ReadError> {
        self.pop_front_bytes(self.bytes.len())
    }

    /// Removes `count` bytes from the head into a fresh buffer.
    ///
    /// The output buffer is reserved before any byte is removed, so an
    /// allocation failure leaves the queue exactly as it was.
    fn pop_front_bytes(&mut self, count: usize) -> Result<Vec<u8>, ReadError> {
        let mut out = Vec::new();
        out.try_reserve_exact(count)
            .map_err(|_| ReadError::AllocationFailed { requested: count })?;
        out.extend(self.bytes.drain(..count));
        Ok(out)
    }
}
