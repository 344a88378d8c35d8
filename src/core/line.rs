//! Owned line values returned to callers.
//!
//! A line is a byte sequence terminated by a newline byte (included), or by
//! end-of-stream for the final partial line (no newline). The caller owns
//! the bytes; the assembler keeps no reference after returning.

use std::fmt;

/// One extracted line, owned by the caller.
///
/// # Examples
///
/// ```
/// use lineq_rs::core::Line;
///
/// let line = Line::from_bytes(b"hello\n".to_vec());
/// assert!(line.has_newline());
/// assert_eq!(line.without_newline(), b"hello");
/// assert_eq!(line.as_str().unwrap(), "hello\n");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Line content, including the trailing newline when present.
    bytes: Vec<u8>,
}

impl Line {
    /// Creates a line from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Returns the line content, including any trailing newline.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the line, returning the underlying buffer.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Returns the length in bytes, counting the trailing newline.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Checks whether the line holds no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Checks whether the line ends with a newline byte.
    ///
    /// Only the final line of a stream that does not end in a newline
    /// returns `false`.
    #[must_use]
    pub fn has_newline(&self) -> bool {
        self.bytes.last() == Some(&b'\n')
    }

    /// Returns the content with the trailing newline (if any) stripped.
    #[must_use]
    pub fn without_newline(&self) -> &[u8] {
        match self.bytes.split_last() {
            Some((&b'\n', head)) => head,
            _ => &self.bytes,
        }
    }

    /// Returns the content as UTF-8.
    ///
    /// # Errors
    ///
    /// Returns a [`std::str::Utf8Error`] if the bytes are not valid UTF-8.
    pub fn as_str(&self) -> Result<&str, std::str::Utf8Error> {
        std::str::from_utf8(&self.bytes)
    }
}

impl AsRef<[u8]> for Line {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Display for Line {
    /// Lossy UTF-8 rendering; invalid sequences become replacement chars.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.bytes))
    }
}
