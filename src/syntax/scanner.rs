//! Byte cursor over the input, with memchr-accelerated lookahead
//!
//! The cursor only ever moves forward. All searches are relative to the
//! current position and return absolute offsets.

use memchr::{memchr, memchr2, memmem};

/// Cursor over a UTF-8 document
pub struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner for the given input
    #[inline]
    pub fn new(input: &'a str) -> Self {
        Scanner { input, pos: 0 }
    }

    /// Get the current position
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Check if we've reached the end
    #[cfg(test)]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Get a slice from start to end positions
    ///
    /// Both offsets must sit on ASCII delimiters (or the ends of the input),
    /// which every caller in the lexer guarantees.
    #[inline]
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.input[start..end]
    }

    /// Peek at current byte without advancing
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    /// Peek at byte at offset from current position
    #[inline]
    pub fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.as_bytes().get(self.pos + offset).copied()
    }

    /// Advance by n bytes
    #[inline]
    pub fn advance(&mut self, n: usize) {
        self.pos += n;
    }

    /// Move the cursor to an absolute offset at or after the current one
    #[inline]
    pub fn seek(&mut self, pos: usize) {
        debug_assert!(pos >= self.pos);
        self.pos = pos;
    }

    /// Check if input starts with a byte sequence at current position
    #[inline]
    pub fn starts_with(&self, needle: &[u8]) -> bool {
        self.rest().starts_with(needle)
    }

    /// Find next occurrence of a specific byte, or the end of input
    #[inline]
    pub fn find_byte_or_end(&self, byte: u8) -> usize {
        memchr(byte, self.rest()).map_or(self.input.len(), |i| self.pos + i)
    }

    /// Find next occurrence of either of two bytes, or the end of input
    #[inline]
    pub fn find_byte2_or_end(&self, b1: u8, b2: u8) -> usize {
        memchr2(b1, b2, self.rest()).map_or(self.input.len(), |i| self.pos + i)
    }

    /// Find next occurrence of a multi-byte terminator such as `-->`
    #[inline]
    pub fn find_seq(&self, needle: &[u8]) -> Option<usize> {
        memmem::find(self.rest(), needle).map(|i| self.pos + i)
    }

    /// Remaining bytes
    #[inline]
    fn rest(&self) -> &'a [u8] {
        &self.input.as_bytes()[self.pos.min(self.input.len())..]
    }

    /// Byte at an absolute offset
    #[inline]
    pub fn byte_at(&self, pos: usize) -> Option<u8> {
        self.input.as_bytes().get(pos).copied()
    }
}

/// Check if byte may start a name
///
/// ASCII letters, underscore and colon. Bytes of multi-byte UTF-8 sequences
/// are accepted so that non-ASCII names pass through intact.
#[inline]
pub fn is_name_start_char(b: u8) -> bool {
    matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'_' | b':') || b >= 0x80
}

/// Check if byte may continue a name
#[inline]
pub fn is_name_char(b: u8) -> bool {
    matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'_' | b'-' | b'.' | b':') || b >= 0x80
}

/// ASCII whitespace as understood by the lexer
#[inline]
pub fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\x0b' | b'\x0c')
}
