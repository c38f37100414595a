//! Parse errors shared by the lexer, the folder and the reader layer

use std::fmt;
use std::io;

/// Broad category of a [`ParseError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Grammar violation or close-tag mismatch
    Malformed,
    /// Input ended inside a construct, or elements were left open
    Unclosed,
    /// Reading the input failed
    Io,
}

/// Error returned by every parse entry point
///
/// The first error aborts the whole parse; no partial value is produced.
#[derive(Debug)]
pub enum ParseError {
    /// Offending byte at `position`
    NotWellFormed { position: usize },
    /// Input exhausted inside a prolog, tag, comment or CDATA section
    UnclosedToken,
    /// Close tag `name` does not match the innermost open element
    TagMismatch { name: String },
    /// `count` elements still open at end of input
    UnclosedTags { count: usize },
    Io(io::Error),
}

impl ParseError {
    pub fn not_well_formed(position: usize) -> Self {
        ParseError::NotWellFormed { position }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::NotWellFormed { .. } | ParseError::TagMismatch { .. } => {
                ErrorKind::Malformed
            }
            ParseError::UnclosedToken | ParseError::UnclosedTags { .. } => ErrorKind::Unclosed,
            ParseError::Io(_) => ErrorKind::Io,
        }
    }

    /// Byte offset of the violation, when the lexer reported one
    pub fn position(&self) -> Option<usize> {
        match self {
            ParseError::NotWellFormed { position } => Some(*position),
            _ => None,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::NotWellFormed { position } => {
                write!(f, "not well formed (violation at pos={})", position)
            }
            ParseError::UnclosedToken => f.write_str("unclosed token"),
            ParseError::TagMismatch { name } => {
                write!(f, "tag mismatch ('{}' does not match the last start tag)", name)
            }
            ParseError::UnclosedTags { count } => {
                write!(f, "not well formed ({} unclosed tags)", count)
            }
            ParseError::Io(e) => write!(f, "io error: {}", e),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ParseError {
    fn from(e: io::Error) -> Self {
        ParseError::Io(e)
    }
}

impl From<std::str::Utf8Error> for ParseError {
    fn from(e: std::str::Utf8Error) -> Self {
        ParseError::NotWellFormed {
            position: e.valid_up_to(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            ParseError::not_well_formed(7).to_string(),
            "not well formed (violation at pos=7)"
        );
        assert_eq!(ParseError::UnclosedToken.to_string(), "unclosed token");
        assert_eq!(
            ParseError::TagMismatch { name: "b".into() }.to_string(),
            "tag mismatch ('b' does not match the last start tag)"
        );
        assert_eq!(
            ParseError::UnclosedTags { count: 2 }.to_string(),
            "not well formed (2 unclosed tags)"
        );
    }

    #[test]
    fn test_kinds() {
        assert_eq!(ParseError::not_well_formed(0).kind(), ErrorKind::Malformed);
        assert_eq!(
            ParseError::TagMismatch { name: "a".into() }.kind(),
            ErrorKind::Malformed
        );
        assert_eq!(ParseError::UnclosedToken.kind(), ErrorKind::Unclosed);
        assert_eq!(ParseError::UnclosedTags { count: 1 }.kind(), ErrorKind::Unclosed);
        let io = ParseError::from(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert_eq!(io.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_utf8_error_position() {
        let bytes = b"<a>\xff</a>";
        let err = ParseError::from(std::str::from_utf8(bytes).unwrap_err());
        assert_eq!(err.position(), Some(3));
    }
}
