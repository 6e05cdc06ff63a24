//! Error types for the mediatype crate.

use std::fmt;
use std::io;
use thiserror::Error;

/// The main error type for the mediatype crate.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Media type grammar violation
    #[error("Media type error at offset {offset}: {kind}")]
    Parse {
        /// Byte offset into the input where scanning stopped.
        offset: usize,
        /// What the parser expected to find.
        kind: ParseErrorKind,
    },

    /// MIME type registry error
    #[error("MIME type error: {0}")]
    MimeType(String),

    /// Random source failure
    #[error("Random source error: {0}")]
    Random(String),
}

/// Specialized Result type for mediatype operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The grammar rule a media type string violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// No token where the main type should start.
    MissingType,
    /// The main type is not followed by `/`.
    MissingSlash,
    /// Nothing between `/` and the first `;`.
    MissingSubtype,
    /// Input remains but the next character is not `;`.
    MissingSemicolon,
    /// A parameter does not start with a token.
    MissingParameterName,
    /// A parameter name is not followed by `=`.
    MissingEquals,
    /// A quoted value runs to the end of input.
    UnterminatedQuotedString,
    /// A backslash escape is truncated or carries bad digits.
    InvalidEscape,
    /// Characters remain after a complete standalone parameter.
    TrailingInput,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ParseErrorKind::MissingType => "expected a type token",
            ParseErrorKind::MissingSlash => "expected '/' after type",
            ParseErrorKind::MissingSubtype => "expected a subtype",
            ParseErrorKind::MissingSemicolon => "expected ';' before parameter",
            ParseErrorKind::MissingParameterName => "expected a parameter name",
            ParseErrorKind::MissingEquals => "expected '=' after parameter name",
            ParseErrorKind::UnterminatedQuotedString => "unterminated quoted string",
            ParseErrorKind::InvalidEscape => "invalid escape sequence",
            ParseErrorKind::TrailingInput => "unexpected trailing input",
        };
        f.write_str(msg)
    }
}

impl Error {
    pub(crate) fn parse(offset: usize, kind: ParseErrorKind) -> Self {
        Error::Parse { offset, kind }
    }

    /// Returns the grammar violation if this is a parse error.
    pub fn parse_kind(&self) -> Option<ParseErrorKind> {
        match self {
            Error::Parse { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}
