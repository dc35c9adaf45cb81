//! Error types for infoset

use std::fmt;
use thiserror::Error;

/// Position in a serialized document
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pos {
    pub offset: usize,
    pub line: u32,
    pub col: u32,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.offset, self.line, self.col)
    }
}

impl Pos {
    pub const fn new(offset: usize, line: u32, col: u32) -> Self {
        Self { offset, line, col }
    }
}

/// Span representing a range in a serialized document
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Span {
    pub start: Pos,
    pub end: Pos,
}

impl Span {
    pub const fn new(start: Pos, end: Pos) -> Self {
        Self { start, end }
    }

    pub const fn empty() -> Self {
        Self {
            start: Pos::new(0, 0, 0),
            end: Pos::new(0, 0, 0),
        }
    }
}

/// Error kind for detailed categorization
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The backing `Data` string is not a well-formed document
    MalformedDocument,
    MaxDepthExceeded { max: u16 },
    MaxSizeExceeded { max: usize },
    /// Not usable as an element or attribute name
    InvalidName { name: String },
    /// A stored value could not be converted to the requested type
    InvalidValue { value: String },
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedDocument => write!(f, "malformed document"),
            Self::MaxDepthExceeded { max } => write!(f, "max depth exceeded: {max}"),
            Self::MaxSizeExceeded { max } => write!(f, "max size exceeded: {max}"),
            Self::InvalidName { name } => write!(f, "invalid name: {name:?}"),
            Self::InvalidValue { value } => write!(f, "invalid value: {value:?}"),
        }
    }
}

/// Main error type for infoset
#[derive(Error, Clone, Debug, PartialEq)]
#[error("error at {}: {message}", .span.start)]
pub struct Error {
    kind: ErrorKind,
    span: Span,
    message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, span: Span) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            span,
            message,
        }
    }

    pub fn with_message(kind: ErrorKind, span: Span, message: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Create error at specific position
    pub fn at(kind: ErrorKind, offset: usize, line: u32, col: u32) -> Self {
        let pos = Pos::new(offset, line, col);
        Self::new(kind, Span::new(pos, pos))
    }

    /// Malformed document error carrying a parser message
    pub fn malformed(pos: Pos, message: impl Into<String>) -> Self {
        Self::with_message(ErrorKind::MalformedDocument, Span::new(pos, pos), message)
    }

    pub fn invalid_name(name: &str) -> Self {
        Self::new(
            ErrorKind::InvalidName {
                name: name.to_string(),
            },
            Span::empty(),
        )
    }

    /// True when the backing document could not be read
    pub fn is_malformed(&self) -> bool {
        matches!(self.kind, ErrorKind::MalformedDocument)
    }
}

/// Result type alias for infoset
pub type Result<T> = std::result::Result<T, Error>;
