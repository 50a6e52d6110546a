//! Parse errors.
//!
//! Every failure is reported as a [`ParseError`]: an [`ErrorKind`] plus the byte region of the
//! input where the problem was detected. There is no local recovery anywhere in the parser, the
//! first error aborts the whole parse.

use thiserror::Error;

use crate::span::Span;

/// What went wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("invalid number literal `{0}`")]
    InvalidNumber(String),

    #[error("invalid keyword `{0}`, expected `true`, `false` or `null`")]
    InvalidKeyword(String),

    #[error("invalid string: {0}")]
    InvalidEscape(String),

    #[error("string literal is never terminated")]
    UnterminatedString,

    #[error("`{0}` is never closed")]
    UnbalancedDelimiter(char),

    #[error("expected `:` after object key")]
    MissingColon,

    #[error("unexpected character `{0}`")]
    UnexpectedCharacter(char),

    #[error("unexpected end of input, expected a value")]
    UnexpectedEndOfInput,

    #[error("a JSON document must start with `[` or `{{`")]
    InvalidTopLevel,

    #[error("trailing characters after the top level value")]
    TrailingCharacters,

    #[error("nesting depth {depth} exceeds the limit of {limit}")]
    NestingTooDeep { depth: usize, limit: usize },

    #[error("input of {size} bytes exceeds the limit of {limit} bytes")]
    InputTooLarge { size: usize, limit: usize },
}

impl ErrorKind {
    /// Stable short identifier, suitable for diagnostics and log fields.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::InvalidNumber(_) => "invalid-number",
            ErrorKind::InvalidKeyword(_) => "invalid-keyword",
            ErrorKind::InvalidEscape(_) => "invalid-escape",
            ErrorKind::UnterminatedString => "unterminated-string",
            ErrorKind::UnbalancedDelimiter(_) => "unbalanced-delimiter",
            ErrorKind::MissingColon => "missing-colon",
            ErrorKind::UnexpectedCharacter(_) => "unexpected-character",
            ErrorKind::UnexpectedEndOfInput => "unexpected-end-of-input",
            ErrorKind::InvalidTopLevel => "invalid-top-level",
            ErrorKind::TrailingCharacters => "trailing-characters",
            ErrorKind::NestingTooDeep { .. } => "nesting-too-deep",
            ErrorKind::InputTooLarge { .. } => "input-too-large",
        }
    }
}

/// A parse failure located in the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at byte {}", .span.lo)]
pub struct ParseError {
    kind: ErrorKind,
    span: Span,
}

impl ParseError {
    pub fn new(kind: ErrorKind, span: Span) -> Self {
        ParseError { kind, span }
    }

    /// An error pointing at a single byte offset.
    pub fn at(kind: ErrorKind, offset: usize) -> Self {
        ParseError::new(kind, Span::point(offset))
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Byte offset into the input where the failure was detected.
    pub fn offset(&self) -> usize {
        self.span.lo
    }

    pub fn span(&self) -> Span {
        self.span
    }
}

pub type ParseResult<T> = Result<T, ParseError>;
