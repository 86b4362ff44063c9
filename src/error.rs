use crate::{input::Cursor, value::Type};
use nom::error::{ErrorKind, FromExternalError};

/// Which container a missing separator belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    Array,
    Object,
}

impl Container {
    fn members(&self) -> &'static str {
        match self {
            Self::Array => "array members",
            Self::Object => "object members",
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Kind {
    #[error("Empty input.")]
    EmptyInput,
    #[error("Unexpected end of input.")]
    UnexpectedEnd,
    #[error("Unexpected characters after JSON value.")]
    CharsAfterRoot,
    #[error("Expected '{0}'.")]
    InvalidLiteral(&'static str),
    #[error("Unterminated string literal.")]
    MissingQuote,
    #[error("Leading zeros not allowed.")]
    LeadingZero,
    #[error("Expected digit after decimal point.")]
    MissingFraction,
    #[error("Invalid number format near '{0}'.")]
    InvalidNumber(String),
    #[error("Expected ',' between {}", .0.members())]
    MissingComma(Container),
    #[error("Expected ':' after object key.")]
    MissingColon,
    #[error("Expected string key in object.")]
    InvalidKey,
    #[error("Unexpected character '{0}' in JSON input.")]
    UnexpectedChar(char),
    #[error("{0}")]
    Io(String),
    // Built by nom combinators. The parser absorbs these with `opt` or remaps
    // them in `or_else`, so a returned error never carries this kind
    #[error("internal parser error: {0:?}")]
    Nom(ErrorKind),
}

/// Malformed input, reported with the 1-based line it was detected on.
///
/// File loading failures use line 0.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("[line:{line}] {kind}")]
pub struct ParseError {
    pub kind: Kind,
    pub line: usize,
}

impl ParseError {
    pub fn new(kind: Kind, line: usize) -> Self {
        Self { kind, line }
    }
}

impl<'a> nom::error::ParseError<Cursor<'a>> for ParseError {
    fn from_error_kind(input: Cursor<'a>, kind: ErrorKind) -> Self {
        Self::new(Kind::Nom(kind), input.line())
    }

    fn append(_input: Cursor<'a>, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

impl<'a, E> FromExternalError<Cursor<'a>, E> for ParseError {
    fn from_external_error(input: Cursor<'a>, kind: ErrorKind, _e: E) -> Self {
        Self::new(Kind::Nom(kind), input.line())
    }
}

/// A typed accessor was used on a value of another type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Attempted to read '{actual}' as '{expected}'")]
pub struct TypeError {
    expected: Type,
    actual: Type,
}

impl TypeError {
    pub fn new(expected: Type, actual: Type) -> Self {
        Self { expected, actual }
    }

    pub fn expected(&self) -> Type {
        self.expected
    }

    pub fn actual(&self) -> Type {
        self.actual
    }
}

/// An index or key that does not exist, or a receiver that cannot be indexed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct AccessError {
    message: String,
}

impl AccessError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub(crate) fn out_of_bounds() -> Self {
        Self::new("Array index out of bounds.")
    }

    pub(crate) fn not_indexable(actual: Type) -> Self {
        Self::new(format!("Cannot index '{}' by position.", actual))
    }

    pub(crate) fn missing_key(key: &str) -> Self {
        Self::new(format!("Key '{}' not found in object.", key))
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Type(#[from] TypeError),
    #[error(transparent)]
    Access(#[from] AccessError),
}
