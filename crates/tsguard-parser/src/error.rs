//! Parse errors.
//!
//! The parser is fail-fast: the first error aborts the file. Errors are created with a
//! byte position only; `ParserState::parse_source_file` fills in the line/column once,
//! so speculative parses that fail and rewind never pay for a line map.

use tsguard_common::Location;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{file_name}:{location}: {kind}")]
pub struct ParseError {
    pub file_name: String,
    /// Byte offset of the offending token.
    pub pos: u32,
    pub location: Location,
    pub kind: ParseErrorKind,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("expected {expected}, found {found}")]
    Expected { expected: String, found: String },
    #[error("unexpected {0}")]
    Unexpected(String),
    #[error("unterminated {0}")]
    Unterminated(&'static str),
    #[error("maximum nesting depth of {0} exceeded")]
    RecursionLimit(u32),
    #[error("{0}")]
    Invalid(&'static str),
}

pub type ParseResult<T> = Result<T, ParseError>;
