//! TypeScript parser and AST types for tsguard.
//!
//! - `ast` - owned syntax tree (`Module`, `Stmt`, `Expr`, `Pat`, `TsType`)
//! - `parser` - recursive-descent `ParserState` over `tsguard_scanner::ScannerState`
//! - `error` - `ParseError` with byte position and line/column
//!
//! The supported surface is ECMAScript modules with TypeScript syntax. JSX, decorators
//! and legacy `<T>expr` assertions are reported as parse errors.

pub mod ast;
pub mod error;
pub mod parser;

pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use parser::ParserState;

/// Parse a whole TypeScript module.
pub fn parse_module(file_name: &str, source: &str) -> ParseResult<ast::Module> {
    let _span = tracing::debug_span!("parse_module", file = file_name, len = source.len()).entered();
    ParserState::new(file_name, source.to_string()).parse_source_file()
}
