//! TypeScript scanner/tokenizer for tsguard.
//!
//! This crate provides the lexical analysis phase:
//! - `SyntaxKind` - Token types
//! - `ScannerState` - Tokenizer state machine with snapshot/restore and rescans
//! - `char_codes` - Character classification utilities

pub mod char_codes;
pub mod scanner;
pub mod syntax_kind;

pub use scanner::{ScannerSnapshot, ScannerState, TokenFlags, parse_numeric_literal};
pub use syntax_kind::SyntaxKind;
