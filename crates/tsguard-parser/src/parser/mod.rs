//! Recursive-descent parser.
//!
//! `ParserState` is split across files by syntax category:
//! - `state` - token access, lookahead, error construction, recursion guard
//! - `state_statements` - statements, declarations and module items
//! - `state_class_members` - class bodies
//! - `state_expressions` - expressions, patterns, functions and arrows
//! - `state_types` - type annotations

mod state;
mod state_class_members;
mod state_expressions;
mod state_statements;
mod state_types;

#[cfg(test)]
mod tests;

pub use state::ParserState;
