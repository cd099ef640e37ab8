//! Printer - AST to TypeScript source.
//!
//! `Printer` walks the owned AST and writes through a `SourceWriter`. The methods are
//! split by syntax category:
//! - `statements` - statements, declarations and module items
//! - `expressions` - expressions with precedence-driven parenthesization
//! - `functions` - parameters, patterns, functions and classes
//! - `types` - type annotations and type members
//! - `literals` - identifiers, strings, numbers and property names
//! - `comments` - re-emission of source comments around statements

mod comments;
mod expressions;
mod functions;
mod literals;
mod statements;
mod types;

#[cfg(test)]
mod tests;

pub use literals::{format_number, quote_string};

use crate::writer::SourceWriter;
use serde::Deserialize;
use tsguard_common::{Comment, Span};
use tsguard_common::limits::MAX_EMIT_RECURSION_DEPTH;
use tsguard_parser::ast::{Expr, Module, Stmt};

/// Printer configuration.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PrintOptions {
    /// Spaces per indentation level.
    pub indent_width: usize,
    /// Drop source comments instead of re-emitting them.
    pub remove_comments: bool,
}

impl Default for PrintOptions {
    fn default() -> Self {
        PrintOptions {
            indent_width: 4,
            remove_comments: false,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PrintError {
    #[error("maximum printer nesting depth of {0} exceeded")]
    RecursionLimit(u32),
}

/// Binding power of expressions, lowest first. Binary operators sit at
/// `BinaryOp::precedence` shifted by `CONDITIONAL`, from `??` at `NULLISH` to `**` at 14.
pub(crate) mod prec {
    pub const COMMA: u8 = 0;
    pub const ASSIGN: u8 = 1;
    pub const CONDITIONAL: u8 = 2;
    pub const NULLISH: u8 = 3;
    pub const RELATIONAL: u8 = 10;
    pub const UNARY: u8 = 15;
    pub const POSTFIX: u8 = 16;
    pub const LEFT_HAND_SIDE: u8 = 17;
    pub const CALL: u8 = 18;
    pub const PRIMARY: u8 = 19;
}

pub struct Printer<'a> {
    writer: SourceWriter,
    options: &'a PrintOptions,
    /// Original text, for comments and line-break preservation.
    source_text: Option<&'a str>,
    /// Consumed in order even when `remove_comments` is set, so blank-line detection
    /// can step over them.
    comments: &'a [Comment],
    comment_emit_idx: usize,
    depth: u32,
    depth_exceeded: bool,
}

impl<'a> Printer<'a> {
    pub fn new(options: &'a PrintOptions) -> Self {
        Printer {
            writer: SourceWriter::new(options.indent_width),
            options,
            source_text: None,
            comments: &[],
            comment_emit_idx: 0,
            depth: 0,
            depth_exceeded: false,
        }
    }

    pub fn with_source(
        options: &'a PrintOptions,
        source_text: &'a str,
        comments: &'a [Comment],
    ) -> Self {
        Printer {
            writer: SourceWriter::with_capacity(options.indent_width, source_text.len() + 256),
            source_text: Some(source_text),
            comments,
            ..Printer::new(options)
        }
    }

    // =========================================================================
    // Entry Points
    // =========================================================================

    pub fn print_module(&mut self, module: &Module) {
        self.emit_statement_list(&module.body);
        self.emit_remaining_comments();
        self.writer.ensure_new_line();
    }

    pub fn print_statement(&mut self, stmt: &Stmt) {
        self.emit_statement(stmt);
    }

    pub fn print_expression(&mut self, expr: &Expr) {
        self.emit_expression(expr);
    }

    pub fn finish(self) -> Result<String, PrintError> {
        if self.depth_exceeded {
            return Err(PrintError::RecursionLimit(MAX_EMIT_RECURSION_DEPTH));
        }
        Ok(self.writer.into_output())
    }

    // =========================================================================
    // Output Helpers (delegate to SourceWriter)
    // =========================================================================

    pub(super) fn write(&mut self, text: &str) {
        self.writer.write(text);
    }

    pub(super) fn write_char(&mut self, ch: char) {
        self.writer.write_char(ch);
    }

    pub(super) fn write_space(&mut self) {
        self.writer.write_space();
    }

    pub(super) fn write_line(&mut self) {
        self.writer.write_line();
    }

    pub(super) fn write_semicolon(&mut self) {
        self.writer.write_char(';');
    }

    pub(super) fn increase_indent(&mut self) {
        self.writer.increase_indent();
    }

    pub(super) fn decrease_indent(&mut self) {
        self.writer.decrease_indent();
    }

    /// Guard one level of nesting. Once the limit is hit nothing deeper is printed and
    /// `finish` reports the failure.
    pub(super) fn enter_node(&mut self) -> bool {
        if self.depth >= MAX_EMIT_RECURSION_DEPTH {
            if !self.depth_exceeded {
                tracing::warn!(depth = self.depth, "printer nesting limit reached");
            }
            self.depth_exceeded = true;
            return false;
        }
        self.depth += 1;
        true
    }

    pub(super) fn exit_node(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Write `items` separated by `, `.
    pub(super) fn emit_comma_list<T>(&mut self, items: &[T], mut emit: impl FnMut(&mut Self, &T)) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            emit(self, item);
        }
    }

    /// Whether a parsed node spanned more than one source line. Synthesized nodes
    /// (dummy spans) and printers without source text print on one line.
    pub(super) fn was_multi_line(&self, span: Span) -> bool {
        match self.source_text {
            Some(text) if !span.is_dummy() => {
                memchr::memchr(b'\n', span.slice(text).as_bytes()).is_some()
            }
            _ => false,
        }
    }
}
