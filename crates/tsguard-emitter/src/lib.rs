//! TypeScript printer for tsguard.
//!
//! Turns a `tsguard_parser::ast::Module` back into source text:
//! - `writer` - `SourceWriter`, the indentation-aware output buffer
//! - `printer` - `Printer`, split by syntax category (statements, expressions, types)
//!
//! Parsed nodes keep their literal spelling (`raw`), so untouched code round-trips
//! closely. Synthesized nodes are printed canonically, with parentheses inserted by
//! precedence.

pub mod printer;
pub mod writer;

pub use printer::{PrintError, PrintOptions, Printer};
pub use writer::SourceWriter;

use tsguard_parser::ast::{Expr, Module};

/// Print a module without its comments.
pub fn print_module(module: &Module, options: &PrintOptions) -> Result<String, PrintError> {
    let mut printer = Printer::new(options);
    printer.print_module(module);
    printer.finish()
}

/// Print a module, re-emitting the comments collected from `source`.
pub fn print_module_with_source(
    module: &Module,
    source: &str,
    options: &PrintOptions,
) -> Result<String, PrintError> {
    let _span = tracing::debug_span!("print_module", statements = module.body.len()).entered();
    let mut printer = Printer::with_source(options, source, &module.comments);
    printer.print_module(module);
    printer.finish()
}

pub fn print_expr(expr: &Expr, options: &PrintOptions) -> Result<String, PrintError> {
    let mut printer = Printer::new(options);
    printer.print_expression(expr);
    printer.finish()
}
