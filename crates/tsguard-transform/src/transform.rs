//! File Transform Orchestrator.
//!
//! Parse, collect the tracked functions, rewrite the call sites, print. The orchestrator
//! is fail-open: when anything goes wrong the file is returned exactly as it was given.

use crate::context::{Context, FsModuleLoader, ModuleLoader, normalize_path};
use crate::options::TransformOptions;
use crate::scope::{ModuleScope, TrackedFunctions};
use crate::usage::UsageVisitor;
use std::path::Path;
use tracing::{debug, info_span, warn};
use tsguard_common::Span;
use tsguard_common::limits::MAX_EMIT_RECURSION_DEPTH;
use tsguard_emitter::{PrintError, print_module_with_source};
use tsguard_parser::ast::{Ident, ImportDecl, ImportSpecifier, Module, Stmt, StmtKind, Str};
use tsguard_parser::{ParseError, parse_module};

#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Print(#[from] PrintError),
    #[error("maximum visitor nesting depth of {0} exceeded")]
    NestingLimit(u32),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransformOutput {
    pub code: String,
    /// `code` differs from the input.
    pub changed: bool,
    /// Tracked calls renamed or replaced.
    pub rewritten_calls: usize,
}

impl TransformOutput {
    fn unchanged(source: &str) -> Self {
        TransformOutput {
            code: source.to_string(),
            changed: false,
            rewritten_calls: 0,
        }
    }
}

/// Transform one file with default options, following imports on disk.
pub fn transform(path: &Path, source: &str) -> String {
    let options = TransformOptions::default();
    let loader = FsModuleLoader::new(options.marker_module.as_str());
    transform_file(path, source, &loader, &options).code
}

/// Transform one file. Failures are logged and yield the original text.
pub fn transform_file(
    path: &Path,
    source: &str,
    loader: &dyn ModuleLoader,
    options: &TransformOptions,
) -> TransformOutput {
    let _span = info_span!("transform", file = %path.display()).entered();
    match try_transform_file(path, source, loader, options) {
        Ok(output) => output,
        Err(TransformError::Parse(err)) => {
            warn!(%err, "parse failed, file left untouched");
            TransformOutput::unchanged(source)
        }
        Err(err) => {
            warn!(%err, "transform failed, file left untouched");
            TransformOutput::unchanged(source)
        }
    }
}

/// Like `transform_file`, but reports why a file could not be transformed.
pub fn try_transform_file(
    path: &Path,
    source: &str,
    loader: &dyn ModuleLoader,
    options: &TransformOptions,
) -> Result<TransformOutput, TransformError> {
    let mut module = parse_module(&path.to_string_lossy(), source)?;

    let tracked = TrackedFunctions::collect(&module, &options.marker_module);
    if tracked.is_empty() {
        debug!("no tracked imports");
        return Ok(TransformOutput::unchanged(source));
    }

    let scope = ModuleScope::build(&module, &options.marker_module);
    let ctx = Context::new(normalize_path(path), scope, loader);
    let mut visitor = UsageVisitor::new(&ctx, &tracked, &options.runtime_namespace);
    visitor.visit_module(&mut module);
    if visitor.depth_exceeded() {
        return Err(TransformError::NestingLimit(MAX_EMIT_RECURSION_DEPTH));
    }

    let rewritten_calls = visitor.rewritten_calls();
    if rewritten_calls == 0 {
        debug!(tracked = tracked.len(), "no tracked call sites");
        return Ok(TransformOutput::unchanged(source));
    }
    debug!(
        rewritten_calls,
        replaced_calls = visitor.replaced_calls(),
        "call sites rewritten"
    );

    insert_runtime_import(&mut module, &options.marker_module, &options.runtime_namespace);
    let code = print_module_with_source(&module, source, &options.print)?;
    Ok(TransformOutput {
        changed: code != source,
        code,
        rewritten_calls,
    })
}

/// Insert `import * as <namespace> from '<marker>'` after the last marker import, unless
/// the module already has it.
fn insert_runtime_import(module: &mut Module, marker_module: &str, namespace: &str) {
    let mut insert_at = 0;
    for (index, stmt) in module.body.iter().enumerate() {
        let StmtKind::Import(import) = &stmt.kind else {
            continue;
        };
        if import.src.value != marker_module {
            continue;
        }
        let binds_namespace = import.specifiers.iter().any(|spec| {
            matches!(spec, ImportSpecifier::Namespace(local) if local.sym == namespace)
        });
        if binds_namespace {
            return;
        }
        insert_at = index + 1;
    }

    let import = ImportDecl {
        span: Span::DUMMY,
        type_only: false,
        specifiers: vec![ImportSpecifier::Namespace(Ident::new(namespace))],
        src: Str::new(marker_module),
        with: None,
    };
    module
        .body
        .insert(insert_at, Stmt::new(Span::DUMMY, StmtKind::Import(import)));
}

#[cfg(test)]
#[path = "tests/transform_unit_tests.rs"]
mod tests;
