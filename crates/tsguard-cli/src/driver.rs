//! File discovery, parallel transformation and output for the tsguard binary.

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tsguard_transform::{
    Context as ResolutionContext, FsModuleLoader, ModuleScope, TransformOptions, TransformOutput,
    TypeResolver, transform_file,
};
use walkdir::WalkDir;

use crate::args::{CliArgs, Command};
use crate::config::resolve_options;

/// Stack for worker threads; parsing, resolution and printing recurse on nesting depth.
const WORKER_STACK_SIZE: usize = 16 * 1024 * 1024;

const SOURCE_EXTENSIONS: [&str; 4] = ["ts", "tsx", "mts", "cts"];
const DECLARATION_SUFFIXES: [&str; 3] = [".d.ts", ".d.mts", ".d.cts"];

/// A discovered input and where it lands under `--out-dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub relative: PathBuf,
}

#[derive(Debug)]
pub struct FileResult {
    pub file: SourceFile,
    pub output: TransformOutput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Success,
    /// `--check` found files that would change.
    WouldChange(usize),
}

pub fn run(args: &CliArgs, out: &mut dyn Write) -> Result<RunStatus> {
    if let Some(Command::Schema {
        file,
        type_name,
        marker_module,
        compact,
    }) = &args.command
    {
        let mut options = resolve_options(args.config.as_deref(), &args.overrides)?;
        if let Some(marker) = marker_module {
            options.marker_module = marker.clone();
        }
        print_schema(file, type_name, &options.marker_module, *compact, out)?;
        return Ok(RunStatus::Success);
    }

    if args.inputs.is_empty() {
        bail!("no inputs given; pass files or directories to transform (see --help)");
    }
    let options = resolve_options(args.config.as_deref(), &args.overrides)?;
    let files = discover_sources(&args.inputs)?;
    if files.is_empty() {
        bail!("no TypeScript sources found in the given inputs");
    }
    if !args.check && args.out_dir.is_none() && files.len() > 1 {
        bail!(
            "--out-dir is required when transforming more than one file ({} found)",
            files.len()
        );
    }

    if args.out_dir.is_some() {
        ensure_distinct_outputs(&files)?;
    }

    let results = transform_sources(&files, &options, args.jobs)?;
    let changed = results.iter().filter(|result| result.output.changed).count();
    let rewritten: usize = results.iter().map(|result| result.output.rewritten_calls).sum();
    info!(files = results.len(), changed, rewritten, "transform finished");

    if args.check {
        for result in results.iter().filter(|result| result.output.changed) {
            writeln!(out, "{}", result.file.path.display())?;
        }
        return Ok(if changed == 0 {
            RunStatus::Success
        } else {
            RunStatus::WouldChange(changed)
        });
    }

    match &args.out_dir {
        Some(out_dir) => {
            write_outputs(out_dir, &results)?;
        }
        None => {
            for result in &results {
                out.write_all(result.output.code.as_bytes())?;
            }
        }
    }
    Ok(RunStatus::Success)
}

// =============================================================================
// Discovery
// =============================================================================

/// Expand inputs into the TypeScript sources to transform, in a stable order.
///
/// Directories are walked recursively, skipping `node_modules` and declaration files.
/// A file named explicitly is taken as long as it is not a declaration file.
pub fn discover_sources(inputs: &[PathBuf]) -> Result<Vec<SourceFile>> {
    let mut files = Vec::new();
    for input in inputs {
        let metadata = std::fs::metadata(input)
            .with_context(|| format!("cannot read input {}", input.display()))?;
        if metadata.is_file() {
            if is_declaration_file(input) {
                debug!(path = %input.display(), "declaration file skipped");
                continue;
            }
            let relative = input
                .file_name()
                .map(PathBuf::from)
                .unwrap_or_else(|| input.clone());
            files.push(SourceFile {
                path: input.clone(),
                relative,
            });
            continue;
        }

        let mut found = Vec::new();
        let walker = WalkDir::new(input)
            .follow_links(true)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || entry.file_name() != "node_modules");
        for entry in walker {
            let entry = entry.with_context(|| format!("failed to walk {}", input.display()))?;
            let path = entry.path();
            if !entry.file_type().is_file() || !is_source_file(path) {
                continue;
            }
            let relative = path.strip_prefix(input).unwrap_or(path).to_path_buf();
            found.push(SourceFile {
                path: path.to_path_buf(),
                relative,
            });
        }
        found.sort_by(|a, b| a.path.cmp(&b.path));
        files.extend(found);
    }
    Ok(files)
}

/// Refuse inputs that would overwrite each other under `--out-dir`, such as two
/// explicit files with the same name.
pub fn ensure_distinct_outputs(files: &[SourceFile]) -> Result<()> {
    let mut targets: HashMap<&Path, &Path> = HashMap::with_capacity(files.len());
    for file in files {
        if let Some(previous) = targets.insert(&file.relative, &file.path) {
            bail!(
                "{} and {} would both be written to {} under --out-dir",
                previous.display(),
                file.path.display(),
                file.relative.display()
            );
        }
    }
    Ok(())
}

pub fn is_source_file(path: &Path) -> bool {
    let has_source_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext));
    has_source_extension && !is_declaration_file(path)
}

fn is_declaration_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| DECLARATION_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)))
}

// =============================================================================
// Transformation
// =============================================================================

/// Transform every file on a rayon pool. Each file gets its own loader, so module
/// caches are never shared between threads.
pub fn transform_sources(
    files: &[SourceFile],
    options: &TransformOptions,
    jobs: Option<usize>,
) -> Result<Vec<FileResult>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs.unwrap_or(0))
        .stack_size(WORKER_STACK_SIZE)
        .build()
        .context("failed to start worker threads")?;

    pool.install(|| {
        files
            .par_iter()
            .map(|file| transform_source(file, options))
            .collect()
    })
}

fn transform_source(file: &SourceFile, options: &TransformOptions) -> Result<FileResult> {
    let source = std::fs::read_to_string(&file.path)
        .with_context(|| format!("failed to read {}", file.path.display()))?;
    let loader = FsModuleLoader::new(options.marker_module.as_str());
    let output = transform_file(&file.path, &source, &loader, options);
    Ok(FileResult {
        file: file.clone(),
        output,
    })
}

pub(crate) fn write_outputs(out_dir: &Path, results: &[FileResult]) -> Result<Vec<PathBuf>> {
    results.par_iter().try_for_each(|result| -> Result<()> {
        let path = out_dir.join(&result.file.relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        std::fs::write(&path, &result.output.code)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    })?;

    Ok(results
        .iter()
        .map(|result| out_dir.join(&result.file.relative))
        .collect())
}

// =============================================================================
// Schema
// =============================================================================

/// Resolve `type_name` as seen from `file` and print its schema as JSON.
pub fn print_schema(
    file: &Path,
    type_name: &str,
    marker_module: &str,
    compact: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let source = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let module = tsguard_parser::parse_module(&file.to_string_lossy(), &source)
        .with_context(|| format!("failed to parse {}", file.display()))?;

    let loader = FsModuleLoader::new(marker_module);
    let scope = ModuleScope::build(&module, marker_module);
    let ctx = ResolutionContext::new(file, scope, &loader);
    let Some(schema) = TypeResolver::new().resolve_named(&ctx, type_name) else {
        bail!(
            "type '{type_name}' has no schema in {} (not found, or not expressible)",
            file.display()
        );
    };

    let json = if compact {
        serde_json::to_string(&schema)?
    } else {
        serde_json::to_string_pretty(&schema)?
    };
    writeln!(out, "{json}")?;
    Ok(())
}
