use anyhow::{Context, Result, bail};
use std::path::Path;
use tsguard_transform::TransformOptions;

use crate::args::OptionOverrides;

/// Read a `tsguard.json` file.
///
/// ```json
/// { "markerModule": "./guard", "runtimeNamespace": "rt", "print": { "indentWidth": 2 } }
/// ```
///
/// Missing keys keep their defaults.
pub fn load_config(path: &Path) -> Result<TransformOptions> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    parse_config(&text).with_context(|| format!("invalid config file {}", path.display()))
}

pub fn parse_config(text: &str) -> Result<TransformOptions> {
    let options: TransformOptions = serde_json::from_str(text)?;
    validate(&options)?;
    Ok(options)
}

/// Options for a run: defaults, then the config file if any, then command-line flags.
pub fn resolve_options(
    config: Option<&Path>,
    overrides: &OptionOverrides,
) -> Result<TransformOptions> {
    let mut options = match config {
        Some(path) => load_config(path)?,
        None => TransformOptions::default(),
    };
    apply_overrides(&mut options, overrides);
    validate(&options)?;
    Ok(options)
}

pub fn apply_overrides(options: &mut TransformOptions, overrides: &OptionOverrides) {
    if let Some(marker) = &overrides.marker_module {
        options.marker_module = marker.clone();
    }
    if let Some(namespace) = &overrides.runtime_namespace {
        options.runtime_namespace = namespace.clone();
    }
    if let Some(indent) = overrides.indent_width {
        options.print.indent_width = indent;
    }
    if overrides.remove_comments {
        options.print.remove_comments = true;
    }
}

fn validate(options: &TransformOptions) -> Result<()> {
    if options.marker_module.is_empty() {
        bail!("markerModule must not be empty");
    }
    if !is_identifier(&options.runtime_namespace) {
        bail!(
            "runtimeNamespace '{}' is not a valid identifier",
            options.runtime_namespace
        );
    }
    Ok(())
}

/// ASCII identifier check; the namespace is spliced into generated code as-is.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
