use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the tsguard binary.
#[derive(Parser, Debug)]
#[command(
    name = "tsguard",
    version,
    about = "Replace type-guard calls in TypeScript sources with inline runtime validators",
    args_conflicts_with_subcommands = true
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Files or directories to transform.
    #[arg(value_name = "INPUTS")]
    pub inputs: Vec<PathBuf>,

    /// Write transformed files here, mirroring the input layout.
    #[arg(short = 'o', long = "out-dir", alias = "outDir", value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Read options from a tsguard.json file. Flags override its values.
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: OptionOverrides,

    /// Report files that would change and exit with status 1, writing nothing.
    #[arg(long)]
    pub check: bool,

    /// Worker threads (defaults to the number of CPUs).
    #[arg(short = 'j', long, value_name = "N")]
    pub jobs: Option<usize>,
}

/// Flags that override `tsguard.json`.
#[derive(clap::Args, Debug, Default, Clone, PartialEq, Eq)]
pub struct OptionOverrides {
    /// Import specifier that marks tracked functions (default './tsguard').
    #[arg(long = "marker", value_name = "SPECIFIER")]
    pub marker_module: Option<String>,

    /// Local name for the runtime helper import (default '__tsguard').
    #[arg(long = "namespace", value_name = "NAME")]
    pub runtime_namespace: Option<String>,

    /// Spaces per indentation level in the output.
    #[arg(long = "indent", value_name = "N")]
    pub indent_width: Option<usize>,

    /// Drop comments from the output.
    #[arg(long = "remove-comments", alias = "removeComments")]
    pub remove_comments: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the resolved schema of a named type as JSON.
    Schema {
        /// File the type is declared in or imported into.
        file: PathBuf,
        /// Name of the type.
        #[arg(value_name = "TYPE")]
        type_name: String,
        /// Import specifier that marks constraint tags.
        #[arg(long = "marker", value_name = "SPECIFIER")]
        marker_module: Option<String>,
        /// Print on one line.
        #[arg(long)]
        compact: bool,
    },
}
