//! Tracing configuration for the tsguard binary.
//!
//! Three output formats, selected by `TSGUARD_LOG_FORMAT`:
//!
//! - `text` (default): flat `tracing-subscriber` lines
//! - `tree`: indented spans via `tracing-tree`, one `transform` span per file
//! - `json`: one JSON object per event
//!
//! ```bash
//! TSGUARD_LOG=debug TSGUARD_LOG_FORMAT=tree tsguard src/
//! TSGUARD_LOG="tsguard_transform::resolver=trace" tsguard src/handler.ts
//! ```
//!
//! Nothing is installed unless `TSGUARD_LOG` or `RUST_LOG` is set.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Tree,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var("TSGUARD_LOG_FORMAT").unwrap_or_default())
    }
}

/// `TSGUARD_LOG` wins over `RUST_LOG`; both use the `RUST_LOG` directive syntax.
fn build_filter() -> EnvFilter {
    match std::env::var("TSGUARD_LOG") {
        Ok(directives) => EnvFilter::builder().parse_lossy(directives),
        Err(_) => EnvFilter::from_default_env(),
    }
}

/// Install the global subscriber. All output goes to stderr so stdout stays usable for
/// transformed code and schemas.
pub fn init_tracing() {
    if std::env::var_os("TSGUARD_LOG").is_none() && std::env::var_os("RUST_LOG").is_none() {
        return;
    }

    let filter = build_filter();
    match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_targets(true);
            Registry::default().with(filter).with(tree_layer).init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);
            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
