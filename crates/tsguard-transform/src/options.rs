use serde::Deserialize;
use tsguard_emitter::PrintOptions;

pub const DEFAULT_MARKER_MODULE: &str = "./tsguard";
pub const DEFAULT_RUNTIME_NAMESPACE: &str = "__tsguard";

/// Options for one file transform, deserializable from `tsguard.json`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransformOptions {
    /// Import specifier that marks tracked functions and constraint tags.
    pub marker_module: String,
    /// Local name the runtime helpers are imported under.
    pub runtime_namespace: String,
    pub print: PrintOptions,
}

impl Default for TransformOptions {
    fn default() -> Self {
        TransformOptions {
            marker_module: DEFAULT_MARKER_MODULE.to_string(),
            runtime_namespace: DEFAULT_RUNTIME_NAMESPACE.to_string(),
            print: PrintOptions::default(),
        }
    }
}
