//! Resolution context and module loading.
//!
//! A `Context` is the module a type expression is resolved in: its path, its
//! `ModuleScope`, and the loader used to follow its imports. Following an import yields
//! the target module's own `Context`, so specifiers inside the target resolve relative
//! to the target.
//!
//! Only relative specifiers are followed. Candidate paths are tried in this order:
//! - a `.js`/`.jsx`/`.mjs`/`.cjs` suffix rewritten to its TypeScript source
//! - the path as written
//! - the path with each TypeScript extension appended
//! - `<path>/index` with each TypeScript extension appended

use crate::scope::{ModuleScope, is_relative};
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tracing::trace;
use tsguard_parser::{ParseError, parse_module};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot find module '{specifier}' imported from '{}'", importer.display())]
    NotFound { specifier: String, importer: PathBuf },
    #[error("only relative module specifiers are followed, got '{0}'")]
    Unsupported(String),
    #[error("failed to read '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// A module found by a loader, indexed and ready for resolution.
#[derive(Clone, Debug)]
pub struct LoadedModule {
    pub path: PathBuf,
    pub scope: Arc<ModuleScope>,
}

/// Capability to follow an import specifier from an importing file.
pub trait ModuleLoader {
    fn load(&self, specifier: &str, importer: &Path) -> Result<LoadedModule, LoadError>;
}

// =============================================================================
// Context
// =============================================================================

#[derive(Clone)]
pub struct Context<'a> {
    pub path: PathBuf,
    pub scope: Arc<ModuleScope>,
    pub loader: &'a dyn ModuleLoader,
}

impl<'a> Context<'a> {
    pub fn new(path: impl Into<PathBuf>, scope: ModuleScope, loader: &'a dyn ModuleLoader) -> Self {
        Context {
            path: path.into(),
            scope: Arc::new(scope),
            loader,
        }
    }

    /// Context of the module `specifier` refers to from this module.
    pub fn load(&self, specifier: &str) -> Result<Context<'a>, LoadError> {
        let loaded = self.loader.load(specifier, &self.path)?;
        Ok(Context {
            path: loaded.path,
            scope: loaded.scope,
            loader: self.loader,
        })
    }
}

impl std::fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("path", &self.path)
            .field("types", &self.scope.type_count())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Candidate paths
// =============================================================================

const TS_EXTENSION_CANDIDATES: [&str; 7] = ["ts", "tsx", "d.ts", "mts", "cts", "d.mts", "d.cts"];

/// TypeScript sources an emitted-JavaScript specifier stands for.
fn js_extension_substitution(path: &Path) -> Option<Vec<PathBuf>> {
    let extension = path.extension()?.to_str()?;
    let replacements: &[&str] = match extension {
        "js" => &["ts", "tsx", "d.ts"],
        "jsx" => &["tsx", "d.ts"],
        "mjs" => &["mts", "d.mts"],
        "cjs" => &["cts", "d.cts"],
        _ => return None,
    };
    let stem = path.with_extension("");
    Some(
        replacements
            .iter()
            .map(|ext| append_extension(&stem, ext))
            .collect(),
    )
}

/// `with_extension` would replace the last dotted segment of `user.model`.
fn append_extension(path: &Path, extension: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

fn resolve_candidates(base: &Path, exists: impl Fn(&Path) -> bool) -> Option<PathBuf> {
    if let Some(rewritten) = js_extension_substitution(base) {
        if let Some(found) = rewritten.into_iter().find(|candidate| exists(candidate)) {
            return Some(found);
        }
    }
    if exists(base) {
        return Some(base.to_path_buf());
    }
    let index = base.join("index");
    TS_EXTENSION_CANDIDATES
        .iter()
        .map(|ext| append_extension(base, ext))
        .chain(
            TS_EXTENSION_CANDIDATES
                .iter()
                .map(|ext| append_extension(&index, ext)),
        )
        .find(|candidate| exists(candidate))
}

/// Resolve `.` and `..` lexically so one file always has one cache key.
pub(crate) fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            other => normalized.push(other),
        }
    }
    normalized
}

fn candidate_base(specifier: &str, importer: &Path) -> Result<PathBuf, LoadError> {
    if !is_relative(specifier) {
        return Err(LoadError::Unsupported(specifier.to_string()));
    }
    let dir = importer.parent().unwrap_or_else(|| Path::new(""));
    Ok(normalize_path(&dir.join(specifier)))
}

fn not_found(specifier: &str, importer: &Path) -> LoadError {
    LoadError::NotFound {
        specifier: specifier.to_string(),
        importer: importer.to_path_buf(),
    }
}

// =============================================================================
// Loaders
// =============================================================================

/// Loads modules from disk. Parsed modules are cached for the lifetime of the loader.
pub struct FsModuleLoader {
    marker_module: String,
    cache: RefCell<FxHashMap<PathBuf, Arc<ModuleScope>>>,
}

impl FsModuleLoader {
    pub fn new(marker_module: impl Into<String>) -> Self {
        FsModuleLoader {
            marker_module: marker_module.into(),
            cache: RefCell::new(FxHashMap::default()),
        }
    }

    pub fn cached_modules(&self) -> usize {
        self.cache.borrow().len()
    }
}

impl ModuleLoader for FsModuleLoader {
    fn load(&self, specifier: &str, importer: &Path) -> Result<LoadedModule, LoadError> {
        let base = candidate_base(specifier, importer)?;
        let path = resolve_candidates(&base, Path::is_file)
            .ok_or_else(|| not_found(specifier, importer))?;

        if let Some(scope) = self.cache.borrow().get(&path) {
            return Ok(LoadedModule {
                path,
                scope: Arc::clone(scope),
            });
        }

        trace!(path = %path.display(), "loading module");
        let source = std::fs::read_to_string(&path).map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?;
        let module = parse_module(&path.to_string_lossy(), &source)?;
        let scope = Arc::new(ModuleScope::build(&module, &self.marker_module));
        self.cache
            .borrow_mut()
            .insert(path.clone(), Arc::clone(&scope));
        Ok(LoadedModule { path, scope })
    }
}

/// Serves modules from an in-memory file table.
pub struct MemoryModuleLoader {
    marker_module: String,
    files: FxHashMap<PathBuf, String>,
    cache: RefCell<FxHashMap<PathBuf, Arc<ModuleScope>>>,
}

impl MemoryModuleLoader {
    pub fn new(marker_module: impl Into<String>) -> Self {
        MemoryModuleLoader {
            marker_module: marker_module.into(),
            files: FxHashMap::default(),
            cache: RefCell::new(FxHashMap::default()),
        }
    }

    pub fn insert(&mut self, path: impl AsRef<Path>, source: impl Into<String>) {
        self.files
            .insert(normalize_path(path.as_ref()), source.into());
        self.cache.get_mut().clear();
    }

    pub fn with_file(mut self, path: impl AsRef<Path>, source: impl Into<String>) -> Self {
        self.insert(path, source);
        self
    }
}

impl ModuleLoader for MemoryModuleLoader {
    fn load(&self, specifier: &str, importer: &Path) -> Result<LoadedModule, LoadError> {
        let base = candidate_base(specifier, importer)?;
        let path = resolve_candidates(&base, |candidate| self.files.contains_key(candidate))
            .ok_or_else(|| not_found(specifier, importer))?;

        if let Some(scope) = self.cache.borrow().get(&path) {
            return Ok(LoadedModule {
                path,
                scope: Arc::clone(scope),
            });
        }

        let source = self
            .files
            .get(&path)
            .ok_or_else(|| not_found(specifier, importer))?;
        let module = parse_module(&path.to_string_lossy(), source)?;
        let scope = Arc::new(ModuleScope::build(&module, &self.marker_module));
        self.cache
            .borrow_mut()
            .insert(path.clone(), Arc::clone(&scope));
        Ok(LoadedModule { path, scope })
    }
}

#[cfg(test)]
#[path = "tests/context_tests.rs"]
mod tests;
