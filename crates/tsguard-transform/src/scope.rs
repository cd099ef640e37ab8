//! Module Scope: an owned index of one module's top level.
//!
//! The resolver never looks at a syntax tree directly. Each loaded module is indexed
//! once into a `ModuleScope`, which owns copies of its type declarations, so the usage
//! visitor can mutate the tree of the file being transformed while the resolver reads
//! the snapshot.

use rustc_hash::FxHashMap;
use std::path::Path;
use tsguard_parser::ast::{
    DefaultDecl, ImportSpecifier, InterfaceDecl, Module, ModuleExportName, Stmt, StmtKind,
    TsExprWithTypeArgs, TsType, TsTypeElement, TypeAliasDecl, TypeParam,
};

// =============================================================================
// Declarations, imports and exports
// =============================================================================

#[derive(Clone, Debug)]
pub struct TypeDecl {
    pub name: String,
    /// Reachable from other modules under its own name.
    pub exported: bool,
    pub type_params: Vec<TypeParam>,
    pub kind: TypeDeclKind,
}

#[derive(Clone, Debug)]
pub enum TypeDeclKind {
    Alias(TsType),
    Interface {
        extends: Vec<TsExprWithTypeArgs>,
        body: Vec<TsTypeElement>,
    },
}

impl TypeDecl {
    fn from_alias(decl: &TypeAliasDecl, exported: bool) -> Self {
        TypeDecl {
            name: decl.id.sym.clone(),
            exported,
            type_params: decl.type_params.clone().unwrap_or_default(),
            kind: TypeDeclKind::Alias((*decl.type_ann).clone()),
        }
    }

    fn from_interface(decl: &InterfaceDecl, exported: bool) -> Self {
        TypeDecl {
            name: decl.id.sym.clone(),
            exported,
            type_params: decl.type_params.clone().unwrap_or_default(),
            kind: TypeDeclKind::Interface {
                extends: decl.extends.clone(),
                body: decl.body.clone(),
            },
        }
    }
}

/// What an import binding refers to in its source module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImportedName {
    Named(String),
    Default,
    Namespace,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportBinding {
    pub specifier: String,
    pub imported: ImportedName,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportEntry {
    /// `export { local as exported }`
    Local { local: String, exported: String },
    /// `export { orig as exported } from 'specifier'`
    Named {
        specifier: String,
        orig: String,
        exported: String,
    },
    /// `export * from 'specifier'`
    All { specifier: String },
    /// `export * as exported from 'specifier'`
    Namespace { specifier: String, exported: String },
}

/// Bound expressed by a constraint tag type such as `MinLength<1>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    MinLength,
    MaxLength,
    Minimum,
    Maximum,
}

impl ConstraintKind {
    /// Tag type exported by the marker module under `name`.
    pub fn from_tag_name(name: &str) -> Option<Self> {
        match name {
            "MinLength" => Some(ConstraintKind::MinLength),
            "MaxLength" => Some(ConstraintKind::MaxLength),
            "Minimum" | "Min" => Some(ConstraintKind::Minimum),
            "Maximum" | "Max" => Some(ConstraintKind::Maximum),
            _ => None,
        }
    }
}

// =============================================================================
// ModuleScope
// =============================================================================

#[derive(Clone, Debug, Default)]
pub struct ModuleScope {
    types: FxHashMap<String, TypeDecl>,
    imports: FxHashMap<String, ImportBinding>,
    exports: Vec<ExportEntry>,
    constraint_tags: FxHashMap<String, ConstraintKind>,
}

impl ModuleScope {
    /// Index the top level of `module`. Constraint tags are recognized on imports from
    /// `marker_module`.
    pub fn build(module: &Module, marker_module: &str) -> Self {
        let mut scope = ModuleScope::default();
        for stmt in &module.body {
            scope.index_statement(stmt, false, marker_module);
        }
        scope
    }

    fn index_statement(&mut self, stmt: &Stmt, exported: bool, marker_module: &str) {
        match &stmt.kind {
            StmtKind::TypeAlias(decl) => self.add_type(TypeDecl::from_alias(decl, exported)),
            StmtKind::Interface(decl) => self.add_type(TypeDecl::from_interface(decl, exported)),
            StmtKind::ExportDecl(inner) => self.index_statement(inner, true, marker_module),
            // `export default interface` is not a named export, but the name is in scope
            StmtKind::ExportDefaultDecl(DefaultDecl::Interface(decl)) => {
                self.add_type(TypeDecl::from_interface(decl, false))
            }
            StmtKind::Import(import) => {
                let specifier = &import.src.value;
                let is_marker = is_marker_specifier(specifier, marker_module);
                for spec in &import.specifiers {
                    let imported = match spec {
                        ImportSpecifier::Default(_) => ImportedName::Default,
                        ImportSpecifier::Namespace(_) => ImportedName::Namespace,
                        ImportSpecifier::Named { local, imported, .. } => {
                            let name = imported
                                .as_ref()
                                .map_or(local.sym.as_str(), ModuleExportName::name);
                            if is_marker && let Some(kind) = ConstraintKind::from_tag_name(name) {
                                self.constraint_tags.insert(local.sym.clone(), kind);
                            }
                            ImportedName::Named(name.to_string())
                        }
                    };
                    self.imports.insert(
                        spec.local().sym.clone(),
                        ImportBinding {
                            specifier: specifier.clone(),
                            imported,
                        },
                    );
                }
            }
            StmtKind::ExportNamed(export) => {
                for spec in &export.specifiers {
                    let orig = spec.orig.name().to_string();
                    let exported = spec.exported_name().to_string();
                    self.exports.push(match &export.src {
                        Some(src) => ExportEntry::Named {
                            specifier: src.value.clone(),
                            orig,
                            exported,
                        },
                        None => ExportEntry::Local {
                            local: orig,
                            exported,
                        },
                    });
                }
            }
            StmtKind::ExportAll(export) => {
                let specifier = export.src.value.clone();
                self.exports.push(match &export.alias {
                    Some(alias) => ExportEntry::Namespace {
                        specifier,
                        exported: alias.name().to_string(),
                    },
                    None => ExportEntry::All { specifier },
                });
            }
            _ => {}
        }
    }

    /// First declaration of a name wins.
    fn add_type(&mut self, decl: TypeDecl) {
        self.types.entry(decl.name.clone()).or_insert(decl);
    }

    /// A top-level type alias or interface, exported or not.
    pub fn type_decl(&self, name: &str) -> Option<&TypeDecl> {
        self.types.get(name)
    }

    pub fn exported_type(&self, name: &str) -> Option<&TypeDecl> {
        self.types.get(name).filter(|decl| decl.exported)
    }

    pub fn import(&self, local: &str) -> Option<&ImportBinding> {
        self.imports.get(local)
    }

    pub fn exports(&self) -> &[ExportEntry] {
        &self.exports
    }

    pub fn constraint_tag(&self, local: &str) -> Option<ConstraintKind> {
        self.constraint_tags.get(local).copied()
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }
}

/// True when `specifier` names the marker module.
///
/// Relative specifiers match on their last segment, so `../tsguard` in a nested
/// directory still finds the tags of `./tsguard`.
pub fn is_marker_specifier(specifier: &str, marker_module: &str) -> bool {
    if specifier == marker_module {
        return true;
    }
    is_relative(specifier)
        && is_relative(marker_module)
        && Path::new(specifier).file_name() == Path::new(marker_module).file_name()
}

pub(crate) fn is_relative(specifier: &str) -> bool {
    specifier.starts_with("./") || specifier.starts_with("../")
}

// =============================================================================
// Tracked functions
// =============================================================================

/// Local names imported from the marker module, mapped to their exported names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrackedFunctions {
    names: FxHashMap<String, String>,
}

impl TrackedFunctions {
    /// Named value imports whose specifier is exactly `marker_module`.
    pub fn collect(module: &Module, marker_module: &str) -> Self {
        let mut names = FxHashMap::default();
        for stmt in &module.body {
            let StmtKind::Import(import) = &stmt.kind else {
                continue;
            };
            if import.type_only || import.src.value != marker_module {
                continue;
            }
            for spec in &import.specifiers {
                if let ImportSpecifier::Named {
                    local,
                    imported,
                    is_type_only: false,
                } = spec
                {
                    let name = imported
                        .as_ref()
                        .map_or(local.sym.as_str(), ModuleExportName::name);
                    names.insert(local.sym.clone(), name.to_string());
                }
            }
        }
        TrackedFunctions { names }
    }

    /// Exported name behind a tracked local.
    pub fn imported_name(&self, local: &str) -> Option<&str> {
        self.names.get(local).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }
}

#[cfg(test)]
#[path = "tests/scope_tests.rs"]
mod tests;
