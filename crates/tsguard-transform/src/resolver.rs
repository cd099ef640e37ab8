//! Type Resolver: TypeScript type syntax to `TypeSchema`.
//!
//! Resolution is syntactic. A type expression is resolved in a `Context` (the module it
//! appears in) under a type-parameter environment. Anything that cannot be expressed as a
//! schema resolves to `None`; the caller decides what an unresolved type means (an
//! omitted property, a dropped union member, or a call left as written).
//!
//! Termination:
//! - a declaration that is already being resolved resolves to `None` when re-entered,
//!   so `type List = { next: List }` yields an object without `next`
//! - nesting is capped at `MAX_TYPE_RESOLUTION_DEPTH`
//! - cross-file lookups through barrels are capped at `MAX_REEXPORT_HOPS` and never
//!   revisit a `(module, name)` pair on the same chain

use crate::context::Context;
use crate::schema::{LiteralValue, PropertySchema, TypeSchema};
use crate::scope::{ConstraintKind, ExportEntry, ImportedName, TypeDecl, TypeDeclKind};
use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use std::path::PathBuf;
use tracing::{debug, trace};
use tsguard_common::limits::{MAX_REEXPORT_HOPS, MAX_TYPE_RESOLUTION_DEPTH};
use tsguard_parser::ast::{
    TsEntityName, TsExprWithTypeArgs, TsKeywordKind, TsLit, TsTupleElement, TsType,
    TsTypeElement, TsTypeOperatorOp,
};

/// Generic parameter name to the schema of its actual argument, for one instantiation.
pub type TypeEnv = FxHashMap<String, TypeSchema>;

/// A constraint tag found in an intersection. `bound` is `None` when the tag argument
/// is not a numeric literal type.
#[derive(Clone, Copy, Debug)]
struct ConstraintTag {
    kind: ConstraintKind,
    bound: Option<f64>,
}

#[derive(Debug, Default)]
pub struct TypeResolver {
    /// Declarations currently being resolved, keyed by `(module path, name)`.
    in_flight: FxHashSet<(PathBuf, String)>,
    /// Cross-file lookups on the current chain, keyed by `(module path, exported name)`.
    lookups: FxHashSet<(PathBuf, String)>,
    depth: u32,
}

impl TypeResolver {
    pub fn new() -> Self {
        TypeResolver::default()
    }

    /// Resolve `ty` as written in `ctx`, under `env` if given.
    pub fn resolve(
        &mut self,
        ctx: &Context<'_>,
        ty: &TsType,
        env: Option<&TypeEnv>,
    ) -> Option<TypeSchema> {
        let empty = TypeEnv::default();
        self.resolve_type(ctx, ty, env.unwrap_or(&empty))
    }

    /// Resolve a name visible at the top level of `ctx` (declared or imported).
    pub fn resolve_named(&mut self, ctx: &Context<'_>, name: &str) -> Option<TypeSchema> {
        self.resolve_name(ctx, name, Vec::new())
    }

    /// Resolve `name` as exported by the module `specifier` refers to from `ctx`.
    ///
    /// `args` are the already-resolved type arguments of the reference; unresolved
    /// arguments leave their parameter unbound.
    pub fn type_from_file(
        &mut self,
        ctx: &Context<'_>,
        specifier: &str,
        name: &str,
        args: Vec<Option<TypeSchema>>,
    ) -> Option<TypeSchema> {
        self.lookup_export(ctx, specifier, name, args, 0)
    }

    // =========================================================================
    // Type expressions
    // =========================================================================

    fn resolve_type(&mut self, ctx: &Context<'_>, ty: &TsType, env: &TypeEnv) -> Option<TypeSchema> {
        if self.depth >= MAX_TYPE_RESOLUTION_DEPTH {
            debug!(
                depth = self.depth,
                path = %ctx.path.display(),
                "type nesting limit reached"
            );
            return None;
        }
        self.depth += 1;
        let schema = self.resolve_type_worker(ctx, ty, env);
        self.depth -= 1;
        schema
    }

    fn resolve_type_worker(
        &mut self,
        ctx: &Context<'_>,
        ty: &TsType,
        env: &TypeEnv,
    ) -> Option<TypeSchema> {
        match ty {
            TsType::Keyword(keyword) => match keyword.kind {
                TsKeywordKind::String => Some(TypeSchema::string()),
                TsKeywordKind::Number => Some(TypeSchema::number()),
                TsKeywordKind::Boolean => Some(TypeSchema::Boolean),
                _ => None,
            },
            TsType::TypeLit(lit) => {
                let mut properties = IndexMap::new();
                self.collect_members(ctx, &lit.members, env, &mut properties);
                Some(TypeSchema::object(properties))
            }
            TsType::Ref(reference) => {
                self.resolve_reference(ctx, &reference.name, reference.type_args.as_deref(), env)
            }
            TsType::Array(array) => self
                .resolve_type(ctx, &array.elem_type, env)
                .map(TypeSchema::array),
            TsType::Tuple(tuple) => {
                let mut types = Vec::with_capacity(tuple.elems.len());
                for elem in tuple.elems.iter().filter(|elem| is_fixed_tuple_element(elem)) {
                    if let Some(schema) = self.resolve_type(ctx, &elem.ty, env) {
                        types.push(schema);
                    }
                }
                Some(TypeSchema::Tuple { types })
            }
            TsType::Union(union) => {
                let mut types = Vec::with_capacity(union.types.len());
                for member in &union.types {
                    if let Some(schema) = self.resolve_type(ctx, member, env) {
                        types.push(schema);
                    }
                }
                Some(TypeSchema::Union { types })
            }
            TsType::Intersection(intersection) => {
                Some(self.resolve_intersection(ctx, &intersection.types, env))
            }
            TsType::Lit(lit) => literal_schema(&lit.lit),
            TsType::Paren(paren) => self.resolve_type(ctx, &paren.type_ann, env),
            TsType::Operator(operator) if operator.op == TsTypeOperatorOp::ReadOnly => {
                self.resolve_type(ctx, &operator.type_ann, env)
            }
            _ => {
                trace!(path = %ctx.path.display(), "type form has no schema");
                None
            }
        }
    }

    /// Property signatures with a static key and a resolvable type, in order.
    fn collect_members(
        &mut self,
        ctx: &Context<'_>,
        members: &[TsTypeElement],
        env: &TypeEnv,
        properties: &mut IndexMap<String, PropertySchema>,
    ) {
        for member in members {
            let TsTypeElement::Property(prop) = member else {
                continue;
            };
            let Some(key) = prop.key.static_name() else {
                continue;
            };
            let Some(type_ann) = &prop.type_ann else {
                continue;
            };
            match self.resolve_type(ctx, type_ann, env) {
                Some(schema) => {
                    properties.insert(key.to_string(), PropertySchema::new(schema, prop.optional));
                }
                None => trace!(property = key, "unresolved property omitted"),
            }
        }
    }

    // =========================================================================
    // References and declarations
    // =========================================================================

    fn resolve_reference(
        &mut self,
        ctx: &Context<'_>,
        name: &TsEntityName,
        type_args: Option<&[TsType]>,
        env: &TypeEnv,
    ) -> Option<TypeSchema> {
        let Some(ident) = name.as_ident() else {
            trace!(path = %ctx.path.display(), "qualified type names are not followed");
            return None;
        };
        if let Some(bound) = env.get(&ident.sym) {
            return Some(bound.clone());
        }
        let mut args = Vec::new();
        for arg in type_args.unwrap_or_default() {
            args.push(self.resolve_type(ctx, arg, env));
        }
        self.resolve_name(ctx, &ident.sym, args)
    }

    /// Look `name` up in the module's own declarations, then its imports, then the
    /// built-in array types.
    fn resolve_name(
        &mut self,
        ctx: &Context<'_>,
        name: &str,
        args: Vec<Option<TypeSchema>>,
    ) -> Option<TypeSchema> {
        if let Some(decl) = ctx.scope.type_decl(name) {
            return self.resolve_declaration(ctx, decl, args);
        }
        if ctx.scope.constraint_tag(name).is_some() {
            trace!(name, "constraint tag outside an intersection");
            return None;
        }
        if let Some(binding) = ctx.scope.import(name) {
            return match &binding.imported {
                ImportedName::Named(imported) => {
                    self.lookup_export(ctx, &binding.specifier, imported, args, 0)
                }
                ImportedName::Default | ImportedName::Namespace => {
                    trace!(name, "default and namespace imports are not followed");
                    None
                }
            };
        }
        if matches!(name, "Array" | "ReadonlyArray") && args.len() == 1 {
            return args.into_iter().next().flatten().map(TypeSchema::array);
        }
        debug!(name, path = %ctx.path.display(), "type not found");
        None
    }

    /// Instantiate `decl` with `args` bound to its parameters in declaration order.
    fn resolve_declaration(
        &mut self,
        ctx: &Context<'_>,
        decl: &TypeDecl,
        args: Vec<Option<TypeSchema>>,
    ) -> Option<TypeSchema> {
        let identity = (ctx.path.clone(), decl.name.clone());
        if self.in_flight.contains(&identity) {
            debug!(
                name = %decl.name,
                path = %ctx.path.display(),
                "recursive type reference left unresolved"
            );
            return None;
        }
        self.in_flight.insert(identity.clone());

        let env: TypeEnv = decl
            .type_params
            .iter()
            .zip(args)
            .filter_map(|(param, arg)| Some((param.name.sym.clone(), arg?)))
            .collect();
        let schema = match &decl.kind {
            TypeDeclKind::Alias(ty) => self.resolve_type(ctx, ty, &env),
            TypeDeclKind::Interface { extends, body } => {
                Some(self.resolve_interface(ctx, extends, body, &env))
            }
        };

        self.in_flight.remove(&identity);
        schema
    }

    /// Bases in `extends` order, then the interface's own members.
    fn resolve_interface(
        &mut self,
        ctx: &Context<'_>,
        extends: &[TsExprWithTypeArgs],
        body: &[TsTypeElement],
        env: &TypeEnv,
    ) -> TypeSchema {
        let mut properties = IndexMap::new();
        for heritage in extends {
            match self.resolve_reference(ctx, &heritage.expr, heritage.type_args.as_deref(), env) {
                Some(TypeSchema::Object { properties: base }) => properties.extend(base),
                Some(other) => trace!(kind = other.kind_name(), "non-object base ignored"),
                None => debug!(path = %ctx.path.display(), "base interface unresolved"),
            }
        }
        self.collect_members(ctx, body, env, &mut properties);
        TypeSchema::object(properties)
    }

    // =========================================================================
    // Intersections and constraint tags
    // =========================================================================

    fn resolve_intersection(
        &mut self,
        ctx: &Context<'_>,
        types: &[TsType],
        env: &TypeEnv,
    ) -> TypeSchema {
        let mut tags = Vec::new();
        let mut resolved = Vec::with_capacity(types.len());
        for member in types {
            match constraint_tag(ctx, member, env) {
                Some(tag) => tags.push(tag),
                None => resolved.push(self.resolve_type(ctx, member, env)),
            }
        }

        if !tags.is_empty()
            && let [Some(leaf)] = resolved.as_slice()
            && accepts_constraints(leaf)
        {
            return apply_constraints(leaf.clone(), &tags);
        }

        let mut properties = IndexMap::new();
        for schema in resolved.into_iter().flatten() {
            if let TypeSchema::Object {
                properties: member,
            } = schema
            {
                properties.extend(member);
            }
        }
        TypeSchema::object(properties)
    }

    // =========================================================================
    // Cross-file lookup
    // =========================================================================

    fn lookup_export(
        &mut self,
        ctx: &Context<'_>,
        specifier: &str,
        name: &str,
        args: Vec<Option<TypeSchema>>,
        hops: u32,
    ) -> Option<TypeSchema> {
        if hops >= MAX_REEXPORT_HOPS {
            debug!(specifier, name, "re-export chain too long");
            return None;
        }
        let target = match ctx.load(specifier) {
            Ok(target) => target,
            Err(err) => {
                debug!(specifier, from = %ctx.path.display(), %err, "module not loaded");
                return None;
            }
        };

        let key = (target.path.clone(), name.to_string());
        if !self.lookups.insert(key.clone()) {
            debug!(name, path = %target.path.display(), "circular re-export");
            return None;
        }
        let schema = self.lookup_in_module(&target, name, args, hops);
        self.lookups.remove(&key);
        schema
    }

    fn lookup_in_module(
        &mut self,
        target: &Context<'_>,
        name: &str,
        args: Vec<Option<TypeSchema>>,
        hops: u32,
    ) -> Option<TypeSchema> {
        if let Some(decl) = target.scope.exported_type(name) {
            return self.resolve_declaration(target, decl, args);
        }

        for entry in target.scope.exports() {
            match entry {
                ExportEntry::Local { local, exported } if exported == name => {
                    return self.resolve_local_export(target, local, args, hops);
                }
                ExportEntry::Named {
                    specifier,
                    orig,
                    exported,
                } if exported == name => {
                    return self.lookup_export(target, specifier, orig, args, hops + 1);
                }
                _ => {}
            }
        }

        // Members of `export * as ns` are only reachable through qualified names.
        for entry in target.scope.exports() {
            if let ExportEntry::All { specifier } = entry
                && let Some(schema) =
                    self.lookup_export(target, specifier, name, args.clone(), hops + 1)
            {
                return Some(schema);
            }
        }

        debug!(name, path = %target.path.display(), "no matching export");
        None
    }

    /// `export { local as name }`: a declaration of the module or one of its imports.
    fn resolve_local_export(
        &mut self,
        target: &Context<'_>,
        local: &str,
        args: Vec<Option<TypeSchema>>,
        hops: u32,
    ) -> Option<TypeSchema> {
        if let Some(decl) = target.scope.type_decl(local) {
            return self.resolve_declaration(target, decl, args);
        }
        match target.scope.import(local) {
            Some(binding) => match &binding.imported {
                ImportedName::Named(imported) => {
                    self.lookup_export(target, &binding.specifier, imported, args, hops + 1)
                }
                ImportedName::Default | ImportedName::Namespace => None,
            },
            None => {
                debug!(local, path = %target.path.display(), "exported name is not a type");
                None
            }
        }
    }
}

/// Optional (`T?`, `name?: T`) and rest (`...T`) elements do not have a fixed position.
fn is_fixed_tuple_element(elem: &TsTupleElement) -> bool {
    let labeled_variadic = elem
        .label
        .as_ref()
        .is_some_and(|label| label.optional || label.rest);
    !labeled_variadic && !matches!(&*elem.ty, TsType::Optional(_) | TsType::Rest(_))
}

fn literal_schema(lit: &TsLit) -> Option<TypeSchema> {
    let value = match lit {
        TsLit::Number(number) => LiteralValue::Number(number.value),
        TsLit::Str(s) => LiteralValue::String(s.value.clone()),
        TsLit::Bool(b) => LiteralValue::Boolean(b.value),
        TsLit::BigInt(big) => LiteralValue::BigInt(big.value.clone()),
        TsLit::Tpl(_) => return None,
    };
    Some(TypeSchema::Literal { value })
}

/// `MinLength<1>` and friends, when the name is a tag imported from the marker module
/// and not shadowed by a type parameter.
fn constraint_tag(ctx: &Context<'_>, ty: &TsType, env: &TypeEnv) -> Option<ConstraintTag> {
    let TsType::Ref(reference) = ty else {
        return None;
    };
    let ident = reference.name.as_ident()?;
    if env.contains_key(&ident.sym) {
        return None;
    }
    let kind = ctx.scope.constraint_tag(&ident.sym)?;
    let bound = match reference.type_args.as_deref() {
        Some([TsType::Lit(lit)]) => match &lit.lit {
            TsLit::Number(number) => Some(number.value),
            _ => None,
        },
        _ => None,
    };
    Some(ConstraintTag { kind, bound })
}

fn accepts_constraints(schema: &TypeSchema) -> bool {
    matches!(
        schema,
        TypeSchema::String { .. } | TypeSchema::Number { .. } | TypeSchema::Array { .. }
    )
}

/// Later tags overwrite earlier ones for the same bound.
fn apply_constraints(mut schema: TypeSchema, tags: &[ConstraintTag]) -> TypeSchema {
    for tag in tags {
        let Some(bound) = tag.bound else {
            continue;
        };
        match (&mut schema, tag.kind) {
            (
                TypeSchema::String { constraints } | TypeSchema::Array { constraints, .. },
                ConstraintKind::MinLength,
            ) => {
                if let Some(length) = length_bound(bound) {
                    constraints.min_length = Some(length);
                }
            }
            (
                TypeSchema::String { constraints } | TypeSchema::Array { constraints, .. },
                ConstraintKind::MaxLength,
            ) => {
                if let Some(length) = length_bound(bound) {
                    constraints.max_length = Some(length);
                }
            }
            (TypeSchema::Number { constraints }, ConstraintKind::Minimum) => {
                constraints.min = Some(bound);
            }
            (TypeSchema::Number { constraints }, ConstraintKind::Maximum) => {
                constraints.max = Some(bound);
            }
            // A tag that does not apply to the leaf kind is ignored.
            _ => {}
        }
    }
    schema
}

fn length_bound(bound: f64) -> Option<u64> {
    (bound >= 0.0 && bound.fract() == 0.0 && bound <= u32::MAX as f64).then_some(bound as u64)
}

#[cfg(test)]
#[path = "tests/resolver_tests.rs"]
mod tests;
