//! Centralized limits and thresholds.
//!
//! Recursion depths used by the parser, the printer and the type resolver. Each nested
//! construct adds frames to the call stack; at these depths the component bails out
//! instead of overflowing.

// =============================================================================
// Recursion Depth Limits
// =============================================================================

/// Maximum nesting of expressions, statements and types while parsing.
///
/// Exceeding it is reported as a parse error, so the file is left untouched.
pub const MAX_PARSER_RECURSION_DEPTH: u32 = 1_000;

/// Maximum depth of a parsed tree.
///
/// Chains folded by a loop (`a + b + c`, `a.b().c`, `T[][]`) cost the parser no stack but
/// nest one node per link, and every later pass walks that nesting recursively (the usage
/// visitor, the printer, dropping the tree). Each link counts against this budget on top
/// of the parser's own recursion, so a file over it is a parse error.
///
/// ```typescript
/// const s = a + a + a + /* ... thousands more ... */ a;
/// ```
pub const MAX_AST_DEPTH: u32 = 2_000;

/// Maximum nesting the printer and the usage visitor follow.
///
/// Above `MAX_AST_DEPTH` with room for the checks spliced into a tree, so anything the
/// parser accepts can be rewritten and printed. Exceeding it leaves the file untouched.
pub const MAX_EMIT_RECURSION_DEPTH: u32 = 5_000;

/// Maximum nesting of type resolution (type arguments, members, aliases and
/// cross-file hops combined).
///
/// Self-referential declarations are cut by the resolver's in-flight set long before
/// this; the limit only bounds pathological but acyclic nesting.
pub const MAX_TYPE_RESOLUTION_DEPTH: u32 = 128;

/// Maximum number of barrel files followed for one cross-file lookup.
///
/// ```typescript
/// // a.ts -> b.ts -> c.ts -> ... each `export * from './next'`
/// ```
pub const MAX_REEXPORT_HOPS: u32 = 32;
