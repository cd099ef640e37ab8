//! Compile-time validator generation for TypeScript.
//!
//! Calls to functions imported from the marker module (`import { is } from './tsguard'`)
//! that carry an explicit type argument are replaced by an inline runtime check:
//!
//! ```text
//! is<User>(input)
//!   -> typeof input === 'object' && input !== null && typeof input['name'] === 'string'
//! ```
//!
//! Pipeline, per file:
//! - `scope` - `ModuleScope`, the owned index of a module's top level
//! - `context` - `Context` plus the `ModuleLoader` used to follow imports
//! - `resolver` - `TypeResolver`, type syntax to `TypeSchema`
//! - `validator` - `ValidatorSynthesizer`, `TypeSchema` to a check expression
//! - `usage` - `UsageVisitor`, finds and rewrites the tracked calls
//! - `transform` - the fail-open orchestrator (`transform`, `transform_file`)

pub mod context;
pub mod options;
pub mod resolver;
pub mod schema;
pub mod scope;
pub mod transform;
pub mod usage;
pub mod validator;

pub use context::{
    Context, FsModuleLoader, LoadError, LoadedModule, MemoryModuleLoader, ModuleLoader,
};
pub use options::TransformOptions;
pub use resolver::{TypeEnv, TypeResolver};
pub use schema::{LengthConstraints, LiteralValue, NumberConstraints, PropertySchema, TypeSchema};
pub use scope::{ConstraintKind, ModuleScope, TrackedFunctions};
pub use transform::{TransformError, TransformOutput, transform, transform_file, try_transform_file};
pub use usage::UsageVisitor;
pub use validator::ValidatorSynthesizer;

