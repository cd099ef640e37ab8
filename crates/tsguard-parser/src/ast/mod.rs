//! Owned TypeScript syntax tree.
//!
//! Every node owns its children. Nodes built by the parser carry the byte span they were
//! parsed from; synthesized nodes use `Span::DUMMY`.

mod expr;
mod stmt;
mod types;

pub use expr::*;
pub use stmt::*;
pub use types::*;

use tsguard_common::{Comment, Span};

/// A parsed source file.
#[derive(Clone, Debug, PartialEq)]
pub struct Module {
    pub span: Span,
    pub body: Vec<Stmt>,
    /// Comments in source order, for the printer.
    pub comments: Vec<Comment>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Ident {
    pub span: Span,
    pub sym: String,
}

impl Ident {
    pub fn new(sym: impl Into<String>) -> Self {
        Ident {
            span: Span::DUMMY,
            sym: sym.into(),
        }
    }

    pub fn with_span(sym: impl Into<String>, span: Span) -> Self {
        Ident {
            span,
            sym: sym.into(),
        }
    }
}

/// String literal. `value` is cooked; `raw` keeps the original quoting when parsed.
#[derive(Clone, Debug, PartialEq)]
pub struct Str {
    pub span: Span,
    pub value: String,
    pub raw: Option<String>,
}

impl Str {
    pub fn new(value: impl Into<String>) -> Self {
        Str {
            span: Span::DUMMY,
            value: value.into(),
            raw: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Number {
    pub span: Span,
    pub value: f64,
    pub raw: Option<String>,
}

impl Number {
    pub fn new(value: f64) -> Self {
        Number {
            span: Span::DUMMY,
            value,
            raw: None,
        }
    }
}

/// Big integer literal; `value` holds the digits without the `n` suffix.
#[derive(Clone, Debug, PartialEq)]
pub struct BigInt {
    pub span: Span,
    pub value: String,
    pub raw: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bool {
    pub span: Span,
    pub value: bool,
}

/// Property key of object literals, class members, type members and enum members.
#[derive(Clone, Debug, PartialEq)]
pub enum PropName {
    Ident(Ident),
    Str(Str),
    Num(Number),
    BigInt(BigInt),
    Computed(ComputedPropName),
    /// `#name`, class members only. The symbol includes the `#`.
    Private(Ident),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ComputedPropName {
    pub span: Span,
    pub expr: Box<Expr>,
}

impl PropName {
    pub fn span(&self) -> Span {
        match self {
            PropName::Ident(ident) | PropName::Private(ident) => ident.span,
            PropName::Str(s) => s.span,
            PropName::Num(n) => n.span,
            PropName::BigInt(b) => b.span,
            PropName::Computed(c) => c.span,
        }
    }

    /// Statically known name for identifier and string keys.
    pub fn static_name(&self) -> Option<&str> {
        match self {
            PropName::Ident(ident) => Some(&ident.sym),
            PropName::Str(s) => Some(&s.value),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Accessibility {
    Public,
    Protected,
    Private,
}

impl Accessibility {
    pub fn as_str(self) -> &'static str {
        match self {
            Accessibility::Public => "public",
            Accessibility::Protected => "protected",
            Accessibility::Private => "private",
        }
    }
}

/// Type parameter declaration: `const in out T extends C = D`.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeParam {
    pub span: Span,
    pub name: Ident,
    pub is_const: bool,
    pub is_in: bool,
    pub is_out: bool,
    pub constraint: Option<Box<TsType>>,
    pub default: Option<Box<TsType>>,
}
