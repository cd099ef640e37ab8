//! Expressions, patterns, functions and classes.

use super::{Accessibility, BigInt, Bool, Ident, Number, PropName, Str, TypeParam};
use super::{BlockStmt, TsExprWithTypeArgs, TsIndexSignature, TsType};
use tsguard_common::Span;

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Ident(Ident),
    This(Span),
    Super(Span),
    /// The `import` callee of a dynamic `import(...)` call.
    Import(Span),
    Lit(Lit),
    Tpl(Tpl),
    TaggedTpl(TaggedTpl),
    Array(ArrayLit),
    Object(ObjectLit),
    Fn(FnExpr),
    Arrow(ArrowExpr),
    Class(ClassExpr),
    Unary(UnaryExpr),
    Update(UpdateExpr),
    Bin(BinExpr),
    Assign(AssignExpr),
    Member(MemberExpr),
    Cond(CondExpr),
    Call(CallExpr),
    New(NewExpr),
    Seq(SeqExpr),
    Paren(ParenExpr),
    Yield(YieldExpr),
    Await(AwaitExpr),
    MetaProp(MetaPropExpr),
    TsAs(TsAsExpr),
    TsSatisfies(TsSatisfiesExpr),
    TsNonNull(TsNonNullExpr),
    TsConstAssertion(TsConstAssertion),
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Ident(e) => e.span,
            Expr::This(span) | Expr::Super(span) | Expr::Import(span) => *span,
            Expr::Lit(lit) => lit.span(),
            Expr::Tpl(e) => e.span,
            Expr::TaggedTpl(e) => e.span,
            Expr::Array(e) => e.span,
            Expr::Object(e) => e.span,
            Expr::Fn(e) => e.function.span,
            Expr::Arrow(e) => e.span,
            Expr::Class(e) => e.class.span,
            Expr::Unary(e) => e.span,
            Expr::Update(e) => e.span,
            Expr::Bin(e) => e.span,
            Expr::Assign(e) => e.span,
            Expr::Member(e) => e.span,
            Expr::Cond(e) => e.span,
            Expr::Call(e) => e.span,
            Expr::New(e) => e.span,
            Expr::Seq(e) => e.span,
            Expr::Paren(e) => e.span,
            Expr::Yield(e) => e.span,
            Expr::Await(e) => e.span,
            Expr::MetaProp(e) => e.span,
            Expr::TsAs(e) => e.span,
            Expr::TsSatisfies(e) => e.span,
            Expr::TsNonNull(e) => e.span,
            Expr::TsConstAssertion(e) => e.span,
        }
    }

    /// Strip any number of enclosing parentheses.
    pub fn unwrap_parens(&self) -> &Expr {
        let mut expr = self;
        while let Expr::Paren(paren) = expr {
            expr = &paren.expr;
        }
        expr
    }
}

// =============================================================================
// Literals
// =============================================================================

#[derive(Clone, Debug, PartialEq)]
pub enum Lit {
    Str(Str),
    Num(Number),
    BigInt(BigInt),
    Bool(Bool),
    Null(Span),
    Regex(Regex),
}

impl Lit {
    pub fn span(&self) -> Span {
        match self {
            Lit::Str(s) => s.span,
            Lit::Num(n) => n.span,
            Lit::BigInt(b) => b.span,
            Lit::Bool(b) => b.span,
            Lit::Null(span) => *span,
            Lit::Regex(r) => r.span,
        }
    }
}

/// Regular expression literal, kept as written (`/body/flags`).
#[derive(Clone, Debug, PartialEq)]
pub struct Regex {
    pub span: Span,
    pub raw: String,
}

/// Template literal: `quasis.len() == exprs.len() + 1`.
#[derive(Clone, Debug, PartialEq)]
pub struct Tpl {
    pub span: Span,
    pub exprs: Vec<Expr>,
    pub quasis: Vec<TplElement>,
}

/// Raw text of one template segment, without delimiters.
#[derive(Clone, Debug, PartialEq)]
pub struct TplElement {
    pub span: Span,
    pub raw: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TaggedTpl {
    pub span: Span,
    pub tag: Box<Expr>,
    pub type_args: Option<Vec<TsType>>,
    pub tpl: Tpl,
}

// =============================================================================
// Array / object literals
// =============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct ExprOrSpread {
    pub spread: bool,
    pub expr: Box<Expr>,
}

impl ExprOrSpread {
    pub fn expr(expr: Expr) -> Self {
        ExprOrSpread {
            spread: false,
            expr: Box::new(expr),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ArrayLit {
    pub span: Span,
    /// `None` entries are holes (`[a, , b]`).
    pub elems: Vec<Option<ExprOrSpread>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ObjectLit {
    pub span: Span,
    pub props: Vec<Prop>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MethodKind {
    Method,
    Getter,
    Setter,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Prop {
    KeyValue {
        key: PropName,
        value: Box<Expr>,
    },
    Shorthand(Ident),
    /// `{ a = 1 }`, only meaningful as a destructuring assignment target.
    Assign {
        key: Ident,
        value: Box<Expr>,
    },
    Method {
        key: PropName,
        kind: MethodKind,
        function: Box<Function>,
    },
    Spread(Box<Expr>),
}

// =============================================================================
// Operators
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Minus,
    Plus,
    Bang,
    Tilde,
    TypeOf,
    Void,
    Delete,
}

impl UnaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOp::Minus => "-",
            UnaryOp::Plus => "+",
            UnaryOp::Bang => "!",
            UnaryOp::Tilde => "~",
            UnaryOp::TypeOf => "typeof",
            UnaryOp::Void => "void",
            UnaryOp::Delete => "delete",
        }
    }

    pub fn is_word(self) -> bool {
        matches!(self, UnaryOp::TypeOf | UnaryOp::Void | UnaryOp::Delete)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct UnaryExpr {
    pub span: Span,
    pub op: UnaryOp,
    pub arg: Box<Expr>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateOp {
    PlusPlus,
    MinusMinus,
}

impl UpdateOp {
    pub fn as_str(self) -> &'static str {
        match self {
            UpdateOp::PlusPlus => "++",
            UpdateOp::MinusMinus => "--",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct UpdateExpr {
    pub span: Span,
    pub op: UpdateOp,
    pub prefix: bool,
    pub arg: Box<Expr>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    NullishCoalescing,
    LogicalOr,
    LogicalAnd,
    BitOr,
    BitXor,
    BitAnd,
    EqEq,
    NotEq,
    EqEqEq,
    NotEqEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    In,
    InstanceOf,
    LShift,
    RShift,
    ZeroFillRShift,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Exp,
}

/// Binding power of `as` and `satisfies`, which sit with the relational operators.
pub const TS_AS_PRECEDENCE: u8 = 8;

impl BinaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::NullishCoalescing => "??",
            BinaryOp::LogicalOr => "||",
            BinaryOp::LogicalAnd => "&&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::BitAnd => "&",
            BinaryOp::EqEq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::EqEqEq => "===",
            BinaryOp::NotEqEq => "!==",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::In => "in",
            BinaryOp::InstanceOf => "instanceof",
            BinaryOp::LShift => "<<",
            BinaryOp::RShift => ">>",
            BinaryOp::ZeroFillRShift => ">>>",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Exp => "**",
        }
    }

    /// Binding power; higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOp::NullishCoalescing => 1,
            BinaryOp::LogicalOr => 2,
            BinaryOp::LogicalAnd => 3,
            BinaryOp::BitOr => 4,
            BinaryOp::BitXor => 5,
            BinaryOp::BitAnd => 6,
            BinaryOp::EqEq | BinaryOp::NotEq | BinaryOp::EqEqEq | BinaryOp::NotEqEq => 7,
            BinaryOp::Lt
            | BinaryOp::LtEq
            | BinaryOp::Gt
            | BinaryOp::GtEq
            | BinaryOp::In
            | BinaryOp::InstanceOf => TS_AS_PRECEDENCE,
            BinaryOp::LShift | BinaryOp::RShift | BinaryOp::ZeroFillRShift => 9,
            BinaryOp::Add | BinaryOp::Sub => 10,
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => 11,
            BinaryOp::Exp => 12,
        }
    }

    pub fn is_right_associative(self) -> bool {
        self == BinaryOp::Exp
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BinExpr {
    pub span: Span,
    pub op: BinaryOp,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignOp {
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    ModAssign,
    ExpAssign,
    LShiftAssign,
    RShiftAssign,
    ZeroFillRShiftAssign,
    BitAndAssign,
    BitOrAssign,
    BitXorAssign,
    AndAssign,
    OrAssign,
    NullishAssign,
}

impl AssignOp {
    pub fn as_str(self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::AddAssign => "+=",
            AssignOp::SubAssign => "-=",
            AssignOp::MulAssign => "*=",
            AssignOp::DivAssign => "/=",
            AssignOp::ModAssign => "%=",
            AssignOp::ExpAssign => "**=",
            AssignOp::LShiftAssign => "<<=",
            AssignOp::RShiftAssign => ">>=",
            AssignOp::ZeroFillRShiftAssign => ">>>=",
            AssignOp::BitAndAssign => "&=",
            AssignOp::BitOrAssign => "|=",
            AssignOp::BitXorAssign => "^=",
            AssignOp::AndAssign => "&&=",
            AssignOp::OrAssign => "||=",
            AssignOp::NullishAssign => "??=",
        }
    }
}

/// Assignment. The target is kept as an expression (destructuring targets are array and
/// object literals).
#[derive(Clone, Debug, PartialEq)]
pub struct AssignExpr {
    pub span: Span,
    pub op: AssignOp,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

// =============================================================================
// Member access and calls
// =============================================================================

#[derive(Clone, Debug, PartialEq)]
pub enum MemberProp {
    Ident(Ident),
    /// `obj.#name`; the symbol includes the `#`.
    PrivateName(Ident),
    Computed(Box<Expr>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct MemberExpr {
    pub span: Span,
    pub obj: Box<Expr>,
    pub prop: MemberProp,
    /// Accessed with `?.`.
    pub optional: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CallExpr {
    pub span: Span,
    pub callee: Box<Expr>,
    pub type_args: Option<Vec<TsType>>,
    pub args: Vec<ExprOrSpread>,
    /// Called with `?.(`.
    pub optional: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewExpr {
    pub span: Span,
    pub callee: Box<Expr>,
    pub type_args: Option<Vec<TsType>>,
    /// `None` for `new Foo` without an argument list.
    pub args: Option<Vec<ExprOrSpread>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CondExpr {
    pub span: Span,
    pub test: Box<Expr>,
    pub cons: Box<Expr>,
    pub alt: Box<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SeqExpr {
    pub span: Span,
    pub exprs: Vec<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParenExpr {
    pub span: Span,
    pub expr: Box<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct YieldExpr {
    pub span: Span,
    pub arg: Option<Box<Expr>>,
    pub delegate: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AwaitExpr {
    pub span: Span,
    pub arg: Box<Expr>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MetaPropKind {
    NewTarget,
    ImportMeta,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MetaPropExpr {
    pub span: Span,
    pub kind: MetaPropKind,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TsAsExpr {
    pub span: Span,
    pub expr: Box<Expr>,
    pub type_ann: Box<TsType>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TsSatisfiesExpr {
    pub span: Span,
    pub expr: Box<Expr>,
    pub type_ann: Box<TsType>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TsNonNullExpr {
    pub span: Span,
    pub expr: Box<Expr>,
}

/// `expr as const`
#[derive(Clone, Debug, PartialEq)]
pub struct TsConstAssertion {
    pub span: Span,
    pub expr: Box<Expr>,
}

// =============================================================================
// Patterns
// =============================================================================

#[derive(Clone, Debug, PartialEq)]
pub enum Pat {
    Ident(BindingIdent),
    Array(ArrayPat),
    Object(ObjectPat),
    Assign(AssignPat),
    Rest(RestPat),
}

impl Pat {
    pub fn span(&self) -> Span {
        match self {
            Pat::Ident(b) => b.id.span,
            Pat::Array(p) => p.span,
            Pat::Object(p) => p.span,
            Pat::Assign(p) => p.span,
            Pat::Rest(p) => p.span,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BindingIdent {
    pub id: Ident,
    pub optional: bool,
    pub type_ann: Option<Box<TsType>>,
}

impl BindingIdent {
    pub fn new(sym: impl Into<String>) -> Self {
        BindingIdent {
            id: Ident::new(sym),
            optional: false,
            type_ann: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ArrayPat {
    pub span: Span,
    pub elems: Vec<Option<Pat>>,
    pub optional: bool,
    pub type_ann: Option<Box<TsType>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ObjectPat {
    pub span: Span,
    pub props: Vec<ObjectPatProp>,
    pub optional: bool,
    pub type_ann: Option<Box<TsType>>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ObjectPatProp {
    KeyValue { key: PropName, value: Box<Pat> },
    /// `{ a }` or `{ a = init }`
    Shorthand {
        key: Ident,
        value: Option<Box<Expr>>,
    },
    Rest(RestPat),
}

#[derive(Clone, Debug, PartialEq)]
pub struct AssignPat {
    pub span: Span,
    pub left: Box<Pat>,
    pub right: Box<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RestPat {
    pub span: Span,
    pub arg: Box<Pat>,
    pub type_ann: Option<Box<TsType>>,
}

// =============================================================================
// Functions and classes
// =============================================================================

/// Parameter modifiers only appear on constructor parameter properties.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParamModifiers {
    pub accessibility: Option<Accessibility>,
    pub is_override: bool,
    pub readonly: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    pub span: Span,
    pub modifiers: ParamModifiers,
    pub pat: Pat,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Function {
    pub span: Span,
    pub is_async: bool,
    pub is_generator: bool,
    pub type_params: Option<Vec<TypeParam>>,
    pub params: Vec<Param>,
    pub return_type: Option<Box<TsType>>,
    /// `None` for overload signatures and ambient declarations.
    pub body: Option<BlockStmt>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FnExpr {
    pub ident: Option<Ident>,
    pub function: Box<Function>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ArrowBody {
    Block(BlockStmt),
    Expr(Box<Expr>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ArrowExpr {
    pub span: Span,
    pub is_async: bool,
    pub type_params: Option<Vec<TypeParam>>,
    pub params: Vec<Pat>,
    pub return_type: Option<Box<TsType>>,
    pub body: ArrowBody,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Class {
    pub span: Span,
    pub is_abstract: bool,
    pub type_params: Option<Vec<TypeParam>>,
    pub super_class: Option<Box<Expr>>,
    pub super_type_args: Option<Vec<TsType>>,
    pub implements: Vec<TsExprWithTypeArgs>,
    pub body: Vec<ClassMember>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClassExpr {
    pub ident: Option<Ident>,
    pub class: Box<Class>,
}

/// Modifiers shared by methods, accessors and properties.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemberModifiers {
    pub accessibility: Option<Accessibility>,
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_override: bool,
    pub readonly: bool,
    pub declare: bool,
    pub accessor: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ClassMember {
    Constructor(Constructor),
    Method(ClassMethod),
    Property(ClassProp),
    IndexSignature(TsIndexSignature),
    StaticBlock(StaticBlock),
    /// A stray `;` in the class body.
    Empty(Span),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Constructor {
    pub span: Span,
    pub accessibility: Option<Accessibility>,
    pub params: Vec<Param>,
    pub body: Option<BlockStmt>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClassMethod {
    pub span: Span,
    pub modifiers: MemberModifiers,
    pub key: PropName,
    pub kind: MethodKind,
    pub optional: bool,
    pub function: Box<Function>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClassProp {
    pub span: Span,
    pub modifiers: MemberModifiers,
    pub key: PropName,
    pub optional: bool,
    pub definite: bool,
    pub type_ann: Option<Box<TsType>>,
    pub value: Option<Box<Expr>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StaticBlock {
    pub span: Span,
    pub body: BlockStmt,
}
