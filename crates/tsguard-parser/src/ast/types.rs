//! Type nodes.

use super::{BigInt, Bool, Ident, Number, Param, PropName, Str, TplElement, TypeParam};
use tsguard_common::Span;

#[derive(Clone, Debug, PartialEq)]
pub enum TsType {
    Keyword(TsKeywordType),
    This(Span),
    Fn(TsFnType),
    Ref(TsTypeRef),
    Query(TsTypeQuery),
    TypeLit(TsTypeLit),
    Array(TsArrayType),
    Tuple(TsTupleType),
    /// `T?` inside a tuple.
    Optional(TsOptionalType),
    /// `...T` inside a tuple.
    Rest(TsRestType),
    Union(TsUnionType),
    Intersection(TsIntersectionType),
    Conditional(TsConditionalType),
    Infer(TsInferType),
    Paren(TsParenType),
    Operator(TsTypeOperator),
    IndexedAccess(TsIndexedAccessType),
    Mapped(TsMappedType),
    Lit(TsLitType),
    Predicate(TsTypePredicate),
    Import(TsImportType),
}

impl TsType {
    pub fn span(&self) -> Span {
        match self {
            TsType::Keyword(t) => t.span,
            TsType::This(span) => *span,
            TsType::Fn(t) => t.span,
            TsType::Ref(t) => t.span,
            TsType::Query(t) => t.span,
            TsType::TypeLit(t) => t.span,
            TsType::Array(t) => t.span,
            TsType::Tuple(t) => t.span,
            TsType::Optional(t) => t.span,
            TsType::Rest(t) => t.span,
            TsType::Union(t) => t.span,
            TsType::Intersection(t) => t.span,
            TsType::Conditional(t) => t.span,
            TsType::Infer(t) => t.span,
            TsType::Paren(t) => t.span,
            TsType::Operator(t) => t.span,
            TsType::IndexedAccess(t) => t.span,
            TsType::Mapped(t) => t.span,
            TsType::Lit(t) => t.span,
            TsType::Predicate(t) => t.span,
            TsType::Import(t) => t.span,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TsKeywordKind {
    Any,
    Unknown,
    Number,
    Object,
    Boolean,
    BigInt,
    String,
    Symbol,
    Void,
    Undefined,
    Null,
    Never,
}

impl TsKeywordKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TsKeywordKind::Any => "any",
            TsKeywordKind::Unknown => "unknown",
            TsKeywordKind::Number => "number",
            TsKeywordKind::Object => "object",
            TsKeywordKind::Boolean => "boolean",
            TsKeywordKind::BigInt => "bigint",
            TsKeywordKind::String => "string",
            TsKeywordKind::Symbol => "symbol",
            TsKeywordKind::Void => "void",
            TsKeywordKind::Undefined => "undefined",
            TsKeywordKind::Null => "null",
            TsKeywordKind::Never => "never",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TsKeywordType {
    pub span: Span,
    pub kind: TsKeywordKind,
}

/// Function or constructor type: `(a: T) => U`, `abstract new () => U`.
#[derive(Clone, Debug, PartialEq)]
pub struct TsFnType {
    pub span: Span,
    pub is_constructor: bool,
    pub is_abstract: bool,
    pub type_params: Option<Vec<TypeParam>>,
    pub params: Vec<Param>,
    pub return_type: Box<TsType>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TsQualifiedName {
    pub left: TsEntityName,
    pub right: Ident,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TsEntityName {
    Ident(Ident),
    Qualified(Box<TsQualifiedName>),
}

impl TsEntityName {
    pub fn span(&self) -> Span {
        match self {
            TsEntityName::Ident(ident) => ident.span,
            TsEntityName::Qualified(q) => q.left.span().to(q.right.span),
        }
    }

    pub fn as_ident(&self) -> Option<&Ident> {
        match self {
            TsEntityName::Ident(ident) => Some(ident),
            TsEntityName::Qualified(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TsTypeRef {
    pub span: Span,
    pub name: TsEntityName,
    pub type_args: Option<Vec<TsType>>,
}

/// Entity name with type arguments, used by `extends` and `implements` clauses.
#[derive(Clone, Debug, PartialEq)]
pub struct TsExprWithTypeArgs {
    pub span: Span,
    pub expr: TsEntityName,
    pub type_args: Option<Vec<TsType>>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TsTypeQueryExpr {
    Entity(TsEntityName),
    Import(TsImportType),
}

/// `typeof x`
#[derive(Clone, Debug, PartialEq)]
pub struct TsTypeQuery {
    pub span: Span,
    pub expr_name: TsTypeQueryExpr,
    pub type_args: Option<Vec<TsType>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TsTypeLit {
    pub span: Span,
    pub members: Vec<TsTypeElement>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TsTypeElement {
    Property(TsPropertySignature),
    Method(TsMethodSignature),
    Index(TsIndexSignature),
    Call(TsCallSignature),
    Construct(TsConstructSignature),
    Getter(TsGetterSignature),
    Setter(TsSetterSignature),
}

#[derive(Clone, Debug, PartialEq)]
pub struct TsPropertySignature {
    pub span: Span,
    pub readonly: bool,
    pub key: PropName,
    pub optional: bool,
    pub type_ann: Option<Box<TsType>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TsMethodSignature {
    pub span: Span,
    pub key: PropName,
    pub optional: bool,
    pub type_params: Option<Vec<TypeParam>>,
    pub params: Vec<Param>,
    pub return_type: Option<Box<TsType>>,
}

/// `[key: string]: T`; also used for class index signatures.
#[derive(Clone, Debug, PartialEq)]
pub struct TsIndexSignature {
    pub span: Span,
    pub is_static: bool,
    pub readonly: bool,
    pub params: Vec<Param>,
    pub type_ann: Option<Box<TsType>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TsCallSignature {
    pub span: Span,
    pub type_params: Option<Vec<TypeParam>>,
    pub params: Vec<Param>,
    pub return_type: Option<Box<TsType>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TsConstructSignature {
    pub span: Span,
    pub type_params: Option<Vec<TypeParam>>,
    pub params: Vec<Param>,
    pub return_type: Option<Box<TsType>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TsGetterSignature {
    pub span: Span,
    pub key: PropName,
    pub return_type: Option<Box<TsType>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TsSetterSignature {
    pub span: Span,
    pub key: PropName,
    pub param: Param,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TsArrayType {
    pub span: Span,
    pub elem_type: Box<TsType>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TsTupleType {
    pub span: Span,
    pub elems: Vec<TsTupleElement>,
}

/// Label of a named tuple member: `name: T`, `name?: T`, `...name: T`.
#[derive(Clone, Debug, PartialEq)]
pub struct TsTupleLabel {
    pub name: Ident,
    pub optional: bool,
    pub rest: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TsTupleElement {
    pub span: Span,
    pub label: Option<TsTupleLabel>,
    pub ty: Box<TsType>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TsOptionalType {
    pub span: Span,
    pub type_ann: Box<TsType>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TsRestType {
    pub span: Span,
    pub type_ann: Box<TsType>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TsUnionType {
    pub span: Span,
    pub types: Vec<TsType>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TsIntersectionType {
    pub span: Span,
    pub types: Vec<TsType>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TsConditionalType {
    pub span: Span,
    pub check_type: Box<TsType>,
    pub extends_type: Box<TsType>,
    pub true_type: Box<TsType>,
    pub false_type: Box<TsType>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TsInferType {
    pub span: Span,
    pub type_param: TypeParam,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TsParenType {
    pub span: Span,
    pub type_ann: Box<TsType>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TsTypeOperatorOp {
    KeyOf,
    Unique,
    ReadOnly,
}

impl TsTypeOperatorOp {
    pub fn as_str(self) -> &'static str {
        match self {
            TsTypeOperatorOp::KeyOf => "keyof",
            TsTypeOperatorOp::Unique => "unique",
            TsTypeOperatorOp::ReadOnly => "readonly",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TsTypeOperator {
    pub span: Span,
    pub op: TsTypeOperatorOp,
    pub type_ann: Box<TsType>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TsIndexedAccessType {
    pub span: Span,
    pub obj_type: Box<TsType>,
    pub index_type: Box<TsType>,
}

/// `+`, `-` or bare modifier on mapped types.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TruePlusMinus {
    True,
    Plus,
    Minus,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TsMappedType {
    pub span: Span,
    pub readonly: Option<TruePlusMinus>,
    pub type_param: TypeParam,
    pub name_type: Option<Box<TsType>>,
    pub optional: Option<TruePlusMinus>,
    pub type_ann: Option<Box<TsType>>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TsLit {
    /// Negative literals (`-1`) carry the sign in `value` and `raw`.
    Number(Number),
    Str(Str),
    Bool(Bool),
    BigInt(BigInt),
    Tpl(TsTplLitType),
}

#[derive(Clone, Debug, PartialEq)]
pub struct TsTplLitType {
    pub span: Span,
    pub types: Vec<TsType>,
    pub quasis: Vec<TplElement>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TsLitType {
    pub span: Span,
    pub lit: TsLit,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TsThisTypeOrIdent {
    This(Span),
    Ident(Ident),
}

/// `x is T`, `asserts x is T`, `asserts x`.
#[derive(Clone, Debug, PartialEq)]
pub struct TsTypePredicate {
    pub span: Span,
    pub asserts: bool,
    pub param_name: TsThisTypeOrIdent,
    pub type_ann: Option<Box<TsType>>,
}

/// `import('x').Foo<T>`
#[derive(Clone, Debug, PartialEq)]
pub struct TsImportType {
    pub span: Span,
    pub arg: Str,
    pub qualifier: Option<TsEntityName>,
    pub type_args: Option<Vec<TsType>>,
}
