//! Statements, declarations and module items.

use super::{Class, ClassExpr, Expr, FnExpr, Function, Ident, Pat, PropName, Str, TypeParam};
use super::{TsEntityName, TsExprWithTypeArgs, TsType, TsTypeElement};
use tsguard_common::Span;

#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub span: Span,
    pub kind: StmtKind,
}

impl Stmt {
    pub fn new(span: Span, kind: StmtKind) -> Self {
        Stmt { span, kind }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    Expr(Box<Expr>),
    Var(VarDecl),
    Block(BlockStmt),
    Empty,
    Debugger,
    If {
        test: Box<Expr>,
        cons: Box<Stmt>,
        alt: Option<Box<Stmt>>,
    },
    While {
        test: Box<Expr>,
        body: Box<Stmt>,
    },
    DoWhile {
        body: Box<Stmt>,
        test: Box<Expr>,
    },
    For {
        init: Option<ForInit>,
        test: Option<Box<Expr>>,
        update: Option<Box<Expr>>,
        body: Box<Stmt>,
    },
    ForIn {
        left: ForHead,
        right: Box<Expr>,
        body: Box<Stmt>,
    },
    ForOf {
        is_await: bool,
        left: ForHead,
        right: Box<Expr>,
        body: Box<Stmt>,
    },
    Return(Option<Box<Expr>>),
    Throw(Box<Expr>),
    Break(Option<Ident>),
    Continue(Option<Ident>),
    Labeled {
        label: Ident,
        body: Box<Stmt>,
    },
    With {
        object: Box<Expr>,
        body: Box<Stmt>,
    },
    Switch {
        discriminant: Box<Expr>,
        cases: Vec<SwitchCase>,
    },
    Try {
        block: BlockStmt,
        handler: Option<CatchClause>,
        finalizer: Option<BlockStmt>,
    },

    // Declarations
    Fn(FnDecl),
    Class(ClassDecl),
    Interface(InterfaceDecl),
    TypeAlias(TypeAliasDecl),
    Enum(EnumDecl),
    Namespace(NamespaceDecl),

    // Module items
    Import(ImportDecl),
    /// `import a = Foo.Bar;` / `import a = require('x');`
    ImportEquals(ImportEqualsDecl),
    /// `export <declaration>`
    ExportDecl(Box<Stmt>),
    /// `export { a, b as c }` with or without `from`
    ExportNamed(NamedExport),
    /// `export * from 'x'` / `export * as ns from 'x'`
    ExportAll(ExportAll),
    ExportDefaultExpr(Box<Expr>),
    ExportDefaultDecl(DefaultDecl),
    /// `export = expr;`
    ExportAssign(Box<Expr>),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct BlockStmt {
    pub span: Span,
    pub stmts: Vec<Stmt>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VarKind {
    Var,
    Let,
    Const,
}

impl VarKind {
    pub fn as_str(self) -> &'static str {
        match self {
            VarKind::Var => "var",
            VarKind::Let => "let",
            VarKind::Const => "const",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct VarDecl {
    pub span: Span,
    pub kind: VarKind,
    pub declare: bool,
    pub decls: Vec<VarDeclarator>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VarDeclarator {
    pub span: Span,
    pub name: Pat,
    /// `let x!: T`
    pub definite: bool,
    pub init: Option<Box<Expr>>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ForInit {
    Var(VarDecl),
    Expr(Box<Expr>),
}

/// Left side of `for-in`/`for-of`. A non-declaration target stays an expression.
#[derive(Clone, Debug, PartialEq)]
pub enum ForHead {
    Var(VarDecl),
    Expr(Box<Expr>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct SwitchCase {
    pub span: Span,
    /// `None` for `default:`
    pub test: Option<Box<Expr>>,
    pub cons: Vec<Stmt>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CatchClause {
    pub span: Span,
    pub param: Option<Pat>,
    pub body: BlockStmt,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FnDecl {
    pub ident: Ident,
    pub declare: bool,
    pub function: Box<Function>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClassDecl {
    pub ident: Ident,
    pub declare: bool,
    pub class: Box<Class>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InterfaceDecl {
    pub span: Span,
    pub id: Ident,
    pub type_params: Option<Vec<TypeParam>>,
    pub extends: Vec<TsExprWithTypeArgs>,
    pub body: Vec<TsTypeElement>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TypeAliasDecl {
    pub span: Span,
    pub id: Ident,
    pub type_params: Option<Vec<TypeParam>>,
    pub type_ann: Box<TsType>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnumDecl {
    pub span: Span,
    pub id: Ident,
    pub is_const: bool,
    pub declare: bool,
    pub members: Vec<EnumMember>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnumMember {
    pub span: Span,
    pub id: PropName,
    pub init: Option<Box<Expr>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NamespaceKeyword {
    Namespace,
    Module,
    Global,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ModuleName {
    Ident(Ident),
    Str(Str),
}

#[derive(Clone, Debug, PartialEq)]
pub struct NamespaceDecl {
    pub span: Span,
    pub declare: bool,
    pub keyword: NamespaceKeyword,
    pub id: ModuleName,
    /// `None` for `declare module 'x';`
    pub body: Option<NamespaceBody>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum NamespaceBody {
    Block(Vec<Stmt>),
    /// `namespace A.B { }` nests `B` inside `A`.
    Nested(Box<NamespaceDecl>),
}

// =============================================================================
// Module items
// =============================================================================

#[derive(Clone, Debug, PartialEq)]
pub enum ModuleExportName {
    Ident(Ident),
    Str(Str),
}

impl ModuleExportName {
    pub fn name(&self) -> &str {
        match self {
            ModuleExportName::Ident(ident) => &ident.sym,
            ModuleExportName::Str(s) => &s.value,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ImportDecl {
    pub span: Span,
    pub type_only: bool,
    /// Empty for side-effect imports (`import './x'`).
    pub specifiers: Vec<ImportSpecifier>,
    pub src: Str,
    /// Import attributes: `with { type: 'json' }`.
    pub with: Option<Box<Expr>>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ImportSpecifier {
    /// `import a from 'x'`
    Default(Ident),
    /// `import * as ns from 'x'`
    Namespace(Ident),
    /// `import { imported as local } from 'x'`
    Named {
        local: Ident,
        imported: Option<ModuleExportName>,
        is_type_only: bool,
    },
}

impl ImportSpecifier {
    pub fn local(&self) -> &Ident {
        match self {
            ImportSpecifier::Default(local)
            | ImportSpecifier::Namespace(local)
            | ImportSpecifier::Named { local, .. } => local,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ModuleReference {
    Entity(TsEntityName),
    Require(Str),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ImportEqualsDecl {
    pub span: Span,
    pub is_export: bool,
    pub type_only: bool,
    pub id: Ident,
    pub module_ref: ModuleReference,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NamedExport {
    pub span: Span,
    pub type_only: bool,
    pub specifiers: Vec<ExportSpecifier>,
    pub src: Option<Str>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExportSpecifier {
    pub orig: ModuleExportName,
    pub exported: Option<ModuleExportName>,
    pub is_type_only: bool,
}

impl ExportSpecifier {
    /// Name visible to importers.
    pub fn exported_name(&self) -> &str {
        self.exported.as_ref().unwrap_or(&self.orig).name()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExportAll {
    pub span: Span,
    pub type_only: bool,
    /// `export * as ns from 'x'`
    pub alias: Option<ModuleExportName>,
    pub src: Str,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DefaultDecl {
    Fn(FnExpr),
    Class(ClassExpr),
    Interface(InterfaceDecl),
}
