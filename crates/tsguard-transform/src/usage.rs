//! Usage Visitor: finds calls to tracked functions and rewrites them in place.
//!
//! For every call whose callee is a tracked local name:
//! - the callee is renamed to `<namespace>.<imported name>`
//! - if the call has a type argument that resolves, the whole call is replaced by the
//!   synthesized check against the call's first argument
//!
//! The walk is depth-first in source order. It deliberately does not enter assignment
//! targets, member property keys, destructuring patterns, spread elements, or the
//! arguments of calls.

use crate::context::Context;
use crate::resolver::TypeResolver;
use crate::scope::TrackedFunctions;
use crate::validator::{ValidatorSynthesizer, call, ident};
use tracing::{debug, trace, warn};
use tsguard_common::Span;
use tsguard_common::limits::MAX_EMIT_RECURSION_DEPTH;
use tsguard_parser::ast::{
    ArrowBody, ArrowExpr, BindingIdent, BlockStmt, CallExpr, Class, ClassMember, DefaultDecl,
    Expr, ForInit, Function, Ident, MemberExpr, MemberProp, Module, NamespaceBody,
    NamespaceDecl, Pat, Prop, Stmt, StmtKind, VarDecl,
};

/// Parameter name of the arrow that evaluates a complex argument once.
const VALUE_BINDING: &str = "value";

pub struct UsageVisitor<'c, 'a> {
    ctx: &'c Context<'a>,
    tracked: &'c TrackedFunctions,
    namespace: &'c str,
    resolver: TypeResolver,
    rewritten_calls: usize,
    replaced_calls: usize,
    depth: u32,
    depth_exceeded: bool,
}

impl<'c, 'a> UsageVisitor<'c, 'a> {
    pub fn new(ctx: &'c Context<'a>, tracked: &'c TrackedFunctions, namespace: &'c str) -> Self {
        UsageVisitor {
            ctx,
            tracked,
            namespace,
            resolver: TypeResolver::new(),
            rewritten_calls: 0,
            replaced_calls: 0,
            depth: 0,
            depth_exceeded: false,
        }
    }

    /// Tracked calls seen, renamed or replaced.
    pub fn rewritten_calls(&self) -> usize {
        self.rewritten_calls
    }

    /// Tracked calls replaced by a synthesized check.
    pub fn replaced_calls(&self) -> usize {
        self.replaced_calls
    }

    /// The walk stopped at `MAX_EMIT_RECURSION_DEPTH`; deeper call sites were not seen.
    pub fn depth_exceeded(&self) -> bool {
        self.depth_exceeded
    }

    pub fn visit_module(&mut self, module: &mut Module) {
        self.visit_stmts(&mut module.body);
    }

    fn enter_node(&mut self) -> bool {
        if self.depth >= MAX_EMIT_RECURSION_DEPTH {
            if !self.depth_exceeded {
                warn!(depth = self.depth, "visitor nesting limit reached");
            }
            self.depth_exceeded = true;
            return false;
        }
        self.depth += 1;
        true
    }

    fn exit_node(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn visit_stmts(&mut self, stmts: &mut [Stmt]) {
        for stmt in stmts {
            self.visit_stmt(stmt);
        }
    }

    fn visit_block(&mut self, block: &mut BlockStmt) {
        self.visit_stmts(&mut block.stmts);
    }

    fn visit_stmt(&mut self, stmt: &mut Stmt) {
        if !self.enter_node() {
            return;
        }
        self.visit_stmt_worker(stmt);
        self.exit_node();
    }

    fn visit_stmt_worker(&mut self, stmt: &mut Stmt) {
        match &mut stmt.kind {
            StmtKind::Expr(expr) => self.visit_expr(expr),
            StmtKind::Var(decl) => self.visit_var_decl(decl),
            StmtKind::Block(block) => self.visit_block(block),
            StmtKind::If { test, cons, alt } => {
                self.visit_expr(test);
                self.visit_stmt(cons);
                if let Some(alt) = alt {
                    self.visit_stmt(alt);
                }
            }
            StmtKind::While { test, body } => {
                self.visit_expr(test);
                self.visit_stmt(body);
            }
            StmtKind::DoWhile { body, test } => {
                self.visit_stmt(body);
                self.visit_expr(test);
            }
            StmtKind::For {
                init,
                test,
                update,
                body,
            } => {
                match init {
                    Some(ForInit::Var(decl)) => self.visit_var_decl(decl),
                    Some(ForInit::Expr(expr)) => self.visit_expr(expr),
                    None => {}
                }
                if let Some(test) = test {
                    self.visit_expr(test);
                }
                if let Some(update) = update {
                    self.visit_expr(update);
                }
                self.visit_stmt(body);
            }
            // The head only binds or assigns, so it holds no call site.
            StmtKind::ForIn { right, body, .. } | StmtKind::ForOf { right, body, .. } => {
                self.visit_expr(right);
                self.visit_stmt(body);
            }
            StmtKind::Return(arg) => {
                if let Some(arg) = arg {
                    self.visit_expr(arg);
                }
            }
            StmtKind::Throw(arg) => self.visit_expr(arg),
            StmtKind::Labeled { body, .. } => self.visit_stmt(body),
            StmtKind::With { object, body } => {
                self.visit_expr(object);
                self.visit_stmt(body);
            }
            StmtKind::Switch {
                discriminant,
                cases,
            } => {
                self.visit_expr(discriminant);
                for case in cases {
                    if let Some(test) = &mut case.test {
                        self.visit_expr(test);
                    }
                    self.visit_stmts(&mut case.cons);
                }
            }
            StmtKind::Try {
                block,
                handler,
                finalizer,
            } => {
                self.visit_block(block);
                if let Some(handler) = handler {
                    self.visit_block(&mut handler.body);
                }
                if let Some(finalizer) = finalizer {
                    self.visit_block(finalizer);
                }
            }
            StmtKind::Fn(decl) => self.visit_function(&mut decl.function),
            StmtKind::Class(decl) => self.visit_class(&mut decl.class),
            StmtKind::Namespace(decl) => self.visit_namespace(decl),
            StmtKind::ExportDecl(inner) => self.visit_stmt(inner),
            StmtKind::ExportDefaultExpr(expr) | StmtKind::ExportAssign(expr) => {
                self.visit_expr(expr)
            }
            StmtKind::ExportDefaultDecl(decl) => match decl {
                DefaultDecl::Fn(fn_expr) => self.visit_function(&mut fn_expr.function),
                DefaultDecl::Class(class_expr) => self.visit_class(&mut class_expr.class),
                DefaultDecl::Interface(_) => {}
            },
            StmtKind::Empty
            | StmtKind::Debugger
            | StmtKind::Break(_)
            | StmtKind::Continue(_)
            | StmtKind::Interface(_)
            | StmtKind::TypeAlias(_)
            | StmtKind::Enum(_)
            | StmtKind::Import(_)
            | StmtKind::ImportEquals(_)
            | StmtKind::ExportNamed(_)
            | StmtKind::ExportAll(_) => {}
        }
    }

    fn visit_var_decl(&mut self, decl: &mut VarDecl) {
        for declarator in &mut decl.decls {
            if let Some(init) = &mut declarator.init {
                self.visit_expr(init);
            }
        }
    }

    fn visit_namespace(&mut self, decl: &mut NamespaceDecl) {
        match &mut decl.body {
            Some(NamespaceBody::Block(stmts)) => self.visit_stmts(stmts),
            Some(NamespaceBody::Nested(inner)) => self.visit_namespace(inner),
            None => {}
        }
    }

    /// Parameter defaults are patterns and are not entered.
    fn visit_function(&mut self, function: &mut Function) {
        if let Some(body) = &mut function.body {
            self.visit_block(body);
        }
    }

    fn visit_class(&mut self, class: &mut Class) {
        if let Some(super_class) = &mut class.super_class {
            self.visit_expr(super_class);
        }
        for member in &mut class.body {
            match member {
                ClassMember::Constructor(ctor) => {
                    if let Some(body) = &mut ctor.body {
                        self.visit_block(body);
                    }
                }
                ClassMember::Method(method) => self.visit_function(&mut method.function),
                ClassMember::Property(prop) => {
                    if let Some(value) = &mut prop.value {
                        self.visit_expr(value);
                    }
                }
                ClassMember::StaticBlock(block) => self.visit_block(&mut block.body),
                ClassMember::IndexSignature(_) | ClassMember::Empty(_) => {}
            }
        }
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    fn visit_expr(&mut self, expr: &mut Expr) {
        if !self.enter_node() {
            return;
        }
        self.visit_expr_worker(expr);
        self.exit_node();
    }

    fn visit_expr_worker(&mut self, expr: &mut Expr) {
        if let Expr::Call(call) = &*expr
            && self.tracked_name(call).is_some()
        {
            self.rewrite_tracked_call(expr);
            return;
        }

        match expr {
            Expr::Ident(_)
            | Expr::This(_)
            | Expr::Super(_)
            | Expr::Import(_)
            | Expr::Lit(_)
            | Expr::MetaProp(_) => {}
            Expr::Tpl(tpl) => {
                for expr in &mut tpl.exprs {
                    self.visit_expr(expr);
                }
            }
            Expr::TaggedTpl(tagged) => {
                self.visit_expr(&mut tagged.tag);
                for expr in &mut tagged.tpl.exprs {
                    self.visit_expr(expr);
                }
            }
            Expr::Array(array) => {
                for elem in array.elems.iter_mut().flatten() {
                    if !elem.spread {
                        self.visit_expr(&mut elem.expr);
                    }
                }
            }
            Expr::Object(object) => {
                for prop in &mut object.props {
                    match prop {
                        Prop::KeyValue { value, .. } => self.visit_expr(value),
                        Prop::Method { function, .. } => self.visit_function(function),
                        // `{ a = 1 }` is a destructuring default
                        Prop::Shorthand(_) | Prop::Assign { .. } | Prop::Spread(_) => {}
                    }
                }
            }
            Expr::Fn(fn_expr) => self.visit_function(&mut fn_expr.function),
            Expr::Arrow(arrow) => match &mut arrow.body {
                ArrowBody::Block(block) => self.visit_block(block),
                ArrowBody::Expr(body) => self.visit_expr(body),
            },
            Expr::Class(class_expr) => self.visit_class(&mut class_expr.class),
            Expr::Unary(unary) => self.visit_expr(&mut unary.arg),
            Expr::Update(update) => self.visit_expr(&mut update.arg),
            Expr::Bin(bin) => {
                self.visit_expr(&mut bin.left);
                self.visit_expr(&mut bin.right);
            }
            Expr::Assign(assign) => self.visit_expr(&mut assign.right),
            Expr::Member(member) => self.visit_expr(&mut member.obj),
            Expr::Cond(cond) => {
                self.visit_expr(&mut cond.test);
                self.visit_expr(&mut cond.cons);
                self.visit_expr(&mut cond.alt);
            }
            Expr::Call(call) => self.visit_expr(&mut call.callee),
            Expr::New(new) => {
                self.visit_expr(&mut new.callee);
                for arg in new.args.iter_mut().flatten() {
                    if !arg.spread {
                        self.visit_expr(&mut arg.expr);
                    }
                }
            }
            Expr::Seq(seq) => {
                for expr in &mut seq.exprs {
                    self.visit_expr(expr);
                }
            }
            Expr::Paren(paren) => self.visit_expr(&mut paren.expr),
            Expr::Yield(yield_expr) => {
                if let Some(arg) = &mut yield_expr.arg {
                    self.visit_expr(arg);
                }
            }
            Expr::Await(await_expr) => self.visit_expr(&mut await_expr.arg),
            Expr::TsAs(as_expr) => self.visit_expr(&mut as_expr.expr),
            Expr::TsSatisfies(satisfies) => self.visit_expr(&mut satisfies.expr),
            Expr::TsNonNull(non_null) => self.visit_expr(&mut non_null.expr),
            Expr::TsConstAssertion(assertion) => self.visit_expr(&mut assertion.expr),
        }
    }

    /// Exported name of the tracked function `call` invokes, if any.
    fn tracked_name(&self, call: &CallExpr) -> Option<&'c str> {
        let Expr::Ident(callee) = &*call.callee else {
            return None;
        };
        self.tracked.imported_name(&callee.sym)
    }

    // =========================================================================
    // Call rewriting
    // =========================================================================

    fn rewrite_tracked_call(&mut self, expr: &mut Expr) {
        let Expr::Call(call) = expr else {
            return;
        };
        let Some(imported) = self.tracked_name(call) else {
            return;
        };

        let callee_span = call.callee.span();
        *call.callee = Expr::Member(MemberExpr {
            span: callee_span,
            obj: Box::new(ident(self.namespace)),
            prop: MemberProp::Ident(Ident::new(imported)),
            optional: false,
        });
        self.rewritten_calls += 1;

        let Some(type_arg) = call.type_args.as_ref().and_then(|args| args.first()) else {
            trace!(function = imported, "call without type argument renamed");
            return;
        };
        let Some(schema) = self.resolver.resolve(self.ctx, type_arg, None) else {
            debug!(
                function = imported,
                path = %self.ctx.path.display(),
                "type argument unresolved, call kept"
            );
            return;
        };

        let mut synthesizer = ValidatorSynthesizer::new(self.namespace);
        let replacement = match call.args.first() {
            None => synthesizer.synthesize(&schema, &ident("undefined")),
            Some(arg) if arg.spread => {
                trace!(function = imported, "spread argument, call kept");
                return;
            }
            Some(arg) => {
                let value = arg.expr.unwrap_parens();
                if is_stable_reference(value) {
                    synthesizer.synthesize(&schema, value)
                } else {
                    let check = synthesizer.synthesize(&schema, &ident(VALUE_BINDING));
                    bind_once(check, value.clone())
                }
            }
        };

        trace!(function = imported, kind = schema.kind_name(), "call replaced by validator");
        *expr = replacement;
        self.replaced_calls += 1;
    }
}

/// References that can be repeated in a check without evaluating anything twice.
fn is_stable_reference(expr: &Expr) -> bool {
    match expr {
        Expr::Ident(_) | Expr::This(_) => true,
        Expr::Member(member) => {
            !member.optional
                && !matches!(member.prop, MemberProp::Computed(_))
                && is_stable_reference(&member.obj)
        }
        _ => false,
    }
}

/// `((value) => check)(arg)`
fn bind_once(check: Expr, arg: Expr) -> Expr {
    let callback = Expr::Arrow(ArrowExpr {
        span: Span::DUMMY,
        is_async: false,
        type_params: None,
        params: vec![Pat::Ident(BindingIdent::new(VALUE_BINDING))],
        return_type: None,
        body: ArrowBody::Expr(Box::new(check)),
    });
    call(callback, vec![arg])
}

#[cfg(test)]
#[path = "tests/usage_tests.rs"]
mod tests;
