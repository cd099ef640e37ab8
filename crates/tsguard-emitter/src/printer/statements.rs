//! Printer - statements, declarations and module items

use super::{Printer, prec};
use super::expressions::leftmost_expression;
use tsguard_parser::ast::*;

impl<'a> Printer<'a> {
    // =========================================================================
    // Statement Lists and Blocks
    // =========================================================================

    /// One statement per line, with the comments and blank lines around parsed
    /// statements carried over from the source.
    pub(super) fn emit_statement_list(&mut self, stmts: &[Stmt]) {
        let mut prev_end = None;
        for stmt in stmts {
            let has_source = !stmt.span.is_dummy();
            if has_source {
                if let Some(prev_end) = prev_end {
                    self.emit_blank_line_between(prev_end, stmt.span.start);
                }
                self.emit_leading_comments(stmt.span.start);
            }
            self.emit_statement(stmt);
            if has_source {
                self.emit_trailing_comments(stmt.span.end);
                prev_end = Some(stmt.span.end);
            }
            self.write_line();
        }
    }

    pub(super) fn emit_block(&mut self, block: &BlockStmt) {
        self.write_char('{');
        let has_comments = !block.span.is_dummy()
            && !self.options.remove_comments
            && self
                .comments
                .get(self.comment_emit_idx)
                .is_some_and(|comment| comment.span.end < block.span.end);
        if block.stmts.is_empty() && !has_comments {
            self.write_char('}');
            return;
        }
        self.write_line();
        self.increase_indent();
        self.emit_statement_list(&block.stmts);
        if !block.span.is_dummy() {
            self.emit_leading_comments(block.span.end.saturating_sub(1));
        }
        self.writer.ensure_new_line();
        self.decrease_indent();
        self.write_char('}');
    }

    /// Body of `if`/`while`/`for`: blocks stay on the header line, anything else goes on
    /// its own indented line.
    fn emit_embedded_statement(&mut self, body: &Stmt) {
        if let StmtKind::Block(block) = &body.kind {
            self.write_space();
            self.emit_block(block);
        } else {
            self.write_line();
            self.increase_indent();
            self.emit_statement(body);
            self.decrease_indent();
        }
    }

    /// Where the next clause (`else`, `while`) continues after an embedded body.
    fn continue_after_embedded(&mut self, body: &Stmt) {
        if matches!(body.kind, StmtKind::Block(_)) {
            self.write_space();
        } else {
            self.write_line();
        }
    }

    // =========================================================================
    // Statements
    // =========================================================================

    pub(super) fn emit_statement(&mut self, stmt: &Stmt) {
        if !self.enter_node() {
            return;
        }
        self.emit_statement_worker(stmt);
        self.exit_node();
    }

    fn emit_statement_worker(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Expr(expr) => {
                self.emit_expression_statement(expr);
                self.write_semicolon();
            }
            StmtKind::Var(decl) => {
                self.emit_var_decl(decl);
                self.write_semicolon();
            }
            StmtKind::Block(block) => self.emit_block(block),
            StmtKind::Empty => self.write_semicolon(),
            StmtKind::Debugger => self.write("debugger;"),
            StmtKind::If { test, cons, alt } => {
                self.write("if (");
                self.emit_expression(test);
                self.write_char(')');
                self.emit_embedded_statement(cons);
                if let Some(alt) = alt {
                    self.continue_after_embedded(cons);
                    self.write("else");
                    if matches!(alt.kind, StmtKind::If { .. }) {
                        self.write_space();
                        self.emit_statement(alt);
                    } else {
                        self.emit_embedded_statement(alt);
                    }
                }
            }
            StmtKind::While { test, body } => {
                self.write("while (");
                self.emit_expression(test);
                self.write_char(')');
                self.emit_embedded_statement(body);
            }
            StmtKind::DoWhile { body, test } => {
                self.write("do");
                self.emit_embedded_statement(body);
                self.continue_after_embedded(body);
                self.write("while (");
                self.emit_expression(test);
                self.write(");");
            }
            StmtKind::For {
                init,
                test,
                update,
                body,
            } => {
                self.write("for (");
                match init {
                    Some(ForInit::Var(decl)) => self.emit_var_decl(decl),
                    Some(ForInit::Expr(expr)) => self.emit_expression(expr),
                    None => {}
                }
                self.write_char(';');
                if let Some(test) = test {
                    self.write_space();
                    self.emit_expression(test);
                }
                self.write_char(';');
                if let Some(update) = update {
                    self.write_space();
                    self.emit_expression(update);
                }
                self.write_char(')');
                self.emit_embedded_statement(body);
            }
            StmtKind::ForIn { left, right, body } => {
                self.write("for (");
                self.emit_for_head(left);
                self.write(" in ");
                self.emit_expression(right);
                self.write_char(')');
                self.emit_embedded_statement(body);
            }
            StmtKind::ForOf {
                is_await,
                left,
                right,
                body,
            } => {
                self.write(if *is_await { "for await (" } else { "for (" });
                self.emit_for_head(left);
                self.write(" of ");
                self.emit_expression_prec(right, prec::ASSIGN);
                self.write_char(')');
                self.emit_embedded_statement(body);
            }
            StmtKind::Return(arg) => {
                self.write("return");
                if let Some(arg) = arg {
                    self.write_space();
                    self.emit_expression(arg);
                }
                self.write_semicolon();
            }
            StmtKind::Throw(arg) => {
                self.write("throw ");
                self.emit_expression(arg);
                self.write_semicolon();
            }
            StmtKind::Break(label) | StmtKind::Continue(label) => {
                self.write(if matches!(stmt.kind, StmtKind::Break(_)) {
                    "break"
                } else {
                    "continue"
                });
                if let Some(label) = label {
                    self.write_space();
                    self.emit_ident(label);
                }
                self.write_semicolon();
            }
            StmtKind::Labeled { label, body } => {
                self.emit_ident(label);
                self.write(": ");
                self.emit_statement(body);
            }
            StmtKind::With { object, body } => {
                self.write("with (");
                self.emit_expression(object);
                self.write_char(')');
                self.emit_embedded_statement(body);
            }
            StmtKind::Switch {
                discriminant,
                cases,
            } => self.emit_switch(discriminant, cases),
            StmtKind::Try {
                block,
                handler,
                finalizer,
            } => {
                self.write("try ");
                self.emit_block(block);
                if let Some(handler) = handler {
                    self.write(" catch ");
                    if let Some(param) = &handler.param {
                        self.write_char('(');
                        self.emit_pat(param);
                        self.write(") ");
                    }
                    self.emit_block(&handler.body);
                }
                if let Some(finalizer) = finalizer {
                    self.write(" finally ");
                    self.emit_block(finalizer);
                }
            }
            StmtKind::Fn(decl) => {
                if decl.declare {
                    self.write("declare ");
                }
                self.emit_function_keyword(&decl.function);
                self.write_space();
                self.emit_ident(&decl.ident);
                self.emit_function_rest(&decl.function);
                if decl.function.body.is_none() {
                    self.write_semicolon();
                }
            }
            StmtKind::Class(decl) => {
                if decl.declare {
                    self.write("declare ");
                }
                self.emit_class(Some(&decl.ident), &decl.class);
            }
            StmtKind::Interface(decl) => self.emit_interface(decl),
            StmtKind::TypeAlias(decl) => {
                self.write("type ");
                self.emit_ident(&decl.id);
                self.emit_type_parameters(decl.type_params.as_deref());
                self.write(" = ");
                self.emit_type(&decl.type_ann);
                self.write_semicolon();
            }
            StmtKind::Enum(decl) => self.emit_enum(decl),
            StmtKind::Namespace(decl) => self.emit_namespace(decl),
            StmtKind::Import(import) => self.emit_import(import),
            StmtKind::ImportEquals(decl) => {
                if decl.is_export {
                    self.write("export ");
                }
                self.write("import ");
                if decl.type_only {
                    self.write("type ");
                }
                self.emit_ident(&decl.id);
                self.write(" = ");
                match &decl.module_ref {
                    ModuleReference::Entity(name) => self.emit_entity_name(name),
                    ModuleReference::Require(src) => {
                        self.write("require(");
                        self.emit_str(src);
                        self.write_char(')');
                    }
                }
                self.write_semicolon();
            }
            StmtKind::ExportDecl(decl) => {
                self.write("export ");
                self.emit_statement(decl);
            }
            StmtKind::ExportNamed(export) => self.emit_named_export(export),
            StmtKind::ExportAll(export) => {
                self.write("export ");
                if export.type_only {
                    self.write("type ");
                }
                self.write_char('*');
                if let Some(alias) = &export.alias {
                    self.write(" as ");
                    self.emit_module_export_name(alias);
                }
                self.write(" from ");
                self.emit_str(&export.src);
                self.write_semicolon();
            }
            StmtKind::ExportDefaultExpr(expr) => {
                self.write("export default ");
                // `export default function` would become a declaration
                if matches!(leftmost_expression(expr), Expr::Fn(_) | Expr::Class(_)) {
                    self.write_char('(');
                    self.emit_expression(expr);
                    self.write_char(')');
                } else {
                    self.emit_expression_prec(expr, prec::ASSIGN);
                }
                self.write_semicolon();
            }
            StmtKind::ExportDefaultDecl(decl) => {
                self.write("export default ");
                match decl {
                    DefaultDecl::Fn(function) => self.emit_function_expression(function),
                    DefaultDecl::Class(class) => self.emit_class(class.ident.as_ref(), &class.class),
                    DefaultDecl::Interface(interface) => self.emit_interface(interface),
                }
            }
            StmtKind::ExportAssign(expr) => {
                self.write("export = ");
                self.emit_expression_prec(expr, prec::ASSIGN);
                self.write_semicolon();
            }
        }
    }

    fn emit_switch(&mut self, discriminant: &Expr, cases: &[SwitchCase]) {
        self.write("switch (");
        self.emit_expression(discriminant);
        self.write(") {");
        self.write_line();
        self.increase_indent();
        for case in cases {
            if !case.span.is_dummy() {
                self.emit_leading_comments(case.span.start);
            }
            match &case.test {
                Some(test) => {
                    self.write("case ");
                    self.emit_expression(test);
                    self.write_char(':');
                }
                None => self.write("default:"),
            }
            if let [Stmt {
                kind: StmtKind::Block(block),
                ..
            }] = case.cons.as_slice()
            {
                self.write_space();
                self.emit_block(block);
                self.write_line();
                continue;
            }
            self.write_line();
            self.increase_indent();
            self.emit_statement_list(&case.cons);
            self.decrease_indent();
        }
        self.decrease_indent();
        self.write_char('}');
    }

    // =========================================================================
    // Variable Declarations
    // =========================================================================

    pub(super) fn emit_var_decl(&mut self, decl: &VarDecl) {
        if decl.declare {
            self.write("declare ");
        }
        self.write(decl.kind.as_str());
        self.write_space();
        self.emit_comma_list(&decl.decls, |p, declarator| p.emit_var_declarator(declarator));
    }

    fn emit_var_declarator(&mut self, declarator: &VarDeclarator) {
        match &declarator.name {
            // `let x!: T` puts the `!` between the name and its annotation
            Pat::Ident(binding) if declarator.definite => {
                self.emit_ident(&binding.id);
                self.write_char('!');
                self.emit_type_annotation(binding.type_ann.as_deref());
            }
            name => self.emit_pat(name),
        }
        if let Some(init) = &declarator.init {
            self.write(" = ");
            self.emit_expression_prec(init, prec::ASSIGN);
        }
    }

    fn emit_for_head(&mut self, head: &ForHead) {
        match head {
            ForHead::Var(decl) => self.emit_var_decl(decl),
            ForHead::Expr(expr) => self.emit_expression_prec(expr, prec::LEFT_HAND_SIDE),
        }
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    fn emit_interface(&mut self, decl: &InterfaceDecl) {
        self.write("interface ");
        self.emit_ident(&decl.id);
        self.emit_type_parameters(decl.type_params.as_deref());
        if !decl.extends.is_empty() {
            self.write(" extends ");
            self.emit_comma_list(&decl.extends, |p, heritage| p.emit_expr_with_type_args(heritage));
        }
        self.write_space();
        self.emit_type_members(&decl.body, decl.span);
    }

    fn emit_enum(&mut self, decl: &EnumDecl) {
        if decl.declare {
            self.write("declare ");
        }
        if decl.is_const {
            self.write("const ");
        }
        self.write("enum ");
        self.emit_ident(&decl.id);
        self.write_space();
        if decl.members.is_empty() {
            self.write("{}");
            return;
        }
        self.write_char('{');
        self.write_line();
        self.increase_indent();
        for (i, member) in decl.members.iter().enumerate() {
            if !member.span.is_dummy() {
                self.emit_leading_comments(member.span.start);
            }
            self.emit_prop_name(&member.id);
            if let Some(init) = &member.init {
                self.write(" = ");
                self.emit_expression_prec(init, prec::ASSIGN);
            }
            if i + 1 < decl.members.len() {
                self.write_char(',');
            }
            if !member.span.is_dummy() {
                self.emit_trailing_comments(member.span.end);
            }
            self.write_line();
        }
        self.decrease_indent();
        self.write_char('}');
    }

    fn emit_namespace(&mut self, decl: &NamespaceDecl) {
        if decl.declare {
            self.write("declare ");
        }
        match decl.keyword {
            NamespaceKeyword::Global => self.write("global"),
            keyword => {
                self.write(if keyword == NamespaceKeyword::Module {
                    "module "
                } else {
                    "namespace "
                });
                self.emit_module_name(&decl.id);
            }
        }
        let mut body = decl.body.as_ref();
        while let Some(NamespaceBody::Nested(inner)) = body {
            self.write_char('.');
            self.emit_module_name(&inner.id);
            body = inner.body.as_ref();
        }
        let Some(NamespaceBody::Block(stmts)) = body else {
            self.write_semicolon();
            return;
        };
        self.write(" {");
        self.write_line();
        self.increase_indent();
        self.emit_statement_list(stmts);
        if !decl.span.is_dummy() {
            self.emit_leading_comments(decl.span.end.saturating_sub(1));
        }
        self.decrease_indent();
        self.write_char('}');
    }

    fn emit_module_name(&mut self, name: &ModuleName) {
        match name {
            ModuleName::Ident(ident) => self.emit_ident(ident),
            ModuleName::Str(s) => self.emit_str(s),
        }
    }

    // =========================================================================
    // Module Items
    // =========================================================================

    fn emit_import(&mut self, import: &ImportDecl) {
        self.write("import ");
        if import.type_only {
            self.write("type ");
        }
        if !import.specifiers.is_empty() {
            let mut wrote_clause = false;
            for specifier in &import.specifiers {
                match specifier {
                    ImportSpecifier::Default(local) => {
                        self.emit_ident(local);
                    }
                    ImportSpecifier::Namespace(local) => {
                        if wrote_clause {
                            self.write(", ");
                        }
                        self.write("* as ");
                        self.emit_ident(local);
                    }
                    ImportSpecifier::Named { .. } => continue,
                }
                wrote_clause = true;
            }
            let named: Vec<&ImportSpecifier> = import
                .specifiers
                .iter()
                .filter(|s| matches!(s, ImportSpecifier::Named { .. }))
                .collect();
            if !named.is_empty() {
                if wrote_clause {
                    self.write(", ");
                }
                self.write("{ ");
                self.emit_comma_list(&named, |p, specifier| p.emit_import_specifier(specifier));
                self.write(" }");
            }
            self.write(" from ");
        }
        self.emit_str(&import.src);
        if let Some(with) = &import.with {
            self.write(" with ");
            self.emit_expression_prec(with, prec::ASSIGN);
        }
        self.write_semicolon();
    }

    fn emit_import_specifier(&mut self, specifier: &ImportSpecifier) {
        let ImportSpecifier::Named {
            local,
            imported,
            is_type_only,
        } = specifier
        else {
            return;
        };
        if *is_type_only {
            self.write("type ");
        }
        if let Some(imported) = imported.as_ref().filter(|name| name.name() != local.sym) {
            self.emit_module_export_name(imported);
            self.write(" as ");
        }
        self.emit_ident(local);
    }

    fn emit_named_export(&mut self, export: &NamedExport) {
        self.write("export ");
        if export.type_only {
            self.write("type ");
        }
        if export.specifiers.is_empty() {
            self.write("{}");
        } else {
            self.write("{ ");
            self.emit_comma_list(&export.specifiers, |p, specifier| {
                if specifier.is_type_only {
                    p.write("type ");
                }
                p.emit_module_export_name(&specifier.orig);
                if let Some(exported) = &specifier.exported {
                    p.write(" as ");
                    p.emit_module_export_name(exported);
                }
            });
            self.write(" }");
        }
        if let Some(src) = &export.src {
            self.write(" from ");
            self.emit_str(src);
        }
        self.write_semicolon();
    }
}
