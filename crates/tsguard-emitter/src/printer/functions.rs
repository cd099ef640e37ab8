//! Printer - functions, parameters, binding patterns and classes

use super::{Printer, prec};
use super::expressions::leftmost_expression;
use tsguard_parser::ast::*;

impl<'a> Printer<'a> {
    // =========================================================================
    // Functions
    // =========================================================================

    pub(super) fn emit_function_expression(&mut self, function: &FnExpr) {
        self.emit_function_keyword(&function.function);
        self.write_space();
        if let Some(ident) = &function.ident {
            self.emit_ident(ident);
        }
        self.emit_function_rest(&function.function);
    }

    /// `async function*`
    pub(super) fn emit_function_keyword(&mut self, function: &Function) {
        if function.is_async {
            self.write("async ");
        }
        self.write("function");
        if function.is_generator {
            self.write_char('*');
        }
    }

    /// Type parameters, parameters, return type and body. A missing body writes
    /// nothing; callers add the `;` of signatures.
    pub(super) fn emit_function_rest(&mut self, function: &Function) {
        self.emit_type_parameters(function.type_params.as_deref());
        self.emit_parameters(&function.params);
        self.emit_type_annotation(function.return_type.as_deref());
        if let Some(body) = &function.body {
            self.write_space();
            self.emit_block(body);
        }
    }

    /// `async *`, `get ` or `set ` in front of a method key.
    pub(super) fn emit_method_head(&mut self, kind: MethodKind, is_async: bool, is_generator: bool) {
        match kind {
            MethodKind::Getter => self.write("get "),
            MethodKind::Setter => self.write("set "),
            MethodKind::Method => {
                if is_async {
                    self.write("async ");
                }
                if is_generator {
                    self.write_char('*');
                }
            }
        }
    }

    pub(super) fn emit_arrow_function(&mut self, arrow: &ArrowExpr) {
        if arrow.is_async {
            self.write("async ");
        }
        match arrow.type_params.as_deref() {
            // `<T>(x) => ...` opens a JSX element in .tsx
            Some([param]) if param.constraint.is_none() => {
                self.write_char('<');
                self.emit_type_param(param);
                self.write(",>");
            }
            params => self.emit_type_parameters(params),
        }
        self.write_char('(');
        self.emit_comma_list(&arrow.params, |p, pat| p.emit_pat(pat));
        self.write_char(')');
        self.emit_type_annotation(arrow.return_type.as_deref());
        self.write(" => ");
        match &arrow.body {
            ArrowBody::Block(block) => self.emit_block(block),
            ArrowBody::Expr(expr) => {
                if matches!(leftmost_expression(expr), Expr::Object(_)) {
                    self.write_char('(');
                    self.emit_expression(expr);
                    self.write_char(')');
                } else {
                    self.emit_expression_prec(expr, prec::ASSIGN);
                }
            }
        }
    }

    // =========================================================================
    // Parameters and Patterns
    // =========================================================================

    pub(super) fn emit_parameters(&mut self, params: &[Param]) {
        self.write_char('(');
        self.emit_comma_list(params, |p, param| p.emit_param(param));
        self.write_char(')');
    }

    fn emit_param(&mut self, param: &Param) {
        if let Some(accessibility) = param.modifiers.accessibility {
            self.write(accessibility.as_str());
            self.write_space();
        }
        if param.modifiers.is_override {
            self.write("override ");
        }
        if param.modifiers.readonly {
            self.write("readonly ");
        }
        self.emit_pat(&param.pat);
    }

    pub(super) fn emit_pat(&mut self, pat: &Pat) {
        if !self.enter_node() {
            return;
        }
        match pat {
            Pat::Ident(binding) => self.emit_binding_ident(binding),
            Pat::Array(array) => {
                self.write_char('[');
                for (i, elem) in array.elems.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    if let Some(elem) = elem {
                        self.emit_pat(elem);
                    }
                }
                if matches!(array.elems.last(), Some(None)) {
                    self.write_char(',');
                }
                self.write_char(']');
                self.emit_optional_and_annotation(array.optional, array.type_ann.as_deref());
            }
            Pat::Object(object) => {
                if object.props.is_empty() {
                    self.write("{}");
                } else {
                    self.write("{ ");
                    self.emit_comma_list(&object.props, |p, prop| p.emit_object_pat_prop(prop));
                    self.write(" }");
                }
                self.emit_optional_and_annotation(object.optional, object.type_ann.as_deref());
            }
            Pat::Assign(assign) => {
                self.emit_pat(&assign.left);
                self.write(" = ");
                self.emit_expression_prec(&assign.right, prec::ASSIGN);
            }
            Pat::Rest(rest) => self.emit_rest_pat(rest),
        }
        self.exit_node();
    }

    pub(super) fn emit_binding_ident(&mut self, binding: &BindingIdent) {
        self.emit_ident(&binding.id);
        self.emit_optional_and_annotation(binding.optional, binding.type_ann.as_deref());
    }

    fn emit_rest_pat(&mut self, rest: &RestPat) {
        self.write("...");
        self.emit_pat(&rest.arg);
        self.emit_type_annotation(rest.type_ann.as_deref());
    }

    fn emit_object_pat_prop(&mut self, prop: &ObjectPatProp) {
        match prop {
            ObjectPatProp::KeyValue { key, value } => {
                self.emit_prop_name(key);
                self.write(": ");
                self.emit_pat(value);
            }
            ObjectPatProp::Shorthand { key, value } => {
                self.emit_ident(key);
                if let Some(value) = value {
                    self.write(" = ");
                    self.emit_expression_prec(value, prec::ASSIGN);
                }
            }
            ObjectPatProp::Rest(rest) => self.emit_rest_pat(rest),
        }
    }

    fn emit_optional_and_annotation(&mut self, optional: bool, type_ann: Option<&TsType>) {
        if optional {
            self.write_char('?');
        }
        self.emit_type_annotation(type_ann);
    }

    // =========================================================================
    // Classes
    // =========================================================================

    pub(super) fn emit_class(&mut self, ident: Option<&Ident>, class: &Class) {
        if class.is_abstract {
            self.write("abstract ");
        }
        self.write("class");
        if let Some(ident) = ident {
            self.write_space();
            self.emit_ident(ident);
        }
        self.emit_type_parameters(class.type_params.as_deref());
        if let Some(super_class) = &class.super_class {
            self.write(" extends ");
            self.emit_expression_prec(super_class, prec::LEFT_HAND_SIDE);
            if let Some(type_args) = &class.super_type_args {
                self.emit_type_arguments(type_args);
            }
        }
        if !class.implements.is_empty() {
            self.write(" implements ");
            self.emit_comma_list(&class.implements, |p, heritage| {
                p.emit_expr_with_type_args(heritage)
            });
        }
        self.write_space();
        if class.body.is_empty() {
            self.write("{}");
            return;
        }
        self.write_char('{');
        self.write_line();
        self.increase_indent();
        for member in &class.body {
            let span = class_member_span(member);
            if !span.is_dummy() {
                self.emit_leading_comments(span.start);
            }
            self.emit_class_member(member);
            if !span.is_dummy() {
                self.emit_trailing_comments(span.end);
            }
            self.write_line();
        }
        if !class.span.is_dummy() {
            self.emit_leading_comments(class.span.end.saturating_sub(1));
        }
        self.decrease_indent();
        self.write_char('}');
    }

    fn emit_class_member(&mut self, member: &ClassMember) {
        match member {
            ClassMember::Constructor(ctor) => {
                if let Some(accessibility) = ctor.accessibility {
                    self.write(accessibility.as_str());
                    self.write_space();
                }
                self.write("constructor");
                self.emit_parameters(&ctor.params);
                match &ctor.body {
                    Some(body) => {
                        self.write_space();
                        self.emit_block(body);
                    }
                    None => self.write_semicolon(),
                }
            }
            ClassMember::Method(method) => {
                self.emit_member_modifiers(&method.modifiers);
                self.emit_method_head(
                    method.kind,
                    method.function.is_async,
                    method.function.is_generator,
                );
                self.emit_prop_name(&method.key);
                if method.optional {
                    self.write_char('?');
                }
                self.emit_function_rest(&method.function);
                if method.function.body.is_none() {
                    self.write_semicolon();
                }
            }
            ClassMember::Property(prop) => {
                self.emit_member_modifiers(&prop.modifiers);
                self.emit_prop_name(&prop.key);
                if prop.optional {
                    self.write_char('?');
                }
                if prop.definite {
                    self.write_char('!');
                }
                self.emit_type_annotation(prop.type_ann.as_deref());
                if let Some(value) = &prop.value {
                    self.write(" = ");
                    self.emit_expression_prec(value, prec::ASSIGN);
                }
                self.write_semicolon();
            }
            ClassMember::IndexSignature(sig) => {
                self.emit_index_signature(sig);
                self.write_semicolon();
            }
            ClassMember::StaticBlock(block) => {
                self.write("static ");
                self.emit_block(&block.body);
            }
            ClassMember::Empty(_) => self.write_semicolon(),
        }
    }

    fn emit_member_modifiers(&mut self, modifiers: &MemberModifiers) {
        if modifiers.declare {
            self.write("declare ");
        }
        if let Some(accessibility) = modifiers.accessibility {
            self.write(accessibility.as_str());
            self.write_space();
        }
        if modifiers.is_static {
            self.write("static ");
        }
        if modifiers.is_abstract {
            self.write("abstract ");
        }
        if modifiers.is_override {
            self.write("override ");
        }
        if modifiers.readonly {
            self.write("readonly ");
        }
        if modifiers.accessor {
            self.write("accessor ");
        }
    }
}

fn class_member_span(member: &ClassMember) -> tsguard_common::Span {
    match member {
        ClassMember::Constructor(ctor) => ctor.span,
        ClassMember::Method(method) => method.span,
        ClassMember::Property(prop) => prop.span,
        ClassMember::IndexSignature(sig) => sig.span,
        ClassMember::StaticBlock(block) => block.span,
        ClassMember::Empty(span) => *span,
    }
}
