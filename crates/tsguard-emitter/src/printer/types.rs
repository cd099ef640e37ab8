//! Printer - type annotations, type members and type parameters

use super::{Printer, format_number};
use tsguard_common::Span;
use tsguard_parser::ast::*;

/// Binding power of type operators, lowest first.
mod type_prec {
    /// Function types and conditional types
    pub const FUNCTION: u8 = 0;
    pub const UNION: u8 = 1;
    pub const INTERSECTION: u8 = 2;
    /// `keyof T`, `readonly T[]`, `infer U`
    pub const OPERATOR: u8 = 3;
    /// `T[]`, `T[K]`
    pub const POSTFIX: u8 = 4;
    pub const PRIMARY: u8 = 5;
}

fn type_precedence(ty: &TsType) -> u8 {
    match ty {
        TsType::Fn(_) | TsType::Conditional(_) | TsType::Predicate(_) => type_prec::FUNCTION,
        TsType::Union(_) => type_prec::UNION,
        TsType::Intersection(_) => type_prec::INTERSECTION,
        TsType::Operator(_) | TsType::Infer(_) => type_prec::OPERATOR,
        TsType::Array(_) | TsType::IndexedAccess(_) => type_prec::POSTFIX,
        _ => type_prec::PRIMARY,
    }
}

impl<'a> Printer<'a> {
    // =========================================================================
    // Types
    // =========================================================================

    pub(super) fn emit_type(&mut self, ty: &TsType) {
        self.emit_type_prec(ty, type_prec::FUNCTION);
    }

    fn emit_type_prec(&mut self, ty: &TsType, min: u8) {
        if !self.enter_node() {
            return;
        }
        let parens = type_precedence(ty) < min;
        if parens {
            self.write_char('(');
        }
        self.emit_type_worker(ty);
        if parens {
            self.write_char(')');
        }
        self.exit_node();
    }

    fn emit_type_worker(&mut self, ty: &TsType) {
        match ty {
            TsType::Keyword(keyword) => self.write(keyword.kind.as_str()),
            TsType::This(_) => self.write("this"),
            TsType::Fn(function) => {
                if function.is_abstract {
                    self.write("abstract ");
                }
                if function.is_constructor {
                    self.write("new ");
                }
                self.emit_type_parameters(function.type_params.as_deref());
                self.emit_parameters(&function.params);
                self.write(" => ");
                self.emit_type(&function.return_type);
            }
            TsType::Ref(reference) => {
                self.emit_entity_name(&reference.name);
                if let Some(args) = &reference.type_args {
                    self.emit_type_arguments(args);
                }
            }
            TsType::Query(query) => {
                self.write("typeof ");
                match &query.expr_name {
                    TsTypeQueryExpr::Entity(name) => self.emit_entity_name(name),
                    TsTypeQueryExpr::Import(import) => self.emit_import_type(import),
                }
                if let Some(args) = &query.type_args {
                    self.emit_type_arguments(args);
                }
            }
            TsType::TypeLit(lit) => self.emit_type_members(&lit.members, lit.span),
            TsType::Array(array) => {
                self.emit_type_prec(&array.elem_type, type_prec::POSTFIX);
                self.write("[]");
            }
            TsType::Tuple(tuple) => {
                self.write_char('[');
                self.emit_comma_list(&tuple.elems, |p, elem| p.emit_tuple_element(elem));
                self.write_char(']');
            }
            TsType::Optional(optional) => {
                self.emit_type_prec(&optional.type_ann, type_prec::POSTFIX);
                self.write_char('?');
            }
            TsType::Rest(rest) => {
                self.write("...");
                self.emit_type(&rest.type_ann);
            }
            TsType::Union(union) => {
                for (i, member) in union.types.iter().enumerate() {
                    if i > 0 {
                        self.write(" | ");
                    }
                    self.emit_type_prec(member, type_prec::INTERSECTION);
                }
            }
            TsType::Intersection(intersection) => {
                for (i, member) in intersection.types.iter().enumerate() {
                    if i > 0 {
                        self.write(" & ");
                    }
                    self.emit_type_prec(member, type_prec::OPERATOR);
                }
            }
            TsType::Conditional(cond) => {
                self.emit_type_prec(&cond.check_type, type_prec::UNION);
                self.write(" extends ");
                // `infer U extends C ?` would read the `?` as part of the conditional
                if matches!(&*cond.extends_type, TsType::Infer(infer) if infer.type_param.constraint.is_some())
                {
                    self.write_char('(');
                    self.emit_type(&cond.extends_type);
                    self.write_char(')');
                } else {
                    self.emit_type_prec(&cond.extends_type, type_prec::UNION);
                }
                self.write(" ? ");
                self.emit_type(&cond.true_type);
                self.write(" : ");
                self.emit_type(&cond.false_type);
            }
            TsType::Infer(infer) => {
                self.write("infer ");
                self.emit_ident(&infer.type_param.name);
                if let Some(constraint) = &infer.type_param.constraint {
                    self.write(" extends ");
                    self.emit_type_prec(constraint, type_prec::UNION);
                }
            }
            TsType::Paren(paren) => {
                self.write_char('(');
                self.emit_type(&paren.type_ann);
                self.write_char(')');
            }
            TsType::Operator(operator) => {
                self.write(operator.op.as_str());
                self.write_space();
                self.emit_type_prec(&operator.type_ann, type_prec::OPERATOR);
            }
            TsType::IndexedAccess(access) => {
                self.emit_type_prec(&access.obj_type, type_prec::POSTFIX);
                self.write_char('[');
                self.emit_type(&access.index_type);
                self.write_char(']');
            }
            TsType::Mapped(mapped) => self.emit_mapped_type(mapped),
            TsType::Lit(lit) => self.emit_lit_type(&lit.lit),
            TsType::Predicate(predicate) => {
                if predicate.asserts {
                    self.write("asserts ");
                }
                match &predicate.param_name {
                    TsThisTypeOrIdent::This(_) => self.write("this"),
                    TsThisTypeOrIdent::Ident(ident) => self.emit_ident(ident),
                }
                if let Some(type_ann) = &predicate.type_ann {
                    self.write(" is ");
                    self.emit_type(type_ann);
                }
            }
            TsType::Import(import) => self.emit_import_type(import),
        }
    }

    fn emit_lit_type(&mut self, lit: &TsLit) {
        match lit {
            TsLit::Number(n) => match &n.raw {
                Some(raw) => self.write(raw),
                None => {
                    let text = format_number(n.value);
                    self.write(&text);
                }
            },
            TsLit::Str(s) => self.emit_str(s),
            TsLit::Bool(b) => self.write(if b.value { "true" } else { "false" }),
            TsLit::BigInt(b) => self.emit_bigint(b),
            TsLit::Tpl(tpl) => {
                self.write_char('`');
                for (i, quasi) in tpl.quasis.iter().enumerate() {
                    self.write(&quasi.raw);
                    if let Some(ty) = tpl.types.get(i) {
                        self.write("${");
                        self.emit_type(ty);
                        self.write_char('}');
                    }
                }
                self.write_char('`');
            }
        }
    }

    fn emit_import_type(&mut self, import: &TsImportType) {
        self.write("import(");
        self.emit_str(&import.arg);
        self.write_char(')');
        if let Some(qualifier) = &import.qualifier {
            self.write_char('.');
            self.emit_entity_name(qualifier);
        }
        if let Some(args) = &import.type_args {
            self.emit_type_arguments(args);
        }
    }

    fn emit_tuple_element(&mut self, elem: &TsTupleElement) {
        let Some(label) = &elem.label else {
            self.emit_type(&elem.ty);
            return;
        };
        if label.rest {
            self.write("...");
        }
        self.emit_ident(&label.name);
        if label.optional {
            self.write_char('?');
        }
        self.write(": ");
        self.emit_type(&elem.ty);
    }

    fn emit_mapped_type(&mut self, mapped: &TsMappedType) {
        self.write("{ ");
        match mapped.readonly {
            Some(TruePlusMinus::True) => self.write("readonly "),
            Some(TruePlusMinus::Plus) => self.write("+readonly "),
            Some(TruePlusMinus::Minus) => self.write("-readonly "),
            None => {}
        }
        self.write_char('[');
        self.emit_ident(&mapped.type_param.name);
        self.write(" in ");
        if let Some(constraint) = &mapped.type_param.constraint {
            self.emit_type(constraint);
        }
        if let Some(name_type) = &mapped.name_type {
            self.write(" as ");
            self.emit_type(name_type);
        }
        self.write_char(']');
        match mapped.optional {
            Some(TruePlusMinus::True) => self.write_char('?'),
            Some(TruePlusMinus::Plus) => self.write("+?"),
            Some(TruePlusMinus::Minus) => self.write("-?"),
            None => {}
        }
        self.emit_type_annotation(mapped.type_ann.as_deref());
        self.write(" }");
    }

    // =========================================================================
    // Names, Arguments and Parameters
    // =========================================================================

    pub(super) fn emit_entity_name(&mut self, name: &TsEntityName) {
        match name {
            TsEntityName::Ident(ident) => self.emit_ident(ident),
            TsEntityName::Qualified(qualified) => {
                self.emit_entity_name(&qualified.left);
                self.write_char('.');
                self.emit_ident(&qualified.right);
            }
        }
    }

    pub(super) fn emit_expr_with_type_args(&mut self, heritage: &TsExprWithTypeArgs) {
        self.emit_entity_name(&heritage.expr);
        if let Some(args) = &heritage.type_args {
            self.emit_type_arguments(args);
        }
    }

    pub(super) fn emit_type_arguments(&mut self, args: &[TsType]) {
        self.write_char('<');
        self.emit_comma_list(args, |p, arg| p.emit_type(arg));
        self.write_char('>');
    }

    pub(super) fn emit_type_parameters(&mut self, params: Option<&[TypeParam]>) {
        let Some(params) = params else {
            return;
        };
        self.write_char('<');
        self.emit_comma_list(params, |p, param| p.emit_type_param(param));
        self.write_char('>');
    }

    pub(super) fn emit_type_param(&mut self, param: &TypeParam) {
        if param.is_const {
            self.write("const ");
        }
        if param.is_in {
            self.write("in ");
        }
        if param.is_out {
            self.write("out ");
        }
        self.emit_ident(&param.name);
        if let Some(constraint) = &param.constraint {
            self.write(" extends ");
            self.emit_type(constraint);
        }
        if let Some(default) = &param.default {
            self.write(" = ");
            self.emit_type(default);
        }
    }

    pub(super) fn emit_type_annotation(&mut self, type_ann: Option<&TsType>) {
        if let Some(ty) = type_ann {
            self.write(": ");
            self.emit_type(ty);
        }
    }

    // =========================================================================
    // Type Members
    // =========================================================================

    /// Body of an interface or type literal. Kept on one line unless the source
    /// spread it over several.
    pub(super) fn emit_type_members(&mut self, members: &[TsTypeElement], span: Span) {
        if members.is_empty() {
            self.write("{}");
            return;
        }
        if !self.was_multi_line(span) {
            self.write("{ ");
            for (i, member) in members.iter().enumerate() {
                if i > 0 {
                    self.write("; ");
                }
                self.emit_type_element(member);
            }
            self.write(" }");
            return;
        }
        self.write_char('{');
        self.write_line();
        self.increase_indent();
        for member in members {
            let member_span = type_element_span(member);
            if !member_span.is_dummy() {
                self.emit_leading_comments(member_span.start);
            }
            self.emit_type_element(member);
            self.write_semicolon();
            if !member_span.is_dummy() {
                self.emit_trailing_comments(member_span.end);
            }
            self.write_line();
        }
        self.emit_leading_comments(span.end.saturating_sub(1));
        self.decrease_indent();
        self.write_char('}');
    }

    fn emit_type_element(&mut self, member: &TsTypeElement) {
        match member {
            TsTypeElement::Property(prop) => {
                if prop.readonly {
                    self.write("readonly ");
                }
                self.emit_prop_name(&prop.key);
                if prop.optional {
                    self.write_char('?');
                }
                self.emit_type_annotation(prop.type_ann.as_deref());
            }
            TsTypeElement::Method(method) => {
                self.emit_prop_name(&method.key);
                if method.optional {
                    self.write_char('?');
                }
                self.emit_type_parameters(method.type_params.as_deref());
                self.emit_parameters(&method.params);
                self.emit_type_annotation(method.return_type.as_deref());
            }
            TsTypeElement::Index(sig) => self.emit_index_signature(sig),
            TsTypeElement::Call(call) => {
                self.emit_type_parameters(call.type_params.as_deref());
                self.emit_parameters(&call.params);
                self.emit_type_annotation(call.return_type.as_deref());
            }
            TsTypeElement::Construct(construct) => {
                self.write("new ");
                self.emit_type_parameters(construct.type_params.as_deref());
                self.emit_parameters(&construct.params);
                self.emit_type_annotation(construct.return_type.as_deref());
            }
            TsTypeElement::Getter(getter) => {
                self.write("get ");
                self.emit_prop_name(&getter.key);
                self.write("()");
                self.emit_type_annotation(getter.return_type.as_deref());
            }
            TsTypeElement::Setter(setter) => {
                self.write("set ");
                self.emit_prop_name(&setter.key);
                self.emit_parameters(std::slice::from_ref(&setter.param));
            }
        }
    }

    pub(super) fn emit_index_signature(&mut self, sig: &TsIndexSignature) {
        if sig.is_static {
            self.write("static ");
        }
        if sig.readonly {
            self.write("readonly ");
        }
        self.write_char('[');
        self.emit_comma_list(&sig.params, |p, param| p.emit_pat(&param.pat));
        self.write_char(']');
        self.emit_type_annotation(sig.type_ann.as_deref());
    }
}

fn type_element_span(member: &TsTypeElement) -> Span {
    match member {
        TsTypeElement::Property(prop) => prop.span,
        TsTypeElement::Method(method) => method.span,
        TsTypeElement::Index(sig) => sig.span,
        TsTypeElement::Call(call) => call.span,
        TsTypeElement::Construct(construct) => construct.span,
        TsTypeElement::Getter(getter) => getter.span,
        TsTypeElement::Setter(setter) => setter.span,
    }
}
