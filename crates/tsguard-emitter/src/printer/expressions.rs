use super::{Printer, format_number, prec};
use tsguard_parser::ast::*;

impl<'a> Printer<'a> {
    // =========================================================================
    // Expressions
    // =========================================================================

    pub(super) fn emit_expression(&mut self, expr: &Expr) {
        self.emit_expression_prec(expr, prec::COMMA);
    }

    /// Emit `expr`, parenthesized when it binds looser than `min`.
    pub(super) fn emit_expression_prec(&mut self, expr: &Expr, min: u8) {
        if !self.enter_node() {
            return;
        }
        let parens = expression_precedence(expr) < min;
        if parens {
            self.write_char('(');
        }
        self.emit_expression_worker(expr);
        if parens {
            self.write_char(')');
        }
        self.exit_node();
    }

    fn emit_parenthesized(&mut self, expr: &Expr) {
        self.write_char('(');
        self.emit_expression(expr);
        self.write_char(')');
    }

    /// Expression statement: a leading `{`, `function` or `class` would read as a
    /// declaration.
    pub(super) fn emit_expression_statement(&mut self, expr: &Expr) {
        if matches!(
            leftmost_expression(expr),
            Expr::Object(_) | Expr::Fn(_) | Expr::Class(_)
        ) {
            self.emit_parenthesized(expr);
        } else {
            self.emit_expression(expr);
        }
    }

    fn emit_expression_worker(&mut self, expr: &Expr) {
        match expr {
            Expr::Ident(ident) => self.emit_ident(ident),
            Expr::This(_) => self.write("this"),
            Expr::Super(_) => self.write("super"),
            Expr::Import(_) => self.write("import"),
            Expr::Lit(lit) => self.emit_lit(lit),
            Expr::Tpl(tpl) => self.emit_template(tpl),
            Expr::TaggedTpl(tagged) => {
                self.emit_expression_prec(&tagged.tag, prec::CALL);
                if let Some(args) = &tagged.type_args {
                    self.emit_type_arguments(args);
                }
                self.emit_template(&tagged.tpl);
            }
            Expr::Array(array) => self.emit_array_literal(array),
            Expr::Object(object) => self.emit_object_literal(object),
            Expr::Fn(function) => self.emit_function_expression(function),
            Expr::Arrow(arrow) => self.emit_arrow_function(arrow),
            Expr::Class(class) => self.emit_class(class.ident.as_ref(), &class.class),
            Expr::Unary(unary) => self.emit_unary(unary),
            Expr::Update(update) => {
                if update.prefix {
                    self.write(update.op.as_str());
                    self.emit_expression_prec(&update.arg, prec::UNARY);
                } else {
                    self.emit_expression_prec(&update.arg, prec::LEFT_HAND_SIDE);
                    self.write(update.op.as_str());
                }
            }
            Expr::Bin(bin) => self.emit_binary(bin),
            Expr::Assign(assign) => {
                self.emit_expression_prec(&assign.left, prec::LEFT_HAND_SIDE);
                self.write_space();
                self.write(assign.op.as_str());
                self.write_space();
                self.emit_expression_prec(&assign.right, prec::ASSIGN);
            }
            Expr::Member(member) => self.emit_member(member),
            Expr::Cond(cond) => {
                self.emit_expression_prec(&cond.test, prec::NULLISH);
                self.write(" ? ");
                self.emit_expression_prec(&cond.cons, prec::ASSIGN);
                self.write(" : ");
                self.emit_expression_prec(&cond.alt, prec::ASSIGN);
            }
            Expr::Call(call) => {
                self.emit_expression_prec(&call.callee, prec::CALL);
                if call.optional {
                    self.write("?.");
                }
                if let Some(args) = &call.type_args {
                    self.emit_type_arguments(args);
                }
                self.emit_arguments(&call.args);
            }
            Expr::New(new) => self.emit_new(new),
            Expr::Seq(seq) => {
                self.emit_comma_list(&seq.exprs, |p, e| p.emit_expression_prec(e, prec::ASSIGN));
            }
            Expr::Paren(paren) => self.emit_parenthesized(&paren.expr),
            Expr::Yield(yield_expr) => {
                self.write("yield");
                if yield_expr.delegate {
                    self.write_char('*');
                }
                if let Some(arg) = &yield_expr.arg {
                    self.write_space();
                    self.emit_expression_prec(arg, prec::ASSIGN);
                }
            }
            Expr::Await(await_expr) => {
                self.write("await ");
                self.emit_expression_prec(&await_expr.arg, prec::UNARY);
            }
            Expr::MetaProp(meta) => self.write(match meta.kind {
                MetaPropKind::NewTarget => "new.target",
                MetaPropKind::ImportMeta => "import.meta",
            }),
            Expr::TsAs(as_expr) => {
                self.emit_expression_prec(&as_expr.expr, prec::RELATIONAL);
                self.write(" as ");
                self.emit_type(&as_expr.type_ann);
            }
            Expr::TsSatisfies(satisfies) => {
                self.emit_expression_prec(&satisfies.expr, prec::RELATIONAL);
                self.write(" satisfies ");
                self.emit_type(&satisfies.type_ann);
            }
            Expr::TsConstAssertion(assertion) => {
                self.emit_expression_prec(&assertion.expr, prec::RELATIONAL);
                self.write(" as const");
            }
            Expr::TsNonNull(non_null) => {
                self.emit_expression_prec(&non_null.expr, prec::CALL);
                self.write_char('!');
            }
        }
    }

    // =========================================================================
    // Operators
    // =========================================================================

    fn emit_unary(&mut self, unary: &UnaryExpr) {
        self.write(unary.op.as_str());
        if unary.op.is_word() || sign_would_merge(unary.op, &unary.arg) {
            self.write_space();
        }
        self.emit_expression_prec(&unary.arg, prec::UNARY);
    }

    fn emit_binary(&mut self, bin: &BinExpr) {
        let p = binary_precedence(bin.op);
        // `-a ** b` is a syntax error, so the base must bind tighter than unary
        let (left_min, right_min) = if bin.op.is_right_associative() {
            (prec::POSTFIX, p)
        } else {
            (p, p + 1)
        };
        self.emit_binary_operand(&bin.left, left_min, bin.op);
        self.write_space();
        self.write(bin.op.as_str());
        self.write_space();
        self.emit_binary_operand(&bin.right, right_min, bin.op);
    }

    /// `??` cannot be mixed with `||`/`&&` without parentheses.
    fn emit_binary_operand(&mut self, operand: &Expr, min: u8, parent: BinaryOp) {
        let mixes_nullish = match operand {
            Expr::Bin(child) => {
                let is_logical = |op| matches!(op, BinaryOp::LogicalOr | BinaryOp::LogicalAnd);
                (parent == BinaryOp::NullishCoalescing && is_logical(child.op))
                    || (is_logical(parent) && child.op == BinaryOp::NullishCoalescing)
            }
            _ => false,
        };
        if mixes_nullish {
            self.emit_parenthesized(operand);
        } else {
            self.emit_expression_prec(operand, min);
        }
    }

    // =========================================================================
    // Member Access and Calls
    // =========================================================================

    fn emit_member(&mut self, member: &MemberExpr) {
        // `1.toString()` would lex as a malformed number
        if is_integer_literal(&member.obj) {
            self.emit_parenthesized(&member.obj);
        } else {
            self.emit_expression_prec(&member.obj, prec::CALL);
        }
        match &member.prop {
            MemberProp::Ident(ident) | MemberProp::PrivateName(ident) => {
                self.write(if member.optional { "?." } else { "." });
                self.emit_ident(ident);
            }
            MemberProp::Computed(index) => {
                if member.optional {
                    self.write("?.");
                }
                self.write_char('[');
                self.emit_expression(index);
                self.write_char(']');
            }
        }
    }

    fn emit_new(&mut self, new: &NewExpr) {
        self.write("new ");
        // `new a.b()` calls the constructor; `new (a())()` must keep the inner call
        if callee_contains_call(&new.callee) {
            self.emit_parenthesized(&new.callee);
        } else {
            self.emit_expression_prec(&new.callee, prec::CALL);
        }
        if let Some(type_args) = &new.type_args {
            self.emit_type_arguments(type_args);
        }
        if let Some(args) = &new.args {
            self.emit_arguments(args);
        }
    }

    pub(super) fn emit_arguments(&mut self, args: &[ExprOrSpread]) {
        self.write_char('(');
        self.emit_comma_list(args, |p, arg| p.emit_expr_or_spread(arg));
        self.write_char(')');
    }

    fn emit_expr_or_spread(&mut self, arg: &ExprOrSpread) {
        if arg.spread {
            self.write("...");
        }
        self.emit_expression_prec(&arg.expr, prec::ASSIGN);
    }

    // =========================================================================
    // Literals and Templates
    // =========================================================================

    fn emit_lit(&mut self, lit: &Lit) {
        match lit {
            Lit::Str(s) => self.emit_str(s),
            Lit::Num(n) => self.emit_number(n),
            Lit::BigInt(b) => self.emit_bigint(b),
            Lit::Bool(b) => self.write(if b.value { "true" } else { "false" }),
            Lit::Null(_) => self.write("null"),
            Lit::Regex(regex) => self.write(&regex.raw),
        }
    }

    fn emit_template(&mut self, tpl: &Tpl) {
        self.write_char('`');
        for (i, quasi) in tpl.quasis.iter().enumerate() {
            self.write(&quasi.raw);
            if let Some(expr) = tpl.exprs.get(i) {
                self.write("${");
                self.emit_expression(expr);
                self.write_char('}');
            }
        }
        self.write_char('`');
    }

    fn emit_array_literal(&mut self, array: &ArrayLit) {
        if array.elems.is_empty() {
            self.write("[]");
            return;
        }
        let multi_line = self.was_multi_line(array.span);
        self.write_char('[');
        if multi_line {
            self.write_line();
            self.increase_indent();
        }
        for (i, elem) in array.elems.iter().enumerate() {
            if i > 0 {
                self.write_char(',');
                if multi_line {
                    self.write_line();
                } else {
                    self.write_space();
                }
            }
            if let Some(elem) = elem {
                self.emit_expr_or_spread(elem);
            }
        }
        // a trailing hole needs its own comma
        if matches!(array.elems.last(), Some(None)) {
            self.write_char(',');
        }
        if multi_line {
            self.write_line();
            self.decrease_indent();
        }
        self.write_char(']');
    }

    fn emit_object_literal(&mut self, object: &ObjectLit) {
        if object.props.is_empty() {
            self.write("{}");
            return;
        }
        if !self.was_multi_line(object.span) {
            self.write("{ ");
            self.emit_comma_list(&object.props, |p, prop| p.emit_prop(prop));
            self.write(" }");
            return;
        }
        self.write_char('{');
        self.write_line();
        self.increase_indent();
        for (i, prop) in object.props.iter().enumerate() {
            self.emit_prop(prop);
            if i + 1 < object.props.len() {
                self.write_char(',');
            }
            self.write_line();
        }
        self.decrease_indent();
        self.write_char('}');
    }

    fn emit_prop(&mut self, prop: &Prop) {
        match prop {
            Prop::KeyValue { key, value } => {
                self.emit_prop_name(key);
                self.write(": ");
                self.emit_expression_prec(value, prec::ASSIGN);
            }
            Prop::Shorthand(ident) => self.emit_ident(ident),
            Prop::Assign { key, value } => {
                self.emit_ident(key);
                self.write(" = ");
                self.emit_expression_prec(value, prec::ASSIGN);
            }
            Prop::Method {
                key,
                kind,
                function,
            } => {
                self.emit_method_head(*kind, function.is_async, function.is_generator);
                self.emit_prop_name(key);
                self.emit_function_rest(function);
            }
            Prop::Spread(expr) => {
                self.write("...");
                self.emit_expression_prec(expr, prec::ASSIGN);
            }
        }
    }
}

// =============================================================================
// Precedence
// =============================================================================

pub(super) fn binary_precedence(op: BinaryOp) -> u8 {
    // `??` is the loosest binary operator and sits right above conditional
    op.precedence() + prec::CONDITIONAL
}

pub(super) fn expression_precedence(expr: &Expr) -> u8 {
    match expr {
        Expr::Seq(_) => prec::COMMA,
        Expr::Assign(_) | Expr::Arrow(_) | Expr::Yield(_) => prec::ASSIGN,
        Expr::Cond(_) => prec::CONDITIONAL,
        Expr::Bin(bin) => binary_precedence(bin.op),
        Expr::TsAs(_) | Expr::TsSatisfies(_) | Expr::TsConstAssertion(_) => prec::RELATIONAL,
        Expr::Unary(_) | Expr::Await(_) => prec::UNARY,
        Expr::Update(update) if update.prefix => prec::UNARY,
        Expr::Update(_) => prec::POSTFIX,
        // a synthesized negative number prints as `-n`
        Expr::Lit(Lit::Num(n)) if n.raw.is_none() && n.value < 0.0 => prec::UNARY,
        Expr::New(new) if new.args.is_none() => prec::LEFT_HAND_SIDE,
        Expr::New(_)
        | Expr::Call(_)
        | Expr::Member(_)
        | Expr::TaggedTpl(_)
        | Expr::TsNonNull(_)
        | Expr::MetaProp(_) => prec::CALL,
        _ => prec::PRIMARY,
    }
}

/// The expression whose first token starts the printed form of `expr`.
pub(super) fn leftmost_expression(expr: &Expr) -> &Expr {
    let mut current = expr;
    loop {
        current = match current {
            Expr::Bin(bin) => &bin.left,
            Expr::Assign(assign) => &assign.left,
            Expr::Cond(cond) => &cond.test,
            Expr::Seq(seq) => match seq.exprs.first() {
                Some(first) => first,
                None => return current,
            },
            Expr::Member(member) => &member.obj,
            Expr::Call(call) => &call.callee,
            Expr::TaggedTpl(tagged) => &tagged.tag,
            Expr::TsAs(as_expr) => &as_expr.expr,
            Expr::TsSatisfies(satisfies) => &satisfies.expr,
            Expr::TsConstAssertion(assertion) => &assertion.expr,
            Expr::TsNonNull(non_null) => &non_null.expr,
            Expr::Update(update) if !update.prefix => &update.arg,
            _ => return current,
        };
    }
}

/// `- -x`, `+ +x`, `- --x`: adjacent signs must not merge into one token.
fn sign_would_merge(op: UnaryOp, arg: &Expr) -> bool {
    let sign = match op {
        UnaryOp::Minus => '-',
        UnaryOp::Plus => '+',
        _ => return false,
    };
    match arg {
        Expr::Unary(inner) => inner.op.as_str().starts_with(sign),
        Expr::Update(inner) if inner.prefix => inner.op.as_str().starts_with(sign),
        Expr::Lit(Lit::Num(n)) => {
            sign == '-'
                && n.raw
                    .as_deref()
                    .map_or(n.value < 0.0, |raw| raw.starts_with('-'))
        }
        _ => false,
    }
}

fn is_integer_literal(expr: &Expr) -> bool {
    let Expr::Lit(Lit::Num(n)) = expr else {
        return false;
    };
    let text = match &n.raw {
        Some(raw) => raw.clone(),
        None => format_number(n.value),
    };
    text.bytes().all(|b| b.is_ascii_digit())
}

fn callee_contains_call(expr: &Expr) -> bool {
    match expr {
        Expr::Call(_) => true,
        Expr::Member(member) => callee_contains_call(&member.obj),
        Expr::TaggedTpl(tagged) => callee_contains_call(&tagged.tag),
        Expr::TsNonNull(non_null) => callee_contains_call(&non_null.expr),
        _ => false,
    }
}
