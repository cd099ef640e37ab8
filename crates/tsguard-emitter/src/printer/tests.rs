use super::{PrintError, PrintOptions, Printer, format_number, quote_string};
use tsguard_common::Span;
use tsguard_parser::ast::*;

fn ident(name: &str) -> Expr {
    Expr::Ident(Ident::new(name))
}

fn num(value: f64) -> Expr {
    Expr::Lit(Lit::Num(Number::new(value)))
}

fn bin(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    Expr::Bin(BinExpr {
        span: Span::DUMMY,
        op,
        left: Box::new(left),
        right: Box::new(right),
    })
}

fn unary(op: UnaryOp, arg: Expr) -> Expr {
    Expr::Unary(UnaryExpr {
        span: Span::DUMMY,
        op,
        arg: Box::new(arg),
    })
}

fn call(callee: Expr, args: Vec<Expr>) -> Expr {
    Expr::Call(CallExpr {
        span: Span::DUMMY,
        callee: Box::new(callee),
        type_args: None,
        args: args.into_iter().map(ExprOrSpread::expr).collect(),
        optional: false,
    })
}

fn member(obj: Expr, prop: &str) -> Expr {
    Expr::Member(MemberExpr {
        span: Span::DUMMY,
        obj: Box::new(obj),
        prop: MemberProp::Ident(Ident::new(prop)),
        optional: false,
    })
}

fn print(expr: &Expr) -> String {
    let options = PrintOptions::default();
    let mut printer = Printer::new(&options);
    printer.print_expression(expr);
    printer.finish().expect("printable")
}

#[test]
fn binary_operands_are_parenthesized_by_precedence() {
    let expr = bin(
        BinaryOp::Mul,
        bin(BinaryOp::Add, ident("a"), ident("b")),
        ident("c"),
    );
    assert_eq!(print(&expr), "(a + b) * c");

    let expr = bin(
        BinaryOp::Sub,
        ident("a"),
        bin(BinaryOp::Sub, ident("b"), ident("c")),
    );
    assert_eq!(print(&expr), "a - (b - c)");

    let expr = bin(
        BinaryOp::Sub,
        bin(BinaryOp::Sub, ident("a"), ident("b")),
        ident("c"),
    );
    assert_eq!(print(&expr), "a - b - c");
}

#[test]
fn exponent_is_right_associative_and_rejects_unary_base() {
    let expr = bin(
        BinaryOp::Exp,
        ident("a"),
        bin(BinaryOp::Exp, ident("b"), ident("c")),
    );
    assert_eq!(print(&expr), "a ** b ** c");

    let expr = bin(BinaryOp::Exp, unary(UnaryOp::Minus, ident("a")), ident("b"));
    assert_eq!(print(&expr), "(-a) ** b");
}

#[test]
fn nullish_is_never_mixed_with_logical_operators() {
    let expr = bin(
        BinaryOp::NullishCoalescing,
        bin(BinaryOp::LogicalOr, ident("a"), ident("b")),
        ident("c"),
    );
    assert_eq!(print(&expr), "(a || b) ?? c");

    let expr = bin(
        BinaryOp::LogicalAnd,
        bin(BinaryOp::NullishCoalescing, ident("a"), ident("b")),
        ident("c"),
    );
    assert_eq!(print(&expr), "(a ?? b) && c");
}

#[test]
fn adjacent_signs_are_separated() {
    let expr = unary(UnaryOp::Minus, unary(UnaryOp::Minus, ident("x")));
    assert_eq!(print(&expr), "- -x");
    let expr = unary(UnaryOp::Minus, num(-1.0));
    assert_eq!(print(&expr), "- -1");
    let expr = unary(UnaryOp::TypeOf, ident("x"));
    assert_eq!(print(&expr), "typeof x");
    let expr = unary(UnaryOp::Bang, unary(UnaryOp::Bang, ident("x")));
    assert_eq!(print(&expr), "!!x");
}

#[test]
fn member_access_on_calls_and_literals() {
    let expr = call(member(num(1.0), "toString"), vec![]);
    assert_eq!(print(&expr), "(1).toString()");

    let expr = call(member(num(1.5), "toFixed"), vec![num(2.0)]);
    assert_eq!(print(&expr), "1.5.toFixed(2)");

    let expr = member(bin(BinaryOp::Add, ident("a"), ident("b")), "length");
    assert_eq!(print(&expr), "(a + b).length");
}

#[test]
fn new_keeps_inner_call_in_callee() {
    let expr = Expr::New(NewExpr {
        span: Span::DUMMY,
        callee: Box::new(call(ident("factory"), vec![])),
        type_args: None,
        args: Some(vec![]),
    });
    assert_eq!(print(&expr), "new (factory())()");

    let bare = Expr::New(NewExpr {
        span: Span::DUMMY,
        callee: Box::new(member(ident("ns"), "Thing")),
        type_args: None,
        args: None,
    });
    assert_eq!(print(&member(bare, "value")), "(new ns.Thing).value");
}

#[test]
fn arrow_returning_object_literal_is_wrapped() {
    let expr = Expr::Arrow(ArrowExpr {
        span: Span::DUMMY,
        is_async: false,
        type_params: None,
        params: vec![Pat::Ident(BindingIdent::new("v"))],
        return_type: None,
        body: ArrowBody::Expr(Box::new(Expr::Object(ObjectLit {
            span: Span::DUMMY,
            props: vec![Prop::KeyValue {
                key: PropName::Ident(Ident::new("value")),
                value: Box::new(ident("v")),
            }],
        }))),
    });
    assert_eq!(print(&expr), "(v) => ({ value: v })");
}

#[test]
fn arrow_as_call_argument_and_callee() {
    let arrow = Expr::Arrow(ArrowExpr {
        span: Span::DUMMY,
        is_async: false,
        type_params: None,
        params: vec![],
        return_type: None,
        body: ArrowBody::Expr(Box::new(num(1.0))),
    });
    assert_eq!(print(&call(ident("f"), vec![arrow.clone()])), "f(() => 1)");
    assert_eq!(print(&call(arrow, vec![])), "(() => 1)()");
}

#[test]
fn synthesized_property_keys_are_quoted_only_when_needed() {
    let expr = Expr::Object(ObjectLit {
        span: Span::DUMMY,
        props: vec![
            Prop::KeyValue {
                key: PropName::Str(Str::new("plain")),
                value: Box::new(num(1.0)),
            },
            Prop::KeyValue {
                key: PropName::Str(Str::new("with-dash")),
                value: Box::new(num(2.0)),
            },
        ],
    });
    assert_eq!(print(&expr), "{ plain: 1, 'with-dash': 2 }");
}

#[test]
fn statement_starting_with_object_or_function_is_wrapped() {
    let options = PrintOptions::default();
    let mut printer = Printer::new(&options);
    let stmt = Stmt::new(
        Span::DUMMY,
        StmtKind::Expr(Box::new(Expr::Assign(AssignExpr {
            span: Span::DUMMY,
            op: AssignOp::Assign,
            left: Box::new(Expr::Object(ObjectLit {
                span: Span::DUMMY,
                props: vec![Prop::Shorthand(Ident::new("a"))],
            })),
            right: Box::new(ident("b")),
        }))),
    );
    printer.print_statement(&stmt);
    assert_eq!(printer.finish().expect("printable"), "({ a } = b);");
}

#[test]
fn quote_string_escapes() {
    assert_eq!(quote_string("it's", '\''), r"'it\'s'");
    assert_eq!(quote_string("a\nb\t\\", '\''), r"'a\nb\t\\'");
    assert_eq!(quote_string("say \"hi\"", '"'), r#""say \"hi\"""#);
    assert_eq!(quote_string("\u{0}", '\''), r"'\x00'");
}

#[test]
fn format_number_matches_javascript_spelling() {
    assert_eq!(format_number(0.0), "0");
    assert_eq!(format_number(-0.0), "0");
    assert_eq!(format_number(42.0), "42");
    assert_eq!(format_number(-3.0), "-3");
    assert_eq!(format_number(0.5), "0.5");
    assert_eq!(format_number(f64::NAN), "NaN");
    assert_eq!(format_number(f64::INFINITY), "Infinity");
    assert_eq!(format_number(9007199254740991.0), "9007199254740991");
}

#[test]
fn excessive_nesting_fails_instead_of_overflowing() {
    let handle = std::thread::Builder::new()
        .stack_size(256 * 1024 * 1024)
        .spawn(|| {
            let mut expr = ident("x");
            for _ in 0..1_500 {
                expr = unary(UnaryOp::Bang, expr);
            }
            let options = PrintOptions::default();
            let mut printer = Printer::new(&options);
            printer.print_expression(&expr);
            printer.finish()
        })
        .expect("spawn printer thread");
    let result = handle.join().expect("printer thread");
    assert!(matches!(result, Err(PrintError::RecursionLimit(_))));
}
