use super::ParserState;
use crate::ast::*;
use tsguard_scanner::SyntaxKind;

fn parser(source: &str) -> ParserState {
    ParserState::new("test.ts", source.to_string())
}

#[test]
fn try_parse_rewinds_on_failure() {
    let mut p = parser("a < b;");
    p.next_token();
    let result = p.try_parse(|p| p.parse_type_arguments());
    assert!(result.is_none());
    assert!(p.is_token(SyntaxKind::LessThanToken));
    assert_eq!(p.token_pos(), 2);
}

#[test]
fn look_ahead_always_rewinds() {
    let mut p = parser("foo bar");
    assert!(p.look_ahead(|p| {
        p.next_token();
        p.is_token(SyntaxKind::Identifier) && p.token_value() == "bar"
    }));
    assert_eq!(p.token_value(), "foo");
}

#[test]
fn with_context_restores_flags() {
    let mut p = parser("x");
    let inner = p.with_context(super::state::CONTEXT_FLAG_DISALLOW_IN, true, |p| {
        p.in_context(super::state::CONTEXT_FLAG_DISALLOW_IN)
    });
    assert!(inner);
    assert!(!p.in_context(super::state::CONTEXT_FLAG_DISALLOW_IN));
}

#[test]
fn nested_type_arguments_close_one_greater_than_at_a_time() {
    let mut p = parser("Map<string, Array<Set<number>>>");
    let ty = p.parse_type().expect("type parses");
    let TsType::Ref(map) = ty else {
        panic!("expected type reference, got {ty:?}");
    };
    let args = map.type_args.expect("type args");
    assert_eq!(args.len(), 2);
    assert!(p.is_token(SyntaxKind::EndOfFileToken));
}

#[test]
fn shift_operators_are_rescanned_in_expressions() {
    let mut p = parser("a >> b >>> c >= d");
    let expr = p.parse_expression().expect("expression parses");
    let Expr::Bin(outer) = expr else {
        panic!("expected binary expression");
    };
    assert_eq!(outer.op, BinaryOp::GtEq);
    let Expr::Bin(shift) = *outer.left else {
        panic!("expected shift on the left");
    };
    assert_eq!(shift.op, BinaryOp::ZeroFillRShift);
}

#[test]
fn call_with_type_arguments_requires_argument_list() {
    let mut p = parser("f<T>(x)");
    let expr = p.parse_expression().expect("call parses");
    let Expr::Call(call) = expr else {
        panic!("expected call");
    };
    assert_eq!(call.type_args.map(|a| a.len()), Some(1));

    let mut p = parser("a < b > c");
    let expr = p.parse_expression().expect("comparison parses");
    assert!(matches!(expr, Expr::Bin(BinExpr { op: BinaryOp::Gt, .. })));
}

#[test]
fn infer_constraint_is_kept_inside_extends_clause() {
    let mut p = parser("T extends [infer H extends string, ...infer R] ? H : never");
    let TsType::Conditional(cond) = p.parse_type().expect("type parses") else {
        panic!("expected conditional type");
    };
    let TsType::Tuple(tuple) = *cond.extends_type else {
        panic!("expected tuple");
    };
    let TsType::Infer(infer) = &*tuple.elems[0].ty else {
        panic!("expected infer");
    };
    assert!(infer.type_param.constraint.is_some());
}

#[test]
fn recursion_limit_is_reported_not_overflowed() {
    // Debug builds need more than the default test-thread stack to reach the limit.
    let handle = std::thread::Builder::new()
        .stack_size(256 * 1024 * 1024)
        .spawn(|| {
            let source = format!("x = {}1{};", "(".repeat(2000), ")".repeat(2000));
            parser(&source).parse_source_file().expect_err("too deep")
        })
        .expect("spawn parser thread");
    let err = handle.join().expect("parser thread");
    assert!(matches!(err.kind, crate::ParseErrorKind::RecursionLimit(_)));
}
