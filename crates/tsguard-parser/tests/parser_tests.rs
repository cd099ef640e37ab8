//! Parser tests over whole modules.

use tsguard_parser::ast::*;
use tsguard_parser::{ParseErrorKind, parse_module};

fn parse(source: &str) -> Module {
    parse_module("test.ts", source).unwrap_or_else(|err| panic!("{err}"))
}

fn single_stmt(source: &str) -> StmtKind {
    let mut module = parse(source);
    assert_eq!(module.body.len(), 1, "expected one statement in {source:?}");
    module.body.remove(0).kind
}

#[test]
fn parse_interface_with_every_member_shape() {
    let StmtKind::Interface(decl) = single_stmt(
        "interface Box<T extends object = {}> extends Base<T>, Other {\n\
         readonly id: string;\n\
         label?: string,\n\
         [key: string]: unknown\n\
         method<U>(x: U): T;\n\
         (call: number): void;\n\
         new (x: string): Box<T>;\n\
         get size(): number;\n\
         set size(v: number);\n\
         }",
    ) else {
        panic!("expected interface");
    };
    assert_eq!(decl.id.sym, "Box");
    assert_eq!(decl.extends.len(), 2);
    let type_params = decl.type_params.expect("type params");
    assert!(type_params[0].constraint.is_some());
    assert!(type_params[0].default.is_some());
    assert_eq!(decl.body.len(), 8);
    assert!(matches!(&decl.body[0], TsTypeElement::Property(p) if p.readonly && !p.optional));
    assert!(matches!(&decl.body[1], TsTypeElement::Property(p) if p.optional));
    assert!(matches!(&decl.body[2], TsTypeElement::Index(_)));
    assert!(matches!(&decl.body[3], TsTypeElement::Method(_)));
    assert!(matches!(&decl.body[4], TsTypeElement::Call(_)));
    assert!(matches!(&decl.body[5], TsTypeElement::Construct(_)));
    assert!(matches!(&decl.body[6], TsTypeElement::Getter(_)));
    assert!(matches!(&decl.body[7], TsTypeElement::Setter(_)));
}

#[test]
fn parse_type_alias_forms() {
    let module = parse(
        "type A = string | number | null;\n\
         type B = { a: 1 } & { b: 'x' };\n\
         type C = readonly string[];\n\
         type D = [first: string, second?: number, ...rest: boolean[]];\n\
         type E = [string, number?, ...boolean[]];\n\
         type F = { readonly [K in keyof T as `get${K & string}`]-?: T[K] };\n\
         type G = T extends (infer U)[] ? U : never;\n\
         type H = (a: string, b?: number) => void;\n\
         type I = new (...args: any[]) => object;\n\
         type J = typeof import('./mod').value;\n\
         type K = -1 | 10n | true;\n\
         type L = Array<Record<string, Map<string, number>>>;",
    );
    assert_eq!(module.body.len(), 12);
    let types: Vec<&TsType> = module
        .body
        .iter()
        .map(|stmt| match &stmt.kind {
            StmtKind::TypeAlias(alias) => &*alias.type_ann,
            other => panic!("expected type alias, got {other:?}"),
        })
        .collect();
    assert!(matches!(types[0], TsType::Union(u) if u.types.len() == 3));
    assert!(matches!(types[1], TsType::Intersection(_)));
    assert!(matches!(types[2], TsType::Operator(op) if op.op == TsTypeOperatorOp::ReadOnly));
    let TsType::Tuple(tuple) = types[3] else {
        panic!("expected tuple");
    };
    let labels: Vec<_> = tuple.elems.iter().map(|e| e.label.clone().expect("label")).collect();
    assert!(!labels[0].optional && labels[1].optional && labels[2].rest);
    let TsType::Tuple(unlabeled) = types[4] else {
        panic!("expected tuple");
    };
    assert!(matches!(&*unlabeled.elems[1].ty, TsType::Optional(_)));
    assert!(matches!(&*unlabeled.elems[2].ty, TsType::Rest(_)));
    let TsType::Mapped(mapped) = types[5] else {
        panic!("expected mapped type");
    };
    assert_eq!(mapped.readonly, Some(TruePlusMinus::True));
    assert_eq!(mapped.optional, Some(TruePlusMinus::Minus));
    assert!(mapped.name_type.is_some());
    assert!(matches!(types[6], TsType::Conditional(_)));
    assert!(matches!(types[7], TsType::Fn(f) if !f.is_constructor && f.params.len() == 2));
    assert!(matches!(types[8], TsType::Fn(f) if f.is_constructor));
    assert!(matches!(types[9], TsType::Query(_)));
    let TsType::Union(lits) = types[10] else {
        panic!("expected literal union");
    };
    assert!(matches!(
        &lits.types[0],
        TsType::Lit(TsLitType { lit: TsLit::Number(n), .. }) if n.value == -1.0
    ));
    assert!(matches!(types[11], TsType::Ref(_)));
}

#[test]
fn parse_import_forms() {
    let module = parse(
        "import 'side-effect';\n\
         import def from './a';\n\
         import * as ns from './b';\n\
         import def2, { x, y as z, type T } from './c';\n\
         import type { U } from './d';\n\
         import data from './data.json' with { type: 'json' };\n\
         import fs = require('fs');\n\
         import Alias = Some.Namespace;",
    );
    assert_eq!(module.body.len(), 8);
    let StmtKind::Import(named) = &module.body[3].kind else {
        panic!("expected import");
    };
    assert_eq!(named.src.value, "./c");
    let locals: Vec<&str> = named.specifiers.iter().map(|s| s.local().sym.as_str()).collect();
    assert_eq!(locals, ["def2", "x", "z", "T"]);
    assert!(matches!(
        &named.specifiers[3],
        ImportSpecifier::Named { is_type_only: true, .. }
    ));
    let StmtKind::Import(type_only) = &module.body[4].kind else {
        panic!("expected import");
    };
    assert!(type_only.type_only);
    let StmtKind::Import(with_attrs) = &module.body[5].kind else {
        panic!("expected import");
    };
    assert!(with_attrs.with.is_some());
    assert!(matches!(
        &module.body[6].kind,
        StmtKind::ImportEquals(ImportEqualsDecl { module_ref: ModuleReference::Require(_), .. })
    ));
    assert!(matches!(
        &module.body[7].kind,
        StmtKind::ImportEquals(ImportEqualsDecl { module_ref: ModuleReference::Entity(_), .. })
    ));
}

#[test]
fn parse_export_forms() {
    let module = parse(
        "export * from './a';\n\
         export * as ns from './b';\n\
         export { a, b as c } from './c';\n\
         export type { T } from './d';\n\
         export { local };\n\
         export interface I { x: number }\n\
         export type U = string;\n\
         export const v = 1, w = 2;\n\
         export default function () {}\n\
         export = foo;",
    );
    assert_eq!(module.body.len(), 10);
    assert!(matches!(&module.body[0].kind, StmtKind::ExportAll(e) if e.alias.is_none()));
    assert!(matches!(&module.body[1].kind, StmtKind::ExportAll(e) if e.alias.is_some()));
    let StmtKind::ExportNamed(named) = &module.body[2].kind else {
        panic!("expected named export");
    };
    assert_eq!(named.specifiers[1].exported_name(), "c");
    assert!(matches!(&module.body[3].kind, StmtKind::ExportNamed(e) if e.type_only));
    assert!(matches!(&module.body[4].kind, StmtKind::ExportNamed(e) if e.src.is_none()));
    let StmtKind::ExportDecl(decl) = &module.body[5].kind else {
        panic!("expected export declaration");
    };
    assert!(matches!(decl.kind, StmtKind::Interface(_)));
    assert!(matches!(&module.body[8].kind, StmtKind::ExportDefaultDecl(DefaultDecl::Fn(_))));
    assert!(matches!(&module.body[9].kind, StmtKind::ExportAssign(_)));
}

#[test]
fn parse_generic_call_with_arrow_argument() {
    let StmtKind::Var(decl) = single_stmt(
        "const out = items.filter((x): x is string => typeof x === 'string').map(x => x.length);",
    ) else {
        panic!("expected declaration");
    };
    let Some(Expr::Call(map)) = decl.decls[0].init.as_deref() else {
        panic!("expected call");
    };
    let Expr::Member(member) = &*map.callee else {
        panic!("expected member callee");
    };
    let Expr::Call(filter) = &*member.obj else {
        panic!("expected inner call");
    };
    let Expr::Arrow(arrow) = &*filter.args[0].expr else {
        panic!("expected arrow argument");
    };
    assert!(matches!(arrow.return_type.as_deref(), Some(TsType::Predicate(_))));
}

#[test]
fn parse_validator_call_sites() {
    let module = parse(
        "const ok = validate<User>(input);\n\
         if (is<Array<number>>(value)) { use(value); }\n\
         export const check = createValidator<{ a: string }>();",
    );
    assert_eq!(module.body.len(), 3);
    let StmtKind::Var(decl) = &module.body[0].kind else {
        panic!("expected variable declaration");
    };
    let init = decl.decls[0].init.as_deref().expect("initializer");
    let Expr::Call(call) = init else {
        panic!("expected call, got {init:?}");
    };
    assert!(matches!(&*call.callee, Expr::Ident(id) if id.sym == "validate"));
    assert_eq!(call.type_args.as_ref().map(Vec::len), Some(1));
    assert_eq!(call.args.len(), 1);
}

#[test]
fn parse_class_members() {
    let StmtKind::Class(decl) = single_stmt(
        "class Store<T> extends Base<T> implements A, B {\n\
         private readonly items: T[] = [];\n\
         static count = 0;\n\
         #secret?: string;\n\
         declare value!: number;\n\
         [key: string]: unknown;\n\
         constructor(public name: string, private opts?: Options) { super(); }\n\
         get size(): number { return this.items.length; }\n\
         async *stream(): AsyncGenerator<T> { yield* this.items; }\n\
         abstract run(): void;\n\
         static { Store.count = 1; }\n\
         }",
    ) else {
        panic!("expected class");
    };
    let class = decl.class;
    assert_eq!(decl.ident.sym, "Store");
    assert!(class.super_class.is_some());
    assert_eq!(class.super_type_args.as_ref().map(Vec::len), Some(1));
    assert_eq!(class.implements.len(), 2);
    assert_eq!(class.body.len(), 10);
    assert!(matches!(&class.body[0], ClassMember::Property(p) if p.modifiers.readonly));
    assert!(matches!(&class.body[1], ClassMember::Property(p) if p.modifiers.is_static));
    assert!(matches!(&class.body[2], ClassMember::Property(p) if p.optional));
    assert!(matches!(&class.body[3], ClassMember::Property(p) if p.definite && p.modifiers.declare));
    assert!(matches!(&class.body[4], ClassMember::IndexSignature(_)));
    let ClassMember::Constructor(ctor) = &class.body[5] else {
        panic!("expected constructor");
    };
    assert_eq!(ctor.params[0].modifiers.accessibility, Some(Accessibility::Public));
    assert!(matches!(&class.body[6], ClassMember::Method(m) if m.kind == MethodKind::Getter));
    assert!(matches!(&class.body[7], ClassMember::Method(m) if m.function.is_async && m.function.is_generator));
    assert!(matches!(&class.body[8], ClassMember::Method(m) if m.function.body.is_none()));
    assert!(matches!(&class.body[9], ClassMember::StaticBlock(_)));
}

#[test]
fn parse_statements_and_destructuring() {
    let module = parse(
        "for (const [k, v] of Object.entries(o)) {}\n\
         for (let i = 0, n = xs.length; i < n; i++) continue;\n\
         for (const key in obj) if (key in other) break;\n\
         label: while (true) { break label; }\n\
         do { x--; } while (x > 0)\n\
         switch (kind) { case 'a': case 'b': f(); break; default: g(); }\n\
         try { risky(); } catch ({ message }) { log(message); } finally { done(); }\n\
         const { a, b: { c = 1 }, ...rest } = value;\n\
         let [first, , third = 3, ...others] = list;\n\
         throw new Error(`bad ${thing}`);",
    );
    assert_eq!(module.body.len(), 10);
    assert!(matches!(module.body[0].kind, StmtKind::ForOf { .. }));
    assert!(matches!(module.body[1].kind, StmtKind::For { .. }));
    assert!(matches!(module.body[2].kind, StmtKind::ForIn { .. }));
    assert!(matches!(module.body[3].kind, StmtKind::Labeled { .. }));
    assert!(matches!(module.body[5].kind, StmtKind::Switch { .. }));
    assert!(matches!(module.body[6].kind, StmtKind::Try { .. }));
    let StmtKind::Var(decl) = &module.body[7].kind else {
        panic!("expected declaration");
    };
    let Pat::Object(pattern) = &decl.decls[0].name else {
        panic!("expected object pattern");
    };
    assert_eq!(pattern.props.len(), 3);
    assert!(matches!(pattern.props[2], ObjectPatProp::Rest(_)));
}

#[test]
fn parse_namespaces_and_enums() {
    let module = parse(
        "declare module 'pkg' { export interface X {} }\n\
         namespace A.B.C { export const z = 1; }\n\
         declare global { interface Window { app: App } }\n\
         const enum Color { Red, Green = 'g', Blue = 1 << 2 }",
    );
    assert_eq!(module.body.len(), 4);
    let StmtKind::Namespace(ns) = &module.body[1].kind else {
        panic!("expected namespace");
    };
    assert!(matches!(ns.body, Some(NamespaceBody::Nested(_))));
    let StmtKind::Enum(decl) = &module.body[3].kind else {
        panic!("expected enum");
    };
    assert!(decl.is_const);
    assert_eq!(decl.members.len(), 3);
}

#[test]
fn parse_expression_precedence_and_assertions() {
    let StmtKind::Expr(expr) = single_stmt("x = (a ?? b) || c ? d as T : e satisfies U;") else {
        panic!("expected expression statement");
    };
    let Expr::Assign(assign) = *expr else {
        panic!("expected assignment");
    };
    let Expr::Cond(cond) = *assign.right else {
        panic!("expected conditional");
    };
    assert!(matches!(*cond.cons, Expr::TsAs(_)));
    assert!(matches!(*cond.alt, Expr::TsSatisfies(_)));

    let StmtKind::Var(decl) = single_stmt("const x = [1, 2] as const;") else {
        panic!("expected declaration");
    };
    assert!(matches!(decl.decls[0].init.as_deref(), Some(Expr::TsConstAssertion(_))));
}

#[test]
fn parse_arrow_functions() {
    let module = parse(
        "const a = x => x;\n\
         const b = async (x: number): Promise<number> => { return x; };\n\
         const c = <T,>(value: T): value is T => true;\n\
         const d = ({ a, b }: Pair, [c]: [number]) => a + b + c;\n\
         const e = async x => await x;",
    );
    for stmt in &module.body {
        let StmtKind::Var(decl) = &stmt.kind else {
            panic!("expected declaration");
        };
        assert!(
            matches!(decl.decls[0].init.as_deref(), Some(Expr::Arrow(_))),
            "expected arrow in {decl:?}"
        );
    }
}

#[test]
fn parse_object_literal_members() {
    let StmtKind::Var(decl) = single_stmt(
        "const o = { a, b: 1, 'c': 2, [d]: 3, ...rest, get e() { return 1; }, set e(v) {}, async f() {}, *g() {}, h<T>(x: T) { return x; } };",
    ) else {
        panic!("expected declaration");
    };
    let Some(Expr::Object(obj)) = decl.decls[0].init.as_deref() else {
        panic!("expected object literal");
    };
    assert_eq!(obj.props.len(), 10);
    assert!(matches!(obj.props[0], Prop::Shorthand(_)));
    assert!(matches!(obj.props[4], Prop::Spread(_)));
    assert!(matches!(obj.props[5], Prop::Method { kind: MethodKind::Getter, .. }));
}

#[test]
fn comments_are_collected_in_source_order() {
    let module = parse("// leading\nconst a = 1; /* trailing */\n/** doc */\nexport {};");
    assert_eq!(module.comments.len(), 3);
    assert!(module.comments.windows(2).all(|w| w[0].span.start < w[1].span.start));
}

#[test]
fn errors_carry_file_line_and_column() {
    let err = parse_module("bad.ts", "const a = 1;\nconst = 2;").expect_err("invalid");
    assert_eq!(err.location.line, 2);
    assert_eq!(err.location.column, 7);
    assert!(err.to_string().starts_with("bad.ts:2:7: expected identifier"));
}

#[test]
fn unterminated_literals_are_reported() {
    let err = parse_module("t.ts", "const s = 'abc").expect_err("unterminated");
    assert_eq!(err.kind, ParseErrorKind::Unterminated("string literal"));
    let err = parse_module("t.ts", "const s = `abc${x}").expect_err("unterminated");
    assert!(matches!(err.kind, ParseErrorKind::Unterminated(_) | ParseErrorKind::Expected { .. }));
}

#[test]
fn angle_bracket_assertions_are_rejected() {
    let err = parse_module("t.ts", "const n = <number>value;").expect_err("rejected");
    assert!(matches!(err.kind, ParseErrorKind::Invalid(_)));
}

#[test]
fn asi_and_regex_after_line_break() {
    let module = parse("let a = b\n/re/g.test(a)\nlet c = 1");
    // `b / re / g.test(a)` is one expression without a semicolon
    assert_eq!(module.body.len(), 2);
    let module = parse("let a = b;\n/re/g.test(a)\nlet c = 1");
    assert_eq!(module.body.len(), 3);
}

// =============================================================================
// Nesting limits
// =============================================================================

fn assert_nesting_limit(source: &str) {
    let err = parse_module("deep.ts", source).expect_err("nesting limit");
    assert!(
        matches!(err.kind, ParseErrorKind::RecursionLimit(_)),
        "unexpected error: {err}"
    );
}

#[test]
fn long_chains_count_against_the_nesting_limit() {
    let terms = vec!["x"; 300_000].join(" + ");
    assert_nesting_limit(&format!("const s = {terms};"));
    assert_nesting_limit(&format!("a{};", ".b".repeat(5_000)));
    assert_nesting_limit(&format!("f{};", "()".repeat(5_000)));
    assert_nesting_limit(&format!("type T = string{};", "[]".repeat(5_000)));
    assert_nesting_limit(&format!("let v: A{};", ".B".repeat(5_000)));
}

#[test]
fn prefix_recursion_is_limited() {
    // Debug builds need more than the default test-thread stack to reach the limit.
    std::thread::Builder::new()
        .stack_size(256 * 1024 * 1024)
        .spawn(|| {
            assert_nesting_limit(&format!("const v = {}X;", "new ".repeat(5_000)));
            assert_nesting_limit(&format!("type T = {}string;", "keyof ".repeat(5_000)));
            assert_nesting_limit(&format!("namespace A{} {{}}", ".A".repeat(5_000)));
        })
        .expect("spawn parser thread")
        .join()
        .expect("parser thread");
}

#[test]
fn chains_below_the_limit_parse() {
    let terms = vec!["x"; 1_500].join(" + ");
    let StmtKind::Var(decl) = single_stmt(&format!("const s = {terms};")) else {
        panic!("expected a variable statement");
    };
    let mut depth = 0;
    let mut expr = decl.decls[0].init.as_deref().expect("initializer");
    while let Expr::Bin(bin) = expr {
        depth += 1;
        expr = &bin.left;
    }
    assert_eq!(depth, 1_499);
}
