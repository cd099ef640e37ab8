use super::*;
use crate::context::MemoryModuleLoader;
use crate::scope::ModuleScope;
use tsguard_emitter::{PrintOptions, print_module};
use tsguard_parser::parse_module;

const MARKER: &str = "./tsguard";
const PRELUDE: &str = "import { is, assert as check } from './tsguard';\ninterface User { name: string }\n";
const USER_CHECK: &str = "typeof x === 'object' && x !== null && typeof x['name'] === 'string'";

struct Rewrite {
    code: String,
    rewritten: usize,
    replaced: usize,
}

fn rewrite(body: &str) -> Rewrite {
    let source = format!("{PRELUDE}{body}");
    let mut module = parse_module("/src/main.ts", &source).expect("source parses");
    let tracked = TrackedFunctions::collect(&module, MARKER);
    let loader = MemoryModuleLoader::new(MARKER);
    let ctx = Context::new("/src/main.ts", ModuleScope::build(&module, MARKER), &loader);

    let mut visitor = UsageVisitor::new(&ctx, &tracked, "__tsguard");
    visitor.visit_module(&mut module);
    let (rewritten, replaced) = (visitor.rewritten_calls(), visitor.replaced_calls());
    let code = print_module(&module, &PrintOptions::default()).expect("module prints");
    Rewrite {
        code,
        rewritten,
        replaced,
    }
}

// =============================================================================
// Reachability
// =============================================================================

#[test]
fn calls_are_found_in_every_evaluated_position() {
    let cases = [
        ("is<User>(x);", 1),
        ("const ok = is<User>(x);", 1),
        ("export const ok = is<User>(x);", 1),
        ("if (is<User>(x)) {} else if (is<User>(x)) {}", 2),
        ("while (is<User>(x)) {}", 1),
        ("do {} while (is<User>(x));", 1),
        ("for (let i = is<User>(x); is<User>(x); is<User>(x)) { is<User>(x); }", 4),
        ("for (const item of is<User>(x) ? a : b) { is<User>(x); }", 2),
        ("function f() { return is<User>(x); }", 1),
        ("export default function () { return is<User>(x); }", 1),
        ("const f = () => is<User>(x);", 1),
        ("const f = function () { throw is<User>(x); };", 1),
        (
            "class C extends Base { ok = is<User>(x); constructor() { super(); is<User>(x); } method() { return is<User>(x); } static { is<User>(x); } }",
            4,
        ),
        ("switch (is<User>(x)) { case is<User>(x): is<User>(x); }", 3),
        ("try { is<User>(x); } catch (e) { is<User>(x); } finally { is<User>(x); }", 3),
        ("namespace N.M { is<User>(x); }", 1),
        ("export default is<User>(x);", 1),
        ("const o = { key: is<User>(x), method() { return is<User>(x); } };", 2),
        ("[is<User>(x), , is<User>(x)];", 2),
        ("`${is<User>(x)}`; tag`${is<User>(x)}`;", 2),
        ("!is<User>(x) && y || is<User>(x);", 2),
        ("flag = is<User>(x);", 1),
        ("new Foo(is<User>(x));", 1),
        ("async function* g() { await is<User>(x); yield is<User>(x); }", 2),
        ("label: { is<User>(x); }", 1),
        ("(is<User>(x), is<User>(x));", 2),
        ("(is<User>(x) as boolean)!;", 1),
        ("run().then(is<User>(x));", 0),
    ];
    for (body, expected) in cases {
        let result = rewrite(body);
        assert_eq!(result.rewritten, expected, "rewritten in: {body}");
        assert_eq!(result.replaced, expected, "replaced in: {body}");
        if expected > 0 {
            assert!(result.code.contains(USER_CHECK), "check missing in: {}", result.code);
        }
    }
}

#[test]
fn positions_that_are_not_entered() {
    for body in [
        "log(is<User>(x));",
        "[...is<User>(x)];",
        "function f(flag = is<User>(x)) {}",
        "obj[is<User>(x)];",
        "const { a = is<User>(x) } = source;",
    ] {
        let result = rewrite(body);
        assert_eq!(result.rewritten, 0, "{body}");
        assert!(!result.code.contains("__tsguard"), "{}", result.code);
    }
}

#[test]
fn callee_chains_are_entered() {
    let result = rewrite("is<User>(x).toString();");
    assert_eq!(result.replaced, 1);
    assert!(result.code.contains(&format!("({USER_CHECK}).toString()")));
}

// =============================================================================
// Rewriting
// =============================================================================

#[test]
fn aliased_import_uses_exported_name() {
    let result = rewrite("check(x);");
    assert_eq!((result.rewritten, result.replaced), (1, 0));
    assert!(result.code.contains("__tsguard.assert(x)"));
    assert!(!result.code.contains("check(x)"));
}

#[test]
fn call_without_type_argument_is_only_renamed() {
    let result = rewrite("const ok = is(x);");
    assert_eq!((result.rewritten, result.replaced), (1, 0));
    assert!(result.code.contains("const ok = __tsguard.is(x);"));
}

#[test]
fn unresolved_type_argument_keeps_the_call() {
    for body in ["is<Missing>(x);", "is<unknown>(x);", "is<() => void>(x);"] {
        let result = rewrite(body);
        assert_eq!((result.rewritten, result.replaced), (1, 0), "{body}");
        assert!(result.code.contains("__tsguard.is"), "{}", result.code);
        assert!(!result.code.contains("typeof"), "{}", result.code);
    }
}

#[test]
fn spread_argument_keeps_the_call() {
    let result = rewrite("is<string>(...args);");
    assert_eq!((result.rewritten, result.replaced), (1, 0));
    assert!(result.code.contains("__tsguard.is"));
}

#[test]
fn stable_references_are_checked_in_place() {
    let result = rewrite("is<string>(req.body.name);");
    assert!(result.code.contains("typeof req.body.name === 'string'"));

    let result = rewrite("is<string>((x));");
    assert!(result.code.contains("typeof x === 'string'"));

    let result = rewrite("is<string>(this);");
    assert!(result.code.contains("typeof this === 'string'"));
}

#[test]
fn other_arguments_are_evaluated_once() {
    let result = rewrite("const ok = is<string>(load());");
    assert!(
        result
            .code
            .contains("const ok = ((value) => typeof value === 'string')(load());"),
        "{}",
        result.code
    );

    for body in ["is<string>(a?.b);", "is<string>(a[0]);", "is<string>(await next());"] {
        let result = rewrite(&format!("async function f() {{ {body} }}"));
        assert_eq!(result.replaced, 1, "{body}");
        assert!(result.code.contains("((value) => typeof value === 'string')"), "{}", result.code);
    }
}

#[test]
fn missing_argument_checks_undefined() {
    let result = rewrite("is<string>();");
    assert!(result.code.contains("typeof undefined === 'string'"));
}

#[test]
fn extra_type_and_value_arguments_are_ignored() {
    let result = rewrite("is<string, number>(x, y);");
    assert_eq!(result.replaced, 1);
    assert!(result.code.contains("typeof x === 'string';"));
    assert!(!result.code.contains("'number'"));
}

#[test]
fn untracked_names_are_left_alone() {
    let result = rewrite("other<User>(x);\nobj.is<User>(x);");
    assert_eq!(result.rewritten, 0);
    assert!(!result.code.contains("__tsguard"));
}

// =============================================================================
// Nesting limit
// =============================================================================

#[test]
fn walk_stops_at_the_nesting_limit() {
    std::thread::Builder::new()
        .stack_size(256 * 1024 * 1024)
        .spawn(|| {
            let mut module = parse_module("/src/main.ts", PRELUDE).expect("source parses");
            let tracked = TrackedFunctions::collect(&module, MARKER);
            let loader = MemoryModuleLoader::new(MARKER);
            let ctx = Context::new("/src/main.ts", ModuleScope::build(&module, MARKER), &loader);

            let mut deep = ident("a");
            for _ in 0..6_000 {
                deep = crate::validator::member(deep, "b");
            }
            module
                .body
                .push(Stmt::new(Span::DUMMY, StmtKind::Expr(Box::new(deep))));

            let mut visitor = UsageVisitor::new(&ctx, &tracked, "__tsguard");
            visitor.visit_module(&mut module);
            assert!(visitor.depth_exceeded());
        })
        .expect("spawn visitor thread")
        .join()
        .expect("visitor thread");
}

#[test]
fn ordinary_modules_stay_under_the_nesting_limit() {
    let source = format!("{PRELUDE}const s = {};\nis<User>(x);\n", vec!["x"; 500].join(" + "));
    let mut module = parse_module("/src/main.ts", &source).expect("source parses");
    let tracked = TrackedFunctions::collect(&module, MARKER);
    let loader = MemoryModuleLoader::new(MARKER);
    let ctx = Context::new("/src/main.ts", ModuleScope::build(&module, MARKER), &loader);
    let mut visitor = UsageVisitor::new(&ctx, &tracked, "__tsguard");
    visitor.visit_module(&mut module);
    assert!(!visitor.depth_exceeded());
    assert_eq!(visitor.replaced_calls(), 1);
}
