//! Runs synthesized validators with node against conforming and violating values.
//!
//! The checks call constraint predicates on the runtime namespace, so the script defines
//! a small `__tsguard` with inclusive bounds. When node is not installed the tests
//! return early.

use std::process::Command;
use tsguard_emitter::{PrintOptions, print_expr};
use tsguard_parser::ast::{Expr, Ident};
use tsguard_parser::parse_module;
use tsguard_transform::{
    Context, MemoryModuleLoader, ModuleScope, TypeResolver, ValidatorSynthesizer,
};

const MARKER: &str = "./tsguard";
const MAIN: &str = "/src/models.ts";

const MODELS: &str = r#"
import { MinLength, MaxLength, Minimum, Maximum } from './tsguard';

interface Box<T> { value: T }

export interface User {
    name: string & MinLength<2> & MaxLength<8>;
    age: number & Minimum<0> & Maximum<120>;
    tags: string[] & MaxLength<2>;
    point: [number, string];
    role: 'admin' | 'guest';
    nested: Box<Box<{ n: number }>>;
    grid: number[][];
}

export type Id = string | number;
export type Big = 10n;
export type Nothing = null | undefined;
"#;

const RUNTIME: &str = r#"
const length = {
    minLength: (v, n) => v.length >= n,
    maxLength: (v, n) => v.length <= n,
};
const __tsguard = {
    constraints: {
        string: length,
        array: length,
        number: { min: (v, n) => v >= n, max: (v, n) => v <= n },
    },
};
const good = {
    name: 'ada',
    age: 36,
    tags: ['a'],
    point: [1, 'x'],
    role: 'admin',
    nested: { value: { value: { n: 1 } } },
    grid: [[1, 2], []],
};
const results = [];
"#;

/// `(value) => <check>` for the named type in `MODELS`.
fn validator(type_name: &str) -> String {
    let module = parse_module(MAIN, MODELS).expect("models parse");
    let loader = MemoryModuleLoader::new(MARKER);
    let ctx = Context::new(MAIN, ModuleScope::build(&module, MARKER), &loader);
    let schema = TypeResolver::new()
        .resolve_named(&ctx, type_name)
        .unwrap_or_else(|| panic!("{type_name} resolves"));
    let value = Expr::Ident(Ident::new("value"));
    let check = ValidatorSynthesizer::new("__tsguard").synthesize(&schema, &value);
    let check = print_expr(&check, &PrintOptions::default()).expect("check prints");
    format!("(value) => {check}")
}

/// Evaluate `script` with node and return its stdout, or `None` when node is missing.
fn run_node(script: &str) -> Option<String> {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("checks.cjs");
    std::fs::write(&path, script).expect("write script");
    let output = match Command::new("node").arg(&path).output() {
        Ok(output) => output,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
        Err(err) => panic!("failed to run node: {err}"),
    };
    assert!(
        output.status.success(),
        "node failed:\n{}\n{script}",
        String::from_utf8_lossy(&output.stderr)
    );
    Some(String::from_utf8(output.stdout).expect("utf-8 output"))
}

/// Check every `(label, js value, expected)` case against the validator for `type_name`.
fn assert_cases(type_name: &str, cases: &[(&str, &str, bool)]) {
    let mut script = format!("{RUNTIME}const check = {};\n", validator(type_name));
    for (label, value, _) in cases {
        script.push_str(&format!("results.push([{label:?}, check({value})]);\n"));
    }
    script.push_str("console.log(JSON.stringify(results));\n");

    let Some(stdout) = run_node(&script) else {
        return;
    };
    let results: Vec<(String, bool)> = serde_json::from_str(stdout.trim()).expect("results parse");
    assert_eq!(results.len(), cases.len());
    let mismatches: Vec<String> = cases
        .iter()
        .zip(&results)
        .filter(|((_, _, expected), (_, actual))| expected != actual)
        .map(|((label, value, expected), _)| format!("{label}: {value} should be {expected}"))
        .collect();
    assert!(mismatches.is_empty(), "{type_name}:\n{}", mismatches.join("\n"));
}

#[test]
fn object_validator_accepts_conforming_values() {
    assert_cases(
        "User",
        &[
            ("conforming", "good", true),
            ("name at min length", "{ ...good, name: 'ab' }", true),
            ("name at max length", "{ ...good, name: 'abcdefgh' }", true),
            ("age at minimum", "{ ...good, age: 0 }", true),
            ("age at maximum", "{ ...good, age: 120 }", true),
            ("no tags", "{ ...good, tags: [] }", true),
            ("tags at max length", "{ ...good, tags: ['a', 'b'] }", true),
            ("other role", "{ ...good, role: 'guest' }", true),
            ("extra property", "{ ...good, extra: 1 }", true),
        ],
    );
}

#[test]
fn object_validator_rejects_each_single_violation() {
    assert_cases(
        "User",
        &[
            ("null", "null", false),
            ("undefined", "undefined", false),
            ("array", "[]", false),
            ("name wrong primitive", "{ ...good, name: 42 }", false),
            ("name missing", "{ ...good, name: undefined }", false),
            ("name too short", "{ ...good, name: 'a' }", false),
            ("name too long", "{ ...good, name: 'abcdefghi' }", false),
            ("age below minimum", "{ ...good, age: -1 }", false),
            ("age above maximum", "{ ...good, age: 121 }", false),
            ("age as string", "{ ...good, age: '36' }", false),
            ("tags too long", "{ ...good, tags: ['a', 'b', 'c'] }", false),
            ("tag wrong primitive", "{ ...good, tags: [1] }", false),
            ("tuple too short", "{ ...good, point: [1] }", false),
            ("tuple too long", "{ ...good, point: [1, 'x', 2] }", false),
            ("tuple positions swapped", "{ ...good, point: ['x', 1] }", false),
            ("role wrong literal", "{ ...good, role: 'root' }", false),
            ("nested leaf wrong", "{ ...good, nested: { value: { value: { n: '1' } } } }", false),
            ("nested box null", "{ ...good, nested: { value: null } }", false),
            ("grid inner element wrong", "{ ...good, grid: [[1, 'x']] }", false),
            ("grid not nested", "{ ...good, grid: [1] }", false),
        ],
    );
}

#[test]
fn union_and_literal_validators() {
    assert_cases(
        "Id",
        &[
            ("string", "'a'", true),
            ("number", "1", true),
            ("boolean", "true", false),
            ("null", "null", false),
        ],
    );
    assert_cases(
        "Big",
        &[
            ("same bigint", "10n", true),
            ("number", "10", false),
            ("other bigint", "11n", false),
        ],
    );
    assert_cases(
        "Nothing",
        &[("null", "null", false), ("undefined", "undefined", false)],
    );
}
