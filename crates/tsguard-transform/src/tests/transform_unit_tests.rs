use super::*;
use crate::context::MemoryModuleLoader;
use std::path::PathBuf;

fn run(source: &str) -> TransformOutput {
    run_with(source, &TransformOptions::default())
}

fn run_with(source: &str, options: &TransformOptions) -> TransformOutput {
    let loader = MemoryModuleLoader::new(options.marker_module.as_str());
    transform_file(Path::new("/src/main.ts"), source, &loader, options)
}

#[test]
fn files_without_tracked_imports_are_returned_verbatim() {
    let source = "// formatting   is   kept\nconst  a=1;\n";
    let output = run(source);
    assert_eq!(output, TransformOutput::unchanged(source));

    let other = "import { is } from './other';\nis<string>(x);\n";
    assert_eq!(run(other).code, other);
}

#[test]
fn unparseable_files_are_returned_verbatim() {
    let source = "import { is } from './tsguard';\nconst = ;\n";
    let output = run(source);
    assert_eq!(output.code, source);
    assert!(!output.changed);

    let loader = MemoryModuleLoader::new("./tsguard");
    let err = try_transform_file(
        Path::new("/src/main.ts"),
        source,
        &loader,
        &TransformOptions::default(),
    )
    .expect_err("parse error reported");
    assert!(matches!(err, TransformError::Parse(_)));
}

#[test]
fn marker_import_without_calls_is_untouched() {
    let source = "import { is } from './tsguard';\n\nconst  unused = is;\n";
    let output = run(source);
    assert_eq!(output.code, source);
    assert_eq!(output.rewritten_calls, 0);
}

#[test]
fn rewrites_calls_and_adds_the_runtime_import() {
    let source = r#"import { is } from './tsguard';

interface User {
    name: string;
    age: number;
}

export function check(input: unknown) {
    return is<User>(input);
}
"#;
    let expected = r#"import { is } from './tsguard';
import * as __tsguard from './tsguard';

interface User {
    name: string;
    age: number;
}

export function check(input: unknown) {
    return typeof input === 'object' && input !== null && typeof input['name'] === 'string' && typeof input['age'] === 'number';
}
"#;
    let output = run(source);
    assert_eq!(output.code, expected);
    assert!(output.changed);
    assert_eq!(output.rewritten_calls, 1);
}

#[test]
fn renamed_only_calls_still_need_the_runtime_import() {
    let source = "import { assert } from './tsguard';\nassert(value);\n";
    let output = run(source);
    assert_eq!(
        output.code,
        "import { assert } from './tsguard';\nimport * as __tsguard from './tsguard';\n__tsguard.assert(value);\n"
    );
    assert_eq!(output.rewritten_calls, 1);
}

#[test]
fn runtime_import_follows_the_last_marker_import() {
    let source = "import { is } from './tsguard';\nimport { x } from './x';\nimport { MinLength } from './tsguard';\nis<string>(x);\n";
    let output = run(source);
    let lines: Vec<&str> = output.code.lines().collect();
    assert_eq!(lines[3], "import * as __tsguard from './tsguard';");
    assert_eq!(lines[4], "typeof x === 'string';");
}

#[test]
fn existing_runtime_import_is_not_duplicated() {
    let source = "import { is } from './tsguard';\nimport * as __tsguard from './tsguard';\nis<string>(x);\n";
    let output = run(source);
    assert_eq!(output.code.matches("import * as __tsguard").count(), 1);
    assert!(output.code.contains("typeof x === 'string';"));
}

#[test]
fn transforming_twice_is_stable() {
    let source = "import { is } from './tsguard';\nconst ok = is<number[]>(input);\n";
    let first = run(source);
    assert!(first.changed);
    let second = run(&first.code);
    assert_eq!(second.code, first.code);
    assert_eq!(second.rewritten_calls, 0);
}

#[test]
fn custom_marker_and_namespace() {
    let options = TransformOptions {
        marker_module: "@acme/guard".to_string(),
        runtime_namespace: "rt".to_string(),
        ..TransformOptions::default()
    };
    let source = "import { is } from '@acme/guard';\nis<boolean>(flag);\n";
    let output = run_with(source, &options);
    assert_eq!(
        output.code,
        "import { is } from '@acme/guard';\nimport * as rt from '@acme/guard';\ntypeof flag === 'boolean';\n"
    );

    let ignored = run_with("import { is } from './tsguard';\nis<boolean>(flag);\n", &options);
    assert!(!ignored.changed);
}

#[test]
fn print_options_apply_to_the_output() {
    let mut options = TransformOptions::default();
    options.print.indent_width = 2;
    options.print.remove_comments = true;
    let source = "import { is } from './tsguard';\n// gone\nfunction f(v: unknown) {\n  return is<string>(v);\n}\n";
    let output = run_with(source, &options);
    assert_eq!(
        output.code,
        "import { is } from './tsguard';\nimport * as __tsguard from './tsguard';\nfunction f(v: unknown) {\n  return typeof v === 'string';\n}\n"
    );
}

#[test]
fn transform_follows_imports_on_disk() {
    let dir = tempfile::tempdir().expect("temp dir");
    std::fs::write(dir.path().join("types.ts"), "export type Id = string | number;").expect("write");
    let main: PathBuf = dir.path().join("main.ts");
    let source = "import { is } from './tsguard';\nimport { Id } from './types';\nis<Id>(id);\n";
    let code = transform(&main, source);
    assert!(code.contains("typeof id === 'string' || typeof id === 'number';"), "{code}");
}

/// Run `f` on a thread with the CLI worker's stack size.
fn on_worker_stack<T: Send + 'static>(f: impl FnOnce() -> T + Send + 'static) -> T {
    std::thread::Builder::new()
        .stack_size(16 * 1024 * 1024)
        .spawn(f)
        .expect("spawn worker thread")
        .join()
        .expect("worker thread")
}

#[test]
fn over_deep_files_are_returned_verbatim() {
    on_worker_stack(|| {
        let source = format!("const s = {};\n", vec!["x"; 300_000].join(" + "));
        let output = run(&source);
        assert_eq!(output.code, source);
        assert!(!output.changed);

        let tracked = format!("import {{ is }} from './tsguard';\n{source}is<string>(input);\n");
        let loader = MemoryModuleLoader::new("./tsguard");
        let err = try_transform_file(
            Path::new("/src/main.ts"),
            &tracked,
            &loader,
            &TransformOptions::default(),
        )
        .expect_err("nesting limit reported");
        assert!(matches!(err, TransformError::Parse(_)));
        assert_eq!(run(&tracked).code, tracked);
    });
}

#[test]
fn long_chains_next_to_tracked_calls_are_rewritten() {
    on_worker_stack(|| {
        let chain = vec!["x"; 1_100].join(" + ");
        let source =
            format!("import {{ is }} from './tsguard';\nconst s = {chain};\nis<string>(input);\n");
        let loader = MemoryModuleLoader::new("./tsguard");
        let output = try_transform_file(
            Path::new("/src/main.ts"),
            &source,
            &loader,
            &TransformOptions::default(),
        )
        .expect("chain within limits");
        assert_eq!(output.rewritten_calls, 1);
        assert_eq!(
            output.code,
            format!(
                "import {{ is }} from './tsguard';\nimport * as __tsguard from './tsguard';\nconst s = {chain};\ntypeof input === 'string';\n"
            )
        );
    });
}
