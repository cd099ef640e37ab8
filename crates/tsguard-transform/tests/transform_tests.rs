//! End-to-end transforms of single files through the public API.

use std::path::Path;
use tsguard_transform::{MemoryModuleLoader, TransformOptions, transform_file};

fn transform(source: &str) -> String {
    let options = TransformOptions::default();
    let loader = MemoryModuleLoader::new(options.marker_module.as_str());
    transform_file(Path::new("/app/src/handler.ts"), source, &loader, &options).code
}

#[test]
fn request_body_validation() {
    let source = r#"import { is, MinLength, MaxLength, Minimum, Maximum } from './tsguard';

type Name = string & MinLength<1> & MaxLength<50>;

interface Signup {
    name: Name;
    age: number & Minimum<13> & Maximum<130>;
    role: 'admin' | 'member';
    tags?: string[];
}

export function handle(req: { body: unknown }) {
    if (!is<Signup>(req.body)) {
        throw new Error('bad request');
    }
}
"#;
    let code = transform(source);
    let expected_check = [
        "typeof req.body === 'object' && req.body !== null",
        "typeof req.body['name'] === 'string'",
        "__tsguard.constraints.string.minLength(req.body['name'], 1)",
        "__tsguard.constraints.string.maxLength(req.body['name'], 50)",
        "__tsguard.constraints.number.min(req.body['age'], 13)",
        "__tsguard.constraints.number.max(req.body['age'], 130)",
        "(req.body['role'] === 'admin' || req.body['role'] === 'member')",
        "Array.isArray(req.body['tags']) && req.body['tags'].every((element) => typeof element === 'string')",
    ];
    for fragment in expected_check {
        assert!(code.contains(fragment), "missing `{fragment}` in:\n{code}");
    }
    assert!(code.contains("if (!(typeof req.body === 'object'"), "{code}");
    assert!(code.contains("import * as __tsguard from './tsguard';"));
    assert!(!code.contains("is<Signup>"));
}

#[test]
fn generic_wrappers_and_tuples() {
    let source = r#"import { is } from './tsguard';

interface Page<T> {
    items: T[];
    cursor: [string, number];
}

const ok = is<Page<{ id: number }>>(response);
"#;
    let code = transform(source);
    assert!(
        code.contains(
            "const ok = typeof response === 'object' && response !== null \
             && Array.isArray(response['items']) && response['items'].every((element) => \
             typeof element === 'object' && element !== null && typeof element['id'] === 'number') \
             && Array.isArray(response['cursor']) && response['cursor'].length === 2 \
             && typeof response['cursor'][0] === 'string' && typeof response['cursor'][1] === 'number';"
        ),
        "{code}"
    );
}

#[test]
fn comments_and_layout_survive() {
    let source = r#"// Handlers for the public API.
import { is } from './tsguard';

/** Accepts anything string-like. */
export const accept = (input: unknown) => is<string>(input); // inline
"#;
    let expected = r#"// Handlers for the public API.
import { is } from './tsguard';
import * as __tsguard from './tsguard';

/** Accepts anything string-like. */
export const accept = (input: unknown) => typeof input === 'string'; // inline
"#;
    assert_eq!(transform(source), expected);
}

#[test]
fn output_is_a_fixed_point() {
    let source = r#"import { is, assert } from './tsguard';

type Point = { x: number; y: number };

export function read(value: unknown) {
    assert(value);
    return is<Point[]>(value) ? value : [];
}
"#;
    let once = transform(source);
    assert_ne!(once, source);
    assert_eq!(transform(&once), once);
}

#[test]
fn files_that_do_not_use_the_marker_are_untouched() {
    for source in [
        "",
        "export const x   =   1;\n",
        "import { is } from 'some-package';\nis<string>(x);\n",
        "import type { is } from './tsguard';\n",
        "import { is } from './tsguard';\n\n\nconst f = is;\n",
        "this is not typescript",
    ] {
        assert_eq!(transform(source), source);
    }
}
