//! Printer tests over parsed modules.
//!
//! Sources are written in the printer's own style, so a faithful print reproduces them
//! byte for byte.

use tsguard_common::Span;
use tsguard_emitter::{PrintOptions, print_module, print_module_with_source};
use tsguard_parser::ast::{Expr, Ident, ImportDecl, ImportSpecifier, Stmt, StmtKind, Str};
use tsguard_parser::parse_module;

fn reprint(source: &str) -> String {
    let module = parse_module("test.ts", source).expect("source parses");
    print_module_with_source(&module, source, &PrintOptions::default()).expect("module prints")
}

fn assert_round_trip(source: &str) {
    let printed = reprint(source);
    assert_eq!(printed, source, "printed output differs:\n{printed}");
}

#[test]
fn module_with_comments_and_blank_lines() {
    assert_round_trip(
        r#"// leading comment
import { a, b as c } from './mod';
import type { T } from './types';

/** Doc for User */
export interface User {
    id: number;
    name?: string; // trailing
    readonly tags: string[];
}

export type Id = string | number;

export function greet(user: User): string {
    if (!user.name) {
        return 'anonymous';
    } else if (user.id > 0) {
        return `user ${user.id}`;
    }
    return user.name;
}

const handler = async (x: number) => {
    await run(x);
};
"#,
    );
}

#[test]
fn type_syntax() {
    assert_round_trip(
        r#"type Keys = keyof typeof config;
type Pick2<T, K extends keyof T> = { [P in K]: T[P] };
type Fn = (a: string, b?: number) => void;
type Ctor = abstract new () => object;
type Tuple = [name: string, age?: number, ...rest: boolean[]];
type Lit = 'a' | 1 | -1 | true | `prefix-${string}`;
type Q = import('./mod').Thing<string>;
type Cond<T> = T extends string ? 'str' : T extends number ? 'num' : never;
type Arr = readonly (string | number)[];
type Obj = { a: string; b?: number };
type Elem<T> = T extends (infer U)[] ? U : never;
type Guard = (value: unknown) => value is string;
"#,
    );
}

#[test]
fn class_members() {
    assert_round_trip(
        r#"export abstract class Repo<T> extends Base<T> implements Store {
    private readonly items: T[] = [];
    static count = 0;
    declare name: string;
    constructor(private db: Db, public label?: string) {
        super();
    }
    get size(): number {
        return this.items.length;
    }
    abstract find(id: string): T | undefined;
    async *stream(): AsyncGenerator<T> {
        yield* this.items;
    }
    [key: string]: unknown;
}
"#,
    );
}

#[test]
fn control_flow_and_module_items() {
    assert_round_trip(
        r#"for (let i = 0; i < 10; i++) {
    if (i % 2)
        continue;
}
for (const [k, v] of Object.entries(map)) {
    console.log(k, v);
}
for (const key in obj) {}
switch (kind) {
    case 'a':
    case 'b':
        run();
        break;
    default: {
        stop();
    }
}
try {
    risky();
} catch (e) {
    handle(e);
} finally {
    done();
}
do {
    n--;
} while (n > 0);
label: while (true) {
    break label;
}
let x!: number;
const { a, b: renamed = 1, ...others } = source;
export * as utils from './utils';
export { x as y, type T };
export default class {}
"#,
    );
}

#[test]
fn multi_line_object_literal_keeps_its_shape() {
    assert_round_trip(
        r#"const config = {
    port: 8080,
    host: 'localhost',
    nested: { deep: true },
    method() {
        return 1;
    }
};
const short = { a: 1, b: [1, 2, 3] };
"#,
    );
}

#[test]
fn expressions_keep_their_parentheses() {
    assert_round_trip(
        r#"const a = (b + c) * d;
const e = f ?? (g || h);
const i = j?.k?.[l]?.(m);
const n = <T,>(value: T): T => value;
const o = new Map<string, number>();
const p = q as unknown as R;
const s = [1, 2] as const;
const t = u! satisfies V;
const w = typeof x === 'string' ? x.length : -1;
(function () {})();
"#,
    );
}

#[test]
fn generic_arrows_stay_unambiguous_in_tsx() {
    assert_round_trip(
        r#"const a = <T,>(x: T) => x;
const b = <T extends object>(x: T) => x;
const c = <K, V>(key: K, value: V) => [key, value];
const d = async <T = string,>(x: T) => x;
"#,
    );
    assert_eq!(reprint("const g = <T>(x: T) => x;\n"), "const g = <T,>(x: T) => x;\n");
}

#[test]
fn enums_and_namespaces() {
    assert_round_trip(
        r#"export const enum Color {
    Red = 1, // first
    Green,
    Blue = 'blue'
}
declare namespace Outer.Inner {
    const value: number;
}
declare global {
    interface Window {
        tsguard: unknown;
    }
}
declare module 'virtual';
"#,
    );
}

#[test]
fn printing_is_idempotent() {
    let source = r#"import x,{y as z} from "m"
let   value =  1+2*3
function f(a,b=2,...rest){return a+b}
class K { m(){ } }
if(a)b();else{c()}
"#;
    let first = reprint(source);
    let second = reprint(&first);
    assert_eq!(first, second);
    assert!(first.contains("import x, { y as z } from \"m\";"));
    assert!(first.contains("let value = 1 + 2 * 3;"));
}

#[test]
fn remove_comments_drops_all_comments() {
    let source = "// header\nconst a = 1; // trailing\n/* block */\nconst b = 2;\n";
    let module = parse_module("test.ts", source).expect("source parses");
    let options = PrintOptions {
        remove_comments: true,
        ..PrintOptions::default()
    };
    let printed = print_module_with_source(&module, source, &options).expect("module prints");
    assert_eq!(printed, "const a = 1;\nconst b = 2;\n");
}

#[test]
fn trailing_file_comments_are_kept() {
    assert_round_trip("const a = 1;\n// end of file\n");
}

#[test]
fn synthesized_import_goes_above_leading_comments_of_first_statement() {
    let source = "// keep me\nconst a = 1;\n";
    let mut module = parse_module("test.ts", source).expect("source parses");
    let import = Stmt::new(
        Span::DUMMY,
        StmtKind::Import(ImportDecl {
            span: Span::DUMMY,
            type_only: false,
            specifiers: vec![ImportSpecifier::Namespace(Ident::new("__tsguard"))],
            src: Str::new("./tsguard"),
            with: None,
        }),
    );
    module.body.insert(0, import);
    let printed =
        print_module_with_source(&module, source, &PrintOptions::default()).expect("module prints");
    assert_eq!(
        printed,
        "import * as __tsguard from './tsguard';\n// keep me\nconst a = 1;\n"
    );
}

#[test]
fn indent_width_is_configurable() {
    let source = "function f() {\n  return 1;\n}\n";
    let module = parse_module("test.ts", source).expect("source parses");
    let options: PrintOptions =
        serde_json::from_value(serde_json::json!({ "indentWidth": 2 })).expect("options parse");
    assert_eq!(print_module(&module, &options).expect("module prints"), source);
}

#[test]
fn print_without_source_skips_comments() {
    let source = "/* gone */\nlet a = [1, , 3];\n";
    let module = parse_module("test.ts", source).expect("source parses");
    let printed = print_module(&module, &PrintOptions::default()).expect("module prints");
    assert_eq!(printed, "let a = [1, , 3];\n");
    let Some(StmtKind::Var(decl)) = module.body.first().map(|stmt| &stmt.kind) else {
        panic!("expected variable statement");
    };
    assert!(matches!(
        decl.decls[0].init.as_deref(),
        Some(Expr::Array(array)) if array.elems.len() == 3
    ));
}
