use super::*;
use tsguard_parser::parse_module;

const MARKER: &str = "./tsguard";

fn scope(source: &str) -> ModuleScope {
    let module = parse_module("scope.ts", source).expect("source parses");
    ModuleScope::build(&module, MARKER)
}

fn tracked(source: &str) -> TrackedFunctions {
    let module = parse_module("tracked.ts", source).expect("source parses");
    TrackedFunctions::collect(&module, MARKER)
}

#[test]
fn indexes_type_declarations_with_export_flag() {
    let scope = scope(
        r#"
type Local = string;
export type Exported = number;
interface Hidden { a: string }
export interface Shown<T> { value: T }
export default interface Fallback { b: number }
const notAType = 1;
"#,
    );
    assert!(scope.type_decl("Local").is_some());
    assert!(scope.exported_type("Local").is_none());
    assert!(scope.exported_type("Exported").is_some());
    assert!(scope.exported_type("Hidden").is_none());

    let shown = scope.exported_type("Shown").expect("interface indexed");
    assert_eq!(shown.type_params.len(), 1);
    assert!(matches!(shown.kind, TypeDeclKind::Interface { .. }));

    assert!(scope.type_decl("Fallback").is_some());
    assert!(scope.exported_type("Fallback").is_none());
    assert!(scope.type_decl("notAType").is_none());
    assert_eq!(scope.type_count(), 5);
}

#[test]
fn first_declaration_of_a_name_wins() {
    let scope = scope("type A = string;\ninterface A { x: number }");
    let decl = scope.type_decl("A").expect("declared");
    assert!(matches!(decl.kind, TypeDeclKind::Alias(_)));
}

#[test]
fn records_import_bindings() {
    let scope = scope(
        r#"
import Default, { User, Account as Acc, type Role } from './models';
import * as ns from './ns';
"#,
    );
    let expect = |local: &str, specifier: &str, imported: ImportedName| {
        assert_eq!(
            scope.import(local),
            Some(&ImportBinding {
                specifier: specifier.to_string(),
                imported,
            }),
            "binding for {local}"
        );
    };
    expect("Default", "./models", ImportedName::Default);
    expect("User", "./models", ImportedName::Named("User".to_string()));
    expect("Acc", "./models", ImportedName::Named("Account".to_string()));
    expect("Role", "./models", ImportedName::Named("Role".to_string()));
    expect("ns", "./ns", ImportedName::Namespace);
    assert!(scope.import("Account").is_none());
}

#[test]
fn records_export_entries_in_order() {
    let scope = scope(
        r#"
interface Internal { a: string }
export { Internal as Public, Internal };
export { Remote as Other } from './remote';
export * from './all';
export * as grouped from './grouped';
"#,
    );
    assert_eq!(
        scope.exports(),
        &[
            ExportEntry::Local {
                local: "Internal".to_string(),
                exported: "Public".to_string(),
            },
            ExportEntry::Local {
                local: "Internal".to_string(),
                exported: "Internal".to_string(),
            },
            ExportEntry::Named {
                specifier: "./remote".to_string(),
                orig: "Remote".to_string(),
                exported: "Other".to_string(),
            },
            ExportEntry::All {
                specifier: "./all".to_string(),
            },
            ExportEntry::Namespace {
                specifier: "./grouped".to_string(),
                exported: "grouped".to_string(),
            },
        ]
    );
}

#[test]
fn constraint_tags_come_from_the_marker_module() {
    let scope = scope(
        r#"
import { MinLength, MaxLength as Max, Minimum, Min, Maximum, is } from './tsguard';
import { MinLength as Other } from './elsewhere';
"#,
    );
    assert_eq!(scope.constraint_tag("MinLength"), Some(ConstraintKind::MinLength));
    assert_eq!(scope.constraint_tag("Max"), Some(ConstraintKind::MaxLength));
    assert_eq!(scope.constraint_tag("Minimum"), Some(ConstraintKind::Minimum));
    assert_eq!(scope.constraint_tag("Min"), Some(ConstraintKind::Minimum));
    assert_eq!(scope.constraint_tag("Maximum"), Some(ConstraintKind::Maximum));
    assert_eq!(scope.constraint_tag("is"), None);
    assert_eq!(scope.constraint_tag("Other"), None);
}

#[test]
fn marker_specifier_matches_from_nested_directories() {
    assert!(is_marker_specifier("./tsguard", MARKER));
    assert!(is_marker_specifier("../../tsguard", MARKER));
    assert!(!is_marker_specifier("tsguard", MARKER));
    assert!(!is_marker_specifier("./tsguard-extra", MARKER));
    assert!(is_marker_specifier("@acme/guard", "@acme/guard"));

    let scope = scope("import { MinLength } from '../tsguard';");
    assert_eq!(scope.constraint_tag("MinLength"), Some(ConstraintKind::MinLength));
}

#[test]
fn tracked_functions_map_locals_to_exported_names() {
    let tracked = tracked(
        r#"
import { is, assert as check, type Guard } from './tsguard';
import { other } from './other';
"#,
    );
    assert_eq!(tracked.len(), 2);
    assert_eq!(tracked.imported_name("is"), Some("is"));
    assert_eq!(tracked.imported_name("check"), Some("assert"));
    assert_eq!(tracked.imported_name("assert"), None);
    assert_eq!(tracked.imported_name("Guard"), None);
    assert_eq!(tracked.imported_name("other"), None);
}

#[test]
fn tracked_functions_require_the_exact_specifier() {
    assert!(tracked("import { is } from '../tsguard';").is_empty());
    assert!(tracked("import type { is } from './tsguard';").is_empty());
    assert!(tracked("import guard from './tsguard';").is_empty());
    assert!(tracked("import * as guard from './tsguard';").is_empty());
    assert!(tracked("const is = 1;").is_empty());
}
