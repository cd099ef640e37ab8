use std::path::Path;
use tsguard_transform::TransformOptions;

use super::args::OptionOverrides;
use super::config::{apply_overrides, load_config, parse_config, resolve_options};

#[test]
fn empty_config_is_all_defaults() {
    let options = parse_config("{}").expect("empty object parses");
    assert_eq!(options, TransformOptions::default());
}

#[test]
fn config_keys_are_camel_case() {
    let options = parse_config(
        r#"{
            "markerModule": "@acme/guard",
            "runtimeNamespace": "$rt",
            "print": { "indentWidth": 2, "removeComments": true }
        }"#,
    )
    .expect("config parses");
    assert_eq!(options.marker_module, "@acme/guard");
    assert_eq!(options.runtime_namespace, "$rt");
    assert_eq!(options.print.indent_width, 2);
    assert!(options.print.remove_comments);
}

#[test]
fn partial_print_section_keeps_other_defaults() {
    let options = parse_config(r#"{ "print": { "removeComments": true } }"#).expect("parses");
    assert_eq!(options.print.indent_width, 4);
    assert_eq!(options.marker_module, "./tsguard");
}

#[test]
fn invalid_values_are_rejected() {
    assert!(parse_config(r#"{ "markerModule": "" }"#).is_err());
    assert!(parse_config(r#"{ "runtimeNamespace": "not valid" }"#).is_err());
    assert!(parse_config(r#"{ "runtimeNamespace": "1st" }"#).is_err());
    assert!(parse_config(r#"{ "print": { "indentWidth": "four" } }"#).is_err());
    assert!(parse_config("[").is_err());
}

#[test]
fn flags_override_file_values() {
    let mut options = parse_config(r#"{ "markerModule": "./a", "runtimeNamespace": "ns" }"#)
        .expect("config parses");
    apply_overrides(
        &mut options,
        &OptionOverrides {
            marker_module: None,
            runtime_namespace: Some("other".to_string()),
            indent_width: Some(8),
            remove_comments: false,
        },
    );
    assert_eq!(options.marker_module, "./a");
    assert_eq!(options.runtime_namespace, "other");
    assert_eq!(options.print.indent_width, 8);
    assert!(!options.print.remove_comments);
}

#[test]
fn resolve_reads_the_file_then_applies_flags() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("tsguard.json");
    std::fs::write(&path, r#"{ "markerModule": "./guard" }"#).expect("write config");

    let overrides = OptionOverrides {
        remove_comments: true,
        ..OptionOverrides::default()
    };
    let options = resolve_options(Some(&path), &overrides).expect("options resolve");
    assert_eq!(options.marker_module, "./guard");
    assert!(options.print.remove_comments);

    let invalid = OptionOverrides {
        runtime_namespace: Some("a-b".to_string()),
        ..OptionOverrides::default()
    };
    assert!(resolve_options(None, &invalid).is_err());
}

#[test]
fn missing_config_file_names_the_path() {
    let err = load_config(Path::new("/definitely/not/here/tsguard.json"))
        .expect_err("missing file fails");
    assert!(format!("{err:#}").contains("/definitely/not/here/tsguard.json"));
}
