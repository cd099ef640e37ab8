use super::*;
use crate::schema::PropertySchema;
use indexmap::IndexMap;
use tsguard_emitter::{PrintOptions, print_expr};

fn check(schema: &TypeSchema) -> String {
    check_against(schema, &ident("v"))
}

fn check_against(schema: &TypeSchema, value: &Expr) -> String {
    let expr = ValidatorSynthesizer::new("__tsguard").synthesize(schema, value);
    print_expr(&expr, &PrintOptions::default()).expect("check prints")
}

fn object(properties: &[(&str, TypeSchema, bool)]) -> TypeSchema {
    let properties: IndexMap<String, PropertySchema> = properties
        .iter()
        .map(|(key, schema, optional)| {
            (key.to_string(), PropertySchema::new(schema.clone(), *optional))
        })
        .collect();
    TypeSchema::object(properties)
}

fn literal(value: LiteralValue) -> TypeSchema {
    TypeSchema::Literal { value }
}

#[test]
fn primitive_checks_use_typeof() {
    assert_eq!(check(&TypeSchema::string()), "typeof v === 'string'");
    assert_eq!(check(&TypeSchema::number()), "typeof v === 'number'");
    assert_eq!(check(&TypeSchema::Boolean), "typeof v === 'boolean'");
}

#[test]
fn constraints_call_runtime_predicates() {
    let name = TypeSchema::String {
        constraints: LengthConstraints {
            min_length: Some(1),
            max_length: Some(50),
        },
    };
    assert_eq!(
        check(&name),
        "typeof v === 'string' && __tsguard.constraints.string.minLength(v, 1) \
         && __tsguard.constraints.string.maxLength(v, 50)"
    );

    let ratio = TypeSchema::Number {
        constraints: NumberConstraints {
            min: Some(-1.0),
            max: Some(0.5),
        },
    };
    assert_eq!(
        check(&ratio),
        "typeof v === 'number' && __tsguard.constraints.number.min(v, -1) \
         && __tsguard.constraints.number.max(v, 0.5)"
    );

    let tags = TypeSchema::Array {
        element: Box::new(TypeSchema::string()),
        constraints: LengthConstraints {
            min_length: None,
            max_length: Some(3),
        },
    };
    assert_eq!(
        check(&tags),
        "Array.isArray(v) && __tsguard.constraints.array.maxLength(v, 3) \
         && v.every((element) => typeof element === 'string')"
    );
}

#[test]
fn nested_arrays_bind_distinct_element_names() {
    let matrix = TypeSchema::array(TypeSchema::array(TypeSchema::number()));
    assert_eq!(
        check(&matrix),
        "Array.isArray(v) && v.every((element) => Array.isArray(element) \
         && element.every((element_1) => typeof element_1 === 'number'))"
    );

    let rows = TypeSchema::array(object(&[(
        "cells",
        TypeSchema::array(TypeSchema::Boolean),
        false,
    )]));
    assert_eq!(
        check(&rows),
        "Array.isArray(v) && v.every((element) => typeof element === 'object' \
         && element !== null && Array.isArray(element['cells']) \
         && element['cells'].every((element_1) => typeof element_1 === 'boolean'))"
    );
}

#[test]
fn tuples_check_length_and_positions() {
    let pair = TypeSchema::Tuple {
        types: vec![TypeSchema::string(), TypeSchema::number()],
    };
    assert_eq!(
        check(&pair),
        "Array.isArray(v) && v.length === 2 && typeof v[0] === 'string' \
         && typeof v[1] === 'number'"
    );
    assert_eq!(
        check(&TypeSchema::Tuple { types: Vec::new() }),
        "Array.isArray(v) && v.length === 0"
    );
}

#[test]
fn objects_check_every_property_by_key() {
    let user = object(&[
        ("name", TypeSchema::string(), false),
        ("first-name", TypeSchema::string(), true),
        (
            "id",
            TypeSchema::Union {
                types: vec![TypeSchema::string(), TypeSchema::number()],
            },
            false,
        ),
    ]);
    assert_eq!(
        check(&user),
        "typeof v === 'object' && v !== null && typeof v['name'] === 'string' \
         && typeof v['first-name'] === 'string' \
         && (typeof v['id'] === 'string' || typeof v['id'] === 'number')"
    );
    assert_eq!(
        check(&object(&[])),
        "typeof v === 'object' && v !== null"
    );
}

#[test]
fn unions_fold_with_or() {
    let role = TypeSchema::Union {
        types: vec![
            literal(LiteralValue::String("admin".into())),
            literal(LiteralValue::String("user".into())),
            literal(LiteralValue::Number(0.0)),
        ],
    };
    assert_eq!(check(&role), "v === 'admin' || v === 'user' || v === 0");
    assert_eq!(check(&TypeSchema::Union { types: Vec::new() }), "false");
}

#[test]
fn literals_compare_strictly() {
    assert_eq!(check(&literal(LiteralValue::Boolean(true))), "v === true");
    assert_eq!(check(&literal(LiteralValue::Number(-1.0))), "v === -1");
    assert_eq!(check(&literal(LiteralValue::BigInt("10".into()))), "v === 10n");
    assert_eq!(check(&literal(LiteralValue::BigInt("-5".into()))), "v === -5n");
}

#[test]
fn value_expression_is_reused_verbatim() {
    let value = member(member(ident("req"), "body"), "user");
    assert_eq!(
        check_against(&TypeSchema::array(TypeSchema::string()), &value),
        "Array.isArray(req.body.user) && req.body.user.every((element) => typeof element === 'string')"
    );
}

#[test]
fn custom_namespace_is_used_for_predicates() {
    let name = TypeSchema::String {
        constraints: LengthConstraints {
            min_length: Some(2),
            max_length: None,
        },
    };
    let expr = ValidatorSynthesizer::new("rt").synthesize(&name, &ident("s"));
    assert_eq!(
        print_expr(&expr, &PrintOptions::default()).expect("check prints"),
        "typeof s === 'string' && rt.constraints.string.minLength(s, 2)"
    );
}
