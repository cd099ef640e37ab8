//! Type Schema: the resolved, self-contained description of a runtime shape.
//!
//! Schemas are plain values. They serialize to the canonical JSON shape
//! `{"type": "<variant>", ...}` used by `tsguard schema` and by tests.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TypeSchema {
    String {
        #[serde(skip_serializing_if = "LengthConstraints::is_empty")]
        constraints: LengthConstraints,
    },
    Number {
        #[serde(skip_serializing_if = "NumberConstraints::is_empty")]
        constraints: NumberConstraints,
    },
    Boolean,
    Array {
        #[serde(rename = "elementType")]
        element: Box<TypeSchema>,
        #[serde(skip_serializing_if = "LengthConstraints::is_empty")]
        constraints: LengthConstraints,
    },
    Tuple {
        types: Vec<TypeSchema>,
    },
    Object {
        properties: IndexMap<String, PropertySchema>,
    },
    Union {
        types: Vec<TypeSchema>,
    },
    Literal {
        value: LiteralValue,
    },
}

impl TypeSchema {
    pub fn string() -> Self {
        TypeSchema::String {
            constraints: LengthConstraints::default(),
        }
    }

    pub fn number() -> Self {
        TypeSchema::Number {
            constraints: NumberConstraints::default(),
        }
    }

    pub fn array(element: TypeSchema) -> Self {
        TypeSchema::Array {
            element: Box::new(element),
            constraints: LengthConstraints::default(),
        }
    }

    pub fn object(properties: IndexMap<String, PropertySchema>) -> Self {
        TypeSchema::Object { properties }
    }

    /// Name of the variant as it appears in the `type` field.
    pub fn kind_name(&self) -> &'static str {
        match self {
            TypeSchema::String { .. } => "string",
            TypeSchema::Number { .. } => "number",
            TypeSchema::Boolean => "boolean",
            TypeSchema::Array { .. } => "array",
            TypeSchema::Tuple { .. } => "tuple",
            TypeSchema::Object { .. } => "object",
            TypeSchema::Union { .. } => "union",
            TypeSchema::Literal { .. } => "literal",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PropertySchema {
    #[serde(flatten)]
    pub schema: TypeSchema,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
}

impl PropertySchema {
    pub fn new(schema: TypeSchema, optional: bool) -> Self {
        PropertySchema { schema, optional }
    }
}

/// Length bounds shared by strings and arrays.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LengthConstraints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
}

impl LengthConstraints {
    pub fn is_empty(&self) -> bool {
        self.min_length.is_none() && self.max_length.is_none()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct NumberConstraints {
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_optional_number"
    )]
    pub min: Option<f64>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_optional_number"
    )]
    pub max: Option<f64>,
}

impl NumberConstraints {
    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum LiteralValue {
    String(String),
    Number(f64),
    Boolean(bool),
    /// Digits without the `n` suffix, sign included.
    BigInt(String),
}

impl Serialize for LiteralValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            LiteralValue::String(value) => serializer.serialize_str(value),
            LiteralValue::Number(value) => serialize_number(*value, serializer),
            LiteralValue::Boolean(value) => serializer.serialize_bool(*value),
            LiteralValue::BigInt(digits) => serializer.collect_str(&format_args!("{digits}n")),
        }
    }
}

/// Largest integer an `f64` represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Integral values serialize as JSON integers (`1`, not `1.0`).
fn serialize_number<S: Serializer>(value: f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(value as i64)
    } else {
        serializer.serialize_f64(value)
    }
}

fn serialize_optional_number<S: Serializer>(
    value: &Option<f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(value) => serialize_number(*value, serializer),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
#[path = "tests/schema_tests.rs"]
mod tests;
