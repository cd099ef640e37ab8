//! Validator Synthesizer: `TypeSchema` to a boolean check expression.
//!
//! The output is an expression tree over a value reference, for example for
//! `{ tags: string[] }` checked against `input`:
//!
//! ```text
//! typeof input === 'object' && input !== null && Array.isArray(input['tags'])
//!     && input['tags'].every((element) => typeof element === 'string')
//! ```
//!
//! Constraint predicates live in the runtime namespace:
//! `__tsguard.constraints.string.minLength(v, 1)`. Nodes are built without spans; the
//! printer adds parentheses where precedence requires them.

use crate::schema::{LengthConstraints, LiteralValue, NumberConstraints, TypeSchema};
use tsguard_common::Span;
use tsguard_parser::ast::{
    ArrowBody, ArrowExpr, BigInt, BinExpr, BinaryOp, BindingIdent, Bool, CallExpr, Expr,
    ExprOrSpread, Ident, Lit, MemberExpr, MemberProp, Number, Pat, Str, UnaryExpr, UnaryOp,
};

pub struct ValidatorSynthesizer<'a> {
    namespace: &'a str,
    /// Number of `every` callbacks enclosing the current position.
    array_depth: usize,
}

impl<'a> ValidatorSynthesizer<'a> {
    pub fn new(namespace: &'a str) -> Self {
        ValidatorSynthesizer {
            namespace,
            array_depth: 0,
        }
    }

    /// Build the expression that is true exactly when `value` matches `schema`.
    pub fn synthesize(&mut self, schema: &TypeSchema, value: &Expr) -> Expr {
        match schema {
            TypeSchema::String { constraints } => {
                let mut checks = vec![type_of_is(value, "string")];
                self.push_length_checks("string", constraints, value, &mut checks);
                all(checks)
            }
            TypeSchema::Number { constraints } => {
                let mut checks = vec![type_of_is(value, "number")];
                self.push_number_checks(constraints, value, &mut checks);
                all(checks)
            }
            TypeSchema::Boolean => type_of_is(value, "boolean"),
            TypeSchema::Array {
                element,
                constraints,
            } => {
                let mut checks = vec![is_array(value)];
                self.push_length_checks("array", constraints, value, &mut checks);
                checks.push(self.every_element(element, value));
                all(checks)
            }
            TypeSchema::Tuple { types } => {
                let mut checks = Vec::with_capacity(types.len() + 2);
                checks.push(is_array(value));
                checks.push(strict_eq(
                    member(value.clone(), "length"),
                    number(types.len() as f64),
                ));
                for (index, ty) in types.iter().enumerate() {
                    let position = computed_member(value.clone(), number(index as f64));
                    checks.push(self.synthesize(ty, &position));
                }
                all(checks)
            }
            TypeSchema::Object { properties } => {
                let mut checks = Vec::with_capacity(properties.len() + 2);
                checks.push(type_of_is(value, "object"));
                checks.push(binary(BinaryOp::NotEqEq, value.clone(), null()));
                for (key, property) in properties {
                    let field = computed_member(value.clone(), string(key));
                    checks.push(self.synthesize(&property.schema, &field));
                }
                all(checks)
            }
            TypeSchema::Union { types } => {
                let mut checks = types.iter().map(|ty| self.synthesize(ty, value));
                let Some(first) = checks.next() else {
                    return boolean(false);
                };
                checks.fold(first, |acc, check| binary(BinaryOp::LogicalOr, acc, check))
            }
            TypeSchema::Literal { value: literal } => strict_eq(value.clone(), literal_expr(literal)),
        }
    }

    /// `v.every((element) => ...)`, with a binding name not used by any enclosing callback.
    fn every_element(&mut self, element: &TypeSchema, value: &Expr) -> Expr {
        let binding = match self.array_depth {
            0 => "element".to_string(),
            depth => format!("element_{depth}"),
        };
        self.array_depth += 1;
        let check = self.synthesize(element, &ident(&binding));
        self.array_depth -= 1;

        let callback = Expr::Arrow(ArrowExpr {
            span: Span::DUMMY,
            is_async: false,
            type_params: None,
            params: vec![Pat::Ident(BindingIdent::new(binding))],
            return_type: None,
            body: ArrowBody::Expr(Box::new(check)),
        });
        call(member(value.clone(), "every"), vec![callback])
    }

    fn push_length_checks(
        &self,
        kind: &str,
        constraints: &LengthConstraints,
        value: &Expr,
        checks: &mut Vec<Expr>,
    ) {
        if let Some(min) = constraints.min_length {
            checks.push(self.constraint_call(kind, "minLength", value, min as f64));
        }
        if let Some(max) = constraints.max_length {
            checks.push(self.constraint_call(kind, "maxLength", value, max as f64));
        }
    }

    fn push_number_checks(&self, constraints: &NumberConstraints, value: &Expr, checks: &mut Vec<Expr>) {
        if let Some(min) = constraints.min {
            checks.push(self.constraint_call("number", "min", value, min));
        }
        if let Some(max) = constraints.max {
            checks.push(self.constraint_call("number", "max", value, max));
        }
    }

    /// `<ns>.constraints.<kind>.<name>(value, bound)`
    fn constraint_call(&self, kind: &str, name: &str, value: &Expr, bound: f64) -> Expr {
        let predicate = member(
            member(member(ident(self.namespace), "constraints"), kind),
            name,
        );
        call(predicate, vec![value.clone(), number(bound)])
    }
}

// =============================================================================
// Expression builders
// =============================================================================

pub(crate) fn ident(name: &str) -> Expr {
    Expr::Ident(Ident::new(name))
}

pub(crate) fn member(obj: Expr, prop: &str) -> Expr {
    Expr::Member(MemberExpr {
        span: Span::DUMMY,
        obj: Box::new(obj),
        prop: MemberProp::Ident(Ident::new(prop)),
        optional: false,
    })
}

fn computed_member(obj: Expr, prop: Expr) -> Expr {
    Expr::Member(MemberExpr {
        span: Span::DUMMY,
        obj: Box::new(obj),
        prop: MemberProp::Computed(Box::new(prop)),
        optional: false,
    })
}

pub(crate) fn call(callee: Expr, args: Vec<Expr>) -> Expr {
    Expr::Call(CallExpr {
        span: Span::DUMMY,
        callee: Box::new(callee),
        type_args: None,
        args: args.into_iter().map(ExprOrSpread::expr).collect(),
        optional: false,
    })
}

fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    Expr::Bin(BinExpr {
        span: Span::DUMMY,
        op,
        left: Box::new(left),
        right: Box::new(right),
    })
}

fn strict_eq(left: Expr, right: Expr) -> Expr {
    binary(BinaryOp::EqEqEq, left, right)
}

fn type_of_is(value: &Expr, name: &str) -> Expr {
    let type_of = Expr::Unary(UnaryExpr {
        span: Span::DUMMY,
        op: UnaryOp::TypeOf,
        arg: Box::new(value.clone()),
    });
    strict_eq(type_of, string(name))
}

fn is_array(value: &Expr) -> Expr {
    call(member(ident("Array"), "isArray"), vec![value.clone()])
}

/// Left-nested `&&` chain; `checks` is never empty.
fn all(checks: Vec<Expr>) -> Expr {
    let mut checks = checks.into_iter();
    let first = checks.next().unwrap_or_else(|| boolean(true));
    checks.fold(first, |acc, check| binary(BinaryOp::LogicalAnd, acc, check))
}

fn string(value: &str) -> Expr {
    Expr::Lit(Lit::Str(Str::new(value)))
}

fn number(value: f64) -> Expr {
    Expr::Lit(Lit::Num(Number::new(value)))
}

fn boolean(value: bool) -> Expr {
    Expr::Lit(Lit::Bool(Bool {
        span: Span::DUMMY,
        value,
    }))
}

fn null() -> Expr {
    Expr::Lit(Lit::Null(Span::DUMMY))
}

fn literal_expr(literal: &LiteralValue) -> Expr {
    match literal {
        LiteralValue::String(value) => string(value),
        LiteralValue::Number(value) => number(*value),
        LiteralValue::Boolean(value) => boolean(*value),
        LiteralValue::BigInt(digits) => {
            let (negative, digits) = match digits.strip_prefix('-') {
                Some(rest) => (true, rest),
                None => (false, digits.as_str()),
            };
            let big = Expr::Lit(Lit::BigInt(BigInt {
                span: Span::DUMMY,
                value: digits.to_string(),
                raw: None,
            }));
            if negative {
                Expr::Unary(UnaryExpr {
                    span: Span::DUMMY,
                    op: UnaryOp::Minus,
                    arg: Box::new(big),
                })
            } else {
                big
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/validator_tests.rs"]
mod tests;
