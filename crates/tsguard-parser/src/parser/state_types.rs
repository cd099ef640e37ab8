//! Parser state - type annotations, type parameters and type members

use super::state::{CONTEXT_FLAG_DISALLOW_CONDITIONAL_TYPES, ParserState};
use crate::ast::*;
use crate::error::{ParseErrorKind, ParseResult};
use tsguard_scanner::SyntaxKind;

impl ParserState {
    // =========================================================================
    // Parse Methods - Types
    // =========================================================================

    /// `: T` or `: x is T` after a parameter list.
    pub(crate) fn parse_return_type_annotation(&mut self) -> ParseResult<Option<Box<TsType>>> {
        if !self.parse_optional(SyntaxKind::ColonToken) {
            return Ok(None);
        }
        Ok(Some(Box::new(self.parse_type_or_type_predicate()?)))
    }

    fn parse_type_or_type_predicate(&mut self) -> ParseResult<TsType> {
        let start = self.token_pos();

        if self.is_token(SyntaxKind::AssertsKeyword)
            && self.look_ahead(|p| {
                p.next_token();
                !p.has_preceding_line_break()
                    && !p.is_token(SyntaxKind::IsKeyword)
                    && (p.is_identifier() || p.is_token(SyntaxKind::ThisKeyword))
            })
        {
            self.next_token();
            let param_name = self.parse_predicate_subject()?;
            let type_ann = if self.parse_optional(SyntaxKind::IsKeyword) {
                Some(Box::new(self.parse_type()?))
            } else {
                None
            };
            return Ok(TsType::Predicate(TsTypePredicate {
                span: self.span_from(start),
                asserts: true,
                param_name,
                type_ann,
            }));
        }

        if (self.is_identifier() || self.is_token(SyntaxKind::ThisKeyword))
            && self.look_ahead(|p| {
                p.next_token();
                p.is_token(SyntaxKind::IsKeyword) && !p.has_preceding_line_break()
            })
        {
            let param_name = self.parse_predicate_subject()?;
            self.parse_expected(SyntaxKind::IsKeyword)?;
            let type_ann = self.parse_type()?;
            return Ok(TsType::Predicate(TsTypePredicate {
                span: self.span_from(start),
                asserts: false,
                param_name,
                type_ann: Some(Box::new(type_ann)),
            }));
        }

        self.parse_type()
    }

    fn parse_predicate_subject(&mut self) -> ParseResult<TsThisTypeOrIdent> {
        if self.is_token(SyntaxKind::ThisKeyword) {
            let start = self.token_pos();
            self.next_token();
            Ok(TsThisTypeOrIdent::This(self.span_from(start)))
        } else {
            Ok(TsThisTypeOrIdent::Ident(self.parse_identifier()?))
        }
    }

    /// Parse a full type, including function types and conditional types.
    pub fn parse_type(&mut self) -> ParseResult<TsType> {
        self.enter_recursion()?;
        let result = self.parse_type_worker();
        self.exit_recursion();
        result
    }

    fn parse_type_worker(&mut self) -> ParseResult<TsType> {
        if self.is_start_of_function_type() {
            return self.parse_function_or_constructor_type(false, false);
        }
        if self.is_token(SyntaxKind::NewKeyword) {
            return self.parse_function_or_constructor_type(true, false);
        }
        if self.is_token(SyntaxKind::AbstractKeyword)
            && self.peek_token() == SyntaxKind::NewKeyword
        {
            return self.parse_function_or_constructor_type(true, true);
        }

        let start = self.token_pos();
        let check_type = self.parse_union_type()?;
        if self.in_context(CONTEXT_FLAG_DISALLOW_CONDITIONAL_TYPES)
            || self.has_preceding_line_break()
            || !self.parse_optional(SyntaxKind::ExtendsKeyword)
        {
            return Ok(check_type);
        }

        let extends_type = self.with_context(CONTEXT_FLAG_DISALLOW_CONDITIONAL_TYPES, true, |p| {
            p.parse_type()
        })?;
        self.parse_expected(SyntaxKind::QuestionToken)?;
        let true_type = self.parse_type_allow_conditional()?;
        self.parse_expected(SyntaxKind::ColonToken)?;
        let false_type = self.parse_type_allow_conditional()?;
        Ok(TsType::Conditional(TsConditionalType {
            span: self.span_from(start),
            check_type: Box::new(check_type),
            extends_type: Box::new(extends_type),
            true_type: Box::new(true_type),
            false_type: Box::new(false_type),
        }))
    }

    fn parse_type_allow_conditional(&mut self) -> ParseResult<TsType> {
        self.with_context(CONTEXT_FLAG_DISALLOW_CONDITIONAL_TYPES, false, |p| {
            p.parse_type()
        })
    }

    fn is_start_of_function_type(&mut self) -> bool {
        if self.is_token(SyntaxKind::LessThanToken) {
            return true;
        }
        self.is_token(SyntaxKind::OpenParenToken)
            && self.look_ahead(|p| p.is_unambiguously_start_of_function_type())
    }

    /// Called on `(`: distinguishes `(a: T) => U` from a parenthesized type.
    fn is_unambiguously_start_of_function_type(&mut self) -> bool {
        self.next_token();
        if self.is_token(SyntaxKind::CloseParenToken) || self.is_token(SyntaxKind::DotDotDotToken) {
            return true;
        }
        if !self.skip_parameter_start() {
            return false;
        }
        match self.token() {
            SyntaxKind::ColonToken
            | SyntaxKind::CommaToken
            | SyntaxKind::QuestionToken
            | SyntaxKind::EqualsToken => true,
            SyntaxKind::CloseParenToken => {
                self.next_token();
                self.is_token(SyntaxKind::EqualsGreaterThanToken)
            }
            _ => false,
        }
    }

    fn skip_parameter_start(&mut self) -> bool {
        while matches!(
            self.token(),
            SyntaxKind::PublicKeyword
                | SyntaxKind::PrivateKeyword
                | SyntaxKind::ProtectedKeyword
                | SyntaxKind::ReadonlyKeyword
        ) {
            self.next_token();
        }
        if self.is_identifier() || self.is_token(SyntaxKind::ThisKeyword) {
            self.next_token();
            return true;
        }
        if self.is_token(SyntaxKind::OpenBracketToken) || self.is_token(SyntaxKind::OpenBraceToken) {
            return self.parse_binding_name().is_ok();
        }
        false
    }

    fn parse_function_or_constructor_type(
        &mut self,
        is_constructor: bool,
        is_abstract: bool,
    ) -> ParseResult<TsType> {
        let start = self.token_pos();
        if is_abstract {
            self.parse_expected(SyntaxKind::AbstractKeyword)?;
        }
        if is_constructor {
            self.parse_expected(SyntaxKind::NewKeyword)?;
        }
        let type_params = self.parse_type_parameters()?;
        let params = self.parse_parameters()?;
        self.parse_expected(SyntaxKind::EqualsGreaterThanToken)?;
        let return_type = self.parse_type_or_type_predicate()?;
        Ok(TsType::Fn(TsFnType {
            span: self.span_from(start),
            is_constructor,
            is_abstract,
            type_params,
            params,
            return_type: Box::new(return_type),
        }))
    }

    fn parse_union_type(&mut self) -> ParseResult<TsType> {
        let start = self.token_pos();
        self.parse_optional(SyntaxKind::BarToken);
        let first = self.parse_intersection_type()?;
        if !self.is_token(SyntaxKind::BarToken) {
            return Ok(first);
        }
        let mut types = vec![first];
        while self.parse_optional(SyntaxKind::BarToken) {
            types.push(self.parse_intersection_type()?);
        }
        Ok(TsType::Union(TsUnionType {
            span: self.span_from(start),
            types,
        }))
    }

    fn parse_intersection_type(&mut self) -> ParseResult<TsType> {
        let start = self.token_pos();
        self.parse_optional(SyntaxKind::AmpersandToken);
        let first = self.parse_type_operator_or_higher()?;
        if !self.is_token(SyntaxKind::AmpersandToken) {
            return Ok(first);
        }
        let mut types = vec![first];
        while self.parse_optional(SyntaxKind::AmpersandToken) {
            types.push(self.parse_type_operator_or_higher()?);
        }
        Ok(TsType::Intersection(TsIntersectionType {
            span: self.span_from(start),
            types,
        }))
    }

    fn parse_type_operator_or_higher(&mut self) -> ParseResult<TsType> {
        let start = self.token_pos();
        let op = match self.token() {
            SyntaxKind::KeyOfKeyword => Some(TsTypeOperatorOp::KeyOf),
            SyntaxKind::UniqueKeyword => Some(TsTypeOperatorOp::Unique),
            SyntaxKind::ReadonlyKeyword => Some(TsTypeOperatorOp::ReadOnly),
            _ => None,
        };
        if let Some(op) = op {
            self.next_token();
            self.enter_recursion()?;
            let type_ann = self.parse_type_operator_or_higher();
            self.exit_recursion();
            let type_ann = type_ann?;
            return Ok(TsType::Operator(TsTypeOperator {
                span: self.span_from(start),
                op,
                type_ann: Box::new(type_ann),
            }));
        }
        if self.is_token(SyntaxKind::InferKeyword) {
            return self.parse_infer_type();
        }
        self.parse_postfix_type()
    }

    /// `infer U` or `infer U extends C`. Outside a conditional `extends` clause a
    /// constraint followed by `?` belongs to an enclosing conditional type instead.
    fn parse_infer_type(&mut self) -> ParseResult<TsType> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::InferKeyword)?;
        let name = self.parse_identifier()?;
        let constraint = if self.is_token(SyntaxKind::ExtendsKeyword) {
            self.try_parse(|p| {
                p.next_token();
                let constraint = p.with_context(CONTEXT_FLAG_DISALLOW_CONDITIONAL_TYPES, true, |p| {
                    p.parse_type()
                })?;
                if p.in_context(CONTEXT_FLAG_DISALLOW_CONDITIONAL_TYPES)
                    || !p.is_token(SyntaxKind::QuestionToken)
                {
                    Ok(constraint)
                } else {
                    Err(p.error_unexpected())
                }
            })
        } else {
            None
        };
        let span = self.span_from(start);
        Ok(TsType::Infer(TsInferType {
            span,
            type_param: TypeParam {
                span,
                name,
                is_const: false,
                is_in: false,
                is_out: false,
                constraint: constraint.map(Box::new),
                default: None,
            },
        }))
    }

    fn parse_postfix_type(&mut self) -> ParseResult<TsType> {
        self.with_chain(|p| p.parse_postfix_type_chain())
    }

    fn parse_postfix_type_chain(&mut self) -> ParseResult<TsType> {
        let start = self.token_pos();
        let mut ty = self.parse_non_array_type()?;
        while self.is_token(SyntaxKind::OpenBracketToken) && !self.has_preceding_line_break() {
            self.enter_chain_link()?;
            self.next_token();
            if self.parse_optional(SyntaxKind::CloseBracketToken) {
                ty = TsType::Array(TsArrayType {
                    span: self.span_from(start),
                    elem_type: Box::new(ty),
                });
            } else {
                let index_type = self.parse_type()?;
                self.parse_expected(SyntaxKind::CloseBracketToken)?;
                ty = TsType::IndexedAccess(TsIndexedAccessType {
                    span: self.span_from(start),
                    obj_type: Box::new(ty),
                    index_type: Box::new(index_type),
                });
            }
        }
        Ok(ty)
    }

    fn keyword_type_kind(&mut self) -> Option<TsKeywordKind> {
        let kind = match self.token() {
            SyntaxKind::AnyKeyword => TsKeywordKind::Any,
            SyntaxKind::UnknownKeyword => TsKeywordKind::Unknown,
            SyntaxKind::NumberKeyword => TsKeywordKind::Number,
            SyntaxKind::ObjectKeyword => TsKeywordKind::Object,
            SyntaxKind::BooleanKeyword => TsKeywordKind::Boolean,
            SyntaxKind::BigIntKeyword => TsKeywordKind::BigInt,
            SyntaxKind::StringKeyword => TsKeywordKind::String,
            SyntaxKind::SymbolKeyword => TsKeywordKind::Symbol,
            SyntaxKind::NeverKeyword => TsKeywordKind::Never,
            SyntaxKind::UndefinedKeyword => TsKeywordKind::Undefined,
            SyntaxKind::VoidKeyword => return Some(TsKeywordKind::Void),
            SyntaxKind::NullKeyword => return Some(TsKeywordKind::Null),
            _ => return None,
        };
        // `string.Foo` is a qualified name in a namespace called `string`
        if self.peek_token() == SyntaxKind::DotToken {
            None
        } else {
            Some(kind)
        }
    }

    fn parse_non_array_type(&mut self) -> ParseResult<TsType> {
        let start = self.token_pos();
        if let Some(kind) = self.keyword_type_kind() {
            self.next_token();
            return Ok(TsType::Keyword(TsKeywordType {
                span: self.span_from(start),
                kind,
            }));
        }

        match self.token() {
            SyntaxKind::ThisKeyword => {
                self.next_token();
                Ok(TsType::This(self.span_from(start)))
            }
            SyntaxKind::TypeOfKeyword => self.parse_type_query(),
            SyntaxKind::ImportKeyword => Ok(TsType::Import(self.parse_import_type()?)),
            SyntaxKind::StringLiteral => {
                let lit = TsLit::Str(self.parse_string_literal()?);
                Ok(self.finish_literal_type(start, lit))
            }
            SyntaxKind::NumericLiteral => {
                let lit = TsLit::Number(self.parse_numeric_literal()?);
                Ok(self.finish_literal_type(start, lit))
            }
            SyntaxKind::BigIntLiteral => {
                let lit = TsLit::BigInt(self.parse_bigint_literal()?);
                Ok(self.finish_literal_type(start, lit))
            }
            SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword => {
                let value = self.is_token(SyntaxKind::TrueKeyword);
                self.next_token();
                let lit = TsLit::Bool(Bool {
                    span: self.span_from(start),
                    value,
                });
                Ok(self.finish_literal_type(start, lit))
            }
            SyntaxKind::MinusToken => self.parse_negative_literal_type(),
            SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead => {
                let (quasis, types) = self.parse_template_parts(|p| p.parse_type())?;
                let span = self.span_from(start);
                Ok(TsType::Lit(TsLitType {
                    span,
                    lit: TsLit::Tpl(TsTplLitType {
                        span,
                        types,
                        quasis,
                    }),
                }))
            }
            SyntaxKind::OpenBraceToken => {
                if self.look_ahead(|p| p.is_start_of_mapped_type()) {
                    self.parse_mapped_type()
                } else {
                    let members = self.parse_object_type_members()?;
                    Ok(TsType::TypeLit(TsTypeLit {
                        span: self.span_from(start),
                        members,
                    }))
                }
            }
            SyntaxKind::OpenBracketToken => self.parse_tuple_type(),
            SyntaxKind::OpenParenToken => {
                self.next_token();
                let type_ann = self.parse_type_allow_conditional()?;
                self.parse_expected(SyntaxKind::CloseParenToken)?;
                Ok(TsType::Paren(TsParenType {
                    span: self.span_from(start),
                    type_ann: Box::new(type_ann),
                }))
            }
            _ if self.is_identifier() => self.parse_type_reference(),
            _ => Err(self.error_expected("type")),
        }
    }

    fn finish_literal_type(&self, start: u32, lit: TsLit) -> TsType {
        TsType::Lit(TsLitType {
            span: self.span_from(start),
            lit,
        })
    }

    fn parse_negative_literal_type(&mut self) -> ParseResult<TsType> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::MinusToken)?;
        let lit = match self.token() {
            SyntaxKind::NumericLiteral => {
                let number = self.parse_numeric_literal()?;
                TsLit::Number(Number {
                    span: self.span_from(start),
                    value: -number.value,
                    raw: number.raw.map(|raw| format!("-{raw}")),
                })
            }
            SyntaxKind::BigIntLiteral => {
                let big = self.parse_bigint_literal()?;
                TsLit::BigInt(BigInt {
                    span: self.span_from(start),
                    value: format!("-{}", big.value),
                    raw: big.raw.map(|raw| format!("-{raw}")),
                })
            }
            _ => return Err(self.error_expected("numeric literal")),
        };
        Ok(self.finish_literal_type(start, lit))
    }

    fn parse_type_reference(&mut self) -> ParseResult<TsType> {
        let start = self.token_pos();
        let name = self.parse_entity_name(true)?;
        let type_args = self.parse_type_arguments_on_same_line()?;
        Ok(TsType::Ref(TsTypeRef {
            span: self.span_from(start),
            name,
            type_args,
        }))
    }

    fn parse_type_arguments_on_same_line(&mut self) -> ParseResult<Option<Vec<TsType>>> {
        if self.is_token(SyntaxKind::LessThanToken) && !self.has_preceding_line_break() {
            Ok(Some(self.parse_type_arguments()?))
        } else {
            Ok(None)
        }
    }

    fn parse_type_query(&mut self) -> ParseResult<TsType> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::TypeOfKeyword)?;
        let expr_name = if self.is_token(SyntaxKind::ImportKeyword) {
            TsTypeQueryExpr::Import(self.parse_import_type()?)
        } else {
            TsTypeQueryExpr::Entity(self.parse_entity_name(true)?)
        };
        let type_args = self.parse_type_arguments_on_same_line()?;
        Ok(TsType::Query(TsTypeQuery {
            span: self.span_from(start),
            expr_name,
            type_args,
        }))
    }

    fn parse_import_type(&mut self) -> ParseResult<TsImportType> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::ImportKeyword)?;
        self.parse_expected(SyntaxKind::OpenParenToken)?;
        let arg = self.parse_string_literal()?;
        self.parse_expected(SyntaxKind::CloseParenToken)?;
        let qualifier = if self.parse_optional(SyntaxKind::DotToken) {
            Some(self.parse_entity_name(true)?)
        } else {
            None
        };
        let type_args = self.parse_type_arguments_on_same_line()?;
        Ok(TsImportType {
            span: self.span_from(start),
            arg,
            qualifier,
            type_args,
        })
    }

    /// `A`, `A.B.C`; `this` is accepted as the first segment for `typeof this.x`.
    pub(crate) fn parse_entity_name(&mut self, allow_reserved_words: bool) -> ParseResult<TsEntityName> {
        let first = if self.is_token(SyntaxKind::ThisKeyword) {
            let start = self.token_pos();
            self.next_token();
            Ident::with_span("this", self.span_from(start))
        } else if allow_reserved_words {
            self.parse_identifier_name()?
        } else {
            self.parse_identifier()?
        };
        self.with_chain(|p| {
            let mut entity = TsEntityName::Ident(first);
            while p.is_token(SyntaxKind::DotToken) {
                p.enter_chain_link()?;
                p.next_token();
                let right = p.parse_identifier_name()?;
                entity = TsEntityName::Qualified(Box::new(TsQualifiedName {
                    left: entity,
                    right,
                }));
            }
            Ok(entity)
        })
    }

    /// Heritage clause entry: `Base<T>` in `extends`/`implements`.
    pub(crate) fn parse_expression_with_type_arguments(&mut self) -> ParseResult<TsExprWithTypeArgs> {
        let start = self.token_pos();
        let expr = self.parse_entity_name(false)?;
        let type_args = if self.is_token(SyntaxKind::LessThanToken) {
            Some(self.parse_type_arguments()?)
        } else {
            None
        };
        Ok(TsExprWithTypeArgs {
            span: self.span_from(start),
            expr,
            type_args,
        })
    }

    fn parse_tuple_type(&mut self) -> ParseResult<TsType> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBracketToken)?;
        let mut elems = Vec::new();
        while !self.is_token(SyntaxKind::CloseBracketToken) {
            elems.push(self.parse_tuple_element()?);
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBracketToken)?;
        Ok(TsType::Tuple(TsTupleType {
            span: self.span_from(start),
            elems,
        }))
    }

    fn is_tuple_label(&mut self) -> bool {
        self.look_ahead(|p| {
            p.parse_optional(SyntaxKind::DotDotDotToken);
            if !p.is_identifier_or_keyword() {
                return false;
            }
            p.next_token();
            p.parse_optional(SyntaxKind::QuestionToken);
            p.is_token(SyntaxKind::ColonToken)
        })
    }

    fn parse_tuple_element(&mut self) -> ParseResult<TsTupleElement> {
        let start = self.token_pos();
        if self.is_tuple_label() {
            let rest = self.parse_optional(SyntaxKind::DotDotDotToken);
            let name = self.parse_identifier_name()?;
            let optional = self.parse_optional(SyntaxKind::QuestionToken);
            self.parse_expected(SyntaxKind::ColonToken)?;
            let ty = self.parse_type()?;
            return Ok(TsTupleElement {
                span: self.span_from(start),
                label: Some(TsTupleLabel {
                    name,
                    optional,
                    rest,
                }),
                ty: Box::new(ty),
            });
        }

        let ty = if self.parse_optional(SyntaxKind::DotDotDotToken) {
            let type_ann = self.parse_type()?;
            TsType::Rest(TsRestType {
                span: self.span_from(start),
                type_ann: Box::new(type_ann),
            })
        } else {
            let ty = self.parse_type()?;
            if self.parse_optional(SyntaxKind::QuestionToken) {
                TsType::Optional(TsOptionalType {
                    span: self.span_from(start),
                    type_ann: Box::new(ty),
                })
            } else {
                ty
            }
        };
        Ok(TsTupleElement {
            span: self.span_from(start),
            label: None,
            ty: Box::new(ty),
        })
    }

    /// Called on `{`: `{ [K in T]: U }`, `{ readonly [K in T]: U }`, `{ -readonly [K in T]: U }`.
    fn is_start_of_mapped_type(&mut self) -> bool {
        self.next_token();
        if self.is_token(SyntaxKind::PlusToken) || self.is_token(SyntaxKind::MinusToken) {
            self.next_token();
            return self.is_token(SyntaxKind::ReadonlyKeyword);
        }
        if self.is_token(SyntaxKind::ReadonlyKeyword) {
            self.next_token();
        }
        if !self.parse_optional(SyntaxKind::OpenBracketToken) || !self.is_identifier() {
            return false;
        }
        self.next_token();
        self.is_token(SyntaxKind::InKeyword)
    }

    fn parse_plus_minus_modifier(&mut self, keyword: SyntaxKind) -> ParseResult<Option<TruePlusMinus>> {
        let modifier = match self.token() {
            SyntaxKind::PlusToken => TruePlusMinus::Plus,
            SyntaxKind::MinusToken => TruePlusMinus::Minus,
            kind if kind == keyword => {
                self.next_token();
                return Ok(Some(TruePlusMinus::True));
            }
            _ => return Ok(None),
        };
        self.next_token();
        self.parse_expected(keyword)?;
        Ok(Some(modifier))
    }

    fn parse_mapped_type(&mut self) -> ParseResult<TsType> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken)?;
        let readonly = self.parse_plus_minus_modifier(SyntaxKind::ReadonlyKeyword)?;
        self.parse_expected(SyntaxKind::OpenBracketToken)?;
        let param_start = self.token_pos();
        let name = self.parse_identifier()?;
        self.parse_expected(SyntaxKind::InKeyword)?;
        let constraint = self.parse_type()?;
        let type_param = TypeParam {
            span: self.span_from(param_start),
            name,
            is_const: false,
            is_in: false,
            is_out: false,
            constraint: Some(Box::new(constraint)),
            default: None,
        };
        let name_type = if self.parse_optional(SyntaxKind::AsKeyword) {
            Some(Box::new(self.parse_type()?))
        } else {
            None
        };
        self.parse_expected(SyntaxKind::CloseBracketToken)?;
        let optional = self.parse_plus_minus_modifier(SyntaxKind::QuestionToken)?;
        let type_ann = if self.parse_optional(SyntaxKind::ColonToken) {
            Some(Box::new(self.parse_type()?))
        } else {
            None
        };
        if !self.parse_optional(SyntaxKind::SemicolonToken) {
            self.parse_optional(SyntaxKind::CommaToken);
        }
        self.parse_expected(SyntaxKind::CloseBraceToken)?;
        Ok(TsType::Mapped(TsMappedType {
            span: self.span_from(start),
            readonly,
            type_param,
            name_type,
            optional,
            type_ann,
        }))
    }

    // =========================================================================
    // Type members
    // =========================================================================

    /// `{ member; member, member }` of interfaces and type literals.
    pub(crate) fn parse_object_type_members(&mut self) -> ParseResult<Vec<TsTypeElement>> {
        self.parse_expected(SyntaxKind::OpenBraceToken)?;
        let mut members = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken) {
            if self.is_token(SyntaxKind::EndOfFileToken) {
                return Err(self.error_expected("'}'"));
            }
            members.push(self.parse_type_member()?);
            if !self.parse_optional(SyntaxKind::SemicolonToken)
                && !self.parse_optional(SyntaxKind::CommaToken)
                && !self.is_token(SyntaxKind::CloseBraceToken)
                && !self.has_preceding_line_break()
            {
                return Err(self.error_expected("';'"));
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken)?;
        Ok(members)
    }

    fn parse_type_member(&mut self) -> ParseResult<TsTypeElement> {
        let start = self.token_pos();

        if self.is_token(SyntaxKind::OpenParenToken) || self.is_token(SyntaxKind::LessThanToken) {
            let type_params = self.parse_type_parameters()?;
            let params = self.parse_parameters()?;
            let return_type = self.parse_return_type_annotation()?;
            return Ok(TsTypeElement::Call(TsCallSignature {
                span: self.span_from(start),
                type_params,
                params,
                return_type,
            }));
        }

        if self.is_token(SyntaxKind::NewKeyword)
            && matches!(
                self.peek_token(),
                SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken
            )
        {
            self.next_token();
            let type_params = self.parse_type_parameters()?;
            let params = self.parse_parameters()?;
            let return_type = self.parse_return_type_annotation()?;
            return Ok(TsTypeElement::Construct(TsConstructSignature {
                span: self.span_from(start),
                type_params,
                params,
                return_type,
            }));
        }

        let readonly = self.is_token(SyntaxKind::ReadonlyKeyword)
            && self.next_is_property_name_start(false);
        if readonly {
            self.next_token();
        }

        if self.is_index_signature() {
            return Ok(TsTypeElement::Index(self.parse_index_signature(start, false, readonly)?));
        }

        if !readonly
            && (self.is_token(SyntaxKind::GetKeyword) || self.is_token(SyntaxKind::SetKeyword))
            && self.next_is_property_name_start(false)
        {
            let is_getter = self.is_token(SyntaxKind::GetKeyword);
            self.next_token();
            let key = self.parse_property_name()?;
            let mut params = self.parse_parameters()?;
            if is_getter {
                let return_type = self.parse_return_type_annotation()?;
                return Ok(TsTypeElement::Getter(TsGetterSignature {
                    span: self.span_from(start),
                    key,
                    return_type,
                }));
            }
            if params.len() != 1 {
                return Err(self.error(ParseErrorKind::Invalid(
                    "a set accessor must have exactly one parameter",
                )));
            }
            let param = params.remove(0);
            return Ok(TsTypeElement::Setter(TsSetterSignature {
                span: self.span_from(start),
                key,
                param,
            }));
        }

        let key = self.parse_property_name()?;
        let optional = self.parse_optional(SyntaxKind::QuestionToken);

        if self.is_token(SyntaxKind::OpenParenToken) || self.is_token(SyntaxKind::LessThanToken) {
            let type_params = self.parse_type_parameters()?;
            let params = self.parse_parameters()?;
            let return_type = self.parse_return_type_annotation()?;
            return Ok(TsTypeElement::Method(TsMethodSignature {
                span: self.span_from(start),
                key,
                optional,
                type_params,
                params,
                return_type,
            }));
        }

        let type_ann = if self.parse_optional(SyntaxKind::ColonToken) {
            Some(Box::new(self.parse_type()?))
        } else {
            None
        };
        Ok(TsTypeElement::Property(TsPropertySignature {
            span: self.span_from(start),
            readonly,
            key,
            optional,
            type_ann,
        }))
    }

    // =========================================================================
    // Type parameters and arguments
    // =========================================================================

    /// `<T, U extends X = Y>`; `None` when the current token is not `<`.
    pub(crate) fn parse_type_parameters(&mut self) -> ParseResult<Option<Vec<TypeParam>>> {
        if !self.is_token(SyntaxKind::LessThanToken) {
            return Ok(None);
        }
        self.next_token();
        let mut params = Vec::new();
        while !self.is_token(SyntaxKind::GreaterThanToken) {
            params.push(self.parse_type_parameter()?);
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected_greater_than()?;
        Ok(Some(params))
    }

    fn parse_type_parameter(&mut self) -> ParseResult<TypeParam> {
        let start = self.token_pos();
        let mut is_const = false;
        let mut is_in = false;
        let mut is_out = false;
        while matches!(
            self.token(),
            SyntaxKind::ConstKeyword | SyntaxKind::InKeyword | SyntaxKind::OutKeyword
        ) && self.look_ahead(|p| {
            p.next_token();
            p.is_identifier()
        }) {
            match self.token() {
                SyntaxKind::ConstKeyword => is_const = true,
                SyntaxKind::InKeyword => is_in = true,
                _ => is_out = true,
            }
            self.next_token();
        }
        let name = self.parse_identifier()?;
        let constraint = if self.parse_optional(SyntaxKind::ExtendsKeyword) {
            Some(Box::new(self.parse_type()?))
        } else {
            None
        };
        let default = if self.parse_optional(SyntaxKind::EqualsToken) {
            Some(Box::new(self.parse_type()?))
        } else {
            None
        };
        Ok(TypeParam {
            span: self.span_from(start),
            name,
            is_const,
            is_in,
            is_out,
            constraint,
            default,
        })
    }

    /// `<A, B>` at a call, `new`, type reference or heritage clause.
    pub(crate) fn parse_type_arguments(&mut self) -> ParseResult<Vec<TsType>> {
        self.parse_expected(SyntaxKind::LessThanToken)?;
        let mut args = Vec::new();
        while !self.is_token(SyntaxKind::GreaterThanToken) {
            args.push(self.parse_type()?);
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected_greater_than()?;
        Ok(args)
    }
}
