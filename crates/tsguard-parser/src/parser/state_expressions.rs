//! Parser state - expression, pattern and parameter parsing methods

use super::state::{CONTEXT_FLAG_DISALLOW_IN, CONTEXT_FLAG_GENERATOR, ParserState};
use crate::ast::*;
use crate::error::{ParseErrorKind, ParseResult};
use tsguard_common::Span;
use tsguard_scanner::{SyntaxKind, parse_numeric_literal};

impl ParserState {
    // =========================================================================
    // Parse Methods - Expressions
    // =========================================================================

    /// Parse an expression (including comma operator)
    pub fn parse_expression(&mut self) -> ParseResult<Expr> {
        let start = self.token_pos();
        let first = self.parse_assignment_expression()?;
        if !self.is_token(SyntaxKind::CommaToken) {
            return Ok(first);
        }
        let mut exprs = vec![first];
        while self.parse_optional(SyntaxKind::CommaToken) {
            exprs.push(self.parse_assignment_expression()?);
        }
        Ok(Expr::Seq(SeqExpr {
            span: self.span_from(start),
            exprs,
        }))
    }

    /// Expression parsed with `in` allowed again (brackets, parentheses, arguments).
    fn parse_expression_allow_in(&mut self) -> ParseResult<Expr> {
        self.with_context(CONTEXT_FLAG_DISALLOW_IN, false, |p| p.parse_expression())
    }

    fn parse_assignment_expression_allow_in(&mut self) -> ParseResult<Expr> {
        self.with_context(CONTEXT_FLAG_DISALLOW_IN, false, |p| {
            p.parse_assignment_expression()
        })
    }

    /// Parse assignment expression (arrow, yield, conditional or assignment)
    pub(crate) fn parse_assignment_expression(&mut self) -> ParseResult<Expr> {
        self.enter_recursion()?;
        let result = self.parse_assignment_expression_worker();
        self.exit_recursion();
        result
    }

    fn parse_assignment_expression_worker(&mut self) -> ParseResult<Expr> {
        if self.is_token(SyntaxKind::YieldKeyword) && self.in_context(CONTEXT_FLAG_GENERATOR) {
            return self.parse_yield_expression();
        }
        if let Some(arrow) = self.try_parse_arrow_function()? {
            return Ok(arrow);
        }

        let start = self.token_pos();
        let expr = self.parse_binary_expression(0)?;

        if let Some(op) = assign_op(self.token()) {
            if !is_valid_assignment_target(&expr, op) {
                return Err(self.error(ParseErrorKind::Invalid(
                    "invalid left-hand side in assignment",
                )));
            }
            self.next_token();
            let right = self.parse_assignment_expression()?;
            return Ok(Expr::Assign(AssignExpr {
                span: self.span_from(start),
                op,
                left: Box::new(expr),
                right: Box::new(right),
            }));
        }

        if self.parse_optional(SyntaxKind::QuestionToken) {
            let cons = self.parse_assignment_expression_allow_in()?;
            self.parse_expected(SyntaxKind::ColonToken)?;
            let alt = self.parse_assignment_expression()?;
            return Ok(Expr::Cond(CondExpr {
                span: self.span_from(start),
                test: Box::new(expr),
                cons: Box::new(cons),
                alt: Box::new(alt),
            }));
        }

        Ok(expr)
    }

    fn parse_yield_expression(&mut self) -> ParseResult<Expr> {
        let start = self.token_pos();
        self.next_token();
        let delegate = !self.has_preceding_line_break() && self.parse_optional(SyntaxKind::AsteriskToken);
        let arg = if delegate || (!self.has_preceding_line_break() && self.is_start_of_expression()) {
            Some(Box::new(self.parse_assignment_expression()?))
        } else {
            None
        };
        Ok(Expr::Yield(YieldExpr {
            span: self.span_from(start),
            arg,
            delegate,
        }))
    }

    pub(crate) fn is_start_of_expression(&self) -> bool {
        !matches!(
            self.token(),
            SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBracketToken
                | SyntaxKind::CloseBraceToken
                | SyntaxKind::CommaToken
                | SyntaxKind::SemicolonToken
                | SyntaxKind::ColonToken
                | SyntaxKind::EndOfFileToken
                | SyntaxKind::EqualsGreaterThanToken
        ) && !self.token().is_assignment_operator()
    }

    // =========================================================================
    // Arrow functions
    // =========================================================================

    /// Arrow functions are recognized speculatively: the head (type parameters,
    /// parameters, return type) must parse and be followed by `=>` on the same line.
    fn try_parse_arrow_function(&mut self) -> ParseResult<Option<Expr>> {
        let start = self.token_pos();
        let token = self.token();

        // `x => ...` and `async => ...`
        if token.is_identifier_like() && self.peek_token() == SyntaxKind::EqualsGreaterThanToken {
            let param = self.parse_identifier()?;
            return self
                .parse_arrow_body_after_head(
                    start,
                    false,
                    None,
                    vec![Pat::Ident(BindingIdent {
                        id: param,
                        optional: false,
                        type_ann: None,
                    })],
                    None,
                )
                .map(Some);
        }

        let is_async = token == SyntaxKind::AsyncKeyword
            && self.look_ahead(|p| {
                p.next_token();
                !p.has_preceding_line_break()
                    && (p.is_identifier()
                        || p.is_token(SyntaxKind::OpenParenToken)
                        || p.is_token(SyntaxKind::LessThanToken))
            });

        if !is_async && token != SyntaxKind::OpenParenToken && token != SyntaxKind::LessThanToken {
            return Ok(None);
        }

        let head = self.try_parse(|p| {
            if is_async {
                p.next_token();
            }
            // `async x => ...`
            if is_async && p.is_identifier() {
                let param = p.parse_identifier()?;
                p.expect_arrow()?;
                return Ok((
                    None,
                    vec![Pat::Ident(BindingIdent {
                        id: param,
                        optional: false,
                        type_ann: None,
                    })],
                    None,
                ));
            }
            let type_params = p.parse_type_parameters()?;
            let params = p.parse_parameters()?;
            let return_type = p.parse_return_type_annotation()?;
            p.expect_arrow()?;
            let params = params.into_iter().map(|param| param.pat).collect::<Vec<_>>();
            Ok((type_params, params, return_type))
        });

        match head {
            Some((type_params, params, return_type)) => self
                .parse_arrow_body_after_head(start, is_async, type_params, params, return_type)
                .map(Some),
            None => Ok(None),
        }
    }

    fn expect_arrow(&mut self) -> ParseResult<()> {
        if self.is_token(SyntaxKind::EqualsGreaterThanToken) && !self.has_preceding_line_break() {
            Ok(())
        } else {
            Err(self.error_expected("'=>'"))
        }
    }

    fn parse_arrow_body_after_head(
        &mut self,
        start: u32,
        is_async: bool,
        type_params: Option<Vec<TypeParam>>,
        params: Vec<Pat>,
        return_type: Option<Box<TsType>>,
    ) -> ParseResult<Expr> {
        self.parse_expected(SyntaxKind::EqualsGreaterThanToken)?;
        let body = if self.is_token(SyntaxKind::OpenBraceToken) {
            ArrowBody::Block(self.parse_function_block(false)?)
        } else {
            let expr = self.with_context(CONTEXT_FLAG_GENERATOR, false, |p| {
                p.parse_assignment_expression()
            })?;
            ArrowBody::Expr(Box::new(expr))
        };
        Ok(Expr::Arrow(ArrowExpr {
            span: self.span_from(start),
            is_async,
            type_params,
            params,
            return_type,
            body,
        }))
    }

    // =========================================================================
    // Binary and unary expressions
    // =========================================================================

    fn binary_operator(&self) -> Option<BinaryOp> {
        let op = match self.token() {
            SyntaxKind::QuestionQuestionToken => BinaryOp::NullishCoalescing,
            SyntaxKind::BarBarToken => BinaryOp::LogicalOr,
            SyntaxKind::AmpersandAmpersandToken => BinaryOp::LogicalAnd,
            SyntaxKind::BarToken => BinaryOp::BitOr,
            SyntaxKind::CaretToken => BinaryOp::BitXor,
            SyntaxKind::AmpersandToken => BinaryOp::BitAnd,
            SyntaxKind::EqualsEqualsToken => BinaryOp::EqEq,
            SyntaxKind::ExclamationEqualsToken => BinaryOp::NotEq,
            SyntaxKind::EqualsEqualsEqualsToken => BinaryOp::EqEqEq,
            SyntaxKind::ExclamationEqualsEqualsToken => BinaryOp::NotEqEq,
            SyntaxKind::LessThanToken => BinaryOp::Lt,
            SyntaxKind::LessThanEqualsToken => BinaryOp::LtEq,
            SyntaxKind::GreaterThanToken => BinaryOp::Gt,
            SyntaxKind::GreaterThanEqualsToken => BinaryOp::GtEq,
            SyntaxKind::InKeyword if !self.in_context(CONTEXT_FLAG_DISALLOW_IN) => BinaryOp::In,
            SyntaxKind::InstanceOfKeyword => BinaryOp::InstanceOf,
            SyntaxKind::LessThanLessThanToken => BinaryOp::LShift,
            SyntaxKind::GreaterThanGreaterThanToken => BinaryOp::RShift,
            SyntaxKind::GreaterThanGreaterThanGreaterThanToken => BinaryOp::ZeroFillRShift,
            SyntaxKind::PlusToken => BinaryOp::Add,
            SyntaxKind::MinusToken => BinaryOp::Sub,
            SyntaxKind::AsteriskToken => BinaryOp::Mul,
            SyntaxKind::SlashToken => BinaryOp::Div,
            SyntaxKind::PercentToken => BinaryOp::Mod,
            SyntaxKind::AsteriskAsteriskToken => BinaryOp::Exp,
            _ => return None,
        };
        Some(op)
    }

    /// Parse binary expression with precedence climbing. Consumes operators that bind
    /// tighter than `min_precedence`.
    pub(crate) fn parse_binary_expression(&mut self, min_precedence: u8) -> ParseResult<Expr> {
        self.with_chain(|p| p.parse_binary_expression_worker(min_precedence))
    }

    fn parse_binary_expression_worker(&mut self, min_precedence: u8) -> ParseResult<Expr> {
        let start = self.token_pos();
        let mut left = self.parse_unary_expression()?;

        loop {
            // `>` is scanned alone; merge it into `>>`, `>=`, `>>>=`, ... here.
            if self.is_token(SyntaxKind::GreaterThanToken) {
                self.current_token = self.scanner.re_scan_greater_token();
            }

            if (self.is_token(SyntaxKind::AsKeyword) || self.is_token(SyntaxKind::SatisfiesKeyword))
                && !self.has_preceding_line_break()
            {
                if TS_AS_PRECEDENCE <= min_precedence {
                    break;
                }
                self.enter_chain_link()?;
                left = self.parse_as_or_satisfies_expression(left, start)?;
                continue;
            }

            let Some(op) = self.binary_operator() else {
                break;
            };
            let precedence = op.precedence();
            if precedence <= min_precedence {
                break;
            }
            self.enter_chain_link()?;
            self.next_token();
            let next_min = if op.is_right_associative() {
                precedence - 1
            } else {
                precedence
            };
            let right = self.parse_binary_expression(next_min)?;
            left = Expr::Bin(BinExpr {
                span: self.span_from(start),
                op,
                left: Box::new(left),
                right: Box::new(right),
            });
        }

        Ok(left)
    }

    /// Parse as/satisfies expression: expr as Type, expr satisfies Type
    /// Also handles const assertion: expr as const
    fn parse_as_or_satisfies_expression(&mut self, expr: Expr, start: u32) -> ParseResult<Expr> {
        let is_satisfies = self.is_token(SyntaxKind::SatisfiesKeyword);
        self.next_token();
        if !is_satisfies && self.is_token(SyntaxKind::ConstKeyword) {
            self.next_token();
            return Ok(Expr::TsConstAssertion(TsConstAssertion {
                span: self.span_from(start),
                expr: Box::new(expr),
            }));
        }
        let type_ann = Box::new(self.parse_type()?);
        let span = self.span_from(start);
        Ok(if is_satisfies {
            Expr::TsSatisfies(TsSatisfiesExpr {
                span,
                expr: Box::new(expr),
                type_ann,
            })
        } else {
            Expr::TsAs(TsAsExpr {
                span,
                expr: Box::new(expr),
                type_ann,
            })
        })
    }

    /// Parse unary expression
    pub(crate) fn parse_unary_expression(&mut self) -> ParseResult<Expr> {
        self.enter_recursion()?;
        let result = self.parse_unary_expression_worker();
        self.exit_recursion();
        result
    }

    fn parse_unary_expression_worker(&mut self) -> ParseResult<Expr> {
        let start = self.token_pos();
        let unary_op = match self.token() {
            SyntaxKind::MinusToken => Some(UnaryOp::Minus),
            SyntaxKind::PlusToken => Some(UnaryOp::Plus),
            SyntaxKind::ExclamationToken => Some(UnaryOp::Bang),
            SyntaxKind::TildeToken => Some(UnaryOp::Tilde),
            SyntaxKind::TypeOfKeyword => Some(UnaryOp::TypeOf),
            SyntaxKind::VoidKeyword => Some(UnaryOp::Void),
            SyntaxKind::DeleteKeyword => Some(UnaryOp::Delete),
            _ => None,
        };
        if let Some(op) = unary_op {
            self.next_token();
            let arg = self.parse_unary_expression()?;
            return Ok(Expr::Unary(UnaryExpr {
                span: self.span_from(start),
                op,
                arg: Box::new(arg),
            }));
        }

        match self.token() {
            SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken => {
                let op = if self.is_token(SyntaxKind::PlusPlusToken) {
                    UpdateOp::PlusPlus
                } else {
                    UpdateOp::MinusMinus
                };
                self.next_token();
                let arg = self.parse_unary_expression()?;
                Ok(Expr::Update(UpdateExpr {
                    span: self.span_from(start),
                    op,
                    prefix: true,
                    arg: Box::new(arg),
                }))
            }
            SyntaxKind::AwaitKeyword => {
                self.next_token();
                let arg = self.parse_unary_expression()?;
                Ok(Expr::Await(AwaitExpr {
                    span: self.span_from(start),
                    arg: Box::new(arg),
                }))
            }
            SyntaxKind::LessThanToken => Err(self.error(ParseErrorKind::Invalid(
                "angle-bracket type assertions are not supported; use 'as'",
            ))),
            _ => self.parse_postfix_expression(),
        }
    }

    fn parse_postfix_expression(&mut self) -> ParseResult<Expr> {
        let start = self.token_pos();
        let expr = self.parse_left_hand_side_expression()?;
        if (self.is_token(SyntaxKind::PlusPlusToken) || self.is_token(SyntaxKind::MinusMinusToken))
            && !self.has_preceding_line_break()
        {
            let op = if self.is_token(SyntaxKind::PlusPlusToken) {
                UpdateOp::PlusPlus
            } else {
                UpdateOp::MinusMinus
            };
            self.next_token();
            return Ok(Expr::Update(UpdateExpr {
                span: self.span_from(start),
                op,
                prefix: false,
                arg: Box::new(expr),
            }));
        }
        Ok(expr)
    }

    // =========================================================================
    // Member access and calls
    // =========================================================================

    pub(crate) fn parse_left_hand_side_expression(&mut self) -> ParseResult<Expr> {
        let start = self.token_pos();
        let expr = match self.token() {
            SyntaxKind::NewKeyword => self.parse_new_expression()?,
            SyntaxKind::SuperKeyword => {
                self.next_token();
                Expr::Super(self.span_from(start))
            }
            SyntaxKind::ImportKeyword => {
                self.next_token();
                if self.parse_optional(SyntaxKind::DotToken) {
                    let name = self.parse_identifier_name()?;
                    if name.sym != "meta" {
                        return Err(self.error_expected("'meta'"));
                    }
                    Expr::MetaProp(MetaPropExpr {
                        span: self.span_from(start),
                        kind: MetaPropKind::ImportMeta,
                    })
                } else if self.is_token(SyntaxKind::OpenParenToken) {
                    Expr::Import(self.span_from(start))
                } else {
                    return Err(self.error_expected("'('"));
                }
            }
            _ => self.parse_primary_expression()?,
        };
        self.parse_member_and_call_rest(start, expr, true)
    }

    /// Member accesses, calls, non-null assertions and tagged templates following an
    /// expression. With `allow_calls` false (a `new` callee) argument lists end the chain.
    fn parse_member_and_call_rest(
        &mut self,
        start: u32,
        expr: Expr,
        allow_calls: bool,
    ) -> ParseResult<Expr> {
        self.with_chain(|p| p.parse_member_and_call_chain(start, expr, allow_calls))
    }

    fn parse_member_and_call_chain(
        &mut self,
        start: u32,
        mut expr: Expr,
        allow_calls: bool,
    ) -> ParseResult<Expr> {
        loop {
            match self.token() {
                SyntaxKind::DotToken => {
                    self.enter_chain_link()?;
                    self.next_token();
                    let prop = self.parse_member_name()?;
                    expr = Expr::Member(MemberExpr {
                        span: self.span_from(start),
                        obj: Box::new(expr),
                        prop,
                        optional: false,
                    });
                }
                SyntaxKind::QuestionDotToken if allow_calls => {
                    self.enter_chain_link()?;
                    self.next_token();
                    expr = match self.token() {
                        SyntaxKind::OpenParenToken => {
                            let args = self.parse_arguments()?;
                            Expr::Call(CallExpr {
                                span: self.span_from(start),
                                callee: Box::new(expr),
                                type_args: None,
                                args,
                                optional: true,
                            })
                        }
                        SyntaxKind::LessThanToken => {
                            let type_args = self.parse_type_arguments()?;
                            let args = self.parse_arguments()?;
                            Expr::Call(CallExpr {
                                span: self.span_from(start),
                                callee: Box::new(expr),
                                type_args: Some(type_args),
                                args,
                                optional: true,
                            })
                        }
                        SyntaxKind::OpenBracketToken => {
                            self.next_token();
                            let index = self.parse_expression_allow_in()?;
                            self.parse_expected(SyntaxKind::CloseBracketToken)?;
                            Expr::Member(MemberExpr {
                                span: self.span_from(start),
                                obj: Box::new(expr),
                                prop: MemberProp::Computed(Box::new(index)),
                                optional: true,
                            })
                        }
                        _ => {
                            let prop = self.parse_member_name()?;
                            Expr::Member(MemberExpr {
                                span: self.span_from(start),
                                obj: Box::new(expr),
                                prop,
                                optional: true,
                            })
                        }
                    };
                }
                SyntaxKind::OpenBracketToken => {
                    self.enter_chain_link()?;
                    self.next_token();
                    let index = self.parse_expression_allow_in()?;
                    self.parse_expected(SyntaxKind::CloseBracketToken)?;
                    expr = Expr::Member(MemberExpr {
                        span: self.span_from(start),
                        obj: Box::new(expr),
                        prop: MemberProp::Computed(Box::new(index)),
                        optional: false,
                    });
                }
                SyntaxKind::ExclamationToken if !self.has_preceding_line_break() => {
                    self.enter_chain_link()?;
                    self.next_token();
                    expr = Expr::TsNonNull(TsNonNullExpr {
                        span: self.span_from(start),
                        expr: Box::new(expr),
                    });
                }
                SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead => {
                    self.enter_chain_link()?;
                    let tpl = self.parse_template_literal()?;
                    expr = Expr::TaggedTpl(TaggedTpl {
                        span: self.span_from(start),
                        tag: Box::new(expr),
                        type_args: None,
                        tpl,
                    });
                }
                SyntaxKind::OpenParenToken if allow_calls => {
                    self.enter_chain_link()?;
                    let args = self.parse_arguments()?;
                    expr = Expr::Call(CallExpr {
                        span: self.span_from(start),
                        callee: Box::new(expr),
                        type_args: None,
                        args,
                        optional: false,
                    });
                }
                SyntaxKind::LessThanToken if allow_calls => {
                    let Some(type_args) = self.try_parse(|p| {
                        let args = p.parse_type_arguments()?;
                        if matches!(
                            p.token(),
                            SyntaxKind::OpenParenToken
                                | SyntaxKind::NoSubstitutionTemplateLiteral
                                | SyntaxKind::TemplateHead
                        ) {
                            Ok(args)
                        } else {
                            Err(p.error_expected("'('"))
                        }
                    }) else {
                        break;
                    };
                    self.enter_chain_link()?;
                    expr = if self.is_token(SyntaxKind::OpenParenToken) {
                        let args = self.parse_arguments()?;
                        Expr::Call(CallExpr {
                            span: self.span_from(start),
                            callee: Box::new(expr),
                            type_args: Some(type_args),
                            args,
                            optional: false,
                        })
                    } else {
                        let tpl = self.parse_template_literal()?;
                        Expr::TaggedTpl(TaggedTpl {
                            span: self.span_from(start),
                            tag: Box::new(expr),
                            type_args: Some(type_args),
                            tpl,
                        })
                    };
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    fn parse_member_name(&mut self) -> ParseResult<MemberProp> {
        if self.is_token(SyntaxKind::PrivateIdentifier) {
            Ok(MemberProp::PrivateName(self.parse_private_identifier()?))
        } else {
            Ok(MemberProp::Ident(self.parse_identifier_name()?))
        }
    }

    fn parse_new_expression(&mut self) -> ParseResult<Expr> {
        self.enter_recursion()?;
        let result = self.parse_new_expression_worker();
        self.exit_recursion();
        result
    }

    fn parse_new_expression_worker(&mut self) -> ParseResult<Expr> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::NewKeyword)?;
        if self.parse_optional(SyntaxKind::DotToken) {
            let name = self.parse_identifier_name()?;
            if name.sym != "target" {
                return Err(self.error_expected("'target'"));
            }
            return Ok(Expr::MetaProp(MetaPropExpr {
                span: self.span_from(start),
                kind: MetaPropKind::NewTarget,
            }));
        }

        let callee_start = self.token_pos();
        let callee = if self.is_token(SyntaxKind::NewKeyword) {
            self.parse_new_expression()?
        } else {
            self.parse_primary_expression()?
        };
        let callee = self.parse_member_and_call_rest(callee_start, callee, false)?;

        let type_args = if self.is_token(SyntaxKind::LessThanToken) {
            self.try_parse(|p| {
                let args = p.parse_type_arguments()?;
                if p.can_follow_type_arguments_in_new() {
                    Ok(args)
                } else {
                    Err(p.error_expected("'('"))
                }
            })
        } else {
            None
        };
        let args = if self.is_token(SyntaxKind::OpenParenToken) {
            Some(self.parse_arguments()?)
        } else {
            None
        };
        Ok(Expr::New(NewExpr {
            span: self.span_from(start),
            callee: Box::new(callee),
            type_args,
            args,
        }))
    }

    /// `new Map<string, number>` may omit the argument list.
    fn can_follow_type_arguments_in_new(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::OpenParenToken
                | SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBracketToken
                | SyntaxKind::CloseBraceToken
                | SyntaxKind::SemicolonToken
                | SyntaxKind::CommaToken
                | SyntaxKind::ColonToken
                | SyntaxKind::DotToken
                | SyntaxKind::EndOfFileToken
        ) || (self.has_preceding_line_break() && !self.is_token(SyntaxKind::OpenBracketToken))
    }

    pub(crate) fn parse_arguments(&mut self) -> ParseResult<Vec<ExprOrSpread>> {
        self.parse_expected(SyntaxKind::OpenParenToken)?;
        let mut args = Vec::new();
        while !self.is_token(SyntaxKind::CloseParenToken) {
            let spread = self.parse_optional(SyntaxKind::DotDotDotToken);
            let expr = self.parse_assignment_expression_allow_in()?;
            args.push(ExprOrSpread {
                spread,
                expr: Box::new(expr),
            });
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseParenToken)?;
        Ok(args)
    }

    // =========================================================================
    // Primary expressions
    // =========================================================================

    pub(crate) fn parse_primary_expression(&mut self) -> ParseResult<Expr> {
        let start = self.token_pos();
        match self.token() {
            SyntaxKind::ThisKeyword => {
                self.next_token();
                Ok(Expr::This(self.span_from(start)))
            }
            SyntaxKind::NullKeyword => {
                self.next_token();
                Ok(Expr::Lit(Lit::Null(self.span_from(start))))
            }
            SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword => {
                let value = self.is_token(SyntaxKind::TrueKeyword);
                self.next_token();
                Ok(Expr::Lit(Lit::Bool(Bool {
                    span: self.span_from(start),
                    value,
                })))
            }
            SyntaxKind::NumericLiteral => Ok(Expr::Lit(Lit::Num(self.parse_numeric_literal()?))),
            SyntaxKind::BigIntLiteral => Ok(Expr::Lit(Lit::BigInt(self.parse_bigint_literal()?))),
            SyntaxKind::StringLiteral => Ok(Expr::Lit(Lit::Str(self.parse_string_literal()?))),
            SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead => {
                Ok(Expr::Tpl(self.parse_template_literal()?))
            }
            SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken => self.parse_regex_literal(),
            SyntaxKind::OpenParenToken => {
                self.next_token();
                let expr = self.parse_expression_allow_in()?;
                self.parse_expected(SyntaxKind::CloseParenToken)?;
                Ok(Expr::Paren(ParenExpr {
                    span: self.span_from(start),
                    expr: Box::new(expr),
                }))
            }
            SyntaxKind::OpenBracketToken => self.parse_array_literal(),
            SyntaxKind::OpenBraceToken => self.parse_object_literal(),
            SyntaxKind::FunctionKeyword => self.parse_function_expression(start, false),
            SyntaxKind::AsyncKeyword
                if self.look_ahead(|p| {
                    p.next_token();
                    p.is_token(SyntaxKind::FunctionKeyword) && !p.has_preceding_line_break()
                }) =>
            {
                self.next_token();
                self.parse_function_expression(start, true)
            }
            SyntaxKind::ClassKeyword => {
                let (ident, class) = self.parse_class(start)?;
                Ok(Expr::Class(ClassExpr { ident, class }))
            }
            SyntaxKind::NewKeyword => self.parse_new_expression(),
            _ if self.is_identifier() => Ok(Expr::Ident(self.parse_identifier()?)),
            _ => Err(self.error_expected("expression")),
        }
    }

    fn parse_function_expression(&mut self, start: u32, is_async: bool) -> ParseResult<Expr> {
        let (ident, function) = self.parse_function_declaration_or_expression(start, is_async)?;
        if function.body.is_none() {
            return Err(self.error_expected("'{'"));
        }
        Ok(Expr::Fn(FnExpr { ident, function }))
    }

    pub(crate) fn parse_numeric_literal(&mut self) -> ParseResult<Number> {
        let start = self.token_pos();
        let raw = self.token_value().to_string();
        let value = parse_numeric_literal(&raw).ok_or_else(|| self.error_unexpected())?;
        self.next_token();
        Ok(Number {
            span: self.span_from(start),
            value,
            raw: Some(raw),
        })
    }

    pub(crate) fn parse_bigint_literal(&mut self) -> ParseResult<BigInt> {
        let start = self.token_pos();
        let raw = self.token_value().to_string();
        let value = raw.trim_end_matches('n').replace('_', "");
        self.next_token();
        Ok(BigInt {
            span: self.span_from(start),
            value,
            raw: Some(raw),
        })
    }

    fn parse_regex_literal(&mut self) -> ParseResult<Expr> {
        let start = self.token_pos();
        self.current_token = self.scanner.re_scan_slash_token();
        if self.scanner.is_unterminated() {
            return Err(self.error(ParseErrorKind::Unterminated("regular expression")));
        }
        let raw = self.token_value().to_string();
        self.next_token();
        Ok(Expr::Lit(Lit::Regex(Regex {
            span: self.span_from(start),
            raw,
        })))
    }

    /// Current template segment, checked for termination.
    fn template_element(&self) -> ParseResult<TplElement> {
        if self.scanner.is_unterminated() {
            return Err(self.error(ParseErrorKind::Unterminated("template literal")));
        }
        Ok(TplElement {
            span: Span::new(self.token_pos(), self.token_end()),
            raw: self.token_value().to_string(),
        })
    }

    /// Template literal parts: `quasis` around substitutions parsed by `parse_part`.
    pub(crate) fn parse_template_parts<T>(
        &mut self,
        mut parse_part: impl FnMut(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<(Vec<TplElement>, Vec<T>)> {
        let mut quasis = vec![self.template_element()?];
        let mut parts = Vec::new();
        if self.is_token(SyntaxKind::NoSubstitutionTemplateLiteral) {
            self.next_token();
            return Ok((quasis, parts));
        }
        if !self.is_token(SyntaxKind::TemplateHead) {
            return Err(self.error_expected("template literal"));
        }
        loop {
            self.next_token();
            parts.push(parse_part(self)?);
            if !self.is_token(SyntaxKind::CloseBraceToken) {
                return Err(self.error_expected("'}'"));
            }
            self.current_token = self.scanner.re_scan_template_token();
            quasis.push(self.template_element()?);
            if self.is_token(SyntaxKind::TemplateTail) {
                self.next_token();
                return Ok((quasis, parts));
            }
        }
    }

    pub(crate) fn parse_template_literal(&mut self) -> ParseResult<Tpl> {
        let start = self.token_pos();
        let (quasis, exprs) = self.parse_template_parts(|p| p.parse_expression_allow_in())?;
        Ok(Tpl {
            span: self.span_from(start),
            exprs,
            quasis,
        })
    }

    fn parse_array_literal(&mut self) -> ParseResult<Expr> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBracketToken)?;
        let mut elems = Vec::new();
        while !self.is_token(SyntaxKind::CloseBracketToken) {
            if self.parse_optional(SyntaxKind::CommaToken) {
                elems.push(None);
                continue;
            }
            let spread = self.parse_optional(SyntaxKind::DotDotDotToken);
            let expr = self.parse_assignment_expression_allow_in()?;
            elems.push(Some(ExprOrSpread {
                spread,
                expr: Box::new(expr),
            }));
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBracketToken)?;
        Ok(Expr::Array(ArrayLit {
            span: self.span_from(start),
            elems,
        }))
    }

    pub(crate) fn parse_object_literal(&mut self) -> ParseResult<Expr> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken)?;
        let mut props = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken) {
            props.push(self.parse_object_literal_element()?);
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken)?;
        Ok(Expr::Object(ObjectLit {
            span: self.span_from(start),
            props,
        }))
    }

    pub(crate) fn is_property_name_start(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::Identifier
                | SyntaxKind::StringLiteral
                | SyntaxKind::NumericLiteral
                | SyntaxKind::BigIntLiteral
                | SyntaxKind::OpenBracketToken
                | SyntaxKind::PrivateIdentifier
        ) || kind.is_keyword()
    }

    /// `get`/`set`/`async` act as modifiers only when a property name follows.
    pub(crate) fn next_is_property_name_start(&mut self, same_line: bool) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            (!same_line || !p.has_preceding_line_break())
                && (Self::is_property_name_start(p.token()) || p.is_token(SyntaxKind::AsteriskToken))
        })
    }

    fn parse_object_literal_element(&mut self) -> ParseResult<Prop> {
        let start = self.token_pos();
        if self.parse_optional(SyntaxKind::DotDotDotToken) {
            return Ok(Prop::Spread(Box::new(self.parse_assignment_expression_allow_in()?)));
        }

        let mut kind = MethodKind::Method;
        let mut is_async = false;
        if (self.is_token(SyntaxKind::GetKeyword) || self.is_token(SyntaxKind::SetKeyword))
            && self.next_is_property_name_start(false)
        {
            kind = if self.is_token(SyntaxKind::GetKeyword) {
                MethodKind::Getter
            } else {
                MethodKind::Setter
            };
            self.next_token();
        } else if self.is_token(SyntaxKind::AsyncKeyword) && self.next_is_property_name_start(true) {
            is_async = true;
            self.next_token();
        }
        let is_generator = self.parse_optional(SyntaxKind::AsteriskToken);
        let is_accessor_or_modified = kind != MethodKind::Method || is_async || is_generator;

        let key = self.parse_property_name()?;

        if is_accessor_or_modified
            || self.is_token(SyntaxKind::OpenParenToken)
            || self.is_token(SyntaxKind::LessThanToken)
        {
            let function = self.parse_function_rest(start, is_async, is_generator)?;
            if function.body.is_none() {
                return Err(self.error_expected("'{'"));
            }
            return Ok(Prop::Method {
                key,
                kind,
                function,
            });
        }

        if self.parse_optional(SyntaxKind::ColonToken) {
            let value = self.parse_assignment_expression_allow_in()?;
            return Ok(Prop::KeyValue {
                key,
                value: Box::new(value),
            });
        }

        match key {
            PropName::Ident(ident) => {
                if self.parse_optional(SyntaxKind::EqualsToken) {
                    let value = self.parse_assignment_expression_allow_in()?;
                    Ok(Prop::Assign {
                        key: ident,
                        value: Box::new(value),
                    })
                } else {
                    Ok(Prop::Shorthand(ident))
                }
            }
            _ => Err(self.error_expected("':'")),
        }
    }

    pub(crate) fn parse_property_name(&mut self) -> ParseResult<PropName> {
        match self.token() {
            SyntaxKind::StringLiteral => Ok(PropName::Str(self.parse_string_literal()?)),
            SyntaxKind::NumericLiteral => Ok(PropName::Num(self.parse_numeric_literal()?)),
            SyntaxKind::BigIntLiteral => Ok(PropName::BigInt(self.parse_bigint_literal()?)),
            SyntaxKind::PrivateIdentifier => Ok(PropName::Private(self.parse_private_identifier()?)),
            SyntaxKind::OpenBracketToken => {
                let start = self.token_pos();
                self.next_token();
                let expr = self.parse_assignment_expression_allow_in()?;
                self.parse_expected(SyntaxKind::CloseBracketToken)?;
                Ok(PropName::Computed(ComputedPropName {
                    span: self.span_from(start),
                    expr: Box::new(expr),
                }))
            }
            _ => Ok(PropName::Ident(self.parse_identifier_name()?)),
        }
    }

    // =========================================================================
    // Binding patterns and parameters
    // =========================================================================

    /// Binding identifier or destructuring pattern, without annotation or initializer.
    pub(crate) fn parse_binding_name(&mut self) -> ParseResult<Pat> {
        match self.token() {
            SyntaxKind::OpenBracketToken => self.parse_array_binding_pattern(),
            SyntaxKind::OpenBraceToken => self.parse_object_binding_pattern(),
            _ => Ok(Pat::Ident(BindingIdent {
                id: self.parse_identifier()?,
                optional: false,
                type_ann: None,
            })),
        }
    }

    /// Parse an optional `: Type` and attach it to the pattern.
    pub(crate) fn attach_type_annotation(&mut self, mut pat: Pat) -> ParseResult<Pat> {
        if !self.parse_optional(SyntaxKind::ColonToken) {
            return Ok(pat);
        }
        let ty = Some(Box::new(self.parse_type()?));
        match &mut pat {
            Pat::Ident(binding) => binding.type_ann = ty,
            Pat::Array(array) => array.type_ann = ty,
            Pat::Object(object) => object.type_ann = ty,
            Pat::Rest(rest) => rest.type_ann = ty,
            Pat::Assign(_) => return Err(self.error_unexpected()),
        }
        Ok(pat)
    }

    pub(crate) fn parse_binding_element_with_annotation(&mut self) -> ParseResult<Pat> {
        let pat = self.parse_binding_name()?;
        self.attach_type_annotation(pat)
    }

    /// Binding name with an optional default value.
    fn parse_binding_element(&mut self) -> ParseResult<Pat> {
        let start = self.token_pos();
        let pat = self.parse_binding_name()?;
        self.parse_pattern_initializer(start, pat)
    }

    fn parse_pattern_initializer(&mut self, start: u32, pat: Pat) -> ParseResult<Pat> {
        if !self.parse_optional(SyntaxKind::EqualsToken) {
            return Ok(pat);
        }
        let right = self.parse_assignment_expression_allow_in()?;
        Ok(Pat::Assign(AssignPat {
            span: self.span_from(start),
            left: Box::new(pat),
            right: Box::new(right),
        }))
    }

    fn parse_array_binding_pattern(&mut self) -> ParseResult<Pat> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBracketToken)?;
        let mut elems = Vec::new();
        while !self.is_token(SyntaxKind::CloseBracketToken) {
            if self.parse_optional(SyntaxKind::CommaToken) {
                elems.push(None);
                continue;
            }
            let elem_start = self.token_pos();
            let elem = if self.parse_optional(SyntaxKind::DotDotDotToken) {
                let arg = self.parse_binding_name()?;
                Pat::Rest(RestPat {
                    span: self.span_from(elem_start),
                    arg: Box::new(arg),
                    type_ann: None,
                })
            } else {
                self.parse_binding_element()?
            };
            elems.push(Some(elem));
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBracketToken)?;
        Ok(Pat::Array(ArrayPat {
            span: self.span_from(start),
            elems,
            optional: false,
            type_ann: None,
        }))
    }

    fn parse_object_binding_pattern(&mut self) -> ParseResult<Pat> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken)?;
        let mut props = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken) {
            let prop_start = self.token_pos();
            if self.parse_optional(SyntaxKind::DotDotDotToken) {
                let arg = self.parse_binding_name()?;
                props.push(ObjectPatProp::Rest(RestPat {
                    span: self.span_from(prop_start),
                    arg: Box::new(arg),
                    type_ann: None,
                }));
            } else {
                let key = self.parse_property_name()?;
                if self.parse_optional(SyntaxKind::ColonToken) {
                    let value = self.parse_binding_element()?;
                    props.push(ObjectPatProp::KeyValue {
                        key,
                        value: Box::new(value),
                    });
                } else {
                    let PropName::Ident(key) = key else {
                        return Err(self.error_expected("':'"));
                    };
                    let value = if self.parse_optional(SyntaxKind::EqualsToken) {
                        Some(Box::new(self.parse_assignment_expression_allow_in()?))
                    } else {
                        None
                    };
                    props.push(ObjectPatProp::Shorthand { key, value });
                }
            }
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken)?;
        Ok(Pat::Object(ObjectPat {
            span: self.span_from(start),
            props,
            optional: false,
            type_ann: None,
        }))
    }

    /// `(a, b?: T, ...rest: U[])`
    pub(crate) fn parse_parameters(&mut self) -> ParseResult<Vec<Param>> {
        self.parse_expected(SyntaxKind::OpenParenToken)?;
        let params = self.parse_parameter_list(SyntaxKind::CloseParenToken)?;
        self.parse_expected(SyntaxKind::CloseParenToken)?;
        Ok(params)
    }

    pub(crate) fn parse_parameter_list(&mut self, close: SyntaxKind) -> ParseResult<Vec<Param>> {
        let mut params = Vec::new();
        self.with_context(CONTEXT_FLAG_DISALLOW_IN, false, |p| {
            while !p.is_token(close) {
                params.push(p.parse_parameter()?);
                if !p.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
            Ok(())
        })?;
        Ok(params)
    }

    fn is_parameter_modifier(&mut self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::PublicKeyword
                | SyntaxKind::PrivateKeyword
                | SyntaxKind::ProtectedKeyword
                | SyntaxKind::ReadonlyKeyword
                | SyntaxKind::OverrideKeyword
        ) && self.look_ahead(|p| {
            p.next_token();
            p.is_identifier()
                || p.is_token(SyntaxKind::OpenBracketToken)
                || p.is_token(SyntaxKind::OpenBraceToken)
                || p.is_token(SyntaxKind::ThisKeyword)
        })
    }

    fn parse_parameter(&mut self) -> ParseResult<Param> {
        let start = self.token_pos();
        let mut modifiers = ParamModifiers::default();
        while self.is_parameter_modifier() {
            match self.token() {
                SyntaxKind::PublicKeyword => modifiers.accessibility = Some(Accessibility::Public),
                SyntaxKind::PrivateKeyword => modifiers.accessibility = Some(Accessibility::Private),
                SyntaxKind::ProtectedKeyword => {
                    modifiers.accessibility = Some(Accessibility::Protected)
                }
                SyntaxKind::ReadonlyKeyword => modifiers.readonly = true,
                _ => modifiers.is_override = true,
            }
            self.next_token();
        }

        let rest = self.parse_optional(SyntaxKind::DotDotDotToken);
        let mut pat = if self.is_token(SyntaxKind::ThisKeyword) {
            let this_start = self.token_pos();
            self.next_token();
            Pat::Ident(BindingIdent {
                id: Ident::with_span("this", self.span_from(this_start)),
                optional: false,
                type_ann: None,
            })
        } else {
            self.parse_binding_name()?
        };

        if self.parse_optional(SyntaxKind::QuestionToken) {
            match &mut pat {
                Pat::Ident(binding) => binding.optional = true,
                Pat::Array(array) => array.optional = true,
                Pat::Object(object) => object.optional = true,
                _ => return Err(self.error_unexpected()),
            }
        }

        if rest {
            let type_ann = if self.parse_optional(SyntaxKind::ColonToken) {
                Some(Box::new(self.parse_type()?))
            } else {
                None
            };
            pat = Pat::Rest(RestPat {
                span: self.span_from(start),
                arg: Box::new(pat),
                type_ann,
            });
        } else {
            pat = self.attach_type_annotation(pat)?;
        }
        let pat = self.parse_pattern_initializer(start, pat)?;

        Ok(Param {
            span: self.span_from(start),
            modifiers,
            pat,
        })
    }
}

fn assign_op(kind: SyntaxKind) -> Option<AssignOp> {
    let op = match kind {
        SyntaxKind::EqualsToken => AssignOp::Assign,
        SyntaxKind::PlusEqualsToken => AssignOp::AddAssign,
        SyntaxKind::MinusEqualsToken => AssignOp::SubAssign,
        SyntaxKind::AsteriskEqualsToken => AssignOp::MulAssign,
        SyntaxKind::SlashEqualsToken => AssignOp::DivAssign,
        SyntaxKind::PercentEqualsToken => AssignOp::ModAssign,
        SyntaxKind::AsteriskAsteriskEqualsToken => AssignOp::ExpAssign,
        SyntaxKind::LessThanLessThanEqualsToken => AssignOp::LShiftAssign,
        SyntaxKind::GreaterThanGreaterThanEqualsToken => AssignOp::RShiftAssign,
        SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken => AssignOp::ZeroFillRShiftAssign,
        SyntaxKind::AmpersandEqualsToken => AssignOp::BitAndAssign,
        SyntaxKind::BarEqualsToken => AssignOp::BitOrAssign,
        SyntaxKind::CaretEqualsToken => AssignOp::BitXorAssign,
        SyntaxKind::AmpersandAmpersandEqualsToken => AssignOp::AndAssign,
        SyntaxKind::BarBarEqualsToken => AssignOp::OrAssign,
        SyntaxKind::QuestionQuestionEqualsToken => AssignOp::NullishAssign,
        _ => return None,
    };
    Some(op)
}

/// Simple targets for every operator; array/object literals only for `=`.
fn is_valid_assignment_target(expr: &Expr, op: AssignOp) -> bool {
    match expr {
        Expr::Ident(_) | Expr::Member(_) => true,
        Expr::Paren(paren) => is_valid_assignment_target(&paren.expr, op),
        Expr::TsAs(e) => is_valid_assignment_target(&e.expr, op),
        Expr::TsSatisfies(e) => is_valid_assignment_target(&e.expr, op),
        Expr::TsNonNull(e) => is_valid_assignment_target(&e.expr, op),
        Expr::Array(_) | Expr::Object(_) => op == AssignOp::Assign,
        _ => false,
    }
}
