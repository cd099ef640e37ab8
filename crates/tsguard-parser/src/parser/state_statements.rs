//! Parser state - statements, declarations and module items

use super::state::{CONTEXT_FLAG_DISALLOW_IN, CONTEXT_FLAG_GENERATOR, ParserState};
use crate::ast::*;
use crate::error::{ParseErrorKind, ParseResult};
use tsguard_scanner::SyntaxKind;

impl ParserState {
    // =========================================================================
    // Parse Methods - Statements
    // =========================================================================

    pub(crate) fn parse_statement(&mut self) -> ParseResult<Stmt> {
        self.enter_recursion()?;
        let result = self.parse_statement_worker();
        self.exit_recursion();
        result
    }

    fn parse_statement_worker(&mut self) -> ParseResult<Stmt> {
        let start = self.token_pos();
        match self.token() {
            SyntaxKind::SemicolonToken => {
                self.next_token();
                Ok(Stmt::new(self.span_from(start), StmtKind::Empty))
            }
            SyntaxKind::OpenBraceToken => {
                let block = self.parse_block()?;
                Ok(Stmt::new(block.span, StmtKind::Block(block)))
            }
            SyntaxKind::IfKeyword => self.parse_if_statement(),
            SyntaxKind::DoKeyword => self.parse_do_statement(),
            SyntaxKind::WhileKeyword => self.parse_while_statement(),
            SyntaxKind::ForKeyword => self.parse_for_statement(),
            SyntaxKind::ContinueKeyword | SyntaxKind::BreakKeyword => {
                self.parse_break_or_continue_statement()
            }
            SyntaxKind::ReturnKeyword => self.parse_return_statement(),
            SyntaxKind::WithKeyword => self.parse_with_statement(),
            SyntaxKind::SwitchKeyword => self.parse_switch_statement(),
            SyntaxKind::ThrowKeyword => self.parse_throw_statement(),
            SyntaxKind::TryKeyword => self.parse_try_statement(),
            SyntaxKind::DebuggerKeyword => {
                self.next_token();
                self.parse_semicolon()?;
                Ok(Stmt::new(self.span_from(start), StmtKind::Debugger))
            }
            SyntaxKind::ImportKeyword => {
                let next = self.peek_token();
                if next == SyntaxKind::OpenParenToken || next == SyntaxKind::DotToken {
                    self.parse_expression_or_labeled_statement()
                } else {
                    self.parse_import_declaration()
                }
            }
            SyntaxKind::ExportKeyword => self.parse_export_declaration(),
            SyntaxKind::AtToken => Err(self.error(ParseErrorKind::Invalid(
                "decorators are not supported",
            ))),
            _ if self.is_start_of_declaration() => self.parse_declaration(start, false),
            _ => self.parse_expression_or_labeled_statement(),
        }
    }

    pub(crate) fn parse_block(&mut self) -> ParseResult<BlockStmt> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken)?;
        let mut stmts = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken) {
            if self.is_token(SyntaxKind::EndOfFileToken) {
                return Err(self.error_expected("'}'"));
            }
            stmts.push(self.parse_statement()?);
        }
        self.next_token();
        Ok(BlockStmt {
            span: self.span_from(start),
            stmts,
        })
    }

    /// Function bodies reset the generator context to the function's own.
    pub(crate) fn parse_function_block(&mut self, is_generator: bool) -> ParseResult<BlockStmt> {
        let saved = self.context_flags;
        self.context_flags &= !CONTEXT_FLAG_DISALLOW_IN;
        if is_generator {
            self.context_flags |= CONTEXT_FLAG_GENERATOR;
        } else {
            self.context_flags &= !CONTEXT_FLAG_GENERATOR;
        }
        let result = self.parse_block();
        self.context_flags = saved;
        result
    }

    fn parse_expression_or_labeled_statement(&mut self) -> ParseResult<Stmt> {
        let start = self.token_pos();
        if self.is_identifier() && self.peek_token() == SyntaxKind::ColonToken {
            let label = self.parse_identifier()?;
            self.next_token();
            let body = self.parse_statement()?;
            return Ok(Stmt::new(
                self.span_from(start),
                StmtKind::Labeled {
                    label,
                    body: Box::new(body),
                },
            ));
        }
        let expr = self.parse_expression()?;
        self.parse_semicolon()?;
        Ok(Stmt::new(
            self.span_from(start),
            StmtKind::Expr(Box::new(expr)),
        ))
    }

    fn parse_parenthesized_expression(&mut self) -> ParseResult<Box<Expr>> {
        self.parse_expected(SyntaxKind::OpenParenToken)?;
        let expr = self.with_context(CONTEXT_FLAG_DISALLOW_IN, false, |p| p.parse_expression())?;
        self.parse_expected(SyntaxKind::CloseParenToken)?;
        Ok(Box::new(expr))
    }

    fn parse_if_statement(&mut self) -> ParseResult<Stmt> {
        let start = self.token_pos();
        self.next_token();
        let test = self.parse_parenthesized_expression()?;
        let cons = Box::new(self.parse_statement()?);
        let alt = if self.parse_optional(SyntaxKind::ElseKeyword) {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };
        Ok(Stmt::new(
            self.span_from(start),
            StmtKind::If { test, cons, alt },
        ))
    }

    fn parse_do_statement(&mut self) -> ParseResult<Stmt> {
        let start = self.token_pos();
        self.next_token();
        let body = Box::new(self.parse_statement()?);
        self.parse_expected(SyntaxKind::WhileKeyword)?;
        let test = self.parse_parenthesized_expression()?;
        // The semicolon after do-while is always optional.
        self.parse_optional(SyntaxKind::SemicolonToken);
        Ok(Stmt::new(
            self.span_from(start),
            StmtKind::DoWhile { body, test },
        ))
    }

    fn parse_while_statement(&mut self) -> ParseResult<Stmt> {
        let start = self.token_pos();
        self.next_token();
        let test = self.parse_parenthesized_expression()?;
        let body = Box::new(self.parse_statement()?);
        Ok(Stmt::new(
            self.span_from(start),
            StmtKind::While { test, body },
        ))
    }

    fn parse_for_statement(&mut self) -> ParseResult<Stmt> {
        let start = self.token_pos();
        self.next_token();
        let is_await = self.parse_optional(SyntaxKind::AwaitKeyword);
        self.parse_expected(SyntaxKind::OpenParenToken)?;

        let init = if self.is_token(SyntaxKind::SemicolonToken) {
            None
        } else {
            let saved = self.context_flags;
            self.context_flags |= CONTEXT_FLAG_DISALLOW_IN;
            let init = if self.is_token(SyntaxKind::VarKeyword)
                || self.is_token(SyntaxKind::ConstKeyword)
                || (self.is_token(SyntaxKind::LetKeyword) && self.is_let_declaration())
            {
                self.parse_variable_declaration_list(false).map(ForInit::Var)
            } else {
                self.parse_expression().map(|e| ForInit::Expr(Box::new(e)))
            };
            self.context_flags = saved;
            Some(init?)
        };

        if self.is_token(SyntaxKind::OfKeyword) || self.is_token(SyntaxKind::InKeyword) {
            let is_of = self.is_token(SyntaxKind::OfKeyword);
            self.next_token();
            let left = match init {
                Some(ForInit::Var(decl)) => ForHead::Var(decl),
                Some(ForInit::Expr(expr)) => ForHead::Expr(expr),
                None => return Err(self.error_unexpected()),
            };
            let right = if is_of {
                Box::new(self.parse_assignment_expression()?)
            } else {
                Box::new(self.parse_expression()?)
            };
            self.parse_expected(SyntaxKind::CloseParenToken)?;
            let body = Box::new(self.parse_statement()?);
            let kind = if is_of {
                StmtKind::ForOf {
                    is_await,
                    left,
                    right,
                    body,
                }
            } else {
                StmtKind::ForIn { left, right, body }
            };
            return Ok(Stmt::new(self.span_from(start), kind));
        }

        self.parse_expected(SyntaxKind::SemicolonToken)?;
        let test = if self.is_token(SyntaxKind::SemicolonToken) {
            None
        } else {
            Some(Box::new(self.parse_expression()?))
        };
        self.parse_expected(SyntaxKind::SemicolonToken)?;
        let update = if self.is_token(SyntaxKind::CloseParenToken) {
            None
        } else {
            Some(Box::new(self.parse_expression()?))
        };
        self.parse_expected(SyntaxKind::CloseParenToken)?;
        let body = Box::new(self.parse_statement()?);
        Ok(Stmt::new(
            self.span_from(start),
            StmtKind::For {
                init,
                test,
                update,
                body,
            },
        ))
    }

    fn parse_break_or_continue_statement(&mut self) -> ParseResult<Stmt> {
        let start = self.token_pos();
        let is_break = self.is_token(SyntaxKind::BreakKeyword);
        self.next_token();
        let label = if !self.can_parse_semicolon() && self.is_identifier() {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        self.parse_semicolon()?;
        let kind = if is_break {
            StmtKind::Break(label)
        } else {
            StmtKind::Continue(label)
        };
        Ok(Stmt::new(self.span_from(start), kind))
    }

    fn parse_return_statement(&mut self) -> ParseResult<Stmt> {
        let start = self.token_pos();
        self.next_token();
        let arg = if self.can_parse_semicolon() {
            None
        } else {
            Some(Box::new(self.parse_expression()?))
        };
        self.parse_semicolon()?;
        Ok(Stmt::new(self.span_from(start), StmtKind::Return(arg)))
    }

    fn parse_throw_statement(&mut self) -> ParseResult<Stmt> {
        let start = self.token_pos();
        self.next_token();
        if self.has_preceding_line_break() {
            return Err(self.error(ParseErrorKind::Invalid(
                "line break is not allowed after 'throw'",
            )));
        }
        let arg = Box::new(self.parse_expression()?);
        self.parse_semicolon()?;
        Ok(Stmt::new(self.span_from(start), StmtKind::Throw(arg)))
    }

    fn parse_with_statement(&mut self) -> ParseResult<Stmt> {
        let start = self.token_pos();
        self.next_token();
        let object = self.parse_parenthesized_expression()?;
        let body = Box::new(self.parse_statement()?);
        Ok(Stmt::new(
            self.span_from(start),
            StmtKind::With { object, body },
        ))
    }

    fn parse_switch_statement(&mut self) -> ParseResult<Stmt> {
        let start = self.token_pos();
        self.next_token();
        let discriminant = self.parse_parenthesized_expression()?;
        self.parse_expected(SyntaxKind::OpenBraceToken)?;
        let mut cases = Vec::new();
        while !self.parse_optional(SyntaxKind::CloseBraceToken) {
            let case_start = self.token_pos();
            let test = if self.parse_optional(SyntaxKind::CaseKeyword) {
                Some(Box::new(self.parse_expression()?))
            } else {
                self.parse_expected(SyntaxKind::DefaultKeyword)?;
                None
            };
            self.parse_expected(SyntaxKind::ColonToken)?;
            let mut cons = Vec::new();
            while !matches!(
                self.token(),
                SyntaxKind::CaseKeyword
                    | SyntaxKind::DefaultKeyword
                    | SyntaxKind::CloseBraceToken
                    | SyntaxKind::EndOfFileToken
            ) {
                cons.push(self.parse_statement()?);
            }
            cases.push(SwitchCase {
                span: self.span_from(case_start),
                test,
                cons,
            });
        }
        Ok(Stmt::new(
            self.span_from(start),
            StmtKind::Switch {
                discriminant,
                cases,
            },
        ))
    }

    fn parse_try_statement(&mut self) -> ParseResult<Stmt> {
        let start = self.token_pos();
        self.next_token();
        let block = self.parse_block()?;
        let handler = if self.is_token(SyntaxKind::CatchKeyword) {
            let catch_start = self.token_pos();
            self.next_token();
            let param = if self.parse_optional(SyntaxKind::OpenParenToken) {
                let pat = self.parse_binding_element_with_annotation()?;
                self.parse_expected(SyntaxKind::CloseParenToken)?;
                Some(pat)
            } else {
                None
            };
            let body = self.parse_block()?;
            Some(CatchClause {
                span: self.span_from(catch_start),
                param,
                body,
            })
        } else {
            None
        };
        let finalizer = if self.parse_optional(SyntaxKind::FinallyKeyword) {
            Some(self.parse_block()?)
        } else {
            None
        };
        if handler.is_none() && finalizer.is_none() {
            return Err(self.error_expected("'catch' or 'finally'"));
        }
        Ok(Stmt::new(
            self.span_from(start),
            StmtKind::Try {
                block,
                handler,
                finalizer,
            },
        ))
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    /// `let` starts a declaration only when followed by a binding name or pattern.
    pub(crate) fn is_let_declaration(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            p.is_identifier()
                || p.is_token(SyntaxKind::OpenBracketToken)
                || p.is_token(SyntaxKind::OpenBraceToken)
        })
    }

    fn next_is_identifier_on_same_line(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            !p.has_preceding_line_break() && p.is_identifier()
        })
    }

    fn next_is_on_same_line_and(&mut self, kinds: &[SyntaxKind]) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            !p.has_preceding_line_break() && kinds.contains(&p.token())
        })
    }

    pub(crate) fn is_start_of_declaration(&mut self) -> bool {
        match self.token() {
            SyntaxKind::VarKeyword
            | SyntaxKind::ConstKeyword
            | SyntaxKind::FunctionKeyword
            | SyntaxKind::ClassKeyword
            | SyntaxKind::EnumKeyword => true,
            SyntaxKind::LetKeyword => self.is_let_declaration(),
            SyntaxKind::AsyncKeyword => self.next_is_on_same_line_and(&[SyntaxKind::FunctionKeyword]),
            SyntaxKind::AbstractKeyword => self.next_is_on_same_line_and(&[SyntaxKind::ClassKeyword]),
            SyntaxKind::InterfaceKeyword | SyntaxKind::TypeKeyword => {
                self.next_is_identifier_on_same_line()
            }
            SyntaxKind::NamespaceKeyword | SyntaxKind::ModuleKeyword => self.look_ahead(|p| {
                p.next_token();
                !p.has_preceding_line_break()
                    && (p.is_identifier() || p.is_token(SyntaxKind::StringLiteral))
            }),
            SyntaxKind::GlobalKeyword => self.next_is_on_same_line_and(&[SyntaxKind::OpenBraceToken]),
            SyntaxKind::DeclareKeyword => self.look_ahead(|p| {
                p.next_token();
                !p.has_preceding_line_break() && p.is_start_of_declaration()
            }),
            _ => false,
        }
    }

    /// Parse a declaration starting at the current token. `declare` is set when an
    /// enclosing `declare` modifier was consumed.
    pub(crate) fn parse_declaration(&mut self, start: u32, declare: bool) -> ParseResult<Stmt> {
        let kind = match self.token() {
            SyntaxKind::DeclareKeyword => {
                self.next_token();
                return self.parse_declaration(start, true);
            }
            SyntaxKind::VarKeyword | SyntaxKind::LetKeyword => {
                let decl = self.parse_variable_declaration_list(declare)?;
                self.parse_semicolon()?;
                StmtKind::Var(decl)
            }
            SyntaxKind::ConstKeyword => {
                if self.peek_token() == SyntaxKind::EnumKeyword {
                    self.next_token();
                    StmtKind::Enum(self.parse_enum_declaration(start, true, declare)?)
                } else {
                    let decl = self.parse_variable_declaration_list(declare)?;
                    self.parse_semicolon()?;
                    StmtKind::Var(decl)
                }
            }
            SyntaxKind::FunctionKeyword | SyntaxKind::AsyncKeyword => {
                let is_async = self.parse_optional(SyntaxKind::AsyncKeyword);
                let (ident, function) = self.parse_function_declaration_or_expression(start, is_async)?;
                let ident = ident.ok_or_else(|| self.error_expected("function name"))?;
                if function.body.is_none() {
                    self.parse_semicolon()?;
                }
                StmtKind::Fn(FnDecl {
                    ident,
                    declare,
                    function,
                })
            }
            SyntaxKind::ClassKeyword | SyntaxKind::AbstractKeyword => {
                let (ident, class) = self.parse_class(start)?;
                let ident = ident.ok_or_else(|| self.error_expected("class name"))?;
                StmtKind::Class(ClassDecl {
                    ident,
                    declare,
                    class,
                })
            }
            SyntaxKind::InterfaceKeyword => {
                StmtKind::Interface(self.parse_interface_declaration(start)?)
            }
            SyntaxKind::TypeKeyword => StmtKind::TypeAlias(self.parse_type_alias_declaration(start)?),
            SyntaxKind::EnumKeyword => {
                StmtKind::Enum(self.parse_enum_declaration(start, false, declare)?)
            }
            SyntaxKind::NamespaceKeyword | SyntaxKind::ModuleKeyword | SyntaxKind::GlobalKeyword => {
                StmtKind::Namespace(self.parse_namespace_declaration(start, declare)?)
            }
            _ => return Err(self.error_expected("declaration")),
        };
        Ok(Stmt::new(self.span_from(start), kind))
    }

    pub(crate) fn parse_variable_declaration_list(&mut self, declare: bool) -> ParseResult<VarDecl> {
        let start = self.token_pos();
        let kind = match self.token() {
            SyntaxKind::VarKeyword => VarKind::Var,
            SyntaxKind::LetKeyword => VarKind::Let,
            SyntaxKind::ConstKeyword => VarKind::Const,
            _ => return Err(self.error_expected("'var', 'let' or 'const'")),
        };
        self.next_token();
        let mut decls = Vec::new();
        loop {
            let decl_start = self.token_pos();
            let name = self.parse_binding_name()?;
            let definite = self.parse_optional(SyntaxKind::ExclamationToken);
            let name = self.attach_type_annotation(name)?;
            let init = if self.parse_optional(SyntaxKind::EqualsToken) {
                Some(Box::new(self.parse_assignment_expression()?))
            } else {
                None
            };
            decls.push(VarDeclarator {
                span: self.span_from(decl_start),
                name,
                definite,
                init,
            });
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        Ok(VarDecl {
            span: self.span_from(start),
            kind,
            declare,
            decls,
        })
    }

    /// `function* name<T>(params): R { body }`; the current token is `function`.
    pub(crate) fn parse_function_declaration_or_expression(
        &mut self,
        start: u32,
        is_async: bool,
    ) -> ParseResult<(Option<Ident>, Box<Function>)> {
        self.parse_expected(SyntaxKind::FunctionKeyword)?;
        let is_generator = self.parse_optional(SyntaxKind::AsteriskToken);
        let ident = if self.is_identifier() {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        let function = self.parse_function_rest(start, is_async, is_generator)?;
        Ok((ident, function))
    }

    /// Type parameters, parameters, return type and optional body.
    pub(crate) fn parse_function_rest(
        &mut self,
        start: u32,
        is_async: bool,
        is_generator: bool,
    ) -> ParseResult<Box<Function>> {
        let type_params = self.parse_type_parameters()?;
        let params = self.parse_parameters()?;
        let return_type = self.parse_return_type_annotation()?;
        let body = if self.is_token(SyntaxKind::OpenBraceToken) {
            Some(self.parse_function_block(is_generator)?)
        } else {
            None
        };
        Ok(Box::new(Function {
            span: self.span_from(start),
            is_async,
            is_generator,
            type_params,
            params,
            return_type,
            body,
        }))
    }

    fn parse_interface_declaration(&mut self, start: u32) -> ParseResult<InterfaceDecl> {
        self.parse_expected(SyntaxKind::InterfaceKeyword)?;
        let id = self.parse_identifier()?;
        let type_params = self.parse_type_parameters()?;
        let mut extends = Vec::new();
        if self.parse_optional(SyntaxKind::ExtendsKeyword) {
            loop {
                extends.push(self.parse_expression_with_type_arguments()?);
                if !self.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
        }
        let body = self.parse_object_type_members()?;
        Ok(InterfaceDecl {
            span: self.span_from(start),
            id,
            type_params,
            extends,
            body,
        })
    }

    fn parse_type_alias_declaration(&mut self, start: u32) -> ParseResult<TypeAliasDecl> {
        self.parse_expected(SyntaxKind::TypeKeyword)?;
        let id = self.parse_identifier()?;
        let type_params = self.parse_type_parameters()?;
        self.parse_expected(SyntaxKind::EqualsToken)?;
        let type_ann = Box::new(self.parse_type()?);
        self.parse_semicolon()?;
        Ok(TypeAliasDecl {
            span: self.span_from(start),
            id,
            type_params,
            type_ann,
        })
    }

    fn parse_enum_declaration(
        &mut self,
        start: u32,
        is_const: bool,
        declare: bool,
    ) -> ParseResult<EnumDecl> {
        self.parse_expected(SyntaxKind::EnumKeyword)?;
        let id = self.parse_identifier()?;
        self.parse_expected(SyntaxKind::OpenBraceToken)?;
        let mut members = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken) {
            let member_start = self.token_pos();
            let member_id = match self.token() {
                SyntaxKind::StringLiteral => PropName::Str(self.parse_string_literal()?),
                SyntaxKind::OpenBracketToken => self.parse_property_name()?,
                _ => PropName::Ident(self.parse_identifier_name()?),
            };
            let init = if self.parse_optional(SyntaxKind::EqualsToken) {
                Some(Box::new(self.parse_assignment_expression()?))
            } else {
                None
            };
            members.push(EnumMember {
                span: self.span_from(member_start),
                id: member_id,
                init,
            });
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken)?;
        Ok(EnumDecl {
            span: self.span_from(start),
            id,
            is_const,
            declare,
            members,
        })
    }

    fn parse_namespace_declaration(&mut self, start: u32, declare: bool) -> ParseResult<NamespaceDecl> {
        let keyword = match self.token() {
            SyntaxKind::NamespaceKeyword => NamespaceKeyword::Namespace,
            SyntaxKind::ModuleKeyword => NamespaceKeyword::Module,
            _ => NamespaceKeyword::Global,
        };
        let id = if keyword == NamespaceKeyword::Global {
            let global_start = self.token_pos();
            self.next_token();
            ModuleName::Ident(Ident::with_span("global", self.span_from(global_start)))
        } else {
            self.next_token();
            if self.is_token(SyntaxKind::StringLiteral) {
                ModuleName::Str(self.parse_string_literal()?)
            } else {
                ModuleName::Ident(self.parse_identifier()?)
            }
        };

        let body = if matches!(id, ModuleName::Ident(_)) && self.is_token(SyntaxKind::DotToken) {
            self.next_token();
            let inner_start = self.token_pos();
            let inner = self.parse_namespace_rest(inner_start)?;
            Some(NamespaceBody::Nested(Box::new(inner)))
        } else if self.is_token(SyntaxKind::OpenBraceToken) {
            Some(NamespaceBody::Block(self.parse_module_block()?))
        } else {
            self.parse_semicolon()?;
            None
        };

        Ok(NamespaceDecl {
            span: self.span_from(start),
            declare,
            keyword,
            id,
            body,
        })
    }

    /// Remaining segments of a dotted namespace name: `B.C { ... }` after `namespace A.`.
    fn parse_namespace_rest(&mut self, start: u32) -> ParseResult<NamespaceDecl> {
        self.enter_recursion()?;
        let result = self.parse_namespace_rest_worker(start);
        self.exit_recursion();
        result
    }

    fn parse_namespace_rest_worker(&mut self, start: u32) -> ParseResult<NamespaceDecl> {
        let id = ModuleName::Ident(self.parse_identifier()?);
        let body = if self.parse_optional(SyntaxKind::DotToken) {
            let inner_start = self.token_pos();
            NamespaceBody::Nested(Box::new(self.parse_namespace_rest(inner_start)?))
        } else {
            NamespaceBody::Block(self.parse_module_block()?)
        };
        Ok(NamespaceDecl {
            span: self.span_from(start),
            declare: false,
            keyword: NamespaceKeyword::Namespace,
            id,
            body: Some(body),
        })
    }

    fn parse_module_block(&mut self) -> ParseResult<Vec<Stmt>> {
        self.parse_expected(SyntaxKind::OpenBraceToken)?;
        let mut body = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken) {
            if self.is_token(SyntaxKind::EndOfFileToken) {
                return Err(self.error_expected("'}'"));
            }
            body.push(self.parse_statement()?);
        }
        self.next_token();
        Ok(body)
    }

    // =========================================================================
    // Imports and exports
    // =========================================================================

    pub(crate) fn parse_string_literal(&mut self) -> ParseResult<Str> {
        if !self.is_token(SyntaxKind::StringLiteral) {
            return Err(self.error_expected("string literal"));
        }
        if self.scanner.is_unterminated() {
            return Err(self.error_unexpected());
        }
        let start = self.token_pos();
        let value = self.token_value().to_string();
        let raw = self.scanner.get_token_text().to_string();
        self.next_token();
        Ok(Str {
            span: self.span_from(start),
            value,
            raw: Some(raw),
        })
    }

    fn parse_module_specifier(&mut self) -> ParseResult<Str> {
        self.parse_expected(SyntaxKind::FromKeyword)?;
        self.parse_string_literal()
    }

    fn parse_module_export_name(&mut self) -> ParseResult<ModuleExportName> {
        if self.is_token(SyntaxKind::StringLiteral) {
            Ok(ModuleExportName::Str(self.parse_string_literal()?))
        } else {
            Ok(ModuleExportName::Ident(self.parse_identifier_name()?))
        }
    }

    /// `with { type: 'json' }` (or the older `assert { ... }`).
    fn parse_import_attributes(&mut self) -> ParseResult<Option<Box<Expr>>> {
        let is_attributes = self.is_token(SyntaxKind::WithKeyword)
            || (self.is_token(SyntaxKind::Identifier)
                && self.token_value() == "assert"
                && !self.has_preceding_line_break());
        if !is_attributes {
            return Ok(None);
        }
        self.next_token();
        Ok(Some(Box::new(self.parse_object_literal()?)))
    }

    /// `type` is a modifier when it is followed by something it can modify.
    fn is_type_modifier(&mut self) -> bool {
        if !self.is_token(SyntaxKind::TypeKeyword) {
            return false;
        }
        let next = self.peek_token();
        (next == SyntaxKind::Identifier
            || next == SyntaxKind::StringLiteral
            || next.is_keyword())
            && next != SyntaxKind::AsKeyword
            && next != SyntaxKind::FromKeyword
    }

    fn parse_import_declaration(&mut self) -> ParseResult<Stmt> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::ImportKeyword)?;

        if self.is_token(SyntaxKind::StringLiteral) {
            let src = self.parse_string_literal()?;
            let with = self.parse_import_attributes()?;
            self.parse_semicolon()?;
            return Ok(Stmt::new(
                self.span_from(start),
                StmtKind::Import(ImportDecl {
                    span: self.span_from(start),
                    type_only: false,
                    specifiers: Vec::new(),
                    src,
                    with,
                }),
            ));
        }

        let type_only = match self.token() {
            SyntaxKind::TypeKeyword => {
                let next = self.peek_token();
                let modifies = matches!(
                    next,
                    SyntaxKind::OpenBraceToken | SyntaxKind::AsteriskToken
                ) || (next.is_identifier_like() && next != SyntaxKind::FromKeyword);
                if modifies {
                    self.next_token();
                }
                modifies
            }
            _ => false,
        };

        let mut specifiers = Vec::new();
        if self.is_identifier() {
            let local = self.parse_identifier()?;
            if self.is_token(SyntaxKind::EqualsToken) {
                return self.parse_import_equals_rest(start, local, false, type_only);
            }
            specifiers.push(ImportSpecifier::Default(local));
            if !self.parse_optional(SyntaxKind::CommaToken) {
                let src = self.parse_module_specifier()?;
                return self.finish_import(start, type_only, specifiers, src);
            }
        }

        if self.parse_optional(SyntaxKind::AsteriskToken) {
            self.parse_expected(SyntaxKind::AsKeyword)?;
            specifiers.push(ImportSpecifier::Namespace(self.parse_identifier()?));
        } else if self.parse_optional(SyntaxKind::OpenBraceToken) {
            while !self.is_token(SyntaxKind::CloseBraceToken) {
                let is_type_only = self.is_type_modifier();
                if is_type_only {
                    self.next_token();
                }
                let imported = self.parse_module_export_name()?;
                let specifier = if self.parse_optional(SyntaxKind::AsKeyword) {
                    ImportSpecifier::Named {
                        local: self.parse_identifier()?,
                        imported: Some(imported),
                        is_type_only,
                    }
                } else {
                    match imported {
                        ModuleExportName::Ident(local) => ImportSpecifier::Named {
                            local,
                            imported: None,
                            is_type_only,
                        },
                        ModuleExportName::Str(_) => return Err(self.error_expected("'as'")),
                    }
                };
                specifiers.push(specifier);
                if !self.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
            self.parse_expected(SyntaxKind::CloseBraceToken)?;
        } else {
            return Err(self.error_expected("import clause"));
        }

        let src = self.parse_module_specifier()?;
        self.finish_import(start, type_only, specifiers, src)
    }

    fn finish_import(
        &mut self,
        start: u32,
        type_only: bool,
        specifiers: Vec<ImportSpecifier>,
        src: Str,
    ) -> ParseResult<Stmt> {
        let with = self.parse_import_attributes()?;
        self.parse_semicolon()?;
        let span = self.span_from(start);
        Ok(Stmt::new(
            span,
            StmtKind::Import(ImportDecl {
                span,
                type_only,
                specifiers,
                src,
                with,
            }),
        ))
    }

    /// `= require('x');` or `= A.B;` after `import id`.
    fn parse_import_equals_rest(
        &mut self,
        start: u32,
        id: Ident,
        is_export: bool,
        type_only: bool,
    ) -> ParseResult<Stmt> {
        self.parse_expected(SyntaxKind::EqualsToken)?;
        let module_ref = if self.is_token(SyntaxKind::Identifier)
            && self.token_value() == "require"
            && self.peek_token() == SyntaxKind::OpenParenToken
        {
            self.next_token();
            self.next_token();
            let src = self.parse_string_literal()?;
            self.parse_expected(SyntaxKind::CloseParenToken)?;
            ModuleReference::Require(src)
        } else {
            ModuleReference::Entity(self.parse_entity_name(true)?)
        };
        self.parse_semicolon()?;
        let span = self.span_from(start);
        Ok(Stmt::new(
            span,
            StmtKind::ImportEquals(ImportEqualsDecl {
                span,
                is_export,
                type_only,
                id,
                module_ref,
            }),
        ))
    }

    fn parse_export_declaration(&mut self) -> ParseResult<Stmt> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::ExportKeyword)?;

        match self.token() {
            SyntaxKind::AsteriskToken => self.parse_export_all(start, false),
            SyntaxKind::OpenBraceToken => self.parse_named_export(start, false),
            SyntaxKind::TypeKeyword
                if matches!(
                    self.peek_token(),
                    SyntaxKind::OpenBraceToken | SyntaxKind::AsteriskToken
                ) =>
            {
                self.next_token();
                if self.is_token(SyntaxKind::AsteriskToken) {
                    self.parse_export_all(start, true)
                } else {
                    self.parse_named_export(start, true)
                }
            }
            SyntaxKind::DefaultKeyword => {
                self.next_token();
                self.parse_export_default(start)
            }
            SyntaxKind::EqualsToken => {
                self.next_token();
                let expr = self.parse_assignment_expression()?;
                self.parse_semicolon()?;
                Ok(Stmt::new(
                    self.span_from(start),
                    StmtKind::ExportAssign(Box::new(expr)),
                ))
            }
            SyntaxKind::ImportKeyword => {
                self.next_token();
                let type_only = self.is_token(SyntaxKind::TypeKeyword)
                    && self.next_is_identifier_on_same_line();
                if type_only {
                    self.next_token();
                }
                let id = self.parse_identifier()?;
                self.parse_import_equals_rest(start, id, true, type_only)
            }
            _ => {
                let decl_start = self.token_pos();
                if !self.is_start_of_declaration() {
                    return Err(self.error_expected("declaration"));
                }
                let decl = self.parse_declaration(decl_start, false)?;
                Ok(Stmt::new(
                    self.span_from(start),
                    StmtKind::ExportDecl(Box::new(decl)),
                ))
            }
        }
    }

    fn parse_export_all(&mut self, start: u32, type_only: bool) -> ParseResult<Stmt> {
        self.parse_expected(SyntaxKind::AsteriskToken)?;
        let alias = if self.parse_optional(SyntaxKind::AsKeyword) {
            Some(self.parse_module_export_name()?)
        } else {
            None
        };
        let src = self.parse_module_specifier()?;
        self.parse_import_attributes()?;
        self.parse_semicolon()?;
        let span = self.span_from(start);
        Ok(Stmt::new(
            span,
            StmtKind::ExportAll(ExportAll {
                span,
                type_only,
                alias,
                src,
            }),
        ))
    }

    fn parse_named_export(&mut self, start: u32, type_only: bool) -> ParseResult<Stmt> {
        self.parse_expected(SyntaxKind::OpenBraceToken)?;
        let mut specifiers = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken) {
            let is_type_only = self.is_type_modifier();
            if is_type_only {
                self.next_token();
            }
            let orig = self.parse_module_export_name()?;
            let exported = if self.parse_optional(SyntaxKind::AsKeyword) {
                Some(self.parse_module_export_name()?)
            } else {
                None
            };
            specifiers.push(ExportSpecifier {
                orig,
                exported,
                is_type_only,
            });
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken)?;
        let src = if self.is_token(SyntaxKind::FromKeyword) {
            Some(self.parse_module_specifier()?)
        } else {
            None
        };
        if src.is_some() {
            self.parse_import_attributes()?;
        }
        self.parse_semicolon()?;
        let span = self.span_from(start);
        Ok(Stmt::new(
            span,
            StmtKind::ExportNamed(NamedExport {
                span,
                type_only,
                specifiers,
                src,
            }),
        ))
    }

    fn parse_export_default(&mut self, start: u32) -> ParseResult<Stmt> {
        let decl_start = self.token_pos();
        let is_async_function = self.is_token(SyntaxKind::AsyncKeyword)
            && self.next_is_on_same_line_and(&[SyntaxKind::FunctionKeyword]);
        let kind = if self.is_token(SyntaxKind::FunctionKeyword) || is_async_function {
            let is_async = self.parse_optional(SyntaxKind::AsyncKeyword);
            let (ident, function) =
                self.parse_function_declaration_or_expression(decl_start, is_async)?;
            if function.body.is_none() {
                self.parse_semicolon()?;
            }
            StmtKind::ExportDefaultDecl(DefaultDecl::Fn(FnExpr { ident, function }))
        } else if self.is_token(SyntaxKind::ClassKeyword)
            || (self.is_token(SyntaxKind::AbstractKeyword)
                && self.next_is_on_same_line_and(&[SyntaxKind::ClassKeyword]))
        {
            let (ident, class) = self.parse_class(decl_start)?;
            StmtKind::ExportDefaultDecl(DefaultDecl::Class(ClassExpr { ident, class }))
        } else if self.is_token(SyntaxKind::InterfaceKeyword) && self.next_is_identifier_on_same_line()
        {
            StmtKind::ExportDefaultDecl(DefaultDecl::Interface(
                self.parse_interface_declaration(decl_start)?,
            ))
        } else {
            let expr = self.parse_assignment_expression()?;
            self.parse_semicolon()?;
            StmtKind::ExportDefaultExpr(Box::new(expr))
        };
        Ok(Stmt::new(self.span_from(start), kind))
    }
}

