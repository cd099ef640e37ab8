//! Parser state - token access, lookahead and error helpers

use crate::ast::{Ident, Module};
use crate::error::{ParseError, ParseErrorKind, ParseResult};
use tsguard_common::limits::{MAX_AST_DEPTH, MAX_PARSER_RECURSION_DEPTH};
use tsguard_common::{LineMap, Location, Span};
use tsguard_scanner::{ScannerSnapshot, ScannerState, SyntaxKind};

/// Inside a generator body: `yield` is an operator.
pub(crate) const CONTEXT_FLAG_GENERATOR: u32 = 1 << 0;
/// `in` is not a binary operator (for-statement initializers).
pub(crate) const CONTEXT_FLAG_DISALLOW_IN: u32 = 1 << 1;
/// Parsing the `extends` clause of a conditional type.
pub(crate) const CONTEXT_FLAG_DISALLOW_CONDITIONAL_TYPES: u32 = 1 << 2;

pub(crate) struct ParserSnapshot {
    scanner: ScannerSnapshot,
    current_token: SyntaxKind,
    last_end: u32,
    context_flags: u32,
    recursion_depth: u32,
    node_depth: u32,
}

pub struct ParserState {
    pub(crate) scanner: ScannerState,
    pub(crate) current_token: SyntaxKind,
    pub(crate) context_flags: u32,
    /// End of the most recently consumed token; closes node spans.
    last_end: u32,
    recursion_depth: u32,
    /// Depth of the tree under construction: recursion plus links of folded chains.
    node_depth: u32,
    file_name: String,
}

impl ParserState {
    pub fn new(file_name: impl Into<String>, source: String) -> Self {
        let mut parser = ParserState {
            scanner: ScannerState::new(source),
            current_token: SyntaxKind::Unknown,
            context_flags: 0,
            last_end: 0,
            recursion_depth: 0,
            node_depth: 0,
            file_name: file_name.into(),
        };
        parser.next_token();
        parser
    }

    /// Parse the whole input as a module.
    pub fn parse_source_file(mut self) -> ParseResult<Module> {
        let result = self.parse_module_items();
        match result {
            Ok(body) => {
                let end = self.scanner.get_token_end();
                Ok(Module {
                    span: Span::new(0, end),
                    body,
                    comments: self.scanner.take_comments(),
                })
            }
            Err(mut err) => {
                err.location = LineMap::build(self.scanner.source_text()).location(err.pos);
                Err(err)
            }
        }
    }

    fn parse_module_items(&mut self) -> ParseResult<Vec<crate::ast::Stmt>> {
        let mut body = Vec::new();
        while !self.is_token(SyntaxKind::EndOfFileToken) {
            body.push(self.parse_statement()?);
        }
        Ok(body)
    }

    // =========================================================================
    // Token access
    // =========================================================================

    pub(crate) fn token(&self) -> SyntaxKind {
        self.current_token
    }

    pub(crate) fn is_token(&self, kind: SyntaxKind) -> bool {
        self.current_token == kind
    }

    pub(crate) fn next_token(&mut self) -> SyntaxKind {
        self.last_end = self.scanner.get_token_end();
        self.current_token = self.scanner.scan();
        self.current_token
    }

    pub(crate) fn token_pos(&self) -> u32 {
        self.scanner.get_token_start()
    }

    pub(crate) fn token_end(&self) -> u32 {
        self.scanner.get_token_end()
    }

    pub(crate) fn token_value(&self) -> &str {
        self.scanner.get_token_value_ref()
    }

    pub(crate) fn has_preceding_line_break(&self) -> bool {
        self.scanner.has_preceding_line_break()
    }

    /// Span from `start` to the end of the last consumed token.
    pub(crate) fn span_from(&self, start: u32) -> Span {
        Span::new(start, self.last_end.max(start))
    }

    pub(crate) fn in_context(&self, flag: u32) -> bool {
        self.context_flags & flag != 0
    }

    /// Run `f` with `flag` set (or cleared), restoring the previous flags afterwards.
    pub(crate) fn with_context<T>(
        &mut self,
        flag: u32,
        enabled: bool,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        let saved = self.context_flags;
        if enabled {
            self.context_flags |= flag;
        } else {
            self.context_flags &= !flag;
        }
        let result = f(self);
        self.context_flags = saved;
        result
    }

    pub(crate) fn parse_optional(&mut self, kind: SyntaxKind) -> bool {
        if self.is_token(kind) {
            self.next_token();
            true
        } else {
            false
        }
    }

    pub(crate) fn parse_expected(&mut self, kind: SyntaxKind) -> ParseResult<()> {
        if self.parse_optional(kind) {
            Ok(())
        } else {
            Err(self.error_expected(&kind.describe()))
        }
    }

    /// `>` closing a type argument or parameter list.
    pub(crate) fn parse_expected_greater_than(&mut self) -> ParseResult<()> {
        self.parse_expected(SyntaxKind::GreaterThanToken)
    }

    /// Automatic semicolon insertion: a `;` is optional before `}`, at end of file and
    /// after a line break.
    pub(crate) fn can_parse_semicolon(&self) -> bool {
        self.is_token(SyntaxKind::SemicolonToken)
            || self.is_token(SyntaxKind::CloseBraceToken)
            || self.is_token(SyntaxKind::EndOfFileToken)
            || self.has_preceding_line_break()
    }

    pub(crate) fn parse_semicolon(&mut self) -> ParseResult<()> {
        if self.parse_optional(SyntaxKind::SemicolonToken) {
            return Ok(());
        }
        if self.can_parse_semicolon() {
            Ok(())
        } else {
            Err(self.error_expected("';'"))
        }
    }

    // =========================================================================
    // Identifiers
    // =========================================================================

    /// Identifier or contextual keyword usable as a binding/reference name.
    pub(crate) fn is_identifier(&self) -> bool {
        self.token().is_identifier_like()
    }

    /// Any identifier or keyword (property names after `.`, object keys).
    pub(crate) fn is_identifier_or_keyword(&self) -> bool {
        self.is_token(SyntaxKind::Identifier) || self.token().is_keyword()
    }

    pub(crate) fn parse_identifier(&mut self) -> ParseResult<Ident> {
        if !self.is_identifier() {
            return Err(self.error_expected("identifier"));
        }
        self.consume_identifier()
    }

    pub(crate) fn parse_identifier_name(&mut self) -> ParseResult<Ident> {
        if !self.is_identifier_or_keyword() {
            return Err(self.error_expected("identifier"));
        }
        self.consume_identifier()
    }

    fn consume_identifier(&mut self) -> ParseResult<Ident> {
        let start = self.token_pos();
        let sym = self.token_value().to_string();
        self.next_token();
        Ok(Ident::with_span(sym, self.span_from(start)))
    }

    pub(crate) fn parse_private_identifier(&mut self) -> ParseResult<Ident> {
        if !self.is_token(SyntaxKind::PrivateIdentifier) {
            return Err(self.error_expected("private identifier"));
        }
        self.consume_identifier()
    }

    // =========================================================================
    // Lookahead
    // =========================================================================

    pub(crate) fn save(&self) -> ParserSnapshot {
        ParserSnapshot {
            scanner: self.scanner.save_state(),
            current_token: self.current_token,
            last_end: self.last_end,
            context_flags: self.context_flags,
            recursion_depth: self.recursion_depth,
            node_depth: self.node_depth,
        }
    }

    pub(crate) fn restore(&mut self, snapshot: ParserSnapshot) {
        self.scanner.restore_state(snapshot.scanner);
        self.current_token = snapshot.current_token;
        self.last_end = snapshot.last_end;
        self.context_flags = snapshot.context_flags;
        self.recursion_depth = snapshot.recursion_depth;
        self.node_depth = snapshot.node_depth;
    }

    /// Evaluate `f` and rewind unconditionally.
    pub(crate) fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let snapshot = self.save();
        let result = f(self);
        self.restore(snapshot);
        result
    }

    /// Speculatively parse with `f`; on failure rewind and return `None`.
    pub(crate) fn try_parse<T>(&mut self, f: impl FnOnce(&mut Self) -> ParseResult<T>) -> Option<T> {
        let snapshot = self.save();
        match f(self) {
            Ok(value) => Some(value),
            Err(_) => {
                self.restore(snapshot);
                None
            }
        }
    }

    /// Kind of the token after the current one.
    pub(crate) fn peek_token(&mut self) -> SyntaxKind {
        self.look_ahead(|p| p.next_token())
    }

    /// True when the next token is on the same line as the current one.
    pub(crate) fn next_token_is_on_same_line(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            !p.has_preceding_line_break()
        })
    }

    // =========================================================================
    // Recursion guard
    // =========================================================================

    pub(crate) fn enter_recursion(&mut self) -> ParseResult<()> {
        if self.recursion_depth >= MAX_PARSER_RECURSION_DEPTH {
            return Err(self.error(ParseErrorKind::RecursionLimit(MAX_PARSER_RECURSION_DEPTH)));
        }
        self.enter_chain_link()?;
        self.recursion_depth += 1;
        Ok(())
    }

    pub(crate) fn exit_recursion(&mut self) {
        self.recursion_depth = self.recursion_depth.saturating_sub(1);
        self.node_depth = self.node_depth.saturating_sub(1);
    }

    /// Run a loop that folds a chain into left-nested nodes. Links taken with
    /// `enter_chain_link` stay counted until the loop is done.
    pub(crate) fn with_chain<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        let base = self.node_depth;
        let result = f(self);
        self.node_depth = base;
        result
    }

    /// One more level of nesting in the tree being built.
    pub(crate) fn enter_chain_link(&mut self) -> ParseResult<()> {
        if self.node_depth >= MAX_AST_DEPTH {
            return Err(self.error(ParseErrorKind::RecursionLimit(MAX_AST_DEPTH)));
        }
        self.node_depth += 1;
        Ok(())
    }

    // =========================================================================
    // Errors
    // =========================================================================

    pub(crate) fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError {
            file_name: self.file_name.clone(),
            pos: self.token_pos(),
            location: Location { line: 0, column: 0 },
            kind,
        }
    }

    pub(crate) fn error_expected(&self, expected: &str) -> ParseError {
        if self.scanner.is_unterminated() {
            return self.error_unterminated();
        }
        self.error(ParseErrorKind::Expected {
            expected: expected.to_string(),
            found: self.describe_current(),
        })
    }

    pub(crate) fn error_unexpected(&self) -> ParseError {
        if self.scanner.is_unterminated() {
            return self.error_unterminated();
        }
        self.error(ParseErrorKind::Unexpected(self.describe_current()))
    }

    fn error_unterminated(&self) -> ParseError {
        let what = match self.token() {
            SyntaxKind::StringLiteral => "string literal",
            SyntaxKind::RegularExpressionLiteral => "regular expression",
            SyntaxKind::NoSubstitutionTemplateLiteral
            | SyntaxKind::TemplateHead
            | SyntaxKind::TemplateMiddle
            | SyntaxKind::TemplateTail => "template literal",
            _ => "comment",
        };
        self.error(ParseErrorKind::Unterminated(what))
    }

    fn describe_current(&self) -> String {
        match self.token() {
            SyntaxKind::Identifier => format!("identifier '{}'", self.token_value()),
            SyntaxKind::Unknown => format!("'{}'", self.scanner.get_token_text()),
            kind => kind.describe(),
        }
    }
}
