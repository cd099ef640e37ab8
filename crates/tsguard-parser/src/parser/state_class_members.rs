//! Parser state - class declarations, class expressions and class members

use super::state::ParserState;
use crate::ast::*;
use crate::error::ParseResult;
use tsguard_scanner::SyntaxKind;

impl ParserState {
    /// Parse `[abstract] class [Name] [<T>] [extends X<A>] [implements I, J] { ... }`.
    ///
    /// `start` is the position of the first modifier, so declaration spans cover
    /// `export`/`declare`/`abstract`.
    pub(crate) fn parse_class(&mut self, start: u32) -> ParseResult<(Option<Ident>, Box<Class>)> {
        let is_abstract = self.parse_optional(SyntaxKind::AbstractKeyword);
        self.parse_expected(SyntaxKind::ClassKeyword)?;

        let ident = if self.is_identifier() && !self.is_token(SyntaxKind::ImplementsKeyword) {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        let type_params = self.parse_type_parameters()?;

        let mut super_class = None;
        let mut super_type_args = None;
        if self.parse_optional(SyntaxKind::ExtendsKeyword) {
            super_class = Some(Box::new(self.parse_left_hand_side_expression()?));
            if self.is_token(SyntaxKind::LessThanToken) {
                super_type_args = Some(self.parse_type_arguments()?);
            }
        }

        let mut implements = Vec::new();
        if self.parse_optional(SyntaxKind::ImplementsKeyword) {
            loop {
                implements.push(self.parse_expression_with_type_arguments()?);
                if !self.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
        }

        self.parse_expected(SyntaxKind::OpenBraceToken)?;
        let mut body = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken) {
            if self.is_token(SyntaxKind::EndOfFileToken) {
                return Err(self.error_expected("'}'"));
            }
            body.push(self.parse_class_member()?);
        }
        self.parse_expected(SyntaxKind::CloseBraceToken)?;

        Ok((
            ident,
            Box::new(Class {
                span: self.span_from(start),
                is_abstract,
                type_params,
                super_class,
                super_type_args,
                implements,
                body,
            }),
        ))
    }

    // =========================================================================
    // Parse Methods - Class Members
    // =========================================================================

    /// A modifier keyword only modifies when something that can start a member follows.
    fn can_follow_modifier(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            matches!(
                p.token(),
                SyntaxKind::OpenBracketToken
                    | SyntaxKind::OpenBraceToken
                    | SyntaxKind::AsteriskToken
                    | SyntaxKind::DotDotDotToken
                    | SyntaxKind::PrivateIdentifier
            ) || Self::is_property_name_start(p.token())
        })
    }

    fn parse_member_modifiers(&mut self) -> MemberModifiers {
        let mut modifiers = MemberModifiers::default();
        loop {
            let token = self.token();
            let is_modifier = matches!(
                token,
                SyntaxKind::PublicKeyword
                    | SyntaxKind::PrivateKeyword
                    | SyntaxKind::ProtectedKeyword
                    | SyntaxKind::StaticKeyword
                    | SyntaxKind::AbstractKeyword
                    | SyntaxKind::OverrideKeyword
                    | SyntaxKind::ReadonlyKeyword
                    | SyntaxKind::DeclareKeyword
                    | SyntaxKind::AccessorKeyword
            );
            // `static {` opens a static block, not a modifier
            if !is_modifier
                || !self.can_follow_modifier()
                || (token == SyntaxKind::StaticKeyword
                    && self.peek_token() == SyntaxKind::OpenBraceToken)
            {
                return modifiers;
            }
            match token {
                SyntaxKind::PublicKeyword => modifiers.accessibility = Some(Accessibility::Public),
                SyntaxKind::PrivateKeyword => modifiers.accessibility = Some(Accessibility::Private),
                SyntaxKind::ProtectedKeyword => {
                    modifiers.accessibility = Some(Accessibility::Protected)
                }
                SyntaxKind::StaticKeyword => modifiers.is_static = true,
                SyntaxKind::AbstractKeyword => modifiers.is_abstract = true,
                SyntaxKind::OverrideKeyword => modifiers.is_override = true,
                SyntaxKind::ReadonlyKeyword => modifiers.readonly = true,
                SyntaxKind::DeclareKeyword => modifiers.declare = true,
                _ => modifiers.accessor = true,
            }
            self.next_token();
        }
    }

    /// `[key: string]: T` as opposed to a computed property name.
    pub(crate) fn is_index_signature(&mut self) -> bool {
        self.is_token(SyntaxKind::OpenBracketToken)
            && self.look_ahead(|p| {
                p.next_token();
                if p.is_token(SyntaxKind::DotDotDotToken) {
                    return true;
                }
                if !p.is_identifier_or_keyword() {
                    return false;
                }
                p.next_token();
                matches!(p.token(), SyntaxKind::ColonToken | SyntaxKind::CommaToken)
            })
    }

    pub(crate) fn parse_index_signature(
        &mut self,
        start: u32,
        is_static: bool,
        readonly: bool,
    ) -> ParseResult<TsIndexSignature> {
        self.parse_expected(SyntaxKind::OpenBracketToken)?;
        let params = self.parse_parameter_list(SyntaxKind::CloseBracketToken)?;
        self.parse_expected(SyntaxKind::CloseBracketToken)?;
        let type_ann = if self.parse_optional(SyntaxKind::ColonToken) {
            Some(Box::new(self.parse_type()?))
        } else {
            None
        };
        Ok(TsIndexSignature {
            span: self.span_from(start),
            is_static,
            readonly,
            params,
            type_ann,
        })
    }

    fn parse_class_member(&mut self) -> ParseResult<ClassMember> {
        let start = self.token_pos();
        if self.parse_optional(SyntaxKind::SemicolonToken) {
            return Ok(ClassMember::Empty(self.span_from(start)));
        }
        if self.is_token(SyntaxKind::StaticKeyword) && self.peek_token() == SyntaxKind::OpenBraceToken {
            self.next_token();
            let body = self.parse_function_block(false)?;
            return Ok(ClassMember::StaticBlock(StaticBlock {
                span: self.span_from(start),
                body,
            }));
        }

        let modifiers = self.parse_member_modifiers();

        if self.is_index_signature() {
            let sig = self.parse_index_signature(start, modifiers.is_static, modifiers.readonly)?;
            self.parse_semicolon()?;
            return Ok(ClassMember::IndexSignature(sig));
        }

        if self.is_token(SyntaxKind::ConstructorKeyword)
            && self.peek_token() == SyntaxKind::OpenParenToken
        {
            self.next_token();
            let params = self.parse_parameters()?;
            let body = if self.is_token(SyntaxKind::OpenBraceToken) {
                Some(self.parse_function_block(false)?)
            } else {
                self.parse_semicolon()?;
                None
            };
            return Ok(ClassMember::Constructor(Constructor {
                span: self.span_from(start),
                accessibility: modifiers.accessibility,
                params,
                body,
            }));
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

        let key = self.parse_property_name()?;
        let optional = self.parse_optional(SyntaxKind::QuestionToken);

        if kind != MethodKind::Method
            || is_async
            || is_generator
            || self.is_token(SyntaxKind::OpenParenToken)
            || self.is_token(SyntaxKind::LessThanToken)
        {
            let function = self.parse_function_rest(start, is_async, is_generator)?;
            if function.body.is_none() {
                self.parse_semicolon()?;
            }
            return Ok(ClassMember::Method(ClassMethod {
                span: self.span_from(start),
                modifiers,
                key,
                kind,
                optional,
                function,
            }));
        }

        let definite = !optional && self.parse_optional(SyntaxKind::ExclamationToken);
        let type_ann = if self.parse_optional(SyntaxKind::ColonToken) {
            Some(Box::new(self.parse_type()?))
        } else {
            None
        };
        let value = if self.parse_optional(SyntaxKind::EqualsToken) {
            Some(Box::new(self.parse_assignment_expression()?))
        } else {
            None
        };
        self.parse_semicolon()?;
        Ok(ClassMember::Property(ClassProp {
            span: self.span_from(start),
            modifiers,
            key,
            optional,
            definite,
            type_ann,
            value,
        }))
    }
}
