//! Token kinds produced by the scanner.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    Unknown,
    EndOfFileToken,

    // Literals
    NumericLiteral,
    BigIntLiteral,
    StringLiteral,
    RegularExpressionLiteral,
    NoSubstitutionTemplateLiteral,
    TemplateHead,
    TemplateMiddle,
    TemplateTail,

    // Names
    Identifier,
    PrivateIdentifier,

    // Punctuation
    OpenBraceToken,
    CloseBraceToken,
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    DotToken,
    DotDotDotToken,
    SemicolonToken,
    CommaToken,
    QuestionDotToken,
    LessThanToken,
    GreaterThanToken,
    LessThanEqualsToken,
    GreaterThanEqualsToken,
    EqualsEqualsToken,
    ExclamationEqualsToken,
    EqualsEqualsEqualsToken,
    ExclamationEqualsEqualsToken,
    EqualsGreaterThanToken,
    PlusToken,
    MinusToken,
    AsteriskToken,
    AsteriskAsteriskToken,
    SlashToken,
    PercentToken,
    PlusPlusToken,
    MinusMinusToken,
    LessThanLessThanToken,
    GreaterThanGreaterThanToken,
    GreaterThanGreaterThanGreaterThanToken,
    AmpersandToken,
    BarToken,
    CaretToken,
    ExclamationToken,
    TildeToken,
    AmpersandAmpersandToken,
    BarBarToken,
    QuestionToken,
    QuestionQuestionToken,
    ColonToken,
    AtToken,

    // Assignments
    EqualsToken,
    PlusEqualsToken,
    MinusEqualsToken,
    AsteriskEqualsToken,
    AsteriskAsteriskEqualsToken,
    SlashEqualsToken,
    PercentEqualsToken,
    LessThanLessThanEqualsToken,
    GreaterThanGreaterThanEqualsToken,
    GreaterThanGreaterThanGreaterThanEqualsToken,
    AmpersandEqualsToken,
    BarEqualsToken,
    CaretEqualsToken,
    BarBarEqualsToken,
    AmpersandAmpersandEqualsToken,
    QuestionQuestionEqualsToken,

    // Reserved words
    BreakKeyword,
    CaseKeyword,
    CatchKeyword,
    ClassKeyword,
    ConstKeyword,
    ContinueKeyword,
    DebuggerKeyword,
    DefaultKeyword,
    DeleteKeyword,
    DoKeyword,
    ElseKeyword,
    EnumKeyword,
    ExportKeyword,
    ExtendsKeyword,
    FalseKeyword,
    FinallyKeyword,
    ForKeyword,
    FunctionKeyword,
    IfKeyword,
    ImportKeyword,
    InKeyword,
    InstanceOfKeyword,
    NewKeyword,
    NullKeyword,
    ReturnKeyword,
    SuperKeyword,
    SwitchKeyword,
    ThisKeyword,
    ThrowKeyword,
    TrueKeyword,
    TryKeyword,
    TypeOfKeyword,
    VarKeyword,
    VoidKeyword,
    WhileKeyword,
    WithKeyword,

    // Contextual keywords (valid identifiers outside their context)
    AbstractKeyword,
    AccessorKeyword,
    AnyKeyword,
    AsKeyword,
    AssertsKeyword,
    AsyncKeyword,
    AwaitKeyword,
    BigIntKeyword,
    BooleanKeyword,
    ConstructorKeyword,
    DeclareKeyword,
    FromKeyword,
    GetKeyword,
    GlobalKeyword,
    ImplementsKeyword,
    InferKeyword,
    InterfaceKeyword,
    IntrinsicKeyword,
    IsKeyword,
    KeyOfKeyword,
    LetKeyword,
    ModuleKeyword,
    NamespaceKeyword,
    NeverKeyword,
    NumberKeyword,
    ObjectKeyword,
    OfKeyword,
    OutKeyword,
    OverrideKeyword,
    PackageKeyword,
    PrivateKeyword,
    ProtectedKeyword,
    PublicKeyword,
    ReadonlyKeyword,
    SatisfiesKeyword,
    SetKeyword,
    StaticKeyword,
    StringKeyword,
    SymbolKeyword,
    TypeKeyword,
    UndefinedKeyword,
    UniqueKeyword,
    UnknownKeyword,
    YieldKeyword,
}

impl SyntaxKind {
    /// Keyword kind for an identifier-like word, if any.
    pub fn from_keyword(text: &str) -> Option<SyntaxKind> {
        use SyntaxKind::*;
        let kind = match text {
            "break" => BreakKeyword,
            "case" => CaseKeyword,
            "catch" => CatchKeyword,
            "class" => ClassKeyword,
            "const" => ConstKeyword,
            "continue" => ContinueKeyword,
            "debugger" => DebuggerKeyword,
            "default" => DefaultKeyword,
            "delete" => DeleteKeyword,
            "do" => DoKeyword,
            "else" => ElseKeyword,
            "enum" => EnumKeyword,
            "export" => ExportKeyword,
            "extends" => ExtendsKeyword,
            "false" => FalseKeyword,
            "finally" => FinallyKeyword,
            "for" => ForKeyword,
            "function" => FunctionKeyword,
            "if" => IfKeyword,
            "import" => ImportKeyword,
            "in" => InKeyword,
            "instanceof" => InstanceOfKeyword,
            "new" => NewKeyword,
            "null" => NullKeyword,
            "return" => ReturnKeyword,
            "super" => SuperKeyword,
            "switch" => SwitchKeyword,
            "this" => ThisKeyword,
            "throw" => ThrowKeyword,
            "true" => TrueKeyword,
            "try" => TryKeyword,
            "typeof" => TypeOfKeyword,
            "var" => VarKeyword,
            "void" => VoidKeyword,
            "while" => WhileKeyword,
            "with" => WithKeyword,
            "abstract" => AbstractKeyword,
            "accessor" => AccessorKeyword,
            "any" => AnyKeyword,
            "as" => AsKeyword,
            "asserts" => AssertsKeyword,
            "async" => AsyncKeyword,
            "await" => AwaitKeyword,
            "bigint" => BigIntKeyword,
            "boolean" => BooleanKeyword,
            "constructor" => ConstructorKeyword,
            "declare" => DeclareKeyword,
            "from" => FromKeyword,
            "get" => GetKeyword,
            "global" => GlobalKeyword,
            "implements" => ImplementsKeyword,
            "infer" => InferKeyword,
            "interface" => InterfaceKeyword,
            "intrinsic" => IntrinsicKeyword,
            "is" => IsKeyword,
            "keyof" => KeyOfKeyword,
            "let" => LetKeyword,
            "module" => ModuleKeyword,
            "namespace" => NamespaceKeyword,
            "never" => NeverKeyword,
            "number" => NumberKeyword,
            "object" => ObjectKeyword,
            "of" => OfKeyword,
            "out" => OutKeyword,
            "override" => OverrideKeyword,
            "package" => PackageKeyword,
            "private" => PrivateKeyword,
            "protected" => ProtectedKeyword,
            "public" => PublicKeyword,
            "readonly" => ReadonlyKeyword,
            "satisfies" => SatisfiesKeyword,
            "set" => SetKeyword,
            "static" => StaticKeyword,
            "string" => StringKeyword,
            "symbol" => SymbolKeyword,
            "type" => TypeKeyword,
            "undefined" => UndefinedKeyword,
            "unique" => UniqueKeyword,
            "unknown" => UnknownKeyword,
            "yield" => YieldKeyword,
            _ => return None,
        };
        Some(kind)
    }

    pub fn is_reserved_word(self) -> bool {
        (self as u16) >= (SyntaxKind::BreakKeyword as u16)
            && (self as u16) <= (SyntaxKind::WithKeyword as u16)
    }

    pub fn is_contextual_keyword(self) -> bool {
        (self as u16) >= (SyntaxKind::AbstractKeyword as u16)
            && (self as u16) <= (SyntaxKind::YieldKeyword as u16)
    }

    pub fn is_keyword(self) -> bool {
        self.is_reserved_word() || self.is_contextual_keyword()
    }

    /// Identifiers plus contextual keywords: anything usable as a binding name.
    pub fn is_identifier_like(self) -> bool {
        self == SyntaxKind::Identifier || self.is_contextual_keyword()
    }

    pub fn is_assignment_operator(self) -> bool {
        (self as u16) >= (SyntaxKind::EqualsToken as u16)
            && (self as u16) <= (SyntaxKind::QuestionQuestionEqualsToken as u16)
    }

    /// Source text of punctuation tokens, used in error messages and by the printer.
    pub fn punctuation_text(self) -> Option<&'static str> {
        use SyntaxKind::*;
        let text = match self {
            OpenBraceToken => "{",
            CloseBraceToken => "}",
            OpenParenToken => "(",
            CloseParenToken => ")",
            OpenBracketToken => "[",
            CloseBracketToken => "]",
            DotToken => ".",
            DotDotDotToken => "...",
            SemicolonToken => ";",
            CommaToken => ",",
            QuestionDotToken => "?.",
            LessThanToken => "<",
            GreaterThanToken => ">",
            LessThanEqualsToken => "<=",
            GreaterThanEqualsToken => ">=",
            EqualsEqualsToken => "==",
            ExclamationEqualsToken => "!=",
            EqualsEqualsEqualsToken => "===",
            ExclamationEqualsEqualsToken => "!==",
            EqualsGreaterThanToken => "=>",
            PlusToken => "+",
            MinusToken => "-",
            AsteriskToken => "*",
            AsteriskAsteriskToken => "**",
            SlashToken => "/",
            PercentToken => "%",
            PlusPlusToken => "++",
            MinusMinusToken => "--",
            LessThanLessThanToken => "<<",
            GreaterThanGreaterThanToken => ">>",
            GreaterThanGreaterThanGreaterThanToken => ">>>",
            AmpersandToken => "&",
            BarToken => "|",
            CaretToken => "^",
            ExclamationToken => "!",
            TildeToken => "~",
            AmpersandAmpersandToken => "&&",
            BarBarToken => "||",
            QuestionToken => "?",
            QuestionQuestionToken => "??",
            ColonToken => ":",
            AtToken => "@",
            EqualsToken => "=",
            PlusEqualsToken => "+=",
            MinusEqualsToken => "-=",
            AsteriskEqualsToken => "*=",
            AsteriskAsteriskEqualsToken => "**=",
            SlashEqualsToken => "/=",
            PercentEqualsToken => "%=",
            LessThanLessThanEqualsToken => "<<=",
            GreaterThanGreaterThanEqualsToken => ">>=",
            GreaterThanGreaterThanGreaterThanEqualsToken => ">>>=",
            AmpersandEqualsToken => "&=",
            BarEqualsToken => "|=",
            CaretEqualsToken => "^=",
            BarBarEqualsToken => "||=",
            AmpersandAmpersandEqualsToken => "&&=",
            QuestionQuestionEqualsToken => "??=",
            _ => return None,
        };
        Some(text)
    }

    /// Human-readable description for diagnostics.
    pub fn describe(self) -> String {
        if let Some(text) = self.punctuation_text() {
            return format!("'{text}'");
        }
        match self {
            SyntaxKind::EndOfFileToken => "end of file".to_string(),
            SyntaxKind::Identifier => "identifier".to_string(),
            SyntaxKind::PrivateIdentifier => "private identifier".to_string(),
            SyntaxKind::StringLiteral => "string literal".to_string(),
            SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral => {
                "numeric literal".to_string()
            }
            SyntaxKind::NoSubstitutionTemplateLiteral
            | SyntaxKind::TemplateHead
            | SyntaxKind::TemplateMiddle
            | SyntaxKind::TemplateTail => "template literal".to_string(),
            SyntaxKind::RegularExpressionLiteral => "regular expression".to_string(),
            kind if kind.is_keyword() => {
                let name = format!("{kind:?}");
                let word = name.trim_end_matches("Keyword").to_lowercase();
                format!("keyword '{word}'")
            }
            other => format!("{other:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_classification() {
        assert_eq!(SyntaxKind::from_keyword("typeof"), Some(SyntaxKind::TypeOfKeyword));
        assert!(SyntaxKind::TypeOfKeyword.is_reserved_word());
        assert!(!SyntaxKind::TypeKeyword.is_reserved_word());
        assert!(SyntaxKind::TypeKeyword.is_identifier_like());
        assert!(SyntaxKind::YieldKeyword.is_contextual_keyword());
        assert_eq!(SyntaxKind::from_keyword("typia"), None);
    }

    #[test]
    fn assignment_operators() {
        assert!(SyntaxKind::EqualsToken.is_assignment_operator());
        assert!(SyntaxKind::QuestionQuestionEqualsToken.is_assignment_operator());
        assert!(!SyntaxKind::EqualsEqualsToken.is_assignment_operator());
    }
}
