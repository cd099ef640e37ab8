//! Scanner state machine.
//!
//! The scanner produces one token per `scan()` call. Trivia (whitespace and comments) is
//! skipped, but comment ranges are recorded so the printer can re-emit them. A few tokens
//! are context sensitive and are re-scanned on request by the parser:
//!
//! - `>` is always scanned alone so that `Array<Array<T>>` closes two type argument lists;
//!   `re_scan_greater_token` merges it into `>=`, `>>`, `>>>`, `>>=` or `>>>=`.
//! - `/` and `/=` become a regular expression via `re_scan_slash_token`.
//! - `}` continues a template literal via `re_scan_template_token`.

use crate::char_codes::{
    is_identifier_part, is_identifier_start, is_line_break, is_white_space_single_line,
};
use crate::syntax_kind::SyntaxKind;
use tsguard_common::{Comment, Span};

/// Flags describing the most recently scanned token.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenFlags {
    None = 0,
    PrecedingLineBreak = 1 << 0,
    Unterminated = 1 << 1,
    Scientific = 1 << 2,
    HexSpecifier = 1 << 3,
    BinarySpecifier = 1 << 4,
    OctalSpecifier = 1 << 5,
    ContainsSeparator = 1 << 6,
    /// A string contained an escape the scanner does not cook (e.g. `\u{...}` above the
    /// scalar range); the raw text is still available.
    ContainsInvalidEscape = 1 << 7,
}

/// Everything needed to rewind the scanner for speculative parsing.
#[derive(Clone, Debug)]
pub struct ScannerSnapshot {
    pos: usize,
    full_start: usize,
    token_start: usize,
    token: SyntaxKind,
    token_value: String,
    token_flags: u32,
    comment_count: usize,
}

pub struct ScannerState {
    source: String,
    /// Current byte offset.
    pos: usize,
    /// Start of the current token including leading trivia.
    full_start: usize,
    /// Start of the current token excluding leading trivia.
    token_start: usize,
    token: SyntaxKind,
    /// Cooked value: identifier text, unescaped string contents, raw numeric text,
    /// raw template segment text, or the full regular expression.
    token_value: String,
    token_flags: u32,
    comments: Vec<Comment>,
}

impl ScannerState {
    pub fn new(source: String) -> Self {
        ScannerState {
            source,
            pos: 0,
            full_start: 0,
            token_start: 0,
            token: SyntaxKind::Unknown,
            token_value: String::new(),
            token_flags: 0,
            comments: Vec::new(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn source_text(&self) -> &str {
        &self.source
    }

    pub fn get_token(&self) -> SyntaxKind {
        self.token
    }

    pub fn get_token_value_ref(&self) -> &str {
        &self.token_value
    }

    /// Raw source text of the current token.
    pub fn get_token_text(&self) -> &str {
        &self.source[self.token_start..self.pos]
    }

    pub fn get_token_full_start(&self) -> u32 {
        self.full_start as u32
    }

    pub fn get_token_start(&self) -> u32 {
        self.token_start as u32
    }

    pub fn get_token_end(&self) -> u32 {
        self.pos as u32
    }

    pub fn get_token_flags(&self) -> u32 {
        self.token_flags
    }

    pub fn has_preceding_line_break(&self) -> bool {
        self.token_flags & TokenFlags::PrecedingLineBreak as u32 != 0
    }

    pub fn is_unterminated(&self) -> bool {
        self.token_flags & TokenFlags::Unterminated as u32 != 0
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn take_comments(&mut self) -> Vec<Comment> {
        std::mem::take(&mut self.comments)
    }

    // =========================================================================
    // Snapshots
    // =========================================================================

    pub fn save_state(&self) -> ScannerSnapshot {
        ScannerSnapshot {
            pos: self.pos,
            full_start: self.full_start,
            token_start: self.token_start,
            token: self.token,
            token_value: self.token_value.clone(),
            token_flags: self.token_flags,
            comment_count: self.comments.len(),
        }
    }

    pub fn restore_state(&mut self, snapshot: ScannerSnapshot) {
        self.pos = snapshot.pos;
        self.full_start = snapshot.full_start;
        self.token_start = snapshot.token_start;
        self.token = snapshot.token;
        self.token_value = snapshot.token_value;
        self.token_flags = snapshot.token_flags;
        // Comments seen during lookahead will be recorded again on the real pass.
        self.comments.truncate(snapshot.comment_count);
    }

    // =========================================================================
    // Character access
    // =========================================================================

    fn byte_at(&self, pos: usize) -> Option<u8> {
        self.source.as_bytes().get(pos).copied()
    }

    fn char_at(&self, pos: usize) -> Option<char> {
        match self.byte_at(pos) {
            Some(b) if b.is_ascii() => Some(b as char),
            Some(_) => self.source[pos..].chars().next(),
            None => None,
        }
    }

    fn is_at(&self, pos: usize, text: &str) -> bool {
        self.source.as_bytes()[pos.min(self.source.len())..].starts_with(text.as_bytes())
    }

    // =========================================================================
    // Scanning
    // =========================================================================

    /// Scan the next token and return its kind.
    pub fn scan(&mut self) -> SyntaxKind {
        self.full_start = self.pos;
        self.token_flags = 0;
        self.token_value.clear();
        self.skip_trivia();
        self.token_start = self.pos;

        let Some(ch) = self.char_at(self.pos) else {
            self.token = SyntaxKind::EndOfFileToken;
            return self.token;
        };

        self.token = match ch {
            '"' | '\'' => self.scan_string(ch),
            '`' => {
                self.pos += 1;
                self.scan_template_segment(true)
            }
            '0'..='9' => self.scan_number(),
            '.' => {
                if self.byte_at(self.pos + 1).is_some_and(|b| b.is_ascii_digit()) {
                    self.scan_number()
                } else if self.is_at(self.pos, "...") {
                    self.pos += 3;
                    SyntaxKind::DotDotDotToken
                } else {
                    self.pos += 1;
                    SyntaxKind::DotToken
                }
            }
            '#' => {
                if self.pos == 0 && self.is_at(1, "!") {
                    // Shebang lines are trivia; record them so they survive printing.
                    self.skip_single_line_comment();
                    return self.scan();
                }
                match self.char_at(self.pos + 1) {
                    Some(next) if is_identifier_start(next) => {
                        self.pos += 1;
                        self.scan_identifier_rest();
                        self.token_value = self.source[self.token_start..self.pos].to_string();
                        SyntaxKind::PrivateIdentifier
                    }
                    _ => {
                        self.pos += 1;
                        SyntaxKind::Unknown
                    }
                }
            }
            c if is_identifier_start(c) => {
                self.scan_identifier_rest();
                self.token_value = self.source[self.token_start..self.pos].to_string();
                SyntaxKind::from_keyword(&self.token_value).unwrap_or(SyntaxKind::Identifier)
            }
            _ => self.scan_punctuation(ch),
        };
        self.token
    }

    fn skip_trivia(&mut self) {
        while let Some(ch) = self.char_at(self.pos) {
            if is_line_break(ch) {
                self.token_flags |= TokenFlags::PrecedingLineBreak as u32;
                self.pos += ch.len_utf8();
            } else if is_white_space_single_line(ch) {
                self.pos += ch.len_utf8();
            } else if ch == '/' && self.is_at(self.pos + 1, "/") {
                self.skip_single_line_comment();
            } else if ch == '/' && self.is_at(self.pos + 1, "*") {
                self.skip_multi_line_comment();
            } else {
                break;
            }
        }
    }

    fn skip_single_line_comment(&mut self) {
        let start = self.pos;
        while let Some(ch) = self.char_at(self.pos) {
            if is_line_break(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
        let has_new_line = self.char_at(self.pos).is_some_and(is_line_break);
        self.comments.push(Comment::line(
            Span::new(start as u32, self.pos as u32),
            has_new_line,
        ));
    }

    fn skip_multi_line_comment(&mut self) {
        let start = self.pos;
        self.pos += 2;
        let mut terminated = false;
        while let Some(ch) = self.char_at(self.pos) {
            if ch == '*' && self.is_at(self.pos + 1, "/") {
                self.pos += 2;
                terminated = true;
                break;
            }
            if is_line_break(ch) {
                self.token_flags |= TokenFlags::PrecedingLineBreak as u32;
            }
            self.pos += ch.len_utf8();
        }
        if !terminated {
            self.token_flags |= TokenFlags::Unterminated as u32;
        }
        let mut look = self.pos;
        while let Some(ch) = self.char_at(look) {
            if !is_white_space_single_line(ch) {
                break;
            }
            look += ch.len_utf8();
        }
        let has_new_line = self.char_at(look).is_some_and(is_line_break);
        self.comments.push(Comment::block(
            Span::new(start as u32, self.pos as u32),
            has_new_line,
        ));
    }

    fn scan_identifier_rest(&mut self) {
        while let Some(ch) = self.char_at(self.pos) {
            if !is_identifier_part(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
    }

    fn scan_string(&mut self, quote: char) -> SyntaxKind {
        self.pos += 1;
        let mut value = String::new();
        loop {
            let Some(ch) = self.char_at(self.pos) else {
                self.token_flags |= TokenFlags::Unterminated as u32;
                break;
            };
            if ch == quote {
                self.pos += 1;
                break;
            }
            if ch == '\\' {
                self.pos += 1;
                self.scan_escape(&mut value);
                continue;
            }
            if is_line_break(ch) && ch != '\u{2028}' && ch != '\u{2029}' {
                self.token_flags |= TokenFlags::Unterminated as u32;
                break;
            }
            value.push(ch);
            self.pos += ch.len_utf8();
        }
        self.token_value = value;
        SyntaxKind::StringLiteral
    }

    /// Cook one escape sequence; `pos` is just past the backslash.
    fn scan_escape(&mut self, out: &mut String) {
        let Some(ch) = self.char_at(self.pos) else {
            self.token_flags |= TokenFlags::Unterminated as u32;
            return;
        };
        self.pos += ch.len_utf8();
        match ch {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{0008}'),
            'f' => out.push('\u{000C}'),
            'v' => out.push('\u{000B}'),
            '0' if !self.byte_at(self.pos).is_some_and(|b| b.is_ascii_digit()) => out.push('\0'),
            'x' => match self.scan_hex_digits(2, 2) {
                Some(code) => out.push(char::from_u32(code).unwrap_or('\u{FFFD}')),
                None => self.token_flags |= TokenFlags::ContainsInvalidEscape as u32,
            },
            'u' => {
                let code = if self.byte_at(self.pos) == Some(b'{') {
                    self.pos += 1;
                    let code = self.scan_hex_digits(1, 6);
                    if self.byte_at(self.pos) == Some(b'}') {
                        self.pos += 1;
                        code
                    } else {
                        None
                    }
                } else {
                    self.scan_hex_digits(4, 4)
                };
                match code.and_then(char::from_u32) {
                    Some(c) => out.push(c),
                    None => {
                        out.push('\u{FFFD}');
                        self.token_flags |= TokenFlags::ContainsInvalidEscape as u32;
                    }
                }
            }
            '\r' => {
                // Line continuation; `\r\n` counts as one line break.
                if self.byte_at(self.pos) == Some(b'\n') {
                    self.pos += 1;
                }
            }
            '\n' | '\u{2028}' | '\u{2029}' => {}
            other => out.push(other),
        }
    }

    fn scan_hex_digits(&mut self, min: usize, max: usize) -> Option<u32> {
        let start = self.pos;
        let mut value: u32 = 0;
        while self.pos - start < max {
            let Some(digit) = self.byte_at(self.pos).and_then(|b| (b as char).to_digit(16)) else {
                break;
            };
            value = value * 16 + digit;
            self.pos += 1;
        }
        (self.pos - start >= min).then_some(value)
    }

    /// Scan template text up to `` ` `` or `${`. `pos` is just past the opening
    /// `` ` `` or `}`.
    fn scan_template_segment(&mut self, is_start: bool) -> SyntaxKind {
        let text_start = self.pos;
        loop {
            let Some(ch) = self.char_at(self.pos) else {
                self.token_flags |= TokenFlags::Unterminated as u32;
                self.token_value = self.source[text_start..self.pos].to_string();
                return if is_start {
                    SyntaxKind::NoSubstitutionTemplateLiteral
                } else {
                    SyntaxKind::TemplateTail
                };
            };
            match ch {
                '`' => {
                    self.token_value = self.source[text_start..self.pos].to_string();
                    self.pos += 1;
                    return if is_start {
                        SyntaxKind::NoSubstitutionTemplateLiteral
                    } else {
                        SyntaxKind::TemplateTail
                    };
                }
                '$' if self.is_at(self.pos + 1, "{") => {
                    self.token_value = self.source[text_start..self.pos].to_string();
                    self.pos += 2;
                    return if is_start {
                        SyntaxKind::TemplateHead
                    } else {
                        SyntaxKind::TemplateMiddle
                    };
                }
                '\\' => {
                    self.pos += 1;
                    if let Some(escaped) = self.char_at(self.pos) {
                        self.pos += escaped.len_utf8();
                    }
                }
                _ => self.pos += ch.len_utf8(),
            }
        }
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let start = self.pos;
        if self.byte_at(self.pos) == Some(b'0') {
            let radix = match self.byte_at(self.pos + 1) {
                Some(b'x' | b'X') => Some((16, TokenFlags::HexSpecifier)),
                Some(b'b' | b'B') => Some((2, TokenFlags::BinarySpecifier)),
                Some(b'o' | b'O') => Some((8, TokenFlags::OctalSpecifier)),
                _ => None,
            };
            if let Some((radix, flag)) = radix {
                self.pos += 2;
                self.token_flags |= flag as u32;
                self.scan_digits(radix);
                return self.finish_number(start);
            }
        }

        self.scan_digits(10);
        if self.byte_at(self.pos) == Some(b'.') {
            self.pos += 1;
            self.scan_digits(10);
        }
        if matches!(self.byte_at(self.pos), Some(b'e' | b'E')) {
            let mut look = self.pos + 1;
            if matches!(self.byte_at(look), Some(b'+' | b'-')) {
                look += 1;
            }
            if self.byte_at(look).is_some_and(|b| b.is_ascii_digit()) {
                self.pos = look;
                self.token_flags |= TokenFlags::Scientific as u32;
                self.scan_digits(10);
            }
        }
        self.finish_number(start)
    }

    fn scan_digits(&mut self, radix: u32) {
        while let Some(b) = self.byte_at(self.pos) {
            if b == b'_' {
                self.token_flags |= TokenFlags::ContainsSeparator as u32;
            } else if !(b as char).is_digit(radix) {
                break;
            }
            self.pos += 1;
        }
    }

    fn finish_number(&mut self, start: usize) -> SyntaxKind {
        let kind = if self.byte_at(self.pos) == Some(b'n') {
            self.pos += 1;
            SyntaxKind::BigIntLiteral
        } else {
            SyntaxKind::NumericLiteral
        };
        self.token_value = self.source[start..self.pos].to_string();
        kind
    }

    fn scan_punctuation(&mut self, ch: char) -> SyntaxKind {
        use SyntaxKind::*;
        // Longest match first.
        const TABLE: &[(&str, SyntaxKind)] = &[
            ("&&=", AmpersandAmpersandEqualsToken),
            ("||=", BarBarEqualsToken),
            ("??=", QuestionQuestionEqualsToken),
            ("**=", AsteriskAsteriskEqualsToken),
            ("<<=", LessThanLessThanEqualsToken),
            ("===", EqualsEqualsEqualsToken),
            ("!==", ExclamationEqualsEqualsToken),
            ("=>", EqualsGreaterThanToken),
            ("==", EqualsEqualsToken),
            ("!=", ExclamationEqualsToken),
            ("<=", LessThanEqualsToken),
            ("<<", LessThanLessThanToken),
            ("++", PlusPlusToken),
            ("--", MinusMinusToken),
            ("+=", PlusEqualsToken),
            ("-=", MinusEqualsToken),
            ("**", AsteriskAsteriskToken),
            ("*=", AsteriskEqualsToken),
            ("/=", SlashEqualsToken),
            ("%=", PercentEqualsToken),
            ("&&", AmpersandAmpersandToken),
            ("&=", AmpersandEqualsToken),
            ("||", BarBarToken),
            ("|=", BarEqualsToken),
            ("^=", CaretEqualsToken),
            ("??", QuestionQuestionToken),
            ("{", OpenBraceToken),
            ("}", CloseBraceToken),
            ("(", OpenParenToken),
            (")", CloseParenToken),
            ("[", OpenBracketToken),
            ("]", CloseBracketToken),
            (";", SemicolonToken),
            (",", CommaToken),
            ("<", LessThanToken),
            (">", GreaterThanToken),
            ("=", EqualsToken),
            ("+", PlusToken),
            ("-", MinusToken),
            ("*", AsteriskToken),
            ("/", SlashToken),
            ("%", PercentToken),
            ("&", AmpersandToken),
            ("|", BarToken),
            ("^", CaretToken),
            ("!", ExclamationToken),
            ("~", TildeToken),
            ("?", QuestionToken),
            (":", ColonToken),
            ("@", AtToken),
        ];

        // `?.` is optional chaining unless followed by a digit (`a?.5:b` is a conditional).
        if ch == '?'
            && self.is_at(self.pos + 1, ".")
            && !self.byte_at(self.pos + 2).is_some_and(|b| b.is_ascii_digit())
        {
            self.pos += 2;
            return QuestionDotToken;
        }

        for (text, kind) in TABLE {
            if self.is_at(self.pos, text) {
                self.pos += text.len();
                return *kind;
            }
        }
        self.pos += ch.len_utf8();
        Unknown
    }

    // =========================================================================
    // Rescans
    // =========================================================================

    /// Merge a `>` token with following `>` and `=` characters.
    pub fn re_scan_greater_token(&mut self) -> SyntaxKind {
        if self.token != SyntaxKind::GreaterThanToken {
            return self.token;
        }
        let (len, kind) = if self.is_at(self.pos, ">>=") {
            (3, SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken)
        } else if self.is_at(self.pos, ">>") {
            (2, SyntaxKind::GreaterThanGreaterThanGreaterThanToken)
        } else if self.is_at(self.pos, ">=") {
            (2, SyntaxKind::GreaterThanGreaterThanEqualsToken)
        } else if self.is_at(self.pos, ">") {
            (1, SyntaxKind::GreaterThanGreaterThanToken)
        } else if self.is_at(self.pos, "=") {
            (1, SyntaxKind::GreaterThanEqualsToken)
        } else {
            (0, SyntaxKind::GreaterThanToken)
        };
        self.pos += len;
        self.token = kind;
        kind
    }

    /// Re-scan a `/` or `/=` token as a regular expression literal.
    pub fn re_scan_slash_token(&mut self) -> SyntaxKind {
        if !matches!(self.token, SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken) {
            return self.token;
        }
        let mut pos = self.token_start + 1;
        let mut in_class = false;
        loop {
            let Some(ch) = self.char_at(pos) else {
                self.token_flags |= TokenFlags::Unterminated as u32;
                break;
            };
            if is_line_break(ch) {
                self.token_flags |= TokenFlags::Unterminated as u32;
                break;
            }
            pos += ch.len_utf8();
            match ch {
                '\\' => {
                    if let Some(escaped) = self.char_at(pos) {
                        if !is_line_break(escaped) {
                            pos += escaped.len_utf8();
                        }
                    }
                }
                '[' => in_class = true,
                ']' => in_class = false,
                '/' if !in_class => break,
                _ => {}
            }
        }
        while let Some(ch) = self.char_at(pos) {
            if !is_identifier_part(ch) {
                break;
            }
            pos += ch.len_utf8();
        }
        self.pos = pos;
        self.token_value = self.source[self.token_start..self.pos].to_string();
        self.token = SyntaxKind::RegularExpressionLiteral;
        self.token
    }

    /// Continue a template literal after the `}` that closes a substitution.
    pub fn re_scan_template_token(&mut self) -> SyntaxKind {
        if self.token != SyntaxKind::CloseBraceToken {
            return self.token;
        }
        self.pos = self.token_start + 1;
        self.token_value.clear();
        self.token = self.scan_template_segment(false);
        self.token
    }
}

/// Numeric value of a numeric literal's source text (separators allowed).
pub fn parse_numeric_literal(text: &str) -> Option<f64> {
    let cleaned: String = text.chars().filter(|&c| c != '_').collect();
    let lower = cleaned.to_ascii_lowercase();
    let radix_digits = |digits: &str, radix: u32| -> Option<f64> {
        if digits.is_empty() {
            return None;
        }
        digits.chars().try_fold(0f64, |acc, c| {
            c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
        })
    };
    if let Some(hex) = lower.strip_prefix("0x") {
        return radix_digits(hex, 16);
    }
    if let Some(bin) = lower.strip_prefix("0b") {
        return radix_digits(bin, 2);
    }
    if let Some(oct) = lower.strip_prefix("0o") {
        return radix_digits(oct, 8);
    }
    lower.parse::<f64>().ok()
}
