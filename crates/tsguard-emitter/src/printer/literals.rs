use super::Printer;
use tsguard_parser::ast::{BigInt, Ident, ModuleExportName, Number, PropName, Str};
use tsguard_scanner::char_codes::is_identifier_text;

impl<'a> Printer<'a> {
    // =========================================================================
    // Literals
    // =========================================================================

    pub(super) fn emit_ident(&mut self, ident: &Ident) {
        self.write(&ident.sym);
    }

    /// Parsed strings keep their quoting; synthesized strings use single quotes.
    pub(super) fn emit_str(&mut self, s: &Str) {
        match &s.raw {
            Some(raw) => self.write(raw),
            None => {
                let quoted = quote_string(&s.value, '\'');
                self.write(&quoted);
            }
        }
    }

    pub(super) fn emit_number(&mut self, n: &Number) {
        match &n.raw {
            Some(raw) => self.write(raw),
            None => {
                let text = format_number(n.value);
                self.write(&text);
            }
        }
    }

    pub(super) fn emit_bigint(&mut self, b: &BigInt) {
        match &b.raw {
            Some(raw) => self.write(raw),
            None => {
                self.write(&b.value);
                self.write_char('n');
            }
        }
    }

    pub(super) fn emit_prop_name(&mut self, name: &PropName) {
        match name {
            PropName::Ident(ident) | PropName::Private(ident) => self.emit_ident(ident),
            // A synthesized key only needs quotes when it is not a valid identifier
            PropName::Str(s) if s.raw.is_none() && is_identifier_text(&s.value) => {
                self.write(&s.value);
            }
            PropName::Str(s) => self.emit_str(s),
            PropName::Num(n) => self.emit_number(n),
            PropName::BigInt(b) => self.emit_bigint(b),
            PropName::Computed(computed) => {
                self.write_char('[');
                self.emit_expression_prec(&computed.expr, super::prec::ASSIGN);
                self.write_char(']');
            }
        }
    }

    pub(super) fn emit_module_export_name(&mut self, name: &ModuleExportName) {
        match name {
            ModuleExportName::Ident(ident) => self.emit_ident(ident),
            ModuleExportName::Str(s) => self.emit_str(s),
        }
    }
}

/// Quote `value` as a JavaScript string literal.
pub fn quote_string(value: &str, quote: char) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 || c == '\u{7f}' => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Render a number the way JavaScript source spells it.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e21 {
        return format!("{value:.0}");
    }
    format!("{value}")
}
