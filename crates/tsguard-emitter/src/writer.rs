//! Output buffer with indentation tracking.
//!
//! Indentation is written lazily: the first write on a fresh line emits the current
//! indent, so blank lines never carry trailing whitespace.

#[derive(Debug)]
pub struct SourceWriter {
    output: String,
    indent_level: usize,
    indent_width: usize,
    at_line_start: bool,
}

impl SourceWriter {
    pub fn new(indent_width: usize) -> Self {
        SourceWriter {
            output: String::new(),
            indent_level: 0,
            indent_width,
            at_line_start: true,
        }
    }

    pub fn with_capacity(indent_width: usize, capacity: usize) -> Self {
        SourceWriter {
            output: String::with_capacity(capacity),
            ..SourceWriter::new(indent_width)
        }
    }

    pub fn write(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.write_indent_if_needed();
        self.output.push_str(text);
    }

    pub fn write_char(&mut self, ch: char) {
        self.write_indent_if_needed();
        self.output.push(ch);
    }

    pub fn write_space(&mut self) {
        self.write_char(' ');
    }

    /// End the current line. Consecutive calls produce blank lines.
    pub fn write_line(&mut self) {
        self.output.push('\n');
        self.at_line_start = true;
    }

    /// End the current line unless nothing has been written on it yet.
    pub fn ensure_new_line(&mut self) {
        if !self.at_line_start {
            self.write_line();
        }
    }

    pub fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn decrease_indent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    pub fn is_at_line_start(&self) -> bool {
        self.at_line_start
    }

    pub fn len(&self) -> usize {
        self.output.len()
    }

    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    pub fn into_output(self) -> String {
        self.output
    }

    fn write_indent_if_needed(&mut self) {
        if self.at_line_start {
            self.at_line_start = false;
            let width = self.indent_level * self.indent_width;
            self.output.extend(std::iter::repeat_n(' ', width));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SourceWriter;

    #[test]
    fn indents_lazily() {
        let mut writer = SourceWriter::new(2);
        writer.write("{");
        writer.write_line();
        writer.increase_indent();
        writer.write_line();
        writer.write("a;");
        writer.write_line();
        writer.decrease_indent();
        writer.write("}");
        assert_eq!(writer.into_output(), "{\n\n  a;\n}");
    }

    #[test]
    fn ensure_new_line_does_not_double_up() {
        let mut writer = SourceWriter::new(4);
        writer.write("x");
        writer.ensure_new_line();
        writer.ensure_new_line();
        writer.write("y");
        assert_eq!(writer.into_output(), "x\ny");
    }

    #[test]
    fn decrease_below_zero_is_ignored() {
        let mut writer = SourceWriter::new(4);
        writer.decrease_indent();
        writer.write("x");
        assert_eq!(writer.into_output(), "x");
    }
}
