//! Comment re-emission.
//!
//! Comments live outside the AST, sorted by position. The printer drains them
//! in order: everything ending before a statement is written in front of it, a comment
//! on the same line after a statement is written behind it, and whatever is left over
//! (comments inside expressions, trailing file comments) comes out before the next
//! statement or at the end of the file.

use super::Printer;

impl<'a> Printer<'a> {
    /// Emit pending comments that end at or before `pos`.
    pub(super) fn emit_leading_comments(&mut self, pos: u32) {
        let Some(text) = self.source_text else {
            return;
        };
        let comments = self.comments;
        while let Some(comment) = comments.get(self.comment_emit_idx) {
            if comment.span.end > pos {
                break;
            }
            self.comment_emit_idx += 1;
            if self.options.remove_comments {
                continue;
            }
            self.write(comment.text(text));
            if comment.ends_line() {
                self.write_line();
            } else {
                self.write_space();
            }
        }
    }

    /// Emit comments that start on the same line right after `end`.
    pub(super) fn emit_trailing_comments(&mut self, mut end: u32) {
        let Some(text) = self.source_text else {
            return;
        };
        let comments = self.comments;
        while let Some(comment) = comments.get(self.comment_emit_idx) {
            if comment.span.start < end {
                break;
            }
            let gap = text.get(end as usize..comment.span.start as usize).unwrap_or("\n");
            // member spans stop before their `;` or `,` separator
            if gap.bytes().any(|b| !matches!(b, b' ' | b'\t' | b';' | b',')) {
                break;
            }
            self.comment_emit_idx += 1;
            end = comment.span.end;
            if self.options.remove_comments {
                continue;
            }
            self.write_space();
            self.write(comment.text(text));
        }
    }

    pub(super) fn emit_remaining_comments(&mut self) {
        let Some(text) = self.source_text else {
            return;
        };
        if self.comment_emit_idx >= self.comments.len() || self.options.remove_comments {
            return;
        }
        self.writer.ensure_new_line();
        for comment in &self.comments[self.comment_emit_idx..] {
            self.writer.write(comment.text(text));
            self.writer.write_line();
        }
        self.comment_emit_idx = self.comments.len();
    }

    /// Keep a blank line between two statements when the source had one.
    ///
    /// Only the gap up to the next pending comment counts, so a comment block separated
    /// from the previous statement keeps its spacing.
    pub(super) fn emit_blank_line_between(&mut self, prev_end: u32, next_start: u32) {
        let Some(text) = self.source_text else {
            return;
        };
        if prev_end >= next_start {
            return;
        }
        let gap_end = self
            .comments
            .get(self.comment_emit_idx)
            .map_or(next_start, |comment| comment.span.start.clamp(prev_end, next_start));
        let gap = text.get(prev_end as usize..gap_end as usize).unwrap_or("");
        if memchr::memchr_iter(b'\n', gap.as_bytes()).count() >= 2 {
            self.write_line();
        }
    }
}
