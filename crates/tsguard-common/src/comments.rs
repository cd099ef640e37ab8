//! Source comments.
//!
//! Comments are not part of the AST. The scanner records them while it skips trivia,
//! and the printer re-emits them in front of the statement that follows.

use crate::Span;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CommentKind {
    /// `// ...`
    Line,
    /// `/* ... */`, including JSDoc.
    Block,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub span: Span,
    pub kind: CommentKind,
    /// Only whitespace separates the comment from the next line break.
    pub followed_by_newline: bool,
}

impl Comment {
    pub fn line(span: Span, followed_by_newline: bool) -> Self {
        Comment {
            span,
            kind: CommentKind::Line,
            followed_by_newline,
        }
    }

    pub fn block(span: Span, followed_by_newline: bool) -> Self {
        Comment {
            span,
            kind: CommentKind::Block,
            followed_by_newline,
        }
    }

    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        self.span.slice(source)
    }

    /// A line comment always ends its line; a block comment only when the source broke after it.
    pub fn ends_line(&self) -> bool {
        self.kind == CommentKind::Line || self.followed_by_newline
    }
}
