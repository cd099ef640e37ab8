//! Common types and utilities for the tsguard validator generator.
//!
//! This crate provides foundational types used across all tsguard crates:
//! - Source spans (`Span`)
//! - Position/line maps for rendering byte offsets as `line:column`
//! - Comments collected by the scanner and re-emitted by the printer
//! - Recursion limits shared by the parser, printer and type resolver

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::Span;

// Position/Range types for line/column source locations
pub mod position;
pub use position::{LineMap, Location};

// Comments recorded by the scanner
pub mod comments;
pub use comments::{Comment, CommentKind};

// Centralized limits and thresholds
pub mod limits;
