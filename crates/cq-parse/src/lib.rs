//! Journal text layer for Cypherquill.
//!
//! Journals arrive from the host as HTML-ish rich text. This crate turns
//! that text into plain lines, scans each line for tags, classifies the
//! tags by position, and evaluates the modifier expressions that folding
//! accumulates. It has no host dependencies and no async surface.

/// Classification of scanned tags into sentence and body vocabularies.
pub mod classify;
/// Markup stripping and line splitting.
pub mod content;
/// Restricted arithmetic over accumulated modifier expressions.
pub mod expr;
/// Numeric literal and signed term extraction.
pub mod number;
/// Sentinel scanning and per-line tag consumption.
pub mod scanner;

/// Re-export the classifiers.
pub use classify::{classify_body_tag, classify_first_line, BodyTag};
/// Re-export the line splitter.
pub use content::plain_lines;
/// Re-export expression evaluation.
pub use expr::{eval_modifier, ExprError};
/// Re-export numeric extraction.
pub use number::{signed_terms, unsigned_literals};
/// Re-export the line scanner.
pub use scanner::{scan_line, LineTags};
