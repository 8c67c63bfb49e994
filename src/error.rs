//! Error types for rendering and template parsing.
//!
//! Two failure surfaces exist:
//! - Synchronous: directive resolution and descriptor validation fail the
//!   `render` call with a [`RenderError`].
//! - Asynchronous: stream-emission errors are reported on the error channel
//!   of the affected subscription only; the subtree stops re-rendering but
//!   the render call has long since returned.
//!
//! `UnknownTag` is special: it exists as a named error kind for reporting,
//! but the renderer treats it as non-fatal (logged, node skipped).

use thiserror::Error;

/// Kinds of context entries, used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    /// A single-value stream (`bind`).
    Value,
    /// An array-valued stream (`repeat`).
    List,
    /// An event sink (`click`).
    Sink,
}

impl std::fmt::Display for BindingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BindingKind::Value => f.write_str("value stream"),
            BindingKind::List => f.write_str("array stream"),
            BindingKind::Sink => f.write_str("event sink"),
        }
    }
}

/// Errors surfaced synchronously at render time.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A descriptor names a tag outside the closed set.
    ///
    /// Constructed for reporting; the renderer logs it and skips the node
    /// rather than failing the render call.
    #[error("unknown tag `{0}`: node and subtree not rendered")]
    UnknownTag(String),

    /// A directive names a key absent from the context.
    #[error("directive `{directive}` names binding `{key}` which is absent from the context")]
    MissingBinding {
        /// The directive that performed the lookup (`bind`, `repeat`, `click`).
        directive: &'static str,
        /// The binding name that failed to resolve.
        key: String,
    },

    /// A directive resolved a binding of the wrong kind.
    #[error("directive `{directive}` expects `{key}` to be a {expected}")]
    KindMismatch {
        /// The directive that performed the lookup.
        directive: &'static str,
        /// The binding name.
        key: String,
        /// The kind the directive requires.
        expected: BindingKind,
    },

    /// The descriptor tree violates a structural invariant.
    #[error("invalid descriptor: {reason}")]
    InvalidDescriptor {
        /// Human-readable description of the violated invariant.
        reason: String,
    },
}

/// A template adapter failed to parse its input.
///
/// Adapters must surface this to the caller - never fall back to a
/// placeholder descriptor.
#[derive(Debug, Error)]
#[error("parse error at line {line}, column {column}: {message}")]
pub struct ParseError {
    /// 1-based line of the offending input.
    pub line: usize,
    /// 1-based column of the offending input.
    pub column: usize,
    /// What went wrong.
    pub message: String,
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        ParseError {
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }
}
