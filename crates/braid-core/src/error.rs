//! Typed errors surfaced by the parser and the merge engine.

/// Errors that abort a parse or a merge.
///
/// Type conflicts during merging are not errors; the target value wins and
/// the incoming value is discarded.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed JWCC input.
    #[error("parse error at line {line}, column {column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    /// A child document contains a top-level key outside the active
    /// section set.
    #[error("unknown section `{section}` in `{path}`")]
    UnknownSection { section: String, path: String },

    /// The caller's allow-list names a section with no registered handler.
    #[error("unknown section `{section}` in allow-list")]
    UnknownAllowedSection { section: String },
}
