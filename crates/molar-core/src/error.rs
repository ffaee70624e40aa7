//! Error types for formula parsing operations

use thiserror::Error;

/// Main error type for formula parsing operations
///
/// Content-level problems (illegal characters, unbalanced brackets, ...)
/// are never surfaced here; they are reported as [`Diagnostic`]s on the
/// parse result. This enum is reserved for misuse of the API itself.
///
/// [`Diagnostic`]: crate::diagnostics::Diagnostic
#[derive(Debug, Error)]
pub enum MolarError {
    /// The formula reference itself was absent (not merely empty)
    #[error("formula was absent; pass an empty string for an empty formula")]
    NullFormula,

    /// Serialization of a result or diagnostic failed
    #[error("serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
}
