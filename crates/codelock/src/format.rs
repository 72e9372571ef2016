//! Seam for the external source-formatting collaborator.

use thiserror::Error;

/// Error reported by a [`Formatter`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("formatter failed: {message}")]
pub struct FormatError {
    message: String,
}

impl FormatError {
    /// Creates an error carrying the formatter's failure description.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Formats generated source text in the target language.
///
/// Implementations live outside this crate: the builder only threads raw
/// text through them and expects formatted text of the same language back.
pub trait Formatter {
    /// Returns `source` reformatted.
    ///
    /// # Errors
    ///
    /// Returns a [`FormatError`] describing why `source` could not be
    /// formatted.
    fn format(&self, source: &str) -> Result<String, FormatError>;
}
