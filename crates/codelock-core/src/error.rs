//! Validation errors raised by the section codecs.
//!
//! The codecs deliberately keep their error surface small: malformed input
//! on the *reading* side is a recognition miss (`None`, an empty map, or
//! `false`), never an error, because generated files are sometimes
//! hand-mangled. Only the *rendering* side validates, and only the section
//! key.

use thiserror::Error;

/// Errors raised when rendering a manual section with an invalid key.
///
/// Section keys must be non-empty tokens without whitespace so that they
/// match the designator grammar when read back. Everything else, including
/// arbitrary Unicode, is allowed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SectionKeyError {
    /// The key was empty.
    #[error("manual section keys must not be empty")]
    Empty,

    /// The key contained whitespace.
    #[error("manual section keys must not contain whitespace, received {key:?}")]
    ContainsWhitespace {
        /// The rejected key.
        key: String,
    },
}
