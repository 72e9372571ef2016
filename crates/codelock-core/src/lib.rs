//! Core codecs for regeneration-safe generated source files.
//!
//! Generated files are expected to be rewritten wholesale on every
//! generator run, yet humans need designated places to hand-edit the
//! output. This crate implements the textual protocol that makes both
//! possible: keyed *manual sections* whose content survives regeneration,
//! and a *codelock* digest embedded in the file's header docblock that
//! makes every other edit tamper-evident.
//!
//! The protocol is grammar-agnostic. It only relies on block-comment
//! designators and a star-prefixed header comment, so the same codecs work
//! for any host language using `/* ... */` comments.
//!
//! # Core operations
//!
//! - [`get_docblock`], [`remove_docblock`], [`render_docblock`],
//!   [`prepend_docblock`] — the file-header docblock codec
//! - [`render_section`], [`extract_sections`], [`blank_sections`] — the
//!   manual-section codec and the [`ManualSections`] map
//! - [`lock`], [`lock_info`], [`verify`] — the lock codec and the
//!   [`LockInfo`] record
//!
//! # Example
//!
//! ```
//! use codelock_core::{extract_sections, lock, verify};
//!
//! let generated = "/* BEGIN MANUAL SECTION imports */\n\
//!                  use std::fmt;\n\
//!                  /* END MANUAL SECTION */\n\
//!                  fn main() {}\n";
//! let locked = lock(generated, true);
//! assert!(verify(&locked));
//!
//! let sections = extract_sections(&locked);
//! assert_eq!(sections.get("imports"), Some("use std::fmt;"));
//! ```

mod docblock;
mod error;
mod lock;
mod manual;

pub use docblock::{get_docblock, prepend_docblock, remove_docblock, render_docblock};
pub use error::SectionKeyError;
pub use lock::{LockInfo, lock, lock_info, lock_with_comment, verify};
pub use manual::{ManualSections, blank_sections, extract_sections, render_section};

#[cfg(test)]
mod tests;
