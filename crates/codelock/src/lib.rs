//! Codelock: regeneration-safe generated source files with manually
//! editable sections.
//!
//! This facade crate is the stable entrypoint for generator authors. It
//! re-exports the protocol codecs from [`codelock_core`] and adds the two
//! pieces a generator interacts with directly:
//!
//! - [`CodeBuilder`] — a fluent builder for assembling generated code and
//!   declaring manual sections at any nesting depth
//! - [`GeneratedFile`] — the per-file controller driving the regeneration
//!   cycle: load, rebuild with preserved manual sections, lock, save
//!
//! # Regeneration cycle
//!
//! Each cycle flows one direction: the stored file's manual sections are
//! extracted into a read-only map, the generator emits fresh code against
//! that map, the lock codec stamps the result, and the controller writes
//! it back only when something changed.
//!
//! # Example
//!
//! ```
//! use codelock::{CodeBuilder, ManualSections, lock, verify};
//!
//! let stored = ManualSections::new();
//! let builder = CodeBuilder::new(&stored)
//!     .line("struct Point {")
//!     .manual_section("extra_fields", |b| Ok(b.line("    x: i32,")))?
//!     .line("}");
//! let locked = lock(builder.code(), builder.has_manual_sections());
//! assert!(verify(&locked));
//! # Ok::<(), codelock::SectionKeyError>(())
//! ```

mod builder;
mod file;
mod format;

pub use codelock_core::{
    LockInfo, ManualSections, SectionKeyError, blank_sections, extract_sections, get_docblock,
    lock, lock_info, lock_with_comment, prepend_docblock, remove_docblock, render_docblock,
    render_section, verify,
};

pub use builder::{BuilderResult, CodeBuilder};
pub use file::{GeneratedFile, GeneratedFileError};
pub use format::{FormatError, Formatter};

#[cfg(test)]
mod tests;
