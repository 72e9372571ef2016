//! Controller for a single generated file on disk.
//!
//! A [`GeneratedFile`] owns the in-memory contents for one path and drives
//! the regeneration cycle around the codecs: load the stored file, rebuild
//! it through a generator that receives the previously stored manual
//! sections, stamp the codelock, and save only when something changed.
//!
//! Reads and writes are single synchronous calls; failures propagate to
//! the caller unmodified and nothing is retried. Instances never share
//! state: opening two controllers against the same path is last-write-wins
//! by design.

use std::fs;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;
use tracing::debug;

use codelock_core::{SectionKeyError, extract_sections, lock_with_comment, verify};

use crate::builder::CodeBuilder;

/// Errors raised while loading, regenerating, or saving a generated file.
#[derive(Debug, Error)]
pub enum GeneratedFileError {
    /// Reading the stored file failed.
    #[error("failed to read generated file '{path}': {source}")]
    Read {
        /// Path of the file being read.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// Writing the regenerated file failed.
    #[error("failed to write generated file '{path}': {source}")]
    Write {
        /// Path of the file being written.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// The generator declared a manual section with an invalid key.
    #[error(transparent)]
    Section(#[from] SectionKeyError),
}

/// A generated source file: the stored baseline, the in-memory contents,
/// and the regeneration cycle that connects them.
#[derive(Debug)]
pub struct GeneratedFile {
    path: Utf8PathBuf,
    stored_contents: Option<String>,
    contents: String,
    manual_sections_allowed: bool,
}

impl GeneratedFile {
    /// Loads the file at `path`, or starts from empty contents with no
    /// stored baseline when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratedFileError::Read`] when the file exists but could
    /// not be read.
    pub fn load(path: impl AsRef<Utf8Path>) -> Result<Self, GeneratedFileError> {
        let file_path = path.as_ref().to_owned();
        let stored_contents = if file_path.exists() {
            Some(fs::read_to_string(&file_path).map_err(|source| GeneratedFileError::Read {
                path: file_path.clone(),
                source: Arc::new(source),
            })?)
        } else {
            None
        };
        let contents = stored_contents.clone().unwrap_or_default();
        debug!(path = %file_path, bytes = contents.len(), "loaded generated file");
        Ok(Self {
            path: file_path,
            stored_contents,
            contents,
            manual_sections_allowed: false,
        })
    }

    /// The path this controller owns.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// The in-memory contents.
    #[must_use]
    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// Whether the in-memory contents differ from the stored baseline.
    #[must_use]
    pub fn has_pending_changes(&self) -> bool {
        self.stored_contents.as_deref() != Some(self.contents.as_str())
    }

    /// Verifies the codelock over the in-memory contents.
    ///
    /// Callable in any state; contents that were never locked report
    /// `false`.
    #[must_use]
    pub fn verify(&self) -> bool {
        verify(&self.contents)
    }

    /// Regenerates the contents through `generator`.
    ///
    /// The manual sections stored in the current contents are extracted
    /// into a read-only map and handed to `generator` via a fresh
    /// [`CodeBuilder`]. The builder's output replaces the contents,
    /// unlocked; call [`lock`](Self::lock) afterwards to stamp it.
    ///
    /// # Errors
    ///
    /// Propagates [`SectionKeyError`] raised by the generator.
    pub fn build<F>(&mut self, generator: F) -> Result<&mut Self, GeneratedFileError>
    where
        F: for<'s> FnOnce(CodeBuilder<'s>) -> Result<CodeBuilder<'s>, SectionKeyError>,
    {
        let sections = extract_sections(&self.contents);
        let builder = generator(CodeBuilder::new(&sections))?;
        self.manual_sections_allowed = builder.has_manual_sections();
        self.contents = builder.into_code();
        debug!(
            path = %self.path,
            manual_sections = self.manual_sections_allowed,
            "rebuilt generated file"
        );
        Ok(self)
    }

    /// Stamps the codelock onto the contents built by the last
    /// [`build`](Self::build).
    ///
    /// Editability follows whether that build declared any manual section.
    /// Locking twice stacks a second header; the protocol never strips an
    /// existing lock outside of regeneration.
    pub fn lock(&mut self) -> &mut Self {
        self.lock_with_comment("")
    }

    /// Like [`lock`](Self::lock), with an extra free-form comment in the
    /// header docblock, typically regeneration instructions.
    pub fn lock_with_comment(&mut self, comment: &str) -> &mut Self {
        self.contents = lock_with_comment(&self.contents, self.manual_sections_allowed, comment);
        self
    }

    /// Writes the contents to disk when they differ from the stored
    /// baseline, then advances the baseline. `force` writes
    /// unconditionally.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratedFileError::Write`] when the write fails; the
    /// baseline is only advanced after a successful write.
    pub fn save(&mut self, force: bool) -> Result<(), GeneratedFileError> {
        if !force && !self.has_pending_changes() {
            debug!(path = %self.path, "skipping save, no pending changes");
            return Ok(());
        }
        fs::write(&self.path, &self.contents).map_err(|source| GeneratedFileError::Write {
            path: self.path.clone(),
            source: Arc::new(source),
        })?;
        self.stored_contents = Some(self.contents.clone());
        debug!(path = %self.path, bytes = self.contents.len(), "saved generated file");
        Ok(())
    }
}
