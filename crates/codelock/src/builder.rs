//! Fluent builder for assembling generated source text.
//!
//! A builder accumulates code line by line and records whether any manual
//! section was declared. Nested scopes (blocks, section defaults) run in
//! child builders seeded with the same read-only [`ManualSections`] map,
//! so a section at any nesting depth can recover its previous content;
//! the parent folds each child's manual-section flag into its own.

use codelock_core::{ManualSections, SectionKeyError, render_docblock, render_section};

use crate::format::{FormatError, Formatter};

/// Result of a fallible builder step or closure.
///
/// Builder closures return this so nested manual sections can propagate
/// key-validation errors with `?`.
pub type BuilderResult<'s> = Result<CodeBuilder<'s>, SectionKeyError>;

/// Accumulates generated code while sharing the map of manual sections
/// recovered from the previous generation.
#[derive(Debug)]
pub struct CodeBuilder<'s> {
    code: String,
    has_manual_sections: bool,
    stored_sections: &'s ManualSections,
}

impl<'s> CodeBuilder<'s> {
    /// Creates a builder over the sections recovered from the previous
    /// generation.
    #[must_use]
    pub const fn new(stored_sections: &'s ManualSections) -> Self {
        Self {
            code: String::new(),
            has_manual_sections: false,
            stored_sections,
        }
    }

    /// Appends `code` verbatim.
    #[must_use]
    pub fn add(mut self, code: &str) -> Self {
        self.code.push_str(code);
        self
    }

    /// Appends `code` followed by a newline.
    #[must_use]
    pub fn line(mut self, code: &str) -> Self {
        self.code.push_str(code);
        self.code.push('\n');
        self
    }

    /// Appends an empty line.
    #[must_use]
    pub fn blank_line(self) -> Self {
        self.line("")
    }

    /// Renders `content` as a docblock and appends it with a trailing
    /// newline.
    #[must_use]
    pub fn docblock(self, content: &str) -> Self {
        let rendered = render_docblock(content);
        self.line(&rendered)
    }

    /// Appends a braced block: `before` followed by ` {`, the child
    /// builder's output, and a closing `}`.
    ///
    /// The child shares this builder's section map; its manual-section
    /// flag is folded into this builder's.
    ///
    /// # Errors
    ///
    /// Propagates any [`SectionKeyError`] raised inside `body`.
    pub fn block<F>(mut self, before: &str, body: F) -> BuilderResult<'s>
    where
        F: FnOnce(Self) -> BuilderResult<'s>,
    {
        let child = body(Self::new(self.stored_sections))?;
        self.has_manual_sections = self.has_manual_sections || child.has_manual_sections;
        let rendered = child.into_code();
        Ok(self.add(before).line(" {").line(&rendered).line("}"))
    }

    /// Appends a manual section for `key`, with a trailing newline.
    ///
    /// Non-empty content stored under `key` from the previous generation
    /// wins; otherwise `default` builds the initial content in a child
    /// builder. An empty stored body counts as absent, so emptied sections
    /// are reseeded with their default on the next run.
    ///
    /// Declaring the same key twice renders two independent sections;
    /// keeping keys unique is the generator's responsibility.
    ///
    /// # Errors
    ///
    /// Returns [`SectionKeyError`] when `key` is empty or contains
    /// whitespace, and propagates errors raised inside `default`.
    pub fn manual_section<F>(mut self, key: &str, default: F) -> BuilderResult<'s>
    where
        F: FnOnce(Self) -> BuilderResult<'s>,
    {
        let content = match self.stored_sections.get(key) {
            Some(stored) if !stored.is_empty() => stored.to_owned(),
            _ => default(Self::new(self.stored_sections))?.into_code(),
        };
        let rendered = render_section(key, &content)?;
        self.has_manual_sections = true;
        Ok(self.line(&rendered))
    }

    /// Runs the external formatter over the accumulated text, replacing it
    /// with the formatted result.
    ///
    /// # Errors
    ///
    /// Returns the [`FormatError`] reported by the formatter.
    pub fn formatted<F>(mut self, formatter: &F) -> Result<Self, FormatError>
    where
        F: Formatter + ?Sized,
    {
        self.code = formatter.format(&self.code)?;
        Ok(self)
    }

    /// Whether this builder, or any nested builder folded into it,
    /// declared a manual section.
    #[must_use]
    pub const fn has_manual_sections(&self) -> bool {
        self.has_manual_sections
    }

    /// Borrows the accumulated code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the accumulated code, consuming the builder.
    #[must_use]
    pub fn into_code(self) -> String {
        self.code
    }
}
