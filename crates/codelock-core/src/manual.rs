//! Codec for manual sections: keyed, delimiter-bounded spans of
//! hand-editable text inside otherwise machine-generated output.
//!
//! A section opens with a `BEGIN MANUAL SECTION <key>` designator and
//! closes at the first subsequent `END MANUAL SECTION`, both wrapped in
//! block-comment tokens. The body is matched lazily, so a body that itself
//! contains the literal end designator truncates at the inner occurrence.
//! This is a known sharp edge of the grammar, not something the codec
//! works around.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::error::SectionKeyError;

#[expect(clippy::expect_used, reason = "pattern is a compile-time constant")]
static SECTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"/\* BEGIN MANUAL SECTION (?P<key>\S+) \*/(?s:(?P<body>.*?))/\* END MANUAL SECTION \*/",
    )
    .expect("valid pattern")
});

/// The manual sections recovered from a previously generated file, keyed
/// by section key.
///
/// Built once per regeneration cycle by [`extract_sections`] and read-only
/// afterwards; builders at any nesting depth share one map by reference so
/// a section anywhere in the output can recover its previous content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualSections(BTreeMap<String, String>);

impl ManualSections {
    /// Creates an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Returns the stored content for `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Returns the number of stored sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no sections are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(key, content)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, content)| (key.as_str(), content.as_str()))
    }

    fn insert(&mut self, key: String, content: String) {
        self.0.insert(key, content);
    }
}

impl FromIterator<(String, String)> for ManualSections {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(entries: I) -> Self {
        Self(entries.into_iter().collect())
    }
}

/// Renders a manual section for `key` wrapping `content`.
///
/// `content` is trimmed and placed on its own line(s) between the
/// designators; an empty body leaves a single line break between them.
/// Fails when `key` is empty or contains whitespace.
///
/// # Errors
///
/// Returns [`SectionKeyError`] for an empty or whitespace-containing key.
pub fn render_section(key: &str, content: &str) -> Result<String, SectionKeyError> {
    if key.is_empty() {
        return Err(SectionKeyError::Empty);
    }
    if key.chars().any(char::is_whitespace) {
        return Err(SectionKeyError::ContainsWhitespace { key: key.to_owned() });
    }
    Ok(render_section_unchecked(key, content))
}

/// Rendering for keys already known to satisfy the grammar, either by
/// validation or because they were captured by the designator pattern.
fn render_section_unchecked(key: &str, content: &str) -> String {
    let body = content.trim();
    if body.is_empty() {
        format!("/* BEGIN MANUAL SECTION {key} */\n/* END MANUAL SECTION */")
    } else {
        format!("/* BEGIN MANUAL SECTION {key} */\n{body}\n/* END MANUAL SECTION */")
    }
}

/// Scans `code` for every manual section and returns the key-to-content
/// map.
///
/// Sections are matched left to right without overlap; bodies are trimmed.
/// A designator whose key contains whitespace does not match the grammar
/// and is skipped, not an error. A later section with a duplicate key
/// overwrites the earlier entry.
#[must_use]
pub fn extract_sections(code: &str) -> ManualSections {
    let mut sections = ManualSections::new();
    for captures in SECTION_RE.captures_iter(code) {
        if let (Some(key), Some(body)) = (captures.name("key"), captures.name("body")) {
            sections.insert(key.as_str().to_owned(), body.as_str().trim().to_owned());
        }
    }
    sections
}

/// Replaces every matched section's body with the empty rendering.
///
/// Everything outside matched spans, including malformed pseudo-sections,
/// is left byte-for-byte untouched. Idempotent. Used to make the codelock
/// digest insensitive to manual edits.
#[must_use]
pub fn blank_sections(code: &str) -> String {
    SECTION_RE
        .replace_all(code, |captures: &Captures<'_>| {
            let key = captures.name("key").map_or("", |m| m.as_str());
            render_section_unchecked(key, "")
        })
        .into_owned()
}
