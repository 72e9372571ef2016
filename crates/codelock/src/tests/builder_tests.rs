//! Tests for [`CodeBuilder`].

use rstest::rstest;

use codelock_core::{ManualSections, SectionKeyError};

use crate::builder::CodeBuilder;
use crate::format::{FormatError, Formatter};

fn no_sections() -> ManualSections {
    ManualSections::new()
}

fn sections(entries: &[(&str, &str)]) -> ManualSections {
    entries
        .iter()
        .map(|(key, content)| ((*key).to_owned(), (*content).to_owned()))
        .collect()
}

#[test]
fn add_appends_verbatim() {
    let stored = no_sections();
    let code = "let hello = \"world\";";
    let built = CodeBuilder::new(&stored).add(code).add(code);
    assert_eq!(built.code(), format!("{code}{code}"));
}

#[test]
fn line_appends_newline() {
    let stored = no_sections();
    let code = "let hello = \"world\";";
    let built = CodeBuilder::new(&stored).line(code).line(code);
    assert_eq!(built.code(), format!("{code}\n{code}\n"));
}

#[test]
fn blank_line_appends_empty_line() {
    let stored = no_sections();
    let built = CodeBuilder::new(&stored).line("a();").blank_line().line("b();");
    assert_eq!(built.code(), "a();\n\nb();\n");
}

#[rstest]
#[case::single_line(
    "Only the wisest can see the code below.",
    "/**\n * Only the wisest can see the code below.\n */\n"
)]
#[case::multiline(
    "Adds a braced block.\n\nSee the builder docs.",
    "/**\n * Adds a braced block.\n *\n * See the builder docs.\n */\n"
)]
fn docblock_renders_content_with_trailing_newline(#[case] content: &str, #[case] expected: &str) {
    let stored = no_sections();
    let built = CodeBuilder::new(&stored).docblock(content);
    assert_eq!(built.code(), expected);
}

#[test]
fn block_wraps_child_output_in_braces() -> Result<(), SectionKeyError> {
    let stored = no_sections();
    let built = CodeBuilder::new(&stored)
        .block("fn cancel(culture: Culture)", |b| Ok(b.line("    cancel_it();")))?;
    assert_eq!(built.code(), "fn cancel(culture: Culture) {\n    cancel_it();\n\n}\n");
    assert!(!built.has_manual_sections());
    Ok(())
}

#[test]
fn block_folds_child_manual_section_flag() -> Result<(), SectionKeyError> {
    let stored = no_sections();

    let without = CodeBuilder::new(&stored).block("a()", |b| Ok(b.line("x();")))?;
    assert!(!without.has_manual_sections());

    let with = without.block("b()", |b| b.manual_section("inner", |s| Ok(s.line("y();"))))?;
    assert!(with.has_manual_sections());

    // The flag is sticky once set.
    let still = with.block("c()", |b| Ok(b.line("z();")))?;
    assert!(still.has_manual_sections());
    Ok(())
}

#[test]
fn manual_section_uses_default_when_nothing_is_stored() -> Result<(), SectionKeyError> {
    let stored = sections(&[("some_other_key", "should_not_appear();")]);
    let built = CodeBuilder::new(&stored)
        .manual_section("mansec", |b| Ok(b.add("default_content();")))?;
    assert_eq!(
        built.code(),
        "/* BEGIN MANUAL SECTION mansec */\ndefault_content();\n/* END MANUAL SECTION */\n"
    );
    assert!(built.has_manual_sections());
    assert!(!built.code().contains("should_not_appear"));
    Ok(())
}

#[test]
fn manual_section_retains_stored_content() -> Result<(), SectionKeyError> {
    let stored = sections(&[("mansec", "stored_content();")]);
    let built = CodeBuilder::new(&stored)
        .manual_section("mansec", |b| Ok(b.add("should_not_appear();")))?;
    assert_eq!(
        built.code(),
        "/* BEGIN MANUAL SECTION mansec */\nstored_content();\n/* END MANUAL SECTION */\n"
    );
    Ok(())
}

#[test]
fn manual_section_treats_empty_stored_body_as_absent() -> Result<(), SectionKeyError> {
    let stored = sections(&[("mansec", "")]);
    let built = CodeBuilder::new(&stored).manual_section("mansec", |b| Ok(b.add("reseeded();")))?;
    assert!(built.code().contains("reseeded();"));
    Ok(())
}

#[test]
fn manual_section_rejects_invalid_keys() {
    let stored = no_sections();
    let empty = CodeBuilder::new(&stored).manual_section("", |b| Ok(b));
    assert!(matches!(empty, Err(SectionKeyError::Empty)));

    let spaced = CodeBuilder::new(&stored).manual_section("two words", |b| Ok(b));
    assert!(matches!(spaced, Err(SectionKeyError::ContainsWhitespace { .. })));
}

#[test]
fn nested_manual_section_recovers_stored_content() -> Result<(), SectionKeyError> {
    let stored = sections(&[("boil_body", "divine_magic();")]);
    let built = CodeBuilder::new(&stored)
        .line("use std::path::Path;")
        .blank_line()
        .manual_section("custom_imports", |b| Ok(b))?
        .blank_line()
        .block("impl Steam", |b| {
            b.block("fn new() -> Self", |inner| Ok(inner.line("Self::boil()")))?
                .blank_line()
                .block("fn boil()", |inner| {
                    inner.manual_section("boil_body", |s| Ok(s.add("self.temp = 100;")))
                })
        })?;

    assert!(built.has_manual_sections());
    assert!(built.code().contains("divine_magic();"));
    assert!(!built.code().contains("self.temp = 100;"));
    assert!(
        built
            .code()
            .contains("/* BEGIN MANUAL SECTION custom_imports */\n/* END MANUAL SECTION */")
    );
    Ok(())
}

struct TrimFormatter;

impl Formatter for TrimFormatter {
    fn format(&self, source: &str) -> Result<String, FormatError> {
        Ok(format!("{}\n", source.trim_end()))
    }
}

struct FailingFormatter;

impl Formatter for FailingFormatter {
    fn format(&self, _source: &str) -> Result<String, FormatError> {
        Err(FormatError::new("parse error at line 1"))
    }
}

#[test]
fn formatted_replaces_code_with_formatter_output() -> Result<(), FormatError> {
    let stored = no_sections();
    let built = CodeBuilder::new(&stored)
        .line("a();")
        .blank_line()
        .blank_line()
        .formatted(&TrimFormatter)?;
    assert_eq!(built.code(), "a();\n");
    Ok(())
}

#[test]
fn formatted_propagates_formatter_errors() {
    let stored = no_sections();
    let result = CodeBuilder::new(&stored).line("a();").formatted(&FailingFormatter);
    let error = result.err().map(|e| e.to_string());
    assert_eq!(error.as_deref(), Some("formatter failed: parse error at line 1"));
}
