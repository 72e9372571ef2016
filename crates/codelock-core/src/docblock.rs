//! Codec for the file docblock: the single star-prefixed comment block
//! anchored at a file's first byte.
//!
//! Only a block starting at offset 0 counts as *the* file docblock. A
//! syntactically identical block preceded by even one blank line, or any
//! later block in the file, is ordinary content and is never touched.

use once_cell::sync::Lazy;
use regex::Regex;

#[expect(clippy::expect_used, reason = "pattern is a compile-time constant")]
static DOCBLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\A/\*\*\n(?P<contents>( \*.*\n)*?) \*/\n").expect("valid pattern"));

/// Extracts the logical content of the file docblock from `code`.
///
/// Each interior line's leading ` *` decoration is stripped and the line is
/// trimmed; surrounding blank lines are trimmed from the result. Malformed
/// shapes (missing second star, a line without its leading star, block not
/// at offset 0) yield `None`, never a partial result.
#[must_use]
pub fn get_docblock(code: &str) -> Option<String> {
    let captures = DOCBLOCK_RE.captures(code)?;
    let raw_contents = captures.name("contents")?.as_str();
    let stripped: Vec<&str> = raw_contents
        .lines()
        .map(|line| line.strip_prefix(" *").unwrap_or(line).trim())
        .collect();
    Some(stripped.join("\n").trim().to_owned())
}

/// Removes the file docblock, and its trailing newline, from `code`.
///
/// Passthrough when no docblock is recognised at offset 0; removal is never
/// an error.
#[must_use]
pub fn remove_docblock(code: &str) -> String {
    DOCBLOCK_RE.replace(code, "").into_owned()
}

/// Renders `content` into the star-prefixed docblock form.
///
/// Each logical line becomes ` * <line>`; an empty line becomes ` *`.
/// Exact inverse of the stripping in [`get_docblock`] for content whose
/// lines contain no `*/`.
///
/// # Example
///
/// ```
/// use codelock_core::render_docblock;
///
/// let block = render_docblock("File docblock\n\nMore info");
/// assert_eq!(block, "/**\n * File docblock\n *\n * More info\n */");
/// ```
#[must_use]
pub fn render_docblock(content: &str) -> String {
    let decorated: Vec<String> = content
        .split('\n')
        .map(|line| {
            let starred = format!("* {line}");
            format!(" {}", starred.trim_end())
        })
        .collect();
    format!("/**\n{}\n */", decorated.join("\n"))
}

/// Renders a docblock for `content` and prepends it to `code`, separated by
/// a blank line, with `code`'s own leading whitespace trimmed.
///
/// The caller guarantees `code` has no existing file docblock. This is not
/// checked: violating the contract stacks a second block on top of the
/// first. The lock codec relies on this exact behaviour to control call
/// order itself.
#[must_use]
pub fn prepend_docblock(code: &str, content: &str) -> String {
    format!("{}\n\n{}", render_docblock(content), code.trim_start())
}
