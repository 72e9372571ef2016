//! Lock codec: a content digest embedded in the file docblock.
//!
//! The digest is computed over a *normalised* form of the file: when the
//! file declares manually editable sections, every section body is blanked
//! first, and the whole string is trimmed. Edits inside a declared section
//! therefore never change the digest, while every other byte, including
//! the section designators and their keys, remains covered.
//!
//! This is accidental-edit detection, not security. The digest is short
//! and carries no cryptographic guarantee against a determined forger.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::docblock::{get_docblock, prepend_docblock, remove_docblock};
use crate::manual::blank_sections;

/// Digest bytes kept in the rendered hash token (24 hex characters).
const HASH_BYTES: usize = 12;

const EDITABLE_NOTICE: &str = "This file is generated with manually editable sections. Only make\n\
                               modifications between BEGIN MANUAL SECTION and END MANUAL SECTION\n\
                               designators.";
const GENERATED_NOTICE: &str = "This file is generated. Do not modify it manually.";

#[expect(clippy::expect_used, reason = "pattern is a compile-time constant")]
static EDITABLE_LOCK_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\A@generated-editable Codelock<<(?P<hash>\S+?)>>\z").expect("valid pattern")
});

#[expect(clippy::expect_used, reason = "pattern is a compile-time constant")]
static GENERATED_LOCK_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\A@generated Codelock<<(?P<hash>\S+?)>>\z").expect("valid pattern"));

/// The lock record parsed from a locked file's header docblock.
///
/// Exists only transiently: it is computed on demand from the docblock's
/// last line and never persisted except as the docblock text itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockInfo {
    hash: String,
    manual_sections_allowed: bool,
}

impl LockInfo {
    /// The digest token embedded in the lock line.
    #[must_use]
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Whether the file declares manually editable sections.
    #[must_use]
    pub const fn manual_sections_allowed(&self) -> bool {
        self.manual_sections_allowed
    }
}

/// Computes the digest token for `code`.
///
/// Normalisation blanks manual sections only when the file declares them
/// editable; an "uneditable" file keeps its pseudo-section bodies in the
/// digest so edits there are caught too.
fn compute_hash(code: &str, blank_manual_sections: bool) -> String {
    let normalised = if blank_manual_sections {
        blank_sections(code)
    } else {
        code.to_owned()
    };
    let digest = Sha256::digest(normalised.trim().as_bytes());
    digest
        .iter()
        .take(HASH_BYTES)
        .map(|byte| format!("{byte:02x}"))
        .collect()
}

/// Computes the digest for `code` and prepends the codelock docblock.
///
/// The docblock carries a fixed explanatory notice for the chosen mode and
/// a final `@generated-editable Codelock<<HASH>>` (or `@generated` when
/// `manual_sections_allowed` is false) line.
///
/// This always prepends, even when `code` already starts with a docblock:
/// locking twice stacks a second header. Callers lock at most once per
/// generation cycle, after the previous lock has been stripped by
/// regeneration.
#[must_use]
pub fn lock(code: &str, manual_sections_allowed: bool) -> String {
    lock_with_comment(code, manual_sections_allowed, "")
}

/// Like [`lock`], with an extra free-form comment in the header docblock.
///
/// A non-blank `comment` is trimmed and inserted between the explanatory
/// notice and the lock line, typically to tell readers how to regenerate
/// the file. A blank comment renders the plain [`lock`] header.
#[must_use]
pub fn lock_with_comment(code: &str, manual_sections_allowed: bool, comment: &str) -> String {
    let hash = compute_hash(code, manual_sections_allowed);
    let (notice, lock_line) = if manual_sections_allowed {
        (EDITABLE_NOTICE, format!("@generated-editable Codelock<<{hash}>>"))
    } else {
        (GENERATED_NOTICE, format!("@generated Codelock<<{hash}>>"))
    };

    let trimmed_comment = comment.trim();
    let content = if trimmed_comment.is_empty() {
        format!("{notice}\n\n{lock_line}")
    } else {
        format!("{notice}\n\n{trimmed_comment}\n\n{lock_line}")
    };
    prepend_docblock(code, &content)
}

/// Parses the lock record from `locked_code`'s header docblock.
///
/// Expects the lock line on the docblock's last logical line. Returns
/// `None` when there is no file docblock or the last line matches neither
/// lock pattern, including the case of an unrelated docblock.
#[must_use]
pub fn lock_info(locked_code: &str) -> Option<LockInfo> {
    let docblock = get_docblock(locked_code)?;
    let lock_line = docblock.lines().last()?;

    if let Some(captures) = EDITABLE_LOCK_LINE_RE.captures(lock_line) {
        return Some(LockInfo {
            hash: captures.name("hash")?.as_str().to_owned(),
            manual_sections_allowed: true,
        });
    }

    let captures = GENERATED_LOCK_LINE_RE.captures(lock_line)?;
    Some(LockInfo {
        hash: captures.name("hash")?.as_str().to_owned(),
        manual_sections_allowed: false,
    })
}

/// Verifies that `locked_code` carries a valid codelock.
///
/// Recomputes the digest over the code with its header docblock removed,
/// normalised per the parsed editability flag, and compares it to the
/// embedded token. Missing or unrecognised locks and digest mismatches all
/// report `false`; verification never errors.
#[must_use]
pub fn verify(locked_code: &str) -> bool {
    lock_info(locked_code).is_some_and(|info| {
        info.hash == compute_hash(&remove_docblock(locked_code), info.manual_sections_allowed)
    })
}
