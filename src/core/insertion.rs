//! Template insertion
//!
//! Inserting a catalog template happens in four steps:
//!
//! 1. **Placeholder cleanup**: `{a}`-style placeholders become `{}` so the
//!    user types the argument directly. Arguments of font commands
//!    (`\mathbb{R}`, `\text{...}`) are kept verbatim.
//! 2. **Math wrapping**: outside math mode the template is wrapped in `$...$`,
//!    unless it belongs to the question category.
//! 3. **Splice** into the buffer over the replace range.
//! 4. **Smart cursor**: the cursor lands in the first empty argument, after a
//!    `\left` opener, or after the inserted text.

use std::borrow::Cow;
use std::ops::Range;

use lazy_static::lazy_static;
use phf::phf_set;
use regex::{Captures, Regex};
use serde::Serialize;

use super::buffer::EditBuffer;
use super::catalog::Category;
use super::math_mode::{is_inside_math_mode, MATH_DELIMITER};
use crate::utils::offsets::{byte_to_utf16, utf16_to_byte_lossy};

/// Font and text commands whose arguments are content, not placeholders.
pub static FONT_COMMANDS: phf::Set<&'static str> = phf_set! {
    "\\mathbb",
    "\\mathbf",
    "\\mathit",
    "\\mathrm",
    "\\mathcal",
    "\\mathscr",
    "\\mathfrak",
    "\\text",
    "\\texttt",
    "\\textsf",
};

/// Openers after which the cursor lands for delimiter templates
const LEFT_OPENERS: [&str; 3] = ["\\left(", "\\left[", "\\left\\{"];

const EMPTY_PAIR: &str = "{}";
const TWO_EMPTY_PAIRS: &str = "{}{}";

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"\{[A-Za-z]+\}").expect("valid regex");
}

/// Result of an insertion: the text to apply and where the cursor goes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Insertion {
    pub new_text: String,
    /// Cursor offset in UTF-16 code units
    pub new_cursor_offset: usize,
}

/// Replace letter placeholders with empty braces.
///
/// A placeholder is preserved when any font command occurs anywhere before
/// it in the template, not only when it is that command's argument.
pub fn clean_placeholders(template: &str) -> Cow<'_, str> {
    PLACEHOLDER.replace_all(template, |caps: &Captures| {
        let whole = caps.get(0).map_or("", |m| m.as_str());
        let start = caps.get(0).map_or(0, |m| m.start());
        if follows_font_command(&template[..start]) {
            whole.to_string()
        } else {
            EMPTY_PAIR.to_string()
        }
    })
}

fn follows_font_command(prefix: &str) -> bool {
    FONT_COMMANDS.iter().any(|cmd| prefix.contains(cmd))
}

/// Byte offset of the cursor inside a cleaned, unwrapped template, or `None`
/// when the cursor should go after the inserted text.
pub fn cursor_target(template: &str) -> Option<usize> {
    if let Some(pos) = template.find(TWO_EMPTY_PAIRS) {
        return Some(pos + 1);
    }
    if template.matches(EMPTY_PAIR).count() == 1 {
        return template.find(EMPTY_PAIR).map(|pos| pos + 1);
    }
    LEFT_OPENERS
        .iter()
        .filter_map(|opener| template.find(opener).map(|pos| pos + opener.len()))
        .min()
}

/// Insert `template` into `buffer`.
///
/// `replace_range` (UTF-16) is the span to overwrite; `None` inserts at the
/// cursor. The range is clamped to the buffer.
pub fn insert(
    template: &str,
    category: Category,
    buffer: &EditBuffer,
    replace_range: Option<Range<usize>>,
) -> Insertion {
    let text = buffer.text();
    let range = replace_range.unwrap_or(buffer.cursor()..buffer.cursor());
    let (start, end) = if range.start <= range.end {
        (range.start, range.end)
    } else {
        (range.end, range.start)
    };
    let start_byte = utf16_to_byte_lossy(text, start);
    let end_byte = utf16_to_byte_lossy(text, end).max(start_byte);

    let cleaned = clean_placeholders(template);
    let before = &text[..start_byte];

    let wrap = category.wraps_in_math() && !is_inside_math_mode(before);
    let (inserted, lead) = if wrap {
        (
            format!("{d}{}{d}", cleaned, d = MATH_DELIMITER),
            MATH_DELIMITER.len_utf8(),
        )
    } else {
        (cleaned.to_string(), 0)
    };

    let mut new_text = String::with_capacity(text.len() - (end_byte - start_byte) + inserted.len());
    new_text.push_str(before);
    new_text.push_str(&inserted);
    new_text.push_str(&text[end_byte..]);

    let cursor_byte = if cleaned.is_empty() {
        start_byte
    } else {
        match cursor_target(&cleaned) {
            Some(offset) => start_byte + lead + offset,
            None => start_byte + inserted.len(),
        }
    };
    let new_cursor_offset = byte_to_utf16(&new_text, cursor_byte);

    tracing::debug!(
        template,
        wrapped = wrap,
        cursor = new_cursor_offset,
        "inserted template"
    );

    Insertion {
        new_text,
        new_cursor_offset,
    }
}
