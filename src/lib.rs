//! # texassist
//!
//! LaTeX input assistance for exam-question editors.
//!
//! ## Features
//!
//! - **Math-mode tracking**: is the caret between `$` delimiters?
//! - **Command autocomplete**: `\fr` offers `\frac{a}{b}` and friends
//! - **Template insertion**: placeholder cleanup, `$...$` wrapping outside
//!   math mode, and cursor placement in the first empty argument
//! - **Caret mapping**: visual line and pixel offset of the caret in
//!   soft-wrapped text, for anchoring the suggestion popup
//!
//! ## Quick Start
//!
//! ```rust
//! use texassist::{insert_symbol, match_candidate, suggestions_for, Category, EditBuffer};
//!
//! let candidate = match_candidate(r"\fr").unwrap();
//! let first = &suggestions_for(candidate)[0];
//! assert_eq!(first.text, r"\frac{a}{b}");
//!
//! let buffer = EditBuffer::at_end(r"\fr");
//! let edit = insert_symbol(&first.text, Category::Latex, &buffer, Some(0..3));
//! assert_eq!(edit.new_text, r"$\frac{}{}$");
//! ```
//!
//! All offsets are UTF-16 code units, matching browser text inputs.

pub mod core;
pub mod utils;

#[cfg(feature = "wasm")]
pub mod wasm;

use std::ops::Range;

pub use crate::core::autocomplete::{match_candidate, AutocompleteMatcher, Completion, Suggestion};
pub use crate::core::buffer::EditBuffer;
pub use crate::core::catalog::{Category, SymbolCatalog, SymbolEntry};
pub use crate::core::insertion::{clean_placeholders, Insertion};
pub use crate::core::layout::{
    map_offset_to_visual_position, popup_anchor, LayoutMetrics, MonospaceMeasure, PopupAnchor,
    TextExtent, TextMeasure, Viewport, VisualPosition,
};
pub use crate::core::math_mode::is_inside_math_mode;
pub use crate::core::session::{EditorKey, EditorSession, KeyOutcome, PopupView, SessionState};
pub use crate::utils::config::AssistConfig;
pub use crate::utils::error::{AssistError, AssistResult};

/// Suggestions for `candidate` from the built-in catalog
pub fn suggestions_for(candidate: &str) -> Vec<Suggestion> {
    AutocompleteMatcher::new(SymbolCatalog::builtin()).suggestions_for(candidate)
}

/// Insert a template into `buffer`; see [`core::insertion::insert`]
pub fn insert_symbol(
    template: &str,
    category: Category,
    buffer: &EditBuffer,
    replace_range: Option<Range<usize>>,
) -> Insertion {
    crate::core::insertion::insert(template, category, buffer, replace_range)
}

/// New session over the built-in catalog
pub fn editor_session(initial_text: impl Into<String>) -> EditorSession {
    EditorSession::new(SymbolCatalog::builtin(), initial_text)
}
