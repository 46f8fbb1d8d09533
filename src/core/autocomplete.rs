//! Command autocomplete
//!
//! Extracts the partially typed command in front of the cursor and queries
//! the catalog for entries starting with it.

use std::ops::Range;
use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use super::buffer::EditBuffer;
use super::catalog::{Category, SymbolCatalog, SymbolEntry};
use crate::utils::offsets::utf16_len;

lazy_static! {
    /// A backslash followed by letters, anchored at the cursor
    static ref TRAILING_COMMAND: Regex = Regex::new(r"\\[A-Za-z]*\z").expect("valid regex");
}

/// A catalog match offered to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub text: String,
    pub description: String,
    pub category: Category,
}

impl From<&SymbolEntry> for Suggestion {
    fn from(entry: &SymbolEntry) -> Self {
        Self {
            text: entry.text.clone(),
            description: entry.description.clone(),
            category: entry.category,
        }
    }
}

/// Suggestions for the command under the cursor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Completion {
    /// Span of the typed candidate, in UTF-16 code units
    pub replace_range: Range<usize>,
    pub suggestions: Vec<Suggestion>,
}

/// The partially typed command ending at the cursor, if any.
///
/// Returns the trailing `\` plus letters of `text_before_cursor`; anything
/// else right before the cursor means there is nothing to complete.
pub fn match_candidate(text_before_cursor: &str) -> Option<&str> {
    TRAILING_COMMAND
        .find(text_before_cursor)
        .map(|m| m.as_str())
}

/// Prefix matcher over a shared catalog
#[derive(Debug, Clone)]
pub struct AutocompleteMatcher {
    catalog: Arc<SymbolCatalog>,
    max_suggestions: Option<usize>,
}

impl AutocompleteMatcher {
    pub fn new(catalog: Arc<SymbolCatalog>) -> Self {
        Self {
            catalog,
            max_suggestions: None,
        }
    }

    /// Cap the number of suggestions returned
    pub fn with_limit(mut self, max_suggestions: Option<usize>) -> Self {
        self.max_suggestions = max_suggestions;
        self
    }

    pub fn catalog(&self) -> &Arc<SymbolCatalog> {
        &self.catalog
    }

    /// Entries starting with `candidate`, in catalog order
    pub fn suggestions_for(&self, candidate: &str) -> Vec<Suggestion> {
        if candidate.is_empty() {
            return Vec::new();
        }
        let limit = self.max_suggestions.unwrap_or(usize::MAX);
        self.catalog
            .prefix_matches(candidate)
            .take(limit)
            .map(Suggestion::from)
            .collect()
    }

    /// Candidate and suggestions at the buffer cursor, or `None` when the
    /// popup should close.
    pub fn complete(&self, buffer: &EditBuffer) -> Option<Completion> {
        let candidate = match_candidate(buffer.text_before_cursor())?;
        let suggestions = self.suggestions_for(candidate);
        if suggestions.is_empty() {
            return None;
        }
        let end = buffer.cursor();
        Some(Completion {
            replace_range: end - utf16_len(candidate)..end,
            suggestions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> AutocompleteMatcher {
        AutocompleteMatcher::new(SymbolCatalog::builtin())
    }

    #[test]
    fn test_candidate_extraction() {
        assert_eq!(match_candidate(r"Let $\alp"), Some(r"\alp"));
        assert_eq!(match_candidate(r"\alp "), None);
        assert_eq!(match_candidate(r"x \"), Some(r"\"));
        assert_eq!(match_candidate("plain words"), None);
        assert_eq!(match_candidate(""), None);
    }

    #[test]
    fn test_candidate_stops_at_backslash() {
        assert_eq!(match_candidate(r"\alpha\be"), Some(r"\be"));
    }

    #[test]
    fn test_candidate_rejects_digits_and_braces() {
        assert_eq!(match_candidate(r"\frac{a"), None);
        assert_eq!(match_candidate(r"\x2"), None);
    }

    #[test]
    fn test_candidate_crosses_dollar() {
        // Only non-letters end the scan; `$` before the backslash is irrelevant
        assert_eq!(match_candidate(r"$\sq"), Some(r"\sq"));
    }

    #[test]
    fn test_suggestions_keep_catalog_order() {
        let found = matcher().suggestions_for(r"\fr");
        assert_eq!(found[0].text, r"\frac{a}{b}");
        let found = matcher().suggestions_for(r"\sqrt");
        let texts: Vec<&str> = found.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec![r"\sqrt{x}", r"\sqrt[n]{x}"]);
    }

    #[test]
    fn test_suggestions_case_sensitive() {
        let found = matcher().suggestions_for(r"\Del");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text, r"\Delta");
    }

    #[test]
    fn test_bare_backslash_matches_everything_with_backslash() {
        let m = matcher();
        let expected = m.catalog().iter().filter(|e| e.text.starts_with('\\')).count();
        assert_eq!(m.suggestions_for(r"\").len(), expected);
    }

    #[test]
    fn test_limit() {
        let found = matcher().with_limit(Some(2)).suggestions_for(r"\");
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_complete_reports_replace_range() {
        let buffer = EditBuffer::at_end(r"Let $\alp");
        let completion = matcher().complete(&buffer).unwrap();
        assert_eq!(completion.replace_range, 5..9);
        assert_eq!(completion.suggestions[0].text, r"\alpha");
    }

    #[test]
    fn test_complete_closes_on_no_match() {
        assert!(matcher().complete(&EditBuffer::at_end(r"\qqqq")).is_none());
        assert!(matcher().complete(&EditBuffer::at_end(r"\alpha ")).is_none());
    }
}
