//! Symbol catalog
//!
//! An ordered, read-only list of insertable templates. Declaration order is
//! significant: autocomplete ranks matches by it, so common symbols are
//! declared first.

mod builtin;

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use fxhash::FxBuildHasher;
use indexmap::IndexMap;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::utils::error::{AssistError, AssistResult};

pub use builtin::BUILTIN_SYMBOLS;

/// Insertion policy of a catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Math commands, wrapped in `$...$` outside math mode
    #[default]
    Latex,
    /// Markdown snippets
    Markdown,
    /// Exam question scaffolding, never wrapped
    Question,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Latex => "latex",
            Category::Markdown => "markdown",
            Category::Question => "question",
        }
    }

    /// Whether insertion may wrap templates of this category in math delimiters
    pub fn wraps_in_math(&self) -> bool {
        !matches!(self, Category::Question)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = AssistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "latex" => Ok(Category::Latex),
            "markdown" => Ok(Category::Markdown),
            "question" => Ok(Category::Question),
            other => Err(AssistError::catalog(format!("unknown category '{}'", other))),
        }
    }
}

/// A catalog record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolEntry {
    /// Literal template to insert, may contain placeholders
    pub text: String,
    /// Display label
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Category,
}

impl SymbolEntry {
    pub fn new(text: impl Into<String>, description: impl Into<String>, category: Category) -> Self {
        Self {
            text: text.into(),
            description: description.into(),
            category,
        }
    }
}

lazy_static! {
    static ref BUILTIN_CATALOG: Arc<SymbolCatalog> = Arc::new(SymbolCatalog::from_static(BUILTIN_SYMBOLS));
}

/// Ordered symbol database keyed by template text
#[derive(Debug, Clone, Default)]
pub struct SymbolCatalog {
    entries: IndexMap<String, SymbolEntry, FxBuildHasher>,
}

impl SymbolCatalog {
    /// Shared handle to the built-in catalog
    pub fn builtin() -> Arc<SymbolCatalog> {
        Arc::clone(&BUILTIN_CATALOG)
    }

    /// Build a catalog from entries, keeping declaration order.
    ///
    /// Empty templates are rejected. A template declared twice keeps its
    /// first position and description.
    pub fn from_entries<I>(entries: I) -> AssistResult<Self>
    where
        I: IntoIterator<Item = SymbolEntry>,
    {
        let mut catalog = SymbolCatalog::default();
        catalog.extend(entries)?;
        Ok(catalog)
    }

    /// Parse a JSON array of entries
    pub fn from_json_str(json: &str) -> AssistResult<Self> {
        let entries: Vec<SymbolEntry> = serde_json::from_str(json)?;
        Self::from_entries(entries)
    }

    /// Load a JSON catalog file
    pub fn load(path: impl AsRef<Path>) -> AssistResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Append entries after the existing ones, consuming the catalog.
    pub fn chain<I>(mut self, entries: I) -> AssistResult<Self>
    where
        I: IntoIterator<Item = SymbolEntry>,
    {
        self.extend(entries)?;
        Ok(self)
    }

    fn from_static(table: &[(&str, &str, Category)]) -> Self {
        let mut entries = IndexMap::with_capacity_and_hasher(table.len(), FxBuildHasher::default());
        for &(text, description, category) in table {
            entries
                .entry(text.to_string())
                .or_insert_with(|| SymbolEntry::new(text, description, category));
        }
        Self { entries }
    }

    fn extend<I>(&mut self, entries: I) -> AssistResult<()>
    where
        I: IntoIterator<Item = SymbolEntry>,
    {
        for entry in entries {
            if entry.text.is_empty() {
                return Err(AssistError::catalog_entry(
                    "template text is empty",
                    entry.description,
                ));
            }
            if self.entries.contains_key(&entry.text) {
                tracing::warn!(text = %entry.text, "duplicate catalog entry ignored");
                continue;
            }
            self.entries.insert(entry.text.clone(), entry);
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by its exact template text
    pub fn get(&self, text: &str) -> Option<&SymbolEntry> {
        self.entries.get(text)
    }

    /// Entries in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &SymbolEntry> {
        self.entries.values()
    }

    /// Entries of one category, in declaration order (symbol palette tabs)
    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &SymbolEntry> {
        self.iter().filter(move |e| e.category == category)
    }

    /// Entries whose template starts with `prefix` (case-sensitive), in
    /// declaration order
    pub fn prefix_matches<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a SymbolEntry> {
        self.iter().filter(move |e| e.text.starts_with(prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_is_non_empty_and_valid() {
        let catalog = SymbolCatalog::builtin();
        assert!(!catalog.is_empty());
        assert!(catalog.iter().all(|e| !e.text.is_empty()));
        assert!(catalog.get(r"\frac{a}{b}").is_some());
    }

    #[test]
    fn test_builtin_covers_every_category() {
        let catalog = SymbolCatalog::builtin();
        for category in [Category::Latex, Category::Markdown, Category::Question] {
            assert!(
                catalog.by_category(category).next().is_some(),
                "no built-in entries for {}",
                category
            );
        }
    }

    #[test]
    fn test_declaration_order_preserved() {
        let catalog = SymbolCatalog::from_entries(vec![
            SymbolEntry::new(r"\zeta", "zeta", Category::Latex),
            SymbolEntry::new(r"\alpha", "alpha", Category::Latex),
            SymbolEntry::new(r"\beta", "beta", Category::Latex),
        ])
        .unwrap();
        let texts: Vec<&str> = catalog.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec![r"\zeta", r"\alpha", r"\beta"]);
    }

    #[test]
    fn test_duplicate_keeps_first() {
        let catalog = SymbolCatalog::from_entries(vec![
            SymbolEntry::new(r"\pi", "first", Category::Latex),
            SymbolEntry::new(r"\pi", "second", Category::Latex),
        ])
        .unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(r"\pi").unwrap().description, "first");
    }

    #[test]
    fn test_empty_text_rejected() {
        let err = SymbolCatalog::from_entries(vec![SymbolEntry::new("", "nothing", Category::Latex)])
            .unwrap_err();
        assert!(matches!(err, AssistError::InvalidCatalog { .. }));
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            {"text": "\\vec{v}", "description": "Vector", "category": "latex"},
            {"text": "\\question", "category": "question"}
        ]"#;
        let catalog = SymbolCatalog::from_json_str(json).unwrap();
        assert_eq!(catalog.len(), 2);
        let question = catalog.get(r"\question").unwrap();
        assert_eq!(question.category, Category::Question);
        assert_eq!(question.description, "");
    }

    #[test]
    fn test_prefix_matches_case_sensitive() {
        let catalog = SymbolCatalog::builtin();
        assert!(catalog.prefix_matches(r"\Delta").all(|e| e.text.starts_with(r"\Delta")));
        assert!(catalog.prefix_matches(r"\delta").all(|e| !e.text.starts_with(r"\Delta")));
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("Question".parse::<Category>().unwrap(), Category::Question);
        assert!("tikz".parse::<Category>().is_err());
    }
}
