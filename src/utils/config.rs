//! Configuration file support.
//!
//! ```toml
//! [layout]
//! container_width_px = 640.0
//! line_height_px = 24.0
//!
//! [suggestions]
//! max_suggestions = 12
//!
//! [catalog]
//! include_builtin = true
//! extra = ["symbols/chemistry.json"]
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;

use super::error::{AssistError, AssistResult};
use crate::core::autocomplete::AutocompleteMatcher;
use crate::core::catalog::SymbolCatalog;
use crate::core::layout::LayoutMetrics;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AssistConfig {
    pub layout: LayoutConfig,
    pub suggestions: SuggestionConfig,
    pub catalog: CatalogConfig,
}

/// Text container geometry, in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Default: 600
    pub container_width_px: f64,
    /// Default: 24
    pub line_height_px: f64,
    /// Default: 8.4
    pub average_char_width_px: f64,
    /// Default: 12
    pub padding_left_px: f64,
    /// Default: 12
    pub padding_top_px: f64,
    /// Default: 4
    pub popup_gap_px: f64,
    /// Derive line height and character width from a font size instead
    /// Default: unset
    pub font_size_px: Option<f64>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let metrics = LayoutMetrics::default();
        Self {
            container_width_px: metrics.container_width_px,
            line_height_px: metrics.line_height_px,
            average_char_width_px: metrics.average_char_width_px,
            padding_left_px: metrics.padding_left_px,
            padding_top_px: metrics.padding_top_px,
            popup_gap_px: metrics.popup_gap_px,
            font_size_px: None,
        }
    }
}

impl From<LayoutConfig> for LayoutMetrics {
    fn from(config: LayoutConfig) -> Self {
        if let Some(font_size_px) = config.font_size_px {
            return LayoutMetrics {
                padding_left_px: config.padding_left_px,
                padding_top_px: config.padding_top_px,
                popup_gap_px: config.popup_gap_px,
                ..LayoutMetrics::for_font_size(font_size_px, config.container_width_px)
            };
        }
        LayoutMetrics {
            container_width_px: config.container_width_px,
            line_height_px: config.line_height_px,
            average_char_width_px: config.average_char_width_px,
            padding_left_px: config.padding_left_px,
            padding_top_px: config.padding_top_px,
            popup_gap_px: config.popup_gap_px,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SuggestionConfig {
    /// Cap on popup entries
    /// Default: unlimited
    pub max_suggestions: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Start from the built-in symbols
    /// Default: true
    pub include_builtin: bool,
    /// JSON catalogs appended in order; relative paths resolve against the
    /// config file's directory
    pub extra: Vec<PathBuf>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            include_builtin: true,
            extra: Vec::new(),
        }
    }
}

impl AssistConfig {
    pub fn from_toml_str(source: &str) -> AssistResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> AssistResult<()> {
        let layout = &self.layout;
        let sizes = [
            ("layout.container_width_px", layout.container_width_px),
            ("layout.line_height_px", layout.line_height_px),
            ("layout.average_char_width_px", layout.average_char_width_px),
        ];
        for (key, value) in sizes {
            if !(value.is_finite() && value > 0.0) {
                return Err(AssistError::config(format!("{} must be positive, got {}", key, value)));
            }
        }
        if let Some(size) = layout.font_size_px {
            if !(size.is_finite() && size > 0.0) {
                return Err(AssistError::config(format!(
                    "layout.font_size_px must be positive, got {}",
                    size
                )));
            }
        }
        if self.suggestions.max_suggestions == Some(0) {
            return Err(AssistError::config("suggestions.max_suggestions must be at least 1"));
        }
        Ok(())
    }

    /// Read a config file, resolving relative catalog paths against it
    pub fn load(path: impl AsRef<Path>) -> AssistResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&source)?;
        if let Some(dir) = path.parent() {
            for extra in &mut config.catalog.extra {
                if extra.is_relative() {
                    *extra = dir.join(&*extra);
                }
            }
        }
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn layout_metrics(&self) -> LayoutMetrics {
        self.layout.into()
    }

    /// Assemble the catalog: built-ins (if enabled) followed by extras
    pub fn build_catalog(&self) -> AssistResult<Arc<SymbolCatalog>> {
        if self.catalog.extra.is_empty() {
            return Ok(if self.catalog.include_builtin {
                SymbolCatalog::builtin()
            } else {
                Arc::new(SymbolCatalog::default())
            });
        }
        let mut catalog = if self.catalog.include_builtin {
            SymbolCatalog::builtin().as_ref().clone()
        } else {
            SymbolCatalog::default()
        };
        for path in &self.catalog.extra {
            let extra = SymbolCatalog::load(path)?;
            catalog = catalog.chain(extra.iter().cloned())?;
        }
        Ok(Arc::new(catalog))
    }

    pub fn build_matcher(&self) -> AssistResult<AutocompleteMatcher> {
        Ok(AutocompleteMatcher::new(self.build_catalog()?).with_limit(self.suggestions.max_suggestions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AssistConfig::from_toml_str("").unwrap();
        assert_eq!(config, AssistConfig::default());
        assert!(config.catalog.include_builtin);
        assert_eq!(config.layout_metrics(), LayoutMetrics::default());
    }

    #[test]
    fn test_partial_sections() {
        let config = AssistConfig::from_toml_str(
            "[layout]\nline_height_px = 18.0\n\n[suggestions]\nmax_suggestions = 5\n",
        )
        .unwrap();
        assert_eq!(config.layout.line_height_px, 18.0);
        assert_eq!(config.layout.container_width_px, 600.0);
        assert_eq!(config.suggestions.max_suggestions, Some(5));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(AssistConfig::from_toml_str("[layout\n").is_err());
    }

    #[test]
    fn test_non_positive_line_height_rejected() {
        let err = AssistConfig::from_toml_str("[layout]\nline_height_px = 0.0\n").unwrap_err();
        assert!(matches!(err, AssistError::ConfigError { .. }));
        assert!(err.to_string().contains("layout.line_height_px"));
    }

    #[test]
    fn test_zero_suggestion_limit_rejected() {
        let err = AssistConfig::from_toml_str("[suggestions]\nmax_suggestions = 0\n").unwrap_err();
        assert!(err.to_string().contains("max_suggestions"));
    }

    #[test]
    fn test_font_size_derives_metrics() {
        let config =
            AssistConfig::from_toml_str("[layout]\nfont_size_px = 20.0\npadding_left_px = 2.0\n").unwrap();
        let metrics = config.layout_metrics();
        assert_eq!(metrics.line_height_px, 30.0);
        assert!((metrics.average_char_width_px - 12.0).abs() < 1e-9);
        assert_eq!(metrics.padding_left_px, 2.0);
        assert_eq!(metrics.container_width_px, 600.0);
    }

    #[test]
    fn test_catalog_without_builtins() {
        let config = AssistConfig::from_toml_str("[catalog]\ninclude_builtin = false\n").unwrap();
        assert!(config.build_catalog().unwrap().is_empty());
    }

    #[test]
    fn test_matcher_honors_limit() {
        let config = AssistConfig::from_toml_str("[suggestions]\nmax_suggestions = 3\n").unwrap();
        let matcher = config.build_matcher().unwrap();
        assert_eq!(matcher.suggestions_for(r"\").len(), 3);
    }
}
