//! Utility modules
//!
//! This module contains utilities and helpers:
//! - Error types and result types
//! - UTF-16 offset conversion
//! - Configuration loading

pub mod config;
pub mod error;
pub mod offsets;

// Re-export commonly used items
pub use config::{AssistConfig, CatalogConfig, LayoutConfig, SuggestionConfig};
pub use error::{AssistError, AssistResult};
pub use offsets::{byte_to_utf16, utf16_len, utf16_to_byte};
