//! Core input-assistance engine
//!
//! Leaves first:
//! - [`catalog`]: ordered symbol database
//! - [`math_mode`]: `$` parity tracking
//! - [`autocomplete`]: candidate extraction and prefix matching
//! - [`insertion`]: placeholder cleanup, math wrapping, smart cursor
//! - [`layout`]: caret to visual position mapping
//! - [`session`]: per-editor orchestration

pub mod autocomplete;
pub mod buffer;
pub mod catalog;
pub mod insertion;
pub mod layout;
pub mod math_mode;
pub mod session;
