//! Editor session
//!
//! One [`EditorSession`] per editor instance. It owns the edit buffer and the
//! suggestion popup state, and turns host events (text changes, cursor moves,
//! keys, clicks, palette requests) into edits for the host to apply.
//!
//! The popup is a two-state machine:
//!
//! ```text
//!            non-empty matches
//!   Idle ─────────────────────────▶ SuggestionsOpen ◀─┐ arrows / typing
//!    ▲                                   │            │ with matches
//!    └───────────────────────────────────┴────────────┘
//!      Escape, click outside, accept, no matches
//! ```

use std::ops::Range;
use std::sync::Arc;

use serde::Serialize;

use super::autocomplete::{AutocompleteMatcher, Completion, Suggestion};
use super::buffer::EditBuffer;
use super::catalog::{Category, SymbolCatalog};
use super::insertion::{insert, Insertion};
use super::layout::{
    map_offset_to_visual_position, popup_anchor, LayoutMetrics, PopupAnchor, TextMeasure, Viewport,
};
use crate::utils::error::AssistResult;

/// Keys the session reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKey {
    ArrowUp,
    ArrowDown,
    Enter,
    Tab,
    Escape,
}

impl EditorKey {
    /// Parse a DOM `KeyboardEvent.key` value
    pub fn from_dom_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(EditorKey::ArrowUp),
            "ArrowDown" => Some(EditorKey::ArrowDown),
            "Enter" => Some(EditorKey::Enter),
            "Tab" => Some(EditorKey::Tab),
            "Escape" | "Esc" => Some(EditorKey::Escape),
            _ => None,
        }
    }
}

/// What the session did with a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not for us; the host should apply its default behavior
    Ignored,
    /// Consumed (selection moved or popup closed)
    Handled,
    /// Consumed and produced an edit to apply
    Edited(Insertion),
}

/// Open popup contents
#[derive(Debug, Clone, PartialEq)]
pub struct OpenSuggestions {
    pub suggestions: Vec<Suggestion>,
    pub selected: usize,
    /// Span of the typed candidate (UTF-16)
    pub replace_range: Range<usize>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    SuggestionsOpen(OpenSuggestions),
}

impl SessionState {
    pub fn is_open(&self) -> bool {
        matches!(self, SessionState::SuggestionsOpen(_))
    }
}

/// What the host renders for the popup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopupView<'a> {
    pub suggestions: &'a [Suggestion],
    pub selected: usize,
}

/// Autocomplete and insertion state for one editor
#[derive(Debug, Clone)]
pub struct EditorSession {
    matcher: AutocompleteMatcher,
    buffer: EditBuffer,
    state: SessionState,
}

impl EditorSession {
    pub fn new(catalog: Arc<SymbolCatalog>, initial_text: impl Into<String>) -> Self {
        Self::with_matcher(AutocompleteMatcher::new(catalog), initial_text)
    }

    pub fn with_matcher(matcher: AutocompleteMatcher, initial_text: impl Into<String>) -> Self {
        Self {
            matcher,
            buffer: EditBuffer::at_end(initial_text),
            state: SessionState::Idle,
        }
    }

    pub fn buffer(&self) -> &EditBuffer {
        &self.buffer
    }

    pub fn text(&self) -> &str {
        self.buffer.text()
    }

    pub fn cursor(&self) -> usize {
        self.buffer.cursor()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn popup(&self) -> Option<PopupView<'_>> {
        match &self.state {
            SessionState::SuggestionsOpen(open) => Some(PopupView {
                suggestions: &open.suggestions,
                selected: open.selected,
            }),
            SessionState::Idle => None,
        }
    }

    /// The host's text changed (typing, paste, cut)
    pub fn on_text_change(&mut self, text: impl Into<String>, cursor: usize) -> AssistResult<&SessionState> {
        self.buffer.replace(text, cursor)?;
        self.refresh();
        Ok(&self.state)
    }

    /// The caret moved without a text change
    pub fn on_cursor_move(&mut self, cursor: usize) -> AssistResult<&SessionState> {
        self.buffer.set_cursor(cursor)?;
        self.refresh();
        Ok(&self.state)
    }

    pub fn on_key(&mut self, key: EditorKey) -> KeyOutcome {
        let SessionState::SuggestionsOpen(open) = &mut self.state else {
            return KeyOutcome::Ignored;
        };
        let count = open.suggestions.len();
        match key {
            EditorKey::ArrowDown => {
                open.selected = (open.selected + 1) % count;
                KeyOutcome::Handled
            }
            EditorKey::ArrowUp => {
                open.selected = (open.selected + count - 1) % count;
                KeyOutcome::Handled
            }
            EditorKey::Escape => {
                self.close_popup("escape");
                KeyOutcome::Handled
            }
            EditorKey::Enter | EditorKey::Tab => {
                let selected = open.selected;
                match self.accept(selected) {
                    Some(edit) => KeyOutcome::Edited(edit),
                    None => KeyOutcome::Handled,
                }
            }
        }
    }

    pub fn on_click_outside(&mut self) {
        if self.state.is_open() {
            self.close_popup("click outside");
        }
    }

    /// Accept the suggestion at `index`, replacing the typed candidate.
    ///
    /// Returns `None` when the popup is closed or `index` is out of bounds.
    pub fn accept(&mut self, index: usize) -> Option<Insertion> {
        let SessionState::SuggestionsOpen(open) = &self.state else {
            return None;
        };
        let suggestion = open.suggestions.get(index)?;
        let edit = insert(
            &suggestion.text,
            suggestion.category,
            &self.buffer,
            Some(open.replace_range.clone()),
        );
        self.close_popup("accepted");
        self.apply(&edit);
        Some(edit)
    }

    /// Palette insertion at the cursor, bypassing autocomplete
    pub fn insert_symbol(&mut self, text: &str, category: Category) -> Insertion {
        let edit = insert(text, category, &self.buffer, None);
        if self.state.is_open() {
            self.close_popup("palette insertion");
        }
        self.apply(&edit);
        edit
    }

    /// Where to place the popup for the current caret, if open
    pub fn popup_anchor<M>(
        &self,
        measure: &mut M,
        metrics: &LayoutMetrics,
        viewport: &Viewport,
    ) -> Result<Option<PopupAnchor>, M::Error>
    where
        M: TextMeasure + ?Sized,
    {
        if !self.state.is_open() {
            return Ok(None);
        }
        let position = map_offset_to_visual_position(self.buffer.text(), self.buffer.cursor(), measure, metrics)?;
        Ok(Some(popup_anchor(&position, viewport, metrics)))
    }

    /// Unmount: close the popup and hand back the final text
    pub fn close(mut self) -> String {
        self.state = SessionState::Idle;
        self.buffer.into_text()
    }

    fn refresh(&mut self) {
        match self.matcher.complete(&self.buffer) {
            Some(Completion {
                replace_range,
                suggestions,
            }) => {
                if !self.state.is_open() {
                    tracing::debug!(count = suggestions.len(), "suggestions opened");
                }
                self.state = SessionState::SuggestionsOpen(OpenSuggestions {
                    suggestions,
                    selected: 0,
                    replace_range,
                });
            }
            None => {
                if self.state.is_open() {
                    self.close_popup("no matches");
                }
            }
        }
    }

    fn close_popup(&mut self, reason: &'static str) {
        tracing::debug!(reason, "suggestions closed");
        self.state = SessionState::Idle;
    }

    fn apply(&mut self, edit: &Insertion) {
        // insertion offsets always fall inside the new text
        self.buffer = match EditBuffer::new(edit.new_text.clone(), edit.new_cursor_offset) {
            Ok(buffer) => buffer,
            Err(err) => {
                debug_assert!(false, "insertion produced an invalid cursor: {}", err);
                tracing::warn!(%err, "insertion produced an invalid cursor, moving it to the end");
                EditBuffer::at_end(edit.new_text.clone())
            }
        };
    }
}
