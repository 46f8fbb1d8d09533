//! WASM bindings for texassist
//!
//! This module exposes the engine to the browser editor. Offsets are UTF-16
//! code units, which is what `HTMLTextAreaElement.selectionStart` reports.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::core::autocomplete::Suggestion;
use crate::core::buffer::EditBuffer;
use crate::core::catalog::{Category, SymbolCatalog};
use crate::core::insertion::Insertion;
use crate::core::layout::{LayoutMetrics, TextExtent, TextMeasure, Viewport};
use crate::core::session::{EditorKey, EditorSession, KeyOutcome};
use crate::utils::error::AssistError;

/// Insertion request options (exposed to WASM)
#[derive(Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct InsertOptions {
    /// `latex`, `markdown` or `question`
    #[serde(default)]
    pub category: Category,
    /// Start of the span to replace; defaults to the cursor
    #[serde(default)]
    pub replace_start: Option<usize>,
    /// End of the span to replace; defaults to the cursor
    #[serde(default)]
    pub replace_end: Option<usize>,
}

/// Result of a session event (exposed to WASM)
#[derive(Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EventResult {
    /// Whether the host should suppress its default key handling
    pub handled: bool,
    /// Text to apply, when the event produced an edit
    pub new_text: Option<String>,
    pub new_cursor_offset: Option<usize>,
    pub popup_open: bool,
    pub error: Option<String>,
}

impl EventResult {
    fn from_outcome(outcome: KeyOutcome, popup_open: bool) -> Self {
        match outcome {
            KeyOutcome::Ignored => EventResult {
                popup_open,
                ..Default::default()
            },
            KeyOutcome::Handled => EventResult {
                handled: true,
                popup_open,
                ..Default::default()
            },
            KeyOutcome::Edited(edit) => EventResult {
                handled: true,
                popup_open,
                ..EventResult::from_edit(edit)
            },
        }
    }

    fn from_edit(edit: Insertion) -> Self {
        EventResult {
            handled: true,
            new_text: Some(edit.new_text),
            new_cursor_offset: Some(edit.new_cursor_offset),
            ..Default::default()
        }
    }

    fn from_error(err: AssistError) -> Self {
        EventResult {
            error: Some(err.to_string()),
            ..Default::default()
        }
    }
}

/// Popup contents handed to the host renderer
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PopupPayload<'a> {
    suggestions: &'a [Suggestion],
    selected: usize,
}

/// Safely serialize a value to JsValue, returning an error object on failure.
///
/// This prevents panics from `unwrap()` when serialization fails.
fn to_js_value<T: Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or_else(|e| {
        let error_obj = EventResult {
            error: Some(format!("Serialization error: {}", e)),
            ..Default::default()
        };
        serde_wasm_bindgen::to_value(&error_obj).unwrap_or(JsValue::NULL)
    })
}

/// A JS function `(text, wrapWidthPx) => ({ widthPx, heightPx })`
struct JsMeasure<'a> {
    callback: &'a js_sys::Function,
}

impl TextMeasure for JsMeasure<'_> {
    type Error = AssistError;

    fn measure(&mut self, text: &str, wrap_width_px: f64) -> Result<TextExtent, AssistError> {
        let value = self
            .callback
            .call2(&JsValue::NULL, &JsValue::from_str(text), &JsValue::from_f64(wrap_width_px))
            .map_err(|thrown| AssistError::measure(describe_js_error(&thrown)))?;
        serde_wasm_bindgen::from_value(value).map_err(|e| AssistError::measure(e.to_string()))
    }
}

/// Best-effort message for a thrown JS value
fn describe_js_error(value: &JsValue) -> String {
    if let Some(message) = value.as_string() {
        return message;
    }
    value
        .dyn_ref::<js_sys::Error>()
        .map(|err| String::from(err.message()))
        .unwrap_or_else(|| format!("{:?}", value))
}

impl From<AssistError> for JsValue {
    fn from(err: AssistError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

fn layout_from_js(metrics: JsValue) -> LayoutMetrics {
    if metrics.is_undefined() || metrics.is_null() {
        return LayoutMetrics::default();
    }
    serde_wasm_bindgen::from_value(metrics).unwrap_or_default()
}

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Whether the text before the caret ends inside `$...$`
#[wasm_bindgen(js_name = "isInsideMathMode")]
pub fn is_inside_math_mode_wasm(text_before_offset: &str) -> bool {
    crate::core::math_mode::is_inside_math_mode(text_before_offset)
}

/// The partial command before the caret, or `undefined`
#[wasm_bindgen(js_name = "matchCandidate")]
pub fn match_candidate_wasm(text_before_cursor: &str) -> Option<String> {
    crate::core::autocomplete::match_candidate(text_before_cursor).map(str::to_string)
}

/// Built-in catalog matches for a candidate
#[wasm_bindgen(js_name = "suggestionsFor")]
pub fn suggestions_for_wasm(candidate: &str) -> JsValue {
    to_js_value(&crate::suggestions_for(candidate))
}

/// Insert a template into `text` at `cursor`.
///
/// Returns `{ newText, newCursorOffset }`, or `{ error }` when the cursor is
/// invalid.
#[wasm_bindgen(js_name = "insertSymbol")]
pub fn insert_symbol_wasm(template: &str, text: &str, cursor: usize, options: JsValue) -> JsValue {
    let opts: InsertOptions = serde_wasm_bindgen::from_value(options).unwrap_or_default();
    let buffer = match EditBuffer::new(text, cursor) {
        Ok(buffer) => buffer,
        Err(err) => return to_js_value(&EventResult::from_error(err)),
    };
    let range = match (opts.replace_start, opts.replace_end) {
        (None, None) => None,
        (start, end) => Some(start.unwrap_or(cursor)..end.unwrap_or(cursor)),
    };
    let edit = crate::core::insertion::insert(template, opts.category, &buffer, range);
    to_js_value(&edit)
}

/// Visual position of `offset`, measured through the host callback.
///
/// Measurement failures are rethrown as error strings.
#[wasm_bindgen(js_name = "mapOffsetToVisualPosition")]
pub fn map_offset_to_visual_position_wasm(
    text: &str,
    offset: usize,
    measure: &js_sys::Function,
    metrics: JsValue,
) -> Result<JsValue, JsValue> {
    let len = crate::utils::offsets::utf16_len(text);
    if offset > len {
        return Err(AssistError::out_of_range(offset, len).into());
    }
    let metrics = layout_from_js(metrics);
    let mut oracle = JsMeasure { callback: measure };
    let position = crate::core::layout::map_offset_to_visual_position(text, offset, &mut oracle, &metrics)?;
    Ok(to_js_value(&position))
}

/// Get version information
#[wasm_bindgen(js_name = "getVersion")]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Stateful editor binding: one instance per mounted editor
#[wasm_bindgen]
pub struct AssistEditor {
    session: EditorSession,
    metrics: LayoutMetrics,
}

#[wasm_bindgen]
impl AssistEditor {
    /// Create a session. `catalogJson` (optional) is a JSON array of extra
    /// entries appended to the built-in catalog.
    #[wasm_bindgen(constructor)]
    pub fn new(initial_text: &str, catalog_json: Option<String>, metrics: JsValue) -> Result<AssistEditor, JsValue> {
        let catalog = match catalog_json {
            Some(json) => {
                let extra = SymbolCatalog::from_json_str(&json).map_err(|e| JsValue::from_str(&e.to_string()))?;
                let merged = SymbolCatalog::builtin()
                    .as_ref()
                    .clone()
                    .chain(extra.iter().cloned())
                    .map_err(|e| JsValue::from_str(&e.to_string()))?;
                Arc::new(merged)
            }
            None => SymbolCatalog::builtin(),
        };
        Ok(AssistEditor {
            session: EditorSession::new(catalog, initial_text),
            metrics: layout_from_js(metrics),
        })
    }

    #[wasm_bindgen(js_name = "onTextChange")]
    pub fn on_text_change(&mut self, text: String, cursor: usize) -> JsValue {
        let result = match self.session.on_text_change(text, cursor) {
            Ok(state) => EventResult {
                popup_open: state.is_open(),
                ..Default::default()
            },
            Err(err) => EventResult::from_error(err),
        };
        to_js_value(&result)
    }

    #[wasm_bindgen(js_name = "onCursorMove")]
    pub fn on_cursor_move(&mut self, cursor: usize) -> JsValue {
        let result = match self.session.on_cursor_move(cursor) {
            Ok(state) => EventResult {
                popup_open: state.is_open(),
                ..Default::default()
            },
            Err(err) => EventResult::from_error(err),
        };
        to_js_value(&result)
    }

    /// Feed a `KeyboardEvent.key`; `handled: true` means preventDefault
    #[wasm_bindgen(js_name = "onKey")]
    pub fn on_key(&mut self, key: &str) -> JsValue {
        let outcome = match EditorKey::from_dom_key(key) {
            Some(key) => self.session.on_key(key),
            None => KeyOutcome::Ignored,
        };
        let open = self.session.state().is_open();
        to_js_value(&EventResult::from_outcome(outcome, open))
    }

    #[wasm_bindgen(js_name = "onClickOutside")]
    pub fn on_click_outside(&mut self) {
        self.session.on_click_outside();
    }

    /// Accept a clicked suggestion
    pub fn accept(&mut self, index: usize) -> JsValue {
        match self.session.accept(index) {
            Some(edit) => to_js_value(&EventResult::from_edit(edit)),
            None => to_js_value(&EventResult::default()),
        }
    }

    /// Symbol palette insertion at the caret
    #[wasm_bindgen(js_name = "insertSymbol")]
    pub fn insert_symbol(&mut self, template: &str, category: &str) -> JsValue {
        let category = match category.parse::<Category>() {
            Ok(category) => category,
            Err(err) => return to_js_value(&EventResult::from_error(err)),
        };
        to_js_value(&EventResult::from_edit(self.session.insert_symbol(template, category)))
    }

    /// `{ suggestions, selected }`, or `null` when closed
    pub fn popup(&self) -> JsValue {
        match self.session.popup() {
            Some(view) => to_js_value(&PopupPayload {
                suggestions: view.suggestions,
                selected: view.selected,
            }),
            None => JsValue::NULL,
        }
    }

    /// `{ x, y }` for the popup, or `null` when closed
    #[wasm_bindgen(js_name = "popupAnchor")]
    pub fn popup_anchor(&self, measure: &js_sys::Function, viewport: JsValue) -> Result<JsValue, JsValue> {
        let viewport: Viewport = serde_wasm_bindgen::from_value(viewport).unwrap_or_default();
        let mut oracle = JsMeasure { callback: measure };
        match self.session.popup_anchor(&mut oracle, &self.metrics, &viewport)? {
            Some(anchor) => Ok(to_js_value(&anchor)),
            None => Ok(JsValue::NULL),
        }
    }

    pub fn text(&self) -> String {
        self.session.text().to_string()
    }

    pub fn cursor(&self) -> usize {
        self.session.cursor()
    }
}
