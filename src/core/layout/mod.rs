//! Caret-to-pixel mapping for soft-wrapped text
//!
//! The editor renders text in a fixed-width container that wraps long lines.
//! To anchor the suggestion popup under the caret we need the caret's visual
//! line, which depends on the host's text shaping. The host supplies that
//! through [`TextMeasure`]; this module only counts lines.
//!
//! The horizontal position is approximated from an average character width,
//! so it drifts on proportional fonts. The vertical position is exact as
//! long as the oracle mirrors the real line breaking.

mod monospace;

pub use monospace::MonospaceMeasure;

use serde::{Deserialize, Serialize};

use crate::utils::offsets::{utf16_len, utf16_to_byte_lossy};

/// Rendered size of a piece of text
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextExtent {
    pub width_px: f64,
    pub height_px: f64,
}

/// Host text-measurement oracle.
///
/// `measure` renders `text` with the editor's font and wrapping mode inside a
/// box `wrap_width_px` wide and reports its size.
pub trait TextMeasure {
    type Error;

    fn measure(&mut self, text: &str, wrap_width_px: f64) -> Result<TextExtent, Self::Error>;
}

impl<F, E> TextMeasure for F
where
    F: FnMut(&str, f64) -> Result<TextExtent, E>,
{
    type Error = E;

    fn measure(&mut self, text: &str, wrap_width_px: f64) -> Result<TextExtent, E> {
        self(text, wrap_width_px)
    }
}

/// Geometry of the editor's text container
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutMetrics {
    /// Content width available for text, padding excluded
    pub container_width_px: f64,
    pub line_height_px: f64,
    /// Average glyph advance, derived from font metrics
    pub average_char_width_px: f64,
    pub padding_left_px: f64,
    pub padding_top_px: f64,
    /// Distance between the caret line's bottom and the popup
    pub popup_gap_px: f64,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            container_width_px: 600.0,
            line_height_px: 24.0,
            average_char_width_px: 8.4,
            padding_left_px: 12.0,
            padding_top_px: 12.0,
            popup_gap_px: 4.0,
        }
    }
}

impl LayoutMetrics {
    /// Metrics for a font size, using the usual monospace advance of 0.6em
    /// and a 1.5 line height.
    pub fn for_font_size(font_size_px: f64, container_width_px: f64) -> Self {
        Self {
            container_width_px,
            line_height_px: font_size_px * 1.5,
            average_char_width_px: font_size_px * 0.6,
            ..Self::default()
        }
    }

    /// Number of visual lines a rendered height spans (at least one)
    fn lines_for_height(&self, height_px: f64) -> usize {
        if self.line_height_px <= 0.0 {
            return 1;
        }
        // tolerate float noise from fractional line heights
        let lines = (height_px / self.line_height_px - 1e-6).ceil();
        if lines.is_finite() && lines >= 1.0 {
            lines as usize
        } else {
            1
        }
    }
}

/// Visual location of an offset inside the container
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualPosition {
    /// Visual line counted from the top of the content
    pub line_index: usize,
    pub column_offset_px: f64,
    pub line_top_px: f64,
    /// Logical (newline-delimited) line holding the offset
    pub logical_line: usize,
    /// Characters between the last visual line start and the offset
    pub column: usize,
}

/// Screen placement of the text container
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Viewport {
    pub origin_x: f64,
    pub origin_y: f64,
    pub scroll_left: f64,
    pub scroll_top: f64,
}

/// Absolute point where the popup's top-left corner goes
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PopupAnchor {
    pub x: f64,
    pub y: f64,
}

/// Map a UTF-16 `offset` in `text` to its visual position.
///
/// # Panics
///
/// Panics if `offset` is past the end of `text`; callers own that invariant.
pub fn map_offset_to_visual_position<M>(
    text: &str,
    offset: usize,
    measure: &mut M,
    metrics: &LayoutMetrics,
) -> Result<VisualPosition, M::Error>
where
    M: TextMeasure + ?Sized,
{
    let len = utf16_len(text);
    assert!(offset <= len, "offset {} out of range for text of length {}", offset, len);

    let before = &text[..utf16_to_byte_lossy(text, offset)];
    let mut logical_lines = before.split('\n');
    let current = logical_lines.next_back().unwrap_or("");

    let mut visual_line_count = 0;
    let mut logical_line = 0;
    for line in logical_lines {
        // an empty line still occupies one row
        let sample = if line.is_empty() { " " } else { line };
        let extent = measure.measure(sample, metrics.container_width_px)?;
        visual_line_count += metrics.lines_for_height(extent.height_px);
        logical_line += 1;
    }

    let mut crossed = 0;
    let mut column = 0;
    let mut prev_lines = 1;
    for (idx, ch) in current.char_indices() {
        let prefix = &current[..idx + ch.len_utf8()];
        let extent = measure.measure(prefix, metrics.container_width_px)?;
        let lines = metrics.lines_for_height(extent.height_px);
        if lines > prev_lines {
            tracing::trace!(at = idx, lines, "visual line boundary");
            crossed += lines - prev_lines;
            prev_lines = lines;
            column = 1;
        } else {
            column += 1;
        }
    }

    let line_index = visual_line_count + crossed;
    Ok(VisualPosition {
        line_index,
        column_offset_px: column as f64 * metrics.average_char_width_px + metrics.padding_left_px,
        line_top_px: line_index as f64 * metrics.line_height_px + metrics.padding_top_px,
        logical_line,
        column,
    })
}

/// Screen point for a popup under `position`
pub fn popup_anchor(position: &VisualPosition, viewport: &Viewport, metrics: &LayoutMetrics) -> PopupAnchor {
    PopupAnchor {
        x: viewport.origin_x + position.column_offset_px - viewport.scroll_left,
        y: viewport.origin_y + position.line_top_px + metrics.line_height_px - viewport.scroll_top
            + metrics.popup_gap_px,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::AssistError;
    use std::convert::Infallible;

    fn metrics() -> LayoutMetrics {
        LayoutMetrics {
            container_width_px: 100.0,
            line_height_px: 20.0,
            average_char_width_px: 10.0,
            padding_left_px: 5.0,
            padding_top_px: 5.0,
            popup_gap_px: 4.0,
        }
    }

    fn mono() -> MonospaceMeasure {
        MonospaceMeasure::new(10.0, 20.0)
    }

    #[test]
    fn test_empty_text_at_origin() {
        let pos = map_offset_to_visual_position("", 0, &mut mono(), &metrics()).unwrap();
        assert_eq!(pos.line_index, 0);
        assert_eq!(pos.column_offset_px, 5.0);
        assert_eq!(pos.line_top_px, 5.0);
    }

    #[test]
    fn test_short_text_stays_on_first_line() {
        let text = "$x^2$ + y";
        for offset in 0..=text.len() {
            let pos = map_offset_to_visual_position(text, offset, &mut mono(), &metrics()).unwrap();
            assert_eq!(pos.line_index, 0, "offset {}", offset);
            assert_eq!(pos.column, offset);
        }
    }

    #[test]
    fn test_wrapped_line() {
        // ten characters fit on a visual line
        let text = "abcdefghijklmno";
        let pos = map_offset_to_visual_position(text, 10, &mut mono(), &metrics()).unwrap();
        assert_eq!((pos.line_index, pos.column), (0, 10));

        let pos = map_offset_to_visual_position(text, 15, &mut mono(), &metrics()).unwrap();
        assert_eq!((pos.line_index, pos.column), (1, 5));
        assert_eq!(pos.column_offset_px, 55.0);
        assert_eq!(pos.line_top_px, 25.0);
    }

    #[test]
    fn test_preceding_logical_lines() {
        // line 0 wraps twice (25 chars), line 1 is empty, line 2 holds the caret
        let text = format!("{}\n\nab", "x".repeat(25));
        let pos = map_offset_to_visual_position(&text, text.len(), &mut mono(), &metrics()).unwrap();
        assert_eq!(pos.logical_line, 2);
        assert_eq!(pos.line_index, 4);
        assert_eq!(pos.column, 2);
    }

    #[test]
    fn test_offset_right_after_newline() {
        let pos = map_offset_to_visual_position("ab\ncd", 3, &mut mono(), &metrics()).unwrap();
        assert_eq!((pos.line_index, pos.column), (1, 0));
    }

    #[test]
    fn test_closure_oracle_and_error_propagation() {
        let mut calls = 0;
        let mut oracle = |_: &str, _: f64| -> Result<TextExtent, &'static str> {
            calls += 1;
            if calls > 2 {
                Err("layout unavailable")
            } else {
                Ok(TextExtent { width_px: 10.0, height_px: 20.0 })
            }
        };
        let err = map_offset_to_visual_position("abcd", 4, &mut oracle, &metrics()).unwrap_err();
        assert_eq!(err, "layout unavailable");
    }

    #[test]
    fn test_metrics_for_font_size() {
        let m = LayoutMetrics::for_font_size(16.0, 480.0);
        assert_eq!(m.container_width_px, 480.0);
        assert_eq!(m.line_height_px, 24.0);
        assert!((m.average_char_width_px - 9.6).abs() < 1e-9);
        assert_eq!(m.padding_left_px, LayoutMetrics::default().padding_left_px);
    }

    #[test]
    fn test_measure_error_surfaces_as_assist_error() {
        let mut oracle = |t: &str, _: f64| -> Result<TextExtent, AssistError> {
            if t.len() > 1 {
                Err(AssistError::measure("element detached"))
            } else {
                Ok(TextExtent { width_px: 10.0, height_px: 20.0 })
            }
        };
        let err = map_offset_to_visual_position("ab", 2, &mut oracle, &metrics()).unwrap_err();
        assert_eq!(err, AssistError::measure("element detached"));
        assert_eq!(err.to_string(), "Text measurement failed: element detached");
    }

    #[test]
    fn test_fractional_line_height() {
        let m = LayoutMetrics { line_height_px: 18.4, ..metrics() };
        let mut oracle = |t: &str, _: f64| -> Result<TextExtent, Infallible> {
            let lines = if t == "a" { 3.0 } else { 1.0 };
            Ok(TextExtent { width_px: 0.0, height_px: 18.4 * lines })
        };
        let pos = map_offset_to_visual_position("a\nb", 3, &mut oracle, &m).unwrap();
        assert_eq!(pos.line_index, 3);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_offset_past_end_panics() {
        let _ = map_offset_to_visual_position("ab", 3, &mut mono(), &metrics());
    }

    #[test]
    fn test_popup_anchor() {
        let pos = VisualPosition {
            line_index: 1,
            column_offset_px: 55.0,
            line_top_px: 25.0,
            logical_line: 0,
            column: 5,
        };
        let viewport = Viewport {
            origin_x: 100.0,
            origin_y: 200.0,
            scroll_left: 0.0,
            scroll_top: 10.0,
        };
        let anchor = popup_anchor(&pos, &viewport, &metrics());
        assert_eq!(anchor, PopupAnchor { x: 155.0, y: 239.0 });
    }
}
