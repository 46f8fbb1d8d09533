//! Fixed-advance text measurement.
//!
//! Simulates `white-space: pre-wrap; word-break: break-all` for a font where
//! every character has the same advance. Used by the CLI and tests, and as a
//! fallback where the host cannot measure.

use std::convert::Infallible;

use super::{TextExtent, TextMeasure};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasure {
    char_width_px: f64,
    line_height_px: f64,
}

impl MonospaceMeasure {
    pub fn new(char_width_px: f64, line_height_px: f64) -> Self {
        Self {
            char_width_px,
            line_height_px,
        }
    }

    /// Characters that fit on one visual line (at least one)
    pub fn chars_per_line(&self, wrap_width_px: f64) -> usize {
        if self.char_width_px <= 0.0 {
            return usize::MAX;
        }
        let fit = (wrap_width_px / self.char_width_px + 1e-9).floor();
        if fit.is_finite() && fit >= 1.0 {
            fit as usize
        } else {
            1
        }
    }
}

impl TextMeasure for MonospaceMeasure {
    type Error = Infallible;

    fn measure(&mut self, text: &str, wrap_width_px: f64) -> Result<TextExtent, Infallible> {
        let per_line = self.chars_per_line(wrap_width_px);
        let mut rows = 0;
        let mut widest = 0;
        for line in text.split('\n') {
            let chars = line.chars().count();
            rows += chars.div_ceil(per_line).max(1);
            widest = widest.max(chars.min(per_line));
        }
        Ok(TextExtent {
            width_px: widest as f64 * self.char_width_px,
            height_px: rows as f64 * self.line_height_px,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_row() {
        let mut m = MonospaceMeasure::new(10.0, 20.0);
        let extent = m.measure("abc", 100.0).unwrap();
        assert_eq!(extent, TextExtent { width_px: 30.0, height_px: 20.0 });
    }

    #[test]
    fn test_wraps_at_width() {
        let mut m = MonospaceMeasure::new(10.0, 20.0);
        assert_eq!(m.measure(&"a".repeat(10), 100.0).unwrap().height_px, 20.0);
        assert_eq!(m.measure(&"a".repeat(11), 100.0).unwrap().height_px, 40.0);
    }

    #[test]
    fn test_empty_and_newlines() {
        let mut m = MonospaceMeasure::new(10.0, 20.0);
        assert_eq!(m.measure("", 100.0).unwrap().height_px, 20.0);
        assert_eq!(m.measure("a\n\nb", 100.0).unwrap().height_px, 60.0);
    }

    #[test]
    fn test_narrow_container_fits_one_char() {
        let m = MonospaceMeasure::new(10.0, 20.0);
        assert_eq!(m.chars_per_line(3.0), 1);
    }
}
