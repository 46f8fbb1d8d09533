//! Math-mode tracking.
//!
//! Math mode is a parity state over the `$` delimiter: every `$` toggles it.
//! Escaped dollars, `$$` display math and `\(...\)` are not recognized.

/// Inline math delimiter
pub const MATH_DELIMITER: char = '$';

/// Whether the end of `text_before_offset` lies inside an unterminated
/// `$...$` region.
pub fn is_inside_math_mode(text_before_offset: &str) -> bool {
    text_before_offset.matches(MATH_DELIMITER).count() % 2 == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_text_mode() {
        assert!(!is_inside_math_mode(""));
    }

    #[test]
    fn test_open_delimiter() {
        assert!(is_inside_math_mode("Solve $x"));
        assert!(!is_inside_math_mode("Solve $x$ for "));
    }

    #[test]
    fn test_parity_stable_under_pairs() {
        let samples = ["", "a", "$", "$a$ b $", r"\frac{1}{2}$"];
        for s in samples {
            let base = is_inside_math_mode(s);
            for split in 0..=s.len() {
                let padded = format!("{}$${}", &s[..split], &s[split..]);
                assert_eq!(is_inside_math_mode(&padded), base, "input {:?}", padded);
            }
        }
    }

    #[test]
    fn test_display_math_is_counted_as_two_toggles() {
        assert!(!is_inside_math_mode("$$"));
        assert!(is_inside_math_mode("$$ x $"));
    }

    #[test]
    fn test_escaped_dollar_still_toggles() {
        assert!(is_inside_math_mode(r"costs \$5"));
    }
}
