//! UTF-16 offset arithmetic.
//!
//! Host text inputs report cursor positions in UTF-16 code units, while Rust
//! strings are indexed by UTF-8 byte. Every public offset in this crate is a
//! UTF-16 offset; these helpers translate at the boundary.

use super::error::{AssistError, AssistResult};

/// Length of `text` in UTF-16 code units.
pub fn utf16_len(text: &str) -> usize {
    text.chars().map(char::len_utf16).sum()
}

/// Convert a UTF-16 offset into a byte index into `text`.
///
/// Fails when the offset is past the end or lands inside a surrogate pair.
pub fn utf16_to_byte(text: &str, offset: usize) -> AssistResult<usize> {
    let mut units = 0;
    for (byte, ch) in text.char_indices() {
        if units == offset {
            return Ok(byte);
        }
        units += ch.len_utf16();
        if units > offset {
            return Err(AssistError::SplitSurrogate { offset });
        }
    }
    if units == offset {
        Ok(text.len())
    } else {
        Err(AssistError::out_of_range(offset, units))
    }
}

/// Like [`utf16_to_byte`], but clamps past-the-end offsets to the end of the
/// text and rounds offsets inside a surrogate pair down to the pair start.
pub fn utf16_to_byte_lossy(text: &str, offset: usize) -> usize {
    let mut units = 0;
    for (byte, ch) in text.char_indices() {
        let next = units + ch.len_utf16();
        if offset < next {
            return byte;
        }
        units = next;
    }
    text.len()
}

/// Convert a byte index (on a char boundary) into a UTF-16 offset.
pub fn byte_to_utf16(text: &str, byte: usize) -> usize {
    utf16_len(&text[..byte])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_offsets_are_identity() {
        let text = r"\frac{a}{b}";
        assert_eq!(utf16_len(text), text.len());
        assert_eq!(utf16_to_byte(text, 5).unwrap(), 5);
        assert_eq!(byte_to_utf16(text, 5), 5);
    }

    #[test]
    fn test_multibyte_offsets() {
        // 'é' is two UTF-8 bytes but one UTF-16 unit
        let text = "é$x$";
        assert_eq!(utf16_len(text), 4);
        assert_eq!(utf16_to_byte(text, 1).unwrap(), 2);
        assert_eq!(byte_to_utf16(text, 2), 1);
    }

    #[test]
    fn test_surrogate_pair() {
        // U+1D465 MATHEMATICAL ITALIC SMALL X: four bytes, two UTF-16 units
        let text = "a\u{1D465}b";
        assert_eq!(utf16_len(text), 4);
        assert_eq!(utf16_to_byte(text, 3).unwrap(), 5);
        assert_eq!(
            utf16_to_byte(text, 2),
            Err(AssistError::SplitSurrogate { offset: 2 })
        );
        assert_eq!(utf16_to_byte_lossy(text, 2), 1);
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(utf16_to_byte("abc", 3).unwrap(), 3);
        assert_eq!(
            utf16_to_byte("abc", 4),
            Err(AssistError::out_of_range(4, 3))
        );
        assert_eq!(utf16_to_byte_lossy("abc", 40), 3);
    }
}
