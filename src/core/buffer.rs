//! Edit buffer: text plus a validated cursor.

use crate::utils::error::AssistResult;
use crate::utils::offsets::{utf16_len, utf16_to_byte};

/// Text content with a cursor offset in UTF-16 code units.
///
/// The cursor always lies within the text and never splits a surrogate pair.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditBuffer {
    text: String,
    cursor: usize,
    // byte index matching `cursor`
    cursor_byte: usize,
}

impl EditBuffer {
    pub fn new(text: impl Into<String>, cursor: usize) -> AssistResult<Self> {
        let text = text.into();
        let cursor_byte = utf16_to_byte(&text, cursor)?;
        Ok(Self {
            text,
            cursor,
            cursor_byte,
        })
    }

    /// Buffer with the cursor after the last character
    pub fn at_end(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = utf16_len(&text);
        let cursor_byte = text.len();
        Self {
            text,
            cursor,
            cursor_byte,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor offset in UTF-16 code units
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Length in UTF-16 code units
    pub fn len_utf16(&self) -> usize {
        utf16_len(&self.text)
    }

    pub fn text_before_cursor(&self) -> &str {
        &self.text[..self.cursor_byte]
    }

    pub fn set_cursor(&mut self, cursor: usize) -> AssistResult<()> {
        self.cursor_byte = utf16_to_byte(&self.text, cursor)?;
        self.cursor = cursor;
        Ok(())
    }

    /// Replace text and cursor together; the buffer is unchanged on error
    pub fn replace(&mut self, text: impl Into<String>, cursor: usize) -> AssistResult<()> {
        *self = Self::new(text, cursor)?;
        Ok(())
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::AssistError;

    #[test]
    fn test_cursor_validation() {
        assert!(EditBuffer::new("abc", 3).is_ok());
        assert_eq!(
            EditBuffer::new("abc", 4),
            Err(AssistError::out_of_range(4, 3))
        );
    }

    #[test]
    fn test_text_before_cursor_multibyte() {
        let buffer = EditBuffer::new("∑ $x$", 3).unwrap();
        assert_eq!(buffer.text_before_cursor(), "∑ $");
    }

    #[test]
    fn test_failed_replace_keeps_state() {
        let mut buffer = EditBuffer::at_end("$x$");
        assert!(buffer.replace("y", 5).is_err());
        assert_eq!(buffer.text(), "$x$");
        assert_eq!(buffer.cursor(), 3);
    }
}
