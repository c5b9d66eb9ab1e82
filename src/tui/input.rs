//! Input field handling for the terminal user interface.

/// A single-line text input with a cursor.
///
/// The cursor counts characters, not bytes, so multi-byte input edits cleanly.
#[derive(Clone, Debug, Default)]
pub struct InputField {
    pub value: String,
    pub cursor: usize,
}

impl InputField {
    /// Create a new empty input field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an input field with initial text, cursor at the end.
    pub fn with_value(value: &str) -> Self {
        Self {
            value: value.to_string(),
            cursor: value.chars().count(),
        }
    }

    fn byte_index(&self, char_pos: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_pos)
            .map_or(self.value.len(), |(i, _)| i)
    }

    /// Insert a character at the current cursor position.
    pub fn handle_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor.
    pub fn handle_backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    /// Delete the character at the cursor position.
    pub fn handle_delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    /// Move cursor one position to the left.
    pub fn move_cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Move cursor one position to the right.
    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_and_editing() {
        let mut field = InputField::new();
        for c in "wlk".chars() {
            field.handle_char(c);
        }
        field.move_cursor_left();
        field.move_cursor_left();
        field.handle_char('a');
        assert_eq!(field.value, "walk");
        assert_eq!(field.cursor, 2);

        field.handle_backspace();
        assert_eq!(field.value, "wlk");
        field.handle_delete();
        assert_eq!(field.value, "wk");
    }

    #[test]
    fn test_multibyte_characters() {
        let mut field = InputField::with_value("café");
        assert_eq!(field.cursor, 4);
        field.handle_backspace();
        assert_eq!(field.value, "caf");
        field.handle_char('é');
        field.handle_char('!');
        assert_eq!(field.value, "café!");
    }

    #[test]
    fn test_cursor_bounds_and_clear() {
        let mut field = InputField::with_value("ab");
        field.move_cursor_right();
        assert_eq!(field.cursor, 2);
        field.handle_delete();
        assert_eq!(field.value, "ab");

        field.clear();
        field.move_cursor_left();
        field.handle_backspace();
        assert_eq!(field.cursor, 0);
        assert!(field.value.is_empty());
    }
}
