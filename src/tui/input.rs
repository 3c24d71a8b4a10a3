//! Single-line text editor used while composing or editing a task.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A text buffer with a cursor.
///
/// `cursor` counts characters, not bytes, so multi-byte input never splits a
/// UTF-8 sequence.
#[derive(Clone, Debug, Default)]
pub struct InputField {
    value: String,
    cursor: usize,
}

impl InputField {
    /// Create a new empty input field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents and put the cursor at the end.
    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor = self.char_len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Take the contents, leaving the field empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.value)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map_or(self.value.len(), |(i, _)| i)
    }

    /// Apply an editing key. Keys the editor has no use for are ignored.
    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('a') if ctrl => self.cursor = 0,
            KeyCode::Char('e') if ctrl => self.cursor = self.char_len(),
            KeyCode::Char('u') if ctrl => self.delete_to_start(),
            KeyCode::Char('k') if ctrl => self.delete_to_end(),
            KeyCode::Char('w') if ctrl => self.delete_word_before(),
            KeyCode::Char(_) if ctrl => {}
            KeyCode::Char(c) => self.handle_char(c),
            KeyCode::Backspace => self.handle_backspace(),
            KeyCode::Delete => self.handle_delete(),
            KeyCode::Left => self.move_cursor_left(),
            KeyCode::Right => self.move_cursor_right(),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.char_len(),
            _ => {}
        }
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
        if self.cursor < self.char_len() {
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    fn delete_to_start(&mut self) {
        let at = self.byte_index(self.cursor);
        self.value.replace_range(..at, "");
        self.cursor = 0;
    }

    fn delete_to_end(&mut self) {
        let at = self.byte_index(self.cursor);
        self.value.truncate(at);
    }

    /// Delete back to the start of the previous word, skipping any whitespace
    /// directly before the cursor first.
    fn delete_word_before(&mut self) {
        let chars: Vec<char> = self.value.chars().collect();
        let mut start = self.cursor;
        while start > 0 && chars[start - 1].is_whitespace() {
            start -= 1;
        }
        while start > 0 && !chars[start - 1].is_whitespace() {
            start -= 1;
        }
        let from = self.byte_index(start);
        let to = self.byte_index(self.cursor);
        self.value.replace_range(from..to, "");
        self.cursor = start;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn typed(text: &str) -> InputField {
        let mut field = InputField::new();
        for c in text.chars() {
            field.handle_key(key(KeyCode::Char(c)));
        }
        field
    }

    #[test]
    fn test_typing_and_cursor_edits() {
        let mut field = typed("buy milk");
        assert_eq!(field.value(), "buy milk");
        assert_eq!(field.cursor(), 8);

        field.handle_key(key(KeyCode::Home));
        field.handle_key(key(KeyCode::Delete));
        field.handle_key(key(KeyCode::Char('B')));
        assert_eq!(field.value(), "Buy milk");

        field.handle_key(key(KeyCode::End));
        field.handle_key(key(KeyCode::Backspace));
        assert_eq!(field.value(), "Buy mil");
    }

    #[test]
    fn test_multibyte_characters() {
        let mut field = typed("café");
        field.handle_key(key(KeyCode::Left));
        field.handle_key(key(KeyCode::Char('ñ')));
        assert_eq!(field.value(), "cafñé");
        field.handle_key(key(KeyCode::Right));
        field.handle_key(key(KeyCode::Backspace));
        assert_eq!(field.value(), "cafñ");
        assert_eq!(field.cursor(), 4);
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut field = typed("ab");
        field.handle_key(key(KeyCode::Right));
        assert_eq!(field.cursor(), 2);
        field.handle_key(key(KeyCode::Delete));
        assert_eq!(field.value(), "ab");

        field.handle_key(key(KeyCode::Home));
        field.handle_key(key(KeyCode::Left));
        field.handle_key(key(KeyCode::Backspace));
        assert_eq!(field.cursor(), 0);
        assert_eq!(field.value(), "ab");
    }

    #[test]
    fn test_control_shortcuts() {
        let mut field = typed("call the bank");
        field.handle_key(ctrl('w'));
        assert_eq!(field.value(), "call the ");

        field.handle_key(ctrl('w'));
        assert_eq!(field.value(), "call ");

        field.handle_key(ctrl('a'));
        field.handle_key(key(KeyCode::Right));
        field.handle_key(ctrl('k'));
        assert_eq!(field.value(), "c");

        field.set_value("hello world");
        field.handle_key(key(KeyCode::Left));
        field.handle_key(ctrl('u'));
        assert_eq!(field.value(), "d");
        assert_eq!(field.cursor(), 0);

        field.handle_key(ctrl('e'));
        assert_eq!(field.cursor(), 1);
    }

    #[test]
    fn test_unbound_control_keys_do_not_insert() {
        let mut field = typed("x");
        field.handle_key(ctrl('z'));
        field.handle_key(key(KeyCode::Esc));
        assert_eq!(field.value(), "x");
    }

    #[test]
    fn test_take_empties_field() {
        let mut field = typed("abc");
        assert_eq!(field.take(), "abc");
        assert_eq!(field.value(), "");
        assert_eq!(field.cursor(), 0);
    }
}
