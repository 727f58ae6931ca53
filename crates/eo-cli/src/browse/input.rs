//! Single-line text input with cursor

use crossterm::event::{KeyCode, KeyModifiers};

#[derive(Default, Clone, Debug)]
pub struct TextInput {
    pub text: String,
    /// Byte offset, always on a char boundary
    pub cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            cursor: text.len(),
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    fn prev_boundary(&self) -> usize {
        self.text[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.text[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
            .unwrap_or(self.text.len())
    }

    pub fn delete_char_before(&mut self) {
        if self.cursor > 0 {
            let prev = self.prev_boundary();
            self.text.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn delete_char_at(&mut self) {
        if self.cursor < self.text.len() {
            let next = self.next_boundary();
            self.text.drain(self.cursor..next);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.prev_boundary();
    }

    pub fn move_right(&mut self) {
        self.cursor = self.next_boundary();
    }

    /// Start of the word before the cursor, skipping trailing whitespace
    fn word_start(&self) -> usize {
        let before = self.text[..self.cursor].trim_end();
        before
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0)
    }

    pub fn move_word_left(&mut self) {
        self.cursor = self.word_start();
    }

    pub fn move_word_right(&mut self) {
        let after = &self.text[self.cursor..];
        let skipped = after.len() - after.trim_start().len();
        let word = after[skipped..]
            .find(char::is_whitespace)
            .unwrap_or(after.len() - skipped);
        self.cursor += skipped + word;
    }

    pub fn delete_word_before(&mut self) {
        let start = self.word_start();
        self.text.drain(start..self.cursor);
        self.cursor = start;
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Apply an editing key. Returns true if the key was consumed.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        let has_ctrl = modifiers.contains(KeyModifiers::CONTROL);
        // macOS Option may report as SUPER
        let has_alt = modifiers.intersects(KeyModifiers::ALT | KeyModifiers::SUPER);

        match code {
            KeyCode::Char('u') if has_ctrl => self.clear(),
            KeyCode::Char('w') if has_ctrl => self.delete_word_before(),
            KeyCode::Backspace if has_alt => self.delete_word_before(),
            KeyCode::Char('a') if has_ctrl => self.cursor = 0,
            KeyCode::Char('e') if has_ctrl => self.cursor = self.text.len(),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.text.len(),
            KeyCode::Char('b') if has_alt => self.move_word_left(),
            KeyCode::Char('f') if has_alt => self.move_word_right(),
            KeyCode::Left if has_alt || has_ctrl => self.move_word_left(),
            KeyCode::Right if has_alt || has_ctrl => self.move_word_right(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Backspace => self.delete_char_before(),
            KeyCode::Delete => self.delete_char_at(),
            KeyCode::Char(c) if !has_ctrl && !has_alt => self.insert_char(c),
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> TextInput {
        let mut input = TextInput::new();
        for c in text.chars() {
            input.handle_key(KeyCode::Char(c), KeyModifiers::NONE);
        }
        input
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut input = typed("énergie");
        assert_eq!(input.cursor, input.text.len());
        input.handle_key(KeyCode::Backspace, KeyModifiers::NONE);
        assert_eq!(input.text, "énergi");
        input.handle_key(KeyCode::Home, KeyModifiers::NONE);
        input.handle_key(KeyCode::Delete, KeyModifiers::NONE);
        assert_eq!(input.text, "nergi");
        assert_eq!(input.cursor, 0);
    }

    #[test]
    fn test_word_motions() {
        let mut input = typed("federal  permitting");
        input.move_word_left();
        assert_eq!(input.cursor, 9);
        input.move_word_left();
        assert_eq!(input.cursor, 0);
        input.move_word_right();
        assert_eq!(input.cursor, 7);
        input.move_word_right();
        assert_eq!(input.cursor, input.text.len());
    }

    #[test]
    fn test_ctrl_w_and_ctrl_u() {
        let mut input = typed("energy dominance ");
        assert!(input.handle_key(KeyCode::Char('w'), KeyModifiers::CONTROL));
        assert_eq!(input.text, "energy ");
        assert!(input.handle_key(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(input.text, "");
        assert!(!input.handle_key(KeyCode::Char('x'), KeyModifiers::CONTROL));
    }
}
