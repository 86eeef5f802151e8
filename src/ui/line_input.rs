use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Submit,
    Cancel,
}

/// Single-line editor for the answer field.
pub struct AnswerInput {
    text: String,
    /// Cursor position as a char index (0 = before first char).
    cursor: usize,
    /// Last submitted text, recalled with Up.
    last_submitted: Option<String>,
}

impl AnswerInput {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            cursor: text.chars().count(),
            last_submitted: None,
        }
    }

    pub fn value(&self) -> &str {
        &self.text
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Takes the text for submission and remembers it for recall.
    pub fn take(&mut self) -> String {
        let text = std::mem::take(&mut self.text);
        self.cursor = 0;
        self.last_submitted = Some(text.clone());
        text
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Returns (before_cursor, cursor_char, after_cursor) for styled rendering.
    /// When cursor is at end of text, cursor_char is None.
    pub fn render_parts(&self) -> (&str, Option<char>, &str) {
        let byte_offset = self.char_to_byte(self.cursor);
        match self.text[byte_offset..].chars().next() {
            Some(ch) => {
                let next_byte = byte_offset + ch.len_utf8();
                (&self.text[..byte_offset], Some(ch), &self.text[next_byte..])
            }
            None => (&self.text, None, ""),
        }
    }

    pub fn handle(&mut self, key: KeyEvent) -> InputResult {
        match key.code {
            KeyCode::Esc => return InputResult::Cancel,
            KeyCode::Enter => return InputResult::Submit,

            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.cursor < self.text.chars().count() {
                    self.cursor += 1;
                }
            }
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.text.chars().count(),
            KeyCode::Up => {
                if let Some(last) = &self.last_submitted {
                    self.text = last.clone();
                    self.cursor = self.text.chars().count();
                }
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.remove_char_at(self.cursor - 1);
                    self.cursor -= 1;
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.text.chars().count() {
                    self.remove_char_at(self.cursor);
                }
            }
            KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.cursor = 0;
            }
            KeyCode::Char('e') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.cursor = self.text.chars().count();
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.clear();
            }
            KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.delete_word_back();
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let byte_offset = self.char_to_byte(self.cursor);
                self.text.insert(byte_offset, ch);
                self.cursor += 1;
            }
            _ => {}
        }
        InputResult::Continue
    }

    /// Convert char index to byte offset.
    fn char_to_byte(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(b, _)| b)
            .unwrap_or(self.text.len())
    }

    fn remove_char_at(&mut self, char_idx: usize) {
        let start = self.char_to_byte(char_idx);
        let end = self.char_to_byte(char_idx + 1);
        self.text.replace_range(start..end, "");
    }

    /// Delete back to the previous factor boundary or whitespace.
    fn delete_word_back(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let chars: Vec<char> = self.text.chars().collect();
        let is_break = |ch: char| ch.is_whitespace() || ch == '(' || ch == ')';
        let mut pos = self.cursor;

        while pos > 0 && is_break(chars[pos - 1]) {
            pos -= 1;
        }
        while pos > 0 && !is_break(chars[pos - 1]) {
            pos -= 1;
        }

        let start_byte = self.char_to_byte(pos);
        let end_byte = self.char_to_byte(self.cursor);
        self.text.replace_range(start_byte..end_byte, "");
        self.cursor = pos;
    }
}

impl Default for AnswerInput {
    fn default() -> Self {
        Self::new("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    fn type_str(input: &mut AnswerInput, text: &str) {
        for ch in text.chars() {
            input.handle(key(KeyCode::Char(ch)));
        }
    }

    #[test]
    fn insert_at_start_middle_end() {
        let mut input = AnswerInput::new("(x+3)");
        type_str(&mut input, "(x-2");
        input.handle(key(KeyCode::Char(')')));
        assert_eq!(input.value(), "(x+3)(x-2)");

        input.handle(key(KeyCode::Home));
        input.handle(key(KeyCode::Right));
        input.handle(key(KeyCode::Right));
        input.handle(key(KeyCode::Right));
        input.handle(key(KeyCode::Char('1')));
        assert_eq!(input.value(), "(x+13)(x-2)");
        assert_eq!(input.cursor, 4);
    }

    #[test]
    fn backspace_and_delete_at_boundaries() {
        let mut input = AnswerInput::new("ab");
        input.handle(key(KeyCode::Backspace));
        assert_eq!(input.value(), "a");
        input.handle(key(KeyCode::Delete));
        assert_eq!(input.value(), "a");
        input.handle(key(KeyCode::Home));
        input.handle(key(KeyCode::Backspace));
        assert_eq!(input.value(), "a");
        input.handle(key(KeyCode::Delete));
        assert_eq!(input.value(), "");
    }

    #[test]
    fn multibyte_editing() {
        let mut input = AnswerInput::new("（ｘ＋３）");
        input.handle(key(KeyCode::Left));
        input.handle(key(KeyCode::Backspace));
        assert_eq!(input.value(), "（ｘ＋）");
        let (before, at, after) = input.render_parts();
        assert_eq!(before, "（ｘ＋");
        assert_eq!(at, Some('）'));
        assert_eq!(after, "");
    }

    #[test]
    fn render_parts_at_end() {
        let input = AnswerInput::new("(x)");
        assert_eq!(input.render_parts(), ("(x)", None, ""));
    }

    #[test]
    fn ctrl_w_deletes_back_to_factor_boundary() {
        let mut input = AnswerInput::new("(x+3)(x-12");
        input.handle(ctrl('w'));
        assert_eq!(input.value(), "(x+3)(");
        input.handle(ctrl('w'));
        assert_eq!(input.value(), "(");
    }

    #[test]
    fn ctrl_a_e_u() {
        let mut input = AnswerInput::new("test");
        input.handle(ctrl('a'));
        assert_eq!(input.cursor, 0);
        input.handle(ctrl('e'));
        assert_eq!(input.cursor, 4);
        input.handle(ctrl('u'));
        assert_eq!(input.value(), "");
        assert_eq!(input.cursor, 0);
    }

    #[test]
    fn enter_submits_and_esc_cancels() {
        let mut input = AnswerInput::default();
        assert_eq!(input.handle(key(KeyCode::Enter)), InputResult::Submit);
        assert_eq!(input.handle(key(KeyCode::Esc)), InputResult::Cancel);
    }

    #[test]
    fn take_then_recall_with_up() {
        let mut input = AnswerInput::new("(x+1)(x+2)");
        assert_eq!(input.take(), "(x+1)(x+2)");
        assert_eq!(input.value(), "");
        assert!(input.is_blank());
        input.handle(key(KeyCode::Up));
        assert_eq!(input.value(), "(x+1)(x+2)");
        assert_eq!(input.cursor, 10);
    }

    #[test]
    fn up_without_history_is_noop() {
        let mut input = AnswerInput::new("abc");
        input.handle(key(KeyCode::Up));
        assert_eq!(input.value(), "abc");
    }
}
