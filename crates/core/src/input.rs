/// State for the prompt line
///
/// `cursor` counts characters, not bytes, so multi-byte input edits cleanly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    /// Current input buffer
    pub buffer: String,
    /// Cursor position (in chars)
    pub cursor: usize,
    /// Steps back from the newest command while recalling (None = not navigating)
    pub history_index: Option<usize>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    fn byte_offset(&self, cursor: usize) -> usize {
        self.buffer.char_indices().nth(cursor).map(|(i, _)| i).unwrap_or(self.buffer.len())
    }

    fn char_len(&self) -> usize {
        self.buffer.chars().count()
    }

    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.buffer.insert(at, c);
        self.cursor += 1;
    }

    pub fn insert_str(&mut self, s: &str) {
        let at = self.byte_offset(self.cursor);
        self.buffer.insert_str(at, s);
        self.cursor += s.chars().count();
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_offset(self.cursor);
            self.buffer.remove(at);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_offset(self.cursor);
            self.buffer.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    /// Replace the buffer and put the cursor at the end
    pub fn set(&mut self, text: &str) {
        self.buffer = text.to_string();
        self.cursor = self.char_len();
    }

    pub fn take(&mut self) -> String {
        let buffer = std::mem::take(&mut self.buffer);
        self.cursor = 0;
        buffer
    }

    /// Show the next older command; `commands` is oldest-first
    pub fn recall_previous(&mut self, commands: &[&str]) -> bool {
        let next = self.history_index.map_or(0, |idx| idx + 1);
        if next >= commands.len() {
            return false;
        }
        self.history_index = Some(next);
        self.set(commands[commands.len() - 1 - next]);
        true
    }

    /// Show the next newer command; stepping past the newest clears the input
    pub fn recall_next(&mut self, commands: &[&str]) -> bool {
        match self.history_index {
            None => false,
            Some(0) => {
                self.history_index = None;
                self.clear();
                true
            }
            Some(idx) => {
                let next = idx - 1;
                match commands.len().checked_sub(1 + next).and_then(|i| commands.get(i)) {
                    Some(command) => {
                        self.history_index = Some(next);
                        self.set(command);
                    }
                    None => {
                        self.history_index = None;
                        self.clear();
                    }
                }
                true
            }
        }
    }

    pub fn reset_history_navigation(&mut self) {
        self.history_index = None;
    }

    pub fn is_navigating_history(&self) -> bool {
        self.history_index.is_some()
    }

    /// `position/total` indicator while recalling
    pub fn history_position(&self, total: usize) -> Option<String> {
        self.history_index.map(|idx| format!("{}/{}", total.saturating_sub(idx), total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_state() {
        let mut input = InputState::new();

        input.insert_char('H');
        assert_eq!(input.buffer, "H");
        assert_eq!(input.cursor, 1);

        input.insert_char('i');
        assert_eq!(input.buffer, "Hi");
        assert_eq!(input.cursor, 2);

        input.backspace();
        assert_eq!(input.buffer, "H");
        assert_eq!(input.cursor, 1);

        input.move_home();
        assert_eq!(input.cursor, 0);

        input.move_end();
        assert_eq!(input.cursor, 1);

        let taken = input.take();
        assert_eq!(taken, "H");
        assert_eq!(input.buffer, "");
        assert_eq!(input.cursor, 0);
    }

    #[test]
    fn test_input_state_navigation() {
        let mut input = InputState::new();
        input.insert_str("ABC");
        assert_eq!(input.cursor, 3);

        input.move_left();
        input.move_left();
        assert_eq!(input.cursor, 1);

        input.insert_char('X');
        assert_eq!(input.buffer, "AXBC");
        assert_eq!(input.cursor, 2);

        input.delete();
        assert_eq!(input.buffer, "AXC");
        assert_eq!(input.cursor, 2);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = InputState::new();
        input.insert_str("héllo");
        input.move_home();
        input.move_right();
        input.move_right();
        input.backspace();
        assert_eq!(input.buffer, "hllo");
        assert_eq!(input.cursor, 1);

        input.insert_char('☕');
        assert_eq!(input.buffer, "h☕llo");
        input.move_end();
        assert_eq!(input.cursor, 5);
    }

    #[test]
    fn test_recall_walks_newest_first() {
        let commands = ["A", "B", "C"];
        let mut input = InputState::new();

        assert!(input.recall_previous(&commands));
        assert_eq!(input.buffer, "C");
        assert!(input.recall_previous(&commands));
        assert_eq!(input.buffer, "B");
        assert!(input.recall_previous(&commands));
        assert_eq!(input.buffer, "A");
        assert!(!input.recall_previous(&commands));
        assert_eq!(input.buffer, "A");
        assert_eq!(input.history_index, Some(2));
        assert_eq!(input.history_position(3), Some("1/3".to_string()));

        assert!(input.recall_next(&commands));
        assert_eq!(input.buffer, "B");
        assert!(input.recall_next(&commands));
        assert_eq!(input.buffer, "C");
        assert!(input.recall_next(&commands));
        assert_eq!(input.buffer, "");
        assert!(!input.is_navigating_history());
        assert!(!input.recall_next(&commands));
    }

    #[test]
    fn test_recall_with_empty_history() {
        let mut input = InputState::new();
        input.set("typed");
        assert!(!input.recall_previous(&[]));
        assert!(!input.recall_next(&[]));
        assert_eq!(input.buffer, "typed");
    }

    #[test]
    fn test_recall_next_with_stale_index_resets() {
        let mut input = InputState { history_index: Some(5), ..Default::default() };
        assert!(input.recall_next(&["only"]));
        assert_eq!(input.history_index, None);
        assert_eq!(input.buffer, "");
    }
}
