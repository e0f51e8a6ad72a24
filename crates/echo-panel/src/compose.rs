//! The text field messages are typed into.

/// Single-line text input with a cursor and recall of earlier messages.
///
/// The cursor counts chars, not bytes, so multi-byte input edits cleanly.
#[derive(Debug, Clone, Default)]
pub struct ComposeField {
    text: String,
    /// Cursor position in chars
    cursor: usize,
    /// Previously submitted texts
    history: Vec<String>,
    /// Current position in history (None = editing new input)
    history_index: Option<usize>,
    /// Input saved while browsing history
    saved: String,
}

impl ComposeField {
    /// Create an empty field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in chars.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Text left of the cursor.
    pub fn before_cursor(&self) -> &str {
        &self.text[..self.byte_index(self.cursor)]
    }

    /// Whether the field is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the text and put the cursor at the end.
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.char_len();
    }

    /// Empty the field.
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
        self.history_index = None;
        self.saved.clear();
    }

    /// Insert a char at the cursor.
    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    /// Delete the char before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.text.remove(at);
        }
    }

    /// Delete the char under the cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_index(self.cursor);
            self.text.remove(at);
        }
    }

    /// Move cursor left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move cursor right.
    pub fn move_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    /// Move cursor to the start.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Move cursor to the end.
    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Record a submitted text for recall (skips repeats of the last one).
    pub fn remember(&mut self, text: &str) {
        if self.history.last().map(String::as_str) != Some(text) {
            self.history.push(text.to_string());
        }
    }

    /// Recall the previous submitted text (Up arrow).
    pub fn history_prev(&mut self) {
        if self.history.is_empty() {
            return;
        }

        match self.history_index {
            None => {
                self.saved = std::mem::take(&mut self.text);
                self.history_index = Some(self.history.len() - 1);
                self.text = self.history.last().cloned().unwrap_or_default();
            }
            Some(idx) if idx > 0 => {
                self.history_index = Some(idx - 1);
                self.text = self.history.get(idx - 1).cloned().unwrap_or_default();
            }
            _ => {
                // Already at oldest entry
            }
        }
        self.cursor = self.char_len();
    }

    /// Move towards newer texts, ending at the input being edited (Down arrow).
    pub fn history_next(&mut self) {
        let Some(idx) = self.history_index else {
            return;
        };

        if idx + 1 < self.history.len() {
            self.history_index = Some(idx + 1);
            self.text = self.history.get(idx + 1).cloned().unwrap_or_default();
        } else {
            self.history_index = None;
            self.text = std::mem::take(&mut self.saved);
        }
        self.cursor = self.char_len();
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }
}
