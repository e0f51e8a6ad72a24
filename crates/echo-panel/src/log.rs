//! Append-only message log.

use echo_models::{MessageDirection, MessageEntry};

/// The ordered list of messages shown to the user.
///
/// Entries are only ever appended. There is no way to edit, reorder, or
/// remove one.
#[derive(Debug, Clone, Default)]
pub struct DisplayLog {
    entries: Vec<MessageEntry>,
}

impl DisplayLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry at the end.
    pub fn push(&mut self, entry: MessageEntry) {
        self.entries.push(entry);
    }

    /// Iterate over entries, oldest first.
    pub fn iter(&self) -> std::slice::Iter<'_, MessageEntry> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been logged yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Count entries in one direction.
    pub fn count(&self, direction: MessageDirection) -> usize {
        self.entries.iter().filter(|e| e.direction == direction).count()
    }

    /// `(direction, text)` pairs, oldest first.
    pub fn summary(&self) -> Vec<(MessageDirection, &str)> {
        self.entries
            .iter()
            .map(|e| (e.direction, e.text.as_str()))
            .collect()
    }
}

impl<'a> IntoIterator for &'a DisplayLog {
    type Item = &'a MessageEntry;
    type IntoIter = std::slice::Iter<'a, MessageEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
