//! Session history: a list of locations with a cursor, like a browser tab.

use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub url: Url,
    pub title: Option<String>,
    /// The copied text, for entries pushed by a copy action.
    pub copied: Option<String>,
}

impl HistoryEntry {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            title: None,
            copied: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<HistoryEntry>,
    cursor: usize,
}

impl History {
    pub fn new(initial: Url) -> Self {
        Self {
            entries: vec![HistoryEntry::new(initial)],
            cursor: 0,
        }
    }

    pub fn current(&self) -> &HistoryEntry {
        &self.entries[self.cursor]
    }

    pub fn location(&self) -> &Url {
        &self.current().url
    }

    /// Overwrite the current entry without adding a navigable step.
    pub fn replace(&mut self, url: Url) {
        self.entries[self.cursor] = HistoryEntry::new(url);
    }

    /// Add a navigable entry after the current one, dropping forward entries.
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(entry);
        self.cursor += 1;
    }

    pub fn back(&mut self) -> Option<&HistoryEntry> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    pub fn forward(&mut self) -> Option<&HistoryEntry> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
