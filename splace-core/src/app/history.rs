/// The entry that became current after navigating
/// backward or forward through the history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopState {
    pub url: String,
}

/// Session history of visited URLs.
pub trait History {
    fn location(&self) -> &str;

    /// Adds a new entry and drops all entries after the current one.
    fn push(&mut self, url: String);

    fn replace(&mut self, url: String);

    fn back(&mut self) -> Option<PopState>;

    fn forward(&mut self) -> Option<PopState>;
}

#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<String>,
    index: usize,
}

impl MemoryHistory {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: vec![initial.into()],
            index: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl History for MemoryHistory {
    fn location(&self) -> &str {
        &self.entries[self.index]
    }

    fn push(&mut self, url: String) {
        self.entries.truncate(self.index + 1);
        self.entries.push(url);
        self.index = self.entries.len() - 1;
    }

    fn replace(&mut self, url: String) {
        self.entries[self.index] = url;
    }

    fn back(&mut self) -> Option<PopState> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(PopState {
            url: self.location().to_owned(),
        })
    }

    fn forward(&mut self) -> Option<PopState> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(PopState {
            url: self.location().to_owned(),
        })
    }
}
