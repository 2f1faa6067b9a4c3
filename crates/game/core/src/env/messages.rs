use std::collections::VecDeque;

/// Receiver for human-readable outcome lines.
///
/// The engine performs no formatting of its own: it forwards validation
/// reasons verbatim, and verbs compose their own text.
pub trait MessageSink {
    fn add(&mut self, text: String);
}

/// Bounded in-memory message log; the oldest lines are evicted first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageLog {
    lines: VecDeque<String>,
    capacity: usize,
}

impl MessageLog {
    pub const DEFAULT_CAPACITY: usize = 64;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn last(&self) -> Option<&str> {
        self.lines.back().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.lines.iter().map(String::as_str)
    }

    /// Returns true if any retained line equals `text`.
    pub fn contains(&self, text: &str) -> bool {
        self.lines.iter().any(|line| line == text)
    }

    /// Removes and returns every retained line, oldest first.
    pub fn drain(&mut self) -> Vec<String> {
        self.lines.drain(..).collect()
    }
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageSink for MessageLog {
    fn add(&mut self, text: String) {
        tracing::debug!(target: "game_core::messages", %text, "message");
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(text);
    }
}
