//! # Game Log
//!
//! The rolling in-game message history shown to the player. Bounded FIFO:
//! once the cap is reached the oldest message is dropped.

use crate::config;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Bounded history of user-facing message strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameLog {
    max_history: usize,
    messages: VecDeque<String>,
}

impl GameLog {
    /// Creates a log with the default history cap.
    pub fn new() -> Self {
        Self::with_capacity(config::LOG_MAX_HISTORY)
    }

    /// Creates a log retaining at most `max_history` messages.
    pub fn with_capacity(max_history: usize) -> Self {
        Self {
            max_history,
            messages: VecDeque::with_capacity(max_history),
        }
    }

    /// Appends a message, dropping the oldest once over the cap.
    pub fn add(&mut self, message: impl Into<String>) {
        self.messages.push_back(message.into());
        while self.messages.len() > self.max_history {
            self.messages.pop_front();
        }
    }

    /// The most recent messages, newest first.
    pub fn recent(&self, count: usize) -> Vec<&str> {
        self.messages
            .iter()
            .rev()
            .take(count)
            .map(|s| s.as_str())
            .collect()
    }

    /// All retained messages, oldest first.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for GameLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oldest_message_dropped_at_cap() {
        let mut log = GameLog::with_capacity(3);
        for i in 0..5 {
            log.add(format!("message {i}"));
        }
        assert_eq!(log.len(), 3);
        let all: Vec<&str> = log.messages().collect();
        assert_eq!(all, vec!["message 2", "message 3", "message 4"]);
    }

    #[test]
    fn test_recent_is_newest_first() {
        let mut log = GameLog::new();
        log.add("first");
        log.add("second");
        log.add("third");
        assert_eq!(log.recent(2), vec!["third", "second"]);
    }
}
