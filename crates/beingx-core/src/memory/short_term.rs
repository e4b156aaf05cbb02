//! Bounded window of the most recent conversation turns.
//!
//! Entries are stored most-recent-first, which is also the on-disk order.
//! Consumers read them oldest-first through [`ShortTermMemory::window`].

use crate::core_types::{Message, Role};
use crate::errors::AgentError;
use crate::memory::{now_millis, persistence};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StmEntry {
    pub role: Role,
    pub content: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

pub struct ShortTermMemory {
    entries: VecDeque<StmEntry>,
    max_entries: usize,
    file_path: Option<PathBuf>,
}

impl ShortTermMemory {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_entries + 1),
            max_entries,
            file_path: None,
        }
    }

    pub fn with_file_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.file_path = Some(path.into());
        self
    }

    /// Restores the window from `path`, keeping at most `max_entries`.
    pub async fn load<P: Into<PathBuf>>(path: P, max_entries: usize) -> Self {
        let path = path.into();
        let loaded: Vec<StmEntry> = persistence::load_entries(&path).await;
        let mut entries = VecDeque::from(loaded);
        entries.truncate(max_entries);

        Self {
            entries,
            max_entries,
            file_path: Some(path),
        }
    }

    pub async fn append(&mut self, role: Role, content: &str) -> Result<(), AgentError> {
        self.entries.push_front(StmEntry {
            role,
            content: content.to_string(),
            timestamp: now_millis(),
        });
        self.entries.truncate(self.max_entries);
        self.save().await
    }

    /// Oldest-first conversation context, without timestamps.
    pub fn window(&self) -> Vec<Message> {
        self.entries
            .iter()
            .take(self.max_entries)
            .rev()
            .map(|entry| Message::new(entry.role, entry.content.clone()))
            .collect()
    }

    pub async fn clear(&mut self) -> Result<(), AgentError> {
        self.entries.clear();
        self.save().await
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Stored entries, most recent first.
    pub fn entries(&self) -> impl Iterator<Item = &StmEntry> {
        self.entries.iter()
    }

    async fn save(&self) -> Result<(), AgentError> {
        match &self.file_path {
            Some(path) => persistence::save_entries(path, &self.entries).await,
            None => Ok(()),
        }
    }
}
