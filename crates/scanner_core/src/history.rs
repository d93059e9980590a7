use std::collections::VecDeque;

use chrono::{DateTime, Utc};

pub type EntryId = u64;

/// Record of one completed submission attempt. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    id: EntryId,
    code: String,
    message: String,
    succeeded: bool,
    timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(
        id: EntryId,
        code: impl Into<String>,
        message: impl Into<String>,
        succeeded: bool,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            code: code.into(),
            message: message.into(),
            succeeded,
            timestamp,
        }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Append-only, newest-first log of submission outcomes for the session.
///
/// Appends only happen inside `update`, which owns the state exclusively, so
/// concurrent completions are serialized by the session message queue.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HistoryStore {
    entries: VecDeque<HistoryEntry>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `entry` at the head. No deduplication.
    pub fn append(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
    }

    /// Snapshot of every entry, newest first.
    pub fn all(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
