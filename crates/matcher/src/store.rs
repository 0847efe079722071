use std::collections::BTreeSet;

use crate::error::MatchError;

/// Durable, append-only canonical product list.
pub trait CanonicalStore {
    /// Current entries, in stored order.
    fn load(&mut self) -> Result<Vec<String>, MatchError>;

    /// Append entries not already present. Existing order is preserved.
    fn append(&mut self, entries: &BTreeSet<String>) -> Result<(), MatchError>;
}

/// In-memory store for tests and dry runs.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    pub entries: Vec<String>,
    pub appends: usize,
}

impl MemoryStore {
    pub fn new(entries: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
            appends: 0,
        }
    }
}

impl CanonicalStore for MemoryStore {
    fn load(&mut self) -> Result<Vec<String>, MatchError> {
        Ok(self.entries.clone())
    }

    fn append(&mut self, entries: &BTreeSet<String>) -> Result<(), MatchError> {
        for entry in entries {
            if !self.entries.contains(entry) {
                self.entries.push(entry.clone());
            }
        }
        self.appends += 1;
        Ok(())
    }
}
