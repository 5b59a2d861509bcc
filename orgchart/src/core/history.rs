//! Linear undo/redo history over store snapshots
//!
//! Snapshots are shared references to the immutable stores produced by the
//! mutator. Committing after an undo drops the redo branch.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::store::PositionStore;

/// One entry of the edit history
#[derive(Debug, Clone)]
pub struct HistorySnapshot {
    pub store: Arc<PositionStore>,
    pub label: Option<String>,
    pub taken_at: DateTime<Utc>,
}

impl HistorySnapshot {
    fn new(store: Arc<PositionStore>, label: Option<String>) -> Self {
        Self {
            store,
            label,
            taken_at: Utc::now(),
        }
    }
}

/// Snapshot list plus a cursor pointing at the current store
#[derive(Debug, Clone)]
pub struct HistoryController {
    snapshots: Vec<HistorySnapshot>,
    cursor: usize,
    limit: Option<usize>,
}

impl HistoryController {
    /// Start a history whose only entry is the freshly loaded store
    pub fn new(initial: PositionStore) -> Self {
        Self {
            snapshots: vec![HistorySnapshot::new(Arc::new(initial), Some("load".to_string()))],
            cursor: 0,
            limit: None,
        }
    }

    /// Keep at most `limit` snapshots, dropping the oldest first
    ///
    /// A limit below 1 is treated as 1 so the current store is always kept.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit.max(1));
        self.enforce_limit();
        self
    }

    pub fn commit(&mut self, store: PositionStore) -> Arc<PositionStore> {
        self.push(store, None)
    }

    pub fn commit_labeled(&mut self, store: PositionStore, label: impl Into<String>) -> Arc<PositionStore> {
        self.push(store, Some(label.into()))
    }

    fn push(&mut self, store: PositionStore, label: Option<String>) -> Arc<PositionStore> {
        self.snapshots.truncate(self.cursor + 1);
        let store = Arc::new(store);
        self.snapshots.push(HistorySnapshot::new(Arc::clone(&store), label));
        self.cursor = self.snapshots.len() - 1;
        self.enforce_limit();
        store
    }

    fn enforce_limit(&mut self) {
        if let Some(limit) = self.limit {
            if self.snapshots.len() > limit {
                let excess = self.snapshots.len() - limit;
                self.snapshots.drain(..excess);
                self.cursor = self.cursor.saturating_sub(excess);
            }
        }
    }

    /// Step back; a no-op at the start of history
    pub fn undo(&mut self) -> Arc<PositionStore> {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
        self.current()
    }

    /// Step forward; a no-op at the end of history
    pub fn redo(&mut self) -> Arc<PositionStore> {
        if self.cursor + 1 < self.snapshots.len() {
            self.cursor += 1;
        }
        self.current()
    }

    pub fn current(&self) -> Arc<PositionStore> {
        Arc::clone(&self.snapshots[self.cursor].store)
    }

    pub fn current_snapshot(&self) -> &HistorySnapshot {
        &self.snapshots[self.cursor]
    }

    pub fn snapshot(&self, index: usize) -> Option<&HistorySnapshot> {
        self.snapshots.get(index)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
