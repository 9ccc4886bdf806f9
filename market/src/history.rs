use std::collections::{HashMap, VecDeque};

use crate::types::Snapshot;

/// Default per-security history depth, in snapshots.
pub const DEFAULT_CAPACITY: usize = 200;

/// Bounded chronological history for one security.
///
/// The newest snapshot is always at the back; once `capacity` is
/// reached the oldest entry is evicted on every push.
#[derive(Debug, Clone)]
pub struct History {
    snaps: VecDeque<Snapshot>,
    capacity: usize,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            snaps: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a snapshot, evicting the oldest entry when full.
    pub fn push(&mut self, snap: Snapshot) {
        if self.snaps.len() == self.capacity {
            self.snaps.pop_front();
        }
        self.snaps.push_back(snap);
    }

    pub fn len(&self) -> usize {
        self.snaps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snaps.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recent snapshot.
    pub fn latest(&self) -> Option<&Snapshot> {
        self.snaps.back()
    }

    /// Snapshot immediately before the most recent one.
    pub fn prev(&self) -> Option<&Snapshot> {
        self.len().checked_sub(2).and_then(|i| self.snaps.get(i))
    }

    /// Oldest-to-newest iteration.
    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.snaps.iter()
    }
}

/// Per-security histories, keyed by ISIN.
#[derive(Debug)]
pub struct HistoryStore {
    histories: HashMap<String, History>,
    capacity: usize,
}

impl HistoryStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            histories: HashMap::new(),
            capacity,
        }
    }

    /// Appends `snap` to its security's history, creating the history
    /// on first sight of the ISIN.
    pub fn record(&mut self, snap: Snapshot) {
        let capacity = self.capacity;
        self.histories
            .entry(snap.isin.clone())
            .or_insert_with(|| History::new(capacity))
            .push(snap);
    }

    pub fn get(&self, isin: &str) -> Option<&History> {
        self.histories.get(isin)
    }

    /// Number of securities seen at least once.
    pub fn len(&self) -> usize {
        self.histories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.histories.is_empty()
    }
}
