// src/models/ledger.rs

use {
    crate::{
        config::{DF, PERSISTENCE},
        data::PersistentStore,
        domain::AnalysisResult,
    },
    serde::{Deserialize, Serialize},
    uuid::Uuid,
};

/// One past analysis, as persisted under `trade_history`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    /// Creation time, epoch ms
    pub timestamp: i64,
    pub data: AnalysisResult,
}

/// Most-recent-first, bounded list of past analyses.
///
/// Every mutation is flushed as one whole array, so a crash loses at most the
/// latest change.
#[derive(Debug, Clone)]
pub struct HistoryLedger {
    entries: Vec<HistoryEntry>,
    capacity: usize,
}

impl HistoryLedger {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Restores the persisted history. A missing or unreadable value is an
    /// empty history; an over-long one is cut to capacity.
    pub fn load(store: &PersistentStore, capacity: usize) -> Self {
        let mut ledger = Self::new(capacity);
        if let Some(mut entries) = store.load::<Vec<HistoryEntry>>(PERSISTENCE.keys.history) {
            entries.truncate(ledger.capacity);
            ledger.entries = entries;
        }
        if DF.log_history {
            log::info!("History restored with {} entries", ledger.entries.len());
        }
        ledger
    }

    /// Prepends a new entry, evicting the oldest beyond capacity, and flushes.
    /// Returns the generated id.
    pub fn append(&mut self, store: &mut PersistentStore, data: AnalysisResult, now_ms: i64) -> String {
        let id = Uuid::new_v4().to_string();
        // A clock stepping backwards must not break most-recent-first ordering
        let timestamp = self
            .entries
            .first()
            .map_or(now_ms, |head| now_ms.max(head.timestamp));

        self.entries.insert(
            0,
            HistoryEntry {
                id: id.clone(),
                timestamp,
                data,
            },
        );
        let evicted = self.entries.len().saturating_sub(self.capacity);
        self.entries.truncate(self.capacity);

        if DF.log_history {
            log::info!("History append {} (evicted {})", id, evicted);
        }
        self.flush(store);
        id
    }

    /// Replaces the data of the entry with `id`. Absent ids are a no-op (the
    /// entry may have been evicted). Returns whether an entry changed.
    pub fn update_by_id<F>(&mut self, store: &mut PersistentStore, id: &str, mutator: F) -> bool
    where
        F: FnOnce(&AnalysisResult) -> AnalysisResult,
    {
        let Some(entry) = self.entries.iter_mut().find(|entry| entry.id == id) else {
            if DF.log_history {
                log::info!("History update skipped, {} not found", id);
            }
            return false;
        };
        entry.data = mutator(&entry.data);
        self.flush(store);
        true
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&HistoryEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn flush(&self, store: &mut PersistentStore) {
        store.save(PERSISTENCE.keys.history, &self.entries);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Direction, Outcome, SetupSlot, fixtures};
    use quickcheck_macros::quickcheck;
    use std::collections::HashSet;

    #[test]
    fn append_prepends_and_flushes() {
        let mut store = PersistentStore::in_memory();
        let mut ledger = HistoryLedger::new(3);
        let first = ledger.append(&mut store, fixtures::analysis(Direction::Buy, 10), 1_000);
        let second = ledger.append(&mut store, fixtures::analysis(Direction::Sell, 20), 2_000);

        assert_eq!(ledger.entries()[0].id, second);
        assert_eq!(ledger.entries()[1].id, first);

        let reloaded = HistoryLedger::load(&store, 3);
        assert_eq!(reloaded.entries(), ledger.entries());
    }

    #[test]
    fn eviction_drops_the_oldest() {
        let mut store = PersistentStore::in_memory();
        let mut ledger = HistoryLedger::new(2);
        let oldest = ledger.append(&mut store, fixtures::analysis(Direction::Buy, 1), 1);
        ledger.append(&mut store, fixtures::analysis(Direction::Buy, 2), 2);
        ledger.append(&mut store, fixtures::analysis(Direction::Buy, 3), 3);

        assert_eq!(ledger.len(), 2);
        assert!(ledger.get(&oldest).is_none());
        assert_eq!(ledger.entries()[0].data.market_bias.confidence, 3);
    }

    #[test]
    fn timestamps_never_go_backwards() {
        let mut store = PersistentStore::in_memory();
        let mut ledger = HistoryLedger::new(5);
        ledger.append(&mut store, fixtures::analysis(Direction::Buy, 1), 5_000);
        ledger.append(&mut store, fixtures::analysis(Direction::Buy, 2), 4_000);
        assert_eq!(ledger.entries()[0].timestamp, 5_000);
    }

    #[test]
    fn update_by_id_changes_one_entry() {
        let mut store = PersistentStore::in_memory();
        let mut ledger = HistoryLedger::new(5);
        let a = ledger.append(&mut store, fixtures::analysis(Direction::Buy, 1), 1);
        let b = ledger.append(&mut store, fixtures::analysis(Direction::Buy, 2), 2);

        assert!(ledger.update_by_id(&mut store, &a, |data| data.with_outcome(SetupSlot::A, Outcome::Win)));
        assert_eq!(ledger.get(&a).unwrap().data.setups.a.user_result, Outcome::Win);
        assert_eq!(ledger.get(&b).unwrap().data.setups.a.user_result, Outcome::Pending);

        let reloaded = HistoryLedger::load(&store, 5);
        assert_eq!(reloaded.get(&a).unwrap().data.setups.a.user_result, Outcome::Win);
    }

    #[test]
    fn update_of_unknown_id_is_a_no_op() {
        let mut store = PersistentStore::in_memory();
        let mut ledger = HistoryLedger::new(5);
        ledger.append(&mut store, fixtures::analysis(Direction::Buy, 1), 1);
        let before = ledger.entries().to_vec();
        assert!(!ledger.update_by_id(&mut store, "missing", |_| unreachable!()));
        assert_eq!(ledger.entries(), &before[..]);
    }

    #[test]
    fn load_truncates_oversized_history() {
        let mut store = PersistentStore::in_memory();
        let mut big = HistoryLedger::new(10);
        for i in 0..10 {
            big.append(&mut store, fixtures::analysis(Direction::Buy, i), i as i64);
        }
        let small = HistoryLedger::load(&store, 4);
        assert_eq!(small.len(), 4);
        assert_eq!(small.entries(), &big.entries()[..4]);
    }

    #[quickcheck]
    fn appends_stay_bounded_ordered_and_unique(capacity: u8, clock: Vec<u32>) -> bool {
        let capacity = (capacity % 25) as usize + 1;
        let mut store = PersistentStore::in_memory();
        let mut ledger = HistoryLedger::new(capacity);
        let mut ids = HashSet::new();

        for tick in clock {
            let id = ledger.append(&mut store, fixtures::analysis(Direction::Neutral, 50), tick as i64);
            if !ids.insert(id) {
                return false;
            }
            let entries = ledger.entries();
            let head = entries[0].timestamp;
            if entries.len() > capacity || entries.iter().any(|e| e.timestamp > head) {
                return false;
            }
            let live: HashSet<_> = entries.iter().map(|e| e.id.as_str()).collect();
            if live.len() != entries.len() {
                return false;
            }
        }
        true
    }
}
