//! Table: deduplicated per-product completion records.

use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};

/// Product index as it appears in the logs.
pub type ProductId = u64;

/// Ascending set of every identifier seen as a hit.
pub type KnownIds = BTreeSet<ProductId>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Completion {
    /// Product size in bytes
    pub size: u64,
    /// Receive latency in seconds
    pub elapsed_secs: f64,
}

/// Map of product identifier to its first observed completion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletedTable {
    entries: HashMap<ProductId, Completion>,
}

impl CompletedTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `completion` unless `id` is already present.
    ///
    /// Returns `true` when the entry was stored. An existing entry is never
    /// overwritten, so the first observation in file order wins.
    pub fn insert_if_absent(&mut self, id: ProductId, completion: Completion) -> bool {
        match self.entries.entry(id) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(completion);
                true
            }
        }
    }

    pub fn get(&self, id: ProductId) -> Option<&Completion> {
        self.entries.get(&id)
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Identifiers in ascending order.
    pub fn ids(&self) -> KnownIds {
        self.entries.keys().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completion(size: u64, elapsed_secs: f64) -> Completion {
        Completion { size, elapsed_secs }
    }

    #[test]
    fn test_first_insert_wins() {
        let mut table = CompletedTable::new();
        assert!(table.insert_if_absent(5, completion(100, 1.0)));
        assert!(!table.insert_if_absent(5, completion(200, 2.0)));
        assert!(!table.insert_if_absent(5, completion(300, 3.0)));

        assert_eq!(table.len(), 1);
        assert_eq!(table.get(5), Some(&completion(100, 1.0)));
    }

    #[test]
    fn test_ids_are_sorted() {
        let mut table = CompletedTable::new();
        for id in [9, 0, 4] {
            table.insert_if_absent(id, completion(1, 1.0));
        }
        assert_eq!(table.ids().into_iter().collect::<Vec<_>>(), vec![0, 4, 9]);
    }

    #[test]
    fn test_missing_lookup() {
        let table = CompletedTable::new();
        assert!(table.is_empty());
        assert!(!table.contains(0));
        assert_eq!(table.get(0), None);
    }
}
