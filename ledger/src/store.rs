//! Keyed in-memory collections backing the ledger.
//!
//! Both collections are ordered maps: enumeration walks keys in ascending
//! order, so every linear scan (and therefore which tickets a purchase picks)
//! is deterministic.

use std::collections::BTreeMap;
use ticket_ledger_core::{Event, EventId, Nft, NftId};

/// Event records keyed by id.
pub type EventStore = InMemoryStore<EventId, Event>;

/// Ticket records keyed by id.
pub type TicketStore = InMemoryStore<NftId, Nft>;

/// Ordered key-value collection with insert-or-replace semantics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InMemoryStore<K, V> {
    entries: BTreeMap<K, V>,
}

impl<K: Ord, V> InMemoryStore<K, V> {
    /// Create an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Insert `value` at `key`, returning the record it replaced.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.entries.insert(key, value)
    }

    /// Point lookup.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    /// Point lookup for in-place mutation.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.entries.get_mut(key)
    }

    /// Remove and return the record at `key`.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.entries.remove(key)
    }

    /// Whether a record exists at `key`.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterate over all records in key order.
    pub fn iter(&self) -> impl Iterator<Item = &V> {
        self.entries.values()
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Ord, V: Clone> InMemoryStore<K, V> {
    /// Full enumeration of the records, in key order.
    #[must_use]
    pub fn values(&self) -> Vec<V> {
        self.entries.values().cloned().collect()
    }
}

impl<K: Ord, V> Default for InMemoryStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for InMemoryStore<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
