//! Immutable snapshot state with structural sharing.
//!
//! A [`Snapshot`] is the entire persistent key space of a node at one
//! logical point in time. Snapshots are cheap to clone (O(1)) and never
//! mutated; every update returns a new snapshot sharing structure with the
//! original. Iteration is in key order, so replicas observing the same
//! snapshot observe the same entry sequence.

use keystone_foundation::{KMap, Value};

/// Immutable key-value state at one logical point in time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    /// The key space, in key order.
    entries: KMap<Value, Value>,
}

impl Snapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: KMap::new(),
        }
    }

    /// Returns the number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the snapshot holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Gets the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Returns true if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &Value) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns a new snapshot with `key` set to `value`.
    #[must_use]
    pub fn put(&self, key: Value, value: Value) -> Self {
        Self {
            entries: self.entries.insert(key, value),
        }
    }

    /// Returns a new snapshot with `key` removed.
    #[must_use]
    pub fn delete(&self, key: &Value) -> Self {
        Self {
            entries: self.entries.remove(key),
        }
    }

    /// Returns an iterator over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.entries.iter()
    }
}
