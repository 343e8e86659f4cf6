//! Transactions over snapshot state.
//!
//! A [`Transaction`] is a working copy of a base [`Snapshot`]. All effects
//! attempted during one top-level procedure execution land in the working
//! copy; `commit` publishes it as the new snapshot, `rollback` discards it
//! and returns the base unchanged. Structural sharing makes opening a
//! transaction O(1) regardless of key-space size.

use keystone_foundation::Value;

use crate::store::Snapshot;

/// A working copy over a base snapshot.
#[derive(Clone, Debug)]
pub struct Transaction {
    /// The snapshot this transaction started from.
    base: Snapshot,
    /// The snapshot as modified so far.
    working: Snapshot,
    /// Whether any write has been applied.
    dirty: bool,
}

impl Transaction {
    /// Opens a transaction on `base`.
    #[must_use]
    pub fn begin(base: Snapshot) -> Self {
        Self {
            working: base.clone(),
            base,
            dirty: false,
        }
    }

    /// Gets the value stored under `key` in the working state.
    #[must_use]
    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.working.get(key)
    }

    /// Sets `key` to `value` in the working state.
    pub fn put(&mut self, key: Value, value: Value) {
        self.working = self.working.put(key, value);
        self.dirty = true;
    }

    /// Removes `key` from the working state.
    ///
    /// Returns true if the key was present.
    pub fn delete(&mut self, key: &Value) -> bool {
        let present = self.working.contains_key(key);
        if present {
            self.working = self.working.delete(key);
            self.dirty = true;
        }
        present
    }

    /// Returns true if any write has been applied.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns the base snapshot this transaction started from.
    #[must_use]
    pub fn base(&self) -> &Snapshot {
        &self.base
    }

    /// Publishes the working state as the new snapshot.
    #[must_use]
    pub fn commit(self) -> Snapshot {
        self.working
    }

    /// Discards all writes and returns the base snapshot.
    #[must_use]
    pub fn rollback(self) -> Snapshot {
        self.base
    }
}
