//! Store context for instruction effects.
//!
//! Effect instructions reach persistent state only through the
//! [`StoreContext`] trait. The engine is a client of a transactional
//! resource, not its implementer: [`TxnStore`] adapts a storage-layer
//! [`Transaction`], and the surrounding execution decides whether the
//! transaction commits or is discarded. [`NoStore`] supports pure
//! evaluation contexts where touching the store is itself an error.

use keystone_foundation::{Error, ErrorKind, Result, Value};
use keystone_storage::Transaction;

// =============================================================================
// StoreContext Trait
// =============================================================================

/// Provides store access for effect instructions.
///
/// All methods must behave deterministically for a given sequence of
/// operations; the engine never retries or reorders effects.
pub trait StoreContext {
    /// Reads the value stored under `key`, if any.
    ///
    /// # Errors
    /// Returns an error when the context cannot serve reads.
    fn get(&self, key: &Value) -> Result<Option<Value>>;

    /// Sets `key` to `value`.
    ///
    /// # Errors
    /// Returns an error when the context cannot accept writes.
    fn put(&mut self, key: Value, value: Value) -> Result<()>;

    /// Removes `key`, reporting whether it was present.
    ///
    /// # Errors
    /// Returns an error when the context cannot accept writes.
    fn delete(&mut self, key: &Value) -> Result<bool>;
}

// =============================================================================
// TxnStore (StoreContext over a storage Transaction)
// =============================================================================

/// Store context over a storage-layer [`Transaction`].
pub struct TxnStore<'a> {
    txn: &'a mut Transaction,
}

impl<'a> TxnStore<'a> {
    /// Creates a context over a transaction.
    #[must_use]
    pub fn new(txn: &'a mut Transaction) -> Self {
        Self { txn }
    }
}

impl StoreContext for TxnStore<'_> {
    fn get(&self, key: &Value) -> Result<Option<Value>> {
        Ok(self.txn.get(key).cloned())
    }

    fn put(&mut self, key: Value, value: Value) -> Result<()> {
        self.txn.put(key, value);
        Ok(())
    }

    fn delete(&mut self, key: &Value) -> Result<bool> {
        Ok(self.txn.delete(key))
    }
}

// =============================================================================
// NoStore (for pure evaluation without a store)
// =============================================================================

/// A context that rejects every store operation.
///
/// Used when executing procedures that must not touch persistent state.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoStore;

impl StoreContext for NoStore {
    fn get(&self, _key: &Value) -> Result<Option<Value>> {
        Err(Error::new(ErrorKind::StoreUnavailable))
    }

    fn put(&mut self, _key: Value, _value: Value) -> Result<()> {
        Err(Error::new(ErrorKind::StoreUnavailable))
    }

    fn delete(&mut self, _key: &Value) -> Result<bool> {
        Err(Error::new(ErrorKind::StoreUnavailable))
    }
}
