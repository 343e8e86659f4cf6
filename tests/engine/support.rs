//! Shared helpers for engine tests.

use std::collections::BTreeMap;
use std::sync::Arc;

use keystone_engine::{
    CallContext, CallOrigin, Engine, Procedure, ProcedureRegistry, StoreContext,
};
use keystone_foundation::{Result, Value};

/// A store context that records every operation in order.
///
/// Lets tests assert not just final state but *which* effects ran — the
/// instrumentation the access-control and sequencing properties call for.
#[derive(Debug, Default)]
pub struct RecordingStore {
    pub entries: BTreeMap<Value, Value>,
    pub ops: Vec<String>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: Value, value: Value) -> Self {
        self.entries.insert(key, value);
        self
    }
}

impl StoreContext for RecordingStore {
    fn get(&self, key: &Value) -> Result<Option<Value>> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: Value, value: Value) -> Result<()> {
        self.ops.push(format!("put {key}"));
        self.entries.insert(key, value);
        Ok(())
    }

    fn delete(&mut self, key: &Value) -> Result<bool> {
        self.ops.push(format!("delete {key}"));
        Ok(self.entries.remove(key).is_some())
    }
}

/// Builds an engine over the given procedures.
pub fn engine_with(procedures: impl IntoIterator<Item = Procedure>) -> Engine {
    let mut registry = ProcedureRegistry::new();
    for procedure in procedures {
        registry.register(procedure).unwrap();
    }
    Engine::new(Arc::new(registry))
}

/// An external-origin call context.
pub fn external() -> CallContext {
    CallContext::new(CallOrigin::External)
}

/// An internal-origin call context.
pub fn internal() -> CallContext {
    CallContext::new(CallOrigin::Internal)
}
