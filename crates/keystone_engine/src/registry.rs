//! Registry for procedure definitions.
//!
//! The registry is populated once at schema-deployment time and read-only
//! thereafter. It is an explicitly passed, shared-by-reference structure —
//! engines hold an `Arc` to it, and independent registries (e.g. in tests)
//! never interfere. Names enumerate in sorted order, so any walk over the
//! registry is deterministic.

use std::collections::BTreeMap;
use std::sync::Arc;

use keystone_foundation::{Error, Result};

use crate::procedure::Procedure;

/// Registry mapping procedure names to definitions.
#[derive(Clone, Debug, Default)]
pub struct ProcedureRegistry {
    procedures: BTreeMap<String, Arc<Procedure>>,
}

impl ProcedureRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            procedures: BTreeMap::new(),
        }
    }

    /// Registers a procedure definition.
    ///
    /// The definition is validated first; an invalid definition is
    /// rejected atomically and never stored.
    ///
    /// # Errors
    /// Returns the validation failure, or
    /// [`keystone_foundation::ErrorKind::DuplicateProcedure`] when the
    /// name is already taken.
    pub fn register(&mut self, procedure: Procedure) -> Result<()> {
        procedure.validate()?;
        if self.procedures.contains_key(procedure.name()) {
            return Err(Error::duplicate_procedure(procedure.name()));
        }
        self.procedures
            .insert(procedure.name().to_string(), Arc::new(procedure));
        Ok(())
    }

    /// Looks up a procedure by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<Procedure>> {
        self.procedures.get(name)
    }

    /// Looks up a procedure by name, failing if absent.
    ///
    /// # Errors
    /// Returns [`keystone_foundation::ErrorKind::ProcedureNotFound`].
    pub fn lookup(&self, name: &str) -> Result<&Arc<Procedure>> {
        self.procedures
            .get(name)
            .ok_or_else(|| Error::procedure_not_found(name))
    }

    /// Returns the number of registered procedures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.procedures.len()
    }

    /// Returns true if no procedures are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.procedures.is_empty()
    }

    /// Returns registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.procedures.keys().map(String::as_str)
    }
}
