//! Per-activation variable frames.
//!
//! A frame is the mutable local-variable binding set for exactly one call
//! activation. It is created when the call is dispatched, seeded with the
//! contextual variables and the bound parameters, mutated only by the
//! instructions of that activation's body, and destroyed when the call
//! returns. Nested calls get their own frame and inherit nothing; only
//! explicitly passed arguments cross the call boundary.

use std::collections::BTreeMap;

use keystone_foundation::{Error, Result, Value};

use crate::engine::CallContext;
use crate::procedure::Procedure;

/// Name of the contextual variable holding the transaction signer.
pub(crate) const CALLER_VAR: &str = "@caller";

/// Variable bindings for one call activation.
///
/// Entries iterate in name order, so any walk over the frame is
/// deterministic across replicas.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    vars: BTreeMap<String, Value>,
}

impl Frame {
    /// Creates a frame with no bindings.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            vars: BTreeMap::new(),
        }
    }

    /// Creates the frame for one activation of `procedure`.
    ///
    /// The frame is seeded with the contextual variables from `ctx`
    /// (currently `@caller`), then with one entry per declared parameter
    /// in order: `parameters[i] -> args[i]`. No type coercion is applied;
    /// argument typing is the concern of the instruction layer or the
    /// caller.
    ///
    /// # Errors
    /// Returns [`keystone_foundation::ErrorKind::ArityMismatch`] when the
    /// argument count does not equal the declared parameter count.
    pub fn bind(procedure: &Procedure, args: &[Value], ctx: &CallContext) -> Result<Self> {
        let parameters = procedure.parameters();
        if args.len() != parameters.len() {
            return Err(Error::arity_mismatch(
                procedure.name(),
                parameters.len(),
                args.len(),
            ));
        }

        let mut frame = Self::empty();
        frame.define(CALLER_VAR, ctx.caller_value());
        for (parameter, arg) in parameters.iter().zip(args) {
            frame.define(parameter.clone(), arg.clone());
        }
        Ok(frame)
    }

    /// Returns the number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Returns true if the frame holds no bindings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Looks up a binding.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    /// Gets a binding, failing if it is absent.
    ///
    /// # Errors
    /// Returns [`keystone_foundation::ErrorKind::UndefinedVariable`].
    pub fn get(&self, name: &str) -> Result<&Value> {
        self.vars
            .get(name)
            .ok_or_else(|| Error::undefined_variable(name))
    }

    /// Introduces or overwrites a binding.
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.vars.insert(name.into(), value);
    }

    /// Returns an iterator over bindings in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v))
    }
}
