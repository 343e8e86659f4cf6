//! Execution engine orchestration.
//!
//! The engine drives one top-level procedure call as a single synchronous
//! call chain: resolve the procedure, check access, bind arguments into a
//! fresh frame, interpret the body in order, and surface the first failure
//! unchanged. Nested calls recurse through the same path with an explicit
//! depth budget. The engine composes with the storage layer's transaction
//! boundary for atomicity — it never implements rollback itself.

use std::sync::Arc;

use keystone_foundation::{Error, ErrorContext, ErrorKind, Result, Type, Value};
use keystone_storage::{Snapshot, Transaction};

use crate::context::{StoreContext, TxnStore};
use crate::frame::Frame;
use crate::instruction::Instruction;
use crate::procedure::Procedure;
use crate::registry::ProcedureRegistry;
use crate::trace::{ExecutionTrace, TraceEvent};

/// Default bound on nested call depth.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 64;

// =============================================================================
// Call Origin & Context
// =============================================================================

/// Where a call came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallOrigin {
    /// Submitted by an external client through the transaction layer.
    External,
    /// Made from within another procedure's body.
    Internal,
}

impl std::fmt::Display for CallOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::External => write!(f, "external"),
            Self::Internal => write!(f, "internal"),
        }
    }
}

/// Caller metadata for one top-level call.
///
/// Carries the origin used by access control and the authenticated signer
/// identity seeded into every frame as `@caller`. Nested calls keep the
/// signer but switch the origin to internal.
#[derive(Clone, Debug)]
pub struct CallContext {
    origin: CallOrigin,
    caller: Option<Arc<str>>,
}

impl CallContext {
    /// Creates a context with the given origin and no signer identity.
    #[must_use]
    pub fn new(origin: CallOrigin) -> Self {
        Self {
            origin,
            caller: None,
        }
    }

    /// Sets the authenticated signer identity.
    #[must_use]
    pub fn with_caller(mut self, caller: impl Into<Arc<str>>) -> Self {
        self.caller = Some(caller.into());
        self
    }

    /// Returns the call origin.
    #[must_use]
    pub const fn origin(&self) -> CallOrigin {
        self.origin
    }

    /// Returns the signer identity, if any.
    #[must_use]
    pub fn caller(&self) -> Option<&str> {
        self.caller.as_deref()
    }

    /// The `@caller` value seeded into frames.
    pub(crate) fn caller_value(&self) -> Value {
        match &self.caller {
            Some(caller) => Value::Text(Arc::clone(caller)),
            None => Value::Null,
        }
    }

    /// The context a nested call runs under: same signer, internal origin.
    pub(crate) fn for_internal_call(&self) -> Self {
        Self {
            origin: CallOrigin::Internal,
            caller: self.caller.clone(),
        }
    }
}

// =============================================================================
// Execution Outcome
// =============================================================================

/// Result of a committed transactional execution.
#[derive(Clone, Debug)]
pub struct ExecutionOutcome {
    /// The snapshot with all of the call's effects applied.
    pub snapshot: Snapshot,
    /// The procedure's result value, if it produced one.
    pub value: Option<Value>,
}

// =============================================================================
// Engine
// =============================================================================

/// The procedure execution engine.
///
/// Holds a shared, immutable registry and the configured depth bound.
/// Engines are cheap to clone and carry no per-call state; each call gets
/// its own frame, and store state is reached only through the
/// [`StoreContext`] passed in.
#[derive(Clone, Debug)]
pub struct Engine {
    registry: Arc<ProcedureRegistry>,
    max_call_depth: usize,
}

impl Engine {
    /// Creates an engine over a registry.
    #[must_use]
    pub fn new(registry: Arc<ProcedureRegistry>) -> Self {
        Self {
            registry,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }

    /// Sets the bound on nested call depth.
    #[must_use]
    pub fn with_max_call_depth(mut self, max_call_depth: usize) -> Self {
        self.max_call_depth = max_call_depth;
        self
    }

    /// Returns the registry this engine resolves procedures in.
    #[must_use]
    pub fn registry(&self) -> &Arc<ProcedureRegistry> {
        &self.registry
    }

    /// Returns the configured depth bound.
    #[must_use]
    pub const fn max_call_depth(&self) -> usize {
        self.max_call_depth
    }

    /// Executes a procedure against the given store context.
    ///
    /// Steps: registry lookup, access control, argument binding, then
    /// sequential body interpretation. Any failure — at any step, at any
    /// nesting depth — is surfaced to the caller annotated with the
    /// top-level procedure name; whether already-attempted effects are
    /// kept is decided by the store context's transaction boundary, not
    /// here.
    ///
    /// # Errors
    /// See [`keystone_foundation::ErrorKind`] for the failure taxonomy.
    pub fn execute<C: StoreContext>(
        &self,
        name: &str,
        args: &[Value],
        ctx: &CallContext,
        store: &mut C,
    ) -> Result<Option<Value>> {
        let mut trace = ExecutionTrace::with_capacity(0);
        self.execute_traced(name, args, ctx, store, &mut trace)
    }

    /// Executes a procedure, recording events into `trace`.
    ///
    /// # Errors
    /// Same contract as [`Engine::execute`].
    pub fn execute_traced<C: StoreContext>(
        &self,
        name: &str,
        args: &[Value],
        ctx: &CallContext,
        store: &mut C,
        trace: &mut ExecutionTrace,
    ) -> Result<Option<Value>> {
        self.call(name, args, ctx, store, 0, trace)
            .map_err(|e| e.with_context(ErrorContext::new().with_frame(name)))
    }

    /// Executes a procedure inside a fresh transaction on `snapshot`.
    ///
    /// On success the transaction is committed and the new snapshot
    /// returned; on failure the transaction is discarded, the caller's
    /// snapshot is untouched, and the transaction deterministically had no
    /// effect.
    ///
    /// # Errors
    /// Same contract as [`Engine::execute`].
    pub fn execute_in_transaction(
        &self,
        snapshot: &Snapshot,
        name: &str,
        args: &[Value],
        ctx: &CallContext,
    ) -> Result<ExecutionOutcome> {
        let mut txn = Transaction::begin(snapshot.clone());
        let mut store = TxnStore::new(&mut txn);
        let value = self.execute(name, args, ctx, &mut store)?;
        Ok(ExecutionOutcome {
            snapshot: txn.commit(),
            value,
        })
    }

    /// Dispatches one call activation.
    fn call<C: StoreContext>(
        &self,
        name: &str,
        args: &[Value],
        ctx: &CallContext,
        store: &mut C,
        depth: usize,
        trace: &mut ExecutionTrace,
    ) -> Result<Option<Value>> {
        // Explicit depth budget, independent of the host stack.
        if depth >= self.max_call_depth {
            return Err(Error::call_depth_exceeded(self.max_call_depth));
        }

        let procedure = Arc::clone(self.registry.lookup(name)?);
        procedure.check_access(ctx.origin())?;
        let mut frame = Frame::bind(&procedure, args, ctx)?;

        trace.record(TraceEvent::CallStarted {
            procedure: procedure.name().to_string(),
            origin: ctx.origin(),
            depth,
        });

        let result = self.evaluate_body(&procedure, &mut frame, ctx, store, depth, trace);

        trace.record(TraceEvent::CallCompleted {
            procedure: procedure.name().to_string(),
            success: result.is_ok(),
        });

        result
    }

    /// Interprets a body strictly in sequence against `frame`.
    ///
    /// The first failing instruction stops interpretation; its failure is
    /// wrapped with the procedure name and instruction position and
    /// returned. No later instruction runs. The body's result is the value
    /// produced by its final instruction.
    fn evaluate_body<C: StoreContext>(
        &self,
        procedure: &Procedure,
        frame: &mut Frame,
        ctx: &CallContext,
        store: &mut C,
        depth: usize,
        trace: &mut ExecutionTrace,
    ) -> Result<Option<Value>> {
        let mut result = None;
        for (index, instruction) in procedure.body().iter().enumerate() {
            result = self
                .evaluate_instruction(instruction, frame, ctx, store, depth, trace)
                .map_err(|e| Error::instruction_failed(procedure.name(), index, e))?;

            trace.record(TraceEvent::InstructionExecuted {
                procedure: procedure.name().to_string(),
                index,
                kind: instruction.kind(),
            });
        }
        Ok(result)
    }

    /// Executes one instruction, yielding its value if it produces one.
    fn evaluate_instruction<C: StoreContext>(
        &self,
        instruction: &Instruction,
        frame: &mut Frame,
        ctx: &CallContext,
        store: &mut C,
        depth: usize,
        trace: &mut ExecutionTrace,
    ) -> Result<Option<Value>> {
        match instruction {
            Instruction::Assign { name, expr } => {
                let value = expr.eval(frame)?;
                frame.define(name.clone(), value.clone());
                Ok(Some(value))
            }

            Instruction::Require { cond, message } => {
                let value = cond.eval(frame)?;
                match value.as_bool() {
                    Some(true) => Ok(None),
                    Some(false) => {
                        Err(Error::new(ErrorKind::RequirementFailed(message.clone())))
                    }
                    None => Err(Error::type_mismatch(Type::Bool, value.value_type())),
                }
            }

            Instruction::Get { key, bind } => {
                let key = key.eval(frame)?;
                let value = store.get(&key)?.unwrap_or(Value::Null);
                frame.define(bind.clone(), value.clone());
                Ok(Some(value))
            }

            Instruction::Put { key, value } => {
                let key = key.eval(frame)?;
                let value = value.eval(frame)?;
                store.put(key.clone(), value)?;
                trace.record(TraceEvent::StoreWrite { key });
                Ok(None)
            }

            Instruction::Delete { key } => {
                let key = key.eval(frame)?;
                store.delete(&key)?;
                trace.record(TraceEvent::StoreDelete { key });
                Ok(None)
            }

            Instruction::Call {
                procedure,
                args,
                bind,
            } => {
                // Argument expressions evaluate left to right in the
                // caller's frame; only their values cross the boundary.
                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(arg.eval(frame)?);
                }

                let child_ctx = ctx.for_internal_call();
                let result = self.call(procedure, &values, &child_ctx, store, depth + 1, trace)?;

                if let Some(bind) = bind {
                    frame.define(bind.clone(), result.clone().unwrap_or(Value::Null));
                }
                Ok(result)
            }
        }
    }
}
