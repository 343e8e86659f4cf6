//! Execution tracing.
//!
//! A bounded in-memory event buffer the engine writes to while it runs.
//! Tracing is the engine's observability surface: what procedure was
//! entered from which origin, which instructions ran, what effects they
//! attempted, and how each activation ended. The buffer keeps the most
//! recent events when full, so a runaway procedure cannot grow it without
//! bound.

use std::collections::VecDeque;
use std::fmt;

use keystone_foundation::Value;

use crate::engine::CallOrigin;
use crate::instruction::InstructionKind;

// =============================================================================
// Trace Event
// =============================================================================

/// Events recorded during procedure execution.
#[derive(Clone, Debug)]
pub enum TraceEvent {
    /// A call activation started.
    CallStarted {
        /// The procedure being activated.
        procedure: String,
        /// The caller origin.
        origin: CallOrigin,
        /// Nesting depth (0 for the top-level call).
        depth: usize,
    },

    /// An instruction completed successfully.
    InstructionExecuted {
        /// The procedure whose body is being interpreted.
        procedure: String,
        /// Zero-based instruction position.
        index: usize,
        /// Capability class of the instruction.
        kind: InstructionKind,
    },

    /// An effect instruction wrote a store key.
    StoreWrite {
        /// The key written.
        key: Value,
    },

    /// An effect instruction removed a store key.
    StoreDelete {
        /// The key removed.
        key: Value,
    },

    /// A call activation ended.
    CallCompleted {
        /// The procedure whose activation ended.
        procedure: String,
        /// Whether the body interpreted to completion.
        success: bool,
    },
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CallStarted {
                procedure,
                origin,
                depth,
            } => write!(f, "call {procedure} ({origin}, depth {depth})"),
            Self::InstructionExecuted {
                procedure,
                index,
                kind,
            } => write!(f, "{procedure}[{index}] {kind}"),
            Self::StoreWrite { key } => write!(f, "put {key}"),
            Self::StoreDelete { key } => write!(f, "delete {key}"),
            Self::CallCompleted { procedure, success } => {
                if *success {
                    write!(f, "return {procedure}")
                } else {
                    write!(f, "fail {procedure}")
                }
            }
        }
    }
}

// =============================================================================
// Execution Trace
// =============================================================================

/// A bounded buffer of execution events, oldest first.
#[derive(Clone, Debug)]
pub struct ExecutionTrace {
    /// The events, oldest first.
    events: VecDeque<TraceEvent>,
    /// Maximum number of events to keep.
    max_events: usize,
}

impl Default for ExecutionTrace {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecutionTrace {
    /// Default event capacity.
    pub const DEFAULT_CAPACITY: usize = 10_000;

    /// Creates a trace with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates a trace that keeps at most `max_events` events.
    #[must_use]
    pub fn with_capacity(max_events: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(max_events.min(1024)),
            max_events,
        }
    }

    /// Records an event, evicting the oldest when full.
    pub fn record(&mut self, event: TraceEvent) {
        self.events.push_back(event);
        while self.events.len() > self.max_events {
            self.events.pop_front();
        }
    }

    /// Returns the number of buffered events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if no events are buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Returns an iterator over events, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &TraceEvent> {
        self.events.iter()
    }

    /// Removes and returns all buffered events, oldest first.
    pub fn take(&mut self) -> Vec<TraceEvent> {
        self.events.drain(..).collect()
    }
}
