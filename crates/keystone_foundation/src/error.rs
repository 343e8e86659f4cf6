//! Error types for the Keystone system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

use crate::types::Type;

/// Result alias for Keystone operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Keystone operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an invalid scoping error.
    #[must_use]
    pub fn invalid_scoping(raw: u8) -> Self {
        Self::new(ErrorKind::InvalidScoping { raw })
    }

    /// Creates a procedure not found error.
    #[must_use]
    pub fn procedure_not_found(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::ProcedureNotFound(name.into()))
    }

    /// Creates a duplicate procedure error.
    #[must_use]
    pub fn duplicate_procedure(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateProcedure(name.into()))
    }

    /// Creates an arity mismatch error.
    #[must_use]
    pub fn arity_mismatch(procedure: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::new(ErrorKind::ArityMismatch {
            procedure: procedure.into(),
            expected,
            actual,
        })
    }

    /// Creates an access denied error.
    #[must_use]
    pub fn access_denied(procedure: impl Into<String>, origin: impl Into<String>) -> Self {
        Self::new(ErrorKind::AccessDenied {
            procedure: procedure.into(),
            origin: origin.into(),
        })
    }

    /// Creates a call depth exceeded error.
    #[must_use]
    pub fn call_depth_exceeded(limit: usize) -> Self {
        Self::new(ErrorKind::CallDepthExceeded { limit })
    }

    /// Wraps a failure with the position of the instruction that raised it.
    #[must_use]
    pub fn instruction_failed(procedure: impl Into<String>, index: usize, source: Error) -> Self {
        Self::new(ErrorKind::InstructionFailed {
            procedure: procedure.into(),
            index,
            source: Box::new(source),
        })
    }

    /// Creates an undefined variable error.
    #[must_use]
    pub fn undefined_variable(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UndefinedVariable(name.into()))
    }

    /// Creates a type mismatch error.
    #[must_use]
    pub fn type_mismatch(expected: Type, actual: Type) -> Self {
        Self::new(ErrorKind::TypeMismatch { expected, actual })
    }

    /// Returns the innermost error kind, unwrapping instruction-position
    /// wrappers added as a failure unwound the call stack.
    #[must_use]
    pub fn root_kind(&self) -> &ErrorKind {
        let mut kind = &self.kind;
        while let ErrorKind::InstructionFailed { source, .. } = kind {
            kind = &source.kind;
        }
        kind
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A procedure's declared scope is not a recognized value.
    #[error("invalid procedure scoping '{raw}'")]
    InvalidScoping {
        /// The raw scoping byte from the definition.
        raw: u8,
    },

    /// A procedure with the same name is already registered.
    #[error("procedure '{0}' is already registered")]
    DuplicateProcedure(String),

    /// A parameter name appears more than once in a procedure definition.
    #[error("procedure '{procedure}' declares parameter '{parameter}' more than once")]
    DuplicateParameter {
        /// The procedure being validated.
        procedure: String,
        /// The repeated parameter name.
        parameter: String,
    },

    /// A parameter name collides with the reserved contextual namespace.
    #[error("procedure '{procedure}' parameter '{parameter}' uses the reserved '@' prefix")]
    InvalidParameterName {
        /// The procedure being validated.
        procedure: String,
        /// The offending parameter name.
        parameter: String,
    },

    /// The named procedure does not exist in the registry.
    #[error("procedure '{0}' not found")]
    ProcedureNotFound(String),

    /// Wrong number of arguments supplied to a procedure.
    #[error("procedure '{procedure}' requires {expected} arguments, got {actual}")]
    ArityMismatch {
        /// The procedure being called.
        procedure: String,
        /// The declared parameter count.
        expected: usize,
        /// The supplied argument count.
        actual: usize,
    },

    /// A private procedure was invoked from a disallowed origin.
    #[error("procedure '{procedure}' is not callable from {origin} origin")]
    AccessDenied {
        /// The procedure that rejected the call.
        procedure: String,
        /// The rejected caller origin.
        origin: String,
    },

    /// Nested procedure calls exceeded the configured depth bound.
    #[error("call depth limit ({limit}) exceeded")]
    CallDepthExceeded {
        /// The configured limit.
        limit: usize,
    },

    /// An instruction failed during body interpretation.
    #[error("procedure '{procedure}' instruction {index}: {source}")]
    InstructionFailed {
        /// The procedure whose body was being interpreted.
        procedure: String,
        /// Zero-based position of the failing instruction.
        index: usize,
        /// The underlying failure.
        source: Box<Error>,
    },

    /// A `require` guard evaluated to false.
    #[error("requirement failed: {0}")]
    RequirementFailed(String),

    /// A variable was read before being bound.
    #[error("undefined variable: {0}")]
    UndefinedVariable(String),

    /// Type mismatch during expression evaluation.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// The expected type.
        expected: Type,
        /// The actual type encountered.
        actual: Type,
    },

    /// Integer arithmetic overflowed.
    #[error("integer overflow in '{op}'")]
    IntegerOverflow {
        /// The operation that overflowed.
        op: &'static str,
    },

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// A store effect was attempted in a context without a store.
    #[error("store operations not available in this context")]
    StoreUnavailable,

    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// File IO failed.
    #[error("io error: {0}")]
    IoError(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Stack of procedure activations, outermost first.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    /// Adds a call-stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for frame in &self.stack {
            writeln!(f, "  in {frame}")?;
        }
        Ok(())
    }
}
