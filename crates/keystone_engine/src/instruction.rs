//! The closed instruction set of procedure bodies.
//!
//! Instructions are data; the interpreter loop in [`crate::Engine`] owns
//! execution. The set is a closed, tagged enum rather than open dynamic
//! dispatch, so the interpreter's exhaustiveness over the capability set
//! (read/write frame, perform store effect, invoke a procedure) is checked
//! at compile time.

use std::fmt;

use crate::expr::Expr;

/// One step of a procedure body.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Instruction {
    /// Binds an expression's value into the frame.
    Assign {
        /// Name to bind.
        name: String,
        /// Expression evaluated against the current frame.
        expr: Expr,
    },

    /// Guard: fails the instruction unless the condition is true.
    Require {
        /// Condition expression; must evaluate to `true`.
        cond: Expr,
        /// Message reported when the requirement fails.
        message: String,
    },

    /// Reads a store key into the frame. Missing keys read as null.
    Get {
        /// Key expression.
        key: Expr,
        /// Frame name the value is bound to.
        bind: String,
    },

    /// Writes a store key.
    Put {
        /// Key expression.
        key: Expr,
        /// Value expression.
        value: Expr,
    },

    /// Removes a store key.
    Delete {
        /// Key expression.
        key: Expr,
    },

    /// Invokes another procedure with origin `internal`.
    Call {
        /// Target procedure name.
        procedure: String,
        /// Argument expressions, evaluated left to right against the
        /// current frame.
        args: Vec<Expr>,
        /// Frame name the child's result is bound to, when present.
        bind: Option<String>,
    },
}

/// Capability class of an instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InstructionKind {
    /// Reads and writes the current frame only.
    Pure,
    /// Reads or writes persistent state through the store context.
    Effect,
    /// Invokes another procedure through the engine.
    Call,
}

impl Instruction {
    /// Returns the capability class of this instruction.
    #[must_use]
    pub const fn kind(&self) -> InstructionKind {
        match self {
            Self::Assign { .. } | Self::Require { .. } => InstructionKind::Pure,
            Self::Get { .. } | Self::Put { .. } | Self::Delete { .. } => InstructionKind::Effect,
            Self::Call { .. } => InstructionKind::Call,
        }
    }

    /// Returns the instruction's mnemonic, for traces and diagnostics.
    #[must_use]
    pub const fn mnemonic(&self) -> &'static str {
        match self {
            Self::Assign { .. } => "assign",
            Self::Require { .. } => "require",
            Self::Get { .. } => "get",
            Self::Put { .. } => "put",
            Self::Delete { .. } => "delete",
            Self::Call { .. } => "call",
        }
    }
}

impl fmt::Display for InstructionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pure => write!(f, "pure"),
            Self::Effect => write!(f, "effect"),
            Self::Call => write!(f, "call"),
        }
    }
}
