//! Procedure definitions and scoping.
//!
//! A procedure is a named, atomic unit of logic: an ordered parameter
//! list, an access-control scope, and an ordered instruction body. It is
//! validated when registered and immutable for the lifetime of the engine;
//! execution never mutates a definition.

use std::collections::BTreeSet;

use keystone_foundation::{Error, ErrorKind, Result};

use crate::engine::CallOrigin;
use crate::instruction::Instruction;

// =============================================================================
// Scoping
// =============================================================================

/// Access-control scope of a procedure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Scoping {
    /// Callable from any origin, including external client submissions.
    Public,
    /// Callable only from within another procedure's body.
    Private,
}

impl Scoping {
    /// Validates a raw scoping byte from a definition or manifest.
    ///
    /// `0` is public and `1` is private; anything else is a
    /// definition-time failure, and a procedure carrying it must never
    /// reach the registry.
    ///
    /// # Errors
    /// Returns [`ErrorKind::InvalidScoping`] for unrecognized values.
    pub fn clean(raw: u8) -> Result<Self> {
        match raw {
            0 => Ok(Self::Public),
            1 => Ok(Self::Private),
            _ => Err(Error::invalid_scoping(raw)),
        }
    }

    /// Returns the wire representation of this scope.
    #[must_use]
    pub const fn as_raw(self) -> u8 {
        match self {
            Self::Public => 0,
            Self::Private => 1,
        }
    }
}

impl std::fmt::Display for Scoping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Public => write!(f, "public"),
            Self::Private => write!(f, "private"),
        }
    }
}

// =============================================================================
// Procedure
// =============================================================================

/// An immutable procedure definition.
#[derive(Clone, Debug, PartialEq)]
pub struct Procedure {
    /// Unique name within the registry.
    name: String,
    /// Ordered parameter names; order defines positional binding.
    parameters: Vec<String>,
    /// Access-control scope.
    scoping: Scoping,
    /// Ordered instruction body. Empty is legal (no-op procedure).
    body: Vec<Instruction>,
}

impl Procedure {
    /// Creates a new procedure with no parameters and an empty body.
    #[must_use]
    pub fn new(name: impl Into<String>, scoping: Scoping) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            scoping,
            body: Vec::new(),
        }
    }

    /// Sets the parameter list.
    #[must_use]
    pub fn with_parameters<I, S>(mut self, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parameters = parameters.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the instruction body.
    #[must_use]
    pub fn with_body(mut self, body: impl IntoIterator<Item = Instruction>) -> Self {
        self.body = body.into_iter().collect();
        self
    }

    /// Returns the procedure name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared parameters in binding order.
    #[must_use]
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    /// Returns the access-control scope.
    #[must_use]
    pub const fn scoping(&self) -> Scoping {
        self.scoping
    }

    /// Returns the instruction body.
    #[must_use]
    pub fn body(&self) -> &[Instruction] {
        &self.body
    }

    /// Validates this definition.
    ///
    /// Parameter names must be pairwise distinct (a duplicate binding
    /// would be ambiguous) and must not use the `@` prefix, which is
    /// reserved for contextual variables seeded into every frame.
    ///
    /// # Errors
    /// Returns [`ErrorKind::DuplicateParameter`] or
    /// [`ErrorKind::InvalidParameterName`].
    pub fn validate(&self) -> Result<()> {
        let mut seen = BTreeSet::new();
        for parameter in &self.parameters {
            if parameter.starts_with('@') {
                return Err(Error::new(ErrorKind::InvalidParameterName {
                    procedure: self.name.clone(),
                    parameter: parameter.clone(),
                }));
            }
            if !seen.insert(parameter.as_str()) {
                return Err(Error::new(ErrorKind::DuplicateParameter {
                    procedure: self.name.clone(),
                    parameter: parameter.clone(),
                }));
            }
        }
        Ok(())
    }

    /// Checks whether a caller with the given origin may invoke this
    /// procedure.
    ///
    /// Public procedures accept any origin. Private procedures accept only
    /// internal calls, made from within another procedure's body. The
    /// check runs exactly once per activation, before argument binding and
    /// before any instruction; a rejected call has zero observable effect.
    ///
    /// # Errors
    /// Returns [`ErrorKind::AccessDenied`] for a private procedure invoked
    /// externally.
    pub fn check_access(&self, origin: CallOrigin) -> Result<()> {
        match (self.scoping, origin) {
            (Scoping::Public, _) | (Scoping::Private, CallOrigin::Internal) => Ok(()),
            (Scoping::Private, CallOrigin::External) => {
                Err(Error::access_denied(&self.name, origin.to_string()))
            }
        }
    }
}
