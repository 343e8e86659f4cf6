//! Deployment manifests.
//!
//! A manifest is the wire form of a schema deployment: the full set of
//! procedure definitions a dataset ships with. Scoping travels as the raw
//! byte it has on the wire and is validated during deployment, so a
//! manifest carrying an unrecognized scope is rejected before anything is
//! registered.

use keystone_engine::{Instruction, Procedure, ProcedureRegistry, Scoping};
use keystone_foundation::{Error, ErrorKind, Result};
use serde::{Deserialize, Serialize};

// =============================================================================
// Procedure Definition (wire form)
// =============================================================================

/// One procedure definition as deployed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProcedureDef {
    /// Procedure name, unique within the manifest.
    pub name: String,
    /// Ordered parameter names.
    pub parameters: Vec<String>,
    /// Raw scoping byte (0 = public, 1 = private).
    pub scoping: u8,
    /// Ordered instruction body.
    pub body: Vec<Instruction>,
}

impl ProcedureDef {
    /// Validates this definition and builds the engine-side procedure.
    ///
    /// # Errors
    /// Returns [`ErrorKind::InvalidScoping`] for an unrecognized scoping
    /// byte, or the procedure's own validation failure.
    pub fn clean(&self) -> Result<Procedure> {
        let scoping = Scoping::clean(self.scoping)?;
        let procedure = Procedure::new(self.name.clone(), scoping)
            .with_parameters(self.parameters.iter().cloned())
            .with_body(self.body.iter().cloned());
        procedure.validate()?;
        Ok(procedure)
    }
}

// =============================================================================
// Deployment Manifest
// =============================================================================

/// The full set of procedures deployed with a dataset.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentManifest {
    /// Procedure definitions, in deployment order.
    pub procedures: Vec<ProcedureDef>,
}

impl DeploymentManifest {
    /// Creates an empty manifest.
    #[must_use]
    pub fn new() -> Self {
        Self {
            procedures: Vec::new(),
        }
    }

    /// Deploys every definition into a fresh registry.
    ///
    /// Deployment is atomic: the first invalid definition fails the whole
    /// deployment and no registry is produced.
    ///
    /// # Errors
    /// Returns the first definition's validation or registration failure.
    pub fn deploy(&self) -> Result<ProcedureRegistry> {
        let mut registry = ProcedureRegistry::new();
        for def in &self.procedures {
            registry.register(def.clean()?)?;
        }
        Ok(registry)
    }

    /// Serializes the manifest to `MessagePack` bytes.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        rmp_serde::to_vec_named(self)
            .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string())))
    }

    /// Deserializes a manifest from `MessagePack` bytes.
    ///
    /// # Errors
    /// Returns an error if deserialization fails.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        rmp_serde::from_slice(bytes)
            .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string())))
    }
}
