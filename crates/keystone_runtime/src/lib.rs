//! Deployment manifests and snapshot serialization for Keystone.
//!
//! This crate provides:
//! - [`DeploymentManifest`] / [`ProcedureDef`] - The wire form of a schema
//!   deployment, and atomic deployment into a [`ProcedureRegistry`]
//! - [`serialize`] - `MessagePack` encoding and file save/load for
//!   snapshots
//!
//! [`ProcedureRegistry`]: keystone_engine::ProcedureRegistry

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod manifest;
pub mod serialize;

pub use manifest::{DeploymentManifest, ProcedureDef};
