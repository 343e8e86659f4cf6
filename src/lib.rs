//! Keystone - Deterministic procedure execution engine
//!
//! This crate re-exports all layers of the Keystone system for convenient
//! access. For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: keystone_runtime    — Deployment manifests, serialization
//! Layer 2: keystone_engine     — Procedures, registry, execution engine
//! Layer 1: keystone_storage    — Snapshot store, transactions
//! Layer 0: keystone_foundation — Core types (Value, Error, collections)
//! ```

pub use keystone_engine as engine;
pub use keystone_foundation as foundation;
pub use keystone_runtime as runtime;
pub use keystone_storage as storage;
