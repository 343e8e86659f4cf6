//! Cross-layer integration tests for Keystone
//!
//! Tests that verify correct interaction between multiple crates.

mod deployment;
mod determinism;
