//! # ehprobe Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and
//! functions from the ehprobe library. Import this module to get quick access to the
//! scenario catalog and the export-contract descriptors in one line.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all ehprobe operations
pub use crate::Error;

/// The result type used throughout ehprobe
pub use crate::Result;

// ================================================================================================
// Scenario Catalog
// ================================================================================================

/// The exception-scenario value type and its orchestration
pub use crate::scenario::{
    orchestrate, ExceptionScenario, NestedPanic, Orchestration, ScenarioPanic,
};

// ================================================================================================
// Structured Faults
// ================================================================================================

/// Structured-fault interception primitives
pub use crate::fault::{checked_write, intercept, scope_depth, Fault, FaultKind, FaultMask};

// ================================================================================================
// Export Contract
// ================================================================================================

/// Descriptors of the artifact's exported probe catalog
pub use crate::catalog::{find, ProbeDescriptor, ProbeSignature, EXPORTS};
