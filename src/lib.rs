// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]

//! # ehprobe
//!
//! A deterministic exception-handling fixture library. Compiled as a `cdylib`, it yields a
//! binary whose exception-handling constructs are deliberately shaped and enumerable, so a
//! binary-format analysis tool (a PE parser's test suite, typically) can be validated
//! against known-good exception directories, unwind-info records, and export tables.
//!
//! ## What the artifact carries
//!
//! - **A scenario catalog** ([`ExceptionScenario`]): a single throw caught by a typed
//!   handler, a structured fault under two nested handler scopes, and a handler that
//!   itself raises a different exception kind out to a broader-typed enclosing handler.
//!   Every shape is contained within the operation that raised it; the defining contract
//!   of the fixture is that nothing ever escapes to a caller.
//! - **An export catalog** ([`crate::exports`]): probes with fixed, mutually distinct C
//!   signatures so each export-table entry is individually resolvable and its address
//!   range attributable to a known shape. The [`crate::catalog`] module states the
//!   contract as `const` data.
//!
//! Language-level exceptions and structured faults are deliberately kept as two separate
//! mechanisms ([`crate::scenario`] vs [`crate::fault`]), since their unwind-metadata
//! shapes differ and both must remain independently inspectable by the consuming tool.
//!
//! ## Quick Start
//!
//! ```rust
//! use ehprobe::prelude::*;
//!
//! let scenario = ExceptionScenario::new();
//! assert!(scenario.maybe_panic(false));
//! assert_eq!(orchestrate(true), Orchestration::Caught);
//!
//! for probe in EXPORTS {
//!     println!("{} ({}) unwinds: {}", probe.name, probe.signature, probe.unwinds);
//! }
//! ```
//!
//! ## Building the fixture artifact
//!
//! ```bash
//! cargo build --release   # target/release/ contains the cdylib artifact
//! ```
//!
//! The consuming harness loads the artifact, resolves each probe by exact name from the
//! export table, and cross-references each function's address range against the
//! artifact's exception/unwind metadata. Diagnostic text on stdout is informational only
//! and not part of any contract.

pub(crate) mod error;

/// Convenient re-exports of the most commonly used types and functions.
///
/// # Example
///
/// ```rust
/// use ehprobe::prelude::*;
///
/// let code = orchestrate(false).code();
/// assert_eq!(code, 0);
/// ```
pub mod prelude;

/// The exported probe-catalog descriptors: names, signatures, unwind expectations.
///
/// # Key Types
///
/// - [`catalog::ProbeDescriptor`] - One export-table entry of the contract
/// - [`catalog::ProbeSignature`] - Operand shape of a probe
/// - [`catalog::EXPORTS`] - The full catalog in fixed order
pub mod catalog;

/// The exported C-ABI probe functions carried by the compiled artifact.
///
/// Each function is `#[no_mangle] extern "C"`; see [`catalog::EXPORTS`] for the
/// name-to-signature contract.
pub mod exports;

/// Structured-fault interception: fault records, handler-scope masks, nested scopes.
///
/// # Key Types
///
/// - [`fault::Fault`] - A raised fault record with kind and address
/// - [`fault::FaultMask`] - Which fault kinds a scope intercepts
///
/// # Main Functions
///
/// - [`fault::intercept`] - One handler scope with nearest-enclosing semantics
/// - [`fault::checked_write`] - The kernel-mediated deliberate invalid store
pub mod fault;

/// The exception-scenario catalog and its orchestration.
///
/// # Key Types
///
/// - [`scenario::ExceptionScenario`] - The three exception-propagation shapes
/// - [`scenario::Orchestration`] - Discriminated outcome codes
///
/// # Main Functions
///
/// - [`scenario::orchestrate`] - Fixed-order drive of the catalog
pub mod scenario;

pub use error::Error;
pub use scenario::{orchestrate, ExceptionScenario, Orchestration};

/// Convenience alias for `Result<T, ehprobe::Error>`
pub type Result<T> = std::result::Result<T, Error>;
