//! The exception-scenario catalog: three containment-guaranteed exception shapes.
//!
//! [`ExceptionScenario`] demonstrates, on demand, the code shapes the compiled artifact
//! must carry so its exception and unwind tables have known-good content: a single
//! throw/catch, a structured fault under two nested handler scopes, and a rethrow out
//! of a typed handler's own frame. Every shape resolves within the operation that
//! raised it; nothing is ever observable by the caller except the boolean outcome.
//!
//! Scenario selection is caller-controlled: each probe takes an explicit `trigger`
//! argument, so one build of the artifact can exercise both branches of every shape.

use std::panic::{self, AssertUnwindSafe};

use crate::fault::{self, FaultKind, FaultMask};
use crate::{Error, Result};

/// Panic payload used across the whole catalog, the language-level analogue of a base
/// exception class. The outer handler of the nested-rethrow shape is typed to this kind.
pub struct ScenarioPanic(pub &'static str);

/// Narrow panic payload raised only inside the nested-rethrow shape's inner scope,
/// the analogue of a derived exception class caught by an exactly-typed handler.
pub struct NestedPanic(pub &'static str);

const DUMMY_MESSAGE: &str = "ehprobe dummy exception";
const NESTED_MESSAGE: &str = "ehprobe nested exception";
const RERAISE_MESSAGE: &str = "ehprobe re-raise from nested handler";

/// Demonstrates the fixture's three exception-propagation shapes on demand.
///
/// The object is stateless and stack-allocated per invocation; every outcome is a pure
/// function of the `trigger` argument. `true` means the operation completed without
/// triggering, `false` means the configured exception path was taken and locally handled.
///
/// # Examples
///
/// ```rust
/// use ehprobe::ExceptionScenario;
///
/// let scenario = ExceptionScenario::new();
/// assert!(scenario.maybe_panic(false));
/// assert!(!scenario.maybe_panic(true));
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct ExceptionScenario;

impl ExceptionScenario {
    /// Create a new instance of the `ExceptionScenario`
    pub fn new() -> ExceptionScenario {
        ExceptionScenario
    }

    /// Language-exception probe: a single throw caught by a typed handler in the same frame.
    ///
    /// With `trigger` set, raises a [`ScenarioPanic`] carrying a fixed diagnostic message
    /// and catches it by type before returning, emitting the message. The raise never
    /// escapes this call. With `trigger` clear, returns `true` without raising.
    pub fn maybe_panic(&self, trigger: bool) -> bool {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            if trigger {
                panic::panic_any(ScenarioPanic(DUMMY_MESSAGE));
            }
        }));

        match outcome {
            Ok(()) => true,
            Err(payload) => match payload.downcast::<ScenarioPanic>() {
                Ok(caught) => {
                    println!("Caught exception: {}", caught.0);
                    false
                }
                // Not ours, keep unwinding towards the orchestrator's backstop.
                Err(other) => panic::resume_unwind(other),
            },
        }
    }

    /// Structured-fault probe: one invalid store under two nested handler scopes.
    ///
    /// With `trigger` set, a deliberate store to a null address is raised as a structured
    /// fault inside the innermost scope; the nearest enclosing handler intercepts it and
    /// the probe returns `Ok(false)`. The outer scope is a structural backstop and never
    /// fires while the inner one is present. With `trigger` clear, a local byte buffer
    /// initialized up front is read back and reported, and the probe returns `Ok(true)`.
    ///
    /// # Errors
    /// [`Error::FaultBackend`] or [`Error::Unsupported`] when the fault-delivery channel
    /// is broken or absent, and [`Error::ContainmentBreached`] if an access violation
    /// somehow escapes both scopes.
    pub fn maybe_fault(&self, trigger: bool) -> Result<bool> {
        let scratch = [b'0'; 1];

        let outcome = fault::intercept(
            FaultMask::ACCESS_VIOLATION,
            || {
                fault::intercept(
                    FaultMask::ACCESS_VIOLATION,
                    || {
                        if trigger {
                            fault::checked_write(std::ptr::null_mut(), b'X')?;
                        }
                        Ok(true)
                    },
                    |fault| {
                        println!("inner structured handler: {fault}");
                        false
                    },
                )
            },
            |fault| {
                println!("outer structured handler: {fault}");
                false
            },
        );

        match outcome {
            Ok(true) => {
                println!("no structured fault: {}", scratch[0] as char);
                Ok(true)
            }
            Ok(false) => Ok(false),
            Err(fault) => Err(match fault.kind {
                FaultKind::Os(code) => Error::FaultBackend(code),
                FaultKind::Unsupported => Error::Unsupported,
                FaultKind::AccessViolation => Error::ContainmentBreached {
                    probe: "maybe_fault",
                    detail: fault.to_string(),
                },
            }),
        }
    }

    /// Nested rethrow probe: a typed handler that itself raises a different kind.
    ///
    /// With `trigger` set, the inner scope raises a [`NestedPanic`]; a handler typed to
    /// exactly that kind catches it and, from within its own frame, raises a
    /// [`ScenarioPanic`], which propagates out to the enclosing handler typed to the
    /// broader kind. That second raise is a fresh unwind event attributable to the
    /// handler's frame, not a rethrow of the original. With `trigger` clear, returns
    /// `true` without raising.
    pub fn maybe_nested_panic(&self, trigger: bool) -> bool {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            let inner = panic::catch_unwind(AssertUnwindSafe(|| {
                if trigger {
                    panic::panic_any(NestedPanic(NESTED_MESSAGE));
                }
            }));

            if let Err(payload) = inner {
                let caught = payload
                    .downcast::<NestedPanic>()
                    .unwrap_or_else(|other| panic::resume_unwind(other));
                println!("inner catch: {}", caught.0);
                panic::panic_any(ScenarioPanic(RERAISE_MESSAGE));
            }
        }));

        match outcome {
            Ok(()) => true,
            Err(payload) => match payload.downcast::<ScenarioPanic>() {
                Ok(caught) => {
                    println!("outer catch: {}", caught.0);
                    false
                }
                Err(other) => panic::resume_unwind(other),
            },
        }
    }
}

/// Outcome codes of [`orchestrate`], the discriminated result surfaced through the
/// artifact's orchestrating export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum Orchestration {
    /// An exception escaped the orchestrator's outer safety handler. Signals a fixture
    /// defect; must never occur in a correct build.
    Escaped = -1,
    /// Both scenario probes completed without triggering.
    Clean = 0,
    /// The language-exception probe triggered and was contained.
    Caught = 1,
    /// The nested-rethrow probe triggered and was contained.
    NestedCaught = 2,
}

impl Orchestration {
    /// The raw code carried across the C ABI boundary.
    pub fn code(self) -> i32 {
        self as i32
    }
}

/// Drives the scenario catalog in its fixed order and maps outcomes to codes.
///
/// Invokes the language-exception probe first and the nested-rethrow probe second, so
/// with `trigger` set the result is always [`Orchestration::Caught`]; the nested shape
/// is only reached when the first probe did not trigger. A safety handler around the
/// whole sequence converts any escaping exception into [`Orchestration::Escaped`].
pub fn orchestrate(trigger: bool) -> Orchestration {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        let scenario = ExceptionScenario::new();
        if !scenario.maybe_panic(trigger) {
            return Orchestration::Caught;
        }
        if !scenario.maybe_nested_panic(trigger) {
            return Orchestration::NestedCaught;
        }
        Orchestration::Clean
    }));

    outcome.unwrap_or(Orchestration::Escaped)
}
