//! Structured-fault interception, the non-language half of the fixture's exception catalog.
//!
//! Language-level exceptions (panics) and structured faults (invalid memory accesses caught
//! by the platform) produce different unwind-metadata shapes in a compiled artifact, so this
//! crate keeps them as two separate mechanisms. This module owns the structured side: a
//! [`Fault`] record, a [`FaultMask`] describing which fault kinds a handler scope intercepts,
//! and [`intercept`] for building nested handler scopes with nearest-enclosing-handler
//! semantics.
//!
//! The deliberate invalid write at the heart of the scenario is not performed as a raw store
//! from this thread. A raw store would raise a hardware trap, and portable Rust has no
//! trap-and-recover facility (no `__try`/`__except`, no `sigsetjmp`). Instead [`checked_write`]
//! routes the store through a kernel-mediated channel, so the operating system performs the
//! access and reports the violation as an error code which is then raised as a [`Fault`]
//! through the enclosing scopes. Platforms without such a channel report
//! [`FaultKind::Unsupported`] instead of approximating the fault with a panic.

#[cfg(unix)]
mod unix;
#[cfg(unix)]
use unix as backend;

#[cfg(windows)]
mod windows;
#[cfg(windows)]
use windows as backend;

#[cfg(not(any(unix, windows)))]
mod fallback;
#[cfg(not(any(unix, windows)))]
use fallback as backend;

use std::cell::Cell;
use std::fmt;

use bitflags::bitflags;
use strum::Display;

bitflags! {
    /// Set of fault kinds a handler scope is willing to intercept.
    ///
    /// A scope whose mask does not cover a raised fault lets it propagate to the next
    /// enclosing scope, mirroring how a typed exception filter declines an exception
    /// record it does not recognize.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FaultMask: u8 {
        /// Invalid memory accesses reported by the platform.
        const ACCESS_VIOLATION = 0x01;

        /// Backend plumbing failures (the fault-delivery channel itself broke).
        const OS = 0x02;

        /// The platform-gap marker raised where no trap-and-recover facility exists.
        const UNSUPPORTED = 0x04;
    }
}

/// Classification of a raised structured fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum FaultKind {
    /// The platform rejected a memory access to an invalid address.
    AccessViolation,
    /// The delivery channel failed with the contained OS error code.
    Os(i32),
    /// No trap-and-recover facility exists on this platform.
    Unsupported,
}

impl FaultKind {
    /// The [`FaultMask`] bit a scope must carry to intercept this kind.
    pub fn mask(self) -> FaultMask {
        match self {
            FaultKind::AccessViolation => FaultMask::ACCESS_VIOLATION,
            FaultKind::Os(_) => FaultMask::OS,
            FaultKind::Unsupported => FaultMask::UNSUPPORTED,
        }
    }
}

/// A structured fault record, carrying its classification and the faulting address.
///
/// Raised by [`checked_write`] and delivered to the nearest enclosing [`intercept`] scope
/// whose mask covers its kind. The address is `0` for faults that have no meaningful
/// target (backend failures, the unsupported-platform marker).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fault {
    /// Classification of the fault.
    pub kind: FaultKind,
    /// Address whose access raised the fault, or 0 when not applicable.
    pub address: usize,
}

impl Fault {
    pub(crate) fn access_violation(address: usize) -> Fault {
        Fault {
            kind: FaultKind::AccessViolation,
            address,
        }
    }

    pub(crate) fn os(code: i32) -> Fault {
        Fault {
            kind: FaultKind::Os(code),
            address: 0,
        }
    }

    #[cfg(not(any(unix, windows)))]
    pub(crate) fn unsupported() -> Fault {
        Fault {
            kind: FaultKind::Unsupported,
            address: 0,
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            FaultKind::AccessViolation => {
                write!(f, "access violation writing {:#018x}", self.address)
            }
            FaultKind::Os(code) => write!(f, "fault delivery failed (os error {code})"),
            FaultKind::Unsupported => write!(f, "structured faults unsupported on this platform"),
        }
    }
}

thread_local! {
    /// Nesting depth of live interception scopes on this thread, for diagnostics only.
    static SCOPE_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Current interception-scope nesting depth on the calling thread.
///
/// Purely diagnostic; 0 means no scope is live.
pub fn scope_depth() -> usize {
    SCOPE_DEPTH.with(Cell::get)
}

struct DepthGuard;

impl DepthGuard {
    fn enter() -> DepthGuard {
        SCOPE_DEPTH.with(|d| d.set(d.get() + 1));
        DepthGuard
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        SCOPE_DEPTH.with(|d| d.set(d.get() - 1));
    }
}

/// Runs `body` inside one structured-fault handler scope.
///
/// A [`Fault`] surfacing from `body` whose kind is covered by `mask` is delivered to
/// `handler`, and the handler's value becomes the scope's result. An uncovered fault
/// propagates outward as `Err`, to be seen by the next enclosing scope. Because the
/// innermost call inspects the fault first, nesting calls to this function yields
/// nearest-enclosing-handler semantics.
///
/// # Arguments
/// * 'mask' - Fault kinds this scope intercepts
/// * 'body' - The protected region
/// * 'handler' - Invoked with the fault when this scope intercepts it
pub fn intercept<T>(
    mask: FaultMask,
    body: impl FnOnce() -> Result<T, Fault>,
    handler: impl FnOnce(&Fault) -> T,
) -> Result<T, Fault> {
    let _depth = DepthGuard::enter();
    match body() {
        Ok(value) => Ok(value),
        Err(fault) if mask.contains(fault.kind.mask()) => Ok(handler(&fault)),
        Err(fault) => Err(fault),
    }
}

/// Attempts to store `value` at `address` through a kernel-mediated channel.
///
/// The calling thread never dereferences `address` itself; the operating system performs
/// the store and reports an invalid destination as an error code, which is raised here as
/// a [`FaultKind::AccessViolation`] fault. This keeps the deliberate invalid write of the
/// fixture recoverable without in-process trap handling. The function is safe to call with
/// any address, including null.
///
/// # Errors
/// Returns the [`Fault`] raised by the store: an access violation for an invalid
/// destination, [`FaultKind::Os`] if the delivery channel itself failed, or
/// [`FaultKind::Unsupported`] where no such channel exists.
pub fn checked_write(address: *mut u8, value: u8) -> Result<(), Fault> {
    backend::write_through(address, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_depth_tracks_nesting() {
        assert_eq!(scope_depth(), 0);
        let _ = intercept::<i32>(
            FaultMask::ACCESS_VIOLATION,
            || {
                assert_eq!(scope_depth(), 1);
                intercept(
                    FaultMask::ACCESS_VIOLATION,
                    || {
                        assert_eq!(scope_depth(), 2);
                        Ok(0)
                    },
                    |_| -1,
                )
            },
            |_| -1,
        );
        assert_eq!(scope_depth(), 0);
    }

    #[test]
    fn test_inner_scope_intercepts_before_outer() {
        let mut inner_hit = false;
        let mut outer_hit = false;
        let outcome = intercept(
            FaultMask::ACCESS_VIOLATION,
            || {
                intercept(
                    FaultMask::ACCESS_VIOLATION,
                    || Err(Fault::access_violation(0)),
                    |_| {
                        inner_hit = true;
                        false
                    },
                )
            },
            |_| {
                outer_hit = true;
                false
            },
        );
        assert_eq!(outcome, Ok(false));
        assert!(inner_hit);
        assert!(!outer_hit);
    }

    #[test]
    fn test_uncovered_fault_propagates_to_enclosing_scope() {
        let mut outer_hit = false;
        let outcome = intercept(
            FaultMask::OS,
            || {
                intercept(
                    FaultMask::ACCESS_VIOLATION,
                    || Err(Fault::os(42)),
                    |_| unreachable!("inner mask does not cover Os faults"),
                )
            },
            |fault| {
                outer_hit = true;
                assert_eq!(fault.kind, FaultKind::Os(42));
                true
            },
        );
        assert_eq!(outcome, Ok(true));
        assert!(outer_hit);
    }

    #[test]
    fn test_fault_escaping_all_scopes_is_returned() {
        let outcome = intercept::<bool>(
            FaultMask::ACCESS_VIOLATION,
            || Err(Fault::os(7)),
            |_| unreachable!(),
        );
        assert_eq!(outcome, Err(Fault::os(7)));
    }

    #[cfg(any(unix, windows))]
    #[test]
    fn test_checked_write_null_reports_access_violation() {
        let fault = checked_write(std::ptr::null_mut(), b'X').unwrap_err();
        assert_eq!(fault.kind, FaultKind::AccessViolation);
        assert_eq!(fault.address, 0);
    }

    #[cfg(any(unix, windows))]
    #[test]
    fn test_checked_write_valid_destination_stores_byte() {
        let mut slot = 0u8;
        checked_write(&mut slot, b'X').unwrap();
        assert_eq!(slot, b'X');
    }

    #[test]
    fn test_fault_display_names_the_address() {
        let fault = Fault::access_violation(0x1000);
        assert_eq!(
            fault.to_string(),
            "access violation writing 0x0000000000001000"
        );
    }
}
