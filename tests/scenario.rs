//! Integration tests for the exception-scenario catalog.
//!
//! These assert the fixture's defining contract from the library surface: every
//! configured exception shape triggers exactly when asked to, resolves inside the
//! operation that raised it, and is never observable by the caller.

use ehprobe::prelude::*;

#[test]
fn test_trigger_clear_every_probe_completes() {
    let scenario = ExceptionScenario::new();
    assert!(scenario.maybe_panic(false));
    assert!(scenario.maybe_nested_panic(false));
}

#[test]
fn test_trigger_set_every_panic_probe_is_contained() {
    let scenario = ExceptionScenario::new();
    assert!(!scenario.maybe_panic(true));
    assert!(!scenario.maybe_nested_panic(true));
}

#[cfg(any(unix, windows))]
#[test]
fn test_trigger_clear_fault_probe_completes() {
    let scenario = ExceptionScenario::new();
    assert!(scenario.maybe_fault(false).unwrap());
}

#[cfg(any(unix, windows))]
#[test]
fn test_trigger_set_fault_probe_is_intercepted() {
    let scenario = ExceptionScenario::new();
    assert!(!scenario.maybe_fault(true).unwrap());
}

/// Two nested scopes over one faulting operation: the nearest one handles it, the
/// outer backstop never fires. This is the shape the consuming parser attributes
/// nearest-enclosing-handler semantics against.
#[test]
fn test_nearest_scope_handles_outer_backstop_never_fires() {
    let mut inner_hit = false;
    let mut outer_hit = false;

    let outcome = intercept(
        FaultMask::ACCESS_VIOLATION,
        || {
            intercept(
                FaultMask::ACCESS_VIOLATION,
                || Err(Fault {
                    kind: FaultKind::AccessViolation,
                    address: 0,
                }),
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
fn test_probes_are_pure_in_the_trigger() {
    let scenario = ExceptionScenario::new();
    for _ in 0..3 {
        assert!(scenario.maybe_panic(false));
        assert!(!scenario.maybe_panic(true));
        assert!(scenario.maybe_nested_panic(false));
        assert!(!scenario.maybe_nested_panic(true));
    }
}

#[test]
fn test_no_scope_is_live_between_invocations() {
    let scenario = ExceptionScenario::new();
    let _ = scenario.maybe_fault(true);
    assert_eq!(scope_depth(), 0);
    let _ = scenario.maybe_fault(false);
    assert_eq!(scope_depth(), 0);
}

#[test]
fn test_orchestrate_trigger_precedence() {
    // The language-exception probe is evaluated first, so a set trigger always maps
    // to Caught and the nested shape is only reachable with the first probe clean.
    assert_eq!(orchestrate(true), Orchestration::Caught);
    assert_eq!(orchestrate(false), Orchestration::Clean);
}

/// Regression property: -1 signals an exception escaping containment and must never
/// occur in a correct build.
#[test]
fn test_orchestrate_never_returns_escaped() {
    for trigger in [false, true] {
        let outcome = orchestrate(trigger);
        assert_ne!(outcome, Orchestration::Escaped);
        assert!(matches!(outcome.code(), 0 | 1 | 2));
    }
}

#[test]
fn test_probes_are_reentrant_across_threads() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let scenario = ExceptionScenario::new();
                let trigger = i % 2 == 0;
                assert_eq!(scenario.maybe_panic(trigger), !trigger);
                assert_eq!(orchestrate(false), Orchestration::Clean);
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}
