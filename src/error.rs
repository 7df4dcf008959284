use thiserror::Error;

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// The fixture is deliberately hard to fail: every exception shape it demonstrates is caught
/// inside the operation that raised it. The variants below therefore describe either a broken
/// fixture invariant or a platform problem in the structured-fault backend, never a "normal"
/// outcome of a probe.
///
/// # Error Categories
///
/// ## Fixture Invariant Violations
/// - [`Error::ContainmentBreached`] - a fault escaped every interception scope of a probe
///
/// ## Structured-Fault Backend Errors
/// - [`Error::FaultBackend`] - the kernel-mediated write channel itself failed
/// - [`Error::Unsupported`] - the platform has no trap-and-recover facility
///
/// # Examples
///
/// ```rust
/// use ehprobe::{Error, ExceptionScenario};
///
/// let scenario = ExceptionScenario::new();
/// match scenario.maybe_fault(true) {
///     Ok(false) => println!("fault was raised and intercepted"),
///     Ok(true) => println!("no fault configured"),
///     Err(Error::Unsupported) => eprintln!("platform cannot trap-and-recover"),
///     Err(e) => eprintln!("fixture defect: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// A raised condition escaped every handler scope of the probe that raised it.
    ///
    /// The defining contract of the scenario catalog is that nothing it raises is ever
    /// observable by a caller. A breach means the fixture itself is defective and any
    /// unwind metadata derived from the artifact is suspect; harnesses must treat this
    /// as fatal and never retry.
    ///
    /// # Fields
    ///
    /// * `probe` - Name of the probe whose containment failed
    /// * `detail` - Description of the condition that escaped
    #[error("Containment breached in '{probe}': {detail}")]
    ContainmentBreached {
        /// Name of the probe whose containment failed
        probe: &'static str,
        /// Description of the condition that escaped
        detail: String,
    },

    /// The structured-fault backend failed before any fault could be delivered.
    ///
    /// The deliberate invalid write is routed through a kernel-mediated channel
    /// (see [`crate::fault`]); this variant carries the raw OS error code when
    /// setting up or driving that channel fails for a reason other than the
    /// access violation under test.
    #[error("Structured-fault backend failure (os error {0})")]
    FaultBackend(i32),

    /// This platform has no facility to trap and recover from an invalid memory access.
    ///
    /// The structured-fault scenario cannot be reproduced faithfully here and is
    /// reported as a gap rather than approximated with a language-level exception.
    #[error("Structured faults are not supported on this platform")]
    Unsupported,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every variant of the error surface is constructible and carries the message a
    /// harness would log; no variant exists that the crate cannot actually produce.
    #[test]
    fn test_every_variant_displays_its_condition() {
        let breach = Error::ContainmentBreached {
            probe: "maybe_fault",
            detail: "access violation writing 0x0000000000000000".to_string(),
        };
        assert_eq!(
            breach.to_string(),
            "Containment breached in 'maybe_fault': access violation writing 0x0000000000000000"
        );

        let backend = Error::FaultBackend(9);
        assert_eq!(
            backend.to_string(),
            "Structured-fault backend failure (os error 9)"
        );

        let gap = Error::Unsupported;
        assert_eq!(
            gap.to_string(),
            "Structured faults are not supported on this platform"
        );
    }
}
