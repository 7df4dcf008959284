//! Descriptor table for the artifact's exported probe catalog.
//!
//! An analysis harness resolves the probes by exact name from the export table; this
//! module is the crate-side statement of that contract, enumerable without loading the
//! artifact. Each entry pairs an export name with its operand shape and says whether
//! the probe's body carries handler scopes, which is what the consuming tool
//! cross-references against the artifact's exception and unwind metadata.

use strum::{Display, EnumCount, EnumIter};

/// Operand shape of an exported probe.
///
/// Signatures are kept distinct enough that a caller binding symbols by name can
/// unambiguously attach a calling convention to each probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumCount, EnumIter)]
pub enum ProbeSignature {
    /// `() -> void`
    NoArgs,
    /// `() -> i32`
    Code,
    /// `(i32) -> i32`
    TriggerToCode,
    /// `(i64, i64) -> i64`
    IntPair,
    /// `(f64, f64) -> f64`
    FloatPair,
    /// `(*mut c_void) -> *mut c_void`
    Pointer,
}

/// One entry of the exported probe catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeDescriptor {
    /// Exact export-table name of the probe.
    pub name: &'static str,
    /// Operand shape of the probe.
    pub signature: ProbeSignature,
    /// Whether the probe's body contains handler scopes, and hence whether the
    /// artifact's exception/unwind tables must carry entries for its address range.
    pub unwinds: bool,
}

/// The full exported probe catalog, in a fixed order.
pub const EXPORTS: &[ProbeDescriptor] = &[
    ProbeDescriptor {
        name: "ehprobe_loop_sum",
        signature: ProbeSignature::NoArgs,
        unwinds: false,
    },
    ProbeDescriptor {
        name: "ehprobe_loop_product",
        signature: ProbeSignature::NoArgs,
        unwinds: false,
    },
    ProbeDescriptor {
        name: "ehprobe_exceptions",
        signature: ProbeSignature::Code,
        unwinds: true,
    },
    ProbeDescriptor {
        name: "ehprobe_exceptions_with",
        signature: ProbeSignature::TriggerToCode,
        unwinds: true,
    },
    ProbeDescriptor {
        name: "ehprobe_structured_fault",
        signature: ProbeSignature::TriggerToCode,
        unwinds: true,
    },
    ProbeDescriptor {
        name: "ehprobe_int_pair",
        signature: ProbeSignature::IntPair,
        unwinds: false,
    },
    ProbeDescriptor {
        name: "ehprobe_float_pair",
        signature: ProbeSignature::FloatPair,
        unwinds: false,
    },
    ProbeDescriptor {
        name: "ehprobe_pointer_identity",
        signature: ProbeSignature::Pointer,
        unwinds: false,
    },
];

/// Look up a catalog entry by its exact export name.
pub fn find(name: &str) -> Option<&'static ProbeDescriptor> {
    EXPORTS.iter().find(|probe| probe.name == name)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_export_names_are_unique() {
        let names: HashSet<&str> = EXPORTS.iter().map(|probe| probe.name).collect();
        assert_eq!(names.len(), EXPORTS.len());
    }

    #[test]
    fn test_every_signature_shape_is_exported() {
        assert_eq!(ProbeSignature::COUNT, 6);
        for signature in ProbeSignature::iter() {
            assert!(
                EXPORTS.iter().any(|probe| probe.signature == signature),
                "no export with signature {signature}"
            );
        }
    }

    #[test]
    fn test_find_resolves_exact_names_only() {
        assert!(find("ehprobe_exceptions").is_some());
        assert!(find("ehprobe_exception").is_none());
        assert!(find("").is_none());
    }

    #[test]
    fn test_unwinding_probes_are_the_exception_bearing_ones() {
        for probe in EXPORTS {
            let exercises_eh = probe.name.contains("exceptions") || probe.name.contains("fault");
            assert_eq!(probe.unwinds, exercises_eh, "{}", probe.name);
        }
    }
}
