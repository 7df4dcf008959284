//! Stub backend for platforms with no kernel-mediated write channel.
//!
//! The structured-fault scenario cannot be reproduced faithfully here; the gap is
//! reported as [`super::FaultKind::Unsupported`] rather than approximated with a panic.

use super::Fault;

pub(super) fn write_through(_address: *mut u8, _value: u8) -> Result<(), Fault> {
    Err(Fault::unsupported())
}
