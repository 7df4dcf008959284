//! Windows fault-delivery backend built on `WriteProcessMemory`.
//!
//! `WriteProcessMemory` against the current process performs the store with the kernel
//! probing the destination first, so an invalid address surfaces as `ERROR_NOACCESS`
//! (or `ERROR_PARTIAL_COPY`) instead of raising an access-violation SEH exception in
//! this thread.

use windows_sys::Win32::Foundation::{GetLastError, ERROR_NOACCESS, ERROR_PARTIAL_COPY};
use windows_sys::Win32::System::Diagnostics::Debug::WriteProcessMemory;
use windows_sys::Win32::System::Threading::GetCurrentProcess;

use super::Fault;

pub(super) fn write_through(address: *mut u8, value: u8) -> Result<(), Fault> {
    let written = unsafe {
        WriteProcessMemory(
            GetCurrentProcess(),
            address.cast(),
            std::ptr::from_ref(&value).cast(),
            1,
            std::ptr::null_mut(),
        )
    };
    if written != 0 {
        return Ok(());
    }

    match unsafe { GetLastError() } {
        ERROR_NOACCESS | ERROR_PARTIAL_COPY => Err(Fault::access_violation(address as usize)),
        code => Err(Fault::os(code as i32)),
    }
}
