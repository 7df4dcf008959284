//! Unix fault-delivery backend built on a pipe.
//!
//! `read(2)` stores into a caller-supplied buffer and reports `EFAULT` when that buffer is
//! not writable, so pushing the byte into a pipe and reading it back out to the target
//! address makes the kernel perform the store on our behalf. An invalid destination comes
//! back as an error code instead of a hardware trap.

use super::Fault;

pub(super) fn write_through(address: *mut u8, value: u8) -> Result<(), Fault> {
    let mut fds = [0i32; 2];
    if unsafe { libc::pipe(fds.as_mut_ptr()) } != 0 {
        return Err(Fault::os(last_errno()));
    }

    let pushed = unsafe { libc::write(fds[1], std::ptr::from_ref(&value).cast(), 1) };
    if pushed != 1 {
        let errno = last_errno();
        close_pair(fds);
        return Err(Fault::os(errno));
    }

    let stored = unsafe { libc::read(fds[0], address.cast::<libc::c_void>(), 1) };
    let errno = last_errno();
    close_pair(fds);

    match stored {
        1 => Ok(()),
        _ if errno == libc::EFAULT => Err(Fault::access_violation(address as usize)),
        _ => Err(Fault::os(errno)),
    }
}

fn close_pair(fds: [i32; 2]) {
    unsafe {
        libc::close(fds[0]);
        libc::close(fds[1]);
    }
}

fn last_errno() -> i32 {
    std::io::Error::last_os_error().raw_os_error().unwrap_or(-1)
}
