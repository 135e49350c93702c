//! User interrupt handling
//!
//! Ctrl+C and end of input both end the program with the same farewell line
//! and a success status.

use anyhow::Result;

const FAREWELL_LINE: &str = "\nInterrupted by user. Exiting...\n";

/// Farewell printed when the user interrupts, on its own line after any
/// pending prompt.
pub fn farewell() -> &'static str {
    FAREWELL_LINE
}

/// Register the SIGINT handler.
#[cfg(unix)]
pub fn install() -> Result<()> {
    let previous = unsafe { libc::signal(libc::SIGINT, sigint_handler as libc::sighandler_t) };
    if previous == libc::SIG_ERR {
        anyhow::bail!("Failed to register Ctrl+C handler");
    }
    Ok(())
}

/// Without POSIX signals Ctrl+C keeps its default behaviour.
#[cfg(not(unix))]
pub fn install() -> Result<()> {
    Ok(())
}

// Only async-signal-safe calls here: write(2) and _exit(2).
#[cfg(unix)]
extern "C" fn sigint_handler(_: libc::c_int) {
    let line = FAREWELL_LINE.as_bytes();
    unsafe {
        libc::write(
            libc::STDOUT_FILENO,
            line.as_ptr() as *const libc::c_void,
            line.len(),
        );
        libc::_exit(0);
    }
}
