//! Debug logging for medical-service
//!
//! Silent unless `MEDICAL_SERVICE_LOG` is set. Messages go to stderr so they
//! never interleave with report output on stdout.

/// Environment variable that switches debug logging on.
pub const LOG_ENV_VAR: &str = "MEDICAL_SERVICE_LOG";

/// Whether debug logging is enabled for this process.
pub fn enabled() -> bool {
    std::env::var_os(LOG_ENV_VAR).is_some()
}

/// Write a debug line tagged with the calling scope.
pub fn log_debug(scope: &str, msg: &str) {
    if enabled() {
        eprintln!("[DEBUG {}] {}", scope, msg);
    }
}
