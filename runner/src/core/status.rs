//! Mapping from child process termination to the integer status the runner
//! logs and exits with.
//!
//! Follows the conventions a POSIX shell uses for `$?` so that cron mail and
//! log readers see the same numbers a plain shell wrapper would produce.

use std::io;

use crate::exit_codes;

/// How the check program terminated, reduced to the facts the status depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The program exited on its own with this code.
    Exited(i32),
    /// The program was killed by this signal number.
    Signaled(i32),
    /// The program could not be started or waited on.
    SpawnFailed(io::ErrorKind),
}

/// Integer status for a termination. Normal exits pass through verbatim.
pub fn status_code(termination: Termination) -> i32 {
    match termination {
        Termination::Exited(code) => code,
        Termination::Signaled(signal) => exit_codes::SIGNAL_BASE + signal,
        Termination::SpawnFailed(io::ErrorKind::NotFound) => exit_codes::NOT_FOUND,
        Termination::SpawnFailed(io::ErrorKind::PermissionDenied) => exit_codes::NOT_EXECUTABLE,
        Termination::SpawnFailed(_) => exit_codes::LAUNCH_FAILED,
    }
}
