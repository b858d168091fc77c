//! Exit codes the runner produces itself, when the check program did not.
//!
//! Whenever the check program runs to completion its own status is used
//! verbatim instead. The check program owns 0-3 (sold out, available,
//! config error, unexpected error), so the runner's own codes stay clear of
//! that range: usage and config failures use the `sysexits.h` values, launch
//! failures the 125-127 range shells and `env` use.

/// Command line could not be parsed (`EX_USAGE`).
pub const USAGE: i32 = 64;
/// Config file missing, unreadable or invalid (`EX_CONFIG`).
pub const CONFIG: i32 = 78;
/// The check program could not be launched for a reason other than 126/127.
pub const LAUNCH_FAILED: i32 = 125;
/// The check program exists but could not be executed.
pub const NOT_EXECUTABLE: i32 = 126;
/// The interpreter, program, or working directory could not be found.
pub const NOT_FOUND: i32 = 127;
/// Added to the signal number when the check program is killed by a signal.
pub const SIGNAL_BASE: i32 = 128;
