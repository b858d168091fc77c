//! Cron wrapper for a one-shot check program.
//!
//! Each run activates a Python virtual environment, runs the check program in
//! its working directory, appends `[<timestamp>] Exit code: <status>` to an
//! append-only log and hands the status back to cron. The crate keeps the
//! usual split:
//!
//! - **[`core`]**: Pure mapping of process termination to statuses and outcomes.
//! - **[`io`]**: Config, activation overlay, child process, run log.
//!
//! [`run`] strings the two together into the single linear sequence.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod run;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
