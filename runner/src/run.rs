//! One scheduled run: invoke the check program, log its status, return it.
//!
//! The sequence is strictly linear. Nothing here branches on the status; a
//! failing step only shows up in the status that gets logged and returned.

use std::path::Path;

use chrono::Local;
use tracing::{error, info};

use crate::core::outcome::classify_outcome;
use crate::core::status::status_code;
use crate::exit_codes;
use crate::io::config::RunnerConfig;
use crate::io::context::ExecutionContext;
use crate::io::cron_log::{append_line, format_line};
use crate::io::process::{CheckCommand, CheckInvoker, ProcessInvoker};

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Status of the check program; also the runner's own exit code.
    pub exit_code: i32,
    /// Line written (or attempted) to the run log.
    pub log_line: String,
    /// Whether the line reached the log.
    pub logged: bool,
}

/// Run the check program as configured, with a real child process.
pub fn run(config: &RunnerConfig) -> RunReport {
    run_with(config, &ProcessInvoker)
}

pub fn run_with<I: CheckInvoker>(config: &RunnerConfig, invoker: &I) -> RunReport {
    let exit_code = match ExecutionContext::resolve(config) {
        Ok(ctx) => status_code(invoker.invoke(&ctx, &CheckCommand::from_config(config))),
        Err(err) => {
            error!(err = %format!("{err:#}"), "failed to build execution context");
            exit_codes::LAUNCH_FAILED
        }
    };
    info!(exit_code, outcome = %classify_outcome(exit_code), "check finished");

    let log_line = format_line(&Local::now(), exit_code);
    let logged = write_log(&config.log_path, &log_line);
    RunReport {
        exit_code,
        log_line,
        logged,
    }
}

fn write_log(path: &Path, line: &str) -> bool {
    match append_line(path, line) {
        Ok(()) => true,
        Err(err) => {
            error!(err = %format!("{err:#}"), "failed to append run log");
            false
        }
    }
}
