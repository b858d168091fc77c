//! Side-effecting operations: config files, the child process, the run log.

pub mod activation;
pub mod config;
pub mod context;
pub mod cron_log;
pub mod process;
