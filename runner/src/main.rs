//! Cron entry point: run the check program once and exit with its status.
//!
//! Without flags every path takes the built-in default, so a crontab line
//! needs nothing but the binary.

use std::path::PathBuf;

use anyhow::Result;
use check_runner::exit_codes;
use check_runner::io::config::{ConfigOverrides, RunnerConfig, load_config};
use check_runner::logging;
use check_runner::run::run;
use clap::Parser;
use tracing::warn;

#[derive(Parser)]
#[command(
    name = "check-runner",
    version,
    about = "Run the ticket check once and log its exit code"
)]
struct Cli {
    /// TOML file with config fields; missing fields keep their defaults.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory the check program runs in.
    #[arg(long, value_name = "DIR")]
    workdir: Option<PathBuf>,

    /// Virtual environment to activate (relative to the working directory).
    #[arg(long = "venv", value_name = "DIR")]
    venv_dir: Option<PathBuf>,

    /// Interpreter looked up on the activated PATH.
    #[arg(long)]
    interpreter: Option<String>,

    /// Script passed to the interpreter.
    #[arg(long)]
    program: Option<String>,

    /// Log file receiving one line per run.
    #[arg(long = "log-file", value_name = "PATH")]
    log_path: Option<PathBuf>,

    /// Arguments passed to the script.
    #[arg(last = true)]
    args: Vec<String>,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            workdir: self.workdir.clone(),
            venv_dir: self.venv_dir.clone(),
            interpreter: self.interpreter.clone(),
            program: self.program.clone(),
            args: (!self.args.is_empty()).then(|| self.args.clone()),
            log_path: self.log_path.clone(),
        }
    }
}

fn main() {
    logging::init();
    let code = match try_main() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            exit_codes::CONFIG
        }
    };
    std::process::exit(code);
}

fn try_main() -> Result<i32> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() {
                exit_codes::USAGE
            } else {
                0
            };
            if let Err(print_err) = err.print() {
                warn!(err = %print_err, "failed to print usage");
            }
            return Ok(code);
        }
    };
    let config = resolve_config(&cli)?;
    Ok(run(&config).exit_code)
}

fn resolve_config(cli: &Cli) -> Result<RunnerConfig> {
    let base = match &cli.config {
        Some(path) => load_config(path)?,
        None => RunnerConfig::default(),
    };
    base.apply_overrides(&cli.overrides())
}
