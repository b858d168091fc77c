//! Runner configuration, optionally read from a TOML file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

pub const DEFAULT_WORKDIR: &str = "/home/tomfe/workspace/ticket";
pub const DEFAULT_LOG_PATH: &str = "/home/tomfe/workspace/ticket/cron.log";

/// Runner configuration (TOML).
///
/// Every field is optional in the file. With no file and no overrides the
/// runner behaves exactly like the crontab wrapper it replaces.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RunnerConfig {
    /// Directory the check program runs in.
    pub workdir: PathBuf,

    /// Virtual environment to activate. Relative paths resolve against `workdir`.
    pub venv_dir: PathBuf,

    /// Interpreter looked up on the activated `PATH`.
    pub interpreter: String,

    /// Script handed to the interpreter.
    pub program: String,

    pub args: Vec<String>,

    /// Append-only log receiving one line per run.
    pub log_path: PathBuf,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            workdir: PathBuf::from(DEFAULT_WORKDIR),
            venv_dir: PathBuf::from("venv"),
            interpreter: "python".to_string(),
            program: "check_once.py".to_string(),
            args: Vec::new(),
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
        }
    }
}

impl RunnerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.interpreter.trim().is_empty() {
            return Err(anyhow!("interpreter must be non-empty"));
        }
        if self.program.trim().is_empty() {
            return Err(anyhow!("program must be non-empty"));
        }
        if self.log_path.as_os_str().is_empty() {
            return Err(anyhow!("log_path must be non-empty"));
        }
        Ok(())
    }

    /// Apply per-field overrides (from the command line) on top of this config.
    pub fn apply_overrides(mut self, overrides: &ConfigOverrides) -> Result<Self> {
        if let Some(workdir) = &overrides.workdir {
            self.workdir = workdir.clone();
        }
        if let Some(venv_dir) = &overrides.venv_dir {
            self.venv_dir = venv_dir.clone();
        }
        if let Some(interpreter) = &overrides.interpreter {
            self.interpreter = interpreter.clone();
        }
        if let Some(program) = &overrides.program {
            self.program = program.clone();
        }
        if let Some(args) = &overrides.args {
            self.args = args.clone();
        }
        if let Some(log_path) = &overrides.log_path {
            self.log_path = log_path.clone();
        }
        self.validate()?;
        Ok(self)
    }
}

/// Optional replacements for individual config fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub workdir: Option<PathBuf>,
    pub venv_dir: Option<PathBuf>,
    pub interpreter: Option<String>,
    pub program: Option<String>,
    pub args: Option<Vec<String>>,
    pub log_path: Option<PathBuf>,
}

/// Load config from a TOML file named on the command line.
///
/// A missing file is an error; fields missing from the file keep their defaults.
pub fn load_config(path: &Path) -> Result<RunnerConfig> {
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: RunnerConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}
