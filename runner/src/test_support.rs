//! Test-only helpers: scratch working directories and scripted invokers.

use std::cell::RefCell;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::core::status::Termination;
use crate::io::config::RunnerConfig;
use crate::io::context::ExecutionContext;
use crate::io::process::{CheckCommand, CheckInvoker};

/// Interpreter placed in the fake venv: hands the "script" to `sh`.
const FAKE_PYTHON: &str = "#!/bin/sh\nexec /bin/sh \"$@\"\n";

/// A temporary working directory laid out like the real one:
/// `venv/bin/activate`, `venv/bin/python`, `check_once.py`, `cron.log`.
pub struct TestSite {
    temp: TempDir,
}

impl TestSite {
    pub fn new() -> Result<Self> {
        let temp = tempfile::tempdir().context("create tempdir")?;
        let bin = temp.path().join("venv").join("bin");
        fs::create_dir_all(&bin).with_context(|| format!("create {}", bin.display()))?;
        fs::write(bin.join("activate"), "# activate\n").context("write activate")?;
        write_executable(&bin.join("python"), FAKE_PYTHON)?;
        let site = Self { temp };
        site.write_check_script("exit 0\n")?;
        Ok(site)
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    pub fn log_path(&self) -> PathBuf {
        self.path().join("cron.log")
    }

    /// Config pointing every path into this site.
    pub fn config(&self) -> RunnerConfig {
        RunnerConfig {
            workdir: self.path().to_path_buf(),
            log_path: self.log_path(),
            ..RunnerConfig::default()
        }
    }

    /// Replace `check_once.py` with a shell script body (run by the fake interpreter).
    pub fn write_check_script(&self, body: &str) -> Result<()> {
        let path = self.path().join("check_once.py");
        fs::write(&path, body).with_context(|| format!("write {}", path.display()))
    }

    /// Non-empty lines of the run log, without trailing newlines.
    pub fn log_lines(&self) -> Result<Vec<String>> {
        let path = self.log_path();
        let contents =
            fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
        Ok(contents.lines().map(str::to_string).collect())
    }
}

fn write_executable(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("write {}", path.display()))?;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .with_context(|| format!("chmod {}", path.display()))
}

/// Invoker returning a fixed termination and recording what it was asked to run.
pub struct FixedInvoker {
    termination: Termination,
    last_call: RefCell<Option<(ExecutionContext, CheckCommand)>>,
}

impl FixedInvoker {
    pub fn new(termination: Termination) -> Self {
        Self {
            termination,
            last_call: RefCell::new(None),
        }
    }

    pub fn exited(code: i32) -> Self {
        Self::new(Termination::Exited(code))
    }

    pub fn last_call(&self) -> Option<(ExecutionContext, CheckCommand)> {
        self.last_call.borrow().clone()
    }
}

impl CheckInvoker for FixedInvoker {
    fn invoke(&self, ctx: &ExecutionContext, command: &CheckCommand) -> Termination {
        self.last_call.replace(Some((ctx.clone(), command.clone())));
        self.termination
    }
}
