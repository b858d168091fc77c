//! Execution context handed to the invocation step.
//!
//! The runner never changes its own working directory or environment. The
//! directory change and activation are captured here and applied to the
//! child `Command` only.

use std::env;
use std::path::{self, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use tracing::warn;

use super::activation::{EnvChange, activate};
use super::config::RunnerConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionContext {
    pub workdir: PathBuf,
    pub env: Vec<EnvChange>,
}

impl ExecutionContext {
    /// Build the context for `config` on top of the runner's inherited `PATH`.
    ///
    /// The child is `chdir`ed before its `PATH` is searched, so the working
    /// directory and venv are made absolute against the runner's own cwd.
    /// Nothing is validated: a missing working directory surfaces later as a
    /// spawn failure, exactly where a failed `cd` would surface in a shell.
    pub fn resolve(config: &RunnerConfig) -> Result<Self> {
        let workdir = path::absolute(&config.workdir)
            .with_context(|| format!("resolve workdir {}", config.workdir.display()))?;
        if !workdir.is_dir() {
            warn!(workdir = %workdir.display(), "working directory missing");
        }
        let venv = workdir.join(&config.venv_dir);
        let env = activate(&venv, env::var_os("PATH"))?;
        Ok(Self { workdir, env })
    }

    /// Apply the working directory and environment overlay to `cmd`.
    pub fn apply(&self, cmd: &mut Command) {
        cmd.current_dir(&self.workdir);
        for change in &self.env {
            match change {
                EnvChange::Set(key, value) => {
                    cmd.env(key, value);
                }
                EnvChange::Remove(key) => {
                    cmd.env_remove(key);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    #[test]
    fn resolve_uses_config_paths() {
        let temp = tempfile::tempdir().expect("tempdir");
        let config = RunnerConfig {
            workdir: temp.path().to_path_buf(),
            ..RunnerConfig::default()
        };

        let ctx = ExecutionContext::resolve(&config).expect("resolve");
        assert_eq!(ctx.workdir, temp.path());
        assert!(ctx.env.contains(&EnvChange::Set(
            "VIRTUAL_ENV".to_string(),
            temp.path().join("venv").into_os_string(),
        )));
    }

    #[test]
    fn relative_paths_become_absolute() {
        let config = RunnerConfig {
            workdir: PathBuf::from("ticket"),
            ..RunnerConfig::default()
        };
        let cwd = env::current_dir().expect("cwd");

        let ctx = ExecutionContext::resolve(&config).expect("resolve");
        assert_eq!(ctx.workdir, cwd.join("ticket"));
        assert!(ctx.env.contains(&EnvChange::Set(
            "VIRTUAL_ENV".to_string(),
            cwd.join("ticket").join("venv").into_os_string(),
        )));
    }

    #[test]
    fn absolute_venv_ignores_workdir() {
        let config = RunnerConfig {
            venv_dir: PathBuf::from("/opt/venv"),
            ..RunnerConfig::default()
        };

        let ctx = ExecutionContext::resolve(&config).expect("resolve");
        assert!(ctx.env.contains(&EnvChange::Set(
            "VIRTUAL_ENV".to_string(),
            "/opt/venv".into(),
        )));
    }

    #[test]
    fn apply_sets_dir_and_env_on_command() {
        let ctx = ExecutionContext {
            workdir: PathBuf::from("/srv/app"),
            env: vec![
                EnvChange::Set("VIRTUAL_ENV".to_string(), "/srv/app/venv".into()),
                EnvChange::Remove("PYTHONHOME".to_string()),
            ],
        };
        let mut cmd = Command::new("python");
        ctx.apply(&mut cmd);

        assert_eq!(cmd.get_current_dir(), Some(std::path::Path::new("/srv/app")));
        let envs: Vec<(&OsStr, Option<&OsStr>)> = cmd.get_envs().collect();
        assert!(envs.contains(&(OsStr::new("VIRTUAL_ENV"), Some(OsStr::new("/srv/app/venv")))));
        assert!(envs.contains(&(OsStr::new("PYTHONHOME"), None)));
    }
}
