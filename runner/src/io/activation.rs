//! Virtual environment activation as an environment overlay.
//!
//! Produces the same variable changes `source venv/bin/activate` makes, but
//! as data applied to the child command only.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

/// One change to the inherited environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvChange {
    Set(String, OsString),
    Remove(String),
}

/// Overlay for activating the virtual environment at `venv`.
///
/// `inherited_path` is the `PATH` the runner itself was started with; the
/// venv's `bin/` is put in front of it. A missing activation script is only
/// reported, matching a shell that carries on after a failed `source`.
pub fn activate(venv: &Path, inherited_path: Option<OsString>) -> Result<Vec<EnvChange>> {
    let bin_dir = venv.join("bin");
    let activate_script = bin_dir.join("activate");
    if !activate_script.is_file() {
        warn!(
            script = %activate_script.display(),
            "activation script missing, continuing with inherited environment"
        );
    }

    let mut entries: Vec<PathBuf> = vec![bin_dir];
    if let Some(path) = inherited_path {
        entries.extend(env::split_paths(&path));
    }
    let path = env::join_paths(entries).context("join PATH entries")?;
    debug!(venv = %venv.display(), "activating virtual environment");

    Ok(vec![
        EnvChange::Set("VIRTUAL_ENV".to_string(), venv.as_os_str().to_os_string()),
        EnvChange::Set("PATH".to_string(), path),
        EnvChange::Remove("PYTHONHOME".to_string()),
    ])
}
