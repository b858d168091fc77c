//! Spawning the check program and waiting for it to finish.

use std::os::unix::process::ExitStatusExt;
use std::process::{Command, ExitStatus, Stdio};

use tracing::{debug, error, instrument};

use super::config::RunnerConfig;
use super::context::ExecutionContext;
use crate::core::status::Termination;

/// Program and arguments to run inside an `ExecutionContext`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl CheckCommand {
    /// `<interpreter> <program> <args...>` as configured.
    pub fn from_config(config: &RunnerConfig) -> Self {
        let mut args = Vec::with_capacity(config.args.len() + 1);
        args.push(config.program.clone());
        args.extend(config.args.iter().cloned());
        Self {
            program: config.interpreter.clone(),
            args,
        }
    }
}

/// Runs the check program to completion.
pub trait CheckInvoker {
    fn invoke(&self, ctx: &ExecutionContext, command: &CheckCommand) -> Termination;
}

/// Invoker backed by a real child process.
///
/// stdin, stdout and stderr are inherited so the check program's own output
/// reaches cron untouched. There is no timeout.
pub struct ProcessInvoker;

impl CheckInvoker for ProcessInvoker {
    #[instrument(skip_all, fields(program = %command.program, workdir = %ctx.workdir.display()))]
    fn invoke(&self, ctx: &ExecutionContext, command: &CheckCommand) -> Termination {
        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        ctx.apply(&mut cmd);

        debug!("spawning check program");
        let mut child = match cmd.spawn() {
            Ok(c) => c,
            Err(e) => {
                error!(err = %e, "failed to spawn check program");
                return Termination::SpawnFailed(e.kind());
            }
        };

        match child.wait() {
            Ok(status) => {
                let termination = termination_of(status);
                debug!(?termination, "check program finished");
                termination
            }
            Err(e) => {
                error!(err = %e, "failed to wait for check program");
                Termination::SpawnFailed(e.kind())
            }
        }
    }
}

fn termination_of(status: ExitStatus) -> Termination {
    match (status.code(), status.signal()) {
        (Some(code), _) => Termination::Exited(code),
        (None, Some(signal)) => Termination::Signaled(signal),
        (None, None) => Termination::SpawnFailed(std::io::ErrorKind::Other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    impl CheckCommand {
        fn new(program: &str) -> Self {
            Self {
                program: program.to_string(),
                args: Vec::new(),
            }
        }

        fn arg(mut self, arg: &str) -> Self {
            self.args.push(arg.to_string());
            self
        }
    }

    fn ctx_in(workdir: PathBuf) -> ExecutionContext {
        ExecutionContext {
            workdir,
            env: Vec::new(),
        }
    }

    #[test]
    fn command_from_config_runs_program_through_interpreter() {
        let config = RunnerConfig {
            args: vec!["--verbose".to_string()],
            ..RunnerConfig::default()
        };
        let command = CheckCommand::from_config(&config);
        assert_eq!(command.program, "python");
        assert_eq!(command.args, vec!["check_once.py", "--verbose"]);
    }

    #[test]
    fn exit_code_is_captured() {
        let temp = tempfile::tempdir().expect("tempdir");
        let command = CheckCommand::new("sh").arg("-c").arg("exit 3");
        let termination = ProcessInvoker.invoke(&ctx_in(temp.path().to_path_buf()), &command);
        assert_eq!(termination, Termination::Exited(3));
    }

    #[test]
    fn runs_in_context_workdir() {
        let temp = tempfile::tempdir().expect("tempdir");
        std::fs::write(temp.path().join("marker"), "").expect("write marker");
        let command = CheckCommand::new("sh").arg("-c").arg("test -f marker");
        let termination = ProcessInvoker.invoke(&ctx_in(temp.path().to_path_buf()), &command);
        assert_eq!(termination, Termination::Exited(0));
    }

    #[test]
    fn signal_is_reported() {
        let temp = tempfile::tempdir().expect("tempdir");
        let command = CheckCommand::new("sh").arg("-c").arg("kill -9 $$");
        let termination = ProcessInvoker.invoke(&ctx_in(temp.path().to_path_buf()), &command);
        assert_eq!(termination, Termination::Signaled(9));
    }

    #[test]
    fn missing_program_fails_to_spawn() {
        let temp = tempfile::tempdir().expect("tempdir");
        let command = CheckCommand::new("check-runner-no-such-program");
        let termination = ProcessInvoker.invoke(&ctx_in(temp.path().to_path_buf()), &command);
        assert_eq!(termination, Termination::SpawnFailed(io::ErrorKind::NotFound));
    }

    #[test]
    fn missing_workdir_fails_to_spawn() {
        let temp = tempfile::tempdir().expect("tempdir");
        let command = CheckCommand::new("sh").arg("-c").arg("exit 0");
        let termination = ProcessInvoker.invoke(&ctx_in(temp.path().join("gone")), &command);
        assert_eq!(termination, Termination::SpawnFailed(io::ErrorKind::NotFound));
    }
}
