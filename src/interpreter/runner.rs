use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Output, Stdio};

use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::Result;

/// Wrapper around a concrete interpreter binary. All venv provisioning,
/// dependency installation, and entry-point dispatch go through here so
/// every invocation gets the same working directory and environment.
pub struct PythonRunner {
    program: PathBuf,
    working_dir: PathBuf,
    env_set: Vec<(OsString, OsString)>,
    env_removed: Vec<OsString>,
}

impl PythonRunner {
    pub fn new(program: impl Into<PathBuf>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            working_dir: working_dir.into(),
            env_set: Vec::new(),
            env_removed: Vec::new(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Set an environment variable on every subsequent invocation.
    pub fn env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.env_set.push((key.into(), value.into()));
        self
    }

    /// Strip an environment variable from every subsequent invocation.
    pub fn env_remove(mut self, key: impl Into<OsString>) -> Self {
        self.env_removed.push(key.into());
        self
    }

    fn command(&self, args: &[&OsStr]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(args).current_dir(&self.working_dir);
        for (key, value) in &self.env_set {
            cmd.env(key, value);
        }
        for key in &self.env_removed {
            cmd.env_remove(key);
        }
        cmd
    }

    /// Run to completion with captured output. Non-zero exits are logged
    /// but left to the caller to interpret.
    pub async fn run(&self, args: &[&str]) -> Result<Output> {
        debug!(
            program = %self.program.display(),
            args = ?args,
            dir = %self.working_dir.display(),
            "Running interpreter command"
        );

        let os_args: Vec<&OsStr> = args.iter().map(OsStr::new).collect();
        let output = self.command(&os_args).output().await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(args = ?args, stderr = %stderr, "Interpreter command failed");
        }

        Ok(output)
    }

    /// Run with stdio inherited from the launcher, so the child's output
    /// streams straight to the operator's terminal. Used for dispatch.
    pub async fn run_interactive(&self, args: &[&OsStr]) -> Result<ExitStatus> {
        debug!(
            program = %self.program.display(),
            args = ?args,
            "Dispatching to interpreter"
        );

        let status = self
            .command(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await?;

        Ok(status)
    }
}
