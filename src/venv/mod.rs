//! Virtual-environment provisioning and activation.
//!
//! The environment marker is the venv directory itself: present means
//! provisioned, absent means a `python -m venv` run is due. Activation is
//! expressed natively as the environment-variable set a POSIX activate
//! script would export (`VIRTUAL_ENV`, the venv bin dir prepended to
//! `PATH`, `PYTHONHOME` unset), applied to every child process.

use std::env;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{LauncherError, Result};
use crate::interpreter::PythonRunner;

/// Outcome of the provisioning step, so the caller can report whether
/// anything actually happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionOutcome {
    Created,
    AlreadyPresent,
}

pub struct Venv {
    dir: PathBuf,
}

impl Venv {
    /// `dir` is the venv directory, resolved against the project root.
    pub fn new(root: &Path, dir: &Path) -> Self {
        Self {
            dir: root.join(dir),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn exists(&self) -> bool {
        self.dir.is_dir()
    }

    /// Create the environment if the marker directory is absent. Re-running
    /// against an existing environment is a no-op.
    pub async fn ensure(&self, python: &PythonRunner) -> Result<ProvisionOutcome> {
        if self.exists() {
            debug!(dir = %self.dir.display(), "Virtual environment already provisioned");
            return Ok(ProvisionOutcome::AlreadyPresent);
        }

        let dir_str = self
            .dir
            .to_str()
            .ok_or_else(|| LauncherError::Config("Invalid venv path encoding".into()))?;

        let output = python.run(&["-m", "venv", dir_str]).await?;
        if !output.status.success() {
            return Err(LauncherError::VenvCreation {
                path: self.dir.clone(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(ProvisionOutcome::Created)
    }

    #[cfg(windows)]
    pub fn bin_dir(&self) -> PathBuf {
        self.dir.join("Scripts")
    }

    #[cfg(not(windows))]
    pub fn bin_dir(&self) -> PathBuf {
        self.dir.join("bin")
    }

    #[cfg(windows)]
    pub fn python_path(&self) -> PathBuf {
        self.bin_dir().join("python.exe")
    }

    #[cfg(not(windows))]
    pub fn python_path(&self) -> PathBuf {
        self.bin_dir().join("python")
    }

    /// The PATH value an activated shell would see: the venv bin directory
    /// ahead of the existing entries.
    pub fn activation_path(&self, current: Option<&OsStr>) -> OsString {
        let existing = current
            .map(|p| env::split_paths(p).collect::<Vec<_>>())
            .unwrap_or_default();

        let entries = std::iter::once(self.bin_dir()).chain(existing);
        env::join_paths(entries).unwrap_or_else(|_| self.bin_dir().into_os_string())
    }

    /// A runner for the venv's own interpreter with activation applied,
    /// failing if provisioning never produced one.
    pub fn runner(&self, working_dir: &Path) -> Result<PythonRunner> {
        let python = self.python_path();
        if !python.is_file() {
            return Err(LauncherError::VenvBroken(self.dir.clone()));
        }

        let path_value = self.activation_path(env::var_os("PATH").as_deref());
        Ok(PythonRunner::new(python, working_dir)
            .env("VIRTUAL_ENV", self.dir.as_os_str())
            .env("PATH", path_value)
            .env_remove("PYTHONHOME"))
    }
}
