//! The bootstrap procedure itself.
//!
//! One sequential pass: grant helper-script permissions, check for the
//! interpreter, provision the venv if absent, install requirements, then
//! dispatch to the app or the test routine. The dispatched child's exit
//! status becomes the launcher's.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use tracing::{debug, info};

use crate::cli::{Display, Mode};
use crate::config::LauncherConfig;
use crate::error::{LauncherError, Result};
use crate::interpreter::{self, PythonRunner};
use crate::venv::{ProvisionOutcome, Venv};

pub struct Bootstrap {
    root: PathBuf,
    config: LauncherConfig,
    display: Display,
}

impl Bootstrap {
    pub async fn load(root: PathBuf) -> Result<Self> {
        let config = LauncherConfig::load(&root).await?;
        Ok(Self {
            root,
            config,
            display: Display::new(),
        })
    }

    pub fn with_config(root: PathBuf, config: LauncherConfig) -> Self {
        Self {
            root,
            config,
            display: Display::new(),
        }
    }

    /// Run the whole bootstrap sequence and return the dispatched child's
    /// exit status.
    pub async fn run(&self, mode: Mode) -> Result<ExitStatus> {
        self.grant_exec_permissions();

        let python = self.resolve_interpreter()?;
        self.provision(&python).await?;

        let venv = self.venv();
        let venv_python = venv.runner(&self.root)?;

        self.install_requirements(&venv_python).await?;
        self.dispatch(&venv_python, mode).await
    }

    fn venv(&self) -> Venv {
        Venv::new(&self.root, &self.config.venv_dir)
    }

    /// Step 1: mark the helper scripts executable. Missing files and
    /// permission errors are logged and skipped; the original script never
    /// checked this step either.
    fn grant_exec_permissions(&self) {
        for script in &self.config.exec_grants {
            let path = self.root.join(script);
            if let Err(e) = make_executable(&path) {
                debug!(path = %path.display(), error = %e, "Skipping execute grant");
            }
        }
    }

    /// Step 2: the only explicitly checked prerequisite.
    fn resolve_interpreter(&self) -> Result<PythonRunner> {
        let program = interpreter::resolve(&self.config.interpreter)
            .ok_or(LauncherError::InterpreterNotFound)?;
        debug!(program = %program.display(), "Resolved interpreter");
        Ok(PythonRunner::new(program, &self.root))
    }

    /// Step 3: idempotent venv provisioning, with status messages only
    /// when something is actually created.
    async fn provision(&self, python: &PythonRunner) -> Result<()> {
        let venv = self.venv();
        let spinner = if venv.exists() {
            None
        } else {
            self.display.print_info("Creating virtual environment...");
            Some(self.display.create_spinner("Provisioning venv"))
        };

        let outcome = venv.ensure(python).await;
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }

        match outcome? {
            ProvisionOutcome::Created => {
                self.display.print_success("Virtual environment created.");
            }
            ProvisionOutcome::AlreadyPresent => {}
        }
        Ok(())
    }

    /// Step 5: pip runs against the manifest on every invocation, even when
    /// the venv pre-existed. A failed install is reported but does not stop
    /// the dispatch; the app surfaces its own import errors.
    async fn install_requirements(&self, venv_python: &PythonRunner) -> Result<()> {
        self.display.print_info("Installing dependencies...");

        let args: Vec<&OsStr> = vec![
            OsStr::new("-m"),
            OsStr::new("pip"),
            OsStr::new("install"),
            OsStr::new("-r"),
            self.config.requirements.as_os_str(),
        ];
        let status = venv_python.run_interactive(&args).await?;

        if !status.success() {
            self.display
                .print_warning("Dependency installation failed; continuing anyway.");
        }
        Ok(())
    }

    /// Step 6: the dispatched entry point inherits stdio and its exit
    /// status propagates as the launcher's own.
    async fn dispatch(&self, venv_python: &PythonRunner, mode: Mode) -> Result<ExitStatus> {
        let entry = match mode {
            Mode::Test => {
                self.display.print_info("Running tests...");
                &self.config.test_entry
            }
            Mode::App => {
                self.display.print_info("Starting application...");
                &self.config.app_entry
            }
        };

        info!(entry = %entry.display(), "Dispatching");
        venv_python.run_interactive(&[entry.as_os_str()]).await
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> std::io::Result<()> {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path)?;
    let mut permissions = metadata.permissions();
    permissions.set_mode(permissions.mode() | 0o111);
    fs::set_permissions(path, permissions)
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    #[test]
    fn make_executable_sets_all_execute_bits() {
        let dir = TempDir::new().unwrap();
        let script = dir.path().join("start.sh");
        std::fs::write(&script, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o644)).unwrap();

        make_executable(&script).unwrap();

        let mode = std::fs::metadata(&script).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn make_executable_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let script = dir.path().join("start.sh");
        std::fs::write(&script, "#!/bin/sh\n").unwrap();

        make_executable(&script).unwrap();
        let first = std::fs::metadata(&script).unwrap().permissions().mode();
        make_executable(&script).unwrap();
        let second = std::fs::metadata(&script).unwrap().permissions().mode();

        assert_eq!(first, second);
        assert_ne!(first & 0o111, 0);
    }

    #[test]
    fn make_executable_reports_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = make_executable(&dir.path().join("absent.sh"));
        assert!(result.is_err());
    }

    #[test]
    fn grant_exec_permissions_skips_missing_files() {
        let dir = TempDir::new().unwrap();
        let script = dir.path().join("start.sh");
        std::fs::write(&script, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o644)).unwrap();

        let bootstrap =
            Bootstrap::with_config(dir.path().to_path_buf(), LauncherConfig::default());
        // run_tests.sh does not exist; the grant must not panic or fail.
        bootstrap.grant_exec_permissions();

        let mode = std::fs::metadata(&script).unwrap().permissions().mode();
        assert_ne!(mode & 0o111, 0);
    }
}
