//! Launcher configuration.
//!
//! Every path the original bootstrap hardcodes is configurable here so a
//! deployment can rename its venv directory, manifest, or entry points
//! without rebuilding. `launcher.toml` in the project root overrides the
//! defaults; a missing file is not an error.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::error::{LauncherError, Result};

pub const CONFIG_FILE: &str = "launcher.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherConfig {
    /// Directory whose presence marks the environment as provisioned.
    pub venv_dir: PathBuf,

    /// Requirements manifest handed to pip on every run.
    pub requirements: PathBuf,

    /// Main application entry point.
    pub app_entry: PathBuf,

    /// Test routine entry point.
    pub test_entry: PathBuf,

    /// Interpreter command resolved against PATH to provision the venv.
    pub interpreter: String,

    /// Helper scripts granted execute permission at startup. Missing
    /// entries are skipped without error.
    pub exec_grants: Vec<PathBuf>,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            venv_dir: PathBuf::from("venv"),
            requirements: PathBuf::from("requirements.txt"),
            app_entry: PathBuf::from("app.py"),
            test_entry: PathBuf::from("test_services.py"),
            interpreter: "python3".to_string(),
            exec_grants: vec![PathBuf::from("start.sh"), PathBuf::from("run_tests.sh")],
        }
    }
}

impl LauncherConfig {
    /// Load configuration from `launcher.toml` under `root`, falling back
    /// to defaults when the file does not exist.
    pub async fn load(root: &Path) -> Result<Self> {
        let config_path = root.join(CONFIG_FILE);
        let config = if config_path.exists() {
            let content = fs::read_to_string(&config_path).await?;
            toml::from_str(&content)?
        } else {
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if self.interpreter.is_empty() {
            errors.push("interpreter must not be empty");
        }
        if self.venv_dir.as_os_str().is_empty() {
            errors.push("venv_dir must not be empty");
        }
        if self.requirements.as_os_str().is_empty() {
            errors.push("requirements must not be empty");
        }
        if self.app_entry.as_os_str().is_empty() {
            errors.push("app_entry must not be empty");
        }
        if self.test_entry.as_os_str().is_empty() {
            errors.push("test_entry must not be empty");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(LauncherError::Config(errors.join("; ")))
        }
    }
}
