use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LauncherError {
    #[error("python3 not found. Please install Python 3 and make sure it is on your PATH.")]
    InterpreterNotFound,

    #[error("Failed to create virtual environment at {path}: {message}")]
    VenvCreation { path: PathBuf, message: String },

    #[error("Virtual environment at {0} is missing its interpreter; delete it and re-run")]
    VenvBroken(PathBuf),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl LauncherError {
    /// Exit status for main when this error terminates the run. The
    /// missing-interpreter case is contractually exit code 1; every other
    /// launcher-side failure shares it, since the only other observable
    /// codes are the ones propagated from the dispatched child.
    pub fn exit_code(&self) -> u8 {
        1
    }
}

pub type Result<T> = std::result::Result<T, LauncherError>;
