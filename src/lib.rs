pub mod cli;
pub mod config;
pub mod error;
pub mod interpreter;
pub mod launcher;
pub mod venv;

pub use cli::{Cli, Display, Mode};
pub use config::LauncherConfig;
pub use error::{LauncherError, Result};
pub use interpreter::PythonRunner;
pub use launcher::Bootstrap;
pub use venv::{ProvisionOutcome, Venv};
