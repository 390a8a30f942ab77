//! Command-line interface definitions.
//!
//! - `Cli`: argument definitions via clap
//! - `Mode`: dispatch token mapped from the positional argument
//! - `Display`: formatted terminal output with colors and status

mod commands;
mod display;

pub use commands::{Cli, Mode};
pub use display::Display;
