//! Interpreter discovery and process execution.
//!
//! - `resolve`: locate a named interpreter on the search path
//! - `PythonRunner`: spawn interpreter subcommands with tracing

mod resolve;
mod runner;

pub use resolve::{resolve, resolve_in};
pub use runner::PythonRunner;
