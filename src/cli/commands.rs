use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "venv-launcher")]
#[command(
    author,
    version,
    about = "Bootstrap a Python venv, install requirements, and launch the app or its tests",
    long_about = None
)]
pub struct Cli {
    /// Dispatch token: `test` runs the test routine, anything else
    /// (including nothing) launches the application
    pub mode: Option<String>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project root containing the entry points (default: current directory)
    #[arg(long, env = "VENV_LAUNCHER_ROOT")]
    pub root: Option<PathBuf>,
}

/// Which downstream routine the launcher dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    App,
    Test,
}

impl Mode {
    /// Only the literal token `test` selects the test routine; any other
    /// value, an empty string, or no argument at all selects the app.
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            Some("test") => Self::Test,
            _ => Self::App,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_selects_test_routine() {
        assert_eq!(Mode::from_arg(Some("test")), Mode::Test);
    }

    #[test]
    fn absent_argument_selects_app() {
        assert_eq!(Mode::from_arg(None), Mode::App);
    }

    #[test]
    fn other_tokens_select_app() {
        assert_eq!(Mode::from_arg(Some("foo")), Mode::App);
        assert_eq!(Mode::from_arg(Some("")), Mode::App);
        assert_eq!(Mode::from_arg(Some("TEST")), Mode::App);
    }

    #[test]
    fn cli_parses_positional_mode() {
        let cli = Cli::parse_from(["venv-launcher", "test"]);
        assert_eq!(Mode::from_arg(cli.mode.as_deref()), Mode::Test);

        let cli = Cli::parse_from(["venv-launcher"]);
        assert_eq!(Mode::from_arg(cli.mode.as_deref()), Mode::App);
    }
}
