use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Locate `command` on the process search path. Returns the first matching
/// executable, or None when the interpreter is not installed.
pub fn resolve(command: &str) -> Option<PathBuf> {
    let path_var = env::var_os("PATH")?;
    resolve_in(command, &path_var)
}

/// Same lookup against an explicit PATH value.
pub fn resolve_in(command: &str, path_var: &OsStr) -> Option<PathBuf> {
    env::split_paths(path_var)
        .filter(|dir| !dir.as_os_str().is_empty())
        .flat_map(|dir| candidate_names(command).map(move |name| dir.join(name)))
        .find(|candidate| is_executable(candidate))
}

#[cfg(windows)]
fn candidate_names(command: &str) -> impl Iterator<Item = String> + '_ {
    [format!("{command}.exe"), command.to_string()].into_iter()
}

#[cfg(not(windows))]
fn candidate_names(command: &str) -> impl Iterator<Item = String> + '_ {
    std::iter::once(command.to_string())
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[cfg(unix)]
    fn install_stub(dir: &Path, name: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join(name);
        std::fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[test]
    fn finds_executable_on_path() {
        let dir = TempDir::new().unwrap();
        let stub = install_stub(dir.path(), "python3");

        let path_var = env::join_paths([dir.path()]).unwrap();
        assert_eq!(resolve_in("python3", &path_var), Some(stub));
    }

    #[cfg(unix)]
    #[test]
    fn first_path_entry_wins() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        let expected = install_stub(first.path(), "python3");
        install_stub(second.path(), "python3");

        let path_var = env::join_paths([first.path(), second.path()]).unwrap();
        assert_eq!(resolve_in("python3", &path_var), Some(expected));
    }

    #[cfg(unix)]
    #[test]
    fn non_executable_file_is_skipped() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("python3"), "not a program").unwrap();

        let path_var = env::join_paths([dir.path()]).unwrap();
        assert_eq!(resolve_in("python3", &path_var), None);
    }

    #[test]
    fn empty_path_resolves_nothing() {
        assert_eq!(resolve_in("python3", OsStr::new("")), None);
    }

    #[test]
    fn missing_interpreter_resolves_nothing() {
        let dir = TempDir::new().unwrap();
        let path_var = env::join_paths([dir.path()]).unwrap();
        assert_eq!(resolve_in("definitely-not-python", &path_var), None);
    }
}
