//! Resolution of the layout program against the process search path.

use crate::error::Error;
use std::env;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Find the name of the search-path variable. The conventional name is
/// `PATH`, but the match is case-insensitive because some platforms spell
/// it differently.
fn path_var_name() -> Result<OsString, Error> {
    for (name, _) in env::vars_os() {
        if name.to_string_lossy().eq_ignore_ascii_case("PATH") {
            return Ok(name);
        }
    }
    Err(Error::PathVariableMissing)
}

/// Resolve \p prog against the process search path. \return the first
/// directory entry that holds an executable `prog` or `prog.exe`.
pub fn find_executable(prog: &str) -> Result<PathBuf, Error> {
    let name = path_var_name()?;
    let value = env::var_os(&name).ok_or(Error::PathVariableMissing)?;
    find_executable_in(prog, &value)
}

/// Resolve \p prog against an explicit path-list value.
pub fn find_executable_in(prog: &str, paths: &OsStr) -> Result<PathBuf, Error> {
    for dir in env::split_paths(paths) {
        let file = dir.join(prog);
        if is_executable(&file) {
            return Ok(file);
        }
        let file = dir.join(format!("{}.exe", prog));
        if is_executable(&file) {
            return Ok(file);
        }
    }
    Err(Error::ProgramNotFound(prog.to_string()))
}

/// Return true if \p path is an existing, non-directory, executable file.
fn is_executable(path: &Path) -> bool {
    let meta = match path.metadata() {
        Ok(meta) => meta,
        Err(_) => return false,
    };
    if meta.is_dir() {
        return false;
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        meta.permissions().mode() & 0o111 != 0
    }
    #[cfg(not(unix))]
    {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[cfg(unix)]
    fn make_executable(path: &Path) {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn finds_program_in_one_directory() {
        let empty = tempfile::tempdir().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let prog = dir.path().join("mydot");
        fs::write(&prog, "#!/bin/sh\n").unwrap();
        make_executable(&prog);

        let paths =
            env::join_paths([empty.path(), dir.path()].iter()).unwrap();
        let found = find_executable_in("mydot", &paths).unwrap();
        assert_eq!(found, prog);
    }

    #[cfg(unix)]
    #[test]
    fn falls_back_to_exe_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let prog = dir.path().join("mydot.exe");
        fs::write(&prog, "").unwrap();
        make_executable(&prog);

        let paths = env::join_paths([dir.path()].iter()).unwrap();
        let found = find_executable_in("mydot", &paths).unwrap();
        assert_eq!(found, prog);
    }

    #[cfg(unix)]
    #[test]
    fn rejects_non_executable_files_and_directories() {
        let dir = tempfile::tempdir().unwrap();
        // A plain file without the executable bit.
        fs::write(dir.path().join("plain"), "").unwrap();
        // A directory with the program name.
        fs::create_dir(dir.path().join("dirprog")).unwrap();

        let paths = env::join_paths([dir.path()].iter()).unwrap();
        let err = find_executable_in("plain", &paths).unwrap_err();
        assert!(matches!(err, Error::ProgramNotFound(_)));
        let err = find_executable_in("dirprog", &paths).unwrap_err();
        assert!(matches!(err, Error::ProgramNotFound(_)));
    }

    #[test]
    fn missing_program() {
        let dir = tempfile::tempdir().unwrap();
        let paths = env::join_paths([dir.path()].iter()).unwrap();
        let err = find_executable_in("no-such-program", &paths).unwrap_err();
        assert!(matches!(err, Error::ProgramNotFound(_)));
    }

    #[test]
    fn resolves_against_the_real_environment() {
        // Every environment that runs the tests has a search path, so the
        // lookup must get as far as the not-found error.
        let err = find_executable("dotgen-no-such-program").unwrap_err();
        assert!(matches!(err, Error::ProgramNotFound(_)));
    }
}
