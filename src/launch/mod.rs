//! Starts the owning IDE for a chosen project.
//!
//! Launching is fire-and-forget: the IDE is spawned as a detached child with
//! the project path as its only argument, and the child is never waited on
//! or monitored. A quick-launcher hands off and gets out of the way; the
//! only observable outcomes are the validation failures and spawn success or
//! failure.
//!
//! Validation happens here, not at parse time. Recorded projects routinely
//! outlive their directories, so existence is checked at the last possible
//! moment.

use crate::domain::error::{JbOpenError, Result};
use crate::domain::AggregatedProject;
use std::path::Path;
use std::process::{Command, Stdio};

/// Launches the project's owning IDE against its path.
///
/// # Errors
///
/// - [`JbOpenError::NotFound`] when the project directory no longer exists;
/// - [`JbOpenError::Unlaunchable`] when the owning installation has no
///   resolved executable, or the resolved path is not an executable file;
/// - [`JbOpenError::Io`] when the spawn itself fails.
///
/// No process is started in any error case.
pub fn launch(project: &AggregatedProject) -> Result<()> {
    let _span = tracing::debug_span!("launch",
        title = %project.title,
        product = %project.ide.product_code
    )
    .entered();

    if !project.path.is_dir() {
        tracing::debug!(path = ?project.path, "project directory is gone");
        return Err(JbOpenError::NotFound(project.path.clone()));
    }

    let Some(executable) = project.ide.executable.as_deref() else {
        return Err(JbOpenError::Unlaunchable(project.ide.product_name.clone()));
    };
    if !is_executable_file(executable) {
        tracing::debug!(executable = ?executable, "resolved executable is not runnable");
        return Err(JbOpenError::Unlaunchable(project.ide.product_name.clone()));
    }

    spawn_detached(executable, &project.path)
}

/// Checks that the path is an existing file with execute permission.
#[cfg(unix)]
fn is_executable_file(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// Checks that the path is an existing file.
#[cfg(not(unix))]
fn is_executable_file(path: &Path) -> bool {
    path.is_file()
}

/// Spawns the IDE detached and returns without waiting.
fn spawn_detached(executable: &Path, project_path: &Path) -> Result<()> {
    let mut command = Command::new(executable);
    command
        .arg(project_path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    // Put the IDE in its own process group so it outlives the launcher and
    // ignores the launcher's terminal signals.
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        command.process_group(0);
    }

    let child = command.spawn()?;
    tracing::debug!(pid = child.id(), executable = ?executable, "IDE launched");
    drop(child);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LaunchTarget;
    use std::path::PathBuf;

    fn project(path: PathBuf, executable: Option<PathBuf>) -> AggregatedProject {
        AggregatedProject {
            title: "app".to_string(),
            path,
            last_opened_at: Some(1),
            ide: LaunchTarget {
                product_code: "GoLand".to_string(),
                product_name: "GoLand".to_string(),
                executable,
            },
        }
    }

    #[test]
    fn deleted_project_directory_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("deleted-project");

        let err = launch(&project(gone, Some(PathBuf::from("/bin/sh")))).unwrap_err();
        assert!(matches!(err, JbOpenError::NotFound(_)));
    }

    #[test]
    fn unresolved_executable_is_unlaunchable() {
        let dir = tempfile::tempdir().unwrap();

        let err = launch(&project(dir.path().to_path_buf(), None)).unwrap_err();
        assert!(matches!(err, JbOpenError::Unlaunchable(_)));
    }

    #[test]
    fn vanished_executable_is_unlaunchable() {
        let dir = tempfile::tempdir().unwrap();
        let missing_exe = dir.path().join("no-such-ide");

        let err = launch(&project(dir.path().to_path_buf(), Some(missing_exe))).unwrap_err();
        assert!(matches!(err, JbOpenError::Unlaunchable(_)));
    }

    #[cfg(unix)]
    #[test]
    fn non_executable_file_is_unlaunchable() {
        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("ide");
        std::fs::write(&plain, "not runnable").unwrap();

        let err = launch(&project(dir.path().to_path_buf(), Some(plain))).unwrap_err();
        assert!(matches!(err, JbOpenError::Unlaunchable(_)));
    }

    #[cfg(unix)]
    #[test]
    fn launch_spawns_and_returns_immediately() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("fake-ide");
        std::fs::write(&script, "#!/bin/sh\nexit 0\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let result = launch(&project(dir.path().to_path_buf(), Some(script)));
        assert!(result.is_ok());
    }
}
