//! Filesystem path utilities for JetBrains directory layouts.
//!
//! This module answers two questions for the rest of the crate: where the
//! current platform keeps JetBrains configuration, and how to turn the raw
//! path strings found inside IDE records into comparable absolute paths.
//! Platform lookups go through [`directories::BaseDirs`]; everything else is
//! pure string and component manipulation with no disk access.

use directories::BaseDirs;
use std::path::{Component, Path, PathBuf};

/// Placeholder JetBrains writes into records instead of the literal home path.
pub const USER_HOME_PLACEHOLDER: &str = "$USER_HOME$";

/// Returns the current user's home directory, if one can be determined.
#[must_use]
pub fn home_dir() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}

/// Returns the platform JetBrains configuration root.
///
/// Resolves to `~/.config/JetBrains` on Linux, `~/Library/Application
/// Support/JetBrains` on macOS and `%APPDATA%\JetBrains` on Windows. Returns
/// `None` when no home directory is available (the discovery layer treats
/// that as "nothing installed").
#[must_use]
pub fn jetbrains_config_root() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.config_dir().join("JetBrains"))
}

/// Returns the JetBrains Toolbox shim-script directory.
///
/// Toolbox installs a small launcher script per IDE (`idea`, `pycharm`, ...)
/// under its data directory. Checking here before `$PATH` finds IDEs the
/// user installed without adding the scripts directory to their shell path.
#[must_use]
pub fn toolbox_scripts_dir() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| {
        dirs.data_local_dir()
            .join("JetBrains")
            .join("Toolbox")
            .join("scripts")
    })
}

/// Expands a leading tilde to the given home directory.
///
/// Used for user-supplied root overrides in the config file.
///
/// # Examples
///
/// ```
/// use jbopen::infrastructure::expand_tilde;
/// use std::path::Path;
///
/// let home = Path::new("/home/user");
/// assert_eq!(expand_tilde("~/Library", home), Path::new("/home/user/Library").to_path_buf());
/// assert_eq!(expand_tilde("/opt/cfg", home), Path::new("/opt/cfg").to_path_buf());
/// ```
#[must_use]
pub fn expand_tilde(path: &str, home: &Path) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest)
    } else if path == "~" {
        home.to_path_buf()
    } else {
        PathBuf::from(path)
    }
}

/// Replaces the `$USER_HOME$` placeholder with the actual home directory.
///
/// JetBrains stores home-relative project paths with a placeholder so records
/// survive user renames. Only a leading placeholder is meaningful; the raw
/// value is returned unchanged when the placeholder is absent.
#[must_use]
pub fn expand_user_home(raw: &str, home: &Path) -> String {
    if raw.starts_with(USER_HOME_PLACEHOLDER) {
        raw.replacen(USER_HOME_PLACEHOLDER, &home.to_string_lossy(), 1)
    } else {
        raw.to_string()
    }
}

/// Normalizes a path lexically, without touching the filesystem.
///
/// Resolves `.` and `..` components and drops trailing separators so that
/// spellings like `/p/a/` and `/p/b/../a` compare equal. Unlike
/// `std::fs::canonicalize` the path does not have to exist, which matters
/// because recorded projects may have been moved or deleted since the IDE
/// last saw them.
///
/// # Examples
///
/// ```
/// use jbopen::infrastructure::normalize_path;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(normalize_path(Path::new("/p/b/../a/")), PathBuf::from("/p/a"));
/// assert_eq!(normalize_path(Path::new("/p/./a")), PathBuf::from("/p/a"));
/// ```
#[must_use]
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut components = path.components().peekable();
    let mut normalized = if let Some(c @ Component::Prefix(..)) = components.peek().copied() {
        components.next();
        PathBuf::from(c.as_os_str())
    } else {
        PathBuf::new()
    };

    for component in components {
        match component {
            Component::Prefix(..) => {}
            Component::RootDir => normalized.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            Component::Normal(part) => normalized.push(part),
        }
    }

    normalized
}

/// Builds the deduplication key for a project path.
///
/// The key is the normalized path rendered as a string, lowercased on
/// Windows where the filesystem compares names case-insensitively.
#[must_use]
pub fn dedup_key(path: &Path) -> String {
    let normalized = normalize_path(path).to_string_lossy().into_owned();
    if cfg!(windows) {
        normalized.to_lowercase()
    } else {
        normalized
    }
}
