//! Locates installed JetBrains IDEs through their config directories.
//!
//! JetBrains products keep one config directory per installed version
//! (`~/.config/JetBrains/PyCharm2023.3`, `.../PyCharm2024.1`), and only the
//! currently used version's directory is written to. The locator scans the
//! platform config root (plus any user-configured roots and the pre-2020
//! legacy dot-directories in the home directory), picks the most recently
//! modified candidate per product, and pairs it with a best-effort
//! executable lookup.
//!
//! Everything here degrades instead of failing: an unreadable root
//! contributes nothing, a missing executable keeps the installation around
//! as non-launchable, and zero detected IDEs is an empty result, not an
//! error.

use crate::discovery::models::IdeInstallation;
use crate::infrastructure::paths;
use crate::registry::{self, IdeProduct};
use crate::Config;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Scans the configured base directories and returns all detected
/// installations.
///
/// The output order is deterministic: configured roots in order, the legacy
/// home-directory scan last, and within each root the registry's product
/// order. Aggregation relies on this order for its tie-break rule.
#[must_use]
pub fn locate(config: &Config) -> Vec<IdeInstallation> {
    let _span = tracing::debug_span!("locate_installations").entered();

    let home = paths::home_dir();
    let products = enabled_products(config);

    let expand = |raw: &str| match home.as_deref() {
        Some(home) => paths::expand_tilde(raw, home),
        None => PathBuf::from(raw),
    };

    let mut roots: Vec<PathBuf> = Vec::new();
    if config.config_roots.is_empty() {
        if let Some(root) = paths::jetbrains_config_root() {
            roots.push(root);
        }
    } else {
        roots.extend(config.config_roots.iter().map(|r| expand(r)));
    }
    roots.extend(config.extra_roots.iter().map(|r| expand(r)));

    let mut installations = Vec::new();
    for root in &roots {
        installations.extend(scan_root(root, &products));
    }
    if config.scan_legacy_dirs {
        if let Some(home) = &home {
            installations.extend(scan_legacy_home(home, &products));
        }
    }

    tracing::debug!(count = installations.len(), "installation scan complete");
    installations
}

/// Returns the registry products minus the ones disabled in the config.
fn enabled_products(config: &Config) -> Vec<&'static IdeProduct> {
    registry::products()
        .iter()
        .filter(|p| !config.disabled_products.iter().any(|d| d == p.code))
        .collect()
}

/// Scans one base directory for per-product version directories.
fn scan_root(root: &Path, products: &[&'static IdeProduct]) -> Vec<IdeInstallation> {
    let entries = match std::fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(root = ?root, error = %e, "config root unreadable, skipping");
            return Vec::new();
        }
    };

    let mut dirs: Vec<(String, PathBuf, SystemTime)> = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let modified = entry
            .metadata()
            .and_then(|m| m.modified())
            .unwrap_or(UNIX_EPOCH);
        dirs.push((name.to_string(), path.clone(), modified));
    }

    let mut found = Vec::new();
    for &product in products {
        let candidates: Vec<(PathBuf, SystemTime)> = dirs
            .iter()
            .filter(|(name, _, _)| product.matches_config_dir(name))
            .map(|(_, path, modified)| (path.clone(), *modified))
            .collect();

        if let Some(config_dir) = pick_latest(candidates) {
            let executable = resolve_executable(product);
            tracing::debug!(
                product = product.code,
                config_dir = ?config_dir,
                executable = ?executable,
                "detected installation"
            );
            found.push(IdeInstallation {
                product,
                config_dir,
                executable,
            });
        }
    }
    found
}

/// Scans the home directory for pre-2020 layouts.
///
/// Older versions kept everything under a version-suffixed dot directory
/// (`~/.PyCharm2019.3`) with the options tree one level down, under
/// `config/`.
fn scan_legacy_home(home: &Path, products: &[&'static IdeProduct]) -> Vec<IdeInstallation> {
    let entries = match std::fs::read_dir(home) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(home = ?home, error = %e, "home directory unreadable, skipping legacy scan");
            return Vec::new();
        }
    };

    let mut dirs: Vec<(String, PathBuf, SystemTime)> = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(stripped) = name.strip_prefix('.') else {
            continue;
        };
        let config_dir = path.join("config");
        if !config_dir.is_dir() {
            continue;
        }
        let modified = entry
            .metadata()
            .and_then(|m| m.modified())
            .unwrap_or(UNIX_EPOCH);
        dirs.push((stripped.to_string(), config_dir, modified));
    }

    let mut found = Vec::new();
    for &product in products {
        let candidates: Vec<(PathBuf, SystemTime)> = dirs
            .iter()
            .filter(|(name, _, _)| product.matches_config_dir(name))
            .map(|(_, path, modified)| (path.clone(), *modified))
            .collect();

        if let Some(config_dir) = pick_latest(candidates) {
            let executable = resolve_executable(product);
            tracing::debug!(
                product = product.code,
                config_dir = ?config_dir,
                "detected legacy installation"
            );
            found.push(IdeInstallation {
                product,
                config_dir,
                executable,
            });
        }
    }
    found
}

/// Picks the authoritative directory among version candidates.
///
/// The most recently modified candidate wins; an IDE only writes to its
/// current version's directory, so modification time beats any attempt to
/// order version strings. Ties fall back to the lexicographically greatest
/// path so the result never depends on readdir order.
pub(crate) fn pick_latest(mut candidates: Vec<(PathBuf, SystemTime)>) -> Option<PathBuf> {
    candidates.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    candidates.pop().map(|(path, _)| path)
}

/// Resolves the installed executable for a product.
///
/// Tries the JetBrains Toolbox scripts directory first, then each candidate
/// name on `$PATH`. Returns `None` when nothing matches; the caller keeps
/// the installation as a non-launchable entry.
fn resolve_executable(product: &IdeProduct) -> Option<PathBuf> {
    if let Some(scripts) = paths::toolbox_scripts_dir() {
        for name in product.executables {
            let candidate = scripts.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }

    for name in product.executables {
        if let Ok(found) = which::which(name) {
            return Some(found);
        }
    }

    tracing::debug!(product = product.code, "no executable resolved");
    None
}
