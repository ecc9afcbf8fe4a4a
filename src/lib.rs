//! jbopen: the discovery-and-launch core of a JetBrains projects launcher
//! plugin.
//!
//! jbopen lets a quick-launcher list the projects every installed JetBrains
//! IDE (IntelliJ IDEA, PyCharm, GoLand, ...) has recently opened, search
//! them, and open a chosen project in the IDE that owns it:
//!
//! - Discovery of installed IDEs via their version-suffixed config
//!   directories, including the pre-2020 legacy home-directory layout
//! - Parsing of each IDE's recent-projects record across schema generations
//! - Deduplication and recency ranking of the merged project list
//! - Fire-and-forget launch of the owning IDE executable
//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Host launcher shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Engine (engine/)                                   │  ← search / activate
//! │  - Installation cache (TTL, wholesale swap)         │
//! │  - Query filtering                                  │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Discovery     │   │ Aggregation   │   │ Launch        │
//! │ (discovery/)  │   │ (aggregate/)  │   │ (launch/)     │
//! │ - Locator     │   │ - Dedup       │   │ - Validation  │
//! │ - XML parsing │   │ - Ranking     │   │ - Detached    │
//! └───────────────┘   └───────────────┘   │   spawn       │
//!         │                               └───────────────┘
//! ┌─────────────────────────────────────────────────────┐
//! │  Registry, Domain & Infrastructure                  │
//! │  - Product table (registry/)                        │
//! │  - Errors and project model (domain/)               │
//! │  - Platform paths (infrastructure/)                 │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`registry`]: Static table of known JetBrains products
//! - [`discovery`]: Installation scanning and recent-projects parsing
//! - [`aggregate`]: Deduplication and ranking
//! - [`engine`]: The `search`/`activate` surface hosts call
//! - [`launch`]: IDE process launching
//! - [`domain`]: Error taxonomy and the aggregated project model
//! - [`infrastructure`]: Platform directories and path normalization
//! - [`observability`]: Tracing subscriber setup
//!
//! # Failure philosophy
//!
//! Searching never fails. A missing config root, an unreadable record or a
//! corrupt entry each degrade to fewer results; the only user-visible
//! errors are per-activation (`NotFound`, `Unlaunchable`, spawn I/O), and
//! they concern exactly the one launch the user attempted.
//!
//! # Example
//!
//! ```no_run
//! use jbopen::{Config, ProjectEngine};
//!
//! let engine = ProjectEngine::new(Config::default());
//!
//! for project in engine.search("api") {
//!     println!("{} ({})", project.title, project.ide.product_name);
//! }
//! ```

pub mod aggregate;
pub mod discovery;
pub mod domain;
pub mod engine;
pub mod infrastructure;
pub mod launch;
pub mod observability;
pub mod registry;

pub use domain::{AggregatedProject, JbOpenError, LaunchTarget, Result};
pub use engine::ProjectEngine;

use serde::Deserialize;
use std::path::Path;

/// Core configuration, loaded from an optional TOML file.
///
/// Every field has a default, so an absent or empty file is valid. A host
/// embedding the crate can also build the struct directly.
///
/// # Example file
///
/// ```toml
/// extra_roots = ["~/jetbrains-configs"]
/// disabled_products = ["Rider"]
/// cache_ttl_secs = 60
/// trace_level = "debug"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base directories to scan instead of the platform default.
    ///
    /// Empty means "use the platform JetBrains config root". Entries may
    /// start with `~`.
    pub config_roots: Vec<String>,

    /// Base directories scanned in addition to the defaults.
    pub extra_roots: Vec<String>,

    /// Product codes to skip during discovery (e.g. `"PyCharmCE"`).
    pub disabled_products: Vec<String>,

    /// Whether to scan the home directory for pre-2020 dot-directory
    /// layouts. Default: `true`.
    pub scan_legacy_dirs: bool,

    /// How long one installation scan stays authoritative, in seconds.
    ///
    /// Recent-projects records are re-read on every query regardless; this
    /// only debounces the directory scan. `0` rescans every query.
    /// Default: 30.
    pub cache_ttl_secs: u64,

    /// Tracing level for the default subscriber (`trace` ... `error`).
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_roots: Vec::new(),
            extra_roots: Vec::new(),
            disabled_products: Vec::new(),
            scan_legacy_dirs: true,
            cache_ttl_secs: 30,
            trace_level: None,
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`JbOpenError::Io`] when the file cannot be read and
    /// [`JbOpenError::Config`] when its contents are not valid TOML for
    /// this structure.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        toml::from_str(&text).map_err(|e| JbOpenError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_scan_platform_roots_with_a_short_ttl() {
        let config = Config::default();
        assert!(config.config_roots.is_empty());
        assert!(config.scan_legacy_dirs);
        assert_eq!(config.cache_ttl_secs, 30);
    }

    #[test]
    fn load_reads_partial_files_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "disabled_products = [\"Rider\"]").unwrap();
        writeln!(file, "cache_ttl_secs = 5").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.disabled_products, vec!["Rider"]);
        assert_eq!(config.cache_ttl_secs, 5);
        assert!(config.scan_legacy_dirs);
    }

    #[test]
    fn load_rejects_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "cache_ttl_secs = \"not a number\"").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, JbOpenError::Config(_)));
    }

    #[test]
    fn load_surfaces_missing_files_as_io_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, JbOpenError::Io(_)));
    }
}
