//! Query engine exposed to the host launcher.
//!
//! [`ProjectEngine`] is the crate's synchronous entry point: the host calls
//! [`search`](ProjectEngine::search) once per keystroke-driven query and
//! [`activate`](ProjectEngine::activate) when the user picks an entry. Hosts
//! with an event loop should call both from a worker so their UI thread
//! never blocks on filesystem I/O; the engine itself spawns no threads.
//!
//! Installation discovery is cached with a short TTL because installed IDEs
//! rarely change while a launcher runs. Recent-projects records are re-read
//! on every query: the IDE rewrites them live, and stale timestamps would
//! rank results wrongly. The cache is replaced wholesale behind an `RwLock`,
//! so concurrent readers only ever observe a complete scan.

use crate::aggregate;
use crate::discovery::models::{IdeInstallation, RecentProjectEntry};
use crate::discovery::{locator, recents};
use crate::domain::{AggregatedProject, Result};
use crate::infrastructure::paths;
use crate::launch;
use crate::Config;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};

/// One completed installation scan.
struct InstallationCache {
    scanned_at: Instant,
    installations: Arc<Vec<IdeInstallation>>,
}

/// Discovery, search and activation behind one handle.
///
/// The engine is cheap to share behind an `Arc` and safe to query from
/// multiple threads.
pub struct ProjectEngine {
    config: Config,
    cache: RwLock<Option<InstallationCache>>,
}

impl ProjectEngine {
    /// Creates an engine with an empty installation cache.
    ///
    /// The first query performs the initial scan, so the cache can never
    /// outlive a previous process.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            cache: RwLock::new(None),
        }
    }

    /// Returns ranked projects matching the query.
    ///
    /// The query is matched case-insensitively as a substring of the display
    /// title or the full path; an empty query returns every known project.
    /// Discovery and parse problems degrade to fewer results, never to an
    /// error.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<AggregatedProject> {
        let _span = tracing::debug_span!("search", query_len = query.len()).entered();

        let installations = self.installations();
        let home = paths::home_dir().unwrap_or_default();

        let groups: Vec<(IdeInstallation, Vec<RecentProjectEntry>)> = installations
            .iter()
            .map(|installation| (installation.clone(), recents::parse(installation, &home)))
            .collect();

        let mut projects = aggregate::aggregate(&groups);

        let needle = query.trim().to_lowercase();
        if !needle.is_empty() {
            projects.retain(|p| matches_query(p, &needle));
        }

        tracing::debug!(count = projects.len(), "search complete");
        projects
    }

    /// Launches the chosen project in its owning IDE.
    ///
    /// # Errors
    ///
    /// Fails with `NotFound` when the project directory has disappeared,
    /// `Unlaunchable` when the owning IDE has no runnable executable, or an
    /// I/O error when the spawn itself fails. These are the crate's only
    /// user-visible failures.
    pub fn activate(&self, project: &AggregatedProject) -> Result<()> {
        launch::launch(project)
    }

    /// Drops the installation cache so the next query rescans.
    pub fn refresh(&self) {
        let mut guard = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
        tracing::debug!("installation cache invalidated");
    }

    /// Returns cached installations, rescanning when the TTL has lapsed.
    ///
    /// Replacement is wholesale: readers hold an `Arc` to a finished scan
    /// and are never exposed to a partially built list.
    fn installations(&self) -> Arc<Vec<IdeInstallation>> {
        let ttl = Duration::from_secs(self.config.cache_ttl_secs);

        {
            let guard = self.cache.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(cache) = guard.as_ref() {
                if cache.scanned_at.elapsed() < ttl {
                    return Arc::clone(&cache.installations);
                }
            }
        }

        let fresh = Arc::new(locator::locate(&self.config));
        let mut guard = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(InstallationCache {
            scanned_at: Instant::now(),
            installations: Arc::clone(&fresh),
        });
        fresh
    }
}

/// Case-insensitive substring match against title and path.
fn matches_query(project: &AggregatedProject, needle_lower: &str) -> bool {
    project.title.to_lowercase().contains(needle_lower)
        || project
            .path
            .to_string_lossy()
            .to_lowercase()
            .contains(needle_lower)
}
