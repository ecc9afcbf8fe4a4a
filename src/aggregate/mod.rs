//! Merges per-IDE project lists into one deduplicated, ranked result set.
//!
//! Several IDEs can know the same project (a polyglot repo opened in both
//! GoLand and PyCharm, or the same IDE across a version upgrade). Aggregation
//! keeps exactly one entry per distinct normalized path, remembers which
//! installation saw it last, and orders the result the way a quick-launcher
//! wants to present it: most recently opened first.

use crate::discovery::models::{IdeInstallation, RecentProjectEntry};
use crate::domain::AggregatedProject;
use crate::infrastructure::paths;
use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Aggregates raw entries, grouped per installation, into ranked projects.
///
/// Groups must be in the locator's scan order; that order is the tie-break
/// when two installations claim the same path with equal (or absent)
/// timestamps. When timestamps differ, the later one wins and its
/// installation becomes the launch target.
///
/// The result is ordered descending by last-opened time. Entries without a
/// timestamp sort after all timestamped entries and are ordered among
/// themselves by title.
#[must_use]
pub fn aggregate(groups: &[(IdeInstallation, Vec<RecentProjectEntry>)]) -> Vec<AggregatedProject> {
    let _span = tracing::debug_span!("aggregate", group_count = groups.len()).entered();

    let mut by_key: HashMap<String, AggregatedProject> = HashMap::new();

    for (installation, entries) in groups {
        for entry in entries {
            let normalized = paths::normalize_path(&entry.path);
            let key = paths::dedup_key(&normalized);

            match by_key.entry(key) {
                Entry::Occupied(mut slot) => {
                    // Option ordering puts None before any timestamp, and a
                    // strict comparison keeps the earlier-scanned winner on
                    // ties.
                    if entry.opened_at > slot.get().last_opened_at {
                        slot.insert(build(installation, normalized, entry.opened_at));
                    }
                }
                Entry::Vacant(slot) => {
                    slot.insert(build(installation, normalized, entry.opened_at));
                }
            }
        }
    }

    let mut projects: Vec<AggregatedProject> = by_key.into_values().collect();
    rank(&mut projects);

    tracing::debug!(count = projects.len(), "aggregation complete");
    projects
}

/// Builds the host-facing project from one winning raw entry.
fn build(
    installation: &IdeInstallation,
    path: PathBuf,
    opened_at: Option<i64>,
) -> AggregatedProject {
    AggregatedProject {
        title: title_for(&path),
        path,
        last_opened_at: opened_at,
        ide: installation.launch_target(),
    }
}

/// Derives the display title from the last path segment.
fn title_for(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.to_string_lossy().into_owned(),
        |name| name.to_string_lossy().into_owned(),
    )
}

/// Sorts projects into presentation order, in place.
fn rank(projects: &mut [AggregatedProject]) {
    projects.sort_by(|a, b| match (a.last_opened_at, b.last_opened_at) {
        (Some(x), Some(y)) => y.cmp(&x).then_with(|| a.title.cmp(&b.title)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.title.cmp(&b.title).then_with(|| a.path.cmp(&b.path)),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::find_by_code;

    fn install(code: &str, config_dir: &str) -> IdeInstallation {
        IdeInstallation {
            product: find_by_code(code).unwrap(),
            config_dir: PathBuf::from(config_dir),
            executable: None,
        }
    }

    fn entry(path: &str, opened_at: Option<i64>) -> RecentProjectEntry {
        RecentProjectEntry {
            path: PathBuf::from(path),
            opened_at,
        }
    }

    #[test]
    fn duplicate_path_keeps_latest_timestamp_and_its_installation() {
        let groups = vec![
            (install("GoLand", "/cfg/GoLand2024.1"), vec![entry("/p/a", Some(100))]),
            (install("PyCharm", "/cfg/PyCharm2024.1"), vec![entry("/p/a", Some(200))]),
        ];

        let projects = aggregate(&groups);
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].last_opened_at, Some(200));
        assert_eq!(projects[0].ide.product_code, "PyCharm");
    }

    #[test]
    fn equal_timestamps_keep_the_first_scanned_installation() {
        let groups = vec![
            (install("GoLand", "/cfg/GoLand2024.1"), vec![entry("/p/a", Some(100))]),
            (install("PyCharm", "/cfg/PyCharm2024.1"), vec![entry("/p/a", Some(100))]),
        ];

        let projects = aggregate(&groups);
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].ide.product_code, "GoLand");
    }

    #[test]
    fn absent_timestamps_keep_the_first_scanned_installation() {
        let groups = vec![
            (install("GoLand", "/cfg/GoLand2024.1"), vec![entry("/p/a", None)]),
            (install("PyCharm", "/cfg/PyCharm2024.1"), vec![entry("/p/a", None)]),
        ];

        let projects = aggregate(&groups);
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].ide.product_code, "GoLand");
    }

    #[test]
    fn a_timestamp_beats_no_timestamp() {
        let groups = vec![
            (install("GoLand", "/cfg/GoLand2024.1"), vec![entry("/p/a", None)]),
            (install("PyCharm", "/cfg/PyCharm2024.1"), vec![entry("/p/a", Some(1))]),
        ];

        let projects = aggregate(&groups);
        assert_eq!(projects[0].ide.product_code, "PyCharm");
    }

    #[test]
    fn equivalent_path_spellings_collapse_to_one_project() {
        let groups = vec![(
            install("GoLand", "/cfg/GoLand2024.1"),
            vec![
                entry("/p/a/", Some(100)),
                entry("/p/b/../a", Some(200)),
                entry("/p/./a", None),
            ],
        )];

        let projects = aggregate(&groups);
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].path, PathBuf::from("/p/a"));
        assert_eq!(projects[0].last_opened_at, Some(200));
    }

    #[test]
    fn ranking_is_descending_with_untimed_entries_last() {
        let groups = vec![(
            install("GoLand", "/cfg/GoLand2024.1"),
            vec![
                entry("/p/five", Some(5)),
                entry("/p/three", Some(3)),
                entry("/p/none", None),
                entry("/p/nine", Some(9)),
            ],
        )];

        let projects = aggregate(&groups);
        let timestamps: Vec<Option<i64>> =
            projects.iter().map(|p| p.last_opened_at).collect();
        assert_eq!(timestamps, vec![Some(9), Some(5), Some(3), None]);
    }

    #[test]
    fn untimed_entries_are_ordered_by_title() {
        let groups = vec![(
            install("GoLand", "/cfg/GoLand2024.1"),
            vec![
                entry("/p/zebra", None),
                entry("/p/alpha", None),
                entry("/p/mango", None),
            ],
        )];

        let projects = aggregate(&groups);
        let titles: Vec<&str> = projects.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["alpha", "mango", "zebra"]);
    }

    #[test]
    fn titles_come_from_the_last_path_segment() {
        let groups = vec![(
            install("GoLand", "/cfg/GoLand2024.1"),
            vec![entry("/home/omar/code/my-service", Some(1))],
        )];

        let projects = aggregate(&groups);
        assert_eq!(projects[0].title, "my-service");
    }
}
