//! Aggregated project model exposed to the host launcher.
//!
//! This module defines [`AggregatedProject`], the user-facing unit a host
//! renders as one search result, and [`LaunchTarget`], the slice of an
//! installation the launcher needs to open the project. Both types serialize
//! with `serde` so a host process boundary can carry them verbatim.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Number of milliseconds in one second.
const MILLIS_PER_SECOND: i64 = 1000;

/// Number of seconds in one minute.
const SECONDS_PER_MINUTE: i64 = 60;

/// Number of seconds in one hour.
const SECONDS_PER_HOUR: i64 = 3600;

/// Number of seconds in one day.
const SECONDS_PER_DAY: i64 = 86400;

/// The IDE installation chosen to open a project.
///
/// When the same project appears in several IDEs' records, aggregation picks
/// one winner; this type captures what the launch step needs from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchTarget {
    /// Product code from the registry (e.g. `"GoLand"`).
    pub product_code: String,

    /// Human-readable product name, for host strings like "Open in GoLand".
    pub product_name: String,

    /// Resolved IDE executable. `None` marks the entry as non-launchable.
    pub executable: Option<PathBuf>,
}

/// One deduplicated, ranked project as presented to the host.
///
/// There is at most one `AggregatedProject` per distinct normalized project
/// path. Instances are the ephemeral result of a single search pass and are
/// rebuilt on every query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedProject {
    /// Display title, the last segment of the project path.
    pub title: String,

    /// Full project directory path.
    pub path: PathBuf,

    /// Best-known last-opened time in epoch milliseconds, if any record
    /// carried one.
    pub last_opened_at: Option<i64>,

    /// The installation that will open this project on activation.
    pub ide: LaunchTarget,
}

impl AggregatedProject {
    /// Returns a human-readable string describing how long ago the project
    /// was opened.
    ///
    /// The format varies with elapsed time: "just now", "5m ago", "3h ago",
    /// "7d ago". Entries whose record carried no timestamp yield "unknown".
    #[must_use]
    pub fn time_ago(&self) -> String {
        let Some(opened_at) = self.last_opened_at else {
            return "unknown".to_string();
        };

        let now = chrono::Utc::now().timestamp_millis();
        let diff = (now - opened_at).max(0) / MILLIS_PER_SECOND;

        if diff < SECONDS_PER_MINUTE {
            "just now".to_string()
        } else if diff < SECONDS_PER_HOUR {
            let mins = diff / SECONDS_PER_MINUTE;
            format!("{mins}m ago")
        } else if diff < SECONDS_PER_DAY {
            let hours = diff / SECONDS_PER_HOUR;
            format!("{hours}h ago")
        } else {
            let days = diff / SECONDS_PER_DAY;
            format!("{days}d ago")
        }
    }
}
