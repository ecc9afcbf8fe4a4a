//! Discovery layer: from installed IDEs to raw recent-project entries.
//!
//! Discovery runs in two steps. The locator finds which JetBrains IDEs are
//! installed by scanning for their version-suffixed config directories; the
//! recents parser then reads each installation's recent-projects record.
//! Both steps degrade to fewer results instead of erroring, so one broken
//! IDE never hides the others.
//!
//! # Modules
//!
//! - [`locator`]: Config-directory scanning and executable resolution
//! - [`models`]: `IdeInstallation` and `RecentProjectEntry` record types
//! - [`recents`]: Recent-projects XML parsing

pub mod locator;
pub mod models;
pub mod recents;

pub use locator::locate;
pub use models::{IdeInstallation, RecentProjectEntry};
pub use recents::parse;
