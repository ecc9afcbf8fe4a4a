//! Record types produced by the discovery layer.
//!
//! These types sit below the host-facing domain model: an
//! [`IdeInstallation`] is one detected IDE on this machine, a
//! [`RecentProjectEntry`] is one raw row from that IDE's recent-projects
//! record. Aggregation condenses them into `AggregatedProject` values.

use crate::domain::LaunchTarget;
use crate::registry::IdeProduct;
use std::path::PathBuf;

/// A concrete detected installation of a JetBrains product.
///
/// Created by the config locator; the config directory existed and was
/// readable at creation time. The executable is resolved on a best-effort
/// basis and may be absent, in which case entries owned by this installation
/// are listed but refuse to launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdeInstallation {
    /// The owning product definition from the registry.
    pub product: &'static IdeProduct,

    /// The authoritative config directory for this product, the most
    /// recently modified of its version-suffixed candidates.
    pub config_dir: PathBuf,

    /// Resolved IDE executable, `None` when the binary could not be located.
    pub executable: Option<PathBuf>,
}

impl IdeInstallation {
    /// Returns the full path of this installation's recent-projects record.
    #[must_use]
    pub fn recents_path(&self) -> PathBuf {
        self.config_dir.join(self.product.recents_file)
    }

    /// Builds the launch target handed to the host inside aggregated
    /// projects.
    #[must_use]
    pub fn launch_target(&self) -> LaunchTarget {
        LaunchTarget {
            product_code: self.product.code.to_string(),
            product_name: self.product.name.to_string(),
            executable: self.executable.clone(),
        }
    }
}

/// One project row parsed from a recent-projects record.
///
/// The path has already had its `$USER_HOME$` placeholder expanded and is
/// never empty. Whether the directory still exists is deliberately not
/// checked here; launch validates lazily.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentProjectEntry {
    /// Absolute project directory path.
    pub path: PathBuf,

    /// Last-opened time in epoch milliseconds. Older record formats carry no
    /// timestamp.
    pub opened_at: Option<i64>,
}
