//! Static registry of known JetBrains IDE products.
//!
//! Every supported product is described by an [`IdeProduct`] entry in the
//! built-in [`PRODUCTS`] table: how its per-version configuration directory
//! is named, which executable names it installs under, and where it keeps
//! its recent-projects record. The table is the single place to touch when
//! adding support for another product.
//!
//! The registry performs no I/O. Matching a product against directories on
//! disk is the job of [`crate::discovery::locator`].

/// Description of one JetBrains product family.
///
/// Configuration directories embed the product version in their name
/// (`PyCharm2024.1`, `GoLand2023.3`), so products are identified by a name
/// prefix rather than an exact directory name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdeProduct {
    /// Product code, also the config-directory name prefix (e.g. `"PyCharm"`).
    pub code: &'static str,

    /// Human-readable product name shown by the host (e.g. `"PyCharm"`).
    pub name: &'static str,

    /// Executable names to try, in order, when resolving the installed binary.
    ///
    /// Checked first against the JetBrains Toolbox scripts directory, then
    /// against `$PATH`.
    pub executables: &'static [&'static str],

    /// Recent-projects record path relative to the config directory.
    pub recents_file: &'static str,
}

/// Default recent-projects record location used by almost every product.
const RECENT_PROJECTS: &str = "options/recentProjects.xml";

/// Rider tracks solutions instead of projects and uses its own file name.
const RECENT_SOLUTIONS: &str = "options/recentSolutions.xml";

/// The built-in product table.
///
/// Order matters: it is the scan order of the config locator and therefore
/// the deterministic tie-break order during aggregation. Community editions
/// are listed after their commercial siblings.
pub const PRODUCTS: &[IdeProduct] = &[
    IdeProduct {
        code: "IntelliJIdea",
        name: "IntelliJ IDEA",
        executables: &["idea", "intellij-idea-ultimate"],
        recents_file: RECENT_PROJECTS,
    },
    IdeProduct {
        code: "IdeaIC",
        name: "IntelliJ IDEA Community",
        executables: &["idea", "intellij-idea-community"],
        recents_file: RECENT_PROJECTS,
    },
    IdeProduct {
        code: "PyCharm",
        name: "PyCharm",
        executables: &["pycharm", "charm"],
        recents_file: RECENT_PROJECTS,
    },
    IdeProduct {
        code: "PyCharmCE",
        name: "PyCharm Community",
        executables: &["pycharm-community", "pycharm"],
        recents_file: RECENT_PROJECTS,
    },
    IdeProduct {
        code: "GoLand",
        name: "GoLand",
        executables: &["goland"],
        recents_file: RECENT_PROJECTS,
    },
    IdeProduct {
        code: "CLion",
        name: "CLion",
        executables: &["clion"],
        recents_file: RECENT_PROJECTS,
    },
    IdeProduct {
        code: "WebStorm",
        name: "WebStorm",
        executables: &["webstorm"],
        recents_file: RECENT_PROJECTS,
    },
    IdeProduct {
        code: "PhpStorm",
        name: "PhpStorm",
        executables: &["phpstorm"],
        recents_file: RECENT_PROJECTS,
    },
    IdeProduct {
        code: "RubyMine",
        name: "RubyMine",
        executables: &["rubymine"],
        recents_file: RECENT_PROJECTS,
    },
    IdeProduct {
        code: "Rider",
        name: "Rider",
        executables: &["rider"],
        recents_file: RECENT_SOLUTIONS,
    },
    IdeProduct {
        code: "DataGrip",
        name: "DataGrip",
        executables: &["datagrip"],
        recents_file: RECENT_PROJECTS,
    },
    IdeProduct {
        code: "RustRover",
        name: "RustRover",
        executables: &["rustrover"],
        recents_file: RECENT_PROJECTS,
    },
];

impl IdeProduct {
    /// Returns whether `dir_name` is a config directory of this product.
    ///
    /// The name must start with the product code and continue with a version
    /// digit. The digit requirement keeps prefix-sharing products apart:
    /// `PyCharm2024.1` belongs to `PyCharm`, while `PyCharmCE2024.1` does
    /// not (its remainder after the `PyCharm` prefix starts with `C`).
    ///
    /// # Examples
    ///
    /// ```
    /// use jbopen::registry::find_by_code;
    ///
    /// let pycharm = find_by_code("PyCharm").unwrap();
    /// assert!(pycharm.matches_config_dir("PyCharm2024.1"));
    /// assert!(!pycharm.matches_config_dir("PyCharmCE2024.1"));
    /// assert!(!pycharm.matches_config_dir("PyCharm"));
    /// ```
    #[must_use]
    pub fn matches_config_dir(&self, dir_name: &str) -> bool {
        dir_name
            .strip_prefix(self.code)
            .is_some_and(|rest| rest.starts_with(|c: char| c.is_ascii_digit()))
    }
}

/// Returns the full table of known products.
#[must_use]
pub fn products() -> &'static [IdeProduct] {
    PRODUCTS
}

/// Looks up a product by its code.
///
/// Returns `None` for codes not present in the built-in table.
#[must_use]
pub fn find_by_code(code: &str) -> Option<&'static IdeProduct> {
    PRODUCTS.iter().find(|p| p.code == code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_codes_are_unique() {
        for (i, a) in PRODUCTS.iter().enumerate() {
            for b in &PRODUCTS[i + 1..] {
                assert_ne!(a.code, b.code);
            }
        }
    }

    #[test]
    fn every_product_has_executables_and_recents_file() {
        for product in PRODUCTS {
            assert!(!product.executables.is_empty(), "{}", product.code);
            assert!(product.recents_file.starts_with("options/"), "{}", product.code);
        }
    }

    #[test]
    fn config_dir_matching_requires_version_digit() {
        let idea = find_by_code("IntelliJIdea").unwrap();
        assert!(idea.matches_config_dir("IntelliJIdea2023.2"));
        assert!(!idea.matches_config_dir("IntelliJIdea"));
        assert!(!idea.matches_config_dir("IntelliJIdeaBackup"));
    }

    #[test]
    fn prefix_sharing_products_do_not_cross_match() {
        let pycharm = find_by_code("PyCharm").unwrap();
        let pycharm_ce = find_by_code("PyCharmCE").unwrap();

        assert!(pycharm.matches_config_dir("PyCharm2024.1"));
        assert!(!pycharm.matches_config_dir("PyCharmCE2024.1"));
        assert!(pycharm_ce.matches_config_dir("PyCharmCE2024.1"));
        assert!(!pycharm_ce.matches_config_dir("PyCharm2024.1"));
    }

    #[test]
    fn find_by_code_misses_unknown_products() {
        assert!(find_by_code("VisualStudio").is_none());
    }

    #[test]
    fn rider_uses_solutions_record() {
        let rider = find_by_code("Rider").unwrap();
        assert_eq!(rider.recents_file, "options/recentSolutions.xml");
    }
}
