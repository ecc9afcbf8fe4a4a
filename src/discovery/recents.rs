//! Parses IDE recent-projects records.
//!
//! Every JetBrains product persists the projects it has opened in an XML
//! document under its options directory. The schema changed across IDE
//! generations:
//!
//! - older versions keep a flat list of paths under a `recentPaths` option;
//! - newer versions keep an `additionalInfo` map from path to per-project
//!   metadata, including a `projectOpenTimestamp` in epoch milliseconds.
//!
//! Real files often contain both sections, so the parser reads the flat list
//! and overlays the metadata timestamps on top, converging on one entry
//! shape. Paths use the `$USER_HOME$` placeholder and are expanded before
//! being returned.
//!
//! The parser never fails the caller: a missing record is an empty list, a
//! malformed record is skipped, and a document that does not parse at all is
//! treated as empty after a warning.

use crate::discovery::models::{IdeInstallation, RecentProjectEntry};
use crate::domain::error::{JbOpenError, Result};
use crate::infrastructure::paths;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Reads and parses the recent-projects record of one installation.
///
/// `home` is the directory substituted for `$USER_HOME$` placeholders.
/// Returns an empty vector when the record is missing or unusable; per-entry
/// problems are logged and skipped without affecting the other entries.
#[must_use]
pub fn parse(installation: &IdeInstallation, home: &Path) -> Vec<RecentProjectEntry> {
    let record = installation.recents_path();
    let _span = tracing::debug_span!("parse_recents",
        product = installation.product.code,
        record = ?record
    )
    .entered();

    let text = match std::fs::read_to_string(&record) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("no recent-projects record");
            return Vec::new();
        }
        Err(e) => {
            tracing::debug!(error = %e, "recent-projects record unreadable, treating as empty");
            return Vec::new();
        }
    };

    match parse_document(&text, home) {
        Ok(entries) => {
            tracing::debug!(count = entries.len(), "parsed recent projects");
            entries
        }
        Err(e) => {
            tracing::warn!(record = ?record, error = %e, "unparseable recent-projects record, treating as empty");
            Vec::new()
        }
    }
}

/// Accumulates entries in first-seen order while allowing timestamp overlay.
#[derive(Default)]
struct EntryAccumulator {
    order: Vec<String>,
    opened_at: HashMap<String, Option<i64>>,
}

impl EntryAccumulator {
    /// Records a path from the flat list, keeping the first occurrence only.
    fn add_path(&mut self, path: String) {
        if let Entry::Vacant(slot) = self.opened_at.entry(path.clone()) {
            slot.insert(None);
            self.order.push(path);
        }
    }

    /// Records a path from the metadata map, overlaying its timestamp onto
    /// an already-seen flat-list entry if there is one.
    fn add_metadata(&mut self, path: String, opened_at: Option<i64>) {
        match self.opened_at.entry(path.clone()) {
            Entry::Occupied(mut slot) => {
                if opened_at.is_some() {
                    slot.insert(opened_at);
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(opened_at);
                self.order.push(path);
            }
        }
    }

    fn into_entries(self) -> Vec<RecentProjectEntry> {
        let EntryAccumulator { order, opened_at } = self;
        order
            .into_iter()
            .map(|path| RecentProjectEntry {
                opened_at: opened_at.get(&path).copied().flatten(),
                path: PathBuf::from(path),
            })
            .collect()
    }
}

/// Parses the XML text of a recent-projects record.
///
/// Returns `Err` only when the document itself cannot be parsed; individual
/// malformed records are skipped. Parsing is deterministic: the same input
/// yields the same entries in the same order.
pub(crate) fn parse_document(xml: &str, home: &Path) -> Result<Vec<RecentProjectEntry>> {
    let doc =
        roxmltree::Document::parse(xml).map_err(|e| JbOpenError::Parse(e.to_string()))?;
    let Some(component) = find_component(&doc) else {
        return Ok(Vec::new());
    };

    let mut acc = EntryAccumulator::default();

    // Flat list first so overlay order does not depend on document order.
    if let Some(list_option) = find_option(component, "recentPaths") {
        collect_recent_paths(list_option, home, &mut acc);
    }
    if let Some(map_option) = find_option(component, "additionalInfo") {
        collect_additional_info(map_option, home, &mut acc);
    }

    Ok(acc.into_entries())
}

/// Finds the component element holding recent-projects state.
///
/// Project-based IDEs use `RecentProjectsManager`, the directory-based ones
/// (WebStorm, PhpStorm generations) use `RecentDirectoryProjectsManager`.
/// Falls back to the first component for defensiveness against renames.
fn find_component<'a, 'input>(
    doc: &'a roxmltree::Document<'input>,
) -> Option<roxmltree::Node<'a, 'input>> {
    let mut first = None;
    for component in doc
        .root_element()
        .children()
        .filter(|n| n.is_element() && n.has_tag_name("component"))
    {
        match component.attribute("name") {
            Some("RecentProjectsManager" | "RecentDirectoryProjectsManager") => {
                return Some(component);
            }
            _ => {
                if first.is_none() {
                    first = Some(component);
                }
            }
        }
    }
    first
}

/// Finds a named `<option>` child of the component.
fn find_option<'a, 'input>(
    component: roxmltree::Node<'a, 'input>,
    name: &str,
) -> Option<roxmltree::Node<'a, 'input>> {
    component
        .children()
        .find(|n| n.is_element() && n.has_tag_name("option") && n.attribute("name") == Some(name))
}

/// Collects paths from the older flat-list format.
///
/// ```text
/// <option name="recentPaths">
///   <list>
///     <option value="$USER_HOME$/code/app" />
///   </list>
/// </option>
/// ```
fn collect_recent_paths(list_option: roxmltree::Node, home: &Path, acc: &mut EntryAccumulator) {
    for option in list_option
        .descendants()
        .filter(|n| n.is_element() && n.has_tag_name("option"))
    {
        let Some(raw) = option.attribute("value") else {
            continue;
        };
        let expanded = paths::expand_user_home(raw, home);
        if expanded.is_empty() {
            tracing::debug!("discarding entry with empty path");
            continue;
        }
        acc.add_path(expanded);
    }
}

/// Collects paths and timestamps from the newer metadata map.
///
/// ```text
/// <option name="additionalInfo">
///   <map>
///     <entry key="$USER_HOME$/code/app">
///       <value>
///         <RecentProjectMetaInfo ...>
///           <option name="projectOpenTimestamp" value="1700000000000" />
///         </RecentProjectMetaInfo>
///       </value>
///     </entry>
///   </map>
/// </option>
/// ```
///
/// Other per-project metadata options are ignored. A record with a broken
/// key or timestamp is skipped; the rest of the file is unaffected.
fn collect_additional_info(map_option: roxmltree::Node, home: &Path, acc: &mut EntryAccumulator) {
    for entry in map_option
        .descendants()
        .filter(|n| n.is_element() && n.has_tag_name("entry"))
    {
        let Some(raw) = entry.attribute("key") else {
            tracing::debug!("skipping record without a path key");
            continue;
        };
        let expanded = paths::expand_user_home(raw, home);
        if expanded.is_empty() {
            tracing::debug!("discarding entry with empty path");
            continue;
        }

        match read_open_timestamp(entry) {
            Ok(opened_at) => acc.add_metadata(expanded, opened_at),
            Err(e) => {
                tracing::debug!(path = %expanded, error = %e, "skipping malformed record");
            }
        }
    }
}

/// Extracts the `projectOpenTimestamp` from one metadata entry.
///
/// Absence is normal (very old metadata has none); a present but unreadable
/// value marks the record as malformed.
fn read_open_timestamp(entry: roxmltree::Node) -> Result<Option<i64>> {
    let Some(option) = entry.descendants().find(|n| {
        n.is_element()
            && n.has_tag_name("option")
            && n.attribute("name") == Some("projectOpenTimestamp")
    }) else {
        return Ok(None);
    };

    let value = option
        .attribute("value")
        .ok_or_else(|| JbOpenError::Parse("projectOpenTimestamp without value".to_string()))?;
    value
        .parse::<i64>()
        .map(Some)
        .map_err(|_| JbOpenError::Parse(format!("invalid projectOpenTimestamp: {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::find_by_code;

    const HOME: &str = "/home/omar";

    fn home() -> &'static Path {
        Path::new(HOME)
    }

    fn modern_record() -> String {
        r#"<application>
  <component name="RecentProjectsManager">
    <option name="additionalInfo">
      <map>
        <entry key="$USER_HOME$/code/older">
          <value>
            <RecentProjectMetaInfo frameTitle="older">
              <option name="projectOpenTimestamp" value="1600000000000" />
            </RecentProjectMetaInfo>
          </value>
        </entry>
        <entry key="$USER_HOME$/code/newer">
          <value>
            <RecentProjectMetaInfo frameTitle="newer">
              <option name="opened" value="true" />
              <option name="projectOpenTimestamp" value="1700000000000" />
            </RecentProjectMetaInfo>
          </value>
        </entry>
      </map>
    </option>
    <option name="recentPaths">
      <list>
        <option value="$USER_HOME$/code/older" />
        <option value="$USER_HOME$/code/newer" />
      </list>
    </option>
  </component>
</application>"#
            .to_string()
    }

    #[test]
    fn modern_format_yields_paths_with_timestamps() {
        let entries = parse_document(&modern_record(), home()).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].path, PathBuf::from("/home/omar/code/older"));
        assert_eq!(entries[0].opened_at, Some(1_600_000_000_000));
        assert_eq!(entries[1].path, PathBuf::from("/home/omar/code/newer"));
        assert_eq!(entries[1].opened_at, Some(1_700_000_000_000));
    }

    #[test]
    fn parsing_is_deterministic() {
        let record = modern_record();
        let first = parse_document(&record, home()).unwrap();
        let second = parse_document(&record, home()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn legacy_flat_list_yields_paths_without_timestamps() {
        let xml = r#"<application>
  <component name="RecentDirectoryProjectsManager">
    <option name="recentPaths">
      <list>
        <option value="$USER_HOME$/www/site" />
        <option value="/srv/www/other" />
      </list>
    </option>
  </component>
</application>"#;

        let entries = parse_document(xml, home()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].path, PathBuf::from("/home/omar/www/site"));
        assert_eq!(entries[0].opened_at, None);
        assert_eq!(entries[1].path, PathBuf::from("/srv/www/other"));
    }

    #[test]
    fn metadata_only_entries_are_included() {
        // Newer IDEs sometimes write additionalInfo without recentPaths.
        let xml = r#"<application>
  <component name="RecentProjectsManager">
    <option name="additionalInfo">
      <map>
        <entry key="/data/project">
          <value>
            <RecentProjectMetaInfo>
              <option name="projectOpenTimestamp" value="42" />
            </RecentProjectMetaInfo>
          </value>
        </entry>
      </map>
    </option>
  </component>
</application>"#;

        let entries = parse_document(xml, home()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].opened_at, Some(42));
    }

    #[test]
    fn one_malformed_record_does_not_poison_the_rest() {
        let mut map = String::new();
        for i in 0..10 {
            map.push_str(&format!(
                r#"<entry key="/data/project-{i}">
  <value>
    <RecentProjectMetaInfo>
      <option name="projectOpenTimestamp" value="{i}" />
    </RecentProjectMetaInfo>
  </value>
</entry>
"#
            ));
        }
        // Timestamp is present but unreadable, so this record is dropped.
        map.push_str(
            r#"<entry key="/data/broken">
  <value>
    <RecentProjectMetaInfo>
      <option name="projectOpenTimestamp" value="not-a-number" />
    </RecentProjectMetaInfo>
  </value>
</entry>"#,
        );
        let xml = format!(
            r#"<application>
  <component name="RecentProjectsManager">
    <option name="additionalInfo">
      <map>{map}</map>
    </option>
  </component>
</application>"#
        );

        let entries = parse_document(&xml, home()).unwrap();
        assert_eq!(entries.len(), 10);
        assert!(entries.iter().all(|e| e.path != Path::new("/data/broken")));
    }

    #[test]
    fn entries_without_timestamp_metadata_are_kept() {
        let xml = r#"<application>
  <component name="RecentProjectsManager">
    <option name="additionalInfo">
      <map>
        <entry key="/data/untimed">
          <value>
            <RecentProjectMetaInfo />
          </value>
        </entry>
      </map>
    </option>
  </component>
</application>"#;

        let entries = parse_document(xml, home()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].opened_at, None);
    }

    #[test]
    fn empty_paths_are_discarded() {
        let xml = r#"<application>
  <component name="RecentProjectsManager">
    <option name="recentPaths">
      <list>
        <option value="" />
        <option value="/kept" />
      </list>
    </option>
  </component>
</application>"#;

        let entries = parse_document(xml, home()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path, PathBuf::from("/kept"));
    }

    #[test]
    fn unparseable_document_is_an_error() {
        assert!(parse_document("not xml at all <<<", home()).is_err());
    }

    #[test]
    fn missing_record_file_parses_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let install = IdeInstallation {
            product: find_by_code("GoLand").unwrap(),
            config_dir: dir.path().to_path_buf(),
            executable: None,
        };
        assert!(parse(&install, home()).is_empty());
    }

    #[test]
    fn garbage_record_file_parses_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("options")).unwrap();
        std::fs::write(dir.path().join("options/recentProjects.xml"), "<broken").unwrap();

        let install = IdeInstallation {
            product: find_by_code("GoLand").unwrap(),
            config_dir: dir.path().to_path_buf(),
            executable: None,
        };
        assert!(parse(&install, home()).is_empty());
    }

    #[test]
    fn record_file_round_trips_through_parse() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("options")).unwrap();
        std::fs::write(
            dir.path().join("options/recentProjects.xml"),
            modern_record(),
        )
        .unwrap();

        let install = IdeInstallation {
            product: find_by_code("GoLand").unwrap(),
            config_dir: dir.path().to_path_buf(),
            executable: None,
        };
        let entries = parse(&install, home());
        assert_eq!(entries.len(), 2);
    }
}
