//! Persisted reviewer/branch rosters.
//!
//! Rosters are stored as comma-separated strings in a JSON file, keyed by a
//! per-project namespace. Reads always hit the file so an edit between two
//! dispatches is picked up; saves fully replace the prior value.

use crate::error::Error;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Key namespace for ordinary projects.
pub const DEFAULT_KEY_PREFIX: &str = "gerrit";

/// Key namespace for `cores` projects, so their rosters persist separately.
pub const CORES_KEY_PREFIX: &str = "gerritCores";

/// Parse a comma-separated roster string.
///
/// Entries are trimmed; empty entries and entries starting with `#`
/// (disabled/comments) are dropped.
pub fn parse_roster(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty() && !entry.starts_with('#'))
        .map(String::from)
        .collect()
}

/// The two store keys a workflow context reads and writes.
///
/// Derived once per page view from the change's project name and carried
/// explicitly from then on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsKeys {
    pub reviewers: String,
    pub branches: String,
}

impl SettingsKeys {
    /// Derive the keys for a project name.
    pub fn for_project(project: &str) -> Self {
        let prefix = if project.contains("cores") {
            CORES_KEY_PREFIX
        } else {
            DEFAULT_KEY_PREFIX
        };
        Self {
            reviewers: format!("{}Reviewers", prefix),
            branches: format!("{}Branches", prefix),
        }
    }
}

/// JSON-file key/value store for roster strings.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load_map(&self) -> Result<BTreeMap<String, String>, Error> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(Error::internal(format!(
                    "Failed to read settings store: {}",
                    e
                )))
            }
        };
        serde_json::from_str(&raw)
            .map_err(|e| Error::internal(format!("Corrupt settings store: {}", e)))
    }

    fn save_map(&self, map: &BTreeMap<String, String>) -> Result<(), Error> {
        let raw = serde_json::to_string_pretty(map)?;
        std::fs::write(&self.path, raw)
            .map_err(|e| Error::internal(format!("Failed to save settings store: {}", e)))
    }

    /// Get the raw string stored under `key`, if any.
    pub fn get(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.load_map()?.get(key).cloned())
    }

    /// Store `value` under `key`, replacing any prior content.
    pub fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        let mut map = self.load_map()?;
        map.insert(key.to_string(), value.to_string());
        self.save_map(&map)
    }

    /// Read and parse the roster stored under `key`; missing keys yield an
    /// empty roster.
    pub fn load_roster(&self, key: &str) -> Result<Vec<String>, Error> {
        Ok(parse_roster(&self.get(key)?.unwrap_or_default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_roster_filters_entries() {
        assert_eq!(
            parse_roster("alice, #bob, , carol"),
            vec!["alice".to_string(), "carol".to_string()]
        );
    }

    #[test]
    fn test_parse_roster_empty_input() {
        assert!(parse_roster("").is_empty());
        assert!(parse_roster("  ,  , #all-disabled").is_empty());
    }

    #[test]
    fn test_keys_for_ordinary_project() {
        let keys = SettingsKeys::for_project("platform/ui");
        assert_eq!(keys.reviewers, "gerritReviewers");
        assert_eq!(keys.branches, "gerritBranches");
    }

    #[test]
    fn test_keys_for_cores_project() {
        let keys = SettingsKeys::for_project("platform/cores-runtime");
        assert_eq!(keys.reviewers, "gerritCoresReviewers");
        assert_eq!(keys.branches, "gerritCoresBranches");
    }

    #[test]
    fn test_store_roundtrip() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json"));

        assert_eq!(store.get("gerritReviewers").unwrap(), None);

        store.set("gerritReviewers", "alice,bob").unwrap();
        assert_eq!(
            store.get("gerritReviewers").unwrap().as_deref(),
            Some("alice,bob")
        );
    }

    #[test]
    fn test_save_replaces_prior_content() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json"));

        store.set("gerritBranches", "stable-1.0,stable-2.0").unwrap();
        store.set("gerritBranches", "stable-3.0").unwrap();

        assert_eq!(
            store.load_roster("gerritBranches").unwrap(),
            vec!["stable-3.0".to_string()]
        );
    }

    #[test]
    fn test_load_roster_reads_fresh() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json"));

        store.set("gerritReviewers", "alice").unwrap();
        assert_eq!(store.load_roster("gerritReviewers").unwrap(), vec!["alice"]);

        // An edit between dispatches is visible on the next read.
        store.set("gerritReviewers", "alice,#bob,carol").unwrap();
        assert_eq!(
            store.load_roster("gerritReviewers").unwrap(),
            vec!["alice".to_string(), "carol".to_string()]
        );
    }
}
