/// Recent-search persistence.
///
/// A JSON array of the five most recent search requests, newest first,
/// stored under a fixed file name in the data directory. Missing or corrupt
/// files read as empty; write failures are logged and swallowed; history
/// is a convenience, never a blocker.
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use jobcross_common::model::SearchRequest;

const RECENT_SEARCHES_FILE: &str = "recent_searches.json";
const MAX_RECENT: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentSearch {
    pub skills: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub us_wide: bool,
    pub timestamp: DateTime<Utc>,
}

impl RecentSearch {
    pub fn from_request(request: &SearchRequest) -> Self {
        Self {
            skills: request.skills.clone(),
            interests: request.interests.clone(),
            location: request.location.clone(),
            us_wide: request.us_wide,
            timestamp: Utc::now(),
        }
    }

    pub fn to_request(&self) -> SearchRequest {
        SearchRequest {
            skills: self.skills.clone(),
            interests: self.interests.clone(),
            location: self.location.clone(),
            us_wide: self.us_wide,
        }
    }
}

pub struct RecentSearches {
    path: PathBuf,
}

impl RecentSearches {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(RECENT_SEARCHES_FILE),
        }
    }

    /// Newest-first list of recent searches. Any read or parse failure is
    /// treated as "no history yet".
    pub fn load(&self) -> Vec<RecentSearch> {
        let Ok(raw) = std::fs::read_to_string(&self.path) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "recent searches file unreadable, ignoring");
                Vec::new()
            }
        }
    }

    /// Prepend a search and truncate to the five most recent.
    pub fn record(&self, entry: RecentSearch) {
        let mut entries = self.load();
        entries.insert(0, entry);
        entries.truncate(MAX_RECENT);

        if let Some(parent) = self.path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                warn!(path = %parent.display(), error = %e, "could not create data directory");
                return;
            }
        }
        match serde_json::to_string_pretty(&entries) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&self.path, json) {
                    warn!(path = %self.path.display(), error = %e, "could not save recent searches");
                }
            }
            Err(e) => warn!(error = %e, "could not serialize recent searches"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(skills: &[&str]) -> RecentSearch {
        RecentSearch {
            skills: skills.iter().map(|s| s.to_string()).collect(),
            interests: vec![],
            location: "Denver, CO".to_string(),
            us_wide: true,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecentSearches::new(dir.path());
        assert!(store.load().is_empty());
    }

    #[test]
    fn corrupt_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(RECENT_SEARCHES_FILE), "not json").unwrap();
        let store = RecentSearches::new(dir.path());
        assert!(store.load().is_empty());
    }

    #[test]
    fn newest_first_capped_at_five() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecentSearches::new(dir.path());
        for i in 0..7 {
            let skill = format!("skill{i}");
            store.record(entry(&[skill.as_str()]));
        }
        let entries = store.load();
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0].skills, vec!["skill6"]);
        assert_eq!(entries[4].skills, vec!["skill2"]);
    }

    #[test]
    fn round_trips_request_fields() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecentSearches::new(dir.path());
        store.record(entry(&["rust", "tokio"]));
        let request = store.load()[0].to_request();
        assert_eq!(request.skills, vec!["rust", "tokio"]);
        assert_eq!(request.location, "Denver, CO");
        assert!(request.us_wide);
    }
}
