// ── Session persistence ──
//
// Only the entity list, stats and cache timestamps survive a restart.
// Loading/error flags, selection, query, filter and named views are
// transient and never written.

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::cache::CacheView;
use super::policy::CachePolicy;
use crate::error::CoreError;
use crate::model::Entity;

/// String key/value store scoped to a session.
pub trait SessionStorage: Debug + Send + Sync {
    fn load(&self, key: &str) -> Result<Option<String>, CoreError>;
    fn store(&self, key: &str, value: &str) -> Result<(), CoreError>;
    fn remove(&self, key: &str) -> Result<(), CoreError>;
}

/// Persisted layout: `{ "items": [...], "stats": ..., "timestamps": { "list": <epoch ms> } }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct PersistedCache<E: Entity> {
    #[serde(default = "Vec::new")]
    pub items: Vec<E>,
    #[serde(default)]
    pub stats: Option<E::Stats>,
    #[serde(default)]
    pub timestamps: BTreeMap<String, i64>,
}

impl<E: Entity> PersistedCache<E> {
    pub(crate) fn from_view(view: &CacheView<E>) -> Self {
        Self {
            items: view.items.iter().map(|e| E::clone(e)).collect(),
            stats: view.stats.clone(),
            timestamps: view
                .timestamps
                .iter()
                .map(|(k, ts)| (k.clone(), ts.timestamp_millis()))
                .collect(),
        }
    }

    /// Timestamps still inside the cache window at `now`. Unparseable
    /// and stale entries are dropped.
    pub fn fresh_timestamps(
        &self,
        policy: &CachePolicy,
        now: DateTime<Utc>,
    ) -> BTreeMap<String, DateTime<Utc>> {
        self.timestamps
            .iter()
            .filter_map(|(k, ms)| Some((k.clone(), DateTime::from_timestamp_millis(*ms)?)))
            .filter(|(_, ts)| policy.is_fresh(*ts, now))
            .collect()
    }
}

// ── Backends ─────────────────────────────────────────────────────────

/// Process-lifetime storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: DashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    fn store(&self, key: &str, value: &str) -> Result<(), CoreError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One `{key}.json` file per entry inside a directory.
///
/// Lets consecutive CLI invocations share a cache window.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

fn storage_err(path: &Path, e: &std::io::Error) -> CoreError {
    CoreError::Storage {
        message: format!("{}: {e}", path.display()),
    }
}

impl SessionStorage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, CoreError> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(storage_err(&path, &e)),
        }
    }

    fn store(&self, key: &str, value: &str) -> Result<(), CoreError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| storage_err(&self.dir, &e))?;
        let path = self.path_for(key);
        // Readers never observe a half-written entry.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value).map_err(|e| storage_err(&tmp, &e))?;
        std::fs::rename(&tmp, &path).map_err(|e| storage_err(&path, &e))?;
        trace!(path = %path.display(), bytes = value.len(), "stored session entry");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        let path = self.path_for(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_err(&path, &e)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use chrono::TimeZone;
    use serde_json::json;

    use super::*;
    use crate::model::Booking;

    #[test]
    fn file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("cache"));

        assert_eq!(storage.load("tour-storage").unwrap(), None);
        storage.store("tour-storage", "{\"items\":[]}").unwrap();
        assert_eq!(
            storage.load("tour-storage").unwrap().as_deref(),
            Some("{\"items\":[]}")
        );
        storage.remove("tour-storage").unwrap();
        storage.remove("tour-storage").unwrap();
        assert_eq!(storage.load("tour-storage").unwrap(), None);
    }

    #[test]
    fn stale_timestamps_are_dropped() {
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let fresh = now - chrono::Duration::seconds(60);
        let stale = now - chrono::Duration::seconds(600);

        let persisted: PersistedCache<Booking> = serde_json::from_value(json!({
            "items": [],
            "timestamps": {
                "list": stale.timestamp_millis(),
                "stats": fresh.timestamp_millis()
            }
        }))
        .unwrap();

        let policy = CachePolicy::default().with_max_age(Duration::from_secs(300));
        let kept = persisted.fresh_timestamps(&policy, now);
        assert_eq!(kept.len(), 1);
        assert!(kept.contains_key("stats"));
    }

    #[test]
    fn missing_sections_default() {
        let persisted: PersistedCache<Booking> = serde_json::from_value(json!({})).unwrap();
        assert!(persisted.items.is_empty());
        assert!(persisted.stats.is_none());
    }
}
