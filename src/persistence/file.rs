//! JSON file backed store (native)
//!
//! The whole map is rewritten on each change: write to `<path>.tmp`, then rename
//! over the real file so a crash never leaves a half-written save behind.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::KeyValueStore;

#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open a store at `path`. A missing or unreadable file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(entries) => entries,
                Err(e) => {
                    log::warn!("Ignoring corrupt store {}: {}", path.display(), e);
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(),
        };
        log::debug!("Opened store {} ({} keys)", path.display(), entries.len());
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating {}", dir.display()))?;
        }
        let tmp = self.path.with_extension("json.tmp");
        let data = serde_json::to_vec_pretty(&self.entries)?;
        fs::write(&tmp, data).with_context(|| format!("writing {}", tmp.display()))?;
        atomic_rename(&tmp, &self.path)
    }
}

/// Replace `to` with `from`. Clears the target first for platforms that
/// refuse to rename over an existing file.
fn atomic_rename(from: &Path, to: &Path) -> Result<()> {
    if cfg!(windows) && to.exists() {
        let _ = fs::remove_file(to);
    }
    fs::rename(from, to)
        .with_context(|| format!("replacing {} with {}", to.display(), from.display()))
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("duck_hunt_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_values_survive_reopen() {
        let path = temp_path("reopen");
        {
            let mut store = JsonFileStore::open(&path);
            store.set("duck_hunt_attempts", "2").unwrap();
            store.set("duck_hunt_recovery_time", "123").unwrap();
            store.remove("duck_hunt_recovery_time").unwrap();
        }
        let store = JsonFileStore::open(&path);
        assert_eq!(store.get("duck_hunt_attempts").as_deref(), Some("2"));
        assert!(store.get("duck_hunt_recovery_time").is_none());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_unwritable_path_reports_context() {
        let blocker = temp_path("blocker");
        fs::write(&blocker, "not a directory").unwrap();
        let mut store = JsonFileStore::open(blocker.join("save.json"));
        let err = store.set("duck_hunt_attempts", "1").unwrap_err();
        assert!(format!("{:#}", err).contains("creating"));
        // The in-memory value is still readable
        assert_eq!(store.get("duck_hunt_attempts").as_deref(), Some("1"));
        let _ = fs::remove_file(&blocker);
    }

    #[test]
    fn test_corrupt_file_opens_empty() {
        let path = temp_path("corrupt");
        fs::write(&path, "{ not json").unwrap();
        let store = JsonFileStore::open(&path);
        assert!(store.get("duck_hunt_attempts").is_none());
        let _ = fs::remove_file(&path);
    }
}
