//! File-backed key/value store
//!
//! The console's stand-in for browser local storage: one JSON object on
//! disk, keys `cart`, `token` and `user`. Every write re-reads the file and
//! replaces one key, so several handles on the same path behave like
//! several tabs: no locking, last write wins.

use parking_lot::Mutex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::AppResult;
use crate::events::{AppEvent, EventBus};

pub const CART_KEY: &str = "cart";
pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

static NEXT_ORIGIN: AtomicU64 = AtomicU64::new(1);

#[derive(Debug)]
pub struct LocalStore {
    path: PathBuf,
    origin: u64,
    bus: EventBus,
    // serializes writers within this handle only
    write_lock: Mutex<()>,
}

impl LocalStore {
    /// Open (or lazily create) the store at `path`
    pub fn open(path: impl AsRef<Path>, bus: EventBus) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        Ok(Self {
            path,
            origin: NEXT_ORIGIN.fetch_add(1, Ordering::Relaxed),
            bus,
            write_lock: Mutex::new(()),
        })
    }

    /// Identifies this handle in `StorageChanged` events
    pub fn origin(&self) -> u64 {
        self.origin
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    fn read_all(&self) -> AppResult<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) | Err(_) => {
                tracing::warn!(path = %self.path.display(), "store file is corrupt, starting empty");
                Ok(Map::new())
            }
        }
    }

    /// Sibling temp file, one per handle
    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(format!(".{}.tmp", self.origin));
        PathBuf::from(tmp)
    }

    // atomic write: tmp file + rename
    fn write_all(&self, map: &Map<String, Value>) -> AppResult<()> {
        let content = serde_json::to_string_pretty(map)?;
        let tmp = self.tmp_path();
        std::fs::write(&tmp, content)?;
        if let Err(e) = std::fs::rename(&tmp, &self.path) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to replace store file");
            let _ = std::fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }

    /// Raw value for `key`
    pub fn get_raw(&self, key: &str) -> AppResult<Option<Value>> {
        Ok(self.read_all()?.remove(key))
    }

    /// Typed value for `key`; an unreadable value counts as missing
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        let Some(value) = self.get_raw(key)? else {
            return Ok(None);
        };
        match serde_json::from_value(value) {
            Ok(v) => Ok(Some(v)),
            Err(e) => {
                tracing::warn!(key, error = %e, "ignoring unreadable store value");
                Ok(None)
            }
        }
    }

    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> AppResult<()> {
        let value = serde_json::to_value(value)?;
        {
            let _guard = self.write_lock.lock();
            let mut map = self.read_all()?;
            map.insert(key.to_string(), value);
            self.write_all(&map)?;
        }
        self.changed(key);
        Ok(())
    }

    pub fn remove(&self, key: &str) -> AppResult<()> {
        let removed = {
            let _guard = self.write_lock.lock();
            let mut map = self.read_all()?;
            let removed = map.remove(key).is_some();
            if removed {
                self.write_all(&map)?;
            }
            removed
        };
        if removed {
            self.changed(key);
        }
        Ok(())
    }

    fn changed(&self, key: &str) {
        tracing::debug!(key, origin = self.origin, "store key written");
        self.bus.publish(AppEvent::StorageChanged {
            key: key.to_string(),
            origin: self.origin,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::drain;
    use tempfile::TempDir;

    #[test]
    fn test_set_get_remove() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::open(dir.path().join("s.json"), EventBus::new()).unwrap();
        assert_eq!(store.get::<String>(TOKEN_KEY).unwrap(), None);

        store.set(TOKEN_KEY, &"abc").unwrap();
        assert_eq!(store.get::<String>(TOKEN_KEY).unwrap().as_deref(), Some("abc"));

        store.remove(TOKEN_KEY).unwrap();
        assert_eq!(store.get::<String>(TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn test_two_handles_share_file_and_events() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("s.json");
        let bus = EventBus::new();
        let mut rx = bus.subscribe();
        let a = LocalStore::open(&path, bus.clone()).unwrap();
        let b = LocalStore::open(&path, bus).unwrap();

        a.set(TOKEN_KEY, &"t1").unwrap();
        b.set(USER_KEY, &serde_json::json!({"id": 1})).unwrap();
        assert_eq!(b.get::<String>(TOKEN_KEY).unwrap().as_deref(), Some("t1"));
        assert!(a.get_raw(USER_KEY).unwrap().is_some());

        let origins: Vec<u64> = drain(&mut rx)
            .into_iter()
            .filter_map(|e| match e {
                AppEvent::StorageChanged { origin, .. } => Some(origin),
                _ => None,
            })
            .collect();
        assert_eq!(origins, vec![a.origin(), b.origin()]);
    }

    #[test]
    fn test_corrupt_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("s.json");
        std::fs::write(&path, "{not json").unwrap();
        let store = LocalStore::open(&path, EventBus::new()).unwrap();
        assert!(store.get_raw(CART_KEY).unwrap().is_none());
        store.set(CART_KEY, &serde_json::json!({"items": []})).unwrap();
        assert!(store.get_raw(CART_KEY).unwrap().is_some());
    }

    #[test]
    fn test_write_replaces_file_without_leftovers() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("s.json");
        let a = LocalStore::open(&path, EventBus::new()).unwrap();
        let b = LocalStore::open(&path, EventBus::new()).unwrap();

        a.set(CART_KEY, &serde_json::json!([{"product_id": 1, "quantity": 2}])).unwrap();
        b.set(TOKEN_KEY, &"t1").unwrap();

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["s.json".to_string()]);

        let on_disk: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk[TOKEN_KEY], "t1");
        assert_eq!(on_disk[CART_KEY][0]["quantity"], 2);
    }

    #[test]
    fn test_failed_replace_keeps_previous_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("s.json");
        let store = LocalStore::open(&path, EventBus::new()).unwrap();
        store.set(TOKEN_KEY, &"kept").unwrap();

        // a directory squatting on the temp name makes the write fail
        std::fs::create_dir(store.tmp_path()).unwrap();
        assert!(store.set(TOKEN_KEY, &"lost").is_err());
        assert_eq!(store.get::<String>(TOKEN_KEY).unwrap().as_deref(), Some("kept"));
    }
}
