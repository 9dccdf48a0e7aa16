use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::Result;

/// Durable storage for the serialized session record.
///
/// The session manager is the only component that reads or writes through
/// this trait; an absent record means logged-out.
pub trait SessionStore: Send + Sync {
    /// Loads the raw stored record, if any.
    fn load(&self) -> Result<Option<String>>;
    /// Replaces the stored record.
    fn save(&self, raw: &str) -> Result<()>;
    /// Removes the stored record. Removing an absent record is not an error.
    fn clear(&self) -> Result<()>;
}

/// A session store backed by a single JSON file.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Creates a store at the given path. The file is created lazily on the
    /// first `save`.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, raw: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, raw)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// An in-memory session store for tests.
#[derive(Default)]
pub struct MemorySessionStore {
    record: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with a raw record, bypassing the session manager.
    pub fn with_record(raw: &str) -> Self {
        Self {
            record: Mutex::new(Some(raw.to_string())),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.record.lock().unwrap().clone())
    }

    fn save(&self, raw: &str) -> Result<()> {
        *self.record.lock().unwrap() = Some(raw.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.record.lock().unwrap() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));

        assert_eq!(store.load().unwrap(), None);
        store.save(r#"{"identity":"42"}"#).unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some(r#"{"identity":"42"}"#));
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn file_store_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));
        store.clear().unwrap();
        store.clear().unwrap();
    }

    #[test]
    fn file_store_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested").join("session.json"));
        store.save("{}").unwrap();
        assert!(store.load().unwrap().is_some());
    }
}
