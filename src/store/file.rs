//! File-backed slot store.
//!
//! All slots live in one JSON object mapping key to the serialized record,
//! the same shape a browser's local storage has. The file is re-read on every
//! `get`, so two processes pointed at one file observe each other's writes
//! (and can race each other exactly like two tabs).

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use uuid::Uuid;

use crate::observability::metrics;
use crate::store::{StateStore, StoreError};

type Slots = BTreeMap<String, String>;

/// A store persisted to a single JSON file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every slot. A missing file is empty; a corrupted one is treated
    /// as empty and will be replaced on the next write.
    fn read_slots(&self) -> Result<Slots, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Slots::new()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_reader(BufReader::new(file)) {
            Ok(slots) => Ok(slots),
            Err(e) => {
                tracing::warn!(path = ?self.path, error = %e, "Storage file is corrupted, ignoring contents");
                metrics::record_storage_fallback("corrupt_file");
                Ok(Slots::new())
            }
        }
    }

    fn write_slots(&self, slots: &Slots) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let tmp = temp_sibling(&self.path);
        {
            let mut writer = BufWriter::new(File::create(&tmp)?);
            serde_json::to_writer(&mut writer, slots)?;
            writer.flush()?;
        }
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }
}

/// A per-write temp file next to `path`, never equal to it.
fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(format!(".{}.tmp", Uuid::new_v4()));
    path.with_file_name(name)
}

impl StateStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_slots()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut slots = self.read_slots()?;
        slots.insert(key.to_string(), value.to_string());
        self.write_slots(&slots)?;
        tracing::trace!(path = ?self.path, key, "Slot written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("attempt-throttle-{}-{}.json", name, Uuid::new_v4()))
    }

    #[test]
    fn test_temp_sibling_is_unique() {
        let path = temp_path("sibling").with_extension("tmp");
        let first = temp_sibling(&path);
        let second = temp_sibling(&path);
        assert_ne!(first, path);
        assert_ne!(first, second);
        assert_eq!(first.parent(), path.parent());
    }

    #[test]
    fn test_tmp_extension_store_persists() {
        let path = temp_path("ext").with_extension("tmp");
        let store = FileStore::new(&path);
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        assert_eq!(FileStore::new(&path).get("a").unwrap().as_deref(), Some("1"));

        fs::remove_file(&path).unwrap_or_default();
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let store = FileStore::new(temp_path("missing"));
        assert_eq!(store.get("anything").unwrap(), None);
    }

    #[test]
    fn test_persistence() {
        let path = temp_path("persistence");

        let store = FileStore::new(&path);
        store.set("a", r#"{"attempts":1,"locked":false}"#).unwrap();
        store.set("b", "other").unwrap();

        // A second handle sees the same slots
        let reopened = FileStore::new(&path);
        assert_eq!(
            reopened.get("a").unwrap().as_deref(),
            Some(r#"{"attempts":1,"locked":false}"#)
        );
        assert_eq!(reopened.get("b").unwrap().as_deref(), Some("other"));

        fs::remove_file(&path).unwrap_or_default();
    }

    #[test]
    fn test_corrupted_file_is_replaced() {
        let path = temp_path("corrupted");
        fs::write(&path, "{{{ definitely not json").unwrap();

        let store = FileStore::new(&path);
        assert_eq!(store.get("a").unwrap(), None);

        store.set("a", "1").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));

        fs::remove_file(&path).unwrap_or_default();
    }
}
