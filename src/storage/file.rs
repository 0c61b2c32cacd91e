//! File-backed blob storage

use super::StorageAdapter;
use crate::config::ensure_app_data_dir;
use crate::error::{Result, ResultExt};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Stores each blob as `<root>/<sanitized name>.json`
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Create storage rooted at `root` (created lazily on first write)
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Storage rooted at the application data directory
    pub fn in_app_data_dir() -> Result<Self> {
        Ok(Self::new(ensure_app_data_dir()?))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File path used for blob `name`
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(sanitize_name(name))
    }
}

/// Map a blob name onto a single safe file name
///
/// Anything other than ASCII alphanumerics, `-`, `_` and `.` becomes `_`, so
/// `data-charts/config` is stored as `data-charts_config.json`.
fn sanitize_name(name: &str) -> String {
    let mut file: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if file.is_empty() || file.chars().all(|c| c == '.') {
        file = format!("_{}", file);
    }
    file.push_str(".json");
    file
}

impl StorageAdapter for FileStorage {
    fn get(&self, name: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(name);
        match std::fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {:?}", path)),
        }
    }

    fn set(&self, name: &str, bytes: &[u8]) -> Result<()> {
        std::fs::create_dir_all(&self.root)
            .with_context(|| format!("Failed to create storage directory {:?}", self.root))?;

        let path = self.path_for(name);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, bytes).with_context(|| format!("Failed to write {:?}", tmp))?;
        std::fs::rename(&tmp, &path)
            .with_context(|| format!("Failed to move snapshot into {:?}", path))?;
        tracing::trace!("Wrote {} bytes to {:?}", bytes.len(), path);
        Ok(())
    }

    fn remove(&self, name: &str) -> Result<()> {
        let path = self.path_for(name);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to remove {:?}", path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("data-charts/config"), "data-charts_config.json");
        assert_eq!(sanitize_name("a b:c"), "a_b_c.json");
        assert_eq!(sanitize_name("plain_name.v1"), "plain_name.v1.json");
        assert_eq!(sanitize_name(""), "_.json");
        assert_eq!(sanitize_name(".."), "_...json");
    }

    #[test]
    fn test_file_storage_roundtrip() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("nested"));

        assert!(storage.get("data-charts/config").unwrap().is_none());

        storage.set("data-charts/config", b"{\"a\":1}").unwrap();
        let read = storage.get("data-charts/config").unwrap();
        assert_eq!(read.as_deref(), Some(&b"{\"a\":1}"[..]));
        assert!(storage.path_for("data-charts/config").exists());
    }

    #[test]
    fn test_file_storage_overwrite_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path());

        storage.set("blob", b"one").unwrap();
        storage.set("blob", b"two").unwrap();

        assert_eq!(storage.get("blob").unwrap().as_deref(), Some(&b"two"[..]));
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_file_storage_remove() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path());

        storage.remove("never-written").unwrap();

        storage.set("blob", b"x").unwrap();
        storage.remove("blob").unwrap();
        assert!(storage.get("blob").unwrap().is_none());
    }
}
