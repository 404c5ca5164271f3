//! Object store abstraction
//!
//! The pipeline reads raw documents from, and writes artifacts to, a
//! key-addressed store. The trait keeps client configuration out of the
//! pipeline; the filesystem backend is the default and what tests use.

use crate::error::{IngotError, Result};
use crate::extract::DocFormat;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Key-addressed object storage
pub trait ObjectStore: Send + Sync {
    /// List keys under a prefix, filtered to recognized document extensions,
    /// in stable (sorted) order
    fn list(&self, prefix: &str) -> Result<Vec<String>>;

    /// Read an object's bytes
    fn read(&self, key: &str) -> Result<Vec<u8>>;

    /// Write a text object, creating intermediate prefixes as needed
    fn write(&self, key: &str, text: &str) -> Result<()>;
}

/// Filesystem-backed object store rooted at a directory
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

impl ObjectStore for FsObjectStore {
    fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let base = self.resolve(prefix.trim_end_matches('/'));
        if !base.exists() {
            return Ok(Vec::new());
        }

        let mut keys = Vec::new();
        for entry in WalkDir::new(&base).follow_links(true) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let key = relative_key(&self.root, entry.path());
            if DocFormat::is_recognized(&key) {
                keys.push(key);
            }
        }

        keys.sort();
        Ok(keys)
    }

    fn read(&self, key: &str) -> Result<Vec<u8>> {
        let path = self.resolve(key);
        std::fs::read(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => IngotError::ObjectNotFound(key.to_string()),
            _ => IngotError::Io(e),
        })
    }

    fn write(&self, key: &str, text: &str) -> Result<()> {
        let path = self.resolve(key);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, text)?;
        Ok(())
    }
}

fn relative_key(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().join("raw");
        std::fs::create_dir_all(&raw).unwrap();
        std::fs::write(raw.join("b.txt"), "b").unwrap();
        std::fs::write(raw.join("a.md"), "a").unwrap();
        std::fs::write(raw.join("skip.zip"), "z").unwrap();

        let store = FsObjectStore::new(dir.path());
        let keys = store.list("raw/").unwrap();
        assert_eq!(keys, vec!["raw/a.md", "raw/b.txt"]);
    }

    #[test]
    fn test_read_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsObjectStore::new(dir.path());
        let err = store.read("raw/nope.txt").unwrap_err();
        assert!(matches!(err, IngotError::ObjectNotFound(_)));
    }

    #[test]
    fn test_write_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsObjectStore::new(dir.path());
        store.write("chunked/chunks.jsonl", "{}\n").unwrap();
        let bytes = store.read("chunked/chunks.jsonl").unwrap();
        assert_eq!(bytes, b"{}\n");
    }

    #[test]
    fn test_missing_prefix_lists_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsObjectStore::new(dir.path());
        assert!(store.list("raw/").unwrap().is_empty());
    }
}
