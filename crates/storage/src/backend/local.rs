//! Local filesystem backend.
//!
//! Objects are plain files under `root`, one file per key. Writes go to a
//! temporary file under `{root}/.staging/` first and are published with
//! `hard_link`, which fails if the destination exists. Readers therefore
//! never see partial files, even by listing a version directory, and
//! concurrent writers to one key resolve to exactly one winner.
//!
//! Content types are not persisted; readers infer them from the extension.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use super::{ObjectStore, StoredObject};
use crate::error::StoreError;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Directory under the root that holds in-flight writes. Dot-prefixed, so no
/// site path can name it.
pub const STAGING_DIR: &str = ".staging";

pub struct LocalObjectStore {
    root: PathBuf,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        // Keys are built by the version store, but refuse anything that
        // could escape the root regardless.
        if key.split('/').any(|s| s.is_empty() || s == "." || s == "..") || key.contains('\\') {
            return Err(StoreError::Unavailable(format!("refusing unsafe key '{key}'")));
        }
        Ok(self.root.join(key))
    }

    fn staging_dir(&self) -> PathBuf {
        self.root.join(STAGING_DIR)
    }

    fn temp_path(&self) -> PathBuf {
        let n = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        self.staging_dir().join(format!("{}-{n}.tmp", std::process::id()))
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn put_if_absent(
        &self,
        key: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<(), StoreError> {
        let target = self.path_for(key)?;
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::create_dir_all(self.staging_dir()).await?;

        let temp = self.temp_path();
        tokio::fs::write(&temp, &bytes).await?;

        let linked = tokio::fs::hard_link(&temp, &target).await;
        if let Err(e) = tokio::fs::remove_file(&temp).await {
            tracing::warn!(path = %temp.display(), error = %e, "Failed to remove temp file");
        }

        match linked {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                Err(StoreError::AlreadyExists(key.to_string()))
            }
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    async fn get(&self, key: &str) -> Result<Option<StoredObject>, StoreError> {
        let path = self.path_for(key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(StoredObject {
                bytes,
                content_type: None,
            })),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            // A directory where a file was expected is a miss, not an outage.
            Err(_) if path.is_dir() => Ok(None),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use assert_matches::assert_matches;

    use super::*;

    #[tokio::test]
    async fn put_get_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalObjectStore::new(dir.path());

        store
            .put_if_absent("sites/a/v1/index.html", b"<p>hi</p>".to_vec(), "text/html")
            .await
            .unwrap();

        let obj = store.get("sites/a/v1/index.html").await.unwrap().unwrap();
        assert_eq!(obj.bytes, b"<p>hi</p>");
        assert_eq!(obj.content_type, None);

        store.delete("sites/a/v1/index.html").await.unwrap();
        assert!(store.get("sites/a/v1/index.html").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn existing_key_is_never_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalObjectStore::new(dir.path());

        store.put_if_absent("k/file", b"first".to_vec(), "").await.unwrap();
        let second = store.put_if_absent("k/file", b"second".to_vec(), "").await;
        assert_matches!(second, Err(StoreError::AlreadyExists(_)));

        let obj = store.get("k/file").await.unwrap().unwrap();
        assert_eq!(obj.bytes, b"first");
    }

    #[tokio::test]
    async fn concurrent_writers_have_one_winner() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(LocalObjectStore::new(dir.path()));

        let tasks: Vec<_> = (0..8u8)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.put_if_absent("race/obj", vec![i], "").await })
            })
            .collect();

        let mut wins = 0;
        for task in tasks {
            if task.await.unwrap().is_ok() {
                wins += 1;
            }
        }
        assert_eq!(wins, 1);
    }

    #[tokio::test]
    async fn unsafe_keys_refused() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalObjectStore::new(dir.path());
        assert!(store.get("../etc/passwd").await.is_err());
        assert!(store.put_if_absent("a//b", vec![], "").await.is_err());
    }

    #[tokio::test]
    async fn writes_leave_nothing_beside_the_object() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalObjectStore::new(dir.path());
        store
            .put_if_absent("sites/a/v1/index.html", b"<p>hi</p>".to_vec(), "text/html")
            .await
            .unwrap();
        let _ = store.put_if_absent("sites/a/v1/index.html", vec![1], "").await;

        let names: Vec<_> = std::fs::read_dir(dir.path().join("sites/a/v1"))
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["index.html"]);

        let staged = std::fs::read_dir(dir.path().join(STAGING_DIR)).unwrap().count();
        assert_eq!(staged, 0);
    }

    #[tokio::test]
    async fn directory_read_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalObjectStore::new(dir.path());
        store.put_if_absent("sites/a/v1/x", vec![1], "").await.unwrap();
        assert!(store.get("sites/a/v1").await.unwrap().is_none());
    }
}
