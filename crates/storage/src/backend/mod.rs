//! Object store backends.
//!
//! The only write primitive is create-if-absent. Backends must make it
//! atomic: of several concurrent writers to one key, exactly one succeeds
//! and the rest get [`StoreError::AlreadyExists`].

pub mod local;
pub mod memory;
pub mod s3;

use async_trait::async_trait;

use crate::error::StoreError;

pub use local::LocalObjectStore;
pub use memory::MemoryObjectStore;
pub use s3::S3ObjectStore;

/// An object read back from a backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    /// Content type recorded at write time, when the backend keeps one.
    pub content_type: Option<String>,
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Backend name for logs and health output.
    fn name(&self) -> &'static str;

    /// Write `bytes` at `key` unless an object already exists there.
    async fn put_if_absent(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StoreError>;

    /// Read an object. `Ok(None)` when the key does not exist.
    async fn get(&self, key: &str) -> Result<Option<StoredObject>, StoreError>;

    /// Delete an object. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}
