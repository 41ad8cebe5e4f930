//! Version store: immutable, write-once site bundles in an object store.
//!
//! Objects live under `sites/{subdomain}/v{version}/...`. A version is
//! claimed by creating its manifest; after that, nothing under the prefix is
//! ever overwritten.

pub mod backend;
pub mod config;
pub mod error;
pub mod manifest;
pub mod version_store;

pub use backend::{ObjectStore, StoredObject};
pub use config::{build_object_store, StorageBackendKind, StorageConfig};
pub use error::StoreError;
pub use manifest::{Manifest, ManifestEntry};
pub use version_store::{SiteFile, VersionStore};
