//! Authoritative publish state per subdomain.

mod memory;
pub(crate) mod pg;

use async_trait::async_trait;
use vows_core::error::CoreError;
use vows_core::record::PublishRecord;
use vows_core::types::Version;

pub use memory::MemoryRecordStore;
pub use pg::PgRecordStore;

/// Durable, strongly consistent store of [`PublishRecord`]s.
///
/// Every mutation is atomic on its own. Callers serialize the
/// reserve → write → commit sequence per subdomain.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Load a record with its full history.
    async fn find(&self, subdomain: &str) -> Result<Option<PublishRecord>, CoreError>;

    /// Create the record if absent and return whatever record now exists.
    ///
    /// The returned record may be owned by another invitation.
    async fn claim(&self, subdomain: &str, invitation_id: &str)
        -> Result<PublishRecord, CoreError>;

    /// Hand out the next never-used version number.
    async fn reserve_version(&self, subdomain: &str) -> Result<Version, CoreError>;

    /// Append a reserved version to the history and make it current.
    async fn commit_version(
        &self,
        subdomain: &str,
        version: Version,
    ) -> Result<PublishRecord, CoreError>;

    /// Repoint `current_version` at an existing history entry.
    ///
    /// Fails with [`CoreError::UnknownVersion`] if `version` was never
    /// published for `subdomain`.
    async fn set_current(&self, subdomain: &str, version: Version) -> Result<(), CoreError>;

    /// Cheap reachability probe.
    async fn ping(&self) -> Result<(), CoreError>;
}

fn record_not_found(subdomain: &str) -> CoreError {
    CoreError::NotFound {
        entity: "PublishRecord",
        id: subdomain.to_string(),
    }
}
