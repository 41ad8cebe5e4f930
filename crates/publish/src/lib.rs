//! Publish orchestrator.
//!
//! Turns an invitation snapshot into a new immutable site version, moves the
//! subdomain's current-version pointer, and rolls it back on request. The
//! authoritative publish state lives behind [`RecordStore`]; invitation
//! snapshots are read through [`InvitationSource`].

pub mod invitations;
pub mod locks;
pub mod orchestrator;
pub mod records;
pub mod retry;

pub use invitations::{
    InvitationSnapshot, InvitationSource, MemoryInvitationSource, PgInvitationSource,
};
pub use locks::SubdomainLocks;
pub use orchestrator::{PublishOutcome, Publisher, PublisherConfig};
pub use records::{MemoryRecordStore, PgRecordStore, RecordStore};
pub use retry::RetryPolicy;
