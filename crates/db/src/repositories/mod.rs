//! Repository layer: one zero-sized struct per table family, async
//! associated functions taking the pool.

mod invitation_repo;
mod publish_record_repo;

pub use invitation_repo::InvitationRepo;
pub use publish_record_repo::PublishRecordRepo;
