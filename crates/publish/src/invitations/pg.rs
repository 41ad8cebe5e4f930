use async_trait::async_trait;
use vows_core::error::CoreError;
use vows_db::repositories::InvitationRepo;
use vows_db::DbPool;

use super::{invitation_not_found, InvitationSnapshot, InvitationSource};
use crate::records::pg::db_error;

/// Reads snapshots from the `invitations` table.
#[derive(Clone)]
pub struct PgInvitationSource {
    pool: DbPool,
}

impl PgInvitationSource {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InvitationSource for PgInvitationSource {
    async fn load(&self, invitation_id: &str) -> Result<InvitationSnapshot, CoreError> {
        let invitation = InvitationRepo::find_by_id(&self.pool, invitation_id)
            .await
            .map_err(db_error)?
            .ok_or_else(|| invitation_not_found(invitation_id))?;

        Ok(InvitationSnapshot {
            id: invitation.id,
            layout_id: invitation.layout_id,
            data: invitation.data,
            layout_config: invitation.layout_config,
            translations: invitation.translations,
        })
    }
}
