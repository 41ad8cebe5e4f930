use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use vows_core::error::CoreError;

use super::{invitation_not_found, InvitationSnapshot, InvitationSource};

/// In-memory invitation source. Tests edit invitations with [`Self::upsert`].
#[derive(Debug, Default)]
pub struct MemoryInvitationSource {
    invitations: RwLock<HashMap<String, InvitationSnapshot>>,
}

impl MemoryInvitationSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn upsert(&self, snapshot: InvitationSnapshot) {
        self.invitations
            .write()
            .await
            .insert(snapshot.id.clone(), snapshot);
    }
}

#[async_trait]
impl InvitationSource for MemoryInvitationSource {
    async fn load(&self, invitation_id: &str) -> Result<InvitationSnapshot, CoreError> {
        self.invitations
            .read()
            .await
            .get(invitation_id)
            .cloned()
            .ok_or_else(|| invitation_not_found(invitation_id))
    }
}
