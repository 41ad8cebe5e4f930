//! Read-only access to invitation snapshots.

mod memory;
mod pg;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use vows_core::error::CoreError;

pub use memory::MemoryInvitationSource;
pub use pg::PgInvitationSource;

/// The parts of an invitation the renderer needs, captured at publish time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitationSnapshot {
    pub id: String,
    pub layout_id: String,
    pub data: Value,
    pub layout_config: Value,
    pub translations: Value,
}

impl InvitationSnapshot {
    /// Snapshot with empty layout config and translations.
    pub fn new(id: impl Into<String>, layout_id: impl Into<String>, data: Value) -> Self {
        Self {
            id: id.into(),
            layout_id: layout_id.into(),
            data,
            layout_config: Value::Object(Default::default()),
            translations: Value::Object(Default::default()),
        }
    }
}

#[async_trait]
pub trait InvitationSource: Send + Sync {
    /// Load the current snapshot, or [`CoreError::NotFound`].
    async fn load(&self, invitation_id: &str) -> Result<InvitationSnapshot, CoreError>;
}

fn invitation_not_found(invitation_id: &str) -> CoreError {
    CoreError::NotFound {
        entity: "Invitation",
        id: invitation_id.to_string(),
    }
}
