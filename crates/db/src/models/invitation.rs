//! Invitation snapshot model (read-only for the publish pipeline).

use serde::Serialize;
use sqlx::FromRow;
use vows_core::types::Timestamp;

/// A row from the `invitations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Invitation {
    pub id: String,
    pub layout_id: String,
    pub data: serde_json::Value,
    pub layout_config: serde_json::Value,
    pub translations: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
