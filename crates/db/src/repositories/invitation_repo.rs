use sqlx::PgPool;

use crate::models::invitation::Invitation;

/// Column list for `invitations` queries.
const COLUMNS: &str = "id, layout_id, data, layout_config, translations, created_at, updated_at";

/// Read access to invitation snapshots.
pub struct InvitationRepo;

impl InvitationRepo {
    /// Find an invitation by ID.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Invitation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM invitations WHERE id = $1");
        sqlx::query_as::<_, Invitation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
