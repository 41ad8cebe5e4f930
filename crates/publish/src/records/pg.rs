use async_trait::async_trait;
use vows_core::error::CoreError;
use vows_core::record::PublishRecord;
use vows_core::types::Version;
use vows_db::repositories::PublishRecordRepo;
use vows_db::DbPool;

use super::{record_not_found, RecordStore};

/// Postgres-backed record store over `publish_records` / `published_versions`.
#[derive(Clone)]
pub struct PgRecordStore {
    pool: DbPool,
}

impl PgRecordStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map a database failure onto the core taxonomy. Connectivity problems are
/// transient; everything else is internal.
pub(crate) fn db_error(err: sqlx::Error) -> CoreError {
    match &err {
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => CoreError::Unavailable(err.to_string()),
        _ => CoreError::Internal(err.to_string()),
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn find(&self, subdomain: &str) -> Result<Option<PublishRecord>, CoreError> {
        PublishRecordRepo::find_with_history(&self.pool, subdomain)
            .await
            .map_err(db_error)
    }

    async fn claim(
        &self,
        subdomain: &str,
        invitation_id: &str,
    ) -> Result<PublishRecord, CoreError> {
        let row = PublishRecordRepo::claim(&self.pool, subdomain, invitation_id)
            .await
            .map_err(db_error)?;
        let versions = PublishRecordRepo::list_versions(&self.pool, subdomain)
            .await
            .map_err(db_error)?;
        Ok(row.into_record(versions))
    }

    async fn reserve_version(&self, subdomain: &str) -> Result<Version, CoreError> {
        PublishRecordRepo::reserve_version(&self.pool, subdomain)
            .await
            .map_err(db_error)?
            .ok_or_else(|| record_not_found(subdomain))
    }

    async fn commit_version(
        &self,
        subdomain: &str,
        version: Version,
    ) -> Result<PublishRecord, CoreError> {
        let committed = PublishRecordRepo::commit_version(&self.pool, subdomain, version)
            .await
            .map_err(db_error)?;
        if committed.is_none() {
            return Err(CoreError::Internal(format!(
                "{subdomain} v{version} was never reserved or is superseded"
            )));
        }

        PublishRecordRepo::find_with_history(&self.pool, subdomain)
            .await
            .map_err(db_error)?
            .ok_or_else(|| record_not_found(subdomain))
    }

    async fn set_current(&self, subdomain: &str, version: Version) -> Result<(), CoreError> {
        let updated = PublishRecordRepo::set_current_version(&self.pool, subdomain, version)
            .await
            .map_err(db_error)?;
        if !updated {
            return Err(CoreError::UnknownVersion {
                subdomain: subdomain.to_string(),
                version,
            });
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), CoreError> {
        vows_db::health_check(&self.pool).await.map_err(db_error)
    }
}
