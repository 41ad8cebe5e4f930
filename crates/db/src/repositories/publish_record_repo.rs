//! Repository for `publish_records` and `published_versions`.

use sqlx::PgPool;
use vows_core::record::PublishRecord;
use vows_core::types::Version;

use crate::models::publish_record::{PublishRecordRow, PublishedVersionRow};

/// Column list for `publish_records` queries.
const RECORD_COLUMNS: &str = "\
    subdomain, invitation_id, current_version, last_assigned_version, created_at, updated_at";

/// Column list for `published_versions` queries.
const VERSION_COLUMNS: &str = "subdomain, version, created_at";

/// Provides publish-state operations keyed by subdomain.
pub struct PublishRecordRepo;

impl PublishRecordRepo {
    /// Find a record row by subdomain.
    pub async fn find(
        pool: &PgPool,
        subdomain: &str,
    ) -> Result<Option<PublishRecordRow>, sqlx::Error> {
        let query = format!("SELECT {RECORD_COLUMNS} FROM publish_records WHERE subdomain = $1");
        sqlx::query_as::<_, PublishRecordRow>(&query)
            .bind(subdomain)
            .fetch_optional(pool)
            .await
    }

    /// List a subdomain's publish history, oldest first.
    pub async fn list_versions(
        pool: &PgPool,
        subdomain: &str,
    ) -> Result<Vec<PublishedVersionRow>, sqlx::Error> {
        let query = format!(
            "SELECT {VERSION_COLUMNS} FROM published_versions \
             WHERE subdomain = $1 ORDER BY version ASC"
        );
        sqlx::query_as::<_, PublishedVersionRow>(&query)
            .bind(subdomain)
            .fetch_all(pool)
            .await
    }

    /// Load a full record with its history.
    pub async fn find_with_history(
        pool: &PgPool,
        subdomain: &str,
    ) -> Result<Option<PublishRecord>, sqlx::Error> {
        let Some(row) = Self::find(pool, subdomain).await? else {
            return Ok(None);
        };
        let versions = Self::list_versions(pool, subdomain).await?;
        Ok(Some(row.into_record(versions)))
    }

    /// Claim a subdomain for an invitation.
    ///
    /// Inserts a fresh record if none exists; otherwise returns the existing
    /// row unchanged (which may belong to another invitation, the caller
    /// decides what that means).
    pub async fn claim(
        pool: &PgPool,
        subdomain: &str,
        invitation_id: &str,
    ) -> Result<PublishRecordRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO publish_records (subdomain, invitation_id) \
             VALUES ($1, $2) \
             ON CONFLICT (subdomain) DO NOTHING \
             RETURNING {RECORD_COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, PublishRecordRow>(&query)
            .bind(subdomain)
            .bind(invitation_id)
            .fetch_optional(pool)
            .await?;

        match inserted {
            Some(row) => Ok(row),
            None => Self::find(pool, subdomain)
                .await?
                .ok_or(sqlx::Error::RowNotFound),
        }
    }

    /// Atomically hand out the next version number.
    ///
    /// The row lock taken by `UPDATE` serializes concurrent reservations;
    /// the counter only ever grows, so a number is never handed out twice.
    /// Returns `None` if the subdomain has no record.
    pub async fn reserve_version(
        pool: &PgPool,
        subdomain: &str,
    ) -> Result<Option<Version>, sqlx::Error> {
        sqlx::query_scalar::<_, Version>(
            "UPDATE publish_records SET \
                last_assigned_version = GREATEST( \
                    last_assigned_version, \
                    COALESCE( \
                        (SELECT MAX(version) FROM published_versions WHERE subdomain = $1), 0 \
                    ) \
                ) + 1, \
                updated_at = NOW() \
             WHERE subdomain = $1 \
             RETURNING last_assigned_version",
        )
        .bind(subdomain)
        .fetch_optional(pool)
        .await
    }

    /// Append `version` to the history and make it current, in one transaction.
    ///
    /// The record row is locked first, so concurrent commits for a subdomain
    /// serialize across processes. Returns `None` if the version was never
    /// reserved or is not newer than everything already published.
    pub async fn commit_version(
        pool: &PgPool,
        subdomain: &str,
        version: Version,
    ) -> Result<Option<PublishedVersionRow>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let last_assigned = sqlx::query_scalar::<_, Version>(
            "SELECT last_assigned_version FROM publish_records \
             WHERE subdomain = $1 FOR UPDATE",
        )
        .bind(subdomain)
        .fetch_optional(&mut *tx)
        .await?;

        // Read after the lock so a commit that just released it is visible.
        let latest = sqlx::query_scalar::<_, Version>(
            "SELECT COALESCE(MAX(version), 0) FROM published_versions WHERE subdomain = $1",
        )
        .bind(subdomain)
        .fetch_one(&mut *tx)
        .await?;

        let committable = last_assigned.is_some_and(|last| version <= last && version > latest);
        if !committable {
            tx.rollback().await?;
            return Ok(None);
        }

        sqlx::query(
            "UPDATE publish_records SET current_version = $2, updated_at = NOW() \
             WHERE subdomain = $1",
        )
        .bind(subdomain)
        .bind(version)
        .execute(&mut *tx)
        .await?;

        let query = format!(
            "INSERT INTO published_versions (subdomain, version) \
             VALUES ($1, $2) \
             RETURNING {VERSION_COLUMNS}"
        );
        let row = sqlx::query_as::<_, PublishedVersionRow>(&query)
            .bind(subdomain)
            .bind(version)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(row))
    }

    /// Point `current_version` at an existing history entry.
    ///
    /// Returns `false` (and changes nothing) if `version` is not in the
    /// subdomain's history.
    pub async fn set_current_version(
        pool: &PgPool,
        subdomain: &str,
        version: Version,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE publish_records SET current_version = $2, updated_at = NOW() \
             WHERE subdomain = $1 \
               AND EXISTS ( \
                   SELECT 1 FROM published_versions WHERE subdomain = $1 AND version = $2 \
               )",
        )
        .bind(subdomain)
        .bind(version)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
