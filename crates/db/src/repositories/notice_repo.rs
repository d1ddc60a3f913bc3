//! Repository for the `notices` table.

use herald_core::types::DbId;
use sqlx::PgPool;

use crate::models::notice::Notice;
use crate::models::user::User;

/// Column list for `notices` queries.
const COLUMNS: &str = "id, user_id, notice_type_id, message, added, unseen, archived";

/// Provides CRUD operations for stored notices.
pub struct NoticeRepo;

impl NoticeRepo {
    /// Create a notice for a user (unseen, not archived), returning the
    /// generated ID.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        notice_type_id: DbId,
        message: &str,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO notices (user_id, notice_type_id, message) \
             VALUES ($1, $2, $3) \
             RETURNING id",
        )
        .bind(user_id)
        .bind(notice_type_id)
        .bind(message)
        .fetch_one(pool)
        .await
    }

    /// Get a notice by id.
    pub async fn get(pool: &PgPool, notice_id: DbId) -> Result<Option<Notice>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notices WHERE id = $1");
        sqlx::query_as::<_, Notice>(&query)
            .bind(notice_id)
            .fetch_optional(pool)
            .await
    }

    /// List notices visible to the given user, newest first.
    ///
    /// A normal user sees only their own notices; with `archived = false`,
    /// archived ones are filtered out. A superuser sees every notice in the
    /// store from every owner, and the `archived` argument is ignored
    /// entirely for them -- a long-standing asymmetry callers rely on when
    /// auditing, kept deliberately.
    pub async fn notices_for(
        pool: &PgPool,
        user: &User,
        archived: bool,
    ) -> Result<Vec<Notice>, sqlx::Error> {
        if user.is_superuser {
            let query = format!("SELECT {COLUMNS} FROM notices ORDER BY added DESC");
            return sqlx::query_as::<_, Notice>(&query).fetch_all(pool).await;
        }

        let filter = if archived { "" } else { "AND archived = false" };
        let query = format!(
            "SELECT {COLUMNS} FROM notices \
             WHERE user_id = $1 {filter} \
             ORDER BY added DESC"
        );
        sqlx::query_as::<_, Notice>(&query)
            .bind(user.id)
            .fetch_all(pool)
            .await
    }

    /// Get the number of unseen notices for a user.
    ///
    /// Pure read: never flips any notice's `unseen` flag.
    pub async fn unseen_count_for(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        let count: Option<i64> = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notices WHERE user_id = $1 AND unseen = true",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Ok(count.unwrap_or(0))
    }

    /// Mark a notice seen if it is currently unseen.
    ///
    /// Returns `true` if the notice was unseen and this call flipped it;
    /// `false` if it was already seen or does not belong to the given user.
    /// A single conditional UPDATE, so concurrent callers observe the flip
    /// exactly once.
    pub async fn mark_seen(
        pool: &PgPool,
        notice_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notices \
             SET unseen = false \
             WHERE id = $1 AND user_id = $2 AND unseen = true",
        )
        .bind(notice_id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Archive a notice (one-way transition).
    ///
    /// Returns `true` if the notice belongs to the given user, whether or
    /// not it was already archived; `false` otherwise.
    pub async fn archive(
        pool: &PgPool,
        notice_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notices \
             SET archived = true \
             WHERE id = $1 AND user_id = $2",
        )
        .bind(notice_id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
