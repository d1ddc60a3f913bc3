//! Repository for the `notice_settings` table.

use herald_core::types::DbId;
use sqlx::PgPool;

use crate::models::notice::NoticeSetting;

/// Column list for `notice_settings` queries.
const COLUMNS: &str = "id, user_id, notice_type_id, medium, send";

/// Provides per-user per-medium delivery preference storage.
pub struct NoticeSettingRepo;

impl NoticeSettingRepo {
    /// Return whether notices of this type should be sent to this user over
    /// this medium.
    ///
    /// If no setting row exists yet, one is materialized with
    /// `send = default` and `default` is returned. A later call with a
    /// different default returns the stored value, not the new default.
    ///
    /// The get-or-create is a single `INSERT .. ON CONFLICT DO NOTHING ..
    /// RETURNING` so concurrent callers racing on the same triple cannot
    /// create duplicate rows; the loser of the race falls through to the
    /// plain SELECT.
    pub async fn should_send(
        pool: &PgPool,
        user_id: DbId,
        notice_type_id: DbId,
        medium: &str,
        default: bool,
    ) -> Result<bool, sqlx::Error> {
        let inserted: Option<bool> = sqlx::query_scalar(
            "INSERT INTO notice_settings (user_id, notice_type_id, medium, send) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (user_id, notice_type_id, medium) DO NOTHING \
             RETURNING send",
        )
        .bind(user_id)
        .bind(notice_type_id)
        .bind(medium)
        .bind(default)
        .fetch_optional(pool)
        .await?;

        if let Some(send) = inserted {
            return Ok(send);
        }

        sqlx::query_scalar(
            "SELECT send FROM notice_settings \
             WHERE user_id = $1 AND notice_type_id = $2 AND medium = $3",
        )
        .bind(user_id)
        .bind(notice_type_id)
        .bind(medium)
        .fetch_one(pool)
        .await
    }

    /// Insert or update one setting row.
    pub async fn set(
        pool: &PgPool,
        user_id: DbId,
        notice_type_id: DbId,
        medium: &str,
        send: bool,
    ) -> Result<NoticeSetting, sqlx::Error> {
        let query = format!(
            "INSERT INTO notice_settings (user_id, notice_type_id, medium, send) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (user_id, notice_type_id, medium) DO UPDATE SET \
                send = EXCLUDED.send \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, NoticeSetting>(&query)
            .bind(user_id)
            .bind(notice_type_id)
            .bind(medium)
            .bind(send)
            .fetch_one(pool)
            .await
    }

    /// List all stored settings for a user, ordered by notice type.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<NoticeSetting>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notice_settings \
             WHERE user_id = $1 \
             ORDER BY notice_type_id, medium"
        );
        sqlx::query_as::<_, NoticeSetting>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
