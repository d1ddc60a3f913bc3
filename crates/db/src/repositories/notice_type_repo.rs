//! Repository for the `notice_types` table.

use sqlx::PgPool;

use crate::models::notice::NoticeType;

/// Column list for `notice_types` queries.
const COLUMNS: &str = "id, label, display, description";

/// What [`NoticeTypeRepo::create_notice_type`] did with the given label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionOutcome {
    Created,
    Updated,
    Unchanged,
}

/// Provides lookup and provisioning for notice types.
pub struct NoticeTypeRepo;

impl NoticeTypeRepo {
    /// Get a notice type by its unique label.
    pub async fn get_by_label(
        pool: &PgPool,
        label: &str,
    ) -> Result<Option<NoticeType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notice_types WHERE label = $1");
        sqlx::query_as::<_, NoticeType>(&query)
            .bind(label)
            .fetch_optional(pool)
            .await
    }

    /// List all notice types, ordered by label.
    pub async fn list(pool: &PgPool) -> Result<Vec<NoticeType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notice_types ORDER BY label");
        sqlx::query_as::<_, NoticeType>(&query).fetch_all(pool).await
    }

    /// Ensure a notice type with this label exists, matching the given
    /// display and description.
    ///
    /// Intended to be called by other features at provisioning time. Writes
    /// only when something actually changed; the unique constraint on
    /// `label` backstops concurrent provisioning runs.
    pub async fn create_notice_type(
        pool: &PgPool,
        label: &str,
        display: &str,
        description: &str,
    ) -> Result<ProvisionOutcome, sqlx::Error> {
        match Self::get_by_label(pool, label).await? {
            None => {
                sqlx::query(
                    "INSERT INTO notice_types (label, display, description) \
                     VALUES ($1, $2, $3)",
                )
                .bind(label)
                .bind(display)
                .bind(description)
                .execute(pool)
                .await?;
                tracing::info!(label, "Created notice type");
                Ok(ProvisionOutcome::Created)
            }
            Some(existing) if existing.display != display || existing.description != description => {
                sqlx::query(
                    "UPDATE notice_types SET display = $2, description = $3 WHERE label = $1",
                )
                .bind(label)
                .bind(display)
                .bind(description)
                .execute(pool)
                .await?;
                tracing::info!(label, "Updated notice type");
                Ok(ProvisionOutcome::Updated)
            }
            Some(_) => Ok(ProvisionOutcome::Unchanged),
        }
    }
}
