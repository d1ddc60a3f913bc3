//! Notice, notice type, and notice setting entity models and DTOs.

use herald_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `notice_types` table: a named category of notices.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NoticeType {
    pub id: DbId,
    /// Unique short identifier other code uses to refer to this type.
    pub label: String,
    /// Human-readable name, used as the email subject input.
    pub display: String,
    pub description: String,
}

/// A row from the `notice_settings` table.
///
/// Records, for one user, whether notices of one type should be sent over
/// one delivery medium. At most one row exists per (user, type, medium).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NoticeSetting {
    pub id: DbId,
    pub user_id: DbId,
    pub notice_type_id: DbId,
    pub medium: String,
    pub send: bool,
}

/// A row from the `notices` table: one stored message for one user.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notice {
    pub id: DbId,
    pub user_id: DbId,
    pub notice_type_id: DbId,
    /// Encoded form; may contain `{kind.model.pk}` reference tokens.
    pub message: String,
    pub added: Timestamp,
    pub unseen: bool,
    pub archived: bool,
}

/// DTO for updating one notice setting via the API.
#[derive(Debug, Deserialize)]
pub struct UpdateSetting {
    /// Notice type label the setting applies to.
    pub label: String,
    pub medium: String,
    pub send: bool,
}
