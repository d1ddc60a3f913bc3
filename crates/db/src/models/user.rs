//! User entity model.

use herald_core::codec::Referenced;
use herald_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `users` table.
///
/// This subsystem only carries the fields notification delivery needs; the
/// enclosing application owns credentials, roles, and profile data.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub username: String,
    /// Empty string means no email address on file.
    pub email: String,
    pub is_superuser: bool,
    pub created_at: Timestamp,
}

impl User {
    /// Whether the user has an email address to deliver to.
    pub fn has_email(&self) -> bool {
        !self.email.is_empty()
    }
}

impl Referenced for User {
    fn kind(&self) -> &'static str {
        "accounts"
    }
    fn model(&self) -> &'static str {
        "User"
    }
    fn pk(&self) -> String {
        self.id.to_string()
    }
}
