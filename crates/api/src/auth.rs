//! Gateway-header authentication extractor.
//!
//! The enclosing application terminates authentication and forwards the
//! caller's identity as an `x-user-id` header. The extractor resolves it
//! against the `users` table so handlers always work with a live row.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use herald_core::error::CoreError;
use herald_core::types::DbId;
use herald_db::models::user::User;
use herald_db::repositories::UserRepo;

use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user resolved from the `x-user-id` gateway header.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(auth: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = auth.user.id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The resolved user row.
    pub user: User,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("x-user-id")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Missing x-user-id header".into()))
            })?;

        let user_id: DbId = header.parse().map_err(|_| {
            AppError::Core(CoreError::Unauthorized(
                "x-user-id must be a numeric user id".into(),
            ))
        })?;

        let user = UserRepo::get(&state.pool, user_id)
            .await?
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Unknown user".into())))?;

        Ok(AuthUser { user })
    }
}
