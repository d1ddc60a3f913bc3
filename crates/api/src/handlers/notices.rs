//! Handlers for the `/notices` resource.
//!
//! All endpoints require authentication via [`AuthUser`].

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use herald_core::error::CoreError;
use herald_core::types::DbId;
use herald_db::repositories::NoticeRepo;
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Query parameters for `GET /notices`.
#[derive(Debug, Deserialize)]
pub struct NoticeQuery {
    /// If `true`, include archived notices. Defaults to `false`.
    pub archived: Option<bool>,
}

/// GET /api/v1/notices
///
/// List the authenticated user's notices, newest first. Superusers see
/// every notice in the store (and the `archived` filter does not apply to
/// them).
pub async fn list_notices(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<NoticeQuery>,
) -> AppResult<Json<serde_json::Value>> {
    let archived = params.archived.unwrap_or(false);
    let notices = NoticeRepo::notices_for(&state.pool, &auth.user, archived).await?;

    Ok(Json(serde_json::json!({ "data": notices })))
}

/// GET /api/v1/notices/unseen-count
///
/// Return the number of unseen notices for the authenticated user without
/// marking anything seen.
pub async fn unseen_count(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let count = NoticeRepo::unseen_count_for(&state.pool, auth.user.id).await?;

    Ok(Json(serde_json::json!({
        "data": { "count": count }
    })))
}

/// POST /api/v1/notices/{id}/seen
///
/// Mark a notice seen if it is currently unseen. Responds with whether this
/// call observed the unseen state, so a client can style a notice
/// differently the first time it is shown. 404 if the notice does not
/// belong to the authenticated user.
pub async fn mark_seen(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(notice_id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let was_unseen = NoticeRepo::mark_seen(&state.pool, notice_id, auth.user.id).await?;

    if !was_unseen {
        // Distinguish "already seen" from "not yours / gone".
        let owned = NoticeRepo::get(&state.pool, notice_id)
            .await?
            .is_some_and(|n| n.user_id == auth.user.id);
        if !owned {
            return Err(AppError::Core(CoreError::NotFound {
                entity: "Notice",
                id: notice_id,
            }));
        }
    }

    Ok(Json(serde_json::json!({
        "data": { "was_unseen": was_unseen }
    })))
}

/// POST /api/v1/notices/{id}/archive
///
/// Archive a notice (one-way). Returns 204 No Content on success, or 404 if
/// the notice does not belong to the authenticated user.
pub async fn archive(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(notice_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let found = NoticeRepo::archive(&state.pool, notice_id, auth.user.id).await?;

    if !found {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Notice",
            id: notice_id,
        }));
    }

    Ok(StatusCode::NO_CONTENT)
}
