//! Handlers for per-type delivery settings.

use axum::extract::State;
use axum::Json;
use herald_db::models::notice::UpdateSetting;
use herald_db::repositories::{NoticeSettingRepo, NoticeTypeRepo};

use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/v1/notices/settings
///
/// Return the full notice type catalogue alongside the authenticated
/// user's stored settings, so the client can render toggles for types that
/// have no setting row yet.
pub async fn get_settings(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let notice_types = NoticeTypeRepo::list(&state.pool).await?;
    let settings = NoticeSettingRepo::list_for_user(&state.pool, auth.user.id).await?;

    Ok(Json(serde_json::json!({
        "data": {
            "notice_types": notice_types,
            "settings": settings,
        }
    })))
}

/// PUT /api/v1/notices/settings
///
/// Create or update one setting row for the authenticated user.
pub async fn update_setting(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateSetting>,
) -> AppResult<Json<serde_json::Value>> {
    let notice_type = NoticeTypeRepo::get_by_label(&state.pool, &input.label)
        .await?
        .ok_or_else(|| {
            AppError::BadRequest(format!("Unknown notice type label '{}'", input.label))
        })?;

    let setting = NoticeSettingRepo::set(
        &state.pool,
        auth.user.id,
        notice_type.id,
        &input.medium,
        input.send,
    )
    .await?;

    Ok(Json(serde_json::json!({ "data": setting })))
}
