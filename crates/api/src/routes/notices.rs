//! Route definitions for the `/notices` resource.
//!
//! All endpoints require authentication.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{notices, settings};
use crate::state::AppState;

/// Routes mounted at `/notices`.
///
/// ```text
/// GET    /                  -> list_notices
/// GET    /unseen-count      -> unseen_count
/// POST   /{id}/seen         -> mark_seen
/// POST   /{id}/archive      -> archive
///
/// GET    /settings          -> get_settings
/// PUT    /settings          -> update_setting
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        // Notice endpoints
        .route("/", get(notices::list_notices))
        .route("/unseen-count", get(notices::unseen_count))
        .route("/{id}/seen", post(notices::mark_seen))
        .route("/{id}/archive", post(notices::archive))
        // Settings endpoints
        .route(
            "/settings",
            get(settings::get_settings).put(settings::update_setting),
        )
}
