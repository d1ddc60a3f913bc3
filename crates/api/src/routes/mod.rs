pub mod health;
pub mod notices;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /notices/...    notice listing, seen/archive transitions, settings
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/notices", notices::router())
}
