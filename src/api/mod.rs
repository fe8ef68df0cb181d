pub mod logs;

use axum::{routing::any, Router};

use crate::db::AppState;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Record an access and notify the webhook
        .route("/", any(logs::record_access))
        // Most recent entries, newest first
        .route("/logs", any(logs::list_logs))
        .with_state(state)
}
