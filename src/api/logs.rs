use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    Json,
};
use sea_orm::{ConnectionTrait, EntityTrait, FromQueryResult, Set, Statement};
use serde::Serialize;

use crate::db::AppState;
use crate::models::access_log;
use crate::notify;

#[derive(Debug, Serialize)]
pub struct WriteResponse {
    pub message: String,
    pub db_status: String,
}

/// Store the caller's User-Agent and dispatch a webhook notification.
///
/// Always answers 200; an insert failure is reported through `db_status`
/// so dashboard clients get a uniform response shape.
pub async fn record_access(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<WriteResponse> {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
        .to_string();

    let entry = access_log::ActiveModel {
        user_agent: Set(user_agent.clone()),
        ..Default::default()
    };

    let db_status = match access_log::Entity::insert(entry).exec(&state.conn).await {
        Ok(_) => {
            let webhook_url = state.webhook_url.clone();
            let message = format!("🚀 New Access Detected! UA: {}", user_agent);
            // Fire-and-forget: the response does not wait on delivery
            tokio::spawn(notify::send_webhook(webhook_url, message));
            "OK".to_string()
        }
        Err(e) => {
            tracing::error!("Failed to insert access log: {}", e);
            format!("Error: {}", e)
        }
    };

    Json(WriteResponse {
        message: "Logged successfully!".to_string(),
        db_status,
    })
}

/// Return the 50 most recent entries, newest first.
pub async fn list_logs(
    State(state): State<AppState>,
) -> Result<Json<Vec<access_log::Model>>, (StatusCode, String)> {
    let rows = state
        .conn
        .query_all(Statement::from_string(
            state.conn.get_database_backend(),
            "SELECT id, user_agent, created_at FROM access_logs ORDER BY id DESC LIMIT 50"
                .to_owned(),
        ))
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", e),
            )
        })?;

    // Rows that fail to decode are skipped rather than failing the response
    let logs: Vec<access_log::Model> = rows
        .iter()
        .filter_map(|row| access_log::Model::from_query_result(row, "").ok())
        .collect();

    Ok(Json(logs))
}
