use std::time::Duration;

use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbBackend, DbErr, Statement};

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub conn: DatabaseConnection,
    pub webhook_url: Option<String>,
}

const CONNECT_ATTEMPTS: u32 = 10;
const CONNECT_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Connect to the database, retrying until it becomes reachable.
///
/// Each attempt is a connect plus a liveness ping. After the retry budget
/// is exhausted the last error is returned and the caller decides whether
/// that is fatal.
pub async fn connect_with_retry(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut last_err = None;

    for attempt in 1..=CONNECT_ATTEMPTS {
        tracing::info!("Connecting to database...");
        match Database::connect(database_url).await {
            Ok(conn) => match conn.ping().await {
                Ok(()) => {
                    tracing::info!("Success: connected to database");
                    return Ok(conn);
                }
                Err(e) => last_err = Some(e),
            },
            Err(e) => last_err = Some(e),
        }
        tracing::warn!(
            "Waiting for database... (attempt {}/{})",
            attempt,
            CONNECT_ATTEMPTS
        );
        tokio::time::sleep(CONNECT_RETRY_DELAY).await;
    }

    Err(last_err.unwrap_or_else(|| DbErr::Custom("database never became reachable".to_owned())))
}

/// Create the access_logs table if it does not exist yet.
///
/// Safe to run on every process start. `id` and `created_at` are assigned
/// by the database on insert.
pub async fn ensure_schema(conn: &DatabaseConnection) -> Result<(), DbErr> {
    let create_table = match conn.get_database_backend() {
        DbBackend::Postgres => {
            r#"
            CREATE TABLE IF NOT EXISTS access_logs (
                id SERIAL PRIMARY KEY,
                user_agent TEXT,
                created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            )
            "#
        }
        // SQLite backend is used by the integration tests
        _ => {
            r#"
            CREATE TABLE IF NOT EXISTS access_logs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_agent TEXT,
                created_at TEXT DEFAULT CURRENT_TIMESTAMP
            )
            "#
        }
    };

    conn.execute(Statement::from_string(
        conn.get_database_backend(),
        create_table.to_owned(),
    ))
    .await?;

    Ok(())
}
