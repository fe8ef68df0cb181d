use std::net::SocketAddr;

use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use access_logger::{api, config, db};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "access_logger=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Storage must be ready before the listener starts
    let conn = db::connect_with_retry(&config.database_url)
        .await
        .expect("Failed to connect to database after retries");

    db::ensure_schema(&conn)
        .await
        .expect("Failed to create access_logs table");

    let state = db::AppState {
        conn,
        webhook_url: config.webhook_url,
    };

    // API under /api, everything else served from the static dashboard
    let app = Router::new()
        .nest("/api", api::api_router(state))
        .fallback_service(ServeDir::new("static"))
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], 8081));
    tracing::info!("Access logger listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
