use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use super::handlers::{health_check, intake, AppState};
use crate::config::Config;
use crate::notify::{ElksSender, LogSender, NotificationSender};
use crate::storage::DedupStore;

/// Build the application router
///
/// Any path without a route of its own is an alert webhook whose path
/// names the recipient, e.g. `POST /4671234567`. Request bodies are not
/// size-limited; a batch is read whole however many alerts it carries.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Alert webhooks
        .fallback(post(intake))
        // Middleware
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Create the shared state for a configuration
pub fn build_state(config: &Config) -> Arc<AppState> {
    let sender: Arc<dyn NotificationSender> = match &config.sms {
        Some(sms) => Arc::new(ElksSender::new(sms.clone())),
        None => {
            tracing::warn!("Dry-run mode: alerts will be logged, not sent");
            Arc::new(LogSender)
        }
    };

    Arc::new(AppState {
        store: DedupStore::new(&config.state_file),
        sender,
    })
}

/// Run the HTTP server
pub async fn run_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let state = build_state(&config);
    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    tracing::info!("Listening for alerts on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install CTRL+C signal handler: {}", e);
        std::future::pending::<()>().await;
    }

    tracing::info!("Shutdown signal received");
}
