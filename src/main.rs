//! alertsms server
//!
//! Run with: cargo run
//!
//! Configuration is read from `ALERTSMS_*` environment variables, see
//! [`alertsms::config`]. Log level is controlled with RUST_LOG
//! (default: info).

use alertsms::api::run_server;
use alertsms::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "alertsms=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    tracing::info!("alertsms {} configuration:", env!("CARGO_PKG_VERSION"));
    tracing::info!("  Listen: {}:{}", config.host, config.port);
    tracing::info!("  State file: {}", config.state_file.display());
    match &config.sms {
        Some(sms) => {
            tracing::info!("  SMS API: {}", sms.api_url);
            tracing::info!("  Sender: {}", sms.from);
        }
        None => tracing::info!("  SMS API: DISABLED (dry run)"),
    }

    run_server(config).await
}
