//! alertsms: alert webhook to SMS relay
//!
//! Receives alert batches from a monitoring system's webhook, drops alerts
//! that have already been notified and forwards the rest as SMS.
//!
//! # Flow
//!
//! - **Intake**: `POST /<number>` with a JSON body `{"alerts": [...]}`
//! - **Identity**: each alert is fingerprinted from its label set
//! - **Dedup**: fingerprints already in the state file are skipped
//! - **Notify**: new alerts are sent to `+<number>`, then recorded
//!
//! All store access for one request happens under a single lock, so
//! concurrent webhooks never lose each other's updates.
//!
//! # Example
//!
//! ```no_run
//! use alertsms::api::{build_router, build_state};
//! use alertsms::Config;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_env()?;
//! let app = build_router(build_state(&config));
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:1025").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod alerts;
pub mod api;
pub mod config;
pub mod notify;
pub mod storage;

// Re-export commonly used types
pub use alerts::{fingerprint, Alert, AlertBatch, Fingerprint};
pub use config::{Config, ConfigError};
pub use notify::{NotificationSender, NotifyError, Recipient};
pub use storage::{DedupStore, RecordSet, StoreError};
