use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{StatusCode, Uri},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::alerts::{fingerprint, Alert, AlertBatch};
use crate::notify::{format_message, NotificationSender, NotifyError, Recipient};
use crate::storage::{DedupGuard, DedupStore, StoreError};

/// Application state shared across handlers
pub struct AppState {
    pub store: DedupStore,
    pub sender: Arc<dyn NotificationSender>,
}

// ============================================================================
// Health Check
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

// ============================================================================
// Alert Intake
// ============================================================================

/// What happened to a single alert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AlertOutcome {
    Duplicate,
    Notified,
}

/// Webhook endpoint; the request path names the SMS recipient
pub async fn intake(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    body: Result<Bytes, BytesRejection>,
) -> Result<StatusCode, ApiError> {
    let body = body.map_err(|e| {
        tracing::error!("Failed to read request body: {}", e);
        ApiError::Internal(format!("Failed to read request body: {}", e))
    })?;

    let batch: AlertBatch = serde_json::from_slice(&body).map_err(|e| {
        tracing::error!("Error handling JSON: {}", e);
        ApiError::Internal(format!("Invalid alert payload: {}", e))
    })?;

    let recipient = Recipient::from_path(uri.path()).map_err(|e| {
        tracing::warn!(path = %uri.path(), "Rejected recipient: {}", e);
        ApiError::from(e)
    })?;

    // Held for the whole batch, including the outbound sends
    let store = state.store.lock().await;

    let mut notified = 0;
    let mut first_error = None;
    for alert in &batch.alerts {
        match handle_alert(&store, state.sender.as_ref(), &recipient, alert).await {
            Ok(AlertOutcome::Notified) => notified += 1,
            Ok(AlertOutcome::Duplicate) => {}
            Err(e) => {
                tracing::error!(recipient = %recipient, "Failed to handle alert: {}", e);
                first_error.get_or_insert(e);
            }
        }
    }

    tracing::debug!(alerts = batch.alerts.len(), notified, "Batch handled");

    match first_error {
        Some(e) => Err(e),
        None => Ok(StatusCode::OK),
    }
}

/// Deduplicate one alert and notify if it is new
///
/// The fingerprint is only recorded after a successful send, so a failed
/// delivery is attempted again when the alert is re-sent.
async fn handle_alert(
    store: &DedupGuard<'_>,
    sender: &dyn NotificationSender,
    recipient: &Recipient,
    alert: &Alert,
) -> Result<AlertOutcome, ApiError> {
    let id = fingerprint(&alert.labels);

    let records = store.load().await?;
    if records.contains(&id) {
        tracing::debug!(fingerprint = %id, "Duplicate alert skipped");
        return Ok(AlertOutcome::Duplicate);
    }

    tracing::info!(
        recipient = %recipient,
        fingerprint = %id,
        status = %alert.status,
        firing = alert.is_firing(),
        labels = ?alert.labels,
        "New alert"
    );

    let message = format_message(alert);
    sender.send(recipient, &message).await?;

    store.save(&records.append(id)).await?;

    Ok(AlertOutcome::Notified)
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
pub enum ApiError {
    Forbidden(String),
    Internal(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Forbidden(msg) | ApiError::Internal(msg) => f.write_str(msg),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<NotifyError> for ApiError {
    fn from(e: NotifyError) -> Self {
        match e {
            NotifyError::InvalidRecipient(_) => ApiError::Forbidden(e.to_string()),
            NotifyError::Send(_) => ApiError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, Json(body)).into_response()
    }
}
