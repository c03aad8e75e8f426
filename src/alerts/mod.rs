//! Incoming alert payloads and their identity
//!
//! Alerts arrive in batches from the monitoring system's webhook. Each alert
//! is identified by a fingerprint derived from its label set alone, so the
//! same alert re-sent with new annotations or status is still a duplicate.

pub mod fingerprint;
pub mod model;

pub use fingerprint::{fingerprint, Fingerprint};
pub use model::{Alert, AlertBatch, Annotations};
