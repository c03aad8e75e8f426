//! Alert payload types

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Body of one webhook request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlertBatch {
    pub alerts: Vec<Alert>,
}

/// A single alert as sent by the monitoring system
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Alert {
    /// `firing` or `resolved`
    #[serde(default)]
    pub status: String,
    /// Identifying labels; kept sorted so everything derived from them is stable
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    #[serde(default)]
    pub annotations: Annotations,
}

/// Human-readable alert text
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Annotations {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub description: String,
}

impl Alert {
    /// Create an alert with the given labels and annotations
    pub fn new<K, V>(
        labels: impl IntoIterator<Item = (K, V)>,
        summary: impl Into<String>,
        description: impl Into<String>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            status: "firing".to_string(),
            labels: labels
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            annotations: Annotations {
                summary: summary.into(),
                description: description.into(),
            },
        }
    }

    /// Set the status
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn is_firing(&self) -> bool {
        self.status == "firing"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_batch() {
        let body = r#"{
            "receiver": "sms",
            "status": "firing",
            "alerts": [
                {
                    "status": "firing",
                    "labels": {"instance": "db1", "alertname": "Disk"},
                    "annotations": {"summary": "Disk full", "description": "db1 disk at 95%"},
                    "startsAt": "2021-03-01T10:00:00Z"
                }
            ]
        }"#;

        let batch: AlertBatch = serde_json::from_str(body).unwrap();
        assert_eq!(batch.alerts.len(), 1);

        let alert = &batch.alerts[0];
        assert!(alert.is_firing());
        assert_eq!(alert.labels["alertname"], "Disk");
        assert_eq!(alert.annotations.summary, "Disk full");
        assert_eq!(alert.annotations.description, "db1 disk at 95%");
    }

    #[test]
    fn test_missing_fields_default() {
        let batch: AlertBatch =
            serde_json::from_str(r#"{"alerts": [{"labels": {"a": "b"}}]}"#).unwrap();

        let alert = &batch.alerts[0];
        assert!(!alert.is_firing());
        assert_eq!(alert.annotations.summary, "");
        assert_eq!(alert.labels.len(), 1);
    }

    #[test]
    fn test_missing_alerts_is_rejected() {
        assert!(serde_json::from_str::<AlertBatch>(r#"{"status": "firing"}"#).is_err());
        assert!(serde_json::from_str::<AlertBatch>(r#"{"alerts": [{"labels": 3}]}"#).is_err());
    }

    #[test]
    fn test_alert_builder() {
        let alert = Alert::new([("alertname", "Disk")], "s", "d").with_status("resolved");
        assert_eq!(alert.status, "resolved");
        assert!(!alert.is_firing());
        assert_eq!(alert.labels["alertname"], "Disk");
    }
}
