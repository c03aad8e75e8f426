//! Stable alert identity derived from the label set
//!
//! Labels are rendered as `map[k1:v1 k2:v2]` with keys in ascending order
//! and hashed with SHA-256. State files written by earlier deployments
//! use this exact rendering, so it must not change.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 digest identifying an alert
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Fingerprint {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Compute the fingerprint of a label set
pub fn fingerprint(labels: &BTreeMap<String, String>) -> Fingerprint {
    let digest = Sha256::digest(canonical_labels(labels).as_bytes());
    Fingerprint(hex::encode(digest))
}

/// Canonical text form of a label set
fn canonical_labels(labels: &BTreeMap<String, String>) -> String {
    let pairs: Vec<String> = labels
        .iter()
        .map(|(key, value)| format!("{}:{}", key, value))
        .collect();

    format!("map[{}]", pairs.join(" "))
}
