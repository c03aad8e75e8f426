//! File-backed record of alerts that have already been notified
//!
//! The whole record set is rewritten on every save. That is fine while the
//! set stays small; a long-lived deployment that accumulates many thousands
//! of fingerprints would want an append-only log instead, which means a new
//! file format. Writes go straight to the target file, so a crash mid-write
//! can leave it truncated.

use std::path::{Path, PathBuf};

use tokio::sync::{Mutex, MutexGuard};

use super::StoreError;
use crate::alerts::Fingerprint;

/// Ordered set of fingerprints that have been notified
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSet {
    entries: Vec<Fingerprint>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, fingerprint: &Fingerprint) -> bool {
        self.entries.iter().any(|f| f == fingerprint)
    }

    /// Add a fingerprint, keeping entries unique
    pub fn append(mut self, fingerprint: Fingerprint) -> Self {
        if !self.contains(&fingerprint) {
            self.entries.push(fingerprint);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Fingerprint> {
        self.entries.iter()
    }
}

impl FromIterator<Fingerprint> for RecordSet {
    fn from_iter<I: IntoIterator<Item = Fingerprint>>(iter: I) -> Self {
        iter.into_iter().fold(RecordSet::new(), RecordSet::append)
    }
}

/// Dedup store backed by a single YAML file
///
/// All access goes through [`DedupStore::lock`], so at most one
/// load/append/save cycle runs against the file at any time.
pub struct DedupStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl DedupStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Wait for exclusive access to the store
    pub async fn lock(&self) -> DedupGuard<'_> {
        DedupGuard {
            path: &self.path,
            _guard: self.lock.lock().await,
        }
    }
}

/// Exclusive handle on the store, released on drop
pub struct DedupGuard<'a> {
    path: &'a Path,
    _guard: MutexGuard<'a, ()>,
}

impl DedupGuard<'_> {
    /// Read the persisted record set; a missing file is an empty set
    pub async fn load(&self) -> Result<RecordSet, StoreError> {
        let data = match tokio::fs::read_to_string(self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(RecordSet::new()),
            Err(e) => return Err(StoreError::Read(e)),
        };

        if data.trim().is_empty() {
            return Ok(RecordSet::new());
        }

        let entries: Option<Vec<String>> =
            serde_yaml::from_str(&data).map_err(|e| StoreError::Parse(e.to_string()))?;

        Ok(entries
            .unwrap_or_default()
            .into_iter()
            .map(Fingerprint::from)
            .collect())
    }

    /// Overwrite the persisted record set
    pub async fn save(&self, records: &RecordSet) -> Result<(), StoreError> {
        let entries: Vec<&str> = records.iter().map(Fingerprint::as_str).collect();
        let data =
            serde_yaml::to_string(&entries).map_err(|e| StoreError::Serialize(e.to_string()))?;

        tokio::fs::write(self.path, data)
            .await
            .map_err(StoreError::Write)
    }
}
