//! Resource snapshots — the raw readings for one device at one instant.
//!
//! A snapshot is a flat metric-name → reading map so it serializes to the
//! same JSON shape orchestrators already cache:
//!
//! ```text
//! {"cpuCount":4.0,"cpuFreq":2.0,"cpuUsage":0.5,"netBandwidth":100.0,"rtt":20.0}
//! {"cpuUsage":0.5,"error":0.0}
//! ```
//!
//! The `error` key marks the whole snapshot invalid, whatever else it holds.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ScoringError, ScoringResult};
use crate::types::{INVALID_SCORE, ResourceKind};

/// Key that marks a snapshot as invalid.
pub const ERROR_KEY: &str = "error";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceSnapshot {
    readings: BTreeMap<String, f64>,
}

impl ResourceSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot holding only the error marker.
    pub fn invalid() -> Self {
        let mut snapshot = Self::new();
        snapshot.mark_error();
        snapshot
    }

    /// Build a complete snapshot from one reading per kind.
    pub fn from_readings(readings: impl IntoIterator<Item = (ResourceKind, f64)>) -> Self {
        let mut snapshot = Self::new();
        for (kind, value) in readings {
            snapshot.insert(kind, value);
        }
        snapshot
    }

    pub fn insert(&mut self, kind: ResourceKind, value: f64) {
        self.readings.insert(kind.name().to_string(), value);
    }

    /// Mark the snapshot invalid as a whole.
    pub fn mark_error(&mut self) {
        self.readings.insert(ERROR_KEY.to_string(), INVALID_SCORE);
    }

    pub fn is_error(&self) -> bool {
        self.readings.contains_key(ERROR_KEY)
    }

    pub fn get(&self, kind: ResourceKind) -> Option<f64> {
        self.readings.get(kind.name()).copied()
    }

    /// Reading for `kind`, or [`ScoringError::MissingMetric`].
    pub fn require(&self, kind: ResourceKind) -> ScoringResult<f64> {
        self.get(kind).ok_or(ScoringError::MissingMetric(kind))
    }

    /// Whether all five metrics are present and no error marker is set.
    pub fn is_complete(&self) -> bool {
        !self.is_error() && ResourceKind::ALL.iter().all(|k| self.get(*k).is_some())
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Raw name → value view, error marker included.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.readings.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
