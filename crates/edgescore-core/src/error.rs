//! Error types for resource providers and the scoring engine.

use thiserror::Error;

use crate::snapshot::ResourceSnapshot;
use crate::types::ResourceKind;

/// Result type alias for provider reads.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Result type alias for scoring operations.
pub type ScoringResult<T> = Result<T, ScoringError>;

/// Errors a resource provider can report for a single read.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("metric unavailable: {0}")]
    Unavailable(ResourceKind),

    #[error("metric not supported by this provider: {0}")]
    Unsupported(ResourceKind),

    #[error("unknown device: {0}")]
    UnknownDevice(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {detail}")]
    Parse { path: String, detail: String },

    #[error("rtt to {device} failed: {detail}")]
    Rtt { device: String, detail: String },
}

/// Errors surfaced by the scoring facade.
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("metric {kind} unavailable: {source}")]
    MetricUnavailable {
        kind: ResourceKind,
        #[source]
        source: ProviderError,
    },

    #[error("resource not found")]
    ResourceNotFound,

    #[error("snapshot is missing metric {0}")]
    MissingMetric(ResourceKind),

    #[error("invalid {metric} reading {value}: must be finite and strictly positive")]
    InvalidInput { metric: ResourceKind, value: f64 },
}

/// A snapshot build that stopped at the first failed read.
///
/// Carries the error-marked partial snapshot so callers that cache raw
/// metrics can still inspect what was collected before the failure.
#[derive(Debug, Error)]
#[error("snapshot for device {device} stopped at {kind}: {source}")]
pub struct SnapshotError {
    pub device: String,
    pub kind: ResourceKind,
    pub snapshot: ResourceSnapshot,
    #[source]
    pub source: ProviderError,
}

impl SnapshotError {
    /// The error-marked snapshot as it stood when the read failed.
    pub fn into_snapshot(self) -> ResourceSnapshot {
        self.snapshot
    }
}

impl From<SnapshotError> for ScoringError {
    fn from(err: SnapshotError) -> Self {
        ScoringError::MetricUnavailable {
            kind: err.kind,
            source: err.source,
        }
    }
}
