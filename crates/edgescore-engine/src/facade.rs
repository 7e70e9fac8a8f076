//! Scoring facade — the contract the orchestrator calls.
//!
//! Three entry points share one pipeline:
//! 1. Score a device by identifier (measure, then score)
//! 2. Retrieve the raw snapshot for inspection or later re-scoring
//! 3. Score a previously retrieved snapshot without re-measuring

use edgescore_core::{
    INVALID_SCORE, ResourceProvider, ResourceSnapshot, ScoringError, ScoringResult, SnapshotError,
};
use tracing::{debug, warn};

use crate::assembler::{ScoreBreakdown, score_readings};
use crate::snapshot::SnapshotBuilder;

/// A scoring strategy for candidate devices.
pub trait Scoring: Send + Sync {
    /// Score `device_id`, returning [`INVALID_SCORE`] if any metric is missing.
    ///
    /// A failure and a genuine zero score look the same here; use
    /// [`try_score_by_id`](Self::try_score_by_id) to tell them apart.
    fn score_by_id(&self, device_id: &str) -> f64 {
        match self.try_score_by_id(device_id) {
            Ok(score) => score,
            Err(e) => {
                warn!(device = device_id, error = %e, "scoring failed, reporting invalid score");
                INVALID_SCORE
            }
        }
    }

    /// Score `device_id`, surfacing the reason when no score can be produced.
    fn try_score_by_id(&self, device_id: &str) -> ScoringResult<f64>;

    /// Collect the raw metrics for `device_id`.
    fn resource_snapshot(&self, device_id: &str) -> Result<ResourceSnapshot, SnapshotError>;

    /// Score a snapshot previously returned by [`resource_snapshot`](Self::resource_snapshot).
    fn score_with_resource(&self, snapshot: &ResourceSnapshot) -> ScoringResult<f64>;
}

/// The default strategy: compute, network and latency power laws with
/// compute at half weight.
pub struct DefaultScoring<P> {
    provider: P,
}

impl<P: ResourceProvider> DefaultScoring<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Per-dimension scores for a snapshot, error marker checked first.
    pub fn breakdown(&self, snapshot: &ResourceSnapshot) -> ScoringResult<ScoreBreakdown> {
        if snapshot.is_error() {
            return Err(ScoringError::ResourceNotFound);
        }
        score_readings(snapshot)
    }
}

impl<P: ResourceProvider> Scoring for DefaultScoring<P> {
    fn try_score_by_id(&self, device_id: &str) -> ScoringResult<f64> {
        let snapshot = self.resource_snapshot(device_id)?;
        let score = self.score_with_resource(&snapshot)?;
        debug!(device = device_id, score, "device scored");
        Ok(score)
    }

    fn resource_snapshot(&self, device_id: &str) -> Result<ResourceSnapshot, SnapshotError> {
        SnapshotBuilder::new(&self.provider).build(device_id)
    }

    fn score_with_resource(&self, snapshot: &ResourceSnapshot) -> ScoringResult<f64> {
        Ok(self.breakdown(snapshot)?.total())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgescore_core::{ProviderError, ProviderResult, ResourceKind};

    struct Fixed;

    impl ResourceProvider for Fixed {
        fn read_metric(&self, kind: ResourceKind) -> ProviderResult<f64> {
            match kind {
                ResourceKind::CpuUsage => Ok(0.5),
                ResourceKind::CpuCount => Ok(4.0),
                ResourceKind::CpuFreq => Ok(2.0),
                ResourceKind::NetBandwidth => Ok(100.0),
                ResourceKind::NetRtt => Err(ProviderError::Unsupported(kind)),
            }
        }

        fn read_rtt(&self, _device_id: &str) -> ProviderResult<f64> {
            Ok(20.0)
        }
    }

    #[test]
    fn score_by_id_matches_snapshot_path() {
        let scoring = DefaultScoring::new(Fixed);
        let direct = scoring.score_by_id("peer");
        let snapshot = scoring.resource_snapshot("peer").unwrap();
        let indirect = scoring.score_with_resource(&snapshot).unwrap();

        assert_eq!(direct, indirect);
        assert!((direct - 0.373022).abs() < 1e-6);
    }

    #[test]
    fn error_snapshot_is_resource_not_found() {
        let scoring = DefaultScoring::new(Fixed);
        let err = scoring
            .score_with_resource(&ResourceSnapshot::invalid())
            .unwrap_err();
        assert!(matches!(err, ScoringError::ResourceNotFound));
        assert_eq!(err.to_string(), "resource not found");
    }

    #[test]
    fn invalid_reading_in_snapshot_is_an_error_not_nan() {
        let scoring = DefaultScoring::new(Fixed);
        let mut snapshot = scoring.resource_snapshot("peer").unwrap();
        snapshot.insert(ResourceKind::CpuCount, 0.0);

        assert!(matches!(
            scoring.score_with_resource(&snapshot),
            Err(ScoringError::InvalidInput {
                metric: ResourceKind::CpuCount,
                ..
            })
        ));
    }

    #[test]
    fn usable_as_trait_object() {
        let scoring: Box<dyn Scoring> = Box::new(DefaultScoring::new(Fixed));
        assert!(scoring.score_by_id("peer") > 0.0);
    }
}
