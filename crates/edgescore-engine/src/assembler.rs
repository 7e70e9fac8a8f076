//! Score assembly — combine per-dimension scores into one fitness value.
//!
//! `total = network + compute / 2 + latency`
//!
//! The weighting is fixed; deployed fleets compare scores computed by
//! different nodes, so every node must apply the same weights.

use edgescore_core::{ResourceKind, ResourceSnapshot, ScoringResult};

use crate::transform::{compute_score, latency_score, network_score};

const COMPUTE_WEIGHT: f64 = 0.5;

/// Individual score components for debugging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub compute: f64,
    pub network: f64,
    pub latency: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        assemble(self.compute, self.network, self.latency)
    }
}

/// Combine the three dimension scores with the fixed weights.
pub fn assemble(compute: f64, network: f64, latency: f64) -> f64 {
    network + compute * COMPUTE_WEIGHT + latency
}

/// Run every transform over a snapshot's readings.
///
/// Does not inspect the error marker; callers check that first.
pub fn score_readings(snapshot: &ResourceSnapshot) -> ScoringResult<ScoreBreakdown> {
    let compute = compute_score(
        snapshot.require(ResourceKind::CpuUsage)?,
        snapshot.require(ResourceKind::CpuCount)?,
        snapshot.require(ResourceKind::CpuFreq)?,
    )?;
    let network = network_score(snapshot.require(ResourceKind::NetBandwidth)?)?;
    let latency = latency_score(snapshot.require(ResourceKind::NetRtt)?);

    Ok(ScoreBreakdown {
        compute,
        network,
        latency,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgescore_core::ScoringError;

    fn reference_snapshot() -> ResourceSnapshot {
        ResourceSnapshot::from_readings([
            (ResourceKind::CpuUsage, 0.5),
            (ResourceKind::CpuCount, 4.0),
            (ResourceKind::CpuFreq, 2.0),
            (ResourceKind::NetBandwidth, 100.0),
            (ResourceKind::NetRtt, 20.0),
        ])
    }

    #[test]
    fn compute_counts_at_half_weight() {
        assert_eq!(assemble(1.0, 0.0, 0.0), 0.5);
        assert_eq!(assemble(0.0, 1.0, 0.0), 1.0);
        assert_eq!(assemble(0.0, 0.0, 1.0), 1.0);
        assert_eq!(assemble(2.0, 3.0, 4.0), 8.0);
    }

    #[test]
    fn reference_snapshot_total() {
        let breakdown = score_readings(&reference_snapshot()).unwrap();
        let total = breakdown.total();
        assert!((total - 0.373022).abs() < 1e-6, "total was {total}");
    }

    #[test]
    fn zero_rtt_contributes_nothing() {
        let mut snap = reference_snapshot();
        snap.insert(ResourceKind::NetRtt, 0.0);
        let breakdown = score_readings(&snap).unwrap();
        assert_eq!(breakdown.latency, 0.0);
        assert_eq!(breakdown.total(), breakdown.network + breakdown.compute / 2.0);
    }

    #[test]
    fn missing_field_is_reported() {
        let snap = ResourceSnapshot::from_readings([(ResourceKind::CpuUsage, 0.5)]);
        assert!(matches!(
            score_readings(&snap),
            Err(ScoringError::MissingMetric(ResourceKind::CpuCount))
        ));
    }
}
