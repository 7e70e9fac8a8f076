//! Metric transforms — raw readings to per-dimension scores.
//!
//! Each dimension follows a power law fitted against measured service
//! performance:
//! - **Compute**: mean of three terms over frequency, usage and core count
//! - **Network**: grows with link bandwidth
//! - **Latency** ("rendering"): shrinks as round-trip time grows
//!
//! The compute and network laws use negative exponents and are undefined
//! at zero. The checked entry points reject non-positive or non-finite
//! operands with [`ScoringError::InvalidInput`]; the `_unchecked` variants
//! evaluate the raw formula and leave validation to the caller.

use edgescore_core::{ResourceKind, ScoringError, ScoringResult};
use tracing::warn;

/// Compute score from CPU usage fraction, core count and frequency (GHz).
pub fn compute_score(usage: f64, count: f64, freq: f64) -> ScoringResult<f64> {
    let usage = require_positive(ResourceKind::CpuUsage, usage)?;
    let count = require_positive(ResourceKind::CpuCount, count)?;
    let freq = require_positive(ResourceKind::CpuFreq, freq)?;
    Ok(compute_score_unchecked(usage, count, freq))
}

pub fn compute_score_unchecked(usage: f64, count: f64, freq: f64) -> f64 {
    (1.0 / (5.66 * freq.powf(-0.66))
        + 1.0 / (3.22 * usage.powf(-0.241))
        + 1.0 / (4.0 * count.powf(-0.3)))
        / 3.0
}

/// Network score from link bandwidth (Mbps).
pub fn network_score(bandwidth: f64) -> ScoringResult<f64> {
    let bandwidth = require_positive(ResourceKind::NetBandwidth, bandwidth)?;
    Ok(network_score_unchecked(bandwidth))
}

pub fn network_score_unchecked(bandwidth: f64) -> f64 {
    1.0 / (8770.0 * bandwidth.powf(-0.9))
}

/// Latency score from round-trip time (ms).
///
/// Total: a non-positive or NaN RTT carries no signal and scores `0.0`.
pub fn latency_score(rtt: f64) -> f64 {
    if rtt > 0.0 {
        0.77 * rtt.powf(-0.43)
    } else {
        0.0
    }
}

fn require_positive(metric: ResourceKind, value: f64) -> ScoringResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        warn!(%metric, value, "rejecting non-positive metric reading");
        Err(ScoringError::InvalidInput { metric, value })
    }
}
