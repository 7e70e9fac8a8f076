//! Core domain types shared across EdgeScore crates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Score reported by the legacy by-identifier path when any metric is missing.
///
/// Indistinguishable from a legitimate score of zero; prefer the explicit
/// `Result` entry points where the caller can act on the difference.
pub const INVALID_SCORE: f64 = 0.0;

/// A measurable device quantity, used as a lookup key into snapshots
/// and as the request tag for resource providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResourceKind {
    /// CPU utilization as a fraction of total capacity.
    CpuUsage,
    /// Number of online CPU cores.
    CpuCount,
    /// CPU clock frequency in GHz.
    CpuFreq,
    /// Network link bandwidth in Mbps.
    NetBandwidth,
    /// Round-trip time to a peer device in milliseconds.
    #[serde(rename = "rtt")]
    NetRtt,
}

impl ResourceKind {
    /// Every kind, in the order the snapshot builder fetches them.
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::CpuUsage,
        ResourceKind::CpuCount,
        ResourceKind::CpuFreq,
        ResourceKind::NetBandwidth,
        ResourceKind::NetRtt,
    ];

    /// Stable metric name used as the snapshot key.
    pub fn name(self) -> &'static str {
        match self {
            ResourceKind::CpuUsage => "cpuUsage",
            ResourceKind::CpuCount => "cpuCount",
            ResourceKind::CpuFreq => "cpuFreq",
            ResourceKind::NetBandwidth => "netBandwidth",
            ResourceKind::NetRtt => "rtt",
        }
    }

    /// Parse a metric name back into a kind.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    /// Whether the reading is a property of the local device alone.
    ///
    /// RTT is the only kind measured relative to a peer.
    pub fn is_local(self) -> bool {
        !matches!(self, ResourceKind::NetRtt)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
