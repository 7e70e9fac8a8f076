//! Static provider — fixed readings, for simulation and tests.

use std::collections::HashMap;

use edgescore_core::config::StaticReadings;
use edgescore_core::{EdgeScoreConfig, ProviderError, ProviderResult, ResourceKind, ResourceProvider};

/// Serves configured readings. Unset local metrics fail with
/// [`ProviderError::Unavailable`]; devices without an RTT entry fail with
/// [`ProviderError::UnknownDevice`].
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    local: HashMap<ResourceKind, f64>,
    rtt: HashMap<String, f64>,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &EdgeScoreConfig) -> Self {
        Self::from_readings(&config.static_readings)
    }

    pub fn from_readings(readings: &StaticReadings) -> Self {
        let mut provider = Self::new();
        let local = [
            (ResourceKind::CpuUsage, readings.cpu_usage),
            (ResourceKind::CpuCount, readings.cpu_count),
            (ResourceKind::CpuFreq, readings.cpu_freq),
            (ResourceKind::NetBandwidth, readings.net_bandwidth),
        ];
        for (kind, value) in local {
            if let Some(v) = value {
                provider.local.insert(kind, v);
            }
        }
        provider.rtt = readings.rtt.clone();
        provider
    }

    /// Set a local reading. RTT goes through [`with_rtt`](Self::with_rtt).
    pub fn with_metric(mut self, kind: ResourceKind, value: f64) -> Self {
        if kind.is_local() {
            self.local.insert(kind, value);
        }
        self
    }

    pub fn with_rtt(mut self, device_id: &str, rtt_ms: f64) -> Self {
        self.rtt.insert(device_id.to_string(), rtt_ms);
        self
    }
}

impl ResourceProvider for StaticProvider {
    fn read_metric(&self, kind: ResourceKind) -> ProviderResult<f64> {
        if !kind.is_local() {
            return Err(ProviderError::Unsupported(kind));
        }
        self.local
            .get(&kind)
            .copied()
            .ok_or(ProviderError::Unavailable(kind))
    }

    fn read_rtt(&self, device_id: &str) -> ProviderResult<f64> {
        self.rtt
            .get(device_id)
            .copied()
            .ok_or_else(|| ProviderError::UnknownDevice(device_id.to_string()))
    }
}
