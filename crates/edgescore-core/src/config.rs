//! edgescore.toml configuration parser.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeScoreConfig {
    pub provider: ProviderConfig,
    /// Device identifier → `host:port` used for RTT measurements.
    pub devices: HashMap<String, String>,
    #[serde(rename = "static")]
    pub static_readings: StaticReadings,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Proc,
    Static,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    /// Network interface whose link speed is reported as bandwidth.
    pub interface: Option<String>,
    /// Bandwidth in Mbps used when the link speed cannot be read.
    pub bandwidth_mbps: Option<f64>,
    /// CPU usage sampling window in milliseconds.
    pub sample_ms: u64,
    /// RTT connect timeout in milliseconds.
    pub rtt_timeout_ms: u64,
    /// Prefix for `/proc` and `/sys` lookups.
    pub sysfs_root: PathBuf,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::Proc,
            interface: None,
            bandwidth_mbps: None,
            sample_ms: 200,
            rtt_timeout_ms: 1000,
            sysfs_root: PathBuf::from("/"),
        }
    }
}

/// Fixed readings for the static provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticReadings {
    pub cpu_usage: Option<f64>,
    pub cpu_count: Option<f64>,
    pub cpu_freq: Option<f64>,
    pub net_bandwidth: Option<f64>,
    /// Device identifier → RTT in milliseconds.
    pub rtt: HashMap<String, f64>,
}

impl EdgeScoreConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: EdgeScoreConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load `path` if given, otherwise fall back to defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
