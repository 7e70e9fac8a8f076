//! Procfs provider — live local readings on Linux.
//!
//! Reads:
//! - `/proc/stat` — aggregate CPU times, sampled twice for usage
//! - `/sys/devices/system/cpu/online` — online core count (e.g. `"0-3"`)
//! - `/sys/devices/system/cpu/cpu0/cpufreq/scaling_cur_freq` — kHz,
//!   falling back to the first `cpu MHz` line of `/proc/cpuinfo`
//! - `/sys/class/net/<iface>/speed` — link speed in Mbps
//!
//! RTT is delegated to a [`TcpRtt`] over the `[devices]` table.
//! All paths are resolved under a configurable root so tests can point
//! the provider at a fake tree.

use std::path::{Path, PathBuf};
use std::time::Duration;

use edgescore_core::{EdgeScoreConfig, ProviderError, ProviderResult, ResourceKind, ResourceProvider};
use tracing::debug;

use crate::rtt::TcpRtt;

const PROC_STAT: &str = "proc/stat";
const PROC_CPUINFO: &str = "proc/cpuinfo";
const CPU_ONLINE: &str = "sys/devices/system/cpu/online";
const CPU0_CUR_FREQ: &str = "sys/devices/system/cpu/cpu0/cpufreq/scaling_cur_freq";

#[derive(Debug, Clone)]
pub struct ProcProvider {
    root: PathBuf,
    interface: Option<String>,
    fallback_bandwidth: Option<f64>,
    sample: Duration,
    rtt: TcpRtt,
}

impl ProcProvider {
    pub fn from_config(config: &EdgeScoreConfig) -> Self {
        let p = &config.provider;
        Self {
            root: p.sysfs_root.clone(),
            interface: p.interface.clone(),
            fallback_bandwidth: p.bandwidth_mbps,
            sample: Duration::from_millis(p.sample_ms),
            rtt: TcpRtt::new(
                config.devices.clone(),
                Duration::from_millis(p.rtt_timeout_ms),
            ),
        }
    }

    fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    fn cpu_usage(&self) -> ProviderResult<f64> {
        let path = self.path(PROC_STAT);
        let before = read_cpu_times(&path)?;
        if !self.sample.is_zero() {
            std::thread::sleep(self.sample);
        }
        let after = read_cpu_times(&path)?;

        // No ticks elapsed in the window: fall back to the since-boot ratio.
        let usage = after
            .usage_since(&before)
            .or_else(|| after.usage_since(&CpuTimes::default()))
            .ok_or(ProviderError::Unavailable(ResourceKind::CpuUsage))?;
        Ok(usage)
    }

    fn cpu_count(&self) -> ProviderResult<f64> {
        if let Ok(content) = read_trimmed(&self.path(CPU_ONLINE)) {
            if let Some(count) = parse_cpu_range(&content) {
                return Ok(f64::from(count));
            }
        }
        std::thread::available_parallelism()
            .map(|n| n.get() as f64)
            .map_err(|e| ProviderError::Io {
                path: CPU_ONLINE.to_string(),
                source: e,
            })
    }

    fn cpu_freq(&self) -> ProviderResult<f64> {
        let freq_path = self.path(CPU0_CUR_FREQ);
        if let Ok(content) = read_trimmed(&freq_path) {
            let khz: f64 = content.parse().map_err(|_| ProviderError::Parse {
                path: freq_path.display().to_string(),
                detail: format!("expected integer kHz value, got '{content}'"),
            })?;
            return Ok(khz / 1_000_000.0);
        }

        let cpuinfo_path = self.path(PROC_CPUINFO);
        let cpuinfo = read_trimmed(&cpuinfo_path)?;
        parse_cpuinfo_mhz(&cpuinfo)
            .map(|mhz| mhz / 1000.0)
            .ok_or(ProviderError::Unavailable(ResourceKind::CpuFreq))
    }

    fn net_bandwidth(&self) -> ProviderResult<f64> {
        if let Some(iface) = &self.interface {
            let speed_path = self.path(&format!("sys/class/net/{iface}/speed"));
            match read_trimmed(&speed_path).map(|s| s.parse::<f64>()) {
                // The kernel reports -1 while the link is down.
                Ok(Ok(mbps)) if mbps > 0.0 => return Ok(mbps),
                other => {
                    debug!(interface = %iface, result = ?other.map(|r| r.ok()), "link speed unavailable");
                }
            }
        }
        self.fallback_bandwidth
            .ok_or(ProviderError::Unavailable(ResourceKind::NetBandwidth))
    }
}

impl ResourceProvider for ProcProvider {
    fn read_metric(&self, kind: ResourceKind) -> ProviderResult<f64> {
        let value = match kind {
            ResourceKind::CpuUsage => self.cpu_usage(),
            ResourceKind::CpuCount => self.cpu_count(),
            ResourceKind::CpuFreq => self.cpu_freq(),
            ResourceKind::NetBandwidth => self.net_bandwidth(),
            ResourceKind::NetRtt => Err(ProviderError::Unsupported(kind)),
        }?;
        debug!(%kind, value, "procfs read");
        Ok(value)
    }

    fn read_rtt(&self, device_id: &str) -> ProviderResult<f64> {
        self.rtt.measure(device_id)
    }
}

/// Aggregate CPU jiffies from the first line of `/proc/stat`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct CpuTimes {
    idle: u64,
    total: u64,
}

impl CpuTimes {
    /// Busy fraction between `earlier` and `self`, `None` if no time passed.
    ///
    /// A fully idle window counts one busy tick so the reading stays
    /// strictly positive, as the compute score requires.
    fn usage_since(&self, earlier: &CpuTimes) -> Option<f64> {
        let total = self.total.saturating_sub(earlier.total);
        if total == 0 {
            return None;
        }
        let idle = self.idle.saturating_sub(earlier.idle);
        let busy = total.saturating_sub(idle).max(1);
        Some(busy as f64 / total as f64)
    }
}

fn read_cpu_times(path: &Path) -> ProviderResult<CpuTimes> {
    let content = read_trimmed(path)?;
    parse_cpu_times(&content).ok_or_else(|| ProviderError::Parse {
        path: path.display().to_string(),
        detail: "missing aggregate cpu line".to_string(),
    })
}

/// Parse `cpu  user nice system idle iowait irq softirq steal ...`.
/// Idle time counts `idle` and `iowait`.
fn parse_cpu_times(stat: &str) -> Option<CpuTimes> {
    let line = stat.lines().find(|l| l.starts_with("cpu "))?;
    let fields: Vec<u64> = line
        .split_whitespace()
        .skip(1)
        .map(|f| f.parse().ok())
        .collect::<Option<_>>()?;
    if fields.len() < 4 {
        return None;
    }
    // guest and guest_nice are already folded into user and nice.
    let counted = &fields[..fields.len().min(8)];
    let idle = fields[3] + fields.get(4).copied().unwrap_or(0);
    Some(CpuTimes {
        idle,
        total: counted.iter().sum(),
    })
}

/// Parse a CPU range list like `"0-3"` → 4 or `"0,2-3"` → 3.
fn parse_cpu_range(s: &str) -> Option<u32> {
    let mut total = 0u32;
    for part in s.split(',') {
        let part = part.trim();
        if let Some((start, end)) = part.split_once('-') {
            let start: u32 = start.trim().parse().ok()?;
            let end: u32 = end.trim().parse().ok()?;
            let span = end.checked_sub(start)?.checked_add(1)?;
            total = total.checked_add(span)?;
        } else {
            let _: u32 = part.parse().ok()?;
            total = total.checked_add(1)?;
        }
    }
    (total > 0).then_some(total)
}

fn parse_cpuinfo_mhz(cpuinfo: &str) -> Option<f64> {
    cpuinfo
        .lines()
        .filter_map(|l| l.split_once(':'))
        .find(|(key, _)| key.trim() == "cpu MHz")
        .and_then(|(_, value)| value.trim().parse().ok())
}

fn read_trimmed(path: &Path) -> ProviderResult<String> {
    std::fs::read_to_string(path)
        .map(|s| s.trim().to_string())
        .map_err(|e| ProviderError::Io {
            path: path.display().to_string(),
            source: e,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const STAT: &str = "cpu  100 0 100 600 200 0 0 0 0 0\ncpu0 50 0 50 300 100 0 0 0 0 0\nintr 1234\n";

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn provider_at(root: &Path) -> ProcProvider {
        let mut config = EdgeScoreConfig::default();
        config.provider.sysfs_root = root.to_path_buf();
        config.provider.sample_ms = 0;
        config.provider.interface = Some("eth0".to_string());
        ProcProvider::from_config(&config)
    }

    #[test]
    fn test_parse_cpu_times() {
        let times = parse_cpu_times(STAT).unwrap();
        assert_eq!(times, CpuTimes { idle: 800, total: 1000 });
        assert!(parse_cpu_times("intr 1\n").is_none());
    }

    #[test]
    fn test_usage_since() {
        let earlier = CpuTimes { idle: 800, total: 1000 };
        let later = CpuTimes { idle: 850, total: 1200 };
        assert_eq!(later.usage_since(&earlier), Some(0.75));
        assert_eq!(later.usage_since(&later), None);
    }

    #[test]
    fn idle_window_reports_one_busy_tick() {
        let earlier = CpuTimes { idle: 800, total: 1000 };
        let later = CpuTimes { idle: 1000, total: 1200 };
        assert_eq!(later.usage_since(&earlier), Some(1.0 / 200.0));
    }

    #[test]
    fn idle_cpu_usage_is_strictly_positive() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), PROC_STAT, "cpu  0 0 0 1000 0 0 0 0 0 0
");

        let usage = provider_at(dir.path()).read_metric(ResourceKind::CpuUsage).unwrap();
        assert_eq!(usage, 0.001);
    }

    #[test]
    fn test_parse_cpu_range() {
        assert_eq!(parse_cpu_range("0-3"), Some(4));
        assert_eq!(parse_cpu_range("0"), Some(1));
        assert_eq!(parse_cpu_range("0,2-3"), Some(3));
        assert_eq!(parse_cpu_range("3-1"), None);
        assert_eq!(parse_cpu_range("abc"), None);
        assert_eq!(parse_cpu_range("0-4294967295"), None);
        assert_eq!(parse_cpu_range("0-4294967294,5"), None);
    }

    #[test]
    fn test_parse_cpuinfo_mhz() {
        let info = "processor\t: 0\nmodel name\t: Test\ncpu MHz\t\t: 1800.000\n";
        assert_eq!(parse_cpuinfo_mhz(info), Some(1800.0));
        assert_eq!(parse_cpuinfo_mhz("processor : 0\n"), None);
    }

    #[test]
    fn reads_fake_sysfs_tree() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, PROC_STAT, STAT);
        write(root, CPU_ONLINE, "0-3\n");
        write(root, CPU0_CUR_FREQ, "2000000\n");
        write(root, "sys/class/net/eth0/speed", "1000\n");

        let provider = provider_at(root);
        // Static file: the sampling window sees no ticks, so the since-boot ratio is used.
        assert_eq!(provider.read_metric(ResourceKind::CpuUsage).unwrap(), 0.2);
        assert_eq!(provider.read_metric(ResourceKind::CpuCount).unwrap(), 4.0);
        assert_eq!(provider.read_metric(ResourceKind::CpuFreq).unwrap(), 2.0);
        assert_eq!(provider.read_metric(ResourceKind::NetBandwidth).unwrap(), 1000.0);
    }

    #[test]
    fn frequency_falls_back_to_cpuinfo() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), PROC_CPUINFO, "processor : 0\ncpu MHz : 1500.0\n");

        let provider = provider_at(dir.path());
        assert_eq!(provider.read_metric(ResourceKind::CpuFreq).unwrap(), 1.5);
    }

    #[test]
    fn link_down_uses_configured_bandwidth() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "sys/class/net/eth0/speed", "-1\n");

        let mut provider = provider_at(dir.path());
        assert!(matches!(
            provider.read_metric(ResourceKind::NetBandwidth),
            Err(ProviderError::Unavailable(ResourceKind::NetBandwidth))
        ));

        provider.fallback_bandwidth = Some(54.0);
        assert_eq!(provider.read_metric(ResourceKind::NetBandwidth).unwrap(), 54.0);
    }

    #[test]
    fn missing_stat_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let provider = provider_at(dir.path());
        assert!(matches!(
            provider.read_metric(ResourceKind::CpuUsage),
            Err(ProviderError::Io { .. })
        ));
    }

    #[test]
    fn rtt_is_not_a_local_metric() {
        let dir = tempfile::tempdir().unwrap();
        let provider = provider_at(dir.path());
        assert!(matches!(
            provider.read_metric(ResourceKind::NetRtt),
            Err(ProviderError::Unsupported(ResourceKind::NetRtt))
        ));
    }
}
