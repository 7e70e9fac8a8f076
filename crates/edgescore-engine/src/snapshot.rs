//! Snapshot builder — collect every metric a score needs for one device.
//!
//! Metrics are read in [`ResourceKind::ALL`] order. The first failed read
//! ends the build: the snapshot is marked with the error key, the failing
//! kind is reported, and later kinds are never requested. Reads can be
//! expensive (CPU sampling windows, RTT measurements), and a single missing
//! metric already makes the snapshot unscorable.

use edgescore_core::{ResourceKind, ResourceProvider, ResourceSnapshot, SnapshotError};
use tracing::{debug, warn};

pub struct SnapshotBuilder<'a, P: ResourceProvider + ?Sized> {
    provider: &'a P,
}

impl<'a, P: ResourceProvider + ?Sized> SnapshotBuilder<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        Self { provider }
    }

    /// Read all five metrics for `device_id`.
    pub fn build(&self, device_id: &str) -> Result<ResourceSnapshot, SnapshotError> {
        let mut snapshot = ResourceSnapshot::new();

        for kind in ResourceKind::ALL {
            match self.provider.read(kind, device_id) {
                Ok(value) => {
                    debug!(device = device_id, %kind, value, "metric read");
                    snapshot.insert(kind, value);
                }
                Err(source) => {
                    warn!(
                        device = device_id,
                        %kind,
                        error = %source,
                        "metric read failed, skipping remaining metrics"
                    );
                    snapshot.mark_error();
                    return Err(SnapshotError {
                        device: device_id.to_string(),
                        kind,
                        snapshot,
                        source,
                    });
                }
            }
        }

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgescore_core::{ProviderError, ProviderResult};
    use std::sync::Mutex;

    /// Records every request and fails on one chosen kind.
    struct Recording {
        fail_on: Option<ResourceKind>,
        calls: Mutex<Vec<(ResourceKind, Option<String>)>>,
    }

    impl Recording {
        fn new(fail_on: Option<ResourceKind>) -> Self {
            Self {
                fail_on,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn answer(&self, kind: ResourceKind) -> ProviderResult<f64> {
            if self.fail_on == Some(kind) {
                Err(ProviderError::Unavailable(kind))
            } else {
                Ok(1.0)
            }
        }
    }

    impl ResourceProvider for Recording {
        fn read_metric(&self, kind: ResourceKind) -> ProviderResult<f64> {
            self.calls.lock().unwrap().push((kind, None));
            self.answer(kind)
        }

        fn read_rtt(&self, device_id: &str) -> ProviderResult<f64> {
            self.calls
                .lock()
                .unwrap()
                .push((ResourceKind::NetRtt, Some(device_id.to_string())));
            self.answer(ResourceKind::NetRtt)
        }
    }

    #[test]
    fn builds_complete_snapshot_in_order() {
        let provider = Recording::new(None);
        let snap = SnapshotBuilder::new(&provider).build("peer-1").unwrap();

        assert!(snap.is_complete());
        let calls = provider.calls.lock().unwrap();
        let kinds: Vec<_> = calls.iter().map(|(k, _)| *k).collect();
        assert_eq!(kinds, ResourceKind::ALL.to_vec());
        assert_eq!(calls[4].1.as_deref(), Some("peer-1"));
    }

    #[test]
    fn stops_at_first_failure() {
        let provider = Recording::new(Some(ResourceKind::CpuFreq));
        let err = SnapshotBuilder::new(&provider).build("peer-1").unwrap_err();

        assert_eq!(err.kind, ResourceKind::CpuFreq);
        assert_eq!(err.device, "peer-1");
        assert!(err.snapshot.is_error());
        assert_eq!(err.snapshot.get(ResourceKind::CpuUsage), Some(1.0));
        assert_eq!(err.snapshot.get(ResourceKind::NetBandwidth), None);
        // Usage, count, then the failing frequency read; nothing after.
        assert_eq!(provider.calls.lock().unwrap().len(), 3);
    }

    #[test]
    fn rtt_failure_keeps_local_metrics() {
        let provider = Recording::new(Some(ResourceKind::NetRtt));
        let err = SnapshotBuilder::new(&provider).build("peer-2").unwrap_err();

        let snap = err.into_snapshot();
        assert!(snap.is_error());
        assert_eq!(snap.len(), 5); // four readings plus the error marker
    }
}
