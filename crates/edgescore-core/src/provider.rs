//! The resource provider contract consumed by the scoring engine.

use std::sync::Arc;

use crate::error::ProviderResult;
use crate::types::ResourceKind;

/// Supplies raw metric readings for a device.
///
/// Implementations are shared across concurrent scoring calls, so every
/// read takes its full context as arguments: the RTT target is a parameter
/// of [`read_rtt`](Self::read_rtt), never provider state.
pub trait ResourceProvider: Send + Sync {
    /// Read a local metric. `NetRtt` is not a local metric; implementations
    /// return [`ProviderError::Unsupported`](crate::ProviderError::Unsupported) for it.
    fn read_metric(&self, kind: ResourceKind) -> ProviderResult<f64>;

    /// Round-trip time in milliseconds to `device_id`.
    fn read_rtt(&self, device_id: &str) -> ProviderResult<f64>;

    /// Read any kind, routing RTT to the given device.
    fn read(&self, kind: ResourceKind, device_id: &str) -> ProviderResult<f64> {
        match kind {
            ResourceKind::NetRtt => self.read_rtt(device_id),
            local => self.read_metric(local),
        }
    }
}

impl<P: ResourceProvider + ?Sized> ResourceProvider for Arc<P> {
    fn read_metric(&self, kind: ResourceKind) -> ProviderResult<f64> {
        (**self).read_metric(kind)
    }

    fn read_rtt(&self, device_id: &str) -> ProviderResult<f64> {
        (**self).read_rtt(device_id)
    }
}

impl<P: ResourceProvider + ?Sized> ResourceProvider for Box<P> {
    fn read_metric(&self, kind: ResourceKind) -> ProviderResult<f64> {
        (**self).read_metric(kind)
    }

    fn read_rtt(&self, device_id: &str) -> ProviderResult<f64> {
        (**self).read_rtt(device_id)
    }
}
