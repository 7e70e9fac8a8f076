//! RTT measurement as TCP connect latency.
//!
//! A TCP handshake costs one round trip, so the time `connect` takes to a
//! listening peer approximates its RTT without needing raw ICMP sockets.

use std::collections::HashMap;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use edgescore_core::{ProviderError, ProviderResult};
use tracing::debug;

/// Measures RTT to devices listed in the `[devices]` table.
#[derive(Debug, Clone)]
pub struct TcpRtt {
    devices: HashMap<String, String>,
    timeout: Duration,
}

impl TcpRtt {
    pub fn new(devices: HashMap<String, String>, timeout: Duration) -> Self {
        Self { devices, timeout }
    }

    /// Connect to `device_id` and return the elapsed time in milliseconds.
    pub fn measure(&self, device_id: &str) -> ProviderResult<f64> {
        let address = self
            .devices
            .get(device_id)
            .ok_or_else(|| ProviderError::UnknownDevice(device_id.to_string()))?;
        let addr = resolve(device_id, address, self.timeout)?;

        let start = Instant::now();
        let stream = TcpStream::connect_timeout(&addr, self.timeout).map_err(|e| {
            debug!(device = device_id, %addr, error = %e, "rtt connection failed");
            ProviderError::Rtt {
                device: device_id.to_string(),
                detail: e.to_string(),
            }
        })?;
        let rtt_ms = start.elapsed().as_secs_f64() * 1000.0;
        drop(stream);

        debug!(device = device_id, %addr, rtt_ms, "rtt measured");
        Ok(rtt_ms)
    }
}

/// Turn `address` into a socket address within `timeout`.
///
/// IP literals never touch the resolver. Host names are looked up on a
/// helper thread; if it misses the deadline the lookup is abandoned and
/// the thread exits on its own once the system resolver returns.
fn resolve(device_id: &str, address: &str, timeout: Duration) -> ProviderResult<SocketAddr> {
    let lookup_err = |detail: String| ProviderError::Rtt {
        device: device_id.to_string(),
        detail,
    };
    if let Ok(addr) = address.parse::<SocketAddr>() {
        return Ok(addr);
    }

    let (tx, rx) = mpsc::channel();
    let host = address.to_string();
    thread::Builder::new()
        .name("edgescore-resolve".to_string())
        .spawn(move || {
            let found = host
                .to_socket_addrs()
                .map(|mut addrs| addrs.next())
                .map_err(|e| e.to_string());
            let _ = tx.send(found);
        })
        .map_err(|e| lookup_err(format!("cannot start resolver for {address}: {e}")))?;

    match rx.recv_timeout(timeout) {
        Ok(Ok(Some(addr))) => Ok(addr),
        Ok(Ok(None)) => Err(lookup_err(format!("{address} resolved to no addresses"))),
        Ok(Err(e)) => Err(lookup_err(format!("cannot resolve {address}: {e}"))),
        Err(mpsc::RecvTimeoutError::Timeout) => {
            debug!(device = device_id, address, ?timeout, "name lookup timed out");
            Err(lookup_err(format!("resolving {address} took longer than {timeout:?}")))
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => {
            Err(lookup_err(format!("resolver for {address} exited without an answer")))
        }
    }
}
