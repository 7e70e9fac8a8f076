//! edgescore-provider — concrete [`ResourceProvider`] implementations.
//!
//! - **`procfs`** — live readings from `/proc` and `/sys` on Linux
//! - **`rtt`** — RTT measurement as TCP connect time to a peer
//! - **`fixed`** — fixed readings from configuration
//!
//! [`from_config`] picks one according to `[provider].kind`.

pub mod fixed;
pub mod procfs;
pub mod rtt;

use edgescore_core::config::ProviderKind;
use edgescore_core::{EdgeScoreConfig, ResourceProvider};
use tracing::info;

pub use fixed::StaticProvider;
pub use procfs::ProcProvider;
pub use rtt::TcpRtt;

/// Build the provider selected by `config`.
pub fn from_config(config: &EdgeScoreConfig) -> Box<dyn ResourceProvider> {
    match config.provider.kind {
        ProviderKind::Proc => {
            info!(root = %config.provider.sysfs_root.display(), "using procfs resource provider");
            Box::new(ProcProvider::from_config(config))
        }
        ProviderKind::Static => {
            info!("using static resource provider");
            Box::new(StaticProvider::from_config(config))
        }
    }
}
