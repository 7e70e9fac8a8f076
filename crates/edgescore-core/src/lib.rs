//! edgescore-core — shared types for the EdgeScore scoring engine.
//!
//! Holds the vocabulary every other crate speaks: the [`ResourceKind`]
//! lookup keys, the [`ResourceSnapshot`] a device reports, the error
//! enums, the [`ResourceProvider`] contract, and the `edgescore.toml`
//! configuration.

pub mod config;
pub mod error;
pub mod provider;
pub mod snapshot;
pub mod types;

pub use config::EdgeScoreConfig;
pub use error::{ProviderError, ProviderResult, ScoringError, ScoringResult, SnapshotError};
pub use provider::ResourceProvider;
pub use snapshot::ResourceSnapshot;
pub use types::*;
