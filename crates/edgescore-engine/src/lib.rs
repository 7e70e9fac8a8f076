//! edgescore-engine — device fitness scoring for service placement.
//!
//! Turns a device's compute capacity, network throughput and round-trip
//! latency into one comparable number. The orchestrator ranks candidate
//! devices by that number; ranking and placement live outside this crate.
//!
//! # Components
//!
//! - **`transform`** — per-dimension scores (compute, network, latency)
//! - **`assembler`** — fixed-weight combination into a single score
//! - **`snapshot`** — short-circuiting snapshot builder over a provider
//! - **`facade`** — the [`Scoring`] contract and its default implementation
//!
//! # Pipeline
//!
//! ```text
//! DefaultScoring
//!   ├── SnapshotBuilder ── ResourceProvider (read_metric / read_rtt)
//!   ├── transform::{compute_score, network_score, latency_score}
//!   └── assembler::assemble → f64
//! ```

pub mod assembler;
pub mod facade;
pub mod snapshot;
pub mod transform;

pub use assembler::{ScoreBreakdown, assemble, score_readings};
pub use facade::{DefaultScoring, Scoring};
pub use snapshot::SnapshotBuilder;
pub use transform::{compute_score, latency_score, network_score};
