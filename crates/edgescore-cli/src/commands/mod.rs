pub mod rescore;
pub mod score;
pub mod snapshot;

use edgescore_engine::ScoreBreakdown;
use serde_json::{Value, json};

fn breakdown_json(breakdown: &ScoreBreakdown) -> Value {
    json!({
        "compute": breakdown.compute,
        "network": breakdown.network,
        "latency": breakdown.latency,
    })
}

fn format_breakdown(breakdown: &ScoreBreakdown) -> String {
    format!(
        "score    {:.6}\n  compute  {:.6} (x0.5)\n  network  {:.6}\n  latency  {:.6}",
        breakdown.total(),
        breakdown.compute,
        breakdown.network,
        breakdown.latency,
    )
}
