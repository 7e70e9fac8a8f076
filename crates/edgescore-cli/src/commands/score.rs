use edgescore_core::ResourceProvider;
use edgescore_engine::{DefaultScoring, Scoring};
use serde_json::json;

use crate::OutputFormat;

pub fn score<P: ResourceProvider>(
    scoring: &DefaultScoring<P>,
    device: &str,
    strict: bool,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let score = device_score(scoring, device, strict)?;

    match format {
        OutputFormat::Json => println!("{}", json!({ "device": device, "score": score })),
        OutputFormat::Text => println!("{score:.6}"),
    }
    Ok(())
}

/// Strict mode surfaces the failure; otherwise it collapses to the sentinel.
fn device_score<P: ResourceProvider>(
    scoring: &DefaultScoring<P>,
    device: &str,
    strict: bool,
) -> anyhow::Result<f64> {
    if strict {
        Ok(scoring.try_score_by_id(device)?)
    } else {
        Ok(scoring.score_by_id(device))
    }
}
