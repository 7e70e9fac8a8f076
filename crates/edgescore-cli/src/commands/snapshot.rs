use edgescore_core::{ResourceProvider, ResourceSnapshot};
use edgescore_engine::{DefaultScoring, Scoring};

use crate::OutputFormat;

pub fn snapshot<P: ResourceProvider>(
    scoring: &DefaultScoring<P>,
    device: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match scoring.resource_snapshot(device) {
        Ok(snapshot) => {
            println!("{}", render(&snapshot, format)?);
            Ok(())
        }
        Err(err) => {
            // Still emit the error-marked snapshot so callers can cache it.
            println!("{}", render(&err.snapshot, format)?);
            Err(err.into())
        }
    }
}

fn render(snapshot: &ResourceSnapshot, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(snapshot)?,
        OutputFormat::Text => snapshot
            .iter()
            .map(|(name, value)| format!("{name:<14}{value}"))
            .collect::<Vec<_>>()
            .join("\n"),
    })
}
