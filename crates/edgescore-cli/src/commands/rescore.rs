use std::io::Read;
use std::path::Path;

use anyhow::Context;
use edgescore_core::{ResourceProvider, ResourceSnapshot};
use edgescore_engine::DefaultScoring;
use serde_json::json;

use super::{breakdown_json, format_breakdown};
use crate::OutputFormat;

pub fn rescore<P: ResourceProvider>(
    scoring: &DefaultScoring<P>,
    file: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let snapshot = read_snapshot(file)?;
    let breakdown = scoring.breakdown(&snapshot)?;

    match format {
        OutputFormat::Json => {
            let out = json!({
                "score": breakdown.total(),
                "breakdown": breakdown_json(&breakdown),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => println!("{}", format_breakdown(&breakdown)),
    }
    Ok(())
}

fn read_snapshot(file: &str) -> anyhow::Result<ResourceSnapshot> {
    let content = if file == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(Path::new(file)).with_context(|| format!("reading {file}"))?
    };
    let snapshot: ResourceSnapshot =
        serde_json::from_str(&content).with_context(|| format!("parsing snapshot from {file}"))?;
    if snapshot.is_empty() {
        anyhow::bail!("snapshot in {file} holds no readings");
    }
    Ok(snapshot)
}
