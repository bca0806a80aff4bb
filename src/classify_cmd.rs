//! Classify command: report how blendshape names fit the naming convention.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use facerig_riglogic::{ClassificationReport, RigLogic};

use crate::cli::ClassifyArgs;

fn read_names(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read names: {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("expected a JSON array of strings: {}", path.display()))
}

pub fn classify(names: &[String], strict: bool) -> Result<ClassificationReport> {
    let rig = if strict {
        RigLogic::strict(names)?
    } else {
        RigLogic::new(names)
    };
    Ok(rig.report().clone())
}

/// Print the classification report as JSON.
pub fn run(args: ClassifyArgs) -> Result<()> {
    let names = read_names(&args.names)?;
    let report = classify(&names, args.strict)?;
    info!(
        classified = report.classified_count(),
        total = report.total_count(),
        "names classified"
    );
    let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
    println!("{json}");
    Ok(())
}
