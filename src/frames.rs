//! Recorded signal frames, read and written as JSON.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// A take of named float signals: one row per frame, one column per signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Frames {
    pub signals: Vec<String>,
    pub frames: Vec<Vec<f64>>,
}

impl Frames {
    pub fn new(signals: Vec<String>) -> Self {
        Self {
            signals,
            frames: Vec::new(),
        }
    }

    /// Checks every frame carries one value per signal.
    pub fn validate(&self) -> Result<()> {
        for (i, frame) in self.frames.iter().enumerate() {
            if frame.len() != self.signals.len() {
                bail!(
                    "frame {i} has {} values, expected {} (one per signal)",
                    frame.len(),
                    self.signals.len()
                );
            }
        }
        Ok(())
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let frames: Self = serde_json::from_str(text).context("failed to parse frames JSON")?;
        frames.validate()?;
        Ok(frames)
    }

    pub fn read(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read frames: {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("invalid frames file: {}", path.display()))
    }

    /// Writes pretty JSON to `path`, or to stdout if `None`.
    pub fn write(&self, path: Option<&Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize frames")?;
        match path {
            Some(path) => std::fs::write(path, json + "\n")
                .with_context(|| format!("failed to write output: {}", path.display())),
            None => {
                let mut out = std::io::stdout().lock();
                writeln!(out, "{json}").context("failed to write to stdout")
            }
        }
    }
}
