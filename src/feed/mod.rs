//! Price Feed
//!
//! Trait definition for sample producers that drive the extrema engine,
//! plus replay-oriented implementations. The engine places no constraint
//! on cadence or regularity; it only requires that timestamps never move
//! backward.

use crate::engine::clock::Millis;
use crate::engine::sample::Sample;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{info, warn};

/// Trait for price sources that can supply a (price, timestamp) stream.
pub trait PriceFeed: Send {
    /// Get the next sample from the feed.
    fn next_sample(&mut self) -> Option<Sample>;

    /// Peek at the timestamp of the next sample without consuming.
    fn peek_time(&self) -> Option<Millis>;

    /// Reset the feed to the beginning (for multiple runs).
    fn reset(&mut self);

    /// Number of samples remaining (if known).
    fn remaining(&self) -> Option<usize> {
        None
    }

    /// Feed identifier for logging/diagnostics.
    fn name(&self) -> &str {
        "unknown"
    }
}

/// A feed backed by an in-memory vector of samples.
pub struct VecFeed {
    samples: Vec<Sample>,
    index: usize,
    name: String,
}

impl VecFeed {
    pub fn new(name: impl Into<String>, mut samples: Vec<Sample>) -> Self {
        // Sort by time to ensure correct ordering
        samples.sort_by_key(|s| s.at);
        Self {
            samples,
            index: 0,
            name: name.into(),
        }
    }

    /// Load a JSONL file: one `{"price": .., "at": ..}` object per line.
    ///
    /// Blank lines are ignored; malformed lines are skipped with a warning.
    pub fn from_jsonl(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("failed to open price stream {}", path.display()))?;
        let reader = BufReader::new(file);

        let mut samples = Vec::new();
        let mut skipped = 0usize;
        for (line_no, line) in reader.lines().enumerate() {
            let line = line
                .with_context(|| format!("failed to read {} at line {}", path.display(), line_no + 1))?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match serde_json::from_str::<Sample>(trimmed) {
                Ok(sample) => samples.push(sample),
                Err(e) => {
                    skipped += 1;
                    warn!(line = line_no + 1, error = %e, "skipping malformed sample line");
                }
            }
        }
        info!(
            path = %path.display(),
            samples = samples.len(),
            skipped,
            "loaded price stream"
        );

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, samples))
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl PriceFeed for VecFeed {
    fn next_sample(&mut self) -> Option<Sample> {
        if self.index < self.samples.len() {
            let sample = self.samples[self.index];
            self.index += 1;
            Some(sample)
        } else {
            None
        }
    }

    fn peek_time(&self) -> Option<Millis> {
        self.samples.get(self.index).map(|s| s.at)
    }

    fn reset(&mut self) {
        self.index = 0;
    }

    fn remaining(&self) -> Option<usize> {
        Some(self.samples.len() - self.index)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
