//! Window Configuration
//!
//! TOML-loadable set of tracked windows. The default set mirrors the
//! reference monitor: 5m, 15m, 1h, 4h, 24h.
//!
//! ```toml
//! [[window]]
//! id = "5m"
//! length_ms = 300000
//!
//! [[window]]
//! id = "1h"
//! length_ms = 3600000
//! ```

use crate::engine::clock::{Millis, MS_PER_DAY, MS_PER_HOUR, MS_PER_MIN};
use crate::engine::tracker::WindowSpec;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Window set configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(rename = "window", default = "default_windows")]
    pub windows: Vec<WindowEntry>,
}

/// One `[[window]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowEntry {
    pub id: String,
    pub length_ms: Millis,
}

fn default_windows() -> Vec<WindowEntry> {
    [
        ("5m", 5 * MS_PER_MIN),
        ("15m", 15 * MS_PER_MIN),
        ("1h", MS_PER_HOUR),
        ("4h", 4 * MS_PER_HOUR),
        ("24h", MS_PER_DAY),
    ]
    .into_iter()
    .map(|(id, length_ms)| WindowEntry {
        id: id.to_string(),
        length_ms,
    })
    .collect()
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            windows: default_windows(),
        }
    }
}

impl WindowConfig {
    /// Load from TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Convert into tracker window specs. Validation (positive lengths,
    /// distinct ids) happens in the tracker constructor.
    pub fn specs(&self) -> Vec<WindowSpec> {
        self.windows
            .iter()
            .map(|w| WindowSpec::new(w.id.clone(), w.length_ms))
            .collect()
    }
}
