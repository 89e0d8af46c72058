//! Rangewatch
//!
//! Rolling-window price extrema engine: ingest a stream of timestamped
//! price samples and answer "what is the min (and max) price observed
//! within the last W milliseconds?" for several fixed windows
//! simultaneously, in amortized O(1) per insertion per window.
//!
//! The core is a monotonic-deque per (window, extremum) pair coordinated
//! by [`RollingExtremaTracker`]; see the [`engine`] module. [`feed`]
//! supplies replay-oriented producers and [`config`] the TOML window-set
//! configuration.
//!
//! # Example
//!
//! ```
//! use rangewatch::{RollingExtremaTracker, WindowSpec};
//!
//! let mut tracker = RollingExtremaTracker::new(vec![
//!     WindowSpec::new("5s", 5_000),
//! ]).unwrap();
//!
//! tracker.record(50.0, 0).unwrap();
//! tracker.record(70.0, 1_000).unwrap();
//! tracker.record(30.0, 2_000).unwrap();
//!
//! let extrema = tracker.query("5s").unwrap();
//! assert_eq!(extrema.min, Some(30.0));
//! assert_eq!(extrema.max, Some(70.0));
//! ```

pub mod config;
pub mod engine;
pub mod feed;

pub use config::{WindowConfig, WindowEntry};
pub use engine::clock::Millis;
pub use engine::deque::{ExtremaDeque, Extremum};
pub use engine::handle::SharedTracker;
pub use engine::sample::Sample;
pub use engine::tracker::{RollingExtremaTracker, TrackerError, WindowExtrema, WindowSpec};
pub use feed::{PriceFeed, VecFeed};
