//! Rolling Extrema Tracker
//!
//! Coordinates the canonical sample ledger and one min/max [`ExtremaDeque`]
//! pair per configured window. `record` appends a sample, updates every
//! pair, then expires as of the new timestamp; `advance_to` runs the expiry
//! pass alone so state stays correct across gaps with no samples; `query`
//! reads deque fronts in O(1) and never mutates.
//!
//! # Time Contract
//!
//! Expiry is evaluated as of the latest observed stream time - the
//! timestamp handed to the most recent `record` or `advance_to` call -
//! never wall clock. Sample timestamps must be strictly increasing;
//! violations are rejected. Out-of-order admission evicts the wrong
//! candidates and cannot be repaired without re-sorting the window.
//!
//! # Expiry Boundary
//!
//! A sample at `T` is dead for window `w` exactly when
//! `now - T >= length(w)`; the boundary instant itself expires.

use crate::engine::clock::Millis;
use crate::engine::deque::{ExtremaDeque, Extremum};
use crate::engine::sample::Sample;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use std::fmt;
use tracing::debug;

/// One tracked window: identifier plus trailing interval length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSpec {
    /// Identifier used in queries, e.g. "5m".
    pub id: String,
    /// Trailing interval length in milliseconds. Must be positive.
    pub length: Millis,
}

impl WindowSpec {
    pub fn new(id: impl Into<String>, length: Millis) -> Self {
        Self {
            id: id.into(),
            length,
        }
    }
}

/// Extrema for one window as of the latest observed stream time.
///
/// Both fields are `None` until a sample survives into the window and
/// again whenever expiry has emptied it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowExtrema {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl WindowExtrema {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// Error type for tracker construction and operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    /// Construction with no windows.
    EmptyConfig,
    /// Window length is zero or negative.
    NonPositiveWindow { id: String, length: Millis },
    /// Two windows share one identifier.
    DuplicateWindow { id: String },
    /// Queried window id is outside the configured set.
    UnknownWindow { id: String },
    /// Time moved backward relative to the latest observed time.
    NonMonotonicTime { now: Millis, got: Millis },
    /// A sample was already recorded at this timestamp.
    DuplicateSampleTime { at: Millis },
}

impl fmt::Display for TrackerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyConfig => {
                write!(f, "at least one window must be configured")
            }
            Self::NonPositiveWindow { id, length } => {
                write!(f, "window '{}' has non-positive length {}ms", id, length)
            }
            Self::DuplicateWindow { id } => {
                write!(f, "window id '{}' configured more than once", id)
            }
            Self::UnknownWindow { id } => {
                write!(f, "unknown window id '{}'", id)
            }
            Self::NonMonotonicTime { now, got } => {
                write!(f, "time moved backward: at {} but stream is at {}", got, now)
            }
            Self::DuplicateSampleTime { at } => {
                write!(f, "sample already recorded at {}", at)
            }
        }
    }
}

impl std::error::Error for TrackerError {}

/// Ledger plus candidate deques for one configured window.
#[derive(Debug, Clone)]
struct WindowState {
    spec: WindowSpec,
    min: ExtremaDeque,
    max: ExtremaDeque,
}

/// Multi-window rolling extrema engine.
///
/// Owns the time-ordered sample ledger and every per-window candidate
/// deque; all mutation flows through [`record`](Self::record) and
/// [`advance_to`](Self::advance_to).
#[derive(Debug, Clone)]
pub struct RollingExtremaTracker {
    windows: Vec<WindowState>,
    /// Time-ordered live samples, capped by the largest window.
    ledger: VecDeque<Sample>,
    largest_window: Millis,
    /// Latest observed stream time (last `record` or `advance_to`).
    now: Option<Millis>,
    last_sample_at: Option<Millis>,
}

impl RollingExtremaTracker {
    /// Build a tracker over a fixed window set.
    ///
    /// The set is immutable for the tracker's lifetime; reconfiguration
    /// means constructing a new instance. Lengths must be positive and ids
    /// distinct.
    pub fn new(specs: Vec<WindowSpec>) -> Result<Self, TrackerError> {
        if specs.is_empty() {
            return Err(TrackerError::EmptyConfig);
        }
        let mut largest_window: Millis = 0;
        {
            let mut seen: HashSet<&str> = HashSet::with_capacity(specs.len());
            for spec in &specs {
                if spec.length <= 0 {
                    return Err(TrackerError::NonPositiveWindow {
                        id: spec.id.clone(),
                        length: spec.length,
                    });
                }
                if !seen.insert(spec.id.as_str()) {
                    return Err(TrackerError::DuplicateWindow {
                        id: spec.id.clone(),
                    });
                }
                largest_window = largest_window.max(spec.length);
            }
        }
        let windows: Vec<WindowState> = specs
            .into_iter()
            .map(|spec| WindowState {
                min: ExtremaDeque::new(Extremum::Min),
                max: ExtremaDeque::new(Extremum::Max),
                spec,
            })
            .collect();
        debug!(
            windows = windows.len(),
            largest_window_ms = largest_window,
            "extrema tracker configured"
        );
        Ok(Self {
            windows,
            ledger: VecDeque::new(),
            largest_window,
            now: None,
            last_sample_at: None,
        })
    }

    /// Configured windows, in construction order.
    pub fn windows(&self) -> impl Iterator<Item = &WindowSpec> {
        self.windows.iter().map(|w| &w.spec)
    }

    /// Latest observed stream time, if any.
    #[inline]
    pub fn now(&self) -> Option<Millis> {
        self.now
    }

    /// Timestamp of the most recently recorded sample, if any.
    #[inline]
    pub fn last_sample_at(&self) -> Option<Millis> {
        self.last_sample_at
    }

    /// Number of samples currently held by the ledger.
    #[inline]
    pub fn live_samples(&self) -> usize {
        self.ledger.len()
    }

    /// Most recently recorded sample still in the ledger.
    #[inline]
    pub fn latest(&self) -> Option<Sample> {
        self.ledger.back().copied()
    }

    /// Live samples oldest-first.
    pub fn samples(&self) -> impl Iterator<Item = &Sample> {
        self.ledger.iter()
    }

    /// Ingest one sample and expire as of its timestamp.
    ///
    /// Amortized O(W) per call for W configured windows: the ledger append
    /// and each deque admission are O(1) amortized, and every expired entry
    /// is popped exactly once over its lifetime.
    pub fn record(&mut self, price: f64, at: Millis) -> Result<(), TrackerError> {
        if let Some(now) = self.now {
            if at < now {
                return Err(TrackerError::NonMonotonicTime { now, got: at });
            }
        }
        if self.last_sample_at == Some(at) {
            return Err(TrackerError::DuplicateSampleTime { at });
        }
        let sample = Sample::new(price, at);
        self.ledger.push_back(sample);
        for window in &mut self.windows {
            window.min.push_back(sample);
            window.max.push_back(sample);
        }
        self.expire(at);
        self.now = Some(at);
        self.last_sample_at = Some(at);
        Ok(())
    }

    /// Advance stream time without a sample, expiring anything that has
    /// aged out as of `now`.
    ///
    /// This is how hosts keep results fresh across gaps in the feed: the
    /// engine itself never consults a clock.
    pub fn advance_to(&mut self, now: Millis) -> Result<(), TrackerError> {
        if let Some(current) = self.now {
            if now < current {
                return Err(TrackerError::NonMonotonicTime {
                    now: current,
                    got: now,
                });
            }
        }
        self.expire(now);
        self.now = Some(now);
        Ok(())
    }

    /// Extrema for one window as of the latest observed time. O(1).
    pub fn query(&self, window_id: &str) -> Result<WindowExtrema, TrackerError> {
        Ok(Self::extrema_of(self.window(window_id)?))
    }

    /// Extrema for every configured window, in construction order.
    pub fn snapshot(&self) -> Vec<(WindowSpec, WindowExtrema)> {
        self.windows
            .iter()
            .map(|w| (w.spec.clone(), Self::extrema_of(w)))
            .collect()
    }

    /// Candidate counts (min-deque, max-deque) for one window.
    /// Diagnostics hook; the deques themselves stay private.
    pub fn candidate_depths(&self, window_id: &str) -> Result<(usize, usize), TrackerError> {
        let window = self.window(window_id)?;
        Ok((window.min.len(), window.max.len()))
    }

    fn window(&self, window_id: &str) -> Result<&WindowState, TrackerError> {
        self.windows
            .iter()
            .find(|w| w.spec.id == window_id)
            .ok_or_else(|| TrackerError::UnknownWindow {
                id: window_id.to_string(),
            })
    }

    #[inline]
    fn extrema_of(window: &WindowState) -> WindowExtrema {
        WindowExtrema {
            min: window.min.front().map(|s| s.price),
            max: window.max.front().map(|s| s.price),
        }
    }

    /// Drop every candidate and ledger entry that has aged out as of `now`.
    ///
    /// Deque fronts pop until the front is live again; each sample pops at
    /// most once over its lifetime, so the loops stay O(1) amortized even
    /// after a long gap. The ledger scan starts at the oldest entry and
    /// exits at the first live one relative to the largest window, which
    /// bounds it the same way.
    fn expire(&mut self, now: Millis) {
        for window in &mut self.windows {
            let cutoff = now - window.spec.length;
            while window.min.front_timestamp().is_some_and(|at| at <= cutoff) {
                window.min.pop_front();
            }
            while window.max.front_timestamp().is_some_and(|at| at <= cutoff) {
                window.max.pop_front();
            }
        }
        let cutoff = now - self.largest_window;
        while self.ledger.front().is_some_and(|s| s.at <= cutoff) {
            self.ledger.pop_front();
        }
    }
}
