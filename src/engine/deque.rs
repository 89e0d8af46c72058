//! Monotonic Window Deque
//!
//! Double-ended queue whose front always holds the current extremum (min or
//! max, per instance) among the samples it retains. Admission evicts every
//! back entry the incoming sample dominates, so prices read front-to-back
//! stay monotone toward the extremum and the front lookup is O(1).
//!
//! # Invariant
//!
//! Samples arrive in non-decreasing timestamp order (the tracker enforces
//! this). A back entry dominated by a later arrival can never again be the
//! window extremum - the newer sample is at least as extreme and outlives
//! it - so eviction is safe. Each sample is pushed once and popped at most
//! once, making maintenance O(1) amortized per insertion.
//!
//! Expiring the front by timestamp never breaks monotonicity of the
//! remainder; the owner drives that via [`ExtremaDeque::front_timestamp`].

use crate::engine::clock::Millis;
use crate::engine::sample::Sample;
use std::collections::VecDeque;

/// Which extremum an [`ExtremaDeque`] instance tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extremum {
    Min,
    Max,
}

impl Extremum {
    /// True when `incumbent` can never again win once `incoming` (which
    /// arrives later and outlives it) is admitted.
    #[inline]
    fn dominated(self, incumbent: f64, incoming: f64) -> bool {
        match self {
            Extremum::Min => incumbent > incoming,
            Extremum::Max => incumbent < incoming,
        }
    }
}

/// Monotonic candidate queue for one (window, extremum) pair.
#[derive(Debug, Clone)]
pub struct ExtremaDeque {
    kind: Extremum,
    entries: VecDeque<Sample>,
}

impl ExtremaDeque {
    pub fn new(kind: Extremum) -> Self {
        Self {
            kind,
            entries: VecDeque::new(),
        }
    }

    #[inline]
    pub fn kind(&self) -> Extremum {
        self.kind
    }

    /// Admit a new sample, evicting dominated candidates from the back
    /// before appending.
    pub fn push_back(&mut self, sample: Sample) {
        while let Some(back) = self.entries.back() {
            if self.kind.dominated(back.price, sample.price) {
                self.entries.pop_back();
            } else {
                break;
            }
        }
        self.entries.push_back(sample);
    }

    /// Current extremum candidate, or `None` when empty.
    #[inline]
    pub fn front(&self) -> Option<Sample> {
        self.entries.front().copied()
    }

    #[inline]
    pub fn pop_front(&mut self) -> Option<Sample> {
        self.entries.pop_front()
    }

    /// Most recently admitted candidate, or `None` when empty.
    #[inline]
    pub fn back(&self) -> Option<Sample> {
        self.entries.back().copied()
    }

    #[inline]
    pub fn pop_back(&mut self) -> Option<Sample> {
        self.entries.pop_back()
    }

    /// Timestamp of the front candidate; the owner compares it against the
    /// window cutoff to decide whether the front has aged out.
    #[inline]
    pub fn front_timestamp(&self) -> Option<Millis> {
        self.entries.front().map(|s| s.at)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Candidates front-to-back.
    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.entries.iter()
    }
}
