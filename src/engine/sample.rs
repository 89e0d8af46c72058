//! Price Sample
//!
//! The unit of input to the engine: one observed price at one point in
//! stream time. Immutable once recorded; within a single stream the
//! timestamp is the identity.

use crate::engine::clock::Millis;
use serde::{Deserialize, Serialize};

/// A single (price, timestamp) observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Observed price.
    pub price: f64,
    /// Observation time in milliseconds since epoch.
    pub at: Millis,
}

impl Sample {
    #[inline]
    pub const fn new(price: f64, at: Millis) -> Self {
        Self { price, at }
    }
}
