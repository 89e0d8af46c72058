//! Rolling-window extrema engine core.
//!
//! [`deque::ExtremaDeque`] maintains the monotonic candidate queue for one
//! (window, extremum) pair; [`tracker::RollingExtremaTracker`] coordinates
//! the sample ledger and one deque pair per configured window and exposes
//! `record` / `advance_to` / `query`. [`handle::SharedTracker`] wraps a
//! tracker for multi-threaded hosts.

pub mod clock;
pub mod deque;
pub mod handle;
pub mod sample;
pub mod tracker;
