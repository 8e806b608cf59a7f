//! Core data reasoning.
//!
//! This module contains:
//! - Overlap: how much of an item the reader already holds
//! - Coverage: per-era progress and overlapping item pairs
//! - Sequencer: cycle-tolerant reading order over the continuity graph
//! - Recommender: ranked "read next" suggestions
//!
//! Every function here is pure over immutable snapshots and safe to call
//! concurrently.

pub mod coverage;
pub mod overlap;
pub mod recommender;
pub mod sequencer;

// Re-export commonly used types
pub use coverage::{era_coverage, suggested_comparisons, Comparison, EraCoverage};
pub use overlap::{compute_owned_issues, overlap_for, rounded_percent, OverlapResult};
pub use recommender::{
    connected_sources, overlap_penalty, recommend, recommend_with_limit, Recommendation,
    DEFAULT_LIMIT,
};
pub use sequencer::{
    collection_reading_order, find_cycles, sequence, sequence_with_report, Sequence,
};
