//! longbox - continuity and data-quality core for a comic collection catalog
//!
//! Pure, synchronous reasoning over read-only catalog snapshots: what a set
//! of collected editions contains, how much of it a reader already owns,
//! what order to read it in and what to read next.
//!
//! # Architecture
//!
//! Snapshots are loaded once per command and never mutated:
//! - Free-text issue ranges are parsed into per-series number sets
//! - Overlap and coverage are computed against the reader's ownership
//! - Relationships form a continuity graph that is sequenced with a
//!   cycle-tolerant topological sort
//! - A batch validator checks curated event mappings before publishing
//!
//! # Modules
//!
//! - `issues`: Issue-range parser, series normalization, parse cache
//! - `core`: Overlap, coverage, sequencer, recommender
//! - `validate`: Event mapping data-quality checks and report
//! - `domain`: Snapshot records (CatalogItem, Relationship, Event, ...)
//! - `library`: Catalog index and snapshot loading
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Validate event mappings (exit 1 on errors)
//! longbox --data-dir web/data
//!
//! # Parse an issues-collected description
//! longbox parse "Fantastic Four #48-50, Silver Surfer #1-18"
//!
//! # What to read next
//! longbox recommend --limit 5
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod issues;
pub mod library;
pub mod validate;

// Re-export main types at crate root for convenience
pub use core::{
    compute_owned_issues, overlap_for, recommend, sequence, OverlapResult, Recommendation,
};
pub use domain::{CatalogItem, Importance, OwnershipRecord, PrintStatus, RelationType, Relationship};
pub use issues::{parse_issues, IssueRef, ParsedIssueSet};
pub use library::{Catalog, Snapshot};
pub use validate::{validate, ValidationReport};
