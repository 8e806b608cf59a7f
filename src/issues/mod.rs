//! Issue-range parsing.
//!
//! Turns free-text descriptions such as
//! `"Fantastic Four #48-50, Silver Surfer #1-18, Annual #1"` into per-series
//! issue-number sets. Everything downstream (overlap, recommendations, the
//! data-quality validator) works on [`ParsedIssueSet`] values.
//!
//! - `parser`: the segment/cursor parser and [`IssueRef`]
//! - `normalize`: series-name normalization and fuzzy matching
//! - `cache`: caller-owned cache keyed by slug and text hash

pub mod cache;
pub mod normalize;
pub mod parser;

pub use cache::{text_hash, IssueIndex, ParsedIssueCache};
pub use normalize::{fuzzy_series_match, normalize_series};
pub use parser::{parse_issues, IssueRef, ParsedIssueSet, MAX_RANGE_SPAN};
