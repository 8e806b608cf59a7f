//! Free-text "issues collected" parsing.
//!
//! Publication text is inconsistently punctuated, so parsing is a cursor
//! walk over comma-separated segments:
//!
//! ```text
//! "Silver Surfer #34-38, 40, 44-60; Fantastic Four Annual #5"
//!   Silver Surfer #34-38   -> named range, cursor = "silver surfer"
//!   40                     -> bare number, continues the cursor
//!   44-60                  -> bare range, continues the cursor
//!   Fantastic Four Annual #5 -> named range, cursor moves
//! ```
//!
//! A named one-shot (no numbers) resets the cursor so following numbers are
//! never attributed to the wrong series. Parsing never fails: unrecognized
//! segments are dropped and an empty result means "insufficient data".

use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use regex::{Captures, Regex};
use serde::Serialize;

use super::normalize::normalize_series;

/// Upper bound on how far a single range may extend past its start
pub const MAX_RANGE_SPAN: u32 = 500;

static NAMED_RANGE: OnceLock<Regex> = OnceLock::new();
static CONTINUATION: OnceLock<Regex> = OnceLock::new();
static BARE_RANGE: OnceLock<Regex> = OnceLock::new();
static FILLER: OnceLock<Regex> = OnceLock::new();
static MATERIAL: OnceLock<Regex> = OnceLock::new();
static AND_SEPARATOR: OnceLock<Regex> = OnceLock::new();
static SEMICOLON: OnceLock<Regex> = OnceLock::new();

fn pattern(cell: &'static OnceLock<Regex>, source: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(source).expect("issue pattern compiles"))
}

fn named_range() -> &'static Regex {
    pattern(&NAMED_RANGE, r"^(.+?)\s*#(\d+)(?:\s*-\s*(\d+))?")
}

fn continuation() -> &'static Regex {
    pattern(&CONTINUATION, r"^#(\d+)(?:\s*-\s*(\d+))?")
}

fn bare_range() -> &'static Regex {
    pattern(&BARE_RANGE, r"^(\d+)(?:\s*-\s*(\d+))?$")
}

fn filler() -> &'static Regex {
    pattern(
        &FILLER,
        r"(?i)^(plus|related|tie-ins|crossover|miscellaneous|upcoming|ongoing|collected|various|multiple)",
    )
}

fn material() -> &'static Regex {
    pattern(&MATERIAL, r"(?i)material\)$")
}

/// A single issue of a single series: the atomic unit of content
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct IssueRef {
    /// Normalized lowercase series name
    pub series: String,
    pub number: u32,
}

impl IssueRef {
    pub fn new(series: impl Into<String>, number: u32) -> Self {
        Self {
            series: series.into(),
            number,
        }
    }
}

impl std::fmt::Display for IssueRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} #{}", self.series, self.number)
    }
}

/// Structured result of parsing one item's issue text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedIssueSet {
    /// Normalized series name -> issue numbers
    pub numbers: BTreeMap<String, BTreeSet<u32>>,

    /// Named one-shots encountered without any numbers
    pub bare_series: BTreeSet<String>,

    /// Numeric segments that had no series to attach to
    pub unattributed: Vec<String>,
}

impl ParsedIssueSet {
    /// True when nothing usable was extracted (neither numbers nor names)
    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty() && self.bare_series.is_empty()
    }

    /// True when at least one concrete issue number was extracted
    pub fn has_numbers(&self) -> bool {
        self.numbers.values().any(|nums| !nums.is_empty())
    }

    /// Issue numbers recorded for a normalized series name
    pub fn numbers_for(&self, series: &str) -> Option<&BTreeSet<u32>> {
        self.numbers.get(series)
    }

    /// Every series name seen, numbered or bare
    pub fn series_names(&self) -> BTreeSet<&str> {
        self.numbers
            .keys()
            .chain(self.bare_series.iter())
            .map(String::as_str)
            .collect()
    }

    /// Flattened (series, number) pairs
    pub fn issue_refs(&self) -> BTreeSet<IssueRef> {
        self.numbers
            .iter()
            .flat_map(|(series, nums)| nums.iter().map(move |n| IssueRef::new(series.clone(), *n)))
            .collect()
    }

    /// Total count of distinct issues
    pub fn issue_count(&self) -> usize {
        self.numbers.values().map(BTreeSet::len).sum()
    }

    fn add_range(&mut self, series: &str, lo: u32, hi: u32) {
        let upper = hi.min(lo.saturating_add(MAX_RANGE_SPAN));
        self.numbers
            .entry(series.to_string())
            .or_default()
            .extend(lo..=upper);
    }
}

/// Parse free-text issue descriptions into per-series issue numbers.
///
/// # Example
///
/// ```
/// use longbox::issues::parse_issues;
///
/// let parsed = parse_issues("Silver Surfer #34-38, 40, 44-60");
/// let nums = parsed.numbers_for("silver surfer").unwrap();
/// assert!(nums.contains(&40));
/// assert!(!nums.contains(&39));
/// ```
pub fn parse_issues(text: &str) -> ParsedIssueSet {
    let mut parsed = ParsedIssueSet::default();
    if text.trim().is_empty() {
        return parsed;
    }

    let text = pattern(&SEMICOLON, r";\s*").replace_all(text, ", ");
    let text = pattern(&AND_SEPARATOR, r"(?i)\s+and\s+").replace_all(&text, ", ");

    let mut cursor: Option<String> = None;

    for segment in split_outside_parens(&text) {
        let segment = segment.trim();
        if segment.is_empty() || filler().is_match(segment) || material().is_match(segment) {
            continue;
        }

        if let Some(caps) = named_range().captures(segment) {
            let series = normalize_series(&caps[1]);
            if series.is_empty() {
                parsed.unattributed.push(segment.to_string());
                cursor = None;
                continue;
            }
            match range_bounds(&caps) {
                Some((lo, hi)) => parsed.add_range(&series, lo, hi),
                None => parsed.unattributed.push(segment.to_string()),
            }
            cursor = Some(series);
            continue;
        }

        let numeric = continuation()
            .captures(segment)
            .or_else(|| bare_range().captures(segment));
        if let Some(caps) = numeric {
            match (cursor.as_deref(), range_bounds(&caps)) {
                (Some(series), Some((lo, hi))) => parsed.add_range(series, lo, hi),
                _ => parsed.unattributed.push(segment.to_string()),
            }
            continue;
        }

        // Named one-shot
        let name = normalize_series(segment);
        if name.chars().count() > 2 {
            parsed.bare_series.insert(name);
            cursor = None;
        }
    }

    parsed
}

/// Extract `(lo, hi)` from the last two capture groups of a range match.
/// An oversized upper bound is clamped later by the span cap.
fn range_bounds(caps: &Captures<'_>) -> Option<(u32, u32)> {
    let n = caps.len();
    let lo: u32 = caps.get(n - 2)?.as_str().parse().ok()?;
    let hi = match caps.get(n - 1) {
        Some(m) => m.as_str().parse().unwrap_or(u32::MAX),
        None => lo,
    };
    Some((lo, hi))
}

/// Split on commas that are not inside a parenthetical
fn split_outside_parens(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (idx, ch) in text.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&text[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);

    parts
}
