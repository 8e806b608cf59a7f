//! Ownership overlap.
//!
//! Answers "how much of this item do I already have?" by intersecting the
//! item's issues with the union of issues across everything the reader
//! holds. The same [`overlap_for`] result drives search badges, era
//! coverage and the recommender's overlap penalty.

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;

use crate::domain::{CatalogItem, OwnershipRecord};
use crate::issues::{IssueIndex, IssueRef};

/// Overlap of a candidate item with the reader's collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "pct", rename_all = "snake_case")]
pub enum OverlapResult {
    /// The item itself is owned; no percentage is computed against itself
    AlreadyOwned,
    /// No parsed issues to compare; not the same thing as 0%
    Undefined,
    /// Rounded share of the item's issues already held, in 0..=100
    Percent(u8),
}

impl OverlapResult {
    /// Percentage when one was computed
    pub fn percent(&self) -> Option<u8> {
        match self {
            OverlapResult::Percent(pct) => Some(*pct),
            _ => None,
        }
    }
}

impl std::fmt::Display for OverlapResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OverlapResult::AlreadyOwned => f.write_str("already owned"),
            OverlapResult::Undefined => f.write_str("insufficient data"),
            OverlapResult::Percent(pct) => write!(f, "{}% owned", pct),
        }
    }
}

/// Union of issues across items with status owned, reading or completed
pub fn compute_owned_issues<I>(ownership: &[OwnershipRecord], index: &I) -> BTreeSet<IssueRef>
where
    I: IssueIndex + ?Sized,
{
    ownership
        .iter()
        .filter(|record| record.status.is_held())
        .filter_map(|record| index.parsed(&record.item_slug))
        .flat_map(|parsed| parsed.issue_refs())
        .collect()
}

/// Overlap of `item` with `owned_issues`.
///
/// `owned_slugs` are the items on the reader's shelf (owned or completed);
/// those short-circuit to [`OverlapResult::AlreadyOwned`].
pub fn overlap_for<I>(
    item: &CatalogItem,
    index: &I,
    owned_issues: &BTreeSet<IssueRef>,
    owned_slugs: &HashSet<String>,
) -> OverlapResult
where
    I: IssueIndex + ?Sized,
{
    if owned_slugs.contains(&item.slug) {
        return OverlapResult::AlreadyOwned;
    }

    let Some(parsed) = index.parsed(&item.slug) else {
        return OverlapResult::Undefined;
    };

    let refs = parsed.issue_refs();
    if refs.is_empty() {
        return OverlapResult::Undefined;
    }

    let shared = refs.iter().filter(|r| owned_issues.contains(*r)).count();
    OverlapResult::Percent(rounded_percent(shared, refs.len()))
}

/// `round(100 * part / whole)` with halves rounded up, in integer arithmetic.
/// Returns 0 when `whole` is 0.
pub fn rounded_percent(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    let part = part.min(whole) as u64;
    let whole = whole as u64;
    ((200 * part + whole) / (2 * whole)) as u8
}
