//! Collection coverage summaries.
//!
//! Per-era progress for the collection heatmap, and catalog-wide pairs of
//! items that collect many of the same issues.

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;

use super::overlap::rounded_percent;
use crate::domain::{shelved_slugs, CatalogItem, Era, Importance, OwnershipRecord};
use crate::issues::{IssueIndex, IssueRef};

/// Minimum shared fraction (of either side) for a pair to be suggested
const COMPARISON_THRESHOLD_PCT: u8 = 30;

/// Maximum number of suggested comparisons
const MAX_COMPARISONS: usize = 6;

/// Collection progress within one era
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EraCoverage {
    pub era_slug: String,
    pub era_name: String,
    pub total: usize,
    pub owned: usize,
    pub pct: u8,
    pub essential_total: usize,
    pub essential_owned: usize,
    pub essential_pct: u8,
    /// Slugs in this era not on the reader's shelf, in catalog order
    pub missing: Vec<String>,
}

/// Coverage per era, ordered by era number.
///
/// Only owned or completed items count as owned here.
pub fn era_coverage(
    eras: &[Era],
    catalog: &[CatalogItem],
    ownership: &[OwnershipRecord],
) -> Vec<EraCoverage> {
    let shelved = shelved_slugs(ownership);

    let mut ordered: Vec<&Era> = eras.iter().collect();
    ordered.sort_by_key(|era| era.number);

    ordered
        .into_iter()
        .map(|era| {
            let items: Vec<&CatalogItem> =
                catalog.iter().filter(|item| item.era_slug == era.slug).collect();
            let owned = items.iter().filter(|item| shelved.contains(&item.slug)).count();
            let essentials: Vec<&&CatalogItem> = items
                .iter()
                .filter(|item| item.importance == Importance::Essential)
                .collect();
            let essential_owned = essentials
                .iter()
                .filter(|item| shelved.contains(&item.slug))
                .count();

            EraCoverage {
                era_slug: era.slug.clone(),
                era_name: era.name.clone(),
                total: items.len(),
                owned,
                pct: rounded_percent(owned, items.len()),
                essential_total: essentials.len(),
                essential_owned,
                essential_pct: rounded_percent(essential_owned, essentials.len()),
                missing: items
                    .iter()
                    .filter(|item| !shelved.contains(&item.slug))
                    .map(|item| item.slug.clone())
                    .collect(),
            }
        })
        .collect()
}

/// Two items worth comparing before buying either
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comparison {
    pub slug_a: String,
    pub title_a: String,
    pub slug_b: String,
    pub title_b: String,
    pub shared: usize,
    pub reason: String,
}

/// Pairs of catalog items whose issue sets overlap substantially.
///
/// A pair qualifies when it shares at least one issue and the shared count is
/// at least 30% of either item's issues. Sorted by shared count, largest
/// first; catalog order breaks ties.
pub fn suggested_comparisons<I>(catalog: &[CatalogItem], index: &I) -> Vec<Comparison>
where
    I: IssueIndex + ?Sized,
{
    let sets: Vec<(&CatalogItem, BTreeSet<IssueRef>)> = catalog
        .iter()
        .filter_map(|item| index.parsed(&item.slug).map(|p| (item, p.issue_refs())))
        .filter(|(_, refs)| !refs.is_empty())
        .collect();

    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    let mut suggestions = Vec::new();

    for (i, (a, refs_a)) in sets.iter().enumerate() {
        for (b, refs_b) in &sets[i + 1..] {
            if a.slug == b.slug || !seen.insert((a.slug.as_str(), b.slug.as_str())) {
                continue;
            }

            let shared = refs_a.intersection(refs_b).count();
            if shared == 0 {
                continue;
            }

            let pct = rounded_percent(shared, refs_a.len()).max(rounded_percent(shared, refs_b.len()));
            let meets_threshold = shared * 100 >= refs_a.len() * COMPARISON_THRESHOLD_PCT as usize
                || shared * 100 >= refs_b.len() * COMPARISON_THRESHOLD_PCT as usize;
            if !meets_threshold {
                continue;
            }

            suggestions.push(Comparison {
                slug_a: a.slug.clone(),
                title_a: a.title.clone(),
                slug_b: b.slug.clone(),
                title_b: b.title.clone(),
                shared,
                reason: format!("{} overlapping issues ({}% overlap)", shared, pct),
            });
        }
    }

    suggestions.sort_by(|x, y| y.shared.cmp(&x.shared));
    suggestions.truncate(MAX_COMPARISONS);
    suggestions
}
