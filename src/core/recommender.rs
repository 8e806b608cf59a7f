//! "What to read next" ranking.
//!
//! Every catalog item the reader does not hold is scored from four signals:
//!
//! ```text
//! score = 10 * sum(strength of edges from held items)
//!       + importance bonus      (30 / 15 / 5 / 0)
//!       + print status bonus    (in print 10, ongoing 8, upcoming 5)
//!       + overlap penalty       (>80% -50, >50% -25, >20% -10)
//! ```
//!
//! Items are kept if the score is positive or if any held item points at
//! them, so a weakly scored but connected item still explains itself.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;
use tracing::debug;

use super::overlap::{compute_owned_issues, overlap_for, OverlapResult};
use crate::domain::{held_slugs, CatalogItem, OwnershipRecord, RelationType, Relationship};
use crate::issues::IssueIndex;

/// Default number of recommendations returned
pub const DEFAULT_LIMIT: usize = 10;

/// Maximum number of reasons per recommendation; an overlap caution takes
/// one of the slots
const MAX_REASONS: usize = 2;

/// A ranked suggestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub item: CatalogItem,
    pub score: i64,
    pub reasons: Vec<String>,
    /// Share of the item already held; `None` when it has no parsed issues
    pub overlap_pct: Option<u8>,
}

/// Overlap penalty for a percentage of already-held issues
pub fn overlap_penalty(overlap_pct: Option<u8>) -> i64 {
    match overlap_pct {
        Some(pct) if pct > 80 => -50,
        Some(pct) if pct > 50 => -25,
        Some(pct) if pct > 20 => -10,
        _ => 0,
    }
}

/// Incoming connections from held items to one candidate
#[derive(Debug, Default)]
struct Incoming<'a> {
    strength: i64,
    /// Distinct types in first-encountered order
    types: Vec<RelationType>,
    /// Source slugs in encounter order
    from: Vec<&'a str>,
}

/// Top ten recommendations, highest score first.
pub fn recommend<I>(
    ownership: &[OwnershipRecord],
    catalog: &[CatalogItem],
    edges: &[Relationship],
    index: &I,
) -> Vec<Recommendation>
where
    I: IssueIndex + ?Sized,
{
    recommend_with_limit(ownership, catalog, edges, index, DEFAULT_LIMIT)
}

/// Like [`recommend`] with an explicit result limit.
///
/// Ties keep catalog order. Returns nothing when the reader holds nothing.
pub fn recommend_with_limit<I>(
    ownership: &[OwnershipRecord],
    catalog: &[CatalogItem],
    edges: &[Relationship],
    index: &I,
    limit: usize,
) -> Vec<Recommendation>
where
    I: IssueIndex + ?Sized,
{
    let held = held_slugs(ownership);
    if held.is_empty() {
        return Vec::new();
    }

    let owned_issues = compute_owned_issues(ownership, index);
    let titles: HashMap<&str, &str> = catalog
        .iter()
        .map(|item| (item.slug.as_str(), item.title.as_str()))
        .collect();

    let mut incoming: HashMap<&str, Incoming<'_>> = HashMap::new();
    for edge in edges {
        if !held.contains(&edge.source_slug) || held.contains(&edge.target_slug) {
            continue;
        }
        let entry = incoming.entry(edge.target_slug.as_str()).or_default();
        entry.strength += i64::from(edge.strength);
        if !entry.types.contains(&edge.relation_type) {
            entry.types.push(edge.relation_type);
        }
        entry.from.push(edge.source_slug.as_str());
    }

    let mut scored: Vec<Recommendation> = Vec::new();

    for item in catalog {
        if held.contains(&item.slug) {
            continue;
        }

        let connection = incoming.get(item.slug.as_str());
        let mut score = connection.map_or(0, |conn| conn.strength * 10);
        score += item.importance.bonus();
        score += item.print_status.bonus();

        // Held items are skipped above, so AlreadyOwned cannot occur here.
        let overlap = overlap_for(item, index, &owned_issues, &held);
        let overlap_pct = match overlap {
            OverlapResult::Percent(pct) => Some(pct),
            OverlapResult::AlreadyOwned | OverlapResult::Undefined => None,
        };
        score += overlap_penalty(overlap_pct);

        if score <= 0 && connection.is_none() {
            continue;
        }

        let caution = overlap_pct
            .filter(|pct| *pct > 50)
            .map(|pct| format!("{}% overlap with your collection", pct));
        let room = MAX_REASONS - usize::from(caution.is_some());

        let mut reasons = Vec::with_capacity(MAX_REASONS);
        if let Some(conn) = connection {
            // Every phrase names the first source encountered, whatever the type.
            if let Some(source_title) = conn.from.first().and_then(|slug| titles.get(slug)) {
                reasons.extend(
                    conn.types
                        .iter()
                        .take(room)
                        .map(|kind| format!("{} {}", kind.reason_phrase(), source_title)),
                );
            }
        }
        if reasons.is_empty() {
            reasons.push(format!("{} reading", item.importance));
        }
        reasons.extend(caution);

        scored.push(Recommendation {
            item: item.clone(),
            score,
            reasons,
            overlap_pct,
        });
    }

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(limit);

    debug!(
        held = held.len(),
        candidates = catalog.len().saturating_sub(held.len()),
        returned = scored.len(),
        "Scored recommendations"
    );

    scored
}

/// Slugs of held items whose outgoing edges contributed to a recommendation
pub fn connected_sources<'a>(
    recommendation: &Recommendation,
    ownership: &[OwnershipRecord],
    edges: &'a [Relationship],
) -> BTreeSet<&'a str> {
    let held = held_slugs(ownership);
    edges
        .iter()
        .filter(|e| e.target_slug == recommendation.item.slug && held.contains(&e.source_slug))
        .map(|e| e.source_slug.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_penalty_bands() {
        assert_eq!(overlap_penalty(Some(100)), -50);
        assert_eq!(overlap_penalty(Some(81)), -50);
        assert_eq!(overlap_penalty(Some(80)), -25);
        assert_eq!(overlap_penalty(Some(51)), -25);
        assert_eq!(overlap_penalty(Some(50)), -10);
        assert_eq!(overlap_penalty(Some(21)), -10);
        assert_eq!(overlap_penalty(Some(20)), 0);
        assert_eq!(overlap_penalty(None), 0);
    }
}
