//! Overlap and Coverage Integration Tests
//!
//! Ownership overlap against a parsed-issue index.

use std::collections::HashMap;

use longbox::core::{compute_owned_issues, era_coverage, overlap_for, OverlapResult};
use longbox::domain::{
    shelved_slugs, CatalogItem, Era, Importance, OwnershipRecord, OwnershipStatus, PrintStatus,
};
use longbox::issues::{parse_issues, ParsedIssueCache, ParsedIssueSet};

fn item(slug: &str, issues: &str) -> CatalogItem {
    CatalogItem::new(slug, slug, Importance::Recommended, PrintStatus::InPrint).with_issues(issues)
}

#[test]
fn test_partial_overlap_percentage() {
    let owned = item("ff-48", "Fantastic Four #48-50");
    let candidate = item("ff-galactus", "Fantastic Four #48-52");
    let catalog = vec![owned, candidate.clone()];
    let cache = ParsedIssueCache::from_catalog(&catalog);

    let ownership = vec![OwnershipRecord::new("ff-48", OwnershipStatus::Owned)];
    let owned_issues = compute_owned_issues(&ownership, &cache);
    assert_eq!(owned_issues.len(), 3);

    let result = overlap_for(&candidate, &cache, &owned_issues, &shelved_slugs(&ownership));
    assert_eq!(result, OverlapResult::Percent(60));
}

#[test]
fn test_empty_parse_is_undefined_not_zero() {
    let vague = item("misc", "Various one-shots");
    let mut index: HashMap<String, ParsedIssueSet> = HashMap::new();
    index.insert("misc".to_string(), parse_issues(&vague.issues_text));

    let ownership = vec![OwnershipRecord::new("other", OwnershipStatus::Owned)];
    let owned_issues = compute_owned_issues(&ownership, &index);

    let result = overlap_for(&vague, &index, &owned_issues, &shelved_slugs(&ownership));
    assert_eq!(result, OverlapResult::Undefined);
    assert_eq!(result.percent(), None);

    // Missing from the index entirely behaves the same way
    let unknown = item("unknown", "Thor #1");
    assert_eq!(
        overlap_for(&unknown, &index, &owned_issues, &shelved_slugs(&ownership)),
        OverlapResult::Undefined
    );
}

#[test]
fn test_disjoint_issues_are_zero_percent() {
    let catalog = vec![item("thor", "Thor #337-340"), item("hulk", "Incredible Hulk #1-6")];
    let cache = ParsedIssueCache::from_catalog(&catalog);
    let ownership = vec![OwnershipRecord::new("thor", OwnershipStatus::Completed)];
    let owned_issues = compute_owned_issues(&ownership, &cache);

    assert_eq!(
        overlap_for(&catalog[1], &cache, &owned_issues, &shelved_slugs(&ownership)),
        OverlapResult::Percent(0)
    );
}

#[test]
fn test_owned_item_short_circuits() {
    let catalog = vec![item("thor", "Thor #337-340")];
    let cache = ParsedIssueCache::from_catalog(&catalog);
    let ownership = vec![OwnershipRecord::new("thor", OwnershipStatus::Owned)];
    let owned_issues = compute_owned_issues(&ownership, &cache);

    assert_eq!(
        overlap_for(&catalog[0], &cache, &owned_issues, &shelved_slugs(&ownership)),
        OverlapResult::AlreadyOwned
    );
}

#[test]
fn test_reading_counts_toward_issues_but_not_shelf() {
    let catalog = vec![
        item("surfer-a", "Silver Surfer #1-4"),
        item("surfer-b", "Silver Surfer #1-4"),
    ];
    let cache = ParsedIssueCache::from_catalog(&catalog);
    let ownership = vec![
        OwnershipRecord::new("surfer-a", OwnershipStatus::Reading),
        OwnershipRecord::new("surfer-b", OwnershipStatus::Wishlist),
    ];
    let owned_issues = compute_owned_issues(&ownership, &cache);
    let shelved = shelved_slugs(&ownership);

    assert_eq!(
        overlap_for(&catalog[0], &cache, &owned_issues, &shelved),
        OverlapResult::Percent(100)
    );
    assert_eq!(
        overlap_for(&catalog[1], &cache, &owned_issues, &shelved),
        OverlapResult::Percent(100)
    );
}

#[test]
fn test_era_coverage_counts_shelved_items() {
    let eras = vec![Era::new("event-age", 5), Era::new("birth-of-marvel", 1)];
    let catalog = vec![
        CatalogItem::new("ff-1", "FF 1", Importance::Essential, PrintStatus::InPrint)
            .with_era("birth-of-marvel"),
        CatalogItem::new("ff-2", "FF 2", Importance::Supplemental, PrintStatus::InPrint)
            .with_era("birth-of-marvel"),
        CatalogItem::new("sw", "Secret Wars", Importance::Essential, PrintStatus::InPrint)
            .with_era("event-age"),
    ];
    let ownership = vec![OwnershipRecord::new("ff-1", OwnershipStatus::Owned)];

    let coverage = era_coverage(&eras, &catalog, &ownership);
    assert_eq!(coverage.len(), 2);
    assert_eq!(coverage[0].era_slug, "birth-of-marvel");
    assert_eq!((coverage[0].owned, coverage[0].total, coverage[0].pct), (1, 2, 50));
    assert_eq!(coverage[0].essential_pct, 100);
    assert_eq!((coverage[1].owned, coverage[1].pct), (0, 0));
}
