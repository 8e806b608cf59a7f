//! Issue Parser Integration Tests
//!
//! Published "issues collected" strings and parser robustness.

use longbox::issues::{fuzzy_series_match, normalize_series, parse_issues, MAX_RANGE_SPAN};
use proptest::prelude::*;

fn numbers(text: &str, series: &str) -> Vec<u32> {
    parse_issues(text)
        .numbers_for(series)
        .map(|set| set.iter().copied().collect())
        .unwrap_or_default()
}

#[test]
fn test_multiple_named_series() {
    let parsed = parse_issues("Fantastic Four #48-50, Silver Surfer #1-18, Annual #1");

    assert_eq!(
        parsed.numbers_for("fantastic four").unwrap().iter().copied().collect::<Vec<_>>(),
        vec![48, 49, 50]
    );
    assert_eq!(
        parsed.numbers_for("silver surfer").unwrap().iter().copied().collect::<Vec<_>>(),
        (1..=18).collect::<Vec<_>>()
    );
    // "Annual #1" names its own series
    assert_eq!(
        parsed.numbers_for("annual").unwrap().iter().copied().collect::<Vec<_>>(),
        vec![1]
    );
    assert!(parsed.unattributed.is_empty());
}

#[test]
fn test_bare_numbers_continue_series() {
    let mut expected: Vec<u32> = (34..=38).collect();
    expected.push(40);
    expected.extend(44..=60);

    let parsed = parse_issues("Silver Surfer #34-38, 40, 44-60");
    assert_eq!(parsed.numbers.len(), 1);
    assert_eq!(numbers("Silver Surfer #34-38, 40, 44-60", "silver surfer"), expected);
}

#[test]
fn test_hash_continuation() {
    assert_eq!(
        numbers("Amazing Spider-Man #121, #122, #129", "amazing spider-man"),
        vec![121, 122, 129]
    );
}

#[test]
fn test_alias_and_year() {
    assert_eq!(numbers("ASM (1963) #1-3", "amazing spider-man"), vec![1, 2, 3]);
    assert_eq!(numbers("FF #4", "fantastic four"), vec![4]);
}

#[test]
fn test_parenthetical_is_not_split() {
    let parsed = parse_issues("Uncanny X-Men (1963) #94-96, Giant-Size X-Men #1");
    assert_eq!(parsed.numbers_for("uncanny x-men").map(|s| s.len()), Some(3));
    assert_eq!(parsed.numbers_for("giant-size x-men").map(|s| s.len()), Some(1));
}

#[test]
fn test_one_shot_does_not_extend_numbering() {
    let parsed = parse_issues("Thor #337, Balder the Brave, 5-6");
    assert_eq!(numbers("Thor #337, Balder the Brave, 5-6", "thor"), vec![337]);
    assert!(parsed.bare_series.contains("balder the brave"));
    assert_eq!(parsed.unattributed, vec!["5-6".to_string()]);
}

#[test]
fn test_unparseable_text_is_insufficient_data() {
    let parsed = parse_issues("Various tie-ins, plus collected material");
    assert!(parsed.is_empty());
    assert!(!parsed.has_numbers());
}

#[test]
fn test_fuzzy_matching_uses_normalized_names() {
    let a = normalize_series("Secret Wars (2015)");
    let b = normalize_series("Secret Wars: Battleworld");
    assert!(fuzzy_series_match(&a, &b));
}

proptest! {
    #[test]
    fn prop_parser_never_panics(text in "\\PC{0,80}") {
        let _ = parse_issues(&text);
    }

    #[test]
    fn prop_parser_handles_punctuation_soup(text in "[A-Za-z #0-9,;()\\-]{0,60}") {
        let parsed = parse_issues(&text);
        prop_assert_eq!(parsed.is_empty(), parsed.numbers.is_empty() && parsed.bare_series.is_empty());
    }

    #[test]
    fn prop_range_is_capped(lo in 0u32..10_000, extra in 0u32..100_000) {
        let text = format!("Test Series #{}-{}", lo, lo + extra);
        let parsed = parse_issues(&text);
        let set = parsed.numbers_for("test series").expect("named range is recorded");

        prop_assert_eq!(set.len() as u32, extra.min(MAX_RANGE_SPAN) + 1);
        prop_assert_eq!(set.iter().next().copied(), Some(lo));
    }
}
