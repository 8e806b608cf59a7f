//! The individual event/edition checks.
//!
//! Each check appends to the shared report and never short-circuits the
//! others; a mapping with an unknown slug is reported once by the slug check
//! and silently ignored by checks that need both ends.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use super::report::{Check, CorePass, Finding, OverlapEvidence, ValidationReport};
use crate::domain::{CatalogItem, Era, Event, EventEditionMapping};
use crate::issues::{fuzzy_series_match, parse_issues, ParsedIssueSet};

/// Default tolerance between an event's era and its editions' eras
pub const DEFAULT_MAX_ERA_DISTANCE: u32 = 3;

/// Characters of edition text shown in diagnostics
const EDITION_TEXT_PREVIEW: usize = 100;

static VAGUE_EDITION: OnceLock<Regex> = OnceLock::new();
static SOLICITED: OnceLock<Regex> = OnceLock::new();
static ANNUAL_ONLY: OnceLock<Regex> = OnceLock::new();

fn pattern(cell: &'static OnceLock<Regex>, source: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(source).expect("vague-data pattern compiles"))
}

/// Tunables for a validation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorConfig {
    pub max_era_distance: u32,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            max_era_distance: DEFAULT_MAX_ERA_DISTANCE,
        }
    }
}

/// Fixed input collections for one run
#[derive(Debug, Clone, Copy)]
pub struct ValidationInput<'a> {
    pub events: &'a [Event],
    pub editions: &'a [CatalogItem],
    pub mappings: &'a [EventEditionMapping],
    pub eras: &'a [Era],
}

/// Outcome of comparing an event's core issues with one edition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreOverlap {
    Pass(OverlapEvidence),
    /// No fuzzy series match at all
    Disjoint,
}

/// Compare parsed core issues against a parsed edition.
///
/// Passes on the first fuzzy-matching series pair that shares an issue
/// number; failing that, passes more weakly on any fuzzy series-name match.
pub fn check_core_overlap(core: &ParsedIssueSet, edition: &ParsedIssueSet) -> CoreOverlap {
    for (core_series, core_nums) in &core.numbers {
        for (edition_series, edition_nums) in &edition.numbers {
            if !fuzzy_series_match(core_series, edition_series) {
                continue;
            }
            let shared: BTreeSet<u32> = core_nums.intersection(edition_nums).copied().collect();
            if !shared.is_empty() {
                return CoreOverlap::Pass(OverlapEvidence::SharedIssues {
                    series: core_series.clone(),
                    issues: shared,
                });
            }
        }
    }

    let edition_names = edition.series_names();
    for core_name in core.series_names() {
        if let Some(edition_name) = edition_names
            .iter()
            .find(|name| fuzzy_series_match(core_name, name))
        {
            return CoreOverlap::Pass(OverlapEvidence::SeriesName {
                core: core_name.to_string(),
                edition: (*edition_name).to_string(),
            });
        }
    }

    CoreOverlap::Disjoint
}

/// Reason a pair of texts is too vague to judge, if any
pub fn vague_reason(core_issues: &str, edition_issues: &str) -> Option<&'static str> {
    if core_issues.trim().is_empty() || edition_issues.trim().is_empty() {
        return Some("missing issue text");
    }
    if pattern(&VAGUE_EDITION, r"(?i)^\s*(upcoming|multiple|various)").is_match(edition_issues) {
        return Some("edition issues are unspecified");
    }
    if pattern(&SOLICITED, r"(?i)\(solicited\)").is_match(core_issues) {
        return Some("core issues are only solicited");
    }
    if pattern(&ANNUAL_ONLY, r"(?i)annual.*only|annuals\s*\(").is_match(core_issues) {
        return Some("core issues are annual-only");
    }
    None
}

/// Run every check and collect the report
pub fn validate(input: ValidationInput<'_>, config: &ValidatorConfig) -> ValidationReport {
    let ctx = Lookup::new(input);
    let mut report = ValidationReport::new();

    report.total_mappings = input.mappings.len();
    report.events_total = input.events.len();

    check_slugs(&ctx, &mut report);
    check_event_coverage(&ctx, &mut report);
    check_reading_order(&ctx, &mut report);
    check_core_presence(&ctx, &mut report);
    check_core_overlaps(&ctx, &mut report);
    check_duplicates(&ctx, &mut report);
    check_era_distance(&ctx, config, &mut report);

    debug!(
        errors = report.errors(),
        warnings = report.warnings(),
        skipped = report.skipped(),
        passed = report.passed(),
        "Validation checks complete"
    );

    report
}

/// Slug-indexed view over the input collections
struct Lookup<'a> {
    input: ValidationInput<'a>,
    events: HashMap<&'a str, &'a Event>,
    editions: HashMap<&'a str, &'a CatalogItem>,
    era_numbers: HashMap<&'a str, i32>,
    /// Mappings grouped by event, in order of first appearance
    by_event: Vec<(&'a str, Vec<&'a EventEditionMapping>)>,
}

impl<'a> Lookup<'a> {
    fn new(input: ValidationInput<'a>) -> Self {
        let mut by_event: Vec<(&'a str, Vec<&'a EventEditionMapping>)> = Vec::new();
        let mut positions: HashMap<&'a str, usize> = HashMap::new();
        for mapping in input.mappings {
            let slug = mapping.event_slug.as_str();
            let pos = *positions.entry(slug).or_insert_with(|| {
                by_event.push((slug, Vec::new()));
                by_event.len() - 1
            });
            by_event[pos].1.push(mapping);
        }

        Self {
            input,
            events: input.events.iter().map(|e| (e.slug.as_str(), e)).collect(),
            editions: input.editions.iter().map(|e| (e.slug.as_str(), e)).collect(),
            era_numbers: input.eras.iter().map(|e| (e.slug.as_str(), e.number)).collect(),
            by_event,
        }
    }

    fn pair(&self, mapping: &EventEditionMapping) -> Option<(&'a Event, &'a CatalogItem)> {
        Some((
            *self.events.get(mapping.event_slug.as_str())?,
            *self.editions.get(mapping.edition_slug.as_str())?,
        ))
    }
}

fn check_slugs(ctx: &Lookup<'_>, report: &mut ValidationReport) {
    for mapping in ctx.input.mappings {
        if !ctx.events.contains_key(mapping.event_slug.as_str()) {
            report.push(Finding::error(
                Check::SlugExists,
                format!("event slug \"{}\" not found in events", mapping.event_slug),
            ));
        }
        if !ctx.editions.contains_key(mapping.edition_slug.as_str()) {
            report.push(Finding::error(
                Check::SlugExists,
                format!("edition slug \"{}\" not found in collected editions", mapping.edition_slug),
            ));
        }
    }
}

fn check_event_coverage(ctx: &Lookup<'_>, report: &mut ValidationReport) {
    let mapped: HashSet<&str> = ctx.by_event.iter().map(|(slug, _)| *slug).collect();
    report.events_covered = mapped.len();

    for event in ctx.input.events {
        if !mapped.contains(event.slug.as_str()) {
            report.push(Finding::warning(
                Check::EventCoverage,
                format!("event \"{}\" ({}) has no edition mappings", event.slug, event.name),
            ));
        }
    }
}

fn check_reading_order(ctx: &Lookup<'_>, report: &mut ValidationReport) {
    for (slug, entries) in &ctx.by_event {
        let mut orders: Vec<u32> = entries.iter().map(|m| m.reading_order).collect();
        orders.sort_unstable();

        let sequential = orders.iter().zip(1u32..).all(|(order, expected)| *order == expected);
        if !sequential {
            let listed: Vec<String> = orders.iter().map(u32::to_string).collect();
            report.push(Finding::warning(
                Check::ReadingOrder,
                format!("\"{}\" reading_order not sequential: [{}]", slug, listed.join(",")),
            ));
        }
    }
}

fn check_core_presence(ctx: &Lookup<'_>, report: &mut ValidationReport) {
    for (slug, entries) in &ctx.by_event {
        if !entries.iter().any(|m| m.is_core) {
            report.push(Finding::warning(
                Check::CorePresence,
                format!("\"{}\" has no core edition", slug),
            ));
        }
    }
}

fn check_core_overlaps(ctx: &Lookup<'_>, report: &mut ValidationReport) {
    for mapping in ctx.input.mappings.iter().filter(|m| m.is_core) {
        let Some((event, edition)) = ctx.pair(mapping) else {
            continue;
        };

        let core_text = event.core_issues.as_deref().unwrap_or("");
        let edition_text = edition.issues_text.as_str();
        let label = format!("\"{}\" -> \"{}\"", mapping.event_slug, mapping.edition_slug);

        if let Some(reason) = vague_reason(core_text, edition_text) {
            report.push(Finding::skipped(Check::CoreOverlap, format!("{}: {}", label, reason)));
            continue;
        }

        let core = parse_issues(core_text);
        let parsed_edition = parse_issues(edition_text);
        if core.is_empty() || parsed_edition.is_empty() {
            report.push(Finding::skipped(
                Check::CoreOverlap,
                format!("{}: no series or issues could be parsed", label),
            ));
            continue;
        }

        match check_core_overlap(&core, &parsed_edition) {
            CoreOverlap::Pass(evidence) => {
                debug!(event = %mapping.event_slug, edition = %mapping.edition_slug, %evidence, "Core overlap passed");
                report.passes.push(CorePass {
                    event_slug: mapping.event_slug.clone(),
                    edition_slug: mapping.edition_slug.clone(),
                    evidence,
                });
            }
            CoreOverlap::Disjoint => {
                let preview: String = edition_text.chars().take(EDITION_TEXT_PREVIEW).collect();
                report.push(
                    Finding::error(
                        Check::CoreOverlap,
                        format!(
                            "\"{}\" core edition \"{}\" has no overlap with core issues",
                            mapping.event_slug, mapping.edition_slug
                        ),
                    )
                    .with_context("core_issues", core_text)
                    .with_context("edition_issues", preview)
                    .with_context("core_series", join_names(&core))
                    .with_context("edition_series", join_names(&parsed_edition)),
                );
            }
        }
    }
}

fn join_names(parsed: &ParsedIssueSet) -> String {
    parsed.series_names().into_iter().collect::<Vec<_>>().join(", ")
}

fn check_duplicates(ctx: &Lookup<'_>, report: &mut ValidationReport) {
    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    for mapping in ctx.input.mappings {
        if !seen.insert((mapping.event_slug.as_str(), mapping.edition_slug.as_str())) {
            report.push(Finding::error(
                Check::DuplicateMapping,
                format!(
                    "duplicate mapping \"{}\" -> \"{}\"",
                    mapping.event_slug, mapping.edition_slug
                ),
            ));
        }
    }
}

fn check_era_distance(ctx: &Lookup<'_>, config: &ValidatorConfig, report: &mut ValidationReport) {
    for mapping in ctx.input.mappings {
        let Some((event, edition)) = ctx.pair(mapping) else {
            continue;
        };
        let (Some(&event_era), Some(&edition_era)) = (
            ctx.era_numbers.get(event.era_slug.as_str()),
            ctx.era_numbers.get(edition.era_slug.as_str()),
        ) else {
            continue;
        };

        let distance = (i64::from(event_era) - i64::from(edition_era)).unsigned_abs();
        if distance > u64::from(config.max_era_distance) {
            report.push(
                Finding::warning(
                    Check::EraDistance,
                    format!(
                        "\"{}\" (era {}/#{}) -> \"{}\" (era {}/#{}) are {} eras apart",
                        mapping.event_slug,
                        event.era_slug,
                        event_era,
                        mapping.edition_slug,
                        edition.era_slug,
                        edition_era,
                        distance
                    ),
                )
                .with_context("distance", distance.to_string()),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vague_reasons() {
        assert!(vague_reason("", "X-Men #1").is_some());
        assert!(vague_reason("Secret Wars #1-12", "Upcoming collection").is_some());
        assert!(vague_reason("Inferno #1-4 (solicited)", "Inferno #1").is_some());
        assert!(vague_reason("X-Men Annual #12 only", "X-Men Annual #12").is_some());
        assert!(vague_reason("Annuals (1988)", "X-Men Annual #12").is_some());
        assert!(vague_reason("Secret Wars #1-12", "Secret Wars #1-12").is_none());
    }

    #[test]
    fn test_series_name_only_match_passes_weakly() {
        let core = parse_issues("Infinity Gauntlet #1-6");
        let edition = parse_issues("Infinity Gauntlet Aftermath #7-10");
        match check_core_overlap(&core, &edition) {
            CoreOverlap::Pass(OverlapEvidence::SeriesName { core, edition }) => {
                assert_eq!(core, "infinity gauntlet");
                assert_eq!(edition, "infinity gauntlet aftermath");
            }
            other => panic!("expected series-name pass, got {:?}", other),
        }
    }

    #[test]
    fn test_bare_series_names_participate() {
        let core = parse_issues("House of M #1-8");
        let edition = parse_issues("House of M: Spider-Man");
        assert!(matches!(check_core_overlap(&core, &edition), CoreOverlap::Pass(_)));
    }

    #[test]
    fn test_disjoint() {
        let core = parse_issues("Secret Wars #1-12");
        let edition = parse_issues("X-Men #1-10");
        assert_eq!(check_core_overlap(&core, &edition), CoreOverlap::Disjoint);
    }
}
