//! Validation findings and the printable report.

use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Write};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Severity of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Error,
    Warning,
    /// Check could not be evaluated (vague or missing data); neither pass nor fail
    Skipped,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Error => "ERROR",
            Level::Warning => "WARNING",
            Level::Skipped => "SKIPPED",
        }
    }
}

/// Which independent check produced a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Check {
    SlugExists,
    EventCoverage,
    ReadingOrder,
    CorePresence,
    CoreOverlap,
    DuplicateMapping,
    EraDistance,
}

impl Check {
    pub const ALL: [Check; 7] = [
        Check::SlugExists,
        Check::EventCoverage,
        Check::ReadingOrder,
        Check::CorePresence,
        Check::CoreOverlap,
        Check::DuplicateMapping,
        Check::EraDistance,
    ];

    /// Section heading used in the printed report
    pub fn title(&self) -> &'static str {
        match self {
            Check::SlugExists => "Check 1: Slug existence",
            Check::EventCoverage => "Check 2: Event coverage",
            Check::ReadingOrder => "Check 3: Reading order sequence",
            Check::CorePresence => "Check 4: Core edition presence",
            Check::CoreOverlap => "Check 5: Core issue overlap",
            Check::DuplicateMapping => "Check 6: Duplicate mappings",
            Check::EraDistance => "Check 7: Era consistency",
        }
    }
}

/// One itemized result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub level: Level,
    pub check: Check,
    pub message: String,
    /// Diagnostic details (raw texts, parsed series, era numbers)
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub context: BTreeMap<String, String>,
}

impl Finding {
    pub fn new(level: Level, check: Check, message: impl Into<String>) -> Self {
        Self {
            level,
            check,
            message: message.into(),
            context: BTreeMap::new(),
        }
    }

    pub fn error(check: Check, message: impl Into<String>) -> Self {
        Self::new(Level::Error, check, message)
    }

    pub fn warning(check: Check, message: impl Into<String>) -> Self {
        Self::new(Level::Warning, check, message)
    }

    pub fn skipped(check: Check, message: impl Into<String>) -> Self {
        Self::new(Level::Skipped, check, message)
    }

    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }
}

/// Why a core mapping passed the overlap check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OverlapEvidence {
    /// Fuzzy-matching series share these issue numbers
    SharedIssues { series: String, issues: BTreeSet<u32> },
    /// Fuzzy-matching series names but no shared numbers
    SeriesName { core: String, edition: String },
}

impl std::fmt::Display for OverlapEvidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OverlapEvidence::SharedIssues { series, issues } => {
                let shown: Vec<String> = issues.iter().take(5).map(u32::to_string).collect();
                let more = if issues.len() > 5 { "..." } else { "" };
                write!(f, "{}: shared issues {}{}", series, shown.join(","), more)
            }
            OverlapEvidence::SeriesName { core, edition } => {
                write!(f, "series name match: \"{}\" ~ \"{}\"", core, edition)
            }
        }
    }
}

/// A core mapping that passed the overlap check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorePass {
    pub event_slug: String,
    pub edition_slug: String,
    pub evidence: OverlapEvidence,
}

/// How the run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Failed,
    PassedWithWarnings,
    Clean,
}

/// Complete result of a validation run
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub generated_at: DateTime<Utc>,
    pub total_mappings: usize,
    pub events_covered: usize,
    pub events_total: usize,
    pub passes: Vec<CorePass>,
    pub findings: Vec<Finding>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            generated_at: Utc::now(),
            total_mappings: 0,
            events_covered: 0,
            events_total: 0,
            passes: Vec::new(),
            findings: Vec::new(),
        }
    }

    pub fn push(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    fn count(&self, level: Level) -> usize {
        self.findings.iter().filter(|f| f.level == level).count()
    }

    pub fn errors(&self) -> usize {
        self.count(Level::Error)
    }

    pub fn warnings(&self) -> usize {
        self.count(Level::Warning)
    }

    pub fn skipped(&self) -> usize {
        self.count(Level::Skipped)
    }

    pub fn passed(&self) -> usize {
        self.passes.len()
    }

    pub fn has_errors(&self) -> bool {
        self.errors() > 0
    }

    /// Findings produced by one check
    pub fn findings_for(&self, check: Check) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.check == check)
    }

    pub fn outcome(&self) -> Outcome {
        if self.has_errors() {
            Outcome::Failed
        } else if self.warnings() > 0 {
            Outcome::PassedWithWarnings
        } else {
            Outcome::Clean
        }
    }

    /// Process exit status: 1 if any error was found, otherwise 0
    pub fn exit_code(&self) -> i32 {
        i32::from(self.has_errors())
    }

    /// Write the human-readable report
    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "=== Event-Edition Data Quality Validation ===")?;
        writeln!(out, "Generated: {}", self.generated_at.to_rfc3339())?;

        for check in Check::ALL {
            writeln!(out)?;
            writeln!(out, "--- {} ---", check.title())?;
            for finding in self.findings_for(check) {
                writeln!(out, "  {}: {}", finding.level.as_str(), finding.message)?;
                for (key, value) in &finding.context {
                    writeln!(out, "         {}: {}", key, value)?;
                }
            }
        }

        writeln!(out)?;
        writeln!(out, "=== SUMMARY ===")?;
        writeln!(out, "  Total mappings: {}", self.total_mappings)?;
        writeln!(out, "  Events covered: {} / {}", self.events_covered, self.events_total)?;
        writeln!(out, "  Core overlap checks passed: {}", self.passed())?;
        writeln!(out, "  Core overlap checks skipped (vague data): {}", self.skipped())?;
        writeln!(out, "  Errors: {}", self.errors())?;
        writeln!(out, "  Warnings: {}", self.warnings())?;
        writeln!(out)?;

        match self.outcome() {
            Outcome::Failed => writeln!(out, "VALIDATION FAILED: fix errors above before deploying."),
            Outcome::PassedWithWarnings => writeln!(out, "Validation passed with warnings; review above."),
            Outcome::Clean => writeln!(out, "All checks passed."),
        }
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_follows_errors_only() {
        let mut report = ValidationReport::new();
        assert_eq!(report.exit_code(), 0);
        assert_eq!(report.outcome(), Outcome::Clean);

        report.push(Finding::warning(Check::EventCoverage, "no mappings"));
        report.push(Finding::skipped(Check::CoreOverlap, "vague"));
        assert_eq!(report.exit_code(), 0);
        assert_eq!(report.outcome(), Outcome::PassedWithWarnings);

        report.push(Finding::error(Check::DuplicateMapping, "dup"));
        assert_eq!(report.exit_code(), 1);
        assert_eq!(report.outcome(), Outcome::Failed);
    }

    #[test]
    fn test_render_includes_sections_and_context() {
        let mut report = ValidationReport::new();
        report.push(
            Finding::error(Check::CoreOverlap, "no overlap")
                .with_context("core_issues", "Secret Wars #1-12"),
        );

        let mut out = Vec::new();
        report.render(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("--- Check 5: Core issue overlap ---"));
        assert!(text.contains("  ERROR: no overlap"));
        assert!(text.contains("core_issues: Secret Wars #1-12"));
        assert!(text.contains("Errors: 1"));
        assert!(text.contains("VALIDATION FAILED"));
    }

    #[test]
    fn test_evidence_display_truncates() {
        let evidence = OverlapEvidence::SharedIssues {
            series: "secret wars".to_string(),
            issues: (1..=12).collect(),
        };
        assert_eq!(evidence.to_string(), "secret wars: shared issues 1,2,3,4,5...");
    }
}
