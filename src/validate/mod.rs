//! Data-quality gate for curated event -> edition mappings.
//!
//! Runs seven independent checks over a fixed snapshot and produces a
//! report. The key check parses each event's core issues and each core
//! edition's collected issues with the shared issue parser and requires a
//! fuzzy series match between them.
//!
//! # Exit contract
//!
//! - Any error: exit status 1
//! - Warnings only, or clean: exit status 0
//!
//! Skipped overlap checks (vague or missing text) are neither passes nor
//! failures.

pub mod checks;
pub mod report;

pub use checks::{
    check_core_overlap, vague_reason, validate, CoreOverlap, ValidationInput, ValidatorConfig,
    DEFAULT_MAX_ERA_DISTANCE,
};
pub use report::{Check, CorePass, Finding, Level, Outcome, OverlapEvidence, ValidationReport};
