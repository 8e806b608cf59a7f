//! Crossover events, their edition mappings, and the era ordering.
//!
//! These are the inputs of the data-quality validator.

use serde::{Deserialize, Serialize};

use super::catalog::null_as_default;

/// A crossover event whose core issues define it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub slug: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    /// Canonical issues of the event, in the same free-text form as editions
    #[serde(default)]
    pub core_issues: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub era_slug: String,
}

impl Event {
    pub fn new(slug: impl Into<String>, core_issues: impl Into<String>) -> Self {
        let slug = slug.into();
        Self {
            name: slug.clone(),
            slug,
            core_issues: Some(core_issues.into()),
            era_slug: String::new(),
        }
    }

    pub fn with_era(mut self, era_slug: impl Into<String>) -> Self {
        self.era_slug = era_slug.into();
        self
    }
}

/// Curated link from an event to an edition that collects part of it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEditionMapping {
    pub event_slug: String,

    pub edition_slug: String,

    /// 1-based position in the event's reading order
    pub reading_order: u32,

    #[serde(default, deserialize_with = "null_as_default")]
    pub is_core: bool,
}

impl EventEditionMapping {
    pub fn new(
        event_slug: impl Into<String>,
        edition_slug: impl Into<String>,
        reading_order: u32,
        is_core: bool,
    ) -> Self {
        Self {
            event_slug: event_slug.into(),
            edition_slug: edition_slug.into(),
            reading_order,
            is_core,
        }
    }
}

/// A publishing era with its position in the overall timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Era {
    pub slug: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    pub number: i32,
}

impl Era {
    pub fn new(slug: impl Into<String>, number: i32) -> Self {
        let slug = slug.into();
        Self {
            name: slug.clone(),
            slug,
            number,
        }
    }
}
