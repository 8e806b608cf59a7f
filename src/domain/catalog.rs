//! Catalog items as supplied by the external catalog store.

use serde::{Deserialize, Deserializer, Serialize};

/// Read an optional field where the store writes `null` for "not known yet"
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// How strongly an item is recommended for a reader following the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Importance {
    Essential,
    Recommended,
    Supplemental,
    Completionist,
}

impl Importance {
    /// Score bonus applied by the recommender
    pub fn bonus(&self) -> i64 {
        match self {
            Importance::Essential => 30,
            Importance::Recommended => 15,
            Importance::Supplemental => 5,
            Importance::Completionist => 0,
        }
    }

    /// Sort rank, most important first
    pub fn rank(&self) -> u8 {
        match self {
            Importance::Essential => 0,
            Importance::Recommended => 1,
            Importance::Supplemental => 2,
            Importance::Completionist => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Importance::Essential => "essential",
            Importance::Recommended => "recommended",
            Importance::Supplemental => "supplemental",
            Importance::Completionist => "completionist",
        }
    }
}

impl std::fmt::Display for Importance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Availability of an item at retail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrintStatus {
    InPrint,
    OutOfPrint,
    Upcoming,
    Ongoing,
    DigitalOnly,
    CheckAvailability,
}

impl PrintStatus {
    /// Score bonus applied by the recommender (prefer buyable items)
    pub fn bonus(&self) -> i64 {
        match self {
            PrintStatus::InPrint => 10,
            PrintStatus::Ongoing => 8,
            PrintStatus::Upcoming => 5,
            _ => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PrintStatus::InPrint => "in_print",
            PrintStatus::OutOfPrint => "out_of_print",
            PrintStatus::Upcoming => "upcoming",
            PrintStatus::Ongoing => "ongoing",
            PrintStatus::DigitalOnly => "digital_only",
            PrintStatus::CheckAvailability => "check_availability",
        }
    }
}

impl std::fmt::Display for PrintStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A collectible unit (usually a collected edition)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Unique, stable identifier
    pub slug: String,

    /// Human-readable title
    pub title: String,

    pub importance: Importance,

    pub print_status: PrintStatus,

    /// Free-text description of the contained issues
    #[serde(
        rename = "issues_collected",
        alias = "issues_text",
        default,
        deserialize_with = "null_as_default"
    )]
    pub issues_text: String,

    /// Era this item belongs to
    #[serde(default, deserialize_with = "null_as_default")]
    pub era_slug: String,
}

impl CatalogItem {
    /// Create a new catalog item with no issue text and no era
    pub fn new(
        slug: impl Into<String>,
        title: impl Into<String>,
        importance: Importance,
        print_status: PrintStatus,
    ) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            importance,
            print_status,
            issues_text: String::new(),
            era_slug: String::new(),
        }
    }

    /// Set the issues-collected text
    pub fn with_issues(mut self, text: impl Into<String>) -> Self {
        self.issues_text = text.into();
        self
    }

    /// Set the era
    pub fn with_era(mut self, era_slug: impl Into<String>) -> Self {
        self.era_slug = era_slug.into();
        self
    }
}
