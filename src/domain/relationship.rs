//! Curated, directed relationships between catalog items.
//!
//! Relationships may form cycles; editors are free to curate circular
//! "ties into" links and nothing downstream treats that as corruption.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use super::catalog::null_as_default;

/// Kind of connection between two catalog items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationType {
    LeadsTo,
    SpinOff,
    RecommendedAfter,
    Prerequisite,
    TiesInto,
    Parallel,
    References,
    Retcons,
}

impl RelationType {
    /// Strict allow-list used for saga order
    pub const SAGA: [RelationType; 3] = [
        RelationType::LeadsTo,
        RelationType::RecommendedAfter,
        RelationType::Prerequisite,
    ];

    /// Types that define a collection's reading order
    pub const READING_ORDER: [RelationType; 4] = [
        RelationType::LeadsTo,
        RelationType::RecommendedAfter,
        RelationType::Prerequisite,
        RelationType::SpinOff,
    ];

    pub const ALL: [RelationType; 8] = [
        RelationType::LeadsTo,
        RelationType::SpinOff,
        RelationType::RecommendedAfter,
        RelationType::Prerequisite,
        RelationType::TiesInto,
        RelationType::Parallel,
        RelationType::References,
        RelationType::Retcons,
    ];

    /// Phrase used when explaining a recommendation, followed by the source title
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            RelationType::LeadsTo => "direct sequel to",
            RelationType::RecommendedAfter => "recommended after",
            RelationType::SpinOff => "spins off from",
            RelationType::TiesInto => "ties into",
            RelationType::Prerequisite => "prerequisite for",
            _ => "connected to",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RelationType::LeadsTo => "leads_to",
            RelationType::SpinOff => "spin_off",
            RelationType::RecommendedAfter => "recommended_after",
            RelationType::Prerequisite => "prerequisite",
            RelationType::TiesInto => "ties_into",
            RelationType::Parallel => "parallel",
            RelationType::References => "references",
            RelationType::Retcons => "retcons",
        }
    }
}

impl std::fmt::Display for RelationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed, typed, weighted edge between two catalog items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub source_slug: String,

    pub target_slug: String,

    #[serde(rename = "connection_type", alias = "type")]
    pub relation_type: RelationType,

    /// Weight in 1..=10
    #[serde(deserialize_with = "strength_in_range")]
    pub strength: u8,

    /// Editorial confidence in 0..=100
    #[serde(default, deserialize_with = "confidence_in_range")]
    pub confidence: u8,

    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
}

impl Relationship {
    /// Create a relationship with full confidence and no description
    pub fn new(
        source_slug: impl Into<String>,
        target_slug: impl Into<String>,
        relation_type: RelationType,
        strength: u8,
    ) -> Self {
        Self {
            source_slug: source_slug.into(),
            target_slug: target_slug.into(),
            relation_type,
            strength,
            confidence: 100,
            description: String::new(),
        }
    }
}

fn bounded<'de, D>(deserializer: D, field: &str, lo: u8, hi: u8) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = u8::deserialize(deserializer)?;
    if (lo..=hi).contains(&value) {
        Ok(value)
    } else {
        Err(D::Error::custom(format!(
            "{} {} outside {}..={}",
            field, value, lo, hi
        )))
    }
}

fn strength_in_range<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    bounded(deserializer, "strength", 1, 10)
}

fn confidence_in_range<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    bounded(deserializer, "confidence", 0, 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relationship_wire_format() {
        let json = r#"{
            "source_slug": "secret-wars-1984",
            "target_slug": "secret-wars-ii",
            "connection_type": "leads_to",
            "strength": 8,
            "confidence": 90,
            "description": "Beyonder returns"
        }"#;

        let rel: Relationship = serde_json::from_str(json).unwrap();
        assert_eq!(rel.relation_type, RelationType::LeadsTo);
        assert_eq!(rel.strength, 8);
        assert_eq!(rel.confidence, 90);
    }

    #[test]
    fn test_unknown_connection_type_is_rejected() {
        let json = r#"{"source_slug":"a","target_slug":"b","connection_type":"inspired_by","strength":3}"#;
        assert!(serde_json::from_str::<Relationship>(json).is_err());
    }

    #[test]
    fn test_out_of_range_weights_are_rejected() {
        let zero = r#"{"source_slug":"a","target_slug":"b","connection_type":"leads_to","strength":0}"#;
        let err = serde_json::from_str::<Relationship>(zero).unwrap_err();
        assert!(err.to_string().contains("strength 0 outside 1..=10"));

        let eleven = r#"{"source_slug":"a","target_slug":"b","connection_type":"leads_to","strength":11}"#;
        assert!(serde_json::from_str::<Relationship>(eleven).is_err());

        let doubtful = r#"{"source_slug":"a","target_slug":"b","connection_type":"leads_to","strength":5,"confidence":101}"#;
        assert!(serde_json::from_str::<Relationship>(doubtful).is_err());

        let edge = r#"{"source_slug":"a","target_slug":"b","connection_type":"leads_to","strength":10}"#;
        let rel: Relationship = serde_json::from_str(edge).unwrap();
        assert_eq!((rel.strength, rel.confidence), (10, 0));
    }

    #[test]
    fn test_reason_phrases() {
        assert_eq!(RelationType::LeadsTo.reason_phrase(), "direct sequel to");
        assert_eq!(RelationType::Parallel.reason_phrase(), "connected to");
        assert_eq!(RelationType::Retcons.reason_phrase(), "connected to");
    }
}
