//! A reader's relationship to individual catalog items.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Where an item sits in the reader's collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnershipStatus {
    Owned,
    Reading,
    Completed,
    Wishlist,
}

impl OwnershipStatus {
    /// Whether the item's issues count toward what the reader holds
    pub fn is_held(&self) -> bool {
        matches!(
            self,
            OwnershipStatus::Owned | OwnershipStatus::Reading | OwnershipStatus::Completed
        )
    }

    /// Whether the item itself is on the shelf (reading copies excluded)
    pub fn is_shelved(&self) -> bool {
        matches!(self, OwnershipStatus::Owned | OwnershipStatus::Completed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipRecord {
    #[serde(rename = "edition_slug", alias = "item_slug")]
    pub item_slug: String,

    pub status: OwnershipStatus,
}

impl OwnershipRecord {
    pub fn new(item_slug: impl Into<String>, status: OwnershipStatus) -> Self {
        Self {
            item_slug: item_slug.into(),
            status,
        }
    }
}

/// Slugs with status owned, reading or completed
pub fn held_slugs(records: &[OwnershipRecord]) -> HashSet<String> {
    records
        .iter()
        .filter(|r| r.status.is_held())
        .map(|r| r.item_slug.clone())
        .collect()
}

/// Slugs with status owned or completed
pub fn shelved_slugs(records: &[OwnershipRecord]) -> HashSet<String> {
    records
        .iter()
        .filter(|r| r.status.is_shelved())
        .map(|r| r.item_slug.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_and_shelved_sets() {
        let records = vec![
            OwnershipRecord::new("a", OwnershipStatus::Owned),
            OwnershipRecord::new("b", OwnershipStatus::Reading),
            OwnershipRecord::new("c", OwnershipStatus::Completed),
            OwnershipRecord::new("d", OwnershipStatus::Wishlist),
        ];

        let held = held_slugs(&records);
        assert_eq!(held.len(), 3);
        assert!(held.contains("b"));
        assert!(!held.contains("d"));

        let shelved = shelved_slugs(&records);
        assert_eq!(shelved.len(), 2);
        assert!(!shelved.contains("b"));
    }

    #[test]
    fn test_record_accepts_edition_slug_field() {
        let rec: OwnershipRecord =
            serde_json::from_str(r#"{"edition_slug":"ff-1","status":"completed"}"#).unwrap();
        assert_eq!(rec.item_slug, "ff-1");
        assert_eq!(rec.status, OwnershipStatus::Completed);
    }
}
