//! Catalog of collected editions.
//!
//! Read-only, slug-indexed view over the items supplied by the catalog store.

use std::collections::HashMap;

use thiserror::Error;

use crate::domain::CatalogItem;

/// Lookup failures surfaced to interactive callers instead of panicking
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("{kind} not found: {slug}")]
    NotFound { kind: &'static str, slug: String },
}

impl LookupError {
    pub fn item(slug: impl Into<String>) -> Self {
        LookupError::NotFound {
            kind: "catalog item",
            slug: slug.into(),
        }
    }
}

/// Catalog snapshot with a slug index
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<CatalogItem>,
    by_slug: HashMap<String, usize>,
}

impl Catalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog; on duplicate slugs the first item wins
    pub fn from_items(items: Vec<CatalogItem>) -> Self {
        let mut by_slug = HashMap::with_capacity(items.len());
        for (pos, item) in items.iter().enumerate() {
            by_slug.entry(item.slug.clone()).or_insert(pos);
        }
        Self { items, by_slug }
    }

    /// Get an item by slug
    pub fn get(&self, slug: &str) -> Result<&CatalogItem, LookupError> {
        self.by_slug
            .get(slug)
            .map(|&pos| &self.items[pos])
            .ok_or_else(|| LookupError::item(slug))
    }

    /// All items in snapshot order
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Search items by query (case-insensitive substring of title, slug or issues)
    pub fn search(&self, query: &str) -> Vec<&CatalogItem> {
        let query_lower = query.to_lowercase();

        self.items
            .iter()
            .filter(|item| {
                item.title.to_lowercase().contains(&query_lower)
                    || item.slug.contains(&query_lower)
                    || item.issues_text.to_lowercase().contains(&query_lower)
            })
            .collect()
    }

    /// Items belonging to one era
    pub fn filter_by_era(&self, era_slug: &str) -> Vec<&CatalogItem> {
        self.items
            .iter()
            .filter(|item| item.era_slug == era_slug)
            .collect()
    }

    /// Get the number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Importance, PrintStatus};

    fn sample() -> Catalog {
        Catalog::from_items(vec![
            CatalogItem::new("ff-omni-1", "Fantastic Four Omnibus Vol. 1", Importance::Essential, PrintStatus::InPrint)
                .with_era("birth-of-marvel")
                .with_issues("Fantastic Four #1-30"),
            CatalogItem::new("surfer-epic", "Silver Surfer Epic Collection", Importance::Recommended, PrintStatus::OutOfPrint)
                .with_era("birth-of-marvel")
                .with_issues("Silver Surfer #1-18"),
            CatalogItem::new("secret-wars", "Secret Wars", Importance::Essential, PrintStatus::InPrint)
                .with_era("event-age"),
        ])
    }

    #[test]
    fn test_get_and_not_found() {
        let catalog = sample();
        assert_eq!(catalog.get("secret-wars").unwrap().title, "Secret Wars");
        assert_eq!(
            catalog.get("nope").unwrap_err(),
            LookupError::NotFound {
                kind: "catalog item",
                slug: "nope".to_string()
            }
        );
        assert_eq!(catalog.get("nope").unwrap_err().to_string(), "catalog item not found: nope");
    }

    #[test]
    fn test_duplicate_slug_keeps_first() {
        let catalog = Catalog::from_items(vec![
            CatalogItem::new("a", "First", Importance::Essential, PrintStatus::InPrint),
            CatalogItem::new("a", "Second", Importance::Essential, PrintStatus::InPrint),
        ]);
        assert_eq!(catalog.get("a").unwrap().title, "First");
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_search() {
        let catalog = sample();
        assert_eq!(catalog.search("SURFER").len(), 1);
        assert_eq!(catalog.search("fantastic four #1").len(), 1);
        assert!(catalog.search("hulk").is_empty());
    }

    #[test]
    fn test_filter_by_era() {
        let catalog = sample();
        assert_eq!(catalog.filter_by_era("birth-of-marvel").len(), 2);
        assert_eq!(catalog.filter_by_era("event-age").len(), 1);
    }
}
