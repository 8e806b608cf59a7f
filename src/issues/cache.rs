//! Caller-owned cache of parsed issue sets.
//!
//! Entries are keyed by item slug and remember the SHA-256 of the text they
//! were parsed from, so an item is only re-parsed when its issue text
//! changes. The cache is a plain value: callers decide its lifetime and pass
//! it to the overlap and recommendation code through [`IssueIndex`].

use std::collections::HashMap;

use sha2::{Digest, Sha256};
use tracing::debug;

use super::parser::{parse_issues, ParsedIssueSet};
use crate::domain::CatalogItem;

/// Read access to parsed issue sets by item slug
pub trait IssueIndex {
    fn parsed(&self, slug: &str) -> Option<&ParsedIssueSet>;
}

impl IssueIndex for HashMap<String, ParsedIssueSet> {
    fn parsed(&self, slug: &str) -> Option<&ParsedIssueSet> {
        self.get(slug)
    }
}

/// Hash of an item's issue text, in the form `sha256:<hex>`
pub fn text_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("sha256:{}", hex::encode(hasher.finalize()))
}

#[derive(Debug, Clone)]
struct CachedParse {
    text_hash: String,
    parsed: ParsedIssueSet,
}

/// Parsed issue sets keyed by `(slug, text hash)`
#[derive(Debug, Clone, Default)]
pub struct ParsedIssueCache {
    entries: HashMap<String, CachedParse>,
}

impl ParsedIssueCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cache populated from a catalog snapshot
    pub fn from_catalog(items: &[CatalogItem]) -> Self {
        let mut cache = Self::new();
        cache.refresh(items);
        cache
    }

    /// Bring the cache in line with `items`, parsing only new or changed
    /// entries. Returns how many items were (re)parsed.
    pub fn refresh(&mut self, items: &[CatalogItem]) -> usize {
        let mut reparsed = 0;
        for item in items {
            let hash = text_hash(&item.issues_text);
            let fresh = self
                .entries
                .get(&item.slug)
                .is_some_and(|entry| entry.text_hash == hash);
            if fresh {
                continue;
            }

            self.entries.insert(
                item.slug.clone(),
                CachedParse {
                    text_hash: hash,
                    parsed: parse_issues(&item.issues_text),
                },
            );
            reparsed += 1;
        }

        debug!(reparsed, cached = self.entries.len(), "Refreshed parsed issue cache");
        reparsed
    }
}

impl IssueIndex for ParsedIssueCache {
    fn parsed(&self, slug: &str) -> Option<&ParsedIssueSet> {
        self.entries.get(slug).map(|entry| &entry.parsed)
    }
}
