//! Domain types for the longbox core.
//!
//! This module contains the immutable snapshot records supplied by the
//! external data layer:
//! - CatalogItem: a collected edition with importance and print status
//! - Relationship: a curated, typed edge between two items
//! - OwnershipRecord: a reader's status for one item
//! - Event / EventEditionMapping / Era: validator inputs

pub mod catalog;
pub mod event;
pub mod ownership;
pub mod relationship;

// Re-export commonly used types
pub use catalog::{CatalogItem, Importance, PrintStatus};
pub use event::{Era, Event, EventEditionMapping};
pub use ownership::{held_slugs, shelved_slugs, OwnershipRecord, OwnershipStatus};
pub use relationship::{RelationType, Relationship};
