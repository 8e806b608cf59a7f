//! Loading of the immutable input collections from a data directory.
//!
//! # Layout
//!
//! ```text
//! data/
//! ├── collected_editions.json   # CatalogItem[]
//! ├── connections.json          # Relationship[] (optional)
//! ├── collection.json           # OwnershipRecord[] (optional)
//! ├── events.json               # Event[]
//! ├── event_editions.json       # EventEditionMapping[]
//! └── eras.json                 # Era[]
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tokio::fs;
use tracing::info;

use super::catalog::Catalog;
use crate::domain::{Era, Event, EventEditionMapping, OwnershipRecord, Relationship};
use crate::validate::ValidationInput;

pub const EDITIONS_FILE: &str = "collected_editions.json";
pub const CONNECTIONS_FILE: &str = "connections.json";
pub const COLLECTION_FILE: &str = "collection.json";
pub const EVENTS_FILE: &str = "events.json";
pub const EVENT_EDITIONS_FILE: &str = "event_editions.json";
pub const ERAS_FILE: &str = "eras.json";

/// Everything the core reads, loaded once per command
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub catalog: Catalog,
    pub relationships: Vec<Relationship>,
    pub ownership: Vec<OwnershipRecord>,
    pub events: Vec<Event>,
    pub mappings: Vec<EventEditionMapping>,
    pub eras: Vec<Era>,
}

impl Snapshot {
    /// Load catalog, relationships and the reader's collection.
    ///
    /// Connections and collection files are optional and load as empty.
    pub async fn load_catalog(dir: &Path) -> Result<Self> {
        let items = read_json(&dir.join(EDITIONS_FILE)).await?;
        let relationships = read_optional_json(&dir.join(CONNECTIONS_FILE)).await?;
        let ownership = read_optional_json(&dir.join(COLLECTION_FILE)).await?;
        let eras = read_optional_json(&dir.join(ERAS_FILE)).await?;

        let snapshot = Self {
            catalog: Catalog::from_items(items),
            relationships,
            ownership,
            eras,
            ..Self::default()
        };

        info!(
            dir = %dir.display(),
            items = snapshot.catalog.len(),
            relationships = snapshot.relationships.len(),
            ownership = snapshot.ownership.len(),
            "Loaded catalog snapshot"
        );

        Ok(snapshot)
    }

    /// Load everything, including the validator's required inputs.
    pub async fn load_all(dir: &Path) -> Result<Self> {
        let mut snapshot = Self::load_catalog(dir).await?;
        snapshot.events = read_json(&dir.join(EVENTS_FILE)).await?;
        snapshot.mappings = read_json(&dir.join(EVENT_EDITIONS_FILE)).await?;
        snapshot.eras = read_json(&dir.join(ERAS_FILE)).await?;

        info!(
            events = snapshot.events.len(),
            mappings = snapshot.mappings.len(),
            eras = snapshot.eras.len(),
            "Loaded validation inputs"
        );

        Ok(snapshot)
    }

    /// Borrow the collections the validator reads
    pub fn validation_input(&self) -> ValidationInput<'_> {
        ValidationInput {
            events: &self.events,
            editions: self.catalog.items(),
            mappings: &self.mappings,
            eras: &self.eras,
        }
    }
}

/// Read and parse a required JSON file
async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Read a JSON file, falling back to the default when it does not exist
async fn read_optional_json<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    let exists = fs::try_exists(path)
        .await
        .with_context(|| format!("Failed to check {}", path.display()))?;
    if !exists {
        return Ok(T::default());
    }
    read_json(path).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_optional_file_absent_loads_empty() {
        let temp = TempDir::new().unwrap();
        let loaded: Vec<Relationship> = read_optional_json(&temp.path().join(CONNECTIONS_FILE))
            .await
            .unwrap();
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn test_optional_file_unreadable_location_is_error() {
        let temp = TempDir::new().unwrap();
        let not_a_dir = temp.path().join("plain-file");
        std::fs::write(&not_a_dir, "x").unwrap();

        let result: Result<Vec<Relationship>> =
            read_optional_json(&not_a_dir.join(CONNECTIONS_FILE)).await;
        let err = result.unwrap_err();
        assert!(err.to_string().starts_with("Failed to check"));
    }
}
