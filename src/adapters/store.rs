//! In-memory content store.
//!
//! Loaded from a YAML catalog of songs, podcasts and audiobooks. Without a
//! catalog file the bundled demo catalog is used.
//!
//! ```yaml
//! version: 1
//! content:
//!   - type: SONG
//!     id: S001
//!     title: Hotel Meridian
//!     year: 1976
//!     length: 6
//!     artist: The Westerlies
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::ContentStore;
use crate::domain::{AudioContent, Genre, Playable};

const DEMO_CATALOG: &str = include_str!("demo_store.yaml");

/// On-disk catalog schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreCatalog {
    /// Catalog format version
    pub version: u32,

    /// Every item available for download
    #[serde(default)]
    pub content: Vec<AudioContent>,
}

/// Content store backed by a list held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: Vec<AudioContent>,
}

impl MemoryStore {
    /// Create a store from a list of items, dropping repeated identities
    pub fn new(items: impl IntoIterator<Item = AudioContent>) -> Self {
        let mut store = Self::default();
        for item in items {
            if store.items.contains(&item) {
                warn!(key = %item.key(), "Skipping duplicate store entry");
                continue;
            }
            store.items.push(item);
        }
        store
    }

    /// Parse a YAML catalog
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let catalog: StoreCatalog =
            serde_yaml::from_str(yaml).context("Failed to parse store catalog")?;
        debug!(version = catalog.version, items = catalog.content.len(), "Parsed store catalog");
        Ok(Self::new(catalog.content))
    }

    /// Load a YAML catalog from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read store catalog: {}", path.display()))?;

        Self::from_yaml(&content)
            .with_context(|| format!("Invalid store catalog: {}", path.display()))
    }

    /// The bundled demo catalog
    pub fn demo() -> Result<Self> {
        Self::from_yaml(DEMO_CATALOG)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item at a 1-based index
    pub fn get(&self, index: usize) -> Option<&AudioContent> {
        index.checked_sub(1).and_then(|i| self.items.get(i))
    }

    /// Numbered description of every item
    pub fn list(&self) -> Vec<String> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| format!("{}. {}", i + 1, item.info()))
            .collect()
    }

    /// Songs by an artist and audiobooks by an author (case-insensitive)
    pub fn by_artist(&self, name: &str) -> Vec<AudioContent> {
        let name = name.to_lowercase();
        self.items
            .iter()
            .filter(|item| match item {
                AudioContent::Song(song) => song.artist.to_lowercase() == name,
                AudioContent::AudioBook(book) => book.author.to_lowercase() == name,
                AudioContent::Podcast(_) => false,
            })
            .cloned()
            .collect()
    }

    /// Songs of a genre
    pub fn by_genre(&self, genre: Genre) -> Vec<AudioContent> {
        self.items
            .iter()
            .filter(|item| matches!(item, AudioContent::Song(song) if song.genre == genre))
            .cloned()
            .collect()
    }
}

impl ContentStore for MemoryStore {
    /// Case-insensitive substring match over titles and creators
    fn search_partial(&self, text: &str) -> Vec<AudioContent> {
        let query = text.to_lowercase();

        self.items
            .iter()
            .filter(|item| {
                let creator = match item {
                    AudioContent::Song(song) => &song.artist,
                    AudioContent::Podcast(podcast) => &podcast.host,
                    AudioContent::AudioBook(book) => &book.author,
                };
                item.title().to_lowercase().contains(&query)
                    || creator.to_lowercase().contains(&query)
            })
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ContentType;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_demo_catalog_parses() {
        let store = MemoryStore::demo().unwrap();
        assert_eq!(store.len(), 10);
        assert_eq!(store.get(1).unwrap().content_type(), ContentType::Song);
        assert!(store.get(0).is_none());
        assert!(store.get(11).is_none());
    }

    #[test]
    fn test_search_partial_case_insensitive() {
        let store = MemoryStore::demo().unwrap();

        let results = store.search_partial("LIGHT");
        let ids: Vec<_> = results.iter().map(|c| c.id().as_str()).collect();
        assert_eq!(ids, vec!["S005", "B001"]);

        // Matches the podcast host
        assert_eq!(store.search_partial("rina").len(), 1);
        assert!(store.search_partial("nothing like this").is_empty());
    }

    #[test]
    fn test_by_artist_and_genre() {
        let store = MemoryStore::demo().unwrap();
        assert_eq!(store.by_artist("the westerlies").len(), 2);
        assert_eq!(store.by_artist("Edith Marlowe").len(), 1);
        assert_eq!(store.by_genre(Genre::Jazz).len(), 1);
        assert!(store.by_genre(Genre::Rap).is_empty());
    }

    #[test]
    fn test_duplicate_entries_are_dropped() {
        let yaml = r#"
version: 1
content:
  - type: SONG
    id: S1
    title: A
    year: 2000
    length: 3
    artist: X
  - type: SONG
    id: S1
    title: A again
    year: 2000
    length: 3
    artist: X
"#;
        let store = MemoryStore::from_yaml(yaml).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("store.yaml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
version: 1
content:
  - type: AUDIOBOOK
    id: B9
    title: Notes
    year: 2010
    length: 90
    author: Someone
    chapters:
      - title: One
"#
        )
        .unwrap();

        let store = MemoryStore::load(&path).unwrap();
        assert_eq!(store.len(), 1);
        assert!(MemoryStore::load(&temp.path().join("missing.yaml")).is_err());
    }
}
