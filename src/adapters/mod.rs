//! Interfaces for collaborators outside the library.
//!
//! The library never discovers content on its own. A content store hands it
//! candidate items, which are then downloaded into the library.

pub mod store;

use crate::domain::AudioContent;

// Re-export the in-memory store
pub use store::{MemoryStore, StoreCatalog};

/// Source of content that can be downloaded
pub trait ContentStore {
    /// All content partially matching `text`
    fn search_partial(&self, text: &str) -> Vec<AudioContent>;
}
