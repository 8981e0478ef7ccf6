//! audiolib - personal audio library
//!
//! Catalogs downloaded songs, podcasts and audiobooks, organizes them into
//! playlists and plays them.
//!
//! # Architecture
//!
//! The library is an in-memory aggregate:
//! - Content is downloaded from a content store, at most once per identity
//! - Playlists hold references to downloaded content, never copies
//! - Deleting content removes it from every playlist
//! - Every index is 1-based and follows the current collection order
//!
//! # Modules
//!
//! - `adapters`: Content store interface and the YAML-backed store
//! - `core`: The Library aggregate
//! - `domain`: Data structures (Song, Podcast, AudioBook, Playlist)
//! - `console`: Output sink for play/print
//! - `cli`: Command-line shell
//!
//! # Usage
//!
//! ```bash
//! # Interactive shell over the bundled demo store
//! audiolib
//!
//! # Use another store catalog and run a script
//! audiolib --store store.yaml --script commands.txt
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod console;
pub mod core;
pub mod domain;
pub mod error;

// Re-export main types at crate root for convenience
pub use adapters::{ContentStore, MemoryStore};
pub use console::{Console, StdoutConsole};
pub use self::core::Library;
pub use domain::{
    AudioBook, AudioContent, Chapter, ContentId, ContentKey, ContentType, Episode, Genre,
    Playable, Playlist, Podcast, Season, Song,
};
pub use error::{Entity, LibraryError};
