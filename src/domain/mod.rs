//! Domain types for the audio library.
//!
//! This module contains the core data structures:
//! - Content: songs, podcasts and audiobooks, and their identity
//! - Playlist: titled lists of content references

pub mod content;
pub mod playlist;

// Re-export commonly used types
pub use content::{
    AudioBook, AudioContent, Chapter, ContentId, ContentKey, ContentType, Episode, Genre,
    Playable, Podcast, Season, Song,
};
pub use playlist::Playlist;
