//! Core library logic.
//!
//! This module contains:
//! - Library: downloaded content, playlists and every operation over them

pub mod library;

// Re-export commonly used types
pub use library::Library;
