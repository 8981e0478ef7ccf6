//! Library errors.
//!
//! Every failed library operation reports exactly one of these kinds. Nothing
//! is mutated before an operation has finished validating its input.

use std::fmt;

use thiserror::Error;

use crate::domain::ContentType;

/// What an out-of-range index was pointing at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Song,
    Podcast,
    Season,
    Episode,
    AudioBook,
    Chapter,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Entity::Song => "Song",
            Entity::Podcast => "Podcast",
            Entity::Season => "Season",
            Entity::Episode => "Episode",
            Entity::AudioBook => "AudioBook",
            Entity::Chapter => "AudioBook chapter",
        };
        write!(f, "{}", name)
    }
}

/// Library operation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LibraryError {
    #[error("{} already downloaded", .content_type.label())]
    DuplicateContent { content_type: ContentType },

    #[error("{0} not found")]
    ContentNotFound(Entity),

    #[error("Playlist {title} already exists")]
    PlaylistAlreadyExists { title: String },

    #[error("Playlist {title} not found")]
    PlaylistNotFound { title: String },

    #[error("Invalid playlist content #{index}")]
    InvalidPlaylistIndex { index: usize },

    #[error("Content #{index} not in playlist")]
    ContentNotInPlaylist { index: usize },

    #[error("Unknown content type: {0}")]
    UnknownContentType(String),

    #[error("Unknown genre: {0}")]
    UnknownGenre(String),
}

/// Convert a 1-based index into a position in a collection of `len` items
pub(crate) fn position(index: usize, len: usize, entity: Entity) -> Result<usize, LibraryError> {
    if index < 1 || index > len {
        return Err(LibraryError::ContentNotFound(entity));
    }
    Ok(index - 1)
}
