//! Playlists.
//!
//! A playlist is a titled, ordered list of content references. It never owns
//! the content it points at; the library resolves each reference when the
//! playlist is printed or played.

use super::content::ContentKey;

/// A user-defined playlist
#[derive(Debug, Clone)]
pub struct Playlist {
    title: String,
    contents: Vec<ContentKey>,
}

impl Playlist {
    /// Create a new empty playlist
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            contents: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Playlists are identified by title alone
    pub fn has_title(&self, title: &str) -> bool {
        self.title == title
    }

    pub fn contents(&self) -> &[ContentKey] {
        &self.contents
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Append a reference; the same content may appear more than once
    pub fn add(&mut self, key: ContentKey) {
        self.contents.push(key);
    }

    /// Entry at a 1-based index
    pub fn get(&self, index: usize) -> Option<&ContentKey> {
        index.checked_sub(1).and_then(|i| self.contents.get(i))
    }

    /// True if a 1-based index addresses an entry
    pub fn contains_index(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    /// Remove the entry at a 1-based index
    pub fn delete(&mut self, index: usize) -> Option<ContentKey> {
        if !self.contains_index(index) {
            return None;
        }
        Some(self.contents.remove(index - 1))
    }

    /// Number of times a content item appears
    pub fn count(&self, key: &ContentKey) -> usize {
        self.contents.iter().filter(|k| *k == key).count()
    }

    /// Drop every reference to a content item, returning how many were removed
    pub fn remove_all(&mut self, key: &ContentKey) -> usize {
        let before = self.contents.len();
        self.contents.retain(|k| k != key);
        before - self.contents.len()
    }
}

impl PartialEq for Playlist {
    fn eq(&self, other: &Self) -> bool {
        self.has_title(&other.title)
    }
}

impl Eq for Playlist {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::content::{ContentId, ContentType};

    fn song(id: &str) -> ContentKey {
        ContentKey::new(ContentType::Song, ContentId::new(id))
    }

    #[test]
    fn test_equality_by_title() {
        let mut a = Playlist::new("Road");
        a.add(song("S001"));
        let b = Playlist::new("Road");

        assert_eq!(a, b);
        assert_ne!(a, Playlist::new("road"));
    }

    #[test]
    fn test_one_based_access() {
        let mut playlist = Playlist::new("Mix");
        playlist.add(song("S001"));
        playlist.add(song("S002"));

        assert!(!playlist.contains_index(0));
        assert_eq!(playlist.get(1), Some(&song("S001")));
        assert_eq!(playlist.get(2), Some(&song("S002")));
        assert!(playlist.get(3).is_none());

        assert_eq!(playlist.delete(1), Some(song("S001")));
        assert_eq!(playlist.delete(2), None);
        assert_eq!(playlist.len(), 1);
    }

    #[test]
    fn test_remove_all_duplicates() {
        let mut playlist = Playlist::new("Mix");
        playlist.add(song("S001"));
        playlist.add(song("S002"));
        playlist.add(song("S001"));

        assert_eq!(playlist.count(&song("S001")), 2);
        assert_eq!(playlist.remove_all(&song("S001")), 2);
        assert_eq!(playlist.contents(), &[song("S002")]);

        // Absent content is a no-op
        assert_eq!(playlist.remove_all(&song("S404")), 0);
        assert_eq!(playlist.len(), 1);
    }
}
