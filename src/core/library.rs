//! The library aggregate.
//!
//! Holds downloaded songs, podcasts and audiobooks in insertion order, plus
//! the user's playlists. Every index taken by a public operation is 1-based
//! and refers to the current order of the matching collection.

use tracing::{debug, info, instrument, warn};

use crate::adapters::ContentStore;
use crate::console::Console;
use crate::domain::{
    AudioBook, AudioContent, ContentKey, ContentType, Playable, Playlist, Podcast, Song,
};
use crate::error::{position, Entity, LibraryError};

/// Downloaded content and playlists
#[derive(Debug, Default)]
pub struct Library {
    songs: Vec<Song>,
    podcasts: Vec<Podcast>,
    audiobooks: Vec<AudioBook>,
    playlists: Vec<Playlist>,
}

/// Prefix each line with its 1-based position
fn numbered(lines: impl IntoIterator<Item = String>) -> Vec<String> {
    lines
        .into_iter()
        .enumerate()
        .map(|(i, line)| format!("{}. {}", i + 1, line))
        .collect()
}

impl Library {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Download & lookup
    // ========================================================================

    /// Add content to the collection matching its type
    #[instrument(skip(self, content), fields(key = %content.key()))]
    pub fn download(&mut self, content: AudioContent) -> Result<(), LibraryError> {
        let duplicate = LibraryError::DuplicateContent {
            content_type: content.content_type(),
        };

        match content {
            AudioContent::Song(song) => {
                if self.songs.iter().any(|s| s.id == song.id) {
                    return Err(duplicate);
                }
                self.songs.push(song);
            }
            AudioContent::Podcast(podcast) => {
                if self.podcasts.iter().any(|p| p.id == podcast.id) {
                    return Err(duplicate);
                }
                self.podcasts.push(podcast);
            }
            AudioContent::AudioBook(book) => {
                if self.audiobooks.iter().any(|b| b.id == book.id) {
                    return Err(duplicate);
                }
                self.audiobooks.push(book);
            }
        }

        info!("Downloaded");
        Ok(())
    }

    /// True if any collection holds content with this id
    pub fn is_in_library(&self, id: &str) -> bool {
        self.songs.iter().any(|s| s.id.as_str() == id)
            || self.podcasts.iter().any(|p| p.id.as_str() == id)
            || self.audiobooks.iter().any(|b| b.id.as_str() == id)
    }

    /// Ask the store for content partially matching `text`
    pub fn search_partial_match(&self, store: &dyn ContentStore, text: &str) -> Vec<AudioContent> {
        store.search_partial(text)
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn podcasts(&self) -> &[Podcast] {
        &self.podcasts
    }

    pub fn audiobooks(&self) -> &[AudioBook] {
        &self.audiobooks
    }

    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    pub fn song_count(&self) -> usize {
        self.songs.len()
    }

    pub fn podcast_count(&self) -> usize {
        self.podcasts.len()
    }

    pub fn audiobook_count(&self) -> usize {
        self.audiobooks.len()
    }

    pub fn playlist_count(&self) -> usize {
        self.playlists.len()
    }

    /// Get a playlist by title
    pub fn playlist(&self, title: &str) -> Option<&Playlist> {
        self.playlists.iter().find(|p| p.has_title(title))
    }

    /// Resolve a content reference
    pub fn get(&self, key: &ContentKey) -> Option<&dyn Playable> {
        match key.content_type {
            ContentType::Song => self
                .songs
                .iter()
                .find(|s| s.id == key.id)
                .map(|s| s as &dyn Playable),
            ContentType::Podcast => self
                .podcasts
                .iter()
                .find(|p| p.id == key.id)
                .map(|p| p as &dyn Playable),
            ContentType::AudioBook => self
                .audiobooks
                .iter()
                .find(|b| b.id == key.id)
                .map(|b| b as &dyn Playable),
        }
    }

    /// Resolve a playlist entry, reporting references the cascade should have removed
    fn resolve_entry(&self, playlist: &str, key: &ContentKey) -> Option<&dyn Playable> {
        let content = self.get(key);
        if content.is_none() {
            warn!(playlist, %key, "Playlist entry refers to missing content");
        }
        content
    }

    fn playlist_position(&self, title: &str) -> Result<usize, LibraryError> {
        self.playlists
            .iter()
            .position(|p| p.has_title(title))
            .ok_or_else(|| LibraryError::PlaylistNotFound {
                title: title.to_string(),
            })
    }

    // ========================================================================
    // Listing & sorting
    // ========================================================================

    pub fn list_all_songs(&self) -> Vec<String> {
        numbered(self.songs.iter().map(Playable::info))
    }

    pub fn list_all_podcasts(&self) -> Vec<String> {
        numbered(self.podcasts.iter().map(Playable::info))
    }

    pub fn list_all_audiobooks(&self) -> Vec<String> {
        numbered(self.audiobooks.iter().map(Playable::info))
    }

    pub fn list_all_playlists(&self) -> Vec<String> {
        numbered(self.playlists.iter().map(|p| p.title().to_string()))
    }

    /// Distinct song artists, in the order they first appear
    pub fn list_all_artists(&self) -> Vec<String> {
        let mut artists: Vec<&str> = Vec::new();
        for song in &self.songs {
            if !artists.contains(&song.artist.as_str()) {
                artists.push(&song.artist);
            }
        }
        numbered(artists.into_iter().map(str::to_string))
    }

    pub fn sort_songs_by_year(&mut self) {
        self.songs.sort_by_key(|s| s.year);
    }

    pub fn sort_songs_by_length(&mut self) {
        self.songs.sort_by_key(|s| s.length);
    }

    pub fn sort_songs_by_name(&mut self) {
        self.songs.sort_by(|a, b| a.title.cmp(&b.title));
    }

    // ========================================================================
    // Deletion
    // ========================================================================

    /// Remove every playlist reference to a content item
    fn drop_references(&mut self, key: &ContentKey) {
        for playlist in &mut self.playlists {
            let removed = playlist.remove_all(key);
            if removed > 0 {
                debug!(playlist = %playlist.title(), removed, "Dropped references");
            }
        }
    }

    /// Delete a song and every playlist reference to it
    pub fn delete_song(&mut self, index: usize) -> Result<Song, LibraryError> {
        let pos = position(index, self.songs.len(), Entity::Song)?;
        let song = self.songs.remove(pos);
        self.drop_references(&song.key());

        info!(id = %song.id, "Deleted song");
        Ok(song)
    }

    /// Delete a podcast and every playlist reference to it
    pub fn delete_podcast(&mut self, index: usize) -> Result<Podcast, LibraryError> {
        let pos = position(index, self.podcasts.len(), Entity::Podcast)?;
        let podcast = self.podcasts.remove(pos);
        self.drop_references(&podcast.key());

        info!(id = %podcast.id, "Deleted podcast");
        Ok(podcast)
    }

    /// Delete an audiobook and every playlist reference to it
    pub fn delete_audiobook(&mut self, index: usize) -> Result<AudioBook, LibraryError> {
        let pos = position(index, self.audiobooks.len(), Entity::AudioBook)?;
        let book = self.audiobooks.remove(pos);
        self.drop_references(&book.key());

        info!(id = %book.id, "Deleted audiobook");
        Ok(book)
    }

    // ========================================================================
    // Playback
    // ========================================================================

    pub fn play_song(&self, index: usize, out: &mut dyn Console) -> Result<(), LibraryError> {
        let pos = position(index, self.songs.len(), Entity::Song)?;
        let song = &self.songs[pos];

        debug!(id = %song.id, "Playing song");
        song.play(out);
        Ok(())
    }

    /// Play one episode; the podcast keeps the selected season and episode
    pub fn play_podcast(
        &mut self,
        index: usize,
        season: usize,
        episode: usize,
        out: &mut dyn Console,
    ) -> Result<(), LibraryError> {
        let pos = position(index, self.podcasts.len(), Entity::Podcast)?;
        let podcast = &mut self.podcasts[pos];

        let season_pos = position(season, podcast.seasons().len(), Entity::Season)?;
        let episodes = podcast.episode_count(season).unwrap_or(0);
        let episode_pos = position(episode, episodes, Entity::Episode)?;

        podcast.set_season(season_pos);
        podcast.set_episode(episode_pos);

        debug!(id = %podcast.id, season, episode, "Playing podcast");
        podcast.play(out);
        Ok(())
    }

    pub fn print_podcast_episodes(
        &self,
        index: usize,
        season: usize,
    ) -> Result<Vec<String>, LibraryError> {
        let pos = position(index, self.podcasts.len(), Entity::Podcast)?;
        self.podcasts[pos].print_season_episodes(season)
    }

    /// Play one chapter; the book keeps the selected chapter
    pub fn play_audiobook(
        &mut self,
        index: usize,
        chapter: usize,
        out: &mut dyn Console,
    ) -> Result<(), LibraryError> {
        let pos = position(index, self.audiobooks.len(), Entity::AudioBook)?;
        let book = &mut self.audiobooks[pos];
        position(chapter, book.number_of_chapters(), Entity::Chapter)?;

        book.select_chapter(chapter);

        debug!(id = %book.id, chapter, "Playing audiobook");
        book.play(out);
        Ok(())
    }

    pub fn print_audiobook_toc(&self, index: usize) -> Result<Vec<String>, LibraryError> {
        let pos = position(index, self.audiobooks.len(), Entity::AudioBook)?;
        Ok(self.audiobooks[pos].print_toc())
    }

    // ========================================================================
    // Playlists
    // ========================================================================

    pub fn make_playlist(&mut self, title: &str) -> Result<(), LibraryError> {
        if self.playlist(title).is_some() {
            return Err(LibraryError::PlaylistAlreadyExists {
                title: title.to_string(),
            });
        }

        self.playlists.push(Playlist::new(title));
        info!(title, "Created playlist");
        Ok(())
    }

    /// Remove a playlist; its content stays in the library
    pub fn delete_playlist(&mut self, title: &str) -> Result<Playlist, LibraryError> {
        let pos = self.playlist_position(title)?;
        let playlist = self.playlists.remove(pos);

        info!(title, "Deleted playlist");
        Ok(playlist)
    }

    /// Numbered description of every entry in a playlist
    pub fn print_playlist(&self, title: &str) -> Result<Vec<String>, LibraryError> {
        let pos = self.playlist_position(title)?;
        Ok(numbered(
            self.playlists[pos]
                .contents()
                .iter()
                .filter_map(|key| self.resolve_entry(title, key))
                .map(|content| content.info()),
        ))
    }

    /// Play every entry of a playlist in order
    pub fn play_playlist(&self, title: &str, out: &mut dyn Console) -> Result<(), LibraryError> {
        let pos = self.playlist_position(title)?;

        debug!(title, "Playing playlist");
        for key in self.playlists[pos].contents() {
            if let Some(content) = self.resolve_entry(title, key) {
                content.play(out);
            }
        }
        Ok(())
    }

    /// Play a single playlist entry; audiobooks restart at chapter 1
    pub fn play_playlist_item(
        &mut self,
        title: &str,
        index: usize,
        out: &mut dyn Console,
    ) -> Result<(), LibraryError> {
        let pos = self.playlist_position(title)?;
        let playlist = &self.playlists[pos];
        let key = playlist
            .get(index)
            .cloned()
            .ok_or(LibraryError::InvalidPlaylistIndex { index })?;

        out.line(playlist.title());

        if key.content_type == ContentType::AudioBook {
            if let Some(book) = self.audiobooks.iter_mut().find(|b| b.id == key.id) {
                book.select_chapter(1);
            }
        }

        debug!(title, %key, "Playing playlist entry");
        if let Some(content) = self.resolve_entry(title, &key) {
            content.play(out);
        }
        Ok(())
    }

    /// Append a downloaded item, picked by type and 1-based index, to a playlist
    pub fn add_content_to_playlist(
        &mut self,
        content_type: &str,
        index: usize,
        title: &str,
    ) -> Result<(), LibraryError> {
        let content_type: ContentType = content_type.parse()?;
        let entity = content_type.entity();

        let key = match content_type {
            ContentType::Song => self.songs[position(index, self.songs.len(), entity)?].key(),
            ContentType::Podcast => {
                self.podcasts[position(index, self.podcasts.len(), entity)?].key()
            }
            ContentType::AudioBook => {
                self.audiobooks[position(index, self.audiobooks.len(), entity)?].key()
            }
        };

        let pos = self.playlist_position(title)?;
        debug!(title, %key, "Adding to playlist");
        self.playlists[pos].add(key);
        Ok(())
    }

    /// Remove the entry at a 1-based index from a playlist
    pub fn del_content_from_playlist(
        &mut self,
        index: usize,
        title: &str,
    ) -> Result<ContentKey, LibraryError> {
        let pos = self.playlist_position(title)?;
        self.playlists[pos]
            .delete(index)
            .ok_or(LibraryError::ContentNotInPlaylist { index })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Chapter, Episode, Season};

    fn library() -> Library {
        let mut library = Library::new();
        library
            .download(Song::new("S001", "Zebra", "Alpha", 2001, 4).into())
            .unwrap();
        library
            .download(Song::new("S002", "Apple", "Beta", 1999, 3).into())
            .unwrap();
        library
            .download(Song::new("S003", "Mango", "Alpha", 2001, 2).into())
            .unwrap();
        library
            .download(
                Podcast::new("P001", "Talk", "Host", 2020, 60)
                    .with_season(Season::new(vec![Episode::new("One", "", 30)]))
                    .with_season(Season::new(vec![
                        Episode::new("Two", "", 30),
                        Episode::new("Three", "", 30),
                    ]))
                    .into(),
            )
            .unwrap();
        library
            .download(
                AudioBook::new("B001", "Tome", "Writer", 1900, 500)
                    .with_chapter(Chapter::new("I", "a"))
                    .with_chapter(Chapter::new("II", "b"))
                    .with_chapter(Chapter::new("III", "c"))
                    .into(),
            )
            .unwrap();
        library
    }

    #[test]
    fn test_is_in_library_across_types() {
        let library = library();
        assert!(library.is_in_library("S002"));
        assert!(library.is_in_library("P001"));
        assert!(library.is_in_library("B001"));
        assert!(!library.is_in_library("S999"));
    }

    #[test]
    fn test_same_id_different_type_is_not_duplicate() {
        let mut library = library();
        let result = library.download(AudioBook::new("S001", "Book", "W", 2000, 10).into());
        assert!(result.is_ok());
        assert_eq!(library.audiobook_count(), 2);
    }

    #[test]
    fn test_list_all_artists_first_occurrence() {
        let library = library();
        assert_eq!(library.list_all_artists(), vec!["1. Alpha", "2. Beta"]);
    }

    #[test]
    fn test_sort_by_year_is_stable() {
        let mut library = library();
        library.sort_songs_by_year();

        let ids: Vec<_> = library.songs().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["S002", "S001", "S003"]);
    }

    #[test]
    fn test_sort_by_name_and_length() {
        let mut library = library();

        library.sort_songs_by_name();
        let titles: Vec<_> = library.songs().iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Apple", "Mango", "Zebra"]);

        library.sort_songs_by_length();
        let lengths: Vec<_> = library.songs().iter().map(|s| s.length).collect();
        assert_eq!(lengths, vec![2, 3, 4]);
    }

    #[test]
    fn test_play_podcast_validates_episode_against_season() {
        let mut library = library();
        let mut out: Vec<String> = Vec::new();

        // Season 1 has a single episode
        assert_eq!(
            library.play_podcast(1, 1, 2, &mut out),
            Err(LibraryError::ContentNotFound(Entity::Episode))
        );
        assert_eq!(
            library.play_podcast(1, 3, 1, &mut out),
            Err(LibraryError::ContentNotFound(Entity::Season))
        );
        assert_eq!(
            library.play_podcast(2, 1, 1, &mut out),
            Err(LibraryError::ContentNotFound(Entity::Podcast))
        );
        assert!(out.is_empty());

        library.play_podcast(1, 2, 2, &mut out).unwrap();
        assert_eq!(library.podcasts()[0].current_season(), 1);
        assert_eq!(library.podcasts()[0].current_episode(), 1);
        assert!(out.contains(&"Three".to_string()));
    }

    #[test]
    fn test_failed_validation_does_not_move_cursor() {
        let mut library = library();
        let mut out: Vec<String> = Vec::new();

        library.play_podcast(1, 2, 2, &mut out).unwrap();
        let _ = library.play_podcast(1, 2, 9, &mut out);
        assert_eq!(library.podcasts()[0].current_season(), 1);
        assert_eq!(library.podcasts()[0].current_episode(), 1);
    }

    #[test]
    fn test_delete_podcast_cascades() {
        let mut library = library();
        library.make_playlist("Mix").unwrap();
        library.add_content_to_playlist("podcast", 1, "Mix").unwrap();
        library.add_content_to_playlist("song", 1, "Mix").unwrap();

        let removed = library.delete_podcast(1).unwrap();
        assert_eq!(removed.id.as_str(), "P001");
        assert_eq!(library.playlist("Mix").unwrap().len(), 1);
    }

    #[test]
    fn test_add_content_unknown_type() {
        let mut library = library();
        library.make_playlist("Mix").unwrap();
        assert_eq!(
            library.add_content_to_playlist("video", 1, "Mix"),
            Err(LibraryError::UnknownContentType("video".to_string()))
        );
    }

    #[test]
    fn test_add_content_validates_index_before_playlist() {
        let mut library = library();
        assert_eq!(
            library.add_content_to_playlist("AUDIOBOOK", 4, "Missing"),
            Err(LibraryError::ContentNotFound(Entity::AudioBook))
        );
        assert_eq!(
            library.add_content_to_playlist("AUDIOBOOK", 1, "Missing"),
            Err(LibraryError::PlaylistNotFound {
                title: "Missing".to_string()
            })
        );
    }

    #[test]
    fn test_unresolved_playlist_entries_are_skipped() {
        let mut library = library();
        library.make_playlist("Mix").unwrap();
        library.add_content_to_playlist("song", 1, "Mix").unwrap();

        // Bypass the cascade to leave a reference with no content behind it
        library.songs.remove(0);

        assert!(library.print_playlist("Mix").unwrap().is_empty());

        let mut out: Vec<String> = Vec::new();
        library.play_playlist("Mix", &mut out).unwrap();
        assert!(out.is_empty());

        library.play_playlist_item("Mix", 1, &mut out).unwrap();
        assert_eq!(out, vec!["Mix"]);
    }

    #[test]
    fn test_delete_playlist() {
        let mut library = library();
        library.make_playlist("Mix").unwrap();
        library.add_content_to_playlist("song", 2, "Mix").unwrap();

        let playlist = library.delete_playlist("Mix").unwrap();
        assert_eq!(playlist.len(), 1);
        assert_eq!(library.playlist_count(), 0);
        assert_eq!(library.song_count(), 3);
        assert!(library.delete_playlist("Mix").is_err());
    }
}
