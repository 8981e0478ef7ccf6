//! Audio content: songs, podcasts and audiobooks.
//!
//! Every content item has an identity made of its type and its id. Two items
//! with the same identity are the same content, whatever their other fields
//! say. Podcasts and audiobooks carry a cursor (season/episode, chapter) that
//! playback reads.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::console::Console;
use crate::error::{Entity, LibraryError};

/// Content identifier, unique per content item
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentId(String);

impl ContentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ContentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Type of audio content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContentType {
    Song,
    Podcast,
    AudioBook,
}

impl ContentType {
    /// Human-readable name used in messages
    pub fn label(&self) -> &'static str {
        match self {
            ContentType::Song => "Song",
            ContentType::Podcast => "Podcast",
            ContentType::AudioBook => "AudioBook",
        }
    }

    /// Entity reported when an index into this type's collection is invalid
    pub fn entity(&self) -> Entity {
        match self {
            ContentType::Song => Entity::Song,
            ContentType::Podcast => Entity::Podcast,
            ContentType::AudioBook => Entity::AudioBook,
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentType::Song => write!(f, "SONG"),
            ContentType::Podcast => write!(f, "PODCAST"),
            ContentType::AudioBook => write!(f, "AUDIOBOOK"),
        }
    }
}

impl FromStr for ContentType {
    type Err = LibraryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "SONG" => Ok(ContentType::Song),
            "PODCAST" => Ok(ContentType::Podcast),
            "AUDIOBOOK" => Ok(ContentType::AudioBook),
            _ => Err(LibraryError::UnknownContentType(s.to_string())),
        }
    }
}

/// Identity of a content item: its type plus its id
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentKey {
    pub content_type: ContentType,
    pub id: ContentId,
}

impl ContentKey {
    pub fn new(content_type: ContentType, id: ContentId) -> Self {
        Self { content_type, id }
    }
}

impl fmt::Display for ContentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.content_type, self.id)
    }
}

/// Behavior shared by every kind of audio content
pub trait Playable {
    fn key(&self) -> ContentKey;

    /// One-line description of the item
    fn info(&self) -> String;

    /// Play the item at its current cursor position
    fn play(&self, out: &mut dyn Console);

    /// True when both items have the same identity
    fn same_content(&self, other: &dyn Playable) -> bool {
        self.key() == other.key()
    }
}

fn header(id: &ContentId, title: &str, year: u16, length: u32) -> String {
    format!("ID: {} Title: {} Year: {} Length: {}", id, title, year, length)
}

/// Song genre
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Genre {
    #[default]
    Pop,
    Rock,
    Jazz,
    HipHop,
    Rap,
    Classical,
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Genre::Pop => "POP",
            Genre::Rock => "ROCK",
            Genre::Jazz => "JAZZ",
            Genre::HipHop => "HIPHOP",
            Genre::Rap => "RAP",
            Genre::Classical => "CLASSICAL",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Genre {
    type Err = LibraryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace('-', "").as_str() {
            "POP" => Ok(Genre::Pop),
            "ROCK" => Ok(Genre::Rock),
            "JAZZ" => Ok(Genre::Jazz),
            "HIPHOP" => Ok(Genre::HipHop),
            "RAP" => Ok(Genre::Rap),
            "CLASSICAL" => Ok(Genre::Classical),
            _ => Err(LibraryError::UnknownGenre(s.to_string())),
        }
    }
}

/// A downloaded song
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Song {
    pub id: ContentId,
    pub title: String,
    pub year: u16,

    /// Length in minutes
    pub length: u32,

    pub artist: String,

    #[serde(default)]
    pub composer: String,

    #[serde(default)]
    pub genre: Genre,

    #[serde(default)]
    pub lyrics: String,
}

impl Song {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
        year: u16,
        length: u32,
    ) -> Self {
        Self {
            id: ContentId::new(id),
            title: title.into(),
            year,
            length,
            artist: artist.into(),
            composer: String::new(),
            genre: Genre::default(),
            lyrics: String::new(),
        }
    }

    pub fn with_composer(mut self, composer: impl Into<String>) -> Self {
        self.composer = composer.into();
        self
    }

    pub fn with_genre(mut self, genre: Genre) -> Self {
        self.genre = genre;
        self
    }

    pub fn with_lyrics(mut self, lyrics: impl Into<String>) -> Self {
        self.lyrics = lyrics.into();
        self
    }
}

impl Playable for Song {
    fn key(&self) -> ContentKey {
        ContentKey::new(ContentType::Song, self.id.clone())
    }

    fn info(&self) -> String {
        format!(
            "{} Artist: {} Composer: {} Genre: {}",
            header(&self.id, &self.title, self.year, self.length),
            self.artist,
            self.composer,
            self.genre
        )
    }

    fn play(&self, out: &mut dyn Console) {
        out.line(&self.info());
        if !self.lyrics.is_empty() {
            out.line(&self.lyrics);
        }
    }
}

/// A single podcast episode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Episode {
    pub title: String,

    /// Episode audio (text stands in for the recording)
    #[serde(default)]
    pub file: String,

    /// Length in minutes
    #[serde(default)]
    pub length: u32,
}

impl Episode {
    pub fn new(title: impl Into<String>, file: impl Into<String>, length: u32) -> Self {
        Self {
            title: title.into(),
            file: file.into(),
            length,
        }
    }
}

/// One season of a podcast, an ordered list of episodes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Season {
    pub episodes: Vec<Episode>,
}

impl Season {
    pub fn new(episodes: Vec<Episode>) -> Self {
        Self { episodes }
    }

    pub fn episode_titles(&self) -> impl Iterator<Item = &str> {
        self.episodes.iter().map(|e| e.title.as_str())
    }
}

/// A downloaded podcast with its season/episode cursor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Podcast {
    pub id: ContentId,
    pub title: String,
    pub year: u16,

    /// Length in minutes
    pub length: u32,

    pub host: String,

    #[serde(default)]
    pub seasons: Vec<Season>,

    // Cursor positions are 0-based
    #[serde(skip)]
    current_season: usize,
    #[serde(skip)]
    current_episode: usize,
}

impl Podcast {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        host: impl Into<String>,
        year: u16,
        length: u32,
    ) -> Self {
        Self {
            id: ContentId::new(id),
            title: title.into(),
            year,
            length,
            host: host.into(),
            seasons: Vec::new(),
            current_season: 0,
            current_episode: 0,
        }
    }

    pub fn with_season(mut self, season: Season) -> Self {
        self.seasons.push(season);
        self
    }

    pub fn seasons(&self) -> &[Season] {
        &self.seasons
    }

    /// Number of episodes in a 1-based season, if that season exists
    pub fn episode_count(&self, season: usize) -> Option<usize> {
        season
            .checked_sub(1)
            .and_then(|s| self.seasons.get(s))
            .map(|s| s.episodes.len())
    }

    /// Move the cursor to a 0-based season
    pub fn set_season(&mut self, season: usize) {
        self.current_season = season;
    }

    /// Move the cursor to a 0-based episode of the current season
    pub fn set_episode(&mut self, episode: usize) {
        self.current_episode = episode;
    }

    /// Current 0-based season
    pub fn current_season(&self) -> usize {
        self.current_season
    }

    /// Current 0-based episode
    pub fn current_episode(&self) -> usize {
        self.current_episode
    }

    /// Episode listing for a 1-based season
    pub fn print_season_episodes(&self, season: usize) -> Result<Vec<String>, LibraryError> {
        let selected = season
            .checked_sub(1)
            .and_then(|s| self.seasons.get(s))
            .ok_or(LibraryError::ContentNotFound(Entity::Season))?;

        Ok(selected
            .episode_titles()
            .enumerate()
            .map(|(i, title)| format!("Episode {}. {}", i + 1, title))
            .collect())
    }
}

impl Playable for Podcast {
    fn key(&self) -> ContentKey {
        ContentKey::new(ContentType::Podcast, self.id.clone())
    }

    fn info(&self) -> String {
        format!(
            "{} Host: {} Seasons: {}",
            header(&self.id, &self.title, self.year, self.length),
            self.host,
            self.seasons.len()
        )
    }

    fn play(&self, out: &mut dyn Console) {
        out.line(&self.info());

        let episode = self
            .seasons
            .get(self.current_season)
            .and_then(|s| s.episodes.get(self.current_episode));

        if let Some(episode) = episode {
            out.line(&format!(
                "Season: {} Episode: {}",
                self.current_season + 1,
                self.current_episode + 1
            ));
            out.line(&episode.title);
            if !episode.file.is_empty() {
                out.line(&episode.file);
            }
        }
    }
}

/// One chapter of an audiobook
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chapter {
    pub title: String,

    #[serde(default)]
    pub text: String,
}

impl Chapter {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }
}

/// A downloaded audiobook with its chapter cursor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioBook {
    pub id: ContentId,
    pub title: String,
    pub year: u16,

    /// Length in minutes
    pub length: u32,

    pub author: String,

    #[serde(default)]
    pub narrator: String,

    #[serde(default)]
    pub chapters: Vec<Chapter>,

    // 0-based
    #[serde(skip)]
    current_chapter: usize,
}

impl AudioBook {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        year: u16,
        length: u32,
    ) -> Self {
        Self {
            id: ContentId::new(id),
            title: title.into(),
            year,
            length,
            author: author.into(),
            narrator: String::new(),
            chapters: Vec::new(),
            current_chapter: 0,
        }
    }

    pub fn with_narrator(mut self, narrator: impl Into<String>) -> Self {
        self.narrator = narrator.into();
        self
    }

    pub fn with_chapter(mut self, chapter: Chapter) -> Self {
        self.chapters.push(chapter);
        self
    }

    pub fn number_of_chapters(&self) -> usize {
        self.chapters.len()
    }

    /// Select a 1-based chapter. Out-of-range numbers leave the cursor alone.
    pub fn select_chapter(&mut self, chapter: usize) {
        if (1..=self.chapters.len()).contains(&chapter) {
            self.current_chapter = chapter - 1;
        }
    }

    /// Currently selected chapter, 1-based
    pub fn current_chapter(&self) -> usize {
        self.current_chapter + 1
    }

    /// Table of contents, one line per chapter
    pub fn print_toc(&self) -> Vec<String> {
        self.chapters
            .iter()
            .enumerate()
            .map(|(i, c)| format!("Chapter {}. {}", i + 1, c.title))
            .collect()
    }
}

impl Playable for AudioBook {
    fn key(&self) -> ContentKey {
        ContentKey::new(ContentType::AudioBook, self.id.clone())
    }

    fn info(&self) -> String {
        format!(
            "{} Author: {} Narrator: {}",
            header(&self.id, &self.title, self.year, self.length),
            self.author,
            self.narrator
        )
    }

    fn play(&self, out: &mut dyn Console) {
        out.line(&self.info());
        if let Some(chapter) = self.chapters.get(self.current_chapter) {
            out.line(&format!("{}.", chapter.title));
            if !chapter.text.is_empty() {
                out.line(&chapter.text);
            }
        }
    }
}

/// Any audio content, as handed over by a content store
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum AudioContent {
    Song(Song),
    Podcast(Podcast),
    AudioBook(AudioBook),
}

impl AudioContent {
    fn inner(&self) -> &dyn Playable {
        match self {
            AudioContent::Song(song) => song,
            AudioContent::Podcast(podcast) => podcast,
            AudioContent::AudioBook(book) => book,
        }
    }

    pub fn id(&self) -> &ContentId {
        match self {
            AudioContent::Song(song) => &song.id,
            AudioContent::Podcast(podcast) => &podcast.id,
            AudioContent::AudioBook(book) => &book.id,
        }
    }

    pub fn content_type(&self) -> ContentType {
        match self {
            AudioContent::Song(_) => ContentType::Song,
            AudioContent::Podcast(_) => ContentType::Podcast,
            AudioContent::AudioBook(_) => ContentType::AudioBook,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            AudioContent::Song(song) => &song.title,
            AudioContent::Podcast(podcast) => &podcast.title,
            AudioContent::AudioBook(book) => &book.title,
        }
    }
}

impl Playable for AudioContent {
    fn key(&self) -> ContentKey {
        self.inner().key()
    }

    fn info(&self) -> String {
        self.inner().info()
    }

    fn play(&self, out: &mut dyn Console) {
        self.inner().play(out)
    }
}

impl PartialEq for AudioContent {
    fn eq(&self, other: &Self) -> bool {
        self.same_content(other)
    }
}

impl Eq for AudioContent {}

impl From<Song> for AudioContent {
    fn from(song: Song) -> Self {
        AudioContent::Song(song)
    }
}

impl From<Podcast> for AudioContent {
    fn from(podcast: Podcast) -> Self {
        AudioContent::Podcast(podcast)
    }
}

impl From<AudioBook> for AudioContent {
    fn from(book: AudioBook) -> Self {
        AudioContent::AudioBook(book)
    }
}
