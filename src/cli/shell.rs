//! Interactive command shell.
//!
//! Reads one command per line and runs it against a library and a content
//! store. Each line is parsed with clap, so `help` and `<command> --help` work
//! as they do on the command line. Failed commands are reported and the shell
//! keeps going.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, warn};

use crate::adapters::MemoryStore;
use crate::console::Console;
use crate::core::Library;
use crate::domain::{AudioContent, Genre, Playable};

/// A single shell line
#[derive(Parser, Debug)]
#[command(name = "audiolib", no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug)]
enum ShellCommand {
    /// List all content available in the store
    Store,

    /// List downloaded songs
    Songs,

    /// List downloaded audiobooks
    Books,

    /// List downloaded podcasts
    Podcasts,

    /// List the artists of downloaded songs
    Artists,

    /// List playlists
    Playlists,

    /// Download store items by index (a single item or an inclusive range)
    Download {
        from: usize,
        to: Option<usize>,
    },

    /// Download every song or audiobook by an artist or author
    DownloadArtist {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Download every song of a genre
    DownloadGenre { genre: Genre },

    /// Search the store by partial title or creator
    Search {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Play a downloaded song
    PlaySong { index: usize },

    /// Print an audiobook's table of contents
    BookToc { index: usize },

    /// Play an audiobook chapter
    PlayBook { index: usize, chapter: usize },

    /// Print the episodes of a podcast season
    PodToc { index: usize, season: usize },

    /// Play a podcast episode
    PlayPod {
        index: usize,
        season: usize,
        episode: usize,
    },

    /// Play a whole playlist, or one entry of it
    PlayPlaylist { title: String, index: Option<usize> },

    /// Print the contents of a playlist
    PrintPlaylist { title: String },

    /// Create an empty playlist
    MakePlaylist { title: String },

    /// Delete a playlist (its content stays downloaded)
    DeletePlaylist { title: String },

    /// Add downloaded content to a playlist
    AddToPlaylist {
        title: String,
        /// song, podcast or audiobook
        content_type: String,
        index: usize,
    },

    /// Remove an entry from a playlist
    DelFromPlaylist { title: String, index: usize },

    /// Delete a song from the library and from every playlist
    DelSong { index: usize },

    /// Delete a podcast from the library and from every playlist
    DelPodcast { index: usize },

    /// Delete an audiobook from the library and from every playlist
    DelBook { index: usize },

    /// Sort downloaded songs
    Sort {
        #[arg(value_enum)]
        by: SortKey,
    },

    /// Leave the shell
    #[command(visible_alias = "exit")]
    Quit,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortKey {
    Year,
    Name,
    Length,
}

/// Whether the shell should keep reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Split a line into words, keeping double-quoted text together
fn split_args(line: &str) -> Result<Vec<String>> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_word = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_word = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_word {
                    args.push(std::mem::take(&mut current));
                    has_word = false;
                }
            }
            c => {
                current.push(c);
                has_word = true;
            }
        }
    }

    if in_quotes {
        bail!("Unterminated quote");
    }
    if has_word {
        args.push(current);
    }

    Ok(args)
}

fn write_lines(out: &mut dyn Console, lines: &[String]) {
    for line in lines {
        out.line(line);
    }
}

/// Library plus the store it downloads from
pub struct Shell {
    library: Library,
    store: MemoryStore,
    prompt: Option<String>,
}

impl Shell {
    pub fn new(store: MemoryStore) -> Self {
        Self {
            library: Library::new(),
            store,
            prompt: None,
        }
    }

    /// Show a prompt on stdout before each line
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    fn show_prompt(&self) -> Result<()> {
        if let Some(prompt) = &self.prompt {
            print!("{}", prompt);
            io::stdout().flush().context("Failed to flush stdout")?;
        }
        Ok(())
    }

    /// Run commands until input ends or `quit`
    pub fn run<R: BufRead>(&mut self, input: R, out: &mut dyn Console) -> Result<()> {
        self.show_prompt()?;

        for line in input.lines() {
            let line = line.context("Failed to read command")?;

            match self.execute_line(&line, out) {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(e) => {
                    warn!(command = %line, "Command failed: {:#}", e);
                    out.line(&format!("Error: {}", e));
                }
            }

            self.show_prompt()?;
        }

        Ok(())
    }

    /// Parse and run a single line
    pub fn execute_line(&mut self, line: &str, out: &mut dyn Console) -> Result<Flow> {
        let args = split_args(line)?;
        if args.is_empty() {
            return Ok(Flow::Continue);
        }

        match ShellLine::try_parse_from(&args) {
            Ok(parsed) => self.dispatch(parsed.command, out),
            Err(e) => {
                // Covers both usage errors and `help`
                for text in e.to_string().lines() {
                    out.line(text);
                }
                Ok(Flow::Continue)
            }
        }
    }

    fn download(&mut self, content: AudioContent, out: &mut dyn Console) {
        let label = content.content_type().label();
        let title = content.title().to_string();

        match self.library.download(content) {
            Ok(()) => out.line(&format!("{} {} added to library", label, title)),
            Err(e) => out.line(&e.to_string()),
        }
    }

    fn dispatch(&mut self, command: ShellCommand, out: &mut dyn Console) -> Result<Flow> {
        debug!(?command, "Running command");

        match command {
            ShellCommand::Store => write_lines(out, &self.store.list()),
            ShellCommand::Songs => write_lines(out, &self.library.list_all_songs()),
            ShellCommand::Books => write_lines(out, &self.library.list_all_audiobooks()),
            ShellCommand::Podcasts => write_lines(out, &self.library.list_all_podcasts()),
            ShellCommand::Artists => write_lines(out, &self.library.list_all_artists()),
            ShellCommand::Playlists => write_lines(out, &self.library.list_all_playlists()),

            ShellCommand::Download { from, to } => {
                let to = to.unwrap_or(from);
                if from < 1 || to < from {
                    bail!("Invalid store range {}..{}", from, to);
                }
                for index in from..=to {
                    match self.store.get(index).cloned() {
                        Some(content) => self.download(content, out),
                        None => out.line(&format!("Store content #{} not found", index)),
                    }
                }
            }
            ShellCommand::DownloadArtist { name } => {
                let name = name.join(" ");
                let found = self.store.by_artist(&name);
                if found.is_empty() {
                    bail!("No content by {} in store", name);
                }
                for content in found {
                    self.download(content, out);
                }
            }
            ShellCommand::DownloadGenre { genre } => {
                let found = self.store.by_genre(genre);
                if found.is_empty() {
                    bail!("No {} songs in store", genre);
                }
                for content in found {
                    self.download(content, out);
                }
            }
            ShellCommand::Search { text } => {
                let text = text.join(" ");
                let results = self.library.search_partial_match(&self.store, &text);
                if results.is_empty() {
                    out.line(&format!("No matches for {}", text));
                }
                for (i, content) in results.iter().enumerate() {
                    out.line(&format!("{}. {}", i + 1, content.info()));
                }
            }

            ShellCommand::PlaySong { index } => self.library.play_song(index, out)?,
            ShellCommand::BookToc { index } => {
                write_lines(out, &self.library.print_audiobook_toc(index)?)
            }
            ShellCommand::PlayBook { index, chapter } => {
                self.library.play_audiobook(index, chapter, out)?
            }
            ShellCommand::PodToc { index, season } => {
                write_lines(out, &self.library.print_podcast_episodes(index, season)?)
            }
            ShellCommand::PlayPod {
                index,
                season,
                episode,
            } => self.library.play_podcast(index, season, episode, out)?,

            ShellCommand::PlayPlaylist { title, index } => match index {
                Some(index) => self.library.play_playlist_item(&title, index, out)?,
                None => self.library.play_playlist(&title, out)?,
            },
            ShellCommand::PrintPlaylist { title } => {
                write_lines(out, &self.library.print_playlist(&title)?)
            }
            ShellCommand::MakePlaylist { title } => self.library.make_playlist(&title)?,
            ShellCommand::DeletePlaylist { title } => {
                self.library.delete_playlist(&title)?;
            }
            ShellCommand::AddToPlaylist {
                title,
                content_type,
                index,
            } => self
                .library
                .add_content_to_playlist(&content_type, index, &title)?,
            ShellCommand::DelFromPlaylist { title, index } => {
                self.library.del_content_from_playlist(index, &title)?;
            }

            ShellCommand::DelSong { index } => {
                let song = self.library.delete_song(index)?;
                out.line(&format!("Deleted {}", song.title));
            }
            ShellCommand::DelPodcast { index } => {
                let podcast = self.library.delete_podcast(index)?;
                out.line(&format!("Deleted {}", podcast.title));
            }
            ShellCommand::DelBook { index } => {
                let book = self.library.delete_audiobook(index)?;
                out.line(&format!("Deleted {}", book.title));
            }

            ShellCommand::Sort { by } => match by {
                SortKey::Year => self.library.sort_songs_by_year(),
                SortKey::Name => self.library.sort_songs_by_name(),
                SortKey::Length => self.library.sort_songs_by_length(),
            },

            ShellCommand::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }
}
