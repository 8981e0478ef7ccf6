//! Playlist Integration Tests
//!
//! Tests for playlist creation, membership and playback through the library.

use audiolib::{
    AudioBook, Chapter, ContentType, Episode, Library, LibraryError, Playable, Podcast, Season,
    Song,
};

fn library() -> Library {
    let mut library = Library::new();
    library
        .download(Song::new("S001", "Hotel Meridian", "The Westerlies", 1976, 6).into())
        .unwrap();
    library
        .download(Song::new("S002", "Blue in Green", "Miles Ahead Quintet", 1959, 5).into())
        .unwrap();
    library
        .download(
            AudioBook::new("B001", "The Lighthouse Keeper", "Edith Marlowe", 1912, 540)
                .with_chapter(Chapter::new("The Storm", ""))
                .with_chapter(Chapter::new("The Wreck", ""))
                .with_chapter(Chapter::new("The Survivor", ""))
                .into(),
        )
        .unwrap();
    library
        .download(
            Podcast::new("P001", "Code Over Coffee", "Rina Park", 2019, 45)
                .with_season(Season::new(vec![
                    Episode::new("Why Ownership Matters", "", 41),
                    Episode::new("Borrowing Without Tears", "", 38),
                ]))
                .into(),
        )
        .unwrap();
    library
}

#[test]
fn test_make_playlist_twice() {
    let mut library = library();
    library.make_playlist("Favorites").unwrap();

    let result = library.make_playlist("Favorites");
    assert_eq!(
        result,
        Err(LibraryError::PlaylistAlreadyExists {
            title: "Favorites".to_string()
        })
    );
    assert_eq!(library.playlist_count(), 1);

    // Titles are case-sensitive
    library.make_playlist("favorites").unwrap();
    assert_eq!(library.playlist_count(), 2);
}

#[test]
fn test_favorites_scenario() {
    let mut library = Library::new();
    library
        .download(Song::new("S001", "Hotel Meridian", "The Westerlies", 1976, 6).into())
        .unwrap();
    library.make_playlist("Favorites").unwrap();
    library
        .add_content_to_playlist("SONG", 1, "Favorites")
        .unwrap();

    let mut out: Vec<String> = Vec::new();
    library.play_playlist_item("Favorites", 1, &mut out).unwrap();

    assert_eq!(out[0], "Favorites");
    assert_eq!(out[1], library.songs()[0].info());
}

#[test]
fn test_add_content_adds_exactly_one_occurrence() {
    let mut library = library();
    library.make_playlist("Mix").unwrap();
    let key = library.songs()[1].key();

    library.add_content_to_playlist("song", 2, "Mix").unwrap();
    let before = library.print_playlist("Mix").unwrap();
    assert_eq!(library.playlist("Mix").unwrap().count(&key), 1);

    library.add_content_to_playlist("Song", 2, "Mix").unwrap();
    let after = library.print_playlist("Mix").unwrap();
    assert_eq!(library.playlist("Mix").unwrap().count(&key), 2);
    assert_eq!(after.len(), before.len() + 1);

    let info = library.songs()[1].info();
    assert_eq!(after[1], format!("2. {}", info));
}

#[test]
fn test_add_content_errors() {
    let mut library = library();
    library.make_playlist("Mix").unwrap();

    assert_eq!(
        library.add_content_to_playlist("SONG", 3, "Mix"),
        Err(LibraryError::ContentNotFound(audiolib::Entity::Song))
    );
    assert_eq!(
        library.add_content_to_playlist("podcast", 0, "Mix"),
        Err(LibraryError::ContentNotFound(audiolib::Entity::Podcast))
    );
    assert_eq!(
        library.add_content_to_playlist("SONG", 1, "Nope"),
        Err(LibraryError::PlaylistNotFound {
            title: "Nope".to_string()
        })
    );
    assert!(library.playlist("Mix").unwrap().is_empty());
}

#[test]
fn test_playlist_not_found() {
    let mut library = library();
    let mut out: Vec<String> = Vec::new();
    let missing = LibraryError::PlaylistNotFound {
        title: "Ghost".to_string(),
    };

    assert_eq!(library.print_playlist("Ghost"), Err(missing.clone()));
    assert_eq!(library.play_playlist("Ghost", &mut out), Err(missing.clone()));
    assert_eq!(
        library.play_playlist_item("Ghost", 1, &mut out),
        Err(missing.clone())
    );
    assert_eq!(library.del_content_from_playlist(1, "Ghost"), Err(missing));
    assert!(out.is_empty());
}

#[test]
fn test_play_playlist_item_invalid_index() {
    let mut library = library();
    library.make_playlist("Mix").unwrap();
    library.add_content_to_playlist("song", 1, "Mix").unwrap();
    let mut out: Vec<String> = Vec::new();

    for index in [0, 2] {
        assert_eq!(
            library.play_playlist_item("Mix", index, &mut out),
            Err(LibraryError::InvalidPlaylistIndex { index })
        );
    }
    // Title is only written for a valid entry
    assert!(out.is_empty());
}

#[test]
fn test_playlist_audiobook_restarts_at_chapter_one() {
    let mut library = library();
    let mut out: Vec<String> = Vec::new();
    library.play_audiobook(1, 3, &mut out).unwrap();
    assert_eq!(library.audiobooks()[0].current_chapter(), 3);

    library.make_playlist("Books").unwrap();
    library
        .add_content_to_playlist("AUDIOBOOK", 1, "Books")
        .unwrap();

    out.clear();
    library.play_playlist_item("Books", 1, &mut out).unwrap();

    assert_eq!(library.audiobooks()[0].current_chapter(), 1);
    assert_eq!(out[0], "Books");
    assert_eq!(out[2], "The Storm.");
}

#[test]
fn test_play_whole_playlist_in_order() {
    let mut library = library();
    library.make_playlist("Mix").unwrap();
    library.add_content_to_playlist("song", 2, "Mix").unwrap();
    library.add_content_to_playlist("podcast", 1, "Mix").unwrap();
    library.add_content_to_playlist("song", 1, "Mix").unwrap();

    let mut out: Vec<String> = Vec::new();
    library.play_playlist("Mix", &mut out).unwrap();

    let songs = library.songs();
    let podcast_info = library.podcasts()[0].info();
    assert_eq!(out[0], songs[1].info());
    assert_eq!(out[1], podcast_info);
    assert_eq!(out[2], "Season: 1 Episode: 1");
    assert_eq!(out.last().unwrap(), &songs[0].info());
}

#[test]
fn test_del_content_from_playlist() {
    let mut library = library();
    library.make_playlist("Mix").unwrap();
    library.add_content_to_playlist("song", 1, "Mix").unwrap();
    library.add_content_to_playlist("audiobook", 1, "Mix").unwrap();

    assert_eq!(
        library.del_content_from_playlist(3, "Mix"),
        Err(LibraryError::ContentNotInPlaylist { index: 3 })
    );
    assert_eq!(
        library.del_content_from_playlist(0, "Mix"),
        Err(LibraryError::ContentNotInPlaylist { index: 0 })
    );

    let removed = library.del_content_from_playlist(1, "Mix").unwrap();
    assert_eq!(removed.content_type, ContentType::Song);

    let playlist = library.playlist("Mix").unwrap();
    assert_eq!(playlist.len(), 1);
    assert_eq!(playlist.get(1).unwrap().content_type, ContentType::AudioBook);

    // Content itself stays in the library
    assert_eq!(library.song_count(), 2);
}
