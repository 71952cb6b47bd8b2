use std::path::PathBuf;

use termym::management::TrackCache;
use termym::types::{Album, Artist, Track, TrackPosition};
use termym::utils::*;

// Helper to build a track with the fields the cache path depends on
fn create_test_track(id: &str, title: &str) -> Track {
    Track {
        id: id.to_string(),
        real_id: None,
        title: title.to_string(),
        version: None,
        track_type: None,
        duration_ms: Some(253_000),
        artists: vec![Artist {
            id: "79215".to_string(),
            name: "Queen".to_string(),
        }],
        albums: vec![create_test_album("294709", "A Night at the Opera", 1975)],
        lyrics_available: None,
        short_description: None,
        file_size: None,
        meta_data: None,
    }
}

fn create_test_album(id: &str, title: &str, year: i32) -> Album {
    Album {
        id: id.to_string(),
        title: title.to_string(),
        version: None,
        year: Some(year),
        release_date: None,
        original_release_year: None,
        track_position: Some(TrackPosition {
            volume: 1,
            index: 11,
        }),
        artists: Vec::new(),
        duration_ms: None,
        track_count: None,
        volumes: None,
    }
}

#[test]
fn test_slugify_passes_clean_names_through() {
    assert_eq!(slugify("A Night at the Opera"), "A Night at the Opera");
}

#[test]
fn test_slugify_replaces_reserved_characters() {
    let slug = slugify("AC/DC: \"Back<in>Black\"?|*\\");

    // None of the path-hostile characters may survive
    for forbidden in ['/', ':', '"', '<', '>', '?', '|', '*', '\\'] {
        assert!(!slug.contains(forbidden), "found {forbidden:?} in {slug:?}");
    }
    assert_eq!(slug, "AC_DC_ _Back_in_Black_____");
}

#[test]
fn test_slugify_strips_control_characters() {
    let slug = slugify("bad\x00name\x1fwith\x7fcontrols");
    assert!(slug.chars().all(|c| c > '\u{1F}' && c != '\u{7F}'));
    assert_eq!(slug, "bad_name_with_controls");
}

#[test]
fn test_slugify_collapses_whitespace() {
    assert_eq!(slugify("  too   much\t\twhitespace \n here  "), "too much whitespace here");
}

#[test]
fn test_slugify_normalizes_to_composed_form() {
    // e followed by a combining acute accent becomes a single é
    let decomposed = "Beyonce\u{301}";
    assert_eq!(slugify(decomposed), "Beyoncé");
}

#[test]
fn test_slugify_prefixes_reserved_device_names() {
    assert_eq!(slugify("CON"), "_CON");
    assert_eq!(slugify("con.mp3"), "_con.mp3");
    assert_eq!(slugify("Lpt7"), "_Lpt7");
    assert_eq!(slugify("NUL.tar.gz"), "_NUL.tar.gz");

    // Near misses keep their names
    assert_eq!(slugify("CONCERT"), "CONCERT");
    assert_eq!(slugify("COM10"), "COM10");
}

#[test]
fn test_duration_str_formats() {
    assert_eq!(duration_str(Some(253_000)), "4:13");
    assert_eq!(duration_str(Some(9_000)), "0:09");
    assert_eq!(duration_str(Some(3_661_000)), "1:01:01");
    // exactly one hour stays in minute form, matching the service UI
    assert_eq!(duration_str(Some(3_600_000)), "60:00");
    assert_eq!(duration_str(Some(0)), "-:--");
    assert_eq!(duration_str(None), "-:--");
}

#[test]
fn test_plural() {
    assert_eq!(plural(0), "s");
    assert_eq!(plural(1), "");
    assert_eq!(plural(2), "s");
}

#[test]
fn test_generate_play_id_shape() {
    let play_id = generate_play_id();
    let parts: Vec<&str> = play_id.split('-').collect();
    assert_eq!(parts.len(), 3);
    for part in parts {
        let value: u32 = part.parse().expect("numeric segment");
        assert!(value < 1000);
    }
}

#[test]
fn test_cache_path_layout() {
    let cache = TrackCache::new(PathBuf::from("/cache"), false);
    let track = create_test_track("42", "Love of My Life");

    let path = cache.path_for(&track);
    assert_eq!(
        path,
        PathBuf::from("/cache/Queen_79215/1975_A Night at the Opera_294709/1-11_Love of My Life_42.mp3")
    );
}

#[test]
fn test_cache_path_is_deterministic() {
    let cache = TrackCache::new(PathBuf::from("/cache"), false);
    let mut track = create_test_track("42", "Love of My Life");

    let first = cache.path_for(&track);

    // Permuting unrelated fields must not move the file
    track.duration_ms = Some(1);
    track.lyrics_available = Some(true);
    track.short_description = Some("a song".to_string());
    let second = cache.path_for(&track);

    assert_eq!(first, second);
}

#[test]
fn test_cache_path_synthetic_artist_and_album() {
    let cache = TrackCache::new(PathBuf::from("/cache"), false);
    let mut track = create_test_track("42", "Interlude");
    track.artists.clear();
    track.albums.clear();
    track.track_type = Some("podcast-episode".to_string());

    let path = cache.path_for(&track);
    assert_eq!(
        path,
        PathBuf::from("/cache/#_podcast-episode_0/__0/_Interlude_42.mp3")
    );
}

#[test]
fn test_cache_path_uses_earliest_year() {
    let cache = TrackCache::new(PathBuf::from("/cache"), false);
    let mut track = create_test_track("42", "Love of My Life");
    track.albums[0].year = Some(2011);
    track.albums[0].release_date = Some("1993-06-01T00:00:00+03:00".to_string());
    track.albums[0].original_release_year = Some(1975);

    let path = cache.path_for(&track);
    let album_dir = path
        .parent()
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str())
        .expect("album dir");
    assert!(album_dir.starts_with("1975_"), "got {album_dir:?}");
}

#[test]
fn test_cache_path_version_suffixes() {
    let cache = TrackCache::new(PathBuf::from("/cache"), false);
    let mut track = create_test_track("42", "Love of My Life");
    track.version = Some("Remastered 2011".to_string());
    track.albums[0].version = Some("Deluxe Edition".to_string());

    let path = cache.path_for(&track);
    assert_eq!(
        path,
        PathBuf::from(
            "/cache/Queen_79215/1975_A Night at the Opera (Deluxe Edition)_294709/1-11_Love of My Life (Remastered 2011)_42.mp3"
        )
    );

    // whitespace-only versions are ignored
    track.version = Some("   ".to_string());
    track.albums[0].version = Some(" ".to_string());
    let path = cache.path_for(&track);
    assert!(!path.to_string_lossy().contains('('));
}

#[test]
fn test_album_earliest_year_defaults_to_sentinel() {
    let mut album = create_test_album("1", "Untitled", 2020);
    album.year = None;
    assert_eq!(album.earliest_year(), 9999);
}
