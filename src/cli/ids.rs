use crate::config::PlayOptions;
use crate::error;
use crate::types::TrackHandle;
use crate::yandex::{describe_chain, retry};

/// Plays an explicit id list: bare numeric ids are tracks, `b…` prefixes
/// albums, `p…` prefixes playlists (`owner:kind` or bare kind).
pub async fn ids(list: String, options: PlayOptions) {
    let entries: Vec<&str> = list.split(',').filter(|entry| !entry.is_empty()).collect();
    if entries.is_empty() {
        error!("Specify comma (\",\") separated track id list");
    }

    let mut track_ids: Vec<String> = Vec::new();
    let mut album_ids: Vec<String> = Vec::new();
    let mut playlist_ids: Vec<String> = Vec::new();
    for entry in entries {
        match entry.chars().next() {
            Some(prefix) if prefix.is_ascii_digit() => track_ids.push(entry.to_string()),
            Some('b') => album_ids.push(entry[1..].to_string()),
            Some('p') => playlist_ids.push(entry[1..].to_string()),
            Some(prefix) => error!("Unknown prefix {prefix}"),
            None => {}
        }
    }

    let client = super::connect(&options).await;
    let mut handles: Vec<TrackHandle> = Vec::new();

    if !track_ids.is_empty() {
        let tracks = match retry(|| client.tracks(&track_ids)).await {
            Ok(tracks) => tracks,
            Err(err) => error!("{}", describe_chain(&err)),
        };
        handles.extend(
            tracks
                .into_iter()
                .map(|track| TrackHandle::Full(Box::new(track))),
        );
    }

    for album_id in &album_ids {
        let album = match retry(|| client.album_with_tracks(album_id)).await {
            Ok(album) => album,
            Err(err) => error!("{}", describe_chain(&err)),
        };
        let volumes = album.volumes.clone().unwrap_or_default();
        let album_tracks: Vec<TrackHandle> = volumes
            .into_iter()
            .flatten()
            .map(|track| TrackHandle::Full(Box::new(track)))
            .collect();
        super::show_playing_album(&album, album.track_count.unwrap_or(album_tracks.len()));
        handles.extend(album_tracks);
    }

    for playlist_id in &playlist_ids {
        let (owner, kind) = match playlist_id.split_once(':') {
            Some((owner, kind)) => (Some(owner), kind),
            None => (None, playlist_id.as_str()),
        };
        let playlist = match retry(|| client.users_playlist(kind, owner)).await {
            Ok(playlist) => playlist,
            Err(err) => error!("{}", describe_chain(&err)),
        };
        super::show_playing_playlist(&playlist, playlist.tracks.len());
        handles.extend(playlist.tracks.into_iter().map(TrackHandle::Short));
    }

    let total = handles.len();
    super::run_with_tracks(&client, &options, false, total, handles).await;
}
