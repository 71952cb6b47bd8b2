use crate::config::PlayOptions;
use crate::error;
use crate::types::TrackHandle;
use crate::yandex::{describe_chain, retry};

/// Composite ids of the auto-generated personal playlists the service
/// keeps at stable addresses. Landing-page discovery of other feeds is
/// deliberately out of scope.
const WELL_KNOWN_FEEDS: [(&str, &str); 6] = [
    ("playlistOfTheDay", "503646255:26954868"),
    ("origin", "940441070:17870614"),
    ("neverHeard", "692528232:114169885"),
    ("recentTracks", "692529388:111791060"),
    ("missedLikes", "460141773:108134812"),
    ("kinopoisk", "1087766963:2441326"),
];

pub async fn auto(name: Option<String>, no_alice: bool, options: PlayOptions) {
    let name = name.unwrap_or_else(|| {
        println!("playlist_name is not set. Assuming \"playlistOfTheDay\".");
        String::from("playlistOfTheDay")
    });

    let feed_id = match WELL_KNOWN_FEEDS.iter().find(|(feed, _)| *feed == name) {
        Some((_, id)) => id,
        None => {
            let known: Vec<&str> = WELL_KNOWN_FEEDS.iter().map(|(feed, _)| *feed).collect();
            error!("auto playlist \"{name}\" not found. Known feeds: {known:?}");
        }
    };
    let (owner, kind) = match feed_id.split_once(':') {
        Some(parts) => parts,
        None => error!("malformed feed id {feed_id}"),
    };

    let client = super::connect(&options).await;

    let playlist = match retry(|| client.users_playlist(kind, Some(owner))).await {
        Ok(playlist) => playlist,
        Err(err) => error!("{}", describe_chain(&err)),
    };

    let total = playlist.track_count.unwrap_or(playlist.tracks.len());
    super::show_playing_playlist(&playlist, total);

    let handles: Vec<TrackHandle> = playlist
        .tracks
        .into_iter()
        .map(TrackHandle::Short)
        .collect();

    // Alice shots only exist in the "origin" feed context.
    let alice = name == "origin" && !no_alice;
    super::run_with_tracks(&client, &options, alice, total, handles).await;
}
