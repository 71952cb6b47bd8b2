use crate::config::PlayOptions;
use crate::error;
use crate::types::TrackHandle;
use crate::yandex::{describe_chain, retry};

pub async fn playlist(name: Option<String>, options: PlayOptions) {
    let client = super::connect(&options).await;

    let playlists = match retry(|| client.users_playlists_list()).await {
        Ok(playlists) => playlists,
        Err(err) => error!("{}", describe_chain(&err)),
    };

    let found = name
        .as_deref()
        .and_then(|wanted| playlists.iter().find(|playlist| playlist.title == wanted));
    let found = match found {
        Some(playlist) => playlist,
        None => {
            let available: Vec<&str> = playlists
                .iter()
                .map(|playlist| playlist.title.as_str())
                .collect();
            match name {
                None => error!("Specify playlist_name. Available: {available:?}"),
                Some(wanted) => {
                    error!("Playlist \"{wanted}\" not found. Available: {available:?}")
                }
            }
        }
    };

    // the listing endpoint returns playlists without their tracks
    let playlist = if found.tracks.is_empty() {
        match retry(|| client.users_playlist(&found.kind, None)).await {
            Ok(playlist) => playlist,
            Err(err) => error!("{}", describe_chain(&err)),
        }
    } else {
        found.clone()
    };

    let total = playlist.track_count.unwrap_or(playlist.tracks.len());
    super::show_playing_playlist(&playlist, total);

    let handles: Vec<TrackHandle> = playlist
        .tracks
        .into_iter()
        .map(TrackHandle::Short)
        .collect();
    super::run_with_tracks(&client, &options, false, total, handles).await;
}
