//! # CLI Module
//!
//! User-facing playback modes, one per subcommand. Each mode resolves
//! its track source against the remote service (the liked-tracks
//! library, a named user playlist, a track search, a well-known
//! auto-generated feed, or an explicit id list) and hands the resolved
//! queue to the shared runner, which applies the list-wide options
//! (shuffle, reverse, export, batch likes) and then either lists the
//! queue or starts the interactive playback loop.
//!
//! Fatal conditions (missing config, rejected token, unresolvable
//! source) terminate through the `error!` macro; everything recoverable
//! is reported with `warning!` and the run keeps going.

mod auto;
mod ids;
mod likes;
mod playlist;
mod search;

pub use auto::auto;
pub use ids::ids;
pub use likes::likes;
pub use playlist::playlist;
pub use search::search;

use rand::seq::SliceRandom;

use crate::config::PlayOptions;
use crate::types::{Album, Playlist, TrackHandle};
use crate::utils::{duration_str, plural};
use crate::yandex::{YandexClient, describe_chain, retry};
use crate::{error, player, warning};

/// Builds the API client and verifies the credentials with a greeting.
/// Exits the process when the token cannot be resolved or is rejected.
pub(crate) async fn connect(options: &PlayOptions) -> YandexClient {
    let cache_dir = options.cache_dir();
    let token = match crate::config::resolve_token(
        options.token.clone(),
        &cache_dir,
        options.no_save_token,
    )
    .await
    {
        Ok(token) => token,
        Err(message) => error!("{message}"),
    };

    let client = match YandexClient::new(&token) {
        Ok(client) => client,
        Err(err) => error!("cannot build HTTP client: {err}"),
    };

    let status = match retry(|| client.account_status()).await {
        Ok(status) => status,
        Err(err) => error!("{}", describe_chain(&err)),
    };
    let account = status.account;
    println!("Hello, {}", account.first_name.as_deref().unwrap_or("stranger"));
    if let (Some(now), Some(birthday)) = (&account.now, &account.birthday) {
        if now.get(5..10).is_some() && now.get(5..10) == birthday.get(5..10) {
            println!("Happy birthday!");
        }
    }

    match client.permission_alerts().await {
        Ok(alerts) if !alerts.alerts.is_empty() => {
            println!("\n==================\nPERMISSION_ALERTS:");
            for alert in &alerts.alerts {
                println!("{alert}");
            }
            println!("==================");
        }
        Ok(_) => {}
        Err(err) => warning!("can't fetch permission alerts: {err}"),
    }

    client
}

/// Applies the list-wide options to a resolved queue and runs it.
pub(crate) async fn run_with_tracks(
    client: &YandexClient,
    options: &PlayOptions,
    alice: bool,
    total: usize,
    mut tracks: Vec<TrackHandle>,
) {
    if options.shuffle {
        tracks.shuffle(&mut rand::rng());
    }
    if options.reverse {
        tracks.reverse();
    }

    if options.export_list {
        let ids: Vec<String> = tracks.iter().map(|handle| handle.track_id()).collect();
        println!("{}", ids.join(","));
        return;
    }

    if options.batch_remove_like {
        let ids: Vec<String> = tracks.iter().map(|handle| handle.track_id()).collect();
        match client.likes_remove_multiple(&ids).await {
            Ok(()) => println!("removed likes"),
            Err(err) => warning!("batch unlike failed: {err}"),
        }
    }
    if options.batch_like {
        let ids: Vec<String> = tracks.iter().map(|handle| handle.track_id()).collect();
        match client.likes_add_multiple(&ids).await {
            Ok(()) => println!("liked"),
            Err(err) => warning!("batch like failed: {err}"),
        }
    }

    let config = options.session_config(alice);

    if options.list {
        player::list_tracks(&config, total, &tracks);
        return;
    }

    if let Err(err) = player::run_loop(client, &config, total, &tracks).await {
        error!("{}", describe_chain(&err));
    }
}

pub(crate) fn show_playing_playlist(playlist: &Playlist, total: usize) {
    let owner = playlist
        .owner
        .as_ref()
        .map(|owner| owner.login.as_str())
        .unwrap_or("?");
    let modified = playlist
        .modified
        .as_deref()
        .and_then(|stamp| stamp.split('T').next())
        .unwrap_or("???");
    println!(
        "Playing {} ({} {modified}) by {owner}. {total} track{} {}.",
        playlist.title,
        playlist.playlist_id(),
        plural(total),
        duration_str(playlist.duration_ms),
    );
    if let Some(description) = &playlist.description {
        println!("{description}");
    }
}

pub(crate) fn show_playing_album(album: &Album, total: usize) {
    let artists = album
        .artists
        .iter()
        .map(|artist| format!("{} ({})", artist.name, artist.id))
        .collect::<Vec<_>>()
        .join("|");
    println!(
        "Playing {} ({}) by {artists}. {total} track{} {}.",
        album.title,
        album.id,
        plural(total),
        duration_str(album.duration_ms),
    );
}
