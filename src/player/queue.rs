use crate::config::SessionConfig;
use crate::management::TrackCache;
use crate::player::session::{announce_track, resolve_track};
use crate::player::{CommandReader, PlayerError, SessionOutcome, play_track};
use crate::types::TrackHandle;
use crate::warning;
use crate::yandex::YandexClient;
use crate::yandex::status::ORIGIN_PLAYLIST_ID;

/// Where a 1-based queue position falls relative to the configured
/// skip/count window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    /// Inside the leading skip window: announce at most, never play.
    Skipped,
    /// Inside the playable window.
    Play,
    /// Past the count limit: the run is over.
    Done,
}

pub fn window_state(position: usize, skip: usize, count: usize) -> Window {
    if position <= skip {
        Window::Skipped
    } else if count > 0 && position > skip + count {
        Window::Done
    } else {
        Window::Play
    }
}

/// Plays the resolved queue in order, one interactive session per track.
///
/// Applies the skip/count window, fetches Alice shots when enabled,
/// reports played tracks back to the service (failures there are logged,
/// never fatal) and aggregates per-track player failures into warnings.
/// Returns early with `Ok` on a user quit, with `Err` only for failures
/// that would doom every remaining track as well.
pub async fn run_loop(
    client: &YandexClient,
    config: &SessionConfig,
    total: usize,
    tracks: &[TrackHandle],
) -> Result<(), PlayerError> {
    let cache = TrackCache::new(config.cache_dir.clone(), config.skip_long_path);
    let mut reader = CommandReader::new();

    for (index, handle) in tracks.iter().enumerate() {
        let position = index + 1;
        match window_state(position, config.skip, config.count) {
            Window::Skipped => {
                if config.show_skipped {
                    match resolve_track(client, handle).await {
                        Ok(Some(track)) => {
                            announce_track(position, total, &track, config.show_id)
                        }
                        Ok(None) => {}
                        Err(err) => return Err(PlayerError::Unauthorized(err)),
                    }
                }
                continue;
            }
            Window::Done => break,
            Window::Play => {}
        }

        if config.alice {
            show_alice_shot(client, handle).await;
        }

        let outcome = play_track(client, &cache, &mut reader, config, handle, position, total).await;
        match outcome {
            Ok(SessionOutcome::Quit) => {
                println!("Goodbye.");
                return Ok(());
            }
            Ok(SessionOutcome::NotPlayed) => {}
            Ok(SessionOutcome::Played(track)) => {
                if config.send_status {
                    if let Err(err) = client.play_audio(&track).await {
                        warning!("play status not sent: {err}");
                    }
                }
            }
            Err(PlayerError::ExitCode(status)) => {
                warning!("player exited with {status}");
            }
            Err(PlayerError::Process(err)) => {
                warning!("player process failure: {err}");
            }
            Err(fatal) => return Err(fatal),
        }
    }

    Ok(())
}

/// Announce-only rendition of the queue for `--list` mode. Plain
/// synchronous code with no downloads and no player; lazy references
/// that carry no embedded track are shown by id.
pub fn list_tracks(config: &SessionConfig, total: usize, tracks: &[TrackHandle]) {
    for (index, handle) in tracks.iter().enumerate() {
        let position = index + 1;
        match window_state(position, config.skip, config.count) {
            Window::Skipped => continue,
            Window::Done => break,
            Window::Play => {}
        }
        match handle.embedded() {
            Some(track) => announce_track(position, total, track, config.show_id),
            None => println!("{position:>2}/{total}: {}", handle.track_id()),
        }
    }
}

/// Prints the Alice shot that follows `handle` in the origin feed, when
/// the service has one. Best-effort: failures only warn.
async fn show_alice_shot(client: &YandexClient, handle: &TrackHandle) {
    let event = match client.after_track(&handle.track_id(), ORIGIN_PLAYLIST_ID).await {
        Ok(event) => event,
        Err(err) => {
            warning!("Can't fetch after-track: {err}");
            return;
        }
    };
    for shot in &event.shots {
        if shot.status != "ready" || shot.shot_data.shot_type.id != "alice" {
            continue;
        }
        println!(
            "{} {}",
            event.event_id.as_deref().unwrap_or("-"),
            shot.shot_data.shot_text
        );
    }
}
