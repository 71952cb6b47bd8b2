use std::error::Error;
use std::fmt;
use std::io;
use std::path::Path;
use std::process::ExitStatus;

use crate::config::SessionConfig;
use crate::management::TrackCache;
use crate::player::{CommandReader, PlayerCommand, PlayerProcess};
use crate::types::{Track, TrackHandle};
use crate::utils::{duration_str, show_attributes};
use crate::warning;
use crate::yandex::{ApiError, YandexClient, retry};

/// How one track's session ended, as seen by the session loop.
pub enum SessionOutcome {
    /// The player ran; the resolved track is carried for status reporting.
    Played(Box<Track>),
    /// Download failed or was skipped before playback; nothing to report.
    NotPlayed,
    /// The user ended the whole run (exit command or interrupt).
    Quit,
}

/// Session failures. `ExitCode` and `Process` abandon one track; the
/// other two doom the rest of the run and stop it.
#[derive(Debug)]
pub enum PlayerError {
    /// The player executable could not be launched at all.
    Spawn(io::Error),
    /// Waiting on or terminating the player failed.
    Process(io::Error),
    /// The player exited non-zero and exit codes are not ignored.
    ExitCode(ExitStatus),
    /// Credentials were rejected while talking to the service.
    Unauthorized(ApiError),
}

impl fmt::Display for PlayerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerError::Spawn(err) => write!(f, "cannot launch audio player: {err}"),
            PlayerError::Process(err) => write!(f, "audio player process failure: {err}"),
            PlayerError::ExitCode(status) => {
                write!(f, "audio player returned non-zero exit status: {status}")
            }
            PlayerError::Unauthorized(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PlayerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PlayerError::Spawn(err) | PlayerError::Process(err) => Some(err),
            PlayerError::Unauthorized(err) => Some(err),
            PlayerError::ExitCode(_) => None,
        }
    }
}

#[derive(Clone, Copy)]
enum Ending {
    Exited(ExitStatus),
    Skipped,
    Quit,
}

/// Runs the interactive session for one track: announce, download,
/// play, and race the player's exit against user commands.
///
/// The race is biased: when the player exits in the same scheduling
/// pass that also completed an input read, the exit wins and the input
/// stays pending for the next track. Cleanup is unconditional: whatever
/// ends the session, a still-running player is terminated and reaped
/// before this function returns.
pub async fn play_track(
    client: &YandexClient,
    cache: &TrackCache,
    reader: &mut CommandReader,
    config: &SessionConfig,
    handle: &TrackHandle,
    position: usize,
    total: usize,
) -> Result<SessionOutcome, PlayerError> {
    let track = match resolve_track(client, handle).await {
        Ok(Some(track)) => track,
        Ok(None) => return Ok(SessionOutcome::NotPlayed),
        Err(err) => return Err(PlayerError::Unauthorized(err)),
    };
    announce_track(position, total, &track, config.show_id);

    let file_path = match cache.ensure_local(client, &track).await {
        Ok(Some(path)) => path,
        Ok(None) => return Ok(SessionOutcome::NotPlayed),
        Err(err) => return Err(PlayerError::Unauthorized(err)),
    };

    let mut player = PlayerProcess::spawn(&config.player_cmd, &file_path, config.skip_long_path)
        .map_err(PlayerError::Spawn)?;

    let mut liked = false;
    let mut input_open = !reader.is_closed();
    let ending = loop {
        tokio::select! {
            biased;
            status = player.wait() => {
                break Ending::Exited(status.map_err(PlayerError::Process)?);
            }
            _ = tokio::signal::ctrl_c() => {
                break Ending::Quit;
            }
            line = reader.read_line(), if input_open => {
                match line {
                    Err(err) => {
                        warning!("input closed: {err}");
                        input_open = false;
                    }
                    Ok(line) => match PlayerCommand::parse(&line) {
                        PlayerCommand::Skip => break Ending::Skipped,
                        PlayerCommand::Exit => break Ending::Quit,
                        command => {
                            dispatch_command(command, client, &track, &file_path, &mut liked, reader)
                                .await;
                        }
                    },
                }
            }
        }
    };

    let (status, forced) = match ending {
        Ending::Exited(status) => (status, false),
        Ending::Skipped | Ending::Quit => {
            player.ensure_stopped().await.map_err(PlayerError::Process)?
        }
    };
    if !forced && !config.ignore_retcode && !status.success() {
        return Err(PlayerError::ExitCode(status));
    }

    match ending {
        Ending::Quit => Ok(SessionOutcome::Quit),
        Ending::Exited(_) | Ending::Skipped => Ok(SessionOutcome::Played(track)),
    }
}

/// Materializes a short track reference, announcing id mismatches and
/// attached free-form metadata the way the service sometimes flags
/// remastered uploads. `Ok(None)` means the track could not be resolved
/// and should be skipped.
pub(crate) async fn resolve_track(
    client: &YandexClient,
    handle: &TrackHandle,
) -> Result<Option<Box<Track>>, ApiError> {
    let track: Box<Track> = match handle.embedded() {
        Some(track) => Box::new(track.clone()),
        None => {
            let id = handle.track_id();
            let ids = vec![id.clone()];
            let fetched = match retry(|| client.tracks(&ids)).await {
                Ok(tracks) => tracks,
                Err(err @ ApiError::Unauthorized(_)) => return Err(err),
                Err(err) => {
                    warning!("can't resolve track {id}: {err}");
                    return Ok(None);
                }
            };
            match fetched.into_iter().next() {
                Some(track) => Box::new(track),
                None => {
                    warning!("track {id} not found");
                    return Ok(None);
                }
            }
        }
    };

    if let Some(real_id) = &track.real_id {
        if *real_id != track.id {
            println!("track.id ({}) != track.real_id ({real_id})", track.id);
        }
    }
    if let Some(meta) = &track.meta_data {
        show_attributes(meta);
    }
    Ok(Some(track))
}

/// Now-playing line: position, optional id, non-music type tag, artists
/// joined by `|`, bracketed albums, title and duration.
pub(crate) fn announce_track(position: usize, total: usize, track: &Track, show_id: bool) {
    let id_part = if show_id {
        format!("{:<18} ", track.track_id())
    } else {
        String::new()
    };
    let type_part = match &track.track_type {
        Some(kind) if kind != "music" && kind != "podcast-episode" => format!("({kind}) "),
        _ => String::new(),
    };
    let artists = track.artist_names().join("|");
    let albums = track
        .albums
        .iter()
        .map(|album| album.display_title())
        .collect::<Vec<_>>()
        .join("|");
    println!(
        "{position:>2}/{total}: {id_part}{type_part}{artists} [{albums}] ~ {title} {duration}",
        title = track.full_title(),
        duration = duration_str(track.duration_ms),
    );
    if let Some(description) = &track.short_description {
        println!("{description}");
    }
}

async fn dispatch_command(
    command: PlayerCommand,
    client: &YandexClient,
    track: &Track,
    file_path: &Path,
    liked: &mut bool,
    reader: &mut CommandReader,
) {
    match command {
        PlayerCommand::ShowId => println!("id {}", track.track_id()),
        PlayerCommand::Pause => {
            println!("pause after this track. Press Enter to continue...");
            let _ = reader.read_line().await;
        }
        PlayerCommand::Like => {
            if *liked {
                println!("already liked");
            } else {
                match client.likes_add(&track.track_id()).await {
                    Ok(()) => {
                        println!("liked");
                        *liked = true;
                    }
                    Err(err) => println!("like error: {err}"),
                }
            }
        }
        PlayerCommand::Text => show_lyrics(client, track).await,
        PlayerCommand::Link => {
            let album_part = track
                .albums
                .first()
                .map(|album| format!("/album/{}", album.id))
                .unwrap_or_default();
            println!("https://music.yandex.ru{album_part}/track/{}", track.id);
            println!("\"{}\"", file_path.display());
        }
        PlayerCommand::Dump => show_attributes(track),
        PlayerCommand::Help => println!("{}", PlayerCommand::help()),
        PlayerCommand::Unknown(token) => {
            println!("Unknown command: {token}");
            println!("{}", PlayerCommand::help());
        }
        // handled by the race loop before dispatch
        PlayerCommand::Nop | PlayerCommand::Skip | PlayerCommand::Exit => {}
    }
}

async fn show_lyrics(client: &YandexClient, track: &Track) {
    let supplement = match client.track_supplement(&track.id).await {
        Ok(supplement) => supplement,
        Err(err) => {
            println!("can't fetch lyrics: {err}");
            return;
        }
    };
    if let Some(description) = &supplement.description {
        println!("{description}");
    }
    match supplement.lyrics {
        None => {
            println!("no lyrics");
            if track.lyrics_available == Some(true) {
                warning!("track reports lyrics available, but the supplement has none");
            }
        }
        Some(lyrics) => {
            if lyrics.has_rights == Some(false) {
                println!("lyrics.has_rights: false");
            }
            println!(
                "id: {} lang: {} show_translation: {} url: {}\n",
                lyrics.id,
                lyrics.text_language.as_deref().unwrap_or("?"),
                lyrics
                    .show_translation
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| String::from("?")),
                lyrics.url.as_deref().unwrap_or("-"),
            );
            println!("{}", lyrics.full_lyrics);
        }
    }
}
