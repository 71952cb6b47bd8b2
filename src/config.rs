//! Session configuration for the player.
//!
//! Everything the playback engine needs is resolved up front into an
//! immutable [`SessionConfig`]: the cache folder, the external player
//! command template, the skip/count window and the behavior flags. The
//! API token is resolved separately (it may be given inline, as a path,
//! or read from the config file inside the cache folder) and never lives
//! in the session config.

use std::path::{Path, PathBuf};

use clap::{ArgAction, Args};

use crate::management::TokenManager;

/// Name of the token file inside the cache folder.
pub const CONFIG_FILE_NAME: &str = "config";

/// Placeholder argument replaced with the downloaded file path when the
/// player command is launched.
pub const PLAYER_PATH_SLOT: &str = "{}";

/// Immutable per-run configuration shared by reference across the whole
/// playback session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Root directory for the token file and the downloaded audio tree.
    pub cache_dir: PathBuf,
    /// External player argv; one `{}` element is replaced with the file
    /// path (appended when absent).
    pub player_cmd: Vec<String>,
    /// Print composite track ids in announcements.
    pub show_id: bool,
    /// Announce tracks inside the skip window instead of passing silently.
    pub show_skipped: bool,
    /// Treat a non-zero player exit code as normal.
    pub ignore_retcode: bool,
    /// Skip tracks whose resolved cache path would exceed `MAX_PATH`.
    pub skip_long_path: bool,
    /// Report played tracks back to the service for listening history.
    pub send_status: bool,
    /// Fetch and print Alice shots before tracks (auto "origin" feed only).
    pub alice: bool,
    /// Number of leading tracks to skip.
    pub skip: usize,
    /// Number of tracks to play after the skip window; `0` means all.
    pub count: usize,
}

/// Playback flags shared by every mode subcommand.
#[derive(Args, Debug, Clone)]
pub struct PlayOptions {
    /// YM API token as string or path to file
    #[clap(long, value_name = "TOKEN")]
    pub token: Option<String>,

    /// Don't save the token in the cache folder
    #[clap(long)]
    pub no_save_token: bool,

    /// Config and cached tracks folder
    #[clap(long, value_name = "DIR")]
    pub cache_folder: Option<PathBuf>,

    /// Player to use
    #[clap(long, value_name = "CMD")]
    pub audio_player: Option<String>,

    /// Args for --audio-player (can be specified multiple times)
    #[clap(long = "audio-player-arg", value_name = "ARG", action = ArgAction::Append)]
    pub audio_player_args: Vec<String>,

    /// Ignore audio player return code (default on Windows)
    #[clap(long, overrides_with = "no_ignore_retcode")]
    pub ignore_retcode: bool,
    #[clap(long, hide = true)]
    pub no_ignore_retcode: bool,

    /// Skip track if file path is over MAX_PATH (default on Windows)
    #[clap(long, overrides_with = "no_skip_long_path")]
    pub skip_long_path: bool,
    #[clap(long, hide = true)]
    pub no_skip_long_path: bool,

    /// Do not send playing status
    #[clap(long = "no-send-status")]
    pub no_send_status: bool,

    /// Skip first N tracks
    #[clap(long, short = 's', value_name = "N", default_value_t = 0)]
    pub skip: usize,

    /// Take only first N tracks (after skipped)
    #[clap(long, short = 'c', value_name = "N", default_value_t = 0)]
    pub count: usize,

    /// Show skipped tracks
    #[clap(long)]
    pub show_skipped: bool,

    /// Randomize tracks order
    #[clap(long)]
    pub shuffle: bool,

    /// Reverse tracks order
    #[clap(long, short = 'r')]
    pub reverse: bool,

    /// Show track ids
    #[clap(long)]
    pub show_id: bool,

    /// Only show tracks, don't play anything
    #[clap(long, short = 'l')]
    pub list: bool,

    /// Print comma separated track id list and exit
    #[clap(long)]
    pub export_list: bool,

    /// Like all tracks in list
    #[clap(long)]
    pub batch_like: bool,

    /// Remove like from all tracks in list
    #[clap(long)]
    pub batch_remove_like: bool,
}

impl PlayOptions {
    pub fn cache_dir(&self) -> PathBuf {
        self.cache_folder.clone().unwrap_or_else(default_cache_dir)
    }

    /// Resolves the flag pairs and the player template into the immutable
    /// session config. `alice` is only ever turned on by the auto mode.
    pub fn session_config(&self, alice: bool) -> SessionConfig {
        SessionConfig {
            cache_dir: self.cache_dir(),
            player_cmd: self.player_cmd(),
            show_id: self.show_id,
            show_skipped: self.show_skipped,
            ignore_retcode: resolve_platform_flag(self.ignore_retcode, self.no_ignore_retcode),
            skip_long_path: resolve_platform_flag(self.skip_long_path, self.no_skip_long_path),
            send_status: !self.no_send_status,
            alice,
            skip: self.skip,
            count: self.count,
        }
    }

    fn player_cmd(&self) -> Vec<String> {
        match &self.audio_player {
            Some(player) => {
                let mut cmd = vec![player.clone()];
                cmd.extend(self.audio_player_args.iter().cloned());
                cmd
            }
            None if self.audio_player_args.is_empty() => default_player_cmd(),
            None => {
                let mut cmd = default_player_cmd();
                cmd.truncate(1);
                cmd.extend(self.audio_player_args.iter().cloned());
                cmd
            }
        }
    }
}

fn resolve_platform_flag(on: bool, off: bool) -> bool {
    if off {
        false
    } else {
        on || cfg!(windows)
    }
}

/// Platform-specific default cache folder, e.g.
/// `~/.local/share/termym` on Linux.
pub fn default_cache_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("termym");
    path
}

/// Default external player: VLC in dummy-interface, play-and-exit mode.
pub fn default_player_cmd() -> Vec<String> {
    let player = if cfg!(windows) {
        "D:\\Program Files\\VideoLAN\\VLC\\vlc.exe"
    } else {
        "vlc"
    };
    vec![
        player.to_string(),
        "-I".to_string(),
        "dummy".to_string(),
        "--play-and-exit".to_string(),
        "--quiet".to_string(),
        PLAYER_PATH_SLOT.to_string(),
    ]
}

/// A raw OAuth token is 39 word characters; anything else passed via
/// `--token` is treated as a path to a file containing one.
pub fn looks_like_token(value: &str) -> bool {
    value.len() == 39
        && value
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Resolves the API token from the `--token` argument or the config file
/// in the cache folder. Inline tokens are persisted for future runs
/// unless `no_save` is set.
pub async fn resolve_token(
    arg: Option<String>,
    cache_dir: &Path,
    no_save: bool,
) -> Result<String, String> {
    match arg {
        Some(value) if looks_like_token(&value) => {
            if !no_save {
                TokenManager::new(value.clone(), cache_dir).persist().await?;
            }
            Ok(value)
        }
        Some(path) => TokenManager::load_from(Path::new(&path))
            .await
            .map(|manager| manager.token().to_string())
            .map_err(|_| String::from("Config file not found. Use --token to create it.")),
        None => TokenManager::load(cache_dir)
            .await
            .map(|manager| manager.token().to_string())
            .map_err(|_| String::from("Config file not found. Use --token to create it.")),
    }
}
