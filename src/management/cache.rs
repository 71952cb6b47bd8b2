use std::path::PathBuf;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::types::Track;
use crate::utils::slugify;
use crate::warning;
use crate::yandex::{ApiError, YandexClient, retry};

/// Paths at or past this length are unplayable on strict platforms.
pub const MAX_PATH: usize = 260;

/// Anything shorter than this is a truncated leftover, not audio.
const MIN_CACHED_BYTES: u64 = 16;

/// On-disk audio cache: `root / artist / album / track.mp3`, with every
/// component derived deterministically from track metadata so replays
/// across runs reuse the same file.
pub struct TrackCache {
    root: PathBuf,
    skip_long_path: bool,
}

impl TrackCache {
    pub fn new(root: PathBuf, skip_long_path: bool) -> Self {
        Self {
            root,
            skip_long_path,
        }
    }

    /// Computes the cache path for a track. Pure: no filesystem access.
    ///
    /// Tracks without artists get a synthetic `#_<type>_0` artist folder;
    /// tracks without albums a synthetic empty album. The album folder
    /// carries the earliest known release year so an artist's discography
    /// sorts chronologically in a file browser.
    pub fn path_for(&self, track: &Track) -> PathBuf {
        let artist_dir = match track.artists.first() {
            Some(artist) => slugify(&format!("{}_{}", artist.name, artist.id)),
            None => {
                let kind = track.track_type.as_deref().unwrap_or("unknown");
                slugify(&format!("#_{kind}_0"))
            }
        };

        let album_dir = match track.albums.first() {
            Some(album) => slugify(&format!(
                "{}_{}{}_{}",
                album.earliest_year(),
                album.title,
                version_suffix(album.version.as_deref()),
                album.id
            )),
            None => String::from("__0"),
        };

        let track_pos = track
            .albums
            .first()
            .and_then(|album| album.track_position.as_ref())
            .map(|pos| format!("{}-{}", pos.volume, pos.index))
            .unwrap_or_default();
        let filename = slugify(&format!(
            "{}_{}{}_{}.mp3",
            track_pos,
            track.title,
            version_suffix(track.version.as_deref()),
            track.id
        ));

        self.root.join(artist_dir).join(album_dir).join(filename)
    }

    /// Makes sure the track's audio exists locally and returns its path.
    ///
    /// A present file of plausible size is a cache hit and costs no
    /// network access. A missing or truncated file is (re)downloaded
    /// through the retry wrapper. Returns `Ok(None)` when the track has
    /// to be abandoned (over-long path, exhausted retries) so the caller
    /// can move on; only rejected credentials surface as `Err` since they
    /// doom every later track too.
    pub async fn ensure_local(
        &self,
        client: &YandexClient,
        track: &Track,
    ) -> Result<Option<PathBuf>, ApiError> {
        let file_path = self.path_for(track);
        if self.skip_long_path && file_path.as_os_str().len() >= MAX_PATH {
            warning!("path is too long (MAX_PATH): {}", file_path.display());
            return Ok(None);
        }

        let existing_size = match async_fs::metadata(&file_path).await {
            Ok(metadata) => Some(metadata.len()),
            Err(_) => None,
        };
        if let Some(size) = existing_size {
            if size >= MIN_CACHED_BYTES {
                return Ok(Some(file_path));
            }
            if size > 0 {
                warning!("Overwriting {size} bytes ({})", file_path.display());
            }
        }

        if let Some(parent) = file_path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let spinner = download_spinner(&track.full_title());
        let result = retry(|| client.download_track(track, &file_path)).await;
        spinner.finish_and_clear();

        match result {
            Ok(()) => Ok(Some(file_path)),
            Err(err @ ApiError::Unauthorized(_)) => Err(err),
            Err(_) => {
                let real_id = match &track.real_id {
                    Some(real_id) if *real_id != track.id => format!(" real_id: {real_id}"),
                    _ => String::new(),
                };
                warning!(
                    "Error while downloading track_id: {}{real_id}",
                    track.track_id()
                );
                Ok(None)
            }
        }
    }
}

fn version_suffix(version: Option<&str>) -> String {
    match version {
        Some(version) if !version.trim().is_empty() => format!(" ({version})"),
        _ => String::new(),
    }
}

fn download_spinner(title: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Downloading {title}..."));
    pb.enable_steady_tick(Duration::from_millis(120));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
