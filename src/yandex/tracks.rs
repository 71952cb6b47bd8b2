use std::path::Path;

use md5::{Digest, Md5};

use crate::types::{Album, DownloadInfo, DownloadKey, Supplement, Track};
use crate::yandex::{ApiError, YandexClient};

/// Salt mixed into the md5 signature of the direct download link.
const SIGN_SALT: &str = "XGRlBW9FXlekgbPrRHuSiA";

impl YandexClient {
    /// Materializes full track objects for a batch of ids (bare or
    /// `track:album` composite).
    pub async fn tracks(&self, track_ids: &[String]) -> Result<Vec<Track>, ApiError> {
        self.post_form("/tracks", &[("track-ids", track_ids.join(","))])
            .await
    }

    /// Lyrics and editorial description for one track.
    pub async fn track_supplement(&self, track_id: &str) -> Result<Supplement, ApiError> {
        self.get(&format!("/tracks/{track_id}/supplement"), &[])
            .await
    }

    /// Album metadata together with its track volumes.
    pub async fn album_with_tracks(&self, album_id: &str) -> Result<Album, ApiError> {
        self.get(&format!("/albums/{album_id}/with-tracks"), &[])
            .await
    }

    /// Downloads a track's audio into `destination`.
    ///
    /// Three round trips: the download-info list (pick the best mp3
    /// variant), the XML download key from the storage host, then the
    /// signed direct link for the bytes themselves. The bytes are written
    /// verbatim; the caller owns placement and cache policy.
    pub async fn download_track(&self, track: &Track, destination: &Path) -> Result<(), ApiError> {
        let infos: Vec<DownloadInfo> = self
            .get(&format!("/tracks/{}/download-info", track.id), &[])
            .await?;
        let best = infos
            .iter()
            .filter(|info| info.codec == "mp3")
            .max_by_key(|info| info.bitrate_in_kbps)
            .ok_or_else(|| ApiError::Api {
                name: String::from("no-download-info"),
                message: format!("no mp3 variant offered for track {}", track.id),
            })?;

        let key = self.fetch_download_key(&best.download_info_url).await?;
        let url = direct_link(&key);

        let bytes = self.get_raw(&url).await?.bytes().await?;
        async_fs::write(destination, &bytes).await?;
        Ok(())
    }

    async fn fetch_download_key(&self, info_url: &str) -> Result<DownloadKey, ApiError> {
        let xml = self.get_raw(info_url).await?.text().await?;
        quick_xml::de::from_str(&xml).map_err(|err| ApiError::BadResponse {
            context: err.to_string(),
            payload: xml,
        })
    }
}

fn direct_link(key: &DownloadKey) -> String {
    let mut hasher = Md5::new();
    hasher.update(SIGN_SALT.as_bytes());
    hasher.update(key.path.strip_prefix('/').unwrap_or(&key.path).as_bytes());
    hasher.update(key.s.as_bytes());
    let sign = hasher.finalize();
    format!("https://{}/get-mp3/{sign:x}/{}{}", key.host, key.ts, key.path)
}
