use chrono::Utc;
use serde_json::Value;

use crate::types::{Track, TrackEvent};
use crate::utils::generate_play_id;
use crate::yandex::{ApiError, YandexClient};

/// Client name reported with play-status telemetry.
const PLAY_CLIENT: &str = "termym";

/// Composite id of the "origin" auto playlist, the only context Alice
/// shots are produced for.
pub const ORIGIN_PLAYLIST_ID: &str = "940441070:17870614";

impl YandexClient {
    /// Reports a completed playback for listening history and
    /// recommendations. The full track duration is reported as the
    /// played span with a freshly generated play-session id.
    pub async fn play_audio(&self, track: &Track) -> Result<(), ApiError> {
        let uid = self.require_uid()?.to_string();
        let played_seconds = (track.duration_ms.unwrap_or(0) / 1000).to_string();
        let album_id = track
            .albums
            .first()
            .map(|album| album.id.clone())
            .unwrap_or_else(|| String::from("0"));
        let now = Utc::now().format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string();

        let _: Value = self
            .post_form(
                "/play-audio",
                &[
                    ("track-id", track.id.clone()),
                    ("from", PLAY_CLIENT.to_string()),
                    ("album-id", album_id),
                    ("uid", uid),
                    ("play-id", generate_play_id()),
                    ("timestamp", now.clone()),
                    ("track-length-seconds", played_seconds.clone()),
                    ("total-played-seconds", played_seconds.clone()),
                    ("end-position-seconds", played_seconds),
                    ("client-now", now),
                ],
            )
            .await?;
        Ok(())
    }

    /// Asks for the event (an Alice shot, when available) that follows a
    /// track inside a curated playlist context.
    pub async fn after_track(
        &self,
        track_id: &str,
        context_item: &str,
    ) -> Result<TrackEvent, ApiError> {
        self.get(
            "/after-track",
            &[
                ("from", PLAY_CLIENT),
                ("prevTrackId", track_id),
                ("nextTrackId", track_id),
                ("context", "playlist"),
                ("contextItem", context_item),
                ("types", "shot"),
            ],
        )
        .await
    }
}
