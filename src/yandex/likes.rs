use serde_json::Value;

use crate::types::{LikesLibrary, TrackShort};
use crate::yandex::{ApiError, YandexClient};

impl YandexClient {
    /// The liked-tracks library, newest first, as short references.
    pub async fn likes_tracks(&self) -> Result<Vec<TrackShort>, ApiError> {
        let uid = self.require_uid()?;
        let library: LikesLibrary = self.get(&format!("/users/{uid}/likes/tracks"), &[]).await?;
        Ok(library.library.tracks)
    }

    pub async fn likes_add(&self, track_id: &str) -> Result<(), ApiError> {
        self.likes_add_multiple(&[track_id.to_string()]).await
    }

    pub async fn likes_add_multiple(&self, track_ids: &[String]) -> Result<(), ApiError> {
        let uid = self.require_uid()?;
        let _: Value = self
            .post_form(
                &format!("/users/{uid}/likes/tracks/add-multiple"),
                &[("track-ids", track_ids.join(","))],
            )
            .await?;
        Ok(())
    }

    pub async fn likes_remove_multiple(&self, track_ids: &[String]) -> Result<(), ApiError> {
        let uid = self.require_uid()?;
        let _: Value = self
            .post_form(
                &format!("/users/{uid}/likes/tracks/remove"),
                &[("track-ids", track_ids.join(","))],
            )
            .await?;
        Ok(())
    }
}
