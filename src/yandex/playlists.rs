use crate::types::Playlist;
use crate::yandex::{ApiError, YandexClient};

impl YandexClient {
    /// All playlists owned by the current account (without track lists).
    pub async fn users_playlists_list(&self) -> Result<Vec<Playlist>, ApiError> {
        let uid = self.require_uid()?;
        self.get(&format!("/users/{uid}/playlists/list"), &[]).await
    }

    /// One playlist with its track references. `owner` defaults to the
    /// current account.
    pub async fn users_playlist(
        &self,
        kind: &str,
        owner: Option<&str>,
    ) -> Result<Playlist, ApiError> {
        let uid = match owner {
            Some(owner) => owner,
            None => self.require_uid()?,
        };
        self.get(&format!("/users/{uid}/playlists/{kind}"), &[]).await
    }
}
