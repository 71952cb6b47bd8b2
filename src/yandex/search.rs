use crate::types::SearchPage;
use crate::yandex::{ApiError, YandexClient};

impl YandexClient {
    /// Track-typed search. Other result categories (artists, albums,
    /// podcasts…) are out of scope for the player; use the web UI for
    /// browsing.
    pub async fn search_tracks(
        &self,
        text: &str,
        page: u32,
        nocorrect: bool,
    ) -> Result<SearchPage, ApiError> {
        let page = page.to_string();
        let nocorrect = nocorrect.to_string();
        self.get(
            "/search",
            &[
                ("text", text),
                ("type", "track"),
                ("page", &page),
                ("nocorrect", &nocorrect),
            ],
        )
        .await
    }
}
