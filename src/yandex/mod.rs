//! # Yandex Music Web API client
//!
//! Thin typed layer over the `api.music.yandex.net` REST API. One
//! [`YandexClient`] lives for the whole run; each API domain (account,
//! playlists, likes, tracks, search, status) contributes its endpoint
//! methods from its own file.
//!
//! Every payload arrives wrapped in an `{invocationInfo, result, error}`
//! envelope; the request plumbing here unwraps it and classifies
//! failures into [`ApiError`] so the retry wrapper can tell transient
//! network conditions apart from rejected credentials. Authentication is
//! a single static OAuth token sent with every request; there is no
//! refresh flow, and an invalid token is terminal.

pub mod account;
pub mod error;
pub mod likes;
pub mod playlists;
pub mod retry;
pub mod search;
pub mod status;
pub mod tracks;

use std::sync::OnceLock;
use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::types::ApiResponse;

pub use error::{ApiError, describe_chain, root_cause};
pub use retry::{MAX_ERRORS, retry};

const API_BASE_URL: &str = "https://api.music.yandex.net";

/// Longest malformed-payload excerpt kept for diagnostics.
const PAYLOAD_EXCERPT: usize = 2000;

pub struct YandexClient {
    http: Client,
    token: String,
    base_url: String,
    /// Account uid, learned from the first `account_status` call; the
    /// user-scoped endpoints need it in their paths.
    uid: OnceLock<String>,
}

impl YandexClient {
    pub fn new(token: &str) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            http,
            token: token.to_string(),
            base_url: API_BASE_URL.to_string(),
            uid: OnceLock::new(),
        })
    }

    pub(crate) fn remember_uid(&self, uid: String) {
        let _ = self.uid.set(uid);
    }

    pub(crate) fn require_uid(&self) -> Result<&str, ApiError> {
        self.uid
            .get()
            .map(|uid| uid.as_str())
            .ok_or_else(|| ApiError::Api {
                name: String::from("no-account"),
                message: String::from("account status has not been resolved yet"),
            })
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .query(query)
            .header("Authorization", format!("OAuth {}", self.token))
            .send()
            .await?;
        self.unwrap_envelope(response).await
    }

    pub(crate) async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .post(&url)
            .form(form)
            .header("Authorization", format!("OAuth {}", self.token))
            .send()
            .await?;
        self.unwrap_envelope(response).await
    }

    /// Plain GET outside the envelope scheme (download keys, audio bytes).
    pub(crate) async fn get_raw(&self, url: &str) -> Result<Response, ApiError> {
        let response = self
            .http
            .get(url)
            .header("Authorization", format!("OAuth {}", self.token))
            .send()
            .await?;
        Ok(response.error_for_status()?)
    }

    async fn unwrap_envelope<T: DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Unauthorized(format!("HTTP {status}: {body}")));
        }

        let body = response.text().await?;
        let parsed: ApiResponse<T> =
            serde_json::from_str(&body).map_err(|err| ApiError::BadResponse {
                context: err.to_string(),
                payload: excerpt(&body),
            })?;

        if let Some(error) = parsed.error {
            let name = error.name.unwrap_or_else(|| String::from("unknown"));
            let message = error.message.unwrap_or_default();
            if name == "session-expired" || name == "not-authenticated" {
                return Err(ApiError::Unauthorized(format!("{name}: {message}")));
            }
            return Err(ApiError::Api { name, message });
        }

        parsed.result.ok_or_else(|| ApiError::BadResponse {
            context: String::from("envelope carried neither result nor error"),
            payload: excerpt(&body),
        })
    }
}

fn excerpt(body: &str) -> String {
    if body.len() <= PAYLOAD_EXCERPT {
        return body.to_string();
    }
    let mut cut = PAYLOAD_EXCERPT;
    while !body.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…", &body[..cut])
}
