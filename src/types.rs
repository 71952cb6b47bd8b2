use serde::{Deserialize, Deserializer, Serialize};

/// Yandex Music sends ids as either JSON numbers or strings depending on
/// the endpoint; normalize them to strings on the way in.
fn id_from_any<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Str(String),
    }
    Ok(match Raw::deserialize(deserializer)? {
        Raw::Int(value) => value.to_string(),
        Raw::Str(value) => value,
    })
}

fn opt_id_from_any<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Str(String),
    }
    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Int(value) => value.to_string(),
        Raw::Str(value) => value,
    }))
}

/// Year fields arrive as numbers or as numeric strings.
fn opt_year_from_any<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i32),
        Str(String),
    }
    Ok(Option::<Raw>::deserialize(deserializer)?.and_then(|raw| match raw {
        Raw::Int(value) => Some(value),
        Raw::Str(value) => value.trim().parse().ok(),
    }))
}

/// Generic `{invocationInfo, result, error}` envelope around every API payload.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub result: Option<T>,
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub name: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    #[serde(deserialize_with = "id_from_any")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackPosition {
    pub volume: u32,
    pub index: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    #[serde(deserialize_with = "id_from_any")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default, deserialize_with = "opt_year_from_any")]
    pub original_release_year: Option<i32>,
    #[serde(default)]
    pub track_position: Option<TrackPosition>,
    #[serde(default)]
    pub artists: Vec<Artist>,
    #[serde(default)]
    pub duration_ms: Option<u64>,
    #[serde(default)]
    pub track_count: Option<usize>,
    /// Only present on `/albums/{id}/with-tracks` responses.
    #[serde(default)]
    pub volumes: Option<Vec<Vec<Track>>>,
}

impl Album {
    /// Earliest of the three year sources the API exposes; `9999` stands
    /// in for "unknown" so the minimum is always defined.
    pub fn earliest_year(&self) -> i32 {
        const UNKNOWN_YEAR: i32 = 9999;
        let from_release_date = self
            .release_date
            .as_deref()
            .and_then(|date| date.get(..4))
            .and_then(|year| year.parse().ok())
            .unwrap_or(UNKNOWN_YEAR);
        let from_original = self.original_release_year.unwrap_or(UNKNOWN_YEAR);
        let plain = self.year.unwrap_or(UNKNOWN_YEAR);
        from_release_date.min(from_original).min(plain)
    }

    /// `"Title @ Version"` when a version disambiguator is present,
    /// otherwise the plain title (falling back to the id for untitled
    /// albums).
    pub fn display_title(&self) -> String {
        match &self.version {
            Some(version) => format!("{} @ {}", self.title, version),
            None if self.title.is_empty() => self.id.clone(),
            None => self.title.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    #[serde(deserialize_with = "id_from_any")]
    pub id: String,
    #[serde(default, deserialize_with = "opt_id_from_any")]
    pub real_id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default, rename = "type")]
    pub track_type: Option<String>,
    #[serde(default)]
    pub duration_ms: Option<u64>,
    #[serde(default)]
    pub artists: Vec<Artist>,
    #[serde(default)]
    pub albums: Vec<Album>,
    #[serde(default)]
    pub lyrics_available: Option<bool>,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub file_size: Option<u64>,
    /// Free-form per-track metadata some feeds attach; dumped at announce
    /// time when present.
    #[serde(default)]
    pub meta_data: Option<serde_json::Value>,
}

impl Track {
    /// Composite `track:album` id used by likes, status reports and the
    /// web link; falls back to the bare track id for album-less tracks.
    pub fn track_id(&self) -> String {
        match self.albums.first() {
            Some(album) => format!("{}:{}", self.id, album.id),
            None => self.id.clone(),
        }
    }

    pub fn artist_names(&self) -> Vec<&str> {
        self.artists.iter().map(|artist| artist.name.as_str()).collect()
    }

    pub fn full_title(&self) -> String {
        match &self.version {
            Some(version) => format!("{} @ {}", self.title, version),
            None => self.title.clone(),
        }
    }
}

/// Lazily resolved track handle: likes and playlist listings carry only
/// ids (and sometimes an embedded full track).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackShort {
    #[serde(deserialize_with = "id_from_any")]
    pub id: String,
    #[serde(default, deserialize_with = "opt_id_from_any")]
    pub album_id: Option<String>,
    #[serde(default)]
    pub track: Option<Box<Track>>,
}

impl TrackShort {
    pub fn track_id(&self) -> String {
        match &self.album_id {
            Some(album_id) => format!("{}:{}", self.id, album_id),
            None => self.id.clone(),
        }
    }
}

/// A queue entry: either a fully materialized track or a short reference
/// that gets resolved right before playback.
#[derive(Debug, Clone)]
pub enum TrackHandle {
    Full(Box<Track>),
    Short(TrackShort),
}

impl TrackHandle {
    pub fn track_id(&self) -> String {
        match self {
            TrackHandle::Full(track) => track.track_id(),
            TrackHandle::Short(short) => short.track_id(),
        }
    }

    pub fn embedded(&self) -> Option<&Track> {
        match self {
            TrackHandle::Full(track) => Some(track),
            TrackHandle::Short(short) => short.track.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    #[serde(deserialize_with = "id_from_any")]
    pub uid: String,
    #[serde(default)]
    pub login: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    #[serde(deserialize_with = "id_from_any")]
    pub kind: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub track_count: Option<usize>,
    #[serde(default)]
    pub duration_ms: Option<u64>,
    #[serde(default)]
    pub modified: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub owner: Option<Owner>,
    #[serde(default)]
    pub tracks: Vec<TrackShort>,
}

impl Playlist {
    pub fn playlist_id(&self) -> String {
        match &self.owner {
            Some(owner) => format!("{}:{}", owner.uid, self.kind),
            None => self.kind.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikesLibrary {
    pub library: LikedTracksList,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikedTracksList {
    #[serde(default)]
    pub tracks: Vec<TrackShort>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lyrics {
    #[serde(deserialize_with = "id_from_any")]
    pub id: String,
    #[serde(default)]
    pub full_lyrics: String,
    #[serde(default)]
    pub has_rights: Option<bool>,
    #[serde(default)]
    pub text_language: Option<String>,
    #[serde(default)]
    pub show_translation: Option<bool>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplement {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub lyrics: Option<Lyrics>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub account: Account,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(default, deserialize_with = "opt_id_from_any")]
    pub uid: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub now: Option<String>,
    #[serde(default)]
    pub birthday: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionAlerts {
    #[serde(default)]
    pub alerts: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadInfo {
    pub codec: String,
    #[serde(default)]
    pub bitrate_in_kbps: u32,
    pub download_info_url: String,
}

/// Contents of the XML download key the storage host hands out; the
/// direct link is derived from these four fields.
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadKey {
    pub host: String,
    pub path: String,
    pub ts: String,
    pub s: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub misspell_corrected: Option<bool>,
    #[serde(default)]
    pub misspell_original: Option<String>,
    #[serde(default)]
    pub misspell_result: Option<String>,
    #[serde(default)]
    pub tracks: Option<SearchTracks>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchTracks {
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub results: Vec<Track>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackEvent {
    #[serde(default)]
    pub event_id: Option<String>,
    #[serde(default)]
    pub shots: Vec<Shot>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shot {
    #[serde(default)]
    pub status: String,
    pub shot_data: ShotData,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShotData {
    #[serde(default)]
    pub shot_text: String,
    pub shot_type: ShotType,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShotType {
    #[serde(default)]
    pub id: String,
}
