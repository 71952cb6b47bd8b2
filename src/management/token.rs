use std::path::{Path, PathBuf};

use crate::config::CONFIG_FILE_NAME;

/// On-disk store for the OAuth token: a single trimmed line in the
/// `config` file inside the cache folder.
pub struct TokenManager {
    token: String,
    path: PathBuf,
}

impl TokenManager {
    pub fn new(token: String, cache_dir: &Path) -> Self {
        Self {
            token,
            path: cache_dir.join(CONFIG_FILE_NAME),
        }
    }

    pub async fn load(cache_dir: &Path) -> Result<Self, String> {
        Self::load_from(&cache_dir.join(CONFIG_FILE_NAME)).await
    }

    pub async fn load_from(path: &Path) -> Result<Self, String> {
        let content = async_fs::read_to_string(path)
            .await
            .map_err(|e| e.to_string())?;
        Ok(Self {
            token: content.trim().to_string(),
            path: path.to_path_buf(),
        })
    }

    pub async fn persist(&self) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }
        async_fs::write(&self.path, &self.token)
            .await
            .map_err(|e| e.to_string())
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}
