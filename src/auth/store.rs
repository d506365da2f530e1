use std::path::{Path, PathBuf};
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::error::StoreError;
use super::token::AccessToken;

const TOKEN_FILE_NAME: &str = "access-token.toml";

/// Storage for the client's single access-token slot.
///
/// Implement this to share tokens between processes (Redis, a database,
/// a file). Readers must only ever see a whole token: the previous one or
/// the replacement.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Last stored token, or `None` if nothing was stored yet.
    async fn load(&self) -> Result<Option<AccessToken>, StoreError>;
    async fn save(&self, token: &AccessToken) -> Result<(), StoreError>;
}

/// In-process token slot. This is the default store.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: RwLock<Option<AccessToken>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: AccessToken) -> Self {
        Self {
            slot: RwLock::new(Some(token)),
        }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> Result<Option<AccessToken>, StoreError> {
        let guard = self.slot.read().map_err(|_| StoreError::Poisoned)?;
        Ok(guard.clone())
    }

    async fn save(&self, token: &AccessToken) -> Result<(), StoreError> {
        let mut guard = self.slot.write().map_err(|_| StoreError::Poisoned)?;
        *guard = Some(token.clone());
        Ok(())
    }
}

/// Configuration for file-backed token storage.
#[derive(Debug, Clone)]
pub struct TokenStoreConfig {
    pub base_dir: PathBuf,
}

impl TokenStoreConfig {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn default_dir() -> PathBuf {
        default_applemaps_dir()
    }
}

/// File-backed token store using a TOML file.
///
/// Each write lands in its own uniquely named temporary sibling and is
/// renamed into place, so a concurrent reader or writer (in this or another
/// process) sees either the old file or a complete new one.
///
/// # Example
/// ```no_run
/// use applemaps::auth::{AccessToken, FileTokenStore, TokenStore};
///
/// # async fn run() -> Result<(), applemaps::auth::StoreError> {
/// let store = FileTokenStore::new_default();
/// store.save(&AccessToken::new("access", 1_700_000_000)).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileTokenStore {
    pub fn new(config: TokenStoreConfig) -> Self {
        Self {
            path: config.base_dir.join(TOKEN_FILE_NAME),
            write_lock: Mutex::new(()),
        }
    }

    pub fn new_default() -> Self {
        Self::new(TokenStoreConfig::new(default_applemaps_dir()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Per-write sibling, so concurrent writers never share a temp file.
    fn temp_path(&self) -> PathBuf {
        self.path
            .with_extension(format!("toml.{}.tmp", uuid::Uuid::new_v4().simple()))
    }

    async fn ensure_parent(path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> Result<Option<AccessToken>, StoreError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let file: TokenFile = toml::from_str(&raw)?;
        Ok(Some(file.token))
    }

    async fn save(&self, token: &AccessToken) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        Self::ensure_parent(&self.path).await?;
        let file = TokenFile {
            version: 1,
            token: token.clone(),
            saved_at: Utc::now(),
        };
        let serialized = toml::to_string(&file)?;
        let tmp = self.temp_path();
        if let Err(err) = write_then_rename(&tmp, &self.path, serialized).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(err);
        }
        tracing::debug!(path = %self.path.display(), "access token persisted");
        Ok(())
    }
}

async fn write_then_rename(tmp: &Path, dest: &Path, contents: String) -> Result<(), StoreError> {
    tokio::fs::write(tmp, contents).await?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tokio::fs::set_permissions(tmp, std::fs::Permissions::from_mode(0o600)).await?;
    }
    tokio::fs::rename(tmp, dest).await?;
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TokenFile {
    version: u32,
    token: AccessToken,
    saved_at: DateTime<Utc>,
}

fn default_applemaps_dir() -> PathBuf {
    directories::UserDirs::new()
        .map(|dirs| dirs.home_dir().join(".applemaps"))
        .unwrap_or_else(|| PathBuf::from(".applemaps"))
}
