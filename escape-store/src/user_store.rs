use crate::app_config::StorageConfig;
use async_trait::async_trait;
use directories::ProjectDirs;
use escape_core::identity::{User, UserStore};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("No usable data directory on this platform")]
    NoDataDir,

    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt user record: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// File-backed key-value persistence for the user record: one JSON document,
/// loaded on init and rewritten on every mutation. The durable stand-in for
/// the browser local storage the identity originally lived in.
pub struct FileUserStore {
    path: PathBuf,
}

impl FileUserStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(storage: &StorageConfig) -> Result<Self, StoreError> {
        let dir = match &storage.data_dir {
            Some(dir) => PathBuf::from(dir),
            None => ProjectDirs::from("app", "escape", "escape")
                .ok_or(StoreError::NoDataDir)?
                .data_dir()
                .to_path_buf(),
        };
        std::fs::create_dir_all(&dir)?;

        Ok(Self {
            path: dir.join("user.json"),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl UserStore for FileUserStore {
    async fn load(&self) -> Result<Option<User>, Box<dyn std::error::Error + Send + Sync>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => {
                let user: User = serde_json::from_slice(&bytes).map_err(StoreError::Corrupt)?;
                tracing::debug!(user_id = %user.id, path = %self.path.display(), "user record loaded");
                Ok(Some(user))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(e).into()),
        }
    }

    async fn save(&self, user: &User) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let bytes = serde_json::to_vec_pretty(user)?;
        tokio::fs::write(&self.path, bytes).await?;
        tracing::debug!(user_id = %user.id, path = %self.path.display(), "user record saved");
        Ok(())
    }
}
