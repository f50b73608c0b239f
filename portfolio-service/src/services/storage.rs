use async_trait::async_trait;
use serde_json::Value;
use service_core::error::AppError;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;
use uuid::Uuid;

/// Flat key-value store holding one JSON document per key.
#[async_trait]
pub trait JsonStore: Send + Sync {
    /// `Ok(None)` when nothing has been stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<Value>, AppError>;
    /// Replace whatever is stored under `key`.
    async fn put(&self, key: &str, value: &Value) -> Result<(), AppError>;
}

/// One file per key under a root directory.
pub struct LocalJsonStore {
    base_path: PathBuf,
}

impl LocalJsonStore {
    pub async fn new(base_path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let base_path = base_path.into();
        if !base_path.exists() {
            fs::create_dir_all(&base_path).await.map_err(storage_error)?;
        }
        Ok(Self { base_path })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, AppError> {
        if key.is_empty() || key.contains(['/', '\\']) || key == "." || key == ".." {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "Invalid storage key: {:?}",
                key
            )));
        }
        Ok(self.base_path.join(key))
    }
}

fn storage_error(err: impl Into<anyhow::Error>) -> AppError {
    AppError::StorageError(err.into())
}

#[async_trait]
impl JsonStore for LocalJsonStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, AppError> {
        let path = self.path_for(key)?;
        let data = match fs::read(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(storage_error(e)),
        };

        let value = serde_json::from_slice(&data).map_err(|e| {
            storage_error(anyhow::anyhow!("Stored document {} is not valid JSON: {}", key, e))
        })?;
        Ok(Some(value))
    }

    async fn put(&self, key: &str, value: &Value) -> Result<(), AppError> {
        let path = self.path_for(key)?;
        let data = serde_json::to_vec_pretty(value)?;

        // Rename over the target so readers never see a half-written document.
        let tmp_path = self
            .base_path
            .join(format!(".{}.{}.tmp", key, Uuid::new_v4()));
        fs::write(&tmp_path, data).await.map_err(storage_error)?;
        if let Err(e) = fs::rename(&tmp_path, &path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(storage_error(e));
        }
        Ok(())
    }
}
