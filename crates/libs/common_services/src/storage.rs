use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;
use tokio::fs;
use tracing::debug;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid file name: '{0}'")]
    InvalidFileName(String),

    #[error("Storage IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Flat folder of uploaded photos. A photo's stored path is its sanitized file name.
#[derive(Debug, Clone)]
pub struct ImageStorage {
    media_folder: PathBuf,
}

impl ImageStorage {
    #[must_use]
    pub fn new(media_folder: impl Into<PathBuf>) -> Self {
        Self {
            media_folder: media_folder.into(),
        }
    }

    /// The path a file with this name is stored under.
    pub fn stored_name(file_name: &str) -> Result<String, StorageError> {
        let name = sanitize_filename::sanitize(file_name.trim());
        if name.is_empty() || name == "." || name == ".." {
            return Err(StorageError::InvalidFileName(file_name.to_owned()));
        }
        Ok(name)
    }

    /// Writes `bytes` under the sanitized `file_name`, replacing any file with that name.
    /// Returns the stored path.
    pub async fn save(&self, file_name: &str, bytes: &[u8]) -> Result<String, StorageError> {
        let name = Self::stored_name(file_name)?;
        fs::create_dir_all(&self.media_folder).await?;
        fs::write(self.media_folder.join(&name), bytes).await?;
        debug!("Stored {} bytes as {}", bytes.len(), name);
        Ok(name)
    }

    /// Removes a stored photo. A photo that is already gone is not an error.
    pub async fn remove(&self, path: &str) -> Result<(), StorageError> {
        let name = Self::stored_name(path)?;
        if name != path {
            return Err(StorageError::InvalidFileName(path.to_owned()));
        }
        match fs::remove_file(self.media_folder.join(&name)).await {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}
