use std::error::Error;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::traits::KeyValueStorage;


/// A storage that stores every key in its own file, inside a local folder.
///
/// The folder is created on the first write. A missing file means the key is not set. \
/// A key must already be a valid file name (see [`FolderStorage::file_for_key`]), so that two keys never share a file.
///
/// Values are written to a temporary file that is then renamed over the previous one,
/// so that a reader never sees a partially written value.
#[derive(Clone, Debug, PartialEq)]
pub struct FolderStorage {
    folder: PathBuf,
}

impl FolderStorage {
    /// Create a storage backed by `folder`. This does not touch the file system
    pub fn new(folder: &Path) -> Self {
        Self {
            folder: PathBuf::from(folder),
        }
    }

    /// Get the path to the backing folder
    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Get the path to the file that stores `key`.
    ///
    /// Keys that would be altered to make a file name (e.g. `work/tasks`) are rejected.
    /// Keys starting with a dot are rejected as well, these names are used for temporary files.
    pub fn file_for_key(&self, key: &str) -> Result<PathBuf, Box<dyn Error>> {
        let file_name = sanitize_filename::sanitize(key);
        if file_name.is_empty() || file_name != key {
            return Err(format!("Storage key {:?} cannot be used as a file name", key).into());
        }
        if key.starts_with('.') {
            return Err(format!("Storage key {:?} must not start with a dot", key).into());
        }
        Ok(self.folder.join(file_name))
    }

    fn temp_file_for_key(&self, key: &str) -> PathBuf {
        let random = uuid::Uuid::new_v4().to_hyphenated().to_string();
        self.folder.join(format!(".{}.{}.tmp", key, random))
    }
}

#[async_trait]
impl KeyValueStorage for FolderStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let path = self.file_for_key(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(format!("Unable to read file {:?}: {}", path, err).into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let path = self.file_for_key(key)?;
        if let Err(err) = tokio::fs::create_dir_all(&self.folder).await {
            return Err(format!("Unable to create folder {:?}: {}", self.folder, err).into());
        }

        let temp_path = self.temp_file_for_key(key);
        if let Err(err) = tokio::fs::write(&temp_path, value).await {
            tokio::fs::remove_file(&temp_path).await.ok();
            return Err(format!("Unable to save file {:?}: {}", temp_path, err).into());
        }
        if let Err(err) = tokio::fs::rename(&temp_path, &path).await {
            tokio::fs::remove_file(&temp_path).await.ok();
            return Err(format!("Unable to replace file {:?}: {}", path, err).into());
        }
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), Box<dyn Error>> {
        let path = self.file_for_key(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(format!("Unable to remove file {:?}: {}", path, err).into()),
        }
    }
}
