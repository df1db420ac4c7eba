//! Support for library configuration options

use std::path::PathBuf;

/// The storage key under which the task collection is stored, unless told otherwise.
/// This is the key used by the original mobile application, so that its data can be read as-is.
pub const DEFAULT_TASKS_KEY: &str = "TASKS_STORAGE_KEY";

/// The folder used by a [`FolderStorage`](crate::storage::FolderStorage), unless told otherwise
pub const DEFAULT_FOLDER: &str = "pocket_tasks_data";

/// Environment variable that overrides [`StoreConfig::folder`]
pub const FOLDER_ENV_VAR: &str = "POCKET_TASKS_FOLDER";
/// Environment variable that overrides [`StoreConfig::tasks_key`]
pub const KEY_ENV_VAR: &str = "POCKET_TASKS_KEY";


/// Where tasks are persisted
#[derive(Clone, Debug, PartialEq)]
pub struct StoreConfig {
    /// The folder of a folder-backed storage
    pub folder: PathBuf,
    /// The key of the task collection inside the storage
    pub tasks_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            folder: PathBuf::from(DEFAULT_FOLDER),
            tasks_key: DEFAULT_TASKS_KEY.to_string(),
        }
    }
}

impl StoreConfig {
    /// Build a configuration from the environment, falling back to the defaults for unset (or blank) variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |name: &str| lookup(name).filter(|value| value.trim().is_empty() == false);

        let mut config = Self::default();
        if let Some(folder) = non_blank(FOLDER_ENV_VAR) {
            config.folder = PathBuf::from(folder);
        }
        if let Some(key) = non_blank(KEY_ENV_VAR) {
            config.tasks_key = key;
        }
        log::debug!("Using storage folder {:?} and key {:?}", config.folder, config.tasks_key);
        config
    }
}
