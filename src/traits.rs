use std::error::Error;

use async_trait::async_trait;

/// An asynchronous key-value storage, addressed by string keys holding string values.
///
/// This is the only persistence primitive a [`TaskStore`](crate::store::TaskStore) relies on.
/// No transactional or query capability is assumed.
#[async_trait]
pub trait KeyValueStorage {
    /// Returns the value stored under `key`, or `None` in case this key is not set
    async fn get(&self, key: &str) -> Result<Option<String>, Box<dyn Error>>;

    /// Stores `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>>;

    /// Removes `key` from the storage.
    /// Removing a key that is not set is not an error
    async fn remove(&self, key: &str) -> Result<(), Box<dyn Error>>;
}
