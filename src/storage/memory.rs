use std::collections::HashMap;
use std::error::Error;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::traits::KeyValueStorage;
use crate::mock_behaviour::MockBehaviour;


/// A storage that keeps its values in memory.
///
/// Clones share the same values, so that a test can keep a handle on the storage it has given to a [`TaskStore`](crate::store::TaskStore).
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    values: Arc<Mutex<HashMap<String, String>>>,

    mock_behaviour: Option<Arc<Mutex<MockBehaviour>>>,
}

impl MemoryStorage {
    /// Create an empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty storage, whose operations may fail according to `mock_behaviour`
    pub fn with_mock_behaviour(mock_behaviour: Arc<Mutex<MockBehaviour>>) -> Self {
        Self {
            values: Arc::new(Mutex::new(HashMap::new())),
            mock_behaviour: Some(mock_behaviour),
        }
    }

    /// Returns the keys currently set
    pub fn keys(&self) -> Result<Vec<String>, Box<dyn Error>> {
        Ok(self.lock_values()?.keys().cloned().collect())
    }

    fn lock_values(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, Box<dyn Error>> {
        self.values.lock()
            .map_err(|err| format!("Memory storage is unusable: {}", err).into())
    }

    fn check_behaviour<F>(&self, check: F) -> Result<(), Box<dyn Error>>
    where
        F: FnOnce(&mut MockBehaviour) -> Result<(), Box<dyn Error>>,
    {
        match &self.mock_behaviour {
            None => Ok(()),
            Some(behaviour) => {
                let mut behaviour = behaviour.lock()
                    .map_err(|err| format!("Mock behaviour is unusable: {}", err))?;
                check(&mut *behaviour)
            },
        }
    }
}

#[async_trait]
impl KeyValueStorage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        self.check_behaviour(MockBehaviour::can_get)?;
        Ok(self.lock_values()?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        self.check_behaviour(MockBehaviour::can_set)?;
        self.lock_values()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), Box<dyn Error>> {
        self.check_behaviour(MockBehaviour::can_remove)?;
        self.lock_values()?.remove(key);
        Ok(())
    }
}
