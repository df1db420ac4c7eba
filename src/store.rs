//! This module provides the task store, the only component that reads or writes the persisted task collection
//!
//! The whole collection is stored as a single JSON array, under a single key of a [`KeyValueStorage`].
//! Every operation reads the whole collection, and every mutation writes the whole collection back.
//!
//! Reads and writes do not handle errors the same way:
//! * a storage that cannot be read, or that contains a value that is not a valid task collection, is treated as an empty collection.
//!   The failure is logged but never returned. Note that this means corrupt data is lost as soon as a new mutation overwrites it.
//! * a storage that cannot be written makes the mutation fail, so that no user data is silently lost.

use std::error::Error;

use tokio::sync::Mutex;

use crate::traits::KeyValueStorage;
use crate::config::DEFAULT_TASKS_KEY;
use crate::task::{NewTask, Task, TaskId, TaskStatus};


/// The persisted collection of tasks
pub struct TaskStore<S>
where
    S: KeyValueStorage,
{
    storage: S,
    key: String,

    /// Held during every read-modify-write, so that concurrent mutations through this store do not overwrite each other
    write_lock: Mutex<()>,
}

impl<S> TaskStore<S>
where
    S: KeyValueStorage,
{
    /// Create a store that keeps its tasks under the default key of `storage`
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_TASKS_KEY)
    }

    /// Create a store that keeps its tasks under a custom key of `storage`
    pub fn with_key(storage: S, key: &str) -> Self {
        Self {
            storage,
            key: key.to_string(),
            write_lock: Mutex::new(()),
        }
    }

    /// Returns the underlying storage
    pub fn storage(&self) -> &S { &self.storage }
    /// Returns the storage key of the collection
    pub fn key(&self) -> &str   { &self.key     }

    /// Returns every task, in storage order.
    ///
    /// This never fails: in case the storage cannot be read or contains invalid data, this logs the error and returns an empty list.
    pub async fn list(&self) -> Vec<Task> {
        match self.load().await {
            Ok(tasks) => tasks,
            Err(err) => {
                log::error!("Unable to read tasks from {:?}: {}. Treating it as an empty list", self.key, err);
                Vec::new()
            },
        }
    }

    /// Create a new task, and persist it.
    ///
    /// The new task is `Pending`, has a new random ID, and its text fields are trimmed.
    /// This does not reject blank fields, see [`NewTask::validate`].
    pub async fn create(&self, new_task: NewTask) -> Result<Task, Box<dyn Error>> {
        let _guard = self.write_lock.lock().await;

        let task = Task::new(new_task);
        log::debug!("Generated ID {}", task.id());

        let mut tasks = self.list().await;
        log::debug!("Existing task count: {}", tasks.len());
        tasks.push(task.clone());

        if let Err(err) = self.save(&tasks).await {
            log::error!("Failed to add task {}: {}", task.id(), err);
            return Err(err);
        }
        log::debug!("Task {} saved to storage", task.id());
        Ok(task)
    }

    /// Returns the task that has this ID, if any
    pub async fn get_by_id(&self, id: &TaskId) -> Option<Task> {
        self.list().await
            .into_iter()
            .find(|task| task.id() == id)
    }

    /// Set the status of a task. Its other fields are left untouched.
    ///
    /// In case no task has this ID, the (unchanged) collection is still written and no error is returned
    pub async fn update_status(&self, id: &TaskId, status: TaskStatus) -> Result<(), Box<dyn Error>> {
        let _guard = self.write_lock.lock().await;

        let mut tasks = self.list().await;
        match tasks.iter_mut().find(|task| task.id() == id) {
            Some(task) => task.set_status(status),
            None => log::debug!("No task {} to set as {}", id, status),
        }
        self.save(&tasks).await
    }

    /// Delete a task. This is a no-op in case no task has this ID
    pub async fn delete(&self, id: &TaskId) -> Result<(), Box<dyn Error>> {
        let _guard = self.write_lock.lock().await;

        let mut tasks = self.list().await;
        let n_before = tasks.len();
        tasks.retain(|task| task.id() != id);
        if tasks.len() == n_before {
            log::debug!("No task {} to delete", id);
        }
        self.save(&tasks).await
    }

    /// Delete every task, by removing the storage key
    pub async fn clear(&self) -> Result<(), Box<dyn Error>> {
        let _guard = self.write_lock.lock().await;

        log::info!("Clearing every task from {:?}", self.key);
        self.storage.remove(&self.key).await
    }


    async fn load(&self) -> Result<Vec<Task>, Box<dyn Error>> {
        match self.storage.get(&self.key).await? {
            None => Ok(Vec::new()),
            Some(json) => Ok(serde_json::from_str(&json)?),
        }
    }

    async fn save(&self, tasks: &[Task]) -> Result<(), Box<dyn Error>> {
        let json = serde_json::to_string(tasks)?;
        self.storage.set(&self.key, &json).await
    }
}
