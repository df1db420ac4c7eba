//! This crate provides a local store for to-do tasks.
//!
//! Tasks have a title, an optional description, a location, a scheduled date/time and a [`TaskStatus`].
//!
//! Every task is kept in a single collection, that is persisted as one JSON array in a key-value storage. \
//! The storage is abstracted by the [`KeyValueStorage`](traits::KeyValueStorage) trait, and is given to a [`TaskStore`] when it is created.
//! The [`storage`] module provides an in-memory and a folder-backed implementation.
//!
//! Reads never fail (an unreadable collection is logged and treated as empty), writes do (so that no user data is silently lost). See the [`store`] module for more details.

pub mod traits;

mod task;
pub use task::{Task, TaskId, TaskStatus, NewTask, ValidationError};
pub mod store;
pub use store::TaskStore;
pub mod sort;
pub use sort::SortOrder;

pub mod storage;
pub mod mock_behaviour;

pub mod config;
pub mod utils;
