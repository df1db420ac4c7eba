//! Implementations of [`KeyValueStorage`](crate::traits::KeyValueStorage)
//!
//! * [`MemoryStorage`] keeps its values in memory. It is mostly useful for tests, and can be told to fail on purpose
//! * [`FolderStorage`] stores every key in its own file, inside a given folder

pub mod memory;
pub use memory::MemoryStorage;
pub mod folder;
pub use folder::FolderStorage;
