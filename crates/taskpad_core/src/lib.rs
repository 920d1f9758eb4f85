//! Core domain logic for Taskpad.
//! This crate is the single source of truth for task-list invariants; the
//! presentation layer calls into it and re-renders from its projections.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod runtime;
pub mod storage;
pub mod store;
pub mod view;

pub use config::{AppConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{
    normalize_task_text, Task, TaskId, TaskValidationError, MAX_TASK_TEXT_CHARS,
};
pub use runtime::{Clock, IdGenerator, SystemClock, UuidIdGenerator};
pub use storage::{KeyValueStore, MemoryKvStore, SqliteKvStore, StorageError, StorageResult};
pub use store::{
    Mutation, PersistenceReadError, PersistenceWriteError, StoreEvent, StoreOptions,
    SubscriptionId, TaskStore, DEFAULT_STORAGE_KEY,
};
pub use view::{project, FilterOption, SortOption, TaskCounts};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
