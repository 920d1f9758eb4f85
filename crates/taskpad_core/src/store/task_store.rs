//! Task store: owned collection, mutations and persistence.
//!
//! # Invariants
//! - Task ids are unique within `tasks`.
//! - `tasks` keeps insertion order; display order is derived by `view`.
//! - `dirty` is true exactly when the last attempted write failed.

use super::codec::{decode_tasks, encode_tasks};
use super::error::{PersistenceReadError, PersistenceWriteError};
use crate::model::task::{normalize_task_text, Task, TaskId, TaskValidationError};
use crate::runtime::{Clock, IdGenerator, SystemClock, UuidIdGenerator};
use crate::storage::KeyValueStore;
use crate::view::{self, FilterOption, SortOption, TaskCounts};
use log::{debug, info, warn};

/// Key under which the collection blob is stored unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "todos";

/// Ids drawn from the configured generator before `add` switches to UUIDs.
const MAX_ID_ATTEMPTS: usize = 16;

/// Change notification delivered to subscribers after a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    Added(TaskId),
    Toggled { id: TaskId, completed: bool },
    Deleted(TaskId),
}

impl StoreEvent {
    pub fn task_id(&self) -> &TaskId {
        match self {
            Self::Added(id) | Self::Deleted(id) => id,
            Self::Toggled { id, .. } => id,
        }
    }
}

/// Handle returned by [`TaskStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Result of an applied mutation.
///
/// The mutation is applied in memory regardless of `write_error`.
#[derive(Debug)]
pub struct Mutation<T> {
    pub value: T,
    pub write_error: Option<PersistenceWriteError>,
}

impl<T> Mutation<T> {
    pub fn is_persisted(&self) -> bool {
        self.write_error.is_none()
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

/// Construction options for [`TaskStore`].
pub struct StoreOptions {
    pub storage_key: String,
    pub clock: Box<dyn Clock>,
    pub ids: Box<dyn IdGenerator>,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            clock: Box::new(SystemClock),
            ids: Box::new(UuidIdGenerator),
        }
    }
}

type Listener = Box<dyn FnMut(&StoreEvent)>;

/// Authoritative in-memory task collection mirrored into `S`.
pub struct TaskStore<S: KeyValueStore> {
    kv: S,
    storage_key: String,
    tasks: Vec<Task>,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdGenerator>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    load_warning: Option<PersistenceReadError>,
    dirty: bool,
}

impl<S: KeyValueStore> TaskStore<S> {
    /// Loads the collection from `kv` under [`DEFAULT_STORAGE_KEY`].
    pub fn initialize(kv: S) -> Self {
        Self::initialize_with(kv, StoreOptions::default())
    }

    /// Loads the collection from `kv` using explicit options.
    ///
    /// # Contract
    /// - Missing blob: empty collection, no warning.
    /// - Unreadable blob or failed read: empty collection, warning kept in
    ///   [`TaskStore::load_warning`]. The stored blob is left as is until the
    ///   next mutation overwrites it.
    pub fn initialize_with(kv: S, options: StoreOptions) -> Self {
        let StoreOptions {
            storage_key,
            clock,
            ids,
        } = options;

        let (tasks, load_warning) = match load_tasks(&kv, storage_key.as_str()) {
            Ok(tasks) => {
                info!(
                    "event=store_init module=store status=ok key={} tasks={}",
                    storage_key,
                    tasks.len()
                );
                (tasks, None)
            }
            Err(err) => {
                warn!(
                    "event=store_init module=store status=fallback key={} error={}",
                    storage_key, err
                );
                (Vec::new(), Some(err))
            }
        };

        Self {
            kv,
            storage_key,
            tasks,
            clock,
            ids,
            listeners: Vec::new(),
            next_subscription: 0,
            load_warning,
            dirty: false,
        }
    }

    /// Validates `raw_text` and appends a new open task.
    ///
    /// # Errors
    /// - `TaskValidationError::Empty` when the text is blank after trimming.
    /// - `TaskValidationError::TooLong` when it exceeds 100 characters.
    ///
    /// A rejected input leaves the collection and storage untouched.
    pub fn add(&mut self, raw_text: &str) -> Result<Mutation<Task>, TaskValidationError> {
        let text = match normalize_task_text(raw_text) {
            Ok(text) => text,
            Err(err) => {
                info!("event=task_add module=store status=rejected reason={err:?}");
                return Err(err);
            }
        };
        let id = self.fresh_id();
        let task = Task::from_normalized(id, text, self.clock.now());

        self.tasks.push(task.clone());
        debug!(
            "event=task_add module=store status=ok id={} total={}",
            task.id(),
            self.tasks.len()
        );
        let event = StoreEvent::Added(task.id().clone());
        Ok(self.commit(task, event))
    }

    /// Flips `completed` on the task with `id`.
    ///
    /// Returns `None`, without writing, when no such task exists.
    pub fn toggle(&mut self, id: &TaskId) -> Option<Mutation<Task>> {
        let task = self.tasks.iter_mut().find(|task| task.id() == id)?;
        task.toggle();
        let updated = task.clone();
        debug!(
            "event=task_toggle module=store status=ok id={} completed={}",
            id,
            updated.is_completed()
        );
        let event = StoreEvent::Toggled {
            id: id.clone(),
            completed: updated.is_completed(),
        };
        Some(self.commit(updated, event))
    }

    /// Removes the task with `id` and returns it.
    ///
    /// Returns `None`, without writing, when no such task exists.
    pub fn delete(&mut self, id: &TaskId) -> Option<Mutation<Task>> {
        let index = self.tasks.iter().position(|task| task.id() == id)?;
        let removed = self.tasks.remove(index);
        debug!(
            "event=task_delete module=store status=ok id={} total={}",
            id,
            self.tasks.len()
        );
        Some(self.commit(removed, StoreEvent::Deleted(id.clone())))
    }

    /// Read-only view of the collection in insertion order.
    pub fn snapshot(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn counts(&self) -> TaskCounts {
        view::counts(&self.tasks)
    }

    /// Shorthand for [`view::project`] over the current collection.
    pub fn project(&self, sort: SortOption, filter: FilterOption) -> Vec<&Task> {
        view::project(&self.tasks, sort, filter)
    }

    /// Why the last initialization fell back to an empty collection, if it did.
    pub fn load_warning(&self) -> Option<&PersistenceReadError> {
        self.load_warning.as_ref()
    }

    /// True while the stored blob lags behind the in-memory collection.
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    /// Rewrites the full collection to storage.
    ///
    /// Used to retry after a mutation reported a write error.
    pub fn flush(&mut self) -> Result<(), PersistenceWriteError> {
        self.persist()
    }

    pub fn storage_key(&self) -> &str {
        self.storage_key.as_str()
    }

    pub fn storage(&self) -> &S {
        &self.kv
    }

    pub fn into_storage(self) -> S {
        self.kv
    }

    /// Registers a listener called after every applied mutation.
    pub fn subscribe(&mut self, listener: impl FnMut(&StoreEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener; returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// Draws an id not used by any current task.
    ///
    /// After [`MAX_ID_ATTEMPTS`] collisions the configured generator is
    /// abandoned for this call and random UUIDs are used instead.
    fn fresh_id(&mut self) -> TaskId {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = self.ids.new_id();
            if self.get(&id).is_none() {
                return id;
            }
            warn!("event=task_add module=store status=retry reason=id_collision");
        }
        warn!(
            "event=task_add module=store status=fallback reason=id_generator_exhausted attempts={}",
            MAX_ID_ATTEMPTS
        );
        let mut fallback = UuidIdGenerator;
        loop {
            let id = fallback.new_id();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    fn commit<T>(&mut self, value: T, event: StoreEvent) -> Mutation<T> {
        let write_error = self.persist().err();
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
        Mutation { value, write_error }
    }

    fn persist(&mut self) -> Result<(), PersistenceWriteError> {
        let result = encode_tasks(&self.tasks)
            .map_err(PersistenceWriteError::from)
            .and_then(|blob| {
                self.kv
                    .set(self.storage_key.as_str(), blob.as_str())
                    .map_err(PersistenceWriteError::from)
            });

        match &result {
            Ok(()) => {
                self.dirty = false;
                debug!(
                    "event=store_persist module=store status=ok key={} tasks={}",
                    self.storage_key,
                    self.tasks.len()
                );
            }
            Err(err) => {
                self.dirty = true;
                warn!(
                    "event=store_persist module=store status=error key={} error={}",
                    self.storage_key, err
                );
            }
        }
        result
    }
}

fn load_tasks<S: KeyValueStore>(kv: &S, key: &str) -> Result<Vec<Task>, PersistenceReadError> {
    match kv.get(key)? {
        Some(blob) => Ok(decode_tasks(blob.as_str())?),
        None => Ok(Vec::new()),
    }
}
