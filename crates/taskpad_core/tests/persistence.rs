use std::cell::Cell;
use std::rc::Rc;
use taskpad_core::store::{decode_tasks, encode_tasks};
use taskpad_core::{
    KeyValueStore, MemoryKvStore, PersistenceReadError, PersistenceWriteError, SqliteKvStore,
    StorageError, StorageResult, StoreOptions, TaskStore, DEFAULT_STORAGE_KEY,
};

/// Memory store whose writes can be switched off from the test.
struct FlakyKv {
    inner: MemoryKvStore,
    fail_writes: Rc<Cell<bool>>,
}

impl KeyValueStore for FlakyKv {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        if self.fail_writes.get() {
            return Err(StorageError::Unavailable("disk full".to_string()));
        }
        self.inner.set(key, value)
    }
}

/// Store whose reads always fail.
struct BrokenReads;

impl KeyValueStore for BrokenReads {
    fn get(&self, _key: &str) -> StorageResult<Option<String>> {
        Err(StorageError::Unavailable("locked".to_string()))
    }

    fn set(&mut self, _key: &str, _value: &str) -> StorageResult<()> {
        Ok(())
    }
}

#[test]
fn every_mutation_rewrites_the_full_blob() {
    let mut store = TaskStore::initialize(MemoryKvStore::new());
    let a = store.add("a").expect("add task").into_value();
    store.add("b").unwrap();
    store.toggle(a.id()).unwrap();

    let blob = store.storage().get(DEFAULT_STORAGE_KEY).unwrap().unwrap();
    assert_eq!(decode_tasks(&blob).unwrap(), store.snapshot());

    store.delete(a.id()).unwrap();
    let blob = store.storage().get(DEFAULT_STORAGE_KEY).unwrap().unwrap();
    assert_eq!(decode_tasks(&blob).unwrap(), store.snapshot());
}

#[test]
fn blob_uses_camel_case_records() {
    let mut store = TaskStore::initialize(MemoryKvStore::new());
    store.add("Buy milk").expect("add task");

    let blob = store.storage().get("todos").unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&blob).unwrap();
    let record = &json[0];
    assert_eq!(record["text"], "Buy milk");
    assert_eq!(record["completed"], false);
    assert!(record["id"].is_string());
    assert!(record["createdAt"].as_str().unwrap().ends_with('Z'));
}

#[test]
fn initialize_restores_saved_collection() {
    let mut store = TaskStore::initialize(MemoryKvStore::new());
    let a = store.add("a").expect("add task").into_value();
    store.add("b").unwrap();
    store.toggle(a.id()).unwrap();
    let saved = store.snapshot().to_vec();

    let reopened = TaskStore::initialize(store.into_storage());
    assert_eq!(reopened.snapshot(), saved.as_slice());
    assert!(reopened.load_warning().is_none());
}

#[test]
fn sqlite_store_survives_reopen() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("taskpad.sqlite3");

    let saved = {
        let mut store = TaskStore::initialize(SqliteKvStore::open(&path).expect("open sqlite kv"));
        let a = store.add("write tests").expect("add task").into_value();
        store.add("ship it").unwrap();
        store.toggle(a.id()).unwrap();
        store.snapshot().to_vec()
    };

    let reopened = TaskStore::initialize(SqliteKvStore::open(&path).expect("open sqlite kv"));
    assert_eq!(reopened.snapshot(), saved.as_slice());
}

#[test]
fn custom_storage_key_is_isolated() {
    let mut kv = MemoryKvStore::new();
    {
        let mut work = TaskStore::initialize_with(
            &mut kv,
            StoreOptions {
                storage_key: "work".to_string(),
                ..StoreOptions::default()
            },
        );
        work.add("report").expect("add task");
        assert_eq!(work.storage_key(), "work");
    }

    assert!(kv.get(DEFAULT_STORAGE_KEY).unwrap().is_none());
    let home = TaskStore::initialize(&mut kv);
    assert!(home.is_empty());
}

#[test]
fn corrupt_blob_falls_back_to_empty_with_warning() {
    let kv = MemoryKvStore::new().with_entry(DEFAULT_STORAGE_KEY, "{ not json");
    let mut store = TaskStore::initialize(kv);

    assert!(store.is_empty());
    assert!(matches!(
        store.load_warning(),
        Some(PersistenceReadError::Codec(_))
    ));

    store.add("fresh start").unwrap();
    let blob = store.storage().get(DEFAULT_STORAGE_KEY).unwrap().unwrap();
    assert_eq!(decode_tasks(&blob).unwrap().len(), 1);
}

#[test]
fn missing_blob_starts_empty_without_warning() {
    let store = TaskStore::initialize(MemoryKvStore::new());
    assert!(store.is_empty());
    assert!(store.load_warning().is_none());
}

#[test]
fn failed_read_falls_back_to_empty_with_warning() {
    let store = TaskStore::initialize(BrokenReads);
    assert!(store.is_empty());
    assert!(matches!(
        store.load_warning(),
        Some(PersistenceReadError::Storage(_))
    ));
}

#[test]
fn failed_write_keeps_memory_state_until_flush() {
    let fail_writes = Rc::new(Cell::new(false));
    let kv = FlakyKv {
        inner: MemoryKvStore::new(),
        fail_writes: Rc::clone(&fail_writes),
    };
    let mut store = TaskStore::initialize(kv);
    store.add("saved").expect("add task");

    fail_writes.set(true);
    let outcome = store.add("unsaved").unwrap();
    assert!(!outcome.is_persisted());
    assert!(matches!(
        outcome.write_error,
        Some(PersistenceWriteError::Storage(StorageError::Unavailable(_)))
    ));
    assert_eq!(store.len(), 2);
    assert!(store.has_unsaved_changes());
    assert!(store.flush().is_err());

    fail_writes.set(false);
    store.flush().unwrap();
    assert!(!store.has_unsaved_changes());

    let blob = store.storage().get(DEFAULT_STORAGE_KEY).unwrap().unwrap();
    assert_eq!(decode_tasks(&blob).unwrap(), store.snapshot());
}

#[test]
fn encode_decode_preserves_every_field() {
    let mut store = TaskStore::initialize(MemoryKvStore::new());
    let a = store.add("alpha").expect("add task").into_value();
    store.add("beta").unwrap();
    store.toggle(a.id()).unwrap();

    let encoded = encode_tasks(store.snapshot()).unwrap();
    assert_eq!(decode_tasks(&encoded).unwrap(), store.snapshot());
}
