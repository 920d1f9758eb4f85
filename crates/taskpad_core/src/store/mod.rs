//! Authoritative task collection and its persistence round trip.
//!
//! # Responsibility
//! - Own the ordered task collection and every mutation of it.
//! - Mirror the collection into a durable key-value store after each change.
//! - Notify subscribers so the presentation layer can re-project.
//!
//! # Invariants
//! - Mutations that change state write the full collection exactly once.
//! - No-op mutations (unknown ids) neither write nor notify.
//! - Storage failures never abort a mutation.

pub mod codec;
mod error;
mod task_store;

pub use codec::{decode_tasks, encode_tasks, CodecError};
pub use error::{PersistenceReadError, PersistenceWriteError};
pub use task_store::{
    Mutation, StoreEvent, StoreOptions, SubscriptionId, TaskStore, DEFAULT_STORAGE_KEY,
};
