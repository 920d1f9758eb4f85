//! Persistence failures surfaced by the task store.
//!
//! Neither error is fatal: reads fall back to an empty collection and writes
//! leave the in-memory collection authoritative.

use super::codec::CodecError;
use crate::storage::StorageError;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// The persisted blob could not be loaded at initialization.
#[derive(Debug)]
pub enum PersistenceReadError {
    Storage(StorageError),
    Codec(CodecError),
}

impl Display for PersistenceReadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "failed to read saved tasks: {err}"),
            Self::Codec(err) => write!(f, "saved tasks are unreadable: {err}"),
        }
    }
}

impl Error for PersistenceReadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Codec(err) => Some(err),
        }
    }
}

impl From<StorageError> for PersistenceReadError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<CodecError> for PersistenceReadError {
    fn from(value: CodecError) -> Self {
        Self::Codec(value)
    }
}

/// The collection could not be written after a mutation or flush.
#[derive(Debug)]
pub enum PersistenceWriteError {
    Encode(CodecError),
    Storage(StorageError),
}

impl Display for PersistenceWriteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "failed to encode tasks: {err}"),
            Self::Storage(err) => write!(f, "failed to save tasks: {err}"),
        }
    }
}

impl Error for PersistenceWriteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<StorageError> for PersistenceWriteError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<CodecError> for PersistenceWriteError {
    fn from(value: CodecError) -> Self {
        Self::Encode(value)
    }
}
