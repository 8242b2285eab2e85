//! The host message abstraction adapters read from.
//!
//! A message is an opaque payload plus string metadata and a unique id. The
//! payload may live in memory or behind a backing store, so reading it can
//! fail with [`MessageError`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use bytes::Bytes;

use crate::error::MessageError;

/// A message handed to an adapter by the host framework.
pub trait Message: Send + Sync {
    /// Unique identifier of the message.
    fn unique_id(&self) -> &str;

    /// Read the full payload.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError`] when the payload cannot be read.
    fn payload(&self) -> Result<Bytes, MessageError>;

    /// Look up a metadata value by key.
    fn metadata(&self, key: &str) -> Option<&str>;
}

/// A message whose payload is held in memory.
#[derive(Debug, Clone)]
pub struct InMemoryMessage {
    id: String,
    payload: Bytes,
    metadata: HashMap<String, String>,
}

impl InMemoryMessage {
    /// Create a message with a freshly generated id.
    #[must_use]
    pub fn new(payload: impl Into<Bytes>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            payload: payload.into(),
            metadata: HashMap::new(),
        }
    }

    /// Replace the generated id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Add a metadata entry.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

impl Message for InMemoryMessage {
    fn unique_id(&self) -> &str {
        &self.id
    }

    fn payload(&self) -> Result<Bytes, MessageError> {
        Ok(self.payload.clone())
    }

    fn metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }
}

/// A message whose payload is a file on disk, read on every access.
#[derive(Debug, Clone)]
pub struct FileBackedMessage {
    id: String,
    path: PathBuf,
    metadata: HashMap<String, String>,
}

impl FileBackedMessage {
    /// Create a message backed by the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            path: path.into(),
            metadata: HashMap::new(),
        }
    }

    /// Add a metadata entry.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Message for FileBackedMessage {
    fn unique_id(&self) -> &str {
        &self.id
    }

    fn payload(&self) -> Result<Bytes, MessageError> {
        std::fs::read(&self.path)
            .map(Bytes::from)
            .map_err(|source| MessageError::Io {
                id: self.id.clone(),
                source,
            })
    }

    fn metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }
}
