//! JSON document store.
//!
//! The store maps string keys to whole JSON documents. Every write replaces
//! the entire document under its key; there are no partial updates and no
//! versioning, so the last writer wins.
//!
//! Reads never fail on bad data. A document that is not valid JSON, or that
//! does not match the schema the caller asks for, is logged and reported as
//! absent so the caller can substitute its default. Collection documents can
//! instead be read entry by entry ([`Store::load_entries`],
//! [`Store::load_items`]) so one bad entry only loses itself.
//!
//! # Usage
//!
//! ```rust
//! use mindra_core::store::{keys, Store};
//!
//! let store = Store::in_memory();
//! store.set(keys::USER, &serde_json::json!({"email": "ada@example.com"})).unwrap();
//!
//! let user: Option<serde_json::Value> = store.load(keys::USER);
//! assert!(user.is_some());
//! ```

mod file;
mod memory;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Result;

pub use file::FileBackend;
pub use memory::MemoryBackend;

/// Default prefix prepended to every key.
pub const DEFAULT_KEY_PREFIX: &str = "mindra_";

/// Well-known document keys.
pub mod keys {
    /// Ordered sequence of courses.
    pub const COURSES: &str = "courses";
    /// The signed-in session user.
    pub const USER: &str = "user";
    /// Credential table keyed by email.
    pub const USERS: &str = "users";
    /// Completion flags keyed by email, course, module.
    pub const PROGRESS: &str = "progress";
    /// Admin capability presence flag.
    pub const IS_ADMIN: &str = "is_admin";
    /// Capped event log.
    pub const TELEMETRY: &str = "telemetry";
}

// ============================================================================
// StorageBackend
// ============================================================================

/// Raw key/value persistence underneath a [`Store`].
///
/// Backends deal in serialized strings only; JSON handling and corruption
/// recovery live in [`Store`].
pub trait StorageBackend: Send + Sync {
    /// Read the raw contents stored under `key`, if any.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the contents stored under `key`.
    fn write(&self, key: &str, contents: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// Short backend name for logs.
    fn name(&self) -> &'static str;
}

// ============================================================================
// Store
// ============================================================================

/// Typed JSON view over a [`StorageBackend`].
///
/// Cheap to clone (Arc internals); clones share the same backend.
#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn StorageBackend>,
    prefix: String,
}

impl Store {
    /// Create a store over `backend` using [`DEFAULT_KEY_PREFIX`].
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            backend,
            prefix: DEFAULT_KEY_PREFIX.to_string(),
        }
    }

    /// Create a store over a fresh [`MemoryBackend`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()))
    }

    /// Replace the key prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// The key prefix in use.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn full_key(&self, key: &str) -> String {
        format!("{}{key}", self.prefix)
    }

    /// Read the document under `key` as untyped JSON.
    ///
    /// Returns `None` when the key is absent, unreadable, or not valid JSON.
    pub fn get(&self, key: &str) -> Option<Value> {
        let full_key = self.full_key(key);
        let raw = match self.backend.read(&full_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("Failed to read '{full_key}' from {}: {e}", self.backend.name());
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Ignoring corrupt document '{full_key}': {e}");
                None
            }
        }
    }

    /// Read the document under `key` and validate it against `T`.
    ///
    /// Returns `None` when the document is absent or does not match `T`.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.get(key)?;
        match serde_json::from_value(value) {
            Ok(typed) => Some(typed),
            Err(e) => {
                log::warn!(
                    "Ignoring document '{}' with unexpected shape: {e}",
                    self.full_key(key)
                );
                None
            }
        }
    }

    /// Read and validate the document under `key`, or fall back to `T::default()`.
    pub fn load_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        self.load(key).unwrap_or_default()
    }

    /// Read an object document entry by entry.
    ///
    /// Entries whose value does not match `T` are logged and dropped; the rest
    /// are kept. Returns `None` when the document is absent or not an object.
    pub fn load_entries<T: DeserializeOwned>(&self, key: &str) -> Option<BTreeMap<String, T>> {
        let Value::Object(map) = self.get(key)? else {
            log::warn!("Ignoring document '{}': expected an object", self.full_key(key));
            return None;
        };
        Some(
            map.into_iter()
                .filter_map(|(name, value)| match serde_json::from_value(value) {
                    Ok(entry) => Some((name, entry)),
                    Err(e) => {
                        log::warn!("Dropping entry '{name}' of '{}': {e}", self.full_key(key));
                        None
                    }
                })
                .collect(),
        )
    }

    /// Read an array document item by item.
    ///
    /// Items that do not match `T` are logged and dropped; the rest keep their
    /// order. Returns `None` when the document is absent or not an array.
    pub fn load_items<T: DeserializeOwned>(&self, key: &str) -> Option<Vec<T>> {
        let Value::Array(items) = self.get(key)? else {
            log::warn!("Ignoring document '{}': expected an array", self.full_key(key));
            return None;
        };
        Some(
            items
                .into_iter()
                .enumerate()
                .filter_map(|(index, value)| match serde_json::from_value(value) {
                    Ok(item) => Some(item),
                    Err(e) => {
                        log::warn!("Dropping item {index} of '{}': {e}", self.full_key(key));
                        None
                    }
                })
                .collect(),
        )
    }

    /// Serialize `value` and replace the document under `key`.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let full_key = self.full_key(key);
        let contents = serde_json::to_string(value)?;
        self.backend.write(&full_key, &contents)?;
        log::debug!(
            "Wrote '{full_key}' ({} bytes) to {}",
            contents.len(),
            self.backend.name()
        );
        Ok(())
    }

    /// Remove the document under `key`.
    pub fn remove(&self, key: &str) -> Result<()> {
        let full_key = self.full_key(key);
        self.backend.remove(&full_key)?;
        log::debug!("Removed '{full_key}' from {}", self.backend.name());
        Ok(())
    }

    /// Returns `true` if a readable, valid JSON document exists under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("backend", &self.backend.name())
            .field("prefix", &self.prefix)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
