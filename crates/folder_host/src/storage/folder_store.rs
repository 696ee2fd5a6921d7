//! Persistence contracts for the remembered folder handle and listing caches.
//!
//! The store has two logical partitions: `handles` holds the single remembered folder
//! capability, and `cache` holds JSON text keyed by logical listing path (`"root"` or a
//! subdirectory name) plus the reserved [`RECENT_FILES_KEY`] slot.

use std::{cell::RefCell, collections::HashMap, fmt, future::Future, pin::Pin, rc::Rc};

use serde::{de::DeserializeOwned, Serialize};

use crate::fs::handle::DirectoryHandle;
use crate::fs::types::EntryRecord;

/// Slot in the `handles` partition holding the remembered folder.
pub const LAST_FOLDER_KEY: &str = "lastFolder";
/// Cache key used for the root listing.
pub const ROOT_CACHE_KEY: &str = "root";
/// Cache key reserved for the recent-files shelf.
pub const RECENT_FILES_KEY: &str = "recent_files";

/// Object-safe boxed future used by [`FolderStore`] async methods.
pub type FolderStoreFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host store for the remembered folder capability and plain-data caches.
pub trait FolderStore {
    /// Loads the remembered folder handle.
    fn load_folder<'a>(
        &'a self,
    ) -> FolderStoreFuture<'a, Result<Option<Rc<dyn DirectoryHandle>>, String>>;

    /// Replaces the remembered folder handle.
    fn save_folder<'a>(
        &'a self,
        folder: Rc<dyn DirectoryHandle>,
    ) -> FolderStoreFuture<'a, Result<(), String>>;

    /// Loads raw JSON text from the cache partition.
    fn load_cache_text<'a>(
        &'a self,
        key: &'a str,
    ) -> FolderStoreFuture<'a, Result<Option<String>, String>>;

    /// Saves raw JSON text into the cache partition.
    fn save_cache_text<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> FolderStoreFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op store for unsupported targets and baseline tests.
pub struct NoopFolderStore;

impl FolderStore for NoopFolderStore {
    fn load_folder<'a>(
        &'a self,
    ) -> FolderStoreFuture<'a, Result<Option<Rc<dyn DirectoryHandle>>, String>> {
        Box::pin(async { Ok(None) })
    }

    fn save_folder<'a>(
        &'a self,
        _folder: Rc<dyn DirectoryHandle>,
    ) -> FolderStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    fn load_cache_text<'a>(
        &'a self,
        _key: &'a str,
    ) -> FolderStoreFuture<'a, Result<Option<String>, String>> {
        Box::pin(async { Ok(None) })
    }

    fn save_cache_text<'a>(
        &'a self,
        _key: &'a str,
        _raw_json: &'a str,
    ) -> FolderStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Clone, Default)]
/// In-memory store; clones share the same partitions.
pub struct MemoryFolderStore {
    folder: Rc<RefCell<Option<Rc<dyn DirectoryHandle>>>>,
    cache: Rc<RefCell<HashMap<String, String>>>,
}

impl fmt::Debug for MemoryFolderStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryFolderStore")
            .field(
                "folder",
                &self.folder.borrow().as_ref().map(|folder| folder.name()),
            )
            .field("cache_keys", &self.cache.borrow().keys().collect::<Vec<_>>())
            .finish()
    }
}

impl MemoryFolderStore {
    /// Creates a store that already remembers `folder`.
    pub fn with_folder(folder: Rc<dyn DirectoryHandle>) -> Self {
        let store = Self::default();
        *store.folder.borrow_mut() = Some(folder);
        store
    }

    /// Returns `true` when a cache slot exists for `key`.
    pub fn has_cache(&self, key: &str) -> bool {
        self.cache.borrow().contains_key(key)
    }
}

impl FolderStore for MemoryFolderStore {
    fn load_folder<'a>(
        &'a self,
    ) -> FolderStoreFuture<'a, Result<Option<Rc<dyn DirectoryHandle>>, String>> {
        Box::pin(async move { Ok(self.folder.borrow().clone()) })
    }

    fn save_folder<'a>(
        &'a self,
        folder: Rc<dyn DirectoryHandle>,
    ) -> FolderStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            *self.folder.borrow_mut() = Some(folder);
            Ok(())
        })
    }

    fn load_cache_text<'a>(
        &'a self,
        key: &'a str,
    ) -> FolderStoreFuture<'a, Result<Option<String>, String>> {
        Box::pin(async move { Ok(self.cache.borrow().get(key).cloned()) })
    }

    fn save_cache_text<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> FolderStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.cache
                .borrow_mut()
                .insert(key.to_string(), raw_json.to_string());
            Ok(())
        })
    }
}

/// Serializes and stores a JSON value in the cache partition.
///
/// # Errors
///
/// Returns an error when serialization or store access fails.
pub async fn save_cache_json_with<S: FolderStore + ?Sized, T: Serialize + ?Sized>(
    store: &S,
    key: &str,
    value: &T,
) -> Result<(), String> {
    let raw = serde_json::to_string(value).map_err(|e| e.to_string())?;
    store.save_cache_text(key, &raw).await
}

/// Reads and deserializes a JSON value from the cache partition.
///
/// # Errors
///
/// Returns an error when store access or JSON deserialization fails.
pub async fn load_cache_json_with<S: FolderStore + ?Sized, T: DeserializeOwned>(
    store: &S,
    key: &str,
) -> Result<Option<T>, String> {
    let Some(raw) = store.load_cache_text(key).await? else {
        return Ok(None);
    };
    let value = serde_json::from_str(&raw).map_err(|e| e.to_string())?;
    Ok(Some(value))
}

/// Stores a listing snapshot under `key`, overwriting the previous one.
///
/// # Errors
///
/// Returns an error when serialization or store access fails.
pub async fn save_cache_records_with<S: FolderStore + ?Sized>(
    store: &S,
    key: &str,
    records: &[EntryRecord],
) -> Result<(), String> {
    save_cache_json_with(store, key, records).await
}

/// Loads the listing snapshot stored under `key` (empty when absent).
///
/// # Errors
///
/// Returns an error when store access or JSON deserialization fails.
pub async fn load_cache_records_with<S: FolderStore + ?Sized>(
    store: &S,
    key: &str,
) -> Result<Vec<EntryRecord>, String> {
    Ok(load_cache_json_with(store, key).await?.unwrap_or_default())
}
