//! Listing service: live enumeration with a per-key cache fallback.

use std::rc::Rc;

use folder_host::{
    has_tracked_extension, load_cache_json_with, save_cache_records_with, ChildHandle,
    DirectoryHandle, EntryRecord, FolderStore, HandleError,
};
use tracing::{debug, warn};

use crate::entry::HydratedEntry;
use crate::error::SessionError;
use crate::sort::SortOrder;

/// Enumerates `dir`, keeping directories and files carrying `extension`, sorted by `order`.
///
/// Each kept file is opened to read its modification time.
///
/// # Errors
///
/// Returns the first enumeration or file-open failure.
pub async fn list_directory(
    dir: &Rc<dyn DirectoryHandle>,
    extension: &str,
    order: SortOrder,
) -> Result<Vec<HydratedEntry>, HandleError> {
    let mut entries = Vec::new();
    for child in dir.children().await? {
        let record = match &child {
            ChildHandle::Directory(sub) => EntryRecord::directory(sub.name()),
            ChildHandle::File(file) => {
                let name = file.name();
                if !has_tracked_extension(&name, extension) {
                    continue;
                }
                EntryRecord::file(name, file.last_modified().await?)
            }
        };
        entries.push(HydratedEntry {
            record,
            handle: child,
            parent: Rc::clone(dir),
            relative_path: None,
        });
    }
    order.sort_by_record(&mut entries, |entry| &entry.record);
    Ok(entries)
}

#[derive(Debug)]
/// Result of loading one directory for display.
pub enum ListingOutcome {
    /// Live listing; the cache for the key was refreshed.
    Live(Vec<HydratedEntry>),
    /// Live access failed; the last snapshot stored under the key is shown instead.
    Cached(Vec<EntryRecord>),
    /// Live access failed at the root and no snapshot exists; re-authorization is needed.
    NeedsUnlock,
    /// Live access failed below the root and no snapshot exists.
    Unavailable(SessionError),
}

/// Loads `dir` live, writing the snapshot to `cache_key` on success and falling back to it on
/// failure.
pub async fn load_listing(
    store: &dyn FolderStore,
    dir: &Rc<dyn DirectoryHandle>,
    cache_key: &str,
    is_root: bool,
    extension: &str,
    order: SortOrder,
) -> ListingOutcome {
    match list_directory(dir, extension, order).await {
        Ok(entries) => {
            store_snapshot(store, cache_key, &entries).await;
            ListingOutcome::Live(entries)
        }
        Err(err) => {
            debug!(key = cache_key, error = %err, "live listing failed; trying cache");
            match load_cached_records(store, cache_key, order).await {
                Some(records) => ListingOutcome::Cached(records),
                None if is_root => ListingOutcome::NeedsUnlock,
                None => ListingOutcome::Unavailable(err.into()),
            }
        }
    }
}

/// Writes the plain-data records of a live listing to `cache_key`; failures are only logged.
pub async fn store_snapshot(store: &dyn FolderStore, cache_key: &str, entries: &[HydratedEntry]) {
    let records: Vec<EntryRecord> = entries.iter().map(|entry| entry.record.clone()).collect();
    if let Err(err) = save_cache_records_with(store, cache_key, &records).await {
        warn!(key = cache_key, error = %err, "failed to write listing cache");
    }
}

/// Reads the snapshot stored under `cache_key`, sorted by `order`.
///
/// A missing, empty, or unreadable snapshot yields `None`.
pub async fn load_cached_records(
    store: &dyn FolderStore,
    cache_key: &str,
    order: SortOrder,
) -> Option<Vec<EntryRecord>> {
    match load_cache_json_with::<_, Vec<EntryRecord>>(store, cache_key).await {
        Ok(Some(mut records)) if !records.is_empty() => {
            order.sort_by_record(&mut records, |record| record);
            Some(records)
        }
        Ok(_) => None,
        Err(err) => {
            warn!(key = cache_key, error = %err, "failed to read listing cache");
            None
        }
    }
}
