//! Re-resolution of cached and recent entries into live handles.

use std::rc::Rc;

use folder_host::{
    relative_path_segments, ChildHandle, DirectoryHandle, EntryRecord, HandleError, PermissionMode,
};
use tracing::debug;

use crate::entry::{Entry, HydratedEntry, RecentEntry};
use crate::error::{SessionError, SessionResult};
use crate::listing::list_directory;
use crate::navigation::NavigationState;
use crate::permission::ensure_access;
use crate::sort::SortOrder;

fn denied(dir: &dyn DirectoryHandle, mode: PermissionMode) -> SessionError {
    SessionError::Permission(format!("{} access to `{}`", mode.as_str(), dir.name()))
}

fn missing(err: HandleError) -> SessionError {
    match err {
        HandleError::Io(msg) => SessionError::NotFound(msg),
        other => other.into(),
    }
}

/// Walks `relative_path` from `root` after ensuring `mode` access on the root.
///
/// # Errors
///
/// Returns [`SessionError::Permission`] when access is denied and [`SessionError::NotFound`]
/// when a segment is missing or is not a directory.
pub async fn resolve_recent_parent(
    root: &Rc<dyn DirectoryHandle>,
    relative_path: &str,
    mode: PermissionMode,
) -> SessionResult<Rc<dyn DirectoryHandle>> {
    if !ensure_access(root.as_ref(), mode).await.is_granted() {
        return Err(denied(root.as_ref(), mode));
    }
    let mut dir = Rc::clone(root);
    for segment in relative_path_segments(relative_path) {
        let next = dir.directory(segment).await.map_err(missing)?;
        dir = next;
    }
    Ok(dir)
}

/// Resolves a recent-shelf entry to a live file below `root`.
///
/// # Errors
///
/// Returns an error when access is denied or any part of the path no longer exists.
pub async fn resolve_recent_entry(
    root: &Rc<dyn DirectoryHandle>,
    recent: &RecentEntry,
    mode: PermissionMode,
) -> SessionResult<HydratedEntry> {
    let parent = resolve_recent_parent(root, &recent.relative_path, mode).await?;
    let file = parent.file(&recent.name, false).await.map_err(missing)?;
    let last_modified = file.last_modified().await?;
    debug!(name = %recent.name, path = %recent.relative_path, "resolved recent entry");
    Ok(HydratedEntry {
        record: EntryRecord::file(recent.name.clone(), last_modified),
        handle: ChildHandle::File(file),
        parent,
        relative_path: Some(recent.relative_path.clone()),
    })
}

/// Negotiates `mode` on `current` and lists it live in `order`.
///
/// # Errors
///
/// Returns an error when access is denied or the listing fails.
pub async fn relist_current(
    current: &Rc<dyn DirectoryHandle>,
    mode: PermissionMode,
    extension: &str,
    order: SortOrder,
) -> SessionResult<Vec<HydratedEntry>> {
    if !ensure_access(current.as_ref(), mode).await.is_granted() {
        return Err(denied(current.as_ref(), mode));
    }
    Ok(list_directory(current, extension, order).await?)
}

/// Picks the live entry named `name` out of a fresh listing.
///
/// # Errors
///
/// Returns [`SessionError::NotFound`] when nothing matches.
pub fn match_cached_entry(entries: &[HydratedEntry], name: &str) -> SessionResult<HydratedEntry> {
    entries
        .iter()
        .find(|entry| entry.record.name == name)
        .cloned()
        .ok_or_else(|| SessionError::NotFound(name.to_string()))
}

/// Re-lists `current` and re-matches `name` to obtain a hydrated entry.
///
/// # Errors
///
/// Returns an error when access is denied, the listing fails, or nothing matches.
pub async fn resolve_cached_entry(
    current: &Rc<dyn DirectoryHandle>,
    name: &str,
    mode: PermissionMode,
    extension: &str,
) -> SessionResult<HydratedEntry> {
    let entries = relist_current(current, mode, extension, SortOrder::default()).await?;
    match_cached_entry(&entries, name)
}

/// Returns the live parent directory of `entry`, resolving plain-data entries first.
///
/// Hydrated entries carry their parent. Recent entries are walked from the navigation root.
/// Cached entries belong to the current directory.
///
/// # Errors
///
/// Returns [`SessionError::Permission`] or [`SessionError::NotFound`] when resolution fails.
pub async fn resolve_parent(
    entry: &Entry,
    nav: &NavigationState,
    mode: PermissionMode,
) -> SessionResult<Rc<dyn DirectoryHandle>> {
    match entry {
        Entry::Hydrated(hydrated) => Ok(Rc::clone(&hydrated.parent)),
        Entry::Recent(recent) => {
            resolve_recent_parent(nav.root(), &recent.relative_path, mode).await
        }
        Entry::Cached(_) => {
            let current = nav.current();
            if ensure_access(current.as_ref(), mode).await.is_granted() {
                Ok(Rc::clone(current))
            } else {
                Err(denied(current.as_ref(), mode))
            }
        }
    }
}

/// Turns any entry into a hydrated one, resolving plain-data entries against `nav`.
///
/// # Errors
///
/// Returns an error when resolution fails.
pub async fn hydrate(
    entry: &Entry,
    nav: &NavigationState,
    mode: PermissionMode,
    extension: &str,
) -> SessionResult<HydratedEntry> {
    match entry {
        Entry::Hydrated(hydrated) => Ok(hydrated.clone()),
        Entry::Recent(recent) => resolve_recent_entry(nav.root(), recent, mode).await,
        Entry::Cached(record) => {
            resolve_cached_entry(nav.current(), &record.name, mode, extension).await
        }
    }
}
