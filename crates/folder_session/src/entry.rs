//! Entry model: hydrated (live handle), cached (plain data), or recent (plain data + path).

use std::{fmt, rc::Rc};

use folder_host::{ChildHandle, DirectoryHandle, EntryKind, EntryRecord};
use serde::{Deserialize, Serialize};

#[derive(Clone)]
/// Entry backed by a live handle, produced by a listing or a search.
pub struct HydratedEntry {
    /// Descriptive fields.
    pub record: EntryRecord,
    /// Live handle of the entry itself.
    pub handle: ChildHandle,
    /// Live handle of the directory that contains the entry.
    pub parent: Rc<dyn DirectoryHandle>,
    /// Slash-joined ancestor names from the navigation root to `parent` (search results only).
    pub relative_path: Option<String>,
}

impl fmt::Debug for HydratedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HydratedEntry")
            .field("record", &self.record)
            .field("parent", &self.parent.name())
            .field("relative_path", &self.relative_path)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Recently opened file, persisted with the path of its parent relative to the root.
pub struct RecentEntry {
    /// Base name of the file.
    pub name: String,
    /// Entry kind (always a file in practice).
    pub kind: EntryKind,
    /// Modification time captured when the file was opened.
    #[serde(default)]
    pub last_modified: u64,
    /// Slash-joined ancestor names from the root to the parent, root excluded.
    #[serde(default)]
    pub relative_path: String,
}

impl RecentEntry {
    /// Descriptive fields of the entry.
    pub fn record(&self) -> EntryRecord {
        EntryRecord {
            name: self.name.clone(),
            kind: self.kind,
            last_modified: self.last_modified,
        }
    }
}

#[derive(Debug, Clone)]
/// A directory/file as shown to the user.
pub enum Entry {
    /// Backed by a live handle; can be opened, renamed, or deleted directly.
    Hydrated(HydratedEntry),
    /// Plain data from the listing cache of the current directory.
    Cached(EntryRecord),
    /// Plain data from the recent-files shelf.
    Recent(RecentEntry),
}

impl Entry {
    /// Base name of the entry.
    pub fn name(&self) -> &str {
        match self {
            Self::Hydrated(entry) => &entry.record.name,
            Self::Cached(record) => &record.name,
            Self::Recent(recent) => &recent.name,
        }
    }

    /// Entry kind.
    pub fn kind(&self) -> EntryKind {
        match self {
            Self::Hydrated(entry) => entry.record.kind,
            Self::Cached(record) => record.kind,
            Self::Recent(recent) => recent.kind,
        }
    }

    /// Modification time in unix milliseconds (`0` for directories or unknown).
    pub fn last_modified(&self) -> u64 {
        match self {
            Self::Hydrated(entry) => entry.record.last_modified,
            Self::Cached(record) => record.last_modified,
            Self::Recent(recent) => recent.last_modified,
        }
    }

    /// Path of the parent relative to the root, when known.
    pub fn relative_path(&self) -> Option<&str> {
        match self {
            Self::Hydrated(entry) => entry.relative_path.as_deref(),
            Self::Cached(_) => None,
            Self::Recent(recent) => Some(&recent.relative_path),
        }
    }

    /// Descriptive fields of the entry.
    pub fn record(&self) -> EntryRecord {
        match self {
            Self::Hydrated(entry) => entry.record.clone(),
            Self::Cached(record) => record.clone(),
            Self::Recent(recent) => recent.record(),
        }
    }

    /// Returns `true` when the entry carries a live handle.
    pub fn is_hydrated(&self) -> bool {
        matches!(self, Self::Hydrated(_))
    }
}
