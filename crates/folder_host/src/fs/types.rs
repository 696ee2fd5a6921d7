//! Folder/filesystem data types shared across host contracts and implementations.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::path::DEFAULT_TRACKED_EXTENSION;

/// Prefs-store key holding [`ShelfPrefs`].
pub const SHELF_PREFS_KEY: &str = "pdfshelf.prefs.v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Directory entry kind.
pub enum EntryKind {
    /// File entry.
    File,
    /// Directory entry.
    Directory,
}

impl EntryKind {
    /// Returns `true` for [`EntryKind::Directory`].
    pub fn is_directory(self) -> bool {
        matches!(self, Self::Directory)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Permission mode requested from a handle.
pub enum PermissionMode {
    /// Read-only access.
    Read,
    /// Read/write access.
    Readwrite,
}

impl PermissionMode {
    /// Returns the browser permission descriptor token for this mode.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Readwrite => "readwrite",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Permission state reported by a handle.
pub enum PermissionState {
    /// Access is granted.
    Granted,
    /// Browser will prompt for permission.
    Prompt,
    /// Access is denied.
    Denied,
}

impl PermissionState {
    /// Returns `true` when access is granted.
    pub fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Plain-data snapshot of a directory child, as written to the listing cache.
pub struct EntryRecord {
    /// Base name of the entry.
    pub name: String,
    /// File or directory kind.
    pub kind: EntryKind,
    /// Last-modified time in unix milliseconds; `0` for directories or unknown.
    #[serde(default)]
    pub last_modified: u64,
}

impl EntryRecord {
    /// Builds a directory record (modification time is always `0`).
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Directory,
            last_modified: 0,
        }
    }

    /// Builds a file record.
    pub fn file(name: impl Into<String>, last_modified: u64) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
            last_modified,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Failure reported by a directory or file handle.
pub enum HandleError {
    /// Access was denied or has not been granted yet.
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    /// The named child does not exist.
    #[error("not found: {0}")]
    NotFound(String),
    /// Enumeration, read, or write failed despite granted permission.
    #[error("io error: {0}")]
    Io(String),
    /// The handle does not support the requested operation.
    #[error("unsupported: {0}")]
    Unsupported(String),
    /// An interactive flow was dismissed by the user.
    #[error("aborted by user")]
    Aborted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
/// Column used to order entries of the same kind.
pub enum SortField {
    /// Locale-aware name order.
    Name,
    /// Modification time, ties broken by name.
    #[default]
    Date,
}

impl SortField {
    /// Direction a field starts with when it becomes active.
    pub fn default_descending(self) -> bool {
        matches!(self, Self::Date)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// User preferences for the shelf popup.
pub struct ShelfPrefs {
    /// File extension listed besides directories (matched case-insensitively).
    pub tracked_extension: String,
    /// Active sort column.
    pub sort_field: SortField,
    /// Whether the active sort column is descending.
    pub sort_descending: bool,
    /// Quiet period before a recursive search starts, in milliseconds.
    pub search_debounce_ms: u32,
    /// Minimum term length that triggers a recursive search instead of a local filter.
    pub search_min_chars: usize,
    /// Maximum number of recent files kept on the shelf.
    pub recent_limit: usize,
    /// Delay before a viewer blob URL is revoked, in milliseconds.
    pub viewer_revoke_delay_ms: u32,
}

impl Default for ShelfPrefs {
    fn default() -> Self {
        Self {
            tracked_extension: DEFAULT_TRACKED_EXTENSION.to_string(),
            sort_field: SortField::Date,
            sort_descending: true,
            search_debounce_ms: 300,
            search_min_chars: 2,
            recent_limit: 3,
            viewer_revoke_delay_ms: 60_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn enum_serde_values_match_browser_strings() {
        assert_eq!(
            serde_json::to_string(&EntryKind::Directory).expect("serialize"),
            "\"directory\""
        );
        assert_eq!(
            serde_json::to_string(&PermissionMode::Readwrite).expect("serialize"),
            "\"readwrite\""
        );
        let state: PermissionState = serde_json::from_str("\"prompt\"").expect("deserialize");
        assert_eq!(state, PermissionState::Prompt);
        assert_eq!(PermissionMode::Read.as_str(), "read");
    }

    #[test]
    fn entry_record_uses_camel_case_and_defaults_last_modified() {
        let value = serde_json::to_value(EntryRecord::file("a.pdf", 5)).expect("serialize");
        assert_eq!(
            value,
            json!({"name": "a.pdf", "kind": "file", "lastModified": 5})
        );

        let legacy: EntryRecord =
            serde_json::from_value(json!({"name": "Docs", "kind": "directory"}))
                .expect("deserialize");
        assert_eq!(legacy, EntryRecord::directory("Docs"));
    }

    #[test]
    fn shelf_prefs_fill_missing_fields_with_defaults() {
        let prefs: ShelfPrefs =
            serde_json::from_value(json!({"sort_field": "name", "sort_descending": false}))
                .expect("deserialize");
        assert_eq!(prefs.sort_field, SortField::Name);
        assert!(!prefs.sort_descending);
        assert_eq!(prefs.tracked_extension, ".pdf");
        assert_eq!(prefs.recent_limit, 3);
        assert_eq!(prefs.search_debounce_ms, 300);
    }
}
