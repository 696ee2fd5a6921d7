//! Typed host contracts and shared models for the PDF shelf.
//!
//! This crate is the boundary between the folder session core and concrete hosts. It exposes
//! directory/file capability traits, the persistence store for the remembered folder and
//! listing caches, preference storage, and the picker/viewer/clipboard surfaces. Browser
//! adapters live in `folder_host_web`; the in-memory adapters here back tests and headless use.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod fs;
pub mod storage;
pub mod surfaces;
pub mod time;

pub use fs::handle::{ChildHandle, DirectoryHandle, FileHandle, HandleFuture};
pub use fs::memory::{MemoryAccess, MemoryDirectory, MemoryFile, PromptBehavior};
pub use fs::path::{
    ensure_tracked_extension, has_tracked_extension, join_relative_path, relative_path_segments,
    strip_tracked_extension, DEFAULT_TRACKED_EXTENSION,
};
pub use fs::types::{
    EntryKind, EntryRecord, HandleError, PermissionMode, PermissionState, ShelfPrefs, SortField,
    SHELF_PREFS_KEY,
};
pub use storage::folder_store::{
    load_cache_json_with, load_cache_records_with, save_cache_json_with, save_cache_records_with,
    FolderStore, FolderStoreFuture, MemoryFolderStore, NoopFolderStore, LAST_FOLDER_KEY,
    RECENT_FILES_KEY, ROOT_CACHE_KEY,
};
pub use storage::prefs::{
    load_pref_with, load_shelf_prefs_with, save_pref_with, save_shelf_prefs_with,
    MemoryPrefsStore, NoopPrefsStore, PrefsStore, PrefsStoreFuture,
};
pub use surfaces::clipboard::{copy_text_with_fallback, ClipboardService, MemoryClipboard};
pub use surfaces::picker::{
    FolderPicker, StaticFolderPicker, HELPER_WINDOW_HEIGHT, HELPER_WINDOW_WIDTH,
};
pub use surfaces::viewer::{DocumentViewer, OpenedDocument, RecordingViewer};
pub use surfaces::SurfaceFuture;
pub use time::unix_time_ms_now;
