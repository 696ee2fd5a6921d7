//! Browser (`wasm32`) implementations of the [`folder_host`] contracts for the PDF shelf
//! extension popup.
//!
//! - [`fs`]: File System Access API directory/file handles (`wasm32` only).
//! - [`storage`]: IndexedDB folder/cache store and `localStorage` preferences.
//! - [`surfaces`]: folder picker and helper window, blob-URL viewer, clipboard.
//!
//! All JS interop goes through the crate-private `bridge` module, which has a non-wasm shim so
//! the crate builds and tests on native targets.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod bridge;
pub mod fs;
pub mod storage;
pub mod surfaces;

#[cfg(target_arch = "wasm32")]
pub use fs::{WebDirectoryHandle, WebFileHandle};
pub use storage::indexed_db::WebFolderStore;
pub use storage::local_prefs::WebPrefsStore;
pub use surfaces::{WebClipboard, WebDocumentViewer, WebFolderPicker};
