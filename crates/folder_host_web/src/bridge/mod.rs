//! Browser capability bridge for the `folder_host_web` adapters.
//!
//! Covers the IndexedDB folder/cache store, the folder picker and helper window, the blob-URL
//! document viewer, and the clipboard. Per-handle File System Access calls are re-exported for
//! the `wasm32` handle types only.

mod interop;

use std::rc::Rc;

use folder_host::{DirectoryHandle, HandleError};

#[cfg(target_arch = "wasm32")]
pub(crate) use interop::{
    children, directory, file, handle_name, is_directory_handle, last_modified, move_entry,
    query_permission, read_file, remove_entry, request_permission, supports_move, write_file,
};

pub async fn load_folder() -> Result<Option<Rc<dyn DirectoryHandle>>, String> {
    interop::load_folder().await
}

pub async fn save_folder(folder: &dyn DirectoryHandle) -> Result<(), String> {
    interop::save_folder(folder).await
}

pub async fn cache_get_text(key: &str) -> Result<Option<String>, String> {
    interop::cache_get_text(key).await
}

pub async fn cache_put_text(key: &str, raw_json: &str) -> Result<(), String> {
    interop::cache_put_text(key, raw_json).await
}

pub async fn pick_directory() -> Result<Rc<dyn DirectoryHandle>, HandleError> {
    interop::pick_directory().await
}

pub async fn open_helper_window(width: u32, height: u32) -> Result<(), String> {
    interop::open_helper_window(width, height).await
}

pub async fn open_document(name: &str, bytes: &[u8], revoke_after_ms: u32) -> Result<(), String> {
    interop::open_document(name, bytes, revoke_after_ms).await
}

pub async fn clipboard_write(text: &str) -> Result<(), String> {
    interop::clipboard_write(text).await
}

pub async fn clipboard_write_fallback(text: &str) -> Result<(), String> {
    interop::clipboard_write_fallback(text).await
}
