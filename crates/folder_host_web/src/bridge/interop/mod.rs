//! Shared transport interop for browser bridge domains.
//!
//! Routes calls to the `wasm32` implementation or to the non-wasm shim while keeping one
//! signature per operation. Per-handle File System Access calls exist only on `wasm32`.

use std::rc::Rc;

use folder_host::{DirectoryHandle, HandleError};

#[cfg(not(target_arch = "wasm32"))]
mod non_wasm;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(not(target_arch = "wasm32"))]
use non_wasm as imp;
#[cfg(target_arch = "wasm32")]
use wasm as imp;

#[cfg(target_arch = "wasm32")]
pub use wasm::{
    children, directory, file, handle_name, is_directory_handle, last_modified, move_entry,
    query_permission, read_file, remove_entry, request_permission, supports_move, write_file,
};

pub async fn load_folder() -> Result<Option<Rc<dyn DirectoryHandle>>, String> {
    imp::load_folder().await
}

pub async fn save_folder(folder: &dyn DirectoryHandle) -> Result<(), String> {
    imp::save_folder(folder).await
}

pub async fn cache_get_text(key: &str) -> Result<Option<String>, String> {
    imp::cache_get_text(key).await
}

pub async fn cache_put_text(key: &str, raw_json: &str) -> Result<(), String> {
    imp::cache_put_text(key, raw_json).await
}

pub async fn pick_directory() -> Result<Rc<dyn DirectoryHandle>, HandleError> {
    imp::pick_directory().await
}

pub async fn open_helper_window(width: u32, height: u32) -> Result<(), String> {
    imp::open_helper_window(width, height).await
}

pub async fn open_document(name: &str, bytes: &[u8], revoke_after_ms: u32) -> Result<(), String> {
    imp::open_document(name, bytes, revoke_after_ms).await
}

pub async fn clipboard_write(text: &str) -> Result<(), String> {
    imp::clipboard_write(text).await
}

pub async fn clipboard_write_fallback(text: &str) -> Result<(), String> {
    imp::clipboard_write_fallback(text).await
}
