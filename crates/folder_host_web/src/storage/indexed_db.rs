//! IndexedDB-backed folder store (`PDF_Manager_DB`, stores `handles` and `cache`).

use std::rc::Rc;

use folder_host::{DirectoryHandle, FolderStore, FolderStoreFuture};

#[derive(Debug, Clone, Copy, Default)]
/// Browser folder store backed by IndexedDB.
///
/// The remembered folder is stored as a structured-clone of the browser handle, so only handles
/// produced by this crate can be saved. Cache slots hold plain JSON values.
pub struct WebFolderStore;

impl FolderStore for WebFolderStore {
    fn load_folder<'a>(
        &'a self,
    ) -> FolderStoreFuture<'a, Result<Option<Rc<dyn DirectoryHandle>>, String>> {
        Box::pin(async move { crate::bridge::load_folder().await })
    }

    fn save_folder<'a>(
        &'a self,
        folder: Rc<dyn DirectoryHandle>,
    ) -> FolderStoreFuture<'a, Result<(), String>> {
        Box::pin(async move { crate::bridge::save_folder(folder.as_ref()).await })
    }

    fn load_cache_text<'a>(
        &'a self,
        key: &'a str,
    ) -> FolderStoreFuture<'a, Result<Option<String>, String>> {
        Box::pin(async move { crate::bridge::cache_get_text(key).await })
    }

    fn save_cache_text<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> FolderStoreFuture<'a, Result<(), String>> {
        Box::pin(async move { crate::bridge::cache_put_text(key, raw_json).await })
    }
}
