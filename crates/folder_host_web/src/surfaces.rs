//! Browser picker, viewer, and clipboard surfaces.

use std::rc::Rc;

use folder_host::{
    ClipboardService, DirectoryHandle, DocumentViewer, FolderPicker, HandleError, SurfaceFuture,
    HELPER_WINDOW_HEIGHT, HELPER_WINDOW_WIDTH,
};

#[derive(Debug, Clone, Copy, Default)]
/// `showDirectoryPicker` plus the extension helper window (`popup.html?picker=1`).
pub struct WebFolderPicker;

impl FolderPicker for WebFolderPicker {
    fn pick_folder<'a>(
        &'a self,
    ) -> SurfaceFuture<'a, Result<Rc<dyn DirectoryHandle>, HandleError>> {
        Box::pin(async move { crate::bridge::pick_directory().await })
    }

    fn open_helper_window<'a>(&'a self) -> SurfaceFuture<'a, Result<(), String>> {
        Box::pin(async move {
            crate::bridge::open_helper_window(HELPER_WINDOW_WIDTH, HELPER_WINDOW_HEIGHT).await
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Opens documents in a new tab through a blob URL that is revoked after a delay.
pub struct WebDocumentViewer;

impl DocumentViewer for WebDocumentViewer {
    fn open_document<'a>(
        &'a self,
        name: &'a str,
        bytes: Vec<u8>,
        revoke_after_ms: u32,
    ) -> SurfaceFuture<'a, Result<(), String>> {
        Box::pin(async move { crate::bridge::open_document(name, &bytes, revoke_after_ms).await })
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// `navigator.clipboard` with a hidden-textarea `execCommand("copy")` fallback.
pub struct WebClipboard;

impl ClipboardService for WebClipboard {
    fn write_text<'a>(&'a self, text: &'a str) -> SurfaceFuture<'a, Result<(), String>> {
        Box::pin(async move { crate::bridge::clipboard_write(text).await })
    }

    fn write_text_fallback<'a>(&'a self, text: &'a str) -> SurfaceFuture<'a, Result<(), String>> {
        Box::pin(async move { crate::bridge::clipboard_write_fallback(text).await })
    }
}
