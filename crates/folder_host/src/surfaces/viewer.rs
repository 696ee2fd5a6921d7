//! Document viewer contract.

use std::{cell::RefCell, rc::Rc};

use super::SurfaceFuture;

/// Host service that displays raw document bytes in a new viewing context.
pub trait DocumentViewer {
    /// Opens `bytes` (named `name`) and releases any temporary URL after `revoke_after_ms`.
    fn open_document<'a>(
        &'a self,
        name: &'a str,
        bytes: Vec<u8>,
        revoke_after_ms: u32,
    ) -> SurfaceFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Document handed to a [`RecordingViewer`].
pub struct OpenedDocument {
    /// File name.
    pub name: String,
    /// Raw contents.
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Default)]
/// Viewer that records every opened document.
pub struct RecordingViewer {
    opened: Rc<RefCell<Vec<OpenedDocument>>>,
}

impl RecordingViewer {
    /// Documents opened so far, oldest first.
    pub fn opened(&self) -> Vec<OpenedDocument> {
        self.opened.borrow().clone()
    }
}

impl DocumentViewer for RecordingViewer {
    fn open_document<'a>(
        &'a self,
        name: &'a str,
        bytes: Vec<u8>,
        _revoke_after_ms: u32,
    ) -> SurfaceFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.opened.borrow_mut().push(OpenedDocument {
                name: name.to_string(),
                bytes,
            });
            Ok(())
        })
    }
}
