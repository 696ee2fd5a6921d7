//! Folder-picker and helper-window contracts.

use std::{cell::Cell, rc::Rc};

use super::SurfaceFuture;
use crate::fs::handle::DirectoryHandle;
use crate::fs::types::HandleError;

/// Width of the helper window that hosts pickers and permission prompts.
pub const HELPER_WINDOW_WIDTH: u32 = 360;
/// Height of the helper window that hosts pickers and permission prompts.
pub const HELPER_WINDOW_HEIGHT: u32 = 140;

/// Host service for choosing a folder and spawning the helper window.
///
/// The popup surface is torn down when a native dialog takes focus, so interactive prompts are
/// routed through a separate helper window.
pub trait FolderPicker {
    /// Runs the interactive folder picker.
    ///
    /// Returns [`HandleError::Aborted`] when the user dismisses it.
    fn pick_folder<'a>(
        &'a self,
    ) -> SurfaceFuture<'a, Result<Rc<dyn DirectoryHandle>, HandleError>>;

    /// Opens the helper window that can host the picker or a permission prompt.
    fn open_helper_window<'a>(&'a self) -> SurfaceFuture<'a, Result<(), String>>;
}

#[derive(Clone, Default)]
/// Picker returning a preset folder (or cancelling when none is set).
pub struct StaticFolderPicker {
    folder: Option<Rc<dyn DirectoryHandle>>,
    helper_opened: Rc<Cell<u32>>,
}

impl StaticFolderPicker {
    /// Creates a picker that always selects `folder`.
    pub fn selecting(folder: Rc<dyn DirectoryHandle>) -> Self {
        Self {
            folder: Some(folder),
            helper_opened: Rc::default(),
        }
    }

    /// Creates a picker the user always dismisses.
    pub fn cancelling() -> Self {
        Self::default()
    }

    /// Number of helper windows opened so far.
    pub fn helper_windows_opened(&self) -> u32 {
        self.helper_opened.get()
    }
}

impl FolderPicker for StaticFolderPicker {
    fn pick_folder<'a>(
        &'a self,
    ) -> SurfaceFuture<'a, Result<Rc<dyn DirectoryHandle>, HandleError>> {
        Box::pin(async move { self.folder.clone().ok_or(HandleError::Aborted) })
    }

    fn open_helper_window<'a>(&'a self) -> SurfaceFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.helper_opened.set(self.helper_opened.get() + 1);
            Ok(())
        })
    }
}
