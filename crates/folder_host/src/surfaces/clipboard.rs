//! Clipboard contract with a selection-copy fallback path.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use super::SurfaceFuture;

/// Host clipboard access.
pub trait ClipboardService {
    /// Writes text through the primary clipboard API.
    fn write_text<'a>(&'a self, text: &'a str) -> SurfaceFuture<'a, Result<(), String>>;

    /// Writes text through the select-and-copy fallback.
    fn write_text_fallback<'a>(&'a self, text: &'a str) -> SurfaceFuture<'a, Result<(), String>>;
}

/// Copies `text`, retrying through the fallback path when the primary API fails.
///
/// # Errors
///
/// Returns the fallback error when both paths fail.
pub async fn copy_text_with_fallback<C: ClipboardService + ?Sized>(
    clipboard: &C,
    text: &str,
) -> Result<(), String> {
    match clipboard.write_text(text).await {
        Ok(()) => Ok(()),
        Err(_) => clipboard.write_text_fallback(text).await,
    }
}

#[derive(Debug, Clone)]
/// In-memory clipboard whose primary API can be switched off.
pub struct MemoryClipboard {
    primary_available: Rc<Cell<bool>>,
    used_fallback: Rc<Cell<bool>>,
    contents: Rc<RefCell<Option<String>>>,
}

impl Default for MemoryClipboard {
    fn default() -> Self {
        Self {
            primary_available: Rc::new(Cell::new(true)),
            used_fallback: Rc::default(),
            contents: Rc::default(),
        }
    }
}

impl MemoryClipboard {
    /// Enables or disables the primary clipboard API.
    pub fn set_primary_available(&self, available: bool) {
        self.primary_available.set(available);
    }

    /// Last copied text.
    pub fn contents(&self) -> Option<String> {
        self.contents.borrow().clone()
    }

    /// Whether the last copy went through the fallback path.
    pub fn used_fallback(&self) -> bool {
        self.used_fallback.get()
    }
}

impl ClipboardService for MemoryClipboard {
    fn write_text<'a>(&'a self, text: &'a str) -> SurfaceFuture<'a, Result<(), String>> {
        Box::pin(async move {
            if !self.primary_available.get() {
                return Err("clipboard API unavailable".to_string());
            }
            self.used_fallback.set(false);
            *self.contents.borrow_mut() = Some(text.to_string());
            Ok(())
        })
    }

    fn write_text_fallback<'a>(&'a self, text: &'a str) -> SurfaceFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.used_fallback.set(true);
            *self.contents.borrow_mut() = Some(text.to_string());
            Ok(())
        })
    }
}
