use std::{any::Any, fmt, rc::Rc};

use folder_host::{
    ChildHandle, DirectoryHandle, FileHandle, HandleError, HandleFuture, PermissionMode,
    PermissionState,
};
use wasm_bindgen::JsValue;

use crate::bridge;

fn wrap_child(value: JsValue) -> ChildHandle {
    if bridge::is_directory_handle(&value) {
        ChildHandle::Directory(Rc::new(WebDirectoryHandle::new(value)))
    } else {
        ChildHandle::File(Rc::new(WebFileHandle::new(value)))
    }
}

#[derive(Clone)]
/// `FileSystemDirectoryHandle` wrapper.
pub struct WebDirectoryHandle {
    handle: JsValue,
}

impl WebDirectoryHandle {
    /// Wraps a JS directory handle.
    pub fn new(handle: JsValue) -> Self {
        Self { handle }
    }

    /// Underlying JS handle, as stored in IndexedDB.
    pub fn js_value(&self) -> &JsValue {
        &self.handle
    }
}

impl fmt::Debug for WebDirectoryHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebDirectoryHandle")
            .field("name", &self.name())
            .finish()
    }
}

impl DirectoryHandle for WebDirectoryHandle {
    fn name(&self) -> String {
        bridge::handle_name(&self.handle)
    }

    fn query_permission<'a>(
        &'a self,
        mode: PermissionMode,
    ) -> HandleFuture<'a, Result<PermissionState, HandleError>> {
        Box::pin(async move { bridge::query_permission(&self.handle, mode).await })
    }

    fn request_permission<'a>(
        &'a self,
        mode: PermissionMode,
    ) -> HandleFuture<'a, Result<PermissionState, HandleError>> {
        Box::pin(async move { bridge::request_permission(&self.handle, mode).await })
    }

    fn children<'a>(&'a self) -> HandleFuture<'a, Result<Vec<ChildHandle>, HandleError>> {
        Box::pin(async move {
            let values = bridge::children(&self.handle).await?;
            Ok(values.into_iter().map(wrap_child).collect())
        })
    }

    fn directory<'a>(
        &'a self,
        name: &'a str,
    ) -> HandleFuture<'a, Result<Rc<dyn DirectoryHandle>, HandleError>> {
        Box::pin(async move {
            let value = bridge::directory(&self.handle, name).await?;
            Ok(Rc::new(WebDirectoryHandle::new(value)) as Rc<dyn DirectoryHandle>)
        })
    }

    fn file<'a>(
        &'a self,
        name: &'a str,
        create: bool,
    ) -> HandleFuture<'a, Result<Rc<dyn FileHandle>, HandleError>> {
        Box::pin(async move {
            let value = bridge::file(&self.handle, name, create).await?;
            Ok(Rc::new(WebFileHandle::new(value)) as Rc<dyn FileHandle>)
        })
    }

    fn remove_entry<'a>(
        &'a self,
        name: &'a str,
        recursive: bool,
    ) -> HandleFuture<'a, Result<(), HandleError>> {
        Box::pin(async move { bridge::remove_entry(&self.handle, name, recursive).await })
    }

    fn supports_rename(&self) -> bool {
        bridge::supports_move(&self.handle)
    }

    fn rename<'a>(&'a self, new_name: &'a str) -> HandleFuture<'a, Result<(), HandleError>> {
        Box::pin(async move { bridge::move_entry(&self.handle, new_name).await })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Clone)]
/// `FileSystemFileHandle` wrapper.
pub struct WebFileHandle {
    handle: JsValue,
}

impl WebFileHandle {
    /// Wraps a JS file handle.
    pub fn new(handle: JsValue) -> Self {
        Self { handle }
    }
}

impl fmt::Debug for WebFileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebFileHandle")
            .field("name", &self.name())
            .finish()
    }
}

impl FileHandle for WebFileHandle {
    fn name(&self) -> String {
        bridge::handle_name(&self.handle)
    }

    fn last_modified<'a>(&'a self) -> HandleFuture<'a, Result<u64, HandleError>> {
        Box::pin(async move { bridge::last_modified(&self.handle).await })
    }

    fn read<'a>(&'a self) -> HandleFuture<'a, Result<Vec<u8>, HandleError>> {
        Box::pin(async move { bridge::read_file(&self.handle).await })
    }

    fn write<'a>(&'a self, bytes: &'a [u8]) -> HandleFuture<'a, Result<(), HandleError>> {
        Box::pin(async move { bridge::write_file(&self.handle, bytes).await })
    }

    fn supports_rename(&self) -> bool {
        bridge::supports_move(&self.handle)
    }

    fn rename<'a>(&'a self, new_name: &'a str) -> HandleFuture<'a, Result<(), HandleError>> {
        Box::pin(async move { bridge::move_entry(&self.handle, new_name).await })
    }
}
