//! Directory/file capability contracts.
//!
//! A handle is an opaque capability: it carries its own permission state and can be persisted
//! across sessions by the host. Implementations exist for the browser File System Access API
//! (`folder_host_web`) and for in-memory trees ([`super::memory`]).

use std::{any::Any, fmt, future::Future, pin::Pin, rc::Rc};

use super::types::{EntryKind, HandleError, PermissionMode, PermissionState};

/// Object-safe boxed future used by handle async methods.
pub type HandleFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Capability for a directory.
pub trait DirectoryHandle {
    /// Base name of the directory.
    fn name(&self) -> String;

    /// Queries the current permission without prompting.
    fn query_permission<'a>(
        &'a self,
        mode: PermissionMode,
    ) -> HandleFuture<'a, Result<PermissionState, HandleError>>;

    /// Requests permission, possibly showing an interactive prompt.
    fn request_permission<'a>(
        &'a self,
        mode: PermissionMode,
    ) -> HandleFuture<'a, Result<PermissionState, HandleError>>;

    /// Enumerates the direct children of the directory.
    fn children<'a>(&'a self) -> HandleFuture<'a, Result<Vec<ChildHandle>, HandleError>>;

    /// Looks up an existing child directory by name.
    fn directory<'a>(
        &'a self,
        name: &'a str,
    ) -> HandleFuture<'a, Result<Rc<dyn DirectoryHandle>, HandleError>>;

    /// Looks up a child file by name, creating an empty one when `create` is set.
    fn file<'a>(
        &'a self,
        name: &'a str,
        create: bool,
    ) -> HandleFuture<'a, Result<Rc<dyn FileHandle>, HandleError>>;

    /// Removes a child entry; `recursive` is required for non-empty directories.
    fn remove_entry<'a>(
        &'a self,
        name: &'a str,
        recursive: bool,
    ) -> HandleFuture<'a, Result<(), HandleError>>;

    /// Returns `true` when [`DirectoryHandle::rename`] is implemented natively.
    fn supports_rename(&self) -> bool;

    /// Renames the directory in place.
    fn rename<'a>(&'a self, new_name: &'a str) -> HandleFuture<'a, Result<(), HandleError>>;

    /// Exposes the concrete handle so stores can persist host-native objects.
    fn as_any(&self) -> &dyn Any;
}

/// Capability for a file.
pub trait FileHandle {
    /// Base name of the file.
    fn name(&self) -> String;

    /// Opens the file and returns its modification time in unix milliseconds.
    fn last_modified<'a>(&'a self) -> HandleFuture<'a, Result<u64, HandleError>>;

    /// Reads the full file contents.
    fn read<'a>(&'a self) -> HandleFuture<'a, Result<Vec<u8>, HandleError>>;

    /// Replaces the file contents.
    fn write<'a>(&'a self, bytes: &'a [u8]) -> HandleFuture<'a, Result<(), HandleError>>;

    /// Returns `true` when [`FileHandle::rename`] is implemented natively.
    fn supports_rename(&self) -> bool;

    /// Renames the file in place.
    fn rename<'a>(&'a self, new_name: &'a str) -> HandleFuture<'a, Result<(), HandleError>>;
}

#[derive(Clone)]
/// Child handle yielded by directory enumeration.
pub enum ChildHandle {
    /// Child directory.
    Directory(Rc<dyn DirectoryHandle>),
    /// Child file.
    File(Rc<dyn FileHandle>),
}

impl ChildHandle {
    /// Base name of the child.
    pub fn name(&self) -> String {
        match self {
            Self::Directory(dir) => dir.name(),
            Self::File(file) => file.name(),
        }
    }

    /// Entry kind of the child.
    pub fn kind(&self) -> EntryKind {
        match self {
            Self::Directory(_) => EntryKind::Directory,
            Self::File(_) => EntryKind::File,
        }
    }

    /// Returns `true` when the child can be renamed in place.
    pub fn supports_rename(&self) -> bool {
        match self {
            Self::Directory(dir) => dir.supports_rename(),
            Self::File(file) => file.supports_rename(),
        }
    }

    /// Renames the child in place.
    pub async fn rename(&self, new_name: &str) -> Result<(), HandleError> {
        match self {
            Self::Directory(dir) => dir.rename(new_name).await,
            Self::File(file) => file.rename(new_name).await,
        }
    }
}

impl fmt::Debug for ChildHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChildHandle")
            .field("kind", &self.kind())
            .field("name", &self.name())
            .finish()
    }
}
