//! In-memory directory/file handles for tests and non-browser hosts.
//!
//! A tree shares one [`MemoryAccess`] grant table, mirroring how a browser grant on a picked
//! folder covers everything below it. Builder methods (`add_dir`, `add_file`, ...) bypass
//! permission checks; trait methods enforce them.

use std::{
    any::Any,
    cell::{Cell, RefCell},
    fmt,
    rc::{Rc, Weak},
};

use super::handle::{ChildHandle, DirectoryHandle, FileHandle, HandleFuture};
use super::types::{HandleError, PermissionMode, PermissionState};
use crate::time::unix_time_ms_now;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// How an interactive permission request resolves.
pub enum PromptBehavior {
    /// The user grants the request.
    Grant,
    /// The user denies the request.
    Deny,
    /// No prompt can be shown; the request itself fails.
    Unavailable,
    /// The request fails, but read and write access were granted through another surface
    /// before it returned.
    GrantedElsewhere,
}

#[derive(Debug)]
/// Shared permission table and fault switches for one in-memory tree.
pub struct MemoryAccess {
    read: Cell<PermissionState>,
    readwrite: Cell<PermissionState>,
    prompt: Cell<PromptBehavior>,
    native_rename: Cell<bool>,
    fail_writes: Cell<bool>,
    requests: RefCell<Vec<PermissionMode>>,
    last_stamp: Cell<u64>,
}

impl Default for MemoryAccess {
    fn default() -> Self {
        Self {
            read: Cell::new(PermissionState::Granted),
            readwrite: Cell::new(PermissionState::Granted),
            prompt: Cell::new(PromptBehavior::Grant),
            native_rename: Cell::new(true),
            fail_writes: Cell::new(false),
            requests: RefCell::new(Vec::new()),
            last_stamp: Cell::new(0),
        }
    }
}

impl MemoryAccess {
    /// Sets the stored permission state for `mode`.
    pub fn set_permission(&self, mode: PermissionMode, state: PermissionState) {
        match mode {
            PermissionMode::Read => self.read.set(state),
            PermissionMode::Readwrite => self.readwrite.set(state),
        }
    }

    /// Revokes both read and write access (state becomes `prompt`).
    pub fn revoke_all(&self) {
        self.read.set(PermissionState::Prompt);
        self.readwrite.set(PermissionState::Prompt);
    }

    /// Configures how interactive requests resolve.
    pub fn set_prompt(&self, behavior: PromptBehavior) {
        self.prompt.set(behavior);
    }

    /// Enables or disables native in-place rename.
    pub fn set_native_rename(&self, enabled: bool) {
        self.native_rename.set(enabled);
    }

    /// Makes every file write fail with an I/O error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Interactive permission requests issued so far, oldest first.
    pub fn requests(&self) -> Vec<PermissionMode> {
        self.requests.borrow().clone()
    }

    /// Modification time for a create or write; strictly increases within one tree.
    fn next_stamp(&self) -> u64 {
        let stamp = unix_time_ms_now().max(self.last_stamp.get().saturating_add(1));
        self.last_stamp.set(stamp);
        stamp
    }

    fn query(&self, mode: PermissionMode) -> PermissionState {
        match mode {
            PermissionMode::Read if self.readwrite.get().is_granted() => PermissionState::Granted,
            PermissionMode::Read => self.read.get(),
            PermissionMode::Readwrite => self.readwrite.get(),
        }
    }

    fn request(&self, mode: PermissionMode) -> Result<PermissionState, HandleError> {
        self.requests.borrow_mut().push(mode);
        if self.query(mode).is_granted() {
            return Ok(PermissionState::Granted);
        }
        match self.prompt.get() {
            PromptBehavior::Grant => {
                self.read.set(PermissionState::Granted);
                if mode == PermissionMode::Readwrite {
                    self.readwrite.set(PermissionState::Granted);
                }
                Ok(PermissionState::Granted)
            }
            PromptBehavior::Deny => Ok(PermissionState::Denied),
            PromptBehavior::Unavailable => Err(HandleError::Unsupported(
                "permission prompt unavailable".to_string(),
            )),
            PromptBehavior::GrantedElsewhere => {
                self.read.set(PermissionState::Granted);
                self.readwrite.set(PermissionState::Granted);
                Err(HandleError::Unsupported(
                    "permission prompt unavailable".to_string(),
                ))
            }
        }
    }

    fn require(&self, mode: PermissionMode, op: &str) -> Result<(), HandleError> {
        if self.query(mode).is_granted() {
            Ok(())
        } else {
            Err(HandleError::PermissionDenied(format!(
                "{op} requires {} access",
                mode.as_str()
            )))
        }
    }
}

#[derive(Debug)]
struct DirNode {
    name: String,
    parent: Weak<RefCell<DirNode>>,
    children: Vec<Node>,
    listing_fails: bool,
}

#[derive(Debug)]
struct FileNode {
    name: String,
    parent: Weak<RefCell<DirNode>>,
    bytes: Vec<u8>,
    last_modified: u64,
}

#[derive(Debug, Clone)]
enum Node {
    Dir(Rc<RefCell<DirNode>>),
    File(Rc<RefCell<FileNode>>),
}

impl Node {
    fn name(&self) -> String {
        match self {
            Self::Dir(dir) => dir.borrow().name.clone(),
            Self::File(file) => file.borrow().name.clone(),
        }
    }
}

fn find_child(dir: &Rc<RefCell<DirNode>>, name: &str) -> Option<Node> {
    dir.borrow()
        .children
        .iter()
        .find(|child| child.name() == name)
        .cloned()
}

fn rename_node(
    parent: &Weak<RefCell<DirNode>>,
    current: &str,
    new_name: &str,
) -> Result<(), HandleError> {
    if new_name.is_empty() {
        return Err(HandleError::Io("name must not be empty".to_string()));
    }
    if let Some(parent) = parent.upgrade() {
        if new_name != current && find_child(&parent, new_name).is_some() {
            return Err(HandleError::Io(format!("`{new_name}` already exists")));
        }
    }
    Ok(())
}

#[derive(Clone)]
/// In-memory directory handle.
pub struct MemoryDirectory {
    node: Rc<RefCell<DirNode>>,
    access: Rc<MemoryAccess>,
}

impl fmt::Debug for MemoryDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryDirectory")
            .field("name", &self.node.borrow().name)
            .finish()
    }
}

impl MemoryDirectory {
    /// Creates a new root directory with all access granted.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            node: Rc::new(RefCell::new(DirNode {
                name: name.into(),
                parent: Weak::new(),
                children: Vec::new(),
                listing_fails: false,
            })),
            access: Rc::new(MemoryAccess::default()),
        }
    }

    /// Returns the grant table shared by this tree.
    pub fn access(&self) -> Rc<MemoryAccess> {
        Rc::clone(&self.access)
    }

    /// Returns the directory as a shared capability object.
    pub fn handle(&self) -> Rc<dyn DirectoryHandle> {
        Rc::new(self.clone())
    }

    /// Appends a child directory and returns it.
    pub fn add_dir(&self, name: impl Into<String>) -> MemoryDirectory {
        let node = Rc::new(RefCell::new(DirNode {
            name: name.into(),
            parent: Rc::downgrade(&self.node),
            children: Vec::new(),
            listing_fails: false,
        }));
        self.node
            .borrow_mut()
            .children
            .push(Node::Dir(Rc::clone(&node)));
        MemoryDirectory {
            node,
            access: Rc::clone(&self.access),
        }
    }

    /// Appends a child file and returns it.
    pub fn add_file(
        &self,
        name: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
        last_modified: u64,
    ) -> MemoryFile {
        let node = Rc::new(RefCell::new(FileNode {
            name: name.into(),
            parent: Rc::downgrade(&self.node),
            bytes: bytes.into(),
            last_modified,
        }));
        self.node
            .borrow_mut()
            .children
            .push(Node::File(Rc::clone(&node)));
        MemoryFile {
            node,
            access: Rc::clone(&self.access),
        }
    }

    /// Makes enumeration of this directory fail with an I/O error.
    pub fn set_listing_fails(&self, fails: bool) {
        self.node.borrow_mut().listing_fails = fails;
    }

    /// Child names in insertion order.
    pub fn child_names(&self) -> Vec<String> {
        self.node.borrow().children.iter().map(Node::name).collect()
    }

    /// Finds a child file by name without permission checks.
    pub fn find_file(&self, name: &str) -> Option<MemoryFile> {
        match find_child(&self.node, name)? {
            Node::File(node) => Some(MemoryFile {
                node,
                access: Rc::clone(&self.access),
            }),
            Node::Dir(_) => None,
        }
    }

    /// Finds a child directory by name without permission checks.
    pub fn find_dir(&self, name: &str) -> Option<MemoryDirectory> {
        match find_child(&self.node, name)? {
            Node::Dir(node) => Some(MemoryDirectory {
                node,
                access: Rc::clone(&self.access),
            }),
            Node::File(_) => None,
        }
    }

    fn wrap(&self, node: Node) -> ChildHandle {
        let access = Rc::clone(&self.access);
        match node {
            Node::Dir(node) => ChildHandle::Directory(Rc::new(MemoryDirectory { node, access })),
            Node::File(node) => ChildHandle::File(Rc::new(MemoryFile { node, access })),
        }
    }
}

impl DirectoryHandle for MemoryDirectory {
    fn name(&self) -> String {
        self.node.borrow().name.clone()
    }

    fn query_permission<'a>(
        &'a self,
        mode: PermissionMode,
    ) -> HandleFuture<'a, Result<PermissionState, HandleError>> {
        Box::pin(async move { Ok(self.access.query(mode)) })
    }

    fn request_permission<'a>(
        &'a self,
        mode: PermissionMode,
    ) -> HandleFuture<'a, Result<PermissionState, HandleError>> {
        Box::pin(async move { self.access.request(mode) })
    }

    fn children<'a>(&'a self) -> HandleFuture<'a, Result<Vec<ChildHandle>, HandleError>> {
        Box::pin(async move {
            self.access.require(PermissionMode::Read, "list")?;
            let node = self.node.borrow();
            if node.listing_fails {
                return Err(HandleError::Io(format!("failed to enumerate `{}`", node.name)));
            }
            let children = node.children.clone();
            drop(node);
            Ok(children.into_iter().map(|child| self.wrap(child)).collect())
        })
    }

    fn directory<'a>(
        &'a self,
        name: &'a str,
    ) -> HandleFuture<'a, Result<Rc<dyn DirectoryHandle>, HandleError>> {
        Box::pin(async move {
            self.access.require(PermissionMode::Read, "lookup")?;
            match find_child(&self.node, name) {
                Some(Node::Dir(node)) => Ok(Rc::new(MemoryDirectory {
                    node,
                    access: Rc::clone(&self.access),
                }) as Rc<dyn DirectoryHandle>),
                Some(Node::File(_)) => Err(HandleError::Io(format!("`{name}` is a file"))),
                None => Err(HandleError::NotFound(name.to_string())),
            }
        })
    }

    fn file<'a>(
        &'a self,
        name: &'a str,
        create: bool,
    ) -> HandleFuture<'a, Result<Rc<dyn FileHandle>, HandleError>> {
        Box::pin(async move {
            self.access.require(PermissionMode::Read, "lookup")?;
            match find_child(&self.node, name) {
                Some(Node::File(node)) => Ok(Rc::new(MemoryFile {
                    node,
                    access: Rc::clone(&self.access),
                }) as Rc<dyn FileHandle>),
                Some(Node::Dir(_)) => Err(HandleError::Io(format!("`{name}` is a directory"))),
                None if create => {
                    self.access.require(PermissionMode::Readwrite, "create")?;
                    let file = self.add_file(name, Vec::new(), self.access.next_stamp());
                    Ok(Rc::new(file) as Rc<dyn FileHandle>)
                }
                None => Err(HandleError::NotFound(name.to_string())),
            }
        })
    }

    fn remove_entry<'a>(
        &'a self,
        name: &'a str,
        recursive: bool,
    ) -> HandleFuture<'a, Result<(), HandleError>> {
        Box::pin(async move {
            self.access.require(PermissionMode::Readwrite, "remove")?;
            let mut node = self.node.borrow_mut();
            let idx = node
                .children
                .iter()
                .position(|child| child.name() == name)
                .ok_or_else(|| HandleError::NotFound(name.to_string()))?;
            if let Node::Dir(dir) = &node.children[idx] {
                if !recursive && !dir.borrow().children.is_empty() {
                    return Err(HandleError::Io(format!("directory `{name}` is not empty")));
                }
            }
            node.children.remove(idx);
            Ok(())
        })
    }

    fn supports_rename(&self) -> bool {
        self.access.native_rename.get()
    }

    fn rename<'a>(&'a self, new_name: &'a str) -> HandleFuture<'a, Result<(), HandleError>> {
        Box::pin(async move {
            if !self.supports_rename() {
                return Err(HandleError::Unsupported("directory rename".to_string()));
            }
            self.access.require(PermissionMode::Readwrite, "rename")?;
            let (parent, current) = {
                let node = self.node.borrow();
                (node.parent.clone(), node.name.clone())
            };
            rename_node(&parent, &current, new_name)?;
            self.node.borrow_mut().name = new_name.to_string();
            Ok(())
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Clone)]
/// In-memory file handle.
pub struct MemoryFile {
    node: Rc<RefCell<FileNode>>,
    access: Rc<MemoryAccess>,
}

impl fmt::Debug for MemoryFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryFile")
            .field("name", &self.node.borrow().name)
            .finish()
    }
}

impl MemoryFile {
    /// Current file contents without permission checks.
    pub fn contents(&self) -> Vec<u8> {
        self.node.borrow().bytes.clone()
    }

    /// Current modification time without permission checks.
    pub fn modified_at(&self) -> u64 {
        self.node.borrow().last_modified
    }
}

impl FileHandle for MemoryFile {
    fn name(&self) -> String {
        self.node.borrow().name.clone()
    }

    fn last_modified<'a>(&'a self) -> HandleFuture<'a, Result<u64, HandleError>> {
        Box::pin(async move {
            self.access.require(PermissionMode::Read, "open")?;
            Ok(self.node.borrow().last_modified)
        })
    }

    fn read<'a>(&'a self) -> HandleFuture<'a, Result<Vec<u8>, HandleError>> {
        Box::pin(async move {
            self.access.require(PermissionMode::Read, "read")?;
            Ok(self.node.borrow().bytes.clone())
        })
    }

    fn write<'a>(&'a self, bytes: &'a [u8]) -> HandleFuture<'a, Result<(), HandleError>> {
        Box::pin(async move {
            self.access.require(PermissionMode::Readwrite, "write")?;
            if self.access.fail_writes.get() {
                return Err(HandleError::Io("write failed".to_string()));
            }
            let mut node = self.node.borrow_mut();
            node.bytes = bytes.to_vec();
            node.last_modified = self.access.next_stamp();
            Ok(())
        })
    }

    fn supports_rename(&self) -> bool {
        self.access.native_rename.get()
    }

    fn rename<'a>(&'a self, new_name: &'a str) -> HandleFuture<'a, Result<(), HandleError>> {
        Box::pin(async move {
            if !self.supports_rename() {
                return Err(HandleError::Unsupported("file rename".to_string()));
            }
            self.access.require(PermissionMode::Readwrite, "rename")?;
            let (parent, current) = {
                let node = self.node.borrow();
                (node.parent.clone(), node.name.clone())
            };
            rename_node(&parent, &current, new_name)?;
            self.node.borrow_mut().name = new_name.to_string();
            Ok(())
        })
    }
}
