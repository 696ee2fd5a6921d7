//! Navigation state: ancestor stack plus the current directory.

use std::{fmt, rc::Rc};

use folder_host::{DirectoryHandle, ROOT_CACHE_KEY};

#[derive(Clone)]
/// Position inside the selected folder tree.
///
/// The ancestor stack is empty exactly when the current directory is the root.
pub struct NavigationState {
    ancestors: Vec<Rc<dyn DirectoryHandle>>,
    current: Rc<dyn DirectoryHandle>,
}

impl fmt::Debug for NavigationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationState")
            .field("breadcrumbs", &self.breadcrumbs())
            .finish()
    }
}

impl NavigationState {
    /// Starts at `root`.
    pub fn new(root: Rc<dyn DirectoryHandle>) -> Self {
        Self {
            ancestors: Vec::new(),
            current: root,
        }
    }

    /// Rebuilds a position from an oldest-first ancestor stack and the current directory.
    pub fn from_parts(
        ancestors: Vec<Rc<dyn DirectoryHandle>>,
        current: Rc<dyn DirectoryHandle>,
    ) -> Self {
        Self { ancestors, current }
    }

    /// Current directory.
    pub fn current(&self) -> &Rc<dyn DirectoryHandle> {
        &self.current
    }

    /// Navigation root: the oldest ancestor, or the current directory at the top level.
    pub fn root(&self) -> &Rc<dyn DirectoryHandle> {
        self.ancestors.first().unwrap_or(&self.current)
    }

    /// Number of ancestors above the current directory.
    pub fn depth(&self) -> usize {
        self.ancestors.len()
    }

    /// Returns `true` when the current directory is the root.
    pub fn is_root(&self) -> bool {
        self.ancestors.is_empty()
    }

    /// Enters `child`, pushing the current directory onto the stack.
    pub fn descend(&mut self, child: Rc<dyn DirectoryHandle>) {
        let parent = std::mem::replace(&mut self.current, child);
        self.ancestors.push(parent);
    }

    /// Goes up one level. Returns `false` at the root.
    pub fn ascend_one(&mut self) -> bool {
        match self.ancestors.pop() {
            Some(parent) => {
                self.current = parent;
                true
            }
            None => false,
        }
    }

    /// Jumps to the breadcrumb at `depth` (`0` is the root).
    ///
    /// Jumping to the current depth is a no-op; a depth past the current one is rejected.
    pub fn jump_to(&mut self, depth: usize) -> bool {
        if depth > self.ancestors.len() {
            return false;
        }
        if depth < self.ancestors.len() {
            self.current = Rc::clone(&self.ancestors[depth]);
            self.ancestors.truncate(depth);
        }
        true
    }

    /// Directory names from the root to the current directory.
    pub fn breadcrumbs(&self) -> Vec<String> {
        self.ancestors
            .iter()
            .chain(std::iter::once(&self.current))
            .map(|dir| dir.name())
            .collect()
    }

    /// Listing cache key: `"root"` at the top level, otherwise the current directory's name.
    pub fn cache_key(&self) -> String {
        if self.is_root() {
            ROOT_CACHE_KEY.to_string()
        } else {
            self.current.name()
        }
    }

    /// Path of the current directory relative to the root (root excluded, `""` at the root).
    pub fn relative_path(&self) -> String {
        if self.is_root() {
            return String::new();
        }
        self.ancestors
            .iter()
            .skip(1)
            .chain(std::iter::once(&self.current))
            .map(|dir| dir.name())
            .collect::<Vec<_>>()
            .join("/")
    }
}
