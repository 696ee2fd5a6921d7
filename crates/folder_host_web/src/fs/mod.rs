//! File System Access API handle adapters.
//!
//! Only compiled for `wasm32`; other targets never see a browser handle and use the in-memory
//! adapters from `folder_host` instead.

#[cfg(target_arch = "wasm32")]
mod native;

#[cfg(target_arch = "wasm32")]
pub use native::{WebDirectoryHandle, WebFileHandle};
