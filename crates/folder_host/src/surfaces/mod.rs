//! Host surfaces the shelf talks to besides the filesystem: folder picker/helper window,
//! document viewer, and clipboard.

use std::{future::Future, pin::Pin};

pub mod clipboard;
pub mod picker;
pub mod viewer;

/// Object-safe boxed future used by surface services.
pub type SurfaceFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;
