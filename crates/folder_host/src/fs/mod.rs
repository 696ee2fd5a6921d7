//! Folder capability contracts, shared models, and in-memory adapters.

pub mod handle;
pub mod memory;
pub mod path;
pub mod types;
