//! Persistence contracts: remembered folder, listing caches, and preferences.

pub mod folder_store;
pub mod prefs;
