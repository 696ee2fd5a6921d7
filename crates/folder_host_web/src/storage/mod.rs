//! Browser persistence adapters.

pub mod indexed_db;
pub mod local_prefs;
