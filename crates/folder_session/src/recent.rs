//! Recent-files shelf stored in the cache partition under [`RECENT_FILES_KEY`].
//!
//! The shelf is most-recent first and unique by name. Concurrent writers overwrite each
//! other; the last save wins.

use folder_host::{
    join_relative_path, load_cache_json_with, save_cache_json_with, EntryKind, FolderStore,
    RECENT_FILES_KEY,
};
use tracing::warn;

use crate::entry::RecentEntry;

/// Moves `entry` to the front, dropping any older entry with the same name and keeping at
/// most `limit` entries.
pub fn push_recent(recent: &mut Vec<RecentEntry>, entry: RecentEntry, limit: usize) {
    recent.retain(|existing| existing.name != entry.name);
    recent.insert(0, entry);
    recent.truncate(limit);
}

/// Removes entries invalidated by deleting `name` (a child of `parent_path`).
///
/// Deleting a directory also drops every entry stored below it. Returns `true` when the shelf
/// changed.
pub fn purge_deleted(
    recent: &mut Vec<RecentEntry>,
    parent_path: &str,
    name: &str,
    kind: EntryKind,
) -> bool {
    let before = recent.len();
    match kind {
        EntryKind::File => {
            recent.retain(|entry| !(entry.name == name && entry.relative_path == parent_path));
        }
        EntryKind::Directory => {
            let removed = join_relative_path([parent_path, name]);
            let nested = format!("{removed}/");
            recent.retain(|entry| {
                entry.relative_path != removed && !entry.relative_path.starts_with(&nested)
            });
        }
    }
    recent.len() != before
}

/// Renames the entry `old_name` stored under `parent_path`. Returns `true` when one matched.
pub fn rename_in_recent(
    recent: &mut [RecentEntry],
    parent_path: &str,
    old_name: &str,
    new_name: &str,
) -> bool {
    let mut changed = false;
    for entry in recent
        .iter_mut()
        .filter(|entry| entry.name == old_name && entry.relative_path == parent_path)
    {
        entry.name = new_name.to_string();
        changed = true;
    }
    changed
}

/// Rewrites the paths of entries stored below a renamed directory. Returns `true` when any
/// entry moved.
pub fn rename_directory_in_recent(
    recent: &mut [RecentEntry],
    parent_path: &str,
    old_name: &str,
    new_name: &str,
) -> bool {
    let old_path = join_relative_path([parent_path, old_name]);
    let new_path = join_relative_path([parent_path, new_name]);
    let mut changed = false;
    for entry in recent.iter_mut() {
        let rest = if entry.relative_path == old_path {
            Some("")
        } else {
            entry
                .relative_path
                .strip_prefix(old_path.as_str())
                .filter(|rest| rest.starts_with('/'))
        };
        if let Some(rest) = rest {
            entry.relative_path = format!("{new_path}{rest}");
            changed = true;
        }
    }
    changed
}

/// Loads the shelf; a missing or unreadable slot yields an empty shelf.
pub async fn load_recent(store: &dyn FolderStore) -> Vec<RecentEntry> {
    match load_cache_json_with::<_, Vec<RecentEntry>>(store, RECENT_FILES_KEY).await {
        Ok(recent) => recent.unwrap_or_default(),
        Err(err) => {
            warn!(error = %err, "failed to read recent files");
            Vec::new()
        }
    }
}

/// Overwrites the stored shelf.
///
/// # Errors
///
/// Returns an error when serialization or store access fails.
pub async fn save_recent(store: &dyn FolderStore, recent: &[RecentEntry]) -> Result<(), String> {
    save_cache_json_with(store, RECENT_FILES_KEY, recent).await
}

#[cfg(test)]
mod tests {
    use folder_host::MemoryFolderStore;
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;

    fn recent(name: &str, path: &str) -> RecentEntry {
        RecentEntry {
            name: name.to_string(),
            kind: EntryKind::File,
            last_modified: 1,
            relative_path: path.to_string(),
        }
    }

    fn names(list: &[RecentEntry]) -> Vec<&str> {
        list.iter().map(|entry| entry.name.as_str()).collect()
    }

    #[test]
    fn push_dedupes_by_name_and_caps_the_shelf() {
        let mut list = Vec::new();
        for name in ["a.pdf", "b.pdf", "c.pdf", "d.pdf"] {
            push_recent(&mut list, recent(name, ""), 3);
        }
        assert_eq!(names(&list), vec!["d.pdf", "c.pdf", "b.pdf"]);

        push_recent(&mut list, recent("b.pdf", "A"), 3);
        assert_eq!(names(&list), vec!["b.pdf", "d.pdf", "c.pdf"]);
        assert_eq!(list[0].relative_path, "A");
    }

    #[test]
    fn purge_matches_file_path_or_directory_prefix() {
        let mut list = vec![
            recent("x.pdf", ""),
            recent("x.pdf", "A"),
            recent("y.pdf", "A/B"),
            recent("z.pdf", "AB"),
        ];
        assert!(purge_deleted(&mut list, "", "x.pdf", EntryKind::File));
        assert_eq!(list.len(), 3);
        assert_eq!(list[0].relative_path, "A");

        assert!(purge_deleted(&mut list, "", "A", EntryKind::Directory));
        assert_eq!(names(&list), vec!["z.pdf"]);
        assert!(!purge_deleted(&mut list, "", "missing.pdf", EntryKind::File));
    }

    #[test]
    fn rename_updates_the_matching_entry() {
        let mut list = vec![recent("x.pdf", "A"), recent("x.pdf", "")];
        assert!(rename_in_recent(&mut list, "A", "x.pdf", "renamed.pdf"));
        assert_eq!(names(&list), vec!["renamed.pdf", "x.pdf"]);
    }

    #[test]
    fn directory_rename_moves_nested_paths() {
        let mut list = vec![
            recent("a.pdf", "A"),
            recent("b.pdf", "A/B"),
            recent("c.pdf", "AB"),
        ];
        assert!(rename_directory_in_recent(&mut list, "", "A", "Z"));
        let paths: Vec<&str> = list.iter().map(|e| e.relative_path.as_str()).collect();
        assert_eq!(paths, vec!["Z", "Z/B", "AB"]);
    }

    #[test]
    fn shelf_round_trips_and_tolerates_corruption() {
        let store = MemoryFolderStore::default();
        assert!(block_on(load_recent(&store)).is_empty());

        let list = vec![recent("a.pdf", "A")];
        block_on(save_recent(&store, &list)).expect("save");
        assert_eq!(block_on(load_recent(&store)), list);

        block_on(store.save_cache_text(RECENT_FILES_KEY, "oops")).expect("corrupt");
        assert!(block_on(load_recent(&store)).is_empty());
    }
}
