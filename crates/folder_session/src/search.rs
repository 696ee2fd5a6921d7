//! Recursive name search below the navigation root, plus the trigger planner that decides
//! between a local filter and a traversal.
//!
//! Each subtree yields its own `Result`. A subtree that fails to enumerate contributes no
//! entries and is recorded in [`SearchReport::failures`]; the rest of the traversal continues.

use std::{future::Future, pin::Pin, rc::Rc};

use folder_host::{
    has_tracked_extension, join_relative_path, ChildHandle, DirectoryHandle, EntryRecord,
    HandleError,
};
use tracing::{debug, warn};

use crate::entry::{Entry, HydratedEntry};
use crate::error::SessionError;

type SubtreeFuture<'a> = Pin<Box<dyn Future<Output = Result<SearchReport, HandleError>> + 'a>>;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Subtree skipped during a search.
pub struct SubtreeFailure {
    /// Path of the failed directory relative to the root (root excluded).
    pub relative_path: String,
    /// Why the subtree was skipped.
    pub error: SessionError,
}

#[derive(Debug, Default)]
/// Matches found by [`search`], in depth-first order.
pub struct SearchReport {
    /// Matched directories and tracked files, each carrying its relative path.
    pub entries: Vec<HydratedEntry>,
    /// Subtrees that could not be searched.
    pub failures: Vec<SubtreeFailure>,
}

impl SearchReport {
    fn merge(&mut self, other: SearchReport) {
        self.entries.extend(other.entries);
        self.failures.extend(other.failures);
    }
}

/// Searches every directory below `root` for names containing `term` (case-insensitive).
///
/// Matching directories and matching files with `extension` are reported; other files never
/// are. Every directory is descended into whether or not it matched.
///
/// # Errors
///
/// Returns an error only when `root` itself cannot be enumerated.
pub async fn search(
    root: &Rc<dyn DirectoryHandle>,
    term: &str,
    extension: &str,
) -> Result<SearchReport, SessionError> {
    let needle = term.to_lowercase();
    let report = search_subtree(Rc::clone(root), String::new(), &needle, extension).await?;
    debug!(
        term,
        matches = report.entries.len(),
        failures = report.failures.len(),
        "search finished"
    );
    Ok(report)
}

fn search_subtree<'a>(
    dir: Rc<dyn DirectoryHandle>,
    path: String,
    needle: &'a str,
    extension: &'a str,
) -> SubtreeFuture<'a> {
    Box::pin(async move {
        let mut report = SearchReport::default();
        for child in dir.children().await? {
            let name = child.name();
            if name_matches(&name, needle) {
                let record = match &child {
                    ChildHandle::Directory(_) => Some(EntryRecord::directory(name.clone())),
                    ChildHandle::File(file) if has_tracked_extension(&name, extension) => {
                        Some(EntryRecord::file(name.clone(), file.last_modified().await?))
                    }
                    ChildHandle::File(_) => None,
                };
                if let Some(record) = record {
                    report.entries.push(HydratedEntry {
                        record,
                        handle: child.clone(),
                        parent: Rc::clone(&dir),
                        relative_path: Some(path.clone()),
                    });
                }
            }
            if let ChildHandle::Directory(sub) = child {
                let sub_path = join_relative_path([path.as_str(), name.as_str()]);
                match search_subtree(sub, sub_path.clone(), needle, extension).await {
                    Ok(nested) => report.merge(nested),
                    Err(err) => {
                        warn!(path = %sub_path, error = %err, "skipping unreadable subtree");
                        report.failures.push(SubtreeFailure {
                            relative_path: sub_path,
                            error: err.into(),
                        });
                    }
                }
            }
        }
        Ok(report)
    })
}

fn name_matches(name: &str, needle: &str) -> bool {
    name.to_lowercase().contains(needle)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// What a change of the search term should trigger.
pub enum SearchTrigger {
    /// Empty term: show the current listing unchanged.
    ShowListing,
    /// Short term: filter the current listing locally.
    LocalFilter,
    /// Long enough term: schedule a recursive traversal.
    Traverse,
}

/// Classifies `term`; terms with fewer than `min_chars` characters never traverse.
pub fn plan_search(term: &str, min_chars: usize) -> SearchTrigger {
    if term.is_empty() {
        SearchTrigger::ShowListing
    } else if term.chars().count() < min_chars {
        SearchTrigger::LocalFilter
    } else {
        SearchTrigger::Traverse
    }
}

/// Keeps the entries of the current listing whose name contains `term` (case-insensitive).
pub fn filter_local(entries: &[Entry], term: &str) -> Vec<Entry> {
    let needle = term.to_lowercase();
    entries
        .iter()
        .filter(|entry| name_matches(entry.name(), &needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use folder_host::MemoryDirectory;
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;

    fn summary(report: &SearchReport) -> Vec<(String, String)> {
        report
            .entries
            .iter()
            .map(|e| {
                (
                    e.record.name.clone(),
                    e.relative_path.clone().unwrap_or_default(),
                )
            })
            .collect()
    }

    #[test]
    fn matches_carry_parent_relative_paths() {
        let root = MemoryDirectory::new("Papers");
        root.add_dir("A").add_file("report.pdf", b"r".to_vec(), 4);
        root.add_dir("B").add_dir("replica");
        let report = block_on(search(&root.handle(), "rep", ".pdf")).expect("search");
        assert_eq!(
            summary(&report),
            vec![
                ("report.pdf".to_string(), "A".to_string()),
                ("replica".to_string(), "B".to_string()),
            ]
        );
        assert_eq!(report.entries[0].record.last_modified, 4);
        assert_eq!(report.entries[0].parent.name(), "A");
        assert!(report.failures.is_empty());
    }

    #[test]
    fn untracked_files_never_match_and_case_is_ignored() {
        let root = MemoryDirectory::new("Papers");
        root.add_file("Report.PDF", b"r".to_vec(), 1);
        root.add_file("report.txt", b"t".to_vec(), 1);
        let deep = root.add_dir("Deep").add_dir("Deeper");
        deep.add_file("old-REPORT.pdf", b"o".to_vec(), 1);

        let report = block_on(search(&root.handle(), "REPORT", ".pdf")).expect("search");
        assert_eq!(
            summary(&report),
            vec![
                ("Report.PDF".to_string(), String::new()),
                ("old-REPORT.pdf".to_string(), "Deep/Deeper".to_string()),
            ]
        );
    }

    #[test]
    fn failing_subtree_is_skipped_and_reported() {
        let root = MemoryDirectory::new("Papers");
        let broken = root.add_dir("Broken");
        broken.add_file("report-hidden.pdf", b"h".to_vec(), 1);
        broken.set_listing_fails(true);
        root.add_dir("Ok").add_file("report.pdf", b"r".to_vec(), 1);

        let report = block_on(search(&root.handle(), "rep", ".pdf")).expect("search");
        assert_eq!(
            summary(&report),
            vec![("report.pdf".to_string(), "Ok".to_string())]
        );
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].relative_path, "Broken");
        assert!(matches!(report.failures[0].error, SessionError::Io(_)));
    }

    #[test]
    fn unreadable_root_is_an_error() {
        let root = MemoryDirectory::new("Papers");
        root.access().revoke_all();
        let err = block_on(search(&root.handle(), "rep", ".pdf")).expect_err("denied");
        assert!(matches!(err, SessionError::Permission(_)));
    }

    #[test]
    fn trigger_planning_follows_term_length() {
        assert_eq!(plan_search("", 2), SearchTrigger::ShowListing);
        assert_eq!(plan_search("r", 2), SearchTrigger::LocalFilter);
        assert_eq!(plan_search("re", 2), SearchTrigger::Traverse);
        assert_eq!(plan_search("é", 2), SearchTrigger::LocalFilter);
    }

    #[test]
    fn local_filter_is_case_insensitive() {
        let entries = vec![
            Entry::Cached(EntryRecord::directory("Reports")),
            Entry::Cached(EntryRecord::file("x.pdf", 1)),
        ];
        let filtered = filter_local(&entries, "R");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name(), "Reports");
    }
}
