use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use folder_host::{
    load_cache_json_with, load_shelf_prefs_with, ChildHandle, DirectoryHandle, EntryRecord,
    FileHandle, FolderStore, HandleError, HandleFuture, MemoryClipboard, MemoryDirectory,
    MemoryFolderStore, MemoryPrefsStore, PermissionMode, PermissionState, PromptBehavior,
    RecordingViewer, SortField, StaticFolderPicker, RECENT_FILES_KEY, ROOT_CACHE_KEY,
};
use folder_session::{
    Entry, FolderSession, HydratedEntry, ListingSource, ListingView, OpenDisposition,
    OpenOutcome, PickOutcome, RecentEntry, RenameOutcome, SearchPlan, SearchRun, SearchStatus,
    SearchTicket, SessionError, ShelfView, SortOrder,
};
use futures::channel::oneshot;
use futures::executor::block_on;
use futures::poll;
use pretty_assertions::assert_eq;

const DAY_MS: u64 = 86_400_000;

struct Fixture {
    root: MemoryDirectory,
    store: MemoryFolderStore,
    prefs: MemoryPrefsStore,
    session: FolderSession,
}

fn fixture(root: MemoryDirectory) -> Fixture {
    let store = MemoryFolderStore::with_folder(root.handle());
    let prefs = MemoryPrefsStore::default();
    let session = FolderSession::new(Rc::new(store.clone()), Rc::new(prefs.clone()));
    Fixture {
        root,
        store,
        prefs,
        session,
    }
}

fn sort_scenario() -> MemoryDirectory {
    let root = MemoryDirectory::new("Papers");
    root.add_file("y.pdf", b"y".to_vec(), DAY_MS);
    root.add_dir("B");
    root.add_file("x.pdf", b"x".to_vec(), 2 * DAY_MS);
    root.add_dir("A");
    root
}

fn search_scenario() -> MemoryDirectory {
    let root = MemoryDirectory::new("Papers");
    root.add_dir("A")
        .add_file("report.pdf", b"report".to_vec(), 3 * DAY_MS);
    root.add_dir("B").add_dir("replica");
    root
}

fn listing(view: &ShelfView) -> &ListingView {
    match view {
        ShelfView::Listing(listing) => listing,
        other => panic!("expected a listing, got {other:?}"),
    }
}

fn names(view: &ShelfView) -> Vec<String> {
    listing(view)
        .entries
        .iter()
        .map(|entry| entry.name().to_string())
        .collect()
}

fn entry_named(view: &ShelfView, name: &str) -> Entry {
    listing(view)
        .entries
        .iter()
        .find(|entry| entry.name() == name)
        .cloned()
        .unwrap_or_else(|| panic!("no entry named {name}"))
}

fn scheduled(plan: SearchPlan) -> SearchTicket {
    match plan {
        SearchPlan::Scheduled(ticket) => ticket,
        other => panic!("expected a scheduled search, got {other:?}"),
    }
}

fn applied(run: SearchRun) -> ShelfView {
    match run {
        SearchRun::Applied(view) => view,
        SearchRun::Superseded => panic!("search was superseded"),
    }
}

/// Directory whose next enumeration waits until the returned sender fires.
struct GatedDirectory {
    inner: MemoryDirectory,
    gate: RefCell<Option<oneshot::Receiver<()>>>,
    listings: Cell<usize>,
}

impl GatedDirectory {
    fn new(inner: MemoryDirectory) -> Rc<Self> {
        Rc::new(Self {
            inner,
            gate: RefCell::new(None),
            listings: Cell::new(0),
        })
    }

    fn arm(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.gate.borrow_mut() = Some(rx);
        tx
    }
}

impl DirectoryHandle for GatedDirectory {
    fn name(&self) -> String {
        self.inner.name()
    }

    fn query_permission<'a>(
        &'a self,
        mode: PermissionMode,
    ) -> HandleFuture<'a, Result<PermissionState, HandleError>> {
        self.inner.query_permission(mode)
    }

    fn request_permission<'a>(
        &'a self,
        mode: PermissionMode,
    ) -> HandleFuture<'a, Result<PermissionState, HandleError>> {
        self.inner.request_permission(mode)
    }

    fn children<'a>(&'a self) -> HandleFuture<'a, Result<Vec<ChildHandle>, HandleError>> {
        Box::pin(async move {
            self.listings.set(self.listings.get() + 1);
            let gate = self.gate.borrow_mut().take();
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            self.inner.children().await
        })
    }

    fn directory<'a>(
        &'a self,
        name: &'a str,
    ) -> HandleFuture<'a, Result<Rc<dyn DirectoryHandle>, HandleError>> {
        self.inner.directory(name)
    }

    fn file<'a>(
        &'a self,
        name: &'a str,
        create: bool,
    ) -> HandleFuture<'a, Result<Rc<dyn FileHandle>, HandleError>> {
        self.inner.file(name, create)
    }

    fn remove_entry<'a>(
        &'a self,
        name: &'a str,
        recursive: bool,
    ) -> HandleFuture<'a, Result<(), HandleError>> {
        self.inner.remove_entry(name, recursive)
    }

    fn supports_rename(&self) -> bool {
        self.inner.supports_rename()
    }

    fn rename<'a>(&'a self, new_name: &'a str) -> HandleFuture<'a, Result<(), HandleError>> {
        self.inner.rename(new_name)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[test]
fn boot_without_a_remembered_folder_shows_no_folder() {
    let session = FolderSession::new(
        Rc::new(MemoryFolderStore::default()),
        Rc::new(MemoryPrefsStore::default()),
    );
    assert!(matches!(block_on(session.boot()), ShelfView::NoFolder));
    assert!(session.recent().is_empty());
}

#[test]
fn boot_lists_directories_first_in_date_then_name_order() {
    let fx = fixture(sort_scenario());
    let view = block_on(fx.session.boot());
    assert_eq!(names(&view), vec!["A", "B", "x.pdf", "y.pdf"]);
    assert_eq!(listing(&view).source, ListingSource::Live);
    assert_eq!(listing(&view).breadcrumbs, vec!["Papers"]);
    assert!(!listing(&view).can_go_back);

    let view = block_on(fx.session.set_sort(SortField::Name));
    assert_eq!(
        listing(&view).order,
        SortOrder {
            field: SortField::Name,
            descending: false
        }
    );
    assert_eq!(names(&view), vec!["A", "B", "x.pdf", "y.pdf"]);

    let view = block_on(fx.session.set_sort(SortField::Name));
    assert_eq!(names(&view), vec!["B", "A", "y.pdf", "x.pdf"]);
}

#[test]
fn sort_choice_persists_across_sessions() {
    let fx = fixture(sort_scenario());
    block_on(fx.session.boot());
    block_on(fx.session.set_sort(SortField::Name));

    let prefs = block_on(load_shelf_prefs_with(&fx.prefs));
    assert_eq!(prefs.sort_field, SortField::Name);
    assert!(!prefs.sort_descending);

    let next = FolderSession::new(Rc::new(fx.store.clone()), Rc::new(fx.prefs.clone()));
    block_on(next.boot());
    assert_eq!(
        next.order(),
        SortOrder {
            field: SortField::Name,
            descending: false
        }
    );
}

#[test]
fn expired_access_falls_back_to_the_cached_root() {
    let fx = fixture(sort_scenario());
    block_on(fx.session.boot());
    assert!(fx.store.has_cache(ROOT_CACHE_KEY));

    fx.root.access().revoke_all();
    let next = FolderSession::new(Rc::new(fx.store.clone()), Rc::new(fx.prefs.clone()));
    let view = block_on(next.boot());
    assert_eq!(listing(&view).source, ListingSource::Cached);
    assert_eq!(names(&view), vec!["A", "B", "x.pdf", "y.pdf"]);
    assert!(listing(&view).entries.iter().all(|e| !e.is_hydrated()));
    assert!(fx.root.access().requests().is_empty());
}

#[test]
fn expired_access_without_cache_needs_unlock() {
    let fx = fixture(sort_scenario());
    fx.root.access().revoke_all();
    assert!(matches!(block_on(fx.session.boot()), ShelfView::NeedsUnlock));

    let picker = StaticFolderPicker::cancelling();
    block_on(fx.session.unlock(&picker)).expect("open helper window");
    assert_eq!(picker.helper_windows_opened(), 1);

    fx.root
        .access()
        .set_permission(PermissionMode::Read, PermissionState::Granted);
    let view = block_on(fx.session.refresh());
    assert_eq!(listing(&view).source, ListingSource::Live);
    assert_eq!(names(&view).len(), 4);
}

#[test]
fn selecting_a_folder_remembers_it_and_scans_the_root() {
    let store = MemoryFolderStore::default();
    let session = FolderSession::new(
        Rc::new(store.clone()),
        Rc::new(MemoryPrefsStore::default()),
    );
    assert!(matches!(block_on(session.boot()), ShelfView::NoFolder));

    let outcome = block_on(session.select_folder(&StaticFolderPicker::cancelling()))
        .expect("cancel is absorbed");
    assert!(matches!(outcome, PickOutcome::Cancelled));
    assert!(matches!(session.view(), ShelfView::NoFolder));

    let root = sort_scenario();
    let picker = StaticFolderPicker::selecting(root.handle());
    let outcome = block_on(session.select_folder(&picker)).expect("select");
    let PickOutcome::Selected(view) = outcome else {
        panic!("expected a selection");
    };
    assert_eq!(names(&view), vec!["A", "B", "x.pdf", "y.pdf"]);
    assert!(store.has_cache(ROOT_CACHE_KEY));
    let remembered = block_on(store.load_folder())
        .expect("load")
        .expect("remembered");
    assert_eq!(remembered.name(), "Papers");
}

#[test]
fn search_reports_matches_with_relative_paths() {
    let fx = fixture(search_scenario());
    block_on(fx.session.boot());

    let ticket = scheduled(fx.session.plan_search("rep"));
    assert_eq!(ticket.term(), "rep");
    assert_eq!(ticket.delay_ms(), 300);
    assert_eq!(
        listing(&fx.session.view()).search,
        Some(SearchStatus::Searching {
            term: "rep".to_string()
        })
    );

    let view = applied(block_on(fx.session.run_search(ticket)).expect("search"));
    assert_eq!(names(&view), vec!["report.pdf", "replica"]);
    let paths: Vec<Option<&str>> = listing(&view)
        .entries
        .iter()
        .map(Entry::relative_path)
        .collect();
    assert_eq!(paths, vec![Some("A"), Some("B")]);
    assert_eq!(
        listing(&view).search,
        Some(SearchStatus::Results {
            term: "rep".to_string(),
            failures: Vec::new()
        })
    );
}

#[test]
fn short_and_empty_terms_never_traverse() {
    let fx = fixture(search_scenario());
    block_on(fx.session.boot());

    let SearchPlan::Filtered(view) = fx.session.plan_search("a") else {
        panic!("expected a local filter");
    };
    assert_eq!(names(&view), vec!["A"]);

    let SearchPlan::ShowListing(view) = fx.session.plan_search("") else {
        panic!("expected the plain listing");
    };
    assert_eq!(names(&view), vec!["A", "B"]);
    assert_eq!(listing(&view).search, None);
}

#[test]
fn only_the_latest_search_applies() {
    let fx = fixture(search_scenario());
    block_on(fx.session.boot());

    let first = scheduled(fx.session.plan_search("rep"));
    let second = scheduled(fx.session.plan_search("repo"));
    assert!(matches!(
        block_on(fx.session.run_search(first)).expect("run"),
        SearchRun::Superseded
    ));
    let view = applied(block_on(fx.session.run_search(second)).expect("run"));
    assert_eq!(names(&view), vec!["report.pdf"]);
}

#[test]
fn navigation_cancels_a_scheduled_search() {
    let fx = fixture(search_scenario());
    block_on(fx.session.boot());

    let ticket = scheduled(fx.session.plan_search("rep"));
    let view = block_on(fx.session.jump_to_breadcrumb(0));
    assert_eq!(listing(&view).search, None);
    assert_eq!(fx.session.search_term(), "");
    assert!(matches!(
        block_on(fx.session.run_search(ticket)).expect("run"),
        SearchRun::Superseded
    ));
}

#[test]
fn in_flight_search_is_dropped_when_the_term_changes() {
    let root = search_scenario();
    let gated = GatedDirectory::new(root.clone());
    let store = MemoryFolderStore::with_folder(gated.clone());
    let session = FolderSession::new(Rc::new(store), Rc::new(MemoryPrefsStore::default()));
    block_on(session.boot());

    block_on(async {
        let release = gated.arm();
        let ticket = scheduled(session.plan_search("rep"));
        let mut run = Box::pin(session.run_search(ticket));
        assert!(poll!(run.as_mut()).is_pending());

        let _newer = session.plan_search("repl");
        release.send(()).expect("release gate");
        assert!(matches!(run.await.expect("run"), SearchRun::Superseded));
    });
    assert_eq!(
        listing(&session.view()).search,
        Some(SearchStatus::Searching {
            term: "repl".to_string()
        })
    );
}

#[test]
fn unreadable_subtrees_are_reported_without_hiding_other_matches() {
    let root = MemoryDirectory::new("Papers");
    let broken = root.add_dir("Broken");
    broken.add_file("report-hidden.pdf", b"h".to_vec(), 1);
    broken.set_listing_fails(true);
    root.add_dir("Ok").add_file("report.pdf", b"r".to_vec(), 1);
    let fx = fixture(root);
    block_on(fx.session.boot());

    let ticket = scheduled(fx.session.plan_search("report"));
    let view = applied(block_on(fx.session.run_search(ticket)).expect("search"));
    assert_eq!(names(&view), vec!["report.pdf"]);
    let Some(SearchStatus::Results { failures, .. }) = &listing(&view).search else {
        panic!("expected search results");
    };
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].relative_path, "Broken");
    assert!(matches!(failures[0].error, SessionError::Io(_)));
}

#[test]
fn opening_a_search_result_directory_rebuilds_breadcrumbs() {
    let fx = fixture(search_scenario());
    block_on(fx.session.boot());
    let ticket = scheduled(fx.session.plan_search("replica"));
    let view = applied(block_on(fx.session.run_search(ticket)).expect("search"));

    let viewer = RecordingViewer::default();
    let outcome = block_on(fx.session.open(
        &entry_named(&view, "replica"),
        OpenDisposition::Foreground,
        &viewer,
    ))
    .expect("open");
    let OpenOutcome::Descended(view) = outcome else {
        panic!("expected to descend");
    };
    assert_eq!(listing(&view).breadcrumbs, vec!["Papers", "B", "replica"]);
    assert_eq!(listing(&view).search, None);

    let view = block_on(fx.session.go_back());
    assert_eq!(listing(&view).breadcrumbs, vec!["Papers", "B"]);
    assert_eq!(names(&view), vec!["replica"]);
}

#[test]
fn opening_files_feeds_the_viewer_and_the_recent_shelf() {
    let root = MemoryDirectory::new("Papers");
    root.add_dir("A")
        .add_file("inside.pdf", b"inside".to_vec(), 5);
    root.add_file("x.pdf", b"x".to_vec(), 0);
    let fx = fixture(root);
    let viewer = RecordingViewer::default();
    let view = block_on(fx.session.boot());

    let outcome = block_on(fx.session.open(
        &entry_named(&view, "A"),
        OpenDisposition::Background,
        &viewer,
    ))
    .expect("background directory");
    assert!(matches!(outcome, OpenOutcome::Ignored));

    let OpenOutcome::Descended(view) = block_on(fx.session.open(
        &entry_named(&view, "A"),
        OpenDisposition::Foreground,
        &viewer,
    ))
    .expect("descend") else {
        panic!("expected to descend");
    };
    assert!(listing(&view).can_go_back);

    let outcome = block_on(fx.session.open(
        &entry_named(&view, "inside.pdf"),
        OpenDisposition::Foreground,
        &viewer,
    ))
    .expect("open file");
    assert!(matches!(
        outcome,
        OpenOutcome::Opened {
            close_surface: true
        }
    ));
    assert_eq!(viewer.opened()[0].bytes, b"inside".to_vec());

    let recent = fx.session.recent();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].relative_path, "A");
    assert_eq!(recent[0].last_modified, 5);

    let view = block_on(fx.session.go_back());
    let outcome = block_on(fx.session.open(
        &entry_named(&view, "x.pdf"),
        OpenDisposition::Background,
        &viewer,
    ))
    .expect("background file");
    assert!(matches!(
        outcome,
        OpenOutcome::Opened {
            close_surface: false
        }
    ));
    let recent = fx.session.recent();
    assert_eq!(recent[0].name, "x.pdf");
    assert!(recent[0].last_modified > 0);

    // The shelf resolves by path even when the current directory is elsewhere.
    let from_shelf = fx.session.recent_entries()[1].clone();
    block_on(fx.session.open(&from_shelf, OpenDisposition::Foreground, &viewer))
        .expect("open recent");
    assert_eq!(viewer.opened().len(), 3);
    assert_eq!(viewer.opened()[2].name, "inside.pdf");
    assert_eq!(fx.session.recent()[0].name, "inside.pdf");
}

#[test]
fn recent_shelf_is_capped_and_deduplicated() {
    let root = MemoryDirectory::new("Papers");
    for (idx, name) in ["a.pdf", "b.pdf", "c.pdf", "d.pdf"].into_iter().enumerate() {
        root.add_file(name, name.as_bytes().to_vec(), (idx as u64 + 1) * DAY_MS);
    }
    let fx = fixture(root);
    let viewer = RecordingViewer::default();
    let view = block_on(fx.session.boot());

    for name in ["a.pdf", "b.pdf", "c.pdf", "d.pdf", "b.pdf"] {
        block_on(fx.session.open(
            &entry_named(&view, name),
            OpenDisposition::Foreground,
            &viewer,
        ))
        .expect("open");
    }
    let shelf: Vec<String> = fx.session.recent().into_iter().map(|r| r.name).collect();
    assert_eq!(shelf, vec!["b.pdf", "d.pdf", "c.pdf"]);

    let stored = block_on(load_cache_json_with::<_, Vec<RecentEntry>>(&fx.store, RECENT_FILES_KEY))
        .expect("load")
        .expect("stored");
    assert_eq!(stored, fx.session.recent());
}

#[test]
fn cached_entries_are_resolved_before_opening() {
    let fx = fixture(sort_scenario());
    block_on(fx.session.boot());
    fx.root.access().revoke_all();

    let next = FolderSession::new(Rc::new(fx.store.clone()), Rc::new(fx.prefs.clone()));
    let view = block_on(next.boot());
    assert_eq!(listing(&view).source, ListingSource::Cached);

    let viewer = RecordingViewer::default();
    block_on(next.open(
        &entry_named(&view, "x.pdf"),
        OpenDisposition::Foreground,
        &viewer,
    ))
    .expect("open cached");
    assert_eq!(viewer.opened()[0].bytes, b"x".to_vec());
    assert_eq!(fx.root.access().requests(), vec![PermissionMode::Read]);
    assert_eq!(listing(&next.view()).source, ListingSource::Live);
}

#[test]
fn opening_a_cached_file_lists_the_directory_once() {
    let root = sort_scenario();
    let gated = GatedDirectory::new(root.clone());
    let store = MemoryFolderStore::with_folder(gated.clone());
    let prefs = MemoryPrefsStore::default();
    block_on(FolderSession::new(Rc::new(store.clone()), Rc::new(prefs.clone())).boot());
    root.access().revoke_all();

    let session = FolderSession::new(Rc::new(store), Rc::new(prefs));
    let view = block_on(session.boot());
    assert_eq!(listing(&view).source, ListingSource::Cached);
    let before = gated.listings.get();

    let viewer = RecordingViewer::default();
    block_on(session.open(
        &entry_named(&view, "y.pdf"),
        OpenDisposition::Foreground,
        &viewer,
    ))
    .expect("open cached");
    assert_eq!(gated.listings.get(), before + 1);
    assert_eq!(viewer.opened()[0].bytes, b"y".to_vec());

    let view = session.view();
    assert_eq!(listing(&view).source, ListingSource::Live);
    assert_eq!(names(&view), vec!["A", "B", "x.pdf", "y.pdf"]);
    assert!(listing(&view).entries.iter().all(|e| e.is_hydrated()));
}

#[test]
fn rename_without_write_access_changes_nothing() {
    let fx = fixture(sort_scenario());
    let view = block_on(fx.session.boot());
    let access = fx.root.access();
    access.set_permission(PermissionMode::Readwrite, PermissionState::Prompt);
    access.set_prompt(PromptBehavior::Deny);

    let err = block_on(fx.session.rename(&entry_named(&view, "x.pdf"), "renamed"))
        .expect_err("write denied");
    assert!(matches!(err, SessionError::Permission(_)));
    assert_eq!(fx.root.child_names(), vec!["y.pdf", "B", "x.pdf", "A"]);
    assert_eq!(
        fx.root.find_file("x.pdf").expect("x").contents(),
        b"x".to_vec()
    );
    assert_eq!(names(&fx.session.view()), vec!["A", "B", "x.pdf", "y.pdf"]);
}

#[test]
fn rename_updates_listing_and_recent_shelf() {
    let fx = fixture(sort_scenario());
    let viewer = RecordingViewer::default();
    let view = block_on(fx.session.boot());
    block_on(fx.session.open(
        &entry_named(&view, "x.pdf"),
        OpenDisposition::Foreground,
        &viewer,
    ))
    .expect("open");

    let outcome =
        block_on(fx.session.rename(&entry_named(&view, "x.pdf"), "renamed")).expect("rename");
    assert_eq!(
        outcome,
        RenameOutcome::Renamed {
            new_name: "renamed.pdf".to_string()
        }
    );
    assert!(names(&fx.session.view()).contains(&"renamed.pdf".to_string()));
    assert_eq!(fx.session.recent()[0].name, "renamed.pdf");

    let unchanged = block_on(fx.session.rename(&entry_named(&view, "y.pdf"), "  "))
        .expect("blank name");
    assert_eq!(unchanged, RenameOutcome::Unchanged);
}

#[test]
fn deleting_a_recent_entry_purges_it_everywhere() {
    let fx = fixture(sort_scenario());
    let viewer = RecordingViewer::default();
    let view = block_on(fx.session.boot());
    block_on(fx.session.open(
        &entry_named(&view, "x.pdf"),
        OpenDisposition::Foreground,
        &viewer,
    ))
    .expect("open");

    let from_shelf = fx.session.recent_entries()[0].clone();
    let view = block_on(fx.session.delete(&from_shelf)).expect("delete");
    assert_eq!(names(&view), vec!["A", "B", "y.pdf"]);
    assert!(fx.session.recent().is_empty());
    let stored = block_on(load_cache_json_with::<_, Vec<RecentEntry>>(&fx.store, RECENT_FILES_KEY))
        .expect("load")
        .expect("stored");
    assert!(stored.is_empty());
}

#[test]
fn copy_name_strips_the_extension_and_falls_back() {
    let fx = fixture(sort_scenario());
    let view = block_on(fx.session.boot());
    let clipboard = MemoryClipboard::default();

    block_on(fx.session.copy_name(&entry_named(&view, "x.pdf"), &clipboard)).expect("copy");
    assert_eq!(clipboard.contents().as_deref(), Some("x"));
    assert!(!clipboard.used_fallback());

    clipboard.set_primary_available(false);
    block_on(fx.session.copy_name(&entry_named(&view, "A"), &clipboard)).expect("copy");
    assert_eq!(clipboard.contents().as_deref(), Some("A"));
    assert!(clipboard.used_fallback());
}

#[test]
fn stale_listing_does_not_overwrite_newer_navigation() {
    let root = sort_scenario();
    let slow = GatedDirectory::new(root.add_dir("Slow"));
    let fx = fixture(root);
    let viewer = RecordingViewer::default();
    block_on(fx.session.boot());

    let entry = Entry::Hydrated(HydratedEntry {
        record: EntryRecord::directory("Slow"),
        handle: ChildHandle::Directory(slow.clone()),
        parent: fx.root.handle(),
        relative_path: None,
    });

    block_on(async {
        let release = slow.arm();
        let mut open = Box::pin(fx.session.open(&entry, OpenDisposition::Foreground, &viewer));
        assert!(poll!(open.as_mut()).is_pending());

        let view = fx.session.jump_to_breadcrumb(0).await;
        assert_eq!(listing(&view).breadcrumbs, vec!["Papers"]);

        release.send(()).expect("release gate");
        let OpenOutcome::Descended(view) = open.await.expect("open") else {
            panic!("expected to descend");
        };
        assert_eq!(listing(&view).breadcrumbs, vec!["Papers"]);
        assert_eq!(names(&view), vec!["A", "B", "Slow", "x.pdf", "y.pdf"]);
    });
}
