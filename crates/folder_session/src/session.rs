//! Folder session: the state machine behind the shelf popup.
//!
//! [`FolderSession`] owns navigation, sort order, the current listing, the search overlay, and
//! the recent shelf. Operations take `&self`; state lives in a `RefCell` that is never borrowed
//! across an `.await`. Listing and search requests are tagged with generation numbers, and a
//! result is applied only while its generation is still current.

use std::{cell::RefCell, rc::Rc};

use folder_host::{
    copy_text_with_fallback, load_shelf_prefs_with, relative_path_segments,
    save_shelf_prefs_with, strip_tracked_extension, unix_time_ms_now, ChildHandle,
    ClipboardService, DirectoryHandle, DocumentViewer, EntryKind, FolderPicker, FolderStore,
    HandleError, PermissionMode, PrefsStore, ShelfPrefs, SortField, ROOT_CACHE_KEY,
};
use tracing::{debug, info, warn};

use crate::entry::{Entry, HydratedEntry, RecentEntry};
use crate::error::{SessionError, SessionResult};
use crate::listing::{load_cached_records, load_listing, store_snapshot, ListingOutcome};
use crate::mutation::{delete_entry, read_entry, rename_entry, RenameOutcome};
use crate::navigation::NavigationState;
use crate::permission::{ensure_access, has_access};
use crate::recent::{
    load_recent, purge_deleted, push_recent, rename_directory_in_recent, rename_in_recent,
    save_recent,
};
use crate::resolve::{hydrate, match_cached_entry, relist_current};
use crate::search::{
    filter_local, plan_search as classify_term, search, SearchTrigger, SubtreeFailure,
};
use crate::sort::SortOrder;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Where the displayed listing came from.
pub enum ListingSource {
    /// Nothing loaded yet.
    Loading,
    /// Live enumeration of the current directory.
    Live,
    /// Last stored snapshot; live access failed.
    Cached,
    /// Live access failed below the root and no snapshot exists.
    Unavailable(SessionError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Search overlay shown on top of the listing.
pub enum SearchStatus {
    /// Short term; the listing is filtered locally.
    Filtered {
        /// Active term.
        term: String,
    },
    /// A traversal is scheduled or running; the listing is still shown.
    Searching {
        /// Active term.
        term: String,
    },
    /// Traversal results replace the listing.
    Results {
        /// Active term.
        term: String,
        /// Subtrees that could not be searched.
        failures: Vec<SubtreeFailure>,
    },
}

#[derive(Debug, Clone)]
/// Renderable listing state.
pub struct ListingView {
    /// Entries to paint, in display order.
    pub entries: Vec<Entry>,
    /// Origin of the underlying listing.
    pub source: ListingSource,
    /// Active search overlay, if any.
    pub search: Option<SearchStatus>,
    /// Directory names from the root to the current directory.
    pub breadcrumbs: Vec<String>,
    /// Whether a back action is available.
    pub can_go_back: bool,
    /// Active sort order.
    pub order: SortOrder,
}

#[derive(Debug, Clone)]
/// What the popup should display.
pub enum ShelfView {
    /// No folder has been selected.
    NoFolder,
    /// The root cannot be listed and no snapshot exists; offer the unlock flow.
    NeedsUnlock,
    /// A listing (possibly cached or overlaid by a search).
    Listing(ListingView),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// How an entry was activated.
pub enum OpenDisposition {
    /// Primary activation; the popup closes after opening a file.
    Foreground,
    /// Middle-click activation; files open without closing the popup and directories are
    /// ignored.
    Background,
}

#[derive(Debug, Clone)]
/// Result of [`FolderSession::open`].
pub enum OpenOutcome {
    /// A directory was entered.
    Descended(ShelfView),
    /// A file was handed to the viewer.
    Opened {
        /// Whether the popup surface should close.
        close_surface: bool,
    },
    /// Nothing happened (background activation of a directory).
    Ignored,
}

#[derive(Debug, Clone)]
/// Result of [`FolderSession::select_folder`].
pub enum PickOutcome {
    /// A new folder is active.
    Selected(ShelfView),
    /// The user dismissed the picker.
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Traversal scheduled by [`FolderSession::plan_search`].
pub struct SearchTicket {
    generation: u64,
    term: String,
    delay_ms: u32,
}

impl SearchTicket {
    /// Term to search for.
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Quiet period the host waits before calling [`FolderSession::run_search`].
    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }
}

#[derive(Debug, Clone)]
/// Result of [`FolderSession::plan_search`].
pub enum SearchPlan {
    /// Empty term; the plain listing is shown again.
    ShowListing(ShelfView),
    /// Short term; the listing was filtered locally.
    Filtered(ShelfView),
    /// A traversal should run after the ticket's delay.
    Scheduled(SearchTicket),
}

#[derive(Debug, Clone)]
/// Result of [`FolderSession::run_search`].
pub enum SearchRun {
    /// Results were applied.
    Applied(ShelfView),
    /// A newer search term or navigation made this run obsolete.
    Superseded,
}

#[derive(Debug, Clone)]
struct Listing {
    entries: Vec<Entry>,
    source: ListingSource,
}

impl Default for Listing {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            source: ListingSource::Loading,
        }
    }
}

#[derive(Debug, Clone)]
enum Overlay {
    Filtered { term: String, entries: Vec<Entry> },
    Searching { term: String },
    Results {
        term: String,
        entries: Vec<Entry>,
        failures: Vec<SubtreeFailure>,
    },
}

#[derive(Debug, Default)]
struct SessionState {
    prefs: ShelfPrefs,
    order: SortOrder,
    nav: Option<NavigationState>,
    listing: Listing,
    needs_unlock: bool,
    overlay: Option<Overlay>,
    search_term: String,
    recent: Vec<RecentEntry>,
    listing_generation: u64,
    search_generation: u64,
}

impl SessionState {
    fn clear_search(&mut self) {
        self.search_term.clear();
        self.overlay = None;
        self.search_generation += 1;
    }

    fn refilter(&mut self) {
        if let Some(Overlay::Filtered { term, .. }) = &self.overlay {
            let term = term.clone();
            let entries = filter_local(&self.listing.entries, &term);
            self.overlay = Some(Overlay::Filtered { term, entries });
        }
    }

    fn view(&self) -> ShelfView {
        let Some(nav) = &self.nav else {
            return ShelfView::NoFolder;
        };
        if self.needs_unlock {
            return ShelfView::NeedsUnlock;
        }
        let (entries, search) = match &self.overlay {
            None => (self.listing.entries.clone(), None),
            Some(Overlay::Filtered { term, entries }) => (
                entries.clone(),
                Some(SearchStatus::Filtered { term: term.clone() }),
            ),
            Some(Overlay::Searching { term }) => (
                self.listing.entries.clone(),
                Some(SearchStatus::Searching { term: term.clone() }),
            ),
            Some(Overlay::Results {
                term,
                entries,
                failures,
            }) => (
                entries.clone(),
                Some(SearchStatus::Results {
                    term: term.clone(),
                    failures: failures.clone(),
                }),
            ),
        };
        ShelfView::Listing(ListingView {
            entries,
            source: self.listing.source.clone(),
            search,
            breadcrumbs: nav.breadcrumbs(),
            can_go_back: !nav.is_root(),
            order: self.order,
        })
    }
}

/// Folder session manager.
pub struct FolderSession {
    store: Rc<dyn FolderStore>,
    prefs_store: Rc<dyn PrefsStore>,
    state: RefCell<SessionState>,
}

impl FolderSession {
    /// Creates an idle session; call [`FolderSession::boot`] to load persisted state.
    pub fn new(store: Rc<dyn FolderStore>, prefs_store: Rc<dyn PrefsStore>) -> Self {
        Self {
            store,
            prefs_store,
            state: RefCell::new(SessionState::default()),
        }
    }

    /// Current view.
    pub fn view(&self) -> ShelfView {
        self.state.borrow().view()
    }

    /// Recent shelf, most recent first.
    pub fn recent(&self) -> Vec<RecentEntry> {
        self.state.borrow().recent.clone()
    }

    /// Recent shelf as openable entries.
    pub fn recent_entries(&self) -> Vec<Entry> {
        self.recent().into_iter().map(Entry::Recent).collect()
    }

    /// Active preferences.
    pub fn prefs(&self) -> ShelfPrefs {
        self.state.borrow().prefs.clone()
    }

    /// Active sort order.
    pub fn order(&self) -> SortOrder {
        self.state.borrow().order
    }

    /// Active search term.
    pub fn search_term(&self) -> String {
        self.state.borrow().search_term.clone()
    }

    fn context(&self) -> SessionResult<(NavigationState, String)> {
        let state = self.state.borrow();
        let nav = state.nav.clone().ok_or(SessionError::NoFolder)?;
        Ok((nav, state.prefs.tracked_extension.clone()))
    }

    /// Loads preferences, the recent shelf, and the remembered folder.
    ///
    /// The cached root listing is shown first. A live listing replaces it only when read access
    /// is already granted; no prompt is shown. Without access and without a snapshot the view
    /// becomes [`ShelfView::NeedsUnlock`].
    pub async fn boot(&self) -> ShelfView {
        let prefs = load_shelf_prefs_with(self.prefs_store.as_ref()).await;
        let recent = load_recent(self.store.as_ref()).await;
        let order = SortOrder::from_prefs(&prefs);
        {
            let mut state = self.state.borrow_mut();
            state.prefs = prefs;
            state.order = order;
            state.recent = recent;
        }

        let folder = match self.store.load_folder().await {
            Ok(Some(folder)) => folder,
            Ok(None) => return self.view(),
            Err(err) => {
                warn!(error = %err, "failed to load remembered folder");
                return self.view();
            }
        };

        let cached = load_cached_records(self.store.as_ref(), ROOT_CACHE_KEY, order).await;
        let has_cache = cached.is_some();
        {
            let mut state = self.state.borrow_mut();
            state.nav = Some(NavigationState::new(Rc::clone(&folder)));
            state.needs_unlock = false;
            state.listing = match cached {
                Some(records) => Listing {
                    entries: records.into_iter().map(Entry::Cached).collect(),
                    source: ListingSource::Cached,
                },
                None => Listing::default(),
            };
        }

        if has_access(folder.as_ref(), PermissionMode::Read)
            .await
            .is_granted()
        {
            return self.reload().await;
        }
        if !has_cache {
            debug!(folder = %folder.name(), "read access not granted and no cached root");
            self.state.borrow_mut().needs_unlock = true;
        }
        self.view()
    }

    async fn reload(&self) -> ShelfView {
        let (generation, dir, key, is_root, extension, order) = {
            let mut state = self.state.borrow_mut();
            let Some(nav) = &state.nav else {
                return ShelfView::NoFolder;
            };
            let dir = Rc::clone(nav.current());
            let key = nav.cache_key();
            let is_root = nav.is_root();
            state.listing_generation += 1;
            (
                state.listing_generation,
                dir,
                key,
                is_root,
                state.prefs.tracked_extension.clone(),
                state.order,
            )
        };

        let outcome = load_listing(
            self.store.as_ref(),
            &dir,
            &key,
            is_root,
            &extension,
            order,
        )
        .await;

        let mut state = self.state.borrow_mut();
        if state.listing_generation != generation {
            debug!(key = %key, generation, "dropping stale listing");
            return state.view();
        }
        match outcome {
            ListingOutcome::Live(entries) => {
                state.needs_unlock = false;
                state.listing = Listing {
                    entries: entries.into_iter().map(Entry::Hydrated).collect(),
                    source: ListingSource::Live,
                };
            }
            ListingOutcome::Cached(records) => {
                state.needs_unlock = false;
                state.listing = Listing {
                    entries: records.into_iter().map(Entry::Cached).collect(),
                    source: ListingSource::Cached,
                };
            }
            ListingOutcome::NeedsUnlock => {
                state.needs_unlock = true;
                state.listing = Listing::default();
            }
            ListingOutcome::Unavailable(err) => {
                state.needs_unlock = false;
                state.listing = Listing {
                    entries: Vec::new(),
                    source: ListingSource::Unavailable(err),
                };
            }
        }
        state.refilter();
        state.view()
    }

    /// Shows `entries`, already listed live for the current directory, and refreshes its
    /// snapshot.
    async fn install_live(&self, entries: Vec<HydratedEntry>) {
        let (generation, key) = {
            let mut state = self.state.borrow_mut();
            let Some(nav) = &state.nav else {
                return;
            };
            let key = nav.cache_key();
            state.listing_generation += 1;
            (state.listing_generation, key)
        };
        store_snapshot(self.store.as_ref(), &key, &entries).await;

        let mut state = self.state.borrow_mut();
        if state.listing_generation != generation {
            debug!(key = %key, generation, "dropping stale listing");
            return;
        }
        state.needs_unlock = false;
        state.listing = Listing {
            entries: entries.into_iter().map(Entry::Hydrated).collect(),
            source: ListingSource::Live,
        };
        state.refilter();
    }

    /// Runs the folder picker, remembers the chosen folder, and lists it while access is live
    /// (which also stores the root snapshot).
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Store`] when the folder cannot be remembered and the picker
    /// error for failures other than cancellation.
    pub async fn select_folder(&self, picker: &dyn FolderPicker) -> SessionResult<PickOutcome> {
        let folder = match picker.pick_folder().await {
            Ok(folder) => folder,
            Err(HandleError::Aborted) => {
                debug!("folder selection cancelled");
                return Ok(PickOutcome::Cancelled);
            }
            Err(err) => return Err(err.into()),
        };
        self.store
            .save_folder(Rc::clone(&folder))
            .await
            .map_err(SessionError::Store)?;
        info!(folder = %folder.name(), "folder selected");
        {
            let mut state = self.state.borrow_mut();
            state.nav = Some(NavigationState::new(folder));
            state.listing = Listing::default();
            state.needs_unlock = false;
            state.clear_search();
        }
        Ok(PickOutcome::Selected(self.reload().await))
    }

    /// Opens the helper window that hosts the re-authorization prompt.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Surface`] when the window cannot be opened.
    pub async fn unlock(&self, picker: &dyn FolderPicker) -> SessionResult<()> {
        picker
            .open_helper_window()
            .await
            .map_err(SessionError::Surface)
    }

    /// Clears the search, asks for read access, and reloads the current directory on grant.
    pub async fn refresh(&self) -> ShelfView {
        let current = {
            let mut state = self.state.borrow_mut();
            state.clear_search();
            state.nav.as_ref().map(|nav| Rc::clone(nav.current()))
        };
        let Some(current) = current else {
            return self.view();
        };
        if ensure_access(current.as_ref(), PermissionMode::Read)
            .await
            .is_granted()
        {
            self.reload().await
        } else {
            self.view()
        }
    }

    /// Applies a click on the `field` column header, persists the order, and reloads.
    pub async fn set_sort(&self, field: SortField) -> ShelfView {
        let prefs = {
            let mut state = self.state.borrow_mut();
            let order = state.order.toggled(field);
            state.order = order;
            state.prefs.sort_field = order.field;
            state.prefs.sort_descending = order.descending;
            state.clear_search();
            state.prefs.clone()
        };
        if let Err(err) = save_shelf_prefs_with(self.prefs_store.as_ref(), &prefs).await {
            warn!(error = %err, "failed to save sort preference");
        }
        self.reload().await
    }

    /// Goes up one level; a no-op at the root.
    pub async fn go_back(&self) -> ShelfView {
        let moved = {
            let mut state = self.state.borrow_mut();
            let moved = state.nav.as_mut().is_some_and(|nav| nav.ascend_one());
            if moved {
                state.clear_search();
            }
            moved
        };
        if moved {
            self.reload().await
        } else {
            self.view()
        }
    }

    /// Jumps to the breadcrumb at `depth` (`0` is the root).
    pub async fn jump_to_breadcrumb(&self, depth: usize) -> ShelfView {
        let moved = {
            let mut state = self.state.borrow_mut();
            let moved = state.nav.as_mut().is_some_and(|nav| nav.jump_to(depth));
            if moved {
                state.clear_search();
            }
            moved
        };
        if moved {
            self.reload().await
        } else {
            self.view()
        }
    }

    /// Opens `entry`: directories are entered, files are read, recorded on the recent shelf,
    /// and handed to `viewer`.
    ///
    /// Cached and recent entries are resolved to live handles first.
    ///
    /// # Errors
    ///
    /// Returns resolution, read, or viewer failures; the recent shelf is untouched then.
    pub async fn open(
        &self,
        entry: &Entry,
        disposition: OpenDisposition,
        viewer: &dyn DocumentViewer,
    ) -> SessionResult<OpenOutcome> {
        let (nav, extension) = self.context()?;
        let hydrated = match entry {
            Entry::Cached(record) => {
                let order = self.order();
                let entries =
                    relist_current(nav.current(), PermissionMode::Read, &extension, order).await?;
                let hydrated = match_cached_entry(&entries, &record.name)?;
                self.install_live(entries).await;
                hydrated
            }
            _ => hydrate(entry, &nav, PermissionMode::Read, &extension).await?,
        };

        if let ChildHandle::Directory(dir) = &hydrated.handle {
            if disposition == OpenDisposition::Background {
                return Ok(OpenOutcome::Ignored);
            }
            let next = match &hydrated.relative_path {
                Some(path) => match directory_chain(nav.root(), path).await {
                    Ok(ancestors) => NavigationState::from_parts(ancestors, Rc::clone(dir)),
                    Err(err) => {
                        debug!(path = %path, error = %err, "could not rebuild path; descending");
                        descended(&nav, dir)
                    }
                },
                None => descended(&nav, dir),
            };
            {
                let mut state = self.state.borrow_mut();
                state.nav = Some(next);
                state.clear_search();
            }
            return Ok(OpenOutcome::Descended(self.reload().await));
        }

        let bytes = read_entry(&hydrated).await?;
        let relative_path = hydrated
            .relative_path
            .clone()
            .unwrap_or_else(|| nav.relative_path());
        let last_modified = match hydrated.record.last_modified {
            0 => unix_time_ms_now(),
            mtime => mtime,
        };
        let (limit, revoke_after_ms) = {
            let state = self.state.borrow();
            (state.prefs.recent_limit, state.prefs.viewer_revoke_delay_ms)
        };
        let mut recent = load_recent(self.store.as_ref()).await;
        push_recent(
            &mut recent,
            RecentEntry {
                name: hydrated.record.name.clone(),
                kind: EntryKind::File,
                last_modified,
                relative_path,
            },
            limit,
        );
        self.store_recent(recent).await;

        viewer
            .open_document(&hydrated.record.name, bytes, revoke_after_ms)
            .await
            .map_err(SessionError::Surface)?;
        Ok(OpenOutcome::Opened {
            close_surface: disposition == OpenDisposition::Foreground,
        })
    }

    async fn store_recent(&self, recent: Vec<RecentEntry>) {
        if let Err(err) = save_recent(self.store.as_ref(), &recent).await {
            warn!(error = %err, "failed to save recent files");
        }
        self.state.borrow_mut().recent = recent;
    }

    /// Renames `entry`, keeping the recent shelf in step and reloading the listing.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Permission`] when write access is refused (nothing changes) and
    /// the rename failure otherwise.
    pub async fn rename(&self, entry: &Entry, requested: &str) -> SessionResult<RenameOutcome> {
        let trimmed = requested.trim();
        if trimmed.is_empty() || trimmed == entry.name() {
            return Ok(RenameOutcome::Unchanged);
        }
        let (nav, extension) = self.context()?;
        let hydrated = hydrate(entry, &nav, PermissionMode::Readwrite, &extension).await?;
        let outcome = rename_entry(&hydrated, requested, &extension).await?;

        if let RenameOutcome::Renamed { new_name } = &outcome {
            let parent_path = hydrated
                .relative_path
                .clone()
                .unwrap_or_else(|| nav.relative_path());
            let old_name = hydrated.record.name.as_str();
            let mut recent = load_recent(self.store.as_ref()).await;
            let changed = match hydrated.record.kind {
                EntryKind::File => rename_in_recent(&mut recent, &parent_path, old_name, new_name),
                EntryKind::Directory => {
                    rename_directory_in_recent(&mut recent, &parent_path, old_name, new_name)
                }
            };
            if changed {
                self.store_recent(recent).await;
            }
            self.state.borrow_mut().clear_search();
            self.reload().await;
        }
        Ok(outcome)
    }

    /// Deletes `entry` recursively, purges it from the recent shelf, and reloads the listing.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Permission`] when write access is refused and the removal
    /// failure otherwise.
    pub async fn delete(&self, entry: &Entry) -> SessionResult<ShelfView> {
        let (nav, extension) = self.context()?;
        let hydrated = hydrate(entry, &nav, PermissionMode::Readwrite, &extension).await?;
        delete_entry(&hydrated).await?;

        let parent_path = hydrated
            .relative_path
            .clone()
            .unwrap_or_else(|| nav.relative_path());
        let mut recent = load_recent(self.store.as_ref()).await;
        if purge_deleted(
            &mut recent,
            &parent_path,
            &hydrated.record.name,
            hydrated.record.kind,
        ) {
            self.store_recent(recent).await;
        }
        self.state.borrow_mut().clear_search();
        Ok(self.reload().await)
    }

    /// Copies the entry name without the tracked extension.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Surface`] when both clipboard paths fail.
    pub async fn copy_name(
        &self,
        entry: &Entry,
        clipboard: &dyn ClipboardService,
    ) -> SessionResult<()> {
        let extension = self.state.borrow().prefs.tracked_extension.clone();
        let name = strip_tracked_extension(entry.name(), &extension);
        copy_text_with_fallback(clipboard, name)
            .await
            .map_err(SessionError::Surface)
    }

    /// Records a new search term and decides what it triggers.
    ///
    /// Every call invalidates previously scheduled traversals.
    pub fn plan_search(&self, term: &str) -> SearchPlan {
        let mut state = self.state.borrow_mut();
        state.search_generation += 1;
        state.search_term = term.to_string();
        match classify_term(term, state.prefs.search_min_chars) {
            SearchTrigger::ShowListing => {
                state.overlay = None;
                SearchPlan::ShowListing(state.view())
            }
            SearchTrigger::LocalFilter => {
                let entries = filter_local(&state.listing.entries, term);
                state.overlay = Some(Overlay::Filtered {
                    term: term.to_string(),
                    entries,
                });
                SearchPlan::Filtered(state.view())
            }
            SearchTrigger::Traverse => {
                state.overlay = Some(Overlay::Searching {
                    term: term.to_string(),
                });
                SearchPlan::Scheduled(SearchTicket {
                    generation: state.search_generation,
                    term: term.to_string(),
                    delay_ms: state.prefs.search_debounce_ms,
                })
            }
        }
    }

    /// Runs a scheduled traversal from the navigation root.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoFolder`] without a folder and the root enumeration failure
    /// when the root cannot be read.
    pub async fn run_search(&self, ticket: SearchTicket) -> SessionResult<SearchRun> {
        let (root, extension) = {
            let state = self.state.borrow();
            if state.search_generation != ticket.generation {
                return Ok(SearchRun::Superseded);
            }
            let nav = state.nav.as_ref().ok_or(SessionError::NoFolder)?;
            (Rc::clone(nav.root()), state.prefs.tracked_extension.clone())
        };

        let result = search(&root, &ticket.term, &extension).await;

        let mut state = self.state.borrow_mut();
        if state.search_generation != ticket.generation {
            debug!(term = %ticket.term, "dropping superseded search");
            return Ok(SearchRun::Superseded);
        }
        match result {
            Ok(report) => {
                state.overlay = Some(Overlay::Results {
                    term: ticket.term,
                    entries: report.entries.into_iter().map(Entry::Hydrated).collect(),
                    failures: report.failures,
                });
                Ok(SearchRun::Applied(state.view()))
            }
            Err(err) => {
                state.overlay = None;
                Err(err)
            }
        }
    }
}

fn descended(nav: &NavigationState, dir: &Rc<dyn DirectoryHandle>) -> NavigationState {
    let mut next = nav.clone();
    next.descend(Rc::clone(dir));
    next
}

async fn directory_chain(
    root: &Rc<dyn DirectoryHandle>,
    relative_path: &str,
) -> SessionResult<Vec<Rc<dyn DirectoryHandle>>> {
    let mut chain = vec![Rc::clone(root)];
    let mut current = Rc::clone(root);
    for segment in relative_path_segments(relative_path) {
        let next = current.directory(segment).await?;
        chain.push(Rc::clone(&next));
        current = next;
    }
    Ok(chain)
}
