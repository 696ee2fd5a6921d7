//! Folder session manager for the PDF shelf popup.
//!
//! The crate layers permission negotiation and cache fallback over the capability contracts
//! in `folder_host`:
//!
//! - [`listing`] enumerates a directory and keeps a per-key snapshot for offline display.
//! - [`permission`] queries before prompting and tolerates hosts that cannot prompt.
//! - [`navigation`] tracks the ancestor stack below the selected folder.
//! - [`search`] walks the tree with per-subtree error isolation and plans debounced runs.
//! - [`mutation`] and [`resolve`] open, rename, and delete entries, re-resolving cached and
//!   recent entries into live handles first.
//! - [`session::FolderSession`] ties them together behind a renderable [`ShelfView`].

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod entry;
pub mod error;
pub mod listing;
pub mod mutation;
pub mod navigation;
pub mod permission;
pub mod recent;
pub mod resolve;
pub mod search;
pub mod session;
pub mod sort;

pub use entry::{Entry, HydratedEntry, RecentEntry};
pub use error::{SessionError, SessionResult};
pub use listing::{list_directory, load_listing, ListingOutcome};
pub use mutation::{delete_entry, read_entry, rename_entry, RenameOutcome};
pub use navigation::NavigationState;
pub use permission::{ensure_access, has_access, Access};
pub use resolve::{hydrate, resolve_parent, resolve_recent_parent};
pub use search::{filter_local, search, SearchReport, SearchTrigger, SubtreeFailure};
pub use session::{
    FolderSession, ListingSource, ListingView, OpenDisposition, OpenOutcome, PickOutcome,
    SearchPlan, SearchRun, SearchStatus, SearchTicket, ShelfView,
};
pub use sort::{locale_compare, SortOrder};
