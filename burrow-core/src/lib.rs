//! Navigation and content management for the burrow file browser.
//!
//! The crate exposes a small synchronous service that front-ends call into:
//! - [`Navigator`] owns the current location inside a fixed storage root and
//!   composes listing, sorting and mutation into one surface,
//! - [`Preferences`] persists the sort order and notifies subscribers when it
//!   changes,
//! - [`NavigatorWorker`] moves a navigator onto a background thread and
//!   delivers fresh listings over a channel after every request.
//!
//! Filesystem failures are best-effort by contract: listings degrade to an
//! empty sequence and mutations are logged and swallowed. The `try_*`
//! variants on [`ContentMutator`] surface the underlying [`Error`] for callers
//! that want stronger guarantees.

mod atomic;
mod entry;
mod error;
mod lister;
mod mutator;
mod navigator;
mod path_state;
mod preferences;
mod sorter;
mod worker;

pub use entry::{Entry, EntryKind};
pub use error::{Error, Result};
pub use lister::list_directory;
pub use mutator::{CAPTURE_EXTENSION, ContentMutator, capture_file_name};
pub use navigator::Navigator;
pub use path_state::PathState;
pub use preferences::{
    FilePreferenceStore, MemoryPreferenceStore, PreferenceChanged,
    PreferenceError, PreferenceNotifier, PreferenceStore,
    PreferenceSubscription, Preferences, SORT_BY_KEY, SortPreference,
};
pub use sorter::sort_entries;
pub use worker::{NavigatorEvent, NavigatorRequest, NavigatorWorker, WorkerHandle};
