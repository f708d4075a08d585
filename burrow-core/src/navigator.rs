use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, TimeZone};

use crate::entry::{Entry, EntryKind};
use crate::lister::list_directory;
use crate::mutator::ContentMutator;
use crate::path_state::PathState;
use crate::preferences::{PreferenceError, Preferences, SortPreference};
use crate::sorter::sort_entries;

/// Service surface used by front-ends to browse and edit the storage root.
///
/// The navigator holds no cached listing: every call to
/// [`Navigator::list_current`] reads the filesystem and the sort preference
/// again, so a listing taken after a mutation always reflects it.
#[derive(Debug)]
pub struct Navigator {
    path: PathState,
    mutator: ContentMutator,
    preferences: Arc<Preferences>,
}

impl Navigator {
    /// Start a browsing session at `root`.
    pub fn new(root: impl Into<PathBuf>, preferences: Arc<Preferences>) -> Self {
        Self {
            path: PathState::new(root),
            mutator: ContentMutator::new(),
            preferences,
        }
    }

    /// Return the fixed storage root.
    pub fn root_path(&self) -> &Path {
        self.path.root()
    }

    /// Return the current location.
    pub fn current_path(&self) -> &Path {
        self.path.current()
    }

    /// Return whether the session is at the root, i.e. `up` is a no-op.
    pub fn at_root(&self) -> bool {
        self.path.at_root()
    }

    /// Return the header label for the current location.
    pub fn breadcrumb(&self) -> String {
        self.path.breadcrumb()
    }

    /// Return shared preferences used for ordering listings.
    pub fn preferences(&self) -> &Arc<Preferences> {
        &self.preferences
    }

    /// List the current folder, ordered by the stored preference.
    pub fn list_current(&self) -> Vec<Entry> {
        let entries = list_directory(self.path.current());
        sort_entries(entries, self.preferences.sort_preference())
    }

    /// Descend into the folder `name` from the current listing.
    ///
    /// Files and names missing from the listing leave the location as is.
    pub fn enter(&mut self, name: &str) -> bool {
        let kind = list_directory(self.path.current())
            .into_iter()
            .find(|entry| entry.name() == name)
            .map(|entry| entry.kind());

        match kind {
            Some(EntryKind::Folder) => self.path.descend(name),
            Some(EntryKind::File) => {
                log::debug!("ignoring enter on file {name:?}");
                false
            },
            None => {
                log::debug!("ignoring enter on missing entry {name:?}");
                false
            },
        }
    }

    /// Move to the parent folder; no-op at the root.
    pub fn up(&mut self) -> bool {
        self.path.ascend()
    }

    /// Create a folder in the current location.
    pub fn make_folder(&self, name: &str) -> bool {
        self.mutator.create_folder(self.path.current(), name)
    }

    /// Store captured image bytes in the current location.
    pub fn capture(&self, bytes: &[u8]) -> String {
        self.mutator.save_captured_file(self.path.current(), bytes)
    }

    /// Same as [`Navigator::capture`] for a given instant.
    pub fn capture_at<Tz>(&self, bytes: &[u8], instant: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        self.mutator
            .save_captured_file_at(self.path.current(), bytes, instant)
    }

    /// Delete `entry` from the current location.
    pub fn remove(&self, entry: &Entry) -> bool {
        self.mutator.delete(self.path.current(), entry.name())
    }

    /// Persist a new sort order and notify subscribers.
    pub fn set_sort_preference(
        &self,
        preference: SortPreference,
    ) -> Result<(), PreferenceError> {
        self.preferences.set_sort_preference(preference)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::Arc;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::Navigator;
    use crate::entry::Entry;
    use crate::preferences::{Preferences, SortPreference};

    #[test]
    fn given_file_entry_when_enter_then_location_is_unchanged() {
        let root = test_temp_dir("enter_file");
        fs::write(root.join("b.txt"), "ok").expect("file should be created");
        let mut navigator =
            Navigator::new(&root, Arc::new(Preferences::in_memory()));

        assert!(!navigator.enter("b.txt"));
        assert!(!navigator.enter("missing"));
        assert!(navigator.at_root());

        fs::remove_dir_all(root).expect("test directory should be removed");
    }

    #[test]
    fn given_nested_folder_when_entered_then_breadcrumb_follows() {
        let root = test_temp_dir("breadcrumb");
        fs::create_dir_all(root.join("Photos").join("2023"))
            .expect("folders should be created");
        let mut navigator =
            Navigator::new(&root, Arc::new(Preferences::in_memory()));
        let root_name = root
            .file_name()
            .and_then(|name| name.to_str())
            .expect("temp dir should have a name")
            .to_string();

        assert!(navigator.enter("Photos"));
        assert!(navigator.enter("2023"));

        assert_eq!(
            navigator.breadcrumb(),
            format!("{root_name} / Photos / 2023")
        );
        assert_eq!(navigator.current_path(), root.join("Photos").join("2023"));

        fs::remove_dir_all(root).expect("test directory should be removed");
    }

    #[test]
    fn given_folder_when_removed_from_subfolder_then_listing_excludes_it() {
        let root = test_temp_dir("remove_nested");
        fs::create_dir_all(root.join("Photos").join("old"))
            .expect("folders should be created");
        let mut navigator =
            Navigator::new(&root, Arc::new(Preferences::in_memory()));
        navigator.enter("Photos");

        assert!(navigator.remove(&Entry::folder("old")));
        assert!(navigator.list_current().is_empty());

        fs::remove_dir_all(root).expect("test directory should be removed");
    }

    #[test]
    fn given_preference_change_when_set_then_listing_order_flips() {
        let root = test_temp_dir("sort_flip");
        fs::write(root.join("a"), "").expect("file should be created");
        fs::write(root.join("b"), "").expect("file should be created");
        let navigator =
            Navigator::new(&root, Arc::new(Preferences::in_memory()));

        navigator
            .set_sort_preference(SortPreference::DescendingByName)
            .expect("preference should be stored");

        assert_eq!(
            navigator.list_current(),
            vec![Entry::file("b"), Entry::file("a")]
        );

        fs::remove_dir_all(root).expect("test directory should be removed");
    }

    fn test_temp_dir(test_name: &str) -> std::path::PathBuf {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be monotonic")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!(
            "burrow-navigator-{test_name}-{stamp}-{}",
            std::process::id()
        ));

        fs::create_dir_all(&dir).expect("test directory should be created");
        dir
    }
}
