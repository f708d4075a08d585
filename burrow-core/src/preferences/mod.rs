mod model;
mod notify;
mod storage;

pub use model::{SORT_BY_KEY, SortPreference};
pub use notify::{PreferenceChanged, PreferenceNotifier, PreferenceSubscription};
pub use storage::{
    FilePreferenceStore, MemoryPreferenceStore, PreferenceError,
    PreferenceStore,
};

/// Persisted preferences plus change notification.
///
/// Reads always go to the backing store so changes written elsewhere are
/// picked up on the next listing. Writes notify every live subscriber.
pub struct Preferences {
    store: Box<dyn PreferenceStore>,
    notifier: PreferenceNotifier,
}

impl Preferences {
    pub fn new(store: impl PreferenceStore + 'static) -> Self {
        Self {
            store: Box::new(store),
            notifier: PreferenceNotifier::new(),
        }
    }

    /// Preferences backed by an in-memory store, starting from defaults.
    pub fn in_memory() -> Self {
        Self::new(MemoryPreferenceStore::new())
    }

    /// Read the current sort order from the store.
    pub fn sort_preference(&self) -> SortPreference {
        self.store.sort_preference()
    }

    /// Persist a new sort order and notify subscribers.
    pub fn set_sort_preference(
        &self,
        preference: SortPreference,
    ) -> Result<(), PreferenceError> {
        self.store.set_sort_preference(preference)?;
        log::info!("sort preference set to {:?}", preference.as_token());
        self.notifier.notify();
        Ok(())
    }

    /// Register for "preference changed" signals.
    pub fn subscribe(&self) -> PreferenceSubscription {
        self.notifier.subscribe()
    }
}

impl std::fmt::Debug for Preferences {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preferences")
            .field("notifier", &self.notifier)
            .finish_non_exhaustive()
    }
}
