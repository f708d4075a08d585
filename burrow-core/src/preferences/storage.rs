use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde_json::{Map, Value};
use thiserror::Error;

use crate::atomic::write_atomic;

use super::model::{SORT_BY_KEY, SortPreference};

/// Errors emitted while reading or writing preferences.
#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("preferences IO failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("preferences JSON failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Key-value backing for the persisted sort order.
pub trait PreferenceStore: Send + Sync {
    /// Return the stored order, or the default when unset or unreadable.
    fn sort_preference(&self) -> SortPreference;

    /// Persist a new order.
    fn set_sort_preference(
        &self,
        preference: SortPreference,
    ) -> Result<(), PreferenceError>;
}

/// Preferences persisted as a flat JSON object on disk.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Return the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn sort_preference(&self) -> SortPreference {
        let values = match load_values(&self.path) {
            Ok(values) => values,
            Err(err) => {
                log::warn!(
                    "failed to read preferences {}: {err}",
                    self.path.display()
                );
                return SortPreference::default();
            },
        };

        values
            .get(SORT_BY_KEY)
            .and_then(Value::as_str)
            .map(SortPreference::from_stored)
            .unwrap_or_default()
    }

    fn set_sort_preference(
        &self,
        preference: SortPreference,
    ) -> Result<(), PreferenceError> {
        // Unreadable content is replaced rather than blocking the write.
        let mut values = load_values(&self.path).unwrap_or_default();
        values.insert(
            SORT_BY_KEY.to_string(),
            Value::String(preference.as_token().to_string()),
        );
        save_values(&self.path, &values)
    }
}

/// Process-local store used by tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    token: Mutex<Option<String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn sort_preference(&self) -> SortPreference {
        self.token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_deref()
            .map(SortPreference::from_stored)
            .unwrap_or_default()
    }

    fn set_sort_preference(
        &self,
        preference: SortPreference,
    ) -> Result<(), PreferenceError> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) =
            Some(preference.as_token().to_string());
        Ok(())
    }
}

fn load_values(path: &Path) -> Result<Map<String, Value>, PreferenceError> {
    let data = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(Map::new());
        },
        Err(err) => return Err(err.into()),
    };

    match serde_json::from_str::<Value>(&data)? {
        Value::Object(values) => Ok(values),
        _ => Ok(Map::new()),
    }
}

fn save_values(
    path: &Path,
    values: &Map<String, Value>,
) -> Result<(), PreferenceError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }

    let payload = serde_json::to_string_pretty(values)?;
    write_atomic(path, payload.as_bytes())?;

    Ok(())
}
