use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

const HOME_OVERRIDE_ENV: &str = "BURROW_HOME";
const APP_DIR: &str = "burrow";
const ROOT_DIR: &str = "Documents";
const PREFERENCES_FILE: &str = "preferences.json";
const VAULT_FILE: &str = "vault.json";

/// Storage locations resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AppPaths {
    pub(crate) root: PathBuf,
    pub(crate) preferences: PathBuf,
    pub(crate) vault: PathBuf,
}

impl AppPaths {
    /// Resolve paths from `BURROW_HOME`, then `HOME`, then the temp dir.
    pub(crate) fn resolve() -> Self {
        let base = std::env::var_os(HOME_OVERRIDE_ENV)
            .or_else(|| std::env::var_os("HOME"))
            .map(PathBuf::from)
            .unwrap_or_else(std::env::temp_dir);
        Self::under(&base)
    }

    pub(crate) fn under(base: &Path) -> Self {
        let config = base.join(".config").join(APP_DIR);
        Self {
            root: base
                .join(".local")
                .join("share")
                .join(APP_DIR)
                .join(ROOT_DIR),
            preferences: config.join(PREFERENCES_FILE),
            vault: config.join(VAULT_FILE),
        }
    }

    /// Create the storage root if it does not exist yet.
    pub(crate) fn ensure_root(&self) -> Result<()> {
        fs::create_dir_all(&self.root).with_context(|| {
            format!("failed to create storage root {}", self.root.display())
        })
    }
}
