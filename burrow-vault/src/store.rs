use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::errors::VaultError;

/// Storage for the single gating password.
pub trait SecretStore: Send + Sync {
    /// Return the stored password, empty when none is set.
    fn password(&self) -> Result<SecretString, VaultError>;

    /// Replace the stored password.
    fn set_password(&self, password: &SecretString) -> Result<(), VaultError>;

    /// Reset the stored password to empty.
    fn clear_password(&self) -> Result<(), VaultError> {
        self.set_password(&SecretString::from(String::new()))
    }
}

#[derive(Default, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
struct VaultFile {
    #[serde(default)]
    password: String,
}

/// Password kept in a JSON file readable only by the owner.
#[derive(Debug, Clone)]
pub struct FileSecretStore {
    path: PathBuf,
}

impl FileSecretStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Return the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SecretStore for FileSecretStore {
    fn password(&self) -> Result<SecretString, VaultError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(contents) => Zeroizing::new(contents),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(SecretString::from(String::new()));
            },
            Err(err) => return Err(err.into()),
        };

        let file: VaultFile = serde_json::from_str(&data)?;
        Ok(SecretString::from(file.password.clone()))
    }

    fn set_password(&self, password: &SecretString) -> Result<(), VaultError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }

        let file = VaultFile {
            password: password.expose_secret().to_string(),
        };
        let payload = Zeroizing::new(serde_json::to_string(&file)?);
        write_private(&self.path, payload.as_bytes())?;
        log::info!("vault updated at {}", self.path.display());

        Ok(())
    }
}

/// Process-local store used by tests and throwaway sessions.
#[derive(Debug)]
pub struct MemorySecretStore {
    password: Mutex<SecretString>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::with_password("")
    }

    /// Start with `password` already stored.
    pub fn with_password(password: &str) -> Self {
        Self {
            password: Mutex::new(SecretString::from(password.to_string())),
        }
    }
}

impl Default for MemorySecretStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretStore for MemorySecretStore {
    fn password(&self) -> Result<SecretString, VaultError> {
        let guard = self.password.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(SecretString::from(guard.expose_secret().to_string()))
    }

    fn set_password(&self, password: &SecretString) -> Result<(), VaultError> {
        *self.password.lock().unwrap_or_else(PoisonError::into_inner) =
            SecretString::from(password.expose_secret().to_string());
        Ok(())
    }
}

fn write_private(path: &Path, payload: &[u8]) -> Result<(), std::io::Error> {
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, payload)?;
    restrict_permissions(&tmp_path)?;
    fs::rename(tmp_path, path)?;
    Ok(())
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<(), std::io::Error> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<(), std::io::Error> {
    Ok(())
}
