//! Password storage and the unlock gate guarding the burrow browser.
//!
//! A [`SecretStore`] keeps a single password, empty meaning "not set".
//! [`PasswordGate`] walks a user through creating, confirming and entering
//! that password.

mod errors;
mod gate;
mod store;

pub use errors::VaultError;
pub use gate::{
    GateMode, GateOutcome, MIN_PASSWORD_LEN, PasswordGate, change_password,
};
pub use store::{FileSecretStore, MemorySecretStore, SecretStore};

pub use secrecy::{ExposeSecret, SecretString};
