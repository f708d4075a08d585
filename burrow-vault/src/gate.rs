use secrecy::{ExposeSecret, SecretString};

use crate::errors::VaultError;
use crate::store::SecretStore;

/// Shortest password accepted by the gate, in characters.
pub const MIN_PASSWORD_LEN: usize = 4;

/// Step the gate is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateMode {
    /// No password stored yet; the next input becomes the candidate.
    Create,
    /// Candidate accepted; the next input must repeat it.
    Confirm,
    /// Password stored; the next input is checked against it.
    Unlock,
}

impl GateMode {
    /// Return the prompt shown for this step.
    pub fn prompt(self) -> &'static str {
        match self {
            GateMode::Create => "Set password",
            GateMode::Confirm => "Repeat password",
            GateMode::Unlock => "Enter password",
        }
    }
}

/// Result of submitting one input to the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    TooShort,
    AwaitingConfirmation,
    PasswordSet,
    Mismatch,
    Unlocked,
    WrongPassword,
}

/// Create/confirm/unlock flow in front of the browser.
pub struct PasswordGate<S> {
    store: S,
    mode: GateMode,
    candidate: Option<SecretString>,
    unlocked: bool,
}

impl<S: SecretStore> PasswordGate<S> {
    /// Build a gate whose first step depends on whether a password exists.
    pub fn new(store: S) -> Result<Self, VaultError> {
        let mode = if store.password()?.expose_secret().is_empty() {
            GateMode::Create
        } else {
            GateMode::Unlock
        };

        Ok(Self {
            store,
            mode,
            candidate: None,
            unlocked: false,
        })
    }

    pub fn mode(&self) -> GateMode {
        self.mode
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Feed one password entry into the flow.
    pub fn submit(
        &mut self,
        input: &SecretString,
    ) -> Result<GateOutcome, VaultError> {
        if !is_long_enough(input) {
            return Ok(GateOutcome::TooShort);
        }

        let outcome = match self.mode {
            GateMode::Create => {
                self.candidate = Some(copy_secret(input));
                self.mode = GateMode::Confirm;
                GateOutcome::AwaitingConfirmation
            },
            GateMode::Confirm => {
                let candidate = self.candidate.take();
                match candidate {
                    Some(candidate) if secrets_match(&candidate, input) => {
                        self.store.set_password(&candidate)?;
                        self.mode = GateMode::Unlock;
                        GateOutcome::PasswordSet
                    },
                    _ => {
                        self.mode = GateMode::Create;
                        GateOutcome::Mismatch
                    },
                }
            },
            GateMode::Unlock => {
                let stored = self.store.password()?;
                if secrets_match(&stored, input) {
                    self.unlocked = true;
                    GateOutcome::Unlocked
                } else {
                    GateOutcome::WrongPassword
                }
            },
        };

        log::debug!("password gate {outcome:?}, next step {:?}", self.mode);
        Ok(outcome)
    }

    /// Forget the stored password and start over.
    pub fn clear(&mut self) -> Result<(), VaultError> {
        self.store.clear_password()?;
        self.mode = GateMode::Create;
        self.candidate = None;
        self.unlocked = false;
        Ok(())
    }
}

/// Replace the stored password after the user typed it twice.
pub fn change_password<S: SecretStore + ?Sized>(
    store: &S,
    password: &SecretString,
    repeat: &SecretString,
) -> Result<GateOutcome, VaultError> {
    if !is_long_enough(password) {
        return Ok(GateOutcome::TooShort);
    }

    if !secrets_match(password, repeat) {
        return Ok(GateOutcome::Mismatch);
    }

    store.set_password(password)?;
    Ok(GateOutcome::PasswordSet)
}

fn is_long_enough(input: &SecretString) -> bool {
    input.expose_secret().chars().count() >= MIN_PASSWORD_LEN
}

fn copy_secret(secret: &SecretString) -> SecretString {
    SecretString::from(secret.expose_secret().to_string())
}

fn secrets_match(left: &SecretString, right: &SecretString) -> bool {
    let left = left.expose_secret().as_bytes();
    let right = right.expose_secret().as_bytes();
    if left.len() != right.len() {
        return false;
    }

    left.iter()
        .zip(right)
        .fold(0u8, |acc, (l, r)| acc | (l ^ r))
        == 0
}
