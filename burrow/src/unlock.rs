use std::io::{BufRead, Write};

use anyhow::Result;
use burrow_vault::{
    GateOutcome, MIN_PASSWORD_LEN, PasswordGate, SecretStore, SecretString,
};

use crate::console::{Echo, prompt_secret};

/// Run the password gate until it unlocks.
///
/// Returns `false` when the input ends before the gate opens.
pub(crate) fn unlock<S, R, W>(
    gate: &mut PasswordGate<S>,
    input: &mut R,
    output: &mut W,
    echo: Echo,
) -> Result<bool>
where
    S: SecretStore,
    R: BufRead,
    W: Write,
{
    while !gate.is_unlocked() {
        let prompt = format!("{}: ", gate.mode().prompt());
        let Some(line) = prompt_secret(input, output, &prompt, echo)? else {
            return Ok(false);
        };

        let outcome = gate.submit(&SecretString::from(line))?;
        if let Some(message) = outcome_message(outcome) {
            writeln!(output, "{message}")?;
        }
    }

    Ok(true)
}

/// User-facing text for a gate outcome.
pub(crate) fn outcome_message(outcome: GateOutcome) -> Option<String> {
    let message = match outcome {
        GateOutcome::TooShort => format!(
            "Password must be {MIN_PASSWORD_LEN} characters or more"
        ),
        GateOutcome::AwaitingConfirmation => return None,
        GateOutcome::PasswordSet => String::from("Password set"),
        GateOutcome::Mismatch => String::from("Password mismatch"),
        GateOutcome::Unlocked => return None,
        GateOutcome::WrongPassword => String::from("Wrong password"),
    };
    Some(message)
}
