use std::io::{BufRead, Write};

use anyhow::Result;

/// Whether typed characters show up while a secret is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Echo {
    Visible,
    Hidden,
}

/// Print `prompt` and read one line without its line ending.
///
/// Returns `None` once the input is exhausted.
pub(crate) fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> Result<Option<String>> {
    write!(output, "{prompt}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    let trimmed = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed);
    Ok(Some(line))
}

/// Like [`prompt_line`], but with terminal echo off for [`Echo::Hidden`].
///
/// Echo can only be turned off when stdin is a terminal; otherwise the line
/// is read as-is.
pub(crate) fn prompt_secret<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    echo: Echo,
) -> Result<Option<String>> {
    let guard = match echo {
        Echo::Hidden => EchoGuard::disable(),
        Echo::Visible => None,
    };

    let line = prompt_line(input, output, prompt)?;
    if guard.is_some() {
        // The newline typed by the user was not echoed either.
        writeln!(output)?;
    }

    Ok(line)
}

/// Restores the terminal settings captured before echo was turned off.
#[cfg(unix)]
struct EchoGuard {
    original: nix::sys::termios::Termios,
}

#[cfg(unix)]
impl EchoGuard {
    fn disable() -> Option<Self> {
        use nix::sys::termios::{self, LocalFlags, SetArg};

        let stdin = std::io::stdin();
        let original = match termios::tcgetattr(&stdin) {
            Ok(original) => original,
            Err(err) => {
                log::debug!("stdin is not a terminal, echo stays on: {err}");
                return None;
            },
        };

        let mut hidden = original.clone();
        hidden.local_flags.remove(LocalFlags::ECHO);
        if let Err(err) = termios::tcsetattr(&stdin, SetArg::TCSANOW, &hidden) {
            log::warn!("failed to disable terminal echo: {err}");
            return None;
        }

        Some(Self { original })
    }
}

#[cfg(unix)]
impl Drop for EchoGuard {
    fn drop(&mut self) {
        use nix::sys::termios::{self, SetArg};

        if let Err(err) = termios::tcsetattr(
            std::io::stdin(),
            SetArg::TCSANOW,
            &self.original,
        ) {
            log::warn!("failed to restore terminal echo: {err}");
        }
    }
}

#[cfg(not(unix))]
struct EchoGuard;

#[cfg(not(unix))]
impl EchoGuard {
    fn disable() -> Option<Self> {
        None
    }
}
