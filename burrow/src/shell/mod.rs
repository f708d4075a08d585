mod command;

use std::io::{BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use burrow_core::{
    Entry, Navigator, NavigatorEvent, NavigatorRequest, NavigatorWorker,
    PreferenceSubscription, Preferences, WorkerHandle,
};
use burrow_vault::{
    PasswordGate, SecretStore, SecretString, change_password,
};

use crate::capture::encode_jpeg;
use crate::console::{Echo, prompt_line, prompt_secret};
use crate::unlock::outcome_message;
use command::{Command, HELP, SortChange, parse_command};

/// Line-oriented front-end driving a navigator worker.
///
/// Every request is answered by a fresh listing from the worker, and a
/// preference change from any source triggers another one.
pub(crate) struct Shell<S, R, W> {
    worker: WorkerHandle,
    preferences: Arc<Preferences>,
    subscription: PreferenceSubscription,
    gate: PasswordGate<S>,
    input: R,
    output: W,
    echo: Echo,
    breadcrumb: String,
    entries: Vec<Entry>,
}

impl<S, R, W> Shell<S, R, W>
where
    S: SecretStore,
    R: BufRead,
    W: Write,
{
    pub(crate) fn new(
        navigator: Navigator,
        gate: PasswordGate<S>,
        input: R,
        output: W,
    ) -> Result<Self> {
        let preferences = Arc::clone(navigator.preferences());
        let subscription = preferences.subscribe();
        let breadcrumb = navigator.breadcrumb();
        let worker = NavigatorWorker::spawn(navigator)
            .context("failed to start navigator worker")?;

        Ok(Self {
            worker,
            preferences,
            subscription,
            gate,
            input,
            output,
            echo: Echo::Visible,
            breadcrumb,
            entries: Vec::new(),
        })
    }

    /// Set how typed passwords are shown.
    pub(crate) fn with_echo(mut self, echo: Echo) -> Self {
        self.echo = echo;
        self
    }

    /// Process commands until `quit` or end of input.
    pub(crate) fn run(&mut self) -> Result<()> {
        self.request(NavigatorRequest::List)?;

        loop {
            if self.subscription.take_pending() {
                self.request(NavigatorRequest::List)?;
            }

            let prompt = format!("{}> ", self.breadcrumb);
            let Some(line) =
                prompt_line(&mut self.input, &mut self.output, &prompt)?
            else {
                writeln!(self.output)?;
                break;
            };

            let command = match parse_command(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(err) => {
                    writeln!(self.output, "{err}")?;
                    continue;
                },
            };

            if command == Command::Quit {
                break;
            }
            self.execute(command)?;
        }

        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn into_output(self) -> W {
        self.output
    }

    fn execute(&mut self, command: Command) -> Result<()> {
        match command {
            Command::List => self.request(NavigatorRequest::List),
            Command::Enter(name) => match self.find_entry(&name) {
                Some(entry) if entry.is_folder() => {
                    self.request(NavigatorRequest::Enter(name))
                },
                Some(_) => {
                    writeln!(self.output, "{name} is not a folder")?;
                    Ok(())
                },
                None => self.report_missing(&name),
            },
            Command::Up => self.request(NavigatorRequest::Up),
            Command::MakeFolder(name) => {
                self.request(NavigatorRequest::MakeFolder(name))
            },
            Command::Remove(name) => match self.find_entry(&name) {
                Some(entry) => self.request(NavigatorRequest::Remove(entry)),
                None => self.report_missing(&name),
            },
            Command::Capture(path) => match encode_jpeg(&path) {
                Ok(bytes) => self.request(NavigatorRequest::Capture(bytes)),
                Err(err) => {
                    log::warn!("capture failed: {err:#}");
                    writeln!(self.output, "Could not read image: {err:#}")?;
                    Ok(())
                },
            },
            Command::Sort(change) => {
                let preference = match change {
                    SortChange::Set(preference) => preference,
                    SortChange::Toggle => {
                        self.preferences.sort_preference().toggled()
                    },
                };
                self.preferences
                    .set_sort_preference(preference)
                    .context("failed to save sort order")?;
                writeln!(self.output, "{}", preference.as_token())?;
                Ok(())
            },
            Command::ChangePassword => self.change_password(),
            Command::ClearPassword => {
                self.gate.clear().context("failed to clear password")?;
                writeln!(self.output, "Password cleared")?;
                Ok(())
            },
            Command::Where => {
                writeln!(self.output, "{}", self.breadcrumb)?;
                Ok(())
            },
            Command::Help => {
                writeln!(self.output, "{HELP}")?;
                Ok(())
            },
            Command::Quit => Ok(()),
        }
    }

    fn change_password(&mut self) -> Result<()> {
        let Some(password) = prompt_secret(
            &mut self.input,
            &mut self.output,
            "Set password: ",
            self.echo,
        )?
        else {
            return Ok(());
        };
        let Some(repeat) = prompt_secret(
            &mut self.input,
            &mut self.output,
            "Repeat password: ",
            self.echo,
        )?
        else {
            return Ok(());
        };

        let outcome = change_password(
            self.gate.store(),
            &SecretString::from(password),
            &SecretString::from(repeat),
        )
        .context("failed to store password")?;
        if let Some(message) = outcome_message(outcome) {
            writeln!(self.output, "{message}")?;
        }
        Ok(())
    }

    fn find_entry(&self, name: &str) -> Option<Entry> {
        self.entries
            .iter()
            .find(|entry| entry.name() == name)
            .cloned()
    }

    fn report_missing(&mut self, name: &str) -> Result<()> {
        writeln!(self.output, "No such entry: {name}")?;
        Ok(())
    }

    /// Send one request and render the events it produces.
    fn request(&mut self, request: NavigatorRequest) -> Result<()> {
        self.worker.send(request)?;

        loop {
            match self.worker.recv()? {
                NavigatorEvent::Captured { file_name } => {
                    writeln!(self.output, "Saved {file_name}")?;
                },
                NavigatorEvent::Listed {
                    breadcrumb,
                    at_root,
                    entries,
                } => {
                    self.breadcrumb = breadcrumb;
                    self.entries = entries;
                    self.render(at_root)?;
                    return Ok(());
                },
            }
        }
    }

    fn render(&mut self, at_root: bool) -> Result<()> {
        writeln!(self.output, "== {} ==", self.breadcrumb)?;
        if !at_root {
            writeln!(self.output, "  ../")?;
        }
        if self.entries.is_empty() {
            writeln!(self.output, "  (empty)")?;
        }
        for entry in &self.entries {
            let suffix = if entry.is_folder() { "/" } else { "" };
            writeln!(self.output, "  {}{suffix}", entry.name())?;
        }
        Ok(())
    }
}
