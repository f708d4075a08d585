use std::path::PathBuf;

use burrow_core::SortPreference;
use thiserror::Error;

/// Errors emitted while parsing a shell line.
#[derive(Debug, Error)]
pub(crate) enum CommandError {
    #[error("Invalid command line: {0}")]
    Parse(#[from] shell_words::ParseError),
    #[error("Unknown command: {0}")]
    Unknown(String),
    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),
    #[error("Unknown sort order: {0} (use asc, desc or toggle)")]
    SortOrder(String),
}

/// Requested sort change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SortChange {
    Set(SortPreference),
    Toggle,
}

/// One parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    List,
    Enter(String),
    Up,
    MakeFolder(String),
    Remove(String),
    Capture(PathBuf),
    Sort(SortChange),
    ChangePassword,
    ClearPassword,
    Where,
    Help,
    Quit,
}

pub(crate) const HELP: &str = "\
ls                 list the current folder
cd <name>          open a folder (cd .. goes up)
up                 go to the parent folder
mkdir <name>       create a folder
rm <name>          delete a file or folder
capture <image>    save an image as a new JPEG capture
sort asc|desc|toggle
                   change the listing order
passwd             change the password
clear-password     remove the password
pwd                show the current location
help               show this help
quit               leave";

/// Parse one input line; blank lines yield `None`.
pub(crate) fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let words = shell_words::split(line)?;
    let Some((head, args)) = words.split_first() else {
        return Ok(None);
    };

    let command = match head.as_str() {
        "ls" => Command::List,
        "cd" => match required(args, "folder name")? {
            ".." => Command::Up,
            name => Command::Enter(name.to_string()),
        },
        "up" => Command::Up,
        "mkdir" => Command::MakeFolder(required(args, "folder name")?.to_string()),
        "rm" => Command::Remove(required(args, "entry name")?.to_string()),
        "capture" => Command::Capture(PathBuf::from(required(args, "image path")?)),
        "sort" => Command::Sort(parse_sort(required(args, "sort order")?)?),
        "passwd" => Command::ChangePassword,
        "clear-password" => Command::ClearPassword,
        "pwd" => Command::Where,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    Ok(Some(command))
}

fn required<'a>(
    args: &'a [String],
    what: &'static str,
) -> Result<&'a str, CommandError> {
    args.first()
        .map(String::as_str)
        .filter(|value| !value.is_empty())
        .ok_or(CommandError::MissingArgument(what))
}

fn parse_sort(value: &str) -> Result<SortChange, CommandError> {
    match value {
        "asc" => Ok(SortChange::Set(SortPreference::AscendingByName)),
        "desc" => Ok(SortChange::Set(SortPreference::DescendingByName)),
        "toggle" => Ok(SortChange::Toggle),
        other => Err(CommandError::SortOrder(other.to_string())),
    }
}
