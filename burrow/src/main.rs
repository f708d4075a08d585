mod capture;
mod config;
mod console;
mod shell;
mod unlock;

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use burrow_core::{FilePreferenceStore, Navigator, Preferences};
use burrow_vault::{FileSecretStore, PasswordGate};
use env_logger::Env;

use crate::config::AppPaths;
use crate::console::Echo;
use crate::shell::Shell;

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let paths = AppPaths::resolve();
    paths.ensure_root()?;
    log::info!("storage root {}", paths.root.display());

    let mut input = io::stdin().lock();
    let mut output = io::stdout();

    let vault = FileSecretStore::new(&paths.vault);
    let mut gate = PasswordGate::new(vault).with_context(|| {
        format!("failed to open vault {}", paths.vault.display())
    })?;
    if !unlock::unlock(&mut gate, &mut input, &mut output, Echo::Hidden)? {
        return Ok(());
    }

    let preferences =
        Arc::new(Preferences::new(FilePreferenceStore::new(&paths.preferences)));
    let navigator = Navigator::new(&paths.root, preferences);

    let mut shell =
        Shell::new(navigator, gate, input, output)?.with_echo(Echo::Hidden);
    shell.run()
}
