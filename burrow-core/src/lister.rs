use std::path::Path;

use crate::entry::{Entry, EntryKind};

/// Read the immediate children of `path`.
///
/// An unreadable or missing directory yields an empty listing. The order of
/// the returned entries is whatever the filesystem reports.
pub fn list_directory(path: &Path) -> Vec<Entry> {
    match read_entries(path) {
        Ok(entries) => entries,
        Err(err) => {
            log::warn!("failed to read directory {}: {err}", path.display());
            Vec::new()
        },
    }
}

fn read_entries(path: &Path) -> std::io::Result<Vec<Entry>> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(path)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log::warn!("failed to read entry in {}: {err}", path.display());
                continue;
            },
        };

        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                log::warn!(
                    "skipping entry with non UTF-8 name {raw:?} in {}",
                    path.display()
                );
                continue;
            },
        };
        // Follows symlinks, so a link to a folder is listed as a folder.
        let kind = if entry.path().is_dir() {
            EntryKind::Folder
        } else {
            EntryKind::File
        };

        entries.push(Entry::new(name, kind));
    }

    Ok(entries)
}
