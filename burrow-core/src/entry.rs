use std::fmt;

/// Classification of a directory child, read from the filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Folder,
    File,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntryKind::Folder => "Folder",
            EntryKind::File => "File",
        };
        f.write_str(label)
    }
}

/// One child of a listed directory.
///
/// Entries are snapshots: they are rebuilt on every listing and never
/// updated in place, so the kind always reflects the filesystem at the
/// time of the read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    name: String,
    kind: EntryKind,
}

impl Entry {
    /// Create an entry from its base name and kind.
    pub fn new(name: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Create a folder entry.
    pub fn folder(name: impl Into<String>) -> Self {
        Self::new(name, EntryKind::Folder)
    }

    /// Create a file entry.
    pub fn file(name: impl Into<String>) -> Self {
        Self::new(name, EntryKind::File)
    }

    /// Return base name, unique within the parent directory.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return entry kind.
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Return whether the entry is a folder.
    pub fn is_folder(&self) -> bool {
        self.kind == EntryKind::Folder
    }
}
