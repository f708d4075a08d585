use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Write `payload` to `path` through a sibling temp file and a rename.
///
/// Readers see either the old content or the new one. The temp file is
/// removed again when the write or the rename fails.
pub(crate) fn write_atomic(path: &Path, payload: &[u8]) -> io::Result<()> {
    let tmp_path = tmp_path_for(path);
    if let Err(err) = fs::write(&tmp_path, payload) {
        let _ = fs::remove_file(&tmp_path);
        return Err(err);
    }
    if let Err(err) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(err);
    }
    Ok(())
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
