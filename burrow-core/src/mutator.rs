use std::fmt;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Local, TimeZone};

use crate::atomic::write_atomic;
use crate::error::{Error, Result};
use crate::path_state::is_plain_name;

/// Extension given to captured images.
pub const CAPTURE_EXTENSION: &str = "jpg";

const CAPTURE_STAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Filesystem mutations scoped to a parent folder.
///
/// The plain methods follow the best-effort contract of the browser: they log
/// failures and report only whether the change happened. The `try_*` methods
/// return the underlying error instead.
#[derive(Debug, Default, Clone, Copy)]
pub struct ContentMutator;

impl ContentMutator {
    pub fn new() -> Self {
        Self
    }

    /// Create `parent/name`; the parent must already exist.
    pub fn create_folder(&self, parent: &Path, name: &str) -> bool {
        match self.try_create_folder(parent, name) {
            Ok(()) => true,
            Err(err) => {
                log::warn!(
                    "failed to create folder {name:?} in {}: {err}",
                    parent.display()
                );
                false
            },
        }
    }

    pub fn try_create_folder(&self, parent: &Path, name: &str) -> Result<()> {
        ensure_plain_name(name)?;
        let path = parent.join(name);
        fs::create_dir(&path)?;
        log::info!("created folder {}", path.display());
        Ok(())
    }

    /// Write captured image bytes under a name derived from the current time.
    ///
    /// Returns the generated file name even when the write failed, matching
    /// the fire-and-forget capture flow.
    pub fn save_captured_file(&self, parent: &Path, bytes: &[u8]) -> String {
        self.save_captured_file_at(parent, bytes, &Local::now())
    }

    /// Same as [`ContentMutator::save_captured_file`] for a given instant.
    pub fn save_captured_file_at<Tz>(
        &self,
        parent: &Path,
        bytes: &[u8],
        instant: &DateTime<Tz>,
    ) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let file_name = capture_file_name(instant);
        if let Err(err) = write_capture(parent, &file_name, bytes) {
            log::warn!(
                "failed to save capture {file_name} in {}: {err}",
                parent.display()
            );
        }
        file_name
    }

    pub fn try_save_captured_file_at<Tz>(
        &self,
        parent: &Path,
        bytes: &[u8],
        instant: &DateTime<Tz>,
    ) -> Result<String>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let file_name = capture_file_name(instant);
        write_capture(parent, &file_name, bytes)?;
        Ok(file_name)
    }

    /// Remove the file or folder (with its contents) at `parent/name`.
    pub fn delete(&self, parent: &Path, name: &str) -> bool {
        match self.try_delete(parent, name) {
            Ok(()) => true,
            Err(err) => {
                log::warn!(
                    "failed to delete {name:?} in {}: {err}",
                    parent.display()
                );
                false
            },
        }
    }

    pub fn try_delete(&self, parent: &Path, name: &str) -> Result<()> {
        ensure_plain_name(name)?;
        let path = parent.join(name);
        // Do not follow links: removing a link must not touch its target.
        let metadata = fs::symlink_metadata(&path)?;
        if metadata.is_dir() {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
        log::info!("deleted {}", path.display());
        Ok(())
    }
}

/// Build the `YYYYMMDDhhmmss.jpg` name used for a capture at `instant`.
///
/// Hours use the 24-hour clock, so morning and afternoon captures never
/// share a name.
pub fn capture_file_name<Tz>(instant: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let stamp = instant.format(CAPTURE_STAMP_FORMAT);
    format!("{stamp}.{CAPTURE_EXTENSION}")
}

fn ensure_plain_name(name: &str) -> Result<()> {
    if is_plain_name(name) {
        Ok(())
    } else {
        Err(Error::InvalidName(name.to_string()))
    }
}

fn write_capture(parent: &Path, file_name: &str, bytes: &[u8]) -> Result<()> {
    let path = parent.join(file_name);
    write_atomic(&path, bytes)?;
    log::info!("saved capture {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    use chrono::{TimeZone, Utc};

    use super::{ContentMutator, capture_file_name};
    use crate::error::Error;

    #[test]
    fn given_new_name_when_create_folder_then_directory_exists() {
        let root = test_temp_dir("create");
        let mutator = ContentMutator::new();

        assert!(mutator.create_folder(&root, "Photos"));
        assert!(root.join("Photos").is_dir());

        fs::remove_dir_all(root).expect("test directory should be removed");
    }

    #[test]
    fn given_existing_name_when_create_folder_then_failure_is_swallowed() {
        let root = test_temp_dir("collision");
        fs::write(root.join("taken"), "ok").expect("file should be created");
        let mutator = ContentMutator::new();

        assert!(!mutator.create_folder(&root, "taken"));
        assert!(root.join("taken").is_file());

        fs::remove_dir_all(root).expect("test directory should be removed");
    }

    #[test]
    fn given_invalid_names_when_create_folder_then_nothing_is_created() {
        let root = test_temp_dir("invalid");
        let mutator = ContentMutator::new();

        assert!(!mutator.create_folder(&root, ""));
        assert!(!mutator.create_folder(&root, "a/b"));
        assert!(matches!(
            mutator.try_create_folder(&root, ".."),
            Err(Error::InvalidName(_))
        ));
        assert_eq!(
            fs::read_dir(&root).expect("root should be readable").count(),
            0
        );

        fs::remove_dir_all(root).expect("test directory should be removed");
    }

    #[test]
    fn given_missing_parent_when_create_folder_then_no_intermediate_dirs() {
        let root = test_temp_dir("missing_parent");
        let mutator = ContentMutator::new();

        assert!(!mutator.create_folder(&root.join("absent"), "child"));
        assert!(!root.join("absent").exists());

        fs::remove_dir_all(root).expect("test directory should be removed");
    }

    #[test]
    fn given_instant_when_capture_name_built_then_uses_timestamp_format() {
        let instant = Utc
            .with_ymd_and_hms(2023, 1, 9, 14, 5, 7)
            .single()
            .expect("instant should be valid");

        assert_eq!(capture_file_name(&instant), "20230109140507.jpg");
    }

    #[test]
    fn given_morning_and_afternoon_instants_when_named_then_hours_differ() {
        let morning = Utc
            .with_ymd_and_hms(2023, 1, 9, 2, 5, 7)
            .single()
            .expect("instant should be valid");
        let afternoon = Utc
            .with_ymd_and_hms(2023, 1, 9, 14, 5, 7)
            .single()
            .expect("instant should be valid");

        assert_eq!(capture_file_name(&morning), "20230109020507.jpg");
        assert_ne!(capture_file_name(&morning), capture_file_name(&afternoon));
    }

    #[test]
    fn given_two_captures_in_same_second_when_saved_then_second_overwrites() {
        let root = test_temp_dir("capture_collision");
        let mutator = ContentMutator::new();
        let instant = Utc
            .with_ymd_and_hms(2023, 2, 1, 8, 30, 0)
            .single()
            .expect("instant should be valid");

        let first = mutator.save_captured_file_at(&root, b"first", &instant);
        let second = mutator.save_captured_file_at(&root, b"second", &instant);

        assert_eq!(first, second);
        assert_eq!(
            fs::read(root.join(&second)).expect("capture should be readable"),
            b"second"
        );
        assert_eq!(
            fs::read_dir(&root).expect("root should be readable").count(),
            1
        );

        fs::remove_dir_all(root).expect("test directory should be removed");
    }

    #[test]
    fn given_missing_parent_when_try_capture_then_error_is_returned() {
        let root = test_temp_dir("capture_missing");
        let mutator = ContentMutator::new();
        let instant = Utc::now();

        let result =
            mutator.try_save_captured_file_at(&root.join("absent"), b"x", &instant);

        assert!(matches!(result, Err(Error::Io(_))));

        fs::remove_dir_all(root).expect("test directory should be removed");
    }

    #[test]
    fn given_file_and_non_empty_folder_when_deleted_then_both_are_gone() {
        let root = test_temp_dir("delete");
        fs::write(root.join("b.txt"), "ok").expect("file should be created");
        fs::create_dir_all(root.join("Photos").join("nested"))
            .expect("folder should be created");
        fs::write(root.join("Photos").join("a.jpg"), "img")
            .expect("file should be created");
        let mutator = ContentMutator::new();

        assert!(mutator.delete(&root, "b.txt"));
        assert!(mutator.delete(&root, "Photos"));
        assert!(!root.join("b.txt").exists());
        assert!(!root.join("Photos").exists());

        fs::remove_dir_all(root).expect("test directory should be removed");
    }

    #[test]
    fn given_absent_entry_when_deleted_then_failure_is_swallowed() {
        let root = test_temp_dir("delete_absent");
        let mutator = ContentMutator::new();

        assert!(!mutator.delete(&root, "ghost"));
        assert!(!mutator.delete(&root, ".."));
        assert!(root.exists());

        fs::remove_dir_all(root).expect("test directory should be removed");
    }

    fn test_temp_dir(test_name: &str) -> std::path::PathBuf {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be monotonic")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!(
            "burrow-mutator-{test_name}-{stamp}-{}",
            std::process::id()
        ));

        fs::create_dir_all(&dir).expect("test directory should be created");
        dir
    }
}
