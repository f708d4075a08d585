use std::path::{Component, Path, PathBuf};

const BREADCRUMB_SEPARATOR: &str = " / ";

/// Current browsing location bounded by a fixed storage root.
///
/// `current` is always `root` or a path reached from it by descending into
/// named children, so ascent stops once it is back at `root`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathState {
    root: PathBuf,
    current: PathBuf,
}

impl PathState {
    /// Start a new session positioned at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            current: root.clone(),
            root,
        }
    }

    /// Return the fixed storage root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Return the current location.
    pub fn current(&self) -> &Path {
        &self.current
    }

    /// Return whether the current location is the root.
    pub fn at_root(&self) -> bool {
        self.current == self.root
    }

    /// Append a child segment to the current location.
    ///
    /// This is path arithmetic only; the caller checks that `child` names an
    /// existing folder. Names that are not a single plain segment are
    /// ignored so the location can never leave the root.
    pub fn descend(&mut self, child: &str) -> bool {
        if !is_plain_name(child) {
            log::warn!("refusing to descend into {child:?}");
            return false;
        }

        self.current.push(child);
        log::debug!("descended into {}", self.current.display());
        true
    }

    /// Move to the parent of the current location; no-op at the root.
    pub fn ascend(&mut self) -> bool {
        if self.at_root() {
            return false;
        }

        if !self.current.pop() || !self.current.starts_with(&self.root) {
            self.current = self.root.clone();
        }
        log::debug!("ascended to {}", self.current.display());
        true
    }

    /// Build a header label like `Documents / Photos / 2023`.
    pub fn breadcrumb(&self) -> String {
        let mut label = root_label(&self.root);
        let Ok(relative) = self.current.strip_prefix(&self.root) else {
            return label;
        };

        for segment in relative.components() {
            label.push_str(BREADCRUMB_SEPARATOR);
            label.push_str(&segment.as_os_str().to_string_lossy());
        }

        label
    }
}

/// Build a display label for the root from its base name.
pub(crate) fn root_label(path: &Path) -> String {
    let display = path.display();
    path.file_name()
        .and_then(|name| name.to_str())
        .map(ToString::to_string)
        .unwrap_or_else(|| format!("{display}"))
}

/// Return whether `name` is exactly one normal path segment.
pub(crate) fn is_plain_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(segment)), None) => segment == name,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{PathState, is_plain_name, root_label};

    #[test]
    fn given_fresh_state_when_inspected_then_current_is_root() {
        let state = PathState::new("/data/Documents");

        assert_eq!(state.current(), state.root());
        assert!(state.at_root());
    }

    #[test]
    fn given_descend_then_ascend_when_applied_then_location_round_trips() {
        let mut state = PathState::new("/data/Documents");

        assert!(state.descend("Photos"));
        assert_eq!(state.current(), PathBuf::from("/data/Documents/Photos"));
        assert!(!state.at_root());

        assert!(state.ascend());
        assert_eq!(state.current(), PathBuf::from("/data/Documents"));
    }

    #[test]
    fn given_root_location_when_ascend_then_location_is_unchanged() {
        let mut state = PathState::new("/data/Documents");

        assert!(!state.ascend());
        assert_eq!(state.current(), PathBuf::from("/data/Documents"));
    }

    #[test]
    fn given_child_named_like_root_when_ascend_then_ascent_is_allowed() {
        let mut state = PathState::new("/data/Documents");
        state.descend("Documents");

        assert!(state.ascend());
        assert!(state.at_root());
    }

    #[test]
    fn given_name_with_separator_when_descend_then_location_is_unchanged() {
        let mut state = PathState::new("/data/Documents");

        assert!(!state.descend("../etc"));
        assert!(!state.descend(".."));
        assert!(!state.descend("a/b"));
        assert!(!state.descend(""));
        assert!(state.at_root());
    }

    #[test]
    fn given_nested_location_when_breadcrumb_requested_then_segments_are_joined()
     {
        let mut state = PathState::new("/data/Documents");
        assert_eq!(state.breadcrumb(), "Documents");

        state.descend("Photos");
        state.descend("2023");

        assert_eq!(state.breadcrumb(), "Documents / Photos / 2023");
    }

    #[test]
    fn given_root_path_without_file_name_when_label_requested_then_uses_display()
     {
        assert_eq!(root_label(PathBuf::from("/").as_path()), "/");
    }

    #[test]
    fn given_hidden_file_name_when_checked_then_it_is_plain() {
        assert!(is_plain_name(".config"));
        assert!(is_plain_name("report 2023.pdf"));
        assert!(!is_plain_name("."));
        assert!(!is_plain_name("dir/"));
    }
}
