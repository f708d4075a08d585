/// Key under which the sort order is persisted.
pub const SORT_BY_KEY: &str = "SortBy";

const ASCENDING_TOKEN: &str = "Sort from A to Z";
const DESCENDING_TOKEN: &str = "Sort from Z to A";

/// Name ordering applied to directory listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortPreference {
    #[default]
    AscendingByName,
    DescendingByName,
}

impl SortPreference {
    /// Return the persisted label for this order.
    pub fn as_token(self) -> &'static str {
        match self {
            SortPreference::AscendingByName => ASCENDING_TOKEN,
            SortPreference::DescendingByName => DESCENDING_TOKEN,
        }
    }

    /// Parse a persisted label; unknown labels yield `None`.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            ASCENDING_TOKEN => Some(SortPreference::AscendingByName),
            DESCENDING_TOKEN => Some(SortPreference::DescendingByName),
            _ => None,
        }
    }

    /// Interpret a stored label.
    ///
    /// Only the ascending label selects ascending order; any other stored
    /// label reads as descending.
    pub fn from_stored(token: &str) -> Self {
        if token == ASCENDING_TOKEN {
            SortPreference::AscendingByName
        } else {
            SortPreference::DescendingByName
        }
    }

    /// Return the opposite order.
    pub fn toggled(self) -> Self {
        match self {
            SortPreference::AscendingByName => SortPreference::DescendingByName,
            SortPreference::DescendingByName => SortPreference::AscendingByName,
        }
    }
}
