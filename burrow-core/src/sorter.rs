use crate::entry::Entry;
use crate::preferences::SortPreference;

/// Order entries by name according to `preference`.
///
/// Names compare by code point. The sort is stable, so the result is
/// deterministic for equal inputs.
pub fn sort_entries(
    mut entries: Vec<Entry>,
    preference: SortPreference,
) -> Vec<Entry> {
    match preference {
        SortPreference::AscendingByName => {
            entries.sort_by(|left, right| left.name().cmp(right.name()));
        },
        SortPreference::DescendingByName => {
            entries.sort_by(|left, right| right.name().cmp(left.name()));
        },
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::sort_entries;
    use crate::entry::Entry;
    use crate::preferences::SortPreference;

    fn sample() -> Vec<Entry> {
        vec![
            Entry::file("b.txt"),
            Entry::folder("Photos"),
            Entry::file("a.jpg"),
            Entry::folder("Zoo"),
        ]
    }

    #[test]
    fn given_ascending_preference_when_sorted_then_names_are_non_decreasing() {
        let sorted = sort_entries(sample(), SortPreference::AscendingByName);
        let names: Vec<&str> = sorted.iter().map(Entry::name).collect();

        assert_eq!(names, vec!["Photos", "Zoo", "a.jpg", "b.txt"]);
    }

    #[test]
    fn given_descending_preference_when_sorted_then_names_are_non_increasing() {
        let sorted = sort_entries(sample(), SortPreference::DescendingByName);
        let names: Vec<&str> = sorted.iter().map(Entry::name).collect();

        assert_eq!(names, vec!["b.txt", "a.jpg", "Zoo", "Photos"]);
    }

    #[test]
    fn given_duplicate_names_when_sorted_then_input_order_is_kept() {
        let entries = vec![Entry::folder("same"), Entry::file("same")];

        let ascending =
            sort_entries(entries.clone(), SortPreference::AscendingByName);
        let descending =
            sort_entries(entries.clone(), SortPreference::DescendingByName);

        assert_eq!(ascending, entries);
        assert_eq!(descending, entries);
    }

    #[test]
    fn given_non_ascii_names_when_sorted_then_code_point_order_is_used() {
        let entries = vec![Entry::file("é"), Entry::file("z"), Entry::file("É")];

        let sorted = sort_entries(entries, SortPreference::AscendingByName);
        let names: Vec<&str> = sorted.iter().map(Entry::name).collect();

        assert_eq!(names, vec!["z", "É", "é"]);
    }
}
