use std::collections::{BTreeSet, HashSet};

use crate::format::Entry;

/// Distinct trimmed group classifications, lexicographically ordered.
pub type GroupSet = BTreeSet<String>;

pub fn unique_groups<'a>(entries: impl IntoIterator<Item = &'a Entry>) -> GroupSet {
    entries
        .into_iter()
        .filter_map(Entry::trimmed_group)
        .map(str::to_owned)
        .collect()
}

/// Keeps the entries whose trimmed group is part of `selection`, in their
/// original order. An empty selection keeps nothing.
pub fn filter<'a, S: AsRef<str>>(
    entries: impl IntoIterator<Item = &'a Entry>,
    selection: impl IntoIterator<Item = S>,
) -> Vec<Entry> {
    let selection = selection
        .into_iter()
        .map(|x| x.as_ref().trim().to_owned())
        .filter(|x| !x.is_empty())
        .collect::<HashSet<_>>();

    if selection.is_empty() {
        return Vec::new();
    }

    entries
        .into_iter()
        .filter(|x| x.trimmed_group().is_some_and(|g| selection.contains(g)))
        .cloned()
        .collect()
}
